//! Type representations for the language

use std::fmt;

/// Value types a variable, parameter or expression can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Float,
    Bool,
    /// 24-bit RGB value written as `#rrggbb`
    Colour,
    String,
}

impl Type {
    /// Resolve a type keyword (`int`, `float`, ...) to its type
    pub fn from_keyword(word: &str) -> Option<Type> {
        match word {
            "int" => Some(Type::Int),
            "float" => Some(Type::Float),
            "bool" => Some(Type::Bool),
            "colour" => Some(Type::Colour),
            "string" => Some(Type::String),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Type::Int => "int",
            Type::Float => "float",
            Type::Bool => "bool",
            Type::Colour => "colour",
            Type::String => "string",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Display name for an optional (function return) type, `None` being void
pub fn display_return(ty: Option<Type>) -> &'static str {
    match ty {
        Some(ty) => ty.display_name(),
        None => "void",
    }
}
