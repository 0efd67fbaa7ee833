//! Lexer for the pixel language
//!
//! Tokenizing runs in two steps. The automaton generated by logos scans the
//! source with maximal munch and reports which accept state it stopped in;
//! [`accept_kind`] turns that state into a [`TokenKind`]. Words then go
//! through [`classify_word`], which moves reserved words, type names,
//! boolean literals, word operators and built-in primitives out of the
//! generic identifier kind.

use logos::Logos;
use std::fmt;

use crate::ast::Span;

/// Accept states of the scanning automaton
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip(r"//[^\n]*", allow_greedy = true))]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
enum Accept {
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Word,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"[0-9]+\.[0-9]+")]
    Float,

    #[regex(r"#[0-9a-fA-F][0-9a-fA-F][0-9a-fA-F][0-9a-fA-F][0-9a-fA-F][0-9a-fA-F]")]
    Colour,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    Str,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("<=")]
    LessEq,
    #[token(">=")]
    GreaterEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,

    #[token("=")]
    Assign,
    #[token("->")]
    Arrow,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
}

/// Token categories seen by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,

    // Literals
    IntLiteral,
    FloatLiteral,
    BoolLiteral,
    ColourLiteral,
    StringLiteral,

    // Keywords
    Let,
    If,
    Else,
    While,
    For,
    Return,
    Fun,

    /// int, float, bool, colour, string
    TypeName,

    // Built-in primitives
    Width,
    Height,
    Read,
    RandomInt,
    Print,
    Delay,
    Write,
    WriteBox,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    And,
    Or,
    Not,
    Less,
    Greater,
    LessEq,
    GreaterEq,
    EqEq,
    NotEq,
    Assign,
    Arrow,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    Colon,
    Semicolon,
    Comma,

    Eof,
}

impl TokenKind {
    /// `+`, `-`, `or`
    pub fn is_additive_op(&self) -> bool {
        matches!(self, TokenKind::Plus | TokenKind::Minus | TokenKind::Or)
    }

    /// `*`, `/`, `%`, `and`
    pub fn is_multiplicative_op(&self) -> bool {
        matches!(
            self,
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent | TokenKind::And
        )
    }

    pub fn is_relational_op(&self) -> bool {
        matches!(
            self,
            TokenKind::Less
                | TokenKind::Greater
                | TokenKind::LessEq
                | TokenKind::GreaterEq
                | TokenKind::EqEq
                | TokenKind::NotEq
        )
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::IntLiteral
                | TokenKind::FloatLiteral
                | TokenKind::BoolLiteral
                | TokenKind::ColourLiteral
                | TokenKind::StringLiteral
        )
    }

    /// Human readable description used in diagnostics
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::IntLiteral => "integer literal",
            TokenKind::FloatLiteral => "float literal",
            TokenKind::BoolLiteral => "boolean literal",
            TokenKind::ColourLiteral => "colour literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Let => "'let'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::For => "'for'",
            TokenKind::Return => "'return'",
            TokenKind::Fun => "'fun'",
            TokenKind::TypeName => "type name",
            TokenKind::Width => "'__width'",
            TokenKind::Height => "'__height'",
            TokenKind::Read => "'__read'",
            TokenKind::RandomInt => "'__random_int'",
            TokenKind::Print => "'__print'",
            TokenKind::Delay => "'__delay'",
            TokenKind::Write => "'__write'",
            TokenKind::WriteBox => "'__write_box'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::And => "'and'",
            TokenKind::Or => "'or'",
            TokenKind::Not => "'not'",
            TokenKind::Less => "'<'",
            TokenKind::Greater => "'>'",
            TokenKind::LessEq => "'<='",
            TokenKind::GreaterEq => "'>='",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Assign => "'='",
            TokenKind::Arrow => "'->'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Colon => "':'",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token with its source text and span
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }
}

/// An error that occurred during lexing
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind} at {}..{}", .span.start, .span.end)]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexErrorKind {
    #[error("unexpected character {0:?}")]
    UnexpectedChar(String),

    #[error("unterminated block comment")]
    UnterminatedComment,
}

impl LexError {
    pub fn new(span: Span, kind: LexErrorKind) -> Self {
        Self { span, kind }
    }

    pub fn format_with_source_and_file(&self, source: &str, filename: Option<&str>) -> String {
        format!(
            "error: lexical error\n{}",
            self.span
                .format_error_context(source, filename, &self.kind.to_string())
        )
    }
}

/// Map an accept state to the token kind it produces
fn accept_kind(state: Accept) -> TokenKind {
    match state {
        Accept::Word => TokenKind::Identifier,
        Accept::Integer => TokenKind::IntLiteral,
        Accept::Float => TokenKind::FloatLiteral,
        Accept::Colour => TokenKind::ColourLiteral,
        Accept::Str => TokenKind::StringLiteral,
        Accept::Plus => TokenKind::Plus,
        Accept::Minus => TokenKind::Minus,
        Accept::Star => TokenKind::Star,
        Accept::Slash => TokenKind::Slash,
        Accept::Percent => TokenKind::Percent,
        Accept::Less => TokenKind::Less,
        Accept::Greater => TokenKind::Greater,
        Accept::LessEq => TokenKind::LessEq,
        Accept::GreaterEq => TokenKind::GreaterEq,
        Accept::EqEq => TokenKind::EqEq,
        Accept::NotEq => TokenKind::NotEq,
        Accept::Assign => TokenKind::Assign,
        Accept::Arrow => TokenKind::Arrow,
        Accept::LParen => TokenKind::LParen,
        Accept::RParen => TokenKind::RParen,
        Accept::LBrace => TokenKind::LBrace,
        Accept::RBrace => TokenKind::RBrace,
        Accept::Colon => TokenKind::Colon,
        Accept::Semicolon => TokenKind::Semicolon,
        Accept::Comma => TokenKind::Comma,
    }
}

/// Reclassify a scanned word. Anything not reserved stays an identifier.
pub fn classify_word(word: &str) -> TokenKind {
    match word {
        "let" => TokenKind::Let,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "while" => TokenKind::While,
        "for" => TokenKind::For,
        "return" => TokenKind::Return,
        "fun" => TokenKind::Fun,
        "int" | "float" | "bool" | "colour" | "string" => TokenKind::TypeName,
        "true" | "false" => TokenKind::BoolLiteral,
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "not" => TokenKind::Not,
        "__width" => TokenKind::Width,
        "__height" => TokenKind::Height,
        "__read" => TokenKind::Read,
        "__random_int" => TokenKind::RandomInt,
        "__print" => TokenKind::Print,
        "__delay" => TokenKind::Delay,
        "__write" => TokenKind::Write,
        "__write_box" => TokenKind::WriteBox,
        _ => TokenKind::Identifier,
    }
}

/// Lex source code into tokens, ending with a single `Eof` token
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Accept::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let span = Span::new(range.start, range.end);
        match result {
            // closed comments are skipped whole, so `/*` here never ends
            Ok(Accept::Slash) if lexer.remainder().starts_with('*') => {
                return Err(LexError::new(
                    Span::new(range.start, source.len()),
                    LexErrorKind::UnterminatedComment,
                ));
            }
            Ok(state) => {
                let lexeme = lexer.slice();
                let kind = match accept_kind(state) {
                    TokenKind::Identifier => classify_word(lexeme),
                    kind => kind,
                };
                tokens.push(Token::new(kind, lexeme, span));
            }
            Err(()) => {
                let found = source[range.start..]
                    .chars()
                    .next()
                    .map(String::from)
                    .unwrap_or_default();
                return Err(LexError::new(span, LexErrorKind::UnexpectedChar(found)));
            }
        }
    }

    tokens.push(Token::new(
        TokenKind::Eof,
        "",
        Span::new(source.len(), source.len()),
    ));

    log::debug!("lexed {} tokens", tokens.len());
    if log::log_enabled!(log::Level::Trace) {
        for token in &tokens {
            log::trace!("{:?} {:?} @{}..{}", token.kind, token.lexeme, token.span.start, token.span.end);
        }
    }

    Ok(tokens)
}
