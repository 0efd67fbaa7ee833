//! Function signature registration
//!
//! First pass over the program's top-level statements. Only functions
//! defined directly in the program block are registered; a definition
//! anywhere else is rejected when the statement pass reaches it.

use rustc_hash::FxHashMap as HashMap;

use crate::ast::{Program, Span};
use crate::sema::{FunctionSignature, SemaError};

use super::SemanticAnalyzer;

impl SemanticAnalyzer {
    pub(super) fn register_functions(&mut self, program: &Program) -> Result<(), SemaError> {
        let mut defined_at: HashMap<&str, Span> = HashMap::default();

        for def in program.functions() {
            let name = def.name.node.as_str();
            if let Some(previous) = defined_at.insert(name, def.name.span) {
                return Err(SemaError::Redeclaration {
                    name: name.to_string(),
                    span: def.name.span,
                    previous,
                });
            }

            let signature = FunctionSignature {
                params: def.params.iter().map(|p| p.ty.node).collect(),
                returns: def.returns(),
            };
            log::trace!(
                "registered '{}' ({} params) -> {}",
                name,
                signature.params.len(),
                crate::ast::display_return(signature.returns)
            );
            self.signatures.insert(name.to_string(), signature);
        }

        Ok(())
    }
}
