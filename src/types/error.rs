//! # Type Error Definitions
//!
//! Errors produced by type inference. Every error carries the source line
//! the parser recorded for the offending expression. Unification failures
//! are raised by the engine as [`UnifyError`] and converted here so the
//! driver can attach a position.

use super::ty::Type;
use super::unify::UnifyError;

/// Type error encountered during type inference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// Reference to a name with no binding in scope.
    #[error("line {line}: unbound variable: {name}")]
    UnboundVariable { name: String, line: usize },

    /// Two types that should be equal cannot be unified.
    #[error("line {line}: cannot unify {left} with {right}")]
    CannotUnify {
        left: Type,
        right: Type,
        line: usize,
    },

    /// The occurs check rejected an infinite type.
    #[error("line {line}: cannot construct infinite type containing 't{var}")]
    CircularType { var: usize, line: usize },

    /// Function applied with the wrong number of arguments.
    #[error("line {line}: mismatched arity: expected {expected} arguments, found {found}")]
    MismatchedArity {
        expected: usize,
        found: usize,
        line: usize,
    },
}

impl TypeError {
    /// Create an unbound variable error.
    pub fn unbound_variable(name: String, line: usize) -> Self {
        TypeError::UnboundVariable { name, line }
    }

    /// Create a unification mismatch error.
    pub fn cannot_unify(left: Type, right: Type, line: usize) -> Self {
        TypeError::CannotUnify { left, right, line }
    }

    /// Attach a source line to a unification error.
    pub fn from_unify(err: UnifyError, line: usize) -> Self {
        match err {
            UnifyError::CannotUnify(left, right) => TypeError::CannotUnify { left, right, line },
            UnifyError::CircularType(var) => TypeError::CircularType { var, line },
            UnifyError::MismatchedArity { expected, found } => TypeError::MismatchedArity {
                expected,
                found,
                line,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbound_variable_display() {
        let err = TypeError::unbound_variable("x".to_string(), 3);
        assert_eq!(err.to_string(), "line 3: unbound variable: x");
    }

    #[test]
    fn test_cannot_unify_display() {
        let err = TypeError::cannot_unify(Type::Int, Type::Atom, 7);
        assert_eq!(err.to_string(), "line 7: cannot unify Int with Atom");
    }

    #[test]
    fn test_from_unify_keeps_kind() {
        let err = TypeError::from_unify(UnifyError::CircularType(2), 1);
        assert_eq!(err, TypeError::CircularType { var: 2, line: 1 });

        let err = TypeError::from_unify(
            UnifyError::MismatchedArity {
                expected: 2,
                found: 1,
            },
            4,
        );
        assert!(matches!(err, TypeError::MismatchedArity { line: 4, .. }));
    }
}
