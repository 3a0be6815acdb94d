//! # Type Environment
//!
//! The type environment maps names to type schemes during inference.
//!
//! ## Design
//!
//! `TypeEnv` is a persistent value: operations return new environments and
//! never modify one in place. The driver clones-and-extends on the way into
//! a scope, and simply drops the extension on the way out, so inner
//! bindings can never leak to outer callers.
//!
//! Inserting a name replaces any previous binding for it: lookups always
//! observe the most recent binding, which is how shadowing behaves in the
//! source language.
//!
//! ## Schemes in the Environment
//!
//! The environment stores schemes - types that may contain `QVar`s. A
//! lookup alone does not make the binding usable; the driver instantiates
//! the scheme at its current level so every use site works on fresh cells:
//!
//! ```text
//! // Environment contains:
//! // id: 't0 -> 't0          (with 't0 quantified)
//!
//! // First use:  instantiated as 't5 -> 't5
//! // Second use: instantiated as 't6 -> 't6
//! ```
//!
//! ## Related Modules
//!
//! - [`crate::types::ty`] - Type definitions
//! - [`crate::types::scheme`] - Instantiation of looked-up schemes
//! - [`crate::builtins`] - The seed bindings for new environments

use std::collections::HashMap;

use super::ty::Type;

/// Type environment mapping names to type schemes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeEnv {
    bindings: HashMap<String, Type>,
}

impl TypeEnv {
    /// Create a new empty type environment.
    pub fn empty() -> Self {
        TypeEnv {
            bindings: HashMap::new(),
        }
    }

    /// Create a new environment with initial bindings.
    pub fn with_bindings(bindings: Vec<(String, Type)>) -> Self {
        TypeEnv {
            bindings: bindings.into_iter().collect(),
        }
    }

    /// Look up the scheme bound to a name.
    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.bindings.get(name)
    }

    /// Extend this environment with a new binding.
    ///
    /// Returns a new environment; an existing binding for the same name is
    /// shadowed.
    pub fn extend(&self, name: String, scheme: Type) -> TypeEnv {
        let mut bindings = self.bindings.clone();
        bindings.insert(name, scheme);
        TypeEnv { bindings }
    }

    /// Extend this environment with multiple bindings at once.
    pub fn extend_many(&self, new_bindings: Vec<(String, Type)>) -> TypeEnv {
        let mut bindings = self.bindings.clone();
        bindings.extend(new_bindings);
        TypeEnv { bindings }
    }
}
