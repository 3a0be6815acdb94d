//! Built-in function seed for new environments.
//!
//! The Merl prelude pre-declares the arithmetic operators: `+ - * /` on
//! integers and their dotted variants `+. -. *. /.` on floats. All of
//! them are closed binary schemes, so instantiation at a use site is the
//! identity.

use crate::types::env::TypeEnv;
use crate::types::ty::Type;

/// The `(name, scheme)` pairs every fresh environment is seeded with.
pub fn builtin_schemes() -> Vec<(String, Type)> {
    let int_op = || Type::func(vec![Type::Int, Type::Int], Type::Int);
    let float_op = || Type::func(vec![Type::Float, Type::Float], Type::Float);

    vec![
        ("+".to_string(), int_op()),
        ("-".to_string(), int_op()),
        ("*".to_string(), int_op()),
        ("/".to_string(), int_op()),
        ("+.".to_string(), float_op()),
        ("-.".to_string(), float_op()),
        ("*.".to_string(), float_op()),
        ("/.".to_string(), float_op()),
    ]
}

/// Build a fresh environment seeded with the built-ins.
pub fn default_env() -> TypeEnv {
    TypeEnv::with_bindings(builtin_schemes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_contains_integer_arithmetic() {
        let env = default_env();
        for op in ["+", "-", "*", "/"] {
            assert_eq!(
                env.lookup(op),
                Some(&Type::func(vec![Type::Int, Type::Int], Type::Int)),
                "missing or wrong scheme for {}",
                op
            );
        }
    }

    #[test]
    fn test_seed_contains_float_arithmetic() {
        let env = default_env();
        for op in ["+.", "-.", "*.", "/."] {
            assert_eq!(
                env.lookup(op),
                Some(&Type::func(vec![Type::Float, Type::Float], Type::Float)),
                "missing or wrong scheme for {}",
                op
            );
        }
    }
}
