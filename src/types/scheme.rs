//! # Generalization and Instantiation of Type Schemes
//!
//! A scheme is a type that may contain quantified variables (`QVar`).
//! Generalization produces schemes at let-binding boundaries; instantiation
//! refreshes a scheme into a monotype at every use site.
//!
//! Both directions preserve sharing: generalizing the same variable twice
//! yields the same `QVar` label, and instantiating the same `QVar` twice
//! within one scheme yields the same fresh cell.

use std::collections::HashMap;

use super::ty::{Type, TypeCell, TypeVar};

/// Promote unbound variables minted below the given level into `QVar`s.
///
/// A variable qualifies iff its level is strictly greater than `level`:
/// it was created while inferring the binding being generalized and has
/// not escaped into the surrounding context. Variables at or below the
/// level stay as live cells, still unifiable with the context. Links are
/// followed transparently and no cell is mutated, so the input type
/// remains valid.
pub fn generalize(level: usize, ty: &Type) -> Type {
    match ty {
        Type::Int
        | Type::Float
        | Type::Atom
        | Type::Bool
        | Type::String
        | Type::Unit
        | Type::QVar(_) => ty.clone(),
        Type::List(elem) => Type::List(Box::new(generalize(level, elem))),
        Type::Func(params, ret) => Type::Func(
            params.iter().map(|p| generalize(level, p)).collect(),
            Box::new(generalize(level, ret)),
        ),
        Type::Clause(pattern, guard, result) => Type::Clause(
            Box::new(generalize(level, pattern)),
            guard.as_ref().map(|g| Box::new(generalize(level, g))),
            Box::new(generalize(level, result)),
        ),
        Type::Var(cell) => match cell.get() {
            TypeVar::Unbound { id, level: l } if l > level => Type::QVar(id),
            TypeVar::Unbound { .. } => ty.clone(),
            TypeVar::Link(target) => generalize(level, &target),
        },
    }
}

/// Refresh a scheme into a monotype.
///
/// Every `QVar` is replaced by a brand-new unbound cell obtained from
/// `fresh`; occurrences of the same label are replaced by the same cell
/// via the carried cache, so the scheme's internal sharing survives.
/// Unbound cells already in the scheme are shared unchanged, and links
/// are followed transparently.
pub fn instantiate(scheme: &Type, fresh: &mut impl FnMut() -> TypeCell) -> Type {
    let mut cache = HashMap::new();
    instantiate_with(scheme, &mut cache, fresh)
}

fn instantiate_with(
    ty: &Type,
    cache: &mut HashMap<usize, TypeCell>,
    fresh: &mut impl FnMut() -> TypeCell,
) -> Type {
    match ty {
        Type::Int
        | Type::Float
        | Type::Atom
        | Type::Bool
        | Type::String
        | Type::Unit => ty.clone(),
        Type::QVar(id) => {
            let cell = cache.entry(*id).or_insert_with(|| fresh()).clone();
            Type::Var(cell)
        }
        Type::List(elem) => Type::List(Box::new(instantiate_with(elem, cache, fresh))),
        Type::Func(params, ret) => Type::Func(
            params
                .iter()
                .map(|p| instantiate_with(p, cache, fresh))
                .collect(),
            Box::new(instantiate_with(ret, cache, fresh)),
        ),
        Type::Clause(pattern, guard, result) => Type::Clause(
            Box::new(instantiate_with(pattern, cache, fresh)),
            guard
                .as_ref()
                .map(|g| Box::new(instantiate_with(g, cache, fresh))),
            Box::new(instantiate_with(result, cache, fresh)),
        ),
        Type::Var(cell) => match cell.get() {
            TypeVar::Unbound { .. } => ty.clone(),
            TypeVar::Link(target) => instantiate_with(&target, cache, fresh),
        },
    }
}
