use std::cmp::min;

use super::ty::{Type, TypeCell, TypeVar};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnifyError {
    #[error("cannot unify {0} with {1}")]
    CannotUnify(Type, Type),
    #[error("cannot construct infinite type: 't{0} occurs in the type it links to")]
    CircularType(usize),
    #[error("mismatched arity: expected {expected} arguments, found {found}")]
    MismatchedArity { expected: usize, found: usize },
}

/// Destructively unify two types.
///
/// On success the operands represent the same type: variable cells on
/// either side have been rewritten to link into the other. Errors leave
/// any links already established in place; the driver aborts on the first
/// error, so partial writes are never observed by later rules.
pub fn unify(t1: &Type, t2: &Type) -> Result<(), UnifyError> {
    match (t1, t2) {
        (Type::Int, Type::Int)
        | (Type::Float, Type::Float)
        | (Type::Atom, Type::Atom)
        | (Type::Bool, Type::Bool)
        | (Type::String, Type::String)
        | (Type::Unit, Type::Unit) => Ok(()),

        (Type::Var(c1), Type::Var(c2)) if c1.same_cell(c2) => Ok(()),

        (Type::Var(cell), other) => match cell.get() {
            TypeVar::Link(target) => unify(&target, other),
            TypeVar::Unbound { id, level } => bind(cell, id, level, other, t1, t2),
        },
        (other, Type::Var(cell)) => match cell.get() {
            TypeVar::Link(target) => unify(other, &target),
            TypeVar::Unbound { id, level } => bind(cell, id, level, other, t1, t2),
        },

        (Type::Func(params1, ret1), Type::Func(params2, ret2)) => {
            if params1.len() != params2.len() {
                return Err(UnifyError::MismatchedArity {
                    expected: params1.len(),
                    found: params2.len(),
                });
            }
            for (p1, p2) in params1.iter().zip(params2) {
                unify(p1, p2)?;
            }
            unify(ret1, ret2)
        }

        (Type::List(e1), Type::List(e2)) => unify(e1, e2),

        (Type::Clause(pat1, _, res1), Type::Clause(pat2, _, res2)) => {
            unify(pat1, pat2)?;
            unify(res1, res2)
        }

        _ => Err(UnifyError::CannotUnify(t1.clone(), t2.clone())),
    }
}

/// Bind an unbound variable cell to the other side.
///
/// Runs occurs-check-and-adjust first; on success the cell becomes a link.
/// Two distinct cells carrying the same label mean the sharing invariant
/// is already broken, which is reported as `CannotUnify` rather than as a
/// circular type.
fn bind(
    cell: &TypeCell,
    id: usize,
    level: usize,
    other: &Type,
    t1: &Type,
    t2: &Type,
) -> Result<(), UnifyError> {
    if let Type::Var(other_cell) = other {
        if let TypeVar::Unbound { id: other_id, .. } = other_cell.get() {
            if other_id == id {
                return Err(UnifyError::CannotUnify(t1.clone(), t2.clone()));
            }
        }
    }
    occurs_check_adjust(id, level, other)?;
    cell.set(TypeVar::Link(other.clone()));
    Ok(())
}

/// Walk a type looking for the variable `id`, lowering levels on the way.
///
/// Every unbound variable encountered has its level replaced by the
/// minimum of its own level and `level`, which keeps variables reachable
/// from an outer binding from being generalized at an inner one. Finding
/// `id` itself means the link about to be written would close a cycle.
fn occurs_check_adjust(id: usize, level: usize, ty: &Type) -> Result<(), UnifyError> {
    match ty {
        Type::Int
        | Type::Float
        | Type::Atom
        | Type::Bool
        | Type::String
        | Type::Unit
        | Type::QVar(_) => Ok(()),
        Type::List(elem) => occurs_check_adjust(id, level, elem),
        Type::Func(params, ret) => {
            for param in params {
                occurs_check_adjust(id, level, param)?;
            }
            occurs_check_adjust(id, level, ret)
        }
        Type::Clause(pattern, guard, result) => {
            occurs_check_adjust(id, level, pattern)?;
            if let Some(guard) = guard {
                occurs_check_adjust(id, level, guard)?;
            }
            occurs_check_adjust(id, level, result)
        }
        Type::Var(cell) => match cell.get() {
            TypeVar::Link(target) => occurs_check_adjust(id, level, &target),
            TypeVar::Unbound {
                id: other_id,
                level: other_level,
            } => {
                if other_id == id {
                    Err(UnifyError::CircularType(id))
                } else {
                    cell.set(TypeVar::Unbound {
                        id: other_id,
                        level: min(other_level, level),
                    });
                    Ok(())
                }
            }
        },
    }
}
