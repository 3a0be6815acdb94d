//! # Core Type System Definitions
//!
//! This module defines the foundational types of the Merl inference
//! engine: the type algebra, mutable type-variable cells, and the
//! copy/resolve operations the driver builds on.
//!
//! ## Overview
//!
//! The type system is built from three components:
//!
//! - **Type** - Ground types, lists, n-ary function types, match-clause
//!   types, type variables, and quantified variables
//! - **TypeCell** - A shared mutable cell holding a variable's current
//!   binding state
//! - **TypeVar** - The cell contents: still unbound, or linked to a type
//!
//! ## Ground Types
//!
//! Merl supports the following ground types:
//!
//! - `Int` - Integer values
//! - `Float` - Floating point values
//! - `Atom` - Interned symbolic constants (`'ok`, `'error`)
//! - `Bool` - Boolean values
//! - `String` - String values
//! - `Unit` - The unit value `()`
//!
//! ## Type Variables and Sharing
//!
//! A type variable is a `TypeCell`: one reference-counted mutable cell.
//! Every occurrence of "the same" variable holds a clone of the same cell,
//! so a single unification step is visible everywhere at once:
//!
//! ```text
//! // before: ('t0, 't0) -> 't0     all three share one cell
//! // unify 't0 with Int
//! // after:  (Int, Int) -> Int     one write, three readers
//! ```
//!
//! An unbound cell records the `level` - the let-binding depth at which it
//! was created. Levels decide which variables generalization may quantify;
//! see [`crate::types::scheme`].
//!
//! ## Quantified Variables
//!
//! `QVar` is a universally-quantified variable bound by the enclosing type
//! scheme. Schemes live in the environment; instantiation replaces every
//! `QVar` with a fresh cell before the type is used.
//!
//! ## Related Modules
//!
//! - [`crate::types::unify`] - Destructive unification over cells
//! - [`crate::types::scheme`] - Generalization and instantiation
//! - [`crate::types::infer`] - The inference driver

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// All possible types in Merl.
///
/// # Variants
///
/// * `Int`, `Float`, `Atom`, `Bool`, `String`, `Unit` - Ground types
/// * `List` - Homogeneous list type
/// * `Func` - Function type with explicit parameter-list arity
/// * `Clause` - Type of one match arm: pattern type, reserved guard slot,
///   result type
/// * `Var` - Reference to a mutable variable cell
/// * `QVar` - Universally-quantified variable bound by the enclosing scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Int,
    Float,
    Atom,
    Bool,
    String,
    Unit,
    List(Box<Type>),
    Func(Vec<Type>, Box<Type>),
    Clause(Box<Type>, Option<Box<Type>>, Box<Type>),
    Var(TypeCell),
    QVar(usize),
}

/// Contents of a type-variable cell.
///
/// * `Unbound` - Fresh variable: `id` is its unique label (rendered `'t0`,
///   `'t1`, ...), `level` the let-depth at which it was minted
/// * `Link` - Forwarded to another type; followed transitively
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeVar {
    Unbound { id: usize, level: usize },
    Link(Type),
}

/// A shared mutable cell for one type variable.
///
/// Cell identity is pointer identity: all occurrences of the same variable
/// hold clones of one `Rc`, and [`TypeCell::set`] is visible through every
/// one of them.
#[derive(Debug, Clone)]
pub struct TypeCell(Rc<RefCell<TypeVar>>);

impl TypeCell {
    /// Allocate a cell holding the given initial contents.
    pub fn new(var: TypeVar) -> Self {
        TypeCell(Rc::new(RefCell::new(var)))
    }

    /// Allocate a fresh unbound cell with the given label and level.
    pub fn unbound(id: usize, level: usize) -> Self {
        TypeCell::new(TypeVar::Unbound { id, level })
    }

    /// Read the current contents of the cell.
    pub fn get(&self) -> TypeVar {
        self.0.borrow().clone()
    }

    /// Overwrite the contents of the cell.
    ///
    /// The write is visible to every clone of this cell.
    pub fn set(&self, var: TypeVar) {
        *self.0.borrow_mut() = var;
    }

    /// Whether two handles refer to the same underlying cell.
    pub fn same_cell(&self, other: &TypeCell) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for TypeCell {
    fn eq(&self, other: &Self) -> bool {
        self.same_cell(other) || *self.0.borrow() == *other.0.borrow()
    }
}

impl Eq for TypeCell {}

impl Type {
    /// Create a function type from parameter types and a return type.
    pub fn func(params: Vec<Type>, ret: Type) -> Self {
        Type::Func(params, Box::new(ret))
    }

    /// Create a list type.
    pub fn list(elem: Type) -> Self {
        Type::List(Box::new(elem))
    }

    /// Create a clause type with an empty guard slot.
    pub fn clause(pattern: Type, result: Type) -> Self {
        Type::Clause(Box::new(pattern), None, Box::new(result))
    }

    /// Copy this type, freshening the variables a call site must not share.
    ///
    /// Unbound variables created at a depth greater than `level` map to a
    /// single fresh cell per distinct label: the first encounter allocates
    /// the cell and records it in `vars`, later encounters of the same label
    /// reuse it, so sharing within the copied type is preserved. Variables
    /// at or below `level` still belong to the surrounding scope and stay
    /// shared, so constraints on them keep flowing to every occurrence.
    /// `Link` cells are re-allocated around a copy of their target.
    pub fn duplicate(&self, vars: &mut HashMap<usize, TypeCell>, level: usize) -> Type {
        match self {
            Type::Int
            | Type::Float
            | Type::Atom
            | Type::Bool
            | Type::String
            | Type::Unit
            | Type::QVar(_) => self.clone(),
            Type::List(elem) => Type::List(Box::new(elem.duplicate(vars, level))),
            Type::Func(params, ret) => Type::Func(
                params.iter().map(|p| p.duplicate(vars, level)).collect(),
                Box::new(ret.duplicate(vars, level)),
            ),
            Type::Clause(pattern, guard, result) => Type::Clause(
                Box::new(pattern.duplicate(vars, level)),
                guard.as_ref().map(|g| Box::new(g.duplicate(vars, level))),
                Box::new(result.duplicate(vars, level)),
            ),
            Type::Var(cell) => match cell.get() {
                TypeVar::Unbound { id, level: l } if l > level => {
                    let fresh = vars
                        .entry(id)
                        .or_insert_with(|| TypeCell::unbound(id, l))
                        .clone();
                    Type::Var(fresh)
                }
                TypeVar::Unbound { .. } => self.clone(),
                TypeVar::Link(target) => Type::Var(TypeCell::new(TypeVar::Link(
                    target.duplicate(vars, level),
                ))),
            },
        }
    }

    /// Resolve all cell indirection, producing a pure type tree.
    ///
    /// `Link`s are followed and substituted; variables that are still
    /// unbound come out as `QVar` carrying their own label. Used at the
    /// top-level entry point to present results to callers and tests.
    pub fn resolve(&self) -> Type {
        match self {
            Type::Int
            | Type::Float
            | Type::Atom
            | Type::Bool
            | Type::String
            | Type::Unit
            | Type::QVar(_) => self.clone(),
            Type::List(elem) => Type::List(Box::new(elem.resolve())),
            Type::Func(params, ret) => Type::Func(
                params.iter().map(Type::resolve).collect(),
                Box::new(ret.resolve()),
            ),
            Type::Clause(pattern, guard, result) => Type::Clause(
                Box::new(pattern.resolve()),
                guard.as_ref().map(|g| Box::new(g.resolve())),
                Box::new(result.resolve()),
            ),
            Type::Var(cell) => match cell.get() {
                TypeVar::Unbound { id, .. } => Type::QVar(id),
                TypeVar::Link(target) => target.resolve(),
            },
        }
    }

    /// Convert this type to a human-readable string representation.
    ///
    /// # Examples
    ///
    /// ```text
    /// Int.pretty()                           // "Int"
    /// List(Int).pretty()                     // "[Int]"
    /// Func([Int], Int).pretty()              // "Int -> Int"
    /// Func([Int, Int], Int).pretty()         // "(Int, Int) -> Int"
    /// Func([Func([Int], Int)], Int).pretty() // "(Int -> Int) -> Int"
    /// Var(unbound t0).pretty()               // "'t0"
    /// ```
    pub fn pretty(&self) -> String {
        match self {
            Type::Int => "Int".to_string(),
            Type::Float => "Float".to_string(),
            Type::Atom => "Atom".to_string(),
            Type::Bool => "Bool".to_string(),
            Type::String => "String".to_string(),
            Type::Unit => "Unit".to_string(),
            Type::List(elem) => format!("[{}]", elem.pretty()),
            Type::Func(params, ret) => {
                let needs_parens = params.len() != 1 || matches!(params[0], Type::Func(_, _));
                let rendered = params
                    .iter()
                    .map(Type::pretty)
                    .collect::<Vec<_>>()
                    .join(", ");
                if needs_parens {
                    format!("({}) -> {}", rendered, ret.pretty())
                } else {
                    format!("{} -> {}", rendered, ret.pretty())
                }
            }
            Type::Clause(pattern, _, result) => {
                format!("| {} -> {}", pattern.pretty(), result.pretty())
            }
            Type::Var(cell) => match cell.get() {
                TypeVar::Unbound { id, .. } => format!("'t{}", id),
                TypeVar::Link(target) => target.pretty(),
            },
            Type::QVar(id) => format!("'t{}", id),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_print_ground() {
        assert_eq!(Type::Int.pretty(), "Int");
        assert_eq!(Type::Float.pretty(), "Float");
        assert_eq!(Type::Atom.pretty(), "Atom");
        assert_eq!(Type::Unit.pretty(), "Unit");
    }

    #[test]
    fn test_pretty_print_list() {
        assert_eq!(Type::list(Type::Int).pretty(), "[Int]");
        assert_eq!(Type::list(Type::list(Type::Atom)).pretty(), "[[Atom]]");
    }

    #[test]
    fn test_pretty_print_function() {
        let ty = Type::func(vec![Type::Int], Type::Atom);
        assert_eq!(ty.pretty(), "Int -> Atom");
    }

    #[test]
    fn test_pretty_print_binary_function() {
        let ty = Type::func(vec![Type::Int, Type::Int], Type::Int);
        assert_eq!(ty.pretty(), "(Int, Int) -> Int");
    }

    #[test]
    fn test_pretty_print_higher_order_function() {
        let ty = Type::func(vec![Type::func(vec![Type::Int], Type::Int)], Type::Int);
        assert_eq!(ty.pretty(), "(Int -> Int) -> Int");
    }

    #[test]
    fn test_pretty_print_var_follows_links() {
        let cell = TypeCell::unbound(0, 0);
        let ty = Type::Var(cell.clone());
        assert_eq!(ty.pretty(), "'t0");

        cell.set(TypeVar::Link(Type::Int));
        assert_eq!(ty.pretty(), "Int");
    }

    #[test]
    fn test_cell_writes_are_shared() {
        let cell = TypeCell::unbound(0, 0);
        let ty = Type::func(vec![Type::Var(cell.clone())], Type::Var(cell.clone()));

        cell.set(TypeVar::Link(Type::Atom));
        assert_eq!(ty.resolve(), Type::func(vec![Type::Atom], Type::Atom));
    }

    #[test]
    fn test_resolve_unbound_becomes_qvar() {
        let cell = TypeCell::unbound(7, 0);
        assert_eq!(Type::Var(cell).resolve(), Type::QVar(7));
    }

    #[test]
    fn test_duplicate_freshens_above_level() {
        let cell = TypeCell::unbound(0, 1);
        let ty = Type::func(vec![Type::Var(cell.clone())], Type::Var(cell.clone()));

        let mut vars = HashMap::new();
        let copy = ty.duplicate(&mut vars, 0);

        // writes through the copy must never reach the original cell
        if let Type::Func(params, _) = &copy {
            if let Type::Var(copied) = &params[0] {
                assert!(!copied.same_cell(&cell));
                copied.set(TypeVar::Link(Type::Int));
            } else {
                panic!("expected a variable parameter");
            }
        } else {
            panic!("expected a function type");
        }
        assert!(matches!(cell.get(), TypeVar::Unbound { .. }));
    }

    #[test]
    fn test_duplicate_preserves_sharing_per_label() {
        let cell = TypeCell::unbound(0, 1);
        let ty = Type::func(vec![Type::Var(cell.clone())], Type::Var(cell));

        let mut vars = HashMap::new();
        let copy = ty.duplicate(&mut vars, 0);

        if let Type::Func(params, ret) = copy {
            match (&params[0], ret.as_ref()) {
                (Type::Var(a), Type::Var(b)) => assert!(a.same_cell(b)),
                _ => panic!("expected variables on both sides"),
            }
        } else {
            panic!("expected a function type");
        }
    }

    #[test]
    fn test_duplicate_shares_at_or_below_level() {
        let cell = TypeCell::unbound(0, 0);
        let ty = Type::Var(cell.clone());

        let mut vars = HashMap::new();
        let copy = ty.duplicate(&mut vars, 0);

        if let Type::Var(copied) = copy {
            assert!(copied.same_cell(&cell));
        } else {
            panic!("expected a variable");
        }
    }
}
