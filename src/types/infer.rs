use std::collections::HashMap;

use tracing::{debug, trace};

use super::env::TypeEnv;
use super::error::TypeError;
use super::scheme::{generalize, instantiate};
use super::ty::{Type, TypeCell};
use super::unify::unify;
use crate::ast::expression::{
    Call, Expression, FunBinding, Lambda, LambdaParam, Match, MatchClause, VarBinding,
};

/// Environment tag occupied by unit placeholders in parameter lists.
const UNIT_PARAM: &str = "()";

/// The inference driver.
///
/// Holds the fresh-variable counter, threaded through the recursive walk
/// by mutable borrow; environments are passed by reference and extended
/// on clones, so inner scopes never leak bindings to their callers.
pub struct Infer {
    next_var: usize,
}

impl Infer {
    pub fn new() -> Self {
        Infer { next_var: 0 }
    }

    /// Current value of the fresh-variable counter.
    ///
    /// Monotonically increasing; labels are never reused within a run.
    pub fn counter(&self) -> usize {
        self.next_var
    }

    fn fresh_cell(&mut self, level: usize) -> TypeCell {
        let id = self.next_var;
        self.next_var += 1;
        TypeCell::unbound(id, level)
    }

    fn fresh_var(&mut self, level: usize) -> Type {
        Type::Var(self.fresh_cell(level))
    }

    fn instantiate(&mut self, level: usize, scheme: &Type) -> Type {
        let mut fresh = || self.fresh_cell(level);
        instantiate(scheme, &mut fresh)
    }

    /// Infer the type of a top-level expression.
    ///
    /// Starts at level 0 and returns the type with all cell indirection
    /// resolved away.
    pub fn type_of(&mut self, env: &TypeEnv, expr: &Expression) -> Result<Type, TypeError> {
        let ty = self.infer_expr(env, 0, expr)?;
        let resolved = ty.resolve();
        debug!(ty = %resolved, "inference complete");
        Ok(resolved)
    }

    /// Infer the type of an expression at the given let-binding level.
    ///
    /// This is the recursive entry point; the result may still contain
    /// live variable cells. Exposed so tests can observe levels and the
    /// counter directly.
    pub fn infer_expr(
        &mut self,
        env: &TypeEnv,
        level: usize,
        expr: &Expression,
    ) -> Result<Type, TypeError> {
        match expr {
            Expression::Unit(_) => Ok(Type::Unit),
            Expression::Integer(_) => Ok(Type::Int),
            Expression::Float(_) => Ok(Type::Float),
            Expression::Atom(_) => Ok(Type::Atom),
            Expression::String(_) => Ok(Type::String),
            Expression::Boolean(_) => Ok(Type::Bool),

            Expression::Ident(ident) => match env.lookup(&ident.name) {
                Some(scheme) => Ok(self.instantiate(level, scheme)),
                None => Err(TypeError::unbound_variable(ident.name.clone(), ident.line)),
            },

            Expression::Builtin(builtin) => match env.lookup(&builtin.name) {
                Some(scheme) => Ok(self.instantiate(level, scheme)),
                None => Err(TypeError::unbound_variable(
                    builtin.name.clone(),
                    builtin.line,
                )),
            },

            // Bare wildcards only occur as clause patterns; a fresh
            // variable keeps the walk total.
            Expression::Wildcard(_) => Ok(self.fresh_var(level)),

            Expression::Call(call) => self.infer_call(env, level, call),
            Expression::Match(m) => self.infer_match(env, level, m),
            Expression::Clause(clause) => {
                let (pattern, result) = self.infer_clause(env, level, clause)?;
                Ok(Type::clause(pattern, result))
            }
            Expression::Lambda(lambda) => self.infer_lambda(env, level, lambda),
            Expression::FunBinding(binding) => self.infer_fun_binding(env, level, binding),
            Expression::VarBinding(binding) => self.infer_var_binding(env, level, binding),
        }
    }

    /// Application: the callee's type is copied before use so a call site
    /// cannot poison the scheme it was instantiated from, then unified
    /// against an arrow built from the argument types and a fresh result.
    fn infer_call(&mut self, env: &TypeEnv, level: usize, call: &Call) -> Result<Type, TypeError> {
        let callee_ty = self.infer_expr(env, level, &call.target)?;
        let callee_ty = callee_ty.duplicate(&mut HashMap::new(), level);

        let mut arg_tys = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            arg_tys.push(self.infer_expr(env, level, arg)?);
        }

        let result = self.fresh_var(level);
        unify(&callee_ty, &Type::func(arg_tys, result.clone()))
            .map_err(|err| TypeError::from_unify(err, call.line))?;
        Ok(result)
    }

    fn infer_match(&mut self, env: &TypeEnv, level: usize, m: &Match) -> Result<Type, TypeError> {
        let scrutinee_ty = self.infer_expr(env, level, &m.scrutinee)?;

        let mut arms = Vec::with_capacity(m.clauses.len());
        for clause in &m.clauses {
            arms.push(self.infer_clause(env, level, clause)?);
        }

        // all arms must agree on both their pattern and their result type
        for i in 1..arms.len() {
            let (prev_pattern, prev_result) = &arms[i - 1];
            let (pattern, result) = &arms[i];
            unify(prev_pattern, pattern).map_err(|err| TypeError::from_unify(err, m.line))?;
            unify(prev_result, result).map_err(|err| TypeError::from_unify(err, m.line))?;
        }

        match arms.first() {
            Some((pattern, result)) => {
                unify(&scrutinee_ty, pattern)
                    .map_err(|err| TypeError::from_unify(err, m.line))?;
                Ok(result.clone())
            }
            None => Ok(self.fresh_var(level)),
        }
    }

    /// One match arm: returns its pattern and result types.
    ///
    /// A symbol pattern binds a fresh variable in a clause-local extension
    /// of the environment; a wildcard allocates without binding; any other
    /// pattern is an ordinary expression (a literal, usually) and is
    /// inferred as such. The guard is carried but not checked.
    fn infer_clause(
        &mut self,
        env: &TypeEnv,
        level: usize,
        clause: &MatchClause,
    ) -> Result<(Type, Type), TypeError> {
        let (pattern_ty, clause_env) = match clause.pattern.as_ref() {
            Expression::Ident(ident) => {
                let ty = self.fresh_var(level);
                let extended = env.extend(ident.name.clone(), ty.clone());
                (ty, extended)
            }
            Expression::Wildcard(_) => (self.fresh_var(level), env.clone()),
            pattern => (self.infer_expr(env, level, pattern)?, env.clone()),
        };

        let result_ty = self.infer_expr(&clause_env, level, &clause.result)?;
        Ok((pattern_ty, result_ty))
    }

    /// Function definition: parameters bind fresh variables (or reuse an
    /// existing binding of the same name), the body is inferred under the
    /// extended environment. The function's own name is not visible in
    /// its body, so direct recursion is not typable at this layer.
    fn infer_lambda(
        &mut self,
        env: &TypeEnv,
        level: usize,
        lambda: &Lambda,
    ) -> Result<Type, TypeError> {
        let mut body_env = env.clone();
        let mut params = Vec::with_capacity(lambda.params.len());

        for param in &lambda.params {
            match param {
                LambdaParam::Unit(_) => {
                    body_env = body_env.extend(UNIT_PARAM.to_string(), Type::Unit);
                    params.push(Type::Unit);
                }
                LambdaParam::Ident(ident) => {
                    let ty = match body_env.lookup(&ident.name) {
                        Some(existing) => existing.clone(),
                        None => self.fresh_var(level),
                    };
                    body_env = body_env.extend(ident.name.clone(), ty.clone());
                    params.push(ty);
                }
            }
        }

        let body_ty = self.infer_expr(&body_env, level, &lambda.body)?;
        Ok(Type::func(params, body_ty))
    }

    /// `let f = \x -> ... in body`
    ///
    /// The definition is inferred one level deeper, then generalized at
    /// the current level: exactly the variables minted for the definition
    /// that did not escape into the surrounding context are quantified.
    fn infer_fun_binding(
        &mut self,
        env: &TypeEnv,
        level: usize,
        binding: &FunBinding,
    ) -> Result<Type, TypeError> {
        let fun_ty = self.infer_lambda(env, level + 1, &binding.def)?;
        let scheme = generalize(level, &fun_ty);

        let body_env = match &binding.def.name {
            Some(name) => {
                trace!(binding = %name.name, scheme = %scheme, "generalized function binding");
                env.extend(name.name.clone(), scheme)
            }
            None => env.clone(),
        };
        self.infer_expr(&body_env, level + 1, &binding.body)
    }

    /// `let x = value in body`, same level discipline as function bindings.
    fn infer_var_binding(
        &mut self,
        env: &TypeEnv,
        level: usize,
        binding: &VarBinding,
    ) -> Result<Type, TypeError> {
        let value_ty = self.infer_expr(env, level + 1, &binding.value)?;
        let scheme = generalize(level, &value_ty);
        trace!(binding = %binding.name.name, scheme = %scheme, "generalized value binding");

        let body_env = env.extend(binding.name.name.clone(), scheme);
        self.infer_expr(&body_env, level + 1, &binding.body)
    }
}

impl Default for Infer {
    fn default() -> Self {
        Self::new()
    }
}
