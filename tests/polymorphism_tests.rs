//! Generalization, instantiation, and occurs-check behavior at let
//! boundaries.

use merl::ast::expression::*;
use merl::builtins::default_env;
use merl::types::error::TypeError;
use merl::types::infer::Infer;
use merl::types::ty::Type;

fn int(value: i64) -> Expression {
    Expression::Integer(Integer { value, line: 1 })
}

fn atom(value: &str) -> Expression {
    Expression::Atom(AtomLiteral {
        value: value.to_string(),
        line: 1,
    })
}

fn ident(name: &str) -> Expression {
    Expression::Ident(Ident {
        name: name.to_string(),
        line: 1,
    })
}

fn call(target: Expression, args: Vec<Expression>) -> Expression {
    Expression::Call(Call {
        target: Box::new(target),
        args,
        line: 1,
    })
}

fn make_lambda(name: Option<&str>, params: &[&str], body: Expression) -> Lambda {
    Lambda {
        name: name.map(|n| Ident {
            name: n.to_string(),
            line: 1,
        }),
        params: params
            .iter()
            .map(|p| {
                LambdaParam::Ident(Ident {
                    name: p.to_string(),
                    line: 1,
                })
            })
            .collect(),
        body: Box::new(body),
        line: 1,
    }
}

fn lambda(params: &[&str], body: Expression) -> Expression {
    Expression::Lambda(make_lambda(None, params, body))
}

fn let_fun(def: Lambda, body: Expression) -> Expression {
    Expression::FunBinding(FunBinding {
        def,
        body: Box::new(body),
        line: 1,
    })
}

fn let_val(name: &str, value: Expression, body: Expression) -> Expression {
    Expression::VarBinding(VarBinding {
        name: Ident {
            name: name.to_string(),
            line: 1,
        },
        value: Box::new(value),
        body: Box::new(body),
        line: 1,
    })
}

/// `let id = \x -> x in id id` - the let-bound identity is polymorphic
/// enough to be applied to itself.
#[test]
fn let_bound_identity_applies_to_itself() {
    let expr = let_fun(
        make_lambda(Some("id"), &["x"], ident("x")),
        call(ident("id"), vec![ident("id")]),
    );

    let mut infer = Infer::new();
    let ty = infer.type_of(&default_env(), &expr).unwrap();
    // the result is again an identity-shaped function
    let Type::Func(params, ret) = ty else {
        panic!("expected a function type");
    };
    assert_eq!(params.len(), 1);
    assert_eq!(params[0], *ret);
}

/// `(\id -> id id)(\x -> x)` - a lambda-bound variable is monomorphic, so
/// self-application trips the occurs check.
#[test]
fn lambda_bound_identity_is_monomorphic() {
    let expr = call(
        lambda(&["id"], call(ident("id"), vec![ident("id")])),
        vec![lambda(&["x"], ident("x"))],
    );

    let mut infer = Infer::new();
    let result = infer.type_of(&default_env(), &expr);
    assert!(matches!(result, Err(TypeError::CircularType { .. })));
}

/// `\x -> x x` fails the occurs check.
#[test]
fn self_application_is_circular() {
    let expr = lambda(&["x"], call(ident("x"), vec![ident("x")]));

    let mut infer = Infer::new();
    let result = infer.type_of(&default_env(), &expr);
    assert!(matches!(result, Err(TypeError::CircularType { .. })));
}

/// Applying a binary function to a single argument is an arity error.
#[test]
fn partial_application_is_rejected() {
    let expr = call(
        Expression::Builtin(Builtin {
            name: "+".to_string(),
            arity: 2,
            module: "prelude".to_string(),
            function: "+".to_string(),
            line: 1,
        }),
        vec![int(1)],
    );

    let mut infer = Infer::new();
    let result = infer.type_of(&default_env(), &expr);
    assert!(matches!(
        result,
        Err(TypeError::MismatchedArity { .. }) | Err(TypeError::CannotUnify { .. })
    ));
}

/// Using a let-bound scheme at one type must not constrain later uses:
/// `let id = \x -> x in let _ = id 1 in id 'ok` comes out as Atom.
#[test]
fn scheme_survives_differently_typed_uses() {
    let expr = let_fun(
        make_lambda(Some("id"), &["x"], ident("x")),
        let_val(
            "_",
            call(ident("id"), vec![int(1)]),
            call(ident("id"), vec![atom("ok")]),
        ),
    );

    let mut infer = Infer::new();
    let ty = infer.type_of(&default_env(), &expr).unwrap();
    assert_eq!(ty, Type::Atom);
}

/// A let-bound value that captures a lambda parameter stays tied to it:
/// generalization must not quantify variables the context still owns.
#[test]
fn captured_parameter_is_not_generalized() {
    // \x -> let y = x in let _ = y + 1 in x
    let expr = lambda(
        &["x"],
        let_val(
            "y",
            ident("x"),
            let_val(
                "_",
                call(
                    Expression::Builtin(Builtin {
                        name: "+".to_string(),
                        arity: 2,
                        module: "prelude".to_string(),
                        function: "+".to_string(),
                        line: 1,
                    }),
                    vec![ident("y"), int(1)],
                ),
                ident("x"),
            ),
        ),
    );

    let mut infer = Infer::new();
    let ty = infer.type_of(&default_env(), &expr).unwrap();
    // the constraint on y flows back to x
    assert_eq!(ty, Type::func(vec![Type::Int], Type::Int));
}

#[test]
fn counter_is_monotonic_across_runs() {
    let env = default_env();
    let mut infer = Infer::new();

    let before = infer.counter();
    infer
        .type_of(&env, &lambda(&["x"], ident("x")))
        .unwrap();
    let middle = infer.counter();
    infer
        .type_of(&env, &lambda(&["a", "b"], ident("a")))
        .unwrap();
    let after = infer.counter();

    assert!(before <= middle && middle <= after);
    assert_eq!(middle, 1);
    assert_eq!(after, 3);
}

/// Instantiating the same scheme twice yields distinct fresh variables,
/// observable through the counter.
#[test]
fn each_use_of_a_scheme_bumps_the_counter() {
    let env = default_env().extend(
        "id".to_string(),
        Type::func(vec![Type::QVar(0)], Type::QVar(0)),
    );
    let mut infer = Infer::new();

    infer.infer_expr(&env, 0, &ident("id")).unwrap();
    let after_first = infer.counter();
    infer.infer_expr(&env, 0, &ident("id")).unwrap();
    let after_second = infer.counter();

    assert_eq!(after_first, 1);
    assert_eq!(after_second, 2);
}
