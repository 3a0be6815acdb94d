/// All expression forms the type checker understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Unit(Unit),
    Integer(Integer),
    Float(Float),
    Atom(AtomLiteral),
    String(StringLiteral),
    Boolean(Boolean),
    Ident(Ident),
    Wildcard(Wildcard),
    Builtin(Builtin),
    Call(Call),
    Match(Match),
    Clause(MatchClause),
    Lambda(Lambda),
    FunBinding(FunBinding),
    VarBinding(VarBinding),
}

impl Expression {
    /// Source line of this expression.
    pub fn line(&self) -> usize {
        match self {
            Expression::Unit(inner) => inner.line,
            Expression::Integer(inner) => inner.line,
            Expression::Float(inner) => inner.line,
            Expression::Atom(inner) => inner.line,
            Expression::String(inner) => inner.line,
            Expression::Boolean(inner) => inner.line,
            Expression::Ident(inner) => inner.line,
            Expression::Wildcard(inner) => inner.line,
            Expression::Builtin(inner) => inner.line,
            Expression::Call(inner) => inner.line,
            Expression::Match(inner) => inner.line,
            Expression::Clause(inner) => inner.line,
            Expression::Lambda(inner) => inner.line,
            Expression::FunBinding(inner) => inner.line,
            Expression::VarBinding(inner) => inner.line,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Integer {
    pub value: i64,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Float {
    pub value: f64,
    pub line: usize,
}

/// An atom literal like `'ok` or `'x_was_zero`.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomLiteral {
    pub value: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Boolean {
    pub value: bool,
    pub line: usize,
}

/// A reference to a bound name.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub line: usize,
}

/// The `_` pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct Wildcard {
    pub line: usize,
}

/// A pre-resolved built-in function reference.
///
/// The parser resolves operators like `+` and `+.` to their origin module
/// and function; inference only consumes the `name` for environment lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Builtin {
    pub name: String,
    pub arity: usize,
    pub module: String,
    pub function: String,
    pub line: usize,
}

/// Application of a function to its arguments: `f(a, b)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub target: Box<Expression>,
    pub args: Vec<Expression>,
    pub line: usize,
}

/// A `match` expression: `match scrutinee with clause | clause | ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub scrutinee: Box<Expression>,
    pub clauses: Vec<MatchClause>,
    pub line: usize,
}

/// One match arm: `pattern [when guard] -> result`.
///
/// Guards are carried through but not yet checked by inference.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchClause {
    pub pattern: Box<Expression>,
    pub guard: Option<Box<Expression>>,
    pub result: Box<Expression>,
    pub line: usize,
}

/// A function definition `\a b -> body`, optionally named.
///
/// The name is the one a surrounding `let` binds; it is not visible inside
/// the body itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub name: Option<Ident>,
    pub params: Vec<LambdaParam>,
    pub body: Box<Expression>,
    pub line: usize,
}

/// Lambda parameter - either a named identifier or the unit placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum LambdaParam {
    Ident(Ident),
    Unit(Unit),
}

/// `let f = \x -> ... in body`
#[derive(Debug, Clone, PartialEq)]
pub struct FunBinding {
    pub def: Lambda,
    pub body: Box<Expression>,
    pub line: usize,
}

/// `let x = value in body`
#[derive(Debug, Clone, PartialEq)]
pub struct VarBinding {
    pub name: Ident,
    pub value: Box<Expression>,
    pub body: Box<Expression>,
    pub line: usize,
}
