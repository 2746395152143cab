use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{Expr, ExprRef, FunctionDef},
    error::EvalError,
    interpreter::evaluator::{arithmetic, function, logic, strings},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// Stores the evaluation environment.
///
/// The environment holds all bound names: plain variable bindings created by
/// `=`, and user-defined functions created by definitions such as
/// `f[x] := x^2`. It is owned by the caller of [`evaluate`] and mutated only
/// through assignment and definition forms.
///
/// ## Usage
///
/// An `Environment` is created once and reused across evaluations so that
/// bindings persist, the way a REPL session expects.
pub struct Environment {
    /// Variable bindings. Stored values are the post-evaluation results of
    /// their assignments and are not re-evaluated on lookup.
    pub variables: HashMap<String, ExprRef>,
    /// User-defined functions, keyed by name.
    pub functions: HashMap<String, FunctionDef>,
}

impl Environment {
    /// Creates an empty environment with no variables and no functions.
    #[must_use]
    pub fn new() -> Self {
        Self { variables: HashMap::new(),
               functions: HashMap::new(), }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluates an expression tree under an environment.
///
/// The tree is rewritten bottom-up: arguments are evaluated before their
/// head's handler runs, except for the forms that inspect unevaluated
/// children (`If`, the short-circuiting `And`/`Or`, assignments, and
/// delayed definitions). Every literal evaluates to itself; a bound symbol
/// evaluates to its stored value; anything without an applicable reduction
/// is returned structurally intact.
///
/// # Parameters
/// - `expr`: Expression to evaluate.
/// - `env`: Environment of bound names, mutated by assignments and
///   definitions.
///
/// # Returns
/// The rewritten expression.
///
/// # Errors
/// Returns an `EvalError` for type, domain, shape, and arity violations.
/// The error aborts the whole evaluation; assignments that completed before
/// the error keep their effect on the environment.
///
/// # Example
/// ```
/// use symba::{ast::Expr, evaluate, parse_expression, Environment};
///
/// let mut env = Environment::new();
/// let expr = parse_expression("2 + 3").unwrap();
/// assert_eq!(*evaluate(&expr, &mut env).unwrap(), Expr::Number(5.0));
/// ```
pub fn evaluate(expr: &ExprRef, env: &mut Environment) -> EvalResult<ExprRef> {
    match &**expr {
        Expr::Number(_)
        | Expr::Rational { .. }
        | Expr::Complex { .. }
        | Expr::Boolean(_)
        | Expr::Str(_)
        | Expr::Rule { .. }
        | Expr::Infinity
        | Expr::Indeterminate => Ok(Rc::clone(expr)),

        Expr::Symbol(name) => {
            Ok(env.variables
                  .get(name)
                  .map_or_else(|| Rc::clone(expr), Rc::clone))
        },

        Expr::List(elements) => {
            let elements = elements.iter()
                                   .map(|e| evaluate(e, env))
                                   .collect::<EvalResult<Vec<_>>>()?;
            Ok(Expr::list(elements))
        },

        Expr::Assignment { name, value } => eval_assignment(name, value, env),

        Expr::FunctionDefinition(def) => eval_definition(def, env),

        Expr::FunctionCall { head, args } => eval_call(head, args, env),
    }
}

/// Binds `name` to the evaluated value and returns the name as a symbol.
///
/// Chained assignments (`x = y = 2`) bind the inner name first and then
/// reuse its stored value, so every name in the chain ends up bound to the
/// same result.
fn eval_assignment(name: &str, value: &ExprRef, env: &mut Environment) -> EvalResult<ExprRef> {
    let result = match &**value {
        Expr::Assignment { name: inner, .. } => {
            evaluate(value, env)?;
            env.variables
               .get(inner)
               .map_or_else(|| Expr::symbol(inner.clone()), Rc::clone)
        },
        _ => evaluate(value, env)?,
    };

    env.variables.insert(name.to_string(), result);
    Ok(Expr::symbol(name))
}

/// Stores a function definition and returns the function's name as a
/// symbol. Immediate (`=`) bodies are evaluated once here; delayed (`:=`)
/// bodies are stored verbatim and evaluated on each call.
fn eval_definition(def: &FunctionDef, env: &mut Environment) -> EvalResult<ExprRef> {
    let mut def = def.clone();
    if !def.delayed {
        def.body = evaluate(&def.body, env)?;
    }

    let name = def.name.clone();
    env.functions.insert(name.clone(), def);
    Ok(Expr::symbol(name))
}

/// Applies the handler for a call form's head.
///
/// `CompoundExpression`, `If`, `And`, and `Or` receive their arguments
/// unevaluated; every other head gets evaluated arguments first.
fn eval_call(head: &str, args: &[ExprRef], env: &mut Environment) -> EvalResult<ExprRef> {
    match head {
        "CompoundExpression" => return eval_compound(args, env),
        "If" => return logic::eval_if(args, env),
        "And" => return logic::eval_and(args, env),
        "Or" => return logic::eval_or(args, env),
        _ => {},
    }

    let args = args.iter()
                   .map(|a| evaluate(a, env))
                   .collect::<EvalResult<Vec<_>>>()?;

    match head {
        "Plus" => arithmetic::eval_plus(args),
        "Times" => arithmetic::eval_times(args),
        "Power" => arithmetic::eval_power(&args),
        "Divide" => arithmetic::eval_divide(&args),
        "Equal" => logic::eval_equal(&args),
        "List" => Ok(Expr::list(args)),
        "Length" => Ok(eval_length(args)),
        "StringJoin" => strings::eval_string_join(&args),
        "StringLength" => strings::eval_string_length(&args),
        "StringReplace" => strings::eval_string_replace(&args, env),
        "StringTake" => strings::eval_string_take(&args),
        _ => function::eval_function(head, args, env),
    }
}

/// Evaluates statements in order and returns the last result.
fn eval_compound(args: &[ExprRef], env: &mut Environment) -> EvalResult<ExprRef> {
    let mut result = Expr::symbol("Null");
    for arg in args {
        result = evaluate(arg, env)?;
    }
    Ok(result)
}

/// `Length` counts the elements of a list. Anything else (strings included:
/// that is `StringLength`'s job) leaves the call unchanged.
#[allow(clippy::cast_precision_loss)]
fn eval_length(args: Vec<ExprRef>) -> ExprRef {
    if let [arg] = &args[..]
       && let Expr::List(elements) = &**arg
    {
        return Expr::number(elements.len() as f64);
    }
    Expr::call("Length", args)
}
