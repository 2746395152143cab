use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{Expr, ExprRef},
    error::EvalError,
    interpreter::evaluator::core::{Environment, EvalResult, evaluate},
};

/// Unary math built-ins computed through `f64`.
///
/// `Round` relies on `f64::round` rounding half away from zero, so
/// `Round[3.5]` is `4` and `Round[-3.5]` is `-4`.
static MATH_TABLE: &[(&str, fn(f64) -> f64)] = &[("Sin", f64::sin),
                                                 ("Cos", f64::cos),
                                                 ("Tan", f64::tan),
                                                 ("Exp", f64::exp),
                                                 ("Log", f64::ln),
                                                 ("Sqrt", f64::sqrt),
                                                 ("Abs", f64::abs),
                                                 ("Floor", f64::floor),
                                                 ("Ceiling", f64::ceil),
                                                 ("Round", f64::round)];

/// Evaluates a call to a non-core head.
///
/// The evaluator first checks the math built-in table: a single numeric
/// argument computes, a symbolic one leaves the call unchanged. Failing
/// that, a user-defined function is applied if one is stored under the
/// head. Unknown heads stay inert with their evaluated arguments; they are
/// the open end of the language.
///
/// # Parameters
/// - `head`: Head name of the call.
/// - `args`: Evaluated arguments.
/// - `env`: Environment, needed for user-defined bodies.
pub(crate) fn eval_function(head: &str,
                            args: Vec<ExprRef>,
                            env: &mut Environment)
                            -> EvalResult<ExprRef> {
    if let Some((_, func)) = MATH_TABLE.iter().find(|(name, _)| *name == head) {
        if let [arg] = &args[..]
           && let Some(v) = arg.number_value()
        {
            return Ok(Expr::number(func(v)));
        }
        return Ok(Expr::call(head, args));
    }

    if env.functions.contains_key(head) {
        return apply_user_function(head, args, env);
    }

    Ok(Expr::call(head, args))
}

/// Applies a stored user-defined function.
///
/// Arguments bind positionally; missing trailing parameters fall back to
/// their defaults, and any other arity mismatch is an error. The bound
/// values are substituted into the body and the result is evaluated. For
/// an immediate definition the body was already evaluated once at
/// definition time; a delayed one is evaluated fresh on every call.
fn apply_user_function(name: &str,
                       args: Vec<ExprRef>,
                       env: &mut Environment)
                       -> EvalResult<ExprRef> {
    let def = env.functions
                 .get(name)
                 .cloned()
                 .unwrap_or_else(|| unreachable!());

    if args.len() > def.params.len() {
        return Err(EvalError::ArityMismatch { name:     name.to_string(),
                                              expected: def.params.len(),
                                              found:    args.len(), });
    }

    let mut bindings = HashMap::new();
    for (i, param) in def.params.iter().enumerate() {
        let value = match args.get(i) {
            Some(arg) => Rc::clone(arg),
            None => match &param.default {
                Some(default) => evaluate(default, env)?,
                None => {
                    return Err(EvalError::ArityMismatch { name:     name.to_string(),
                                                          expected: def.params.len(),
                                                          found:    args.len(), });
                },
            },
        };
        bindings.insert(param.name.clone(), value);
    }

    let body = substitute(&def.body, &bindings);
    evaluate(&body, env)
}

/// Replaces free occurrences of parameter symbols with their bound values.
///
/// Untouched subtrees are shared rather than copied.
fn substitute(expr: &ExprRef, bindings: &HashMap<String, ExprRef>) -> ExprRef {
    match &**expr {
        Expr::Symbol(name) => bindings.get(name).map_or_else(|| Rc::clone(expr), Rc::clone),

        Expr::FunctionCall { head, args } => {
            Expr::call(head.clone(),
                       args.iter().map(|a| substitute(a, bindings)).collect())
        },

        Expr::List(elements) => {
            Expr::list(elements.iter().map(|e| substitute(e, bindings)).collect())
        },

        Expr::Rule { lhs, rhs } => {
            Rc::new(Expr::Rule { lhs: substitute(lhs, bindings),
                                 rhs: substitute(rhs, bindings), })
        },

        Expr::Assignment { name, value } => {
            Rc::new(Expr::Assignment { name:  name.clone(),
                                       value: substitute(value, bindings), })
        },

        _ => Rc::clone(expr),
    }
}
