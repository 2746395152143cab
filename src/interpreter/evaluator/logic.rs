use std::rc::Rc;

use crate::{
    ast::{Expr, ExprRef},
    interpreter::evaluator::core::{Environment, EvalResult, evaluate},
};

/// Evaluates `And[...]` with short-circuiting.
///
/// Arguments are evaluated left to right; the first `False` ends the walk
/// and the remaining arguments are never touched. If every argument came
/// out `True` the result is `True`; otherwise the evaluated arguments,
/// constants included, are retained in a flattened `And` node.
pub(crate) fn eval_and(args: &[ExprRef], env: &mut Environment) -> EvalResult<ExprRef> {
    let mut evaluated = Vec::with_capacity(args.len());

    for arg in args {
        let value = evaluate(arg, env)?;
        if matches!(&*value, Expr::Boolean(false)) {
            return Ok(Expr::boolean(false));
        }
        flatten_into(&mut evaluated, value, "And");
    }

    if evaluated.iter().all(|v| matches!(&**v, Expr::Boolean(true))) {
        return Ok(Expr::boolean(true));
    }
    Ok(Expr::call("And", evaluated))
}

/// Evaluates `Or[...]`; the dual of [`eval_and`]. The first `True` wins,
/// all-`False` collapses to `False`, and anything symbolic is retained.
pub(crate) fn eval_or(args: &[ExprRef], env: &mut Environment) -> EvalResult<ExprRef> {
    let mut evaluated = Vec::with_capacity(args.len());

    for arg in args {
        let value = evaluate(arg, env)?;
        if matches!(&*value, Expr::Boolean(true)) {
            return Ok(Expr::boolean(true));
        }
        flatten_into(&mut evaluated, value, "Or");
    }

    if evaluated.iter().all(|v| matches!(&**v, Expr::Boolean(false))) {
        return Ok(Expr::boolean(false));
    }
    Ok(Expr::call("Or", evaluated))
}

/// Pushes a value onto the retained-argument list, splicing nested nodes of
/// the same head so that `a && b && c` retains as one `And`.
fn flatten_into(out: &mut Vec<ExprRef>, value: ExprRef, head: &str) {
    match &*value {
        Expr::FunctionCall { head: h, args } if h == head => {
            out.extend(args.iter().map(Rc::clone));
        },
        _ => out.push(value),
    }
}

/// Evaluates `Equal[a, b]`.
///
/// Fully numeric operands compare by value, structurally identical operands
/// compare equal, and anything else is left as an inert `Equal`.
pub(crate) fn eval_equal(args: &[ExprRef]) -> EvalResult<ExprRef> {
    let [a, b] = args else {
        return Ok(Expr::call("Equal", args.to_vec()));
    };

    if let (Some(x), Some(y)) = (a.number_value(), b.number_value()) {
        return Ok(Expr::boolean(x == y));
    }
    if a == b {
        return Ok(Expr::boolean(true));
    }

    Ok(Expr::call("Equal", args.to_vec()))
}

/// Evaluates `If[c, t, e]`.
///
/// Only the selected branch is evaluated. A condition that does not reduce
/// to a boolean leaves the branches untouched behind the evaluated
/// condition. Other arities are inert.
pub(crate) fn eval_if(args: &[ExprRef], env: &mut Environment) -> EvalResult<ExprRef> {
    if args.len() != 3 {
        return Ok(Expr::call("If", args.to_vec()));
    }

    let condition = evaluate(&args[0], env)?;
    match &*condition {
        Expr::Boolean(true) => evaluate(&args[1], env),
        Expr::Boolean(false) => evaluate(&args[2], env),
        _ => Ok(Expr::call("If",
                           vec![condition, Rc::clone(&args[1]), Rc::clone(&args[2])])),
    }
}
