use std::rc::Rc;

use crate::{
    ast::{Expr, ExprRef},
    error::EvalError,
    interpreter::evaluator::{arithmetic, core::EvalResult},
};

/// Applies an arithmetic head elementwise over list arguments.
///
/// The arguments are combined pairwise left to right. Each pairwise
/// combination handles:
/// - List with list (lengths must match at every depth)
/// - List with scalar and scalar with list (the scalar broadcasts)
/// - Scalar with scalar (delegated back to the scalar handler)
///
/// Nested lists are handled recursively, so the structure of the operands
/// must match at each level.
///
/// # Parameters
/// - `head`: The operator head, `Plus` or `Times`.
/// - `args`: The evaluated arguments, at least one of which is a list.
///
/// # Returns
/// A list (or scalar, for degenerate inputs) mirroring the operand shape.
pub(crate) fn eval_elementwise(head: &str, args: Vec<ExprRef>) -> EvalResult<ExprRef> {
    let mut iter = args.into_iter();
    let Some(mut acc) = iter.next() else {
        return Ok(Expr::call(head, Vec::new()));
    };

    for next in iter {
        acc = combine(head, &acc, &next)?;
    }

    Ok(acc)
}

/// Combines two operands elementwise, recursing through nested lists.
fn combine(head: &str, left: &ExprRef, right: &ExprRef) -> EvalResult<ExprRef> {
    match (&**left, &**right) {
        (Expr::List(a), Expr::List(b)) => {
            if a.len() != b.len() {
                return Err(EvalError::ShapeError { details:
                               "List sizes must match for elementwise operation".to_string(), });
            }

            let elements = a.iter()
                            .zip(b.iter())
                            .map(|(l, r)| combine(head, l, r))
                            .collect::<EvalResult<Vec<_>>>()?;
            Ok(Expr::list(elements))
        },

        (Expr::List(a), _) => {
            let elements = a.iter()
                            .map(|l| combine(head, l, right))
                            .collect::<EvalResult<Vec<_>>>()?;
            Ok(Expr::list(elements))
        },

        (_, Expr::List(b)) => {
            let elements = b.iter()
                            .map(|r| combine(head, left, r))
                            .collect::<EvalResult<Vec<_>>>()?;
            Ok(Expr::list(elements))
        },

        _ => {
            let pair = vec![Rc::clone(left), Rc::clone(right)];
            match head {
                "Plus" => arithmetic::eval_plus(pair),
                "Times" => arithmetic::eval_times(pair),
                _ => Ok(Expr::call(head, pair)),
            }
        },
    }
}
