use crate::{
    ast::{Expr, ExprRef},
    error::EvalError,
    interpreter::evaluator::core::{Environment, EvalResult, evaluate},
    util::num::as_safe_integer,
};

/// Concatenates string arguments left to right.
///
/// Every argument must have evaluated to a string; anything else is a type
/// error.
pub(crate) fn eval_string_join(args: &[ExprRef]) -> EvalResult<ExprRef> {
    let mut out = String::new();

    for arg in args {
        match &**arg {
            Expr::Str(s) => out.push_str(s),
            _ => {
                return Err(EvalError::TypeError { details:
                               "StringJoin expects string arguments".to_string(), });
            },
        }
    }

    Ok(Expr::string(out))
}

/// Returns the length of a single string argument, counted in code points.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn eval_string_length(args: &[ExprRef]) -> EvalResult<ExprRef> {
    if let [arg] = args
       && let Expr::Str(s) = &**arg
    {
        return Ok(Expr::number(s.chars().count() as f64));
    }

    Err(EvalError::TypeError { details: "StringLength expects a string argument".to_string() })
}

/// Performs literal, non-overlapping, left-to-right replacement:
/// `StringReplace[s, lhs -> rhs]`. Without a match the subject is returned
/// unchanged.
///
/// The rule is inert until this point; its sides are evaluated here, at the
/// moment of use.
pub(crate) fn eval_string_replace(args: &[ExprRef], env: &mut Environment)
                                  -> EvalResult<ExprRef> {
    let type_error = || {
        EvalError::TypeError { details:
                                   "StringReplace expects a string and a replacement rule".to_string(), }
    };

    let [subject, rule] = args else {
        return Err(type_error());
    };
    let Expr::Str(subject) = &**subject else {
        return Err(type_error());
    };
    let Expr::Rule { lhs, rhs } = &**rule else {
        return Err(type_error());
    };

    let lhs = evaluate(lhs, env)?;
    let rhs = evaluate(rhs, env)?;
    let (Expr::Str(from), Expr::Str(to)) = (&*lhs, &*rhs) else {
        return Err(type_error());
    };

    // An empty pattern matches everywhere; leave the subject alone instead.
    if from.is_empty() {
        return Ok(Expr::string(subject.clone()));
    }

    Ok(Expr::string(subject.replace(from.as_str(), to)))
}

/// Takes part of a string: `StringTake[s, n]` takes the first `n` code
/// points, a negative `n` the last `|n|`, and `StringTake[s, {i, j}]` the
/// 1-based inclusive span. A zero or out-of-range index is a domain error.
pub(crate) fn eval_string_take(args: &[ExprRef]) -> EvalResult<ExprRef> {
    let domain_error = || {
        EvalError::DomainError { details:
                                     "StringTake expects a valid index or range".to_string(), }
    };

    let [subject, spec] = args else {
        return Err(domain_error());
    };
    let Expr::Str(s) = &**subject else {
        return Err(domain_error());
    };

    let chars: Vec<char> = s.chars().collect();
    let len = chars.len();

    let taken: &[char] = match &**spec {
        Expr::Number(_) => {
            let n = spec.number_value()
                        .and_then(as_safe_integer)
                        .ok_or_else(domain_error)?;
            if n > 0 {
                let n = usize::try_from(n).map_err(|_| domain_error())?;
                if n > len {
                    return Err(domain_error());
                }
                &chars[..n]
            } else if n < 0 {
                let n = usize::try_from(-n).map_err(|_| domain_error())?;
                if n > len {
                    return Err(domain_error());
                }
                &chars[len - n..]
            } else {
                return Err(domain_error());
            }
        },

        Expr::List(bounds) => {
            let [i, j] = &bounds[..] else {
                return Err(domain_error());
            };
            let i = i.number_value()
                     .and_then(as_safe_integer)
                     .ok_or_else(domain_error)?;
            let j = j.number_value()
                     .and_then(as_safe_integer)
                     .ok_or_else(domain_error)?;
            if i < 1 || j < i || usize::try_from(j).map_err(|_| domain_error())? > len {
                return Err(domain_error());
            }
            let (i, j) = (usize::try_from(i).map_err(|_| domain_error())?,
                          usize::try_from(j).map_err(|_| domain_error())?);
            &chars[i - 1..j]
        },

        _ => return Err(domain_error()),
    };

    Ok(Expr::string(taken.iter().collect::<String>()))
}
