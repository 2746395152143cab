use std::rc::Rc;

use crate::{
    ast::{Expr, ExprRef},
    interpreter::evaluator::{core::EvalResult, lists},
    util::num::{as_safe_integer, gcd},
};

/// Exact accumulator for numeric folding.
///
/// Sums and products stay rational while every operand is an integer-valued
/// number or a `Rational`; the first inexact float (or an overflow of the
/// `i64` range in the final result) demotes the whole fold to `f64`.
#[derive(Clone, Copy)]
enum Fold {
    /// Exact rational state: numerator and positive denominator.
    Exact(i128, i128),
    /// Inexact floating-point state.
    Float(f64),
}

impl Fold {
    fn of(expr: &Expr) -> Option<Self> {
        match expr {
            Expr::Number(v) => {
                Some(as_safe_integer(*v).map_or(Self::Float(*v), |n| Self::Exact(i128::from(n), 1)))
            },
            Expr::Rational { num, den } => Some(Self::Exact(i128::from(*num), i128::from(*den))),
            _ => None,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn value(self) -> f64 {
        match self {
            Self::Exact(n, d) => n as f64 / d as f64,
            Self::Float(v) => v,
        }
    }

    fn add(self, other: Self) -> Self {
        match (self, other) {
            (Self::Exact(an, ad), Self::Exact(bn, bd)) => Self::exact(an * bd + bn * ad, ad * bd),
            _ => Self::Float(self.value() + other.value()),
        }
    }

    fn mul(self, other: Self) -> Self {
        match (self, other) {
            (Self::Exact(an, ad), Self::Exact(bn, bd)) => Self::exact(an * bn, ad * bd),
            _ => Self::Float(self.value() * other.value()),
        }
    }

    fn exact(num: i128, den: i128) -> Self {
        let g = gcd(num, den);
        Self::Exact(num / g, den / g)
    }

    fn is_zero(self) -> bool {
        match self {
            Self::Exact(n, _) => n == 0,
            Self::Float(v) => v == 0.0,
        }
    }

    fn is_one(self) -> bool {
        match self {
            Self::Exact(n, d) => n == d,
            Self::Float(v) => v == 1.0,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn into_expr(self) -> ExprRef {
        match self {
            Self::Exact(n, d) => {
                if let (Ok(n), Ok(d)) = (i64::try_from(n), i64::try_from(d)) {
                    Expr::rational(n, d)
                } else {
                    Expr::number(n as f64 / d as f64)
                }
            },
            Self::Float(v) => Expr::number(v),
        }
    }
}

/// Splices arguments that carry the same head into the argument list, one
/// level deep. Evaluated sums and products are already flat, so one level
/// is all that can occur.
fn flatten(head: &str, args: Vec<ExprRef>) -> Vec<ExprRef> {
    let mut out = Vec::with_capacity(args.len());
    for arg in args {
        match &*arg {
            Expr::FunctionCall { head: h, args: inner } if h == head => {
                out.extend(inner.iter().map(Rc::clone));
            },
            _ => out.push(arg),
        }
    }
    out
}

/// Evaluates an n-ary sum.
///
/// Nested `Plus` arguments are flattened, numeric arguments are folded into
/// a single total (exactly where possible), and a zero total is dropped.
/// The output places the numeric total first, followed by the symbolic
/// terms in their original order; a single surviving term collapses to
/// itself.
pub(crate) fn eval_plus(args: Vec<ExprRef>) -> EvalResult<ExprRef> {
    if args.iter().any(|a| a.is_list()) {
        return lists::eval_elementwise("Plus", args);
    }

    let args = flatten("Plus", args);
    let mut total = Fold::Exact(0, 1);
    let mut terms = Vec::new();

    for arg in args {
        match Fold::of(&*arg) {
            Some(value) => total = total.add(value),
            None => terms.push(arg),
        }
    }

    if terms.is_empty() {
        return Ok(total.into_expr());
    }
    if !total.is_zero() {
        terms.insert(0, total.into_expr());
    }
    if terms.len() == 1 {
        return Ok(terms.remove(0));
    }
    Ok(Expr::call("Plus", terms))
}

/// Evaluates an n-ary product.
///
/// A numeric zero anywhere absorbs the whole product, symbols included.
/// Otherwise numeric factors fold into a single coefficient (exactly where
/// possible), a coefficient of one is dropped, and the output places the
/// coefficient first followed by the symbolic factors in original order.
pub(crate) fn eval_times(args: Vec<ExprRef>) -> EvalResult<ExprRef> {
    if args.iter().any(|a| a.is_list()) {
        return lists::eval_elementwise("Times", args);
    }

    let args = flatten("Times", args);
    if args.iter()
           .any(|a| matches!(a.number_value(), Some(v) if v == 0.0))
    {
        return Ok(Expr::number(0.0));
    }

    let mut product = Fold::Exact(1, 1);
    let mut factors = Vec::new();

    for arg in args {
        match Fold::of(&*arg) {
            Some(value) => product = product.mul(value),
            None => factors.push(arg),
        }
    }

    if factors.is_empty() {
        return Ok(product.into_expr());
    }
    if !product.is_one() {
        factors.insert(0, product.into_expr());
    }
    if factors.len() == 1 {
        return Ok(factors.remove(0));
    }
    Ok(Expr::call("Times", factors))
}

/// Evaluates `Power[b, e]`.
///
/// `e = 0` gives `1` and `e = 1` gives `b` even for symbolic bases; a fully
/// numeric power computes through `f64`. Anything else is inert.
pub(crate) fn eval_power(args: &[ExprRef]) -> EvalResult<ExprRef> {
    let [base, exponent] = args else {
        return Ok(Expr::call("Power", args.to_vec()));
    };

    if let Some(e) = exponent.number_value() {
        if e == 0.0 {
            return Ok(Expr::number(1.0));
        }
        if e == 1.0 {
            return Ok(Rc::clone(base));
        }
        if let Some(b) = base.number_value() {
            return Ok(Expr::number(b.powf(e)));
        }
    }

    Ok(Expr::call("Power", args.to_vec()))
}

/// Evaluates `Divide[a, b]`.
///
/// Division by a numeric zero produces `Indeterminate`: for `0/0` that is
/// the defined result, and for `a/0` it stands in while the
/// `DirectedInfinity` path stays disabled along with complex arithmetic.
/// Integer-like operands divide exactly into a reduced `Rational`;
/// otherwise the quotient is a float. Symbolic operands leave the call
/// inert.
pub(crate) fn eval_divide(args: &[ExprRef]) -> EvalResult<ExprRef> {
    let [num, den] = args else {
        return Ok(Expr::call("Divide", args.to_vec()));
    };

    let (Some(a), Some(b)) = (num.number_value(), den.number_value()) else {
        return Ok(Expr::call("Divide", args.to_vec()));
    };

    if b == 0.0 {
        return Ok(Rc::new(Expr::Indeterminate));
    }

    if let (Some(Fold::Exact(an, ad)), Some(Fold::Exact(bn, bd))) =
        (Fold::of(&**num), Fold::of(&**den))
    {
        let quotient = Fold::exact(an * bd, ad * bn);
        if let Fold::Exact(n, d) = quotient
           && let (Ok(n), Ok(d)) = (i64::try_from(n), i64::try_from(d))
        {
            // `exact` leaves the sign on either side; the constructor
            // normalises the denominator to be positive.
            return Ok(Expr::rational(n, d));
        }
        return Ok(Expr::number(quotient.value()));
    }

    Ok(Expr::number(a / b))
}
