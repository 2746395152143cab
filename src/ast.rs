use std::rc::Rc;

use crate::util::num::{MAX_SAFE_I64_INT, gcd};

/// Shared handle to an expression node.
///
/// Children of a node are held through `ExprRef` because simplification and
/// substitution frequently return a subtree unchanged; sharing avoids cloning
/// whole trees. Expressions are immutable after construction, so aliasing is
/// safe.
pub type ExprRef = Rc<Expr>;

/// A node of the symbolic expression tree.
///
/// `Expr` is a closed tagged sum covering every node the parser may emit and
/// the evaluator may produce: numbers, rationals, booleans, strings, symbols,
/// lists, call forms, rules, assignments, function definitions, and the
/// `Infinity`/`Indeterminate` sentinels.
///
/// New operations are not added as new variants but as new head handlers in
/// the evaluator; `FunctionCall` with an arbitrary head string is the
/// open-ended extension point.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A 64-bit floating-point number. Integer literals parse to
    /// integer-valued `Number`s.
    Number(f64),
    /// A small exact rational. Always in lowest terms with `den > 0` and
    /// never integer-valued (those collapse to `Number`); use
    /// [`Expr::rational`] to construct one.
    Rational {
        /// Numerator; carries the sign.
        num: i64,
        /// Denominator, always positive.
        den: i64,
    },
    /// A complex number. Reserved: the evaluator does not currently produce
    /// complex results.
    Complex {
        /// Real part.
        re: f64,
        /// Imaginary part.
        im: f64,
    },
    /// A boolean value, printed as `True`/`False`.
    Boolean(bool),
    /// A UTF-8 string literal.
    Str(String),
    /// A named binding target or free variable.
    Symbol(String),
    /// An ordered sequence of elements. Produced by evaluating the `List`
    /// call form; elements need not be homogeneous.
    List(Vec<ExprRef>),
    /// The universal call form: `Plus`, `Times`, `If`, `Sin`, user-defined
    /// heads, and everything in between.
    FunctionCall {
        /// Head name; never empty.
        head: String,
        /// Ordered arguments.
        args: Vec<ExprRef>,
    },
    /// The `->` operator. An inert data carrier consumed by `StringReplace`.
    Rule {
        /// Pattern side.
        lhs: ExprRef,
        /// Replacement side.
        rhs: ExprRef,
    },
    /// A variable assignment created by `=`; consumed by the evaluator.
    Assignment {
        /// Target variable name.
        name:  String,
        /// The unevaluated right-hand side.
        value: ExprRef,
    },
    /// A function definition created by `=` or `:=` on a call form.
    FunctionDefinition(FunctionDef),
    /// Positive infinity sentinel.
    Infinity,
    /// Indeterminate-result sentinel (e.g. `0/0`).
    Indeterminate,
}

/// A user-defined function stored in the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name the function is called by.
    pub name:    String,
    /// Positional parameters, possibly with trailing defaults.
    pub params:  Vec<Parameter>,
    /// The body. Stored verbatim for delayed definitions, pre-evaluated for
    /// immediate ones.
    pub body:    ExprRef,
    /// `true` for `:=` (body evaluated on each call), `false` for `=`.
    pub delayed: bool,
}

/// A single function parameter with an optional default value.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Parameter name.
    pub name:    String,
    /// Default expression used when the argument is omitted.
    pub default: Option<ExprRef>,
}

impl Expr {
    /// Creates a `Number` node.
    #[must_use]
    pub fn number(value: f64) -> ExprRef {
        Rc::new(Self::Number(value))
    }

    /// Creates a rational in lowest terms with a positive denominator.
    ///
    /// Whole numbers collapse to `Number`, keeping the invariant that
    /// `Rational` never holds an integer.
    ///
    /// # Panics
    /// Panics if `den` is zero; division by zero is the evaluator's job to
    /// report, not the constructor's.
    ///
    /// # Example
    /// ```
    /// use symba::ast::Expr;
    ///
    /// assert_eq!(*Expr::rational(2, -6), Expr::Rational { num: -1, den: 3 });
    /// assert_eq!(*Expr::rational(6, 2), Expr::Number(3.0));
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn rational(num: i64, den: i64) -> ExprRef {
        assert!(den != 0, "rational denominator must be nonzero");
        let g = gcd(i128::from(num), i128::from(den));
        let sign = if den < 0 { -1 } else { 1 };
        let num = (i128::from(num) / g * i128::from(sign)) as i64;
        let den = (i128::from(den) / g * i128::from(sign)) as i64;
        if den == 1 {
            Self::number(num as f64)
        } else {
            Rc::new(Self::Rational { num, den })
        }
    }

    /// Creates a `Boolean` node.
    #[must_use]
    pub fn boolean(value: bool) -> ExprRef {
        Rc::new(Self::Boolean(value))
    }

    /// Creates a `Str` node.
    #[must_use]
    pub fn string(value: impl Into<String>) -> ExprRef {
        Rc::new(Self::Str(value.into()))
    }

    /// Creates a `Symbol` node.
    #[must_use]
    pub fn symbol(name: impl Into<String>) -> ExprRef {
        Rc::new(Self::Symbol(name.into()))
    }

    /// Creates a `List` node.
    #[must_use]
    pub fn list(elements: Vec<ExprRef>) -> ExprRef {
        Rc::new(Self::List(elements))
    }

    /// Creates a `FunctionCall` node.
    #[must_use]
    pub fn call(head: impl Into<String>, args: Vec<ExprRef>) -> ExprRef {
        Rc::new(Self::FunctionCall { head: head.into(),
                                     args })
    }

    /// Returns `true` if the expression is a `Number`.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }

    /// Returns `true` if the expression is numeric, i.e. a `Number` or a
    /// `Rational`.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Number(..) | Self::Rational { .. })
    }

    /// Returns `true` if the expression is a `List`.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(..))
    }

    /// Returns `true` if the expression is a symbol with the given name.
    ///
    /// # Example
    /// ```
    /// use symba::ast::Expr;
    ///
    /// assert!(Expr::symbol("x").is_symbol_named("x"));
    /// assert!(!Expr::symbol("x").is_symbol_named("y"));
    /// ```
    #[must_use]
    pub fn is_symbol_named(&self, name: &str) -> bool {
        matches!(self, Self::Symbol(n) if n == name)
    }

    /// Returns `true` if the expression is a call form with the given head.
    #[must_use]
    pub fn is_call_to(&self, head: &str) -> bool {
        matches!(self, Self::FunctionCall { head: h, .. } if h == head)
    }

    /// Extracts the numeric value of a `Number` or `Rational`, or `None` for
    /// every other variant.
    ///
    /// # Example
    /// ```
    /// use symba::ast::Expr;
    ///
    /// assert_eq!(Expr::rational(1, 2).number_value(), Some(0.5));
    /// assert_eq!(Expr::symbol("x").number_value(), None);
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn number_value(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Rational { num, den } => Some(*num as f64 / *den as f64),
            _ => None,
        }
    }
}

// Printing. The surface form round-trips through the parser for the
// parseable subset, so operator output must respect the precedence table.
// Each node prints bare when its own level is at least the context level and
// parenthesised otherwise.

const PREC_COMPOUND: u8 = 0;
const PREC_ASSIGN: u8 = 1;
const PREC_RULE: u8 = 2;
const PREC_OR: u8 = 3;
const PREC_AND: u8 = 4;
const PREC_EQUAL: u8 = 5;
const PREC_PLUS: u8 = 6;
const PREC_TIMES: u8 = 7;
const PREC_JOIN: u8 = 8;
const PREC_UNARY: u8 = 9;
const PREC_POWER: u8 = 10;
const PREC_ATOM: u8 = 11;

impl Expr {
    fn precedence(&self) -> u8 {
        match self {
            // Negative literals print with a leading minus, which binds like
            // the unary operator.
            Self::Number(v) if *v < 0.0 => PREC_UNARY,
            Self::Rational { .. } => PREC_TIMES,
            Self::Assignment { .. } | Self::FunctionDefinition(_) => PREC_ASSIGN,
            Self::Rule { .. } => PREC_RULE,
            Self::FunctionCall { head, .. } => match head.as_str() {
                "CompoundExpression" => PREC_COMPOUND,
                "Or" => PREC_OR,
                "And" => PREC_AND,
                "Equal" => PREC_EQUAL,
                "Plus" => PREC_PLUS,
                "Times" | "Divide" => PREC_TIMES,
                "StringJoin" => PREC_JOIN,
                "Power" => PREC_POWER,
                _ => PREC_ATOM,
            },
            _ => PREC_ATOM,
        }
    }

    fn fmt_prec(&self, f: &mut std::fmt::Formatter<'_>, prec: u8) -> std::fmt::Result {
        if self.precedence() < prec {
            write!(f, "(")?;
            self.fmt_bare(f)?;
            return write!(f, ")");
        }
        self.fmt_bare(f)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn fmt_bare(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(v) => {
                if v.fract() == 0.0 && v.abs() <= MAX_SAFE_I64_INT as f64 {
                    write!(f, "{}", *v as i64)
                } else {
                    write!(f, "{v}")
                }
            },
            Self::Rational { num, den } => write!(f, "{num}/{den}"),
            Self::Complex { re, im } => write!(f, "Complex[{re}, {im}]"),
            Self::Boolean(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            Self::Str(s) => {
                write!(f, "\"")?;
                for c in s.chars() {
                    match c {
                        '"' => write!(f, "\\\"")?,
                        '\\' => write!(f, "\\\\")?,
                        '\n' => write!(f, "\\n")?,
                        '\t' => write!(f, "\\t")?,
                        _ => write!(f, "{c}")?,
                    }
                }
                write!(f, "\"")
            },
            Self::Symbol(name) => write!(f, "{name}"),
            Self::List(elements) => {
                write!(f, "{{")?;
                for (i, e) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    e.fmt_prec(f, PREC_RULE)?;
                }
                write!(f, "}}")
            },
            Self::FunctionCall { head, args } => fmt_call(f, head, args),
            Self::Rule { lhs, rhs } => {
                lhs.fmt_prec(f, PREC_OR)?;
                write!(f, " -> ")?;
                rhs.fmt_prec(f, PREC_RULE)
            },
            Self::Assignment { name, value } => {
                write!(f, "{name} = ")?;
                value.fmt_prec(f, PREC_ASSIGN)
            },
            Self::FunctionDefinition(def) => {
                write!(f, "{}[", def.name)?;
                for (i, p) in def.params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", p.name)?;
                    if let Some(default) = &p.default {
                        write!(f, " = ")?;
                        default.fmt_prec(f, PREC_RULE)?;
                    }
                }
                write!(f, "] {} ", if def.delayed { ":=" } else { "=" })?;
                def.body.fmt_prec(f, PREC_RULE)
            },
            Self::Infinity => write!(f, "Infinity"),
            Self::Indeterminate => write!(f, "Indeterminate"),
        }
    }
}

/// Prints a call form. Operator heads use their surface notation; everything
/// else prints as `head[arg, ...]`.
fn fmt_call(f: &mut std::fmt::Formatter<'_>, head: &str, args: &[ExprRef]) -> std::fmt::Result {
    match head {
        "CompoundExpression" if args.len() > 1 => fmt_infix(f, args, "; ", PREC_ASSIGN),
        "Or" if args.len() > 1 => fmt_infix(f, args, " || ", PREC_AND),
        "And" if args.len() > 1 => fmt_infix(f, args, " && ", PREC_EQUAL),
        "Equal" if args.len() > 1 => fmt_infix(f, args, " == ", PREC_PLUS),
        "Plus" if args.len() > 1 => fmt_infix(f, args, " + ", PREC_PLUS),
        "Times" if args.len() > 1 => {
            // A leading -1 is a negation, not a factor.
            if matches!(&*args[0], Expr::Number(v) if *v == -1.0) {
                write!(f, "-")?;
                if args.len() == 2 {
                    return args[1].fmt_prec(f, PREC_UNARY);
                }
                return fmt_infix(f, &args[1..], "*", PREC_UNARY);
            }
            fmt_infix(f, args, "*", PREC_UNARY)
        },
        "Divide" if args.len() == 2 => {
            args[0].fmt_prec(f, PREC_TIMES)?;
            write!(f, "/")?;
            args[1].fmt_prec(f, PREC_UNARY)
        },
        "StringJoin" if args.len() > 1 => fmt_infix(f, args, " <> ", PREC_UNARY),
        "Power" if args.len() == 2 => {
            args[0].fmt_prec(f, PREC_ATOM)?;
            write!(f, "^")?;
            args[1].fmt_prec(f, PREC_UNARY)
        },
        _ => {
            write!(f, "{head}[")?;
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                arg.fmt_prec(f, PREC_RULE)?;
            }
            write!(f, "]")
        },
    }
}

fn fmt_infix(f: &mut std::fmt::Formatter<'_>,
             args: &[ExprRef],
             separator: &str,
             child_prec: u8)
             -> std::fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, "{separator}")?;
        }
        arg.fmt_prec(f, child_prec)?;
    }
    Ok(())
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_bare(f)
    }
}
