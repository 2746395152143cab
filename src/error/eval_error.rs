#[derive(Debug)]
/// Represents all errors that can be raised during evaluation.
///
/// Errors abort the outermost `evaluate` call; nothing is retried. The
/// environment keeps whatever assignments completed before the error.
pub enum EvalError {
    /// A handler received an argument of the wrong variant.
    TypeError {
        /// Human-readable description of the mismatch.
        details: String,
    },
    /// An argument had the right type but an invalid value.
    DomainError {
        /// Human-readable description of the violation.
        details: String,
    },
    /// An elementwise operation received lists of mismatched sizes.
    ShapeError {
        /// Human-readable description of the mismatch.
        details: String,
    },
    /// A user-defined function was called with the wrong number of
    /// arguments.
    ArityMismatch {
        /// The function name.
        name:     String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of supplied arguments.
        found:    usize,
    },
}

// Messages print verbatim: several of them are stable output the test suite
// matches character for character.
impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeError { details }
            | Self::DomainError { details }
            | Self::ShapeError { details } => write!(f, "{details}"),

            Self::ArityMismatch { name,
                                  expected,
                                  found, } => {
                write!(f,
                       "Function '{name}' expects {expected} argument(s), but {found} were given.")
            },
        }
    }
}

impl std::error::Error for EvalError {}
