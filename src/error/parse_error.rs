#[derive(Debug)]
/// Represents all errors that can occur during lexing or parsing.
///
/// Every variant records the byte offset into the source string where the
/// error was detected.
pub enum ParseError {
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// The token encountered, or a short description of what was
        /// expected instead.
        token:  String,
        /// Byte offset of the token in the source.
        offset: usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// Byte offset where input ran out.
        offset: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    ExpectedClosingParen {
        /// Byte offset of the unmatched `(`.
        offset: usize,
    },
    /// A closing bracket `]` was expected but not found.
    ExpectedClosingBracket {
        /// Byte offset of the unmatched `[`.
        offset: usize,
    },
    /// A closing brace `}` was expected but not found.
    ExpectedClosingBrace {
        /// Byte offset of the unmatched `{`.
        offset: usize,
    },
    /// A string literal was opened but never closed.
    UnterminatedString {
        /// Byte offset of the opening quote.
        offset: usize,
    },
    /// The function definition syntax was invalid.
    InvalidFunctionDefinition {
        /// Byte offset of the definition head.
        offset: usize,
    },
    /// Found extra tokens after parsing should have completed.
    UnexpectedTrailingTokens {
        /// The first extra token.
        token:  String,
        /// Byte offset of the extra token.
        offset: usize,
    },
    /// An integer literal was too large to be represented exactly.
    LiteralTooLarge {
        /// Byte offset of the literal.
        offset: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, offset } => {
                write!(f, "Parse error at offset {offset}: Unexpected token: {token}.")
            },

            Self::UnexpectedEndOfInput { offset } => {
                write!(f, "Parse error at offset {offset}: Unexpected end of input.")
            },

            Self::ExpectedClosingParen { offset } => write!(f,
                                                            "Parse error at offset {offset}: Expected closing parenthesis ')' but none found."),

            Self::ExpectedClosingBracket { offset } => write!(f,
                                                              "Parse error at offset {offset}: Expected closing bracket ']' but none found."),

            Self::ExpectedClosingBrace { offset } => write!(f,
                                                            "Parse error at offset {offset}: Expected closing brace '}}' but none found."),

            Self::UnterminatedString { offset } => {
                write!(f, "Parse error at offset {offset}: Unterminated string literal.")
            },

            Self::InvalidFunctionDefinition { offset } => write!(f,
                                                                 "Parse error at offset {offset}: Invalid function definition syntax. Example: f[x] := x * x"),

            Self::UnexpectedTrailingTokens { token, offset } => write!(f,
                                                                       "Parse error at offset {offset}: Extra tokens after expression. Check your input: {token}"),

            Self::LiteralTooLarge { offset } => {
                write!(f, "Parse error at offset {offset}: Literal is too large.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
