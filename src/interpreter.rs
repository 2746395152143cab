/// The evaluator module rewrites expression trees under an environment.
///
/// The evaluator walks an expression tree bottom-up, applying head-specific
/// rules after arguments have been evaluated: numeric reduction, identity and
/// absorber simplification, canonical argument ordering, list broadcasting,
/// and the string built-ins. It is the core execution engine.
///
/// # Responsibilities
/// - Dispatches on the head of each call form and applies its handler.
/// - Manages bound names and user-defined functions through `Environment`.
/// - Reports evaluation errors such as type, domain, and shape mismatches.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// corresponding to meaningful language elements such as numbers, strings,
/// identifiers, operators, and delimiters. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with byte offsets.
/// - Handles numeric and string literals, identifiers, and operators.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds expression trees from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// the uniform symbolic expression tree, climbing the precedence table from
/// assignments down to atoms. Implicit multiplication and the
/// division-by-product rule are resolved here.
///
/// # Responsibilities
/// - Converts tokens into `Expr` trees, including call forms and lists.
/// - Validates grammar and syntax, reporting errors with byte offsets.
/// - Handles assignments, definitions, rules, and statement sequences.
pub mod parser;
