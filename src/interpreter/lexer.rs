use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    /// Real literal tokens, such as `3.14`, `.5`, or `2.1e-10`.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_real)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_real)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_real)]
    Real(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Boolean literal tokens, `True` or `False`.
    #[token("True", |_| true)]
    #[token("False", |_| false)]
    Bool(bool),
    /// Double-quoted string literal tokens with `\"`, `\\`, `\n`, and `\t`
    /// escapes.
    #[regex(r#""([^"\\]|\\.)*""#, parse_string)]
    Str(String),
    /// Identifier tokens; symbol or head names such as `x` or `StringTake`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `:=`
    #[token(":=")]
    ColonEquals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `=`
    #[token("=")]
    Equals,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// `<>`
    #[token("<>")]
    Join,
    /// `->`
    #[token("->")]
    Arrow,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,

    /// Whitespace separates tokens and is otherwise ignored.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
}

/// Converts a source string into a token stream.
///
/// Each token is paired with its starting byte offset, which parse errors
/// report back to the user.
///
/// # Errors
/// Returns a `ParseError` for characters outside the language and for string
/// literals that are opened but never closed.
///
/// # Example
/// ```
/// use symba::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("2 + x").unwrap();
/// assert_eq!(tokens[0], (Token::Integer(2), 0));
/// assert_eq!(tokens[1], (Token::Plus, 2));
/// assert_eq!(tokens[2], (Token::Identifier("x".to_string()), 4));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let offset = lexer.span().start;
        match token {
            Ok(tok) => tokens.push((tok, offset)),
            Err(()) => {
                let slice = lexer.slice();
                return Err(if slice.starts_with('"') {
                               ParseError::UnterminatedString { offset }
                           } else if slice.chars().all(|c| c.is_ascii_digit()) {
                               ParseError::LiteralTooLarge { offset }
                           } else {
                               ParseError::UnexpectedToken { token: slice.to_string(),
                                                             offset }
                           });
            },
        }
    }

    Ok(tokens)
}

/// Parses a floating-point literal from the current token slice.
fn parse_real(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice. Fails on values
/// that overflow `i64`, which surfaces as a lexer error.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Parses a string literal, stripping the quotes and resolving escapes.
fn parse_string(lex: &logos::Lexer<Token>) -> Option<String> {
    let raw = lex.slice();
    let inner = &raw[1..raw.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next()? {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                other => out.push(other),
            }
        } else {
            out.push(c);
        }
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_is_tokenized_greedily() {
        let tokens = tokenize("a == b = c := d <> e -> f").unwrap();
        let kinds: Vec<&Token> = tokens.iter().map(|(t, _)| t).collect();
        assert!(matches!(kinds[1], Token::EqualEqual));
        assert!(matches!(kinds[3], Token::Equals));
        assert!(matches!(kinds[5], Token::ColonEquals));
        assert!(matches!(kinds[7], Token::Join));
        assert!(matches!(kinds[9], Token::Arrow));
    }

    #[test]
    fn string_escapes_are_resolved() {
        let tokens = tokenize(r#""a\"b\\c""#).unwrap();
        assert_eq!(tokens[0].0, Token::Str("a\"b\\c".to_string()));
    }

    #[test]
    fn unterminated_string_is_reported() {
        let err = tokenize("\"oops").unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedString { offset: 0 }));
    }

    #[test]
    fn booleans_are_keywords_not_identifiers() {
        let tokens = tokenize("True Falsehood").unwrap();
        assert_eq!(tokens[0].0, Token::Bool(true));
        assert_eq!(tokens[1].0, Token::Identifier("Falsehood".to_string()));
    }
}
