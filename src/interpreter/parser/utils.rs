use std::iter::Peekable;

use crate::{error::ParseError, interpreter::lexer::Token};

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by call arguments, list literals, and parameter
/// lists. It repeatedly calls `parse_item` to parse one element, expecting
/// either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list. The
/// closing token is consumed.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `}`).
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, an unexpected token is
/// encountered, or the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> Result<T, ParseError>,
    closing: &Token)
    -> Result<Vec<T>, ParseError>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    if let Some((tok, _)) = tokens.peek()
       && tok == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((tok, _)) if tok == closing => {
                tokens.next();
                break;
            },
            Some((tok, offset)) => {
                return Err(ParseError::UnexpectedToken { token:  format!("Expected ',' or {closing:?}, found {tok:?}"),
                                                         offset: *offset, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { offset: 0 }),
        }
    }
    Ok(items)
}

/// Reports the current token as unexpected, or the end of input when the
/// stream is exhausted.
pub(in crate::interpreter::parser) fn unexpected<'a, I>(tokens: &mut Peekable<I>) -> ParseError
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.peek() {
        Some((tok, offset)) => ParseError::UnexpectedToken { token:  format!("{tok:?}"),
                                                             offset: *offset, },
        None => ParseError::UnexpectedEndOfInput { offset: 0 },
    }
}
