use std::iter::Peekable;

use crate::{
    ast::{Expr, ExprRef},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_rule,
            core::ParseResult,
            utils::{parse_comma_separated, unexpected},
        },
    },
};

/// Parses implicit multiplication.
///
/// A juxtaposition of two operands with no operator between them forms a
/// product: `2x`, `2(3 + x)`, and `b C` all multiply. Juxtaposition applies
/// whenever the next token begins a new operand with an identifier or `(`;
/// number-first forms like `2 3` are not products, which keeps the grammar
/// unambiguous.
///
/// Grammar: `implicit := unary (unary)*` (restricted as above)
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, offset)` pairs.
///
/// # Returns
/// The parsed expression, a `Times` chain when juxtaposition applies.
pub fn parse_implicit<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ExprRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_unary(tokens)?;

    while matches!(tokens.peek(), Some((Token::Identifier(_) | Token::LParen, _))) {
        let right = parse_unary(tokens)?;
        left = Expr::call("Times", vec![left, right]);
    }

    Ok(left)
}

/// Parses a unary expression.
///
/// A prefix `-` on a numeric literal produces the negative literal, so `-2x`
/// becomes `Times[-2, x]` with the sign absorbed into the number. On
/// anything else it produces `Times[-1, expr]`. Exponentiation binds
/// tighter, so `-2^3` negates the whole power.
///
/// Grammar: `unary := "-" unary | power`
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ExprRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Minus, _)) = tokens.peek() {
        tokens.next();
        let expr = parse_unary(tokens)?;
        return Ok(match &*expr {
                      Expr::Number(v) => Expr::number(-v),
                      _ => Expr::call("Times", vec![Expr::number(-1.0), expr]),
                  });
    }

    parse_power(tokens)
}

/// Parses exponentiation expressions.
///
/// `^` is right-associative: `2^3^4` parses as `2^(3^4)`. The exponent is
/// parsed at the unary level so that `2^-3` works without parentheses.
///
/// Grammar: `power := primary ("^" unary)?`
pub fn parse_power<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ExprRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let base = parse_primary(tokens)?;

    if let Some((Token::Caret, _)) = tokens.peek() {
        tokens.next();
        let exponent = parse_unary(tokens)?;
        return Ok(Expr::call("Power", vec![base, exponent]));
    }

    Ok(base)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the grammar and include:
/// - numeric, string, and boolean literals
/// - identifiers and call forms `head[args, ...]`
/// - parenthesized expressions
/// - list literals `{ ... }`
///
/// Constant names such as `Pi` or `Infinity` are ordinary symbols here; any
/// special meaning is the evaluator's business.
fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ExprRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, offset)) = tokens.peek() else {
        return Err(ParseError::UnexpectedEndOfInput { offset: 0 });
    };
    let offset = *offset;

    match token {
        Token::Integer(_) | Token::Real(_) => parse_number(tokens, offset),
        Token::Str(_) => {
            let Some((Token::Str(s), _)) = tokens.next() else {
                unreachable!()
            };
            Ok(Expr::string(s.clone()))
        },
        Token::Bool(_) => {
            let Some((Token::Bool(b), _)) = tokens.next() else {
                unreachable!()
            };
            Ok(Expr::boolean(*b))
        },
        Token::Identifier(_) => parse_symbol_or_call(tokens),
        Token::LParen => parse_grouping(tokens, offset),
        Token::LBrace => parse_list_literal(tokens, offset),
        _ => Err(unexpected(tokens)),
    }
}

/// Parses a numeric literal into an `Expr::Number`.
///
/// Integer literals are converted through `i64`, so integer-valued numbers
/// stay exact; anything that does not fit is rejected by the lexer before
/// this point.
#[allow(clippy::cast_precision_loss)]
fn parse_number<'a, I>(tokens: &mut Peekable<I>, offset: usize) -> ParseResult<ExprRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    use crate::util::num::MAX_SAFE_I64_INT;

    match tokens.next() {
        Some((Token::Integer(n), _)) => {
            // The lexer only produces non-negative integer literals.
            if *n > MAX_SAFE_I64_INT {
                return Err(ParseError::LiteralTooLarge { offset });
            }
            Ok(Expr::number(*n as f64))
        },
        Some((Token::Real(v), _)) => Ok(Expr::number(*v)),
        _ => unreachable!(),
    }
}

/// Parses an identifier, which is either a plain symbol or the head of a
/// call form `head[arg, ...]`.
fn parse_symbol_or_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ExprRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = match tokens.next() {
        Some((Token::Identifier(n), _)) => n.clone(),
        _ => unreachable!(),
    };

    if let Some((Token::LBracket, offset)) = tokens.peek() {
        let offset = *offset;
        tokens.next();
        let args =
            parse_comma_separated(tokens, parse_rule, &Token::RBracket).map_err(|e| match e {
                ParseError::UnexpectedEndOfInput { .. } => {
                    ParseError::ExpectedClosingBracket { offset }
                },
                other => other,
            })?;
        return Ok(Expr::call(name, args));
    }

    Ok(Expr::symbol(name))
}

/// Parses a parenthesized expression. The inner expression is returned
/// as-is; grouping leaves no node behind.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, offset: usize) -> ParseResult<ExprRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();
    let expr = parse_rule(tokens)?;
    match tokens.next() {
        Some((Token::RParen, _)) => Ok(expr),
        _ => Err(ParseError::ExpectedClosingParen { offset }),
    }
}

/// Parses a list literal `{e1, e2, ..., en}` into the `List` call form.
/// The empty list `{}` is allowed.
fn parse_list_literal<'a, I>(tokens: &mut Peekable<I>, offset: usize) -> ParseResult<ExprRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();
    let elements =
        parse_comma_separated(tokens, parse_rule, &Token::RBrace).map_err(|e| match e {
            ParseError::UnexpectedEndOfInput { .. } => ParseError::ExpectedClosingBrace { offset },
            other => other,
        })?;
    Ok(Expr::call("List", elements))
}
