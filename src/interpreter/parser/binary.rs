use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{Expr, ExprRef},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_implicit},
    },
};

/// Parses a rule expression.
///
/// This is the entry point for everything below the assignment forms. `->`
/// is right-associative, so `a -> b -> c` parses as `a -> (b -> c)`.
///
/// Grammar: `rule := or ("->" rule)?`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, offset)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_rule<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ExprRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let lhs = parse_or(tokens)?;

    if let Some((Token::Arrow, _)) = tokens.peek() {
        tokens.next();
        let rhs = parse_rule(tokens)?;
        return Ok(Rc::new(Expr::Rule { lhs, rhs }));
    }

    Ok(lhs)
}

/// Parses logical OR expressions.
///
/// Handles left-associative chains of `||` into binary `Or` call forms; the
/// evaluator flattens them.
///
/// Grammar: `or := and ("||" and)*`
pub fn parse_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ExprRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_and(tokens)?;

    while let Some((Token::OrOr, _)) = tokens.peek() {
        tokens.next();
        let right = parse_and(tokens)?;
        left = Expr::call("Or", vec![left, right]);
    }

    Ok(left)
}

/// Parses logical AND expressions.
///
/// Grammar: `and := equality ("&&" equality)*`
pub fn parse_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ExprRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_equality(tokens)?;

    while let Some((Token::AndAnd, _)) = tokens.peek() {
        tokens.next();
        let right = parse_equality(tokens)?;
        left = Expr::call("And", vec![left, right]);
    }

    Ok(left)
}

/// Parses equality expressions.
///
/// Grammar: `equality := additive ("==" additive)*`
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ExprRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_additive(tokens)?;

    while let Some((Token::EqualEqual, _)) = tokens.peek() {
        tokens.next();
        let right = parse_additive(tokens)?;
        left = Expr::call("Equal", vec![left, right]);
    }

    Ok(left)
}

/// Parses addition and subtraction expressions.
///
/// Both operators build `Plus` nodes; subtraction wraps its right operand as
/// `Times[-1, rhs]` so that the evaluator only ever sees sums.
///
/// Grammar: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ExprRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_multiplicative(tokens)?;

    loop {
        match tokens.peek() {
            Some((Token::Plus, _)) => {
                tokens.next();
                let right = parse_multiplicative(tokens)?;
                left = Expr::call("Plus", vec![left, right]);
            },
            Some((Token::Minus, _)) => {
                tokens.next();
                let right = parse_multiplicative(tokens)?;
                let negated = Expr::call("Times", vec![Expr::number(-1.0), right]);
                left = Expr::call("Plus", vec![left, negated]);
            },
            _ => break,
        }
    }

    Ok(left)
}

/// Parses multiplication and division expressions.
///
/// Each right operand is parsed at the implicit-multiplication level, which
/// gives the division-by-product behaviour: in `x/-3x` the whole product
/// `-3x` binds as the denominator, so the input parses as
/// `Divide[x, Times[-3, x]]` rather than `Times[Divide[x, -3], x]`. A
/// parenthesised denominator is used verbatim.
///
/// Grammar: `multiplicative := join (("*" | "/") join)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ExprRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_string_join(tokens)?;

    loop {
        match tokens.peek() {
            Some((Token::Star, _)) => {
                tokens.next();
                let right = parse_string_join(tokens)?;
                left = Expr::call("Times", vec![left, right]);
            },
            Some((Token::Slash, _)) => {
                tokens.next();
                let right = parse_string_join(tokens)?;
                left = Expr::call("Divide", vec![left, right]);
            },
            _ => break,
        }
    }

    Ok(left)
}

/// Parses string-join expressions.
///
/// Chained joins flatten left to right into a single n-ary `StringJoin`
/// call: `"a" <> "b" <> "c"` becomes `StringJoin["a", "b", "c"]`.
///
/// Grammar: `join := implicit ("<>" implicit)*`
pub fn parse_string_join<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ExprRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let first = parse_implicit(tokens)?;

    if !matches!(tokens.peek(), Some((Token::Join, _))) {
        return Ok(first);
    }

    let mut parts = vec![first];
    while let Some((Token::Join, _)) = tokens.peek() {
        tokens.next();
        parts.push(parse_implicit(tokens)?);
    }

    Ok(Expr::call("StringJoin", parts))
}
