use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{Expr, ExprRef, FunctionDef, Parameter},
    error::ParseError,
    interpreter::{
        lexer::{Token, tokenize},
        parser::{binary::parse_rule, utils::parse_comma_separated},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete source string into an expression tree.
///
/// This is the public entry point. The whole input is consumed; `;`-separated
/// statements become a single `CompoundExpression` call form. Trailing tokens
/// after a complete expression are an error.
///
/// # Errors
/// Returns a `ParseError` on lexical errors, malformed syntax, unbalanced
/// delimiters, or leftover input.
///
/// # Example
/// ```
/// use symba::parse_expression;
///
/// let expr = parse_expression("x + 1").unwrap();
/// assert!(expr.is_call_to("Plus"));
/// ```
pub fn parse_expression(source: &str) -> ParseResult<ExprRef> {
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();

    let expr = parse_compound(&mut iter)?;

    if let Some((tok, offset)) = iter.peek() {
        return Err(ParseError::UnexpectedTrailingTokens { token:  format!("{tok:?}"),
                                                          offset: *offset, });
    }

    Ok(expr)
}

/// Parses a `;`-separated statement sequence.
///
/// Grammar: `compound := statement (";" statement)* ";"?`
///
/// A single statement is returned unwrapped; two or more become
/// `CompoundExpression[...]`, which the evaluator runs left to right.
fn parse_compound<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ExprRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = vec![parse_statement(tokens)?];

    while let Some((Token::Semicolon, _)) = tokens.peek() {
        tokens.next();
        if tokens.peek().is_none() {
            break;
        }
        statements.push(parse_statement(tokens)?);
    }

    if statements.len() == 1 {
        Ok(statements.remove(0))
    } else {
        Ok(Expr::call("CompoundExpression", statements))
    }
}

/// Parses a single statement.
///
/// A statement may be one of:
/// - a variable assignment: `name = expr`,
/// - a function definition: `name[params] = body` or `name[params] := body`,
/// - a plain expression.
///
/// The first two require lookahead because an identifier followed by `[` may
/// equally begin an ordinary call such as `f[3] + 1`; only a `=` or `:=`
/// after the balanced bracket group makes it a definition.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ExprRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some(statement) = parse_assignment(tokens)? {
        return Ok(statement);
    }
    if let Some(statement) = parse_function_definition(tokens)? {
        return Ok(statement);
    }

    parse_rule(tokens)
}

/// Parses a variable assignment: `<identifier> = <expression>`.
///
/// The right-hand side may itself be an assignment (`x = y = 2`), making `=`
/// right-associative. A bare `<identifier> := ...` is rejected: only call
/// forms may be delayed.
///
/// Returns `Ok(None)` without consuming input when the next tokens do not
/// form an assignment.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<ExprRef>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Identifier(_), _)) = tokens.peek() {
        let mut lookahead = tokens.clone();
        lookahead.next();

        match lookahead.peek() {
            Some((Token::Equals, _)) => {
                let name = match tokens.next() {
                    Some((Token::Identifier(n), _)) => n.clone(),
                    _ => unreachable!(),
                };
                tokens.next();

                let value = parse_statement(tokens)?;
                return Ok(Some(Rc::new(Expr::Assignment { name, value })));
            },
            Some((Token::ColonEquals, offset)) => {
                return Err(ParseError::InvalidFunctionDefinition { offset: *offset });
            },
            _ => {},
        }
    }
    Ok(None)
}

/// Parses a function definition:
///
/// ```text
///     <name> "[" param ("," param)* "]" ("=" | ":=") <body>
///     param := identifier ("=" default)?
/// ```
///
/// The definition is identified by scanning over the balanced bracket group
/// and checking for `=` or `:=` behind it; otherwise no input is consumed
/// and `Ok(None)` is returned so the caller can parse an ordinary call.
fn parse_function_definition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<ExprRef>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Identifier(_), _)) = tokens.peek() {
        let mut lookahead = tokens.clone();
        lookahead.next();

        if let Some((Token::LBracket, _)) = lookahead.peek() {
            lookahead.next();
            let mut brackets = 1;

            while brackets > 0 {
                match lookahead.next() {
                    Some((Token::LBracket, _)) => brackets += 1,
                    Some((Token::RBracket, _)) => brackets -= 1,
                    Some(_) => {},
                    None => return Ok(None),
                }
            }

            let delayed = match lookahead.peek() {
                Some((Token::Equals, _)) => false,
                Some((Token::ColonEquals, _)) => true,
                _ => return Ok(None),
            };

            let name = match tokens.next() {
                Some((Token::Identifier(n), _)) => n.clone(),
                _ => unreachable!(),
            };
            tokens.next();

            let params = parse_comma_separated(tokens, parse_parameter, &Token::RBracket)?;
            tokens.next();

            let body = parse_rule(tokens)?;
            return Ok(Some(Rc::new(Expr::FunctionDefinition(FunctionDef { name,
                                                                          params,
                                                                          body,
                                                                          delayed }))));
        }
    }
    Ok(None)
}

/// Parses one parameter of a definition, with an optional `= default`.
fn parse_parameter<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Parameter>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = match tokens.next() {
        Some((Token::Identifier(n), _)) => n.clone(),
        Some((tok, offset)) => {
            return Err(ParseError::UnexpectedToken { token:  format!("Expected parameter name, found {tok:?}"),
                                                     offset: *offset, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { offset: 0 }),
    };

    let default = if let Some((Token::Equals, _)) = tokens.peek() {
        tokens.next();
        Some(parse_rule(tokens)?)
    } else {
        None
    };

    Ok(Parameter { name, default })
}
