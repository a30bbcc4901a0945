use std::iter::Peekable;

use crate::{
    ast::{Expr, Keyword},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, parse_test},
    },
};

/// Builds the syntax error for a token that cannot appear where it was found.
pub(in crate::interpreter::parser) fn unexpected(token: &Token, column: usize) -> ParseError {
    ParseError::syntax(format!("unexpected token {token}"), Some(column))
}

/// Consumes the `)` that closes a group opened at `open_column`.
///
/// # Errors
/// Returns a syntax error if a different token follows, or if the input ends
/// before the group is closed.
pub(in crate::interpreter::parser) fn expect_closing_paren<'a, I>(tokens: &mut Peekable<I>,
                                                                  open_column: usize)
                                                                  -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::RParen, _)) => Ok(()),
        Some((tok, column)) => {
            Err(ParseError::syntax(format!("expected ')' but found {tok}"), Some(*column)))
        },
        None => Err(ParseError::syntax("'(' was never closed".to_string(), Some(open_column))),
    }
}

/// Parses the argument list of a call, after its opening parenthesis.
///
/// `depth` is the nesting depth of the arguments themselves. Arguments are
/// comma-separated. Positional arguments come first, followed
/// by `name=value` keyword arguments. A trailing comma before `)` is
/// accepted, and an immediately encountered `)` produces an empty list.
///
/// Grammar (simplified):
/// `arguments := [argument ("," argument)* [","]] ")"`
/// `argument  := NAME "=" test | test`
///
/// # Returns
/// The positional arguments and the keyword arguments, each in source order.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an argument fails to parse,
/// - a positional argument follows a keyword argument,
/// - a keyword is repeated,
/// - an argument is unpacked with `*` or `**` (`InvalidStructure`),
/// - the stream ends before the closing `)`.
pub(in crate::interpreter::parser) fn parse_call_arguments<'a, I>(
    tokens: &mut Peekable<I>,
    depth: usize)
    -> ParseResult<(Vec<Expr>, Vec<Keyword>)>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut arguments = Vec::new();
    let mut keywords: Vec<Keyword> = Vec::new();

    if let Some((Token::RParen, _)) = tokens.peek() {
        tokens.next();
        return Ok((arguments, keywords));
    }

    loop {
        if let Some((Token::Star | Token::DoubleStar, column)) = tokens.peek() {
            return Err(ParseError::InvalidStructure { kind:   "Starred",
                                                      column: *column, });
        }
        if let Some((name, column)) = peek_keyword(tokens) {
            tokens.next();
            tokens.next();
            if keywords.iter().any(|k| k.name == name) {
                return Err(ParseError::syntax(format!("keyword argument repeated: {name}"),
                                              Some(column)));
            }
            let value = parse_test(tokens, depth)?;
            keywords.push(Keyword { name, value });
        } else {
            let column = tokens.peek().map(|(_, c)| *c);
            let value = parse_test(tokens, depth)?;
            if !keywords.is_empty() {
                return Err(ParseError::syntax("positional argument follows keyword argument".to_string(),
                                              column));
            }
            arguments.push(value);
        }

        match tokens.next() {
            Some((Token::Comma, _)) => {
                if let Some((Token::RParen, _)) = tokens.peek() {
                    tokens.next();
                    break;
                }
            },
            Some((Token::RParen, _)) => break,
            Some((tok, column)) => {
                return Err(ParseError::syntax(format!("expected ',' or ')' but found {tok}"),
                                              Some(*column)));
            },
            None => {
                return Err(ParseError::syntax("unexpected end of input in argument list".to_string(),
                                              None));
            },
        }
    }

    Ok((arguments, keywords))
}

/// Looks ahead for `NAME "="` without consuming anything.
fn peek_keyword<'a, I>(tokens: &Peekable<I>) -> Option<(String, usize)>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut ahead = tokens.clone();
    match (ahead.next(), ahead.next()) {
        (Some((Token::Identifier(name), column)), Some((Token::Equals, _))) => {
            Some((name.clone(), *column))
        },
        _ => None,
    }
}
