use std::iter::Peekable;

use crate::{
    ast::{Expr, UnaryOperator},
    error::ParseError,
    interpreter::{lexer::Token, parser::binary::parse_bitwise_or},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Deepest recursion the parser allows, counting parentheses, call
/// arguments, prefix operators, `not` and exponents.
pub const MAX_NESTING: usize = 64;

/// Deepest syntax tree a line may build. Long left-associative chains such as
/// `1 + 1 + ... + 1` grow the tree without recursing, so they are bounded
/// here instead of by [`MAX_NESTING`].
pub const MAX_DEPTH: usize = 1000;

/// Fails once `depth` exceeds [`MAX_NESTING`].
///
/// # Errors
/// A syntax error carrying `message` and the column of the construct that
/// went one level too deep.
pub(in crate::interpreter::parser) fn check_nesting(depth: usize,
                                                   column: usize,
                                                   message: &str)
                                                   -> ParseResult<()> {
    if depth > MAX_NESTING {
        return Err(ParseError::syntax(message.to_string(), Some(column)));
    }
    Ok(())
}

/// Parses a full expression, including a bare comma list.
///
/// A single element without a comma is returned as-is. Any comma turns the
/// elements into an [`Expr::Tuple`], which the evaluator later rejects; a
/// trailing comma is allowed, as in `1,`.
///
/// Grammar: `expression := test ("," test)* [","]`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, column)` pairs.
/// - `depth`: Nesting depth of the expression, `0` for a whole line.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let first = parse_test(tokens, depth)?;
    if !matches!(tokens.peek(), Some((Token::Comma, _))) {
        return Ok(first);
    }

    let column = first.column();
    let mut elements = vec![first];
    while let Some((Token::Comma, _)) = tokens.peek() {
        tokens.next();
        if ends_expression_list(tokens.peek().map(|(t, _)| t)) {
            break;
        }
        elements.push(parse_test(tokens, depth)?);
    }

    Ok(Expr::Tuple { elements, column })
}

/// Returns `true` if the token cannot start another element of a comma list.
fn ends_expression_list(token: Option<&Token>) -> bool {
    match token {
        None => true,
        Some(tok) => tok.is_closing() || matches!(tok, Token::Equals | Token::Semicolon),
    }
}

/// Parses a single, comma-free expression.
///
/// This level is where the unsupported expression forms are detected:
/// `lambda`, conditional expressions, assignment expressions and generator
/// clauses are rejected by name instead of being parsed.
///
/// Grammar: `test := or_test`
pub fn parse_test<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Lambda, column)) = tokens.peek() {
        return Err(ParseError::InvalidStructure { kind:   "Lambda",
                                                  column: *column, });
    }

    let expr = parse_or_test(tokens, depth)?;

    let kind = match tokens.peek() {
        Some((Token::If, column)) => Some(("IfExp", *column)),
        Some((Token::Walrus, column)) => Some(("NamedExpr", *column)),
        Some((Token::For, column)) => Some(("GeneratorExp", *column)),
        _ => None,
    };
    match kind {
        Some((kind, column)) => Err(ParseError::InvalidStructure { kind, column }),
        None => Ok(expr),
    }
}

/// Rejects `or`.
fn parse_or_test<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let expr = parse_and_test(tokens, depth)?;
    if let Some((Token::Or, column)) = tokens.peek() {
        return Err(ParseError::InvalidStructure { kind:   "BoolOp",
                                                  column: *column, });
    }
    Ok(expr)
}

/// Rejects `and`.
fn parse_and_test<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let expr = parse_not_test(tokens, depth)?;
    if let Some((Token::And, column)) = tokens.peek() {
        return Err(ParseError::InvalidStructure { kind:   "BoolOp",
                                                  column: *column, });
    }
    Ok(expr)
}

/// Parses `not` as a unary operator tag.
///
/// `not` is kept in the tree rather than rejected here, so the evaluator
/// reports it as a disallowed unary operator.
///
/// Grammar: `not_test := "not" not_test | comparison`
fn parse_not_test<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Not, column)) = tokens.peek() {
        check_nesting(depth + 1, *column, "expression is nested too deeply")?;
        tokens.next();
        let expr = parse_not_test(tokens, depth + 1)?;
        return Ok(Expr::UnaryOp { op:     UnaryOperator::Not,
                                  expr:   Box::new(expr),
                                  column: *column, });
    }
    parse_comparison(tokens, depth)
}

/// Rejects comparison operators, including `in`, `not in`, `is`.
fn parse_comparison<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let expr = parse_bitwise_or(tokens, depth)?;
    match tokens.peek() {
        Some((tok, column)) if tok.is_comparison() || *tok == Token::Not => {
            Err(ParseError::InvalidStructure { kind:   "Compare",
                                               column: *column, })
        },
        _ => Ok(expr),
    }
}
