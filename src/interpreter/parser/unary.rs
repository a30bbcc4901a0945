use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_power,
            core::{ParseResult, check_nesting, parse_expression},
            utils::{expect_closing_paren, parse_call_arguments, unexpected},
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `+` (identity)
/// - `-` (numeric negation)
/// - `~` (bitwise inversion, rejected at evaluation)
///
/// Unary operators are right-associative, so `-+x` is parsed as `-(+x)`.
/// Each operator nests its operand one level deeper. Without a prefix
/// operator the function delegates to [`parse_power`].
///
/// Grammar:
/// ```text
///     unary := ("+" | "-" | "~") unary
///            | power
/// ```
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let op = match tokens.peek() {
        Some((Token::Plus, column)) => Some((UnaryOperator::Plus, *column)),
        Some((Token::Minus, column)) => Some((UnaryOperator::Negate, *column)),
        Some((Token::Tilde, column)) => Some((UnaryOperator::Invert, *column)),
        _ => None,
    };

    match op {
        Some((op, column)) => {
            check_nesting(depth + 1, column, "expression is nested too deeply")?;
            tokens.next();
            let expr = parse_unary(tokens, depth + 1)?;
            Ok(Expr::UnaryOp { op,
                               expr: Box::new(expr),
                               column })
        },
        None => parse_power(tokens, depth),
    }
}

/// Parses a primary expression followed by its postfix operators.
///
/// The only permitted postfix form is a call on an identifier, parenthesized
/// or not. Calling anything else (`2(3)`, `(1 + 2)(3)`, `f(1)(2)`) is a
/// `FunctionOnly` error, and attribute access or subscripting is rejected as
/// an unsupported structure.
///
/// Grammar:
/// ```text
///     postfix_primary := primary postfix*
///     postfix         := "(" arguments ")" | "." NAME | "[" ... "]"
/// ```
///
/// # Errors
/// - `FunctionOnly` when a call target is not an identifier.
/// - `InvalidStructure` for `Attribute` and `Subscript`.
/// - Any error from the argument list.
pub(crate) fn parse_postfix_primary<'a, I>(tokens: &mut Peekable<I>,
                                           depth: usize)
                                           -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut node = parse_primary(tokens, depth)?;

    loop {
        match tokens.peek() {
            Some((Token::LParen, column)) => {
                let Expr::Identifier { name, column: name_column } = node else {
                    return Err(ParseError::FunctionOnly { column: *column });
                };
                check_nesting(depth + 1, *column, "too many nested parentheses")?;
                tokens.next();
                let (arguments, keywords) = parse_call_arguments(tokens, depth + 1)?;
                node = Expr::FunctionCall { name,
                                            arguments,
                                            keywords,
                                            column: name_column };
            },
            Some((Token::Dot, column)) => {
                return Err(ParseError::InvalidStructure { kind:   "Attribute",
                                                          column: *column, });
            },
            Some((Token::LBracket, column)) => {
                return Err(ParseError::InvalidStructure { kind:   "Subscript",
                                                          column: *column, });
            },
            _ => return Ok(node),
        }
    }
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions include:
/// - numeric literals, and the recognized non-numeric literals
/// - identifiers
/// - parenthesized expressions and tuples
///
/// List, dict and set displays are rejected here by name. A `*` is only
/// meaningful in argument lists and assignment targets, so here it is a plain
/// syntax error.
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | NAME
///              | "(" [expression] ")"
/// ```
fn parse_primary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, column)) = tokens.peek() else {
        return Err(ParseError::syntax("unexpected end of input".to_string(), None));
    };
    let column = *column;

    match token {
        Token::Number(_) | Token::Str(_) | Token::True | Token::False | Token::NoneLiteral => {
            parse_literal(tokens)
        },
        Token::Identifier(name) => {
            tokens.next();
            Ok(Expr::Identifier { name: name.clone(),
                                  column })
        },
        Token::LParen => parse_grouping(tokens, depth),
        Token::LBracket => Err(ParseError::InvalidStructure { kind: "List",
                                                              column }),
        Token::LBrace => Err(ParseError::InvalidStructure { kind: brace_kind(tokens.clone()),
                                                            column }),
        tok => Err(unexpected(tok, column)),
    }
}

/// Parses a literal token into an [`Expr::Literal`].
///
/// Adjacent string literals are not concatenated; the first one is already
/// enough to reject the line at evaluation.
fn parse_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, column)) = tokens.next() else {
        return Err(ParseError::syntax("unexpected end of input".to_string(), None));
    };

    let value = match token {
        Token::Number(n) => LiteralValue::Number(*n),
        Token::Str(s) => LiteralValue::Str(s.clone()),
        Token::True => LiteralValue::Bool(true),
        Token::False => LiteralValue::Bool(false),
        Token::NoneLiteral => LiteralValue::None,
        tok => return Err(unexpected(tok, *column)),
    };

    Ok(Expr::Literal { value,
                       column: *column })
}

/// Parses a parenthesized expression.
///
/// `()` is an empty tuple and `(a, b)` a tuple; both are kept in the tree and
/// rejected at evaluation.
///
/// Grammar: `grouping := "(" [expression] ")"`
///
/// # Errors
/// Returns a syntax error if the closing `)` is missing, or if the group
/// opens one level past [`MAX_NESTING`](super::core::MAX_NESTING).
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((_, open_column)) = tokens.next() else {
        return Err(ParseError::syntax("unexpected end of input".to_string(), None));
    };
    check_nesting(depth + 1, *open_column, "too many nested parentheses")?;

    if let Some((Token::RParen, _)) = tokens.peek() {
        tokens.next();
        return Ok(Expr::Tuple { elements: Vec::new(),
                                column:   *open_column, });
    }

    let expr = parse_expression(tokens, depth + 1)?;
    expect_closing_paren(tokens, *open_column)?;
    Ok(expr)
}

/// Tells a dict display from a set display by looking for a `:` at the top
/// level of the braces. Empty braces are a dict.
fn brace_kind<'a, I>(mut tokens: Peekable<I>) -> &'static str
    where I: Iterator<Item = &'a (Token, usize)>
{
    tokens.next();
    if let Some((Token::RBrace, _)) = tokens.peek() {
        return "Dict";
    }
    let mut depth = 0usize;
    for (token, _) in tokens {
        match token {
            Token::Colon if depth == 0 => return "Dict",
            Token::RBrace if depth == 0 => break,
            tok if tok.is_opening() => depth += 1,
            tok if tok.is_closing() => depth = depth.saturating_sub(1),
            _ => {},
        }
    }
    "Set"
}
