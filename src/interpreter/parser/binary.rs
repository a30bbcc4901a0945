use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{MAX_DEPTH, ParseResult, check_nesting},
            unary::{parse_postfix_primary, parse_unary},
        },
    },
};

/// Parses one left-associative precedence level.
///
/// Repeatedly parses operands with `next` and folds them with any operator
/// from `ops` found between them.
///
/// The folded tree leans left and deepens by one with every operator, so its
/// height is tracked and capped at [`MAX_DEPTH`] below `depth`.
///
/// Grammar: `level := next (op next)*`
fn parse_left_associative<'a, I>(tokens: &mut Peekable<I>,
                                 depth: usize,
                                 next: fn(&mut Peekable<I>, usize) -> ParseResult<Expr>,
                                 ops: &[BinaryOperator])
                                 -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = next(tokens, depth)?;
    let mut height = None;
    while let Some((token, column)) = tokens.peek()
          && let Some(op) = token_to_binary_operator(token)
          && ops.contains(&op)
    {
        let column = *column;
        tokens.next();
        let right = next(tokens, depth)?;

        let folded = 1 + height.unwrap_or_else(|| left.height()).max(right.height());
        if depth + folded > MAX_DEPTH {
            return Err(ParseError::syntax("expression is nested too deeply".to_string(),
                                          Some(column)));
        }
        height = Some(folded);

        left = Expr::BinaryOp { left: Box::new(left),
                                op,
                                right: Box::new(right),
                                column };
    }
    Ok(left)
}

/// Parses bitwise OR, the loosest binary operator.
///
/// The rule is: `bitwise_or := bitwise_xor ("|" bitwise_xor)*`
pub fn parse_bitwise_or<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens, depth, parse_bitwise_xor, &[BinaryOperator::BitOr])
}

/// The rule is: `bitwise_xor := bitwise_and ("^" bitwise_and)*`
fn parse_bitwise_xor<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens, depth, parse_bitwise_and, &[BinaryOperator::BitXor])
}

/// The rule is: `bitwise_and := shift ("&" shift)*`
fn parse_bitwise_and<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens, depth, parse_shift, &[BinaryOperator::BitAnd])
}

/// The rule is: `shift := additive (("<<" | ">>") additive)*`
fn parse_shift<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens,
                           depth,
                           parse_additive,
                           &[BinaryOperator::LShift, BinaryOperator::RShift])
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token stream with column information.
/// - `depth`: Current nesting depth.
///
/// # Returns
/// An `Expr::BinaryOp` tree representing the parsed expression.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens,
                           depth,
                           parse_multiplicative,
                           &[BinaryOperator::Add, BinaryOperator::Sub])
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators `*`, `/`, `//`, `%` and `@`. Operands
/// are unary expressions, so `2 * -3` is accepted.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "//" | "%" | "@") unary)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens,
                           depth,
                           parse_unary,
                           &[BinaryOperator::Mul,
                             BinaryOperator::Div,
                             BinaryOperator::FloorDiv,
                             BinaryOperator::Mod,
                             BinaryOperator::MatMul])
}

/// Parses exponentiation expressions.
///
/// The base is a primary with its postfix calls; the exponent is a full unary
/// expression, which makes `**` right-associative and lets a sign follow it:
/// `2 ** -1` is `0.5` while `-2 ** 2` is `-(2 ** 2)`.
///
/// The rule is: `power := postfix_primary ["**" unary]`
///
/// # Parameters
/// - `tokens`: Token stream.
/// - `depth`: Current nesting depth.
///
/// # Returns
/// An exponentiation expression tree.
pub fn parse_power<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let base = parse_postfix_primary(tokens, depth)?;
    if let Some((Token::DoubleStar, column)) = tokens.peek() {
        check_nesting(depth + 1, *column, "expression is nested too deeply")?;
        tokens.next();
        let exponent = parse_unary(tokens, depth + 1)?;
        return Ok(Expr::BinaryOp { left:   Box::new(base),
                                   op:     BinaryOperator::Pow,
                                   right:  Box::new(exponent),
                                   column: *column, });
    }
    Ok(base)
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `Some(BinaryOperator)` when the token is an infix operator
/// the grammar knows about, including the ones the evaluator will refuse.
/// Returns `None` for all other tokens.
///
/// # Example
/// ```
/// use calcbox::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::DoubleSlash),
///            Some(BinaryOperator::FloorDiv));
/// assert_eq!(token_to_binary_operator(&Token::Comma), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::DoubleSlash => Some(BinaryOperator::FloorDiv),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::DoubleStar => Some(BinaryOperator::Pow),
        Token::Ampersand => Some(BinaryOperator::BitAnd),
        Token::Pipe => Some(BinaryOperator::BitOr),
        Token::Caret => Some(BinaryOperator::BitXor),
        Token::LeftShift => Some(BinaryOperator::LShift),
        Token::RightShift => Some(BinaryOperator::RShift),
        Token::At => Some(BinaryOperator::MatMul),
        _ => None,
    }
}
