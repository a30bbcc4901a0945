use crate::{
    ast::{Expr, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, core::parse_expression, utils::unexpected},
    },
};

/// The shape of one `;`-separated segment of a line.
enum Shape {
    Expression(Expr),
    Assignment { name: String, value: Expr, column: usize },
    /// Any other assignment form: augmented, chained, tuple or attribute
    /// targets.
    Compound,
}

/// Parses one input line into a statement.
///
/// A line is either a bare expression or a single assignment `NAME = expr`.
/// One trailing `;` is tolerated. Every other statement shape is refused:
///
/// - `x += 1`, `a = b = 1`, `a, b = 1, 2`, `a.b = 1` and lines with several
///   statements that assign give [`ParseError::SimpleAssignmentOnly`];
/// - several plain expressions separated by `;`, or an assignment to a
///   literal, a call or an operator expression, give a syntax error.
///
/// # Parameters
/// - `tokens`: The full token list of the line.
///
/// # Returns
/// The parsed [`Statement`].
pub fn parse_line(tokens: &[(Token, usize)]) -> ParseResult<Statement> {
    if tokens.is_empty() {
        return Err(ParseError::syntax("empty input".to_string(), None));
    }

    let (mut segments, separators) = split_top_level(tokens, |t| *t == Token::Semicolon);
    if segments.len() > 1 && segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }

    let statement = if let [segment] = segments.as_slice() {
        match classify(segment)? {
            Shape::Expression(expr) => Statement::Expression(expr),
            Shape::Assignment { name, value, column } => {
                Statement::Assignment { name,
                                        value,
                                        column }
            },
            Shape::Compound => return Err(ParseError::SimpleAssignmentOnly),
        }
    } else {
        let mut assigns = false;
        for (index, segment) in segments.iter().enumerate() {
            if segment.is_empty() {
                let column = separators.get(index).copied();
                return Err(ParseError::syntax("unexpected token ';'".to_string(), column));
            }
            if !matches!(classify(segment)?, Shape::Expression(_)) {
                assigns = true;
            }
        }
        if assigns {
            return Err(ParseError::SimpleAssignmentOnly);
        }
        return Err(ParseError::syntax("multiple statements are not allowed".to_string(),
                                      separators.first().copied()));
    };

    tracing::debug!(?statement, "parsed line");
    Ok(statement)
}

/// Parses a line that must be a single expression.
///
/// Used for `eval`-style evaluation where assignment is not available at all:
/// any top-level `=`, augmented assignment or `;` is a syntax error.
pub fn parse_expression_line(tokens: &[(Token, usize)]) -> ParseResult<Expr> {
    if tokens.is_empty() {
        return Err(ParseError::syntax("empty input".to_string(), None));
    }

    let mut depth = 0usize;
    for (token, column) in tokens {
        match token {
            tok if tok.is_opening() => depth += 1,
            tok if tok.is_closing() => depth = depth.saturating_sub(1),
            Token::Equals | Token::AugmentedAssign(_) if depth == 0 => {
                return Err(ParseError::syntax("assignment is not allowed in an expression"
                                                  .to_string(),
                                              Some(*column)));
            },
            Token::Semicolon if depth == 0 => {
                return Err(ParseError::syntax("multiple statements are not allowed".to_string(),
                                              Some(*column)));
            },
            _ => {},
        }
    }

    let expr = parse_complete(tokens)?;
    tracing::debug!(?expr, "parsed expression");
    Ok(expr)
}

/// Splits `tokens` at every separator found outside of brackets.
///
/// Returns the segments (always one more than the separators) and the columns
/// of the separators.
fn split_top_level(tokens: &[(Token, usize)],
                   is_separator: impl Fn(&Token) -> bool)
                   -> (Vec<&[(Token, usize)]>, Vec<usize>) {
    let mut segments = Vec::new();
    let mut separators = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (index, (token, column)) in tokens.iter().enumerate() {
        if token.is_opening() {
            depth += 1;
        } else if token.is_closing() {
            depth = depth.saturating_sub(1);
        } else if depth == 0 && is_separator(token) {
            segments.push(&tokens[start..index]);
            separators.push(*column);
            start = index + 1;
        }
    }
    segments.push(&tokens[start..]);

    (segments, separators)
}

/// Parses `tokens` as one expression that must consume every token.
fn parse_complete(tokens: &[(Token, usize)]) -> ParseResult<Expr> {
    let mut iter = tokens.iter().peekable();
    let expr = parse_expression(&mut iter, 0)?;
    match iter.next() {
        None => Ok(expr),
        Some((Token::RParen, column)) => {
            Err(ParseError::syntax("unmatched ')'".to_string(), Some(*column)))
        },
        Some((tok, column)) => Err(unexpected(tok, *column)),
    }
}

fn classify(segment: &[(Token, usize)]) -> ParseResult<Shape> {
    let (sides, _) = split_top_level(segment, |t| matches!(t, Token::AugmentedAssign(_)));
    if let [target, value] = sides.as_slice() {
        let Some((_, op_column)) = segment.iter().find(|(t, _)| matches!(t, Token::AugmentedAssign(_)))
        else {
            return Err(ParseError::syntax("invalid syntax".to_string(), None));
        };
        if target.is_empty() || value.is_empty() {
            return Err(ParseError::syntax("invalid syntax".to_string(), Some(*op_column)));
        }
        parse_complete(value)?;
        classify_target(target)?;
        return Ok(Shape::Compound);
    }
    if sides.len() > 2 {
        return Ok(Shape::Compound);
    }

    let (sides, equals) = split_top_level(segment, |t| *t == Token::Equals);
    let Some((value_side, targets)) = sides.split_last() else {
        return Err(ParseError::syntax("invalid syntax".to_string(), None));
    };
    if targets.is_empty() {
        return parse_complete(segment).map(Shape::Expression);
    }

    if let Some(index) = targets.iter().position(|t| t.is_empty()) {
        return Err(ParseError::syntax("invalid syntax".to_string(), equals.get(index).copied()));
    }
    if value_side.is_empty() {
        return Err(ParseError::syntax("expected an expression after '='".to_string(),
                                      equals.last().copied()));
    }

    let value = parse_complete(value_side)?;
    let mut names = Vec::with_capacity(targets.len());
    for target in targets {
        names.push(classify_target(target)?);
    }

    match names.as_mut_slice() {
        [Some((name, column))] => Ok(Shape::Assignment { name: std::mem::take(name),
                                                         value,
                                                         column: *column }),
        _ => Ok(Shape::Compound),
    }
}

/// Checks an assignment target.
///
/// Returns the name and column for a plain name (possibly parenthesized),
/// `None` for a well-formed target the calculator does not support, and a
/// syntax error for something that cannot be assigned to at all.
fn classify_target(target: &[(Token, usize)]) -> ParseResult<Option<(String, usize)>> {
    if let [(Token::Identifier(name), column)] = target {
        return Ok(Some((name.clone(), *column)));
    }
    if has_starred_element(target) {
        return Ok(None);
    }

    match parse_complete(target) {
        Ok(Expr::Identifier { name, column }) => Ok(Some((name, column))),
        Ok(Expr::Tuple { elements, .. }) => {
            check_tuple_target(&elements)?;
            Ok(None)
        },
        Ok(expr) => Err(cannot_assign(&expr)),
        Err(ParseError::InvalidStructure { kind: "Attribute" | "Subscript" | "List", .. }) => {
            Ok(None)
        },
        Err(err) => Err(err),
    }
}

fn check_tuple_target(elements: &[Expr]) -> ParseResult<()> {
    for element in elements {
        match element {
            Expr::Identifier { .. } => {},
            Expr::Tuple { elements, .. } => check_tuple_target(elements)?,
            other => return Err(cannot_assign(other)),
        }
    }
    Ok(())
}

fn cannot_assign(expr: &Expr) -> ParseError {
    let what = match expr {
        Expr::Literal { .. } => "literal",
        Expr::FunctionCall { .. } => "function call",
        _ => "expression",
    };
    ParseError::syntax(format!("cannot assign to {what}"), Some(expr.column()))
}

/// Returns `true` if a `*` opens an element of the target, as in `*a, b`.
fn has_starred_element(target: &[(Token, usize)]) -> bool {
    let mut depth = 0usize;
    let mut element_start = true;
    for (token, _) in target {
        match token {
            Token::Star if element_start => return true,
            Token::Comma if depth == 0 => {
                element_start = true;
                continue;
            },
            Token::LParen if depth == 0 => {
                depth += 1;
                element_start = true;
                continue;
            },
            tok if tok.is_opening() => depth += 1,
            tok if tok.is_closing() => depth = depth.saturating_sub(1),
            _ => {},
        }
        element_start = false;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn line(source: &str) -> ParseResult<Statement> {
        parse_line(&tokenize(source).expect("lexes"))
    }

    #[test]
    fn bare_expression() {
        assert!(matches!(line("1 + 2"), Ok(Statement::Expression(_))));
    }

    #[test]
    fn simple_assignment_with_trailing_semicolon() {
        let Ok(Statement::Assignment { name, column, .. }) = line("x = 2;") else {
            panic!("expected an assignment");
        };
        assert_eq!(name, "x");
        assert_eq!(column, 1);
    }

    #[test]
    fn parenthesized_name_is_a_simple_target() {
        assert!(matches!(line("(x) = 2"), Ok(Statement::Assignment { .. })));
    }

    #[test]
    fn keyword_argument_is_not_an_assignment() {
        assert!(matches!(line("log(8, base=2)"), Ok(Statement::Expression(_))));
    }

    #[test]
    fn compound_forms_are_refused() {
        for source in ["x += 1",
                       "a = b = 1",
                       "a, b = 1, 2",
                       "*a, b = 1, 2",
                       "a.b = 1",
                       "a[0] = 1",
                       "x = 1; y = 2",
                       "1; y = 2"]
        {
            assert_eq!(line(source), Err(ParseError::SimpleAssignmentOnly), "{source}");
        }
    }

    #[test]
    fn invalid_targets_are_syntax_errors() {
        for source in ["2 = x", "f(1) = 2", "a + b = 3", "= 3", "x ="] {
            assert!(matches!(line(source), Err(ParseError::Syntax { .. })), "{source}");
        }
    }

    #[test]
    fn multiple_expressions_are_syntax_errors() {
        assert!(matches!(line("1; 2"), Err(ParseError::Syntax { .. })));
        assert!(matches!(line("1;;"), Err(ParseError::Syntax { .. })));
    }

    #[test]
    fn expression_line_refuses_assignment() {
        let tokens = tokenize("x = 5").expect("lexes");
        assert!(matches!(parse_expression_line(&tokens), Err(ParseError::Syntax { .. })));
    }

    #[test]
    fn trailing_tokens_are_reported() {
        let tokens = tokenize("(1 + 2))").expect("lexes");
        assert_eq!(parse_expression_line(&tokens),
                   Err(ParseError::syntax("unmatched ')'".to_string(), Some(8))));
    }
}
