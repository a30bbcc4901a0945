use std::fmt;

use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in a calculator line.
///
/// The lexer recognizes more than the evaluator will ever accept: keywords,
/// comparison operators, brackets and string literals are tokenized so that
/// the parser can reject the constructs they start by name instead of
/// reporting a bare syntax error.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\f\r\n]+")]
#[logos(error = LexError)]
pub enum Token {
    /// Decimal number literals, such as `42`, `3.14`, `.5`, `2.` or `2.1e-10`.
    #[regex(r"[0-9]+", parse_integer)]
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_number)]
    Number(f64),
    /// Quoted string literals. Recognized only to be rejected as constants.
    #[regex(r#""([^"\\\n]|\\.)*""#, parse_string)]
    #[regex(r"'([^'\\\n]|\\.)*'", parse_string)]
    Str(String),
    /// `True`
    #[token("True")]
    True,
    /// `False`
    #[token("False")]
    False,
    /// `None`
    #[token("None")]
    NoneLiteral,
    /// `lambda`
    #[token("lambda")]
    Lambda,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `in`
    #[token("in")]
    In,
    /// `is`
    #[token("is")]
    Is,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// Identifier tokens; variable or function names such as `x` or `sqrt`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `# Comments` run to the end of the line.
    #[regex(r"#[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `**`
    #[token("**")]
    DoubleStar,
    /// `/`
    #[token("/")]
    Slash,
    /// `//`
    #[token("//")]
    DoubleSlash,
    /// `%`
    #[token("%")]
    Percent,
    /// `@`
    #[token("@")]
    At,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `|`
    #[token("|")]
    Pipe,
    /// `^`
    #[token("^")]
    Caret,
    /// `~`
    #[token("~")]
    Tilde,
    /// `<<`
    #[token("<<")]
    LeftShift,
    /// `>>`
    #[token(">>")]
    RightShift,
    /// Augmented assignments such as `+=`, `**=` or `//=`.
    #[regex(r"(\+|-|\*|\*\*|/|//|%|@|&|\||\^|<<|>>)=", |lex| lex.slice().to_string())]
    AugmentedAssign(String),
    /// `=`
    #[token("=")]
    Equals,
    /// `:=`
    #[token(":=")]
    Walrus,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
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
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semicolon,
}

/// Why the lexer could not produce a token.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexError {
    /// No token starts at this character.
    #[default]
    InvalidCharacter,
    /// An integer literal written with leading zeros, such as `010`.
    LeadingZeros,
}

impl Token {
    /// Returns `true` for tokens that may only start or continue a comparison.
    #[must_use]
    pub const fn is_comparison(&self) -> bool {
        matches!(self,
                 Self::EqualEqual
                 | Self::BangEqual
                 | Self::Less
                 | Self::Greater
                 | Self::LessEqual
                 | Self::GreaterEqual
                 | Self::In
                 | Self::Is)
    }

    /// Returns `true` for tokens that close a bracketed group.
    #[must_use]
    pub const fn is_closing(&self) -> bool {
        matches!(self, Self::RParen | Self::RBracket | Self::RBrace)
    }

    /// Returns `true` for tokens that open a bracketed group.
    #[must_use]
    pub const fn is_opening(&self) -> bool {
        matches!(self, Self::LParen | Self::LBracket | Self::LBrace)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Number(n) => return write!(f, "'{n}'"),
            Self::Str(s) => return write!(f, "'{s}'"),
            Self::Identifier(name) => return write!(f, "'{name}'"),
            Self::AugmentedAssign(op) => return write!(f, "'{op}'"),
            Self::True => "True",
            Self::False => "False",
            Self::NoneLiteral => "None",
            Self::Lambda => "lambda",
            Self::If => "if",
            Self::Else => "else",
            Self::For => "for",
            Self::In => "in",
            Self::Is => "is",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::Comment => "#",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::DoubleStar => "**",
            Self::Slash => "/",
            Self::DoubleSlash => "//",
            Self::Percent => "%",
            Self::At => "@",
            Self::Ampersand => "&",
            Self::Pipe => "|",
            Self::Caret => "^",
            Self::Tilde => "~",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::Equals => "=",
            Self::Walrus => ":=",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Colon => ":",
            Self::Semicolon => ";",
        };
        write!(f, "'{text}'")
    }
}

/// Splits a line into `(Token, column)` pairs.
///
/// Columns are 1-based character offsets of the first character of each
/// token and are carried through the parser for error reporting.
///
/// # Errors
/// Returns a syntax error naming the first character the lexer cannot
/// recognize, or the first integer literal with leading zeros, together with
/// its column.
///
/// # Example
/// ```
/// use calcbox::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("x ** 2").unwrap();
/// assert_eq!(tokens,
///            vec![(Token::Identifier("x".to_string()), 1),
///                 (Token::DoubleStar, 3),
///                 (Token::Number(2.0), 6)]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);
    let mut column = 1;
    let mut counted = 0;

    while let Some(token) = lexer.next() {
        let start = lexer.span().start;
        column += source[counted..start].chars().count();
        counted = start;
        match token {
            Ok(tok) => tokens.push((tok, column)),
            Err(err) => {
                let message = match err {
                    LexError::LeadingZeros => {
                        "leading zeros in decimal integer literals are not permitted".to_string()
                    },
                    LexError::InvalidCharacter => format!("invalid character {:?}", lexer.slice()),
                };
                return Err(ParseError::syntax(message, Some(column)));
            },
        }
    }

    tracing::trace!(?tokens, "tokenized line");
    Ok(tokens)
}

/// Parses a decimal number literal from the current token slice.
///
/// # Returns
/// - `Some(f64)`: The parsed value.
/// - `None`: If the slice is not a valid float, which makes the lexer report
///   an error.
fn parse_number(lex: &logos::Lexer<'_, Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal. Zeros may only lead a literal that is zero
/// throughout, so `00` is accepted and `010` is not.
fn parse_integer(lex: &logos::Lexer<'_, Token>) -> Result<f64, LexError> {
    let slice = lex.slice();
    if slice.len() > 1 && slice.starts_with('0') && slice.bytes().any(|b| b != b'0') {
        return Err(LexError::LeadingZeros);
    }
    slice.parse().map_err(|_| LexError::InvalidCharacter)
}

/// Strips the surrounding quotes from a string literal.
fn parse_string(lex: &logos::Lexer<'_, Token>) -> Option<String> {
    let slice = lex.slice();
    slice.get(1..slice.len() - 1).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn number_forms() {
        assert_eq!(kinds("1 2.5 .5 3. 1e3 2.5E-1"),
                   vec![Token::Number(1.0),
                        Token::Number(2.5),
                        Token::Number(0.5),
                        Token::Number(3.0),
                        Token::Number(1000.0),
                        Token::Number(0.25)]);
    }

    #[test]
    fn longest_operator_wins() {
        assert_eq!(kinds("a ** b // c **= d == e <<= f"),
                   vec![Token::Identifier("a".into()),
                        Token::DoubleStar,
                        Token::Identifier("b".into()),
                        Token::DoubleSlash,
                        Token::Identifier("c".into()),
                        Token::AugmentedAssign("**=".into()),
                        Token::Identifier("d".into()),
                        Token::EqualEqual,
                        Token::Identifier("e".into()),
                        Token::AugmentedAssign("<<=".into()),
                        Token::Identifier("f".into())]);
    }

    #[test]
    fn keywords_are_not_identifiers() {
        assert_eq!(kinds("True None lambda notice"),
                   vec![Token::True,
                        Token::NoneLiteral,
                        Token::Lambda,
                        Token::Identifier("notice".into())]);
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(kinds("ln(e)  # natural logarithm"),
                   vec![Token::Identifier("ln".into()),
                        Token::LParen,
                        Token::Identifier("e".into()),
                        Token::RParen]);
    }

    #[test]
    fn strings_are_unquoted() {
        assert_eq!(kinds("'abc' \"d\""),
                   vec![Token::Str("abc".into()), Token::Str("d".into())]);
    }

    #[test]
    fn columns_count_characters() {
        let tokens = tokenize("x = 'é' + y").unwrap();
        assert_eq!(tokens.iter().map(|(_, c)| *c).collect::<Vec<_>>(), vec![1, 3, 5, 9, 11]);
    }

    #[test]
    fn leading_zeros() {
        assert_eq!(kinds("0 00 0.5 01.5 010e1"),
                   vec![Token::Number(0.0),
                        Token::Number(0.0),
                        Token::Number(0.5),
                        Token::Number(1.5),
                        Token::Number(100.0)]);
        let message = "leading zeros in decimal integer literals are not permitted";
        assert_eq!(tokenize("1 + 010").unwrap_err(),
                   ParseError::syntax(message.to_string(), Some(5)));
    }

    #[test]
    fn invalid_character_reports_column() {
        let err = tokenize("2 $ 3").unwrap_err();
        assert_eq!(err, ParseError::syntax("invalid character \"$\"".to_string(), Some(3)));
    }
}
