use std::fmt;

use crate::util::num::format_number;

/// Represents a literal value as written in the source line.
///
/// Only [`LiteralValue::Number`] is ever evaluated. The other kinds are
/// recognized by the parser so the evaluator can reject them by value.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A decimal integer or floating-point literal.
    Number(f64),
    /// `True` or `False`.
    Bool(bool),
    /// A quoted string literal.
    Str(String),
    /// `None`.
    None,
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::Str(s) => write!(f, "'{s}'"),
            Self::None => write!(f, "None"),
        }
    }
}

/// A keyword argument in a function call, such as `base=2` in `log(8, base=2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyword {
    /// The parameter name.
    pub name:  String,
    /// The argument expression.
    pub value: Expr,
}

/// An abstract syntax tree node representing an expression.
///
/// Every variant carries the 1-based column of the token that introduced it.
/// The tree is immutable once built and is owned by the statement it belongs
/// to.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal constant.
    Literal {
        /// The literal value.
        value:  LiteralValue,
        /// Source column.
        column: usize,
    },
    /// A reference to a variable or constant, such as `x` or `pi`.
    Identifier {
        /// Name of the variable.
        name:   String,
        /// Source column.
        column: usize,
    },
    /// A prefix operator applied to one operand.
    UnaryOp {
        /// Operator tag.
        op:     UnaryOperator,
        /// Operand.
        expr:   Box<Self>,
        /// Source column.
        column: usize,
    },
    /// An infix operator applied to two operands.
    BinaryOp {
        /// Left operand.
        left:   Box<Self>,
        /// Operator tag.
        op:     BinaryOperator,
        /// Right operand.
        right:  Box<Self>,
        /// Source column of the operator.
        column: usize,
    },
    /// A call of a named function.
    FunctionCall {
        /// Function name. Always a bare identifier.
        name:      String,
        /// Positional arguments, in order.
        arguments: Vec<Self>,
        /// Keyword arguments, in order of appearance.
        keywords:  Vec<Keyword>,
        /// Source column.
        column:    usize,
    },
    /// A comma-separated group, such as `1, 2` or `()`. Never evaluable.
    Tuple {
        /// The grouped elements.
        elements: Vec<Self>,
        /// Source column.
        column:   usize,
    },
}

impl Expr {
    /// Returns the source column of this node.
    #[must_use]
    pub const fn column(&self) -> usize {
        match self {
            Self::Literal { column, .. }
            | Self::Identifier { column, .. }
            | Self::UnaryOp { column, .. }
            | Self::BinaryOp { column, .. }
            | Self::FunctionCall { column, .. }
            | Self::Tuple { column, .. } => *column,
        }
    }

    /// Returns the number of nodes on the longest path from this node down to
    /// a leaf. A literal or identifier has height 1.
    #[must_use]
    pub fn height(&self) -> usize {
        let children = match self {
            Self::Literal { .. } | Self::Identifier { .. } => return 1,
            Self::UnaryOp { expr, .. } => return 1 + expr.height(),
            Self::BinaryOp { left, right, .. } => return 1 + left.height().max(right.height()),
            Self::FunctionCall { arguments,
                                 keywords,
                                 .. } => {
                arguments.iter()
                         .chain(keywords.iter().map(|k| &k.value))
                         .map(Self::height)
                         .max()
            },
            Self::Tuple { elements, .. } => elements.iter().map(Self::height).max(),
        };
        1 + children.unwrap_or(0)
    }

    /// Returns the conventional syntax-tree name of this node kind.
    ///
    /// These names appear in `InvalidStructure` errors.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Literal { .. } => "Constant",
            Self::Identifier { .. } => "Name",
            Self::UnaryOp { .. } => "UnaryOp",
            Self::BinaryOp { .. } => "BinOp",
            Self::FunctionCall { .. } => "Call",
            Self::Tuple { .. } => "Tuple",
        }
    }
}

/// A parsed line: a bare expression or a simple assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// An expression whose value is the result of the line.
    Expression(Expr),
    /// `name = value`.
    Assignment {
        /// The bound name.
        name:   String,
        /// The right-hand side.
        value:  Expr,
        /// Source column of the target.
        column: usize,
    },
}

/// Binary operator tags recognized by the parser.
///
/// The evaluator permits only the arithmetic subset. The bitwise and matrix
/// tags exist so that their use is reported by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `//`
    FloorDiv,
    /// `%`
    Mod,
    /// `**`
    Pow,
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `<<`
    LShift,
    /// `>>`
    RShift,
    /// `@`
    MatMul,
}

impl BinaryOperator {
    /// Returns the tag name used in error messages, e.g. `Mult` or `BitAnd`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Sub => "Sub",
            Self::Mul => "Mult",
            Self::Div => "Div",
            Self::FloorDiv => "FloorDiv",
            Self::Mod => "Mod",
            Self::Pow => "Pow",
            Self::BitAnd => "BitAnd",
            Self::BitOr => "BitOr",
            Self::BitXor => "BitXor",
            Self::LShift => "LShift",
            Self::RShift => "RShift",
            Self::MatMul => "MatMult",
        }
    }
}

/// Unary operator tags recognized by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// `+x`
    Plus,
    /// `-x`
    Negate,
    /// `not x`
    Not,
    /// `~x`
    Invert,
}

impl UnaryOperator {
    /// Returns the tag name used in error messages, e.g. `USub` or `Invert`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plus => "UAdd",
            Self::Negate => "USub",
            Self::Not => "Not",
            Self::Invert => "Invert",
        }
    }
}

