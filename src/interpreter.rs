/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the tree of one line, resolves names against its
/// environment, dispatches operators and calls through the allow-lists, and
/// reports the first failure it meets.
///
/// # Responsibilities
/// - Evaluates expressions and simple assignments.
/// - Owns the variable environment seeded with the built-in constants.
/// - Rejects operators, functions and node kinds outside the allow-lists.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw line and produces a stream of tokens,
/// each paired with its 1-based column. Tokens for constructs the calculator
/// refuses (strings, comparisons, keywords) are still produced, so that the
/// parser can reject them by name.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source columns.
/// - Handles numeric and string literals, identifiers, and operators.
/// - Reports lexical errors for invalid characters.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// either one expression or one simple assignment.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes.
/// - Validates grammar, reporting errors with column info.
/// - Classifies statement shapes and rejects everything but `NAME = expr`.
pub mod parser;
