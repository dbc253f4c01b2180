//! Expression parsing for amplitude input.
//!
//! Turns user-typed text such as `cos(pi/4) + 2i` into a [`Node`] tree. The
//! grammar is deliberately broader than what the validator accepts (matrices,
//! assignments, ranges, ...) so that unsupported input is reported as an
//! unsupported construct rather than as a syntax error.
//!
//! ```text
//! &str -> token::tokenize -> Vec<Token> -> parser::parse_tokens -> Node
//! ```

mod ast;
mod error;
mod parser;
mod token;
mod walk;

pub use ast::{BinaryOp, Literal, Node, NodeKind, PostfixOp, UnaryOp};
pub use error::ParseError;
pub use walk::{Edge, Parent};

/// Anything that can turn input text into a syntax tree.
///
/// The validator is generic over this so tests and embedders can substitute
/// their own front end.
pub trait Parser {
    fn parse(&self, input: &str) -> Result<Node, ParseError>;
}

impl<F> Parser for F
where
    F: Fn(&str) -> Result<Node, ParseError>,
{
    fn parse(&self, input: &str) -> Result<Node, ParseError> {
        self(input)
    }
}

/// The built-in math grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct MathParser;

impl Parser for MathParser {
    fn parse(&self, input: &str) -> Result<Node, ParseError> {
        parse(input)
    }
}

/// Parse `input` with the built-in grammar.
pub fn parse(input: &str) -> Result<Node, ParseError> {
    let tokens = token::tokenize(input)?;
    tracing::trace!(tokens = tokens.len(), "tokenized expression");
    parser::parse_tokens(tokens)
}

#[cfg(test)]
mod tests {
    use super::{MathParser, Node, ParseError, Parser};

    #[test]
    fn closures_are_parsers() {
        let fixed = |_: &str| -> Result<Node, ParseError> { Ok(Node::identifier("x")) };
        assert_eq!(fixed.parse("anything"), Ok(Node::identifier("x")));
    }

    #[test]
    fn math_parser_delegates_to_parse() {
        assert_eq!(MathParser.parse("2i"), super::parse("2i"));
    }
}
