//! Whitelist validation of amplitude expressions.
//!
//! One pre-order walk over the parsed tree. Each node is checked in a fixed
//! order and the first violation ends the walk:
//!
//! 1. node kind not whitelisted -> [`ErrorCode::UnsupportedNode`]
//! 2. identifier that is neither a callee nor a known symbol -> [`ErrorCode::FreeVariable`]
//! 3. call to an unknown function -> [`ErrorCode::UnknownFunction`]
//! 4. call with a bad argument count -> [`ErrorCode::WrongArity`]
//!
//! Input the parser rejects is reported as [`ErrorCode::Incomplete`].
//!
//! [`ErrorCode::UnsupportedNode`]: qubit_types::ErrorCode::UnsupportedNode
//! [`ErrorCode::FreeVariable`]: qubit_types::ErrorCode::FreeVariable
//! [`ErrorCode::UnknownFunction`]: qubit_types::ErrorCode::UnknownFunction
//! [`ErrorCode::WrongArity`]: qubit_types::ErrorCode::WrongArity
//! [`ErrorCode::Incomplete`]: qubit_types::ErrorCode::Incomplete

use std::ops::ControlFlow;

use qubit_expr::{Edge, MathParser, Node, Parent, Parser};
use qubit_types::{ValidationError, ValidationResult};

use crate::Whitelist;

/// A parser bound to a whitelist.
#[derive(Debug, Clone, Default)]
pub struct Validator<P = MathParser> {
    parser: P,
    whitelist: Whitelist,
}

impl Validator<MathParser> {
    #[must_use]
    pub fn new(whitelist: Whitelist) -> Self {
        Self {
            parser: MathParser,
            whitelist,
        }
    }
}

impl<P: Parser> Validator<P> {
    #[must_use]
    pub fn with_parser(parser: P, whitelist: Whitelist) -> Self {
        Self { parser, whitelist }
    }

    #[must_use]
    pub fn whitelist(&self) -> &Whitelist {
        &self.whitelist
    }

    /// Validate one input. Blank input is accepted.
    #[must_use]
    pub fn validate(&self, input: &str) -> ValidationResult {
        run(&self.parser, input, &self.whitelist)
    }
}

/// Validate `input` with the built-in grammar.
#[must_use]
pub fn validate(input: &str, whitelist: &Whitelist) -> ValidationResult {
    run(&MathParser, input, whitelist)
}

fn run<P: Parser + ?Sized>(parser: &P, input: &str, whitelist: &Whitelist) -> ValidationResult {
    if input.trim().is_empty() {
        return None;
    }

    let tree = match parser.parse(input) {
        Ok(tree) => tree,
        Err(err) => {
            tracing::debug!(error = %err, offset = ?err.offset(), "expression did not parse");
            return Some(ValidationError::incomplete(err.to_string()));
        }
    };

    let result = check(&tree, whitelist);
    if let Some(err) = &result {
        tracing::debug!(code = %err.code(), token = err.token(), "expression rejected");
    }
    result
}

/// Check an already parsed tree.
#[must_use]
pub fn check(tree: &Node, whitelist: &Whitelist) -> ValidationResult {
    match tree.walk(&mut |node, parent| visit(node, parent, whitelist)) {
        ControlFlow::Break(err) => Some(err),
        ControlFlow::Continue(()) => None,
    }
}

fn visit(
    node: &Node,
    parent: Option<Parent<'_>>,
    whitelist: &Whitelist,
) -> ControlFlow<ValidationError> {
    if !whitelist.allows_kind(node.kind()) {
        return ControlFlow::Break(ValidationError::unsupported_node(node.to_string()));
    }

    match node {
        Node::Identifier(name) => {
            let is_callee = matches!(
                parent,
                Some(Parent {
                    edge: Edge::Callee,
                    ..
                })
            );
            if is_callee || whitelist.allows_symbol(name) {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(ValidationError::free_variable(node.to_string()))
            }
        }
        Node::Call { args, .. } => {
            let name = node.callee_name().unwrap_or_default();
            if !whitelist.allows_function(&name) {
                return ControlFlow::Break(ValidationError::unknown_function(name));
            }
            if !whitelist.arity(&name).contains(&args.len()) {
                return ControlFlow::Break(ValidationError::wrong_arity(name));
            }
            ControlFlow::Continue(())
        }
        _ => ControlFlow::Continue(()),
    }
}
