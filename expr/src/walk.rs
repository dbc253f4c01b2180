//! Pre-order traversal with parent context.
//!
//! Passes that only need to look at nodes one at a time (whitelisting,
//! counting, collecting names) share this walk instead of re-implementing the
//! recursion. Each visit also receives the parent node and the [`Edge`] that
//! leads from the parent to the visited node, which is what lets a pass tell
//! the `sin` in `sin(x)` (the callee) apart from the `x` (an argument).
//!
//! The visitor returns [`ControlFlow`]; returning `Break` stops the walk
//! immediately and the break value is handed back to the caller.

use std::iter;
use std::ops::ControlFlow;

use crate::Node;

/// Label of the link between a node and one of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Inner expression of a group.
    Content,
    /// Operand `i` of an operator (0 = left / only, 1 = right).
    Operand(usize),
    /// The function position of a call.
    Callee,
    /// Argument `i` of a call.
    Argument(usize),
    /// Matrix element.
    Item { row: usize, column: usize },
    /// Value of object entry `i`.
    Property(usize),
    /// The expression an accessor indexes or a member lookup reads from.
    Object,
    /// Index expression `i` of an accessor.
    Index(usize),
    Target,
    Value,
    Condition,
    ThenBranch,
    ElseBranch,
    Start,
    Step,
    End,
    /// Statement `i` of a block.
    Statement(usize),
}

/// The parent of a visited node and how it links to it.
#[derive(Debug, Clone, Copy)]
pub struct Parent<'a> {
    pub node: &'a Node,
    pub edge: Edge,
}

impl Node {
    /// Direct children in traversal order, each with its edge label.
    ///
    /// Calls yield the callee before the arguments.
    #[must_use]
    pub fn children(&self) -> Vec<(Edge, &Node)> {
        match self {
            Node::Group(inner) => vec![(Edge::Content, inner.as_ref())],
            Node::Binary { lhs, rhs, .. } => {
                vec![(Edge::Operand(0), lhs.as_ref()), (Edge::Operand(1), rhs.as_ref())]
            }
            Node::Unary { operand, .. } | Node::Postfix { operand, .. } => {
                vec![(Edge::Operand(0), operand.as_ref())]
            }
            Node::Call { callee, args } => iter::once((Edge::Callee, callee.as_ref()))
                .chain(args.iter().enumerate().map(|(i, a)| (Edge::Argument(i), a)))
                .collect(),
            Node::Matrix(rows) => rows
                .iter()
                .enumerate()
                .flat_map(|(row, items)| {
                    items
                        .iter()
                        .enumerate()
                        .map(move |(column, item)| (Edge::Item { row, column }, item))
                })
                .collect(),
            Node::Object(entries) => entries
                .iter()
                .enumerate()
                .map(|(i, (_, value))| (Edge::Property(i), value))
                .collect(),
            Node::Accessor { object, index } => iter::once((Edge::Object, object.as_ref()))
                .chain(index.iter().enumerate().map(|(i, n)| (Edge::Index(i), n)))
                .collect(),
            Node::Member { object, .. } => vec![(Edge::Object, object.as_ref())],
            Node::Assignment { target, value } => {
                vec![(Edge::Target, target.as_ref()), (Edge::Value, value.as_ref())]
            }
            Node::Conditional {
                condition,
                then_branch,
                else_branch,
            } => vec![
                (Edge::Condition, condition.as_ref()),
                (Edge::ThenBranch, then_branch.as_ref()),
                (Edge::ElseBranch, else_branch.as_ref()),
            ],
            Node::Range { start, step, end } => {
                let mut out = vec![(Edge::Start, start.as_ref())];
                if let Some(step) = step {
                    out.push((Edge::Step, step.as_ref()));
                }
                out.push((Edge::End, end.as_ref()));
                out
            }
            Node::Block(statements) => statements
                .iter()
                .enumerate()
                .map(|(i, s)| (Edge::Statement(i), s))
                .collect(),
            Node::Literal(_) | Node::Identifier(_) => Vec::new(),
        }
    }

    /// Walk the tree in pre-order, starting with `self` (which has no parent).
    ///
    /// Stops at the first `Break` returned by `visitor` and returns it. The
    /// walk keeps its own stack, so tree height does not grow the call stack.
    pub fn walk<'a, B, V>(&'a self, visitor: &mut V) -> ControlFlow<B>
    where
        V: FnMut(&'a Node, Option<Parent<'a>>) -> ControlFlow<B>,
    {
        let mut pending: Vec<(&'a Node, Option<Parent<'a>>)> = vec![(self, None)];
        while let Some((node, parent)) = pending.pop() {
            visitor(node, parent)?;
            pending.extend(
                node.children()
                    .into_iter()
                    .rev()
                    .map(|(edge, child)| (child, Some(Parent { node, edge }))),
            );
        }
        ControlFlow::Continue(())
    }
}
