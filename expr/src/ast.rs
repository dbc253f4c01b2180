//! Syntax tree for parsed expressions.
//!
//! The tree keeps every grouping the user typed as an explicit [`Node::Group`],
//! so rendering a node back to text never needs to invent parentheses.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse classification of a node, the unit the validator whitelists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Parenthesised sub-expression.
    Group,
    /// Binary, unary, postfix and implicit-multiply operators.
    Operator,
    /// Numbers, strings and booleans.
    Literal,
    /// `name(args...)`
    FunctionCall,
    /// A bare name: constant, variable or callee.
    Identifier,
    /// Everything else the grammar accepts (matrices, assignments, ...).
    Other,
}

impl NodeKind {
    pub const ALL: [NodeKind; 6] = [
        NodeKind::Group,
        NodeKind::Operator,
        NodeKind::Literal,
        NodeKind::FunctionCall,
        NodeKind::Identifier,
        NodeKind::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKind::Group => "group",
            NodeKind::Operator => "operator",
            NodeKind::Literal => "literal",
            NodeKind::FunctionCall => "function_call",
            NodeKind::Identifier => "identifier",
            NodeKind::Other => "other",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    /// Juxtaposition such as `2i` or `2 pi`.
    ImplicitMultiply,
    Divide,
    Modulo,
    Power,
    DotMultiply,
    DotDivide,
    DotPower,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
}

impl BinaryOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::ImplicitMultiply => "",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "mod",
            BinaryOp::Power => "^",
            BinaryOp::DotMultiply => ".*",
            BinaryOp::DotDivide => "./",
            BinaryOp::DotPower => ".^",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEqual => "<=",
            BinaryOp::GreaterEqual => ">=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Negate,
    Plus,
}

impl UnaryOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
            UnaryOp::Plus => "+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostfixOp {
    Factorial,
    Transpose,
}

impl PostfixOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            PostfixOp::Factorial => "!",
            PostfixOp::Transpose => "'",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    /// Numeric text exactly as typed (`1`, `2.50`, `1e-3`).
    Number(String),
    String(String),
    Boolean(bool),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(text) => f.write_str(text),
            Literal::String(s) => write!(f, "{s:?}"),
            Literal::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// One node of a parsed expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Group(Box<Node>),
    Binary {
        op: BinaryOp,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Node>,
    },
    Postfix {
        op: PostfixOp,
        operand: Box<Node>,
    },
    Literal(Literal),
    /// `callee(args...)`. The parser only produces identifier or accessor callees.
    Call {
        callee: Box<Node>,
        args: Vec<Node>,
    },
    Identifier(String),
    /// `[a, b; c, d]`, stored row-major. `[]` has no rows.
    Matrix(Vec<Vec<Node>>),
    /// `{key: value, ...}`
    Object(Vec<(String, Node)>),
    /// `object[index, ...]`
    Accessor {
        object: Box<Node>,
        index: Vec<Node>,
    },
    /// `object.name`
    Member {
        object: Box<Node>,
        name: String,
    },
    Assignment {
        target: Box<Node>,
        value: Box<Node>,
    },
    Conditional {
        condition: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Box<Node>,
    },
    /// `start:end` or `start:step:end`
    Range {
        start: Box<Node>,
        step: Option<Box<Node>>,
        end: Box<Node>,
    },
    /// Statements separated by `;` or newlines.
    Block(Vec<Node>),
}

impl Node {
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Group(_) => NodeKind::Group,
            Node::Binary { .. } | Node::Unary { .. } | Node::Postfix { .. } => NodeKind::Operator,
            Node::Literal(_) => NodeKind::Literal,
            Node::Call { .. } => NodeKind::FunctionCall,
            Node::Identifier(_) => NodeKind::Identifier,
            Node::Matrix(_)
            | Node::Object(_)
            | Node::Accessor { .. }
            | Node::Member { .. }
            | Node::Assignment { .. }
            | Node::Conditional { .. }
            | Node::Range { .. }
            | Node::Block(_) => NodeKind::Other,
        }
    }

    #[must_use]
    pub fn identifier(name: impl Into<String>) -> Self {
        Node::Identifier(name.into())
    }

    #[must_use]
    pub fn number(text: impl Into<String>) -> Self {
        Node::Literal(Literal::Number(text.into()))
    }

    #[must_use]
    pub fn call(name: impl Into<String>, args: Vec<Node>) -> Self {
        Node::Call {
            callee: Box::new(Node::identifier(name)),
            args,
        }
    }

    #[must_use]
    pub fn binary(op: BinaryOp, lhs: Node, rhs: Node) -> Self {
        Node::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Name of an identifier node.
    #[must_use]
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Node::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// The function name of a call: the callee identifier, or the callee's
    /// rendered text when it is not a bare name.
    #[must_use]
    pub fn callee_name(&self) -> Option<Cow<'_, str>> {
        let Node::Call { callee, .. } = self else {
            return None;
        };
        Some(match callee.as_identifier() {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(callee.to_string()),
        })
    }

    /// Argument list of a call.
    #[must_use]
    pub fn call_args(&self) -> Option<&[Node]> {
        match self {
            Node::Call { args, .. } => Some(args),
            _ => None,
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, nodes: &[Node], sep: &str) -> fmt::Result {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{node}")?;
    }
    Ok(())
}

/// Source-text reconstruction.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Group(inner) => write!(f, "({inner})"),
            Node::Binary {
                op: BinaryOp::ImplicitMultiply,
                lhs,
                rhs,
            } => write!(f, "{lhs} {rhs}"),
            Node::Binary { op, lhs, rhs } => write!(f, "{lhs} {} {rhs}", op.symbol()),
            Node::Unary { op, operand } => write!(f, "{}{operand}", op.symbol()),
            Node::Postfix { op, operand } => write!(f, "{operand}{}", op.symbol()),
            Node::Literal(lit) => write!(f, "{lit}"),
            Node::Call { callee, args } => {
                write!(f, "{callee}(")?;
                write_joined(f, args, ", ")?;
                f.write_str(")")
            }
            Node::Identifier(name) => f.write_str(name),
            Node::Matrix(rows) => {
                f.write_str("[")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write_joined(f, row, ", ")?;
                }
                f.write_str("]")
            }
            Node::Object(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                f.write_str("}")
            }
            Node::Accessor { object, index } => {
                write!(f, "{object}[")?;
                write_joined(f, index, ", ")?;
                f.write_str("]")
            }
            Node::Member { object, name } => write!(f, "{object}.{name}"),
            Node::Assignment { target, value } => write!(f, "{target} = {value}"),
            Node::Conditional {
                condition,
                then_branch,
                else_branch,
            } => write!(f, "{condition} ? {then_branch} : {else_branch}"),
            Node::Range { start, step, end } => match step {
                Some(step) => write!(f, "{start}:{step}:{end}"),
                None => write!(f, "{start}:{end}"),
            },
            Node::Block(statements) if statements.is_empty() => f.write_str(";"),
            Node::Block(statements) => write_joined(f, statements, "; "),
        }
    }
}
