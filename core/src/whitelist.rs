//! The set of constructs an accepted expression may contain.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use qubit_expr::NodeKind;

const DEFAULT_FUNCTIONS: &[&str] = &[
    "cos", "sin", "tan", "cot", "sec", "csc", "asin", "acos", "atan", "sqrt", "acot", "asec",
    "acsc", "sinh", "cosh", "tanh", "asinh", "acosh", "atanh", "nthRoot", "exp", "log", "pow",
    "abs", "arg", "conj", "re", "im", "complex",
];

const DEFAULT_MULTI_ARG_FUNCTIONS: &[&str] = &["pow", "log", "complex", "nthRoot"];

const DEFAULT_SYMBOLS: &[&str] = &["pi", "PI", "i", "e", "E", "tau", "phi", "SQRT1_2", "SQRT2"];

const DEFAULT_NODE_KINDS: &[NodeKind] = &[
    NodeKind::Group,
    NodeKind::Operator,
    NodeKind::Literal,
    NodeKind::FunctionCall,
    NodeKind::Identifier,
];

const SINGLE_ARG: RangeInclusive<usize> = 1..=1;
const ONE_OR_TWO_ARGS: RangeInclusive<usize> = 1..=2;

fn names(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

/// Static validation configuration.
///
/// Functions in `multi_arg_functions` accept one or two arguments; every
/// other allowed function takes exactly one. A multi-argument entry that is
/// not also in `functions` has no effect, since the membership check runs
/// first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Whitelist {
    functions: BTreeSet<String>,
    multi_arg_functions: BTreeSet<String>,
    symbols: BTreeSet<String>,
    node_kinds: BTreeSet<NodeKind>,
}

impl Default for Whitelist {
    fn default() -> Self {
        Self {
            functions: names(DEFAULT_FUNCTIONS),
            multi_arg_functions: names(DEFAULT_MULTI_ARG_FUNCTIONS),
            symbols: names(DEFAULT_SYMBOLS),
            node_kinds: DEFAULT_NODE_KINDS.iter().copied().collect(),
        }
    }
}

impl Whitelist {
    /// A whitelist that accepts nothing. Useful as a base for building
    /// restrictive configurations.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            functions: BTreeSet::new(),
            multi_arg_functions: BTreeSet::new(),
            symbols: BTreeSet::new(),
            node_kinds: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_functions<I, S>(mut self, functions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.functions = functions.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_multi_arg_functions<I, S>(mut self, functions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.multi_arg_functions = functions.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_node_kinds<I>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = NodeKind>,
    {
        self.node_kinds = kinds.into_iter().collect();
        self
    }

    /// Add functions on top of the current list.
    pub fn extend_functions<I, S>(&mut self, functions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.functions.extend(functions.into_iter().map(Into::into));
    }

    /// Add symbols on top of the current list.
    pub fn extend_symbols<I, S>(&mut self, symbols: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols.extend(symbols.into_iter().map(Into::into));
    }

    #[must_use]
    pub fn allows_kind(&self, kind: NodeKind) -> bool {
        self.node_kinds.contains(&kind)
    }

    #[must_use]
    pub fn allows_function(&self, name: &str) -> bool {
        self.functions.contains(name)
    }

    #[must_use]
    pub fn allows_symbol(&self, name: &str) -> bool {
        self.symbols.contains(name)
    }

    #[must_use]
    pub fn is_multi_arg(&self, name: &str) -> bool {
        self.multi_arg_functions.contains(name)
    }

    /// Accepted argument counts for `name`.
    #[must_use]
    pub fn arity(&self, name: &str) -> RangeInclusive<usize> {
        if self.is_multi_arg(name) {
            ONE_OR_TWO_ARGS
        } else {
            SINGLE_ARG
        }
    }

    pub fn functions(&self) -> impl Iterator<Item = &str> {
        self.functions.iter().map(String::as_str)
    }

    pub fn multi_arg_functions(&self) -> impl Iterator<Item = &str> {
        self.multi_arg_functions.iter().map(String::as_str)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    pub fn node_kinds(&self) -> impl Iterator<Item = NodeKind> + '_ {
        self.node_kinds.iter().copied()
    }
}
