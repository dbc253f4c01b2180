//! Recursive-descent parser.
//!
//! Precedence, lowest to highest:
//!
//! ```text
//! block        stmt ((';' | '\n') stmt)*
//! assignment   conditional ('=' assignment)?
//! conditional  range ('?' assignment ':' assignment)?
//! range        comparison (':' comparison (':' comparison)?)?
//! comparison   additive (('==' | '!=' | '<' | '>' | '<=' | '>=') additive)*
//! additive     multiplicative (('+' | '-') multiplicative)*
//! multiplicative implicit (('*' | '/' | '%' | 'mod' | '.*' | './') implicit)*
//! implicit     unary unary*          (juxtaposition: 2i, 2 pi, 2(3))
//! unary        ('-' | '+') unary | power
//! power        postfix (('^' | '.^') unary)?
//! postfix      primary ('!' | '\'')*
//! primary      number | string | name | '(' expr ')' | matrix | object, then calls / indexing / '.' name
//! ```
//!
//! Newlines separate statements at the top level and are ignored inside any
//! bracket pair.
//!
//! Every subtree carries its height, so the loops that build operator chains
//! without recursing still cannot produce a tree taller than [`MAX_HEIGHT`].

use std::mem;

use crate::token::{Token, TokenKind};
use crate::{BinaryOp, Literal, Node, ParseError, PostfixOp, UnaryOp};

/// Deepest recursive nesting (brackets, prefix operators, exponents,
/// assignment values, conditional branches) accepted before giving up.
pub(crate) const MAX_DEPTH: usize = 128;

/// Tallest tree the parser will build. Loops such as `1+1+...` or `1!!!...`
/// add a level per operator without recursing, so height is bounded
/// separately from recursion depth.
pub(crate) const MAX_HEIGHT: usize = 512;

pub(crate) fn parse_tokens(tokens: Vec<Token>) -> Result<Node, ParseError> {
    let mut state = ParseState {
        tokens,
        pos: 0,
        nesting: 0,
        depth: 0,
        ranges: true,
    };
    state.parse_block()
}

fn unexpected(token: &Token) -> ParseError {
    ParseError::UnexpectedToken {
        found: token.kind.to_string(),
        offset: token.offset,
    }
}

/// A subtree together with its height (a leaf has height 1).
struct Parsed {
    node: Node,
    height: usize,
}

impl Parsed {
    fn leaf(node: Node) -> Self {
        Self { node, height: 1 }
    }

    /// Wrap `node` one level above children of height `below`.
    fn branch(node: Node, below: usize) -> Result<Self, ParseError> {
        let height = below + 1;
        if height > MAX_HEIGHT {
            return Err(ParseError::TooDeep { limit: MAX_HEIGHT });
        }
        Ok(Self { node, height })
    }

    fn binary(op: BinaryOp, lhs: Parsed, rhs: Parsed) -> Result<Self, ParseError> {
        let below = lhs.height.max(rhs.height);
        Self::branch(Node::binary(op, lhs.node, rhs.node), below)
    }

    fn boxed(self) -> Box<Node> {
        Box::new(self.node)
    }
}

fn unzip(items: Vec<Parsed>) -> (Vec<Node>, usize) {
    let height = items.iter().map(|item| item.height).max().unwrap_or(0);
    (items.into_iter().map(|item| item.node).collect(), height)
}

struct ParseState {
    tokens: Vec<Token>,
    pos: usize,
    /// Open bracket pairs; newlines are skipped while this is non-zero.
    nesting: usize,
    depth: usize,
    /// Cleared inside the first branch of `?:` so its `:` is not read as a range.
    ranges: bool,
}

impl ParseState {
    fn lookahead(&self) -> Option<(usize, &Token)> {
        let mut i = self.pos;
        while let Some(token) = self.tokens.get(i) {
            if self.nesting > 0 && token.kind == TokenKind::Newline {
                i += 1;
                continue;
            }
            return Some((i, token));
        }
        None
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.lookahead().map(|(_, token)| &token.kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let (i, token) = self.lookahead()?;
        let token = token.clone();
        self.pos = i + 1;
        Some(token)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        match self.advance() {
            Some(token) if token.kind == *kind => Ok(()),
            Some(token) => Err(unexpected(&token)),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    /// Run `f` one recursion level deeper.
    fn descend<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep { limit: MAX_DEPTH });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Run `f` inside a bracket pair: newlines are insignificant and ranges
    /// are allowed again.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.descend(|p| {
            p.nesting += 1;
            let ranges = mem::replace(&mut p.ranges, true);
            let result = f(p);
            p.ranges = ranges;
            p.nesting -= 1;
            result
        })
    }

    fn parse_block(&mut self) -> Result<Node, ParseError> {
        let mut statements = Vec::new();
        let mut separated = false;

        loop {
            match self.peek() {
                None => break,
                Some(TokenKind::Semicolon | TokenKind::Newline) => {
                    self.advance();
                    separated = true;
                }
                Some(_) => {
                    statements.push(self.parse_assignment()?);
                    if !matches!(
                        self.peek(),
                        None | Some(TokenKind::Semicolon | TokenKind::Newline)
                    ) && let Some(token) = self.advance()
                    {
                        return Err(ParseError::TrailingInput {
                            found: token.kind.to_string(),
                            offset: token.offset,
                        });
                    }
                }
            }
        }

        match (separated, statements.len()) {
            (false, 0) => Err(ParseError::UnexpectedEnd),
            (false, 1) => Ok(statements.remove(0).node),
            _ => {
                let (statements, below) = unzip(statements);
                Ok(Parsed::branch(Node::Block(statements), below)?.node)
            }
        }
    }

    fn parse_assignment(&mut self) -> Result<Parsed, ParseError> {
        let target = self.parse_conditional()?;
        if !self.eat(&TokenKind::Eq) {
            return Ok(target);
        }
        if !matches!(
            target.node,
            Node::Identifier(_) | Node::Accessor { .. } | Node::Member { .. } | Node::Call { .. }
        ) {
            return Err(ParseError::InvalidAssignment {
                target: target.node.to_string(),
            });
        }
        let value = self.descend(Self::parse_assignment)?;
        let below = target.height.max(value.height);
        Parsed::branch(
            Node::Assignment {
                target: target.boxed(),
                value: value.boxed(),
            },
            below,
        )
    }

    fn parse_conditional(&mut self) -> Result<Parsed, ParseError> {
        let condition = self.parse_range()?;
        if !self.eat(&TokenKind::Question) {
            return Ok(condition);
        }

        let ranges = mem::replace(&mut self.ranges, false);
        let then_branch = self.descend(Self::parse_assignment);
        self.ranges = ranges;
        let then_branch = then_branch?;

        self.expect(&TokenKind::Colon)?;
        let else_branch = self.descend(Self::parse_assignment)?;

        let below = condition
            .height
            .max(then_branch.height)
            .max(else_branch.height);
        Parsed::branch(
            Node::Conditional {
                condition: condition.boxed(),
                then_branch: then_branch.boxed(),
                else_branch: else_branch.boxed(),
            },
            below,
        )
    }

    fn parse_range(&mut self) -> Result<Parsed, ParseError> {
        let start = self.parse_comparison()?;
        if !self.ranges || !self.eat(&TokenKind::Colon) {
            return Ok(start);
        }

        let second = self.parse_comparison()?;
        let (step, end) = if self.eat(&TokenKind::Colon) {
            (Some(second), self.parse_comparison()?)
        } else {
            (None, second)
        };

        let below = start
            .height
            .max(end.height)
            .max(step.as_ref().map_or(0, |step| step.height));
        Parsed::branch(
            Node::Range {
                start: start.boxed(),
                step: step.map(Parsed::boxed),
                end: end.boxed(),
            },
            below,
        )
    }

    fn parse_comparison(&mut self) -> Result<Parsed, ParseError> {
        let mut node = self.parse_additive()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::EqEq) => BinaryOp::Equal,
                Some(TokenKind::BangEq) => BinaryOp::NotEqual,
                Some(TokenKind::Lt) => BinaryOp::Less,
                Some(TokenKind::Gt) => BinaryOp::Greater,
                Some(TokenKind::LtEq) => BinaryOp::LessEqual,
                Some(TokenKind::GtEq) => BinaryOp::GreaterEqual,
                _ => return Ok(node),
            };
            self.advance();
            let rhs = self.parse_additive()?;
            node = Parsed::binary(op, node, rhs)?;
        }
    }

    fn parse_additive(&mut self) -> Result<Parsed, ParseError> {
        let mut node = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Subtract,
                _ => return Ok(node),
            };
            self.advance();
            let rhs = self.parse_multiplicative()?;
            node = Parsed::binary(op, node, rhs)?;
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Parsed, ParseError> {
        let mut node = self.parse_implicit()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Star) => BinaryOp::Multiply,
                Some(TokenKind::Slash) => BinaryOp::Divide,
                Some(TokenKind::Percent | TokenKind::Mod) => BinaryOp::Modulo,
                Some(TokenKind::DotStar) => BinaryOp::DotMultiply,
                Some(TokenKind::DotSlash) => BinaryOp::DotDivide,
                _ => return Ok(node),
            };
            self.advance();
            let rhs = self.parse_implicit()?;
            node = Parsed::binary(op, node, rhs)?;
        }
    }

    /// Juxtaposed operands multiply: `2i`, `2 pi`, `(1)(2)`, `x 2`.
    ///
    /// A number may not directly follow a literal (`2 3` is an error) or a
    /// non-factorial operator.
    fn parse_implicit(&mut self) -> Result<Parsed, ParseError> {
        let mut node = self.parse_unary()?;
        let mut number_may_follow = accepts_trailing_number(&node.node);

        loop {
            let juxtaposed = match self.peek() {
                Some(TokenKind::Ident(_) | TokenKind::LParen) => true,
                Some(TokenKind::Number(_)) => number_may_follow,
                _ => false,
            };
            if !juxtaposed {
                return Ok(node);
            }

            let rhs = self.parse_unary()?;
            number_may_follow = accepts_trailing_number(&rhs.node);
            node = Parsed::binary(BinaryOp::ImplicitMultiply, node, rhs)?;
        }
    }

    fn parse_unary(&mut self) -> Result<Parsed, ParseError> {
        let op = match self.peek() {
            Some(TokenKind::Minus) => UnaryOp::Negate,
            Some(TokenKind::Plus) => UnaryOp::Plus,
            _ => return self.parse_power(),
        };
        self.advance();
        let operand = self.descend(Self::parse_unary)?;
        let below = operand.height;
        Parsed::branch(
            Node::Unary {
                op,
                operand: operand.boxed(),
            },
            below,
        )
    }

    fn parse_power(&mut self) -> Result<Parsed, ParseError> {
        let base = self.parse_postfix()?;
        let op = match self.peek() {
            Some(TokenKind::Caret) => BinaryOp::Power,
            Some(TokenKind::DotCaret) => BinaryOp::DotPower,
            _ => return Ok(base),
        };
        self.advance();
        let exponent = self.descend(Self::parse_unary)?;
        Parsed::binary(op, base, exponent)
    }

    fn parse_postfix(&mut self) -> Result<Parsed, ParseError> {
        let mut node = self.parse_primary()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Bang) => PostfixOp::Factorial,
                Some(TokenKind::Apostrophe) => PostfixOp::Transpose,
                _ => return Ok(node),
            };
            self.advance();
            let below = node.height;
            node = Parsed::branch(
                Node::Postfix {
                    op,
                    operand: node.boxed(),
                },
                below,
            )?;
        }
    }

    fn parse_primary(&mut self) -> Result<Parsed, ParseError> {
        let token = self.advance().ok_or(ParseError::UnexpectedEnd)?;
        let node = match token.kind {
            TokenKind::Number(text) => return Ok(Parsed::leaf(Node::number(text))),
            TokenKind::Ident(name) => match name.as_str() {
                "true" => return Ok(Parsed::leaf(Node::Literal(Literal::Boolean(true)))),
                "false" => return Ok(Parsed::leaf(Node::Literal(Literal::Boolean(false)))),
                _ => Parsed::leaf(Node::Identifier(name)),
            },
            TokenKind::Str(text) => Parsed::leaf(Node::Literal(Literal::String(text))),
            TokenKind::LParen => {
                let inner = self.nested(|p| {
                    let inner = p.parse_assignment()?;
                    p.expect(&TokenKind::RParen)?;
                    Ok(inner)
                })?;
                let below = inner.height;
                Parsed::branch(Node::Group(inner.boxed()), below)?
            }
            TokenKind::LBracket => self.parse_matrix()?,
            TokenKind::LBrace => self.parse_object()?,
            _ => return Err(unexpected(&token)),
        };
        self.parse_accessors(node)
    }

    /// Calls, indexing and `.name` lookups after a primary. Only names and
    /// accessors can be called; `(1)(2)` is left for implicit multiplication.
    fn parse_accessors(&mut self, mut node: Parsed) -> Result<Parsed, ParseError> {
        loop {
            match self.peek() {
                Some(TokenKind::LParen)
                    if matches!(
                        node.node,
                        Node::Identifier(_) | Node::Accessor { .. } | Node::Member { .. }
                    ) =>
                {
                    self.advance();
                    let (args, below) = unzip(self.nested(|p| p.parse_list(&TokenKind::RParen))?);
                    let below = below.max(node.height);
                    node = Parsed::branch(
                        Node::Call {
                            callee: node.boxed(),
                            args,
                        },
                        below,
                    )?;
                }
                Some(TokenKind::LBracket) => {
                    self.advance();
                    let (index, below) =
                        unzip(self.nested(|p| p.parse_list(&TokenKind::RBracket))?);
                    let below = below.max(node.height);
                    node = Parsed::branch(
                        Node::Accessor {
                            object: node.boxed(),
                            index,
                        },
                        below,
                    )?;
                }
                Some(TokenKind::Dot) => {
                    self.advance();
                    let name = match self.advance() {
                        Some(Token {
                            kind: TokenKind::Ident(name),
                            ..
                        }) => name,
                        Some(token) => return Err(unexpected(&token)),
                        None => return Err(ParseError::UnexpectedEnd),
                    };
                    let below = node.height;
                    node = Parsed::branch(
                        Node::Member {
                            object: node.boxed(),
                            name,
                        },
                        below,
                    )?;
                }
                _ => return Ok(node),
            }
        }
    }

    /// Comma-separated expressions up to and including `close`.
    fn parse_list(&mut self, close: &TokenKind) -> Result<Vec<Parsed>, ParseError> {
        let mut items = Vec::new();
        if self.eat(close) {
            return Ok(items);
        }
        loop {
            items.push(self.parse_assignment()?);
            match self.advance() {
                Some(token) if token.kind == *close => return Ok(items),
                Some(Token {
                    kind: TokenKind::Comma,
                    ..
                }) => {}
                Some(token) => return Err(unexpected(&token)),
                None => return Err(ParseError::UnexpectedEnd),
            }
        }
    }

    /// Matrix body after `[`: `,` separates columns, `;` separates rows.
    fn parse_matrix(&mut self) -> Result<Parsed, ParseError> {
        let rows = self.nested(|p| {
            let mut rows = Vec::new();
            if p.eat(&TokenKind::RBracket) {
                return Ok(rows);
            }
            let mut row = Vec::new();
            loop {
                row.push(p.parse_assignment()?);
                match p.advance() {
                    Some(Token {
                        kind: TokenKind::Comma,
                        ..
                    }) => {}
                    Some(Token {
                        kind: TokenKind::Semicolon,
                        ..
                    }) => rows.push(mem::take(&mut row)),
                    Some(Token {
                        kind: TokenKind::RBracket,
                        ..
                    }) => {
                        rows.push(row);
                        return Ok(rows);
                    }
                    Some(token) => return Err(unexpected(&token)),
                    None => return Err(ParseError::UnexpectedEnd),
                }
            }
        })?;

        let mut below = 0;
        let rows = rows
            .into_iter()
            .map(|row| {
                let (row, height) = unzip(row);
                below = below.max(height);
                row
            })
            .collect();
        Parsed::branch(Node::Matrix(rows), below)
    }

    /// Object body after `{`: `key: value` pairs, keys are names or strings.
    fn parse_object(&mut self) -> Result<Parsed, ParseError> {
        let entries: Vec<(String, Parsed)> = self.nested(|p| {
            let mut entries = Vec::new();
            if p.eat(&TokenKind::RBrace) {
                return Ok(entries);
            }
            loop {
                let key = match p.advance() {
                    Some(Token {
                        kind: TokenKind::Ident(key) | TokenKind::Str(key),
                        ..
                    }) => key,
                    Some(token) => return Err(unexpected(&token)),
                    None => return Err(ParseError::UnexpectedEnd),
                };
                p.expect(&TokenKind::Colon)?;
                entries.push((key, p.parse_assignment()?));
                match p.advance() {
                    Some(Token {
                        kind: TokenKind::Comma,
                        ..
                    }) => {}
                    Some(Token {
                        kind: TokenKind::RBrace,
                        ..
                    }) => return Ok(entries),
                    Some(token) => return Err(unexpected(&token)),
                    None => return Err(ParseError::UnexpectedEnd),
                }
            }
        })?;

        let below = entries.iter().map(|(_, value)| value.height).max().unwrap_or(0);
        let entries = entries
            .into_iter()
            .map(|(key, value)| (key, value.node))
            .collect();
        Parsed::branch(Node::Object(entries), below)
    }
}

fn accepts_trailing_number(node: &Node) -> bool {
    match node {
        Node::Literal(_) | Node::Binary { .. } | Node::Unary { .. } => false,
        Node::Postfix { op, .. } => *op == PostfixOp::Factorial,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::{MAX_DEPTH, MAX_HEIGHT};
    use crate::{BinaryOp, Node, NodeKind, ParseError, UnaryOp, parse};

    fn render(input: &str) -> String {
        parse(input).unwrap().to_string()
    }

    #[test]
    fn implicit_multiplication_of_imaginary_unit() {
        let node = parse("2i").unwrap();
        assert_eq!(
            node,
            Node::binary(
                BinaryOp::ImplicitMultiply,
                Node::number("2"),
                Node::identifier("i")
            )
        );
    }

    #[test]
    fn unary_binds_inside_implicit_multiplication() {
        let node = parse("-2i").unwrap();
        let Node::Binary { op, lhs, .. } = node else {
            panic!("expected binary node");
        };
        assert_eq!(op, BinaryOp::ImplicitMultiply);
        assert!(matches!(
            *lhs,
            Node::Unary {
                op: UnaryOp::Negate,
                ..
            }
        ));
    }

    #[test]
    fn power_is_right_associative_and_binds_tighter_than_negation() {
        assert_eq!(render("2^3^4"), "2 ^ 3 ^ 4");
        let Node::Unary { operand, .. } = parse("-2^2").unwrap() else {
            panic!("expected unary node");
        };
        assert!(matches!(
            *operand,
            Node::Binary {
                op: BinaryOp::Power,
                ..
            }
        ));
    }

    #[test]
    fn multiplication_before_addition() {
        let Node::Binary { op, rhs, .. } = parse("1 + 2 * 3").unwrap() else {
            panic!("expected binary node");
        };
        assert_eq!(op, BinaryOp::Add);
        assert!(matches!(
            *rhs,
            Node::Binary {
                op: BinaryOp::Multiply,
                ..
            }
        ));
    }

    #[test]
    fn calls_keep_all_arguments() {
        let node = parse("sin(1,2,3,4,5,6*1)").unwrap();
        assert_eq!(node.callee_name().as_deref(), Some("sin"));
        assert_eq!(node.call_args().map(<[Node]>::len), Some(6));
        assert_eq!(parse("sin()").unwrap().call_args().map(<[Node]>::len), Some(0));
    }

    #[test]
    fn only_names_are_called() {
        // (1)(2) multiplies; sin(1)(2) multiplies the call result.
        assert!(matches!(
            parse("(1)(2)").unwrap(),
            Node::Binary {
                op: BinaryOp::ImplicitMultiply,
                ..
            }
        ));
        assert!(matches!(
            parse("sin(1)(2)").unwrap(),
            Node::Binary {
                op: BinaryOp::ImplicitMultiply,
                ..
            }
        ));
    }

    #[test]
    fn unary_plus_after_binary_plus() {
        assert_eq!(render("1 ++ 2"), "1 + +2");
    }

    #[test]
    fn adjacent_numbers_are_rejected() {
        assert!(matches!(
            parse("2 3"),
            Err(ParseError::TrailingInput { .. })
        ));
    }

    #[test]
    fn number_may_follow_a_group() {
        assert_eq!(render("(1)2"), "(1) 2");
    }

    #[test]
    fn incomplete_inputs_fail() {
        for input in ["cos(", "1 * ", "4^", " / 2", "1 ** 2", "(1+2", "1+2)", "sin(1,)", "()"] {
            assert!(parse(input).is_err(), "{input:?} should not parse");
        }
    }

    #[test]
    fn unexpected_end_is_reported() {
        assert_eq!(parse("4^"), Err(ParseError::UnexpectedEnd));
        assert_eq!(parse(""), Err(ParseError::UnexpectedEnd));
    }

    #[test]
    fn trailing_bracket_is_reported_with_offset() {
        let err = parse("1+2)").unwrap_err();
        assert_eq!(
            err,
            ParseError::TrailingInput {
                found: "')'".to_string(),
                offset: 3
            }
        );
        assert_eq!(err.offset(), Some(3));
        assert_eq!(parse("1 +").unwrap_err().offset(), None);
    }

    #[test]
    fn matrices_objects_and_accessors() {
        insta::assert_snapshot!(render("[]"), @"[]");
        insta::assert_snapshot!(render("[1, 2; 3, 4]"), @"[1, 2; 3, 4]");
        insta::assert_snapshot!(render("{a: 1}"), @r#"{"a": 1}"#);
        insta::assert_snapshot!(render("x[1]"), @"x[1]");
    }

    #[test]
    fn assignment_conditional_range_and_block() {
        assert_eq!(render("a = 1"), "a = 1");
        assert_eq!(render("a ? 1 : 2"), "a ? 1 : 2");
        assert_eq!(render("1:2:10"), "1:2:10");
        assert_eq!(render("1; 2"), "1; 2");
        assert!(matches!(parse("1;").unwrap(), Node::Block(_)));
    }

    #[test]
    fn invalid_assignment_target() {
        assert_eq!(
            parse("1 = 2"),
            Err(ParseError::InvalidAssignment {
                target: "1".to_string()
            })
        );
    }

    #[test]
    fn newlines_inside_brackets_are_ignored() {
        assert_eq!(render("sin(\n1\n)"), "sin(1)");
        assert!(matches!(parse("1\n2").unwrap(), Node::Block(_)));
    }

    #[test]
    fn booleans_and_strings_are_literals() {
        assert_eq!(parse("true").unwrap().kind(), NodeKind::Literal);
        assert_eq!(parse("\"abc\"").unwrap().kind(), NodeKind::Literal);
    }

    #[test]
    fn member_lookup_and_single_quoted_strings() {
        assert_eq!(render("a.b"), "a.b");
        assert_eq!(parse("a.b").unwrap().kind(), NodeKind::Other);
        assert_eq!(render("x.re(1)"), "x.re(1)");
        assert_eq!(render("'abc'"), "\"abc\"");
        assert_eq!(render("a'"), "a'");
        assert_eq!(parse("a."), Err(ParseError::UnexpectedEnd));
    }

    #[test]
    fn deep_nesting_is_bounded() {
        let too_deep = Err(ParseError::TooDeep { limit: MAX_DEPTH });
        let input = format!("{}1{}", "(".repeat(500), ")".repeat(500));
        assert_eq!(parse(&input), too_deep);
        let chain = format!("{}1", "-".repeat(500));
        assert_eq!(parse(&chain), too_deep);
        let powers = format!("2{}", "^2".repeat(500));
        assert_eq!(parse(&powers), too_deep);
        let calls = format!("{}1{}", "sin(".repeat(500), ")".repeat(500));
        assert_eq!(parse(&calls), too_deep);
    }

    #[test]
    fn moderate_nesting_is_fine() {
        let input = format!("{}1{}", "(".repeat(50), ")".repeat(50));
        assert!(parse(&input).is_ok());
        let calls = format!("{}1{}", "sin(".repeat(100), ")".repeat(100));
        assert!(parse(&calls).is_ok());
    }

    #[test]
    fn long_operator_chains_are_bounded() {
        let too_tall = Err(ParseError::TooDeep { limit: MAX_HEIGHT });
        for input in [
            format!("1{}", "+1".repeat(20_000)),
            format!("1{}", "*2".repeat(20_000)),
            format!("1{}", "==1".repeat(20_000)),
            format!("1{}", "!".repeat(20_000)),
            format!("a{}", "'".repeat(20_000)),
            format!("2{}", " i".repeat(20_000)),
            format!("x{}", "[1]".repeat(20_000)),
            format!("x{}", ".y".repeat(20_000)),
        ] {
            assert_eq!(parse(&input), too_tall, "{}", &input[..12]);
        }
    }

    #[test]
    fn short_operator_chains_parse() {
        for input in [
            format!("1{}", "+1".repeat(200)),
            format!("1{}", "!".repeat(200)),
            format!("2{}", " i".repeat(200)),
            format!("x{}", "[1]".repeat(200)),
        ] {
            assert!(parse(&input).is_ok(), "{}", &input[..12]);
        }
    }

    #[test]
    fn height_counts_across_nesting() {
        // Each group holds a 100-term sum and the groups are chained by `+`.
        let group = format!("(1{})", "+1".repeat(100));
        let input = vec![group; 10].join(" * ");
        assert!(parse(&input).is_ok());

        let nested = format!("{}1{}", "(1+".repeat(100), ")".repeat(100));
        assert!(parse(&nested).is_ok());
        let tall = format!("({}1)", "1+".repeat(MAX_HEIGHT));
        assert_eq!(parse(&tall), Err(ParseError::TooDeep { limit: MAX_HEIGHT }));
    }
}
