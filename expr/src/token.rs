//! Tokenizer for amplitude expressions.
//!
//! Hand-written scanner over the input string. Whitespace other than newlines
//! is dropped; newlines are kept because they separate statements at the top
//! level. `#` starts a comment that runs to the end of the line.
//!
//! A `'` right after an operand is the transpose operator; anywhere else it
//! opens a single-quoted string.

use std::fmt;

use crate::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Number(String),
    Str(String),
    Ident(String),
    /// Keyword `mod`
    Mod,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    DotStar,
    DotSlash,
    DotCaret,
    Bang,
    Apostrophe,
    /// `.` before a member name
    Dot,
    EqEq,
    BangEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Eq,
    Question,
    Colon,
    Comma,
    Semicolon,
    Newline,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Number(n) => return write!(f, "number {n}"),
            TokenKind::Str(s) => return write!(f, "string {s:?}"),
            TokenKind::Ident(name) => return write!(f, "symbol {name}"),
            TokenKind::Mod => "mod",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Caret => "^",
            TokenKind::DotStar => ".*",
            TokenKind::DotSlash => "./",
            TokenKind::DotCaret => ".^",
            TokenKind::Bang => "!",
            TokenKind::Apostrophe => "'",
            TokenKind::Dot => ".",
            TokenKind::EqEq => "==",
            TokenKind::BangEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::Eq => "=",
            TokenKind::Question => "?",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Newline => "newline",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
        };
        write!(f, "'{text}'")
    }
}

impl TokenKind {
    /// Whether this token can end an operand, so that a following `'`
    /// transposes instead of quoting.
    fn ends_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Number(_)
                | TokenKind::Str(_)
                | TokenKind::Ident(_)
                | TokenKind::Bang
                | TokenKind::Apostrophe
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

/// Split `input` into tokens.
pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer {
        input,
        pos: 0,
        after_operand: false,
    };
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        lexer.after_operand = token.kind.ends_operand();
        tokens.push(token);
    }
    Ok(tokens)
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    after_operand: bool,
}

impl Lexer<'_> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                '#' => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.bump();
                    }
                }
                '\n' => break,
                c if c.is_whitespace() => {
                    self.bump();
                }
                _ => break,
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        self.skip_trivia();
        let offset = self.pos;
        let Some(c) = self.peek() else {
            return Ok(None);
        };

        let kind = if c.is_ascii_digit() || (c == '.' && self.peek_nth(1).is_some_and(|n| n.is_ascii_digit())) {
            TokenKind::Number(self.number())
        } else if is_ident_start(c) {
            let name = self.ident();
            if name == "mod" {
                TokenKind::Mod
            } else {
                TokenKind::Ident(name)
            }
        } else if c == '"' || (c == '\'' && !self.after_operand) {
            TokenKind::Str(self.string(c, offset)?)
        } else {
            self.operator(c, offset)?
        };

        Ok(Some(Token { kind, offset }))
    }

    fn number(&mut self) -> String {
        let start = self.pos;
        self.eat_digits();

        // `2.*3` is element-wise multiply, not `2.` times `*3`.
        if self.peek() == Some('.') && !matches!(self.peek_nth(1), Some('*' | '/' | '^')) {
            self.bump();
            self.eat_digits();
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let exponent_follows = match self.peek_nth(1) {
                Some(d) if d.is_ascii_digit() => true,
                Some('+' | '-') => self.peek_nth(2).is_some_and(|d| d.is_ascii_digit()),
                _ => false,
            };
            if exponent_follows {
                self.bump();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.bump();
                }
                self.eat_digits();
            }
        }

        self.input[start..self.pos].to_string()
    }

    fn eat_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
    }

    fn ident(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_continue) {
            self.bump();
        }
        self.input[start..self.pos].to_string()
    }

    fn string(&mut self, quote: char, offset: usize) -> Result<String, ParseError> {
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(ParseError::UnterminatedString { offset }),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.bump() {
                    None => return Err(ParseError::UnterminatedString { offset }),
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(other) => out.push(other),
                },
                Some(c) => out.push(c),
            }
        }
    }

    fn operator(&mut self, c: char, offset: usize) -> Result<TokenKind, ParseError> {
        let two = match (c, self.peek_nth(1)) {
            ('=', Some('=')) => Some(TokenKind::EqEq),
            ('!', Some('=')) => Some(TokenKind::BangEq),
            ('<', Some('=')) => Some(TokenKind::LtEq),
            ('>', Some('=')) => Some(TokenKind::GtEq),
            ('.', Some('*')) => Some(TokenKind::DotStar),
            ('.', Some('/')) => Some(TokenKind::DotSlash),
            ('.', Some('^')) => Some(TokenKind::DotCaret),
            _ => None,
        };
        if let Some(kind) = two {
            self.bump();
            self.bump();
            return Ok(kind);
        }

        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '!' => TokenKind::Bang,
            '\'' => TokenKind::Apostrophe,
            '.' => TokenKind::Dot,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            '=' => TokenKind::Eq,
            '?' => TokenKind::Question,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '\n' => TokenKind::Newline,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ch => return Err(ParseError::UnexpectedChar { ch, offset }),
        };
        self.bump();
        Ok(kind)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
