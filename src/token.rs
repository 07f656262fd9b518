// SPDX-License-Identifier: Unlicense
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    Whitespace,
    Plus,
    Minus,
    Star,
    Slash,
    OpenParen,
    CloseParen,
    Bad,
    EndOfFile,
}

impl TokenKind {
    // 0 when the kind is not an operator in that position.
    pub fn unary_precedence(self) -> u8 {
        match self {
            TokenKind::Plus | TokenKind::Minus => 3,
            _ => 0,
        }
    }

    pub fn binary_precedence(self) -> u8 {
        match self {
            TokenKind::Star | TokenKind::Slash => 2,
            TokenKind::Plus | TokenKind::Minus => 1,
            _ => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Number => "NumberToken",
            TokenKind::Whitespace => "WhitespaceToken",
            TokenKind::Plus => "PlusToken",
            TokenKind::Minus => "MinusToken",
            TokenKind::Star => "StarToken",
            TokenKind::Slash => "SlashToken",
            TokenKind::OpenParen => "OpenParenthesisToken",
            TokenKind::CloseParen => "CloseParenthesisToken",
            TokenKind::Bad => "BadToken",
            TokenKind::EndOfFile => "EndOfFileToken",
        }
    }

    pub const ALL: [TokenKind; 10] = [
        TokenKind::Number,
        TokenKind::Whitespace,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::OpenParen,
        TokenKind::CloseParen,
        TokenKind::Bad,
        TokenKind::EndOfFile,
    ];
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first character in the source text.
    pub start: usize,
    pub text: String,
    /// Only set for number tokens.
    pub value: Option<i32>,
}

impl Token {
    pub fn new(kind: TokenKind, start: usize, text: impl Into<String>, value: Option<i32>) -> Self {
        Self {
            kind,
            start,
            text: text.into(),
            value,
        }
    }

    pub fn missing(kind: TokenKind, start: usize) -> Self {
        Self::new(kind, start, "", None)
    }

    /// Compares everything except the source position.
    pub fn same_shape(&self, other: &Token) -> bool {
        self.kind == other.kind && self.text == other.text && self.value == other.value
    }
}
