// SPDX-License-Identifier: Unlicense
use crate::diagnostics::Diagnostics;
use crate::token::{Token, TokenKind};

pub const EOF_TEXT: &str = "\0";

pub struct Lexer<'a> {
    text: &'a str,
    position: usize,
    diagnostics: Diagnostics,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            position: 0,
            diagnostics: Diagnostics::new(),
            finished: false,
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    fn current(&self) -> Option<char> {
        self.text[self.position..].chars().next()
    }

    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(c) = self.current() {
            if !predicate(c) {
                break;
            }
            self.position += c.len_utf8();
        }
    }

    /// Returns the next token. Past the end of the text every call yields
    /// an end-of-file token at the text length.
    pub fn next_token(&mut self) -> Token {
        let start = self.position;
        let Some(c) = self.current() else {
            return Token::new(TokenKind::EndOfFile, self.text.len(), EOF_TEXT, None);
        };

        let token = match c {
            '0'..='9' => {
                self.advance_while(|c| c.is_ascii_digit());
                let text = &self.text[start..self.position];
                let value = match text.parse::<i32>() {
                    Ok(value) => value,
                    Err(_) => {
                        self.diagnostics.report_invalid_number(start, text);
                        0
                    }
                };
                Token::new(TokenKind::Number, start, text, Some(value))
            }
            c if c.is_whitespace() => {
                self.advance_while(char::is_whitespace);
                Token::new(TokenKind::Whitespace, start, &self.text[start..self.position], None)
            }
            _ => {
                let kind = match c {
                    '+' => TokenKind::Plus,
                    '-' => TokenKind::Minus,
                    '*' => TokenKind::Star,
                    '/' => TokenKind::Slash,
                    '(' => TokenKind::OpenParen,
                    ')' => TokenKind::CloseParen,
                    _ => {
                        self.diagnostics.report_bad_character(start, c);
                        TokenKind::Bad
                    }
                };
                self.position += c.len_utf8();
                Token::new(kind, start, &self.text[start..self.position], None)
            }
        };

        log::trace!("token {} {:?} at {}", token.kind, token.text, token.start);
        token
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::EndOfFile {
            self.finished = true;
        }
        Some(token)
    }
}
