// SPDX-License-Identifier: Unlicense
use crate::ast::{self, Node, NodeKind, SyntaxTree};
use crate::diagnostics::Diagnostics;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

// Bounds the height of the syntax tree, so every recursive walk over it stays
// within the stack.
pub const MAX_DEPTH: usize = 512;

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    arena: ast::Arena,
    diagnostics: Diagnostics,
    depth: usize,
    abandoned: bool,
}

impl Parser {
    pub fn new(text: &str) -> Self {
        let mut lexer = Lexer::new(text);
        let tokens: Vec<Token> = lexer
            .by_ref()
            .filter(|t| !matches!(t.kind, TokenKind::Whitespace | TokenKind::Bad))
            .collect();
        log::trace!("parser buffered {} tokens", tokens.len());

        Self {
            tokens,
            position: 0,
            arena: ast::Arena::new(),
            diagnostics: lexer.into_diagnostics(),
            depth: 0,
            abandoned: false,
        }
    }

    pub fn parse(mut self) -> SyntaxTree {
        let root = self.parse_expression(0);
        let end_of_file = self.match_token(TokenKind::EndOfFile);
        log::debug!(
            "parsed {} nodes with {} diagnostics",
            self.arena.len(),
            self.diagnostics.len()
        );
        SyntaxTree::new(self.arena, root, end_of_file, self.diagnostics)
    }

    fn peek(&self, offset: usize) -> &Token {
        let index = (self.position + offset).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    fn current(&self) -> &Token {
        self.peek(0)
    }

    fn next_token(&mut self) -> Token {
        let token = self.current().clone();
        self.position += 1;
        token
    }

    fn match_token(&mut self, kind: TokenKind) -> Token {
        if self.current().kind == kind {
            return self.next_token();
        }

        let (actual, start) = (self.current().kind, self.current().start);
        if !self.abandoned {
            self.diagnostics.report_unexpected_token(start, actual, kind);
        }
        Token::missing(kind, start)
    }

    // Reports once, then skips to the end of input so the enclosing frames
    // unwind without further reports.
    fn abandon(&mut self) -> ast::Id {
        let start = self.current().start;
        if !self.abandoned {
            log::debug!("nesting limit of {} reached at offset {}", MAX_DEPTH, start);
            self.diagnostics.report_too_deep(start);
            self.abandoned = true;
        }
        self.position = self.tokens.len() - 1;
        self.new_node(NodeKind::Literal(Token::missing(TokenKind::Number, start)))
    }

    fn new_node(&mut self, kind: NodeKind) -> ast::Id {
        self.arena.alloc(Node { kind })
    }

    // Equal precedence groups to the left: the loop only continues on strictly
    // higher precedence than the caller's floor. Each operator in the loop also
    // counts one level of depth.
    fn parse_expression(&mut self, parent_precedence: u8) -> ast::Id {
        if self.depth >= MAX_DEPTH {
            return self.abandon();
        }
        let outer = self.depth;
        self.depth += 1;

        let unary_precedence = self.current().kind.unary_precedence();
        let mut left = if unary_precedence != 0 && unary_precedence >= parent_precedence {
            let operator = self.next_token();
            let operand = self.parse_expression(unary_precedence);
            self.new_node(NodeKind::Unary { operator, operand })
        } else {
            self.parse_primary()
        };

        loop {
            let precedence = self.current().kind.binary_precedence();
            if precedence == 0 || precedence <= parent_precedence {
                break;
            }
            let operator = self.next_token();
            self.depth += 1;
            let right = self.parse_expression(precedence);
            left = self.new_node(NodeKind::Binary {
                left,
                operator,
                right,
            });
        }

        self.depth = outer;
        left
    }

    fn parse_primary(&mut self) -> ast::Id {
        if self.current().kind == TokenKind::OpenParen {
            let open = self.next_token();
            let expr = self.parse_expression(0);
            let close = self.match_token(TokenKind::CloseParen);
            return self.new_node(NodeKind::Paren { open, expr, close });
        }

        let number = self.match_token(TokenKind::Number);
        self.new_node(NodeKind::Literal(number))
    }
}

pub fn parse(text: &str) -> SyntaxTree {
    Parser::new(text).parse()
}
