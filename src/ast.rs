// SPDX-License-Identifier: Unlicense
use crate::diagnostics::Diagnostics;
use crate::pretty::outline_entries;
use crate::token::{Token, TokenKind};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Literal(Token),
    Unary {
        operator: Token,
        operand: Id,
    },
    Binary {
        left: Id,
        operator: Token,
        right: Id,
    },
    Paren {
        open: Token,
        expr: Id,
        close: Token,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
}

pub type Id = id_arena::Id<Node>;
pub type Arena = id_arena::Arena<Node>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Token(TokenKind),
    LiteralExpression,
    UnaryExpression,
    BinaryExpression,
    ParenthesizedExpression,
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxKind::Token(kind) => write!(f, "{kind}"),
            SyntaxKind::LiteralExpression => f.write_str("LiteralExpression"),
            SyntaxKind::UnaryExpression => f.write_str("UnaryExpression"),
            SyntaxKind::BinaryExpression => f.write_str("BinaryExpression"),
            SyntaxKind::ParenthesizedExpression => f.write_str("ParenthesizedExpression"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown syntax kind `{}`", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for SyntaxKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LiteralExpression" => Ok(SyntaxKind::LiteralExpression),
            "UnaryExpression" => Ok(SyntaxKind::UnaryExpression),
            "BinaryExpression" => Ok(SyntaxKind::BinaryExpression),
            "ParenthesizedExpression" => Ok(SyntaxKind::ParenthesizedExpression),
            _ => TokenKind::ALL
                .iter()
                .find(|kind| kind.name() == s)
                .map(|kind| SyntaxKind::Token(*kind))
                .ok_or_else(|| UnknownKind(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum SyntaxNode<'a> {
    Expr(&'a SyntaxTree, Id),
    Token(&'a Token),
}

impl<'a> SyntaxNode<'a> {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            SyntaxNode::Token(token) => SyntaxKind::Token(token.kind),
            SyntaxNode::Expr(tree, id) => match tree.node(*id).kind {
                NodeKind::Literal(_) => SyntaxKind::LiteralExpression,
                NodeKind::Unary { .. } => SyntaxKind::UnaryExpression,
                NodeKind::Binary { .. } => SyntaxKind::BinaryExpression,
                NodeKind::Paren { .. } => SyntaxKind::ParenthesizedExpression,
            },
        }
    }

    pub fn children(&self) -> Vec<SyntaxNode<'a>> {
        match *self {
            SyntaxNode::Token(_) => vec![],
            SyntaxNode::Expr(tree, id) => tree.children(id),
        }
    }

    pub fn as_token(&self) -> Option<&'a Token> {
        match *self {
            SyntaxNode::Token(token) => Some(token),
            SyntaxNode::Expr(..) => None,
        }
    }
}

#[derive(Debug)]
pub struct SyntaxTree {
    arena: Arena,
    root: Id,
    end_of_file: Token,
    diagnostics: Diagnostics,
}

impl SyntaxTree {
    pub(crate) fn new(arena: Arena, root: Id, end_of_file: Token, diagnostics: Diagnostics) -> Self {
        Self {
            arena,
            root,
            end_of_file,
            diagnostics,
        }
    }

    pub fn root(&self) -> Id {
        self.root
    }

    pub fn root_node(&self) -> SyntaxNode<'_> {
        SyntaxNode::Expr(self, self.root)
    }

    pub fn end_of_file(&self) -> &Token {
        &self.end_of_file
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn node(&self, id: Id) -> &Node {
        &self.arena[id]
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    pub fn children(&self, id: Id) -> Vec<SyntaxNode<'_>> {
        match &self.node(id).kind {
            NodeKind::Literal(token) => vec![SyntaxNode::Token(token)],
            NodeKind::Unary { operator, operand } => {
                vec![SyntaxNode::Token(operator), SyntaxNode::Expr(self, *operand)]
            }
            NodeKind::Binary {
                left,
                operator,
                right,
            } => vec![
                SyntaxNode::Expr(self, *left),
                SyntaxNode::Token(operator),
                SyntaxNode::Expr(self, *right),
            ],
            NodeKind::Paren { open, expr, close } => vec![
                SyntaxNode::Token(open),
                SyntaxNode::Expr(self, *expr),
                SyntaxNode::Token(close),
            ],
        }
    }

    /// Leaf tokens of the root expression in source order, then end-of-file.
    pub fn tokens(&self) -> Vec<&Token> {
        fn collect<'a>(node: SyntaxNode<'a>, out: &mut Vec<&'a Token>) {
            match node {
                SyntaxNode::Token(token) => out.push(token),
                SyntaxNode::Expr(..) => {
                    for child in node.children() {
                        collect(child, out);
                    }
                }
            }
        }

        let mut out = vec![];
        collect(self.root_node(), &mut out);
        out.push(&self.end_of_file);
        out
    }

    /// Structural equality: same outline, same token text and values.
    /// Source offsets are ignored.
    pub fn same_shape(&self, other: &SyntaxTree) -> bool {
        let (xs, ys) = (self.tokens(), other.tokens());
        xs.len() == ys.len()
            && xs.iter().zip(&ys).all(|(x, y)| x.same_shape(y))
            && outline_entries(self.root_node()) == outline_entries(other.root_node())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(start: usize, value: i32) -> Token {
        Token::new(TokenKind::Number, start, value.to_string(), Some(value))
    }

    #[test]
    fn children_follow_source_order() {
        let mut arena = Arena::new();
        let one = arena.alloc(Node {
            kind: NodeKind::Literal(number(0, 1)),
        });
        let two = arena.alloc(Node {
            kind: NodeKind::Literal(number(2, 2)),
        });
        let sum = arena.alloc(Node {
            kind: NodeKind::Binary {
                left: one,
                operator: Token::new(TokenKind::Plus, 1, "+", None),
                right: two,
            },
        });
        let eof = Token::new(TokenKind::EndOfFile, 3, "\0", None);
        let tree = SyntaxTree::new(arena, sum, eof, Diagnostics::new());

        let kinds: Vec<_> = tree.root_node().children().iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::LiteralExpression,
                SyntaxKind::Token(TokenKind::Plus),
                SyntaxKind::LiteralExpression
            ]
        );
        let texts: Vec<_> = tree.tokens().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["1", "+", "2", "\0"]);
        assert_eq!(tree.len(), 3);
    }

    fn difference(arena: &mut Arena, left: Id, start: usize, right: Id) -> Id {
        arena.alloc(Node {
            kind: NodeKind::Binary {
                left,
                operator: Token::new(TokenKind::Minus, start, "-", None),
                right,
            },
        })
    }

    #[test]
    fn same_tokens_grouped_differently_differ_in_shape() {
        let eof = Token::new(TokenKind::EndOfFile, 5, "\0", None);
        fn literals(arena: &mut Arena) -> [Id; 3] {
            [(0, 1), (2, 2), (4, 3)].map(|(start, value)| {
                arena.alloc(Node {
                    kind: NodeKind::Literal(number(start, value)),
                })
            })
        }

        let mut arena = Arena::new();
        let [a, b, c] = literals(&mut arena);
        let inner = difference(&mut arena, a, 1, b);
        let root = difference(&mut arena, inner, 3, c);
        let left = SyntaxTree::new(arena, root, eof.clone(), Diagnostics::new());

        let mut arena = Arena::new();
        let [a, b, c] = literals(&mut arena);
        let inner = difference(&mut arena, b, 3, c);
        let root = difference(&mut arena, a, 1, inner);
        let right = SyntaxTree::new(arena, root, eof, Diagnostics::new());

        let texts = |tree: &SyntaxTree| -> Vec<String> {
            tree.tokens().iter().map(|t| t.text.clone()).collect()
        };
        assert_eq!(texts(&left), texts(&right));
        assert!(left.same_shape(&left));
        assert!(!left.same_shape(&right));
    }

    #[test]
    fn kind_names_parse_back() {
        for kind in TokenKind::ALL {
            let name = SyntaxKind::Token(kind).to_string();
            assert_eq!(name.parse::<SyntaxKind>(), Ok(SyntaxKind::Token(kind)));
        }
        assert_eq!(
            "ParenthesizedExpression".parse::<SyntaxKind>(),
            Ok(SyntaxKind::ParenthesizedExpression)
        );
        assert!("Statement".parse::<SyntaxKind>().is_err());
    }
}
