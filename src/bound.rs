// SPDX-License-Identifier: Unlicense
use crate::diagnostics::Diagnostics;
use crate::token::TokenKind;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => f.write_str("int32"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOpKind {
    Identity,
    Negation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOpKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl fmt::Display for UnaryOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for BinaryOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnaryOp {
    pub token: TokenKind,
    pub kind: UnaryOpKind,
    pub operand: Type,
    pub result: Type,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryOp {
    pub token: TokenKind,
    pub kind: BinaryOpKind,
    pub left: Type,
    pub right: Type,
    pub result: Type,
}

const UNARY_OPS: [UnaryOp; 2] = [
    UnaryOp {
        token: TokenKind::Plus,
        kind: UnaryOpKind::Identity,
        operand: Type::Int,
        result: Type::Int,
    },
    UnaryOp {
        token: TokenKind::Minus,
        kind: UnaryOpKind::Negation,
        operand: Type::Int,
        result: Type::Int,
    },
];

const fn int_op(token: TokenKind, kind: BinaryOpKind) -> BinaryOp {
    BinaryOp {
        token,
        kind,
        left: Type::Int,
        right: Type::Int,
        result: Type::Int,
    }
}

const BINARY_OPS: [BinaryOp; 4] = [
    int_op(TokenKind::Plus, BinaryOpKind::Addition),
    int_op(TokenKind::Minus, BinaryOpKind::Subtraction),
    int_op(TokenKind::Star, BinaryOpKind::Multiplication),
    int_op(TokenKind::Slash, BinaryOpKind::Division),
];

impl UnaryOp {
    pub fn resolve(token: TokenKind, operand: Type) -> Option<UnaryOp> {
        UNARY_OPS
            .iter()
            .find(|op| op.token == token && op.operand == operand)
            .copied()
    }
}

impl BinaryOp {
    pub fn resolve(token: TokenKind, left: Type, right: Type) -> Option<BinaryOp> {
        BINARY_OPS
            .iter()
            .find(|op| op.token == token && op.left == left && op.right == right)
            .copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    Literal(i32),
    Unary(UnaryOpKind, Id),
    Binary(Id, BinaryOpKind, Id),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: Kind,
    pub ty: Type,
}

pub type Id = id_arena::Id<Node>;
pub type Arena = id_arena::Arena<Node>;

/// Typed tree produced by the binder. Parentheses have no representation.
#[derive(Debug)]
pub struct BoundTree {
    arena: Arena,
    root: Id,
    diagnostics: Diagnostics,
}

impl BoundTree {
    pub(crate) fn new(arena: Arena, root: Id, diagnostics: Diagnostics) -> Self {
        Self {
            arena,
            root,
            diagnostics,
        }
    }

    pub fn root(&self) -> Id {
        self.root
    }

    pub fn node(&self, id: Id) -> &Node {
        &self.arena[id]
    }

    pub fn ty(&self) -> Type {
        self.node(self.root).ty
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    pub fn root_node(&self) -> BoundNode<'_> {
        BoundNode {
            tree: self,
            id: self.root,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BoundNode<'a> {
    pub tree: &'a BoundTree,
    pub id: Id,
}

impl<'a> BoundNode<'a> {
    pub fn label(&self) -> String {
        let node = self.tree.node(self.id);
        match node.kind {
            Kind::Literal(value) => format!("LiteralExpression {value} : {}", node.ty),
            Kind::Unary(op, _) => format!("UnaryExpression {op} : {}", node.ty),
            Kind::Binary(_, op, _) => format!("BinaryExpression {op} : {}", node.ty),
        }
    }

    pub fn children(&self) -> Vec<BoundNode<'a>> {
        let tree = self.tree;
        let ids = match tree.node(self.id).kind {
            Kind::Literal(_) => vec![],
            Kind::Unary(_, operand) => vec![operand],
            Kind::Binary(left, _, right) => vec![left, right],
        };
        ids.into_iter().map(|id| BoundNode { tree, id }).collect()
    }
}
