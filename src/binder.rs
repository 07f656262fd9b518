// SPDX-License-Identifier: Unlicense
use crate::ast::{self, NodeKind, SyntaxTree};
use crate::bound::{self, BinaryOp, BoundTree, Kind, Type, UnaryOp};
use crate::diagnostics::Diagnostics;

pub struct Binder<'a> {
    syntax: &'a SyntaxTree,
    arena: bound::Arena,
    diagnostics: Diagnostics,
}

impl<'a> Binder<'a> {
    fn new(syntax: &'a SyntaxTree) -> Self {
        Self {
            syntax,
            arena: bound::Arena::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    fn new_node(&mut self, kind: Kind, ty: Type) -> bound::Id {
        self.arena.alloc(bound::Node { kind, ty })
    }

    fn ty(&self, id: bound::Id) -> Type {
        self.arena[id].ty
    }

    fn bind_expression(&mut self, id: ast::Id) -> bound::Id {
        let syntax = self.syntax;
        match &syntax.node(id).kind {
            NodeKind::Literal(token) => {
                let value = token.value.unwrap_or(0);
                self.new_node(Kind::Literal(value), Type::Int)
            }
            NodeKind::Paren { expr, .. } => self.bind_expression(*expr),
            NodeKind::Unary { operator, operand } => {
                let operand = self.bind_expression(*operand);
                let operand_ty = self.ty(operand);
                match UnaryOp::resolve(operator.kind, operand_ty) {
                    Some(op) => self.new_node(Kind::Unary(op.kind, operand), op.result),
                    None => {
                        self.diagnostics.report_undefined_unary(
                            operator.start,
                            &operator.text,
                            operand_ty,
                        );
                        operand
                    }
                }
            }
            NodeKind::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.bind_expression(*left);
                let right = self.bind_expression(*right);
                let (left_ty, right_ty) = (self.ty(left), self.ty(right));
                match BinaryOp::resolve(operator.kind, left_ty, right_ty) {
                    Some(op) => self.new_node(Kind::Binary(left, op.kind, right), op.result),
                    None => {
                        self.diagnostics.report_undefined_binary(
                            operator.start,
                            &operator.text,
                            left_ty,
                            right_ty,
                        );
                        left
                    }
                }
            }
        }
    }
}

pub fn bind(syntax: &SyntaxTree) -> BoundTree {
    let mut binder = Binder::new(syntax);
    let root = binder.bind_expression(syntax.root());
    log::debug!(
        "bound {} nodes with {} diagnostics",
        binder.arena.len(),
        binder.diagnostics.len()
    );
    BoundTree::new(binder.arena, root, binder.diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Node;
    use crate::bound::{BinaryOpKind, UnaryOpKind};
    use crate::parser::parse;
    use crate::token::{Token, TokenKind};

    #[test]
    fn binder_should_resolve_operator_kinds() {
        let tree = bind(&parse("-(1 + 2) * +3"));
        assert!(tree.diagnostics().is_empty());
        assert_eq!(tree.ty(), Type::Int);

        let Kind::Binary(left, op, right) = tree.node(tree.root()).kind else {
            panic!("root is not binary");
        };
        assert_eq!(op, BinaryOpKind::Multiplication);
        let Kind::Unary(UnaryOpKind::Negation, inner) = tree.node(left).kind else {
            panic!("left is not a negation");
        };
        // parentheses leave no trace
        assert!(matches!(
            tree.node(inner).kind,
            Kind::Binary(_, BinaryOpKind::Addition, _)
        ));
        assert!(matches!(
            tree.node(right).kind,
            Kind::Unary(UnaryOpKind::Identity, _)
        ));
    }

    #[test]
    fn binder_should_default_missing_literals_to_zero() {
        let syntax = parse("1 +");
        assert_eq!(syntax.diagnostics().len(), 1);
        let tree = bind(&syntax);
        let Kind::Binary(_, _, right) = tree.node(tree.root()).kind else {
            panic!("root is not binary");
        };
        assert_eq!(tree.node(right).kind, Kind::Literal(0));
    }

    fn literal(arena: &mut ast::Arena, start: usize, value: i32) -> ast::Id {
        arena.alloc(Node {
            kind: NodeKind::Literal(Token::new(
                TokenKind::Number,
                start,
                value.to_string(),
                Some(value),
            )),
        })
    }

    fn eof(start: usize) -> Token {
        Token::new(TokenKind::EndOfFile, start, "\0", None)
    }

    #[test]
    fn binder_should_drop_unknown_unary_operator() {
        let mut arena = ast::Arena::new();
        let operand = literal(&mut arena, 1, 5);
        let root = arena.alloc(Node {
            kind: NodeKind::Unary {
                operator: Token::new(TokenKind::Star, 0, "*", None),
                operand,
            },
        });
        let syntax = SyntaxTree::new(arena, root, eof(2), Diagnostics::new());

        let tree = bind(&syntax);
        assert_eq!(
            tree.diagnostics().messages(),
            vec!["Unary operator * is not defined for type int32"]
        );
        assert_eq!(tree.node(tree.root()).kind, Kind::Literal(5));
    }

    #[test]
    fn binder_should_drop_unknown_binary_operator() {
        let mut arena = ast::Arena::new();
        let left = literal(&mut arena, 0, 4);
        let right = literal(&mut arena, 2, 9);
        let root = arena.alloc(Node {
            kind: NodeKind::Binary {
                left,
                operator: Token::new(TokenKind::OpenParen, 1, "(", None),
                right,
            },
        });
        let syntax = SyntaxTree::new(arena, root, eof(3), Diagnostics::new());

        let tree = bind(&syntax);
        assert_eq!(
            tree.diagnostics().messages(),
            vec!["Binary operator ( is not defined for type int32 and int32"]
        );
        assert_eq!(tree.diagnostics().iter().next().and_then(|d| d.offset), Some(1));
        assert_eq!(tree.node(tree.root()).kind, Kind::Literal(4));
    }
}
