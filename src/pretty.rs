// SPDX-License-Identifier: Unlicense
//! Tree outlines with box-drawing connectors:
//!
//! ```text
//! └──BinaryExpression
//!     ├──LiteralExpression
//!     │   └──NumberToken 1
//!     ├──PlusToken
//!     └──LiteralExpression
//!         └──NumberToken 2
//! ```
use crate::ast::{SyntaxKind, SyntaxNode};
use crate::bound::BoundNode;
use anyhow::{anyhow, Result};
use std::fmt::{self, Write};

pub trait Outline: Sized {
    fn label(&self) -> String;
    fn children(&self) -> Vec<Self>;
}

impl<'a> Outline for SyntaxNode<'a> {
    fn label(&self) -> String {
        match self.as_token().and_then(|t| t.value) {
            Some(value) => format!("{} {}", self.kind(), value),
            None => self.kind().to_string(),
        }
    }

    fn children(&self) -> Vec<Self> {
        SyntaxNode::children(self)
    }
}

impl<'a> Outline for BoundNode<'a> {
    fn label(&self) -> String {
        BoundNode::label(self)
    }

    fn children(&self) -> Vec<Self> {
        BoundNode::children(self)
    }
}

pub fn prettify<N: Outline>(node: &N) -> String {
    let mut out = String::new();
    write_node(&mut out, node, "", true).expect("String as fmt::Write is infallible");
    out
}

fn write_node<N: Outline>(out: &mut String, node: &N, indent: &str, is_last: bool) -> fmt::Result {
    let marker = if is_last { "└──" } else { "├──" };
    writeln!(out, "{indent}{marker}{}", node.label())?;

    let indent = format!("{indent}{}", if is_last { "    " } else { "│   " });
    let children = node.children();
    let count = children.len();
    for (i, child) in children.iter().enumerate() {
        write_node(out, child, &indent, i + 1 == count)?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub depth: usize,
    pub kind: SyntaxKind,
    pub value: Option<i32>,
}

peg::parser! {
    grammar outline_parser() for str {
        rule guide() -> () = ("│   " / "    ") { }

        rule marker() = "├──" / "└──"

        rule kind() -> SyntaxKind = k:$(['A'..='Z' | 'a'..='z']+) {?
            k.parse().or(Err("syntax kind"))
        }

        rule value() -> i32 = " " n:$("-"? ['0'..='9']+) {?
            n.parse().or(Err("int32"))
        }

        rule entry() -> OutlineEntry = g:guide()* marker() kind:kind() value:value()? {
            OutlineEntry { depth: g.len(), kind, value }
        }

        pub rule outline() -> Vec<OutlineEntry> = e:entry() ** "\n" "\n"? { e }
    }
}

/// Parses the output of [`prettify`] for a syntax tree back into a
/// pre-order list of entries.
pub fn read_outline(text: &str) -> Result<Vec<OutlineEntry>> {
    outline_parser::outline(text).map_err(|e| anyhow!("failed to read outline: {}", e))
}

/// Pre-order entries of a syntax node, as [`read_outline`] would return them.
pub fn outline_entries(node: SyntaxNode<'_>) -> Vec<OutlineEntry> {
    fn walk(node: SyntaxNode<'_>, depth: usize, out: &mut Vec<OutlineEntry>) {
        out.push(OutlineEntry {
            depth,
            kind: node.kind(),
            value: node.as_token().and_then(|t| t.value),
        });
        for child in node.children() {
            walk(child, depth + 1, out);
        }
    }

    let mut out = vec![];
    walk(node, 0, &mut out);
    out
}
