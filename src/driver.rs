// SPDX-License-Identifier: Unlicense
use std::{fmt, io::Read, path::Path};

use crate::{
    ast::SyntaxTree, binder, bound::BoundTree, diagnostics::Diagnostics, eval, parser, pretty,
};
use anyhow::{Context, Result};

pub fn read_file(source: &Path) -> Result<String> {
    let mut buf = String::new();
    let mut f = std::fs::File::open(source)
        .with_context(|| format!("failed to open {}", source.display()))?;
    f.read_to_string(&mut buf)?;
    Ok(buf)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Value(i32),
    Failed(Diagnostics),
}

impl Outcome {
    pub fn value(&self) -> Option<i32> {
        match self {
            Outcome::Value(value) => Some(*value),
            Outcome::Failed(_) => None,
        }
    }

    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Outcome::Value(_) => None,
            Outcome::Failed(diagnostics) => Some(diagnostics),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Value(value) => write!(f, "{value}"),
            Outcome::Failed(diagnostics) => write!(f, "{diagnostics}"),
        }
    }
}

/// Each stage only runs when the previous one reported nothing.
pub struct Compilation {
    syntax: SyntaxTree,
    bound: Option<BoundTree>,
}

impl Compilation {
    pub fn new(text: &str) -> Self {
        let syntax = parser::parse(text);
        let bound = syntax
            .diagnostics()
            .is_empty()
            .then(|| binder::bind(&syntax));
        Self { syntax, bound }
    }

    pub fn syntax(&self) -> &SyntaxTree {
        &self.syntax
    }

    pub fn bound(&self) -> Option<&BoundTree> {
        self.bound.as_ref()
    }

    pub fn evaluate(&self) -> Outcome {
        let bound = match &self.bound {
            None => return Outcome::Failed(self.syntax.diagnostics().clone()),
            Some(bound) if !bound.diagnostics().is_empty() => {
                return Outcome::Failed(bound.diagnostics().clone())
            }
            Some(bound) => bound,
        };

        match eval::evaluate(bound) {
            Ok(value) => Outcome::Value(value),
            Err(err) => {
                log::debug!("evaluation failed: {err}");
                let mut diagnostics = Diagnostics::new();
                diagnostics.report(err.to_string(), None);
                Outcome::Failed(diagnostics)
            }
        }
    }
}

pub fn evaluate_str(text: &str) -> Outcome {
    Compilation::new(text).evaluate()
}

/// Every non-blank line as its own compilation. Line numbers start at one.
pub fn compile_lines(text: &str) -> impl Iterator<Item = (usize, Compilation)> + '_ {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| (i + 1, Compilation::new(line)))
}

pub fn evaluate_lines(text: &str) -> Vec<(usize, Outcome)> {
    compile_lines(text)
        .map(|(line_no, compilation)| (line_no, compilation.evaluate()))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub show_tree: bool,
    pub show_bound: bool,
}

pub fn render(compilation: &Compilation, options: Options) -> String {
    let mut out = String::new();
    if options.show_tree {
        out.push_str(&pretty::prettify(&compilation.syntax().root_node()));
    }
    if options.show_bound {
        if let Some(bound) = compilation.bound() {
            out.push_str(&pretty::prettify(&bound.root_node()));
        }
    }
    out.push_str(&compilation.evaluate().to_string());
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Exit,
}

pub const SESSION_HELP: &str = "\
#tree   toggle the syntax tree display
#bound  toggle the bound tree display
#help   show this text
#exit   leave the session";

#[derive(Debug, Default)]
pub struct Session {
    pub options: Options,
}

impl Session {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn submit(&mut self, line: &str) -> Reply {
        let line = line.trim();
        match line {
            "" => Reply::Output(String::new()),
            "#exit" => Reply::Exit,
            "#help" => Reply::Output(SESSION_HELP.to_owned()),
            "#tree" => {
                self.options.show_tree = !self.options.show_tree;
                Reply::Output(toggled("syntax tree", self.options.show_tree))
            }
            "#bound" => {
                self.options.show_bound = !self.options.show_bound;
                Reply::Output(toggled("bound tree", self.options.show_bound))
            }
            _ => Reply::Output(render(&Compilation::new(line), self.options)),
        }
    }
}

fn toggled(what: &str, on: bool) -> String {
    if on {
        format!("showing {what}")
    } else {
        format!("not showing {what}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs::File, io::Write};

    #[test]
    fn driver_should_evaluate_basic_expression() {
        assert_eq!(evaluate_str("6 * 7"), Outcome::Value(42));
        assert_eq!(evaluate_str("4 + (1 + 2) * 3").to_string(), "13");
    }

    #[test]
    fn driver_should_report_instead_of_value() {
        let outcome = evaluate_str("1 + ");
        assert_eq!(outcome.value(), None);
        assert_eq!(
            outcome.to_string(),
            "Unexpected token EndOfFileToken, expected NumberToken"
        );

        let outcome = evaluate_str("(1 $");
        assert_eq!(
            outcome.to_string(),
            "Bad character input: $\nUnexpected token EndOfFileToken, expected CloseParenthesisToken"
        );
    }

    #[test]
    fn driver_should_turn_division_by_zero_into_diagnostic() {
        let outcome = evaluate_str("1 / 0");
        assert_eq!(
            outcome.diagnostics().map(|d| d.messages()),
            Some(vec!["Division by zero."])
        );
    }

    #[test]
    fn compilation_should_skip_binding_after_parse_errors() {
        let compilation = Compilation::new("1 +");
        assert!(compilation.bound().is_none());
        assert!(Compilation::new("1 + 1").bound().is_some());
    }

    #[test]
    fn lines_are_independent() {
        let outcomes = evaluate_lines("1 + 1\n\n2 * (3\n10 / 3\n");
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0], (1, Outcome::Value(2)));
        assert_eq!(outcomes[1].0, 3);
        assert!(outcomes[1].1.value().is_none());
        assert_eq!(outcomes[2], (4, Outcome::Value(3)));

        let rendered: Vec<_> = compile_lines("1 + 1\n\n-2")
            .map(|(line_no, compilation)| (line_no, render(&compilation, Options::default())))
            .collect();
        assert_eq!(rendered, vec![(1, "2".to_owned()), (3, "-2".to_owned())]);
    }

    #[test]
    fn read_file_should_feed_lines() -> Result<()> {
        let path = env::temp_dir().join(format!("sapling-driver-{}.txt", std::process::id()));
        let mut f = File::create(&path)?;
        f.write_all(b"2 + 2\n-3\n")?;
        drop(f);

        let outcomes = evaluate_lines(&read_file(&path)?);
        std::fs::remove_file(&path)?;
        assert_eq!(
            outcomes,
            vec![(1, Outcome::Value(4)), (2, Outcome::Value(-3))]
        );
        Ok(())
    }

    #[test]
    fn session_should_toggle_tree_display() {
        let mut session = Session::default();
        assert_eq!(session.submit("1 + 2"), Reply::Output("3".to_owned()));

        assert_eq!(
            session.submit("#tree"),
            Reply::Output("showing syntax tree".to_owned())
        );
        let Reply::Output(shown) = session.submit("7") else {
            panic!("session exited");
        };
        assert_eq!(shown, "└──LiteralExpression\n    └──NumberToken 7\n7");

        session.submit("#tree");
        session.submit("#bound");
        let Reply::Output(shown) = session.submit("-7") else {
            panic!("session exited");
        };
        assert_eq!(
            shown,
            "└──UnaryExpression Negation : int32\n    └──LiteralExpression 7 : int32\n-7"
        );
        assert_eq!(session.submit("#exit"), Reply::Exit);
    }
}
