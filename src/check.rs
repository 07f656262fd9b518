// SPDX-License-Identifier: Unlicense
//! Expectation cases: `<expression> => <expected value>`, one per line.
use std::{fmt, path::Path};

use crate::{
    diagnostics::Diagnostics,
    driver::{self, Outcome},
};
use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub line: usize,
    pub source: String,
    pub expected: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Mismatch { expected: i32, actual: i32 },
    Rejected(Diagnostics),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "ok"),
            Verdict::Mismatch { expected, actual } => {
                write!(f, "FAILED: expected {expected}, got {actual}")
            }
            Verdict::Rejected(diagnostics) => {
                write!(f, "FAILED:")?;
                for diagnostic in diagnostics {
                    write!(f, "\n    {diagnostic}")?;
                }
                Ok(())
            }
        }
    }
}

impl Case {
    pub fn new(source: impl Into<String>, expected: i32) -> Self {
        Self {
            line: 0,
            source: source.into(),
            expected,
        }
    }

    pub fn run(&self) -> Verdict {
        match driver::evaluate_str(&self.source) {
            Outcome::Value(actual) if actual == self.expected => Verdict::Pass,
            Outcome::Value(actual) => Verdict::Mismatch {
                expected: self.expected,
                actual,
            },
            Outcome::Failed(diagnostics) => Verdict::Rejected(diagnostics),
        }
    }
}

/// Reads cases from text. Blank lines and lines starting with `#` are skipped.
pub fn parse_cases(text: &str) -> Result<Vec<Case>> {
    let mut cases = vec![];
    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((source, expected)) = trimmed.rsplit_once("=>") else {
            bail!("line {line}: expected `<expression> => <value>`");
        };
        let expected = expected
            .trim()
            .parse::<i32>()
            .with_context(|| format!("line {line}: invalid expected value `{}`", expected.trim()))?;
        cases.push(Case {
            line,
            source: source.trim().to_owned(),
            expected,
        });
    }
    Ok(cases)
}

pub fn load_cases(path: &Path) -> Result<Vec<Case>> {
    let src = driver::read_file(path)?;
    parse_cases(&src).with_context(|| format!("in {}", path.display()))
}

#[derive(Debug, Default)]
pub struct Report {
    pub results: Vec<(Case, Verdict)>,
}

impl Report {
    pub fn run(cases: Vec<Case>) -> Self {
        let results = cases
            .into_iter()
            .map(|case| {
                let verdict = case.run();
                log::trace!("case `{}`: {}", case.source, verdict);
                (case, verdict)
            })
            .collect();
        Self { results }
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|(_, v)| v.is_pass()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (case, verdict) in &self.results {
            writeln!(f, "line {}: {} ... {}", case.line, case.source, verdict)?;
        }
        write!(f, "{} passed, {} failed", self.passed(), self.failed())
    }
}
