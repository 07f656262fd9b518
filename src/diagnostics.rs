// SPDX-License-Identifier: Unlicense
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    /// Byte offset of the token that caused the report, when one exists.
    pub offset: Option<usize>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, offset: Option<usize>) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, message: impl Into<String>, offset: Option<usize>) {
        let diagnostic = Diagnostic::new(message, offset);
        log::trace!("diagnostic: {}", diagnostic);
        self.items.push(diagnostic);
    }

    pub fn report_bad_character(&mut self, offset: usize, c: char) {
        self.report(format!("Bad character input: {c}"), Some(offset));
    }

    pub fn report_invalid_number(&mut self, offset: usize, text: &str) {
        self.report(format!("The number {text} is not a valid int32."), Some(offset));
    }

    pub fn report_unexpected_token(
        &mut self,
        offset: usize,
        actual: impl fmt::Display,
        expected: impl fmt::Display,
    ) {
        self.report(
            format!("Unexpected token {actual}, expected {expected}"),
            Some(offset),
        );
    }

    pub fn report_undefined_unary(&mut self, offset: usize, op: &str, ty: impl fmt::Display) {
        self.report(
            format!("Unary operator {op} is not defined for type {ty}"),
            Some(offset),
        );
    }

    pub fn report_undefined_binary(
        &mut self,
        offset: usize,
        op: &str,
        left: impl fmt::Display,
        right: impl fmt::Display,
    ) {
        self.report(
            format!("Binary operator {op} is not defined for type {left} and {right}"),
            Some(offset),
        );
    }

    pub fn report_too_deep(&mut self, offset: usize) {
        self.report("Expression is too deeply nested.", Some(offset));
    }

    /// Appends every report of a later stage after the ones already held.
    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.items.iter().map(|d| d.message.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.items.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_keeps_stage_order() {
        let mut lexing = Diagnostics::new();
        lexing.report_bad_character(0, '$');
        let mut parsing = Diagnostics::new();
        parsing.report_unexpected_token(1, "EndOfFileToken", "NumberToken");

        lexing.extend(parsing);
        assert_eq!(
            lexing.messages(),
            vec![
                "Bad character input: $",
                "Unexpected token EndOfFileToken, expected NumberToken"
            ]
        );
    }

    #[test]
    fn display_is_line_per_report() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report("first", None);
        diagnostics.report("second", Some(3));
        assert_eq!(diagnostics.to_string(), "first\nsecond");
        assert_eq!(diagnostics.iter().nth(1).and_then(|d| d.offset), Some(3));
    }
}
