//! Append-only diagnostic log produced by a single verification call.

use serde::Serialize;

/// Ordered rows describing every step taken while reaching a verdict.
///
/// Rows can only be appended. Each row is also emitted as a `tracing` debug
/// event so that a subscriber sees the same story as the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Trace {
    rows: Vec<String>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: impl Into<String>) {
        let row = row.into();
        tracing::debug!(target: "mailverify::trace", "{row}");
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.rows.iter().any(|row| row.contains(needle))
    }

    pub fn into_rows(self) -> Vec<String> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_keep_insertion_order() {
        let mut trace = Trace::new();
        trace.push("first");
        trace.push(String::from("second"));
        trace.push(format!("third {}", 3));
        assert_eq!(trace.rows(), ["first", "second", "third 3"]);
        assert_eq!(trace.len(), 3);
    }

    #[test]
    fn contains_matches_substrings() {
        let mut trace = Trace::new();
        trace.push("Encountered an unknown response code: 421");
        assert!(trace.contains("unknown response code"));
        assert!(!trace.contains("250"));
    }

    #[test]
    fn serializes_as_plain_list() {
        let mut trace = Trace::new();
        trace.push("a");
        trace.push("b");
        let json = serde_json::to_string(&trace).expect("serialize");
        assert_eq!(json, r#"["a","b"]"#);
    }
}
