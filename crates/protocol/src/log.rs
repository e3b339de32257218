use serde::{Deserialize, Serialize};

use crate::{PropertyNode, TextFilter};

/// A typed scalar carried by one log-entry field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Number(i64),
    Timestamp(u64),
}

impl FieldValue {
    pub fn format(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(v) => v.to_string(),
            Self::Timestamp(ns) => format!("{ns}ns"),
        }
    }
}

/// One field of a log entry, keyed by the column it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFieldValue {
    pub column: String,
    pub value: FieldValue,
}

/// An item of the time-ordered log view.
///
/// Entries are produced once per load and are immutable; presenters only
/// maintain index bookkeeping around them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Position in the original, unfiltered, un-reordered sequence.
    pub original_index: usize,
    #[serde(default)]
    pub timestamp: Option<u64>,
    pub fields: Vec<LogFieldValue>,
    /// Detail tree shown when the entry is current/selected.
    #[serde(default)]
    pub properties: Option<PropertyNode>,
}

impl LogEntry {
    pub fn new(original_index: usize) -> Self {
        Self {
            original_index,
            timestamp: None,
            fields: Vec::new(),
            properties: None,
        }
    }

    pub fn with_field(mut self, column: impl Into<String>, value: FieldValue) -> Self {
        self.fields.push(LogFieldValue {
            column: column.into(),
            value,
        });
        self
    }

    pub fn with_properties(mut self, properties: PropertyNode) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Formatted value of the field for `column`, or the empty string when
    /// the entry carries no such field.
    pub fn field_text(&self, column: &str) -> String {
        self.fields
            .iter()
            .find(|f| f.column == column)
            .map(|f| f.value.format())
            .unwrap_or_default()
    }
}

/// Describes one log column for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Key used to address the column in filter-change events.
    pub key: String,
    /// Header label.
    pub label: String,
}

impl ColumnSpec {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Per-column filter state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogFilter {
    /// Multi-select over a fixed option list; an empty selection passes
    /// every entry.
    Select {
        options: Vec<String>,
        selected: Vec<String>,
    },
    /// Free-text filter over the field's formatted value.
    Text(TextFilter),
}

/// A log column together with its (optional) filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogHeader {
    pub spec: ColumnSpec,
    #[serde(default)]
    pub filter: Option<LogFilter>,
}

impl LogHeader {
    pub fn new(spec: ColumnSpec) -> Self {
        Self { spec, filter: None }
    }

    pub fn with_filter(mut self, filter: LogFilter) -> Self {
        self.filter = Some(filter);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_text_falls_back_to_empty() {
        let e = LogEntry::new(0).with_field("pid", FieldValue::Number(7));
        assert_eq!(e.field_text("pid"), "7");
        assert_eq!(e.field_text("uid"), "");
    }

    #[test]
    fn field_value_formatting() {
        assert_eq!(FieldValue::Text("x".into()).format(), "x");
        assert_eq!(FieldValue::Number(-2).format(), "-2");
        assert_eq!(FieldValue::Timestamp(5).format(), "5ns");
    }
}
