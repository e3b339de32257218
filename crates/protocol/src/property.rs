use serde::{Deserialize, Serialize};

use crate::DiffType;

/// Where a property's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PropertySource {
    /// Carried explicitly by the trace entry.
    #[default]
    Explicit,
    /// Synthesized because the entry omitted it (type default).
    Default,
    /// Derived by a computation over other properties; excluded from
    /// modified-state comparison.
    Calculated,
}

/// A typed scalar carried by a leaf property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Text(String),
    Int(i64),
    Number(f64),
    Bool(bool),
}

impl PropertyValue {
    pub fn format(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Int(v) => v.to_string(),
            Self::Number(v) => format!("{v}"),
            Self::Bool(v) => v.to_string(),
        }
    }
}

/// A node of a property tree: a named, typed value with ordered children.
///
/// Leaf properties (no children) are the unit of modified-state comparison;
/// interior properties only group leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyNode {
    /// Stable id, unique within one property tree.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub source: PropertySource,
    #[serde(default)]
    pub value: Option<PropertyValue>,
    /// Previous snapshot's formatted value, set by the diff pass for display.
    #[serde(default)]
    pub old_value: Option<String>,
    #[serde(default)]
    pub diff: DiffType,
    /// Insertion order is the canonical display order.
    #[serde(default)]
    pub children: Vec<PropertyNode>,
}

impl PropertyNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            source: PropertySource::Explicit,
            value: None,
            old_value: None,
            diff: DiffType::None,
            children: Vec::new(),
        }
    }

    pub fn with_value(mut self, value: PropertyValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_source(mut self, source: PropertySource) -> Self {
        self.source = source;
        self
    }

    pub fn with_children(mut self, children: Vec<PropertyNode>) -> Self {
        self.children = children;
        self
    }

    /// The value rendered for display and used for diff comparison.
    /// Properties without a value format as the empty string.
    pub fn formatted_value(&self) -> String {
        self.value.as_ref().map(PropertyValue::format).unwrap_or_default()
    }

    pub fn is_default(&self) -> bool {
        self.source == PropertySource::Default
    }

    pub fn child_by_name(&self, name: &str) -> Option<&PropertyNode> {
        self.children.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_value_of_each_kind() {
        let p = PropertyNode::new("n.x", "x");
        assert_eq!(p.formatted_value(), "");
        assert_eq!(
            p.clone().with_value(PropertyValue::Int(-3)).formatted_value(),
            "-3"
        );
        assert_eq!(
            p.clone()
                .with_value(PropertyValue::Bool(true))
                .formatted_value(),
            "true"
        );
        assert_eq!(
            p.with_value(PropertyValue::Text("a".into())).formatted_value(),
            "a"
        );
    }

    #[test]
    fn child_lookup_by_name() {
        let p = PropertyNode::new("n", "n").with_children(vec![
            PropertyNode::new("n.a", "a"),
            PropertyNode::new("n.b", "b"),
        ]);
        assert_eq!(p.child_by_name("b").map(|c| c.id.as_str()), Some("n.b"));
        assert!(p.child_by_name("c").is_none());
    }

    #[test]
    fn default_source_detection() {
        let p = PropertyNode::new("n", "n").with_source(PropertySource::Default);
        assert!(p.is_default());
        assert!(!PropertyNode::new("n", "n").is_default());
    }
}
