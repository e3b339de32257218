use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;
use treescope_protocol::{
    CompositionType, HierarchyNode, NodeFlags, PropertyNode, PropertySource, PropertyValue,
};

use crate::parsers::TraceFile;
use crate::source::{InMemorySource, Snapshot};

#[derive(Debug, Error)]
pub enum JsonParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("trace has no entries")]
    Empty,
    #[error("entry {index} timestamp {timestamp} is before its predecessor")]
    NonMonotonic { index: usize, timestamp: u64 },
}

/// JSON trace container: a named list of timestamped hierarchy snapshots.
#[derive(Debug, Deserialize)]
struct RawTrace {
    #[serde(default)]
    name: Option<String>,
    entries: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    timestamp: u64,
    root: RawNode,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    id: String,
    name: String,
    #[serde(default, rename = "isVisible")]
    is_visible: bool,
    #[serde(default)]
    composition: Option<String>,
    /// Absent or null means "no relative parent".
    #[serde(default, rename = "zOrderRelativeOf")]
    z_order_relative_of: Option<String>,
    #[serde(default)]
    properties: Vec<RawProperty>,
    #[serde(default)]
    children: Vec<RawNode>,
}

#[derive(Debug, Deserialize)]
struct RawProperty {
    name: String,
    #[serde(default)]
    value: Option<serde_json::Value>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    children: Vec<RawProperty>,
}

/// Parse the JSON trace container.
pub fn parse_json(data: &[u8]) -> Result<TraceFile, JsonParseError> {
    let raw: RawTrace = serde_json::from_slice(data)?;
    if raw.entries.is_empty() {
        return Err(JsonParseError::Empty);
    }

    let mut snapshots = Vec::with_capacity(raw.entries.len());
    let mut last_timestamp = 0;
    for (index, entry) in raw.entries.into_iter().enumerate() {
        if index > 0 && entry.timestamp < last_timestamp {
            return Err(JsonParseError::NonMonotonic {
                index,
                timestamp: entry.timestamp,
            });
        }
        last_timestamp = entry.timestamp;

        let mut root = convert_node(entry.root);
        resolve_snapshot_flags(&mut root);
        snapshots.push(Snapshot {
            timestamp: entry.timestamp,
            root,
        });
    }

    Ok(TraceFile {
        name: raw.name.unwrap_or_else(|| "trace".to_string()),
        source: InMemorySource::new(snapshots),
    })
}

fn convert_node(raw: RawNode) -> HierarchyNode {
    let flags = NodeFlags {
        is_visible: raw.is_visible,
        is_duplicate_id: false,
        composition: raw.composition.as_deref().and_then(parse_composition),
        z_order_relative_of: raw.z_order_relative_of,
        missing_z_parent: false,
    };
    let properties = raw
        .properties
        .into_iter()
        .map(|p| convert_property(&raw.id, p))
        .collect();
    let children = raw.children.into_iter().map(convert_node).collect();
    let mut node = HierarchyNode::new(raw.id, raw.name)
        .with_flags(flags)
        .with_properties(properties);
    node.children = children;
    node
}

fn parse_composition(kind: &str) -> Option<CompositionType> {
    match kind {
        "client" => Some(CompositionType::Client),
        "device" => Some(CompositionType::Device),
        "solidColor" => Some(CompositionType::SolidColor),
        other => {
            log::warn!("unknown composition kind {other:?}");
            None
        }
    }
}

fn convert_property(parent_id: &str, raw: RawProperty) -> PropertyNode {
    let id = format!("{parent_id}.{}", raw.name);
    let source = match raw.source.as_deref() {
        Some("default") => PropertySource::Default,
        Some("calculated") => PropertySource::Calculated,
        _ => PropertySource::Explicit,
    };
    let children = raw
        .children
        .into_iter()
        .map(|c| convert_property(&id, c))
        .collect();
    let mut node = PropertyNode::new(id, raw.name).with_source(source);
    node.value = raw.value.as_ref().and_then(convert_value);
    node.children = children;
    node
}

fn convert_value(value: &serde_json::Value) -> Option<PropertyValue> {
    match value {
        serde_json::Value::String(s) => Some(PropertyValue::Text(s.clone())),
        serde_json::Value::Bool(b) => Some(PropertyValue::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(PropertyValue::Int(i))
            } else {
                n.as_f64().map(PropertyValue::Number)
            }
        }
        serde_json::Value::Null => None,
        other => Some(PropertyValue::Text(other.to_string())),
    }
}

/// Flags that need whole-snapshot knowledge: duplicate ids and relative-Z
/// references whose target does not exist in this snapshot.
fn resolve_snapshot_flags(root: &mut HierarchyNode) {
    let mut seen = HashSet::new();
    let mut duplicates = HashSet::new();
    collect_ids(root, &mut seen, &mut duplicates);
    apply_flags(root, &seen, &duplicates);
}

fn collect_ids(
    node: &HierarchyNode,
    seen: &mut HashSet<String>,
    duplicates: &mut HashSet<String>,
) {
    if !seen.insert(node.id.clone()) {
        duplicates.insert(node.id.clone());
    }
    for child in &node.children {
        collect_ids(child, seen, duplicates);
    }
}

fn apply_flags(node: &mut HierarchyNode, ids: &HashSet<String>, duplicates: &HashSet<String>) {
    if duplicates.contains(&node.id) {
        node.flags.is_duplicate_id = true;
    }
    if let Some(target) = &node.flags.z_order_relative_of
        && !ids.contains(target)
    {
        node.flags.missing_z_parent = true;
    }
    for child in &mut node.children {
        apply_flags(child, ids, duplicates);
    }
}
