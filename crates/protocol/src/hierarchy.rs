use serde::{Deserialize, Serialize};

use crate::{Chip, DiffType, PropertyNode};

/// How a node was composited, when the trace records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompositionType {
    /// Client-side (GPU) composition.
    Client,
    /// Hardware-composer device overlay.
    Device,
    /// Hardware-composer solid color.
    SolidColor,
}

/// Trace-derived facts about a node that the chip annotation pass reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeFlags {
    #[serde(default)]
    pub is_visible: bool,
    /// The snapshot carried another node with the same id.
    #[serde(default)]
    pub is_duplicate_id: bool,
    #[serde(default)]
    pub composition: Option<CompositionType>,
    /// Id of the node this one is Z-ordered relative to. `None` is the
    /// "no relative parent" sentinel.
    #[serde(default)]
    pub z_order_relative_of: Option<String>,
    /// The relative-Z target id does not exist in this snapshot.
    #[serde(default)]
    pub missing_z_parent: bool,
}

/// An identity-keyed node of one hierarchy snapshot.
///
/// Nodes are value-like per snapshot: a new snapshot produces new node
/// values, and identity across snapshots is `id` string equality only.
/// Invariant: no two children of the same parent share an `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyNode {
    /// Stable id, unique within one snapshot.
    pub id: String,
    /// Canonical name; never rewritten by display transforms.
    pub name: String,
    /// Shortened name for display, set by the simplify-names pass.
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub diff: DiffType,
    #[serde(default)]
    pub chips: Vec<Chip>,
    #[serde(default)]
    pub flags: NodeFlags,
    /// The node's own properties, compared by the hierarchy diff strategy.
    #[serde(default)]
    pub properties: Vec<PropertyNode>,
    /// Insertion order is the canonical display order.
    #[serde(default)]
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            display_name: None,
            diff: DiffType::None,
            chips: Vec::new(),
            flags: NodeFlags::default(),
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<HierarchyNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_properties(mut self, properties: Vec<PropertyNode>) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// The name shown to the user: the simplified display name when one has
    /// been set, otherwise the canonical name.
    pub fn shown_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Depth-first pre-order search by id over this subtree.
    pub fn find_dfs(&self, id: &str) -> Option<&HierarchyNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_dfs(id))
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(HierarchyNode::node_count).sum::<usize>()
    }

    /// Wraps this node's property list into a property tree rooted at the
    /// node's own id/name, ready for the properties presenter.
    pub fn property_tree(&self) -> PropertyNode {
        let mut root = PropertyNode::new(self.id.clone(), self.name.clone());
        root.children = self.properties.clone();
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> HierarchyNode {
        HierarchyNode::new("root", "root").with_children(vec![
            HierarchyNode::new("a", "a")
                .with_children(vec![HierarchyNode::new("a.b", "b")]),
            HierarchyNode::new("c", "c"),
        ])
    }

    #[test]
    fn dfs_finds_nested_node() {
        let t = tree();
        assert_eq!(t.find_dfs("a.b").map(|n| n.name.as_str()), Some("b"));
        assert!(t.find_dfs("missing").is_none());
    }

    #[test]
    fn node_count_includes_self() {
        assert_eq!(tree().node_count(), 4);
    }

    #[test]
    fn shown_name_prefers_display_name() {
        let mut n = HierarchyNode::new("x", "com.example.app.View");
        assert_eq!(n.shown_name(), "com.example.app.View");
        n.display_name = Some("com.example.(...).View".into());
        assert_eq!(n.shown_name(), "com.example.(...).View");
        assert_eq!(n.name, "com.example.app.View");
    }

    #[test]
    fn property_tree_wraps_property_list() {
        let n = HierarchyNode::new("x", "x")
            .with_properties(vec![PropertyNode::new("x.alpha", "alpha")]);
        let tree = n.property_tree();
        assert_eq!(tree.id, "x");
        assert_eq!(tree.children.len(), 1);
    }

    #[test]
    fn serialization_roundtrip() {
        let t = tree();
        let json = serde_json::to_string(&t).expect("serialize");
        let back: HierarchyNode = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, t);
    }
}
