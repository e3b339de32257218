use treescope_protocol::{DiffType, HierarchyNode, PropertyNode};

/// The minimal structural interface the diff engine and tree operations are
/// written against, so one traversal/move-detection implementation serves
/// both hierarchy nodes and flat property-value nodes.
pub trait DiffNode: Clone {
    /// Stable identity, unique within one snapshot.
    fn id(&self) -> &str;

    /// Canonical name (never the simplified display name).
    fn name(&self) -> &str;

    fn children(&self) -> &[Self];

    fn children_mut(&mut self) -> &mut Vec<Self>;

    /// Moves the children out, leaving the node childless.
    fn take_children(&mut self) -> Vec<Self> {
        std::mem::take(self.children_mut())
    }

    /// A copy of this node without its children.
    fn clone_node(&self) -> Self;

    fn diff_type(&self) -> DiffType;

    fn set_diff_type(&mut self, diff: DiffType);

    fn set_display_name(&mut self, display_name: String);
}

impl DiffNode for HierarchyNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<Self> {
        &mut self.children
    }

    fn clone_node(&self) -> Self {
        let mut clone = self.clone();
        clone.children = Vec::new();
        clone
    }

    fn diff_type(&self) -> DiffType {
        self.diff
    }

    fn set_diff_type(&mut self, diff: DiffType) {
        self.diff = diff;
    }

    fn set_display_name(&mut self, display_name: String) {
        self.display_name = Some(display_name);
    }
}

impl DiffNode for PropertyNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<Self> {
        &mut self.children
    }

    fn clone_node(&self) -> Self {
        let mut clone = self.clone();
        clone.children = Vec::new();
        clone
    }

    fn diff_type(&self) -> DiffType {
        self.diff
    }

    fn set_diff_type(&mut self, diff: DiffType) {
        self.diff = diff;
    }

    fn set_display_name(&mut self, _display_name: String) {
        // Property rows render their canonical name; there is no simplified
        // display name to carry.
    }
}

/// Clears every classification in the subtree back to [`DiffType::None`].
pub fn clear_diffs<N: DiffNode>(node: &mut N) {
    node.set_diff_type(DiffType::None);
    for child in node.children_mut() {
        clear_diffs(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_node_drops_children() {
        let tree = HierarchyNode::new("r", "r")
            .with_children(vec![HierarchyNode::new("a", "a")]);
        let shell = DiffNode::clone_node(&tree);
        assert_eq!(shell.id, "r");
        assert!(shell.children.is_empty());
        assert_eq!(tree.children.len(), 1);
    }

    #[test]
    fn clear_diffs_resets_subtree() {
        let mut tree = HierarchyNode::new("r", "r")
            .with_children(vec![HierarchyNode::new("a", "a")]);
        tree.children[0].diff = DiffType::Added;
        clear_diffs(&mut tree);
        assert_eq!(tree.children[0].diff, DiffType::None);
    }
}
