use crate::node::DiffNode;
use crate::ops::Operation;

/// Replaces a node's children with a pre-order depth-first flattening of its
/// entire descendant set, each flattened node stripped of its own children.
/// Each original top-level child is fully flattened (with its whole subtree)
/// before the next original sibling.
pub struct FlattenChildren;

fn flatten_into<N: DiffNode>(mut node: N, out: &mut Vec<N>) {
    let children = node.take_children();
    out.push(node);
    for child in children {
        flatten_into(child, out);
    }
}

impl<N: DiffNode> Operation<N> for FlattenChildren {
    fn apply(&self, node: &mut N) {
        let mut flat = Vec::new();
        for child in node.take_children() {
            flatten_into(child, &mut flat);
        }
        *node.children_mut() = flat;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treescope_protocol::HierarchyNode;

    fn chain(depth: usize, prefix: &str) -> HierarchyNode {
        let mut node = HierarchyNode::new(format!("{prefix}{depth}"), format!("{prefix}{depth}"));
        if depth > 1 {
            node.children.push(chain(depth - 1, prefix));
        }
        node
    }

    #[test]
    fn deep_chain_flattens_to_direct_children() {
        let mut root = HierarchyNode::new("root", "root").with_children(vec![chain(10, "n")]);
        FlattenChildren.apply(&mut root);
        assert_eq!(root.children.len(), 10);
        assert!(root.children.iter().all(|c| c.children.is_empty()));
        // Parent-before-child order.
        assert_eq!(root.children[0].id, "n10");
        assert_eq!(root.children[9].id, "n1");
    }

    #[test]
    fn siblings_flatten_depth_first_not_level_order() {
        let mut root = HierarchyNode::new("root", "root")
            .with_children(vec![chain(5, "a"), chain(5, "b")]);
        FlattenChildren.apply(&mut root);
        assert_eq!(root.children.len(), 10);
        let ids: Vec<&str> = root.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["a5", "a4", "a3", "a2", "a1", "b5", "b4", "b3", "b2", "b1"]);
    }

    #[test]
    fn childless_root_stays_empty() {
        let mut root = HierarchyNode::new("root", "root");
        FlattenChildren.apply(&mut root);
        assert!(root.children.is_empty());
    }
}
