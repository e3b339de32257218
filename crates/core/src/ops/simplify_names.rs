use crate::node::DiffNode;
use crate::ops::Operation;

/// Shortens deeply dotted names for display: a name with more than three
/// dot-separated segments becomes `first.second.(...).last`. Only the
/// display name changes; the identity-bearing `name` is untouched.
pub struct SimplifyNames;

fn simplify(name: &str) -> Option<String> {
    let segments: Vec<&str> = name.split('.').collect();
    if segments.len() <= 3 {
        return None;
    }
    Some(format!(
        "{}.{}.(...).{}",
        segments[0],
        segments[1],
        segments[segments.len() - 1]
    ))
}

fn walk<N: DiffNode>(node: &mut N) {
    if let Some(short) = simplify(node.name()) {
        node.set_display_name(short);
    }
    for child in node.children_mut() {
        walk(child);
    }
}

impl<N: DiffNode> Operation<N> for SimplifyNames {
    fn apply(&self, node: &mut N) {
        walk(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treescope_protocol::HierarchyNode;

    #[test]
    fn long_dotted_name_is_abbreviated() {
        let mut root = HierarchyNode::new("1", "com.example.app.widget.Button");
        SimplifyNames.apply(&mut root);
        assert_eq!(root.shown_name(), "com.example.(...).Button");
        assert_eq!(root.name, "com.example.app.widget.Button");
    }

    #[test]
    fn three_segments_or_fewer_untouched() {
        let mut root = HierarchyNode::new("1", "com.example.Button")
            .with_children(vec![HierarchyNode::new("2", "plain")]);
        SimplifyNames.apply(&mut root);
        assert_eq!(root.display_name, None);
        assert_eq!(root.children[0].display_name, None);
    }

    #[test]
    fn descendants_are_simplified_too() {
        let mut root = HierarchyNode::new("1", "root").with_children(vec![
            HierarchyNode::new("2", "a.b.c.d.e"),
        ]);
        SimplifyNames.apply(&mut root);
        assert_eq!(root.children[0].shown_name(), "a.b.(...).e");
    }
}
