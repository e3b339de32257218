use std::collections::HashSet;

use treescope_protocol::{Chip, CompositionType, HierarchyNode};

use crate::ops::Operation;

/// Two-pass structural annotation over the non-root nodes.
///
/// Pass 1 attaches chips derivable from a node's own flags and collects
/// every relative-Z reference target. Pass 2 attaches the relative-Z-parent
/// chip to referenced nodes; whether a node is referenced is only known
/// after the whole tree has been visited, hence the reverse index.
pub struct AddChips;

fn annotate(node: &mut HierarchyNode, rel_z_targets: &mut HashSet<String>) {
    match node.flags.composition {
        Some(CompositionType::Client) => node.chips.push(Chip::gpu()),
        Some(CompositionType::Device) | Some(CompositionType::SolidColor) => {
            node.chips.push(Chip::hwc());
        }
        None => {}
    }
    if node.flags.is_visible {
        node.chips.push(Chip::visible());
    }
    if node.flags.is_duplicate_id {
        node.chips.push(Chip::duplicate_id());
    }
    if let Some(target) = &node.flags.z_order_relative_of {
        node.chips.push(Chip::relative_z());
        if node.flags.missing_z_parent {
            node.chips.push(Chip::missing_z_parent());
        }
        rel_z_targets.insert(target.clone());
    }
    for child in &mut node.children {
        annotate(child, rel_z_targets);
    }
}

fn mark_referenced(node: &mut HierarchyNode, rel_z_targets: &HashSet<String>) {
    if rel_z_targets.contains(&node.id) {
        node.chips.push(Chip::relative_z_parent());
    }
    for child in &mut node.children {
        mark_referenced(child, rel_z_targets);
    }
}

impl Operation<HierarchyNode> for AddChips {
    fn apply(&self, node: &mut HierarchyNode) {
        let mut rel_z_targets = HashSet::new();
        for child in &mut node.children {
            annotate(child, &mut rel_z_targets);
        }
        for child in &mut node.children {
            mark_referenced(child, &rel_z_targets);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treescope_protocol::{ChipId, NodeFlags};

    fn chip_ids(node: &HierarchyNode) -> Vec<ChipId> {
        node.chips.iter().map(|c| c.id).collect()
    }

    #[test]
    fn relative_z_reference_marks_both_ends() {
        let parent = HierarchyNode::new("parent", "parent").with_children(vec![
            HierarchyNode::new("child", "child").with_flags(NodeFlags {
                z_order_relative_of: Some("parent".into()),
                ..NodeFlags::default()
            }),
        ]);
        let mut root = HierarchyNode::new("root", "root").with_children(vec![parent]);
        AddChips.apply(&mut root);

        let parent = &root.children[0];
        assert_eq!(chip_ids(parent), vec![ChipId::RelativeZParent]);
        assert_eq!(chip_ids(&parent.children[0]), vec![ChipId::RelativeZ]);
    }

    #[test]
    fn unflagged_node_gets_no_chips() {
        let mut root = HierarchyNode::new("root", "root")
            .with_children(vec![HierarchyNode::new("plain", "plain")]);
        AddChips.apply(&mut root);
        assert!(root.children[0].chips.is_empty());
    }

    #[test]
    fn composition_chips_are_mutually_exclusive() {
        let mut root = HierarchyNode::new("root", "root").with_children(vec![
            HierarchyNode::new("gpu", "gpu").with_flags(NodeFlags {
                composition: Some(CompositionType::Client),
                ..NodeFlags::default()
            }),
            HierarchyNode::new("overlay", "overlay").with_flags(NodeFlags {
                composition: Some(CompositionType::Device),
                ..NodeFlags::default()
            }),
            HierarchyNode::new("color", "color").with_flags(NodeFlags {
                composition: Some(CompositionType::SolidColor),
                ..NodeFlags::default()
            }),
        ]);
        AddChips.apply(&mut root);
        assert_eq!(chip_ids(&root.children[0]), vec![ChipId::Gpu]);
        assert_eq!(chip_ids(&root.children[1]), vec![ChipId::Hwc]);
        assert_eq!(chip_ids(&root.children[2]), vec![ChipId::Hwc]);
    }

    #[test]
    fn visibility_duplicate_and_missing_parent_chips() {
        let mut root = HierarchyNode::new("root", "root").with_children(vec![
            HierarchyNode::new("n", "n").with_flags(NodeFlags {
                is_visible: true,
                is_duplicate_id: true,
                z_order_relative_of: Some("gone".into()),
                missing_z_parent: true,
                ..NodeFlags::default()
            }),
        ]);
        AddChips.apply(&mut root);
        assert_eq!(
            chip_ids(&root.children[0]),
            vec![
                ChipId::Visible,
                ChipId::DuplicateId,
                ChipId::RelativeZ,
                ChipId::MissingZParent
            ]
        );
    }

    #[test]
    fn root_itself_is_not_annotated() {
        let mut root = HierarchyNode::new("root", "root").with_flags(NodeFlags {
            is_visible: true,
            ..NodeFlags::default()
        });
        AddChips.apply(&mut root);
        assert!(root.chips.is_empty());
    }
}
