use treescope_protocol::{HierarchyNode, PropertyNode, PropertySource};

use super::ModifiedCheck;

/// Modified-state strategy for hierarchy snapshots: a node pair is modified
/// when any non-denylisted, non-calculated leaf property differs by
/// formatted value, or a property lost its counterpart.
pub struct HierarchyModifiedCheck;

impl ModifiedCheck<HierarchyNode> for HierarchyModifiedCheck {
    fn is_modified(&self, new: &HierarchyNode, old: &HierarchyNode, denylist: &[String]) -> bool {
        child_properties_modified(&new.property_tree(), &old.property_tree(), denylist)
    }
}

/// Property children are visited in lexicographic name order so the result
/// is deterministic regardless of source ordering.
fn child_properties_modified(
    new: &PropertyNode,
    old: &PropertyNode,
    denylist: &[String],
) -> bool {
    let mut properties: Vec<&PropertyNode> = new.children.iter().collect();
    properties.sort_by(|a, b| a.name.cmp(&b.name));

    for property in properties {
        if denylist.iter().any(|d| d == &property.name) {
            continue;
        }
        if property.source == PropertySource::Calculated {
            continue;
        }

        let Some(old_property) = old.child_by_name(&property.name) else {
            return true;
        };

        if property.children.is_empty() {
            if property.formatted_value() != old_property.formatted_value() {
                return true;
            }
        } else if child_properties_modified(property, old_property, denylist) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use treescope_protocol::PropertyValue;

    fn leaf(name: &str, value: i64) -> PropertyNode {
        PropertyNode::new(format!("n.{name}"), name).with_value(PropertyValue::Int(value))
    }

    fn node_with(properties: Vec<PropertyNode>) -> HierarchyNode {
        HierarchyNode::new("n", "n").with_properties(properties)
    }

    fn modified(new: &HierarchyNode, old: &HierarchyNode, denylist: &[String]) -> bool {
        HierarchyModifiedCheck.is_modified(new, old, denylist)
    }

    #[test]
    fn changed_leaf_property_is_modified() {
        let new = node_with(vec![leaf("alpha", 1), leaf("z", 2)]);
        let old = node_with(vec![leaf("alpha", 1), leaf("z", 3)]);
        assert!(modified(&new, &old, &[]));
    }

    #[test]
    fn identical_properties_are_not_modified() {
        let new = node_with(vec![leaf("alpha", 1)]);
        assert!(!modified(&new, &new.clone(), &[]));
    }

    #[test]
    fn denylisted_change_is_ignored() {
        let new = node_with(vec![leaf("alpha", 1), leaf("z", 2)]);
        let old = node_with(vec![leaf("alpha", 1), leaf("z", 3)]);
        assert!(!modified(&new, &old, &["z".to_string()]));
    }

    #[test]
    fn calculated_properties_are_ignored() {
        let new = node_with(vec![
            leaf("derived", 1).with_source(PropertySource::Calculated),
        ]);
        let old = node_with(vec![
            leaf("derived", 9).with_source(PropertySource::Calculated),
        ]);
        assert!(!modified(&new, &old, &[]));
    }

    #[test]
    fn missing_counterpart_is_modified() {
        let new = node_with(vec![leaf("alpha", 1)]);
        let old = node_with(vec![]);
        assert!(modified(&new, &old, &[]));
    }

    #[test]
    fn nested_property_groups_are_compared_recursively() {
        let group_new = PropertyNode::new("n.bounds", "bounds")
            .with_children(vec![leaf("w", 100), leaf("h", 50)]);
        let group_old = PropertyNode::new("n.bounds", "bounds")
            .with_children(vec![leaf("w", 100), leaf("h", 60)]);
        assert!(modified(
            &node_with(vec![group_new]),
            &node_with(vec![group_old]),
            &[]
        ));
    }

    #[test]
    fn source_ordering_does_not_matter() {
        let new = node_with(vec![leaf("b", 2), leaf("a", 1)]);
        let old = node_with(vec![leaf("a", 1), leaf("b", 2)]);
        assert!(!modified(&new, &old, &[]));
    }
}
