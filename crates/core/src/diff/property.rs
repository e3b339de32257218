use treescope_protocol::PropertyNode;

use super::ModifiedCheck;

/// Modified-state strategy for flat property-value trees: formatted-value
/// string inequality, with the previous value recorded for display.
pub struct PropertyModifiedCheck;

impl ModifiedCheck<PropertyNode> for PropertyModifiedCheck {
    fn is_modified(&self, new: &PropertyNode, old: &PropertyNode, denylist: &[String]) -> bool {
        if denylist.iter().any(|d| d == &new.name) {
            return false;
        }
        new.formatted_value() != old.formatted_value()
    }

    fn on_modified(&self, new: &mut PropertyNode, old: &PropertyNode) {
        new.old_value = Some(old.formatted_value());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::diff_trees;
    use treescope_protocol::{DiffType, PropertyValue};

    fn prop(id: &str, value: &str) -> PropertyNode {
        PropertyNode::new(id, id).with_value(PropertyValue::Text(value.into()))
    }

    #[test]
    fn value_change_sets_modified_and_old_value() {
        let old = PropertyNode::new("root", "root").with_children(vec![prop("alpha", "0.5")]);
        let new = PropertyNode::new("root", "root").with_children(vec![prop("alpha", "1")]);
        let result = diff_trees(&new, Some(&old), &PropertyModifiedCheck, &[]);
        let alpha = &result.children[0];
        assert_eq!(alpha.diff, DiffType::Modified);
        assert_eq!(alpha.old_value.as_deref(), Some("0.5"));
    }

    #[test]
    fn denylisted_property_stays_none() {
        let old = PropertyNode::new("root", "root").with_children(vec![prop("alpha", "0.5")]);
        let new = PropertyNode::new("root", "root").with_children(vec![prop("alpha", "1")]);
        let result = diff_trees(&new, Some(&old), &PropertyModifiedCheck, &["alpha".to_string()]);
        assert_eq!(result.children[0].diff, DiffType::None);
        assert_eq!(result.children[0].old_value, None);
    }

    #[test]
    fn equal_values_stay_none() {
        let tree = PropertyNode::new("root", "root").with_children(vec![prop("alpha", "1")]);
        let result = diff_trees(&tree, Some(&tree), &PropertyModifiedCheck, &[]);
        assert_eq!(result.children[0].diff, DiffType::None);
    }
}
