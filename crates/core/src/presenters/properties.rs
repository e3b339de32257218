use treescope_protocol::{HierarchyNode, PropertiesOptions, PropertyNode, TextFilter};

use crate::diff::{PropertyModifiedCheck, diff_trees};
use crate::filter::CompiledFilter;
use crate::ops::{Filter, Operation, Predicate};

/// Derives the property pane of the currently selected hierarchy node:
/// property diffing against the previous snapshot's counterpart, the
/// show-defaults gate, and the property-name text filter.
pub struct PropertiesPresenter {
    options: PropertiesOptions,
    filter: TextFilter,
    denylist: Vec<String>,
    highlighted_property_id: Option<String>,
    current: Option<PropertyNode>,
    previous: Option<PropertyNode>,
    formatted: Option<PropertyNode>,
}

impl PropertiesPresenter {
    pub fn new(denylist: Vec<String>) -> Self {
        Self {
            options: PropertiesOptions::default(),
            filter: TextFilter::default(),
            denylist,
            highlighted_property_id: None,
            current: None,
            previous: None,
            formatted: None,
        }
    }

    pub fn with_options(mut self, options: PropertiesOptions) -> Self {
        self.options = options;
        self
    }

    /// Points the pane at a newly selected node. `previous` is the same
    /// node's counterpart in the previous snapshot, when one exists; the
    /// diff option is forced unavailable without it.
    pub fn on_selection_update(
        &mut self,
        selected: Option<&HierarchyNode>,
        previous: Option<&HierarchyNode>,
    ) {
        self.current = selected.map(HierarchyNode::property_tree);
        self.previous = previous.map(HierarchyNode::property_tree);
        self.options.show_diff.unavailable = self.previous.is_none();
        self.reformat();
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.previous = None;
        self.formatted = None;
        self.highlighted_property_id = None;
        self.options.show_diff.unavailable = true;
    }

    pub fn set_options(&mut self, options: PropertiesOptions) {
        self.options = options;
        self.options.show_diff.unavailable = self.previous.is_none();
        self.reformat();
    }

    pub fn set_filter(&mut self, filter: TextFilter) {
        self.filter = filter;
        self.reformat();
    }

    pub fn set_highlighted_property(&mut self, id: Option<String>) {
        self.highlighted_property_id = id;
    }

    pub fn options(&self) -> PropertiesOptions {
        self.options
    }

    pub fn filter(&self) -> &TextFilter {
        &self.filter
    }

    pub fn formatted_tree(&self) -> Option<&PropertyNode> {
        self.formatted.as_ref()
    }

    pub fn highlighted_property_id(&self) -> Option<&str> {
        self.highlighted_property_id.as_deref()
    }

    fn reformat(&mut self) {
        let Some(current) = &self.current else {
            self.formatted = None;
            return;
        };

        let previous = if self.options.show_diff.is_active() {
            self.previous.as_ref()
        } else {
            None
        };
        let mut tree = diff_trees(current, previous, &PropertyModifiedCheck, &self.denylist);

        // Hiding defaults is a value-level prune: a non-default property
        // nested under a default group is dropped with its group.
        if !self.options.show_defaults.is_active() {
            let not_default: Predicate<PropertyNode> = Box::new(|p: &PropertyNode| !p.is_default());
            Filter::new(vec![not_default], false).apply(&mut tree);
        }
        if !self.filter.is_empty() {
            let compiled = CompiledFilter::new(&self.filter);
            let name_matches: Predicate<PropertyNode> =
                Box::new(move |p: &PropertyNode| compiled.matches(&p.name));
            Filter::new(vec![name_matches], true).apply(&mut tree);
        }

        self.formatted = Some(tree);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treescope_protocol::{DiffType, OptionState, PropertySource, PropertyValue};

    fn selected_node(alpha: f64) -> HierarchyNode {
        HierarchyNode::new("bar", "bar").with_properties(vec![
            PropertyNode::new("bar.alpha", "alpha").with_value(PropertyValue::Number(alpha)),
            PropertyNode::new("bar.z", "z")
                .with_value(PropertyValue::Int(0))
                .with_source(PropertySource::Default),
        ])
    }

    #[test]
    fn defaults_are_hidden_unless_asked_for() {
        let node = selected_node(1.0);
        let mut presenter = PropertiesPresenter::new(vec![]);
        presenter.on_selection_update(Some(&node), None);

        let tree = presenter.formatted_tree().expect("tree");
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].name, "alpha");

        presenter.set_options(PropertiesOptions {
            show_defaults: OptionState::enabled(),
            ..PropertiesOptions::default()
        });
        assert_eq!(presenter.formatted_tree().expect("tree").children.len(), 2);
    }

    #[test]
    fn diff_records_old_value_on_change() {
        let old = selected_node(0.5);
        let new = selected_node(1.0);
        let mut presenter = PropertiesPresenter::new(vec![]).with_options(PropertiesOptions {
            show_diff: OptionState::enabled(),
            ..PropertiesOptions::default()
        });
        presenter.on_selection_update(Some(&new), Some(&old));

        let tree = presenter.formatted_tree().expect("tree");
        let alpha = tree.child_by_name("alpha").expect("alpha");
        assert_eq!(alpha.diff, DiffType::Modified);
        assert_eq!(alpha.old_value.as_deref(), Some("0.5"));
    }

    #[test]
    fn diff_option_is_unavailable_without_a_counterpart() {
        let node = selected_node(1.0);
        let mut presenter = PropertiesPresenter::new(vec![]).with_options(PropertiesOptions {
            show_diff: OptionState::enabled(),
            ..PropertiesOptions::default()
        });
        presenter.on_selection_update(Some(&node), None);
        assert!(presenter.options().show_diff.unavailable);
        let tree = presenter.formatted_tree().expect("tree");
        assert!(tree.children.iter().all(|c| c.diff == DiffType::None));
    }

    #[test]
    fn text_filter_keeps_matching_property_names() {
        let node = HierarchyNode::new("bar", "bar").with_properties(vec![
            PropertyNode::new("bar.alpha", "alpha").with_value(PropertyValue::Number(1.0)),
            PropertyNode::new("bar.bounds", "bounds").with_children(vec![
                PropertyNode::new("bar.bounds.w", "w").with_value(PropertyValue::Int(10)),
            ]),
        ]);
        let mut presenter = PropertiesPresenter::new(vec![]);
        presenter.on_selection_update(Some(&node), None);
        presenter.set_filter(TextFilter::new("w"));

        let tree = presenter.formatted_tree().expect("tree");
        // "bounds" survives as the path to its matching child.
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].name, "bounds");
    }

    #[test]
    fn clearing_the_selection_empties_the_pane() {
        let node = selected_node(1.0);
        let mut presenter = PropertiesPresenter::new(vec![]);
        presenter.on_selection_update(Some(&node), None);
        presenter.on_selection_update(None, None);
        assert!(presenter.formatted_tree().is_none());
    }
}
