use treescope_protocol::{HierarchyNode, HierarchyOptions, TextFilter};

use crate::diff::{HierarchyModifiedCheck, diff_trees};
use crate::filter::CompiledFilter;
use crate::node::DiffNode;
use crate::ops::{AddChips, Filter, FlattenChildren, Operation, Predicate, SimplifyNames, TreeFormatter};
use crate::source::{Snapshot, SourceError, TraceSource};

/// Owns the current/previous snapshot pair of one hierarchy trace and the
/// formatted display tree derived from them.
///
/// The presenter is either empty (no snapshot resolved yet, or cleared) or
/// populated; option and filter changes re-run formatting without changing
/// that coarse state. Every re-format produces a fresh display tree; callers
/// compare the returned snapshot, never retained node references.
pub struct HierarchyPresenter {
    options: HierarchyOptions,
    filter: TextFilter,
    denylist: Vec<String>,
    custom_operations: Vec<Box<dyn Operation<HierarchyNode>>>,
    pinned_ids: Vec<String>,
    highlighted_id: Option<String>,
    current: Option<Snapshot>,
    previous: Option<Snapshot>,
    formatted: Option<HierarchyNode>,
    pinned_items: Vec<HierarchyNode>,
}

impl HierarchyPresenter {
    pub fn new(denylist: Vec<String>) -> Self {
        Self {
            options: HierarchyOptions::default(),
            filter: TextFilter::default(),
            denylist,
            custom_operations: Vec::new(),
            pinned_ids: Vec::new(),
            highlighted_id: None,
            current: None,
            previous: None,
            formatted: None,
            pinned_items: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: HierarchyOptions) -> Self {
        self.options = options;
        self
    }

    /// Registers a trace-type-specific operation, run after the built-in
    /// pipeline and before pinned extraction/filtering.
    pub fn add_custom_operation(&mut self, operation: Box<dyn Operation<HierarchyNode>>) {
        self.custom_operations.push(operation);
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Moves to the trace entry at `index` and re-derives the display tree.
    ///
    /// On a retrieval failure all derived state is reset to its empty shape
    /// before the error propagates, so the caller never observes a mix of
    /// old and new trees.
    pub fn on_position_update(
        &mut self,
        source: &dyn TraceSource,
        index: usize,
    ) -> Result<(), SourceError> {
        let current = match source.entry(index) {
            Ok(snapshot) => snapshot.clone(),
            Err(err) => {
                self.reset_derived_state();
                return Err(err);
            }
        };
        let previous = if index > 0 {
            match source.entry(index - 1) {
                Ok(snapshot) => Some(snapshot.clone()),
                Err(err) => {
                    self.reset_derived_state();
                    return Err(err);
                }
            }
        } else {
            None
        };

        self.current = Some(current);
        self.previous = previous;
        self.options.show_diff.unavailable = self.previous.is_none();
        self.reformat();
        Ok(())
    }

    /// Back to the empty state; user options and the filter survive.
    pub fn clear(&mut self) {
        self.reset_derived_state();
    }

    pub fn set_options(&mut self, options: HierarchyOptions) {
        self.options = options;
        // The diff gate is presenter-owned, never caller-supplied.
        self.options.show_diff.unavailable = self.previous.is_none();
        self.reformat();
    }

    pub fn set_filter(&mut self, filter: TextFilter) {
        self.filter = filter;
        self.reformat();
    }

    pub fn toggle_pinned(&mut self, id: &str) {
        if let Some(pos) = self.pinned_ids.iter().position(|p| p == id) {
            self.pinned_ids.remove(pos);
        } else {
            self.pinned_ids.push(id.to_string());
        }
        self.reformat();
    }

    /// Selection is carried across navigation by id and silently dropped
    /// when the id no longer resolves in the formatted tree.
    pub fn set_highlighted(&mut self, id: Option<String>) {
        self.highlighted_id = id;
        self.revalidate_highlight();
    }

    pub fn options(&self) -> HierarchyOptions {
        self.options
    }

    pub fn filter(&self) -> &TextFilter {
        &self.filter
    }

    pub fn formatted_tree(&self) -> Option<&HierarchyNode> {
        self.formatted.as_ref()
    }

    pub fn pinned_items(&self) -> &[HierarchyNode] {
        &self.pinned_items
    }

    pub fn highlighted_id(&self) -> Option<&str> {
        self.highlighted_id.as_deref()
    }

    pub fn current_root(&self) -> Option<&HierarchyNode> {
        self.current.as_ref().map(|s| &s.root)
    }

    pub fn previous_root(&self) -> Option<&HierarchyNode> {
        self.previous.as_ref().map(|s| &s.root)
    }

    fn reset_derived_state(&mut self) {
        self.current = None;
        self.previous = None;
        self.formatted = None;
        self.pinned_items.clear();
        self.highlighted_id = None;
        self.options.show_diff.unavailable = true;
    }

    fn reformat(&mut self) {
        let Some(current) = &self.current else {
            self.formatted = None;
            self.pinned_items.clear();
            return;
        };

        let previous = if self.options.show_diff.is_active() {
            self.previous.as_ref().map(|s| &s.root)
        } else {
            None
        };
        // With no previous root this clears every classification, giving a
        // fresh tree either way.
        let mut tree = diff_trees(
            &current.root,
            previous,
            &HierarchyModifiedCheck,
            &self.denylist,
        );

        let mut formatter = TreeFormatter::new();
        if self.options.flat.is_active() {
            formatter.add_operation(Box::new(FlattenChildren));
        }
        formatter.add_operation(Box::new(AddChips));
        if self.options.simplify_names.is_active() {
            formatter.add_operation(Box::new(SimplifyNames));
        }
        formatter.format(&mut tree);
        for operation in &self.custom_operations {
            operation.apply(&mut tree);
        }

        // Pinned nodes are re-collected before filtering so a pinned node
        // hidden by the filter is still surfaced.
        self.pinned_items = collect_pinned(&tree, &self.pinned_ids);

        let mut predicates: Vec<Predicate<HierarchyNode>> = Vec::new();
        if !self.filter.is_empty() {
            let compiled = CompiledFilter::new(&self.filter);
            predicates.push(Box::new(move |node: &HierarchyNode| {
                compiled.matches(&node.name) || compiled.matches(&node.id)
            }));
        }
        if self.options.show_only_visible.is_active() {
            predicates.push(Box::new(|node: &HierarchyNode| node.flags.is_visible));
        }
        if !predicates.is_empty() {
            Filter::new(predicates, true).apply(&mut tree);
        }

        self.formatted = Some(tree);
        self.revalidate_highlight();
    }

    fn revalidate_highlight(&mut self) {
        if let Some(id) = &self.highlighted_id {
            let resolvable = self
                .formatted
                .as_ref()
                .is_some_and(|tree| tree.find_dfs(id).is_some());
            if !resolvable {
                self.highlighted_id = None;
            }
        }
    }
}

fn collect_pinned(tree: &HierarchyNode, pinned_ids: &[String]) -> Vec<HierarchyNode> {
    let mut out = Vec::new();
    collect_pinned_into(tree, pinned_ids, &mut out);
    out
}

fn collect_pinned_into(node: &HierarchyNode, pinned_ids: &[String], out: &mut Vec<HierarchyNode>) {
    if pinned_ids.iter().any(|id| id == &node.id) {
        out.push(DiffNode::clone_node(node));
    }
    for child in &node.children {
        collect_pinned_into(child, pinned_ids, out);
    }
}
