use serde::{Deserialize, Serialize};

use crate::{
    HierarchyNode, HierarchyOptions, LogEntry, LogHeader, PropertiesOptions, PropertyNode,
    RectsOptions, TextFilter,
};

/// Everything a rendering layer needs to draw one hierarchy viewer update.
///
/// A fresh value is produced per update; consumers re-render solely from it
/// and must not retain node references across two successive updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerData {
    /// The formatted, annotated display tree. `None` while the presenter is
    /// empty or when filtering removed everything.
    pub hierarchy_tree: Option<HierarchyNode>,
    /// Pinned nodes, re-collected from the freshly formatted tree so
    /// pinned-but-filtered-out nodes are still surfaced.
    pub pinned_items: Vec<HierarchyNode>,
    pub hierarchy_options: HierarchyOptions,
    pub properties_options: Option<PropertiesOptions>,
    pub rects_options: Option<RectsOptions>,
    pub hierarchy_filter: TextFilter,
    pub properties_filter: Option<TextFilter>,
    pub highlighted_id: Option<String>,
    pub highlighted_property_id: Option<String>,
    /// Formatted property tree of the selected node.
    pub properties_tree: Option<PropertyNode>,
}

/// Everything a rendering layer needs to draw one log viewer update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogViewData {
    /// The filtered entry list, in original order.
    pub entries: Vec<LogEntry>,
    /// Column descriptors including current filter state.
    pub headers: Vec<LogHeader>,
    /// Index of the trace-position-driven entry within `entries`.
    pub current_index: Option<usize>,
    /// Index of the user-clicked entry within `entries`.
    pub selected_index: Option<usize>,
    /// Index the view should scroll to now; cleared after use.
    pub scroll_to_index: Option<usize>,
}
