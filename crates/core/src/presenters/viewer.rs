use treescope_protocol::{
    HierarchyNode, HierarchyOptions, PropertiesOptions, RectsOptions, TextFilter, ViewerData,
};

use crate::presenters::{HierarchyPresenter, PropertiesPresenter};
use crate::source::{SourceError, TraceSource};

/// Per-trace orchestrator: owns a hierarchy presenter and, when configured,
/// a properties presenter and rects options. Methods that depend on an
/// unconfigured collaborator are guarded no-ops. Every update emits a fresh
/// [`ViewerData`] value.
pub struct ViewerPresenter {
    hierarchy: HierarchyPresenter,
    properties: Option<PropertiesPresenter>,
    rects_options: Option<RectsOptions>,
}

impl ViewerPresenter {
    pub fn new(hierarchy: HierarchyPresenter) -> Self {
        Self {
            hierarchy,
            properties: None,
            rects_options: None,
        }
    }

    pub fn with_properties(mut self, properties: PropertiesPresenter) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn with_rects_options(mut self, options: RectsOptions) -> Self {
        self.rects_options = Some(options);
        self
    }

    pub fn on_position_update(
        &mut self,
        source: &dyn TraceSource,
        index: usize,
    ) -> Result<ViewerData, SourceError> {
        match self.hierarchy.on_position_update(source, index) {
            Ok(()) => {}
            Err(err) => {
                if let Some(properties) = &mut self.properties {
                    properties.clear();
                }
                return Err(err);
            }
        }
        self.refresh_properties_selection();
        Ok(self.view_data())
    }

    pub fn on_highlighted_id_change(&mut self, id: Option<String>) -> ViewerData {
        self.hierarchy.set_highlighted(id);
        self.refresh_properties_selection();
        self.view_data()
    }

    pub fn on_pinned_item_toggle(&mut self, id: &str) -> ViewerData {
        self.hierarchy.toggle_pinned(id);
        self.view_data()
    }

    pub fn on_hierarchy_options_change(&mut self, options: HierarchyOptions) -> ViewerData {
        self.hierarchy.set_options(options);
        self.view_data()
    }

    pub fn on_hierarchy_filter_change(&mut self, filter: TextFilter) -> ViewerData {
        self.hierarchy.set_filter(filter);
        // A narrowed tree can invalidate the selection, and with it the
        // property pane.
        self.refresh_properties_selection();
        self.view_data()
    }

    pub fn on_properties_options_change(&mut self, options: PropertiesOptions) -> ViewerData {
        if let Some(properties) = &mut self.properties {
            properties.set_options(options);
        }
        self.view_data()
    }

    pub fn on_properties_filter_change(&mut self, filter: TextFilter) -> ViewerData {
        if let Some(properties) = &mut self.properties {
            properties.set_filter(filter);
        }
        self.view_data()
    }

    pub fn on_highlighted_property_change(&mut self, id: Option<String>) -> ViewerData {
        if let Some(properties) = &mut self.properties {
            properties.set_highlighted_property(id);
        }
        self.view_data()
    }

    pub fn on_rects_options_change(&mut self, options: RectsOptions) -> ViewerData {
        if let Some(rects) = &mut self.rects_options {
            *rects = options;
        }
        self.view_data()
    }

    pub fn hierarchy(&self) -> &HierarchyPresenter {
        &self.hierarchy
    }

    /// Assembles the rendering snapshot from the collaborators' state.
    pub fn view_data(&self) -> ViewerData {
        let properties = self.properties.as_ref();
        ViewerData {
            hierarchy_tree: self.hierarchy.formatted_tree().cloned(),
            pinned_items: self.hierarchy.pinned_items().to_vec(),
            hierarchy_options: self.hierarchy.options(),
            properties_options: properties.map(PropertiesPresenter::options),
            rects_options: self.rects_options,
            hierarchy_filter: self.hierarchy.filter().clone(),
            properties_filter: properties.map(|p| p.filter().clone()),
            highlighted_id: self.hierarchy.highlighted_id().map(str::to_string),
            highlighted_property_id: properties
                .and_then(|p| p.highlighted_property_id())
                .map(str::to_string),
            properties_tree: properties.and_then(|p| p.formatted_tree()).cloned(),
        }
    }

    /// Re-points the property pane at the highlighted node and its previous
    /// counterpart. Lookups run over the unfiltered snapshot roots so a
    /// pinned-but-filtered selection still shows its properties.
    fn refresh_properties_selection(&mut self) {
        let Some(properties) = &mut self.properties else {
            return;
        };
        let selected: Option<&HierarchyNode> = self
            .hierarchy
            .highlighted_id()
            .and_then(|id| self.hierarchy.current_root().and_then(|root| root.find_dfs(id)));
        let previous: Option<&HierarchyNode> = match (selected, self.hierarchy.previous_root()) {
            (Some(node), Some(root)) => root.find_dfs(&node.id),
            _ => None,
        };
        properties.on_selection_update(selected, previous);
    }
}
