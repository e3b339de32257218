use serde::{Deserialize, Serialize};

/// State of one user-facing toggle.
///
/// `unavailable` is forced by the owning presenter when the option cannot
/// currently apply (e.g. "show diff" with no previous snapshot); an
/// unavailable option must behave as disabled regardless of `enabled`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionState {
    pub enabled: bool,
    pub unavailable: bool,
}

impl OptionState {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            unavailable: false,
        }
    }

    /// Whether the option should take effect right now.
    pub fn is_active(self) -> bool {
        self.enabled && !self.unavailable
    }
}

/// Hierarchy-section options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyOptions {
    pub show_diff: OptionState,
    pub simplify_names: OptionState,
    pub show_only_visible: OptionState,
    pub flat: OptionState,
}

/// Properties-section options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertiesOptions {
    pub show_diff: OptionState,
    pub show_defaults: OptionState,
}

/// Rects-section options. The engine computes no geometry; these are carried
/// through to the rendering layer untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectsOptions {
    pub show_only_visible: OptionState,
}
