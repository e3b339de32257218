use serde::{Deserialize, Serialize};

/// Identifies which badge a chip represents, independent of display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChipId {
    Gpu,
    Hwc,
    Visible,
    DuplicateId,
    RelativeZ,
    RelativeZParent,
    MissingZParent,
}

/// A small structural annotation attached to a display node, summarizing a
/// derived property (composition path, visibility, relative-Z relationship,
/// duplicate id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chip {
    pub id: ChipId,
    /// Short text rendered inside the badge.
    pub short: String,
    /// Long description rendered as a tooltip.
    pub long: String,
}

impl Chip {
    fn new(id: ChipId, short: &str, long: &str) -> Self {
        Self {
            id,
            short: short.to_string(),
            long: long.to_string(),
        }
    }

    pub fn gpu() -> Self {
        Self::new(ChipId::Gpu, "GPU", "Composited on the client / GPU path")
    }

    pub fn hwc() -> Self {
        Self::new(ChipId::Hwc, "HWC", "Composited by the hardware composer")
    }

    pub fn visible() -> Self {
        Self::new(ChipId::Visible, "V", "Visible on screen")
    }

    pub fn duplicate_id() -> Self {
        Self::new(
            ChipId::DuplicateId,
            "DUP",
            "Node id also used by another node in this snapshot",
        )
    }

    pub fn relative_z() -> Self {
        Self::new(
            ChipId::RelativeZ,
            "RelZ",
            "Z-ordered relative to another node",
        )
    }

    pub fn relative_z_parent() -> Self {
        Self::new(
            ChipId::RelativeZParent,
            "RelZParent",
            "Another node is Z-ordered relative to this node",
        )
    }

    pub fn missing_z_parent() -> Self {
        Self::new(
            ChipId::MissingZParent,
            "MissingZParent",
            "Z-order relative-of target does not exist in this snapshot",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chip_identity() {
        assert_eq!(Chip::gpu().id, ChipId::Gpu);
        assert_eq!(Chip::relative_z_parent().id, ChipId::RelativeZParent);
        assert_ne!(Chip::gpu(), Chip::hwc());
    }
}
