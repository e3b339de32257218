use serde::{Deserialize, Serialize};

/// Change classification attached to every node by one diff pass.
///
/// Classifications are transient: they are recomputed from scratch on every
/// run of the diff engine, never merged with a previous run's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DiffType {
    /// No change (also the state of every node when diffing is disabled
    /// or no previous snapshot exists).
    #[default]
    None,
    /// Same identity in both snapshots, at least one watched property changed.
    Modified,
    /// Identity exists only in the new snapshot.
    Added,
    /// Identity exists only in the old snapshot (rendered as a tombstone).
    Deleted,
    /// Identity moved here from elsewhere in the old snapshot.
    AddedMove,
    /// Identity left this position; it reappears elsewhere in the new
    /// snapshot (tombstone counterpart of [`DiffType::AddedMove`]).
    DeletedMove,
}

impl DiffType {
    /// Whether this classification reflects a structural change
    /// (add/delete/move) as opposed to a value change.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            Self::Added | Self::Deleted | Self::AddedMove | Self::DeletedMove
        )
    }

    pub fn is_none(self) -> bool {
        self == Self::None
    }
}
