//! Diff-and-presentation engine for hierarchical trace snapshots.
//!
//! The engine turns a sequence of timestamped hierarchy snapshots into
//! annotated display trees: structural diffing against the previous
//! snapshot, a chain of tree transformations (flatten, chips, name
//! simplification, filtering), and presenter state machines that track the
//! current position, selection, and pinned nodes for a rendering layer.

pub mod diff;
pub mod filter;
pub mod node;
pub mod ops;
pub mod parsers;
pub mod presenters;
pub mod source;

pub use diff::{HierarchyModifiedCheck, ModifiedCheck, PropertyModifiedCheck, diff_trees};
pub use filter::CompiledFilter;
pub use node::DiffNode;
pub use ops::{AddChips, Filter, FlattenChildren, Operation, SimplifyNames, TreeFormatter};
pub use parsers::{ParseError, TraceFile, parse_auto};
pub use presenters::{HierarchyPresenter, LogPresenter, PropertiesPresenter, ViewerPresenter};
pub use source::{InMemorySource, Snapshot, SourceError, TraceSource};
