pub mod chip;
pub mod diff;
pub mod filter;
pub mod hierarchy;
pub mod log;
pub mod options;
pub mod property;
pub mod view;

pub use chip::{Chip, ChipId};
pub use diff::DiffType;
pub use filter::{FilterFlag, TextFilter};
pub use hierarchy::{CompositionType, HierarchyNode, NodeFlags};
pub use log::{ColumnSpec, FieldValue, LogEntry, LogFieldValue, LogFilter, LogHeader};
pub use options::{HierarchyOptions, OptionState, PropertiesOptions, RectsOptions};
pub use property::{PropertyNode, PropertySource, PropertyValue};
pub use view::{LogViewData, ViewerData};
