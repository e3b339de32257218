pub mod hierarchy;
pub mod log;
pub mod properties;
pub mod viewer;

pub use hierarchy::HierarchyPresenter;
pub use log::LogPresenter;
pub use properties::PropertiesPresenter;
pub use viewer::ViewerPresenter;
