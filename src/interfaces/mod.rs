pub mod components;
pub mod design_system;
pub mod ui;

pub use ui::{ChartViewer, show_charts};
