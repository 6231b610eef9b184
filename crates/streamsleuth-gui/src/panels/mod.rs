/// Panels composed by the main window.

pub mod details_panel;
pub mod file_panel;
pub mod log_panel;
pub mod streams_panel;
