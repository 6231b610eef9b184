/// UI widgets for StreamSleuth.

pub mod drop_overlay;
pub mod size_bar;
pub mod status_bar;
pub mod toolbar;
