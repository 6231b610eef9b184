/// StreamSleuth GUI: egui-based desktop host.
///
/// This crate owns the window and turns its file drops into drop events.
/// Probing, normalisation and the registry live in `streamsleuth-core`.
pub mod app;
pub mod icon;
pub mod panels;
pub mod state;
pub mod theme;
pub mod widgets;

pub use app::{StreamSleuthApp, StreamSleuthState};
