/// Main `eframe::App` implementation for StreamSleuth.
///
/// This is the top-level UI layout that composes all panels and widgets,
/// and the point where the window's file drops enter the core.
use crate::panels;
use crate::state::{AppPhase, AppState};
use crate::widgets;
use streamsleuth_core::config::IngestConfig;
use streamsleuth_core::error::IngestError;
use streamsleuth_core::host::DropEvent;

/// Pre-built application state.
///
/// Construct this **before** calling `eframe::run_native` so that the
/// probe pool and commit thread are running (and the drop hook attached)
/// before the OS window is created.
pub struct StreamSleuthState {
    pub(crate) inner: AppState,
}

impl StreamSleuthState {
    /// Start ingestion with ffprobe and attach the drop hook.
    /// Call this before `eframe::run_native`.
    pub fn build(config: &IngestConfig) -> Result<Self, IngestError> {
        Ok(Self {
            inner: AppState::new(config)?,
        })
    }

    pub fn from_state(inner: AppState) -> Self {
        Self { inner }
    }
}

/// The StreamSleuth application.
pub struct StreamSleuthApp {
    state: AppState,
}

impl StreamSleuthApp {
    /// Create a new application instance from pre-built state.
    ///
    /// The state should have been constructed by [`StreamSleuthState::build()`]
    /// *before* `eframe::run_native` is called.
    pub fn with_state(cc: &eframe::CreationContext<'_>, state: StreamSleuthState) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Self { state: state.inner }
    }

    /// Forward files hovering over or dropped onto the window.
    fn handle_window_drops(&mut self, ctx: &egui::Context) {
        let (hovered, dropped, pointer) = ctx.input(|i| {
            (
                i.raw.hovered_files.len(),
                i.raw.dropped_files.clone(),
                i.pointer.latest_pos(),
            )
        });
        self.state.hovered_files = hovered;

        let paths = dropped_paths(&dropped);
        if paths.is_empty() {
            return;
        }
        let (x, y) = pointer
            .map(|p| (p.x.round() as i32, p.y.round() as i32))
            .unwrap_or((0, 0));
        if !self.state.deliver_drop(DropEvent::new(x, y, paths)) {
            tracing::debug!("window drop ignored: hook detached");
        }
    }
}

impl eframe::App for StreamSleuthApp {
    /// Override the GPU clear colour to match the active theme background,
    /// preventing a colour mismatch flash between frames.
    fn clear_color(&self, visuals: &egui::Visuals) -> [f32; 4] {
        let [r, g, b, a] = visuals.panel_fill.to_array();
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Apply theme ───────────────────────────────────────────────────
        if self.state.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // ── Window drops and background messages ──────────────────────────
        self.handle_window_drops(ctx);
        let _data_changed = self.state.process_ingest_messages();

        // Keep polling while probes are in flight.
        if self.state.phase == AppPhase::Probing {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        // ── Top toolbar ───────────────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .min_height(36.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                widgets::toolbar::toolbar(ui, &mut self.state);
                ui.add_space(4.0);
            });

        // ── About dialog ──────────────────────────────────────────────────
        let mut show_about = self.state.show_about;
        egui::Window::new("About StreamSleuth")
            .open(&mut show_about)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([340.0, 0.0])
            .show(ctx, |ui| {
                let accent = ui.visuals().hyperlink_color;
                let muted = ui.visuals().weak_text_color();
                let normal = ui.visuals().text_color();

                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new("🎞 StreamSleuth")
                            .size(24.0)
                            .strong()
                            .color(accent),
                    );
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                            .size(13.0)
                            .color(muted),
                    );
                    ui.add_space(12.0);
                    ui.label(
                        egui::RichText::new(
                            "Drop media files onto the window to list\n\
                             their streams, probed with ffprobe.",
                        )
                        .size(12.0)
                        .color(normal),
                    );
                    ui.add_space(12.0);
                    ui.separator();
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new(&self.state.probe_label)
                            .size(11.0)
                            .color(muted),
                    );
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new("Built with Rust & egui")
                            .size(11.0)
                            .color(muted),
                    );
                    ui.add_space(8.0);
                });
            });
        self.state.show_about = show_about;

        // ── Bottom status bar ─────────────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(24.0)
            .show(ctx, |ui| {
                ui.add_space(2.0);
                widgets::status_bar::status_bar(ui, &self.state);
                ui.add_space(2.0);
            });

        // ── Sink log panel (optional bottom panel) ────────────────────────
        if self.state.show_log_panel {
            egui::TopBottomPanel::bottom("log_panel")
                .resizable(true)
                .default_height(180.0)
                .min_height(100.0)
                .max_height(500.0)
                .show(ctx, |ui| {
                    ui.add_space(4.0);
                    panels::log_panel::log_panel(ui, &mut self.state);
                    ui.add_space(4.0);
                });
        }

        // ── Left sidebar: dropped files ───────────────────────────────────
        egui::SidePanel::left("file_panel")
            .default_width(320.0)
            .min_width(220.0)
            .max_width(600.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::file_panel::file_panel(ui, &mut self.state);
            });

        // ── Right details panel ───────────────────────────────────────────
        egui::SidePanel::right("details_panel")
            .default_width(240.0)
            .min_width(180.0)
            .max_width(360.0)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    panels::details_panel::details_panel(ui, &self.state);
                });
            });

        // ── Central panel: stream table ───────────────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::streams_panel::streams_panel(ui, &mut self.state);
        });

        // ── Drop overlay (above everything while files hover) ─────────────
        if self.state.hovered_files > 0 {
            widgets::drop_overlay::drop_overlay(ctx, &self.state);
        }
    }
}

/// Filesystem paths of dropped files. Entries without a path (web-style
/// drops carry only a name) cannot be probed and are skipped.
pub(crate) fn dropped_paths(files: &[egui::DroppedFile]) -> Vec<String> {
    files
        .iter()
        .filter_map(|f| f.path.as_ref())
        .map(|p| p.to_string_lossy().into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn named(name: &str, path: Option<&str>) -> egui::DroppedFile {
        egui::DroppedFile {
            path: path.map(PathBuf::from),
            name: name.to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn drops_without_a_path_are_skipped() {
        let files = [
            named("movie.mkv", Some("/media/movie.mkv")),
            named("song.flac", None),
            named("", None),
            named("clip.mp4", Some("/media/clip.mp4")),
        ];
        assert_eq!(dropped_paths(&files), ["/media/movie.mkv", "/media/clip.mp4"]);
    }

    #[test]
    fn name_only_drop_yields_nothing() {
        assert!(dropped_paths(&[named("song.flac", None)]).is_empty());
    }
}
