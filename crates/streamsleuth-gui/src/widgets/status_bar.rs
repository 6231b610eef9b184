/// Bottom status bar -- probe progress and totals.
use crate::state::{AppPhase, AppState};
use crate::theme::Palette;
use streamsleuth_core::model::size::{format_count, format_size};
use egui::Ui;

/// Draw the status bar at the bottom of the window.
pub fn status_bar(ui: &mut Ui, state: &AppState) {
    let palette = Palette::for_ui(ui);
    let color_accent = ui.visuals().hyperlink_color;
    let color_weak = ui.visuals().weak_text_color();
    let color_normal = ui.visuals().text_color();

    // Registry totals are read once per frame.
    let (file_count, frame_count, total_size) = {
        let registry = state.registry.read();
        let size = registry.files().iter().map(|f| f.size()).sum::<u64>();
        (registry.len(), registry.total_frames(), size)
    };

    ui.horizontal(|ui| {
        match state.phase {
            AppPhase::Idle => {
                let text = if file_count == 0 {
                    "Ready -- drop media files onto the window"
                } else {
                    "Ready"
                };
                ui.label(egui::RichText::new(text).size(12.0).color(color_weak));
            }
            AppPhase::Probing => {
                ui.spinner();
                ui.label(
                    egui::RichText::new(format!(
                        "Probing {} path(s)...",
                        format_count(state.pending_paths as u64)
                    ))
                    .size(12.0)
                    .color(color_normal),
                );
            }
            AppPhase::Stopped => {
                ui.label(
                    egui::RichText::new("⏹ Stopped -- drops are ignored")
                        .size(12.0)
                        .color(palette.warning),
                );
            }
        }

        ui.separator();
        ui.label(
            egui::RichText::new(format!("{} files", format_count(file_count as u64)))
                .size(12.0)
                .color(color_normal),
        );
        ui.separator();
        ui.label(
            egui::RichText::new(format!("{} streams", format_count(frame_count as u64)))
                .size(12.0)
                .color(color_normal),
        );
        ui.separator();
        ui.label(
            egui::RichText::new(format_size(total_size))
                .size(12.0)
                .color(color_accent),
        );

        if state.files_replaced > 0 {
            ui.separator();
            ui.label(
                egui::RichText::new(format!(
                    "{} replaced",
                    format_count(state.files_replaced)
                ))
                .size(12.0)
                .color(color_weak),
            );
        }

        if state.files_failed > 0 {
            ui.separator();
            ui.label(
                egui::RichText::new(format!("{} failed", format_count(state.files_failed)))
                    .size(12.0)
                    .color(palette.warning),
            );
        }

        if let Some(batch) = state.last_batch {
            ui.separator();
            let color = if batch.failed == 0 {
                palette.success
            } else {
                color_weak
            };
            ui.label(
                egui::RichText::new(format!(
                    "last drop: {}/{} in {:.1}s",
                    batch.committed,
                    batch.committed + batch.failed,
                    batch.duration.as_secs_f64()
                ))
                .size(12.0)
                .color(color),
            );
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let color = if state.probe_available {
                color_weak
            } else {
                palette.error
            };
            ui.label(
                egui::RichText::new(&state.probe_label)
                    .size(11.0)
                    .color(color),
            );
        });
    });
}
