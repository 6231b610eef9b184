/// Log panel.
///
/// Shows the lines written to the in-memory log sink (`OnFileDrop:`,
/// `Stream:`, `Error:` and `Replaced:`), newest at the bottom. Rendered as
/// a bottom panel when `state.show_log_panel` is `true`.
use crate::state::AppState;
use crate::theme::Palette;
use egui::Ui;
use streamsleuth_core::model::names::truncate_middle;
use streamsleuth_core::model::size::format_count;

/// Most recent lines rendered per frame.
const MAX_VISIBLE_LINES: usize = 500;

/// Draw the log panel.
pub fn log_panel(ui: &mut Ui, state: &mut AppState) {
    let palette = Palette::for_ui(ui);
    let accent = ui.visuals().hyperlink_color;
    let muted = ui.visuals().weak_text_color();
    let text_col = ui.visuals().text_color();

    ui.vertical(|ui| {
        // ── Header row ────────────────────────────────────────────────────
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("📝 Log").strong().color(accent));
            ui.separator();
            ui.label(
                egui::RichText::new(format!(
                    "{} lines logged, last {} kept",
                    format_count(state.log.total_logged()),
                    format_count(state.log.capacity() as u64)
                ))
                .size(11.0)
                .color(muted),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button("🗑 Clear")
                    .on_hover_text("Clear the retained log lines")
                    .clicked()
                {
                    state.log.clear();
                }
            });
        });

        ui.separator();

        // ── Content ──────────────────────────────────────────────────────
        let lines = state.log.lines();
        if lines.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new("Nothing logged yet. Drop files onto the window.")
                        .size(12.0)
                        .color(muted),
                );
            });
            return;
        }

        let skip = lines.len().saturating_sub(MAX_VISIBLE_LINES);
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if skip > 0 {
                    ui.label(
                        egui::RichText::new(format!("… {} older lines not shown", skip))
                            .size(11.0)
                            .color(muted),
                    );
                }
                for line in lines.iter().skip(skip) {
                    let color = if line.message.starts_with("Error:") {
                        palette.error
                    } else if line.message.starts_with("Replaced:") {
                        palette.warning
                    } else if line.message.starts_with("OnFileDrop:") {
                        accent
                    } else {
                        text_col
                    };
                    // Approximate 7 px per character at 12 px monospace.
                    let avail_chars = ((ui.available_width() / 7.0).max(40.0)) as usize - 10;
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(line.at.format("%H:%M:%S").to_string())
                                .size(11.0)
                                .monospace()
                                .color(muted),
                        );
                        ui.label(
                            egui::RichText::new(truncate_middle(&line.message, avail_chars))
                                .size(12.0)
                                .monospace()
                                .color(color),
                        )
                        .on_hover_text(line.message.as_str());
                    });
                }
            });
    });
}
