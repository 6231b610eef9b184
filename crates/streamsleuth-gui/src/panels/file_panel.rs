/// Left sidebar: every committed file, in drop order.
use crate::state::AppState;
use crate::theme::Palette;
use egui::Ui;
use streamsleuth_core::model::names::shorten_filename;
use streamsleuth_core::model::size::format_size;

/// Characters of file name shown before middle-truncation kicks in.
const NAME_LIMIT: usize = 36;

/// Draw the file list.
pub fn file_panel(ui: &mut Ui, state: &mut AppState) {
    let muted = ui.visuals().weak_text_color();
    let accent = ui.visuals().hyperlink_color;

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Files").strong().color(accent));
        ui.add(
            egui::TextEdit::singleline(&mut state.file_filter)
                .hint_text("Filter by path")
                .desired_width(f32::INFINITY),
        );
    });
    ui.separator();

    let positions = state.filtered_positions();
    if positions.is_empty() {
        let hint = if state.registry.read().is_empty() {
            "Drop media files onto the window."
        } else {
            "No files match the filter."
        };
        ui.label(egui::RichText::new(hint).color(muted).italics());
    } else {
        // Collect rows first so the registry lock is not held while the
        // selection (which borrows state mutably) changes.
        let rows: Vec<(usize, String, String, String, usize)> = {
            let registry = state.registry.read();
            positions
                .iter()
                .filter_map(|&pos| {
                    let file = registry.files().get(pos)?;
                    Some((
                        pos,
                        shorten_filename(file.file_name(), NAME_LIMIT),
                        file.path().to_owned(),
                        format_size(file.size()),
                        file.data().len(),
                    ))
                })
                .collect()
        };

        let mut clicked = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (pos, name, path, size, streams) in &rows {
                    let selected = state.selected_file == Some(*pos);
                    ui.horizontal(|ui| {
                        let response = ui
                            .selectable_label(selected, name.as_str())
                            .on_hover_text(path.as_str());
                        if response.clicked() {
                            clicked = Some(*pos);
                        }
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                ui.label(egui::RichText::new(size).size(11.0).color(muted));
                                ui.label(
                                    egui::RichText::new(format!("{streams} st"))
                                        .size(11.0)
                                        .color(muted),
                                );
                            },
                        );
                    });
                }
            });
        if let Some(pos) = clicked {
            state.select_file(pos);
        }
    }

    if state.show_errors && !state.errors.is_empty() {
        error_list(ui, state);
    }
}

/// Paths that failed to probe, newest last.
fn error_list(ui: &mut Ui, state: &mut AppState) {
    let palette = Palette::for_ui(ui);
    ui.separator();
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(format!("⚠ Failed ({})", state.errors.len()))
                .strong()
                .color(palette.warning),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("Dismiss").clicked() {
                state.errors.clear();
                state.show_errors = false;
            }
        });
    });
    egui::ScrollArea::vertical()
        .id_salt("error_list")
        .max_height(160.0)
        .show(ui, |ui| {
            for (path, message) in &state.errors {
                ui.label(egui::RichText::new(path).size(11.0).strong());
                ui.label(
                    egui::RichText::new(message)
                        .size(11.0)
                        .color(palette.error),
                );
                ui.add_space(2.0);
            }
        });
}
