/// Details panel -- container facts for the selected file.
use crate::state::AppState;
use crate::widgets::size_bar::{percent_of, size_bar};
use egui::Ui;
use streamsleuth_core::model::size::{format_duration, format_size};

/// Draw the details panel for the currently selected file.
pub fn details_panel(ui: &mut Ui, state: &AppState) {
    // Extract theme-adaptive colours once so the panel looks correct in both
    // dark and light mode.
    let color_muted = ui.visuals().weak_text_color();
    let color_normal = ui.visuals().text_color();
    let color_accent = ui.visuals().hyperlink_color;

    let registry = state.registry.read();
    let Some(file) = state.selected_file.and_then(|pos| registry.files().get(pos)) else {
        ui.label(
            egui::RichText::new("Select a file to see details")
                .color(color_muted)
                .italics(),
        );
        return;
    };

    let media_type = file.media_type();
    ui.heading(
        egui::RichText::new(if media_type.is_media() { "🎞" } else { "📄" }).size(16.0),
    );
    ui.add_space(2.0);

    ui.label(
        egui::RichText::new(file.file_name())
            .size(14.0)
            .strong()
            .color(color_normal),
    );
    ui.add_space(4.0);
    ui.label(egui::RichText::new(file.path()).size(11.0).color(color_muted));

    ui.add_space(8.0);
    ui.separator();
    ui.add_space(4.0);

    egui::Grid::new("details_grid")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label(egui::RichText::new("Type:").color(color_muted));
            ui.label(egui::RichText::new(media_type.label()).color(color_normal));
            ui.end_row();

            ui.label(egui::RichText::new("Size:").color(color_muted));
            ui.label(
                egui::RichText::new(format_size(file.size()))
                    .color(color_accent)
                    .strong(),
            );
            ui.end_row();

            if let Some(duration) = file.duration() {
                ui.label(egui::RichText::new("Duration:").color(color_muted));
                ui.label(egui::RichText::new(format_duration(duration)).color(color_normal));
                ui.end_row();
            }

            ui.label(egui::RichText::new("Streams:").color(color_muted));
            ui.label(egui::RichText::new(file.data().len().to_string()).color(color_normal));
            ui.end_row();

            ui.label(egui::RichText::new("Stream bytes:").color(color_muted));
            ui.label(egui::RichText::new(format_size(file.stream_bytes())).color(color_normal));
            ui.end_row();
        });

    // Share of the container accounted for by stream payloads. Only
    // meaningful when the prober reported a container size.
    if file.size() > 0 {
        ui.add_space(6.0);
        let percent = percent_of(file.stream_bytes(), file.size());
        ui.horizontal(|ui| {
            size_bar(ui, percent, 140.0, 10.0);
            ui.label(
                egui::RichText::new(format!("{percent:.1}% streams"))
                    .size(11.0)
                    .color(color_muted),
            );
        });
    }

    ui.add_space(8.0);

    if ui.button("📋 Copy Path").clicked() {
        ui.ctx().copy_text(file.path().to_owned());
    }
}
