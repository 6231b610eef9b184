/// Central panel: the normalised streams of the selected file.
use crate::state::AppState;
use crate::theme::Palette;
use crate::widgets::size_bar::{percent_of, tinted_bar};
use egui::Ui;
use egui_extras::{Column, TableBuilder};
use streamsleuth_core::model::size::format_size;
use streamsleuth_core::model::Frame;

const ROW_HEIGHT: f32 = 22.0;

/// Draw the stream table.
pub fn streams_panel(ui: &mut Ui, state: &mut AppState) {
    let muted = ui.visuals().weak_text_color();

    // Copy what the table needs so the registry lock is released before
    // rendering; the commit thread may be waiting to write.
    let selected = {
        let registry = state.registry.read();
        state
            .selected_file
            .and_then(|pos| registry.files().get(pos))
            .map(|f| (f.file_name().to_owned(), f.data().to_vec(), f.stream_bytes()))
    };

    let Some((name, frames, total_bytes)) = selected else {
        ui.centered_and_justified(|ui| {
            ui.label(
                egui::RichText::new("Drop media files onto the window to list their streams.")
                    .size(13.0)
                    .color(muted),
            );
        });
        return;
    };

    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(name)
                .strong()
                .color(ui.visuals().hyperlink_color),
        );
        ui.label(
            egui::RichText::new(format!("{} stream(s)", frames.len()))
                .size(11.0)
                .color(muted),
        );
    });
    ui.separator();

    if frames.is_empty() {
        ui.label(
            egui::RichText::new("The prober reported no streams for this file.")
                .color(muted)
                .italics(),
        );
        return;
    }

    let palette = Palette::for_ui(ui);
    let mut clicked = None;

    TableBuilder::new(ui)
        .striped(true)
        .sense(egui::Sense::click())
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(70.0)) // Key
        .column(Column::auto().at_least(70.0)) // Kind
        .column(Column::remainder()) // Detail
        .column(Column::auto().at_least(80.0)) // Bytes
        .column(Column::exact(120.0)) // Share
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Key");
            });
            header.col(|ui| {
                ui.strong("Kind");
            });
            header.col(|ui| {
                ui.strong("Detail");
            });
            header.col(|ui| {
                ui.strong("Bytes");
            });
            header.col(|ui| {
                ui.strong("Share");
            });
        })
        .body(|mut body| {
            for (i, frame) in frames.iter().enumerate() {
                body.row(ROW_HEIGHT, |mut row| {
                    row.set_selected(state.selected_stream == Some(i));
                    stream_row(&mut row, frame, total_bytes, &palette);
                    if row.response().clicked() {
                        clicked = Some(i);
                    }
                });
            }
        });

    if let Some(i) = clicked {
        state.selected_stream = if state.selected_stream == Some(i) {
            None
        } else {
            Some(i)
        };
    }
}

fn stream_row(
    row: &mut egui_extras::TableRow<'_, '_>,
    frame: &Frame,
    total_bytes: u64,
    palette: &Palette,
) {
    let detail = frame.detail();
    let color = palette.stream_color(detail);

    row.col(|ui| {
        ui.monospace(frame.key());
    });
    row.col(|ui| {
        ui.label(egui::RichText::new(detail.label()).color(color));
    });
    row.col(|ui| {
        ui.label(detail.to_string());
    });
    row.col(|ui| {
        let text = if frame.bytes() == 0 {
            "-".to_owned()
        } else {
            format_size(u64::from(frame.bytes()))
        };
        ui.label(text);
    });
    row.col(|ui| {
        let percent = percent_of(u64::from(frame.bytes()), total_bytes);
        tinted_bar(ui, percent, 100.0, 10.0, color);
    });
}
