/// Full-window hint drawn while files hover over the window.
use crate::state::AppState;
use crate::theme::Palette;

pub fn drop_overlay(ctx: &egui::Context, state: &AppState) {
    let palette = Palette::for_dark_mode(state.dark_mode);
    let screen = ctx.screen_rect();
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("drop_overlay"),
    ));

    painter.rect_filled(screen, 0.0, palette.overlay);

    let accent = ctx.style().visuals.hyperlink_color;
    let frame = screen.shrink(24.0);
    painter.rect_stroke(
        frame,
        8.0,
        egui::Stroke::new(2.0, accent),
        egui::StrokeKind::Inside,
    );

    let text = if state.is_drop_hook_attached() {
        format!("Drop {} file(s) to probe", state.hovered_files)
    } else {
        "Drops are paused".to_owned()
    };
    painter.text(
        screen.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(22.0),
        accent,
    );
}
