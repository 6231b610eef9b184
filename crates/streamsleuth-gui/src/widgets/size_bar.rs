/// Proportional size bar widget -- shows a stream's share of its file.
use crate::theme::Palette;
use egui::{Color32, Rect, Ui, Vec2};

/// Draw a horizontal bar filled to `percent`, coloured by magnitude.
pub fn size_bar(ui: &mut Ui, percent: f32, width: f32, height: f32) {
    let palette = Palette::for_ui(ui);
    let fill = palette.bar_color(percent);
    filled_bar(ui, percent, width, height, fill, palette.bar_track);
}

/// Draw a bar with an explicit fill colour (e.g. the stream kind colour).
pub fn tinted_bar(ui: &mut Ui, percent: f32, width: f32, height: f32, fill: Color32) {
    let track = Palette::for_ui(ui).bar_track;
    filled_bar(ui, percent, width, height, fill, track);
}

fn filled_bar(ui: &mut Ui, percent: f32, width: f32, height: f32, fill: Color32, track: Color32) {
    let (rect, _response) = ui.allocate_exact_size(Vec2::new(width, height), egui::Sense::hover());
    let painter = ui.painter_at(rect);

    painter.rect_filled(rect, 2.0, track);

    let fill_w = width * (percent / 100.0).clamp(0.0, 1.0);
    if fill_w > 0.5 {
        let fill_rect = Rect::from_min_size(rect.min, Vec2::new(fill_w, height));
        painter.rect_filled(fill_rect, 2.0, fill);
    }
}

/// Percentage of `part` in `whole`; `0.0` when `whole` is zero.
pub fn percent_of(part: u64, whole: u64) -> f32 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64 * 100.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::percent_of;

    #[test]
    fn percent_of_handles_zero_total() {
        assert_eq!(percent_of(10, 0), 0.0);
        assert_eq!(percent_of(0, 0), 0.0);
    }

    #[test]
    fn percent_of_share() {
        assert_eq!(percent_of(25, 100), 25.0);
        assert_eq!(percent_of(100, 100), 100.0);
    }
}
