/// Colour palette for StreamSleuth.
///
/// Panels and widgets take colours from here so stream kinds and size
/// bars look the same everywhere, in both dark and light mode.
use egui::Color32;
use streamsleuth_core::model::StreamDetail;

/// Semantic colours for the active mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub video: Color32,
    pub audio: Color32,
    pub subtitle: Color32,
    pub data: Color32,
    pub error: Color32,
    pub warning: Color32,
    pub success: Color32,
    pub bar_track: Color32,
    pub bar_small: Color32,
    pub bar_large: Color32,
    pub overlay: Color32,
}

impl Palette {
    /// Dark palette, the default.
    pub fn dark() -> Self {
        Self {
            video: Color32::from_rgb(0x89, 0xb4, 0xfa),
            audio: Color32::from_rgb(0xa6, 0xe3, 0xa1),
            subtitle: Color32::from_rgb(0xf9, 0xe2, 0xaf),
            data: Color32::from_rgb(0x6c, 0x70, 0x86),
            error: Color32::from_rgb(0xf3, 0x8b, 0xa8),
            warning: Color32::from_rgb(0xfa, 0xb3, 0x87),
            success: Color32::from_rgb(0xa6, 0xe3, 0xa1),
            bar_track: Color32::from_rgb(0x2a, 0x2a, 0x3c),
            bar_small: Color32::from_rgb(0xa6, 0xe3, 0xa1),
            bar_large: Color32::from_rgb(0xf3, 0x8b, 0xa8),
            overlay: Color32::from_rgba_unmultiplied(0x1e, 0x1e, 0x2e, 0xd0),
        }
    }

    pub fn light() -> Self {
        Self {
            video: Color32::from_rgb(0x3a, 0x6f, 0xd8),
            audio: Color32::from_rgb(0x30, 0x98, 0x30),
            subtitle: Color32::from_rgb(0xc0, 0x98, 0x20),
            data: Color32::from_rgb(0x8a, 0x8a, 0x9a),
            error: Color32::from_rgb(0xd0, 0x40, 0x50),
            warning: Color32::from_rgb(0xd0, 0x80, 0x20),
            success: Color32::from_rgb(0x30, 0x98, 0x30),
            bar_track: Color32::from_rgb(0xe8, 0xe8, 0xef),
            bar_small: Color32::from_rgb(0x60, 0xb0, 0x60),
            bar_large: Color32::from_rgb(0xd0, 0x50, 0x60),
            overlay: Color32::from_rgba_unmultiplied(0xf5, 0xf5, 0xf5, 0xd0),
        }
    }

    /// Palette matching the visuals currently applied to `ui`.
    pub fn for_ui(ui: &egui::Ui) -> Self {
        Self::for_dark_mode(ui.visuals().dark_mode)
    }

    pub fn for_dark_mode(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Colour used for a stream's kind label and bar.
    pub fn stream_color(&self, detail: &StreamDetail) -> Color32 {
        match detail {
            StreamDetail::Video { .. } => self.video,
            StreamDetail::Audio { .. } => self.audio,
            StreamDetail::Subtitle { .. } => self.subtitle,
            StreamDetail::Data { .. } => self.data,
        }
    }

    /// Interpolate between `bar_small` and `bar_large` for a percentage
    /// in `0.0..=100.0`.
    pub fn bar_color(&self, percent: f32) -> Color32 {
        lerp_color(self.bar_small, self.bar_large, percent / 100.0)
    }
}

fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    Color32::from_rgb(
        (a.r() as f32 * (1.0 - t) + b.r() as f32 * t) as u8,
        (a.g() as f32 * (1.0 - t) + b.g() as f32 * t) as u8,
        (a.b() as f32 * (1.0 - t) + b.b() as f32 * t) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use compact_str::CompactString;

    #[test]
    fn bar_color_endpoints() {
        let p = Palette::dark();
        assert_eq!(p.bar_color(0.0), p.bar_small);
        assert_eq!(p.bar_color(100.0), p.bar_large);
        // Out-of-range input clamps.
        assert_eq!(p.bar_color(250.0), p.bar_large);
        assert_eq!(p.bar_color(-5.0), p.bar_small);
    }

    #[test]
    fn stream_colours_follow_kind() {
        let p = Palette::light();
        let audio = StreamDetail::Audio {
            codec: CompactString::new("aac"),
            sample_rate: None,
            channels: None,
            bit_rate: None,
        };
        let data = StreamDetail::Data {
            codec: CompactString::new("bin_data"),
        };
        assert_eq!(p.stream_color(&audio), p.audio);
        assert_eq!(p.stream_color(&data), p.data);
    }
}
