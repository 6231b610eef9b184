//! StreamSleuth application icon generator.
//!
//! Produces a procedural icon: a film strip with sprocket
//! holes and three coloured stream bands (video, audio, subtitle), with a
//! play triangle on top. Rendered at any resolution as RGBA pixels for the
//! window icon.

/// Generate the StreamSleuth icon as egui `IconData`.
pub fn generate_icon(size: u32) -> egui::IconData {
    let rgba = render_icon(size);
    egui::IconData {
        rgba,
        width: size,
        height: size,
    }
}

/// Render the icon into an RGBA pixel buffer (top-to-bottom row order).
pub fn render_icon(size: u32) -> Vec<u8> {
    let s = size as f32;
    let mut pixels = vec![0u8; (size * size * 4) as usize];

    // ── Layout ──────────────────────────────────────────────────
    let strip = Rect {
        x0: s * 0.08,
        y0: s * 0.16,
        x1: s * 0.92,
        y1: s * 0.84,
    };
    let corner = s * 0.08;

    // Sprocket rows sit inside the top and bottom margins of the strip.
    let margin = (strip.y1 - strip.y0) * 0.18;
    let hole_w = s * 0.07;
    let hole_h = margin * 0.5;
    let holes = 6;
    let pitch = (strip.x1 - strip.x0) / holes as f32;

    // Stream bands fill the area between the sprocket rows.
    let inner_y0 = strip.y0 + margin;
    let inner_y1 = strip.y1 - margin;
    let band_h = (inner_y1 - inner_y0) / 3.0;
    let bands: [[u8; 3]; 3] = [
        [0x89, 0xb4, 0xfa], // video
        [0xa6, 0xe3, 0xa1], // audio
        [0xf9, 0xe2, 0xaf], // subtitle
    ];

    // Play triangle centred on the strip.
    let tri_cx = s * 0.5;
    let tri_cy = (inner_y0 + inner_y1) * 0.5;
    let tri_r = band_h * 1.05;
    let tri = [
        (tri_cx - tri_r * 0.6, tri_cy - tri_r),
        (tri_cx - tri_r * 0.6, tri_cy + tri_r),
        (tri_cx + tri_r * 0.9, tri_cy),
    ];

    // ── Per-pixel rendering ─────────────────────────────────────
    for y in 0..size {
        for x in 0..size {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;

            let body = smooth_edge(rounded_rect_dist(px, py, &strip, corner), 0.0);
            if body <= 0.0 {
                continue;
            }

            let mut c = [0x2a_u8, 0x2a, 0x3c];

            if py >= inner_y0 && py < inner_y1 {
                let band = (((py - inner_y0) / band_h) as usize).min(2);
                // Bands darken slightly to the right like a timeline fade.
                let fade = 1.0 - 0.25 * ((px - strip.x0) / (strip.x1 - strip.x0));
                c = bands[band].map(|v| (v as f32 * fade) as u8);
            } else {
                // Sprocket holes punch through the strip.
                let slot = ((px - strip.x0) / pitch).floor();
                let hole_cx = strip.x0 + (slot + 0.5) * pitch;
                let hole_cy = if py < inner_y0 {
                    strip.y0 + margin * 0.5
                } else {
                    strip.y1 - margin * 0.5
                };
                let hole = Rect {
                    x0: hole_cx - hole_w * 0.5,
                    y0: hole_cy - hole_h * 0.5,
                    x1: hole_cx + hole_w * 0.5,
                    y1: hole_cy + hole_h * 0.5,
                };
                let punched = smooth_edge(rounded_rect_dist(px, py, &hole, hole_h * 0.3), 0.0);
                if punched >= 1.0 {
                    continue;
                }
                let idx = ((y * size + x) * 4) as usize;
                pixels[idx..idx + 3].copy_from_slice(&c);
                pixels[idx + 3] = (body * (1.0 - punched) * 255.0) as u8;
                continue;
            }

            // Play triangle with a thin dark outline.
            let td = triangle_dist(px, py, &tri);
            let fill = smooth_edge(td, 0.0);
            let outline = smooth_edge(td, s * 0.025) - fill;
            c = c.map(|v| lerp_c(v, 0x1e, outline));
            c = c.map(|v| lerp_c(v, 0xf5, fill));

            let idx = ((y * size + x) * 4) as usize;
            pixels[idx..idx + 3].copy_from_slice(&c);
            pixels[idx + 3] = (body * 255.0) as u8;
        }
    }

    pixels
}

// ── Helpers ─────────────────────────────────────────────────────

struct Rect {
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
}

/// Signed distance to a rounded rectangle (negative inside).
fn rounded_rect_dist(px: f32, py: f32, r: &Rect, radius: f32) -> f32 {
    let cx = (r.x0 + r.x1) * 0.5;
    let cy = (r.y0 + r.y1) * 0.5;
    let hx = (r.x1 - r.x0) * 0.5 - radius;
    let hy = (r.y1 - r.y0) * 0.5 - radius;
    let qx = (px - cx).abs() - hx;
    let qy = (py - cy).abs() - hy;
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    outside + qx.max(qy).min(0.0) - radius
}

/// Signed distance to a triangle given clockwise or anticlockwise vertices.
fn triangle_dist(px: f32, py: f32, t: &[(f32, f32); 3]) -> f32 {
    let mut inside = true;
    let mut best = f32::MAX;
    for i in 0..3 {
        let (ax, ay) = t[i];
        let (bx, by) = t[(i + 1) % 3];
        best = best.min(point_to_seg_dist(px, py, ax, ay, bx, by));
        let cross = (bx - ax) * (py - ay) - (by - ay) * (px - ax);
        let (cx, cy) = t[(i + 2) % 3];
        let ref_cross = (bx - ax) * (cy - ay) - (by - ay) * (cx - ax);
        if cross * ref_cross < 0.0 {
            inside = false;
        }
    }
    if inside {
        -best
    } else {
        best
    }
}

/// Smooth anti-aliased edge (1 -> 0 as `dist` crosses `edge`).
fn smooth_edge(dist: f32, edge: f32) -> f32 {
    (0.5 - (dist - edge) * 0.5).clamp(0.0, 1.0)
}

/// Perpendicular distance from a point to a line segment.
fn point_to_seg_dist(px: f32, py: f32, ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let abx = bx - ax;
    let aby = by - ay;
    let len_sq = abx * abx + aby * aby;
    if len_sq < 0.0001 {
        return ((px - ax).powi(2) + (py - ay).powi(2)).sqrt();
    }
    let t = (((px - ax) * abx + (py - ay) * aby) / len_sq).clamp(0.0, 1.0);
    ((px - (ax + t * abx)).powi(2) + (py - (ay + t * aby)).powi(2)).sqrt()
}

/// Linear interpolation for a single colour channel.
fn lerp_c(a: u8, b: u8, t: f32) -> u8 {
    let t = t.clamp(0.0, 1.0);
    (a as f32 * (1.0 - t) + b as f32 * t).clamp(0.0, 255.0) as u8
}
