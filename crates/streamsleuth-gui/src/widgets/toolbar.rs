/// Top action bar -- drop hook toggle, panel toggles, theme and branding.
use crate::state::{AppPhase, AppState};
use crate::theme::Palette;
use egui::Ui;

/// Draw the toolbar.
pub fn toolbar(ui: &mut Ui, state: &mut AppState) {
    let palette = Palette::for_ui(ui);

    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new("🎞 StreamSleuth")
                .size(18.0)
                .strong()
                .color(ui.visuals().hyperlink_color),
        );

        ui.separator();

        // Drop hook toggle. Disabled once the controller has stopped since
        // a re-attached hook would have nothing to deliver to.
        let attached = state.is_drop_hook_attached();
        let can_toggle = state.phase != AppPhase::Stopped;
        let hook_label = if attached {
            egui::RichText::new("📥 Accepting drops").color(palette.success)
        } else {
            egui::RichText::new("📥 Drops paused").color(palette.warning)
        };
        if ui
            .add_enabled(can_toggle, egui::Button::new(hook_label))
            .on_hover_text(if attached {
                "Stop routing window drops to the prober"
            } else {
                "Resume routing window drops to the prober"
            })
            .clicked()
        {
            if attached {
                state.detach_drop_hook();
            } else if let Err(e) = state.attach_drop_hook() {
                tracing::warn!("could not attach drop hook: {e}");
            }
        }

        // Errors toggle, only when something failed.
        if !state.errors.is_empty() {
            let label = egui::RichText::new(format!("⚠ {}", state.errors.len()))
                .color(palette.warning);
            if ui
                .button(label)
                .on_hover_text("Show paths that could not be probed")
                .clicked()
            {
                state.show_errors = !state.show_errors;
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("ℹ").on_hover_text("About StreamSleuth").clicked() {
                state.show_about = true;
            }

            // ── Theme toggle (☀ light / 🌙 dark) ──────────────────
            let theme_label = if state.dark_mode { "☀" } else { "🌙" };
            let theme_tip = if state.dark_mode {
                "Switch to light mode"
            } else {
                "Switch to dark mode"
            };
            if ui.button(theme_label).on_hover_text(theme_tip).clicked() {
                state.dark_mode = !state.dark_mode;
            }

            ui.separator();

            // ── Log panel toggle ──────────────────────────────────
            let log_tip = if state.show_log_panel {
                "Hide the log panel"
            } else {
                "Show the log panel"
            };
            if ui
                .selectable_label(state.show_log_panel, "📝 Log")
                .on_hover_text(log_tip)
                .clicked()
            {
                state.show_log_panel = !state.show_log_panel;
            }

            if !state.probe_available {
                ui.separator();
                ui.label(
                    egui::RichText::new("ffprobe missing")
                        .size(11.0)
                        .color(palette.error),
                )
                .on_hover_text(state.probe_label.as_str());
            }
        });
    });
}
