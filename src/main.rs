//! StreamSleuth: drop media files onto a window and inspect their streams.
//!
//! Thin binary entry point. All logic lives in the `streamsleuth-core`
//! and `streamsleuth-gui` crates.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use streamsleuth_core::config::IngestConfig;

/// Set to any value to log at `DEBUG` instead of `INFO`.
const DEBUG_ENV: &str = "STREAMSLEUTH_DEBUG";

fn main() -> anyhow::Result<()> {
    // Initialise structured logging.
    let level = if std::env::var_os(DEBUG_ENV).is_some() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    tracing::info!("StreamSleuth starting");

    let config = IngestConfig::load()?;

    let icon = streamsleuth_gui::icon::generate_icon(64);

    // Build application state *before* opening the window so the probe
    // pool is running and the drop hook is attached when the first frame
    // (and the first possible drop) arrives.
    let state = streamsleuth_gui::StreamSleuthState::build(&config)?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("StreamSleuth -- Media Stream Inspector")
            .with_inner_size([1200.0, 760.0])
            .with_min_inner_size([760.0, 480.0])
            .with_icon(icon)
            .with_drag_and_drop(true)
            // Prevents Windows from filling the window with white before the
            // first OpenGL frame is rendered.
            .with_transparent(true),
        ..Default::default()
    };

    eframe::run_native(
        "StreamSleuth",
        options,
        Box::new(|cc| {
            Ok(Box::new(streamsleuth_gui::StreamSleuthApp::with_state(
                cc, state,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    tracing::info!("StreamSleuth exiting");
    Ok(())
}
