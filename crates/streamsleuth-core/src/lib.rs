/// StreamSleuth Core: drop ingestion, stream probing, and the file model.
///
/// This crate contains all business logic with zero UI dependencies.
/// A host (the egui frontend, a test harness, a CLI) registers a drop hook,
/// forwards drop events, and reads the registry.
///
/// # Modules
///
/// - [`model`]: `Frame`, `MediaFile`, and the ordered `FileRegistry`.
/// - [`probe`]: The `StreamSource` capability and its ffprobe implementation.
/// - [`normalize`]: Raw stream descriptor → `Frame`.
/// - [`ingest`]: Drop ingestion controller with a bounded probing pool.
/// - [`host`]: Drop-hook registration with scoped release.
/// - [`sink`]: Free-form diagnostic sinks.
/// - [`config`]: Ingestion settings.
pub mod config;
pub mod error;
pub mod host;
pub mod ingest;
pub mod model;
pub mod normalize;
pub mod probe;
pub mod sink;

pub use host::DropEvent;
