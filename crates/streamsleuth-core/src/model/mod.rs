/// Data model for dropped files and their streams.
///
/// Re-exports the file registry and the types it stores.
pub mod frame;
pub mod media_file;
pub mod media_type;
pub mod names;
pub mod registry;
pub mod size;

pub use frame::{Frame, StreamDetail};
pub use media_file::MediaFile;
pub use media_type::MediaType;
pub use registry::{AppendOutcome, FileRegistry, SharedRegistry};
