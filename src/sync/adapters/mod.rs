//! Adapters for the synchronisation ports.
//!
//! - [`memory::InMemoryCardAssociationStore`]: thread-safe association
//!   storage for tests and single-process hosts
//! - [`renderer::FieldMapRenderer`]: `minijinja` rendering over per-record
//!   field maps
//! - [`settings_file::load_settings`]: reads persisted
//!   [`crate::sync::domain::SyncSettings`] from a JSON file

pub mod memory;
pub mod renderer;
pub mod settings_file;

pub use memory::InMemoryCardAssociationStore;
pub use renderer::FieldMapRenderer;
pub use settings_file::{SettingsFileError, load_settings};
