//! Vault Types - shared record model and storage trait
//!
//! Storage backends implement [`RecordStore`]; the CLI only talks to the trait.

mod error;
mod models;
mod storage;

pub use error::VaultError;
pub use models::{Meme, MemeBuilder, OgMetadata};
pub use storage::{RecordStore, StorageConfig, DEFAULT_STORAGE_KEY};
