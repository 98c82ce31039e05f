//! Vault Local - file-backed local storage
//!
//! This crate implements the RecordStore trait on top of a directory of
//! key-value slot files, and manages the images imported into the vault.

mod client;
mod db;
mod images;

// Re-export the client (implements RecordStore)
pub use client::LocalStorageClient;
// Re-export the slot store for callers that need raw access
pub use db::KeyValueDir;
pub use images::{format_storage_size, ImageVault, StorageStats, IMAGES_DIR};
