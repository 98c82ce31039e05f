//! Meme Vault - save links and images, scrape their previews, reuse them later.
//!
//! The scraper turns a URL into Open Graph metadata; records live in a
//! [`vault_types::RecordStore`] backed by [`vault_local::LocalStorageClient`].

pub mod cli;
pub mod config;
pub mod context;
pub mod scraper;
pub mod service;
pub mod ui;
pub mod view;
