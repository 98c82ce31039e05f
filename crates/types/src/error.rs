use thiserror::Error;

/// 需要调用方区分处理的领域错误
///
/// 通常包装在 `anyhow::Error` 中传递，可通过 `downcast_ref` 取回。
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Invalid URL: {0} (only http and https are supported)")]
    InvalidUrl(String),

    #[error("Meme already exists: {label} ({id})")]
    Duplicate { id: String, label: String },

    #[error("Meme not found with ID: {0}")]
    NotFound(String),

    #[error("Not an importable image file: {0}")]
    UnsupportedImage(String),
}
