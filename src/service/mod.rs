pub mod add;
pub mod browse;
pub mod copy;
pub mod delete;
pub mod favorite;
pub mod init;
pub mod list;
pub mod preview;
pub mod show;
pub mod stats;

use anyhow::Result;

use vault_types::{Meme, RecordStore, VaultError};

/// 按完整 ID 或唯一前缀查找记录
pub async fn resolve_meme(store: &dyn RecordStore, id: &str) -> Result<Meme> {
    let id = id.trim();
    if id.is_empty() {
        return Err(VaultError::NotFound(id.to_string()).into());
    }

    let memes = store.list().await;
    if let Some(meme) = memes.iter().find(|m| m.id == id) {
        return Ok(meme.clone());
    }

    let mut matches: Vec<Meme> = memes.into_iter().filter(|m| m.id.starts_with(id)).collect();
    match matches.len() {
        0 => Err(VaultError::NotFound(id.to_string()).into()),
        1 => Ok(matches.remove(0)),
        n => anyhow::bail!("ID prefix '{}' is ambiguous ({} memes match)", id, n),
    }
}
