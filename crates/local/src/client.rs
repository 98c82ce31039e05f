use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::path::Path;

use vault_types::{Meme, RecordStore, StorageConfig};

use crate::db::KeyValueDir;

/// 本地存储客户端
///
/// 整个集合以 JSON 数组的形式保存在一个槽位中。
pub struct LocalStorageClient {
    kv: KeyValueDir,
    key: String,
}

impl LocalStorageClient {
    /// 数据目录
    pub fn path(&self) -> &Path {
        self.kv.root()
    }

    /// 读取全部记录；缺失、为空或损坏都视为空集合
    async fn read_all(&self) -> Vec<Meme> {
        let data = match self.kv.get_item(&self.key).await {
            Ok(Some(data)) if !data.trim().is_empty() => data,
            Ok(_) => return vec![],
            Err(e) => {
                tracing::warn!("Failed to read vault slot '{}': {:#}", self.key, e);
                return vec![];
            }
        };

        match serde_json::from_str::<Vec<Meme>>(&data) {
            Ok(memes) => memes,
            Err(e) => {
                tracing::warn!("Vault slot '{}' is corrupt, treating as empty: {}", self.key, e);
                vec![]
            }
        }
    }

    async fn write_all(&self, memes: &[Meme]) -> Result<()> {
        let data = serde_json::to_string(memes).context("Failed to serialize memes")?;
        self.kv.set_item(&self.key, &data).await?;
        tracing::debug!("Persisted {} memes to slot '{}'", memes.len(), self.key);
        Ok(())
    }

    /// 对指定 ID 的记录做原位修改并写回；找不到时不写入
    async fn modify<F>(&self, id: &str, apply: F) -> Result<Option<Meme>>
    where
        F: FnOnce(&mut Meme) + Send,
    {
        let mut memes = self.read_all().await;
        let Some(meme) = memes.iter_mut().find(|m| m.id == id) else {
            tracing::debug!("No meme with ID {}, nothing to update", id);
            return Ok(None);
        };

        apply(meme);
        let updated = meme.clone();
        self.write_all(&memes).await?;

        Ok(Some(updated))
    }
}

#[async_trait]
impl RecordStore for LocalStorageClient {
    async fn connect(config: &StorageConfig) -> Result<Self> {
        let kv = KeyValueDir::new(&config.path);
        tracing::debug!("Using vault at {} (slot '{}')", config.path, config.key);

        Ok(Self {
            kv,
            key: config.key.clone(),
        })
    }

    async fn list(&self) -> Vec<Meme> {
        self.read_all().await
    }

    async fn upsert(&self, meme: Meme) -> Result<()> {
        let mut memes = self.read_all().await;

        if let Some(existing) = memes.iter_mut().find(|m| m.id == meme.id) {
            *existing = meme;
        } else {
            memes.insert(0, meme);
        }

        self.write_all(&memes).await
    }

    async fn delete(&self, id: &str) -> Result<Option<Meme>> {
        let mut memes = self.read_all().await;
        let Some(index) = memes.iter().position(|m| m.id == id) else {
            return Ok(None);
        };

        let removed = memes.remove(index);
        self.write_all(&memes).await?;

        // 记录已删除后再删文件；文件删除失败只记录日志
        if let Some(local_path) = &removed.local_path {
            if let Err(e) = tokio::fs::remove_file(local_path).await {
                tracing::warn!("Failed to delete local image {}: {}", local_path, e);
            }
        }

        Ok(Some(removed))
    }

    async fn increment_usage(&self, id: &str) -> Result<Option<Meme>> {
        self.modify(id, |meme| {
            meme.usage_count += 1;
            meme.last_used_at = Some(Utc::now());
        })
        .await
    }

    async fn toggle_favorite(&self, id: &str) -> Result<Option<Meme>> {
        self.modify(id, |meme| meme.is_favorite = !meme.is_favorite).await
    }
}
