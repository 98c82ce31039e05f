use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// 基于目录的键值存储：每个键对应一个 `<key>.json` 文件
#[derive(Debug, Clone)]
pub struct KeyValueDir {
    root: PathBuf,
}

impl KeyValueDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 读取键值，文件不存在时返回 None
    pub async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read slot file: {}", path.display()))
            }
        }
    }

    /// 写入键值（先写临时文件再重命名）
    pub async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        tokio::fs::create_dir_all(&self.root).await.with_context(|| {
            format!("Failed to create vault directory: {}", self.root.display())
        })?;

        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, value)
            .await
            .with_context(|| format!("Failed to write slot file: {}", tmp_path.display()))?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .with_context(|| format!("Failed to replace slot file: {}", path.display()))?;

        Ok(())
    }

    /// 删除键值，不存在时忽略
    pub async fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove slot file: {}", path.display()))
            }
        }
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
        if !valid {
            anyhow::bail!("Invalid storage key: '{}'", key);
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KeyValueDir::new(dir.path());

        assert_eq!(kv.get_item("memes").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KeyValueDir::new(dir.path().join("nested"));

        kv.set_item("memes", "[]").await.unwrap();
        assert_eq!(kv.get_item("memes").await.unwrap().as_deref(), Some("[]"));

        kv.set_item("memes", "[1]").await.unwrap();
        assert_eq!(kv.get_item("memes").await.unwrap().as_deref(), Some("[1]"));

        kv.remove_item("memes").await.unwrap();
        assert_eq!(kv.get_item("memes").await.unwrap(), None);
        kv.remove_item("memes").await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KeyValueDir::new(dir.path());

        assert!(kv.get_item("../escape").await.is_err());
        assert!(kv.set_item("", "x").await.is_err());
        assert!(kv.set_item(".hidden", "x").await.is_err());
    }
}
