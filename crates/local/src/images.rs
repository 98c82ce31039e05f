use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use vault_types::VaultError;

/// 图片目录名（位于数据目录下）
pub const IMAGES_DIR: &str = "images";

/// 无扩展名时使用的默认扩展名
const DEFAULT_EXTENSION: &str = ".png";

/// 图片目录统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageStats {
    pub image_count: usize,
    pub total_bytes: u64,
}

impl StorageStats {
    /// 总大小（MB，保留一位小数）
    pub fn total_mb(&self) -> f64 {
        let mb = self.total_bytes as f64 / (1024.0 * 1024.0);
        (mb * 10.0).round() / 10.0
    }
}

/// 本地导入图片的存放目录
#[derive(Debug, Clone)]
pub struct ImageVault {
    dir: PathBuf,
}

impl ImageVault {
    pub fn new(vault_path: &Path) -> Self {
        Self {
            dir: vault_path.join(IMAGES_DIR),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 将源文件复制为 `<id><ext>`，返回目标路径
    pub async fn import(&self, source: &Path, id: &str) -> Result<PathBuf> {
        let metadata = tokio::fs::metadata(source)
            .await
            .with_context(|| format!("Failed to read image file: {}", source.display()))?;
        if !metadata.is_file() {
            return Err(VaultError::UnsupportedImage(source.display().to_string()).into());
        }

        let extension = image_extension(source);

        tokio::fs::create_dir_all(&self.dir).await.with_context(|| {
            format!("Failed to create images directory: {}", self.dir.display())
        })?;

        let dest = self.dir.join(format!("{}{}", id, extension));
        tokio::fs::copy(source, &dest).await.with_context(|| {
            format!(
                "Failed to copy {} to {}",
                source.display(),
                dest.display()
            )
        })?;

        tracing::debug!("Imported {} as {}", source.display(), dest.display());
        Ok(dest)
    }

    /// 尽力删除文件，失败只记录日志
    pub async fn remove(&self, path: &Path) -> bool {
        match tokio::fs::remove_file(path).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to delete image {}: {}", path.display(), e);
                false
            }
        }
    }

    /// 统计图片数量和总大小；目录不存在时为零
    pub fn stats(&self) -> StorageStats {
        let mut stats = StorageStats::default();

        let Ok(entries) = std::fs::read_dir(&self.dir) else {
            return stats;
        };

        for entry in entries.flatten() {
            stats.image_count += 1;
            // 单个文件读取失败时忽略
            if let Ok(metadata) = entry.metadata() {
                stats.total_bytes += metadata.len();
            }
        }

        stats
    }
}

/// 返回带点的小写扩展名；无扩展名时为 `.png`
fn image_extension(source: &Path) -> String {
    match source.extension() {
        Some(ext) if !ext.is_empty() => format!(".{}", ext.to_string_lossy().to_lowercase()),
        _ => DEFAULT_EXTENSION.to_string(),
    }
}

/// 格式化存储大小
pub fn format_storage_size(mb: f64) -> String {
    if mb < 1.0 {
        format!("{} KB", (mb * 1024.0).round() as u64)
    } else if mb >= 1024.0 {
        format!("{:.1} GB", mb / 1024.0)
    } else {
        format!("{:.1} MB", mb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_import_keeps_extension() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("Funny Cat.GIF");
        std::fs::write(&source, b"gif89a").unwrap();

        let vault = ImageVault::new(&dir.path().join("vault"));
        let dest = vault.import(&source, "abc").await.unwrap();

        assert_eq!(dest, dir.path().join("vault").join("images").join("abc.gif"));
        assert_eq!(std::fs::read(&dest).unwrap(), b"gif89a");
        assert!(source.exists());
    }

    #[tokio::test]
    async fn test_import_without_extension_defaults_to_png() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("screenshot");
        std::fs::write(&source, b"data").unwrap();

        let vault = ImageVault::new(dir.path());
        let dest = vault.import(&source, "xyz").await.unwrap();

        assert_eq!(dest.file_name().unwrap(), "xyz.png");
    }

    #[tokio::test]
    async fn test_import_keeps_any_source_extension() {
        let dir = tempfile::tempdir().unwrap();
        let vault = ImageVault::new(dir.path());

        for (name, expected) in [
            ("reaction.jfif", "id1.jfif"),
            ("favicon.ICO", "id2.ico"),
            ("spinner.apng", "id3.apng"),
        ] {
            let source = dir.path().join(name);
            std::fs::write(&source, b"img").unwrap();
            let id = expected.split('.').next().unwrap();

            let dest = vault.import(&source, id).await.unwrap();
            assert_eq!(dest.file_name().unwrap(), expected);
            assert!(dest.exists());
        }
    }

    #[tokio::test]
    async fn test_import_rejects_directories_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let vault = ImageVault::new(&dir.path().join("vault"));

        let err = vault.import(dir.path(), "b").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VaultError>(),
            Some(VaultError::UnsupportedImage(_))
        ));

        assert!(vault.import(&dir.path().join("missing.png"), "c").await.is_err());
        assert!(!vault.dir().exists());
    }

    #[tokio::test]
    async fn test_stats_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let vault = ImageVault::new(dir.path());
        assert_eq!(vault.stats(), StorageStats::default());

        let source = dir.path().join("a.png");
        std::fs::write(&source, vec![0u8; 2048]).unwrap();
        let first = vault.import(&source, "one").await.unwrap();
        vault.import(&source, "two").await.unwrap();

        let stats = vault.stats();
        assert_eq!(stats.image_count, 2);
        assert_eq!(stats.total_bytes, 4096);

        assert!(vault.remove(&first).await);
        assert!(!vault.remove(&first).await);
        assert_eq!(vault.stats().image_count, 1);
    }

    #[test]
    fn test_total_mb_rounding() {
        let stats = StorageStats {
            image_count: 1,
            total_bytes: 1_572_864, // 1.5 MB
        };
        assert_eq!(stats.total_mb(), 1.5);
    }

    #[test]
    fn test_format_storage_size() {
        assert_eq!(format_storage_size(0.5), "512 KB");
        assert_eq!(format_storage_size(0.0), "0 KB");
        assert_eq!(format_storage_size(12.34), "12.3 MB");
        assert_eq!(format_storage_size(2048.0), "2.0 GB");
    }
}
