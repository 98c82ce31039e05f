use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::context::VaultContext;
use crate::scraper::MetadataFetcher;
use vault_local::ImageVault;
use vault_types::{Meme, MemeBuilder, RecordStore, VaultError};

/// 用户手动填写的字段，优先于抓取结果
#[derive(Debug, Clone, Default)]
pub struct MemeOverrides {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl MemeOverrides {
    fn apply(&self, builder: &mut MemeBuilder) {
        if let Some(title) = non_empty(&self.title) {
            builder.title = Some(title);
        }
        if let Some(description) = non_empty(&self.description) {
            builder.description = Some(description);
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// add 命令的输入：URL 或本地文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddInput {
    Url(String),
    File(PathBuf),
}

impl AddInput {
    /// 以 http(s):// 开头的视为 URL；存在的本地路径视为文件；其余按 URL 校验
    pub fn classify(input: &str) -> Self {
        let input = input.trim();
        let lower = input.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Self::Url(input.to_string());
        }

        let path = input.strip_prefix("file://").unwrap_or(input);
        if !path.is_empty() && Path::new(path).exists() {
            return Self::File(PathBuf::from(path));
        }

        Self::Url(input.to_string())
    }
}

/// 校验 URL：必须能解析且协议为 http/https，返回去除空白后的 URL
pub fn validate_url(url: &str) -> Result<String, VaultError> {
    let trimmed = url.trim();
    match url::Url::parse(trimmed) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(trimmed.to_string()),
        _ => Err(VaultError::InvalidUrl(trimmed.to_string())),
    }
}

/// 从 URL 创建记录：校验 → 查重 → 抓取 → 保存
///
/// 校验失败或重复时不会发起网络请求；抓取失败时不会创建记录。
pub async fn store_url(
    store: &dyn RecordStore,
    fetcher: &MetadataFetcher,
    url: &str,
    overrides: &MemeOverrides,
) -> Result<Meme> {
    let url = validate_url(url)?;

    if let Some(existing) = store.find_by_url(&url).await {
        return Err(VaultError::Duplicate {
            id: existing.id.clone(),
            label: existing.label().to_string(),
        }
        .into());
    }

    let metadata = fetcher.fetch(&url).await?;

    let mut builder = MemeBuilder::from_metadata(url, metadata);
    overrides.apply(&mut builder);
    let meme = Meme::new(builder);

    store.upsert(meme.clone()).await?;
    tracing::info!("Stored meme {} ({})", meme.id, meme.url);

    Ok(meme)
}

/// 从本地图片创建记录：复制到图片目录，记录拥有该文件
pub async fn store_file(
    store: &dyn RecordStore,
    images: &ImageVault,
    source: &Path,
    overrides: &MemeOverrides,
) -> Result<Meme> {
    let id = uuid::Uuid::new_v4().to_string();
    let dest = images.import(source, &id).await?;
    let dest_str = dest.to_string_lossy().to_string();

    let mut builder = MemeBuilder {
        url: format!("file://{}", dest_str),
        title: source
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string()),
        image_url: Some(dest_str.clone()),
        local_path: Some(dest_str),
        ..Default::default()
    };
    overrides.apply(&mut builder);
    let meme = Meme::with_id(id, builder);

    if let Err(e) = store.upsert(meme.clone()).await {
        // 保存失败时清理已复制的文件
        images.remove(&dest).await;
        return Err(e);
    }
    tracing::info!("Imported {} as meme {}", source.display(), meme.id);

    Ok(meme)
}

/// add 命令
pub async fn add(ctx: &VaultContext, input: &str, overrides: MemeOverrides) -> Result<()> {
    let output = &ctx.output;
    ctx.show_vault_info().await;

    let result = match AddInput::classify(input) {
        AddInput::Url(url) => {
            output.status("Fetching", url.trim());
            store_url(ctx.store.as_ref(), &ctx.fetcher, &url, &overrides).await
        }
        AddInput::File(path) => {
            output.status("Importing", &path.display().to_string());
            store_file(ctx.store.as_ref(), &ctx.images, &path, &overrides).await
        }
    };

    match result {
        Ok(meme) => {
            output.success("Saved", meme.title.as_deref().unwrap_or("Meme"));
            output.info(&format!("ID: {}", meme.id));
            Ok(())
        }
        Err(e) => {
            if let Some(VaultError::Duplicate { label, .. }) = e.downcast_ref::<VaultError>() {
                output.failure("Exists", label);
            }
            Err(e.context("Failed to store meme"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert_eq!(
            validate_url("  https://tenor.com/view/cat  ").unwrap(),
            "https://tenor.com/view/cat"
        );
        assert!(validate_url("http://example.com").is_ok());
        assert!(validate_url("ftp://example.com/file").is_err());
        assert!(validate_url("file:///tmp/a.png").is_err());
        assert!(validate_url("not a url").is_err());
        assert!(validate_url("").is_err());
    }

    #[test]
    fn test_classify_input() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("cat.png");
        std::fs::write(&image, b"png").unwrap();
        let image_str = image.to_string_lossy().to_string();

        assert_eq!(
            AddInput::classify("https://tenor.com/view/cat"),
            AddInput::Url("https://tenor.com/view/cat".to_string())
        );
        assert_eq!(AddInput::classify(&image_str), AddInput::File(image.clone()));
        assert_eq!(
            AddInput::classify(&format!("file://{}", image_str)),
            AddInput::File(image)
        );
        assert_eq!(
            AddInput::classify("nonsense"),
            AddInput::Url("nonsense".to_string())
        );
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut builder = MemeBuilder {
            title: Some("Scraped".to_string()),
            description: Some("Scraped desc".to_string()),
            ..Default::default()
        };

        MemeOverrides {
            title: Some("Mine".to_string()),
            description: Some("   ".to_string()),
        }
        .apply(&mut builder);

        assert_eq!(builder.title.as_deref(), Some("Mine"));
        assert_eq!(builder.description.as_deref(), Some("Scraped desc"));
    }
}
