use anyhow::{Context, Result};

use super::resolve_meme;
use crate::context::VaultContext;
use vault_types::VaultError;

/// 复制 URL：使用次数加一，URL 写到标准输出
pub async fn copy_url(ctx: &VaultContext, id: &str) -> Result<()> {
    let meme = resolve_meme(ctx.store.as_ref(), id).await?;

    let updated = ctx
        .store
        .increment_usage(&meme.id)
        .await?
        .ok_or_else(|| VaultError::NotFound(meme.id.clone()))?;

    println!("{}", updated.url);
    ctx.output.success(
        "Copied",
        &format!("{} (used {}×)", updated.label(), updated.usage_count),
    );

    Ok(())
}

/// 复制图片 URL（或本地路径），不计入使用次数
pub async fn copy_image(ctx: &VaultContext, id: &str) -> Result<()> {
    let meme = resolve_meme(ctx.store.as_ref(), id).await?;

    let image_url = meme
        .image_url
        .as_deref()
        .with_context(|| format!("Meme {} has no image", meme.id))?;

    println!("{}", image_url);
    ctx.output.success("Copied", "image URL");

    Ok(())
}
