use anyhow::{Context, Result};
use serde::Serialize;

use super::resolve_meme;
use crate::context::VaultContext;
use crate::ui::format::format_date;
use vault_types::Meme;

/// 可分享的元数据摘要
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MemeSummary<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    added_at: String,
    usage_count: u64,
}

/// 生成元数据 JSON（缩进两格）
pub fn metadata_json(meme: &Meme) -> Result<String> {
    let summary = MemeSummary {
        url: &meme.url,
        title: meme.title.as_deref(),
        description: meme.description.as_deref(),
        added_at: format_date(&meme.added_at),
        usage_count: meme.usage_count,
    };

    serde_json::to_string_pretty(&summary).context("Failed to serialize meme metadata")
}

pub async fn show(ctx: &VaultContext, id: &str) -> Result<()> {
    let meme = resolve_meme(ctx.store.as_ref(), id).await?;
    println!("{}", metadata_json(&meme)?);
    Ok(())
}
