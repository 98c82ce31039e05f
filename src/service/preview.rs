use anyhow::{Context, Result};

use super::add::validate_url;
use crate::context::VaultContext;

/// 只抓取并显示元数据，不保存
pub async fn preview(ctx: &VaultContext, url: &str) -> Result<()> {
    let url = validate_url(url)?;
    let target = ctx.fetcher.target_for(&url);

    if target.url != url {
        ctx.output.note(&format!("Scraping via {}", target.url));
    }
    ctx.output.status("Fetching", &url);

    let metadata = ctx.fetcher.fetch(&url).await?;
    if metadata.is_empty() {
        ctx.output.info("No preview metadata found");
    }

    let content =
        serde_json::to_string_pretty(&metadata).context("Failed to serialize metadata")?;
    println!("{}", content);

    Ok(())
}
