use anyhow::Result;

use crate::context::VaultContext;
use vault_local::format_storage_size;
use vault_types::Meme;

/// 集合统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VaultStats {
    pub total: usize,
    pub favorites: usize,
    pub total_uses: u64,
}

impl VaultStats {
    pub fn from_memes(memes: &[Meme]) -> Self {
        Self {
            total: memes.len(),
            favorites: memes.iter().filter(|m| m.is_favorite).count(),
            total_uses: memes.iter().map(|m| m.usage_count).sum(),
        }
    }
}

pub async fn stats(ctx: &VaultContext) -> Result<()> {
    let output = &ctx.output;
    let memes = ctx.store.list().await;
    let vault = VaultStats::from_memes(&memes);
    let images = ctx.images.stats();

    output.vault_info(&ctx.vault_path(), vault.total);
    output.stats(&[
        ("favorites", vault.favorites.to_string()),
        ("uses", vault.total_uses.to_string()),
    ]);
    output.stats(&[
        ("local images", images.image_count.to_string()),
        ("on disk", format_storage_size(images.total_mb())),
    ]);

    if let Some(top) = memes.iter().max_by_key(|m| m.usage_count) {
        if top.usage_count > 0 {
            output.note(&format!("Most used: {} ({}×)", top.label(), top.usage_count));
        }
    }

    Ok(())
}
