use anyhow::Result;

use super::resolve_meme;
use crate::context::VaultContext;
use vault_types::VaultError;

pub async fn favorite(ctx: &VaultContext, id: &str) -> Result<()> {
    let meme = resolve_meme(ctx.store.as_ref(), id).await?;

    let updated = ctx
        .store
        .toggle_favorite(&meme.id)
        .await?
        .ok_or_else(|| VaultError::NotFound(meme.id.clone()))?;

    let action = if updated.is_favorite {
        "Favorited"
    } else {
        "Unfavorited"
    };
    ctx.output.success(action, updated.label());

    Ok(())
}
