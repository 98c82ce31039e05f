use anyhow::Result;

use super::resolve_meme;
use crate::context::VaultContext;

pub async fn delete(ctx: &VaultContext, id: &str, skip_confirm: bool) -> Result<()> {
    let output = &ctx.output;
    ctx.show_vault_info().await;

    let meme = resolve_meme(ctx.store.as_ref(), id).await?;

    // 显示警告信息
    output.warning(&format!("this will permanently delete \"{}\"", meme.label()));
    if let Some(local_path) = &meme.local_path {
        output.info(&format!("local image {} will be removed", local_path));
    }

    // 确认操作
    if !skip_confirm && !output.confirm("yes")? {
        output.info("Operation cancelled");
        return Ok(());
    }

    output.begin_operation("Deleting", &format!("meme {}", meme.id));
    ctx.store.delete(&meme.id).await?;

    output.finish("delete", ctx.scope);

    Ok(())
}
