use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::ui::Output;
use vault_local::KeyValueDir;

/// 显式初始化（带用户反馈）
/// local: true 表示在本地目录初始化，false 表示在全局目录初始化
pub async fn initialize(local: bool) -> Result<()> {
    let output = Output::new();
    let config_dir = AppConfig::get_meme_dir(local);
    // 本地初始化使用本地数据目录
    let vault_path = local.then(|| AppConfig::local_meme_dir().join("vault"));

    initialize_in(&config_dir, vault_path, &output).await?;

    let scope = if local { "local" } else { "global" };
    output.finish("initialization", scope);

    Ok(())
}

/// 在指定目录写入配置、创建数据目录和空的存储槽位
///
/// 不依赖其它作用域的配置；`vault_path` 为 Some 时覆盖配置中的数据目录。
pub async fn initialize_in(
    config_dir: &Path,
    vault_path: Option<PathBuf>,
    output: &Output,
) -> Result<AppConfig> {
    let config_path = config_dir.join("config.toml");

    if config_path.exists() {
        output.resource_action("Found", "config", &config_path);
    } else {
        let config = AppConfig {
            vault_path: vault_path.clone(),
            ..Default::default()
        };
        let path = config.save_to(config_dir)?;
        output.resource_action("Creating", "config", &path);
    }

    let mut config = AppConfig::load_from_path(&config_path)?;
    if vault_path.is_some() {
        config.vault_path = vault_path;
    }
    config.ensure_dirs()?;

    // 确保存储槽位存在
    let vault_path = config.get_vault_path();
    let kv = KeyValueDir::new(&vault_path);
    let slot_path = vault_path.join(format!("{}.json", config.storage_key));
    if kv.get_item(&config.storage_key).await?.is_none() {
        kv.set_item(&config.storage_key, "[]").await?;
        output.resource_action("Creating", "vault", &slot_path);
    } else {
        output.resource_action("Found", "vault", &slot_path);
    }

    Ok(config)
}
