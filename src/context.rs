use anyhow::Result;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::scraper::MetadataFetcher;
use crate::ui::Output;
use vault_local::{ImageVault, LocalStorageClient};
use vault_types::RecordStore;

/// 进程启动时构建一次，传给所有需要存储或抓取的命令
pub struct VaultContext {
    pub config: AppConfig,
    pub scope: &'static str,
    pub store: Box<dyn RecordStore>,
    pub images: ImageVault,
    pub fetcher: MetadataFetcher,
    pub output: Output,
}

impl VaultContext {
    pub async fn open(force_local: bool, force_global: bool) -> Result<Self> {
        let config = AppConfig::load_with_scope(force_local, force_global)?;
        let scope = AppConfig::get_scope_name(force_local, force_global);
        Self::from_config(config, scope).await
    }

    pub async fn from_config(config: AppConfig, scope: &'static str) -> Result<Self> {
        let vault_path = config.get_vault_path();
        let store = LocalStorageClient::connect(&config.storage_config()).await?;
        let images = ImageVault::new(&vault_path);
        let fetcher = MetadataFetcher::new(config.fetcher_config())?;

        Ok(Self {
            config,
            scope,
            store: Box::new(store),
            images,
            fetcher,
            output: Output::new(),
        })
    }

    pub fn vault_path(&self) -> PathBuf {
        self.config.get_vault_path()
    }

    /// 显示数据目录信息
    pub async fn show_vault_info(&self) {
        let count = self.store.count().await;
        self.output.vault_info(&self.vault_path(), count);
    }
}
