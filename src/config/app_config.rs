use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::scraper::{FetcherConfig, BOT_USER_AGENT, BROWSER_USER_AGENT, DEFAULT_MIRROR_HOST};
use vault_types::{StorageConfig, DEFAULT_STORAGE_KEY};

/// 配置作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    Auto,
    Local,
    Global,
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// 数据目录（可选，默认: ~/.meme/vault 或 ./.meme/vault）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault_path: Option<PathBuf>,

    /// 保存整个集合的槽位名（默认: memes）
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// 普通站点使用的 User-Agent
    #[serde(default = "default_browser_user_agent")]
    pub browser_user_agent: String,

    /// 镜像站使用的 User-Agent
    #[serde(default = "default_bot_user_agent")]
    pub bot_user_agent: String,

    /// Twitter/X 帖子改写到的镜像站
    #[serde(default = "default_mirror_host")]
    pub mirror_host: String,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_browser_user_agent() -> String {
    BROWSER_USER_AGENT.to_string()
}

fn default_bot_user_agent() -> String {
    BOT_USER_AGENT.to_string()
}

fn default_mirror_host() -> String {
    DEFAULT_MIRROR_HOST.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            vault_path: None,
            storage_key: default_storage_key(),
            browser_user_agent: default_browser_user_agent(),
            bot_user_agent: default_bot_user_agent(),
            mirror_host: default_mirror_host(),
        }
    }
}

impl AppConfig {
    /// 全局 .meme 目录：~/.meme/
    pub fn global_meme_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".meme")
    }

    /// 本地 .meme 目录：./.meme/
    pub fn local_meme_dir() -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(".meme")
    }

    /// 检查本地配置是否存在
    /// 注意：如果当前目录是用户主目录，则不认为是本地配置
    pub fn has_local_config() -> bool {
        let current_dir = match std::env::current_dir() {
            Ok(dir) => dir,
            Err(_) => return false,
        };

        if let Some(home) = dirs::home_dir() {
            let current_canonical = current_dir.canonicalize().unwrap_or(current_dir.clone());
            let home_canonical = home.canonicalize().unwrap_or(home);

            if current_canonical == home_canonical {
                return false;
            }
        }

        Self::local_meme_dir().join("config.toml").exists()
    }

    /// 验证作用域标志（不能同时指定 local 和 global）
    pub fn validate_scope_flags(local: bool, global: bool) -> Result<()> {
        if local && global {
            anyhow::bail!("Cannot specify both --local and --global, please choose one");
        }
        Ok(())
    }

    /// 获取当前作用域名称
    /// 返回 "local" 或 "global"
    pub fn get_scope_name(force_local: bool, force_global: bool) -> &'static str {
        if force_local {
            "local"
        } else if force_global {
            "global"
        } else if Self::has_local_config() {
            "local"
        } else {
            "global"
        }
    }

    /// 根据 local 标志获取配置目录
    pub fn get_meme_dir(local: bool) -> PathBuf {
        if local {
            Self::local_meme_dir()
        } else {
            Self::global_meme_dir()
        }
    }

    /// 加载配置：根据 local/global 标志或优先级加载
    /// - local = true: 强制使用本地配置
    /// - global = true: 强制使用全局配置
    /// - 两者都为 false: 优先本地配置，其次全局配置
    pub fn load_with_scope(force_local: bool, force_global: bool) -> Result<Self> {
        Self::validate_scope_flags(force_local, force_global)?;

        let scope = if force_local {
            ConfigScope::Local
        } else if force_global {
            ConfigScope::Global
        } else {
            ConfigScope::Auto
        };

        Self::load_with_scope_internal(scope)
    }

    fn load_with_scope_internal(scope: ConfigScope) -> Result<Self> {
        let is_local = match scope {
            ConfigScope::Auto => Self::has_local_config(),
            ConfigScope::Local => true,
            ConfigScope::Global => false,
        };

        let path = Self::get_meme_dir(is_local).join("config.toml");
        let mut config = Self::load_from_path(&path)?;

        // 本地配置强制使用本地数据目录
        if is_local {
            config.vault_path = Some(Self::local_meme_dir().join("vault"));
        }

        Ok(config)
    }

    /// 从指定路径加载配置文件，文件不存在时使用默认配置
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        tracing::debug!("Loaded app config from: {}", path.display());
        tracing::debug!("Storage key: {}", config.storage_key);

        Ok(config)
    }

    /// 获取数据目录
    pub fn get_vault_path(&self) -> PathBuf {
        self.vault_path
            .clone()
            .unwrap_or_else(|| Self::global_meme_dir().join("vault"))
    }

    /// 确保必要的目录存在
    pub fn ensure_dirs(&self) -> Result<()> {
        let vault_path = self.get_vault_path();
        std::fs::create_dir_all(&vault_path).with_context(|| {
            format!("Failed to create vault directory: {}", vault_path.display())
        })?;
        Ok(())
    }

    /// 存储配置
    pub fn storage_config(&self) -> StorageConfig {
        StorageConfig {
            path: self.get_vault_path().to_string_lossy().to_string(),
            key: self.storage_key.clone(),
        }
    }

    /// 抓取器配置
    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            browser_user_agent: self.browser_user_agent.clone(),
            bot_user_agent: self.bot_user_agent.clone(),
            mirror_host: self.mirror_host.clone(),
        }
    }

    /// 保存配置到指定目录下的 config.toml
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let config_path = dir.join("config.toml");
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(config_path)
    }
}
