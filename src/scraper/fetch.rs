use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use thiserror::Error;

use vault_types::OgMetadata;

use super::extract::parse_og_metadata;
use super::normalize::{normalize_url, ScrapeTarget, DEFAULT_MIRROR_HOST};

/// 普通站点使用的桌面浏览器 UA（避免基础的 bot 拦截）
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// 镜像站只对被识别为链接预览 bot 的请求返回 OG 标签
pub const BOT_USER_AGENT: &str = "TelegramBot (like TwitterBot)";

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// 抓取失败
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch URL: {0}")]
    Status(u16),

    #[error("Failed to fetch URL: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

/// 抓取器配置
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub browser_user_agent: String,
    pub bot_user_agent: String,
    pub mirror_host: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            browser_user_agent: BROWSER_USER_AGENT.to_string(),
            bot_user_agent: BOT_USER_AGENT.to_string(),
            mirror_host: DEFAULT_MIRROR_HOST.to_string(),
        }
    }
}

/// 元数据抓取器：规范化 URL，发起一次 GET，交给提取器解析
pub struct MetadataFetcher {
    client: Client,
    config: FetcherConfig,
}

impl MetadataFetcher {
    pub fn new(config: FetcherConfig) -> Result<Self> {
        // 不设置超时、不重试，使用客户端默认行为
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, config })
    }

    /// 规范化后的抓取目标
    pub fn target_for(&self, url: &str) -> ScrapeTarget {
        normalize_url(url, &self.config.mirror_host)
    }

    /// 根据目标选择 User-Agent
    pub fn user_agent_for(&self, target: &ScrapeTarget) -> &str {
        if target.via_mirror {
            &self.config.bot_user_agent
        } else {
            &self.config.browser_user_agent
        }
    }

    /// 抓取并解析 URL 的 OG 元数据
    pub async fn fetch(&self, url: &str) -> Result<OgMetadata, FetchError> {
        let target = self.target_for(url);
        let user_agent = self.user_agent_for(&target);

        if target.url != url {
            tracing::debug!("Rewrote {} to {}", url, target.url);
        }
        tracing::debug!("Fetching {} as '{}'", target.url, user_agent);

        let response = self
            .client
            .get(&target.url)
            .header(USER_AGENT, user_agent)
            .header(ACCEPT, ACCEPT_HTML)
            .send()
            .await
            .map_err(FetchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("{} returned {}", target.url, status);
            return Err(FetchError::Status(status.as_u16()));
        }

        let html = response.text().await.map_err(FetchError::Body)?;
        let metadata = parse_og_metadata(&html);
        tracing::debug!("Extracted metadata from {}: {:?}", target.url, metadata);

        Ok(metadata)
    }
}
