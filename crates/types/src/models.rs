use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 保存的 meme / 链接记录
///
/// 序列化字段名与持久化 JSON 一致（camelCase）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meme {
    pub id: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// 仅本地导入的图片才有，指向该记录拥有的文件
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<String>,
    pub added_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub usage_count: u64,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,
}

/// 用于构建 Meme 的 Builder
#[derive(Debug, Clone, Default)]
pub struct MemeBuilder {
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub local_path: Option<String>,
    pub aspect_ratio: Option<f64>,
}

impl MemeBuilder {
    /// 从抓取到的元数据开始构建
    pub fn from_metadata(url: impl Into<String>, metadata: OgMetadata) -> Self {
        Self {
            url: url.into(),
            title: metadata.title,
            description: metadata.description,
            image_url: metadata.image_url,
            local_path: None,
            aspect_ratio: metadata.aspect_ratio,
        }
    }
}

impl Meme {
    pub fn new(builder: MemeBuilder) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), builder)
    }

    /// 使用预先生成的 ID 创建（本地图片导入时文件名需要提前知道 ID）
    pub fn with_id(id: String, builder: MemeBuilder) -> Self {
        Self {
            id,
            url: builder.url,
            title: builder.title,
            description: builder.description,
            image_url: builder.image_url,
            local_path: builder.local_path,
            added_at: Utc::now(),
            last_used_at: None,
            usage_count: 0,
            is_favorite: false,
            aspect_ratio: builder.aspect_ratio,
        }
    }

    /// 显示用名称：标题，否则 URL
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.url)
    }

    /// 大小写不敏感地匹配 url / title / description
    pub fn matches(&self, search: &str) -> bool {
        if search.is_empty() {
            return true;
        }
        let needle = search.to_lowercase();
        let contains = |field: Option<&str>| {
            field
                .map(|value| value.to_lowercase().contains(&needle))
                .unwrap_or(false)
        };

        contains(Some(&self.url))
            || contains(self.title.as_deref())
            || contains(self.description.as_deref())
    }
}

/// 从页面中提取的 Open Graph 元数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OgMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,
}

impl OgMetadata {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
            && self.aspect_ratio.is_none()
    }
}
