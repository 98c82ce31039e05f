use anyhow::Result;
use async_trait::async_trait;

use crate::models::Meme;

/// 默认持久化槽位名称
pub const DEFAULT_STORAGE_KEY: &str = "memes";

/// 记录存储的统一接口
///
/// 整个集合作为一个序列化块保存：每次修改都是读取全部、内存修改、整体写回。
/// 不提供锁，并发修改可能丢失更新。
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// 连接/初始化存储
    async fn connect(config: &StorageConfig) -> Result<Self>
    where
        Self: Sized;

    /// 列出所有记录（按存储顺序，新建的在前）
    ///
    /// 读取失败或数据损坏时返回空列表，不报错。
    async fn list(&self) -> Vec<Meme>;

    /// 获取记录总数
    async fn count(&self) -> usize {
        self.list().await.len()
    }

    /// 相同 ID 原位替换，否则插入到最前
    async fn upsert(&self, meme: Meme) -> Result<()>;

    /// 删除记录，并尽力删除其拥有的本地文件；返回被删除的记录
    async fn delete(&self, id: &str) -> Result<Option<Meme>>;

    /// 使用次数加一并刷新最后使用时间
    async fn increment_usage(&self, id: &str) -> Result<Option<Meme>>;

    /// 切换收藏状态
    async fn toggle_favorite(&self, id: &str) -> Result<Option<Meme>>;

    /// 按 URL 精确查找
    async fn find_by_url(&self, url: &str) -> Option<Meme> {
        self.list().await.into_iter().find(|m| m.url == url)
    }

    /// 按 ID 查找
    async fn find_by_id(&self, id: &str) -> Option<Meme> {
        self.list().await.into_iter().find(|m| m.id == id)
    }
}

/// 存储配置（通用）
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// 数据目录
    pub path: String,
    /// 保存整个集合的槽位名
    pub key: String,
}

impl StorageConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}
