//! In-memory projection of the vault used by interactive browsing.
//!
//! Mutations are applied to the projection first, then replaced by the list
//! the store returns once the real mutation completes.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::future::Future;

use vault_types::Meme;

#[derive(Debug, Clone, Default)]
pub struct MemeView {
    memes: Vec<Meme>,
}

impl MemeView {
    pub fn new(memes: Vec<Meme>) -> Self {
        Self { memes }
    }

    pub fn memes(&self) -> &[Meme] {
        &self.memes
    }

    /// 先应用乐观更新，再等待真实修改
    /// - 成功：用存储返回的权威列表替换视图
    /// - 失败：恢复到修改前的视图并返回错误
    pub async fn mutate<T, F>(&mut self, optimistic: T, mutation: F) -> Result<()>
    where
        T: FnOnce(&mut Vec<Meme>),
        F: Future<Output = Result<Vec<Meme>>>,
    {
        let snapshot = self.memes.clone();
        optimistic(&mut self.memes);

        match mutation.await {
            Ok(authoritative) => {
                self.memes = authoritative;
                Ok(())
            }
            Err(e) => {
                tracing::debug!("Mutation failed, reverting view: {:#}", e);
                self.memes = snapshot;
                Err(e)
            }
        }
    }
}

/// 使用次数加一并刷新最后使用时间
pub fn bump_usage(id: &str, now: DateTime<Utc>) -> impl FnOnce(&mut Vec<Meme>) + '_ {
    move |memes| {
        if let Some(meme) = memes.iter_mut().find(|m| m.id == id) {
            meme.usage_count += 1;
            meme.last_used_at = Some(now);
        }
    }
}

/// 切换收藏状态
pub fn toggle_favorite(id: &str) -> impl FnOnce(&mut Vec<Meme>) + '_ {
    move |memes| {
        if let Some(meme) = memes.iter_mut().find(|m| m.id == id) {
            meme.is_favorite = !meme.is_favorite;
        }
    }
}

/// 从视图中移除
pub fn remove(id: &str) -> impl FnOnce(&mut Vec<Meme>) + '_ {
    move |memes| memes.retain(|m| m.id != id)
}
