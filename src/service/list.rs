use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use crate::context::VaultContext;
use vault_types::Meme;

/// 按收藏分组后的列表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemeSections {
    pub favorites: Vec<Meme>,
    pub memes: Vec<Meme>,
}

impl MemeSections {
    /// 过滤并分组：收藏与其余两组，各自按最近使用排序
    pub fn build(memes: &[Meme], search: &str) -> Self {
        let (mut favorites, mut rest): (Vec<Meme>, Vec<Meme>) = memes
            .iter()
            .filter(|m| m.matches(search))
            .cloned()
            .partition(|m| m.is_favorite);

        favorites.sort_by(sort_by_recent_use);
        rest.sort_by(sort_by_recent_use);

        Self {
            favorites,
            memes: rest,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty() && self.memes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.favorites.len() + self.memes.len()
    }

    /// 按显示顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &Meme> {
        self.favorites.iter().chain(self.memes.iter())
    }
}

/// 最近使用的在前；从未使用的视为最早，再按添加时间倒序
pub fn sort_by_recent_use(a: &Meme, b: &Meme) -> Ordering {
    let epoch = DateTime::<Utc>::UNIX_EPOCH;
    let a_used = a.last_used_at.unwrap_or(epoch);
    let b_used = b.last_used_at.unwrap_or(epoch);

    b_used
        .cmp(&a_used)
        .then_with(|| b.added_at.cmp(&a.added_at))
}

/// list 命令
pub async fn list(ctx: &VaultContext, query: Option<&str>, json: bool) -> Result<()> {
    let output = &ctx.output;
    let memes = ctx.store.list().await;
    let search = query.unwrap_or("").trim();
    let sections = MemeSections::build(&memes, search);

    if json {
        let ordered: Vec<&Meme> = sections.iter().collect();
        let content =
            serde_json::to_string_pretty(&ordered).context("Failed to serialize memes")?;
        println!("{}", content);
        return Ok(());
    }

    output.vault_info(&ctx.vault_path(), memes.len());

    if sections.is_empty() {
        if search.is_empty() {
            output.info("No memes found. Use 'meme add <url>' to store some!");
        } else {
            output.info("No memes found. Try a different search term.");
        }
        return Ok(());
    }

    if !sections.favorites.is_empty() {
        output.section("Favorites", sections.favorites.len());
        output.meme_list(&sections.favorites);
    }

    if !sections.memes.is_empty() {
        if !sections.favorites.is_empty() {
            println!();
        }
        output.section("Memes", sections.memes.len());
        output.meme_list(&sections.memes);
    }

    Ok(())
}
