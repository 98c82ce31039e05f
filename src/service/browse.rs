use anyhow::Result;
use chrono::Utc;
use console::Style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use std::future::Future;

use super::list::MemeSections;
use super::show::metadata_json;
use crate::context::VaultContext;
use crate::ui::format::{count_label, subtitle};
use crate::view::{self, MemeView};
use vault_types::{Meme, RecordStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    CopyUrl,
    CopyImage,
    ToggleFavorite,
    Delete,
    ShowMetadata,
    Back,
}

impl Action {
    fn label(self, meme: &Meme) -> &'static str {
        match self {
            Action::CopyUrl => "Copy URL",
            Action::CopyImage => "Copy Image URL",
            Action::ToggleFavorite if meme.is_favorite => "Remove from Favorites",
            Action::ToggleFavorite => "Add to Favorites",
            Action::Delete => "Delete Meme",
            Action::ShowMetadata => "Show Metadata",
            Action::Back => "Back",
        }
    }

    /// 当前记录可用的操作
    fn available(meme: &Meme) -> Vec<Action> {
        let mut actions = vec![Action::CopyUrl];
        if meme.image_url.is_some() {
            actions.push(Action::CopyImage);
        }
        actions.extend([
            Action::ToggleFavorite,
            Action::Delete,
            Action::ShowMetadata,
            Action::Back,
        ]);
        actions
    }
}

/// 列表项显示文本
fn item_label(meme: &Meme) -> String {
    format!(
        "{}  {}",
        meme.title.as_deref().unwrap_or("Untitled"),
        Style::new().dim().apply_to(subtitle(meme))
    )
}

/// 等待修改完成后返回存储中的最新列表
async fn refreshed<F>(store: &dyn RecordStore, mutation: F) -> Result<Vec<Meme>>
where
    F: Future<Output = Result<Option<Meme>>>,
{
    mutation.await?;
    Ok(store.list().await)
}

/// 交互式浏览：搜索、选择记录、执行操作
pub async fn browse(ctx: &VaultContext) -> Result<()> {
    let output = &ctx.output;
    let theme = ColorfulTheme::default();
    let store = ctx.store.as_ref();

    let mut memes_view = MemeView::new(store.list().await);
    output.vault_info(&ctx.vault_path(), memes_view.memes().len());

    if memes_view.memes().is_empty() {
        output.info("No memes found. Use 'meme add <url>' to store some!");
        return Ok(());
    }

    let mut search = String::new();

    loop {
        let sections = MemeSections::build(memes_view.memes(), &search);
        if sections.is_empty() {
            output.info("No memes found. Try a different search term.");
            search = prompt_search(&theme, &search)?;
            continue;
        }

        let candidates: Vec<Meme> = sections.iter().cloned().collect();
        let mut items: Vec<String> = candidates.iter().map(item_label).collect();
        items.push("Search...".to_string());
        items.push("Quit".to_string());

        let prompt = format!(
            "{} favorites, {}",
            sections.favorites.len(),
            count_label(sections.len())
        );
        let Some(choice) = Select::with_theme(&theme)
            .with_prompt(prompt)
            .items(&items)
            .default(0)
            .interact_opt()?
        else {
            return Ok(());
        };

        if choice == candidates.len() {
            search = prompt_search(&theme, &search)?;
            continue;
        }
        if choice > candidates.len() {
            return Ok(());
        }

        let meme = &candidates[choice];
        let actions = Action::available(meme);
        let labels: Vec<&str> = actions.iter().map(|a| a.label(meme)).collect();
        let Some(picked) = Select::with_theme(&theme)
            .with_prompt(meme.label())
            .items(&labels)
            .default(0)
            .interact_opt()?
        else {
            continue;
        };

        let id = meme.id.clone();
        match actions[picked] {
            Action::CopyUrl => {
                let result = memes_view
                    .mutate(
                        view::bump_usage(&id, Utc::now()),
                        refreshed(store, store.increment_usage(&id)),
                    )
                    .await;
                if let Err(e) = result {
                    output.failure("Failed", &format!("{:#}", e));
                    continue;
                }
                println!("{}", meme.url);
                output.success("Copied", meme.label());
                return Ok(());
            }
            Action::CopyImage => {
                if let Some(image_url) = &meme.image_url {
                    println!("{}", image_url);
                    output.success("Copied", "image URL");
                    return Ok(());
                }
            }
            Action::ToggleFavorite => {
                let result = memes_view
                    .mutate(
                        view::toggle_favorite(&id),
                        refreshed(store, store.toggle_favorite(&id)),
                    )
                    .await;
                if let Err(e) = result {
                    output.failure("Failed", &format!("{:#}", e));
                }
            }
            Action::Delete => {
                let confirmed = Confirm::with_theme(&theme)
                    .with_prompt(format!(
                        "Are you sure you want to delete \"{}\"?",
                        meme.label()
                    ))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    continue;
                }

                let result = memes_view
                    .mutate(view::remove(&id), refreshed(store, store.delete(&id)))
                    .await;
                match result {
                    Ok(()) => output.success("Deleted", meme.label()),
                    Err(e) => output.failure("Failed", &format!("{:#}", e)),
                }
            }
            Action::ShowMetadata => {
                println!("{}", metadata_json(meme)?);
            }
            Action::Back => {}
        }
    }
}

fn prompt_search(theme: &ColorfulTheme, current: &str) -> Result<String> {
    let search: String = Input::with_theme(theme)
        .with_prompt("Search memes")
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(search.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vault_types::MemeBuilder;

    #[test]
    fn test_available_actions() {
        let mut meme = Meme::new(MemeBuilder {
            url: "https://a.example".to_string(),
            ..Default::default()
        });
        assert!(!Action::available(&meme).contains(&Action::CopyImage));
        assert_eq!(Action::ToggleFavorite.label(&meme), "Add to Favorites");

        meme.image_url = Some("https://a.example/a.gif".to_string());
        meme.is_favorite = true;
        assert_eq!(Action::available(&meme)[1], Action::CopyImage);
        assert_eq!(Action::ToggleFavorite.label(&meme), "Remove from Favorites");
    }
}
