use chrono::{DateTime, Utc};

use vault_types::Meme;

const DESCRIPTION_LIMIT: usize = 60;

/// 截断描述（约 60 字符，为统计信息留出空间）
pub fn truncate_description(description: Option<&str>) -> String {
    let Some(description) = description else {
        return String::new();
    };

    if description.chars().count() <= DESCRIPTION_LIMIT {
        return description.to_string();
    }

    let head: String = description.chars().take(DESCRIPTION_LIMIT - 3).collect();
    format!("{}...", head)
}

/// 副标题：统计信息在前，描述在后
/// 格式: "★ 3× · description"
pub fn subtitle(meme: &Meme) -> String {
    let stats = format!(
        "{}{}×",
        if meme.is_favorite { "★ " } else { "" },
        meme.usage_count
    );
    let description = truncate_description(meme.description.as_deref());

    if description.is_empty() {
        stats
    } else {
        format!("{} · {}", stats, description)
    }
}

/// "1 meme" / "3 memes"
pub fn count_label(count: usize) -> String {
    format!("{} {}", count, if count == 1 { "meme" } else { "memes" })
}

/// 日期格式: "Oct 19, 2026"
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// 列表中显示的短 ID
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((index, _)) => &id[..index],
        None => id,
    }
}
