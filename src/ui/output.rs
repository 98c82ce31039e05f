use console::Style;
use std::io::{self, Write};
use std::path::Path;

use vault_types::Meme;

use super::format::{count_label, short_id, subtitle};

/// 命令行输出格式化工具
/// 提供统一的 Cargo 风格输出：状态信息写 stderr，数据写 stdout
pub struct Output {
    green: Style,
    bold: Style,
    dim: Style,
}

impl Output {
    pub fn new() -> Self {
        Self {
            green: Style::new().green().bold(),
            bold: Style::new().bold(),
            dim: Style::new().dim(),
        }
    }

    /// 显示状态消息（如 "Fetching https://..."）
    /// 格式: "    Fetching target"（动词右对齐到 12 字符）
    pub fn status(&self, action: &str, target: &str) {
        eprintln!("{:>12} {}", self.green.apply_to(action), target);
    }

    /// 开始执行操作的状态消息（会在前面自动添加空行）
    pub fn begin_operation(&self, action: &str, target: &str) {
        eprintln!();
        eprintln!("{:>12} {}", self.green.apply_to(action), target);
    }

    /// 显示数据目录信息
    /// 格式: "       Vault /path/to/vault (12 memes)"
    /// 自动在后面添加空行
    pub fn vault_info(&self, path: &Path, record_count: usize) {
        eprintln!(
            "{:>12} {} {}",
            self.green.apply_to("Vault"),
            path.display(),
            self.dim.apply_to(format!("({})", count_label(record_count)))
        );
        eprintln!();
    }

    /// 显示创建/查找资源消息
    /// 格式: "    Creating config at /path/to/config"
    pub fn resource_action(&self, action: &str, resource: &str, path: &Path) {
        eprintln!(
            "{:>12} {} at {}",
            self.green.apply_to(action),
            resource,
            path.display()
        );
    }

    /// 显示完成消息
    /// 格式: "    Finished action for scope"
    /// 自动在前面添加空行
    pub fn finish(&self, action: &str, scope: &str) {
        eprintln!();
        eprintln!(
            "{:>12} {} for {} scope",
            self.green.apply_to("Finished"),
            action,
            scope
        );
    }

    /// 操作成功提示
    /// 格式: "       Saved Cat Dance"
    pub fn success(&self, title: &str, message: &str) {
        eprintln!("{:>12} {}", self.green.apply_to(title), message);
    }

    /// 操作失败提示（红色）
    pub fn failure(&self, title: &str, message: &str) {
        eprintln!(
            "{:>12} {}",
            Style::new().red().bold().apply_to(title),
            message
        );
    }

    /// 显示统计信息
    /// 格式: "             12 memes, 3 favorites"
    pub fn stats(&self, items: &[(&str, String)]) {
        let parts: Vec<String> = items
            .iter()
            .map(|(name, value)| format!("{} {}", value, name))
            .collect();
        eprintln!("{:>12} {}", "", self.dim.apply_to(parts.join(", ")));
    }

    /// 显示分组标题
    /// 格式: "Favorites (2 memes)"
    pub fn section(&self, title: &str, count: usize) {
        println!(
            "{} {}",
            self.bold.apply_to(title),
            self.dim.apply_to(format!("({})", count_label(count)))
        );
    }

    /// 显示单个记录
    /// 格式: "[1/5] 0f3c2a9e Cat Dance"
    ///       "      ★ 3× · description"
    ///       "      https://tenor.com/view/cat-dance"
    fn meme_item(&self, index: usize, total: usize, meme: &Meme) {
        let index_part = format!("{}/{}", index, total);

        println!(
            "[{}] {} {}",
            self.dim.apply_to(&index_part),
            self.green.apply_to(short_id(&meme.id)),
            self.bold.apply_to(meme.title.as_deref().unwrap_or("Untitled"))
        );

        // 缩进与 ID 对齐
        let indent = " ".repeat(index_part.len() + 3);
        println!("{}{}", indent, self.dim.apply_to(subtitle(meme)));
        println!("{}{}", indent, meme.url);
    }

    /// 显示一组记录（自动处理分隔和格式化）
    pub fn meme_list(&self, memes: &[Meme]) {
        let total = memes.len();
        for (i, meme) in memes.iter().enumerate() {
            self.meme_item(i + 1, total, meme);

            if i < memes.len() - 1 {
                println!();
            }
        }
    }

    /// 显示注意事项（右对齐）
    pub fn note(&self, message: &str) {
        eprintln!("{:>12} {}", self.dim.apply_to("Note"), message);
    }

    /// 显示警告（黄色，右对齐）
    /// 自动在前面添加空行
    pub fn warning(&self, message: &str) {
        eprintln!();
        eprintln!(
            "{:>12} {}",
            Style::new().yellow().bold().apply_to("Warning"),
            message
        );
        eprintln!();
    }

    /// 显示错误（红色，右对齐）
    pub fn error(&self, message: &str) {
        eprintln!(
            "{:>12} {}",
            Style::new().red().bold().apply_to("Error"),
            message
        );
    }

    /// 显示提示消息（标准错误，右对齐）
    pub fn info(&self, message: &str) {
        eprintln!("{:>12} {}", "", message);
    }

    /// 显示确认提示并读取用户输入
    /// 返回用户是否输入了期望的文本
    pub fn confirm(&self, expected: &str) -> io::Result<bool> {
        eprintln!();
        eprint!(
            "{:>12} Type {} to confirm: ",
            "",
            Style::new().green().bold().apply_to(expected)
        );
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        Ok(input.trim() == expected)
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
