//! Best-effort Open Graph extraction from raw HTML.
//!
//! Never fails: missing or malformed tags simply leave fields unset.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

use vault_types::OgMetadata;

static TITLE_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<title[^>]*>([^<]+)</title>").expect("title pattern is valid"));

/// 提取器会查找的全部 meta 名称
const META_TAGS: &[&str] = &[
    "og:image",
    "twitter:image",
    "og:title",
    "twitter:title",
    "og:description",
    "twitter:description",
    "og:image:width",
    "og:image:height",
];

/// 每个 meta 名称对应的四个模式，只编译一次
static META_PATTERNS: Lazy<HashMap<&'static str, Vec<Regex>>> = Lazy::new(|| {
    META_TAGS
        .iter()
        .map(|tag| (*tag, meta_patterns(tag)))
        .collect()
});

static ENTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);")
        .expect("entity pattern is valid")
});

/// 从 HTML 中提取元数据
pub fn parse_og_metadata(html: &str) -> OgMetadata {
    let image_url = meta_content(html, "og:image").or_else(|| meta_content(html, "twitter:image"));

    let title = meta_content(html, "og:title")
        .or_else(|| meta_content(html, "twitter:title"))
        .or_else(|| title_tag(html));

    let description =
        meta_content(html, "og:description").or_else(|| meta_content(html, "twitter:description"));

    OgMetadata {
        title,
        description,
        image_url,
        aspect_ratio: aspect_ratio(html),
    }
}

/// property/name 两种属性，以及 content 在前/在后两种顺序
fn meta_patterns(property: &str) -> Vec<Regex> {
    let name = regex::escape(property);
    let attr_value = r#"["']([^"']+)["']"#;

    [
        format!(r#"(?i)<meta[^>]*property=["']{name}["'][^>]*content={attr_value}[^>]*>"#),
        format!(r#"(?i)<meta[^>]*content={attr_value}[^>]*property=["']{name}["'][^>]*>"#),
        format!(r#"(?i)<meta[^>]*name=["']{name}["'][^>]*content={attr_value}[^>]*>"#),
        format!(r#"(?i)<meta[^>]*content={attr_value}[^>]*name=["']{name}["'][^>]*>"#),
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("meta pattern is valid"))
    .collect()
}

/// 查找 meta 标签的 content，按模式顺序取第一个匹配
fn meta_content(html: &str, property: &str) -> Option<String> {
    META_PATTERNS.get(property)?.iter().find_map(|re| {
        let value = re.captures(html)?.get(1)?.as_str();
        Some(decode_html_entities(value))
    })
}

/// `<title>` 元素文本（去除首尾空白）
fn title_tag(html: &str) -> Option<String> {
    let text = TITLE_TAG_RE.captures(html)?.get(1)?.as_str().trim();
    if text.is_empty() {
        return None;
    }
    Some(decode_html_entities(text))
}

/// 宽高都存在且为正整数时计算 width / height
fn aspect_ratio(html: &str) -> Option<f64> {
    let width = parse_leading_int(&meta_content(html, "og:image:width")?)?;
    let height = parse_leading_int(&meta_content(html, "og:image:height")?)?;

    if width > 0 && height > 0 {
        Some(width as f64 / height as f64)
    } else {
        None
    }
}

/// 解析开头的整数部分（"630px" -> 630），没有数字时返回 None
fn parse_leading_int(value: &str) -> Option<i64> {
    let value = value.trim();
    let (sign, digits) = match value.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, value.strip_prefix('+').unwrap_or(value)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// 解码 HTML 实体（单遍替换，不会重复解码）
pub fn decode_html_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ if entity.starts_with("#x") || entity.starts_with("#X") => {
                    u32::from_str_radix(&entity[2..], 16).ok().and_then(char::from_u32)
                }
                _ => entity[1..].parse::<u32>().ok().and_then(char::from_u32),
            };

            // 无效的码点保持原样
            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
