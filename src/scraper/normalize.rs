use once_cell::sync::Lazy;
use regex::Regex;

/// 默认的可抓取镜像站（为 Twitter/X 帖子提供 OG 标签）
pub const DEFAULT_MIRROR_HOST: &str = "fxtwitter.com";

static STATUS_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^https?://(?:www\.)?(?:twitter\.com|x\.com)/([^/]+)/status/(\d+)")
        .expect("status URL pattern is valid")
});

/// 规范化后的抓取目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeTarget {
    pub url: String,
    /// 目标是镜像站，需要使用 bot User-Agent
    pub via_mirror: bool,
}

/// 将 Twitter/X 帖子链接改写到镜像站，其它 URL 原样返回
///
/// 只保留作者和帖子 ID，查询参数和多余路径会被丢弃。
pub fn normalize_url(url: &str, mirror_host: &str) -> ScrapeTarget {
    match STATUS_URL_RE.captures(url) {
        Some(caps) => ScrapeTarget {
            url: format!("https://{}/{}/status/{}", mirror_host, &caps[1], &caps[2]),
            via_mirror: true,
        },
        None => ScrapeTarget {
            url: url.to_string(),
            via_mirror: is_mirror_host(url, mirror_host),
        },
    }
}

/// 判断 URL 的主机是否为镜像站（含 www. 前缀）
pub fn is_mirror_host(url: &str, mirror_host: &str) -> bool {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()))
        .map(|host| {
            let mirror = mirror_host.to_ascii_lowercase();
            host == mirror || host.strip_prefix("www.") == Some(mirror.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(url: &str) -> ScrapeTarget {
        normalize_url(url, DEFAULT_MIRROR_HOST)
    }

    #[test]
    fn test_rewrites_twitter_and_x() {
        let cases = [
            "https://twitter.com/jack/status/20",
            "https://www.twitter.com/jack/status/20",
            "http://x.com/jack/status/20",
            "https://www.x.com/jack/status/20?s=46&t=abc",
            "HTTPS://X.COM/jack/status/20/photo/1",
        ];

        for case in cases {
            let target = normalize(case);
            assert_eq!(target.url, "https://fxtwitter.com/jack/status/20", "{}", case);
            assert!(target.via_mirror);
        }
    }

    #[test]
    fn test_preserves_handle_case_and_id() {
        let target = normalize("https://x.com/Some_User/status/1234567890123456789");
        assert_eq!(
            target.url,
            "https://fxtwitter.com/Some_User/status/1234567890123456789"
        );
    }

    #[test]
    fn test_other_urls_pass_through() {
        let cases = [
            "https://tenor.com/view/cat-dance",
            "https://x.com/jack",
            "https://twitter.com/jack/likes",
            "https://notx.com/jack/status/20",
            "https://x.com/jack/status/abc",
            "ftp://x.com/jack/status/20",
            "not a url",
        ];

        for case in cases {
            let target = normalize(case);
            assert_eq!(target.url, case);
            assert!(!target.via_mirror, "{}", case);
        }
    }

    #[test]
    fn test_direct_mirror_urls_use_bot_agent() {
        assert!(normalize("https://fxtwitter.com/jack/status/20").via_mirror);
        assert!(normalize("https://www.FXTwitter.com/jack/status/20").via_mirror);
        assert!(!normalize("https://notfxtwitter.com/a").via_mirror);
    }

    #[test]
    fn test_custom_mirror_host() {
        let target = normalize_url("https://x.com/jack/status/20", "vxtwitter.com");
        assert_eq!(target.url, "https://vxtwitter.com/jack/status/20");
        assert!(target.via_mirror);
    }
}
