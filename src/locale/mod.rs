mod messages;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use messages::{Messages, messages};

/// 站点支持的语言，`En` 为默认语言（URL 不带前缀）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

pub const SUPPORTED_LOCALES: [Locale; 2] = [Locale::En, Locale::Zh];

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }

    /// 只接受 `en` / `zh`（不区分大小写），其它输入一律返回 None
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("en") {
            Some(Locale::En)
        } else if value.eq_ignore_ascii_case("zh") {
            Some(Locale::Zh)
        } else {
            None
        }
    }

    pub fn html_lang(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh-CN",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// 请求经过语言解析后的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleDecision {
    Render(Locale),
    Redirect { location: String, permanent: bool },
}

/// 根据 Accept-Language 判断访客是否偏好中文（zh、zh-cn、zh-hans 等）
pub fn prefers_chinese(accept_language: &str) -> bool {
    accept_language.split(',').any(|entry| {
        let mut parts = entry.split(';');
        let tag = parts.next().unwrap_or("").trim().to_ascii_lowercase();
        // q=0 表示明确不接受
        let rejected = parts.any(|param| {
            param
                .trim()
                .strip_prefix("q=")
                .and_then(|q| q.trim().parse::<f32>().ok())
                .is_some_and(|q| q <= 0.0)
        });
        !rejected && (tag == "zh" || tag.starts_with("zh-"))
    })
}

fn first_segment(path: &str) -> Option<&str> {
    path.trim_start_matches('/')
        .split('/')
        .next()
        .filter(|segment| !segment.is_empty())
}

pub fn resolve_locale_from_pathname(path: &str) -> Locale {
    first_segment(path)
        .filter(|segment| SUPPORTED_LOCALES.iter().any(|l| l.code() == *segment))
        .and_then(Locale::parse)
        .unwrap_or_default()
}

pub fn build_path(locale: Locale, relative: &str) -> String {
    let normalized = if relative.starts_with('/') {
        relative.to_string()
    } else {
        format!("/{relative}")
    };

    match locale {
        Locale::En => normalized,
        Locale::Zh if normalized == "/" => "/zh".to_string(),
        Locale::Zh => format!("/zh{normalized}"),
    }
}

// 形如 `fr`、`zh-CN`、`zh-Hans` 的路径段
fn split_locale_tag(segment: &str) -> Option<(&str, Option<&str>)> {
    let (language, region) = match segment.split_once('-') {
        Some((language, region)) => (language, Some(region)),
        None => (segment, None),
    };

    let language_ok = language.len() == 2 && language.chars().all(|c| c.is_ascii_alphabetic());
    let region_ok = region.is_none_or(|r| {
        (2..=4).contains(&r.len()) && r.chars().all(|c| c.is_ascii_alphanumeric())
    });

    (language_ok && region_ok).then_some((language, region))
}

/// 所有页面路由的语言重定向都从这里决定
pub fn resolve_request(path: &str, accept_language: Option<&str>) -> LocaleDecision {
    let path = if path.is_empty() { "/" } else { path };

    if path == "/" {
        if accept_language.is_some_and(prefers_chinese) {
            return LocaleDecision::Redirect {
                location: build_path(Locale::Zh, "/"),
                permanent: false,
            };
        }
        return LocaleDecision::Render(Locale::En);
    }

    let Some(segment) = first_segment(path) else {
        return LocaleDecision::Render(Locale::En);
    };

    if let Some(locale) = SUPPORTED_LOCALES.iter().find(|l| l.code() == segment) {
        return LocaleDecision::Render(*locale);
    }

    let Some((language, region)) = split_locale_tag(segment) else {
        return LocaleDecision::Render(Locale::En);
    };

    match (Locale::parse(language), region) {
        // 语言支持但大小写或地区不匹配，例如 /zh-CN/moments、/ZH/moments -> /zh/moments
        (Some(locale), _) => {
            let rest = &path.trim_start_matches('/')[segment.len()..];
            LocaleDecision::Redirect {
                location: build_path(locale, if rest.is_empty() { "/" } else { rest }),
                permanent: true,
            }
        }
        // 旧路由规则：不支持的语言段被保留在 /en 之下（/fr/x -> /en/fr/x）
        _ => LocaleDecision::Redirect {
            location: format!("/en{path}"),
            permanent: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_path_prefixes_only_secondary_locale() {
        assert_eq!(build_path(Locale::En, "/moments"), "/moments");
        assert_eq!(build_path(Locale::Zh, "/moments"), "/zh/moments");
        assert_eq!(build_path(Locale::Zh, "/"), "/zh");
        assert_eq!(build_path(Locale::En, "/"), "/");
        assert_eq!(build_path(Locale::Zh, "m/abc"), "/zh/m/abc");
        assert_eq!(build_path(Locale::En, "m/abc"), "/m/abc");
    }

    #[test]
    fn build_path_round_trips_through_resolver() {
        let paths = ["/", "/moments", "m/hello", "/m/feed.json", "/about/me", ""];
        for locale in SUPPORTED_LOCALES {
            for path in paths {
                let built = build_path(locale, path);
                assert_eq!(resolve_locale_from_pathname(&built), locale, "path {built}");
            }
        }
    }

    #[test]
    fn pathname_without_locale_segment_is_default() {
        assert_eq!(resolve_locale_from_pathname("/moments"), Locale::En);
        assert_eq!(resolve_locale_from_pathname("/zhx/abc"), Locale::En);
        assert_eq!(resolve_locale_from_pathname("/ZH/abc"), Locale::En);
        assert_eq!(resolve_locale_from_pathname("/zh"), Locale::Zh);
        assert_eq!(resolve_locale_from_pathname("/en/x"), Locale::En);
    }

    #[test]
    fn accept_language_detection() {
        assert!(prefers_chinese("zh-CN,zh;q=0.9"));
        assert!(prefers_chinese("zh-Hans"));
        assert!(prefers_chinese("ZH"));
        assert!(!prefers_chinese("en-US,en;q=0.9"));
        assert!(!prefers_chinese(""));
        assert!(!prefers_chinese("en, zh;q=0"));
    }

    #[test]
    fn root_redirects_chinese_visitors() {
        assert_eq!(
            resolve_request("/", Some("zh-CN,zh;q=0.9")),
            LocaleDecision::Redirect {
                location: "/zh".into(),
                permanent: false
            }
        );
        assert_eq!(
            resolve_request("/", Some("en-US,en;q=0.9")),
            LocaleDecision::Render(Locale::En)
        );
        assert_eq!(resolve_request("/", None), LocaleDecision::Render(Locale::En));
        // 只在站点根目录重定向
        assert_eq!(
            resolve_request("/moments", Some("zh-CN")),
            LocaleDecision::Render(Locale::En)
        );
    }

    #[test]
    fn unsupported_locale_segment_redirects_under_en() {
        assert_eq!(
            resolve_request("/fr/posts", None),
            LocaleDecision::Redirect {
                location: "/en/fr/posts".into(),
                permanent: true
            }
        );
    }

    #[test]
    fn case_variants_redirect_to_canonical_prefix() {
        assert_eq!(
            resolve_request("/ZH/moments", None),
            LocaleDecision::Redirect {
                location: "/zh/moments".into(),
                permanent: true
            }
        );
        assert_eq!(
            resolve_request("/EN/x", None),
            LocaleDecision::Redirect {
                location: "/x".into(),
                permanent: true
            }
        );
        assert_eq!(
            resolve_request("/Zh", None),
            LocaleDecision::Redirect {
                location: "/zh".into(),
                permanent: true
            }
        );
    }

    #[test]
    fn mismatched_region_redirects_to_language_root() {
        assert_eq!(
            resolve_request("/zh-CN/moments", None),
            LocaleDecision::Redirect {
                location: "/zh/moments".into(),
                permanent: true
            }
        );
        assert_eq!(
            resolve_request("/en-US", None),
            LocaleDecision::Redirect {
                location: "/".into(),
                permanent: true
            }
        );
    }

    #[test]
    fn non_locale_segments_render_default() {
        assert_eq!(resolve_request("/m/feed.json", None), LocaleDecision::Render(Locale::En));
        assert_eq!(resolve_request("/api/health", None), LocaleDecision::Render(Locale::En));
        assert_eq!(resolve_request("/zh/m/abc", None), LocaleDecision::Render(Locale::Zh));
    }
}
