//! 动态的 JSON Feed / RSS / sitemap 投影
//!
//! 只读取传入的快照，不做任何缓存；新鲜度交给 HTTP 层的 `Cache-Control`。

use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::models::Moment;

pub const FEED_LIMIT: usize = 50;
pub const SITEMAP_LIMIT: usize = 500;
/// 与应用层的重新验证间隔（10 分钟）保持一致
pub const FEED_CACHE_CONTROL: &str = "s-maxage=600";

pub const JSON_FEED_VERSION: &str = "https://jsonfeed.org/version/1.1";
pub const FEED_TITLE: &str = "Moments";
pub const FEED_DESCRIPTION: &str = "Short notes and moments";
const TITLE_CHARS: usize = 60;

#[derive(Debug, Serialize)]
pub struct JsonFeed {
    pub version: &'static str,
    pub title: &'static str,
    pub home_page_url: String,
    pub feed_url: String,
    pub items: Vec<JsonFeedItem>,
}

#[derive(Debug, Serialize)]
pub struct JsonFeedItem {
    pub id: String,
    pub url: String,
    pub title: String,
    pub content_text: String,
    pub date_published: String,
}

// XML 1.0 不允许出现的字符，即使转义成字符引用也不行
fn is_xml_illegal(c: char) -> bool {
    (c < '\u{20}' && !matches!(c, '\t' | '\n' | '\r')) || matches!(c, '\u{FFFE}' | '\u{FFFF}')
}

/// 转义 `<`、`>`、`&`、`"` 并丢弃 XML 不接受的控制字符，标题与正文都必须经过这里
pub fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            c if is_xml_illegal(c) => {}
            _ => out.push(c),
        }
    }
    out
}

pub fn iso8601(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn moment_url(base_url: &str, moment: &Moment) -> String {
    format!("{}/m/{}", base_url.trim_end_matches('/'), moment.public_key())
}

/// 取正文前 60 个字符作为标题
pub fn moment_title(moment: &Moment) -> String {
    moment.content.chars().take(TITLE_CHARS).collect()
}

/// 过滤出已发布的公开动态，按创建时间倒序（稳定排序），并截断到 `limit`
pub fn select_items(moments: &[Moment], limit: usize) -> Vec<&Moment> {
    let mut items: Vec<&Moment> = moments.iter().filter(|m| m.is_listed()).collect();
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items.truncate(limit);
    items
}

pub fn json_feed(moments: &[Moment], base_url: &str) -> JsonFeed {
    let base = base_url.trim_end_matches('/');
    let items = select_items(moments, FEED_LIMIT)
        .into_iter()
        .map(|moment| {
            let url = moment_url(base, moment);
            JsonFeedItem {
                id: url.clone(),
                url,
                title: moment_title(moment),
                content_text: moment.content.clone(),
                date_published: iso8601(moment.created_at),
            }
        })
        .collect();

    JsonFeed {
        version: JSON_FEED_VERSION,
        title: FEED_TITLE,
        home_page_url: format!("{base}/moments"),
        feed_url: format!("{base}/m/feed.json"),
        items,
    }
}

pub fn rss(moments: &[Moment], base_url: &str, built_at: DateTime<Utc>) -> String {
    let base = base_url.trim_end_matches('/');
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<rss version=\"2.0\">\n<channel>\n");
    let _ = writeln!(xml, "<title>{}</title>", xml_escape(FEED_TITLE));
    let _ = writeln!(xml, "<link>{}</link>", xml_escape(&format!("{base}/moments")));
    let _ = writeln!(xml, "<description>{}</description>", xml_escape(FEED_DESCRIPTION));
    let _ = writeln!(xml, "<lastBuildDate>{}</lastBuildDate>", built_at.to_rfc2822());

    for moment in select_items(moments, FEED_LIMIT) {
        let url = xml_escape(&moment_url(base, moment));
        xml.push_str("<item>\n");
        let _ = writeln!(xml, "<title>{}</title>", xml_escape(&moment_title(moment)));
        let _ = writeln!(xml, "<link>{url}</link>");
        let _ = writeln!(xml, "<guid isPermaLink=\"true\">{url}</guid>");
        let _ = writeln!(xml, "<description>{}</description>", xml_escape(&moment.content));
        let _ = writeln!(xml, "<pubDate>{}</pubDate>", moment.created_at.to_rfc2822());
        xml.push_str("</item>\n");
    }

    xml.push_str("</channel>\n</rss>\n");
    xml
}

pub fn sitemap(moments: &[Moment], base_url: &str) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");
    for moment in select_items(moments, SITEMAP_LIMIT) {
        let _ = writeln!(
            xml,
            "<url><loc>{}</loc><lastmod>{}</lastmod></url>",
            xml_escape(&moment_url(base_url, moment)),
            iso8601(moment.updated_at)
        );
    }
    xml.push_str("</urlset>\n");
    xml
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    use super::*;
    use crate::models::{MomentStatus, Visibility};

    fn moment_at(minutes: i64, content: &str) -> Moment {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap() + Duration::minutes(minutes);
        Moment {
            id: Uuid::new_v4(),
            slug: None,
            content: content.to_string(),
            status: MomentStatus::Published,
            visibility: Visibility::Public,
            created_at: created,
            updated_at: created + Duration::hours(1),
            scheduled_at: None,
        }
    }

    #[test]
    fn escapes_the_four_special_characters() {
        assert_eq!(
            xml_escape("<script>&\"</script>"),
            "&lt;script&gt;&amp;&quot;&lt;/script&gt;"
        );
        assert_eq!(xml_escape("plain 中文"), "plain 中文");
    }

    #[test]
    fn drops_control_characters_xml_rejects() {
        assert_eq!(xml_escape("line\u{0008}feed"), "linefeed");
        assert_eq!(xml_escape("a\u{0}b\u{0B}c\u{0C}d\u{1F}e\u{FFFF}"), "abcde");
        assert_eq!(xml_escape("tab\there\r\nnext"), "tab\there\r\nnext");
    }

    #[test]
    fn rss_output_never_contains_raw_markup_from_content() {
        let moments = vec![moment_at(0, "<script>&\"</script>")];
        let xml = rss(&moments, "https://example.com", Utc::now());
        assert!(!xml.contains("<script>"));
        assert!(xml.contains("<title>&lt;script&gt;&amp;&quot;&lt;/script&gt;</title>"));
        assert!(
            xml.contains("<description>&lt;script&gt;&amp;&quot;&lt;/script&gt;</description>")
        );
    }

    #[test]
    fn title_is_first_sixty_characters() {
        let long = "字".repeat(80);
        let m = moment_at(0, &long);
        assert_eq!(moment_title(&m).chars().count(), 60);
        assert_eq!(moment_title(&moment_at(0, "short")), "short");
    }

    #[test]
    fn json_feed_uses_slug_then_id() {
        let mut with_slug = moment_at(1, "a");
        with_slug.slug = Some("hello".into());
        let without = moment_at(0, "b");
        let feed = json_feed(&[with_slug, without.clone()], "https://example.com/");

        assert_eq!(feed.version, JSON_FEED_VERSION);
        assert_eq!(feed.feed_url, "https://example.com/m/feed.json");
        assert_eq!(feed.items[0].url, "https://example.com/m/hello");
        assert_eq!(feed.items[0].id, feed.items[0].url);
        assert_eq!(feed.items[1].url, format!("https://example.com/m/{}", without.id));
        assert_eq!(feed.items[0].date_published, "2024-05-01T08:01:00.000Z");
    }

    #[test]
    fn selection_filters_sorts_and_caps() {
        let mut moments: Vec<Moment> = (0..120).map(|i| moment_at(i, "x")).collect();
        moments[119].visibility = Visibility::Private;
        moments[118].status = MomentStatus::Draft;

        let items = select_items(&moments, FEED_LIMIT);
        assert_eq!(items.len(), 50);
        assert_eq!(items[0].created_at, moments[117].created_at);
        assert!(items.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn sitemap_uses_updated_at() {
        let m = moment_at(0, "x");
        let xml = sitemap(std::slice::from_ref(&m), "https://example.com");
        assert!(xml.contains(&format!(
            "<url><loc>https://example.com/m/{}</loc><lastmod>2024-05-01T09:00:00.000Z</lastmod></url>",
            m.id
        )));
    }

    #[test]
    fn empty_input_produces_empty_but_valid_documents() {
        let xml = sitemap(&[], "https://example.com");
        assert!(xml.contains("<urlset"));
        assert!(!xml.contains("<url>"));
        assert!(json_feed(&[], "https://example.com").items.is_empty());
    }
}
