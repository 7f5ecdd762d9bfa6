use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::{
    feed::moment_title,
    locale::{Locale, build_path, messages},
    models::Moment,
};

const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI","PingFang SC",sans-serif;line-height:1.7;color:#111;background:#fafafa;padding:1.5rem 1rem}
header,main{max-width:640px;margin:0 auto}
nav{display:flex;gap:1rem;margin-bottom:2rem}
nav .lang{margin-left:auto}
a{color:#2a5db0;text-decoration:none}
h1{font-size:1.6rem;margin-bottom:1rem}
.moment{padding:1rem 0;border-bottom:1px solid #eee}
.moment p{white-space:pre-wrap;word-break:break-word}
time{font-size:.85rem;color:#888}
"#;

fn other(locale: Locale) -> Locale {
    match locale {
        Locale::En => Locale::Zh,
        Locale::Zh => Locale::En,
    }
}

fn moment_path(locale: Locale, moment: &Moment) -> String {
    build_path(locale, &format!("/m/{}", moment.public_key()))
}

/// `path` 为不带语言前缀的页面路径，用于生成语言切换链接
fn layout(locale: Locale, title: &str, path: &str, content: Markup) -> Markup {
    let m = messages(locale);
    html! {
        (DOCTYPE)
        html lang=(locale.html_lang()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " · " (m.site_title) }
                link rel="alternate" type="application/feed+json" href="/m/feed.json";
                link rel="alternate" type="application/rss+xml" href="/m/rss.xml";
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                header {
                    nav {
                        a href=(build_path(locale, "/")) { (m.nav_home) }
                        a href=(build_path(locale, "/moments")) { (m.nav_moments) }
                        a class="lang" href=(build_path(other(locale), path)) { (m.switch_language) }
                    }
                }
                main { (content) }
            }
        }
    }
}

fn moment_card(locale: Locale, moment: &Moment) -> Markup {
    html! {
        article class="moment" {
            p { (moment.content) }
            a href=(moment_path(locale, moment)) {
                time datetime=(moment.created_at.to_rfc3339()) {
                    (moment.created_at.format("%Y-%m-%d %H:%M").to_string())
                }
            }
        }
    }
}

pub fn home(locale: Locale, moments: &[Moment]) -> Markup {
    let m = messages(locale);
    layout(
        locale,
        m.nav_home,
        "/",
        html! {
            h1 { (m.site_title) }
            p { (m.home_intro) }
            h2 { (m.latest_heading) }
            @if moments.is_empty() {
                p { (m.no_moments) }
            }
            @for moment in moments {
                (moment_card(locale, moment))
            }
            p { a href=(build_path(locale, "/moments")) { (m.view_all) } }
        },
    )
}

pub fn list(locale: Locale, moments: &[Moment]) -> Markup {
    let m = messages(locale);
    layout(
        locale,
        m.moments_heading,
        "/moments",
        html! {
            h1 { (m.moments_heading) }
            @if moments.is_empty() {
                p { (m.no_moments) }
            }
            @for moment in moments {
                (moment_card(locale, moment))
            }
        },
    )
}

pub fn detail(locale: Locale, moment: &Moment) -> Markup {
    let m = messages(locale);
    let path = format!("/m/{}", moment.public_key());
    layout(
        locale,
        &moment_title(moment),
        &path,
        html! {
            (moment_card(locale, moment))
            p { a href=(build_path(locale, "/moments")) { (m.back_to_moments) } }
        },
    )
}

pub fn not_found(locale: Locale, message: &str) -> Markup {
    layout(
        locale,
        "404",
        "/",
        html! {
            h1 { "404" }
            p { (message) }
        },
    )
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::{MomentStatus, Visibility};

    fn moment(content: &str) -> Moment {
        Moment {
            id: Uuid::new_v4(),
            slug: Some("tea".into()),
            content: content.into(),
            status: MomentStatus::Published,
            visibility: Visibility::Public,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            scheduled_at: None,
        }
    }

    #[test]
    fn chinese_pages_link_with_prefix() {
        let html = list(Locale::Zh, &[moment("喝茶")]).into_string();
        assert!(html.contains("lang=\"zh-CN\""));
        assert!(html.contains("href=\"/zh/m/tea\""));
        assert!(html.contains("href=\"/zh/moments\""));
        // 语言切换指向英文同一页面
        assert!(html.contains("href=\"/moments\""));
    }

    #[test]
    fn english_pages_are_prefix_free() {
        let html = detail(Locale::En, &moment("tea time")).into_string();
        assert!(html.contains("href=\"/m/tea\""));
        assert!(html.contains("href=\"/zh/m/tea\""));
    }

    #[test]
    fn content_is_html_escaped() {
        let html = list(Locale::En, &[moment("<b>bold</b>")]).into_string();
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }
}
