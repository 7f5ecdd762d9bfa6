use super::Locale;

/// 页面与错误响应中展示给用户的文案
#[derive(Debug)]
pub struct Messages {
    pub site_title: &'static str,
    pub home_intro: &'static str,
    pub nav_home: &'static str,
    pub nav_moments: &'static str,
    pub moments_heading: &'static str,
    pub latest_heading: &'static str,
    pub no_moments: &'static str,
    pub view_all: &'static str,
    pub back_to_moments: &'static str,
    pub switch_language: &'static str,
    pub not_found: &'static str,
    pub unauthorized: &'static str,
    pub forbidden: &'static str,
    pub rate_limited: &'static str,
    pub internal_error: &'static str,
}

static EN: Messages = Messages {
    site_title: "Notes & Moments",
    home_intro: "Writing, photos and small moments.",
    nav_home: "Home",
    nav_moments: "Moments",
    moments_heading: "Moments",
    latest_heading: "Latest moments",
    no_moments: "Nothing posted yet.",
    view_all: "View all",
    back_to_moments: "Back to moments",
    switch_language: "中文",
    not_found: "The page you requested could not be found.",
    unauthorized: "Please sign in to continue.",
    forbidden: "You do not have permission to do that.",
    rate_limited: "Too many attempts. Please try again later.",
    internal_error: "Something went wrong on our side.",
};

static ZH: Messages = Messages {
    site_title: "随笔与瞬间",
    home_intro: "文字、照片和一些小瞬间。",
    nav_home: "首页",
    nav_moments: "瞬间",
    moments_heading: "瞬间",
    latest_heading: "最新瞬间",
    no_moments: "还没有发布内容。",
    view_all: "查看全部",
    back_to_moments: "返回瞬间列表",
    switch_language: "English",
    not_found: "找不到你请求的页面。",
    unauthorized: "请先登录。",
    forbidden: "没有执行该操作的权限。",
    rate_limited: "尝试次数过多，请稍后再试。",
    internal_error: "服务器内部错误。",
};

pub fn messages(locale: Locale) -> &'static Messages {
    match locale {
        Locale::En => &EN,
        Locale::Zh => &ZH,
    }
}
