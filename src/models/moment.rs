use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "moment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MomentStatus {
    Draft,
    Scheduled,
    Published,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "moment_visibility", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Unlisted,
    Private,
}

/// 短内容动态（类似微博）。由持久层拥有，这里只读取快照
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Moment {
    pub id: Uuid,
    pub slug: Option<String>,
    pub content: String,
    pub status: MomentStatus,
    pub visibility: Visibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl Moment {
    /// 公开地址中使用的标识：优先 slug，否则使用 id
    pub fn public_key(&self) -> String {
        match self.slug.as_deref() {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => self.id.to_string(),
        }
    }

    pub fn is_listed(&self) -> bool {
        self.status == MomentStatus::Published && self.visibility == Visibility::Public
    }

    /// 匹配 slug 或 id 字符串
    pub fn matches_key(&self, key: &str) -> bool {
        self.slug.as_deref() == Some(key) || self.id.to_string() == key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moment(slug: Option<&str>) -> Moment {
        let now = Utc::now();
        Moment {
            id: Uuid::new_v4(),
            slug: slug.map(str::to_string),
            content: "hello".into(),
            status: MomentStatus::Published,
            visibility: Visibility::Public,
            created_at: now,
            updated_at: now,
            scheduled_at: None,
        }
    }

    #[test]
    fn public_key_prefers_slug() {
        let m = moment(Some("first-light"));
        assert_eq!(m.public_key(), "first-light");
        assert!(m.matches_key("first-light"));
        assert!(m.matches_key(&m.id.to_string()));
    }

    #[test]
    fn empty_slug_falls_back_to_id() {
        let m = moment(Some(""));
        assert_eq!(m.public_key(), m.id.to_string());
    }

    #[test]
    fn only_published_public_moments_are_listed() {
        let mut m = moment(None);
        assert!(m.is_listed());
        m.visibility = Visibility::Unlisted;
        assert!(!m.is_listed());
        m.visibility = Visibility::Public;
        m.status = MomentStatus::Scheduled;
        assert!(!m.is_listed());
    }
}
