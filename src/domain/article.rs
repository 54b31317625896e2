use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArticleStatus {
    Generating,
    Completed,
    Failed,
}

/// Generated title + body for one keyword record. Immutable after creation
/// except for the status transition out of `Generating`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDraft {
    pub id: String,
    /// Originating keyword record.
    pub keyword_id: String,
    pub title: String,
    pub content: String,
    /// Author profile used for style shaping, if any.
    pub author_id: Option<String>,
    pub status: ArticleStatus,
    pub created_at: DateTime<Utc>,
}

impl ArticleDraft {
    pub fn new(keyword_id: String, title: String, content: String, author_id: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            keyword_id,
            title,
            content,
            author_id,
            status: ArticleStatus::Completed,
            created_at: Utc::now(),
        }
    }
}
