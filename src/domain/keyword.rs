use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Search-intent category of a keyword. Closed set; CSV import rejects
/// anything outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeywordType {
    Decision,
    Comparison,
    Interest,
    Latent,
}

impl KeywordType {
    /// Display token used in CSV export and the planning UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordType::Decision => "今すぐ",
            KeywordType::Comparison => "比較検討",
            KeywordType::Interest => "興味関心",
            KeywordType::Latent => "潜在",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token.trim() {
            "今すぐ" => Some(KeywordType::Decision),
            "比較検討" => Some(KeywordType::Comparison),
            "興味関心" => Some(KeywordType::Interest),
            "潜在" => Some(KeywordType::Latent),
            _ => None,
        }
    }

    pub const ALL: [KeywordType; 4] = [
        KeywordType::Decision,
        KeywordType::Comparison,
        KeywordType::Interest,
        KeywordType::Latent,
    ];
}

/// Article format planned for a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArticleType {
    ComparisonArticle,
    HowTo,
    Glossary,
    UsefulInfo,
    CaseStudy,
}

impl ArticleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleType::ComparisonArticle => "比較記事",
            ArticleType::HowTo => "ハウツー",
            ArticleType::Glossary => "用語解説",
            ArticleType::UsefulInfo => "お役立ち情報",
            ArticleType::CaseStudy => "導入事例",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token.trim() {
            "比較記事" => Some(ArticleType::ComparisonArticle),
            "ハウツー" => Some(ArticleType::HowTo),
            "用語解説" => Some(ArticleType::Glossary),
            "お役立ち情報" => Some(ArticleType::UsefulInfo),
            "導入事例" => Some(ArticleType::CaseStudy),
            _ => None,
        }
    }
}

/// One taxonomy entry: a long-tail search phrase plus its planning metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordRecord {
    /// Immutable once assigned.
    pub id: String,
    /// Umbrella topic; equals the product name within one generated batch.
    pub parent_keyword: String,
    /// The specific long-tail phrase.
    pub child_keyword: String,
    pub keyword_type: KeywordType,
    /// Audience label this keyword was generated for.
    pub target: String,
    /// What the searcher wants when typing this phrase.
    pub search_intent: String,
    pub article_type: ArticleType,
    /// Ordered section outline the draft pipeline expands.
    pub h2_structure: Vec<String>,
    /// Unset until measured externally.
    pub current_rank: Option<u32>,
    /// Conversion contribution percentage; unset until measured.
    pub cv_contribution: Option<f64>,
    pub is_article_created: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl KeywordRecord {
    pub fn new(
        parent_keyword: String,
        child_keyword: String,
        keyword_type: KeywordType,
        target: String,
        search_intent: String,
        article_type: ArticleType,
        h2_structure: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            parent_keyword,
            child_keyword,
            keyword_type,
            target,
            search_intent,
            article_type,
            h2_structure,
            current_rank: None,
            cv_contribution: None,
            is_article_created: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at`. Call after any field mutation.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_type_token_round_trip() {
        for kt in KeywordType::ALL {
            assert_eq!(KeywordType::parse(kt.as_str()), Some(kt));
        }
        assert_eq!(KeywordType::parse("謎のトークン"), None);
    }

    #[test]
    fn test_record_serializes_with_camel_case_keys() {
        let record = KeywordRecord::new(
            "タスクフロー".to_string(),
            "タスクフロー 比較".to_string(),
            KeywordType::Comparison,
            "経営者".to_string(),
            "検討したい".to_string(),
            ArticleType::ComparisonArticle,
            vec!["まとめ".to_string()],
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["parentKeyword"], "タスクフロー");
        assert_eq!(json["keywordType"], "COMPARISON");
        assert_eq!(json["articleType"], "COMPARISON_ARTICLE");
        assert_eq!(json["isArticleCreated"], false);
        assert!(json["currentRank"].is_null());
    }

    #[test]
    fn test_article_type_token_round_trip() {
        let all = [
            ArticleType::ComparisonArticle,
            ArticleType::HowTo,
            ArticleType::Glossary,
            ArticleType::UsefulInfo,
            ArticleType::CaseStudy,
        ];
        for at in all {
            assert_eq!(ArticleType::parse(at.as_str()), Some(at));
        }
        assert_eq!(ArticleType::parse("true"), None);
    }
}
