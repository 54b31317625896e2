use serde::{Deserialize, Serialize};
use validator::Validate;

/// Author persona applied as a post-processing style pass on generated drafts.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AuthorProfile {
    pub id: String,
    #[validate(length(min = 1))]
    pub name: String,
    /// Role or title shown in the article introduction.
    pub role: String,
    /// Genre the author is credible in (e.g. "SaaS導入支援").
    pub expertise_genre: String,
    /// Free-text description of how the author speaks. "丁寧" or "敬語"
    /// here switches the draft to polite form.
    pub speech_characteristics: String,
    /// Words stripped verbatim from every draft body.
    pub ng_words: Vec<String>,
}

impl AuthorProfile {
    pub fn new(name: String, role: String, expertise_genre: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            role,
            expertise_genre,
            speech_characteristics: String::new(),
            ng_words: Vec::new(),
        }
    }

    /// Whether the speech characteristics ask for the polite register.
    pub fn prefers_polite_register(&self) -> bool {
        self.speech_characteristics.contains("丁寧") || self.speech_characteristics.contains("敬語")
    }
}
