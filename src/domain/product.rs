use serde::{Deserialize, Serialize};
use validator::Validate;

/// Product the keyword taxonomy is planned around. Only the name is
/// required; generated copy falls back to it when the descriptive fields
/// are absent.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Selling points quoted in comparison copy.
    pub strengths: Option<String>,
}

impl ProductSummary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            category: None,
            strengths: None,
        }
    }

    pub fn description_or_name(&self) -> &str {
        match self.description.as_deref() {
            Some(d) if !d.trim().is_empty() => d,
            _ => &self.name,
        }
    }

    pub fn strengths_or_name(&self) -> &str {
        match self.strengths.as_deref() {
            Some(s) if !s.trim().is_empty() => s,
            _ => &self.name,
        }
    }
}

/// Audience segment a generation run targets.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TargetProfile {
    #[validate(length(min = 1))]
    pub label: String,
    /// Who they are (industry, company size, job role).
    pub attributes: Option<String>,
    /// The problem that sends them to a search box.
    pub pain_point: Option<String>,
}

impl TargetProfile {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            attributes: None,
            pain_point: None,
        }
    }

    pub fn pain_point_or_label(&self) -> &str {
        match self.pain_point.as_deref() {
            Some(p) if !p.trim().is_empty() => p,
            _ => &self.label,
        }
    }
}
