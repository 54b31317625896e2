use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Client contact belonging to a company account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    /// Deal stage label; ordered by a priority map, not alphabetically.
    pub status: String,
    pub last_ordered_at: Option<DateTime<Utc>>,
    pub monthly_budget: Option<f64>,
}

/// Company account listed in the admin tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    /// Contract plan label; ordered by a priority map.
    pub plan: String,
    pub seat_limit: u32,
    pub seats_used: u32,
    pub is_active: bool,
    pub contracted_at: Option<DateTime<Utc>>,
    pub clients: Vec<Client>,
}

impl Company {
    /// Seat usage as a percentage, or None when the limit is zero.
    pub fn seat_usage_pct(&self) -> Option<f64> {
        if self.seat_limit == 0 {
            return None;
        }
        Some(self.seats_used as f64 * 100.0 / self.seat_limit as f64)
    }

    /// Most recent order timestamp across all clients.
    pub fn latest_client_order(&self) -> Option<DateTime<Utc>> {
        self.clients.iter().filter_map(|c| c.last_ordered_at).max()
    }

    /// Oldest order timestamp across all clients.
    pub fn earliest_client_order(&self) -> Option<DateTime<Utc>> {
        self.clients.iter().filter_map(|c| c.last_ordered_at).min()
    }
}
