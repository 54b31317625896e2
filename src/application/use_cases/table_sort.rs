// ============================================================
// TABLE SORT SERVICE
// ============================================================
// Maps named sort keys to extractor/kind/priority triples per record
// shape and applies the comparator engine with a deterministic tie-break.

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::account::{Client, Company};
use crate::shared::compare::{compare, CompareKind, PriorityMap, SortDirection, SortValue};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

/// Extracted comparison input for one record and one sort key.
pub struct SortField {
    pub value: Option<SortValue>,
    pub kind: CompareKind,
    pub priority: Option<&'static PriorityMap>,
}

impl SortField {
    fn text(value: &str) -> Self {
        Self {
            value: Some(SortValue::Text(value.to_string())),
            kind: CompareKind::Text,
            priority: None,
        }
    }

    fn number(value: Option<f64>) -> Self {
        Self {
            value: value.map(SortValue::Number),
            kind: CompareKind::Number,
            priority: None,
        }
    }

    fn date(value: Option<chrono::DateTime<chrono::Utc>>) -> Self {
        Self {
            value: value.map(SortValue::Date),
            kind: CompareKind::Date,
            priority: None,
        }
    }

    fn boolean(value: bool) -> Self {
        Self {
            value: Some(SortValue::Bool(value)),
            kind: CompareKind::Boolean,
            priority: None,
        }
    }

    fn priority(value: &str, map: &'static PriorityMap) -> Self {
        Self {
            value: Some(SortValue::Text(value.to_string())),
            kind: CompareKind::Priority,
            priority: Some(map),
        }
    }
}

/// Record shape that the table sort service can order.
pub trait Sortable {
    /// Resolve a sort key to a comparison input. Unknown keys must resolve
    /// to the display name so any caller-supplied string still yields a
    /// total order.
    fn sort_field(&self, key: &str) -> SortField;

    /// Canonical display name, also the secondary tie-break key.
    fn display_name(&self) -> &str;
}

/// Return a new vector ordered by the spec; the input is never mutated.
/// Equal primary values always fall back to an ascending display-name
/// comparison, so the result is a total order regardless of input order.
pub fn sort_records<T: Sortable + Clone>(records: &[T], spec: &SortSpec) -> Vec<T> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        let fa = a.sort_field(&spec.key);
        let fb = b.sort_field(&spec.key);
        let primary = compare(
            fa.value.as_ref(),
            fb.value.as_ref(),
            spec.direction,
            fa.kind,
            fa.priority,
        );
        if primary != Ordering::Equal {
            return primary;
        }
        compare(
            Some(&SortValue::Text(a.display_name().to_string())),
            Some(&SortValue::Text(b.display_name().to_string())),
            SortDirection::Asc,
            CompareKind::Text,
            None,
        )
    });
    sorted
}

/// Contract plans, best first.
static PLAN_PRIORITY: Lazy<PriorityMap> = Lazy::new(|| {
    PriorityMap::from([("エンタープライズ", 1), ("ビジネス", 2), ("スターター", 3)])
});

/// Client deal stages, hottest first.
static STATUS_PRIORITY: Lazy<PriorityMap> = Lazy::new(|| {
    PriorityMap::from([("受注", 1), ("商談中", 2), ("リード", 3), ("失注", 4)])
});

impl Sortable for Company {
    fn sort_field(&self, key: &str) -> SortField {
        match key {
            "name" => SortField::text(&self.name),
            "plan" => SortField::priority(&self.plan, &PLAN_PRIORITY),
            "seatLimit" => SortField::number(Some(self.seat_limit as f64)),
            "seatUsage" => SortField::number(self.seat_usage_pct()),
            "isActive" => SortField::boolean(self.is_active),
            "contractedAt" => SortField::date(self.contracted_at),
            "lastClientOrder" => SortField::date(self.latest_client_order()),
            "firstClientOrder" => SortField::date(self.earliest_client_order()),
            _ => SortField::text(&self.name),
        }
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Sortable for Client {
    fn sort_field(&self, key: &str) -> SortField {
        match key {
            "name" => SortField::text(&self.name),
            "status" => SortField::priority(&self.status, &STATUS_PRIORITY),
            "monthlyBudget" => SortField::number(self.monthly_budget),
            "lastOrderedAt" => SortField::date(self.last_ordered_at),
            _ => SortField::text(&self.name),
        }
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}
