// ============================================================
// COMPARATOR ENGINE
// ============================================================
// Type-aware value comparison used by the table sort service.
// Pure functions, no I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Comparison strategy for one sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareKind {
    Text,
    Number,
    Date,
    Priority,
    Boolean,
}

/// A value extracted from a record for comparison. Absent values are
/// represented by `Option<SortValue>` = None at the call site.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Text(String),
    Number(f64),
    Date(DateTime<Utc>),
    Bool(bool),
}

/// Ranks enum-like labels for ordering. Labels missing from the map sort
/// after every ranked label.
pub type PriorityMap = HashMap<&'static str, i32>;

/// Rank assigned to labels absent from a priority map.
pub const UNRANKED: i32 = 999;

/// Compare two optional values.
///
/// Nulls are pushed to the end in both directions: this is applied before
/// the direction flip, as an explicit exception to the generic rule.
/// Everything else is kind-specific logic followed by a negation when
/// `direction` is `Desc`.
pub fn compare(
    a: Option<&SortValue>,
    b: Option<&SortValue>,
    direction: SortDirection,
    kind: CompareKind,
    priority: Option<&PriorityMap>,
) -> Ordering {
    let ordering = match (a, b) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
        (Some(a), Some(b)) => compare_values(a, b, kind, priority),
    };

    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

fn compare_values(
    a: &SortValue,
    b: &SortValue,
    kind: CompareKind,
    priority: Option<&PriorityMap>,
) -> Ordering {
    match kind {
        CompareKind::Text => match (a, b) {
            (SortValue::Text(a), SortValue::Text(b)) => {
                a.to_lowercase().cmp(&b.to_lowercase())
            }
            _ => Ordering::Equal,
        },
        CompareKind::Number => match (a, b) {
            (SortValue::Number(a), SortValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            _ => Ordering::Equal,
        },
        CompareKind::Date => match (a, b) {
            (SortValue::Date(a), SortValue::Date(b)) => {
                a.timestamp_millis().cmp(&b.timestamp_millis())
            }
            _ => Ordering::Equal,
        },
        CompareKind::Priority => {
            let rank = |v: &SortValue| match v {
                SortValue::Text(label) => priority
                    .and_then(|m| m.get(label.as_str()).copied())
                    .unwrap_or(UNRANKED),
                _ => UNRANKED,
            };
            rank(a).cmp(&rank(b))
        }
        // true sorts before false; direction is applied on top like any
        // other kind.
        CompareKind::Boolean => match (a, b) {
            (SortValue::Bool(a), SortValue::Bool(b)) => b.cmp(a),
            _ => Ordering::Equal,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn text(s: &str) -> Option<SortValue> {
        Some(SortValue::Text(s.to_string()))
    }

    #[test]
    fn test_text_is_case_insensitive() {
        let a = text("Acme");
        let b = text("acme");
        assert_eq!(
            compare(a.as_ref(), b.as_ref(), SortDirection::Asc, CompareKind::Text, None),
            Ordering::Equal
        );
    }

    #[test]
    fn test_number_asc_and_desc() {
        let a = Some(SortValue::Number(1.0));
        let b = Some(SortValue::Number(2.0));
        assert_eq!(
            compare(a.as_ref(), b.as_ref(), SortDirection::Asc, CompareKind::Number, None),
            Ordering::Less
        );
        assert_eq!(
            compare(a.as_ref(), b.as_ref(), SortDirection::Desc, CompareKind::Number, None),
            Ordering::Greater
        );
    }

    #[test]
    fn test_date_order() {
        let early = Some(SortValue::Date(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
        let late = Some(SortValue::Date(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()));
        assert_eq!(
            compare(early.as_ref(), late.as_ref(), SortDirection::Asc, CompareKind::Date, None),
            Ordering::Less
        );
    }

    #[test]
    fn test_nulls_sort_last_in_both_directions() {
        let some = Some(SortValue::Number(5.0));
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            assert_eq!(
                compare(some.as_ref(), None, direction, CompareKind::Number, None),
                Ordering::Less
            );
            assert_eq!(
                compare(None, some.as_ref(), direction, CompareKind::Number, None),
                Ordering::Greater
            );
        }
        assert_eq!(
            compare(None, None, SortDirection::Desc, CompareKind::Number, None),
            Ordering::Equal
        );
    }

    #[test]
    fn test_priority_map_with_unranked_label() {
        let mut map = PriorityMap::new();
        map.insert("enterprise", 1);
        map.insert("pro", 2);
        map.insert("free", 3);

        let ent = text("enterprise");
        let unknown = text("trial");
        assert_eq!(
            compare(
                ent.as_ref(),
                unknown.as_ref(),
                SortDirection::Asc,
                CompareKind::Priority,
                Some(&map)
            ),
            Ordering::Less
        );
    }

    #[test]
    fn test_boolean_true_first_then_direction() {
        let t = Some(SortValue::Bool(true));
        let f = Some(SortValue::Bool(false));
        assert_eq!(
            compare(t.as_ref(), f.as_ref(), SortDirection::Asc, CompareKind::Boolean, None),
            Ordering::Less
        );
        // Desc flips the hard-coded true-first rule.
        assert_eq!(
            compare(t.as_ref(), f.as_ref(), SortDirection::Desc, CompareKind::Boolean, None),
            Ordering::Greater
        );
    }
}
