use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Hard ceiling on the collection size, enforced when merging an import.
pub const MAX_SOLVES: usize = 5000;

/// One completed timed attempt.
///
/// Solves are immutable once created. The in-memory collection keeps them
/// newest first; that order is what every "last N" statistic is defined over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solve {
    /// Elapsed time in whole milliseconds.
    pub ms: u64,
    /// When the attempt was completed.
    pub at: DateTime<Local>,
}

impl Solve {
    /// A solve recorded right now.
    pub fn new(ms: u64) -> Self {
        Self {
            ms,
            at: Local::now(),
        }
    }
}

/// The two snapshot shapes that have existed on disk.
///
/// Early versions stored a bare array of millisecond durations. The current
/// schema stores `{ms, at}` objects. Which one a stored array is gets decided
/// once, by the shape of its first element, not per entry.
#[derive(Debug)]
pub enum StoredFormat {
    LegacyNumericList(Vec<Value>),
    CurrentRecordList(Vec<Value>),
}

impl StoredFormat {
    pub fn classify(items: Vec<Value>) -> Self {
        match items.first() {
            Some(first) if first.is_number() => StoredFormat::LegacyNumericList(items),
            _ => StoredFormat::CurrentRecordList(items),
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, StoredFormat::LegacyNumericList(_))
    }

    /// Normalize to valid solves. Entries failing validation are dropped,
    /// never surfaced: ingestion filters, it does not fail.
    pub fn into_solves(self) -> Vec<Solve> {
        match self {
            StoredFormat::LegacyNumericList(items) => items
                .iter()
                .filter_map(Value::as_f64)
                .filter_map(solve_from_ms)
                .collect(),
            StoredFormat::CurrentRecordList(items) => {
                items.iter().filter_map(coerce_record).collect()
            }
        }
    }
}

/// Lenient per-entry coercion used by import, where legacy numbers and
/// current records may be mixed within one array.
pub fn coerce_entry(value: &Value) -> Option<Solve> {
    match value {
        Value::Number(n) => n.as_f64().and_then(solve_from_ms),
        Value::Object(_) => coerce_record(value),
        _ => None,
    }
}

/// Coerce a `{ms, at}` record: `ms` numerically cast, `at` taken from a
/// parseable timestamp string, otherwise stamped with the current time.
fn coerce_record(value: &Value) -> Option<Solve> {
    let ms = numeric_cast(value.get("ms")?)?;
    let mut solve = solve_from_ms(ms)?;
    if let Some(at) = value.get("at").and_then(Value::as_str) {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(at) {
            solve.at = parsed.with_timezone(&Local);
        }
    }
    Some(solve)
}

fn solve_from_ms(ms: f64) -> Option<Solve> {
    if ms.is_finite() && ms >= 0.0 {
        Some(Solve::new(ms.round() as u64))
    } else {
        None
    }
}

/// Numbers pass through; strings holding a number parse. Anything else
/// (and the resulting NaN of old) fails the cast.
fn numeric_cast(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_by_first_element() {
        let legacy = StoredFormat::classify(vec![json!(1000), json!(2000)]);
        assert!(legacy.is_legacy());

        let current = StoredFormat::classify(vec![json!({"ms": 1000})]);
        assert!(!current.is_legacy());

        let empty = StoredFormat::classify(vec![]);
        assert!(!empty.is_legacy());
    }

    #[test]
    fn test_legacy_list_gets_fresh_timestamps() {
        let before = Local::now();
        let solves = StoredFormat::classify(vec![json!(1000), json!(2000)]).into_solves();

        assert_eq!(solves.len(), 2);
        assert_eq!(solves[0].ms, 1000);
        assert_eq!(solves[1].ms, 2000);
        for solve in &solves {
            assert!(solve.at >= before);
        }
    }

    #[test]
    fn test_legacy_list_drops_invalid_entries() {
        let solves =
            StoredFormat::classify(vec![json!(1000), json!(-5), json!("junk"), json!(250.6)])
                .into_solves();

        assert_eq!(solves.iter().map(|s| s.ms).collect::<Vec<_>>(), [1000, 251]);
    }

    #[test]
    fn test_current_list_coercion() {
        let solves = StoredFormat::classify(vec![
            json!({"ms": 1500, "at": "2024-03-01T10:00:00+00:00"}),
            json!({"ms": "2500", "at": "2024-03-01T11:00:00+00:00"}),
            json!({"ms": "abc"}),
            json!({"ms": -1}),
            json!({"at": "2024-03-01T12:00:00+00:00"}),
        ])
        .into_solves();

        assert_eq!(solves.len(), 2);
        assert_eq!(solves[0].ms, 1500);
        assert_eq!(
            solves[0].at,
            DateTime::parse_from_rfc3339("2024-03-01T10:00:00+00:00").unwrap()
        );
        assert_eq!(solves[1].ms, 2500);
    }

    #[test]
    fn test_unparseable_timestamp_defaults_to_now() {
        let before = Local::now();
        let solves =
            StoredFormat::classify(vec![json!({"ms": 1000, "at": "last tuesday"})]).into_solves();

        assert_eq!(solves.len(), 1);
        assert!(solves[0].at >= before);
    }

    #[test]
    fn test_coerce_entry_accepts_both_shapes() {
        assert_eq!(coerce_entry(&json!(777)).unwrap().ms, 777);
        assert_eq!(coerce_entry(&json!({"ms": 888})).unwrap().ms, 888);
        assert!(coerce_entry(&json!("999")).is_none());
        assert!(coerce_entry(&json!(null)).is_none());
        assert!(coerce_entry(&json!([1000])).is_none());
    }

    #[test]
    fn test_solve_serializes_as_ms_at_object() {
        let solve = Solve {
            ms: 1234,
            at: DateTime::parse_from_rfc3339("2024-03-01T10:00:00+00:00")
                .unwrap()
                .with_timezone(&Local),
        };
        let value = serde_json::to_value(&solve).unwrap();

        assert_eq!(value["ms"], 1234);
        assert!(value["at"].is_string());

        let back: Solve = serde_json::from_value(value).unwrap();
        assert_eq!(back, solve);
    }
}
