use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Annual rep target, per exercise.
pub const TARGET: u64 = 10_000;

/// Fixed key identifying this application's dataset in the local store.
pub const STORAGE_KEY: &str = "misogi-2026";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exercise {
    Pushups,
    Squats,
    Pullups,
}

impl Exercise {
    pub const ALL: [Exercise; 3] = [Exercise::Pushups, Exercise::Squats, Exercise::Pullups];
}

/// Rep counts for one calendar date. The same shape serves as every rollup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RepCounts {
    #[serde(default)]
    pub pushups: u64,
    #[serde(default)]
    pub squats: u64,
    #[serde(default)]
    pub pullups: u64,
}

impl RepCounts {
    pub fn get(&self, exercise: Exercise) -> u64 {
        match exercise {
            Exercise::Pushups => self.pushups,
            Exercise::Squats => self.squats,
            Exercise::Pullups => self.pullups,
        }
    }

    pub fn add(&mut self, exercise: Exercise, amount: u64) {
        let slot = match exercise {
            Exercise::Pushups => &mut self.pushups,
            Exercise::Squats => &mut self.squats,
            Exercise::Pullups => &mut self.pullups,
        };
        *slot = slot.saturating_add(amount);
    }

    /// Element-wise sum, used by the rollups.
    pub fn accumulate(&mut self, other: &RepCounts) {
        self.pushups = self.pushups.saturating_add(other.pushups);
        self.squats = self.squats.saturating_add(other.squats);
        self.pullups = self.pullups.saturating_add(other.pullups);
    }

    pub fn combined(&self) -> u64 {
        self.pushups
            .saturating_add(self.squats)
            .saturating_add(self.pullups)
    }
}

/// The full log for one user: `YYYY-MM-DD` date key to that day's counts.
///
/// JSON-compatible with the document the browser build kept in local
/// storage, so an exported `misogi-2026` blob can be dropped in as-is.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LogDocument {
    #[serde(default)]
    pub logs: BTreeMap<String, RepCounts>,
}

#[derive(Debug, Deserialize)]
pub struct AddRepsRequest {
    pub exercise: Exercise,
    pub amount: i64,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayCountsResponse {
    pub date: String,
    pub counts: RepCounts,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub date: String,
    pub day_of_year: u32,
    pub week_number: u32,
    pub target: u64,
    pub days_left: u32,
    pub day: RepCounts,
    pub week: RepCounts,
    pub year: RepCounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    NoRemote,
    SignedOut,
    SignedIn,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub state: SessionKind,
    pub user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_targets_the_named_exercise() {
        let mut counts = RepCounts::default();
        counts.add(Exercise::Squats, 12);
        assert_eq!(counts.squats, 12);
        assert_eq!(counts.pushups, 0);
        assert_eq!(counts.pullups, 0);
        assert_eq!(counts.get(Exercise::Squats), 12);
    }

    #[test]
    fn accumulate_sums_element_wise() {
        let mut totals = RepCounts {
            pushups: 1,
            squats: 2,
            pullups: 3,
        };
        totals.accumulate(&RepCounts {
            pushups: 10,
            squats: 20,
            pullups: 30,
        });
        assert_eq!(totals.pushups, 11);
        assert_eq!(totals.squats, 22);
        assert_eq!(totals.pullups, 33);
        assert_eq!(totals.combined(), 66);
    }

    #[test]
    fn log_document_accepts_sparse_entries() {
        let doc: LogDocument =
            serde_json::from_str(r#"{"logs":{"2026-01-05":{"pushups":40}}}"#).unwrap();
        let entry = doc.logs.get("2026-01-05").unwrap();
        assert_eq!(entry.pushups, 40);
        assert_eq!(entry.squats, 0);
        assert_eq!(entry.pullups, 0);
    }

    #[test]
    fn exercise_names_are_lowercase_in_json() {
        assert_eq!(
            serde_json::to_string(&Exercise::Pullups).unwrap(),
            r#""pullups""#
        );
        let parsed: Exercise = serde_json::from_str(r#""squats""#).unwrap();
        assert_eq!(parsed, Exercise::Squats);
    }
}
