use crate::schema::GameRecord;
use std::collections::HashSet;
use tracing::debug;

/// Fields that identify a fixture when collapsing repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DedupeKey {
	/// Date, time and home team.
	#[default]
	DateTimeHome,
	/// Date, time, home team and away team.
	DateTimeHomeAway,
}

impl DedupeKey {
	fn of(self, record: &GameRecord) -> (String, String, String, Option<String>) {
		let away = match self {
			Self::DateTimeHome => None,
			Self::DateTimeHomeAway => Some(record.away_team.to_lowercase()),
		};
		(record.date.clone(), record.time.to_lowercase(), record.home_team.to_lowercase(), away)
	}
}

/// Drop records whose key was already seen. Order is preserved and the first occurrence wins.
pub fn dedupe(records: Vec<GameRecord>, key: DedupeKey) -> Vec<GameRecord> {
	let before = records.len();
	let mut seen = HashSet::with_capacity(before);
	let kept: Vec<GameRecord> = records.into_iter().filter(|record| seen.insert(key.of(record))).collect();

	if kept.len() < before {
		debug!(removed = before - kept.len(), kept = kept.len(), "duplicate fixtures removed");
	}
	kept
}
