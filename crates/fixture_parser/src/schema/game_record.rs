use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Placeholder for any unresolved free-text field.
pub const TBD: &str = "TBD";
/// Placeholder for an unresolved division or competition.
pub const LEAGUE: &str = "League";

/// One upcoming home fixture of the tracked team.
///
/// Built once per accepted candidate and never mutated afterwards. Every field
/// carries a value: anything the extractors could not resolve holds its sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
	pub home_team: String,
	pub away_team: String,
	pub date: String,
	pub time: String,
	pub location: String,
	pub venue: String,
	pub field: String,
	pub division: String,
	pub competition: String,
}

/// Field values gathered for one candidate before sentinels are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordParts {
	pub home_team: String,
	pub away_team: Option<String>,
	pub time: Option<String>,
	pub location: Option<String>,
	pub division: Option<String>,
}

impl GameRecord {
	pub fn new(parts: RecordParts, date: NaiveDate) -> Self {
		let location = or_sentinel(parts.location, TBD);
		let (venue, field) = split_location(&location);
		let division = or_sentinel(parts.division, LEAGUE);

		Self {
			home_team: parts.home_team.trim().to_string(),
			away_team: or_sentinel(parts.away_team, TBD),
			date: date.format("%Y-%m-%d").to_string(),
			time: or_sentinel(parts.time, TBD),
			competition: division.clone(),
			location,
			venue,
			field,
			division,
		}
	}
}

/// `"Reno Sports Complex - Field 1"` becomes venue `"Reno Sports Complex"` and field `"Field 1"`.
/// Without a separator the whole text is the venue and the field stays unresolved.
pub fn split_location(location: &str) -> (String, String) {
	match location.split_once(" - ") {
		Some((venue, field)) if !venue.trim().is_empty() && !field.trim().is_empty() => (venue.trim().to_string(), field.trim().to_string()),
		_ => (location.trim().to_string(), TBD.to_string()),
	}
}

fn or_sentinel(value: Option<String>, sentinel: &str) -> String {
	value
		.map(|v| v.trim().to_string())
		.filter(|v| !v.is_empty())
		.unwrap_or_else(|| sentinel.to_string())
}
