use chrono::NaiveDate;
use thiserror::Error;

/// Reasons a single candidate is dropped.
///
/// None of these reach the caller: the pipeline logs them at debug level and
/// moves on to the next candidate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
	#[error("row has {found} cells, expected at least {expected}")]
	ShortRow { found: usize, expected: usize },

	#[error("{team} is the away side")]
	AwayGame { team: String },

	#[error("no home team naming {team}")]
	MissingHomeTeam { team: String },

	#[error("fixture already played or not marked as a home game (match {match_id})")]
	NotHomeFixture { match_id: String },

	#[error("fixture date {date} is outside the target weekend")]
	DateOutsideWeekend { date: NaiveDate },
}

impl ExtractError {
	pub const fn short_row(found: usize, expected: usize) -> Self {
		Self::ShortRow { found, expected }
	}

	pub fn away_game(team: &str) -> Self {
		Self::AwayGame { team: team.to_string() }
	}

	pub fn missing_home_team(team: &str) -> Self {
		Self::MissingHomeTeam { team: team.to_string() }
	}

	pub fn not_home_fixture(match_id: &str) -> Self {
		Self::NotHomeFixture { match_id: match_id.to_string() }
	}
}
