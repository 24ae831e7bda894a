//! Keeps fixtures where the tracked team is the home side.
//!
//! The signal depends on how the candidate was segmented: schedule rows have a
//! home cell and a result marker, separator lines only have an order.

use crate::error::ExtractError;
use crate::markup::{contains_ci, strip_tags, surrounding};
use crate::segmenter::TeamPosition;

/// Result cell of a fixture that has not been played yet.
pub const UNPLAYED_MARKER: &str = "-";
/// Token the site prints next to a home fixture in its summary lists.
pub const HOME_INDICATOR: &str = "(H)";
/// Bytes searched on each side of a match id for [`HOME_INDICATOR`].
pub const INDICATOR_RADIUS: usize = 200;

/// What a candidate says about which side is at home.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeEvidence<'a> {
	Row {
		home_cell: &'a str,
		away_cell: &'a str,
		result_marker: &'a str,
		match_id: &'a str,
	},
	Line {
		position: TeamPosition,
	},
}

/// `Ok(())` when `team` hosts the fixture, otherwise the reason it does not.
pub fn check_home(evidence: &HomeEvidence<'_>, team: &str, document: &str) -> Result<(), ExtractError> {
	match *evidence {
		HomeEvidence::Row {
			home_cell,
			away_cell,
			result_marker,
			match_id,
		} => {
			if !contains_ci(&strip_tags(home_cell), team) {
				return Err(if contains_ci(&strip_tags(away_cell), team) {
					ExtractError::away_game(team)
				} else {
					ExtractError::missing_home_team(team)
				});
			}

			if strip_tags(result_marker) == UNPLAYED_MARKER || has_home_indicator(document, match_id) {
				Ok(())
			} else {
				Err(ExtractError::not_home_fixture(match_id.trim()))
			}
		}
		HomeEvidence::Line {
			position: TeamPosition::BeforeSeparator,
		} => Ok(()),
		HomeEvidence::Line {
			position: TeamPosition::AfterSeparator,
		} => Err(ExtractError::away_game(team)),
	}
}

pub fn is_home_game(evidence: &HomeEvidence<'_>, team: &str, document: &str) -> bool {
	check_home(evidence, team, document).is_ok()
}

/// Whether `(H)` appears within [`INDICATOR_RADIUS`] bytes of any mention of `match_id`.
/// Only whole-token mentions count: `12` inside `U12` is not match `12`.
pub fn has_home_indicator(document: &str, match_id: &str) -> bool {
	let match_id = strip_tags(match_id);
	if match_id.is_empty() {
		return false;
	}

	document
		.match_indices(match_id.as_str())
		.filter(|(pos, id)| is_whole_token(document, *pos, pos + id.len()))
		.any(|(pos, id)| {
			let near = surrounding(document, pos, pos + id.len(), INDICATOR_RADIUS);
			document[near].contains(HOME_INDICATOR)
		})
}

fn is_whole_token(s: &str, start: usize, end: usize) -> bool {
	let before = s[..start].chars().next_back().is_some_and(char::is_alphanumeric);
	let after = s[end..].chars().next().is_some_and(char::is_alphanumeric);
	!before && !after
}

#[cfg(test)]
mod tests {
	use super::*;

	fn row<'a>(home: &'a str, away: &'a str, result: &'a str) -> HomeEvidence<'a> {
		HomeEvidence::Row {
			home_cell: home,
			away_cell: away,
			result_marker: result,
			match_id: "123",
		}
	}

	#[test]
	fn test_unplayed_home_row_is_kept() {
		let evidence = row("<a>Reno Apex U12 Boys</a>", "Sacramento United", " - ");
		assert!(is_home_game(&evidence, "reno apex", ""));
	}

	#[test]
	fn test_reversed_row_is_an_away_game() {
		let evidence = row("Sacramento United", "<a>Reno Apex U12 Boys</a>", "-");
		assert_eq!(check_home(&evidence, "Reno Apex", ""), Err(ExtractError::away_game("Reno Apex")));
	}

	#[test]
	fn test_played_row_needs_home_indicator() {
		let evidence = row("Reno Apex U12 Boys", "Sacramento United", "2 - 1");
		assert_eq!(check_home(&evidence, "Reno Apex", "<td>123</td>"), Err(ExtractError::not_home_fixture("123")));

		let summary = "<li>Match 123 vs Sacramento United (H)</li>";
		assert!(is_home_game(&evidence, "Reno Apex", summary));
	}

	#[test]
	fn test_indicator_must_be_near_the_match_id() {
		let far = format!("123{}(H)", " ".repeat(INDICATOR_RADIUS + 10));
		assert!(!has_home_indicator(&far, "123"));
		assert!(has_home_indicator("(H) 123", "123"));
		assert!(!has_home_indicator("U1234 (H)", "123"));
		assert!(!has_home_indicator("(H)", " "));
	}

	#[test]
	fn test_line_position_decides() {
		let home = HomeEvidence::Line {
			position: TeamPosition::BeforeSeparator,
		};
		let away = HomeEvidence::Line {
			position: TeamPosition::AfterSeparator,
		};
		assert!(is_home_game(&home, "Reno Apex", ""));
		assert!(!is_home_game(&away, "Reno Apex", ""));
	}
}
