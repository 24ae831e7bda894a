use crate::markup::{contains_ci, find_ci, links, strip_tags};
use once_cell::sync::Lazy;
use regex::Regex;

/// Anything shorter is a truncated match or stray punctuation.
pub const MIN_TEAM_NAME_LEN: usize = 3;

static AWAY_TAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+\||\s+@\s|\s\d{1,2}:\d{2}").expect("away tail pattern compiles"));

pub fn is_plausible_name(name: &str) -> bool {
	name.chars().count() >= MIN_TEAM_NAME_LEN && name.chars().any(char::is_alphanumeric)
}

/// Team name held by a markup fragment: link text first, then the plain text.
pub fn team_name(fragment: &str) -> Option<String> {
	links(fragment)
		.into_iter()
		.map(|link| link.text)
		.find(|text| is_plausible_name(text))
		.or_else(|| Some(strip_tags(fragment)).filter(|text| is_plausible_name(text)))
}

/// Like [`team_name`] but only accepts names containing the tracked team.
pub fn home_team(fragment: &str, team: &str) -> Option<String> {
	links(fragment)
		.into_iter()
		.map(|link| link.text)
		.find(|text| is_plausible_name(text) && contains_ci(text, team))
		.or_else(|| Some(strip_tags(fragment)).filter(|text| is_plausible_name(text) && contains_ci(text, team)))
}

/// Like [`team_name`] but rejects names containing the tracked team, as in a club derby.
pub fn away_team(fragment: &str, team: &str) -> Option<String> {
	team_name(fragment).filter(|text| !contains_ci(text, team))
}

/// Home side of a separator line. A link naming the team wins; otherwise the
/// text from the team's name to the separator, dropping any leading time or label.
pub fn home_team_in_line(line: &str, home_part: &str, team: &str) -> Option<String> {
	links(line)
		.into_iter()
		.map(|link| link.text)
		.find(|text| is_plausible_name(text) && contains_ci(text, team) && contains_ci(home_part, text))
		.or_else(|| {
			let start = find_ci(home_part, team)?;
			Some(home_part[start..].trim().to_string()).filter(|text| is_plausible_name(text))
		})
}

/// Away side of a separator line, cut before any trailing time or venue marker.
pub fn away_team_in_line(away_part: &str, team: &str) -> Option<String> {
	let end = AWAY_TAIL_RE.find(away_part).map_or(away_part.len(), |m| m.start());
	Some(away_part[..end].trim().to_string()).filter(|text| is_plausible_name(text) && !contains_ci(text, team))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_team_name_prefers_link_text() {
		assert_eq!(team_name("<a href='/t/1'>Sacramento United</a> (H)").as_deref(), Some("Sacramento United"));
		assert_eq!(team_name(" Tahoe  FC ").as_deref(), Some("Tahoe FC"));
		assert_eq!(team_name("<a>-</a> ."), None);
		assert_eq!(team_name("<span>A</span>"), None);
	}

	#[test]
	fn test_home_team_requires_tracked_name() {
		assert_eq!(home_team("<a>RENO APEX U12 Boys</a>", "Reno Apex").as_deref(), Some("RENO APEX U12 Boys"));
		assert_eq!(home_team("<a>Sacramento United</a>", "Reno Apex"), None);
	}

	#[test]
	fn test_away_team_rejects_tracked_name() {
		assert_eq!(away_team("<a href='/t/9'>Carson FC U10</a>", "Reno Apex").as_deref(), Some("Carson FC U10"));
		assert_eq!(away_team("<a href='/t/3'>Reno Apex 2015G White</a>", "reno apex"), None);
		assert_eq!(away_team("Reno Apex 2015G White", "Reno Apex"), None);
	}

	#[test]
	fn test_home_team_in_line() {
		let line = "<li>9:00 AM <a href='/t/2'>Reno Apex 2015G</a> - <a href='/t/3'>Reno Apex 2015G White</a></li>";
		assert_eq!(home_team_in_line(line, "9:00 AM Reno Apex 2015G", "Reno Apex").as_deref(), Some("Reno Apex 2015G"));

		assert_eq!(home_team_in_line("9:00 AM Reno Apex 2015G", "9:00 AM Reno Apex 2015G", "reno apex").as_deref(), Some("Reno Apex 2015G"));
	}

	#[test]
	fn test_away_team_in_line_cuts_tail() {
		assert_eq!(away_team_in_line("Davis Legacy 2014B 10:30 AM", "Reno Apex").as_deref(), Some("Davis Legacy 2014B"));
		assert_eq!(away_team_in_line("Davis Legacy | Field 3", "Reno Apex").as_deref(), Some("Davis Legacy"));
		assert_eq!(away_team_in_line("Reno Apex White", "Reno Apex"), None);
		assert_eq!(away_team_in_line("", "Reno Apex"), None);
	}
}
