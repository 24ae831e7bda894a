use crate::markup::{find_ci, normalize_ws};
use crate::schema::LEAGUE;
use once_cell::sync::Lazy;
use regex::Regex;

/// Where a division label may come from. The order is configuration: different
/// markup eras put the label in a cell of its own or only in the team name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DivisionSource {
	/// Dedicated division cell of a schedule row.
	Cell,
	/// Remainder of the home team's name after the club prefix.
	TeamName,
	/// League keyword patterns (age group, birth year, tier, region).
	Keywords,
	/// Bare tier keyword anywhere in the context.
	KeywordMention,
}

pub const DEFAULT_DIVISION_ORDER: &[DivisionSource] = &[DivisionSource::Cell, DivisionSource::TeamName, DivisionSource::Keywords, DivisionSource::KeywordMention];

const TIERS: &str = "NPL|Elite|Premier|Gold|Silver|Bronze";
const REGIONS: &str = "East|West|North|South|Central";

static KEYWORD_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
	let patterns = [
		// 2014B Premier East
		format!(r"(?i)\b(\d{{4}}[BG]\b[\w ]{{0,30}}?\b(?:{TIERS})\b(?:\s+(?:{REGIONS})\b)?)"),
		// U12 Boys Gold
		format!(r"(?i)\b(U\d{{1,2}}\b[\w ]{{0,30}}?\b(?:{TIERS})\b(?:\s+(?:{REGIONS})\b)?)"),
		// 14B Silver
		format!(r"(?i)\b(\d{{2}}[BG]\b[\w ]{{0,30}}?\b(?:{TIERS})\b(?:\s+(?:{REGIONS})\b)?)"),
		format!(r"(?i)\b(Premier(?:\s+(?:{REGIONS}))?)\b"),
		format!(r"(?i)\b(NPL(?:\s+(?:{REGIONS}))?)\b"),
		format!(r"(?i)\b(Elite(?:\s+(?:{REGIONS}))?)\b"),
		format!(r"(?i)\b(Gold(?:\s+(?:{REGIONS}))?)\b"),
		format!(r"(?i)\b(Silver(?:\s+(?:{REGIONS}))?)\b"),
	];
	patterns.iter().map(|p| Regex::new(p).expect("division pattern compiles")).collect()
});

const MENTIONED_TIERS: &[(&str, &str)] = &[("premier", "Premier"), ("npl", "NPL"), ("elite", "Elite"), ("gold", "Gold")];

/// Inputs available to the division chain for one candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct DivisionInputs<'a> {
	pub cell: Option<&'a str>,
	pub home_team: &'a str,
	pub context: &'a str,
}

/// Division label following `order`, `"League"` when every source misses.
pub fn resolve_division(order: &[DivisionSource], inputs: &DivisionInputs<'_>, club_prefixes: &[String]) -> String {
	order
		.iter()
		.find_map(|source| match source {
			DivisionSource::Cell => inputs.cell.map(normalize_ws).filter(|cell| !cell.is_empty()),
			DivisionSource::TeamName => from_team_name(inputs.home_team, club_prefixes),
			DivisionSource::Keywords => from_keywords(inputs.context),
			DivisionSource::KeywordMention => from_mention(inputs.context),
		})
		.unwrap_or_else(|| LEAGUE.to_string())
}

/// `Reno APEX Soccer Club 2014B Premier` with prefix `Reno APEX Soccer Club` gives `2014B Premier`.
/// Prefixes are tried in order, so list the full club name before shorter forms.
pub fn from_team_name(home_team: &str, club_prefixes: &[String]) -> Option<String> {
	club_prefixes.iter().find_map(|prefix| {
		let start = find_ci(home_team, prefix.trim())?;
		let rest = home_team[start + prefix.trim().len()..].trim();
		(!rest.is_empty()).then(|| normalize_ws(rest))
	})
}

pub fn from_keywords(context: &str) -> Option<String> {
	KEYWORD_PATTERNS
		.iter()
		.find_map(|re| re.captures(context).map(|caps| normalize_ws(&caps[1])))
}

pub fn from_mention(context: &str) -> Option<String> {
	let lowered = context.to_ascii_lowercase();
	MENTIONED_TIERS
		.iter()
		.find(|(needle, _)| lowered.contains(needle))
		.map(|(_, label)| (*label).to_string())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn prefixes() -> Vec<String> {
		vec!["Reno APEX Soccer Club".into(), "Reno Apex".into()]
	}

	#[test]
	fn test_team_name_suffix() {
		assert_eq!(from_team_name("Reno APEX Soccer Club 2014B Premier East", &prefixes()).as_deref(), Some("2014B Premier East"));
		assert_eq!(from_team_name("reno apex U12 Boys", &prefixes()).as_deref(), Some("U12 Boys"));
		assert_eq!(from_team_name("Reno Apex", &prefixes()), None);
	}

	#[test]
	fn test_keyword_patterns_in_order() {
		assert_eq!(from_keywords("Flight: 2013G Academy Gold West | Field 2").as_deref(), Some("2013G Academy Gold West"));
		assert_eq!(from_keywords("u14 boys npl").as_deref(), Some("u14 boys npl"));
		assert_eq!(from_keywords("bracket Elite").as_deref(), Some("Elite"));
		assert_eq!(from_keywords("friendly"), None);
	}

	#[test]
	fn test_mention_fallback() {
		assert_eq!(from_mention("Premiership cup").as_deref(), Some("Premier"));
		assert_eq!(from_mention("goldfish"), Some("Gold".to_string()));
		assert_eq!(from_mention("rec league"), None);
	}

	#[test]
	fn test_order_is_configurable() {
		let inputs = DivisionInputs {
			cell: Some(" U12 Boys  Premier "),
			home_team: "Reno Apex U12 Boys",
			context: "",
		};

		assert_eq!(resolve_division(DEFAULT_DIVISION_ORDER, &inputs, &prefixes()), "U12 Boys Premier");
		assert_eq!(resolve_division(&[DivisionSource::TeamName, DivisionSource::Cell], &inputs, &prefixes()), "U12 Boys");
		assert_eq!(resolve_division(&[DivisionSource::Keywords], &inputs, &prefixes()), LEAGUE);
	}
}
