use crate::markup::{contains_ci, links};
use tracing::debug;

/// Words marking a link as a facility rather than a team.
pub const VENUE_WORDS: &[&str] = &["field", "park", "complex", "stadium", "center", "school"];

/// Opponent names are at least this long; shorter link texts are usually scores or labels.
const MIN_OPPONENT_LEN: usize = 8;

pub fn is_venue_text(text: &str) -> bool {
	VENUE_WORDS.iter().any(|word| contains_ci(text, word))
}

/// Longest link text in `context` that looks like a team other than `team`.
///
/// Pitch schedule links and facility names are excluded. Ties keep the first link.
pub fn find_opponent(context: &str, team: &str) -> Option<String> {
	let candidates: Vec<String> = links(context)
		.into_iter()
		.filter(|link| !contains_ci(&link.href, "schedules?pitch"))
		.map(|link| link.text)
		.filter(|text| text.len() > MIN_OPPONENT_LEN && text.contains(' ') && !contains_ci(text, team) && !is_venue_text(text))
		.collect();

	let best = candidates.iter().fold(None::<&String>, |best, candidate| match best {
		Some(current) if current.len() >= candidate.len() => Some(current),
		_ => Some(candidate),
	});

	match best {
		Some(name) => debug!(opponent = %name, candidates = candidates.len(), "opponent found"),
		None => debug!("no opponent in context"),
	}
	best.cloned()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_longest_non_venue_link_wins() {
		let context = r#"
			<a href="/t/1">Reno Apex 2014B Premier</a>
			<a href="/t/2">Sacramento United</a>
			<a href="/t/3">Sacramento United 2014B Gold</a>
			<a href="/schedules?pitch=4">Reno Sports Complex Pitch Eleven</a>
			<a href="/f/5">Golden Eagle Regional Park East</a>
			<a href="/t/6">Box Score</a>
		"#;
		assert_eq!(find_opponent(context, "Reno Apex").as_deref(), Some("Sacramento United 2014B Gold"));
	}

	#[test]
	fn test_ties_keep_first() {
		let context = "<a>Tahoe FC Blue</a><a>Tahoe FC Gold</a>";
		assert_eq!(find_opponent(context, "Reno Apex").as_deref(), Some("Tahoe FC Blue"));
	}

	#[test]
	fn test_nothing_qualifies() {
		assert_eq!(find_opponent("<a>Results</a><a>Reno Apex U12 Boys</a>", "reno apex"), None);
		assert_eq!(find_opponent("plain text only", "reno apex"), None);
	}
}
