use crate::markup::{contains_ci, line_spans, links, strip_tags};
use once_cell::sync::Lazy;
use regex::Regex;

/// Link targets that point at a facility page.
const LOCATION_HREF_HINTS: &[&str] = &["pitch", "venue", "facilit", "field", "location", "map"];

static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[★☆•*]\s*([^★☆•*|]{3,80})").expect("bullet pattern compiles"));

static FACILITY_RE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"\b((?:[A-Z0-9][\w'.&]*\s+){0,4}(?:Park|Complex|Fields?|Stadium|Center|Centre|School)\b(?:\s+-\s+[A-Z0-9][\w#]*(?:\s+\d+[A-Za-z]?)?)?)")
		.expect("facility pattern compiles")
});

/// Location text held by a schedule row's location cell.
pub fn location_from_cell(cell: &str) -> Option<String> {
	links(cell)
		.into_iter()
		.map(|link| link.text)
		.find(|text| !text.is_empty())
		.or_else(|| Some(strip_tags(cell)))
		.filter(|text| text.chars().any(char::is_alphanumeric))
}

/// Facility named somewhere in `context`.
///
/// Tries facility links first, then star or bullet prefixed text, then any
/// capitalised phrase ending in a facility word. Works line by line so one
/// match never spans two fields of a fixture.
pub fn find_location(context: &str) -> Option<String> {
	let linked = links(context)
		.into_iter()
		.find(|link| LOCATION_HREF_HINTS.iter().any(|hint| contains_ci(&link.href, hint)) && link.text.chars().count() >= 3)
		.map(|link| link.text);
	if linked.is_some() {
		return linked;
	}

	let lines: Vec<String> = line_spans(context).into_iter().map(|span| strip_tags(&context[span])).collect();

	lines
		.iter()
		.find_map(|line| BULLET_RE.captures(line).map(|caps| caps[1].trim().to_string()))
		.filter(|text| !text.is_empty())
		.or_else(|| lines.iter().find_map(|line| FACILITY_RE.captures(line).map(|caps| caps[1].trim().to_string())))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_cell_location_prefers_link() {
		assert_eq!(location_from_cell("<a href='/schedules?pitch=3'>Reno Sports Complex - Field 1</a>").as_deref(), Some("Reno Sports Complex - Field 1"));
		assert_eq!(location_from_cell(" Idlewild Park ").as_deref(), Some("Idlewild Park"));
		assert_eq!(location_from_cell("<span>&nbsp;</span>"), None);
	}

	#[test]
	fn test_facility_link_wins() {
		let context = "<div>★ Somewhere Else</div><a href='/org/schedules?pitch=12'>Golden Eagle Regional Park - Field 4</a>";
		assert_eq!(find_location(context).as_deref(), Some("Golden Eagle Regional Park - Field 4"));
	}

	#[test]
	fn test_bullet_then_keyword() {
		assert_eq!(find_location("<div>Reno Apex U12</div><div>★ Rancho San Rafael</div>").as_deref(), Some("Rancho San Rafael"));
		assert_eq!(find_location("<div>Reno Apex U12 vs Tahoe</div>\n<div>at Reno Sports Complex - Field 1 U12 Boys</div>").as_deref(), Some("Reno Sports Complex - Field 1"));
	}

	#[test]
	fn test_no_location() {
		assert_eq!(find_location("<div>Reno Apex U12 - Tahoe FC</div>"), None);
	}
}
