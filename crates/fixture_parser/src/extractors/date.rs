use crate::markup::standalone_matches;
use crate::schema::TargetDates;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// How a fixture date was decided, strongest evidence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateResolution {
	/// Parsed from a date pattern in the context.
	Parsed(NaiveDate),
	/// The context mentions one of the target date forms.
	Mentioned(NaiveDate),
	/// Taken from the date whose mention opened the window.
	Window(NaiveDate),
	/// Nothing found, the Saturday target is assumed.
	Defaulted(NaiveDate),
}

impl DateResolution {
	pub const fn date(self) -> NaiveDate {
		match self {
			Self::Parsed(d) | Self::Mentioned(d) | Self::Window(d) | Self::Defaulted(d) => d,
		}
	}
}

struct DatePattern {
	re: Regex,
	format: &'static str,
	normalize: fn(&Captures<'_>) -> String,
}

static DATE_PATTERNS: Lazy<Vec<DatePattern>> = Lazy::new(|| {
	vec![
		DatePattern {
			re: Regex::new(r"(?i)\b(January|February|March|April|May|June|July|August|September|October|November|December)\s+(\d{1,2}),?\s+(\d{4})\b")
				.expect("long month pattern compiles"),
			format: "%B %d %Y",
			normalize: month_day_year,
		},
		DatePattern {
			re: Regex::new(r"(?i)\b(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sept|Sep|Oct|Nov|Dec)\.?\s+(\d{1,2}),?\s+(\d{4})\b").expect("short month pattern compiles"),
			format: "%b %d %Y",
			normalize: month_day_year,
		},
		DatePattern {
			re: Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").expect("numeric date pattern compiles"),
			format: "%m/%d/%Y",
			normalize: whole_match,
		},
		DatePattern {
			re: Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").expect("iso date pattern compiles"),
			format: "%Y-%m-%d",
			normalize: whole_match,
		},
	]
});

fn month_day_year(caps: &Captures<'_>) -> String {
	let month = &caps[1];
	let month = if month.eq_ignore_ascii_case("sept") { "Sep" } else { month };
	format!("{month} {} {}", &caps[2], &caps[3])
}

fn whole_match(caps: &Captures<'_>) -> String {
	caps[0].to_string()
}

/// First date in `text` that one of the ordered patterns can parse.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
	DATE_PATTERNS.iter().find_map(|pattern| {
		pattern
			.re
			.captures_iter(text)
			.find_map(|caps| NaiveDate::parse_from_str(&(pattern.normalize)(&caps), pattern.format).ok())
	})
}

/// `form` occurs in `context` and is not part of a longer number (`Aug 3` in `Aug 30`).
fn mentions(context: &str, form: &str) -> bool {
	let lowered = context.to_ascii_lowercase();
	let form = form.to_ascii_lowercase();
	let found = standalone_matches(&lowered, &form).next().is_some();
	found
}

/// Date of a fixture described by `context`.
///
/// Falls back from parsed dates to target-form mentions, then to the window's
/// own date, and finally to the Saturday target.
pub fn resolve_date(context: &str, targets: &TargetDates, window_target: Option<NaiveDate>) -> DateResolution {
	if let Some(date) = parse_date(context) {
		return DateResolution::Parsed(date);
	}

	let mut forms = targets.forms();
	forms.extend(targets.mention_forms());
	if let Some(form) = forms.into_iter().find(|form| mentions(context, &form.text)) {
		return DateResolution::Mentioned(form.date);
	}

	window_target.map_or_else(|| DateResolution::Defaulted(targets.saturday()), DateResolution::Window)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(y, m, d).unwrap()
	}

	fn weekend() -> TargetDates {
		TargetDates::new(ymd(2025, 8, 30), ymd(2025, 8, 31))
	}

	#[test]
	fn test_parse_date_formats() {
		assert_eq!(parse_date("Saturday, August 30, 2025 at 9am"), Some(ymd(2025, 8, 30)));
		assert_eq!(parse_date("Aug 30, 2025 1:00PM PDT"), Some(ymd(2025, 8, 30)));
		assert_eq!(parse_date("Sept. 6 2025"), Some(ymd(2025, 9, 6)));
		assert_eq!(parse_date("kickoff 8/31/2025"), Some(ymd(2025, 8, 31)));
		assert_eq!(parse_date("2025-08-31 10:00"), Some(ymd(2025, 8, 31)));
		assert_eq!(parse_date("no date here"), None);
	}

	#[test]
	fn test_invalid_match_falls_through_to_next_pattern() {
		assert_eq!(parse_date("Feb 30, 2025 or 09/06/2025"), Some(ymd(2025, 9, 6)));
	}

	#[test]
	fn test_resolution_chain() {
		let targets = weekend();

		assert_eq!(resolve_date("Aug 31, 2025", &targets, None), DateResolution::Parsed(ymd(2025, 8, 31)));
		assert_eq!(resolve_date("games Sunday, August 31", &targets, None), DateResolution::Mentioned(ymd(2025, 8, 31)));
		assert_eq!(resolve_date("Aug 3 and Aug 300", &targets, None), DateResolution::Defaulted(ymd(2025, 8, 30)));
		assert_eq!(resolve_date("10:00 AM", &targets, Some(ymd(2025, 8, 31))), DateResolution::Window(ymd(2025, 8, 31)));
		assert_eq!(resolve_date("10:00 AM", &targets, None), DateResolution::Defaulted(ymd(2025, 8, 30)));
	}
}
