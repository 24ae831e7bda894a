use crate::markup::normalize_ws;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Timezone abbreviations accepted after a kickoff time.
const ZONES: &str = "PDT|PST|PT|MDT|MST|MT|CDT|CST|CT|EDT|EST|ET";

#[derive(Debug, Clone, Copy)]
enum Clock {
	Meridiem,
	TwentyFourHour,
}

struct TimePattern {
	re: Regex,
	clock: Clock,
}

static TIME_PATTERNS: Lazy<Vec<TimePattern>> = Lazy::new(|| {
	vec![
		// 10:30 AM PDT, 2:00PM, 9:15 p.m.
		TimePattern {
			re: Regex::new(&format!(r"(?i)\b(\d{{1,2}}):(\d{{2}})\s*([AP])\.?M\b\.?(?:\s+({ZONES})\b)?")).expect("meridiem pattern compiles"),
			clock: Clock::Meridiem,
		},
		// 10:30 - PM
		TimePattern {
			re: Regex::new(r"(?i)\b(\d{1,2}):(\d{2})[^\w<]{1,3}([AP])M\b").expect("punctuated pattern compiles"),
			clock: Clock::Meridiem,
		},
		// 14:30
		TimePattern {
			re: Regex::new(r"\b([01]?\d|2[0-3]):([0-5]\d)\b").expect("24h pattern compiles"),
			clock: Clock::TwentyFourHour,
		},
	]
});

static CELL_TIME_RE: Lazy<Regex> =
	Lazy::new(|| Regex::new(&format!(r"(?i)\b(\d{{1,2}}:\d{{2}}\s*[AP]M)\b(?:\s+({ZONES})\b)?")).expect("cell time pattern compiles"));

/// Kickoff time in `context`, normalized to `H:MM AM/PM[ TZ]`.
pub fn find_time(context: &str) -> Option<String> {
	TIME_PATTERNS
		.iter()
		.find_map(|pattern| pattern.re.captures_iter(context).find_map(|caps| normalize(&caps, pattern.clock)))
}

/// Time from a schedule row's date/time cell, kept as the site prints it
/// (`1:00PM PDT`) apart from whitespace and letter case.
pub fn schedule_cell_time(cell_text: &str) -> Option<String> {
	let caps = CELL_TIME_RE.captures(cell_text)?;
	let clock = normalize_ws(&caps[1]).to_ascii_uppercase();
	Some(match caps.get(2) {
		Some(zone) => format!("{clock} {}", zone.as_str().to_ascii_uppercase()),
		None => clock,
	})
}

fn normalize(caps: &Captures<'_>, clock: Clock) -> Option<String> {
	let hour: u32 = caps[1].parse().ok()?;
	let minute: u32 = caps[2].parse().ok()?;
	if minute > 59 {
		return None;
	}

	let (hour, meridiem) = match clock {
		Clock::Meridiem => {
			if !(1..=12).contains(&hour) {
				return None;
			}
			(hour, if caps[3].eq_ignore_ascii_case("a") { "AM" } else { "PM" })
		}
		Clock::TwentyFourHour => {
			if hour > 23 {
				return None;
			}
			let meridiem = if hour >= 12 { "PM" } else { "AM" };
			(if hour % 12 == 0 { 12 } else { hour % 12 }, meridiem)
		}
	};

	let mut time = format!("{hour}:{minute:02} {meridiem}");
	if let Some(zone) = caps.get(4) {
		time.push(' ');
		time.push_str(&zone.as_str().to_ascii_uppercase());
	}
	Some(time)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_meridiem_times_are_normalized() {
		assert_eq!(find_time("Kickoff 10:30 am pdt at the park").as_deref(), Some("10:30 AM PDT"));
		assert_eq!(find_time("2:00PM").as_deref(), Some("2:00 PM"));
		assert_eq!(find_time("09:15 p.m.").as_deref(), Some("9:15 PM"));
		assert_eq!(find_time("11:45 AM PT").as_deref(), Some("11:45 AM PT"));
	}

	#[test]
	fn test_punctuated_and_24_hour_times() {
		assert_eq!(find_time("10:30 - PM").as_deref(), Some("10:30 PM"));
		assert_eq!(find_time("starts 14:30").as_deref(), Some("2:30 PM"));
		assert_eq!(find_time("starts 00:05").as_deref(), Some("12:05 AM"));
	}

	#[test]
	fn test_invalid_clock_values_are_skipped() {
		assert_eq!(find_time("13:00 PM then 9:00 AM").as_deref(), Some("9:00 AM"));
		assert_eq!(find_time("score 3 - 1"), None);
		assert_eq!(find_time("TBA"), None);
	}

	#[test]
	fn test_schedule_cell_time_keeps_site_shape() {
		assert_eq!(schedule_cell_time("Aug 30, 2025 1:00PM PDT").as_deref(), Some("1:00PM PDT"));
		assert_eq!(schedule_cell_time("Aug 30, 2025  9:00  am").as_deref(), Some("9:00 AM"));
		assert_eq!(schedule_cell_time("Aug 30, 2025"), None);
	}
}
