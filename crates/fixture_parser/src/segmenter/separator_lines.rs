use crate::locator::Window;
use crate::markup::{contains_ci, line_spans, strip_tags};
use chrono::NaiveDate;
use tracing::debug;

/// Tokens joining the two sides of a fixture line, preferred first.
pub const SEPARATORS: &[&str] = &[" - ", "- "];

/// Where the tracked team sits relative to the separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamPosition {
	BeforeSeparator,
	AfterSeparator,
}

/// A text line naming the tracked team on one side of a separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCandidate<'a> {
	/// Raw markup of the line itself.
	pub line: &'a str,
	/// Raw markup of the line together with its neighbours, up to but excluding
	/// the nearest other fixture line on either side.
	pub context: &'a str,
	/// Neighbouring lines above, nearest first, bounded like `context`.
	pub above: Vec<&'a str>,
	/// Neighbouring lines below, nearest first, bounded like `context`.
	pub below: Vec<&'a str>,
	/// Window text before the line, where the day's heading usually sits.
	pub preceding: &'a str,
	/// Stripped text before the separator.
	pub home_part: String,
	/// Stripped text after the separator.
	pub away_part: String,
	pub position: TeamPosition,
	pub window_target: Option<NaiveDate>,
}

/// Stripped `text` names the team and splits on a separator.
pub fn is_fixture_line(text: &str, team: &str) -> bool {
	contains_ci(text, team) && split_sides(text).is_some()
}

fn split_sides(text: &str) -> Option<(&str, &str)> {
	SEPARATORS.iter().find_map(|sep| text.split_once(sep))
}

pub fn segment_lines<'a>(window: &Window<'a>, team: &str, context_lines: usize) -> Vec<LineCandidate<'a>> {
	let src = window.text;
	let spans = line_spans(src);
	let texts: Vec<String> = spans.iter().map(|span| strip_tags(&src[span.clone()])).collect();
	let fixture_lines: Vec<bool> = texts.iter().map(|text| is_fixture_line(text, team)).collect();
	let mut candidates = Vec::new();

	for (i, span) in spans.iter().enumerate() {
		if !fixture_lines[i] {
			continue;
		}
		let Some((home_part, away_part)) = split_sides(&texts[i]) else {
			continue;
		};

		let position = if contains_ci(home_part, team) {
			TeamPosition::BeforeSeparator
		} else if contains_ci(away_part, team) {
			TeamPosition::AfterSeparator
		} else {
			// name straddles the separator
			continue;
		};

		let above: Vec<usize> = (i.saturating_sub(context_lines)..i).rev().take_while(|&j| !fixture_lines[j]).collect();
		let below: Vec<usize> = (i + 1..spans.len()).take(context_lines).take_while(|&j| !fixture_lines[j]).collect();
		let lo = above.last().map_or(span.start, |&j| spans[j].start);
		let hi = below.last().map_or(span.end, |&j| spans[j].end);

		candidates.push(LineCandidate {
			line: &src[span.clone()],
			context: &src[lo..hi],
			above: above.iter().map(|&j| &src[spans[j].clone()]).collect(),
			below: below.iter().map(|&j| &src[spans[j].clone()]).collect(),
			preceding: &src[..span.start],
			home_part: home_part.trim().to_string(),
			away_part: away_part.trim().to_string(),
			position,
			window_target: window.target,
		});
	}

	debug!(candidates = candidates.len(), lines = spans.len(), window_start = window.start, "lines segmented");
	candidates
}
