//! Splits date windows into candidate fixtures.
//!
//! Two strategies exist for the two markup eras of the schedule site: tabular
//! rows with a fixed cell layout, and loose text lines that join the two teams
//! with a dash. They are tried in the configured order and a later strategy
//! only runs when every earlier one found nothing.

pub mod separator_lines;
pub mod structured_rows;

pub use separator_lines::{is_fixture_line, segment_lines, LineCandidate, TeamPosition};
pub use structured_rows::{segment_rows, RowCandidate, RowColumn, EXPECTED_CELLS};

use crate::locator::Window;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentStrategy {
	StructuredRows,
	SeparatorLines,
}

/// An unvalidated fragment believed to describe one fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate<'a> {
	Row(RowCandidate<'a>),
	Line(LineCandidate<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct SegmentOptions<'t> {
	pub team: &'t str,
	pub expected_cells: usize,
	pub context_lines: usize,
}

#[derive(Debug, Default)]
pub struct Segmentation<'a> {
	/// Strategy that produced the candidates, `None` when none did.
	pub strategy: Option<SegmentStrategy>,
	pub candidates: Vec<Candidate<'a>>,
}

pub fn segment<'a>(windows: &[Window<'a>], strategies: &[SegmentStrategy], opts: &SegmentOptions<'_>) -> Segmentation<'a> {
	for &strategy in strategies {
		let candidates: Vec<Candidate<'a>> = windows.iter().flat_map(|window| run_strategy(strategy, window, opts)).collect();

		debug!(?strategy, candidates = candidates.len(), windows = windows.len(), "segmentation attempt");
		if !candidates.is_empty() {
			return Segmentation {
				strategy: Some(strategy),
				candidates,
			};
		}
	}

	Segmentation::default()
}

fn run_strategy<'a>(strategy: SegmentStrategy, window: &Window<'a>, opts: &SegmentOptions<'_>) -> Vec<Candidate<'a>> {
	match strategy {
		SegmentStrategy::StructuredRows => segment_rows(window, opts.team, opts.expected_cells).into_iter().map(Candidate::Row).collect(),
		SegmentStrategy::SeparatorLines => segment_lines(window, opts.team, opts.context_lines).into_iter().map(Candidate::Line).collect(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const OPTS: SegmentOptions<'static> = SegmentOptions {
		team: "Reno Apex",
		expected_cells: EXPECTED_CELLS,
		context_lines: 2,
	};

	#[test]
	fn test_rows_win_when_present() {
		let doc = "<tr><td>1</td><td>Aug 30, 2025</td><td>Reno Apex U10</td><td>-</td><td>Other FC</td><td>Park</td><td>U10</td></tr>\nReno Apex U10 - Other FC";
		let result = segment(&[Window::whole(doc)], &[SegmentStrategy::StructuredRows, SegmentStrategy::SeparatorLines], &OPTS);

		assert_eq!(result.strategy, Some(SegmentStrategy::StructuredRows));
		assert_eq!(result.candidates.len(), 1);
		assert!(matches!(result.candidates[0], Candidate::Row(_)));
	}

	#[test]
	fn test_lines_run_only_after_rows_find_nothing() {
		let doc = "<div>Saturday</div>\n<div>Reno Apex U10 - Other FC</div>";
		let result = segment(&[Window::whole(doc)], &[SegmentStrategy::StructuredRows, SegmentStrategy::SeparatorLines], &OPTS);

		assert_eq!(result.strategy, Some(SegmentStrategy::SeparatorLines));
		assert_eq!(result.candidates.len(), 1);
	}

	#[test]
	fn test_nothing_found() {
		let result = segment(&[Window::whole("no fixtures")], &[SegmentStrategy::StructuredRows, SegmentStrategy::SeparatorLines], &OPTS);
		assert!(result.strategy.is_none());
		assert!(result.candidates.is_empty());
	}
}
