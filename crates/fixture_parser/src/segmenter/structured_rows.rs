use crate::error::ExtractError;
use crate::locator::Window;
use crate::markup::{block_contents, contains_ci, strip_tags, BlockScanner};
use chrono::NaiveDate;
use tracing::debug;

/// Cells in a schedule row: match id, date/time, home, result, away, location, division.
pub const EXPECTED_CELLS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowColumn {
	MatchId,
	DateTime,
	HomeTeam,
	Result,
	AwayTeam,
	Location,
	Division,
}

impl RowColumn {
	const fn index(self) -> usize {
		match self {
			Self::MatchId => 0,
			Self::DateTime => 1,
			Self::HomeTeam => 2,
			Self::Result => 3,
			Self::AwayTeam => 4,
			Self::Location => 5,
			Self::Division => 6,
		}
	}
}

/// One `<tr>` with at least the expected number of `<td>` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCandidate<'a> {
	/// Inner markup of the whole row.
	pub raw: &'a str,
	cells: Vec<&'a str>,
	pub window_target: Option<NaiveDate>,
}

impl<'a> RowCandidate<'a> {
	pub fn from_cells(raw: &'a str, mut cells: Vec<&'a str>, expected: usize, window_target: Option<NaiveDate>) -> Result<Self, ExtractError> {
		let expected = expected.max(EXPECTED_CELLS);
		if cells.len() < expected {
			return Err(ExtractError::short_row(cells.len(), expected));
		}
		cells.truncate(expected);
		Ok(Self { raw, cells, window_target })
	}

	/// Raw markup of a cell.
	pub fn cell(&self, column: RowColumn) -> &'a str {
		self.cells[column.index()]
	}

	/// Cell text with markup stripped.
	pub fn text(&self, column: RowColumn) -> String {
		strip_tags(self.cell(column))
	}
}

/// Rows of `window` that mention `team`. Short rows and unrelated rows are counted and skipped.
pub fn segment_rows<'a>(window: &Window<'a>, team: &str, expected_cells: usize) -> Vec<RowCandidate<'a>> {
	let src = window.text;
	let mut scanner = BlockScanner::new(src, "tr");
	let mut candidates = Vec::new();
	let (mut short, mut unrelated) = (0usize, 0usize);

	for block in scanner.by_ref() {
		let raw = &src[block.inner];
		let cells = block_contents(raw, "td");

		let row = match RowCandidate::from_cells(raw, cells, expected_cells, window.target) {
			Ok(row) => row,
			Err(err) => {
				debug!(error = %err, "skipping malformed row");
				short += 1;
				continue;
			}
		};

		if !contains_ci(&strip_tags(raw), team) {
			unrelated += 1;
			continue;
		}

		candidates.push(row);
	}

	debug!(
		candidates = candidates.len(),
		short_rows = short,
		unrelated_rows = unrelated,
		unclosed_rows = scanner.dropped(),
		window_start = window.start,
		"rows segmented"
	);
	candidates
}
