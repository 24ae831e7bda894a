//! Locate, segment, extract, filter and dedupe.

use crate::dedupe::{dedupe, DedupeKey};
use crate::error::ExtractError;
use crate::extractors::{
	away_team, away_team_in_line, find_location, find_opponent, find_time, home_team, home_team_in_line, location_from_cell, resolve_date, resolve_division, schedule_cell_time,
	DateResolution, DivisionInputs, DivisionSource, DEFAULT_DIVISION_ORDER,
};
use crate::home_filter::{check_home, HomeEvidence};
use crate::locator::{locate_windows, DEFAULT_WINDOW_RADIUS};
use crate::markup::{line_spans, strip_tags};
use crate::schema::{GameRecord, RecordParts, TargetDates};
use crate::segmenter::{is_fixture_line, segment, Candidate, LineCandidate, RowCandidate, RowColumn, SegmentOptions, SegmentStrategy, EXPECTED_CELLS};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_CONTEXT_LINES: usize = 3;
pub const DEFAULT_PARSE_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_STRATEGIES: &[SegmentStrategy] = &[SegmentStrategy::StructuredRows, SegmentStrategy::SeparatorLines];

/// Knobs of one extractor. Start from [`ExtractorConfig::new`] and override with the `with_*` methods.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
	pub team_name: String,
	/// Club names stripped from a home team to leave its division, longest first.
	pub club_prefixes: Vec<String>,
	pub window_radius: usize,
	pub context_lines: usize,
	pub expected_cells: usize,
	pub strategies: Vec<SegmentStrategy>,
	pub division_order: Vec<DivisionSource>,
	pub dedupe_key: DedupeKey,
	pub parse_timeout: Duration,
}

impl ExtractorConfig {
	pub fn new(team_name: impl Into<String>) -> Self {
		let team_name = team_name.into();
		Self {
			club_prefixes: vec![team_name.clone()],
			team_name,
			window_radius: DEFAULT_WINDOW_RADIUS,
			context_lines: DEFAULT_CONTEXT_LINES,
			expected_cells: EXPECTED_CELLS,
			strategies: DEFAULT_STRATEGIES.to_vec(),
			division_order: DEFAULT_DIVISION_ORDER.to_vec(),
			dedupe_key: DedupeKey::default(),
			parse_timeout: DEFAULT_PARSE_TIMEOUT,
		}
	}

	#[must_use]
	pub fn with_club_prefixes(mut self, prefixes: Vec<String>) -> Self {
		self.club_prefixes = prefixes;
		self
	}

	#[must_use]
	pub const fn with_window_radius(mut self, radius: usize) -> Self {
		self.window_radius = radius;
		self
	}

	#[must_use]
	pub const fn with_context_lines(mut self, lines: usize) -> Self {
		self.context_lines = lines;
		self
	}

	#[must_use]
	pub const fn with_expected_cells(mut self, cells: usize) -> Self {
		self.expected_cells = cells;
		self
	}

	#[must_use]
	pub fn with_strategies(mut self, strategies: Vec<SegmentStrategy>) -> Self {
		self.strategies = strategies;
		self
	}

	#[must_use]
	pub fn with_division_order(mut self, order: Vec<DivisionSource>) -> Self {
		self.division_order = order;
		self
	}

	#[must_use]
	pub const fn with_dedupe_key(mut self, key: DedupeKey) -> Self {
		self.dedupe_key = key;
		self
	}

	#[must_use]
	pub const fn with_parse_timeout(mut self, timeout: Duration) -> Self {
		self.parse_timeout = timeout;
		self
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
	Init,
	WindowsLocated,
	Segmented,
	FieldsExtracted,
	Filtered,
	Deduplicated,
	Done,
}

/// Fields of one candidate before the home and date checks.
#[derive(Debug)]
struct Draft<'a> {
	parts: RecordParts,
	date: DateResolution,
	evidence: HomeEvidence<'a>,
}

#[derive(Debug, Clone)]
pub struct FixtureExtractor {
	config: Arc<ExtractorConfig>,
}

impl FixtureExtractor {
	pub fn new(config: ExtractorConfig) -> Self {
		Self { config: Arc::new(config) }
	}

	pub fn config(&self) -> &ExtractorConfig {
		&self.config
	}

	/// Home fixtures of the configured team on the target weekend.
	///
	/// Never fails: anything that cannot be read as a home fixture is logged and skipped.
	pub fn extract(&self, document: &str, targets: &TargetDates) -> Vec<GameRecord> {
		let team = self.config.team_name.as_str();
		debug!(stage = ?Stage::Init, len = document.len(), team, saturday = %targets.saturday(), sunday = %targets.sunday());

		let windows = locate_windows(document, &targets.forms(), self.config.window_radius);
		debug!(stage = ?Stage::WindowsLocated, windows = windows.len(), fallback = windows.iter().any(|w| w.is_fallback()));

		let opts = SegmentOptions {
			team,
			expected_cells: self.config.expected_cells,
			context_lines: self.config.context_lines,
		};
		let segmentation = segment(&windows, &self.config.strategies, &opts);
		debug!(stage = ?Stage::Segmented, strategy = ?segmentation.strategy, candidates = segmentation.candidates.len());

		let drafts: Vec<Draft<'_>> = segmentation
			.candidates
			.iter()
			.map(|candidate| match candidate {
				Candidate::Row(row) => self.row_draft(row, targets),
				Candidate::Line(line) => self.line_draft(line, targets),
			})
			.collect();
		debug!(stage = ?Stage::FieldsExtracted, drafts = drafts.len());

		let records: Vec<GameRecord> = drafts
			.into_iter()
			.filter_map(|draft| match accept(&draft, team, document, targets) {
				Ok(date) => Some(GameRecord::new(draft.parts, date)),
				Err(err) => {
					debug!(error = %err, home = %draft.parts.home_team, "candidate rejected");
					None
				}
			})
			.collect();
		debug!(stage = ?Stage::Filtered, records = records.len());

		let accepted = records.len();
		let records = dedupe(records, self.config.dedupe_key);
		debug!(stage = ?Stage::Deduplicated, records = records.len());

		info!(
			stage = ?Stage::Done,
			candidates = segmentation.candidates.len(),
			accepted,
			records = records.len(),
			strategy = ?segmentation.strategy,
			"fixtures extracted"
		);
		records
	}

	/// [`Self::extract`] on a blocking task, bounded by the configured parse timeout.
	///
	/// A timeout or a panicking task yields no records. The blocking task is not
	/// cancelled on timeout; its result is discarded when it finishes.
	pub async fn extract_bounded(&self, document: String, targets: TargetDates) -> Vec<GameRecord> {
		let extractor = self.clone();
		let timeout = self.config.parse_timeout;
		let task = tokio::task::spawn_blocking(move || extractor.extract(&document, &targets));

		match tokio::time::timeout(timeout, task).await {
			Ok(Ok(records)) => records,
			Ok(Err(err)) => {
				warn!(error = %err, "extraction task failed");
				Vec::new()
			}
			Err(_) => {
				warn!(timeout_ms = timeout.as_millis(), "extraction timed out");
				Vec::new()
			}
		}
	}

	fn row_draft<'a>(&self, row: &RowCandidate<'a>, targets: &TargetDates) -> Draft<'a> {
		let team = self.config.team_name.as_str();
		let row_text = strip_tags(row.raw);
		let date_cell = row.text(RowColumn::DateTime);

		let home = home_team(row.cell(RowColumn::HomeTeam), team).unwrap_or_else(|| row.text(RowColumn::HomeTeam));
		let division_cell = row.text(RowColumn::Division);
		let division = resolve_division(
			&self.config.division_order,
			&DivisionInputs {
				cell: Some(division_cell.as_str()),
				home_team: &home,
				context: &row_text,
			},
			&self.config.club_prefixes,
		);

		Draft {
			date: resolve_first(&[date_cell.as_str(), row_text.as_str()], targets, row.window_target),
			parts: RecordParts {
				away_team: away_team(row.cell(RowColumn::AwayTeam), team).or_else(|| find_opponent(row.raw, team)),
				time: schedule_cell_time(&date_cell).or_else(|| find_time(&row_text)),
				location: location_from_cell(row.cell(RowColumn::Location)).or_else(|| find_location(row.raw)),
				division: Some(division),
				home_team: home,
			},
			evidence: HomeEvidence::Row {
				home_cell: row.cell(RowColumn::HomeTeam),
				away_cell: row.cell(RowColumn::AwayTeam),
				result_marker: row.cell(RowColumn::Result),
				match_id: row.cell(RowColumn::MatchId),
			},
		}
	}

	fn line_draft<'a>(&self, line: &LineCandidate<'a>, targets: &TargetDates) -> Draft<'a> {
		let team = self.config.team_name.as_str();
		let line_text = strip_tags(line.line);
		let context_text = strip_tags(line.context);

		let home = home_team_in_line(line.line, &line.home_part, team).unwrap_or_else(|| line.home_part.clone());
		let division = resolve_division(
			&self.config.division_order,
			&DivisionInputs {
				cell: None,
				home_team: &home,
				context: &context_text,
			},
			&self.config.club_prefixes,
		);

		Draft {
			date: line_date(line, &line_text, team, targets),
			parts: RecordParts {
				away_team: find_opponent(line.line, team)
					.or_else(|| away_team_in_line(&line.away_part, team))
					.or_else(|| find_opponent(line.context, team)),
				time: find_time(&line_text).or_else(|| outward(line).into_iter().find_map(|raw| find_time(&strip_tags(raw)))),
				location: find_location(line.line).or_else(|| find_location(line.context)),
				division: Some(division),
				home_team: home,
			},
			evidence: HomeEvidence::Line { position: line.position },
		}
	}
}

/// Date found in the narrowest context that has one, else the window or Saturday fallback.
fn resolve_first(contexts: &[&str], targets: &TargetDates, window_target: Option<NaiveDate>) -> DateResolution {
	let mut resolution = DateResolution::Defaulted(targets.saturday());
	for context in contexts {
		resolution = resolve_date(context, targets, window_target);
		if matches!(resolution, DateResolution::Parsed(_) | DateResolution::Mentioned(_)) {
			break;
		}
	}
	resolution
}

/// Date of a separator line: its own text, then the nearest heading above it
/// (other fixture lines are skipped), then the lines below up to the next fixture.
fn line_date(line: &LineCandidate<'_>, line_text: &str, team: &str, targets: &TargetDates) -> DateResolution {
	let headings = line_spans(line.preceding)
		.into_iter()
		.rev()
		.map(|span| strip_tags(&line.preceding[span]))
		.filter(|text| !is_fixture_line(text, team));
	let below = line.below.iter().map(|raw| strip_tags(raw));

	std::iter::once(line_text.to_string())
		.chain(headings)
		.chain(below)
		.map(|text| resolve_date(&text, targets, None))
		.find(|resolution| matches!(resolution, DateResolution::Parsed(_) | DateResolution::Mentioned(_)))
		.unwrap_or_else(|| line.window_target.map_or_else(|| DateResolution::Defaulted(targets.saturday()), DateResolution::Window))
}

/// Neighbouring lines by distance, the one above before the one below.
fn outward<'a>(line: &LineCandidate<'a>) -> Vec<&'a str> {
	let depth = line.above.len().max(line.below.len());
	(0..depth).flat_map(|k| [line.above.get(k), line.below.get(k)]).flatten().copied().collect()
}

fn accept(draft: &Draft<'_>, team: &str, document: &str, targets: &TargetDates) -> Result<NaiveDate, ExtractError> {
	check_home(&draft.evidence, team, document)?;

	let date = draft.date.date();
	if !targets.contains(date) {
		return Err(ExtractError::DateOutsideWeekend { date });
	}
	Ok(date)
}
