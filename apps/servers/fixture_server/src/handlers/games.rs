use crate::error::FixtureServerError;
use crate::AppState;
use axum::extract::{Query, State};
use axum::response::Json;
use chrono::Utc;
use fixture_parser::{GameRecord, TargetDates};
use serde::Deserialize;
use tracing::{info, instrument, warn};

/// Identifiers are pasted into the upstream URL, so only plain tokens are accepted.
const MAX_ID_LEN: usize = 32;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamesQuery {
	pub event_id: Option<String>,
	pub team_id: Option<String>,
}

#[axum::debug_handler]
#[instrument(name = "games", skip(state))]
pub async fn games(State(state): State<AppState>, Query(query): Query<GamesQuery>) -> Result<Json<Vec<GameRecord>>, FixtureServerError> {
	let event_id = required("eventId", query.event_id.as_deref())?;
	let team_id = required("teamId", query.team_id.as_deref())?;

	let offset = state.config.utc_offset_hours;
	let targets = TargetDates::upcoming_weekend_at(Utc::now(), offset).ok_or(FixtureServerError::InvalidUtcOffset(offset))?;

	let document = state.source.fetch(event_id, team_id).await.inspect_err(|err| warn!(error = %err, "schedule fetch failed"))?;

	let records = state.extractor.extract_bounded(document.html, targets).await;
	info!(source = %document.source, records = records.len(), "games served");

	Ok(Json(records))
}

fn required<'q>(name: &'static str, value: Option<&'q str>) -> Result<&'q str, FixtureServerError> {
	let value = value.map(str::trim).filter(|v| !v.is_empty()).ok_or(FixtureServerError::MissingParameter(name))?;

	let plain = value.len() <= MAX_ID_LEN && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
	if !plain {
		return Err(FixtureServerError::InvalidParameter { name, value: value.to_string() });
	}
	Ok(value)
}
