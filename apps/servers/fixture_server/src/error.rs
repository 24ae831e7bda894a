use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Value of `source` in error bodies that are not about the upstream page.
pub const QUERY_SOURCE: &str = "query";

#[derive(thiserror::Error, Debug)]
pub enum FixtureServerError {
	#[error("missing query parameter {0}")]
	MissingParameter(&'static str),

	#[error("invalid query parameter {name}: {value:?}")]
	InvalidParameter { name: &'static str, value: String },

	#[error("failed to fetch schedule: {reason}")]
	Transport { url: String, reason: String },

	#[error("schedule page returned HTTP {status}")]
	UpstreamStatus { url: String, status: u16 },

	#[error("UTC offset of {0} hours is out of range")]
	InvalidUtcOffset(i32),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error: String,
	source: String,
}

impl FixtureServerError {
	pub fn transport(url: &str, err: &reqwest::Error) -> Self {
		Self::Transport {
			url: url.to_string(),
			reason: err.to_string(),
		}
	}

	const fn status_code(&self) -> StatusCode {
		match self {
			Self::MissingParameter(_) | Self::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
			Self::Transport { .. } | Self::UpstreamStatus { .. } => StatusCode::BAD_GATEWAY,
			Self::InvalidUtcOffset(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// Where the failure came from: the upstream URL, or the request query.
	pub fn source_url(&self) -> &str {
		match self {
			Self::Transport { url, .. } | Self::UpstreamStatus { url, .. } => url,
			Self::MissingParameter(_) | Self::InvalidParameter { .. } | Self::InvalidUtcOffset(_) => QUERY_SOURCE,
		}
	}
}

impl IntoResponse for FixtureServerError {
	fn into_response(self) -> Response {
		let status = self.status_code();
		if status.is_server_error() {
			tracing::warn!(error = %self, source = self.source_url(), "request failed");
		}

		let body = ErrorBody {
			error: self.to_string(),
			source: self.source_url().to_string(),
		};
		(status, Json(body)).into_response()
	}
}
