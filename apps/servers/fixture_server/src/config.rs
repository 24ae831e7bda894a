use clap::Parser;
use fixture_parser::{DedupeKey, ExtractorConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Parser, Clone, Debug, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
pub struct Config {
	/// Use JSON formatting for tracing
	#[arg(long, env = "LOG_JSON", default_value = "false")]
	pub log_json: bool,

	/// Log level
	#[arg(long, env = "RUST_LOG")]
	pub rust_log: Option<String>,

	/// Server host
	#[arg(long, env = "HOST", default_value = "127.0.0.1")]
	pub host: String,

	/// Server port
	#[arg(long, env = "PORT", default_value = "8080")]
	pub port: u16,

	/// Team whose home fixtures are served
	#[arg(long, env = "TEAM_NAME", default_value = "Reno Apex")]
	pub team_name: String,

	/// Club names stripped from a team name to find its division, full name first
	#[arg(long, env = "CLUB_PREFIXES", value_delimiter = ',', default_value = "Reno APEX Soccer Club,Reno Apex")]
	pub club_prefixes: Vec<String>,

	/// Schedule page URL with {event} and {team} placeholders
	#[arg(long, env = "SOURCE_URL_TEMPLATE", default_value = "https://system.gotsport.com/org_event/events/{event}/schedules?team={team}")]
	pub source_url_template: String,

	/// Upstream fetch timeout in seconds
	#[arg(long, env = "FETCH_TIMEOUT_SECS", default_value = "10")]
	pub fetch_timeout_secs: u64,

	/// Extraction timeout in milliseconds
	#[arg(long, env = "PARSE_TIMEOUT_MS", default_value = "5000")]
	pub parse_timeout_ms: u64,

	/// Bytes scanned on each side of a date mention
	#[arg(long, env = "WINDOW_RADIUS", default_value = "5000")]
	pub window_radius: usize,

	/// UTC offset of the schedule's local time, in hours
	#[arg(long, env = "UTC_OFFSET_HOURS", default_value = "-7", allow_negative_numbers = true)]
	pub utc_offset_hours: i32,

	/// Treat fixtures with different opponents at the same slot as distinct
	#[arg(long, env = "DEDUPE_ON_AWAY", default_value = "false")]
	pub dedupe_on_away: bool,

	/// Probe a running server's /health endpoint and exit
	#[arg(long, env = "HEALTH_CHECK")]
	pub health_check: bool,

	/// Host probed in health-check mode
	#[arg(long, env = "HEALTH_CHECK_HOST", default_value = "127.0.0.1")]
	pub health_check_host: String,

	/// Port probed in health-check mode
	#[arg(long, env = "HEALTH_CHECK_PORT", default_value = "8080")]
	pub health_check_port: u16,
}

impl Config {
	pub fn new() -> Self {
		Self::parse()
	}

	pub fn addr(&self) -> String {
		format!("{}:{}", self.host, self.port)
	}

	pub const fn fetch_timeout(&self) -> Duration {
		Duration::from_secs(self.fetch_timeout_secs)
	}

	pub fn extractor_config(&self) -> ExtractorConfig {
		let prefixes = self.club_prefixes.iter().map(|p| p.trim().to_string()).filter(|p| !p.is_empty()).collect();
		let dedupe_key = if self.dedupe_on_away { DedupeKey::DateTimeHomeAway } else { DedupeKey::DateTimeHome };

		ExtractorConfig::new(self.team_name.trim())
			.with_club_prefixes(prefixes)
			.with_window_radius(self.window_radius)
			.with_dedupe_key(dedupe_key)
			.with_parse_timeout(Duration::from_millis(self.parse_timeout_ms))
	}
}

impl Default for Config {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_map_into_extractor_config() {
		let config = Config::parse_from(["fixture_server"]);
		assert_eq!(config.utc_offset_hours, -7);
		assert_eq!(config.club_prefixes, vec!["Reno APEX Soccer Club".to_string(), "Reno Apex".to_string()]);

		let extractor = config.extractor_config();
		assert_eq!(extractor.team_name, "Reno Apex");
		assert_eq!(extractor.dedupe_key, DedupeKey::DateTimeHome);
		assert_eq!(extractor.parse_timeout, Duration::from_millis(5000));
	}

	#[test]
	fn test_overrides() {
		let config = Config::parse_from(["fixture_server", "--utc-offset-hours", "-5", "--dedupe-on-away", "--club-prefixes", "Tahoe FC, ,Tahoe"]);
		assert_eq!(config.utc_offset_hours, -5);

		let extractor = config.extractor_config();
		assert_eq!(extractor.club_prefixes, vec!["Tahoe FC".to_string(), "Tahoe".to_string()]);
		assert_eq!(extractor.dedupe_key, DedupeKey::DateTimeHomeAway);
	}
}
