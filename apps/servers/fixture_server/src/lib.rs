use axum::Router;
use fixture_parser::FixtureExtractor;
use std::sync::Arc;

pub mod config;
pub mod error;
pub mod fetcher;
pub mod handlers;
pub mod health;
pub mod routes;

pub use config::*;
pub use error::FixtureServerError;
pub use fetcher::{DocumentSource, FetchedDocument, HttpDocumentSource};
pub use health::perform_health_check;

#[derive(Clone)]
pub struct AppState {
	pub config: Arc<Config>,
	pub source: Arc<dyn DocumentSource>,
	pub extractor: FixtureExtractor,
}

impl AppState {
	pub fn new(config: Config, source: Arc<dyn DocumentSource>) -> Self {
		let extractor = FixtureExtractor::new(config.extractor_config());
		Self {
			config: Arc::new(config),
			source,
			extractor,
		}
	}
}

/// Every route of the service, state applied.
pub fn app(state: AppState) -> Router {
	Router::new().merge(routes::games::get_games()).merge(routes::health::get_health()).with_state(state)
}
