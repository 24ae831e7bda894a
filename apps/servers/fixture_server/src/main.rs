use anyhow::Result;
use clap::Parser;
use fixture_server::{app, perform_health_check, AppState, Config, HttpDocumentSource};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{filter::EnvFilter, fmt::format::JsonFields, util::SubscriberInitExt, Layer};

#[tokio::main]
async fn main() -> Result<()> {
	dotenv::dotenv().ok();
	let config = Config::parse();

	if config.health_check {
		return perform_health_check(&config).await;
	}

	let _ = init_tracing(&config);

	let source = HttpDocumentSource::new(config.source_url_template.clone(), config.fetch_timeout())?;
	let addr = config.addr();
	tracing::info!(team = %config.team_name, template = %config.source_url_template, "fixture server configured");

	let app = app(AppState::new(config, Arc::new(source))).layer(TraceLayer::new_for_http());

	let listener = TcpListener::bind(&addr).await?;
	tracing::info!("listening on {}", listener.local_addr()?);

	axum::serve(listener, app)
		.with_graceful_shutdown(async {
			tokio::signal::ctrl_c().await.ok();
			tracing::info!("Received Ctrl+C, shutting down");
		})
		.await?;

	tracing::info!("Server stopped");
	Ok(())
}

pub fn init_tracing(config: &Config) -> Option<()> {
	use std::str::FromStr;
	use tracing_subscriber::layer::SubscriberExt;

	let filter = EnvFilter::from_str(config.rust_log.as_deref().unwrap_or("info")).ok()?;

	tracing_subscriber::registry()
		.with(if config.log_json {
			Box::new(
				tracing_subscriber::fmt::layer()
					.fmt_fields(JsonFields::default())
					.event_format(tracing_subscriber::fmt::format().json().flatten_event(true).with_span_list(false))
					.with_filter(filter),
			) as Box<dyn Layer<_> + Send + Sync>
		} else {
			Box::new(tracing_subscriber::fmt::layer().event_format(tracing_subscriber::fmt::format().pretty()).with_filter(filter))
		})
		.init();
	Some(())
}
