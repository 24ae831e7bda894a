use crate::handlers::games as routes;
use crate::AppState;
use axum::routing::get;
use axum::{extract::FromRef, http::Method, Router};
use tower_http::cors::{Any, CorsLayer};

pub fn get_games<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	let cors = CorsLayer::new()
		.allow_origin(Any) // Allow any origin
		.allow_methods([Method::GET])
		.allow_headers(Any);

	Router::new().route("/api/games", get(routes::games)).layer(cors)
}
