use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api_key;
pub mod environments;
pub mod error;
mod extract;
pub mod flags;
mod health;
pub mod sdk;

pub use error::ApiError;
pub use health::health;

use crate::state::AppState;

pub fn routes(state: AppState) -> Router {
    let flag_router = Router::new()
        .route("/", post(flags::routes::create).get(flags::routes::list))
        .route(
            "/{flag_key}",
            get(flags::routes::get)
                .put(flags::routes::update)
                .delete(flags::routes::delete),
        )
        .route("/{flag_key}/evaluate", post(flags::routes::evaluate));

    let environment_router = Router::new().route(
        "/",
        post(environments::routes::create).get(environments::routes::list),
    );

    let api_router = Router::new()
        .nest("/flags", flag_router)
        .nest("/environments", environment_router)
        .route("/evaluate", post(sdk::routes::evaluate))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api_key::require_api_key,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route(
            "/api/v1/client/{environment_id}",
            get(sdk::routes::client_flags),
        )
        .nest("/api/v1", api_router)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> &'static str {
    "Feature flag evaluation service"
}
