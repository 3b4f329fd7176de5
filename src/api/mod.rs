//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers plus the request and
//! response structures that make up the quiz views.

pub mod handlers;
pub mod requests;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/quiz", get(view_handler))
        .route("/quiz/name", put(name_handler))
        .route("/quiz/start", post(start_handler))
        .route("/quiz/next", post(next_handler))
        .route("/quiz/previous", post(previous_handler))
        .route("/quiz/jump/:index", post(jump_handler))
        .route("/quiz/answer", post(answer_handler))
        .route("/quiz/finish", post(finish_handler))
        .route("/quiz/reset", post(reset_handler))
        .route("/quiz/timer", get(timer_events_handler))
        .route("/difficulties", get(difficulties_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
