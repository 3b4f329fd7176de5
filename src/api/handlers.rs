//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use chrono::Utc;
use futures::stream::{self, Stream};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use crate::{
    catalog::Catalog,
    state::{AppState, QuizSnapshot},
};
use super::{
    requests::{AnswerRequest, NameRequest, StartRequest},
    responses::{difficulty_options, ApiResponse, DifficultyOption, HealthResponse, QuizView, StatusResponse},
};

/// Turn a state transition result into a view response
fn respond(
    catalog: &Catalog,
    action: &str,
    result: Result<QuizSnapshot, String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(snapshot) => {
            debug!("Quiz action '{}' applied", action);
            let view = QuizView::render(&snapshot, catalog, Utc::now());
            Ok(Json(ApiResponse::new(action, view)))
        }
        Err(e) => {
            error!("Failed to apply quiz action '{}': {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /quiz - Return the current view
pub async fn view_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(&state.catalog, "view", state.snapshot())
}

/// Handle PUT /quiz/name - Update the name typed on the entry view
pub async fn name_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NameRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    respond(&state.catalog, "name", state.set_name_draft(&request.name))
}

/// Handle POST /quiz/start - Start a quiz at the requested difficulty
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    info!("Start requested at difficulty {}", request.difficulty);
    let result = state.start_quiz(request.difficulty, request.name.as_deref());
    respond(&state.catalog, "start", result)
}

/// Handle POST /quiz/next - Advance, finishing on the last question
pub async fn next_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(&state.catalog, "next", state.next_question())
}

/// Handle POST /quiz/previous - Go back one question
pub async fn previous_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(&state.catalog, "previous", state.previous_question())
}

/// Handle POST /quiz/jump/:index - Go directly to a question
pub async fn jump_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<ApiResponse>, StatusCode> {
    respond(&state.catalog, "jump", state.jump_to_question(index))
}

/// Handle POST /quiz/answer - Record an answer for the current question
pub async fn answer_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    respond(&state.catalog, "answer", state.answer_question(request.option))
}

/// Handle POST /quiz/finish - Submit the quiz
pub async fn finish_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(&state.catalog, "finish", state.finish_quiz("finish"))
}

/// Handle POST /quiz/reset - Return to the entry view
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(&state.catalog, "reset", state.reset_quiz())
}

/// Handle GET /quiz/timer - Stream countdown ticks as server-sent events
pub async fn timer_events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("Timer subscriber connected");
    let rx = state.subscribe_timer();

    let events = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(tick) => {
                    let event = match Event::default().event("timer").json_data(&tick) {
                        Ok(event) => event,
                        Err(e) => {
                            warn!("Failed to encode timer event: {}", e);
                            continue;
                        }
                    };
                    return Some((Ok(event), rx));
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Timer subscriber lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /difficulties - Return the difficulty table
pub async fn difficulties_handler(State(state): State<Arc<AppState>>) -> Json<Vec<DifficultyOption>> {
    Json(difficulty_options(&state.catalog))
}

/// Handle GET /status - Return current session and timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let snapshot = match state.snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get quiz state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();
    let current_question_index = snapshot
        .session
        .current_question_index()
        .map_or(-1, |index| index as i64);

    Ok(Json(StatusResponse {
        phase: snapshot.session.phase(),
        current_question_index,
        timer_active: snapshot.countdown.is_active(),
        timer_remaining_seconds: snapshot.countdown.remaining_seconds(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
