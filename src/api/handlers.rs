//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::{AppState, Transition, TimerView};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

fn respond(
    result: Result<Transition, String>,
    action: &str,
    message: &str,
) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(transition) => {
            info!("{} endpoint called", action);
            Ok(Json(ApiResponse::from_transition(&transition, message)))
        }
        Err(e) => {
            error!("Failed to {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/start-pause - Toggle the timer
pub async fn start_pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state.start_or_pause();
    let message = match &result {
        Ok(t) if t.current.is_running => "Timer started",
        _ => "Timer paused",
    };
    respond(result, "start-pause", message)
}

/// Handle POST /timer/reset - Restore the initial timer state
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.reset() {
        // Reset always reports ok, even from the initial state
        Ok(transition) => {
            info!("reset endpoint called");
            Ok(Json(ApiResponse::new(
                "ok".to_string(),
                "Timer reset".to_string(),
                TimerView::render(&transition.current),
            )))
        }
        Err(e) => {
            error!("Failed to reset: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/limit/increase - Add one minute to the limit
pub async fn increase_limit_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.increase_limit(), "increase-limit", "Timer limit increased")
}

/// Handle POST /timer/limit/decrease - Remove one minute from the limit
pub async fn decrease_limit_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.decrease_limit(), "decrease-limit", "Timer limit decreased")
}

/// Handle GET /timer - Render the current timer
pub async fn timer_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerView>, StatusCode> {
    match state.get_timer_state() {
        Ok(timer_state) => Ok(Json(TimerView::render(&timer_state))),
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return current timer and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer_state = match state.get_timer_state() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        view: TimerView::render(&timer_state),
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
