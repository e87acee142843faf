//! API Handlers
use crate::metrics::Metrics;
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use sortrace_core::{RunObserver, ENGINE_VERSION};
use sortrace_input::{DataPattern, RunConfig};
use sortrace_runner::{RunnerError, Session, StopHandle};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared by every handler. The session lock is held for the whole of a run,
/// so a second request finds it taken and is answered with 409.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
    pub stop: StopHandle,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(config: RunConfig, observer: Arc<dyn RunObserver>) -> anyhow::Result<Self> {
        let stop = StopHandle::new();
        let session = Session::with_stop_handle(config, observer, stop.clone())?;
        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            stop,
            metrics: Metrics::new()?,
        })
    }
}

type Reply = (StatusCode, Json<Value>);

fn failure(err: RunnerError) -> Reply {
    let status = match &err {
        RunnerError::Busy => StatusCode::CONFLICT,
        e if e.is_rejection() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    tracing::debug!(%status, error = %err, "request refused");
    (status, Json(json!({ "error": err.to_string() })))
}

fn ok(body: Value) -> Reply {
    (StatusCode::OK, Json(body))
}

fn snapshot(session: &Session) -> Value {
    json!({
        "config": session.config(),
        "sequence": session.sequence(),
    })
}

pub async fn health() -> Reply {
    ok(json!({ "status": "ok", "version": ENGINE_VERSION }))
}

pub async fn list_algorithms() -> Reply {
    ok(json!({ "algorithms": sortrace_algorithms::catalog() }))
}

pub async fn get_sequence(State(state): State<AppState>) -> Reply {
    match state.session.try_lock() {
        Ok(session) => ok(snapshot(&session)),
        Err(_) => failure(RunnerError::Busy),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateRequest {
    pub pattern: Option<DataPattern>,
    pub size: Option<usize>,
    pub speed: Option<u8>,
}

pub async fn generate(State(state): State<AppState>, Json(req): Json<GenerateRequest>) -> Reply {
    let Ok(mut session) = state.session.try_lock() else {
        return failure(RunnerError::Busy);
    };
    match session.reconfigure(req.pattern, req.size, req.speed).map(|_| ()) {
        Ok(()) => ok(snapshot(&session)),
        Err(err) => failure(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct CustomRequest {
    pub values: String,
}

pub async fn load_custom(State(state): State<AppState>, Json(req): Json<CustomRequest>) -> Reply {
    let Ok(mut session) = state.session.try_lock() else {
        return failure(RunnerError::Busy);
    };
    match session.load_custom(&req.values).map(|_| ()) {
        Ok(()) => ok(snapshot(&session)),
        Err(err) => failure(err),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RunRequest {
    /// Falls back to the configured algorithm
    pub algorithm: Option<String>,
}

pub async fn run(State(state): State<AppState>, Json(req): Json<RunRequest>) -> Reply {
    let Ok(mut session) = state.session.try_lock() else {
        return failure(RunnerError::Busy);
    };
    let result = match req.algorithm {
        Some(selector) => session.run(&selector).await,
        None => session.run_configured().await,
    };
    match result {
        Ok(summary) => {
            state.metrics.record_run(&summary);
            ok(json!(summary))
        }
        Err(err) => failure(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct RaceRequest {
    pub algorithms: Vec<String>,
}

pub async fn race(State(state): State<AppState>, Json(req): Json<RaceRequest>) -> Reply {
    let Ok(mut session) = state.session.try_lock() else {
        return failure(RunnerError::Busy);
    };
    match session.race(req.algorithms.as_slice()).await {
        Ok(report) => {
            state.metrics.record_race(&report);
            ok(json!(report))
        }
        Err(err) => failure(err),
    }
}

pub async fn stop(State(state): State<AppState>) -> Reply {
    ok(json!({ "stopped": state.stop.stop() }))
}

pub async fn metrics(State(state): State<AppState>) -> (StatusCode, String) {
    match state.metrics.encode() {
        Ok(text) => (StatusCode::OK, text),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}
