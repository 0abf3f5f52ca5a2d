//! JSON API handlers for the web surface.
//!
//! Thin wrappers over the `thought` module: validation and status-code
//! mapping happen here, all real work happens in the store/search layers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::analysis::{self, Annotation, Category, Emotion, ThoughtInput};
use crate::chat::ChatTurn;
use crate::db::migrations;
use crate::server::AppState;
use crate::thought::search::{PageRequest, SortKey, SortOrder, ThoughtFilter, ThoughtListResponse};
use crate::thought::stats::StatsResponse;
use crate::thought::store;
use crate::thought::types::{NewThought, Thought, ThoughtUpdate, MAX_CONTENT_LEN};

/// API error with an HTTP status. Everything unexpected collapses to 500
/// without leaking internals.
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Self::Internal(error) => {
                tracing::error!(error = %error, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        Self::Internal(error)
    }
}

/// Lock the shared connection, surfacing poisoning as a 500.
fn lock_db(state: &AppState) -> Result<std::sync::MutexGuard<'_, rusqlite::Connection>, ApiError> {
    state
        .db
        .lock()
        .map_err(|_| ApiError::Internal(anyhow::anyhow!("database lock poisoned")))
}

fn validate_content(content: &str) -> Result<(), ApiError> {
    if content.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "content must not be empty or whitespace-only".into(),
        ));
    }
    if content.chars().count() > MAX_CONTENT_LEN {
        return Err(ApiError::BadRequest(format!(
            "content exceeds {MAX_CONTENT_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_importance(importance: Option<f64>) -> Result<(), ApiError> {
    if let Some(value) = importance {
        if !(0.0..=1.0).contains(&value) {
            return Err(ApiError::BadRequest(format!(
                "importance must be in [0.0, 1.0], got {value}"
            )));
        }
    }
    Ok(())
}

// ── Health ────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub schema_version: u32,
}

pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let conn = lock_db(&state)?;
    let schema_version = migrations::get_schema_version(&conn)
        .map_err(|e| ApiError::Internal(e.into()))?;
    Ok(Json(HealthResponse {
        status: "ok",
        schema_version,
    }))
}

// ── Thought CRUD ──────────────────────────────────────────────────────────────

pub async fn create_thought(
    State(state): State<AppState>,
    Json(new): Json<NewThought>,
) -> Result<(StatusCode, Json<Thought>), ApiError> {
    validate_content(&new.content)?;
    validate_importance(new.importance)?;

    let mut conn = lock_db(&state)?;
    let thought = store::create_thought(&mut conn, &state.lexicon, &state.config.analysis, &new)?;
    Ok((StatusCode::CREATED, Json(thought)))
}

/// Query parameters for `GET /thoughts`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    pub category: Option<Category>,
    pub emotion: Option<Emotion>,
    pub tag: Option<String>,
    pub min_importance: Option<f64>,
    pub max_importance: Option<f64>,
    pub created_after: Option<String>,
    pub created_before: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
    pub size: Option<usize>,
    pub order_by: Option<SortKey>,
    pub desc: Option<bool>,
}

pub async fn list_thoughts(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ThoughtListResponse>, ApiError> {
    let filter = ThoughtFilter {
        category: params.category,
        emotion: params.emotion,
        tag: params.tag,
        min_importance: params.min_importance,
        max_importance: params.max_importance,
        created_after: params.created_after,
        created_before: params.created_before,
        search: params.search,
    };
    let order = SortOrder {
        key: params.order_by.unwrap_or_default(),
        descending: params.desc.unwrap_or(true),
    };
    let page = PageRequest {
        page: params.page.unwrap_or(1),
        size: params.size.unwrap_or(PageRequest::default().size),
    };

    let conn = lock_db(&state)?;
    let response = crate::thought::search::list_thoughts(&conn, &filter, order, page)?;
    Ok(Json(response))
}

pub async fn get_thought(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Thought>, ApiError> {
    let conn = lock_db(&state)?;
    store::get_thought(&conn, &id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("thought not found: {id}")))
}

pub async fn update_thought(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<ThoughtUpdate>,
) -> Result<Json<Thought>, ApiError> {
    if update.is_empty() {
        return Err(ApiError::BadRequest("no fields to update".into()));
    }
    if let Some(ref content) = update.content {
        validate_content(content)?;
    }
    validate_importance(update.importance)?;

    let mut conn = lock_db(&state)?;
    store::update_thought(&mut conn, &state.lexicon, &state.config.analysis, &id, &update)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("thought not found: {id}")))
}

pub async fn delete_thought(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut conn = lock_db(&state)?;
    if store::delete_thought(&mut conn, &id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("thought not found: {id}")))
    }
}

/// Fresh on-demand analysis of a stored thought, compared against the
/// current history window (excluding the thought itself).
pub async fn thought_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Annotation>, ApiError> {
    let conn = lock_db(&state)?;
    let thought = store::get_thought(&conn, &id)?
        .ok_or_else(|| ApiError::NotFound(format!("thought not found: {id}")))?;

    let history = store::recent_fingerprints(
        &conn,
        &state.lexicon,
        state.config.analysis.history_window,
        Some(&id),
    )?;
    let input = ThoughtInput::new(&thought.content, thought.category);
    let annotation = analysis::analyze(&state.lexicon, &input, &history)
        .map_err(|e| ApiError::Internal(e.into()))?;
    Ok(Json(annotation))
}

// ── Stats ─────────────────────────────────────────────────────────────────────

pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let conn = lock_db(&state)?;
    let db_path = state.config.resolved_db_path();
    let response = crate::thought::stats::thought_stats(&conn, Some(&db_path))?;
    Ok(Json(response))
}

// ── Chat ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Optional prior turns the client wants replayed as context.
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub provider: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_thought_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_thought_id: Option<String>,
}

/// One chat turn: generate a reply, then log both sides as thoughts
/// (unless turn logging is disabled in config).
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    validate_content(&request.message)?;

    // Generate before taking the database lock — the provider call may be
    // slow and must not hold up other requests.
    let reply = state
        .provider
        .generate(&request.message, &request.history)
        .await?;

    let (user_thought_id, reply_thought_id) = if state.config.chat.log_turns {
        let mut conn = lock_db(&state)?;
        let tags = vec!["chat".to_string(), state.provider.name().to_string()];
        let user = store::create_thought(
            &mut conn,
            &state.lexicon,
            &state.config.analysis,
            &NewThought {
                category: Category::UserInput,
                content: request.message.clone(),
                tags: tags.clone(),
                ..Default::default()
            },
        )?;
        let assistant = store::create_thought(
            &mut conn,
            &state.lexicon,
            &state.config.analysis,
            &NewThought {
                category: Category::AiResponse,
                content: reply.clone(),
                tags,
                ..Default::default()
            },
        )?;
        (Some(user.id), Some(assistant.id))
    } else {
        (None, None)
    };

    Ok(Json(ChatResponse {
        reply,
        provider: state.provider.name(),
        user_thought_id,
        reply_thought_id,
    }))
}
