use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use word_index::{Index, LineNumber};

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<Index>,
    pub disable_cache: bool,
}

#[derive(Deserialize)]
pub struct LookupQuery {
    #[serde(default)]
    pub word: String,
}

#[derive(Deserialize)]
pub struct StatsQuery {
    pub letter: Option<String>,
}

#[derive(Serialize)]
pub struct LookupResponse {
    word: String,
    count: usize,
    lines: Vec<LineNumber>,
    lines_text: String,
}

#[derive(Serialize)]
pub struct StatsResponse {
    total_words: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    letter: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    starting_with: Option<usize>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(frontend))
        .route("/healthz", get(healthz))
        .route("/v1/lookup", get(lookup))
        .route("/v1/stats", get(stats))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    "ok"
}

async fn frontend(State(state): State<AppState>) -> Response {
    let html = Html(index_html());
    if state.disable_cache {
        return html.into_response();
    }
    (
        [(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=3600, immutable"),
        )],
        html,
    )
        .into_response()
}

async fn lookup(
    State(state): State<AppState>,
    Query(params): Query<LookupQuery>,
) -> Result<Response, ApiError> {
    let word = params.word.to_lowercase();
    if word.trim().is_empty() {
        return Err(ApiError::NotFound("word not found".into()));
    }

    let start = Instant::now();
    let record = state.index.query().lookup(&word);
    debug!("lookup '{word}' took {} µs", start.elapsed().as_micros());

    let record = record.ok_or_else(|| ApiError::NotFound("word not found".into()))?;
    let response = LookupResponse {
        count: record.count(),
        lines: record.lines().to_vec(),
        lines_text: format_lines(record.lines()),
        word,
    };
    Ok(json_response(&state, response))
}

async fn stats(
    State(state): State<AppState>,
    Query(params): Query<StatsQuery>,
) -> Response {
    let query = state.index.query();

    let start = Instant::now();
    let total_words = query.total_occurrence_count();
    debug!("total count took {} µs", start.elapsed().as_micros());

    let letter = params
        .letter
        .as_deref()
        .and_then(|raw| raw.to_lowercase().chars().next());
    let starting_with = letter.map(|letter| {
        let start = Instant::now();
        let count = query.count_starting_with(letter);
        debug!("count for '{letter}' took {} µs", start.elapsed().as_micros());
        count
    });

    let response = StatsResponse {
        total_words,
        letter,
        starting_with,
    };
    json_response(&state, response)
}

/// Comma-joined line list, or `None` for an empty record.
pub fn format_lines(lines: &[LineNumber]) -> String {
    if lines.is_empty() {
        return "None".to_string();
    }
    lines
        .iter()
        .map(LineNumber::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn json_response<T: Serialize>(state: &AppState, body: T) -> Response {
    if state.disable_cache {
        Json(body).into_response()
    } else {
        (
            [(
                header::CACHE_CONTROL,
                HeaderValue::from_static("public, max-age=300"),
            )],
            Json(body),
        )
            .into_response()
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) => {
                let body = Json(ErrorResponse { error: msg });
                (StatusCode::NOT_FOUND, body).into_response()
            }
        }
    }
}

const BASE_HTML: &str = include_str!("../templates/base.html");
const STYLE_HTML: &str = include_str!("../templates/style.html");
const INDEX_BODY_HTML: &str = include_str!("../templates/index_body.html");
const INDEX_SCRIPT: &str = include_str!("../templates/index_script.js");

fn render_page(title: &str, body: &str, script: &str) -> String {
    BASE_HTML
        .replace("{{title}}", title)
        .replace("{{style}}", STYLE_HTML)
        .replace("{{body}}", body)
        .replace("{{scripts}}", &format!(r#"<script>{}</script>"#, script))
}

fn index_html() -> String {
    render_page("Text Indexer", INDEX_BODY_HTML, INDEX_SCRIPT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_lines_like_the_menu_did() {
        assert_eq!(format_lines(&[]), "None");
        assert_eq!(format_lines(&[3]), "3");
        assert_eq!(format_lines(&[3, 1, 3, 7]), "3, 1, 3, 7");
    }

    #[test]
    fn page_has_both_forms() {
        let html = index_html();
        assert!(html.contains("<title>Text Indexer</title>"));
        assert!(html.contains("id=\"search-form\""));
        assert!(html.contains("id=\"stats-form\""));
        assert!(!html.contains("{{"));
    }
}
