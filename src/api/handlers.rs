use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{MovieRecord, RecommendationResult},
};

use super::page::{render_page, PageOutcome};
use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Display title picked in the selector
    pub movie: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
    pub n: Option<usize>,
}

// Handlers

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "healthy", "movies": state.catalog.len() })),
    )
}

/// Recommender page; runs a recommendation when `?movie=` is present
pub async fn index(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Response {
    let titles = || state.catalog.titles();

    let Some(selected) = query.movie else {
        return Html(render_page(titles(), None, PageOutcome::Empty)).into_response();
    };

    match state
        .recommender
        .recommend(&selected, state.recommendation_count)
        .await
    {
        Ok(results) => Html(render_page(
            titles(),
            Some(&selected),
            PageOutcome::Results(&results),
        ))
        .into_response(),
        Err(e) => {
            tracing::info!(title = %selected, error = %e, "Recommendation page error");
            let message = e.to_string();
            (
                e.status_code(),
                Html(render_page(
                    titles(),
                    Some(&selected),
                    PageOutcome::Message(&message),
                )),
            )
                .into_response()
        }
    }
}

/// All movies in catalog order
pub async fn list_movies(State(state): State<AppState>) -> Json<Vec<MovieRecord>> {
    Json(state.catalog.movies().to_vec())
}

/// Top-N recommendations for a title as JSON
pub async fn recommendations(
    State(state): State<AppState>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> AppResult<Json<Vec<RecommendationResult>>> {
    let Query(query) = query.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    if query.title.trim().is_empty() {
        return Err(AppError::InvalidInput("title cannot be empty".to_string()));
    }

    let n = query.n.unwrap_or(state.recommendation_count);
    if n > state.max_recommendation_count {
        return Err(AppError::InvalidInput(format!(
            "n must be at most {}",
            state.max_recommendation_count
        )));
    }
    let results = state.recommender.recommend(&query.title, n).await?;
    Ok(Json(results))
}
