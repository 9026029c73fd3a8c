use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use tracing::instrument;

use super::render;
use crate::error::AppError;
use crate::models::catalog::IndexPage;
use crate::queries;
use crate::render::View;
use crate::state::AppState;

pub async fn home() -> impl IntoResponse {
    Redirect::to("/catalog")
}

#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Response, AppError> {
    let counts = queries::catalog_counts(&state.db).await?;

    render(
        &state,
        View::Index(IndexPage {
            title: "Local Library Home".into(),
            book_count: counts.books,
            book_instance_count: counts.book_instances,
            book_instance_available_count: counts.available_instances,
            author_count: counts.authors,
            genre_count: counts.genres,
        }),
    )
}
