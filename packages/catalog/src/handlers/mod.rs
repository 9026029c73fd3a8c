pub mod author;
pub mod book;
pub mod book_instance;
pub mod catalog;
pub mod genre;

use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::render::View;
use crate::state::AppState;

/// Render `view` with the configured renderer.
pub(crate) fn render(state: &AppState, view: View) -> Result<Response, AppError> {
    tracing::debug!(view = view.name(), "rendering");
    Ok(state.renderer.render(&view)?.into_response())
}

pub async fn not_found() -> AppError {
    AppError::NotFound("Page not found".into())
}
