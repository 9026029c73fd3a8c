use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use sea_orm::DbErr;

use crate::render::html;

/// Application-level error type.
///
/// Validation failures are not errors here: they re-render the form with a
/// 200 response. Everything in this enum ends the request at the generic
/// error page.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    /// The request body could not be read as a form.
    #[error("{0}")]
    BadRequest(String),
    #[error("store error: {0}")]
    Store(#[from] DbErr),
    #[error("render error: {0}")]
    Render(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) | AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) => msg.clone(),
            AppError::Store(_) | AppError::Render(_) => "An unexpected error occurred".into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::NotFound(msg) => tracing::debug!("Not found: {}", msg),
            AppError::BadRequest(msg) => tracing::warn!("Bad request: {}", msg),
            AppError::Store(err) => tracing::error!("Store error: {}", err),
            AppError::Render(detail) => tracing::error!("Render error: {}", detail),
        }

        let page = html::error_page(status, &self.public_message());
        (status, Html(page.into_string())).into_response()
    }
}
