use axum::{
    Form,
    extract::{FromRequest, Request},
};

use crate::error::AppError;
use crate::validation::FormData;

/// A urlencoded body kept as ordered name/value pairs, so repeated fields
/// such as `genre` survive. Rejections become `AppError::BadRequest`.
pub struct AppForm(pub FormData);

impl<S> FromRequest<S> for AppForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(AppForm(FormData::new(pairs)))
    }
}
