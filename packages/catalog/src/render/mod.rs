//! The boundary between handlers and presentation.
//!
//! Handlers build a [`View`] (a view name plus its data bag) and hand it to
//! whichever [`Renderer`] the application was configured with.

pub mod html;

use std::sync::Arc;

use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::config::ViewFormat;
use crate::error::AppError;
use crate::models::author::*;
use crate::models::book::*;
use crate::models::book_instance::*;
use crate::models::catalog::IndexPage;
use crate::models::genre::*;

/// Every page the catalog can show. The serde tag is the view name.
#[derive(Debug, Serialize)]
#[serde(tag = "view", content = "data", rename_all = "snake_case")]
pub enum View {
    Index(IndexPage),

    AuthorList(AuthorListPage),
    AuthorDetail(AuthorDetailPage),
    AuthorForm(AuthorFormPage),
    AuthorDelete(AuthorDeletePage),

    GenreList(GenreListPage),
    GenreDetail(GenreDetailPage),
    GenreForm(GenreFormPage),
    GenreDelete(GenreDeletePage),

    BookList(BookListPage),
    BookDetail(BookDetailPage),
    BookForm(BookFormPage),
    BookDelete(BookDeletePage),

    #[serde(rename = "bookinstance_list")]
    BookInstanceList(BookInstanceListPage),
    #[serde(rename = "bookinstance_detail")]
    BookInstanceDetail(BookInstanceDetailPage),
    #[serde(rename = "bookinstance_form")]
    BookInstanceForm(BookInstanceFormPage),
    #[serde(rename = "bookinstance_delete")]
    BookInstanceDelete(BookInstanceDeletePage),
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Index(_) => "index",
            View::AuthorList(_) => "author_list",
            View::AuthorDetail(_) => "author_detail",
            View::AuthorForm(_) => "author_form",
            View::AuthorDelete(_) => "author_delete",
            View::GenreList(_) => "genre_list",
            View::GenreDetail(_) => "genre_detail",
            View::GenreForm(_) => "genre_form",
            View::GenreDelete(_) => "genre_delete",
            View::BookList(_) => "book_list",
            View::BookDetail(_) => "book_detail",
            View::BookForm(_) => "book_form",
            View::BookDelete(_) => "book_delete",
            View::BookInstanceList(_) => "bookinstance_list",
            View::BookInstanceDetail(_) => "bookinstance_detail",
            View::BookInstanceForm(_) => "bookinstance_form",
            View::BookInstanceDelete(_) => "bookinstance_delete",
        }
    }
}

/// A rendered page ready to be sent.
pub struct Rendered {
    pub content_type: &'static str,
    pub body: String,
}

impl IntoResponse for Rendered {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

pub trait Renderer: Send + Sync {
    fn render(&self, view: &View) -> Result<Rendered, AppError>;
}

/// Serializes the view name and data bag as JSON.
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, view: &View) -> Result<Rendered, AppError> {
        let body = serde_json::to_string(view).map_err(|e| AppError::Render(e.to_string()))?;
        Ok(Rendered {
            content_type: "application/json",
            body,
        })
    }
}

pub fn renderer_for(format: ViewFormat) -> Arc<dyn Renderer> {
    match format {
        ViewFormat::Html => Arc::new(html::HtmlRenderer),
        ViewFormat::Json => Arc::new(JsonRenderer),
    }
}
