use serde::Serialize;

use crate::entity::genre;
use crate::models::book::BookSummary;
use crate::validation::{FieldError, FieldRules, Rule};

pub const GENRE_FORM: &[FieldRules] = &[FieldRules::required(
    "name",
    &[
        Rule::Trim,
        Rule::MinLength(1, "Genre name required"),
        Rule::Escape,
    ],
)];

#[derive(Debug, Clone, Serialize)]
pub struct GenreView {
    pub id: i32,
    pub name: String,
    pub url: String,
}

impl From<genre::Model> for GenreView {
    fn from(m: genre::Model) -> Self {
        Self {
            id: m.id,
            url: m.url(),
            name: m.name,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GenreFormValues {
    pub id: Option<i32>,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct GenreListPage {
    pub title: String,
    pub genre_list: Vec<GenreView>,
}

#[derive(Debug, Serialize)]
pub struct GenreDetailPage {
    pub title: String,
    pub genre: GenreView,
    pub genre_books: Vec<BookSummary>,
}

#[derive(Debug, Serialize)]
pub struct GenreFormPage {
    pub title: String,
    pub genre: Option<GenreFormValues>,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
pub struct GenreDeletePage {
    pub title: String,
    pub genre: GenreView,
    pub genre_books: Vec<BookSummary>,
}
