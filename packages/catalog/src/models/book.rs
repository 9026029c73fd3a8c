use std::collections::BTreeSet;

use serde::Serialize;

use crate::entity::{author, book, genre};
use crate::models::author::AuthorView;
use crate::models::book_instance::BookInstanceView;
use crate::models::genre::GenreView;
use crate::validation::{FieldError, FieldRules, Rule, Validated};

pub const BOOK_FORM: &[FieldRules] = &[
    FieldRules::required(
        "title",
        &[
            Rule::Trim,
            Rule::MinLength(1, "Title must not be empty."),
            Rule::Escape,
        ],
    ),
    FieldRules::required(
        "author",
        &[
            Rule::Trim,
            Rule::MinLength(1, "Author must not be empty."),
            Rule::Escape,
            Rule::Numeric("Invalid author."),
        ],
    ),
    FieldRules::required(
        "summary",
        &[
            Rule::Trim,
            Rule::MinLength(1, "Summary must not be empty."),
            Rule::Escape,
        ],
    ),
    FieldRules::required(
        "isbn",
        &[
            Rule::Trim,
            Rule::MinLength(1, "ISBN must not be empty."),
            Rule::Escape,
        ],
    ),
    FieldRules::each("genre", &[Rule::Escape, Rule::Numeric("Invalid genre.")]),
];

pub struct BookInput {
    pub title: String,
    pub author_id: i32,
    pub summary: String,
    pub isbn: String,
    /// Deduplicated, so each link row is inserted once.
    pub genre_ids: BTreeSet<i32>,
}

impl BookInput {
    /// `None` unless the submission passed [`BOOK_FORM`].
    pub fn from_validated(v: &Validated) -> Option<Self> {
        if !v.is_valid() {
            return None;
        }
        Some(Self {
            title: v.value("title").to_string(),
            author_id: v.id("author")?,
            summary: v.value("summary").to_string(),
            isbn: v.value("isbn").to_string(),
            genre_ids: v.ids("genre").into_iter().collect(),
        })
    }
}

/// Just enough of a book to link to it.
#[derive(Debug, Clone, Serialize)]
pub struct BookSummary {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub url: String,
}

impl From<book::Model> for BookSummary {
    fn from(m: book::Model) -> Self {
        Self {
            id: m.id,
            url: m.url(),
            title: m.title,
            summary: m.summary,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookListItem {
    pub id: i32,
    pub title: String,
    pub url: String,
    pub author: Option<AuthorView>,
}

impl From<(book::Model, Option<author::Model>)> for BookListItem {
    fn from((m, author): (book::Model, Option<author::Model>)) -> Self {
        Self {
            id: m.id,
            url: m.url(),
            title: m.title,
            author: author.map(AuthorView::from),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookView {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub url: String,
    pub author: Option<AuthorView>,
    pub genres: Vec<GenreView>,
}

impl BookView {
    pub fn new(m: book::Model, author: Option<author::Model>, genres: Vec<genre::Model>) -> Self {
        Self {
            id: m.id,
            url: m.url(),
            title: m.title,
            summary: m.summary,
            isbn: m.isbn,
            author: author.map(AuthorView::from),
            genres: genres.into_iter().map(GenreView::from).collect(),
        }
    }
}

/// Values shown in the book form's inputs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BookFormValues {
    pub id: Option<i32>,
    pub title: String,
    /// Selected author id, as submitted.
    pub author: String,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<String>,
}

impl BookFormValues {
    pub fn from_model(m: &book::Model, genres: &[genre::Model]) -> Self {
        Self {
            id: Some(m.id),
            title: m.title.clone(),
            author: m.author_id.to_string(),
            summary: m.summary.clone(),
            isbn: m.isbn.clone(),
            genre: genres.iter().map(|g| g.id.to_string()).collect(),
        }
    }

    pub fn from_submission(id: Option<i32>, v: &Validated) -> Self {
        Self {
            id,
            title: v.value("title").to_string(),
            author: v.value("author").to_string(),
            summary: v.value("summary").to_string(),
            isbn: v.value("isbn").to_string(),
            genre: v.values("genre").to_vec(),
        }
    }
}

/// A genre checkbox in the book form.
#[derive(Debug, Clone, Serialize)]
pub struct GenreOption {
    pub id: i32,
    pub name: String,
    pub checked: bool,
}

/// Mark the genres listed in `selected` as checked.
pub fn genre_options(genres: Vec<genre::Model>, selected: &[String]) -> Vec<GenreOption> {
    genres
        .into_iter()
        .map(|g| GenreOption {
            checked: selected.iter().any(|s| *s == g.id.to_string()),
            id: g.id,
            name: g.name,
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct BookListPage {
    pub title: String,
    pub book_list: Vec<BookListItem>,
}

#[derive(Debug, Serialize)]
pub struct BookDetailPage {
    pub title: String,
    pub book: BookView,
    pub book_instances: Vec<BookInstanceView>,
}

#[derive(Debug, Serialize)]
pub struct BookFormPage {
    pub title: String,
    pub book: Option<BookFormValues>,
    pub authors: Vec<AuthorView>,
    pub genres: Vec<GenreOption>,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
pub struct BookDeletePage {
    pub title: String,
    pub book: BookView,
    pub book_instances: Vec<BookInstanceView>,
}
