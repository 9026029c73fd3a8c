use chrono::NaiveDate;
use serde::Serialize;

use crate::entity::copy_status::CopyStatus;
use crate::entity::{book, book_instance};
use crate::models::book::BookSummary;
use crate::validation::{FieldError, FieldRules, Rule, Validated};

pub const STATUS_VALUES: &[&str] = &["Maintenance", "Available", "Loaned", "Reserved"];

pub const BOOK_INSTANCE_FORM: &[FieldRules] = &[
    FieldRules::required(
        "book",
        &[
            Rule::Trim,
            Rule::MinLength(1, "Book must be specified"),
            Rule::Escape,
            Rule::Numeric("Invalid book."),
        ],
    ),
    FieldRules::required(
        "imprint",
        &[
            Rule::Trim,
            Rule::MinLength(1, "Imprint must be specified"),
            Rule::Escape,
        ],
    ),
    FieldRules::required(
        "status",
        &[Rule::Escape, Rule::OneOf(STATUS_VALUES, "Invalid status")],
    ),
    FieldRules::optional("due_back", &[Rule::IsoDate("Invalid date")]),
];

pub struct BookInstanceInput {
    pub book_id: i32,
    pub imprint: String,
    pub status: CopyStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstanceInput {
    /// `None` unless the submission passed [`BOOK_INSTANCE_FORM`].
    pub fn from_validated(v: &Validated) -> Option<Self> {
        if !v.is_valid() {
            return None;
        }
        Some(Self {
            book_id: v.id("book")?,
            imprint: v.value("imprint").to_string(),
            status: v.value("status").parse().ok()?,
            due_back: v.date("due_back"),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookInstanceView {
    pub id: i32,
    pub imprint: String,
    pub status: CopyStatus,
    pub url: String,
    pub due_back_formatted: String,
    pub book: Option<BookSummary>,
}

impl BookInstanceView {
    pub fn new(m: book_instance::Model, book: Option<book::Model>) -> Self {
        Self {
            id: m.id,
            url: m.url(),
            due_back_formatted: m.due_back_formatted(),
            imprint: m.imprint,
            status: m.status,
            book: book.map(BookSummary::from),
        }
    }
}

impl From<book_instance::Model> for BookInstanceView {
    fn from(m: book_instance::Model) -> Self {
        Self::new(m, None)
    }
}

/// Values shown in the copy form's inputs.
#[derive(Debug, Clone, Serialize)]
pub struct BookInstanceFormValues {
    pub id: Option<i32>,
    pub book: String,
    pub imprint: String,
    pub status: String,
    pub due_back: String,
}

impl Default for BookInstanceFormValues {
    fn default() -> Self {
        Self {
            id: None,
            book: String::new(),
            imprint: String::new(),
            status: CopyStatus::default().to_string(),
            due_back: String::new(),
        }
    }
}

impl From<&book_instance::Model> for BookInstanceFormValues {
    fn from(m: &book_instance::Model) -> Self {
        Self {
            id: Some(m.id),
            book: m.book_id.to_string(),
            imprint: m.imprint.clone(),
            status: m.status.to_string(),
            due_back: m.due_back_for_form(),
        }
    }
}

impl BookInstanceFormValues {
    pub fn from_submission(id: Option<i32>, v: &Validated) -> Self {
        Self {
            id,
            book: v.value("book").to_string(),
            imprint: v.value("imprint").to_string(),
            status: v.value("status").to_string(),
            due_back: v.value("due_back").to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookInstanceListPage {
    pub title: String,
    pub bookinstance_list: Vec<BookInstanceView>,
}

#[derive(Debug, Serialize)]
pub struct BookInstanceDetailPage {
    pub title: String,
    pub bookinstance: BookInstanceView,
}

#[derive(Debug, Serialize)]
pub struct BookInstanceFormPage {
    pub title: String,
    pub book_list: Vec<BookSummary>,
    pub statuses: &'static [&'static str],
    pub bookinstance: BookInstanceFormValues,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
pub struct BookInstanceDeletePage {
    pub title: String,
    pub bookinstance: BookInstanceView,
}
