use chrono::NaiveDate;
use serde::Serialize;

use crate::entity::author;
use crate::models::book::BookSummary;
use crate::validation::{FieldError, FieldRules, Rule, Validated};

pub const AUTHOR_FORM: &[FieldRules] = &[
    FieldRules::required(
        "first_name",
        &[
            Rule::Trim,
            Rule::MinLength(1, "First name must be specified."),
            Rule::MaxLength(100, "First name must be at most 100 characters."),
            Rule::Escape,
            Rule::Alphanumeric("First name has non-alphanumeric characters."),
        ],
    ),
    FieldRules::required(
        "family_name",
        &[
            Rule::Trim,
            Rule::MinLength(1, "Family name must be specified."),
            Rule::MaxLength(100, "Family name must be at most 100 characters."),
            Rule::Escape,
            Rule::Alphanumeric("Family name has non-alphanumeric characters."),
        ],
    ),
    FieldRules::optional("date_of_birth", &[Rule::IsoDate("Invalid date of birth")]),
    FieldRules::optional("date_of_death", &[Rule::IsoDate("Invalid date of death")]),
];

/// Sanitized fields of a valid author submission.
pub struct AuthorInput {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl From<&Validated> for AuthorInput {
    fn from(v: &Validated) -> Self {
        Self {
            first_name: v.value("first_name").to_string(),
            family_name: v.value("family_name").to_string(),
            date_of_birth: v.date("date_of_birth"),
            date_of_death: v.date("date_of_death"),
        }
    }
}

/// An author with its computed display fields.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorView {
    pub id: i32,
    pub first_name: String,
    pub family_name: String,
    pub name: String,
    pub url: String,
    pub lifespan: String,
    pub date_of_birth_formatted: String,
    pub date_of_death_formatted: String,
}

impl From<author::Model> for AuthorView {
    fn from(m: author::Model) -> Self {
        Self {
            id: m.id,
            name: m.name(),
            url: m.url(),
            lifespan: m.lifespan(),
            date_of_birth_formatted: m.date_of_birth_formatted(),
            date_of_death_formatted: m.date_of_death_formatted(),
            first_name: m.first_name,
            family_name: m.family_name,
        }
    }
}

/// Values shown in the author form's inputs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthorFormValues {
    pub id: Option<i32>,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: String,
    pub date_of_death: String,
}

impl From<&author::Model> for AuthorFormValues {
    fn from(m: &author::Model) -> Self {
        Self {
            id: Some(m.id),
            first_name: m.first_name.clone(),
            family_name: m.family_name.clone(),
            date_of_birth: m.date_of_birth_for_form(),
            date_of_death: m.date_of_death_for_form(),
        }
    }
}

impl AuthorFormValues {
    pub fn from_submission(id: Option<i32>, v: &Validated) -> Self {
        Self {
            id,
            first_name: v.value("first_name").to_string(),
            family_name: v.value("family_name").to_string(),
            date_of_birth: v.value("date_of_birth").to_string(),
            date_of_death: v.value("date_of_death").to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthorListPage {
    pub title: String,
    pub author_list: Vec<AuthorView>,
}

#[derive(Debug, Serialize)]
pub struct AuthorDetailPage {
    pub title: String,
    pub author: AuthorView,
    pub author_books: Vec<BookSummary>,
}

#[derive(Debug, Serialize)]
pub struct AuthorFormPage {
    pub title: String,
    pub author: Option<AuthorFormValues>,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
pub struct AuthorDeletePage {
    pub title: String,
    pub author: AuthorView,
    pub author_books: Vec<BookSummary>,
}
