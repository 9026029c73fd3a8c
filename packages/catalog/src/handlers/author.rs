use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use sea_orm::*;
use tracing::{info, instrument};

use super::render;
use crate::entity::author;
use crate::error::AppError;
use crate::extractors::form::AppForm;
use crate::extractors::path::AppPath;
use crate::models::author::*;
use crate::models::book::BookSummary;
use crate::queries::{self, AuthorWithBooks};
use crate::render::View;
use crate::state::AppState;
use crate::validation::validate;

const LIST_URL: &str = "/catalog/authors";

#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let authors = author::Entity::find()
        .order_by_asc(author::Column::FamilyName)
        .all(&state.db)
        .await?;

    render(
        &state,
        View::AuthorList(AuthorListPage {
            title: "Author List".into(),
            author_list: authors.into_iter().map(AuthorView::from).collect(),
        }),
    )
}

#[instrument(skip(state), fields(id))]
pub async fn detail(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Response, AppError> {
    let AuthorWithBooks { author, books } = queries::author_with_books(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Author not found".into()))?;

    render(
        &state,
        View::AuthorDetail(AuthorDetailPage {
            title: "Author Detail".into(),
            author: author.into(),
            author_books: books.into_iter().map(BookSummary::from).collect(),
        }),
    )
}

#[instrument(skip(state))]
pub async fn create_get(State(state): State<AppState>) -> Result<Response, AppError> {
    render(
        &state,
        View::AuthorForm(AuthorFormPage {
            title: "Create Author".into(),
            author: None,
            errors: vec![],
        }),
    )
}

#[instrument(skip(state, form))]
pub async fn create_post(
    State(state): State<AppState>,
    AppForm(form): AppForm,
) -> Result<Response, AppError> {
    let validated = validate(&form, AUTHOR_FORM);
    if !validated.is_valid() {
        let author = AuthorFormValues::from_submission(None, &validated);
        return render(
            &state,
            View::AuthorForm(AuthorFormPage {
                title: "Create Author".into(),
                author: Some(author),
                errors: validated.into_errors(),
            }),
        );
    }

    let input = AuthorInput::from(&validated);
    let model = author::ActiveModel {
        first_name: Set(input.first_name),
        family_name: Set(input.family_name),
        date_of_birth: Set(input.date_of_birth),
        date_of_death: Set(input.date_of_death),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(id = model.id, "Created author");
    Ok(Redirect::to(&model.url()).into_response())
}

#[instrument(skip(state), fields(id))]
pub async fn update_get(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Response, AppError> {
    let author = find_author(&state.db, id).await?;

    render(
        &state,
        View::AuthorForm(AuthorFormPage {
            title: "Update Author".into(),
            author: Some(AuthorFormValues::from(&author)),
            errors: vec![],
        }),
    )
}

#[instrument(skip(state, form), fields(id))]
pub async fn update_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppForm(form): AppForm,
) -> Result<Response, AppError> {
    let validated = validate(&form, AUTHOR_FORM);
    if !validated.is_valid() {
        let author = AuthorFormValues::from_submission(Some(id), &validated);
        return render(
            &state,
            View::AuthorForm(AuthorFormPage {
                title: "Update Author".into(),
                author: Some(author),
                errors: validated.into_errors(),
            }),
        );
    }

    let input = AuthorInput::from(&validated);
    let mut active: author::ActiveModel = find_author(&state.db, id).await?.into();
    active.first_name = Set(input.first_name);
    active.family_name = Set(input.family_name);
    active.date_of_birth = Set(input.date_of_birth);
    active.date_of_death = Set(input.date_of_death);
    let model = active.update(&state.db).await?;

    Ok(Redirect::to(&model.url()).into_response())
}

#[instrument(skip(state), fields(id))]
pub async fn delete_get(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Response, AppError> {
    let Some(found) = queries::author_with_books(&state.db, id).await? else {
        return Ok(Redirect::to(LIST_URL).into_response());
    };

    render(&state, delete_view(found))
}

#[instrument(skip(state), fields(id))]
pub async fn delete_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Response, AppError> {
    let Some(found) = queries::author_with_books(&state.db, id).await? else {
        return Ok(Redirect::to(LIST_URL).into_response());
    };

    if !found.books.is_empty() {
        info!(books = found.books.len(), "Refused to delete author with books");
        return render(&state, delete_view(found));
    }

    author::Entity::delete_by_id(id).exec(&state.db).await?;
    info!("Deleted author");
    Ok(Redirect::to(LIST_URL).into_response())
}

fn delete_view(found: AuthorWithBooks) -> View {
    View::AuthorDelete(AuthorDeletePage {
        title: "Delete Author".into(),
        author: found.author.into(),
        author_books: found.books.into_iter().map(BookSummary::from).collect(),
    })
}

async fn find_author<C: ConnectionTrait>(db: &C, id: i32) -> Result<author::Model, AppError> {
    author::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Author not found".into()))
}
