use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use sea_orm::*;
use tracing::{info, instrument};

use super::render;
use crate::entity::genre;
use crate::error::AppError;
use crate::extractors::form::AppForm;
use crate::extractors::path::AppPath;
use crate::models::book::BookSummary;
use crate::models::genre::*;
use crate::queries::{self, GenreWithBooks};
use crate::render::View;
use crate::state::AppState;
use crate::validation::{Validated, validate};

const LIST_URL: &str = "/catalog/genres";

#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let genres = genre::Entity::find()
        .order_by_asc(genre::Column::Name)
        .all(&state.db)
        .await?;

    render(
        &state,
        View::GenreList(GenreListPage {
            title: "Genre List".into(),
            genre_list: genres.into_iter().map(GenreView::from).collect(),
        }),
    )
}

#[instrument(skip(state), fields(id))]
pub async fn detail(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Response, AppError> {
    let GenreWithBooks { genre, books } = queries::genre_with_books(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Genre not found".into()))?;

    render(
        &state,
        View::GenreDetail(GenreDetailPage {
            title: "Genre Detail".into(),
            genre: genre.into(),
            genre_books: books.into_iter().map(BookSummary::from).collect(),
        }),
    )
}

#[instrument(skip(state))]
pub async fn create_get(State(state): State<AppState>) -> Result<Response, AppError> {
    render(
        &state,
        View::GenreForm(GenreFormPage {
            title: "Create Genre".into(),
            genre: None,
            errors: vec![],
        }),
    )
}

#[instrument(skip(state, form))]
pub async fn create_post(
    State(state): State<AppState>,
    AppForm(form): AppForm,
) -> Result<Response, AppError> {
    let validated = validate(&form, GENRE_FORM);
    if !validated.is_valid() {
        return render(&state, form_view("Create Genre", None, validated));
    }

    let name = validated.value("name");

    // Not atomic: two concurrent submissions of a new name can both insert.
    if let Some(existing) = genre::Entity::find()
        .filter(genre::Column::Name.eq(name))
        .one(&state.db)
        .await?
    {
        info!(id = existing.id, "Genre already exists, redirecting");
        return Ok(Redirect::to(&existing.url()).into_response());
    }

    let model = genre::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(id = model.id, "Created genre");
    Ok(Redirect::to(&model.url()).into_response())
}

#[instrument(skip(state), fields(id))]
pub async fn update_get(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Response, AppError> {
    let genre = find_genre(&state.db, id).await?;

    render(
        &state,
        View::GenreForm(GenreFormPage {
            title: "Update Genre".into(),
            genre: Some(GenreFormValues {
                id: Some(genre.id),
                name: genre.name,
            }),
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
    let validated = validate(&form, GENRE_FORM);
    if !validated.is_valid() {
        return render(&state, form_view("Update Genre", Some(id), validated));
    }

    let mut active: genre::ActiveModel = find_genre(&state.db, id).await?.into();
    active.name = Set(validated.value("name").to_string());
    let model = active.update(&state.db).await?;

    Ok(Redirect::to(&model.url()).into_response())
}

#[instrument(skip(state), fields(id))]
pub async fn delete_get(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Response, AppError> {
    let Some(found) = queries::genre_with_books(&state.db, id).await? else {
        return Ok(Redirect::to(LIST_URL).into_response());
    };

    render(&state, delete_view(found))
}

#[instrument(skip(state), fields(id))]
pub async fn delete_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Response, AppError> {
    let Some(found) = queries::genre_with_books(&state.db, id).await? else {
        return Ok(Redirect::to(LIST_URL).into_response());
    };

    if !found.books.is_empty() {
        info!(books = found.books.len(), "Refused to delete genre with books");
        return render(&state, delete_view(found));
    }

    genre::Entity::delete_by_id(id).exec(&state.db).await?;
    info!("Deleted genre");
    Ok(Redirect::to(LIST_URL).into_response())
}

fn form_view(title: &str, id: Option<i32>, validated: Validated) -> View {
    View::GenreForm(GenreFormPage {
        title: title.into(),
        genre: Some(GenreFormValues {
            id,
            name: validated.value("name").to_string(),
        }),
        errors: validated.into_errors(),
    })
}

fn delete_view(found: GenreWithBooks) -> View {
    View::GenreDelete(GenreDeletePage {
        title: "Delete Genre".into(),
        genre: found.genre.into(),
        genre_books: found.books.into_iter().map(BookSummary::from).collect(),
    })
}

async fn find_genre<C: ConnectionTrait>(db: &C, id: i32) -> Result<genre::Model, AppError> {
    genre::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Genre not found".into()))
}
