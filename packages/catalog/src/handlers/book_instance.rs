use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use sea_orm::*;
use tracing::{info, instrument};

use super::render;
use crate::entity::{book, book_instance};
use crate::error::AppError;
use crate::extractors::form::AppForm;
use crate::extractors::path::AppPath;
use crate::models::book::BookSummary;
use crate::models::book_instance::*;
use crate::queries;
use crate::render::View;
use crate::state::AppState;
use crate::validation::{FieldError, Validated, validate};

const LIST_URL: &str = "/catalog/bookinstances";

#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let copies = book_instance::Entity::find()
        .find_also_related(book::Entity)
        .order_by_asc(book::Column::Title)
        .order_by_asc(book_instance::Column::Id)
        .all(&state.db)
        .await?;

    render(
        &state,
        View::BookInstanceList(BookInstanceListPage {
            title: "Book Instance List".into(),
            bookinstance_list: copies
                .into_iter()
                .map(|(copy, book)| BookInstanceView::new(copy, book))
                .collect(),
        }),
    )
}

#[instrument(skip(state), fields(id))]
pub async fn detail(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Response, AppError> {
    let (copy, book) = queries::instance_with_book(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Book copy not found".into()))?;

    let bookinstance = BookInstanceView::new(copy, book);
    let title = match &bookinstance.book {
        Some(book) => format!("Copy: {}", book.title),
        None => "Copy".to_string(),
    };
    render(
        &state,
        View::BookInstanceDetail(BookInstanceDetailPage {
            title,
            bookinstance,
        }),
    )
}

#[instrument(skip(state))]
pub async fn create_get(State(state): State<AppState>) -> Result<Response, AppError> {
    let books = queries::books_for_selector(&state.db).await?;
    render(
        &state,
        form_view(
            "Create BookInstance",
            books,
            BookInstanceFormValues::default(),
            vec![],
        ),
    )
}

#[instrument(skip(state, form))]
pub async fn create_post(
    State(state): State<AppState>,
    AppForm(form): AppForm,
) -> Result<Response, AppError> {
    let validated = validate(&form, BOOK_INSTANCE_FORM);
    let Some(input) = checked_input(&state.db, &validated).await? else {
        return rerender(&state, "Create BookInstance", None, validated).await;
    };

    let model = book_instance::ActiveModel {
        book_id: Set(input.book_id),
        imprint: Set(input.imprint),
        status: Set(input.status),
        due_back: Set(input.due_back),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(id = model.id, "Created book copy");
    Ok(Redirect::to(&model.url()).into_response())
}

#[instrument(skip(state), fields(id))]
pub async fn update_get(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Response, AppError> {
    let found = queries::instance_update_options(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Book copy not found".into()))?;

    let values = BookInstanceFormValues::from(&found.instance);
    render(
        &state,
        form_view("Update BookInstance", found.books, values, vec![]),
    )
}

#[instrument(skip(state, form), fields(id))]
pub async fn update_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppForm(form): AppForm,
) -> Result<Response, AppError> {
    let validated = validate(&form, BOOK_INSTANCE_FORM);
    let Some(input) = checked_input(&state.db, &validated).await? else {
        return rerender(&state, "Update BookInstance", Some(id), validated).await;
    };

    let mut active: book_instance::ActiveModel = find_instance(&state.db, id).await?.into();
    active.book_id = Set(input.book_id);
    active.imprint = Set(input.imprint);
    active.status = Set(input.status);
    active.due_back = Set(input.due_back);
    let model = active.update(&state.db).await?;

    Ok(Redirect::to(&model.url()).into_response())
}

#[instrument(skip(state), fields(id))]
pub async fn delete_get(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Response, AppError> {
    let Some((copy, book)) = queries::instance_with_book(&state.db, id).await? else {
        return Ok(Redirect::to(LIST_URL).into_response());
    };

    render(
        &state,
        View::BookInstanceDelete(BookInstanceDeletePage {
            title: "Delete BookInstance".into(),
            bookinstance: BookInstanceView::new(copy, book),
        }),
    )
}

/// Copies have no dependents, so this never refuses.
#[instrument(skip(state), fields(id))]
pub async fn delete_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Response, AppError> {
    let result = book_instance::Entity::delete_by_id(id)
        .exec(&state.db)
        .await?;
    if result.rows_affected > 0 {
        info!("Deleted book copy");
    }
    Ok(Redirect::to(LIST_URL).into_response())
}

async fn checked_input<C: ConnectionTrait>(
    db: &C,
    validated: &Validated,
) -> Result<Option<BookInstanceInput>, AppError> {
    let Some(input) = BookInstanceInput::from_validated(validated) else {
        return Ok(None);
    };
    if book::Entity::find_by_id(input.book_id).one(db).await?.is_none() {
        return Ok(None);
    }
    Ok(Some(input))
}

async fn rerender(
    state: &AppState,
    title: &str,
    id: Option<i32>,
    validated: Validated,
) -> Result<Response, AppError> {
    let books = queries::books_for_selector(&state.db).await?;
    let values = BookInstanceFormValues::from_submission(id, &validated);

    let mut errors = validated.into_errors();
    if errors.is_empty() {
        errors.push(FieldError {
            field: "book".into(),
            message: "Book not found.".into(),
            value: values.book.clone(),
        });
    }

    render(state, form_view(title, books, values, errors))
}

fn form_view(
    title: &str,
    books: Vec<book::Model>,
    bookinstance: BookInstanceFormValues,
    errors: Vec<FieldError>,
) -> View {
    View::BookInstanceForm(BookInstanceFormPage {
        title: title.into(),
        book_list: books.into_iter().map(BookSummary::from).collect(),
        statuses: STATUS_VALUES,
        bookinstance,
        errors,
    })
}

async fn find_instance<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<book_instance::Model, AppError> {
    book_instance::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Book copy not found".into()))
}
