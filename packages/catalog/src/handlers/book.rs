use std::collections::BTreeSet;

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use sea_orm::*;
use tracing::{info, instrument};

use super::render;
use crate::entity::{author, book, book_genre, genre};
use crate::error::AppError;
use crate::extractors::form::AppForm;
use crate::extractors::path::AppPath;
use crate::models::author::AuthorView;
use crate::models::book::*;
use crate::models::book_instance::BookInstanceView;
use crate::queries::{self, BookDetail, BookFormOptions};
use crate::render::View;
use crate::state::AppState;
use crate::validation::{FieldError, Validated, validate};

const LIST_URL: &str = "/catalog/books";

#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let books = book::Entity::find()
        .find_also_related(author::Entity)
        .order_by_asc(book::Column::Title)
        .all(&state.db)
        .await?;

    render(
        &state,
        View::BookList(BookListPage {
            title: "Book List".into(),
            book_list: books.into_iter().map(BookListItem::from).collect(),
        }),
    )
}

#[instrument(skip(state), fields(id))]
pub async fn detail(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Response, AppError> {
    let found = queries::book_detail(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Book not found".into()))?;

    let (book, book_instances) = split_detail(found);
    render(
        &state,
        View::BookDetail(BookDetailPage {
            title: book.title.clone(),
            book,
            book_instances,
        }),
    )
}

#[instrument(skip(state))]
pub async fn create_get(State(state): State<AppState>) -> Result<Response, AppError> {
    let options = queries::book_form_options(&state.db).await?;
    render(&state, form_view("Create Book", None, options, &[], vec![]))
}

#[instrument(skip(state, form))]
pub async fn create_post(
    State(state): State<AppState>,
    AppForm(form): AppForm,
) -> Result<Response, AppError> {
    let validated = validate(&form, BOOK_FORM);
    let Some(input) = checked_input(&state.db, &validated).await? else {
        return rerender(&state, "Create Book", None, validated).await;
    };

    let txn = state.db.begin().await?;
    let model = book::ActiveModel {
        title: Set(input.title),
        summary: Set(input.summary),
        isbn: Set(input.isbn),
        author_id: Set(input.author_id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    link_genres(&txn, model.id, &input.genre_ids).await?;
    txn.commit().await?;

    info!(id = model.id, "Created book");
    Ok(Redirect::to(&model.url()).into_response())
}

#[instrument(skip(state), fields(id))]
pub async fn update_get(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Response, AppError> {
    let found = queries::book_update_options(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Book not found".into()))?;

    let values = BookFormValues::from_model(&found.book, &found.book_genres);
    let selected = values.genre.clone();
    render(
        &state,
        form_view("Update Book", Some(values), found.options, &selected, vec![]),
    )
}

#[instrument(skip(state, form), fields(id))]
pub async fn update_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppForm(form): AppForm,
) -> Result<Response, AppError> {
    let validated = validate(&form, BOOK_FORM);
    let Some(input) = checked_input(&state.db, &validated).await? else {
        return rerender(&state, "Update Book", Some(id), validated).await;
    };

    let txn = state.db.begin().await?;
    let mut active: book::ActiveModel = find_book(&txn, id).await?.into();
    active.title = Set(input.title);
    active.summary = Set(input.summary);
    active.isbn = Set(input.isbn);
    active.author_id = Set(input.author_id);
    let model = active.update(&txn).await?;

    book_genre::Entity::delete_many()
        .filter(book_genre::Column::BookId.eq(id))
        .exec(&txn)
        .await?;
    link_genres(&txn, id, &input.genre_ids).await?;
    txn.commit().await?;

    Ok(Redirect::to(&model.url()).into_response())
}

#[instrument(skip(state), fields(id))]
pub async fn delete_get(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Response, AppError> {
    let Some(found) = queries::book_detail(&state.db, id).await? else {
        return Ok(Redirect::to(LIST_URL).into_response());
    };

    render(&state, delete_view(found))
}

#[instrument(skip(state), fields(id))]
pub async fn delete_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Response, AppError> {
    let Some(found) = queries::book_detail(&state.db, id).await? else {
        return Ok(Redirect::to(LIST_URL).into_response());
    };

    if !found.instances.is_empty() {
        info!(copies = found.instances.len(), "Refused to delete book with copies");
        return render(&state, delete_view(found));
    }

    let txn = state.db.begin().await?;
    book_genre::Entity::delete_many()
        .filter(book_genre::Column::BookId.eq(id))
        .exec(&txn)
        .await?;
    book::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    info!("Deleted book");
    Ok(Redirect::to(LIST_URL).into_response())
}

/// The submission as a [`BookInput`], or `None` when it must be shown again.
/// An author id that names no stored author is reported on the form.
async fn checked_input<C: ConnectionTrait>(
    db: &C,
    validated: &Validated,
) -> Result<Option<BookInput>, AppError> {
    let Some(input) = BookInput::from_validated(validated) else {
        return Ok(None);
    };
    if author::Entity::find_by_id(input.author_id).one(db).await?.is_none() {
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
    let options = queries::book_form_options(&state.db).await?;
    let values = BookFormValues::from_submission(id, &validated);

    let mut errors = validated.into_errors();
    if errors.is_empty() {
        errors.push(FieldError {
            field: "author".into(),
            message: "Author not found.".into(),
            value: values.author.clone(),
        });
    }

    let selected = values.genre.clone();
    render(
        state,
        form_view(title, Some(values), options, &selected, errors),
    )
}

fn form_view(
    title: &str,
    book: Option<BookFormValues>,
    options: BookFormOptions,
    selected: &[String],
    errors: Vec<FieldError>,
) -> View {
    View::BookForm(BookFormPage {
        title: title.into(),
        book,
        authors: options.authors.into_iter().map(AuthorView::from).collect(),
        genres: genre_options(options.genres, selected),
        errors,
    })
}

fn split_detail(found: BookDetail) -> (BookView, Vec<BookInstanceView>) {
    let book = BookView::new(found.book, found.author, found.genres);
    let instances = found
        .instances
        .into_iter()
        .map(BookInstanceView::from)
        .collect();
    (book, instances)
}

fn delete_view(found: BookDetail) -> View {
    let (book, book_instances) = split_detail(found);
    View::BookDelete(BookDeletePage {
        title: "Delete Book".into(),
        book,
        book_instances,
    })
}

/// Insert one link row per genre id that names a stored genre.
async fn link_genres(
    txn: &DatabaseTransaction,
    book_id: i32,
    genre_ids: &BTreeSet<i32>,
) -> Result<(), DbErr> {
    if genre_ids.is_empty() {
        return Ok(());
    }

    let known: Vec<i32> = genre::Entity::find()
        .select_only()
        .column(genre::Column::Id)
        .filter(genre::Column::Id.is_in(genre_ids.iter().copied()))
        .into_tuple()
        .all(txn)
        .await?;
    if known.is_empty() {
        return Ok(());
    }

    book_genre::Entity::insert_many(known.into_iter().map(|genre_id| book_genre::ActiveModel {
        book_id: Set(book_id),
        genre_id: Set(genre_id),
    }))
    .exec_without_returning(txn)
    .await?;

    Ok(())
}

async fn find_book<C: ConnectionTrait>(db: &C, id: i32) -> Result<book::Model, AppError> {
    book::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Book not found".into()))
}
