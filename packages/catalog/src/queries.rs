//! Independent reads issued together and joined.
//!
//! Each function fans its queries out with `tokio::try_join!`; the first
//! store error aborts the whole set.

use sea_orm::*;

use crate::entity::copy_status::CopyStatus;
use crate::entity::{author, book, book_genre, book_instance, genre};

pub struct AuthorWithBooks {
    pub author: author::Model,
    pub books: Vec<book::Model>,
}

pub async fn author_with_books<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<AuthorWithBooks>, DbErr> {
    let (author, books) = tokio::try_join!(
        author::Entity::find_by_id(id).one(db),
        book::Entity::find()
            .filter(book::Column::AuthorId.eq(id))
            .order_by_asc(book::Column::Title)
            .all(db),
    )?;
    Ok(author.map(|author| AuthorWithBooks { author, books }))
}

pub struct GenreWithBooks {
    pub genre: genre::Model,
    pub books: Vec<book::Model>,
}

pub async fn genre_with_books<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<GenreWithBooks>, DbErr> {
    let (genre, books) = tokio::try_join!(
        genre::Entity::find_by_id(id).one(db),
        books_in_genre(db, id),
    )?;
    Ok(genre.map(|genre| GenreWithBooks { genre, books }))
}

async fn books_in_genre<C: ConnectionTrait>(db: &C, genre_id: i32) -> Result<Vec<book::Model>, DbErr> {
    book::Entity::find()
        .inner_join(book_genre::Entity)
        .filter(book_genre::Column::GenreId.eq(genre_id))
        .order_by_asc(book::Column::Title)
        .all(db)
        .await
}

async fn genres_of_book<C: ConnectionTrait>(db: &C, book_id: i32) -> Result<Vec<genre::Model>, DbErr> {
    genre::Entity::find()
        .inner_join(book_genre::Entity)
        .filter(book_genre::Column::BookId.eq(book_id))
        .order_by_asc(genre::Column::Name)
        .all(db)
        .await
}

pub struct BookDetail {
    pub book: book::Model,
    pub author: Option<author::Model>,
    pub genres: Vec<genre::Model>,
    pub instances: Vec<book_instance::Model>,
}

pub async fn book_detail<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<BookDetail>, DbErr> {
    let (found, genres, instances) = tokio::try_join!(
        book::Entity::find_by_id(id)
            .find_also_related(author::Entity)
            .one(db),
        genres_of_book(db, id),
        book_instance::Entity::find()
            .filter(book_instance::Column::BookId.eq(id))
            .order_by_asc(book_instance::Column::Id)
            .all(db),
    )?;
    Ok(found.map(|(book, author)| BookDetail {
        book,
        author,
        genres,
        instances,
    }))
}

/// Selector lists for the book form.
pub struct BookFormOptions {
    pub authors: Vec<author::Model>,
    pub genres: Vec<genre::Model>,
}

pub async fn book_form_options<C: ConnectionTrait>(db: &C) -> Result<BookFormOptions, DbErr> {
    let (authors, genres) = tokio::try_join!(
        author::Entity::find()
            .order_by_asc(author::Column::FamilyName)
            .all(db),
        genre::Entity::find().order_by_asc(genre::Column::Name).all(db),
    )?;
    Ok(BookFormOptions { authors, genres })
}

pub struct BookUpdateOptions {
    pub book: book::Model,
    pub book_genres: Vec<genre::Model>,
    pub options: BookFormOptions,
}

pub async fn book_update_options<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<BookUpdateOptions>, DbErr> {
    let (book, book_genres, options) = tokio::try_join!(
        book::Entity::find_by_id(id).one(db),
        genres_of_book(db, id),
        book_form_options(db),
    )?;
    Ok(book.map(|book| BookUpdateOptions {
        book,
        book_genres,
        options,
    }))
}

pub async fn books_for_selector<C: ConnectionTrait>(db: &C) -> Result<Vec<book::Model>, DbErr> {
    book::Entity::find()
        .order_by_asc(book::Column::Title)
        .all(db)
        .await
}

pub async fn instance_with_book<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<(book_instance::Model, Option<book::Model>)>, DbErr> {
    book_instance::Entity::find_by_id(id)
        .find_also_related(book::Entity)
        .one(db)
        .await
}

pub struct InstanceUpdateOptions {
    pub instance: book_instance::Model,
    pub books: Vec<book::Model>,
}

pub async fn instance_update_options<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<InstanceUpdateOptions>, DbErr> {
    let (instance, books) = tokio::try_join!(
        book_instance::Entity::find_by_id(id).one(db),
        books_for_selector(db),
    )?;
    Ok(instance.map(|instance| InstanceUpdateOptions { instance, books }))
}

pub struct CatalogCounts {
    pub books: u64,
    pub book_instances: u64,
    pub available_instances: u64,
    pub authors: u64,
    pub genres: u64,
}

pub async fn catalog_counts<C: ConnectionTrait>(db: &C) -> Result<CatalogCounts, DbErr> {
    let (books, book_instances, available_instances, authors, genres) = tokio::try_join!(
        book::Entity::find().count(db),
        book_instance::Entity::find().count(db),
        book_instance::Entity::find()
            .filter(book_instance::Column::Status.eq(CopyStatus::Available))
            .count(db),
        author::Entity::find().count(db),
        genre::Entity::find().count(db),
    )?;
    Ok(CatalogCounts {
        books,
        book_instances,
        available_instances,
        authors,
        genres,
    })
}
