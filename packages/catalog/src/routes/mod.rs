use axum::Router;
use axum::routing::get;

use crate::handlers::{author, book, book_instance, catalog, genre};
use crate::state::AppState;

/// Everything mounted under `/catalog`.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .merge(author_routes())
        .merge(genre_routes())
        .merge(book_routes())
        .merge(book_instance_routes())
}

fn author_routes() -> Router<AppState> {
    Router::new()
        .route("/authors", get(author::list))
        .route(
            "/author/create",
            get(author::create_get).post(author::create_post),
        )
        .route("/author/{id}", get(author::detail))
        .route(
            "/author/{id}/update",
            get(author::update_get).post(author::update_post),
        )
        .route(
            "/author/{id}/delete",
            get(author::delete_get).post(author::delete_post),
        )
}

fn genre_routes() -> Router<AppState> {
    Router::new()
        .route("/genres", get(genre::list))
        .route(
            "/genre/create",
            get(genre::create_get).post(genre::create_post),
        )
        .route("/genre/{id}", get(genre::detail))
        .route(
            "/genre/{id}/update",
            get(genre::update_get).post(genre::update_post),
        )
        .route(
            "/genre/{id}/delete",
            get(genre::delete_get).post(genre::delete_post),
        )
}

fn book_routes() -> Router<AppState> {
    Router::new()
        .route("/books", get(book::list))
        .route("/book/create", get(book::create_get).post(book::create_post))
        .route("/book/{id}", get(book::detail))
        .route(
            "/book/{id}/update",
            get(book::update_get).post(book::update_post),
        )
        .route(
            "/book/{id}/delete",
            get(book::delete_get).post(book::delete_post),
        )
}

fn book_instance_routes() -> Router<AppState> {
    Router::new()
        .route("/bookinstances", get(book_instance::list))
        .route(
            "/bookinstance/create",
            get(book_instance::create_get).post(book_instance::create_post),
        )
        .route("/bookinstance/{id}", get(book_instance::detail))
        .route(
            "/bookinstance/{id}/update",
            get(book_instance::update_get).post(book_instance::update_post),
        )
        .route(
            "/bookinstance/{id}/delete",
            get(book_instance::delete_get).post(book_instance::delete_post),
        )
}
