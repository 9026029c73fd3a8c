use catalog::config::ViewFormat;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn root_redirects_to_catalog() {
    let app = TestApp::spawn().await;

    let res = app.get("/").await;

    assert_eq!(res.status, 303);
    assert_eq!(res.location.as_deref(), Some(routes::INDEX));
}

#[tokio::test]
async fn index_counts_records() {
    let app = TestApp::spawn().await;
    let author = app.create_author("Jane", "Austen").await;
    app.create_genre("Romance").await;
    let book = app.create_book("Emma", author, &[]).await;
    app.create_book_instance(book, "Available").await;
    app.create_book_instance(book, "Loaned").await;

    let res = app.get(routes::INDEX).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.view(), "index");
    let data = res.data();
    assert_eq!(data["book_count"], 1);
    assert_eq!(data["book_instance_count"], 2);
    assert_eq!(data["book_instance_available_count"], 1);
    assert_eq!(data["author_count"], 1);
    assert_eq!(data["genre_count"], 1);
}

#[tokio::test]
async fn unknown_path_is_404() {
    let app = TestApp::spawn().await;

    assert_eq!(app.get("/catalog/nothing/here").await.status, 404);
}

#[tokio::test]
async fn html_pages_are_served() {
    let app = TestApp::spawn_with(ViewFormat::Html).await;
    app.create_author("Jane", "Austen").await;

    let res = app.get(routes::AUTHORS).await;

    assert_eq!(res.status, 200);
    assert!(res.text.contains("<title>Author List</title>"));
    assert!(res.text.contains("Austen, Jane"));

    let missing = app.get(&routes::author(404)).await;
    assert_eq!(missing.status, 404);
    assert!(missing.text.contains("Author not found"));
}
