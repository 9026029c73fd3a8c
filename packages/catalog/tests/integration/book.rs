use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use catalog::entity::{book, book_genre};

use crate::common::{TestApp, routes};

mod book_creation {
    use super::*;

    #[tokio::test]
    async fn book_with_genres_is_created() {
        let app = TestApp::spawn().await;
        let author = app.create_author("Jane", "Austen").await;
        let romance = app.create_genre("Romance").await;
        let classic = app.create_genre("Classic").await;

        let id = app.create_book("Emma", author, &[romance, classic]).await;

        let res = app.get(&routes::book(id)).await;
        assert_eq!(res.view(), "book_detail");
        assert_eq!(res.data()["title"], "Emma");
        assert_eq!(res.data()["book"]["author"]["name"], "Austen, Jane");
        let genres: Vec<_> = res.data()["book"]["genres"]
            .as_array()
            .unwrap()
            .iter()
            .map(|g| g["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(genres, ["Classic", "Romance"]);
    }

    #[tokio::test]
    async fn repeated_genre_is_linked_once() {
        let app = TestApp::spawn().await;
        let author = app.create_author("Jane", "Austen").await;
        let romance = app.create_genre("Romance").await;

        let id = app.create_book("Emma", author, &[romance, romance]).await;

        let links = book_genre::Entity::find()
            .filter(book_genre::Column::BookId.eq(id))
            .count(&app.db)
            .await
            .unwrap();
        assert_eq!(links, 1);
    }

    #[tokio::test]
    async fn missing_fields_rerender_with_options() {
        let app = TestApp::spawn().await;
        app.create_author("Jane", "Austen").await;
        let romance = app.create_genre("Romance").await;
        let romance_id = romance.to_string();

        let res = app
            .post_form(
                routes::BOOK_CREATE,
                &[("title", ""), ("genre", romance_id.as_str())],
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.view(), "book_form");
        assert_eq!(res.error_fields(), ["title", "author", "summary", "isbn"]);
        assert_eq!(res.data()["authors"].as_array().unwrap().len(), 1);
        assert_eq!(res.data()["genres"][0]["checked"], true);
        assert_eq!(book::Entity::find().count(&app.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unknown_author_is_reported() {
        let app = TestApp::spawn().await;

        let res = app
            .post_form(
                routes::BOOK_CREATE,
                &[
                    ("title", "Emma"),
                    ("author", "99"),
                    ("summary", "A novel."),
                    ("isbn", "9780141439587"),
                ],
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.error_fields(), ["author"]);
        assert_eq!(book::Entity::find().count(&app.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn create_form_lists_authors_and_genres() {
        let app = TestApp::spawn().await;
        app.create_author("Leo", "Tolstoy").await;
        app.create_author("Jane", "Austen").await;
        app.create_genre("Romance").await;

        let res = app.get(routes::BOOK_CREATE).await;

        assert_eq!(res.data()["title"], "Create Book");
        assert_eq!(res.data()["authors"][0]["family_name"], "Austen");
        assert_eq!(res.data()["genres"][0]["checked"], false);
    }
}

mod book_update {
    use super::*;

    #[tokio::test]
    async fn update_replaces_genre_links() {
        let app = TestApp::spawn().await;
        let author = app.create_author("Jane", "Austen").await;
        let romance = app.create_genre("Romance").await;
        let satire = app.create_genre("Satire").await;
        let id = app.create_book("Emma", author, &[romance]).await;

        let form_page = app.get(&routes::update(&routes::book(id))).await;
        assert_eq!(form_page.data()["book"]["genre"][0], romance.to_string());

        let author_id = author.to_string();
        let satire_id = satire.to_string();
        let res = app
            .post_form(
                &routes::update(&routes::book(id)),
                &[
                    ("title", "Emma (revised)"),
                    ("author", author_id.as_str()),
                    ("summary", "Still a novel."),
                    ("isbn", "9780141439587"),
                    ("genre", satire_id.as_str()),
                ],
            )
            .await;

        assert_eq!(res.redirect_id(), id);
        let links = book_genre::Entity::find()
            .filter(book_genre::Column::BookId.eq(id))
            .all(&app.db)
            .await
            .unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].genre_id, satire);
    }

    #[tokio::test]
    async fn update_of_missing_book_is_404() {
        let app = TestApp::spawn().await;
        let author = app.create_author("Jane", "Austen").await;
        let author_id = author.to_string();

        let res = app
            .post_form(
                &routes::update(&routes::book(5)),
                &[
                    ("title", "Emma"),
                    ("author", author_id.as_str()),
                    ("summary", "A novel."),
                    ("isbn", "9780141439587"),
                ],
            )
            .await;

        assert_eq!(res.status, 404);
    }
}

mod book_deletion {
    use super::*;

    #[tokio::test]
    async fn book_with_copies_is_kept() {
        let app = TestApp::spawn().await;
        let author = app.create_author("Jane", "Austen").await;
        let id = app.create_book("Emma", author, &[]).await;
        app.create_book_instance(id, "Available").await;

        let res = app.post_form(&routes::delete(&routes::book(id)), &[]).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.view(), "book_delete");
        assert_eq!(res.data()["book_instances"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn removing_book_removes_its_genre_links() {
        let app = TestApp::spawn().await;
        let author = app.create_author("Jane", "Austen").await;
        let romance = app.create_genre("Romance").await;
        let id = app.create_book("Emma", author, &[romance]).await;

        let res = app.post_form(&routes::delete(&routes::book(id)), &[]).await;

        assert_eq!(res.location.as_deref(), Some(routes::BOOKS));
        assert_eq!(app.get(&routes::book(id)).await.status, 404);
        assert_eq!(book_genre::Entity::find().count(&app.db).await.unwrap(), 0);
        assert_eq!(app.get(&routes::genre(romance)).await.status, 200);
    }
}

#[tokio::test]
async fn list_shows_authors() {
    let app = TestApp::spawn().await;
    let author = app.create_author("Jane", "Austen").await;
    app.create_book("Persuasion", author, &[]).await;
    app.create_book("Emma", author, &[]).await;

    let res = app.get(routes::BOOKS).await;

    assert_eq!(res.view(), "book_list");
    let list = res.data()["book_list"].as_array().unwrap();
    assert_eq!(list[0]["title"], "Emma");
    assert_eq!(list[1]["title"], "Persuasion");
    assert_eq!(list[0]["author"]["name"], "Austen, Jane");
}
