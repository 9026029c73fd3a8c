use sea_orm::{EntityTrait, PaginatorTrait};

use catalog::entity::book_instance;
use catalog::entity::copy_status::CopyStatus;

use crate::common::{TestApp, routes};

async fn book(app: &TestApp, title: &str) -> i32 {
    let author = app.create_author("Jane", "Austen").await;
    app.create_book(title, author, &[]).await
}

mod copy_creation {
    use super::*;

    #[tokio::test]
    async fn copy_is_created() {
        let app = TestApp::spawn().await;
        let book_id = book(&app, "Emma").await;
        let book_field = book_id.to_string();

        let res = app
            .post_form(
                routes::BOOK_INSTANCE_CREATE,
                &[
                    ("book", book_field.as_str()),
                    ("imprint", "Penguin, 2003"),
                    ("status", "Loaned"),
                    ("due_back", "2026-11-01"),
                ],
            )
            .await;

        let id = res.redirect_id();
        let stored = book_instance::Entity::find_by_id(id)
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, CopyStatus::Loaned);
        assert_eq!(stored.book_id, book_id);

        let detail = app.get(&routes::book_instance(id)).await;
        assert_eq!(detail.view(), "bookinstance_detail");
        assert_eq!(detail.data()["title"], "Copy: Emma");
        assert_eq!(detail.data()["bookinstance"]["due_back_formatted"], "Nov 1, 2026");
    }

    #[tokio::test]
    async fn create_form_defaults_to_maintenance() {
        let app = TestApp::spawn().await;
        book(&app, "Emma").await;

        let res = app.get(routes::BOOK_INSTANCE_CREATE).await;

        assert_eq!(res.data()["title"], "Create BookInstance");
        assert_eq!(res.data()["bookinstance"]["status"], "Maintenance");
        assert_eq!(res.data()["book_list"][0]["title"], "Emma");
        assert_eq!(res.data()["statuses"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn unknown_status_is_rejected() {
        let app = TestApp::spawn().await;
        let book_id = book(&app, "Emma").await.to_string();

        let res = app
            .post_form(
                routes::BOOK_INSTANCE_CREATE,
                &[
                    ("book", book_id.as_str()),
                    ("imprint", "Penguin"),
                    ("status", "Lost"),
                ],
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.view(), "bookinstance_form");
        assert_eq!(res.error_fields(), ["status"]);
        assert_eq!(book_instance::Entity::find().count(&app.db).await.unwrap(), 0);
    }
}

mod copy_form_errors {
    use catalog::config::ViewFormat;

    use super::*;

    #[tokio::test]
    async fn unknown_book_is_reported() {
        let app = TestApp::spawn().await;
        book(&app, "Emma").await;

        let res = app
            .post_form(
                routes::BOOK_INSTANCE_CREATE,
                &[
                    ("book", "999"),
                    ("imprint", "Penguin"),
                    ("status", "Available"),
                ],
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.view(), "bookinstance_form");
        assert_eq!(res.error_fields(), ["book"]);
        assert_eq!(res.data()["errors"][0]["message"], "Book not found.");
        assert_eq!(res.data()["bookinstance"]["book"], "999");
        assert_eq!(book_instance::Entity::find().count(&app.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn invalid_due_back_is_reported() {
        let app = TestApp::spawn().await;
        let book_id = book(&app, "Emma").await.to_string();

        let res = app
            .post_form(
                routes::BOOK_INSTANCE_CREATE,
                &[
                    ("book", book_id.as_str()),
                    ("imprint", "Penguin"),
                    ("status", "Loaned"),
                    ("due_back", "next tuesday"),
                ],
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.error_fields(), ["due_back"]);
        assert_eq!(res.data()["errors"][0]["message"], "Invalid date");
        assert_eq!(res.data()["bookinstance"]["status"], "Loaned");
        assert_eq!(book_instance::Entity::find().count(&app.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn rejected_imprint_is_escaped_in_html() {
        let app = TestApp::spawn_with(ViewFormat::Html).await;
        let book_id = book(&app, "Emma").await.to_string();

        let res = app
            .post_form(
                routes::BOOK_INSTANCE_CREATE,
                &[
                    ("book", book_id.as_str()),
                    ("imprint", "\"><script>alert(1)</script>"),
                    ("status", "Lost"),
                ],
            )
            .await;

        assert_eq!(res.status, 200);
        assert!(res.text.contains("Invalid status"));
        assert!(!res.text.contains("<script>alert(1)</script>"));
        assert!(res.text.contains("&lt;script&gt;"));
    }
}

mod copy_lifecycle {
    use super::*;

    #[tokio::test]
    async fn list_is_sorted_by_book_title() {
        let app = TestApp::spawn().await;
        let persuasion = book(&app, "Persuasion").await;
        let emma = book(&app, "Emma").await;
        app.create_book_instance(persuasion, "Available").await;
        app.create_book_instance(emma, "Reserved").await;

        let res = app.get(routes::BOOK_INSTANCES).await;

        assert_eq!(res.view(), "bookinstance_list");
        let list = res.data()["bookinstance_list"].as_array().unwrap();
        assert_eq!(list[0]["book"]["title"], "Emma");
        assert_eq!(list[1]["book"]["title"], "Persuasion");
    }

    #[tokio::test]
    async fn update_changes_status() {
        let app = TestApp::spawn().await;
        let book_id = book(&app, "Emma").await;
        let id = app.create_book_instance(book_id, "Available").await;
        let book_field = book_id.to_string();

        let res = app
            .post_form(
                &routes::update(&routes::book_instance(id)),
                &[
                    ("book", book_field.as_str()),
                    ("imprint", "Penguin, 2003"),
                    ("status", "Maintenance"),
                ],
            )
            .await;

        assert_eq!(res.redirect_id(), id);
        let stored = book_instance::Entity::find_by_id(id)
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, CopyStatus::Maintenance);
    }

    #[tokio::test]
    async fn delete_is_unconditional() {
        let app = TestApp::spawn().await;
        let book_id = book(&app, "Emma").await;
        let id = app.create_book_instance(book_id, "Loaned").await;

        let confirm = app.get(&routes::delete(&routes::book_instance(id))).await;
        assert_eq!(confirm.view(), "bookinstance_delete");

        let res = app
            .post_form(&routes::delete(&routes::book_instance(id)), &[])
            .await;

        assert_eq!(res.location.as_deref(), Some(routes::BOOK_INSTANCES));
        assert_eq!(app.get(&routes::book_instance(id)).await.status, 404);
    }
}
