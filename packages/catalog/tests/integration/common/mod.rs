use std::net::SocketAddr;

use reqwest::Client;
use reqwest::redirect::Policy;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tempfile::TempDir;

use catalog::config::{AppConfig, DatabaseConfig, LogConfig, ServerConfig, ViewFormat};
use catalog::render::renderer_for;
use catalog::state::AppState;

pub mod routes {
    pub const INDEX: &str = "/catalog";

    pub const AUTHORS: &str = "/catalog/authors";
    pub const AUTHOR_CREATE: &str = "/catalog/author/create";
    pub const GENRES: &str = "/catalog/genres";
    pub const GENRE_CREATE: &str = "/catalog/genre/create";
    pub const BOOKS: &str = "/catalog/books";
    pub const BOOK_CREATE: &str = "/catalog/book/create";
    pub const BOOK_INSTANCES: &str = "/catalog/bookinstances";
    pub const BOOK_INSTANCE_CREATE: &str = "/catalog/bookinstance/create";

    pub fn author(id: i32) -> String {
        format!("/catalog/author/{id}")
    }

    pub fn genre(id: i32) -> String {
        format!("/catalog/genre/{id}")
    }

    pub fn book(id: i32) -> String {
        format!("/catalog/book/{id}")
    }

    pub fn book_instance(id: i32) -> String {
        format!("/catalog/bookinstance/{id}")
    }

    pub fn update(url: &str) -> String {
        format!("{url}/update")
    }

    pub fn delete(url: &str) -> String {
        format!("{url}/delete")
    }
}

/// A running test server backed by its own SQLite file.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    _dir: TempDir,
}

pub struct TestResponse {
    pub status: u16,
    /// `Location` header of a redirect.
    pub location: Option<String>,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let location = res
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self {
            status,
            location,
            text,
            body,
        }
    }

    /// Name of the rendered view.
    pub fn view(&self) -> &str {
        self.body["view"].as_str().unwrap_or_default()
    }

    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// Fields named in the view's validation errors.
    pub fn error_fields(&self) -> Vec<String> {
        self.data()["errors"]
            .as_array()
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e["field"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The entity id at the end of a redirect target such as `/catalog/author/3`.
    pub fn redirect_id(&self) -> i32 {
        assert_eq!(self.status, 303, "Expected a redirect: {}", self.text);
        self.location
            .as_deref()
            .and_then(|l| l.rsplit('/').next())
            .and_then(|id| id.parse().ok())
            .expect("Redirect target should end in an id")
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(ViewFormat::Json).await
    }

    pub async fn spawn_with(view_format: ViewFormat) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}?mode=rwc", dir.path().join("catalog.db").display());

        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                view_format,
            },
            database: DatabaseConfig {
                url: db_url,
                max_connections: 5,
                min_connections: 1,
                connect_timeout_secs: 8,
                sqlx_logging: false,
            },
            log: LogConfig {
                filter: "catalog=debug".to_string(),
            },
        };

        let db = catalog::database::init_db(&config.database)
            .await
            .expect("Failed to initialize test database");

        let state = AppState {
            db: db.clone(),
            renderer: renderer_for(view_format),
            config,
        };
        let app = catalog::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = Client::builder()
            .redirect(Policy::none())
            .build()
            .expect("Failed to build client");

        Self {
            addr,
            client,
            db,
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn create_author(&self, first_name: &str, family_name: &str) -> i32 {
        let res = self
            .post_form(
                routes::AUTHOR_CREATE,
                &[
                    ("first_name", first_name),
                    ("family_name", family_name),
                    ("date_of_birth", ""),
                    ("date_of_death", ""),
                ],
            )
            .await;
        res.redirect_id()
    }

    pub async fn create_genre(&self, name: &str) -> i32 {
        self.post_form(routes::GENRE_CREATE, &[("name", name)])
            .await
            .redirect_id()
    }

    pub async fn create_book(&self, title: &str, author_id: i32, genre_ids: &[i32]) -> i32 {
        let author = author_id.to_string();
        let genres: Vec<String> = genre_ids.iter().map(i32::to_string).collect();

        let mut form = vec![
            ("title", title),
            ("author", author.as_str()),
            ("summary", "A summary."),
            ("isbn", "9780000000000"),
        ];
        form.extend(genres.iter().map(|g| ("genre", g.as_str())));

        self.post_form(routes::BOOK_CREATE, &form)
            .await
            .redirect_id()
    }

    pub async fn create_book_instance(&self, book_id: i32, status: &str) -> i32 {
        let book = book_id.to_string();
        self.post_form(
            routes::BOOK_INSTANCE_CREATE,
            &[
                ("book", book.as_str()),
                ("imprint", "Penguin, 2003"),
                ("status", status),
                ("due_back", ""),
            ],
        )
        .await
        .redirect_id()
    }
}
