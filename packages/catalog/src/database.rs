use std::time::Duration;

use sea_orm::sea_query::Index;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::entity::{author, book, book_genre, book_instance, genre};

pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.to_owned());

    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .sqlx_logging(config.sqlx_logging);

    let db = Database::connect(opt).await?;
    create_tables(&db).await?;
    ensure_indexes(&db).await?;

    Ok(db)
}

/// Create any missing tables. Referenced tables come first so foreign keys resolve.
pub async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut tables = [
        schema.create_table_from_entity(author::Entity),
        schema.create_table_from_entity(genre::Entity),
        schema.create_table_from_entity(book::Entity),
        schema.create_table_from_entity(book_genre::Entity),
        schema.create_table_from_entity(book_instance::Entity),
    ];

    for stmt in tables.iter_mut() {
        stmt.if_not_exists();
        db.execute_raw(backend.build(&*stmt)).await?;
    }

    Ok(())
}

/// Ensure the foreign-key lookups behind detail and delete views are indexed.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();

    let indexes = [
        (
            "idx_book_author",
            Index::create()
                .if_not_exists()
                .name("idx_book_author")
                .table(book::Entity)
                .col(book::Column::AuthorId)
                .to_owned(),
        ),
        (
            "idx_book_instance_book",
            Index::create()
                .if_not_exists()
                .name("idx_book_instance_book")
                .table(book_instance::Entity)
                .col(book_instance::Column::BookId)
                .to_owned(),
        ),
        (
            "idx_book_genre_genre",
            Index::create()
                .if_not_exists()
                .name("idx_book_genre_genre")
                .table(book_genre::Entity)
                .col(book_genre::Column::GenreId)
                .to_owned(),
        ),
    ];

    for (name, stmt) in &indexes {
        match db.execute_raw(backend.build(stmt)).await {
            Ok(_) => info!("Ensured index {} exists", name),
            Err(e) => warn!("Failed to create index {}: {}", name, e),
        }
    }

    Ok(())
}
