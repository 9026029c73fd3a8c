use serde::Serialize;

/// Record counts shown on the catalog home page.
#[derive(Debug, Serialize)]
pub struct IndexPage {
    pub title: String,
    pub book_count: u64,
    pub book_instance_count: u64,
    pub book_instance_available_count: u64,
    pub author_count: u64,
    pub genre_count: u64,
}
