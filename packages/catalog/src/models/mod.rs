pub mod author;
pub mod book;
pub mod book_instance;
pub mod catalog;
pub mod genre;
