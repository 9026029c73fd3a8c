mod common;

mod book;
mod book_instance;
mod index;
