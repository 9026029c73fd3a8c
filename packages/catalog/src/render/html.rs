//! Server-rendered HTML pages, built with Maud.
//!
//! User-supplied text was escaped by the validation pipeline before it was
//! stored, so it is emitted with `PreEscaped`; everything else goes through
//! Maud's own escaping.

use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, PreEscaped, html};

use super::{Rendered, Renderer, View};
use crate::error::AppError;
use crate::models::author::*;
use crate::models::book::*;
use crate::models::book_instance::*;
use crate::models::catalog::IndexPage;
use crate::models::genre::*;
use crate::validation::FieldError;

pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, view: &View) -> Result<Rendered, AppError> {
        let page = match view {
            View::Index(p) => index(p),
            View::AuthorList(p) => author_list(p),
            View::AuthorDetail(p) => author_detail(p),
            View::AuthorForm(p) => author_form(p),
            View::AuthorDelete(p) => author_delete(p),
            View::GenreList(p) => genre_list(p),
            View::GenreDetail(p) => genre_detail(p),
            View::GenreForm(p) => genre_form(p),
            View::GenreDelete(p) => genre_delete(p),
            View::BookList(p) => book_list(p),
            View::BookDetail(p) => book_detail(p),
            View::BookForm(p) => book_form(p),
            View::BookDelete(p) => book_delete(p),
            View::BookInstanceList(p) => bookinstance_list(p),
            View::BookInstanceDetail(p) => bookinstance_detail(p),
            View::BookInstanceForm(p) => bookinstance_form(p),
            View::BookInstanceDelete(p) => bookinstance_delete(p),
        };
        Ok(Rendered {
            content_type: "text/html; charset=utf-8",
            body: page.into_string(),
        })
    }
}

fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body {
                nav {
                    ul {
                        li { a href="/catalog" { "Home" } }
                        li { a href="/catalog/books" { "All books" } }
                        li { a href="/catalog/authors" { "All authors" } }
                        li { a href="/catalog/genres" { "All genres" } }
                        li { a href="/catalog/bookinstances" { "All book-instances" } }
                    }
                    hr;
                    ul {
                        li { a href="/catalog/author/create" { "Create new author" } }
                        li { a href="/catalog/genre/create" { "Create new genre" } }
                        li { a href="/catalog/book/create" { "Create new book" } }
                        li { a href="/catalog/bookinstance/create" { "Create new book instance (copy)" } }
                    }
                }
                main {
                    h1 { (title) }
                    (content)
                }
            }
        }
    }
}

fn error_list(errors: &[FieldError]) -> Markup {
    html! {
        @if !errors.is_empty() {
            ul class="errors" {
                @for e in errors {
                    li data-field=(e.field) { (e.message) }
                }
            }
        }
    }
}

fn book_links(books: &[BookSummary]) -> Markup {
    html! {
        dl {
            @for b in books {
                dt { a href=(b.url) { (PreEscaped(&b.title)) } }
                dd { (PreEscaped(&b.summary)) }
            }
        }
    }
}

fn copy_status(status: &str) -> Markup {
    let class = match status {
        "Available" => "text-success",
        "Maintenance" => "text-danger",
        _ => "text-warning",
    };
    html! { span class=(class) { (status) } }
}

/// Generic page for requests that ended in an error.
pub fn error_page(status: StatusCode, message: &str) -> Markup {
    let title = status
        .canonical_reason()
        .map(|r| format!("{} {}", status.as_u16(), r))
        .unwrap_or_else(|| status.as_u16().to_string());
    layout(
        &title,
        html! {
            p { (message) }
        },
    )
}

fn index(p: &IndexPage) -> Markup {
    layout(
        &p.title,
        html! {
            p { "Welcome to the " em { "Local Library" } "." }
            h2 { "Dynamic content" }
            p { "The library has the following record counts:" }
            ul {
                li { strong { "Books: " } (p.book_count) }
                li { strong { "Copies: " } (p.book_instance_count) }
                li { strong { "Copies available: " } (p.book_instance_available_count) }
                li { strong { "Authors: " } (p.author_count) }
                li { strong { "Genres: " } (p.genre_count) }
            }
        },
    )
}

fn author_list(p: &AuthorListPage) -> Markup {
    layout(
        &p.title,
        html! {
            ul {
                @for a in &p.author_list {
                    li {
                        a href=(a.url) { (PreEscaped(&a.name)) }
                        " (" (a.lifespan) ")"
                    }
                }
                @if p.author_list.is_empty() {
                    li { "There are no authors." }
                }
            }
        },
    )
}

fn author_detail(p: &AuthorDetailPage) -> Markup {
    layout(
        &p.title,
        html! {
            h2 { "Author: " (PreEscaped(&p.author.name)) }
            p { (p.author.lifespan) }
            h3 { "Books" }
            @if p.author_books.is_empty() {
                p { "This author has no books." }
            } @else {
                (book_links(&p.author_books))
            }
            p {
                a href={ (p.author.url) "/update" } { "Update author" }
                " | "
                a href={ (p.author.url) "/delete" } { "Delete author" }
            }
        },
    )
}

fn author_form(p: &AuthorFormPage) -> Markup {
    let values = p.author.clone().unwrap_or_default();
    layout(
        &p.title,
        html! {
            form method="POST" {
                label for="first_name" { "First Name:" }
                input #first_name type="text" name="first_name" placeholder="First name"
                    required value=(PreEscaped(&values.first_name));
                label for="family_name" { "Family Name:" }
                input #family_name type="text" name="family_name" placeholder="Family name"
                    required value=(PreEscaped(&values.family_name));
                label for="date_of_birth" { "Date of birth:" }
                input #date_of_birth type="date" name="date_of_birth" value=(values.date_of_birth);
                label for="date_of_death" { "Date of death:" }
                input #date_of_death type="date" name="date_of_death" value=(values.date_of_death);
                button type="submit" { "Submit" }
            }
            (error_list(&p.errors))
        },
    )
}

fn author_delete(p: &AuthorDeletePage) -> Markup {
    layout(
        &p.title,
        html! {
            h2 { (PreEscaped(&p.author.name)) }
            p { (p.author.lifespan) }
            @if !p.author_books.is_empty() {
                p { strong { "Delete the following books before attempting to delete this author." } }
                (book_links(&p.author_books))
            } @else {
                p { "Do you really want to delete this Author?" }
                form method="POST" {
                    input type="hidden" name="authorid" value=(p.author.id);
                    button type="submit" { "Delete" }
                }
            }
        },
    )
}

fn genre_list(p: &GenreListPage) -> Markup {
    layout(
        &p.title,
        html! {
            ul {
                @for g in &p.genre_list {
                    li { a href=(g.url) { (PreEscaped(&g.name)) } }
                }
                @if p.genre_list.is_empty() {
                    li { "There are no genres." }
                }
            }
        },
    )
}

fn genre_detail(p: &GenreDetailPage) -> Markup {
    layout(
        &p.title,
        html! {
            h2 { "Genre: " (PreEscaped(&p.genre.name)) }
            h3 { "Books" }
            @if p.genre_books.is_empty() {
                p { "This genre has no books." }
            } @else {
                (book_links(&p.genre_books))
            }
            p {
                a href={ (p.genre.url) "/update" } { "Update genre" }
                " | "
                a href={ (p.genre.url) "/delete" } { "Delete genre" }
            }
        },
    )
}

fn genre_form(p: &GenreFormPage) -> Markup {
    let values = p.genre.clone().unwrap_or_default();
    layout(
        &p.title,
        html! {
            form method="POST" {
                label for="name" { "Genre:" }
                input #name type="text" name="name" placeholder="Fantasy, Poetry etc."
                    required value=(PreEscaped(&values.name));
                button type="submit" { "Submit" }
            }
            (error_list(&p.errors))
        },
    )
}

fn genre_delete(p: &GenreDeletePage) -> Markup {
    layout(
        &p.title,
        html! {
            h2 { (PreEscaped(&p.genre.name)) }
            @if !p.genre_books.is_empty() {
                p { strong { "Delete the following books before attempting to delete this genre." } }
                (book_links(&p.genre_books))
            } @else {
                p { "Do you really want to delete this Genre?" }
                form method="POST" {
                    input type="hidden" name="genreid" value=(p.genre.id);
                    button type="submit" { "Delete" }
                }
            }
        },
    )
}

fn book_list(p: &BookListPage) -> Markup {
    layout(
        &p.title,
        html! {
            ul {
                @for b in &p.book_list {
                    li {
                        a href=(b.url) { (PreEscaped(&b.title)) }
                        @if let Some(author) = &b.author {
                            " (" (PreEscaped(&author.name)) ")"
                        }
                    }
                }
                @if p.book_list.is_empty() {
                    li { "There are no books." }
                }
            }
        },
    )
}

fn book_fields(book: &BookView) -> Markup {
    html! {
        h2 { "Title: " (PreEscaped(&book.title)) }
        @if let Some(author) = &book.author {
            p { strong { "Author: " } a href=(author.url) { (PreEscaped(&author.name)) } }
        }
        p { strong { "Summary: " } (PreEscaped(&book.summary)) }
        p { strong { "ISBN: " } (PreEscaped(&book.isbn)) }
        p {
            strong { "Genre: " }
            @for (i, g) in book.genres.iter().enumerate() {
                @if i > 0 { ", " }
                a href=(g.url) { (PreEscaped(&g.name)) }
            }
        }
    }
}

fn copy_rows(copies: &[BookInstanceView]) -> Markup {
    html! {
        @for c in copies {
            hr;
            p { (copy_status(c.status.as_str())) }
            p { strong { "Imprint: " } (PreEscaped(&c.imprint)) }
            @if !c.due_back_formatted.is_empty() {
                p { strong { "Due back: " } (c.due_back_formatted) }
            }
            p { strong { "Id: " } a href=(c.url) { (c.id) } }
        }
    }
}

fn book_detail(p: &BookDetailPage) -> Markup {
    layout(
        &p.title,
        html! {
            (book_fields(&p.book))
            h3 { "Copies" }
            @if p.book_instances.is_empty() {
                p { "There are no copies of this book in the library." }
            } @else {
                (copy_rows(&p.book_instances))
            }
            p {
                a href={ (p.book.url) "/update" } { "Update book" }
                " | "
                a href={ (p.book.url) "/delete" } { "Delete book" }
            }
        },
    )
}

fn book_form(p: &BookFormPage) -> Markup {
    let values = p.book.clone().unwrap_or_default();
    layout(
        &p.title,
        html! {
            form method="POST" {
                label for="title" { "Title:" }
                input #title type="text" name="title" placeholder="Name of book"
                    required value=(PreEscaped(&values.title));
                label for="author" { "Author:" }
                select #author name="author" required {
                    option value="" { "--Please select an author--" }
                    @for a in &p.authors {
                        option value=(a.id) selected[values.author == a.id.to_string()] {
                            (PreEscaped(&a.name))
                        }
                    }
                }
                label for="summary" { "Summary:" }
                textarea #summary name="summary" placeholder="Summary" required {
                    (PreEscaped(&values.summary))
                }
                label for="isbn" { "ISBN:" }
                input #isbn type="text" name="isbn" placeholder="ISBN13"
                    required value=(PreEscaped(&values.isbn));
                fieldset {
                    legend { "Genre:" }
                    @for g in &p.genres {
                        input type="checkbox" name="genre" id={ "genre-" (g.id) }
                            value=(g.id) checked[g.checked];
                        label for={ "genre-" (g.id) } { (PreEscaped(&g.name)) }
                    }
                }
                button type="submit" { "Submit" }
            }
            (error_list(&p.errors))
        },
    )
}

fn book_delete(p: &BookDeletePage) -> Markup {
    layout(
        &p.title,
        html! {
            (book_fields(&p.book))
            @if !p.book_instances.is_empty() {
                p { strong { "Delete the following copies before attempting to delete this book." } }
                (copy_rows(&p.book_instances))
            } @else {
                p { "Do you really want to delete this Book?" }
                form method="POST" {
                    input type="hidden" name="bookid" value=(p.book.id);
                    button type="submit" { "Delete" }
                }
            }
        },
    )
}

fn bookinstance_list(p: &BookInstanceListPage) -> Markup {
    layout(
        &p.title,
        html! {
            ul {
                @for c in &p.bookinstance_list {
                    li {
                        a href=(c.url) {
                            @if let Some(book) = &c.book {
                                (PreEscaped(&book.title)) " : "
                            }
                            (PreEscaped(&c.imprint))
                        }
                        " - " (copy_status(c.status.as_str()))
                        @if !c.due_back_formatted.is_empty() {
                            " (Due: " (c.due_back_formatted) ")"
                        }
                    }
                }
                @if p.bookinstance_list.is_empty() {
                    li { "There are no book copies in this library." }
                }
            }
        },
    )
}

fn bookinstance_fields(c: &BookInstanceView) -> Markup {
    html! {
        h2 { "ID: " (c.id) }
        @if let Some(book) = &c.book {
            p { strong { "Title: " } a href=(book.url) { (PreEscaped(&book.title)) } }
        }
        p { strong { "Imprint: " } (PreEscaped(&c.imprint)) }
        p { strong { "Status: " } (copy_status(c.status.as_str())) }
        @if !c.due_back_formatted.is_empty() {
            p { strong { "Due back: " } (c.due_back_formatted) }
        }
    }
}

fn bookinstance_detail(p: &BookInstanceDetailPage) -> Markup {
    layout(
        &p.title,
        html! {
            (bookinstance_fields(&p.bookinstance))
            p {
                a href={ (p.bookinstance.url) "/update" } { "Update copy" }
                " | "
                a href={ (p.bookinstance.url) "/delete" } { "Delete copy" }
            }
        },
    )
}

fn bookinstance_form(p: &BookInstanceFormPage) -> Markup {
    let values = &p.bookinstance;
    layout(
        &p.title,
        html! {
            form method="POST" {
                label for="book" { "Book:" }
                select #book name="book" required {
                    option value="" { "--Please select a book--" }
                    @for b in &p.book_list {
                        option value=(b.id) selected[values.book == b.id.to_string()] {
                            (PreEscaped(&b.title))
                        }
                    }
                }
                label for="imprint" { "Imprint:" }
                input #imprint type="text" name="imprint" placeholder="Publisher and date information"
                    required value=(PreEscaped(&values.imprint));
                label for="due_back" { "Date when book available:" }
                input #due_back type="date" name="due_back" value=(values.due_back);
                label for="status" { "Status:" }
                select #status name="status" required {
                    @for s in p.statuses {
                        option value=(s) selected[values.status == *s] { (s) }
                    }
                }
                button type="submit" { "Submit" }
            }
            (error_list(&p.errors))
        },
    )
}

fn bookinstance_delete(p: &BookInstanceDeletePage) -> Markup {
    layout(
        &p.title,
        html! {
            (bookinstance_fields(&p.bookinstance))
            p { "Do you really want to delete this copy?" }
            form method="POST" {
                input type="hidden" name="bookinstanceid" value=(p.bookinstance.id);
                button type="submit" { "Delete" }
            }
        },
    )
}
