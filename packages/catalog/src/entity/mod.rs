pub mod author;
pub mod book;
pub mod book_genre;
pub mod book_instance;
pub mod copy_status;
pub mod genre;

use chrono::NaiveDate;

/// Medium-length display date, e.g. `Jan 5, 1775`.
pub(crate) fn format_medium(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

/// ISO calendar date as used by `<input type="date">`.
pub(crate) fn format_for_form(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
