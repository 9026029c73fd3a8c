pub mod form;
pub mod path;
