pub mod json_store;

pub use json_store::{load_books_from_file, save_books_to_file, BooksStore};
