//! In-memory book collection.

use folio_http::error::AppError;
use parking_lot::RwLock;
use serde_json::json;
use thiserror::Error;

use super::models::{Book, CreateBook, UpdateBook};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BookError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("book {0} not found")]
    NotFound(u32),
}

impl From<BookError> for AppError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::MissingFields(fields) => AppError::validation(
                fields
                    .into_iter()
                    .map(|field| json!({ "field": field, "error": "required" }))
                    .collect(),
                "Title and author are required.",
            ),
            BookError::NotFound(_) => AppError::not_found("Book not found."),
        }
    }
}

/// Owns every [`Book`]. Each operation holds the lock for its whole
/// read-modify-write, so concurrent requests never interleave.
pub struct BookStore {
    books: RwLock<Vec<Book>>,
}

impl BookStore {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }

    /// Store holding the two demo records.
    pub fn seeded() -> Self {
        Self::new(vec![
            Book::new(1, "1984", "George Orwell"),
            Book::new(2, "The Great Gatsby", "F. Scott Fitzgerald"),
        ])
    }

    /// All books in insertion order.
    pub fn list(&self) -> Vec<Book> {
        self.books.read().clone()
    }

    pub fn len(&self) -> usize {
        self.books.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.read().is_empty()
    }

    /// Append a book with the next id after the highest one in use.
    ///
    /// Ids are never reused while a record holds them; deleting the newest
    /// record frees its id for the next create.
    pub fn create(&self, request: CreateBook) -> Result<Book, BookError> {
        let title = request.title.filter(|title| !title.is_empty());
        let author = request.author.filter(|author| !author.is_empty());

        let (title, author) = match (title, author) {
            (Some(title), Some(author)) => (title, author),
            (title, author) => {
                let mut missing = Vec::new();
                if title.is_none() {
                    missing.push("title");
                }
                if author.is_none() {
                    missing.push("author");
                }
                return Err(BookError::MissingFields(missing));
            }
        };

        let mut books = self.books.write();
        let id = books
            .iter()
            .map(|book| book.id)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        let book = Book { id, title, author };
        books.push(book.clone());
        Ok(book)
    }

    /// First book with `id`.
    pub fn read(&self, id: u32) -> Result<Book, BookError> {
        self.books
            .read()
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or(BookError::NotFound(id))
    }

    pub fn update(&self, id: u32, patch: UpdateBook) -> Result<Book, BookError> {
        let mut books = self.books.write();
        let book = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or(BookError::NotFound(id))?;

        if let Some(title) = patch.title.filter(|title| !title.is_empty()) {
            book.title = title;
        }
        if let Some(author) = patch.author.filter(|author| !author.is_empty()) {
            book.author = author;
        }

        Ok(book.clone())
    }

    /// Remove and return the first book with `id`.
    pub fn delete(&self, id: u32) -> Result<Book, BookError> {
        let mut books = self.books.write();
        let index = books
            .iter()
            .position(|book| book.id == id)
            .ok_or(BookError::NotFound(id))?;
        Ok(books.remove(index))
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::seeded()
    }
}
