//! Person (user) entity.

use super::book::BookId;

/// Store-assigned identity of a person row.
pub type PersonId = i64;

/// Owner of zero or more books.
///
/// `books` mirrors the owner side of the person/book relation. Loading a
/// person from the store fills it from the `books` table; saving a person
/// re-links every listed book to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: Option<PersonId>,
    pub full_name: String,
    pub title: String,
    pub age: i64,
    /// Ids of owned books. Order carries no meaning.
    pub books: Vec<BookId>,
}

impl Person {
    /// Creates an unsaved person with no books.
    pub fn new(full_name: impl Into<String>, title: impl Into<String>, age: i64) -> Self {
        Self {
            id: None,
            full_name: full_name.into(),
            title: title.into(),
            age,
            books: Vec::new(),
        }
    }

    /// Adds a book reference to the owned collection.
    ///
    /// Returns `false` when the book was already listed.
    pub fn add_book(&mut self, book_id: BookId) -> bool {
        if self.owns_book(book_id) {
            return false;
        }
        self.books.push(book_id);
        true
    }

    pub fn owns_book(&self, book_id: BookId) -> bool {
        self.books.contains(&book_id)
    }
}
