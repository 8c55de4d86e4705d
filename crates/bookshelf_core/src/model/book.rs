//! Book entity.

use super::person::{Person, PersonId};

/// Store-assigned identity of a book row.
pub type BookId = i64;

/// Book row with a back-reference to its owning person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: Option<BookId>,
    /// Owning person. Required before the book can be saved.
    pub person_id: Option<PersonId>,
    pub title: String,
    pub author: String,
    pub page_count: i64,
}

impl Book {
    /// Creates an unsaved, unowned book.
    pub fn new(title: impl Into<String>, author: impl Into<String>, page_count: i64) -> Self {
        Self {
            id: None,
            person_id: None,
            title: title.into(),
            author: author.into(),
            page_count,
        }
    }

    /// Points the back-reference at `owner`.
    pub fn set_owner(&mut self, owner: &Person) {
        self.person_id = owner.id;
    }
}
