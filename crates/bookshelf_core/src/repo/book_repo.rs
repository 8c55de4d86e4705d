//! Book repository contract and SQLite implementation.
//!
//! # Invariants
//! - A book is never written without `person_id`.
//! - Owner-scoped listing is answered by the `books` table alone and
//!   returned in ascending id order.

use crate::model::book::{Book, BookId};
use crate::model::person::PersonId;
use crate::repo::{ensure_connection_ready, EntityKind, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const BOOK_COLUMNS: &[&str] = &["id", "person_id", "title", "author", "page_count", "updated_at"];

const BOOK_SELECT_SQL: &str = "SELECT
    id,
    person_id,
    title,
    author,
    page_count
FROM books";

/// Store contract for books (the book store).
pub trait BookRepository {
    fn find_by_id(&self, id: BookId) -> RepoResult<Option<Book>>;
    /// Inserts when `book.id` is `None`, updates otherwise.
    fn save(&self, book: &Book) -> RepoResult<Book>;
    fn delete(&self, book: &Book) -> RepoResult<()>;
    /// Books owned by `user_id`.
    ///
    /// `None` when the store does not know the owner; `Some` (possibly
    /// empty) otherwise.
    fn get_books_by_user_id(&self, user_id: PersonId) -> RepoResult<Option<Vec<Book>>>;
}

/// SQLite-backed book repository.
#[derive(Clone, Copy)]
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "books", BOOK_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn find_by_id(&self, id: BookId) -> RepoResult<Option<Book>> {
        let book = self
            .conn
            .query_row(&format!("{BOOK_SELECT_SQL} WHERE id = ?1;"), [id], parse_book_row)
            .optional()?;
        Ok(book)
    }

    fn save(&self, book: &Book) -> RepoResult<Book> {
        let person_id = book.person_id.ok_or(RepoError::MissingOwner)?;

        let id = match book.id {
            Some(id) => {
                let changed = self.conn.execute(
                    "UPDATE books
                     SET
                        person_id = ?2,
                        title = ?3,
                        author = ?4,
                        page_count = ?5,
                        updated_at = (strftime('%s', 'now') * 1000)
                     WHERE id = ?1;",
                    params![id, person_id, book.title, book.author, book.page_count],
                )?;
                if changed == 0 {
                    return Err(RepoError::NotFound {
                        entity: EntityKind::Book,
                        id,
                    });
                }
                id
            }
            None => {
                self.conn.execute(
                    "INSERT INTO books (person_id, title, author, page_count)
                     VALUES (?1, ?2, ?3, ?4);",
                    params![person_id, book.title, book.author, book.page_count],
                )?;
                self.conn.last_insert_rowid()
            }
        };

        Ok(Book {
            id: Some(id),
            ..book.clone()
        })
    }

    fn delete(&self, book: &Book) -> RepoResult<()> {
        let id = book.id.ok_or(RepoError::Unsaved(EntityKind::Book))?;
        let changed = self.conn.execute("DELETE FROM books WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Book,
                id,
            });
        }
        Ok(())
    }

    fn get_books_by_user_id(&self, user_id: PersonId) -> RepoResult<Option<Vec<Book>>> {
        let owner_known: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM persons WHERE id = ?1);",
            [user_id],
            |row| row.get(0),
        )?;
        if owner_known == 0 {
            return Ok(None);
        }

        let mut stmt = self.conn.prepare(&format!(
            "{BOOK_SELECT_SQL} WHERE person_id = ?1 ORDER BY id ASC;"
        ))?;
        let books = stmt
            .query_map([user_id], parse_book_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(books))
    }
}

fn parse_book_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: Some(row.get("id")?),
        person_id: Some(row.get("person_id")?),
        title: row.get("title")?,
        author: row.get("author")?,
        page_count: row.get("page_count")?,
    })
}
