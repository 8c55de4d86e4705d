//! Person (user) repository contract and SQLite implementation.
//!
//! # Invariants
//! - `find_by_id` fills `Person::books` from the `books` table, ordered by id.
//! - `save` re-links every listed book to the person inside one savepoint.

use crate::db::SavepointGuard;
use crate::model::book::BookId;
use crate::model::person::{Person, PersonId};
use crate::repo::{ensure_connection_ready, EntityKind, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

const PERSON_COLUMNS: &[&str] = &["id", "full_name", "title", "age", "updated_at"];
const SAVE_SAVEPOINT: &str = "person_save";

/// Store contract for persons (the user store).
pub trait UserRepository {
    fn find_by_id(&self, id: PersonId) -> RepoResult<Option<Person>>;
    /// Inserts when `person.id` is `None`, updates otherwise. Returns the
    /// stored state including the generated id.
    fn save(&self, person: &Person) -> RepoResult<Person>;
    /// Deletes the person row. Owned books go with it.
    fn delete(&self, person: &Person) -> RepoResult<()>;
}

/// SQLite-backed person repository.
#[derive(Clone, Copy)]
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "persons", PERSON_COLUMNS)?;
        Ok(Self { conn })
    }

    fn insert_row(&self, person: &Person) -> RepoResult<PersonId> {
        self.conn.execute(
            "INSERT INTO persons (full_name, title, age) VALUES (?1, ?2, ?3);",
            params![person.full_name, person.title, person.age],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_row(&self, id: PersonId, person: &Person) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE persons
             SET
                full_name = ?2,
                title = ?3,
                age = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![id, person.full_name, person.title, person.age],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Person,
                id,
            });
        }
        Ok(())
    }

    fn link_books(&self, id: PersonId, books: &[BookId]) -> RepoResult<()> {
        let linked = self.load_book_ids(id)?;
        let pending = pending_links(&linked, books);
        if pending.is_empty() {
            return Ok(());
        }

        let mut stmt = self.conn.prepare(
            "UPDATE books
             SET
                person_id = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?2;",
        )?;
        for book_id in pending {
            if stmt.execute(params![id, book_id])? == 0 {
                return Err(RepoError::NotFound {
                    entity: EntityKind::Book,
                    id: book_id,
                });
            }
        }
        Ok(())
    }

    fn load_book_ids(&self, id: PersonId) -> RepoResult<Vec<BookId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM books WHERE person_id = ?1 ORDER BY id ASC;")?;
        let ids = stmt
            .query_map([id], |row| row.get::<_, BookId>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn find_by_id(&self, id: PersonId) -> RepoResult<Option<Person>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, full_name, title, age FROM persons WHERE id = ?1;",
                [id],
                |row| {
                    Ok(Person {
                        id: Some(row.get("id")?),
                        full_name: row.get("full_name")?,
                        title: row.get("title")?,
                        age: row.get("age")?,
                        books: Vec::new(),
                    })
                },
            )
            .optional()?;

        match row {
            Some(mut person) => {
                person.books = self.load_book_ids(id)?;
                Ok(Some(person))
            }
            None => Ok(None),
        }
    }

    fn save(&self, person: &Person) -> RepoResult<Person> {
        let guard = SavepointGuard::begin(self.conn, SAVE_SAVEPOINT)?;

        let id = match person.id {
            Some(id) => {
                self.update_row(id, person)?;
                id
            }
            None => self.insert_row(person)?,
        };
        self.link_books(id, &person.books)?;
        let saved = self.find_by_id(id)?.ok_or(RepoError::NotFound {
            entity: EntityKind::Person,
            id,
        })?;

        guard.release()?;
        Ok(saved)
    }

    fn delete(&self, person: &Person) -> RepoResult<()> {
        let id = person.id.ok_or(RepoError::Unsaved(EntityKind::Person))?;
        let changed = self
            .conn
            .execute("DELETE FROM persons WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Person,
                id,
            });
        }
        Ok(())
    }
}

/// Listed book ids not yet owned by the person, in listing order.
fn pending_links(linked: &[BookId], listed: &[BookId]) -> Vec<BookId> {
    let mut pending = Vec::new();
    for &book_id in listed {
        if !linked.contains(&book_id) && !pending.contains(&book_id) {
            pending.push(book_id);
        }
    }
    pending
}
