//! Book use-case service.
//!
//! # Responsibility
//! - Provide create/update/get/delete entry points for books scoped to a user.
//! - Keep the person/book association in step on create.
//! - Convert stored books to `BookDto` with the owner id flattened in.
//!
//! # Invariants
//! - Every returned `BookDto::user_id` is the id of the person looked up by
//!   the same call (`get_book_by_id` uses the stored owner instead).
//! - `create_book` writes the book and the re-linked person in one
//!   `TransactionScope` unit.
//! - Owner-scoped listings come from `BookRepository::get_books_by_user_id`,
//!   never from `Person::books`.

use crate::mapper::{EntityMapper, FieldMapper};
use crate::model::book::{Book, BookId};
use crate::model::dto::BookDto;
use crate::model::person::{Person, PersonId};
use crate::repo::book_repo::BookRepository;
use crate::repo::transaction::TransactionScope;
use crate::repo::user_repo::UserRepository;
use crate::repo::{EntityKind, RepoError};
use crate::service::error::{NotFound, ServiceError, ServiceResult};
use log::{info, warn};

/// Book service over user/book stores, a transaction scope and a mapper.
pub struct BookService<U, B, S, M = FieldMapper>
where
    U: UserRepository,
    B: BookRepository,
    S: TransactionScope,
    M: EntityMapper,
{
    users: U,
    books: B,
    scope: S,
    mapper: M,
}

impl<U, B, S> BookService<U, B, S, FieldMapper>
where
    U: UserRepository,
    B: BookRepository,
    S: TransactionScope,
{
    /// Creates a service with the field-by-field mapper.
    pub fn new(users: U, books: B, scope: S) -> Self {
        Self::with_mapper(users, books, scope, FieldMapper)
    }
}

impl<U, B, S, M> BookService<U, B, S, M>
where
    U: UserRepository,
    B: BookRepository,
    S: TransactionScope,
    M: EntityMapper,
{
    pub fn with_mapper(users: U, books: B, scope: S, mapper: M) -> Self {
        Self {
            users,
            books,
            scope,
            mapper,
        }
    }

    /// Creates a book owned by `dto.user_id`.
    ///
    /// # Contract
    /// - Fails with `User not found` before any write when the owner is missing.
    /// - `dto.id` is ignored; the store assigns the id.
    /// - The book insert and the owner re-save commit together or not at all.
    pub fn create_book(&self, dto: &BookDto) -> ServiceResult<BookDto> {
        let owner = self.find_user("book_create", dto.user_id)?;

        let saved = self.scope.in_transaction(|| -> ServiceResult<Book> {
            let mut owner = owner;
            let mut book = self.mapper.book_dto_to_book(dto);
            book.id = None;
            book.set_owner(&owner);

            let saved = self.books.save(&book)?;
            let book_id = saved.id.ok_or(RepoError::Unsaved(EntityKind::Book))?;
            owner.add_book(book_id);
            self.users.save(&owner)?;
            Ok(saved)
        })?;

        info!(
            "event=book_create module=service status=ok book_id={} user_id={}",
            saved.id.unwrap_or_default(),
            dto.user_id
        );
        Ok(self.to_dto(&saved, dto.user_id))
    }

    /// Overwrites title/author/page count of book `dto.id`.
    ///
    /// # Contract
    /// - Both `dto.user_id` and `dto.id` must exist (user checked first).
    /// - The stored owner never changes.
    /// - The returned `user_id` is `dto.user_id`, even when it differs from
    ///   the stored owner.
    pub fn update_book(&self, dto: &BookDto) -> ServiceResult<BookDto> {
        self.find_user("book_update", dto.user_id)?;
        let Some(book_id) = dto.id else {
            warn!("event=book_update module=service status=error error_code=book_id_missing");
            return Err(NotFound::Book.into());
        };
        let mut book = self.find_book("book_update", book_id)?;

        book.title = dto.title.clone();
        book.author = dto.author.clone();
        book.page_count = dto.page_count;
        let saved = self.books.save(&book)?;

        info!(
            "event=book_update module=service status=ok book_id={} user_id={}",
            book_id, dto.user_id
        );
        Ok(self.to_dto(&saved, dto.user_id))
    }

    /// Gets one book with its stored owner id.
    pub fn get_book_by_id(&self, id: BookId) -> ServiceResult<BookDto> {
        let book = self.find_book("book_get", id)?;
        let owner_id = book.person_id.ok_or(RepoError::MissingOwner)?;

        info!(
            "event=book_get module=service status=ok book_id={} user_id={}",
            id, owner_id
        );
        Ok(self.to_dto(&book, owner_id))
    }

    /// Hard-deletes one book. The owner row is left untouched.
    pub fn delete_book_by_id(&self, id: BookId) -> ServiceResult<()> {
        let book = self.find_book("book_delete", id)?;
        self.books.delete(&book)?;

        info!("event=book_delete module=service status=ok book_id={id}");
        Ok(())
    }

    /// Lists ids of books owned by `user_id`, in store order.
    ///
    /// An existing user without books yields an empty list.
    pub fn get_books_id_by_user_id(&self, user_id: PersonId) -> ServiceResult<Vec<BookId>> {
        let books = self.owned_books("book_ids_by_user", user_id)?;
        let ids = books.iter().filter_map(|book| book.id).collect::<Vec<_>>();

        info!(
            "event=book_ids_by_user module=service status=ok user_id={} count={}",
            user_id,
            ids.len()
        );
        Ok(ids)
    }

    /// Lists books owned by `user_id`, in store order.
    pub fn get_books_by_user_id(&self, user_id: PersonId) -> ServiceResult<Vec<BookDto>> {
        let books = self.owned_books("books_by_user", user_id)?;
        let dtos = books
            .iter()
            .filter(|book| book.id.is_some())
            .map(|book| self.to_dto(book, user_id))
            .collect::<Vec<_>>();

        info!(
            "event=books_by_user module=service status=ok user_id={} count={}",
            user_id,
            dtos.len()
        );
        Ok(dtos)
    }

    fn owned_books(&self, event: &'static str, user_id: PersonId) -> ServiceResult<Vec<Book>> {
        self.find_user(event, user_id)?;
        match self.books.get_books_by_user_id(user_id)? {
            Some(books) => Ok(books),
            None => {
                warn!(
                    "event={event} module=service status=error error_code=books_not_found user_id={user_id}"
                );
                Err(NotFound::Books.into())
            }
        }
    }

    fn find_user(&self, event: &'static str, id: PersonId) -> ServiceResult<Person> {
        match self.users.find_by_id(id)? {
            Some(person) => Ok(person),
            None => {
                warn!("event={event} module=service status=error error_code=user_not_found user_id={id}");
                Err(ServiceError::NotFound(NotFound::User))
            }
        }
    }

    fn find_book(&self, event: &'static str, id: BookId) -> ServiceResult<Book> {
        match self.books.find_by_id(id)? {
            Some(book) => Ok(book),
            None => {
                warn!("event={event} module=service status=error error_code=book_not_found book_id={id}");
                Err(ServiceError::NotFound(NotFound::Book))
            }
        }
    }

    fn to_dto(&self, book: &Book, user_id: PersonId) -> BookDto {
        let mut dto = self.mapper.book_to_book_dto(book);
        dto.user_id = user_id;
        dto
    }
}
