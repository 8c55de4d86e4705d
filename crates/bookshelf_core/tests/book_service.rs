use bookshelf_core::db::open_db_in_memory;
use bookshelf_core::{
    Book, BookDto, BookId, BookRepository, BookService, NotFound, Person, PersonId, RepoError,
    RepoResult, ServiceError, SqliteBookRepository, SqliteTransactionScope, SqliteUserRepository,
    UserDto, UserRepository, UserService,
};
use rusqlite::Connection;

type SqliteBookService<'conn> = BookService<
    SqliteUserRepository<'conn>,
    SqliteBookRepository<'conn>,
    SqliteTransactionScope<'conn>,
>;

fn book_service(conn: &Connection) -> SqliteBookService<'_> {
    BookService::new(
        SqliteUserRepository::try_new(conn).unwrap(),
        SqliteBookRepository::try_new(conn).unwrap(),
        SqliteTransactionScope::new(conn),
    )
}

fn seed_user(conn: &Connection, full_name: &str) -> PersonId {
    let users = UserService::new(SqliteUserRepository::try_new(conn).unwrap());
    users
        .create_user(&UserDto {
            id: None,
            full_name: full_name.to_string(),
            title: "reader".to_string(),
            age: 30,
        })
        .unwrap()
        .id
        .unwrap()
}

fn book_request(user_id: PersonId, title: &str) -> BookDto {
    BookDto {
        id: None,
        user_id,
        title: title.to_string(),
        author: "A".to_string(),
        page_count: 100,
    }
}

fn count_books(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM books;", [], |row| row.get(0))
        .unwrap()
}

fn assert_not_found(err: ServiceError, expected: NotFound) {
    match err {
        ServiceError::NotFound(kind) => assert_eq!(kind, expected),
        other => panic!("expected {expected:?}, got {other}"),
    }
}

#[test]
fn create_get_delete_scenario() {
    let conn = open_db_in_memory().unwrap();
    let user_id = seed_user(&conn, "Ann");
    let service = book_service(&conn);

    let created = service.create_book(&book_request(user_id, "T")).unwrap();
    let book_id = created.id.expect("created book should carry generated id");
    assert_eq!(
        created,
        BookDto {
            id: Some(book_id),
            user_id,
            title: "T".to_string(),
            author: "A".to_string(),
            page_count: 100,
        }
    );

    assert_eq!(service.get_book_by_id(book_id).unwrap(), created);

    service.delete_book_by_id(book_id).unwrap();
    let err = service.get_book_by_id(book_id).unwrap_err();
    assert_eq!(err.to_string(), "Book not found");
}

#[test]
fn create_links_book_to_owner_collection() {
    let conn = open_db_in_memory().unwrap();
    let user_id = seed_user(&conn, "Ann");
    let service = book_service(&conn);

    let created = service.create_book(&book_request(user_id, "T")).unwrap();

    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let owner = users.find_by_id(user_id).unwrap().unwrap();
    assert_eq!(owner.books, vec![created.id.unwrap()]);
}

#[test]
fn create_ignores_caller_supplied_id() {
    let conn = open_db_in_memory().unwrap();
    let user_id = seed_user(&conn, "Ann");
    let service = book_service(&conn);

    let mut request = book_request(user_id, "T");
    request.id = Some(9_999);
    let created = service.create_book(&request).unwrap();

    assert_ne!(created.id, Some(9_999));
    assert_eq!(count_books(&conn), 1);
}

#[test]
fn create_with_unknown_user_writes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = book_service(&conn);

    let err = service.create_book(&book_request(42, "T")).unwrap_err();
    assert_eq!(err.to_string(), "User not found");
    assert_eq!(count_books(&conn), 0);
}

#[test]
fn update_then_read_returns_new_fields_and_keeps_owner() {
    let conn = open_db_in_memory().unwrap();
    let user_id = seed_user(&conn, "Ann");
    let service = book_service(&conn);
    let created = service.create_book(&book_request(user_id, "Draft")).unwrap();

    let updated = service
        .update_book(&BookDto {
            id: created.id,
            user_id,
            title: "Final".to_string(),
            author: "B".to_string(),
            page_count: 250,
        })
        .unwrap();
    assert_eq!(updated.title, "Final");

    let read = service.get_book_by_id(created.id.unwrap()).unwrap();
    assert_eq!(read.title, "Final");
    assert_eq!(read.author, "B");
    assert_eq!(read.page_count, 250);
    assert_eq!(read.user_id, user_id);
}

#[test]
fn update_reports_requested_user_not_stored_owner() {
    let conn = open_db_in_memory().unwrap();
    let owner_id = seed_user(&conn, "Owner");
    let other_id = seed_user(&conn, "Other");
    let service = book_service(&conn);
    let created = service.create_book(&book_request(owner_id, "T")).unwrap();

    let mut request = created.clone();
    request.user_id = other_id;
    let updated = service.update_book(&request).unwrap();

    assert_eq!(updated.user_id, other_id);
    let stored = service.get_book_by_id(created.id.unwrap()).unwrap();
    assert_eq!(stored.user_id, owner_id);
}

#[test]
fn update_checks_user_before_book() {
    let conn = open_db_in_memory().unwrap();
    let user_id = seed_user(&conn, "Ann");
    let service = book_service(&conn);

    let mut request = book_request(user_id + 100, "T");
    request.id = Some(1);
    assert_not_found(service.update_book(&request).unwrap_err(), NotFound::User);

    request.user_id = user_id;
    assert_not_found(service.update_book(&request).unwrap_err(), NotFound::Book);

    request.id = None;
    assert_not_found(service.update_book(&request).unwrap_err(), NotFound::Book);
}

#[test]
fn delete_missing_book_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = book_service(&conn);

    assert_not_found(service.delete_book_by_id(5).unwrap_err(), NotFound::Book);
}

#[test]
fn delete_keeps_owner() {
    let conn = open_db_in_memory().unwrap();
    let user_id = seed_user(&conn, "Ann");
    let service = book_service(&conn);
    let created = service.create_book(&book_request(user_id, "T")).unwrap();

    service.delete_book_by_id(created.id.unwrap()).unwrap();

    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let owner = users.find_by_id(user_id).unwrap().unwrap();
    assert!(owner.books.is_empty());
}

#[test]
fn owner_scoped_listings_return_only_owned_books_in_store_order() {
    let conn = open_db_in_memory().unwrap();
    let ann = seed_user(&conn, "Ann");
    let bob = seed_user(&conn, "Bob");
    let service = book_service(&conn);

    let first = service.create_book(&book_request(ann, "First")).unwrap();
    service.create_book(&book_request(bob, "Elsewhere")).unwrap();
    let second = service.create_book(&book_request(ann, "Second")).unwrap();

    let ids = service.get_books_id_by_user_id(ann).unwrap();
    assert_eq!(ids, vec![first.id.unwrap(), second.id.unwrap()]);

    let books = service.get_books_by_user_id(ann).unwrap();
    assert_eq!(books, vec![first, second]);
    assert!(books.iter().all(|book| book.user_id == ann));
}

#[test]
fn owner_without_books_yields_empty_listings() {
    let conn = open_db_in_memory().unwrap();
    let user_id = seed_user(&conn, "Ann");
    let service = book_service(&conn);

    assert!(service.get_books_id_by_user_id(user_id).unwrap().is_empty());
    assert!(service.get_books_by_user_id(user_id).unwrap().is_empty());
}

#[test]
fn owner_scoped_listings_require_user() {
    let conn = open_db_in_memory().unwrap();
    let service = book_service(&conn);

    assert_not_found(service.get_books_id_by_user_id(3).unwrap_err(), NotFound::User);
    assert_not_found(service.get_books_by_user_id(3).unwrap_err(), NotFound::User);
}

/// User store whose `save` always fails, to observe the rollback of the
/// book insert that precedes it.
struct FailingSaveUsers<'conn> {
    inner: SqliteUserRepository<'conn>,
}

impl UserRepository for FailingSaveUsers<'_> {
    fn find_by_id(&self, id: PersonId) -> RepoResult<Option<Person>> {
        self.inner.find_by_id(id)
    }

    fn save(&self, _person: &Person) -> RepoResult<Person> {
        Err(RepoError::MissingOwner)
    }

    fn delete(&self, person: &Person) -> RepoResult<()> {
        self.inner.delete(person)
    }
}

#[test]
fn failed_owner_save_rolls_back_book_insert() {
    let conn = open_db_in_memory().unwrap();
    let user_id = seed_user(&conn, "Ann");
    let service = BookService::new(
        FailingSaveUsers {
            inner: SqliteUserRepository::try_new(&conn).unwrap(),
        },
        SqliteBookRepository::try_new(&conn).unwrap(),
        SqliteTransactionScope::new(&conn),
    );

    let err = service.create_book(&book_request(user_id, "T")).unwrap_err();
    assert!(matches!(err, ServiceError::Repo(RepoError::MissingOwner)));
    assert_eq!(count_books(&conn), 0);
}

/// Book store that knows the books but never resolves an owner-scoped listing.
struct UnknownOwnerBooks<'conn> {
    inner: SqliteBookRepository<'conn>,
}

impl BookRepository for UnknownOwnerBooks<'_> {
    fn find_by_id(&self, id: BookId) -> RepoResult<Option<Book>> {
        self.inner.find_by_id(id)
    }

    fn save(&self, book: &Book) -> RepoResult<Book> {
        self.inner.save(book)
    }

    fn delete(&self, book: &Book) -> RepoResult<()> {
        self.inner.delete(book)
    }

    fn get_books_by_user_id(&self, _user_id: PersonId) -> RepoResult<Option<Vec<Book>>> {
        Ok(None)
    }
}

#[test]
fn owner_scoped_listings_report_books_not_found_for_missing_listing() {
    let conn = open_db_in_memory().unwrap();
    let user_id = seed_user(&conn, "Ann");
    let service = BookService::new(
        SqliteUserRepository::try_new(&conn).unwrap(),
        UnknownOwnerBooks {
            inner: SqliteBookRepository::try_new(&conn).unwrap(),
        },
        SqliteTransactionScope::new(&conn),
    );
    service.create_book(&book_request(user_id, "T")).unwrap();

    let err = service.get_books_id_by_user_id(user_id).unwrap_err();
    assert_eq!(err.to_string(), "Books not found");
    assert_not_found(err, NotFound::Books);
    assert_not_found(
        service.get_books_by_user_id(user_id).unwrap_err(),
        NotFound::Books,
    );
}
