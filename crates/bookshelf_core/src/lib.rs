//! Core domain logic for bookshelf: persons, the books they own, and the
//! services that keep both sides of that relation in SQLite.

pub mod config;
pub mod db;
pub mod logging;
pub mod mapper;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use mapper::{EntityMapper, FieldMapper};
pub use model::book::{Book, BookId};
pub use model::dto::{BookDto, UserDto};
pub use model::person::{Person, PersonId};
pub use repo::book_repo::{BookRepository, SqliteBookRepository};
pub use repo::transaction::{SqliteTransactionScope, TransactionScope};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{EntityKind, RepoError, RepoResult};
pub use service::book_service::BookService;
pub use service::error::{NotFound, ServiceError, ServiceResult};
pub use service::user_service::UserService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
