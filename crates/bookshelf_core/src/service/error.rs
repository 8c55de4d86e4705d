//! Service error shared by book and user use-cases.

use crate::repo::{EntityKind, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// What a failed existence check was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFound {
    User,
    Book,
    /// Owner-scoped book lookup returned nothing.
    Books,
}

impl NotFound {
    pub fn message(self) -> &'static str {
        match self {
            Self::User => "User not found",
            Self::Book => "Book not found",
            Self::Books => "Books not found",
        }
    }
}

#[derive(Debug)]
pub enum ServiceError {
    NotFound(NotFound),
    Repo(RepoError),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(kind) => f.write_str(kind.message()),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<NotFound> for ServiceError {
    fn from(value: NotFound) -> Self {
        Self::NotFound(value)
    }
}

impl From<RepoError> for ServiceError {
    /// Rows that vanish between lookup and write read as the same miss the
    /// lookup would have reported.
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                entity: EntityKind::Person,
                ..
            } => Self::NotFound(NotFound::User),
            RepoError::NotFound {
                entity: EntityKind::Book,
                ..
            } => Self::NotFound(NotFound::Book),
            other => Self::Repo(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NotFound, ServiceError};
    use crate::repo::{EntityKind, RepoError};

    #[test]
    fn not_found_displays_plain_message() {
        assert_eq!(ServiceError::from(NotFound::User).to_string(), "User not found");
        assert_eq!(ServiceError::from(NotFound::Book).to_string(), "Book not found");
        assert_eq!(ServiceError::from(NotFound::Books).to_string(), "Books not found");
    }

    #[test]
    fn repo_not_found_maps_to_service_not_found() {
        let err = ServiceError::from(RepoError::NotFound {
            entity: EntityKind::Book,
            id: 5,
        });
        assert!(matches!(err, ServiceError::NotFound(NotFound::Book)));

        let err = ServiceError::from(RepoError::MissingOwner);
        assert!(matches!(err, ServiceError::Repo(RepoError::MissingOwner)));
        assert!(!err.is_not_found());
    }
}
