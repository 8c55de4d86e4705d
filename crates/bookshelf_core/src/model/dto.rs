//! Transport objects exchanged with request-handling layers.
//!
//! Field names are camelCase on the wire (`userId`, `pageCount`,
//! `fullName`).

use super::book::BookId;
use super::person::PersonId;
use serde::{Deserialize, Serialize};

/// Book as seen by callers: scalar fields plus the flattened owner id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    /// Absent on create requests.
    #[serde(default)]
    pub id: Option<BookId>,
    pub user_id: PersonId,
    pub title: String,
    pub author: String,
    pub page_count: i64,
}

/// Person as seen by callers. Owned books are queried separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[serde(default)]
    pub id: Option<PersonId>,
    pub full_name: String,
    pub title: String,
    pub age: i64,
}
