//! User use-case service.
//!
//! Seeds and maintains the persons that own books. Deleting a user removes
//! its books through the store's cascade.

use crate::mapper::{EntityMapper, FieldMapper};
use crate::model::dto::UserDto;
use crate::model::person::{Person, PersonId};
use crate::repo::user_repo::UserRepository;
use crate::service::error::{NotFound, ServiceError, ServiceResult};
use log::{info, warn};

/// User service over a user store and a mapper.
pub struct UserService<U: UserRepository, M: EntityMapper = FieldMapper> {
    users: U,
    mapper: M,
}

impl<U: UserRepository> UserService<U, FieldMapper> {
    pub fn new(users: U) -> Self {
        Self::with_mapper(users, FieldMapper)
    }
}

impl<U: UserRepository, M: EntityMapper> UserService<U, M> {
    pub fn with_mapper(users: U, mapper: M) -> Self {
        Self { users, mapper }
    }

    /// Creates a user; `dto.id` is ignored.
    pub fn create_user(&self, dto: &UserDto) -> ServiceResult<UserDto> {
        let mut person = self.mapper.user_dto_to_person(dto);
        person.id = None;
        let saved = self.users.save(&person)?;

        info!(
            "event=user_create module=service status=ok user_id={}",
            saved.id.unwrap_or_default()
        );
        Ok(self.mapper.person_to_user_dto(&saved))
    }

    /// Overwrites name/title/age of user `dto.id`. Owned books are kept.
    pub fn update_user(&self, dto: &UserDto) -> ServiceResult<UserDto> {
        let Some(id) = dto.id else {
            warn!("event=user_update module=service status=error error_code=user_id_missing");
            return Err(NotFound::User.into());
        };
        let mut person = self.find_user("user_update", id)?;

        person.full_name = dto.full_name.clone();
        person.title = dto.title.clone();
        person.age = dto.age;
        let saved = self.users.save(&person)?;

        info!("event=user_update module=service status=ok user_id={id}");
        Ok(self.mapper.person_to_user_dto(&saved))
    }

    pub fn get_user_by_id(&self, id: PersonId) -> ServiceResult<UserDto> {
        let person = self.find_user("user_get", id)?;

        info!(
            "event=user_get module=service status=ok user_id={} book_count={}",
            id,
            person.books.len()
        );
        Ok(self.mapper.person_to_user_dto(&person))
    }

    /// Deletes the user and, by cascade, every book it owns.
    pub fn delete_user_by_id(&self, id: PersonId) -> ServiceResult<()> {
        let person = self.find_user("user_delete", id)?;
        self.users.delete(&person)?;

        info!(
            "event=user_delete module=service status=ok user_id={} cascaded_books={}",
            id,
            person.books.len()
        );
        Ok(())
    }

    fn find_user(&self, event: &'static str, id: PersonId) -> ServiceResult<Person> {
        self.users.find_by_id(id)?.ok_or_else(|| {
            warn!("event={event} module=service status=error error_code=user_not_found user_id={id}");
            ServiceError::NotFound(NotFound::User)
        })
    }
}
