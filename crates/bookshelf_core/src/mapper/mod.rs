//! Entity <-> transport conversion.
//!
//! The book mapping copies scalar fields only. The owner link is the
//! caller's concern: `book_dto_to_book` leaves `person_id` unset and
//! `book_to_book_dto` reports `0` for an unowned book.

use crate::model::book::Book;
use crate::model::dto::{BookDto, UserDto};
use crate::model::person::Person;

/// Converts between persistence entities and transport objects.
pub trait EntityMapper {
    fn book_dto_to_book(&self, dto: &BookDto) -> Book;
    fn book_to_book_dto(&self, book: &Book) -> BookDto;
    fn user_dto_to_person(&self, dto: &UserDto) -> Person;
    fn person_to_user_dto(&self, person: &Person) -> UserDto;
}

/// Field-by-field mapper used by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldMapper;

impl EntityMapper for FieldMapper {
    fn book_dto_to_book(&self, dto: &BookDto) -> Book {
        Book {
            id: dto.id,
            person_id: None,
            title: dto.title.clone(),
            author: dto.author.clone(),
            page_count: dto.page_count,
        }
    }

    fn book_to_book_dto(&self, book: &Book) -> BookDto {
        BookDto {
            id: book.id,
            user_id: book.person_id.unwrap_or_default(),
            title: book.title.clone(),
            author: book.author.clone(),
            page_count: book.page_count,
        }
    }

    fn user_dto_to_person(&self, dto: &UserDto) -> Person {
        Person {
            id: dto.id,
            full_name: dto.full_name.clone(),
            title: dto.title.clone(),
            age: dto.age,
            books: Vec::new(),
        }
    }

    fn person_to_user_dto(&self, person: &Person) -> UserDto {
        UserDto {
            id: person.id,
            full_name: person.full_name.clone(),
            title: person.title.clone(),
            age: person.age,
        }
    }
}
