use bookshelf_core::{BookDto, UserDto};
use serde_json::json;

#[test]
fn book_dto_uses_camel_case_fields() {
    let dto = BookDto {
        id: Some(7),
        user_id: 1,
        title: "T".to_string(),
        author: "A".to_string(),
        page_count: 100,
    };

    assert_eq!(
        serde_json::to_value(&dto).unwrap(),
        json!({"id": 7, "userId": 1, "title": "T", "author": "A", "pageCount": 100})
    );
}

#[test]
fn create_requests_may_omit_id() {
    let book: BookDto = serde_json::from_value(
        json!({"userId": 1, "title": "T", "author": "A", "pageCount": 100}),
    )
    .unwrap();
    assert_eq!(book.id, None);

    let user: UserDto =
        serde_json::from_value(json!({"fullName": "Ann", "title": "reader", "age": 30})).unwrap();
    assert_eq!(user.id, None);
    assert_eq!(user.full_name, "Ann");
}
