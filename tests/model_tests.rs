//! Unit tests for the user model and its validation.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::json;

use users_api::AppError;
use users_api::models::{NewUser, User, UserInput};

#[test]
fn test_user_serializes_camel_case() {
    let user = User {
        id: 3,
        user_name: "Alice".to_string(),
        user_age: 30,
    };

    let value = serde_json::to_value(&user).expect("Serialization failed");
    assert_eq!(value, json!({"id": 3, "userName": "Alice", "userAge": 30}));
}

#[test]
fn test_user_location() {
    let user = User {
        id: 12,
        user_name: "Bob".to_string(),
        user_age: 25,
    };
    assert_eq!(user.location(), "/users/12");
}

#[test]
fn test_input_deserializes_and_ignores_id() {
    let input: UserInput =
        serde_json::from_value(json!({"id": 99, "userName": "Carol", "userAge": 41})).unwrap();

    assert_eq!(input.user_name.as_deref(), Some("Carol"));
    assert_eq!(input.user_age, 41);
}

#[test]
fn test_input_missing_fields_default() {
    let input: UserInput = serde_json::from_value(json!({})).unwrap();

    assert!(input.user_name.is_none());
    assert_eq!(input.user_age, 0);
}

#[test]
fn test_input_wrong_type_fails_to_decode() {
    let result = serde_json::from_value::<UserInput>(json!({"userName": "A", "userAge": "thirty"}));
    assert!(result.is_err());
}

#[test]
fn test_validate_accepts_valid_input() {
    let new_user = UserInput::new("Alice", 30).validate().unwrap();
    assert_eq!(
        new_user,
        NewUser {
            user_name: "Alice".to_string(),
            user_age: 30,
        }
    );
}

#[test]
fn test_validate_keeps_name_untrimmed() {
    let new_user = UserInput::new("  Alice  ", 30).validate().unwrap();
    assert_eq!(new_user.user_name, "  Alice  ");
}

#[test]
fn test_validate_rejects_bad_input() {
    let cases = [
        UserInput::new("", 30),
        UserInput::new(" \t ", 30),
        UserInput::new("Alice", 0),
        UserInput::new("Alice", -1),
        UserInput {
            user_name: None,
            user_age: 30,
        },
        UserInput::default(),
    ];

    for input in cases {
        let debug = format!("{input:?}");
        assert!(
            matches!(input.validate(), Err(AppError::Validation)),
            "{debug} should be rejected"
        );
    }
}

#[test]
fn test_validate_missing_name_is_rejected_even_with_valid_age() {
    let input: UserInput = serde_json::from_str(r#"{"userName": null, "userAge": 42}"#).unwrap();
    assert!(input.user_name.is_none());
    assert!(matches!(input.validate(), Err(AppError::Validation)));
}
