//! Fuzz testing for user validation and payload decoding.
//!
//! Ensures that, for arbitrary input:
//!
//! - Validation functions never panic
//! - Decoding a `UserInput` body never panics
//! - Anything that validates really satisfies the admission rules
//!
//! # Running the Fuzz Tests
//!
//! ```bash
//! cargo +nightly install cargo-fuzz
//! cargo +nightly fuzz run fuzz_validation -- -max_total_time=60
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use users_api::models::UserInput;
use users_api::validation::{validate_user_age, validate_user_name};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = validate_user_name(Some(s));
    }

    if let Some(bytes) = data.first_chunk::<4>() {
        let _ = validate_user_age(i32::from_le_bytes(*bytes));
    }

    // Treat the input as a request body
    if let Ok(input) = serde_json::from_slice::<UserInput>(data)
        && let Ok(new_user) = input.validate()
    {
        assert!(!new_user.user_name.trim().is_empty());
        assert!(new_user.user_age > 0);
    }
});
