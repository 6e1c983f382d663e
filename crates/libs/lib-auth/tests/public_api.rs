//! Exercises the crate-root re-exports the way downstream crates import
//! them, so a renamed or missing `pub use` fails here instead of in a
//! dependent build.

use lib_auth::{decode_jwt, encode_jwt, hash_password, placeholder_password, verify_password};

const SECRET: &str = "public-api-test-secret-at-least-32-chars!";

#[test]
fn test_password_helpers_are_reachable_from_crate_root() {
    let placeholder = placeholder_password();
    let hash = hash_password(&placeholder).expect("placeholder should be hashable");
    assert!(verify_password(&placeholder, &hash).expect("placeholder should verify"));
}

#[test]
fn test_token_helpers_are_reachable_from_crate_root() {
    let token = encode_jwt(7, "alice@example.com".to_string(), "designer".to_string(), SECRET, 1)
        .expect("encoding should succeed");
    let claims = decode_jwt(&token, SECRET).expect("decoding should succeed");
    assert_eq!(claims.email, "alice@example.com");
    assert_eq!(claims.user_id().expect("sub should be numeric"), 7);
}
