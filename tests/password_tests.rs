use reachly_store::util::password::*;

#[test]
fn test_hash_password_success() {
    let password = "test_password_123";
    let result = PasswordUtilsImpl::hash_password(password);

    assert!(result.is_ok());
    let hash = result.unwrap();

    // Hash should not be empty and never equal the original password
    assert!(!hash.is_empty());
    assert_ne!(hash, password);

    // Hash should be in PHC string format
    assert!(hash.starts_with("$argon2"));
    let parts: Vec<&str> = hash.split('$').collect();
    assert!(parts.len() >= 5, "Hash should have at least 5 parts separated by $");
}

#[test]
fn test_hash_password_empty_password() {
    let result = PasswordUtilsImpl::hash_password("");

    // Empty passwords still hash; rejecting them is the caller's concern
    assert!(result.is_ok());
    assert!(result.unwrap().starts_with("$argon2"));
}

#[test]
fn test_hash_password_unicode_characters() {
    let password = "Pâssw0rd123!🔒";
    let result = PasswordUtilsImpl::hash_password(password);

    assert!(result.is_ok());
    assert!(result.unwrap().starts_with("$argon2"));
}

#[test]
fn test_hash_password_different_results() {
    let password = "same_password";

    let hash1 = PasswordUtilsImpl::hash_password(password).unwrap();
    let hash2 = PasswordUtilsImpl::hash_password(password).unwrap();

    // Same password should produce different hashes due to random salt
    assert_ne!(hash1, hash2);
}

#[test]
fn test_verify_password_correct() {
    let password = "correct_password_1!";
    let hash = PasswordUtilsImpl::hash_password(password).unwrap();

    let result = PasswordUtilsImpl::verify_password(password, &hash);
    assert!(result.is_ok());
    assert!(result.unwrap());
}

#[test]
fn test_verify_password_incorrect() {
    let hash = PasswordUtilsImpl::hash_password("right_password").unwrap();

    let result = PasswordUtilsImpl::verify_password("wrong_password", &hash);
    assert!(result.is_ok());
    assert!(!result.unwrap());
}

#[test]
fn test_verify_password_invalid_hash_format() {
    let result = PasswordUtilsImpl::verify_password("whatever", "not-a-phc-hash");
    assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
}

#[test]
fn test_verify_password_cross_hashes() {
    let hash_a = PasswordUtilsImpl::hash_password("password_a").unwrap();
    let hash_b = PasswordUtilsImpl::hash_password("password_b").unwrap();

    assert!(PasswordUtilsImpl::verify_password("password_a", &hash_a).unwrap());
    assert!(!PasswordUtilsImpl::verify_password("password_a", &hash_b).unwrap());
}
