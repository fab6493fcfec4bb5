use reachly_store::config::StoreConfig;
use reachly_store::model::user::NewUser;
use reachly_store::repository::repository_error::RepositoryError;
use reachly_store::repository::user_repo::UserRepository;
use reachly_store::util::password::{PasswordUtils, PasswordUtilsImpl};
use reachly_store::Store;
use serde_json::json;
use tempfile::TempDir;

fn setup_store() -> (TempDir, Store) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = Store::open(&StoreConfig::new(dir.path())).expect("Failed to open store");
    (dir, store)
}

fn new_user(email: &str, password: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        password: password.to_string(),
        role: None,
        name: Some("Amel".to_string()),
    }
}

#[test]
fn test_user_repository_workflow() {
    let (_dir, store) = setup_store();
    let users = store.users();

    // Create a user
    let created = users
        .create(new_user("a@x.com", "secret1"))
        .expect("Failed to create user");
    assert!(!created.id.is_empty());
    assert_eq!(created.email, "a@x.com");
    assert_eq!(created.name, "Amel");

    // Defaults
    assert_eq!(created.role, "user");
    assert!(created.is_active);
    assert!(!created.onboarding_completed);
    assert!(!created.created_at.is_empty());
    assert_eq!(created.created_at, created.last_login);

    // The stored password is a hash, never the plaintext
    assert_ne!(created.password, "secret1");
    assert!(created.password.starts_with("$argon2"));
    assert!(PasswordUtilsImpl::verify_password("secret1", &created.password).unwrap());

    // Fetch by id returns the record unchanged
    let fetched = users
        .find_by_id(&created.id)
        .expect("Failed to fetch user")
        .expect("User not found");
    assert_eq!(fetched, created);

    // Fetch by email
    let by_email = users
        .find_by_email("a@x.com")
        .expect("Failed to fetch user by email")
        .expect("User not found by email");
    assert_eq!(by_email.id, created.id);

    // Update a field; everything else is preserved
    let updated = users
        .update_by_id(&created.id, &json!({ "name": "New Name" }))
        .expect("Failed to update user")
        .expect("User not found for update");
    assert_eq!(updated.name, "New Name");
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.password, created.password);
    assert_eq!(updated.created_at, created.created_at);

    // Updating the password stores a fresh hash
    let rehashed = users
        .update_by_id(&created.id, &json!({ "password": "newpass9" }))
        .expect("Failed to update password")
        .expect("User not found for password update");
    assert!(rehashed.password.starts_with("$argon2"));
    assert_ne!(rehashed.password, created.password);
    assert!(PasswordUtilsImpl::verify_password("newpass9", &rehashed.password).unwrap());
    assert!(!PasswordUtilsImpl::verify_password("secret1", &rehashed.password).unwrap());

    // Delete, then the record is gone
    assert!(users.delete_by_id(&created.id).expect("Failed to delete user"));
    assert!(users
        .find_by_id(&created.id)
        .expect("Failed to fetch user")
        .is_none());

    // Deleting again is a no-op
    assert!(!users.delete_by_id(&created.id).expect("Failed to delete user"));
}

#[test]
fn test_duplicate_email_rejected() {
    let (_dir, store) = setup_store();
    let users = store.users();

    let first = users
        .create(new_user("a@x.com", "secret1"))
        .expect("Failed to create user");

    let result = users.create(new_user("a@x.com", "other-pass"));
    assert!(matches!(result, Err(RepositoryError::AlreadyExists(_))));

    // The failed create must not partially write
    let count = users
        .count_documents(&json!({}))
        .expect("Failed to count users");
    assert_eq!(count, 1);

    // findOne still returns the first-created record only
    let found = users
        .find_one(&json!({ "email": "a@x.com" }))
        .expect("Failed to find user")
        .expect("User not found");
    assert_eq!(found.id, first.id);
}

#[test]
fn test_find_preserves_insertion_order() {
    let (_dir, store) = setup_store();
    let users = store.users();

    for email in ["a@x.com", "b@x.com", "c@x.com"] {
        users
            .create(new_user(email, "secret1"))
            .expect("Failed to create user");
    }

    let all = users.find(&json!({})).expect("Failed to list users");
    let emails: Vec<&str> = all.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails, vec!["a@x.com", "b@x.com", "c@x.com"]);

    // Equality filter preserves relative order
    let filtered = users
        .find(&json!({ "role": "user" }))
        .expect("Failed to filter users");
    assert_eq!(filtered.len(), 3);
    assert_eq!(filtered[0].email, "a@x.com");
}

#[test]
fn test_created_at_is_immutable() {
    let (_dir, store) = setup_store();
    let users = store.users();

    let created = users
        .create(new_user("a@x.com", "secret1"))
        .expect("Failed to create user");

    let updated = users
        .update_by_id(
            &created.id,
            &json!({ "createdAt": "2020-01-01T00:00:00.000Z", "name": "Changed" }),
        )
        .expect("Failed to update user")
        .expect("User not found for update");
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.name, "Changed");
}

#[test]
fn test_record_login_and_complete_onboarding() {
    let (_dir, store) = setup_store();
    let users = store.users();

    let created = users
        .create(new_user("a@x.com", "secret1"))
        .expect("Failed to create user");

    let logged_in = users
        .record_login(&created.id)
        .expect("Failed to record login");
    assert!(chrono::DateTime::parse_from_rfc3339(&logged_in.last_login).is_ok());

    let onboarded = users
        .complete_onboarding(&created.id)
        .expect("Failed to complete onboarding");
    assert!(onboarded.onboarding_completed);

    // Both helpers signal a missing user as NotFound
    let missing = users.record_login("nope");
    assert!(matches!(missing, Err(RepositoryError::NotFound(_))));
}

#[test]
fn test_update_missing_user_returns_none() {
    let (_dir, store) = setup_store();
    let users = store.users();

    let result = users
        .update_by_id("missing-id", &json!({ "name": "x" }))
        .expect("Update should not error on a missing id");
    assert!(result.is_none());
}
