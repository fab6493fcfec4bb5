use reachly_store::config::StoreConfig;
use reachly_store::model::user::NewUser;
use reachly_store::repository::user_repo::UserRepository;
use reachly_store::Store;
use serde_json::{json, Value};
use tempfile::TempDir;

const COLLECTION_FILES: [&str; 4] = [
    "users.json",
    "onboarding.json",
    "socialMediaAccounts.json",
    "messageTracking.json",
];

fn setup_store() -> (TempDir, Store) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = Store::open(&StoreConfig::new(dir.path())).expect("Failed to open store");
    (dir, store)
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        password: "secret1".to_string(),
        role: None,
        name: None,
    }
}

#[test]
fn test_open_initializes_every_collection_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let data_dir = dir.path().join("nested").join("data");
    let _store = Store::open(&StoreConfig::new(&data_dir)).expect("Failed to open store");

    for file in COLLECTION_FILES {
        let raw = std::fs::read_to_string(data_dir.join(file))
            .unwrap_or_else(|e| panic!("Missing collection file {}: {}", file, e));
        let parsed: Value = serde_json::from_str(&raw)
            .unwrap_or_else(|e| panic!("Collection file {} is not valid JSON: {}", file, e));
        assert_eq!(parsed, json!([]));
    }
}

#[test]
fn test_restart_round_trip_preserves_records_and_order() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = StoreConfig::new(dir.path());

    let before = {
        let store = Store::open(&config).expect("Failed to open store");
        let users = store.users();
        for email in ["a@x.com", "b@x.com", "c@x.com"] {
            users.create(new_user(email)).expect("Failed to create user");
        }
        users.find(&json!({})).expect("Failed to list users")
    };

    // Simulate a process restart
    let store = Store::open(&config).expect("Failed to reopen store");
    let after = store
        .users()
        .find(&json!({}))
        .expect("Failed to list users after restart");
    assert_eq!(after, before);
}

#[test]
fn test_collection_files_are_pretty_printed() {
    let (dir, store) = setup_store();
    store
        .users()
        .create(new_user("a@x.com"))
        .expect("Failed to create user");

    let raw = std::fs::read_to_string(dir.path().join("users.json"))
        .expect("Failed to read users.json");
    assert!(raw.lines().count() > 1);
    assert!(raw.contains("\"email\": \"a@x.com\""));
}

#[test]
fn test_corrupt_collection_degrades_to_empty_and_recovers() {
    let (dir, store) = setup_store();
    let users = store.users();
    users.create(new_user("a@x.com")).expect("Failed to create user");

    std::fs::write(dir.path().join("users.json"), "{{{ not json")
        .expect("Failed to corrupt users.json");

    // Reads degrade to an empty collection instead of failing
    let all = users.find(&json!({})).expect("Find should not error");
    assert!(all.is_empty());

    // The next write restores a valid file
    users.create(new_user("b@x.com")).expect("Failed to create user");
    let all = users.find(&json!({})).expect("Failed to list users");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].email, "b@x.com");

    let raw = std::fs::read_to_string(dir.path().join("users.json"))
        .expect("Failed to read users.json");
    assert!(serde_json::from_str::<Value>(&raw).is_ok());
}

#[test]
fn test_missing_collection_file_treated_as_empty() {
    let (dir, store) = setup_store();
    let users = store.users();
    users.create(new_user("a@x.com")).expect("Failed to create user");

    std::fs::remove_file(dir.path().join("users.json")).expect("Failed to remove users.json");

    let all = users.find(&json!({})).expect("Find should not error");
    assert!(all.is_empty());
}

#[test]
fn test_collections_are_isolated() {
    let (_dir, store) = setup_store();
    store
        .users()
        .create(new_user("a@x.com"))
        .expect("Failed to create user");

    use reachly_store::repository::onboarding_repo::OnboardingRepository;
    let profiles = store
        .onboarding()
        .find(&json!({}))
        .expect("Failed to list onboarding profiles");
    assert!(profiles.is_empty());
}

#[test]
fn test_non_object_predicate_is_rejected() {
    let (_dir, store) = setup_store();
    use reachly_store::repository::repository_error::RepositoryError;

    let result = store.users().find(&json!("not-an-object"));
    assert!(matches!(result, Err(RepositoryError::ValidationError(_))));
}
