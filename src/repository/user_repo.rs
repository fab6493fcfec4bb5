use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use tracing::{error, info};

use crate::model::user::{NewUser, User};
use crate::repository::json_collection::{from_document, to_document, JsonCollection};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::schema::CollectionSchema;

pub trait UserRepository: Send + Sync {
    fn find(&self, predicate: &Value) -> RepositoryResult<Vec<User>>;
    fn find_one(&self, predicate: &Value) -> RepositoryResult<Option<User>>;
    fn find_by_id(&self, id: &str) -> RepositoryResult<Option<User>>;
    fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    fn create(&self, new_user: NewUser) -> RepositoryResult<User>;
    fn update_by_id(&self, id: &str, patch: &Value) -> RepositoryResult<Option<User>>;
    fn delete_by_id(&self, id: &str) -> RepositoryResult<bool>;
    fn count_documents(&self, predicate: &Value) -> RepositoryResult<usize>;
    /// Stamps `lastLogin` with the current UTC time.
    fn record_login(&self, id: &str) -> RepositoryResult<User>;
    /// Marks the onboarding wizard as finished for this user.
    fn complete_onboarding(&self, id: &str) -> RepositoryResult<User>;
}

fn user_defaults() -> Map<String, Value> {
    let mut defaults = Map::new();
    defaults.insert("role".to_string(), json!("user"));
    defaults.insert("name".to_string(), json!(""));
    defaults.insert("onboardingCompleted".to_string(), json!(false));
    defaults.insert("isActive".to_string(), json!(true));
    defaults
}

const USERS_SCHEMA: CollectionSchema = CollectionSchema {
    name: "users",
    file_name: "users.json",
    unique_keys: &["email"],
    timestamp_fields: &["createdAt", "lastLogin"],
    created_at_field: Some("createdAt"),
    password_field: Some("password"),
    defaults: user_defaults,
};

pub struct JsonUserRepository {
    collection: JsonCollection,
}

impl JsonUserRepository {
    pub fn new(data_dir: &Path, pretty: bool) -> RepositoryResult<Self> {
        let collection = JsonCollection::open(data_dir, USERS_SCHEMA, pretty)?;
        Ok(JsonUserRepository { collection })
    }
}

impl UserRepository for JsonUserRepository {
    fn find(&self, predicate: &Value) -> RepositoryResult<Vec<User>> {
        self.collection
            .find(predicate)?
            .into_iter()
            .map(from_document)
            .collect()
    }

    fn find_one(&self, predicate: &Value) -> RepositoryResult<Option<User>> {
        self.collection.find_one(predicate)?.map(from_document).transpose()
    }

    fn find_by_id(&self, id: &str) -> RepositoryResult<Option<User>> {
        self.collection.find_by_id(id)?.map(from_document).transpose()
    }

    fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        self.find_one(&json!({ "email": email }))
    }

    #[tracing::instrument(skip(self, new_user), fields(email = %new_user.email))]
    fn create(&self, new_user: NewUser) -> RepositoryResult<User> {
        info!("Creating new user");
        let fields = to_document(&new_user)?;
        match self.collection.create(fields) {
            Ok(doc) => {
                info!("User created successfully");
                from_document(doc)
            }
            Err(e) => {
                error!("Failed to create user: {}", e);
                Err(e)
            }
        }
    }

    #[tracing::instrument(skip(self, patch), fields(id = %id))]
    fn update_by_id(&self, id: &str, patch: &Value) -> RepositoryResult<Option<User>> {
        info!("Updating user");
        self.collection.update_by_id(id, patch)?.map(from_document).transpose()
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    fn delete_by_id(&self, id: &str) -> RepositoryResult<bool> {
        info!("Deleting user");
        self.collection.delete_by_id(id)
    }

    fn count_documents(&self, predicate: &Value) -> RepositoryResult<usize> {
        self.collection.count_documents(predicate)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    fn record_login(&self, id: &str) -> RepositoryResult<User> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        match self.collection.update_by_id(id, &json!({ "lastLogin": now }))? {
            Some(doc) => {
                info!("Recorded user login");
                from_document(doc)
            }
            None => {
                error!("No user found to record login for ID: {}", id);
                Err(RepositoryError::not_found(format!(
                    "No user found for ID: {}",
                    id
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    fn complete_onboarding(&self, id: &str) -> RepositoryResult<User> {
        match self
            .collection
            .update_by_id(id, &json!({ "onboardingCompleted": true }))?
        {
            Some(doc) => {
                info!("Marked onboarding as completed");
                from_document(doc)
            }
            None => {
                error!("No user found to complete onboarding for ID: {}", id);
                Err(RepositoryError::not_found(format!(
                    "No user found for ID: {}",
                    id
                )))
            }
        }
    }
}
