use std::path::Path;

use serde_json::{json, Map, Value};
use tracing::{error, info};

use crate::model::onboarding::{NewOnboardingProfile, OnboardingProfile};
use crate::repository::json_collection::{from_document, to_document, JsonCollection};
use crate::repository::repository_error::RepositoryResult;
use crate::repository::schema::CollectionSchema;

pub trait OnboardingRepository: Send + Sync {
    fn find(&self, predicate: &Value) -> RepositoryResult<Vec<OnboardingProfile>>;
    fn find_one(&self, predicate: &Value) -> RepositoryResult<Option<OnboardingProfile>>;
    fn find_by_id(&self, id: &str) -> RepositoryResult<Option<OnboardingProfile>>;
    /// At most one profile exists per user (`userId` is unique).
    fn find_by_user(&self, user_id: &str) -> RepositoryResult<Option<OnboardingProfile>>;
    fn create(&self, profile: NewOnboardingProfile) -> RepositoryResult<OnboardingProfile>;
    fn update_by_id(&self, id: &str, patch: &Value) -> RepositoryResult<Option<OnboardingProfile>>;
    fn delete_by_id(&self, id: &str) -> RepositoryResult<bool>;
    fn count_documents(&self, predicate: &Value) -> RepositoryResult<usize>;
}

fn onboarding_defaults() -> Map<String, Value> {
    let mut defaults = Map::new();
    defaults.insert("leadSourcesOther".to_string(), json!(""));
    defaults.insert("communicationOther".to_string(), json!(""));
    defaults.insert("customerQuestions".to_string(), json!([]));
    defaults.insert("websiteLinks".to_string(), json!(""));
    defaults
}

const ONBOARDING_SCHEMA: CollectionSchema = CollectionSchema {
    name: "onboarding",
    file_name: "onboarding.json",
    unique_keys: &["userId"],
    timestamp_fields: &["completedAt"],
    created_at_field: Some("completedAt"),
    password_field: None,
    defaults: onboarding_defaults,
};

pub struct JsonOnboardingRepository {
    collection: JsonCollection,
}

impl JsonOnboardingRepository {
    pub fn new(data_dir: &Path, pretty: bool) -> RepositoryResult<Self> {
        let collection = JsonCollection::open(data_dir, ONBOARDING_SCHEMA, pretty)?;
        Ok(JsonOnboardingRepository { collection })
    }
}

impl OnboardingRepository for JsonOnboardingRepository {
    fn find(&self, predicate: &Value) -> RepositoryResult<Vec<OnboardingProfile>> {
        self.collection
            .find(predicate)?
            .into_iter()
            .map(from_document)
            .collect()
    }

    fn find_one(&self, predicate: &Value) -> RepositoryResult<Option<OnboardingProfile>> {
        self.collection.find_one(predicate)?.map(from_document).transpose()
    }

    fn find_by_id(&self, id: &str) -> RepositoryResult<Option<OnboardingProfile>> {
        self.collection.find_by_id(id)?.map(from_document).transpose()
    }

    fn find_by_user(&self, user_id: &str) -> RepositoryResult<Option<OnboardingProfile>> {
        self.find_one(&json!({ "userId": user_id }))
    }

    #[tracing::instrument(skip(self, profile), fields(user_id = %profile.user_id))]
    fn create(&self, profile: NewOnboardingProfile) -> RepositoryResult<OnboardingProfile> {
        info!("Creating onboarding profile");
        let fields = to_document(&profile)?;
        match self.collection.create(fields) {
            Ok(doc) => {
                info!("Onboarding profile created successfully");
                from_document(doc)
            }
            Err(e) => {
                error!("Failed to create onboarding profile: {}", e);
                Err(e)
            }
        }
    }

    #[tracing::instrument(skip(self, patch), fields(id = %id))]
    fn update_by_id(&self, id: &str, patch: &Value) -> RepositoryResult<Option<OnboardingProfile>> {
        info!("Updating onboarding profile");
        self.collection.update_by_id(id, patch)?.map(from_document).transpose()
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    fn delete_by_id(&self, id: &str) -> RepositoryResult<bool> {
        info!("Deleting onboarding profile");
        self.collection.delete_by_id(id)
    }

    fn count_documents(&self, predicate: &Value) -> RepositoryResult<usize> {
        self.collection.count_documents(predicate)
    }
}
