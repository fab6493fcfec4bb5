use std::path::Path;

use serde_json::{json, Map, Value};
use tracing::{error, info};

use crate::model::social_account::{NewSocialAccount, SocialMediaAccount};
use crate::repository::json_collection::{from_document, to_document, JsonCollection};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::schema::CollectionSchema;

pub trait SocialAccountRepository: Send + Sync {
    fn find(&self, predicate: &Value) -> RepositoryResult<Vec<SocialMediaAccount>>;
    fn find_one(&self, predicate: &Value) -> RepositoryResult<Option<SocialMediaAccount>>;
    fn find_by_id(&self, id: &str) -> RepositoryResult<Option<SocialMediaAccount>>;
    /// Accounts still connected for this user (`isActive == true`).
    fn find_active_for_user(&self, user_id: &str) -> RepositoryResult<Vec<SocialMediaAccount>>;
    /// First active account of the given platform for this user.
    fn find_for_platform(
        &self,
        user_id: &str,
        platform: &str,
    ) -> RepositoryResult<Option<SocialMediaAccount>>;
    fn create(&self, account: NewSocialAccount) -> RepositoryResult<SocialMediaAccount>;
    fn update_by_id(&self, id: &str, patch: &Value)
        -> RepositoryResult<Option<SocialMediaAccount>>;
    /// Logical disconnect: flips `isActive` to false but keeps the record.
    /// Physical removal is `delete_by_id`.
    fn deactivate(&self, id: &str) -> RepositoryResult<SocialMediaAccount>;
    fn delete_by_id(&self, id: &str) -> RepositoryResult<bool>;
    fn count_documents(&self, predicate: &Value) -> RepositoryResult<usize>;
}

fn social_account_defaults() -> Map<String, Value> {
    let mut defaults = Map::new();
    defaults.insert("pageId".to_string(), json!(""));
    defaults.insert("isActive".to_string(), json!(true));
    defaults
}

const SOCIAL_ACCOUNTS_SCHEMA: CollectionSchema = CollectionSchema {
    name: "socialMediaAccounts",
    file_name: "socialMediaAccounts.json",
    unique_keys: &[],
    timestamp_fields: &["connectedAt"],
    created_at_field: Some("connectedAt"),
    password_field: None,
    defaults: social_account_defaults,
};

pub struct JsonSocialAccountRepository {
    collection: JsonCollection,
}

impl JsonSocialAccountRepository {
    pub fn new(data_dir: &Path, pretty: bool) -> RepositoryResult<Self> {
        let collection = JsonCollection::open(data_dir, SOCIAL_ACCOUNTS_SCHEMA, pretty)?;
        Ok(JsonSocialAccountRepository { collection })
    }
}

impl SocialAccountRepository for JsonSocialAccountRepository {
    fn find(&self, predicate: &Value) -> RepositoryResult<Vec<SocialMediaAccount>> {
        self.collection
            .find(predicate)?
            .into_iter()
            .map(from_document)
            .collect()
    }

    fn find_one(&self, predicate: &Value) -> RepositoryResult<Option<SocialMediaAccount>> {
        self.collection.find_one(predicate)?.map(from_document).transpose()
    }

    fn find_by_id(&self, id: &str) -> RepositoryResult<Option<SocialMediaAccount>> {
        self.collection.find_by_id(id)?.map(from_document).transpose()
    }

    fn find_active_for_user(&self, user_id: &str) -> RepositoryResult<Vec<SocialMediaAccount>> {
        self.find(&json!({ "userId": user_id, "isActive": true }))
    }

    fn find_for_platform(
        &self,
        user_id: &str,
        platform: &str,
    ) -> RepositoryResult<Option<SocialMediaAccount>> {
        self.find_one(&json!({ "userId": user_id, "platform": platform, "isActive": true }))
    }

    #[tracing::instrument(skip(self, account), fields(user_id = %account.user_id, platform = %account.platform))]
    fn create(&self, account: NewSocialAccount) -> RepositoryResult<SocialMediaAccount> {
        info!("Connecting social media account");
        let fields = to_document(&account)?;
        match self.collection.create(fields) {
            Ok(doc) => {
                info!("Social media account connected successfully");
                from_document(doc)
            }
            Err(e) => {
                error!("Failed to connect social media account: {}", e);
                Err(e)
            }
        }
    }

    #[tracing::instrument(skip(self, patch), fields(id = %id))]
    fn update_by_id(
        &self,
        id: &str,
        patch: &Value,
    ) -> RepositoryResult<Option<SocialMediaAccount>> {
        info!("Updating social media account");
        self.collection.update_by_id(id, patch)?.map(from_document).transpose()
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    fn deactivate(&self, id: &str) -> RepositoryResult<SocialMediaAccount> {
        match self.collection.update_by_id(id, &json!({ "isActive": false }))? {
            Some(doc) => {
                info!("Social media account deactivated");
                from_document(doc)
            }
            None => {
                error!("No social media account found to deactivate for ID: {}", id);
                Err(RepositoryError::not_found(format!(
                    "No social media account found for ID: {}",
                    id
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    fn delete_by_id(&self, id: &str) -> RepositoryResult<bool> {
        info!("Deleting social media account");
        self.collection.delete_by_id(id)
    }

    fn count_documents(&self, predicate: &Value) -> RepositoryResult<usize> {
        self.collection.count_documents(predicate)
    }
}
