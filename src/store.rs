use std::sync::Arc;

use tracing::info;

use crate::config::StoreConfig;
use crate::repository::message_tracking_repo::JsonMessageTrackingRepository;
use crate::repository::onboarding_repo::JsonOnboardingRepository;
use crate::repository::repository_error::RepositoryResult;
use crate::repository::social_account_repo::JsonSocialAccountRepository;
use crate::repository::user_repo::JsonUserRepository;

/// Handle to the whole data store. Opening it creates the data directory
/// and initializes every collection file before any query or mutation runs,
/// then hands out the per-collection repositories.
pub struct Store {
    users: Arc<JsonUserRepository>,
    onboarding: Arc<JsonOnboardingRepository>,
    social_accounts: Arc<JsonSocialAccountRepository>,
    message_tracking: Arc<JsonMessageTrackingRepository>,
}

impl Store {
    pub fn open(config: &StoreConfig) -> RepositoryResult<Self> {
        info!(data_dir = %config.data_dir.display(), "Opening record store");

        let users = Arc::new(JsonUserRepository::new(&config.data_dir, config.pretty_json)?);
        let onboarding = Arc::new(JsonOnboardingRepository::new(
            &config.data_dir,
            config.pretty_json,
        )?);
        let social_accounts = Arc::new(JsonSocialAccountRepository::new(
            &config.data_dir,
            config.pretty_json,
        )?);
        let message_tracking = Arc::new(JsonMessageTrackingRepository::new(
            &config.data_dir,
            config.pretty_json,
        )?);

        info!("Record store opened successfully");
        Ok(Store {
            users,
            onboarding,
            social_accounts,
            message_tracking,
        })
    }

    pub fn users(&self) -> Arc<JsonUserRepository> {
        self.users.clone()
    }

    pub fn onboarding(&self) -> Arc<JsonOnboardingRepository> {
        self.onboarding.clone()
    }

    pub fn social_accounts(&self) -> Arc<JsonSocialAccountRepository> {
        self.social_accounts.clone()
    }

    pub fn message_tracking(&self) -> Arc<JsonMessageTrackingRepository> {
        self.message_tracking.clone()
    }
}
