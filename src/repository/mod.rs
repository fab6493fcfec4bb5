pub mod json_collection;
pub mod message_tracking_repo;
pub mod onboarding_repo;
pub mod repository_error;
pub mod schema;
pub mod social_account_repo;
pub mod user_repo;

pub use json_collection::{Document, JsonCollection};
pub use message_tracking_repo::{JsonMessageTrackingRepository, MessageTrackingRepository};
pub use onboarding_repo::{JsonOnboardingRepository, OnboardingRepository};
pub use repository_error::{RepositoryError, RepositoryResult};
pub use social_account_repo::{JsonSocialAccountRepository, SocialAccountRepository};
pub use user_repo::{JsonUserRepository, UserRepository};
