pub mod message_event;
pub mod onboarding;
pub mod social_account;
pub mod user;

pub use message_event::{MessageEvent, MessageStats, NewMessageEvent};
pub use onboarding::{NewOnboardingProfile, OnboardingProfile};
pub use social_account::{NewSocialAccount, SocialMediaAccount};
pub use user::{NewUser, User};
