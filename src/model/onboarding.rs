use serde::{Deserialize, Serialize};

/// Business onboarding questionnaire answers, at most one per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingProfile {
    pub id: String,
    pub user_id: String,
    pub business_name: String,
    pub user_name: String,
    pub business_description: String,
    pub ideal_customer: String,
    pub lead_sources: Vec<String>,
    pub lead_sources_other: String,
    pub deal_size: String,
    pub communication_platforms: Vec<String>,
    pub communication_other: String,
    pub lead_handling: String,
    pub sales_goal: String,
    pub customer_questions: Vec<String>,
    pub website_links: String,
    pub urgency: String,
    pub completed_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOnboardingProfile {
    pub user_id: String,
    pub business_name: String,
    pub user_name: String,
    pub business_description: String,
    pub ideal_customer: String,
    pub lead_sources: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_sources_other: Option<String>,
    pub deal_size: String,
    pub communication_platforms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub communication_other: Option<String>,
    pub lead_handling: String,
    pub sales_goal: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_questions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_links: Option<String>,
    pub urgency: String,
}
