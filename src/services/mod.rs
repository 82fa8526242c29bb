use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::dashboard::{AnalyticsData, DashboardStats};
use crate::logging::ActionLogEntry;
use crate::models::{
    Address, Application, Chat, Dispute, Gender, Plan, ResolutionAction, Review, ReviewAction,
    Subscription, SubscriptionTier, Transaction, User, UserStatus, Verification, ViewMode,
};
use crate::platform::PlatformConfig;
use crate::query::{ListParams, Page};

pub mod memory;

pub use memory::InMemoryService;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("Simulated API error - please try again")]
    Simulated,
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

pub fn ensure(condition: bool, error: ApiError) -> ApiResult<()> {
    if condition { Ok(()) } else { Err(error) }
}

/// Shallow JSON merge of `patch` over `record`, skipping `immutable` keys.
/// The merged document must still deserialize as `T`.
pub fn apply_patch<T>(record: &T, patch: &Value, immutable: &[&str]) -> ApiResult<T>
where
    T: Serialize + DeserializeOwned,
{
    let Value::Object(changes) = patch else {
        return Err(ApiError::Validation("patch must be a JSON object".into()));
    };
    let mut current = serde_json::to_value(record)?;
    if let Value::Object(fields) = &mut current {
        for (key, value) in changes {
            if immutable.contains(&key.as_str()) {
                continue;
            }
            fields.insert(key.clone(), value.clone());
        }
    }
    serde_json::from_value(current).map_err(|err| ApiError::Validation(err.to_string()))
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub status: Option<UserStatus>,
    #[serde(default)]
    pub profile_level: Option<u8>,
    #[serde(default)]
    pub current_subscription: Option<SubscriptionTier>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub highlight: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub dob: Option<NaiveDate>,
}

/// Plan drafted from the admin console. Admins may only publish
/// joiners-pay plans, hosted by the platform account.
#[derive(Clone, Debug, Deserialize)]
pub struct NewPlan {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub location: Address,
    pub max_participants: i64,
    #[serde(default)]
    pub min_bp_per_participant: Option<i64>,
    #[serde(default)]
    pub view_mode: Option<ViewMode>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub gender: Option<Vec<Gender>>,
    #[serde(default)]
    pub min_age: Option<u8>,
    #[serde(default)]
    pub max_age: Option<u8>,
    #[serde(default)]
    pub min_profile_level: Option<u8>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WalletAdjustment {
    pub success: bool,
    pub new_balance: i64,
    pub transaction_id: String,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BulkOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_count: Option<usize>,
    pub missing: Vec<String>,
    pub message: String,
}

impl BulkOutcome {
    pub fn updated(count: usize, missing: Vec<String>) -> Self {
        Self {
            success: true,
            updated_count: Some(count),
            deleted_count: None,
            missing,
            message: format!("Successfully updated {count} users"),
        }
    }

    pub fn deleted(count: usize, missing: Vec<String>) -> Self {
        Self {
            success: true,
            updated_count: None,
            deleted_count: Some(count),
            missing,
            message: format!("Successfully deleted {count} users"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DisputeResolution {
    pub action: ResolutionAction,
    #[serde(default)]
    pub notes: String,
    /// Required for partial refunds; full refunds return the disputed amount.
    #[serde(default)]
    pub refund_amount: Option<i64>,
}

/// Backend operations behind the admin console.
pub trait MarketplaceService {
    fn list_users(&self, params: &ListParams) -> ApiResult<Page<User>>;
    fn get_user(&self, id: &str) -> ApiResult<User>;
    fn create_user(&self, input: NewUser) -> ApiResult<User>;
    fn update_user(&self, id: &str, patch: &Value) -> ApiResult<User>;
    fn delete_user(&self, id: &str) -> ApiResult<()>;
    fn bulk_update_users(&self, ids: &[String], patch: &Value) -> ApiResult<BulkOutcome>;
    fn bulk_delete_users(&self, ids: &[String]) -> ApiResult<BulkOutcome>;
    fn adjust_wallet(&self, user_id: &str, amount: i64, reason: &str)
    -> ApiResult<WalletAdjustment>;

    fn list_plans(&self, params: &ListParams) -> ApiResult<Page<Plan>>;
    fn get_plan(&self, id: &str) -> ApiResult<Plan>;
    fn create_plan(&self, input: NewPlan) -> ApiResult<Plan>;
    fn update_plan(&self, id: &str, patch: &Value) -> ApiResult<Plan>;
    fn delete_plan(&self, id: &str) -> ApiResult<()>;

    fn list_applications(&self, params: &ListParams) -> ApiResult<Page<Application>>;
    fn get_application(&self, id: &str) -> ApiResult<Application>;
    fn update_application(&self, id: &str, patch: &Value) -> ApiResult<Application>;
    fn delete_application(&self, id: &str) -> ApiResult<()>;

    fn list_transactions(&self, params: &ListParams) -> ApiResult<Page<Transaction>>;
    fn get_transaction(&self, id: &str) -> ApiResult<Transaction>;

    fn list_verifications(&self, params: &ListParams) -> ApiResult<Page<Verification>>;
    fn approve_verification(&self, id: &str) -> ApiResult<Verification>;
    fn reject_verification(&self, id: &str, reason: &str) -> ApiResult<Verification>;

    fn list_chats(&self, params: &ListParams) -> ApiResult<Page<Chat>>;

    fn list_reviews(&self, params: &ListParams) -> ApiResult<Page<Review>>;
    fn moderate_review(&self, id: &str, action: ReviewAction) -> ApiResult<Review>;

    fn list_disputes(&self, params: &ListParams) -> ApiResult<Page<Dispute>>;
    fn resolve_dispute(&self, id: &str, resolution: &DisputeResolution) -> ApiResult<Dispute>;

    fn list_subscriptions(&self, params: &ListParams) -> ApiResult<Page<Subscription>>;
    fn upgrade_subscription(&self, user_id: &str, tier: SubscriptionTier)
    -> ApiResult<Subscription>;

    fn platform_config(&self) -> ApiResult<PlatformConfig>;
    fn update_platform_config(&self, section: &str, values: &Value) -> ApiResult<PlatformConfig>;
    fn reset_platform_config(&self) -> ApiResult<PlatformConfig>;

    fn dashboard_stats(&self) -> ApiResult<DashboardStats>;
    fn analytics(&self) -> ApiResult<AnalyticsData>;

    fn list_action_logs(&self) -> ApiResult<Vec<ActionLogEntry>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        id: String,
        name: String,
        count: i64,
    }

    #[test]
    fn patch_merges_top_level_fields() {
        let record = Sample {
            id: "a".into(),
            name: "old".into(),
            count: 1,
        };
        let patched = apply_patch(&record, &json!({"name": "new", "id": "b"}), &["id"]).unwrap();
        assert_eq!(patched.id, "a");
        assert_eq!(patched.name, "new");
        assert_eq!(patched.count, 1);
    }

    #[test]
    fn patch_rejects_type_mismatch() {
        let record = Sample {
            id: "a".into(),
            name: "old".into(),
            count: 1,
        };
        let err = apply_patch(&record, &json!({"count": "many"}), &[]).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(apply_patch(&record, &json!([1, 2]), &[]).is_err());
    }

    #[test]
    fn ensure_returns_given_error() {
        assert!(ensure(true, ApiError::Simulated).is_ok());
        assert!(matches!(
            ensure(false, ApiError::NotFound("x".into())),
            Err(ApiError::NotFound(_))
        ));
    }
}
