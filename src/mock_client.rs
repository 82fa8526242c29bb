//! In-process stand-in for the REST backend. Every call waits out the
//! configured latency and may fail with [`ApiError::Simulated`] before it
//! reaches the service.

use rand::Rng;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::MockSettings;
use crate::dashboard::{AnalyticsData, DashboardStats};
use crate::logging::ActionLogEntry;
use crate::models::{
    Application, Chat, Dispute, DisputeStatus, Plan, Review, ReviewAction, Subscription,
    SubscriptionTier, Transaction, User, Verification,
};
use crate::platform::PlatformConfig;
use crate::query::{ListParams, Page};
use crate::services::{
    ApiError, ApiResult, BulkOutcome, DisputeResolution, MarketplaceService, NewPlan, NewUser,
    WalletAdjustment,
};

/// Acknowledgement returned by moderation and settings actions.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ActionOutcome<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> ActionOutcome<T> {
    fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

#[derive(Clone)]
pub struct MockApiClient<S> {
    service: S,
    settings: MockSettings,
}

impl<S: MarketplaceService> MockApiClient<S> {
    pub fn new(service: S, settings: MockSettings) -> Self {
        Self { service, settings }
    }

    /// No latency and no injected failures.
    pub fn instant(service: S) -> Self {
        Self::new(service, MockSettings::instant())
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn settings(&self) -> &MockSettings {
        &self.settings
    }

    async fn simulate(&self, operation: &'static str) -> ApiResult<()> {
        if !self.settings.delay.is_zero() {
            tokio::time::sleep(self.settings.delay).await;
        }
        if self.settings.error_rate > 0.0 {
            let roll: f64 = rand::thread_rng().gen();
            if roll < self.settings.error_rate {
                warn!(operation, "injecting simulated failure");
                return Err(ApiError::Simulated);
            }
        }
        debug!(operation, "mock call");
        Ok(())
    }

    pub async fn get_users(&self, params: &ListParams) -> ApiResult<Page<User>> {
        self.simulate("get_users").await?;
        self.service.list_users(params)
    }

    pub async fn get_user(&self, id: &str) -> ApiResult<User> {
        self.simulate("get_user").await?;
        self.service.get_user(id)
    }

    pub async fn create_user(&self, input: NewUser) -> ApiResult<User> {
        self.simulate("create_user").await?;
        self.service.create_user(input)
    }

    pub async fn update_user(&self, id: &str, patch: &Value) -> ApiResult<User> {
        self.simulate("update_user").await?;
        self.service.update_user(id, patch)
    }

    pub async fn delete_user(&self, id: &str) -> ApiResult<ActionOutcome<String>> {
        self.simulate("delete_user").await?;
        self.service.delete_user(id)?;
        Ok(ActionOutcome::ok("User deleted successfully", id.to_string()))
    }

    pub async fn bulk_update_users(&self, ids: &[String], patch: &Value) -> ApiResult<BulkOutcome> {
        self.simulate("bulk_update_users").await?;
        self.service.bulk_update_users(ids, patch)
    }

    pub async fn bulk_delete_users(&self, ids: &[String]) -> ApiResult<BulkOutcome> {
        self.simulate("bulk_delete_users").await?;
        self.service.bulk_delete_users(ids)
    }

    pub async fn adjust_user_wallet(
        &self,
        user_id: &str,
        amount: i64,
        reason: &str,
    ) -> ApiResult<WalletAdjustment> {
        self.simulate("adjust_user_wallet").await?;
        self.service.adjust_wallet(user_id, amount, reason)
    }

    pub async fn get_plans(&self, params: &ListParams) -> ApiResult<Page<Plan>> {
        self.simulate("get_plans").await?;
        self.service.list_plans(params)
    }

    pub async fn get_plan(&self, id: &str) -> ApiResult<Plan> {
        self.simulate("get_plan").await?;
        self.service.get_plan(id)
    }

    pub async fn create_plan(&self, input: NewPlan) -> ApiResult<Plan> {
        self.simulate("create_plan").await?;
        self.service.create_plan(input)
    }

    pub async fn update_plan(&self, id: &str, patch: &Value) -> ApiResult<Plan> {
        self.simulate("update_plan").await?;
        self.service.update_plan(id, patch)
    }

    pub async fn delete_plan(&self, id: &str) -> ApiResult<ActionOutcome<String>> {
        self.simulate("delete_plan").await?;
        self.service.delete_plan(id)?;
        Ok(ActionOutcome::ok("Plan deleted successfully", id.to_string()))
    }

    pub async fn get_applications(&self, params: &ListParams) -> ApiResult<Page<Application>> {
        self.simulate("get_applications").await?;
        self.service.list_applications(params)
    }

    pub async fn get_application(&self, id: &str) -> ApiResult<Application> {
        self.simulate("get_application").await?;
        self.service.get_application(id)
    }

    pub async fn update_application(&self, id: &str, patch: &Value) -> ApiResult<Application> {
        self.simulate("update_application").await?;
        self.service.update_application(id, patch)
    }

    pub async fn delete_application(&self, id: &str) -> ApiResult<ActionOutcome<String>> {
        self.simulate("delete_application").await?;
        self.service.delete_application(id)?;
        Ok(ActionOutcome::ok(
            "Application deleted successfully",
            id.to_string(),
        ))
    }

    pub async fn get_transactions(&self, params: &ListParams) -> ApiResult<Page<Transaction>> {
        self.simulate("get_transactions").await?;
        self.service.list_transactions(params)
    }

    pub async fn get_transaction(&self, id: &str) -> ApiResult<Transaction> {
        self.simulate("get_transaction").await?;
        self.service.get_transaction(id)
    }

    pub async fn get_verifications(&self, params: &ListParams) -> ApiResult<Page<Verification>> {
        self.simulate("get_verifications").await?;
        self.service.list_verifications(params)
    }

    pub async fn approve_verification(&self, id: &str) -> ApiResult<ActionOutcome<Verification>> {
        self.simulate("approve_verification").await?;
        let verification = self.service.approve_verification(id)?;
        Ok(ActionOutcome::ok(
            "Verification approved successfully",
            verification,
        ))
    }

    pub async fn reject_verification(
        &self,
        id: &str,
        reason: &str,
    ) -> ApiResult<ActionOutcome<Verification>> {
        self.simulate("reject_verification").await?;
        let verification = self.service.reject_verification(id, reason)?;
        Ok(ActionOutcome::ok(
            "Verification rejected successfully",
            verification,
        ))
    }

    pub async fn get_chats(&self, params: &ListParams) -> ApiResult<Page<Chat>> {
        self.simulate("get_chats").await?;
        self.service.list_chats(params)
    }

    pub async fn get_reviews(&self, params: &ListParams) -> ApiResult<Page<Review>> {
        self.simulate("get_reviews").await?;
        self.service.list_reviews(params)
    }

    pub async fn moderate_review(
        &self,
        id: &str,
        action: ReviewAction,
    ) -> ApiResult<ActionOutcome<Review>> {
        self.simulate("moderate_review").await?;
        let review = self.service.moderate_review(id, action)?;
        let verb = match action {
            ReviewAction::Approve => "approved",
            ReviewAction::Reject => "rejected",
            ReviewAction::Flag => "flagged",
        };
        Ok(ActionOutcome::ok(format!("Review {verb} successfully"), review))
    }

    pub async fn get_disputes(&self, params: &ListParams) -> ApiResult<Page<Dispute>> {
        self.simulate("get_disputes").await?;
        self.service.list_disputes(params)
    }

    pub async fn resolve_dispute(
        &self,
        id: &str,
        resolution: &DisputeResolution,
    ) -> ApiResult<ActionOutcome<Dispute>> {
        self.simulate("resolve_dispute").await?;
        let dispute = self.service.resolve_dispute(id, resolution)?;
        let message = if dispute.status == DisputeStatus::Escalated {
            "Dispute escalated successfully"
        } else {
            "Dispute resolved successfully"
        };
        Ok(ActionOutcome::ok(message, dispute))
    }

    pub async fn get_subscriptions(&self, params: &ListParams) -> ApiResult<Page<Subscription>> {
        self.simulate("get_subscriptions").await?;
        self.service.list_subscriptions(params)
    }

    pub async fn upgrade_subscription(
        &self,
        user_id: &str,
        tier: SubscriptionTier,
    ) -> ApiResult<ActionOutcome<Subscription>> {
        self.simulate("upgrade_subscription").await?;
        let subscription = self.service.upgrade_subscription(user_id, tier)?;
        Ok(ActionOutcome::ok(
            "Subscription upgraded successfully",
            subscription,
        ))
    }

    pub async fn get_platform_config(&self) -> ApiResult<PlatformConfig> {
        self.simulate("get_platform_config").await?;
        self.service.platform_config()
    }

    pub async fn update_platform_config(
        &self,
        section: &str,
        values: &Value,
    ) -> ApiResult<ActionOutcome<PlatformConfig>> {
        self.simulate("update_platform_config").await?;
        let config = self.service.update_platform_config(section, values)?;
        Ok(ActionOutcome::ok("Configuration updated successfully", config))
    }

    pub async fn reset_platform_config(&self) -> ApiResult<ActionOutcome<PlatformConfig>> {
        self.simulate("reset_platform_config").await?;
        let config = self.service.reset_platform_config()?;
        Ok(ActionOutcome::ok(
            "Platform configuration reset to defaults",
            config,
        ))
    }

    pub async fn get_dashboard_stats(&self) -> ApiResult<DashboardStats> {
        self.simulate("get_dashboard_stats").await?;
        self.service.dashboard_stats()
    }

    pub async fn get_analytics_data(&self) -> ApiResult<AnalyticsData> {
        self.simulate("get_analytics_data").await?;
        self.service.analytics()
    }

    pub async fn get_action_logs(&self) -> ApiResult<Vec<ActionLogEntry>> {
        self.simulate("get_action_logs").await?;
        self.service.list_action_logs()
    }
}
