use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use tracing::{info, warn};

use super::{
    apply_patch, ensure, ApiError, ApiResult, BulkOutcome, DisputeResolution, MarketplaceService,
    NewPlan, NewUser, WalletAdjustment,
};
use crate::config::{DatasetConfig, DatasetSizes};
use crate::dashboard::{self, AnalyticsData, DashboardStats};
use crate::generators::{
    describe_transaction, generate_subscription, seed_dataset, Generator, ADMIN_REVIEWER,
};
use crate::logging::{ActionLog, ActionLogEntry};
use crate::models::{
    Application, ApplicationStatus, Chat, DeviceType, Dispute, DisputeStatus, Gender, Plan,
    PlanStatus, PlanType, ResolutionAction, Review, ReviewAction, ReviewStatus, Subscription,
    SubscriptionStatus, SubscriptionTier, Traits, Transaction, TransactionMetadata,
    TransactionStatus, TransactionType, User, UserStatus, UserVerification, Verification,
    VerificationStatus, ViewMode, Wallet,
};
use crate::platform::PlatformConfig;
use crate::query::{run_query, FieldFilter, ListParams, Page, QuerySpec};
use crate::validation::{validate_email, validate_username};

/// Host id stamped on plans drafted from the console.
pub const ADMIN_HOST: &str = "admin";

const BILLING_PERIOD_DAYS: i64 = 30;

const USER_QUERY: QuerySpec = QuerySpec {
    default_limit: 10,
    default_sort: Some("-created_at"),
    filters: &[
        FieldFilter::exact("status", "status"),
        FieldFilter::exact("profile_level", "profile_level"),
        FieldFilter::contains("username", "username"),
        FieldFilter::contains("email", "email"),
        FieldFilter::exact("current_subscription", "current_subscription"),
        FieldFilter::exact("verification_status", "verification.status"),
        FieldFilter::exact("gender", "gender"),
    ],
};

const PLAN_QUERY: QuerySpec = QuerySpec {
    default_limit: 10,
    default_sort: Some("-created_at"),
    filters: &[
        FieldFilter::exact("type", "type"),
        FieldFilter::exact("status", "status"),
        FieldFilter::contains("title", "title"),
        FieldFilter::exact("host_id", "host_id"),
        FieldFilter::exact("view_mode", "view_mode"),
        FieldFilter::exact("is_sponsored", "is_sponsored"),
        FieldFilter::exact("tag", "tags"),
    ],
};

const APPLICATION_QUERY: QuerySpec = QuerySpec {
    default_limit: 20,
    default_sort: Some("-created_at"),
    filters: &[
        FieldFilter::exact("application_type", "application_type"),
        FieldFilter::exact("status", "status"),
        FieldFilter::exact("plan_id", "plan_id"),
        FieldFilter::exact("user_id", "user_id"),
    ],
};

const TRANSACTION_QUERY: QuerySpec = QuerySpec {
    default_limit: 20,
    default_sort: Some("-created_at"),
    filters: &[
        FieldFilter::exact("type", "type"),
        FieldFilter::exact("status", "status"),
        FieldFilter::exact("user_id", "user_id"),
        FieldFilter::exact("device_type", "metadata.device_type"),
    ],
};

const VERIFICATION_QUERY: QuerySpec = QuerySpec {
    default_limit: 20,
    default_sort: Some("-submitted_at"),
    filters: &[
        FieldFilter::exact("status", "status"),
        FieldFilter::exact("document_type", "document_type"),
        FieldFilter::exact("user_id", "user_id"),
    ],
};

const CHAT_QUERY: QuerySpec = QuerySpec {
    default_limit: 20,
    default_sort: Some("-created_at"),
    filters: &[
        FieldFilter::exact("status", "status"),
        FieldFilter::exact("plan_id", "plan_id"),
        FieldFilter::exact("participant", "participants"),
    ],
};

const REVIEW_QUERY: QuerySpec = QuerySpec {
    default_limit: 20,
    default_sort: Some("-created_at"),
    filters: &[
        FieldFilter::exact("status", "status"),
        FieldFilter::exact("rating", "rating"),
        FieldFilter::exact("plan_id", "plan_id"),
        FieldFilter::exact("reviewer_id", "reviewer_id"),
        FieldFilter::exact("reviewee_id", "reviewee_id"),
    ],
};

const DISPUTE_QUERY: QuerySpec = QuerySpec {
    default_limit: 20,
    default_sort: Some("-created_at"),
    filters: &[
        FieldFilter::exact("status", "status"),
        FieldFilter::exact("dispute_type", "dispute_type"),
        FieldFilter::exact("plan_id", "plan_id"),
        FieldFilter::exact("complainant_id", "complainant_id"),
        FieldFilter::exact("respondent_id", "respondent_id"),
    ],
};

const SUBSCRIPTION_QUERY: QuerySpec = QuerySpec {
    default_limit: 20,
    default_sort: None,
    filters: &[
        FieldFilter::exact("current_plan", "current_plan"),
        FieldFilter::exact("status", "status"),
        FieldFilter::exact("user_level", "user_level"),
        FieldFilter::exact("user_id", "user_id"),
        FieldFilter::exact("auto_renew", "auto_renew"),
    ],
};

trait Keyed {
    const KIND: &'static str;
    fn key(&self) -> &str;
}

macro_rules! keyed {
    ($($ty:ty => $kind:literal),+ $(,)?) => {
        $(impl Keyed for $ty {
            const KIND: &'static str = $kind;
            fn key(&self) -> &str {
                &self.id
            }
        })+
    };
}

keyed!(
    User => "user",
    Plan => "plan",
    Application => "application",
    Transaction => "transaction",
    Verification => "verification",
    Review => "review",
    Dispute => "dispute",
);

fn position<T: Keyed>(items: &[T], id: &str) -> ApiResult<usize> {
    items
        .iter()
        .position(|item| item.key() == id)
        .ok_or_else(|| ApiError::NotFound(format!("{} {id}", T::KIND)))
}

fn find<T: Keyed + Clone>(items: &[T], id: &str) -> ApiResult<T> {
    position(items, id).map(|index| items[index].clone())
}

struct InMemoryState {
    users: Vec<User>,
    plans: Vec<Plan>,
    applications: Vec<Application>,
    transactions: Vec<Transaction>,
    verifications: Vec<Verification>,
    chats: Vec<Chat>,
    reviews: Vec<Review>,
    disputes: Vec<Dispute>,
    subscriptions: Vec<Subscription>,
    platform: PlatformConfig,
    action_log: ActionLog,
    gen: Generator,
}

impl InMemoryState {
    /// Appends a completed, fee-free ledger entry and returns its id.
    fn post_transaction(
        &mut self,
        user_id: &str,
        kind: TransactionType,
        amount: i64,
        description: String,
        reference_id: Option<String>,
        at: DateTime<Utc>,
    ) -> String {
        let id = self.gen.object_id();
        self.transactions.push(Transaction {
            id: id.clone(),
            user_id: user_id.to_string(),
            kind,
            amount,
            service_fee: 0,
            net_amount: amount,
            description,
            status: TransactionStatus::Completed,
            reference_id,
            gateway_transaction_id: None,
            created_at: at,
            updated_at: at,
            completed_at: Some(at),
            failed_reason: None,
            metadata: TransactionMetadata {
                ip_address: "127.0.0.1".into(),
                user_agent: "admin-console".into(),
                device_type: DeviceType::Desktop,
            },
        });
        id
    }

    fn patched_user(&self, index: usize, patch: &Value, now: DateTime<Utc>) -> ApiResult<User> {
        let current = &self.users[index];
        let mut next = apply_patch(current, patch, &["id", "created_at"])?;
        if patch.get("password").is_none() {
            next.password = current.password.clone();
        }
        if next.username != current.username {
            validate_username(&next.username)?;
            ensure(
                !self.taken_by_other(index, |u| u.username.eq_ignore_ascii_case(&next.username)),
                ApiError::Validation(format!("username {} is already taken", next.username)),
            )?;
        }
        if next.email != current.email {
            validate_email(&next.email)?;
            ensure(
                !self.taken_by_other(index, |u| u.email.eq_ignore_ascii_case(&next.email)),
                ApiError::Validation(format!("email {} is already registered", next.email)),
            )?;
        }
        ensure(
            (1..=3).contains(&next.profile_level),
            ApiError::Validation("profile_level must be between 1 and 3".into()),
        )?;
        next.updated_at = now;
        Ok(next)
    }

    fn taken_by_other(&self, index: usize, matches: impl Fn(&User) -> bool) -> bool {
        self.users
            .iter()
            .enumerate()
            .any(|(other, user)| other != index && matches(user))
    }

    /// Stores a patched user and carries tier or level changes over to the
    /// subscription row.
    fn commit_user(&mut self, index: usize, next: User, now: DateTime<Utc>) -> User {
        let previous = std::mem::replace(&mut self.users[index], next);
        let tier_changed = previous.current_subscription != self.users[index].current_subscription;
        if tier_changed || previous.profile_level != self.users[index].profile_level {
            self.sync_subscription(index, tier_changed, now);
        }
        self.users[index].clone()
    }

    /// A tier change restarts the billing period on both the user and the
    /// subscription. The level is always copied across.
    fn sync_subscription(
        &mut self,
        index: usize,
        tier_changed: bool,
        now: DateTime<Utc>,
    ) -> Subscription {
        let tier = self.users[index].current_subscription;
        if tier_changed {
            self.users[index].subscription_expires_at = tier
                .is_paid()
                .then(|| now + Duration::days(BILLING_PERIOD_DAYS));
        }
        let user = self.users[index].clone();
        let slot = match self.subscriptions.iter().position(|s| s.user_id == user.id) {
            Some(slot) => slot,
            None => {
                let fresh = generate_subscription(&mut self.gen, &user);
                self.subscriptions.push(fresh);
                self.subscriptions.len() - 1
            }
        };
        let monthly_cost = self.platform.subscription_plans.price_for(tier);
        let subscription = &mut self.subscriptions[slot];
        subscription.user_level = user.profile_level;
        if tier_changed {
            subscription.current_plan = tier;
            subscription.status = SubscriptionStatus::Active;
            subscription.monthly_cost = monthly_cost;
            subscription.subscription_start = now;
            subscription.next_billing = user.subscription_expires_at;
            subscription.auto_renew = tier.is_paid();
        }
        subscription.clone()
    }
}

/// Request ids with repeats dropped, first occurrence wins.
fn unique_ids(ids: &[String]) -> Vec<&String> {
    let mut seen = HashSet::new();
    ids.iter().filter(|id| seen.insert(id.as_str())).collect()
}

/// Process-local store seeded from the generator. Clones share state.
#[derive(Clone)]
pub struct InMemoryService {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryService {
    pub fn from_config(config: &DatasetConfig) -> Self {
        let mut gen = Generator::new(config.seed, Utc::now());
        let data = seed_dataset(&mut gen, config);
        let state = InMemoryState {
            users: data.users,
            plans: data.plans,
            applications: data.applications,
            transactions: data.transactions,
            verifications: data.verifications,
            chats: data.chats,
            reviews: data.reviews,
            disputes: data.disputes,
            subscriptions: data.subscriptions,
            platform: PlatformConfig::default(),
            action_log: ActionLog::default(),
            gen,
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn new_with_sample() -> Self {
        Self::from_config(&DatasetConfig::default())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_config(&DatasetConfig {
            sizes: DatasetSizes::default(),
            seed: Some(seed),
        })
    }

    fn lock(&self) -> ApiResult<MutexGuard<'_, InMemoryState>> {
        self.state
            .lock()
            .map_err(|_| ApiError::Internal("state lock poisoned".into()))
    }
}

impl Default for InMemoryService {
    fn default() -> Self {
        Self::new_with_sample()
    }
}

impl MarketplaceService for InMemoryService {
    fn list_users(&self, params: &ListParams) -> ApiResult<Page<User>> {
        let state = self.lock()?;
        run_query(&state.users, params, &USER_QUERY)
    }

    fn get_user(&self, id: &str) -> ApiResult<User> {
        find(&self.lock()?.users, id)
    }

    fn create_user(&self, input: NewUser) -> ApiResult<User> {
        validate_username(&input.username)?;
        validate_email(&input.email)?;
        let level = input.profile_level.unwrap_or(1);
        ensure(
            (1..=3).contains(&level),
            ApiError::Validation("profile_level must be between 1 and 3".into()),
        )?;

        let mut guard = self.lock()?;
        let state = &mut *guard;
        ensure(
            !state
                .users
                .iter()
                .any(|u| u.username.eq_ignore_ascii_case(&input.username)),
            ApiError::Validation(format!("username {} is already taken", input.username)),
        )?;
        ensure(
            !state
                .users
                .iter()
                .any(|u| u.email.eq_ignore_ascii_case(&input.email)),
            ApiError::Validation(format!("email {} is already registered", input.email)),
        )?;

        let now = Utc::now();
        let tier = input.current_subscription.unwrap_or(SubscriptionTier::Basic);
        let user = User {
            id: state.gen.object_id(),
            username: input.username,
            email: input.email,
            phone: input.phone.unwrap_or_default(),
            password: input.password.unwrap_or_default(),
            status: input.status.unwrap_or(UserStatus::Active),
            profile_image: Vec::new(),
            bio: input.bio.unwrap_or_default(),
            highlight: input.highlight.unwrap_or_default(),
            address: input.address.unwrap_or_default(),
            dob: input.dob,
            gender: input.gender.unwrap_or(Gender::Other),
            interests: Vec::new(),
            profile_level: level,
            profile_points: 0,
            wallet: Wallet::default(),
            current_subscription: tier,
            subscription_expires_at: tier
                .is_paid()
                .then(|| now + Duration::days(BILLING_PERIOD_DAYS)),
            traits: Traits::default(),
            total_reviews: 0,
            verification: UserVerification {
                phone_verified_at: None,
                email_verified_at: None,
                legal_documents_verified_at: None,
                address_verified_at: None,
                status: VerificationStatus::Pending,
            },
            created_at: now,
            updated_at: now,
            last_active: now,
            total_bp_spent: 0,
            total_plans_joined: 0,
            total_plans_hosted: 0,
        };

        let mut subscription = generate_subscription(&mut state.gen, &user);
        subscription.subscription_start = now;
        subscription.plans_this_month = 0;
        subscription.bp_spent_this_month = 0;
        subscription.monthly_cost = state.platform.subscription_plans.price_for(tier);
        state.subscriptions.push(subscription);
        state.users.push(user.clone());
        state.action_log.record(
            "create_user",
            Some(user.id.as_str()),
            json!({"username": user.username}),
        );
        Ok(user)
    }

    fn update_user(&self, id: &str, patch: &Value) -> ApiResult<User> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let index = position(&state.users, id)?;
        let now = Utc::now();
        let next = state.patched_user(index, patch, now)?;
        let updated = state.commit_user(index, next, now);
        state
            .action_log
            .record("update_user", Some(id), patch.clone());
        Ok(updated)
    }

    fn delete_user(&self, id: &str) -> ApiResult<()> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let index = position(&state.users, id)?;
        state.users.remove(index);
        state.subscriptions.retain(|s| s.user_id != id);
        state.action_log.record("delete_user", Some(id), json!({}));
        Ok(())
    }

    fn bulk_update_users(&self, ids: &[String], patch: &Value) -> ApiResult<BulkOutcome> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let now = Utc::now();
        let targets = unique_ids(ids);
        let renames = patch.get("username").is_some() || patch.get("email").is_some();
        ensure(
            !renames || targets.len() <= 1,
            ApiError::Validation("username and email must be changed one user at a time".into()),
        )?;
        let mut staged = Vec::new();
        let mut missing = Vec::new();
        for id in targets {
            match position(&state.users, id) {
                Ok(index) => staged.push((index, state.patched_user(index, patch, now)?)),
                Err(_) => missing.push(id.clone()),
            }
        }
        let count = staged.len();
        for (index, user) in staged {
            state.commit_user(index, user, now);
        }
        if !missing.is_empty() {
            warn!(missing = missing.len(), "bulk update skipped unknown users");
        }
        state.action_log.record(
            "bulk_update_users",
            None,
            json!({"ids": ids, "changes": patch}),
        );
        Ok(BulkOutcome::updated(count, missing))
    }

    fn bulk_delete_users(&self, ids: &[String]) -> ApiResult<BulkOutcome> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let missing: Vec<String> = unique_ids(ids)
            .into_iter()
            .filter(|id| !state.users.iter().any(|u| &u.id == *id))
            .cloned()
            .collect();
        let before = state.users.len();
        state.users.retain(|u| !ids.contains(&u.id));
        state.subscriptions.retain(|s| !ids.contains(&s.user_id));
        let count = before - state.users.len();
        state
            .action_log
            .record("bulk_delete_users", None, json!({"ids": ids}));
        Ok(BulkOutcome::deleted(count, missing))
    }

    fn adjust_wallet(
        &self,
        user_id: &str,
        amount: i64,
        reason: &str,
    ) -> ApiResult<WalletAdjustment> {
        ensure(
            amount != 0,
            ApiError::Validation("adjustment amount must be non-zero".into()),
        )?;
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let index = position(&state.users, user_id)?;
        let new_balance = state.users[index]
            .wallet
            .beens_points
            .checked_add(amount)
            .ok_or_else(|| ApiError::Validation("adjustment overflows the wallet balance".into()))?;
        ensure(
            new_balance >= 0,
            ApiError::Validation(format!(
                "adjustment would leave a negative balance ({new_balance} BP)"
            )),
        )?;

        let now = Utc::now();
        let mut description = describe_transaction(TransactionType::AdminAdjustment, amount);
        if !reason.trim().is_empty() {
            description = format!("{description}: {}", reason.trim());
        }
        let transaction_id = state.post_transaction(
            user_id,
            TransactionType::AdminAdjustment,
            amount,
            description,
            None,
            now,
        );
        let user = &mut state.users[index];
        user.wallet.beens_points = new_balance;
        user.updated_at = now;
        state.action_log.record(
            "adjust_wallet",
            Some(user_id),
            json!({"amount": amount, "reason": reason, "transaction_id": transaction_id}),
        );
        Ok(WalletAdjustment {
            success: true,
            new_balance,
            transaction_id,
            message: format!(
                "Wallet {} successfully",
                if amount > 0 { "credited" } else { "debited" }
            ),
        })
    }

    fn list_plans(&self, params: &ListParams) -> ApiResult<Page<Plan>> {
        let state = self.lock()?;
        run_query(&state.plans, params, &PLAN_QUERY)
    }

    fn get_plan(&self, id: &str) -> ApiResult<Plan> {
        find(&self.lock()?.plans, id)
    }

    fn create_plan(&self, input: NewPlan) -> ApiResult<Plan> {
        ensure(
            !input.title.trim().is_empty(),
            ApiError::Validation("plan title is required".into()),
        )?;
        ensure(
            input.end_date > input.start_date,
            ApiError::Validation("end_date must be after start_date".into()),
        )?;
        if let (Some(min), Some(max)) = (input.min_age, input.max_age) {
            ensure(
                min <= max,
                ApiError::Validation("min_age exceeds max_age".into()),
            )?;
        }
        if let Some(min_bp) = input.min_bp_per_participant {
            ensure(
                min_bp >= 0,
                ApiError::Validation("min_bp_per_participant must not be negative".into()),
            )?;
        }

        let mut guard = self.lock()?;
        let state = &mut *guard;
        let rules = &state.platform.plan_rules;
        ensure(
            (1..=rules.max_participants_limit).contains(&input.max_participants),
            ApiError::Validation(format!(
                "max_participants must be between 1 and {}",
                rules.max_participants_limit
            )),
        )?;

        let application_close_date = Duration::try_hours(rules.application_close_before_hours)
            .and_then(|lead| input.start_date.checked_sub_signed(lead))
            .ok_or_else(|| {
                ApiError::Validation("application close date is out of range".into())
            })?;

        let now = Utc::now();
        let plan = Plan {
            id: state.gen.object_id(),
            host_id: ADMIN_HOST.into(),
            template_id: None,
            title: input.title,
            description: input.description,
            images: input.images,
            start_date: input.start_date,
            end_date: input.end_date,
            start_time: input.start_date,
            end_time: input.end_date,
            location: input.location,
            plan_type: PlanType::JoinersPay,
            status: PlanStatus::Published,
            application_close_date,
            view_mode: input.view_mode.unwrap_or(ViewMode::Public),
            gender: input.gender,
            min_age: input.min_age,
            max_age: input.max_age,
            max_participants: input.max_participants,
            current_participants: 0,
            min_bp_per_participant: input.min_bp_per_participant,
            min_profile_level: input.min_profile_level,
            tags: input.tags,
            created_at: now,
            updated_at: now,
            total_applications: 0,
            avg_rating: None,
            total_revenue_bp: 0,
            is_sponsored: false,
            sponsor_info: None,
        };
        state.plans.push(plan.clone());
        state
            .action_log
            .record("create_plan", Some(plan.id.as_str()), json!({"title": plan.title}));
        Ok(plan)
    }

    fn update_plan(&self, id: &str, patch: &Value) -> ApiResult<Plan> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let index = position(&state.plans, id)?;
        let mut updated = apply_patch(&state.plans[index], patch, &["id", "created_at"])?;
        ensure(
            updated.end_date > updated.start_date,
            ApiError::Validation("end_date must be after start_date".into()),
        )?;
        updated.updated_at = Utc::now();
        state.plans[index] = updated.clone();
        state
            .action_log
            .record("update_plan", Some(id), patch.clone());
        Ok(updated)
    }

    fn delete_plan(&self, id: &str) -> ApiResult<()> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let index = position(&state.plans, id)?;
        state.plans.remove(index);
        let before = state.applications.len();
        state.applications.retain(|a| a.plan_id != id);
        let dropped = before - state.applications.len();
        state
            .action_log
            .record("delete_plan", Some(id), json!({"applications_removed": dropped}));
        Ok(())
    }

    fn list_applications(&self, params: &ListParams) -> ApiResult<Page<Application>> {
        let state = self.lock()?;
        run_query(&state.applications, params, &APPLICATION_QUERY)
    }

    fn get_application(&self, id: &str) -> ApiResult<Application> {
        find(&self.lock()?.applications, id)
    }

    fn update_application(&self, id: &str, patch: &Value) -> ApiResult<Application> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let index = position(&state.applications, id)?;
        let previous = state.applications[index].status;
        let mut updated = apply_patch(
            &state.applications[index],
            patch,
            &["id", "plan_id", "user_id", "created_at"],
        )?;
        let now = Utc::now();
        if updated.status != previous {
            match updated.status {
                ApplicationStatus::Accepted => {
                    updated.accepted_at = Some(now);
                    updated.rejected_at = None;
                    updated.rejection_reason = None;
                }
                ApplicationStatus::Rejected => {
                    updated.rejected_at = Some(now);
                    updated.accepted_at = None;
                }
                ApplicationStatus::Pending => {
                    updated.accepted_at = None;
                    updated.rejected_at = None;
                }
            }
        }
        updated.updated_at = now;
        state.applications[index] = updated.clone();
        state
            .action_log
            .record("update_application", Some(id), patch.clone());
        Ok(updated)
    }

    fn delete_application(&self, id: &str) -> ApiResult<()> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let index = position(&state.applications, id)?;
        state.applications.remove(index);
        state
            .action_log
            .record("delete_application", Some(id), json!({}));
        Ok(())
    }

    fn list_transactions(&self, params: &ListParams) -> ApiResult<Page<Transaction>> {
        let state = self.lock()?;
        run_query(&state.transactions, params, &TRANSACTION_QUERY)
    }

    fn get_transaction(&self, id: &str) -> ApiResult<Transaction> {
        find(&self.lock()?.transactions, id)
    }

    fn list_verifications(&self, params: &ListParams) -> ApiResult<Page<Verification>> {
        let state = self.lock()?;
        run_query(&state.verifications, params, &VERIFICATION_QUERY)
    }

    fn approve_verification(&self, id: &str) -> ApiResult<Verification> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let index = position(&state.verifications, id)?;
        let now = Utc::now();
        let verification = &mut state.verifications[index];
        verification.status = VerificationStatus::Approved;
        verification.reviewed_at = Some(now);
        verification.reviewer_id = Some(ADMIN_REVIEWER.into());
        verification.rejection_reason = None;
        let verification = verification.clone();

        match state.users.iter_mut().find(|u| u.id == verification.user_id) {
            Some(user) => {
                user.verification.status = VerificationStatus::Approved;
                user.verification.legal_documents_verified_at = Some(now);
                if user.status == UserStatus::PendingVerification {
                    user.status = UserStatus::Active;
                }
                user.updated_at = now;
            }
            None => warn!(user_id = %verification.user_id, "verification owner no longer exists"),
        }
        state.action_log.record(
            "approve_verification",
            Some(id),
            json!({"user_id": verification.user_id}),
        );
        Ok(verification)
    }

    fn reject_verification(&self, id: &str, reason: &str) -> ApiResult<Verification> {
        ensure(
            !reason.trim().is_empty(),
            ApiError::Validation("a rejection reason is required".into()),
        )?;
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let index = position(&state.verifications, id)?;
        let now = Utc::now();
        let verification = &mut state.verifications[index];
        verification.status = VerificationStatus::Rejected;
        verification.reviewed_at = Some(now);
        verification.reviewer_id = Some(ADMIN_REVIEWER.into());
        verification.rejection_reason = Some(reason.trim().to_string());
        let verification = verification.clone();

        match state.users.iter_mut().find(|u| u.id == verification.user_id) {
            Some(user) => {
                user.verification.status = VerificationStatus::Rejected;
                user.verification.legal_documents_verified_at = None;
                user.updated_at = now;
            }
            None => warn!(user_id = %verification.user_id, "verification owner no longer exists"),
        }
        state.action_log.record(
            "reject_verification",
            Some(id),
            json!({"user_id": verification.user_id, "reason": reason}),
        );
        Ok(verification)
    }

    fn list_chats(&self, params: &ListParams) -> ApiResult<Page<Chat>> {
        let state = self.lock()?;
        run_query(&state.chats, params, &CHAT_QUERY)
    }

    fn list_reviews(&self, params: &ListParams) -> ApiResult<Page<Review>> {
        let state = self.lock()?;
        run_query(&state.reviews, params, &REVIEW_QUERY)
    }

    fn moderate_review(&self, id: &str, action: ReviewAction) -> ApiResult<Review> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let index = position(&state.reviews, id)?;
        let review = &mut state.reviews[index];
        review.status = match action {
            ReviewAction::Approve => ReviewStatus::Approved,
            ReviewAction::Reject => ReviewStatus::Rejected,
            ReviewAction::Flag => ReviewStatus::Flagged,
        };
        let review = review.clone();
        state
            .action_log
            .record("moderate_review", Some(id), json!({"action": action}));
        Ok(review)
    }

    fn list_disputes(&self, params: &ListParams) -> ApiResult<Page<Dispute>> {
        let state = self.lock()?;
        run_query(&state.disputes, params, &DISPUTE_QUERY)
    }

    fn resolve_dispute(&self, id: &str, resolution: &DisputeResolution) -> ApiResult<Dispute> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let index = position(&state.disputes, id)?;
        let dispute = state.disputes[index].clone();
        ensure(
            !dispute.status.is_settled(),
            ApiError::Validation(format!("dispute {id} is already {}", dispute.status)),
        )?;

        let refund = match resolution.action {
            ResolutionAction::FullRefund => Some(dispute.disputed_amount),
            ResolutionAction::PartialRefund => {
                let amount = resolution.refund_amount.ok_or_else(|| {
                    ApiError::Validation("partial refund requires refund_amount".into())
                })?;
                ensure(
                    amount > 0 && amount <= dispute.disputed_amount,
                    ApiError::Validation(format!(
                        "refund_amount must be between 1 and {}",
                        dispute.disputed_amount
                    )),
                )?;
                Some(amount)
            }
            _ => None,
        };

        let now = Utc::now();
        let mut refund_transaction = None;
        if let Some(amount) = refund.filter(|amount| *amount > 0) {
            let complainant = position(&state.users, &dispute.complainant_id)?;
            let credited = state.users[complainant]
                .wallet
                .beens_points
                .checked_add(amount)
                .ok_or_else(|| ApiError::Validation("refund overflows the wallet balance".into()))?;
            refund_transaction = Some(state.post_transaction(
                &dispute.complainant_id,
                TransactionType::Refund,
                amount,
                format!("Refund for dispute {id}"),
                Some(id.to_string()),
                now,
            ));
            let user = &mut state.users[complainant];
            user.wallet.beens_points = credited;
            user.updated_at = now;
        }

        let record = &mut state.disputes[index];
        record.resolution_action = Some(resolution.action);
        record.resolution_notes = Some(resolution.notes.clone());
        if resolution.action == ResolutionAction::Escalate {
            record.status = DisputeStatus::Escalated;
        } else {
            record.status = DisputeStatus::Resolved;
            record.resolved_at = Some(now);
        }
        let record = record.clone();
        info!(dispute = %id, action = %resolution.action, "dispute resolved");
        state.action_log.record(
            "resolve_dispute",
            Some(id),
            json!({
                "action": resolution.action,
                "refund": refund,
                "transaction_id": refund_transaction,
            }),
        );
        Ok(record)
    }

    fn list_subscriptions(&self, params: &ListParams) -> ApiResult<Page<Subscription>> {
        let state = self.lock()?;
        run_query(&state.subscriptions, params, &SUBSCRIPTION_QUERY)
    }

    fn upgrade_subscription(
        &self,
        user_id: &str,
        tier: SubscriptionTier,
    ) -> ApiResult<Subscription> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let index = position(&state.users, user_id)?;
        let previous = state.users[index].current_subscription;
        ensure(
            previous != tier,
            ApiError::Validation(format!("user is already on {tier}")),
        )?;

        let now = Utc::now();
        let user = &mut state.users[index];
        user.current_subscription = tier;
        user.updated_at = now;
        let subscription = state.sync_subscription(index, true, now);
        state.action_log.record(
            "upgrade_subscription",
            Some(user_id),
            json!({"from": previous, "to": tier}),
        );
        Ok(subscription)
    }

    fn platform_config(&self) -> ApiResult<PlatformConfig> {
        Ok(self.lock()?.platform.clone())
    }

    fn update_platform_config(&self, section: &str, values: &Value) -> ApiResult<PlatformConfig> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        state.platform = state.platform.update_section(section, values)?;
        state.action_log.record(
            "update_platform_config",
            None,
            json!({"section": section, "values": values}),
        );
        Ok(state.platform.clone())
    }

    fn reset_platform_config(&self) -> ApiResult<PlatformConfig> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        state.platform = PlatformConfig::default();
        state
            .action_log
            .record("reset_platform_config", None, json!({}));
        Ok(state.platform.clone())
    }

    fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        let state = self.lock()?;
        Ok(dashboard::dashboard_stats(
            &state.users,
            &state.plans,
            &state.transactions,
            &state.platform.beens_points,
            Utc::now(),
        ))
    }

    fn analytics(&self) -> ApiResult<AnalyticsData> {
        let state = self.lock()?;
        Ok(dashboard::analytics(
            &state.users,
            &state.plans,
            &state.transactions,
            &state.platform.beens_points,
            Utc::now(),
        ))
    }

    fn list_action_logs(&self) -> ApiResult<Vec<ActionLogEntry>> {
        Ok(self.lock()?.action_log.entries())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> InMemoryService {
        InMemoryService::from_config(&DatasetConfig {
            sizes: DatasetSizes::small(),
            seed: Some(99),
        })
    }

    fn first_user(service: &InMemoryService) -> User {
        service
            .list_users(&ListParams::new().limit(1))
            .unwrap()
            .data
            .remove(0)
    }

    fn unsettled_disputes(service: &InMemoryService) -> Vec<Dispute> {
        service
            .list_disputes(&ListParams::new().limit(1000))
            .unwrap()
            .data
            .into_iter()
            .filter(|d| !d.status.is_settled())
            .collect()
    }

    fn new_user(name: &str) -> NewUser {
        NewUser {
            username: name.into(),
            email: format!("{name}@example.com"),
            password: Some("hunter22".into()),
            gender: Some(Gender::Female),
            ..NewUser::default()
        }
    }

    #[test]
    fn users_default_to_newest_first() {
        let service = service();
        let page = service.list_users(&ListParams::new()).unwrap();
        assert_eq!(page.total, 20);
        assert_eq!(page.limit, 10);
        assert!(page
            .data
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at));
    }

    #[test]
    fn create_user_adds_subscription_and_rejects_duplicates() {
        let service = service();
        let user = service.create_user(new_user("fresh.face")).unwrap();
        assert_eq!(user.id.len(), 24);
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(service.get_user(&user.id).unwrap().password, "hunter22");

        let subs = service
            .list_subscriptions(&ListParams::new().filter("user_id", user.id.clone()))
            .unwrap();
        assert_eq!(subs.total, 1);
        assert_eq!(subs.data[0].monthly_cost, 0);

        let err = service.create_user(new_user("Fresh.Face")).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        let err = service
            .create_user(NewUser {
                email: "not-an-email".into(),
                ..new_user("another")
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn update_user_keeps_identity_and_password() {
        let service = service();
        let created = service.create_user(new_user("keeper")).unwrap();
        let updated = service
            .update_user(
                &created.id,
                &json!({"id": "other", "bio": "new bio", "status": "banned"}),
            )
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.bio, "new bio");
        assert_eq!(updated.status, UserStatus::Banned);
        assert_eq!(updated.password, "hunter22");
        assert!(updated.updated_at >= created.updated_at);

        let err = service
            .update_user(&created.id, &json!({"status": "sleeping"}))
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(matches!(
            service.update_user("missing", &json!({})),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn bulk_operations_report_missing_ids() {
        let service = service();
        let ids: Vec<String> = service
            .list_users(&ListParams::new().limit(3))
            .unwrap()
            .data
            .into_iter()
            .map(|u| u.id)
            .collect();
        let mut with_ghost = ids.clone();
        with_ghost.push("ghost".into());

        let outcome = service
            .bulk_update_users(&with_ghost, &json!({"status": "inactive"}))
            .unwrap();
        assert_eq!(outcome.updated_count, Some(3));
        assert_eq!(outcome.missing, vec!["ghost".to_string()]);
        assert!(ids
            .iter()
            .all(|id| service.get_user(id).unwrap().status == UserStatus::Inactive));

        let outcome = service.bulk_delete_users(&with_ghost).unwrap();
        assert_eq!(outcome.deleted_count, Some(3));
        assert_eq!(service.list_users(&ListParams::new()).unwrap().total, 17);
        assert_eq!(service.list_subscriptions(&ListParams::new()).unwrap().total, 17);
    }

    #[test]
    fn wallet_adjustment_records_transaction() {
        let service = service();
        let user = first_user(&service);
        let start = user.wallet.beens_points;

        let credit = service.adjust_wallet(&user.id, 500, "goodwill").unwrap();
        assert_eq!(credit.new_balance, start + 500);
        assert_eq!(credit.message, "Wallet credited successfully");
        let txn = service.get_transaction(&credit.transaction_id).unwrap();
        assert_eq!(txn.kind, TransactionType::AdminAdjustment);
        assert_eq!(txn.status, TransactionStatus::Completed);
        assert!(txn.description.ends_with("goodwill"));

        assert!(matches!(
            service.adjust_wallet(&user.id, 0, "noop"),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            service.adjust_wallet(&user.id, -(start + 501), "too much"),
            Err(ApiError::Validation(_))
        ));
        let debit = service.adjust_wallet(&user.id, -(start + 500), "drain").unwrap();
        assert_eq!(debit.new_balance, 0);
        assert_eq!(debit.message, "Wallet debited successfully");
    }

    #[test]
    fn wallet_overflow_is_rejected_and_store_stays_usable() {
        let service = service();
        let user = service.create_user(new_user("big.spender")).unwrap();
        service.adjust_wallet(&user.id, 1, "seed").unwrap();
        assert!(matches!(
            service.adjust_wallet(&user.id, i64::MAX, "overflow"),
            Err(ApiError::Validation(_))
        ));
        assert_eq!(service.get_user(&user.id).unwrap().wallet.beens_points, 1);
    }

    fn rooftop_plan(start: DateTime<Utc>) -> NewPlan {
        NewPlan {
            title: "Rooftop tasting".into(),
            description: String::new(),
            start_date: start,
            end_date: start + Duration::hours(3),
            location: Default::default(),
            max_participants: 8,
            min_bp_per_participant: Some(400),
            view_mode: None,
            images: vec![],
            tags: vec!["food".into()],
            gender: None,
            min_age: Some(21),
            max_age: Some(40),
            min_profile_level: None,
        }
    }

    #[test]
    fn out_of_range_close_lead_never_reaches_plan_creation() {
        let service = service();
        for hours in [i64::MAX, -6] {
            assert!(matches!(
                service.update_platform_config(
                    "plan_rules",
                    &json!({"application_close_before_hours": hours})
                ),
                Err(ApiError::Validation(_))
            ));
        }
        let start = Utc::now() + Duration::days(2);
        let plan = service.create_plan(rooftop_plan(start)).unwrap();
        assert_eq!(plan.application_close_date, start - Duration::hours(1));
        assert!(service.platform_config().is_ok());
    }

    #[test]
    fn renames_must_stay_unique() {
        let service = service();
        let alpha = service.create_user(new_user("alpha.one")).unwrap();
        let beta = service.create_user(new_user("beta.two")).unwrap();

        let err = service
            .update_user(&beta.id, &json!({"username": "ALPHA.ONE"}))
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        let err = service
            .update_user(&beta.id, &json!({"email": "Alpha.One@example.com"}))
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(service.get_user(&beta.id).unwrap().username, "beta.two");

        let recased = service
            .update_user(&alpha.id, &json!({"username": "Alpha.One"}))
            .unwrap();
        assert_eq!(recased.username, "Alpha.One");

        let pair = vec![alpha.id.clone(), beta.id.clone()];
        let err = service
            .bulk_update_users(&pair, &json!({"username": "same.name"}))
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(service.get_user(&beta.id).unwrap().username, "beta.two");
    }

    #[test]
    fn bulk_update_counts_repeated_ids_once() {
        let service = service();
        let user = first_user(&service);
        let outcome = service
            .bulk_update_users(
                &[user.id.clone(), user.id.clone()],
                &json!({"bio": "twice"}),
            )
            .unwrap();
        assert_eq!(outcome.updated_count, Some(1));
        assert!(outcome.missing.is_empty());

        let renamed = service
            .bulk_update_users(
                &[user.id.clone(), user.id.clone()],
                &json!({"username": "solo.rename"}),
            )
            .unwrap();
        assert_eq!(renamed.updated_count, Some(1));
    }

    #[test]
    fn tier_and_level_patches_follow_subscription() {
        let service = service();
        let user = service.create_user(new_user("tier.patch")).unwrap();
        let subscription_of = |id: &str| {
            service
                .list_subscriptions(&ListParams::new().filter("user_id", id))
                .unwrap()
                .data
                .remove(0)
        };

        let updated = service
            .update_user(
                &user.id,
                &json!({"current_subscription": "Plan_2", "profile_level": 2}),
            )
            .unwrap();
        assert!(updated.subscription_expires_at.is_some());
        let sub = subscription_of(&user.id);
        assert_eq!(sub.current_plan, SubscriptionTier::Silver);
        assert_eq!(sub.user_level, 2);
        assert_eq!(sub.monthly_cost, 999);
        assert_eq!(sub.next_billing, updated.subscription_expires_at);

        service
            .update_user(&user.id, &json!({"profile_level": 3}))
            .unwrap();
        let sub = subscription_of(&user.id);
        assert_eq!(sub.user_level, 3);
        assert_eq!(sub.current_plan, SubscriptionTier::Silver);

        let downgraded = service
            .update_user(&user.id, &json!({"current_subscription": "Plan_1"}))
            .unwrap();
        assert!(downgraded.subscription_expires_at.is_none());
        let sub = subscription_of(&user.id);
        assert_eq!(sub.monthly_cost, 0);
        assert!(!sub.auto_renew);
    }

    #[test]
    fn admin_plans_are_joiners_pay() {
        let service = service();
        let start = Utc::now() + Duration::days(3);
        let plan = service
            .create_plan(NewPlan {
                title: "Rooftop tasting".into(),
                description: String::new(),
                start_date: start,
                end_date: start + Duration::hours(3),
                location: Default::default(),
                max_participants: 8,
                min_bp_per_participant: Some(400),
                view_mode: None,
                images: vec![],
                tags: vec!["food".into()],
                gender: None,
                min_age: Some(21),
                max_age: Some(40),
                min_profile_level: None,
            })
            .unwrap();
        assert_eq!(plan.plan_type, PlanType::JoinersPay);
        assert_eq!(plan.host_id, ADMIN_HOST);
        assert_eq!(plan.status, PlanStatus::Published);
        assert_eq!(plan.application_close_date, start - Duration::hours(1));

        let found = service
            .list_plans(&ListParams::new().filter("host_id", ADMIN_HOST))
            .unwrap();
        assert_eq!(found.total, 1);
        service.delete_plan(&plan.id).unwrap();
        assert!(matches!(service.get_plan(&plan.id), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn application_status_change_stamps_time() {
        let service = service();
        let pending = service
            .list_applications(&ListParams::new().filter("status", "pending"))
            .unwrap();
        let app = pending.data.first().expect("a pending application");
        let accepted = service
            .update_application(&app.id, &json!({"status": "accepted", "user_id": "x"}))
            .unwrap();
        assert_eq!(accepted.user_id, app.user_id);
        assert!(accepted.accepted_at.is_some());
        assert!(accepted.rejected_at.is_none());
    }

    #[test]
    fn verification_decisions_update_owner() {
        let service = service();
        let verification = service
            .list_verifications(&ListParams::new().limit(1))
            .unwrap()
            .data
            .remove(0);
        let approved = service.approve_verification(&verification.id).unwrap();
        assert_eq!(approved.status, VerificationStatus::Approved);
        assert_eq!(approved.reviewer_id.as_deref(), Some(ADMIN_REVIEWER));
        let owner = service.get_user(&verification.user_id).unwrap();
        assert_eq!(owner.verification.status, VerificationStatus::Approved);
        assert!(owner.verification.legal_documents_verified_at.is_some());

        assert!(matches!(
            service.reject_verification(&verification.id, "  "),
            Err(ApiError::Validation(_))
        ));
        let rejected = service
            .reject_verification(&verification.id, "blurry photo")
            .unwrap();
        assert_eq!(rejected.rejection_reason.as_deref(), Some("blurry photo"));
        let owner = service.get_user(&verification.user_id).unwrap();
        assert_eq!(owner.verification.status, VerificationStatus::Rejected);
    }

    #[test]
    fn review_moderation_sets_status() {
        let service = service();
        let review = service
            .list_reviews(&ListParams::new().limit(1))
            .unwrap()
            .data
            .remove(0);
        let flagged = service.moderate_review(&review.id, ReviewAction::Flag).unwrap();
        assert_eq!(flagged.status, ReviewStatus::Flagged);
        let approved = service
            .moderate_review(&review.id, ReviewAction::Approve)
            .unwrap();
        assert_eq!(approved.status, ReviewStatus::Approved);
    }

    #[test]
    fn refund_credits_complainant() {
        let service = service();
        let open = unsettled_disputes(&service);
        let dispute = open.first().expect("an unsettled dispute");
        let before = service.get_user(&dispute.complainant_id).unwrap();

        let err = service
            .resolve_dispute(
                &dispute.id,
                &DisputeResolution {
                    action: ResolutionAction::PartialRefund,
                    notes: String::new(),
                    refund_amount: Some(dispute.disputed_amount + 1),
                },
            )
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let resolved = service
            .resolve_dispute(
                &dispute.id,
                &DisputeResolution {
                    action: ResolutionAction::FullRefund,
                    notes: "host no-show".into(),
                    refund_amount: None,
                },
            )
            .unwrap();
        assert_eq!(resolved.status, DisputeStatus::Resolved);
        assert!(resolved.resolved_at.is_some());
        let after = service.get_user(&dispute.complainant_id).unwrap();
        assert_eq!(
            after.wallet.beens_points,
            before.wallet.beens_points + dispute.disputed_amount
        );
        let refunds = service
            .list_transactions(
                &ListParams::new()
                    .filter("type", "refund")
                    .filter("user_id", dispute.complainant_id.clone()),
            )
            .unwrap();
        assert!(refunds
            .data
            .iter()
            .any(|t| t.reference_id.as_deref() == Some(dispute.id.as_str())));

        let again = service.resolve_dispute(
            &dispute.id,
            &DisputeResolution {
                action: ResolutionAction::NoAction,
                notes: String::new(),
                refund_amount: None,
            },
        );
        assert!(matches!(again, Err(ApiError::Validation(_))));
    }

    #[test]
    fn escalation_leaves_dispute_open_ended() {
        let service = service();
        let open = unsettled_disputes(&service);
        let dispute = open.last().expect("an unsettled dispute");
        let escalated = service
            .resolve_dispute(
                &dispute.id,
                &DisputeResolution {
                    action: ResolutionAction::Escalate,
                    notes: "needs senior review".into(),
                    refund_amount: None,
                },
            )
            .unwrap();
        assert_eq!(escalated.status, DisputeStatus::Escalated);
        assert!(escalated.resolved_at.is_none());
    }

    #[test]
    fn subscription_upgrade_syncs_user() {
        let service = service();
        let basic = service
            .list_users(&ListParams::new().filter("current_subscription", "Plan_1"))
            .unwrap();
        let user = basic.data.first().expect("a basic-tier user");
        let sub = service
            .upgrade_subscription(&user.id, SubscriptionTier::Black)
            .unwrap();
        assert_eq!(sub.current_plan, SubscriptionTier::Black);
        assert_eq!(sub.monthly_cost, 2999);
        assert!(sub.next_billing.is_some());
        let user = service.get_user(&user.id).unwrap();
        assert_eq!(user.current_subscription, SubscriptionTier::Black);
        assert!(user.subscription_expires_at.is_some());
        assert!(matches!(
            service.upgrade_subscription(&user.id, SubscriptionTier::Black),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn config_updates_and_resets() {
        let service = service();
        let updated = service
            .update_platform_config("plan_rules", &json!({"application_close_before_hours": 6}))
            .unwrap();
        assert_eq!(updated.plan_rules.application_close_before_hours, 6);
        assert_eq!(
            service.platform_config().unwrap().plan_rules.application_close_before_hours,
            6
        );
        let reset = service.reset_platform_config().unwrap();
        assert_eq!(reset, PlatformConfig::default());
    }

    #[test]
    fn mutations_are_logged_newest_first() {
        let service = service();
        assert!(service.list_action_logs().unwrap().is_empty());
        let user = first_user(&service);
        service.adjust_wallet(&user.id, 10, "test").unwrap();
        service.reset_platform_config().unwrap();
        let logs = service.list_action_logs().unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].action, "reset_platform_config");
        assert_eq!(logs[1].target_id.as_deref(), Some(user.id.as_str()));
    }

    #[test]
    fn clones_share_state() {
        let service = service();
        let other = service.clone();
        let user = first_user(&service);
        other.delete_user(&user.id).unwrap();
        assert!(matches!(service.get_user(&user.id), Err(ApiError::NotFound(_))));
    }
}
