use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a string-valued enum whose variants travel over the wire as the
/// given literal, with `ALL` and `as_str` for catalogs and filters.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq, Hash)]
        pub enum $name {
            $(#[serde(rename = $value)] $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum!(UserStatus {
    Active => "active",
    Inactive => "inactive",
    Banned => "banned",
    PendingVerification => "pending_verification",
});

wire_enum!(Gender {
    Male => "male",
    Female => "female",
    Other => "other",
});

wire_enum!(
    /// Subscription tiers; the wire names predate the marketing names.
    SubscriptionTier {
        Basic => "Plan_1",
        Silver => "Plan_2",
        Black => "Plan_3",
    }
);

wire_enum!(VerificationStatus {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
    RequiresAttention => "requires_attention",
});

wire_enum!(PlanStatus {
    Draft => "draft",
    Published => "published",
    ApplicationsOpen => "applications_open",
    ApplicationsClosed => "applications_closed",
    Active => "active",
    Completed => "completed",
    Cancelled => "cancelled",
});

wire_enum!(ViewMode {
    Public => "public",
    Private => "private",
});

wire_enum!(ApplicationType {
    Bidding => "bidding",
    Gift => "gift",
    Invite => "invite",
});

wire_enum!(ApplicationStatus {
    Pending => "pending",
    Accepted => "accepted",
    Rejected => "rejected",
});

wire_enum!(TransactionType {
    BpPurchase => "bp_purchase",
    PlanPayment => "plan_payment",
    PlanEarning => "plan_earning",
    GiftSent => "gift_sent",
    GiftReceived => "gift_received",
    EscrowHold => "escrow_hold",
    EscrowRelease => "escrow_release",
    AdminAdjustment => "admin_adjustment",
    Refund => "refund",
    Withdrawal => "withdrawal",
});

wire_enum!(TransactionStatus {
    Pending => "pending",
    Completed => "completed",
    Failed => "failed",
});

wire_enum!(DeviceType {
    Mobile => "mobile",
    Desktop => "desktop",
    Tablet => "tablet",
});

wire_enum!(DocumentType {
    GovernmentId => "government_id",
    Passport => "passport",
    DriverLicense => "driver_license",
});

wire_enum!(ChatStatus {
    Active => "active",
    Archived => "archived",
    Flagged => "flagged",
});

wire_enum!(ReviewStatus {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
    Flagged => "flagged",
});

wire_enum!(ReviewAction {
    Approve => "approve",
    Reject => "reject",
    Flag => "flag",
});

wire_enum!(DisputeType {
    PlanNotHappened => "plan_not_happened",
    HostIssues => "host_issues",
    JoinerIssues => "joiner_issues",
    PaymentProblems => "payment_problems",
    FalseAdvertising => "false_advertising",
    SafetyConcerns => "safety_concerns",
});

wire_enum!(DisputeStatus {
    Open => "open",
    Investigating => "investigating",
    AwaitingResponse => "awaiting_response",
    Resolved => "resolved",
    Closed => "closed",
    Escalated => "escalated",
});

wire_enum!(ResolutionAction {
    FullRefund => "full_refund",
    PartialRefund => "partial_refund",
    HostPenalty => "host_penalty",
    Warning => "warning",
    NoAction => "no_action",
    Escalate => "escalate",
});

wire_enum!(SubscriptionStatus {
    Active => "active",
    Expired => "expired",
    Cancelled => "cancelled",
});

impl SubscriptionTier {
    pub fn is_paid(self) -> bool {
        self != SubscriptionTier::Basic
    }
}

impl DisputeStatus {
    pub fn is_settled(self) -> bool {
        matches!(self, DisputeStatus::Resolved | DisputeStatus::Closed)
    }
}

/// Plan monetization model; serialised as the numeric code the console expects.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub enum PlanType {
    HostPays,
    JoinersPay,
    Bidding,
}

impl PlanType {
    pub const ALL: &'static [PlanType] =
        &[PlanType::HostPays, PlanType::JoinersPay, PlanType::Bidding];

    pub fn code(self) -> u8 {
        match self {
            PlanType::HostPays => 1,
            PlanType::JoinersPay => 2,
            PlanType::Bidding => 3,
        }
    }
}

impl From<PlanType> for u8 {
    fn from(value: PlanType) -> Self {
        value.code()
    }
}

impl TryFrom<u8> for PlanType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PlanType::HostPays),
            2 => Ok(PlanType::JoinersPay),
            3 => Ok(PlanType::Bidding),
            other => Err(format!("unknown plan type {other}")),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Wallet {
    pub beens_points: i64,
    pub escrow_beens_points: i64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Traits {
    pub polite: i64,
    pub funny: i64,
    pub reliable: i64,
    pub charismatic: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserVerification {
    pub phone_verified_at: Option<DateTime<Utc>>,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub legal_documents_verified_at: Option<DateTime<Utc>>,
    pub address_verified_at: Option<DateTime<Utc>>,
    pub status: VerificationStatus,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing)]
    pub password: String,
    pub status: UserStatus,
    pub profile_image: Vec<String>,
    pub bio: String,
    pub highlight: String,
    pub address: Address,
    pub dob: Option<NaiveDate>,
    pub gender: Gender,
    pub interests: Vec<String>,
    pub profile_level: u8,
    pub profile_points: i64,
    pub wallet: Wallet,
    pub current_subscription: SubscriptionTier,
    pub subscription_expires_at: Option<DateTime<Utc>>,
    pub traits: Traits,
    pub total_reviews: i64,
    pub verification: UserVerification,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    pub total_bp_spent: i64,
    pub total_plans_joined: i64,
    pub total_plans_hosted: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    pub id: String,
    pub host_id: String,
    pub template_id: Option<String>,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: Address,
    #[serde(rename = "type")]
    pub plan_type: PlanType,
    pub status: PlanStatus,
    pub application_close_date: DateTime<Utc>,
    pub view_mode: ViewMode,
    pub gender: Option<Vec<Gender>>,
    pub min_age: Option<u8>,
    pub max_age: Option<u8>,
    pub max_participants: i64,
    pub current_participants: i64,
    pub min_bp_per_participant: Option<i64>,
    pub min_profile_level: Option<u8>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub total_applications: i64,
    pub avg_rating: Option<f64>,
    pub total_revenue_bp: i64,
    pub is_sponsored: bool,
    pub sponsor_info: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Application {
    pub id: String,
    pub plan_id: String,
    pub user_id: String,
    pub bid_amount: Option<i64>,
    pub application_type: ApplicationType,
    pub status: ApplicationStatus,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TransactionMetadata {
    pub ip_address: String,
    pub user_agent: String,
    pub device_type: DeviceType,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: i64,
    pub service_fee: i64,
    pub net_amount: i64,
    pub description: String,
    pub status: TransactionStatus,
    pub reference_id: Option<String>,
    pub gateway_transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub failed_reason: Option<String>,
    pub metadata: TransactionMetadata,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Verification {
    pub id: String,
    pub user_id: String,
    pub status: VerificationStatus,
    pub document_type: DocumentType,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewer_id: Option<String>,
    pub notes: String,
    pub rejection_reason: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Chat {
    pub id: String,
    pub participants: Vec<String>,
    pub plan_id: String,
    pub message_count: i64,
    pub last_message_at: DateTime<Utc>,
    pub status: ChatStatus,
    pub gift_transactions: i64,
    pub total_gifts_bp: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: String,
    pub plan_id: String,
    pub reviewer_id: String,
    pub reviewee_id: String,
    pub rating: u8,
    pub review_text: String,
    pub traits: Traits,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Dispute {
    pub id: String,
    pub plan_id: String,
    pub complainant_id: String,
    pub respondent_id: String,
    pub dispute_type: DisputeType,
    pub status: DisputeStatus,
    pub disputed_amount: i64,
    pub description: String,
    pub resolution_notes: Option<String>,
    pub resolution_action: Option<ResolutionAction>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Subscription {
    pub id: String,
    pub user_id: String,
    pub user_level: u8,
    pub current_plan: SubscriptionTier,
    pub status: SubscriptionStatus,
    pub monthly_cost: i64,
    pub subscription_start: DateTime<Utc>,
    pub next_billing: Option<DateTime<Utc>>,
    pub auto_renew: bool,
    pub plans_this_month: i64,
    pub bp_spent_this_month: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plan_type_travels_as_number() {
        assert_eq!(serde_json::to_value(PlanType::Bidding).unwrap(), json!(3));
        let parsed: PlanType = serde_json::from_value(json!(1)).unwrap();
        assert_eq!(parsed, PlanType::HostPays);
        assert!(serde_json::from_value::<PlanType>(json!(7)).is_err());
    }

    #[test]
    fn subscription_tier_uses_legacy_names() {
        assert_eq!(
            serde_json::to_value(SubscriptionTier::Silver).unwrap(),
            json!("Plan_2")
        );
        assert_eq!(SubscriptionTier::Black.as_str(), "Plan_3");
        assert!(!SubscriptionTier::Basic.is_paid());
    }

    #[test]
    fn status_strings_match_wire_format() {
        assert_eq!(UserStatus::PendingVerification.to_string(), "pending_verification");
        assert_eq!(TransactionType::ALL.len(), 10);
        assert!(DisputeStatus::Closed.is_settled());
        assert!(!DisputeStatus::Escalated.is_settled());
    }
}
