//! Label and colour tables behind the console's dropdowns, status badges
//! and filter chips.

use serde::Serialize;
use serde_json::{json, Value};

use crate::models::{
    ApplicationStatus, DisputeStatus, DisputeType, PlanStatus, PlanType, ResolutionAction,
    ReviewStatus, SubscriptionTier, TransactionType, UserStatus, VerificationStatus,
};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct OptionEntry {
    pub value: Value,
    pub label: &'static str,
    pub color: &'static str,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Medium,
    High,
    Critical,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DisputeTypeInfo {
    pub key: DisputeType,
    pub label: &'static str,
    pub description: &'static str,
    pub severity: Severity,
    pub color: &'static str,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ResolutionInfo {
    pub key: ResolutionAction,
    pub label: &'static str,
    pub description: &'static str,
}

fn entry(value: impl Serialize, label: &'static str, color: &'static str) -> OptionEntry {
    OptionEntry {
        value: serde_json::to_value(value).unwrap_or(Value::Null),
        label,
        color,
    }
}

pub fn user_status_options() -> Vec<OptionEntry> {
    UserStatus::ALL
        .iter()
        .map(|status| match status {
            UserStatus::Active => entry(status, "Active", "green"),
            UserStatus::Inactive => entry(status, "Inactive", "orange"),
            UserStatus::Banned => entry(status, "Banned", "red"),
            UserStatus::PendingVerification => entry(status, "Pending Verification", "blue"),
        })
        .collect()
}

pub fn level_options() -> Vec<OptionEntry> {
    vec![
        entry(1, "Level 1", "default"),
        entry(2, "Level 2", "processing"),
        entry(3, "Level 3", "success"),
    ]
}

pub fn subscription_options() -> Vec<OptionEntry> {
    SubscriptionTier::ALL
        .iter()
        .map(|tier| match tier {
            SubscriptionTier::Basic => entry(tier, "Basic (Free)", "default"),
            SubscriptionTier::Silver => entry(tier, "Silver", "blue"),
            SubscriptionTier::Black => entry(tier, "Black", "gold"),
        })
        .collect()
}

pub fn verification_status_options() -> Vec<OptionEntry> {
    VerificationStatus::ALL
        .iter()
        .map(|status| match status {
            VerificationStatus::Pending => entry(status, "Pending Review", "processing"),
            VerificationStatus::Approved => entry(status, "Approved", "success"),
            VerificationStatus::Rejected => entry(status, "Rejected", "error"),
            VerificationStatus::RequiresAttention => {
                entry(status, "Requires Attention", "warning")
            }
        })
        .collect()
}

pub fn plan_type_options() -> Vec<OptionEntry> {
    PlanType::ALL
        .iter()
        .map(|kind| match kind {
            PlanType::HostPays => entry(kind, "Host Pays Joiners", "purple"),
            PlanType::JoinersPay => entry(kind, "Joiners Pay Host", "blue"),
            PlanType::Bidding => entry(kind, "Bidding Plan", "gold"),
        })
        .collect()
}

pub fn plan_status_options() -> Vec<OptionEntry> {
    PlanStatus::ALL
        .iter()
        .map(|status| match status {
            PlanStatus::Draft => entry(status, "Draft", "default"),
            PlanStatus::Published => entry(status, "Published", "blue"),
            PlanStatus::ApplicationsOpen => entry(status, "Applications Open", "green"),
            PlanStatus::ApplicationsClosed => entry(status, "Applications Closed", "orange"),
            PlanStatus::Active => entry(status, "Active", "processing"),
            PlanStatus::Completed => entry(status, "Completed", "success"),
            PlanStatus::Cancelled => entry(status, "Cancelled", "error"),
        })
        .collect()
}

pub fn application_status_options() -> Vec<OptionEntry> {
    ApplicationStatus::ALL
        .iter()
        .map(|status| match status {
            ApplicationStatus::Pending => entry(status, "Pending", "processing"),
            ApplicationStatus::Accepted => entry(status, "Accepted", "success"),
            ApplicationStatus::Rejected => entry(status, "Rejected", "error"),
        })
        .collect()
}

pub fn transaction_type_options() -> Vec<OptionEntry> {
    TransactionType::ALL
        .iter()
        .map(|kind| match kind {
            TransactionType::BpPurchase => entry(kind, "BP Purchase", "green"),
            TransactionType::PlanPayment => entry(kind, "Plan Payment", "blue"),
            TransactionType::PlanEarning => entry(kind, "Plan Earning", "cyan"),
            TransactionType::GiftSent => entry(kind, "Gift Sent", "magenta"),
            TransactionType::GiftReceived => entry(kind, "Gift Received", "purple"),
            TransactionType::EscrowHold => entry(kind, "Escrow Hold", "orange"),
            TransactionType::EscrowRelease => entry(kind, "Escrow Release", "gold"),
            TransactionType::AdminAdjustment => entry(kind, "Admin Adjustment", "volcano"),
            TransactionType::Refund => entry(kind, "Refund", "geekblue"),
            TransactionType::Withdrawal => entry(kind, "Withdrawal", "red"),
        })
        .collect()
}

pub fn review_status_options() -> Vec<OptionEntry> {
    ReviewStatus::ALL
        .iter()
        .map(|status| match status {
            ReviewStatus::Pending => entry(status, "Pending", "processing"),
            ReviewStatus::Approved => entry(status, "Approved", "success"),
            ReviewStatus::Rejected => entry(status, "Rejected", "error"),
            ReviewStatus::Flagged => entry(status, "Flagged", "warning"),
        })
        .collect()
}

pub fn dispute_status_options() -> Vec<OptionEntry> {
    DisputeStatus::ALL
        .iter()
        .map(|status| match status {
            DisputeStatus::Open => entry(status, "Open", "red"),
            DisputeStatus::Investigating => entry(status, "Investigating", "orange"),
            DisputeStatus::AwaitingResponse => entry(status, "Awaiting Response", "blue"),
            DisputeStatus::Resolved => entry(status, "Resolved", "green"),
            DisputeStatus::Closed => entry(status, "Closed", "default"),
            DisputeStatus::Escalated => entry(status, "Escalated", "purple"),
        })
        .collect()
}

pub fn dispute_type_info(kind: DisputeType) -> DisputeTypeInfo {
    let (label, description, severity, color) = match kind {
        DisputeType::PlanNotHappened => (
            "Plan Did Not Happen",
            "The planned activity did not occur as scheduled",
            Severity::High,
            "red",
        ),
        DisputeType::HostIssues => (
            "Host Issues",
            "Problems with the host behavior or service",
            Severity::Medium,
            "orange",
        ),
        DisputeType::JoinerIssues => (
            "Joiner Issues",
            "Problems with participant behavior",
            Severity::Medium,
            "orange",
        ),
        DisputeType::PaymentProblems => (
            "Payment Problems",
            "Issues with BlumePoints transactions",
            Severity::High,
            "red",
        ),
        DisputeType::FalseAdvertising => (
            "False Advertising",
            "Plan description did not match reality",
            Severity::Medium,
            "orange",
        ),
        DisputeType::SafetyConcerns => (
            "Safety Concerns",
            "Safety or security issues during the plan",
            Severity::Critical,
            "purple",
        ),
    };
    DisputeTypeInfo {
        key: kind,
        label,
        description,
        severity,
        color,
    }
}

pub fn resolution_actions() -> Vec<ResolutionInfo> {
    ResolutionAction::ALL
        .iter()
        .map(|&key| {
            let (label, description) = match key {
                ResolutionAction::FullRefund => {
                    ("Full Refund", "Refund all BlumePoints to the participant")
                }
                ResolutionAction::PartialRefund => {
                    ("Partial Refund", "Refund partial BlumePoints to the participant")
                }
                ResolutionAction::HostPenalty => {
                    ("Host Penalty", "Apply penalty to the host account")
                }
                ResolutionAction::Warning => ("Warning", "Issue a warning to the involved party"),
                ResolutionAction::NoAction => ("No Action", "Close dispute without any action"),
                ResolutionAction::Escalate => ("Escalate", "Escalate to senior admin"),
            };
            ResolutionInfo {
                key,
                label,
                description,
            }
        })
        .collect()
}

/// Every catalog keyed by name, as served from `/api/v1/options`.
pub fn all_options() -> Value {
    let dispute_types: Vec<DisputeTypeInfo> =
        DisputeType::ALL.iter().map(|&kind| dispute_type_info(kind)).collect();
    json!({
        "user_statuses": user_status_options(),
        "levels": level_options(),
        "subscriptions": subscription_options(),
        "verification_statuses": verification_status_options(),
        "plan_types": plan_type_options(),
        "plan_statuses": plan_status_options(),
        "application_statuses": application_status_options(),
        "transaction_types": transaction_type_options(),
        "review_statuses": review_status_options(),
        "dispute_statuses": dispute_status_options(),
        "dispute_types": dispute_types,
        "resolution_actions": resolution_actions(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogs_cover_every_variant() {
        assert_eq!(user_status_options().len(), UserStatus::ALL.len());
        assert_eq!(plan_status_options().len(), PlanStatus::ALL.len());
        assert_eq!(transaction_type_options().len(), TransactionType::ALL.len());
        assert_eq!(resolution_actions().len(), 6);
    }

    #[test]
    fn values_use_wire_form() {
        assert_eq!(plan_type_options()[2].value, json!(3));
        assert_eq!(subscription_options()[0].value, json!("Plan_1"));
        assert_eq!(
            user_status_options()[3].value,
            json!("pending_verification")
        );
    }

    #[test]
    fn safety_concerns_are_critical() {
        let info = dispute_type_info(DisputeType::SafetyConcerns);
        assert_eq!(info.severity, Severity::Critical);
        let all = all_options();
        assert_eq!(all["dispute_types"][5]["severity"], json!("critical"));
        assert_eq!(all["levels"].as_array().map(Vec::len), Some(3));
    }
}
