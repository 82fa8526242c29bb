use chrono::Duration;

use super::Generator;
use crate::models::{
    Chat, ChatStatus, Dispute, DisputeStatus, DisputeType, DocumentType, Plan, PlanStatus,
    ResolutionAction, Review, ReviewStatus, Subscription, SubscriptionStatus, SubscriptionTier,
    Traits, User, Verification, VerificationStatus,
};
use crate::platform::SubscriptionPlans;

pub const ADMIN_REVIEWER: &str = "admin_1";

const GIFT_PRICES: &[i64] = &[500, 800, 1000, 1200, 1500, 2000];

const REVIEW_STATUSES: &[ReviewStatus] = &[
    ReviewStatus::Pending,
    ReviewStatus::Approved,
    ReviewStatus::Flagged,
];

const DISPUTE_TYPES: &[DisputeType] = &[
    DisputeType::PlanNotHappened,
    DisputeType::PlanNotHappened,
    DisputeType::HostIssues,
    DisputeType::HostIssues,
    DisputeType::JoinerIssues,
    DisputeType::JoinerIssues,
    DisputeType::PaymentProblems,
    DisputeType::PaymentProblems,
    DisputeType::FalseAdvertising,
    DisputeType::SafetyConcerns,
];

const DISPUTE_STATUSES: &[DisputeStatus] = &[
    DisputeStatus::Open,
    DisputeStatus::Investigating,
    DisputeStatus::Resolved,
    DisputeStatus::Closed,
];

const SETTLING_ACTIONS: &[ResolutionAction] = &[
    ResolutionAction::FullRefund,
    ResolutionAction::PartialRefund,
    ResolutionAction::HostPenalty,
    ResolutionAction::Warning,
    ResolutionAction::NoAction,
];

const PAID_STATUSES: &[SubscriptionStatus] = &[
    SubscriptionStatus::Active,
    SubscriptionStatus::Active,
    SubscriptionStatus::Active,
    SubscriptionStatus::Cancelled,
];

fn review_text(rating: u8) -> &'static str {
    match rating {
        5 => "Great experience! Highly recommend.",
        4 => "Really enjoyed it, would join again.",
        3 => "It was okay, a few things could be better.",
        2 => "Not what I expected from the description.",
        _ => "Disappointing, the host was late and unprepared.",
    }
}

fn dispute_description(kind: DisputeType) -> &'static str {
    match kind {
        DisputeType::PlanNotHappened => {
            "The plan did not happen as described and I want a refund."
        }
        DisputeType::HostIssues => "The host was rude and left early without explanation.",
        DisputeType::JoinerIssues => "A participant was disruptive during the whole plan.",
        DisputeType::PaymentProblems => "I was charged twice for the same plan.",
        DisputeType::FalseAdvertising => "The venue and activities differed from the listing.",
        DisputeType::SafetyConcerns => "I did not feel safe at the meeting location.",
    }
}

fn resolution_note(action: ResolutionAction) -> &'static str {
    match action {
        ResolutionAction::FullRefund => "Resolved with full refund",
        ResolutionAction::PartialRefund => "Resolved with partial refund",
        ResolutionAction::HostPenalty => "Penalty applied to host account",
        ResolutionAction::Warning => "Warning issued to involved party",
        ResolutionAction::NoAction => "Closed without action",
        ResolutionAction::Escalate => "Escalated to senior admin",
    }
}

/// Review queue entries, users with unfinished verification first.
pub fn generate_verifications(
    gen: &mut Generator,
    count: usize,
    users: &[User],
) -> Vec<Verification> {
    let mut queue: Vec<&User> = users.iter().collect();
    queue.sort_by_key(|user| user.verification.status == VerificationStatus::Approved);
    queue
        .into_iter()
        .take(count)
        .map(|user| {
            let status = user.verification.status;
            let window_start = user.created_at.max(gen.now() - Duration::days(7));
            let submitted_at = gen.between(window_start, gen.now());
            let reviewed = status != VerificationStatus::Pending;
            Verification {
                id: gen.object_id(),
                user_id: user.id.clone(),
                status,
                document_type: gen.pick(DocumentType::ALL),
                submitted_at,
                reviewed_at: reviewed.then(|| gen.between(submitted_at, gen.now())),
                reviewer_id: reviewed.then(|| ADMIN_REVIEWER.to_string()),
                notes: gen.sentence(),
                rejection_reason: None,
            }
        })
        .collect()
}

pub fn generate_chats(
    gen: &mut Generator,
    count: usize,
    plan_ids: &[String],
    user_ids: &[String],
) -> Vec<Chat> {
    (0..count)
        .map(|_| {
            let mut participants = gen.pick_some(user_ids, 2, 2);
            while participants.len() < 2 {
                participants.push(gen.object_id());
            }
            let created_at = gen.past_days(30);
            let window_start = created_at.max(gen.now() - Duration::days(7));
            let gift_transactions = gen.int(0, 9);
            let total_gifts_bp: i64 = (0..gift_transactions).map(|_| gen.pick(GIFT_PRICES)).sum();
            Chat {
                id: gen.object_id(),
                participants,
                plan_id: gen.pick_id(plan_ids),
                message_count: gen.int(5, 104),
                last_message_at: gen.between(window_start, gen.now()),
                status: gen.pick(ChatStatus::ALL),
                gift_transactions,
                total_gifts_bp,
                created_at,
            }
        })
        .collect()
}

fn pick_plan<'a>(gen: &mut Generator, plans: &'a [Plan], finished_only: bool) -> Option<&'a Plan> {
    let finished: Vec<&Plan> = plans
        .iter()
        .filter(|plan| plan.status == PlanStatus::Completed)
        .collect();
    if finished_only && !finished.is_empty() {
        return Some(gen.pick(&finished));
    }
    let all: Vec<&Plan> = plans.iter().collect();
    (!all.is_empty()).then(|| gen.pick(&all))
}

/// Reviews of plan hosts, written after the plan ended.
pub fn generate_reviews(
    gen: &mut Generator,
    count: usize,
    plans: &[Plan],
    user_ids: &[String],
) -> Vec<Review> {
    (0..count)
        .map(|_| {
            let plan = pick_plan(gen, plans, true);
            let (plan_id, reviewee_id) = match plan {
                Some(plan) => (plan.id.clone(), plan.host_id.clone()),
                None => (gen.object_id(), gen.pick_id(user_ids)),
            };
            let mut reviewer_id = gen.pick_id(user_ids);
            if reviewer_id == reviewee_id {
                reviewer_id = gen.pick_id(user_ids);
            }
            let created_at = match plan {
                Some(plan) if plan.end_date < gen.now() => gen.between(plan.end_date, gen.now()),
                _ => gen.past_days(30),
            };
            let rating = gen.int(1, 5) as u8;
            Review {
                id: gen.object_id(),
                plan_id,
                reviewer_id,
                reviewee_id,
                rating,
                review_text: review_text(rating).to_string(),
                traits: Traits {
                    polite: gen.int(1, 5),
                    funny: gen.int(1, 5),
                    reliable: gen.int(1, 5),
                    charismatic: gen.int(1, 5),
                },
                status: gen.pick(REVIEW_STATUSES),
                created_at,
            }
        })
        .collect()
}

/// Disputes raised by a participant against the plan host.
pub fn generate_disputes(
    gen: &mut Generator,
    count: usize,
    plans: &[Plan],
    user_ids: &[String],
) -> Vec<Dispute> {
    (0..count)
        .map(|_| {
            let (plan_id, respondent_id) = match pick_plan(gen, plans, false) {
                Some(plan) => (plan.id.clone(), plan.host_id.clone()),
                None => (gen.object_id(), gen.pick_id(user_ids)),
            };
            let dispute_type = gen.pick(DISPUTE_TYPES);
            let status = gen.pick(DISPUTE_STATUSES);
            let created_at = gen.past_days(30);
            let action = status.is_settled().then(|| gen.pick(SETTLING_ACTIONS));
            Dispute {
                id: gen.object_id(),
                plan_id,
                complainant_id: gen.pick_id(user_ids),
                respondent_id,
                dispute_type,
                status,
                disputed_amount: gen.int(500, 3500),
                description: dispute_description(dispute_type).to_string(),
                resolution_notes: action.map(|action| resolution_note(action).to_string()),
                resolution_action: action,
                created_at,
                resolved_at: action.map(|_| gen.between(created_at, gen.now())),
            }
        })
        .collect()
}

/// Billing record mirroring the user's tier and level.
pub fn generate_subscription(gen: &mut Generator, user: &User) -> Subscription {
    let tier = user.current_subscription;
    let status = if tier.is_paid() {
        gen.pick(PAID_STATUSES)
    } else {
        SubscriptionStatus::Active
    };
    let billing = tier.is_paid() && status == SubscriptionStatus::Active;
    Subscription {
        id: gen.object_id(),
        user_id: user.id.clone(),
        user_level: user.profile_level,
        current_plan: tier,
        status,
        monthly_cost: SubscriptionPlans::default().price_for(tier),
        subscription_start: gen.between(user.created_at, gen.now()),
        next_billing: billing.then(|| gen.future_days(30)),
        auto_renew: billing && gen.chance(0.7),
        plans_this_month: gen.int(0, 19),
        bp_spent_this_month: if tier == SubscriptionTier::Basic {
            gen.int(0, 2000)
        } else {
            gen.int(0, 9999)
        },
    }
}

pub fn generate_subscriptions(gen: &mut Generator, users: &[User]) -> Vec<Subscription> {
    users
        .iter()
        .map(|user| generate_subscription(gen, user))
        .collect()
}
