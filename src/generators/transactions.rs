use super::Generator;
use crate::models::{
    DeviceType, Transaction, TransactionMetadata, TransactionStatus, TransactionType,
};

const STATUSES: &[TransactionStatus] = &[
    TransactionStatus::Pending,
    TransactionStatus::Completed,
    TransactionStatus::Completed,
    TransactionStatus::Failed,
];

const GIFT_PRICES: &[i64] = &[500, 800, 1000, 1200, 1500, 2000];

const FAILURE_REASONS: &[&str] = &[
    "Insufficient funds",
    "Payment gateway error",
    "Invalid payment method",
    "Transaction declined",
];

/// bp_purchase carries the platform service fee; every other type is fee-free.
pub const SERVICE_FEE_RATE: f64 = 0.1;

fn amount_for(gen: &mut Generator, kind: TransactionType) -> i64 {
    match kind {
        TransactionType::BpPurchase => gen.int(1000, 50000),
        TransactionType::PlanPayment | TransactionType::PlanEarning => gen.int(200, 5000),
        TransactionType::GiftSent | TransactionType::GiftReceived => gen.pick(GIFT_PRICES),
        TransactionType::EscrowHold | TransactionType::EscrowRelease => gen.int(500, 3000),
        TransactionType::AdminAdjustment => gen.int(-2000, 5000),
        TransactionType::Refund => gen.int(200, 3000),
        TransactionType::Withdrawal => gen.int(1000, 10000),
    }
}

pub fn describe(kind: TransactionType, amount: i64) -> String {
    match kind {
        TransactionType::BpPurchase => format!("Purchased {amount} BeensPoints"),
        TransactionType::PlanPayment => "Payment for plan participation".into(),
        TransactionType::PlanEarning => "Earned from hosting plan".into(),
        TransactionType::GiftSent => "Gift sent to user".into(),
        TransactionType::GiftReceived => "Gift received from user".into(),
        TransactionType::EscrowHold => "Payment held in escrow".into(),
        TransactionType::EscrowRelease => "Escrow payment released".into(),
        TransactionType::AdminAdjustment if amount > 0 => "Admin credit adjustment".into(),
        TransactionType::AdminAdjustment => "Admin debit adjustment".into(),
        TransactionType::Refund => "Refund for cancelled plan".into(),
        TransactionType::Withdrawal => "Withdrawal to bank account".into(),
    }
}

fn has_reference(kind: TransactionType) -> bool {
    matches!(
        kind,
        TransactionType::PlanPayment
            | TransactionType::PlanEarning
            | TransactionType::EscrowHold
            | TransactionType::EscrowRelease
    )
}

pub fn generate_transaction(gen: &mut Generator, user_id: String) -> Transaction {
    let kind = gen.pick(TransactionType::ALL);
    let status = gen.pick(STATUSES);
    let created_at = gen.past_days(365);
    let amount = amount_for(gen, kind);
    let service_fee = if kind == TransactionType::BpPurchase {
        (amount as f64 * SERVICE_FEE_RATE).round() as i64
    } else {
        0
    };
    let completed = status == TransactionStatus::Completed;
    let completed_at = completed.then(|| gen.between(created_at, gen.now()));

    Transaction {
        id: gen.object_id(),
        user_id,
        kind,
        amount,
        service_fee,
        net_amount: amount - service_fee,
        description: describe(kind, amount),
        status,
        reference_id: has_reference(kind).then(|| gen.object_id()),
        gateway_transaction_id: (kind == TransactionType::BpPurchase)
            .then(|| gen.alphanumeric(20)),
        created_at,
        updated_at: completed_at.unwrap_or(created_at),
        completed_at,
        failed_reason: (status == TransactionStatus::Failed)
            .then(|| gen.pick(FAILURE_REASONS).to_string()),
        metadata: TransactionMetadata {
            ip_address: gen.ip(),
            user_agent: gen.user_agent(),
            device_type: gen.pick(DeviceType::ALL),
        },
    }
}

pub fn generate_transactions(
    gen: &mut Generator,
    count: usize,
    user_ids: &[String],
) -> Vec<Transaction> {
    (0..count)
        .map(|_| {
            let user_id = gen.pick_id(user_ids);
            generate_transaction(gen, user_id)
        })
        .collect()
}
