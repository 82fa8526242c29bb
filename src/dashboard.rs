use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    Plan, PlanStatus, PlanType, Transaction, TransactionStatus, TransactionType, User, UserStatus,
};
use crate::platform::BeensPointsSettings;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserStats {
    pub total: usize,
    pub active: usize,
    pub new_today: usize,
    pub growth_rate: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlanStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub success_rate: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FinancialStats {
    pub revenue_usd: f64,
    pub total_bp_circulating: i64,
    pub transactions_today: usize,
    pub avg_transaction: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    pub users: UserStats,
    pub plans: PlanStats,
    pub financial: FinancialStats,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GrowthPoint {
    pub month: String,
    pub users: usize,
    pub plans: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RevenuePoint {
    pub month: String,
    pub revenue: f64,
    pub transactions: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DistributionSlice {
    pub name: String,
    pub value: f64,
    pub color: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsData {
    pub user_growth: Vec<GrowthPoint>,
    pub revenue_data: Vec<RevenuePoint>,
    pub plan_distribution: Vec<DistributionSlice>,
}

const TRAILING_MONTHS: u32 = 12;

fn completed(transactions: &[Transaction]) -> impl Iterator<Item = &Transaction> {
    transactions
        .iter()
        .filter(|t| t.status == TransactionStatus::Completed)
}

fn purchase_fees<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> i64 {
    transactions
        .filter(|t| t.kind == TransactionType::BpPurchase)
        .map(|t| t.service_fee)
        .sum()
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

pub fn dashboard_stats(
    users: &[User],
    plans: &[Plan],
    transactions: &[Transaction],
    rates: &BeensPointsSettings,
    now: DateTime<Utc>,
) -> DashboardStats {
    let today = now.date_naive();

    let new_today = users
        .iter()
        .filter(|u| u.created_at.date_naive() >= today)
        .count();
    let user_stats = UserStats {
        total: users.len(),
        active: users.iter().filter(|u| u.status == UserStatus::Active).count(),
        new_today,
        growth_rate: percent(new_today, users.len().saturating_sub(new_today).max(1)),
    };

    let completed_plans = plans
        .iter()
        .filter(|p| p.status == PlanStatus::Completed)
        .count();
    let plan_stats = PlanStats {
        total: plans.len(),
        active: plans.iter().filter(|p| p.status == PlanStatus::Active).count(),
        completed: completed_plans,
        success_rate: percent(completed_plans, plans.len()),
    };

    let done: Vec<&Transaction> = completed(transactions).collect();
    let total_amount: i64 = done.iter().map(|t| t.amount).sum();
    let financial = FinancialStats {
        revenue_usd: rates.to_usd(purchase_fees(done.iter().copied())),
        total_bp_circulating: done
            .iter()
            .filter(|t| t.kind == TransactionType::BpPurchase)
            .map(|t| t.amount)
            .sum(),
        transactions_today: done
            .iter()
            .filter(|t| t.created_at.date_naive() >= today)
            .count(),
        avg_transaction: if done.is_empty() {
            0
        } else {
            (total_amount as f64 / done.len() as f64).round() as i64
        },
    };

    DashboardStats {
        users: user_stats,
        plans: plan_stats,
        financial,
    }
}

/// First day of each of the trailing months, oldest first, ending with the
/// month containing `now`.
fn trailing_months(now: DateTime<Utc>) -> Vec<NaiveDate> {
    let current = now.year() * 12 + now.month0() as i32;
    (0..TRAILING_MONTHS as i32)
        .rev()
        .filter_map(|back| {
            let index = current - back;
            NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)
        })
        .collect()
}

fn same_month(at: DateTime<Utc>, month: NaiveDate) -> bool {
    at.year() == month.year() && at.month() == month.month()
}

pub fn analytics(
    users: &[User],
    plans: &[Plan],
    transactions: &[Transaction],
    rates: &BeensPointsSettings,
    now: DateTime<Utc>,
) -> AnalyticsData {
    let months = trailing_months(now);

    let user_growth = months
        .iter()
        .map(|&month| GrowthPoint {
            month: month.format("%b").to_string(),
            users: users.iter().filter(|u| same_month(u.created_at, month)).count(),
            plans: plans.iter().filter(|p| same_month(p.created_at, month)).count(),
        })
        .collect();

    let revenue_data = months
        .iter()
        .map(|&month| {
            let in_month = || transactions.iter().filter(move |t| same_month(t.created_at, month));
            RevenuePoint {
                month: month.format("%b").to_string(),
                revenue: rates.to_usd(purchase_fees(
                    in_month().filter(|t| t.status == TransactionStatus::Completed),
                )),
                transactions: in_month().count(),
            }
        })
        .collect();

    let plan_distribution = PlanType::ALL
        .iter()
        .map(|&kind| {
            let (name, color) = match kind {
                PlanType::HostPays => ("Host Pays", "#722ed1"),
                PlanType::JoinersPay => ("Joiners Pay", "#1890ff"),
                PlanType::Bidding => ("Bidding", "#fa8c16"),
            };
            let count = plans.iter().filter(|p| p.plan_type == kind).count();
            DistributionSlice {
                name: name.into(),
                value: (percent(count, plans.len()) * 10.0).round() / 10.0,
                color: color.into(),
            }
        })
        .collect();

    AnalyticsData {
        user_growth,
        revenue_data,
        plan_distribution,
    }
}
