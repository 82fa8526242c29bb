//! Runtime-editable business settings shown on the console's configuration
//! screen. Sections are addressed by their serialized name.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{DisputeType, SubscriptionTier};
use crate::services::{apply_patch, ApiError, ApiResult};

/// Upper bound for the hour-based plan rules (one year).
pub const MAX_RULE_HOURS: i64 = 24 * 365;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BeensPointsSettings {
    pub usd_conversion_rate: i64,
    pub service_fee_percent: i64,
    pub min_purchase_amount: i64,
    pub max_purchase_amount: i64,
}

impl Default for BeensPointsSettings {
    fn default() -> Self {
        Self {
            usd_conversion_rate: 1000,
            service_fee_percent: 10,
            min_purchase_amount: 100,
            max_purchase_amount: 100_000,
        }
    }
}

impl BeensPointsSettings {
    pub fn to_usd(&self, points: i64) -> f64 {
        points as f64 / self.usd_conversion_rate.max(1) as f64
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlanRules {
    pub cancellation_hours: i64,
    pub application_close_before_hours: i64,
    pub max_participants_limit: i64,
}

impl Default for PlanRules {
    fn default() -> Self {
        Self {
            cancellation_hours: 24,
            application_close_before_hours: 1,
            max_participants_limit: 50,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DisputeSettings {
    pub window_days: i64,
    pub auto_resolve_days: i64,
    pub types: Vec<DisputeType>,
}

impl Default for DisputeSettings {
    fn default() -> Self {
        Self {
            window_days: 2,
            auto_resolve_days: 7,
            types: vec![
                DisputeType::PlanNotHappened,
                DisputeType::HostIssues,
                DisputeType::JoinerIssues,
                DisputeType::PaymentProblems,
            ],
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Milestone {
    pub bp_spent: i64,
    pub plans_joined: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LevelMilestones {
    pub level_2: Milestone,
    pub level_3: Milestone,
}

impl Default for LevelMilestones {
    fn default() -> Self {
        Self {
            level_2: Milestone {
                bp_spent: 5000,
                plans_joined: 10,
            },
            level_3: Milestone {
                bp_spent: 20000,
                plans_joined: 50,
            },
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GiftEmoji {
    pub emoji: String,
    pub name: String,
    pub price: i64,
}

fn default_gifts() -> Vec<GiftEmoji> {
    [
        ("🌹", "Rose", 500),
        ("⭐", "Star", 1000),
        ("💎", "Diamond", 2000),
        ("🏆", "Trophy", 1500),
        ("❤️", "Heart", 800),
        ("🔥", "Fire", 1200),
    ]
    .into_iter()
    .map(|(emoji, name, price)| GiftEmoji {
        emoji: emoji.into(),
        name: name.into(),
        price,
    })
    .collect()
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionPlan {
    pub name: String,
    pub price: i64,
    pub level_access: u8,
    pub features: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionPlans {
    #[serde(rename = "Plan_1")]
    pub basic: SubscriptionPlan,
    #[serde(rename = "Plan_2")]
    pub silver: SubscriptionPlan,
    #[serde(rename = "Plan_3")]
    pub black: SubscriptionPlan,
}

impl SubscriptionPlans {
    pub fn get(&self, tier: SubscriptionTier) -> &SubscriptionPlan {
        match tier {
            SubscriptionTier::Basic => &self.basic,
            SubscriptionTier::Silver => &self.silver,
            SubscriptionTier::Black => &self.black,
        }
    }

    /// Monthly price in BP.
    pub fn price_for(&self, tier: SubscriptionTier) -> i64 {
        self.get(tier).price
    }
}

impl Default for SubscriptionPlans {
    fn default() -> Self {
        let plan = |name: &str, price: i64, level_access: u8, features: &[&str]| SubscriptionPlan {
            name: name.into(),
            price,
            level_access,
            features: features.iter().map(|f| f.to_string()).collect(),
        };
        Self {
            basic: plan(
                "Basic",
                0,
                1,
                &["Basic plan access", "Level 1 interactions"],
            ),
            silver: plan(
                "Silver",
                999,
                2,
                &["Premium plans", "Level 1-2 interactions", "Priority support"],
            ),
            black: plan(
                "Black",
                2999,
                3,
                &["Exclusive access", "All level interactions", "VIP support"],
            ),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlatformConfig {
    pub beens_points: BeensPointsSettings,
    pub plan_rules: PlanRules,
    pub dispute_settings: DisputeSettings,
    pub level_milestones: LevelMilestones,
    pub gift_emojis: Vec<GiftEmoji>,
    pub subscription_plans: SubscriptionPlans,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            beens_points: BeensPointsSettings::default(),
            plan_rules: PlanRules::default(),
            dispute_settings: DisputeSettings::default(),
            level_milestones: LevelMilestones::default(),
            gift_emojis: default_gifts(),
            subscription_plans: SubscriptionPlans::default(),
        }
    }
}

impl PlatformConfig {
    /// Replace or merge one section. Object sections merge key by key, list
    /// sections are replaced wholesale.
    pub fn update_section(&self, section: &str, values: &Value) -> ApiResult<Self> {
        let current = serde_json::to_value(self)?;
        let Some(existing) = current.get(section) else {
            return Err(ApiError::NotFound(format!("config section {section}")));
        };
        let merged = match (existing, values) {
            (Value::Object(_), Value::Object(_)) => apply_patch(existing, values, &[])?,
            _ => values.clone(),
        };
        let mut next = current;
        next[section] = merged;
        let updated: Self =
            serde_json::from_value(next).map_err(|err| ApiError::Validation(err.to_string()))?;
        updated.validate()?;
        Ok(updated)
    }

    pub fn validate(&self) -> ApiResult<()> {
        let bp = &self.beens_points;
        if bp.usd_conversion_rate <= 0 {
            return Err(ApiError::Validation("usd_conversion_rate must be positive".into()));
        }
        if !(0..=100).contains(&bp.service_fee_percent) {
            return Err(ApiError::Validation("service_fee_percent must be 0-100".into()));
        }
        if bp.min_purchase_amount > bp.max_purchase_amount {
            return Err(ApiError::Validation(
                "min_purchase_amount exceeds max_purchase_amount".into(),
            ));
        }
        let rules = &self.plan_rules;
        if !(0..=MAX_RULE_HOURS).contains(&rules.application_close_before_hours) {
            return Err(ApiError::Validation(format!(
                "application_close_before_hours must be 0-{MAX_RULE_HOURS}"
            )));
        }
        if !(0..=MAX_RULE_HOURS).contains(&rules.cancellation_hours) {
            return Err(ApiError::Validation(format!(
                "cancellation_hours must be 0-{MAX_RULE_HOURS}"
            )));
        }
        if rules.max_participants_limit < 2 {
            return Err(ApiError::Validation("max_participants_limit must be at least 2".into()));
        }
        let milestones = &self.level_milestones;
        if milestones.level_3.bp_spent < milestones.level_2.bp_spent
            || milestones.level_3.plans_joined < milestones.level_2.plans_joined
        {
            return Err(ApiError::Validation("level 3 milestone below level 2".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_published_rates() {
        let config = PlatformConfig::default();
        assert_eq!(config.beens_points.usd_conversion_rate, 1000);
        assert_eq!(config.gift_emojis.len(), 6);
        assert_eq!(config.subscription_plans.price_for(SubscriptionTier::Black), 2999);
        assert_eq!(config.beens_points.to_usd(2500), 2.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn object_sections_merge() {
        let config = PlatformConfig::default();
        let updated = config
            .update_section("beens_points", &json!({"service_fee_percent": 15}))
            .unwrap();
        assert_eq!(updated.beens_points.service_fee_percent, 15);
        assert_eq!(updated.beens_points.usd_conversion_rate, 1000);
    }

    #[test]
    fn list_sections_replace() {
        let config = PlatformConfig::default();
        let updated = config
            .update_section(
                "gift_emojis",
                &json!([{"emoji": "🎈", "name": "Balloon", "price": 300}]),
            )
            .unwrap();
        assert_eq!(updated.gift_emojis.len(), 1);
        assert_eq!(updated.gift_emojis[0].name, "Balloon");
    }

    #[test]
    fn unknown_section_and_bad_values_rejected() {
        let config = PlatformConfig::default();
        assert!(matches!(
            config.update_section("nope", &json!({})),
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            config.update_section("beens_points", &json!({"service_fee_percent": 250})),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            config.update_section("plan_rules", &json!({"cancellation_hours": "soon"})),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn plan_rule_hours_are_bounded() {
        let config = PlatformConfig::default();
        for hours in [i64::MAX, -1, MAX_RULE_HOURS + 1] {
            assert!(matches!(
                config.update_section(
                    "plan_rules",
                    &json!({"application_close_before_hours": hours})
                ),
                Err(ApiError::Validation(_))
            ));
        }
        let updated = config
            .update_section("plan_rules", &json!({"application_close_before_hours": 0}))
            .unwrap();
        assert_eq!(updated.plan_rules.application_close_before_hours, 0);
    }
}
