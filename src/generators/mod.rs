//! Synthetic record factories.
//!
//! Every factory draws from a shared [`Generator`], so one seed reproduces
//! a whole dataset relative to its fixed `now`.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::config::DatasetConfig;
use crate::models::{
    Address, Application, Chat, Dispute, Plan, Review, Subscription, Transaction, User,
    Verification,
};

mod applications;
mod moderation;
mod plans;
mod transactions;
mod users;
mod words;

pub use applications::{generate_application, generate_applications};
pub use moderation::{
    generate_chats, generate_disputes, generate_reviews, generate_subscription,
    generate_subscriptions, generate_verifications, ADMIN_REVIEWER,
};
pub use plans::{generate_plan, generate_plans, PLAN_TITLES};
pub use transactions::{
    describe as describe_transaction, generate_transaction, generate_transactions,
};
pub use users::{generate_user, generate_users};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

pub struct Generator {
    rng: StdRng,
    now: DateTime<Utc>,
}

impl Generator {
    pub fn new(seed: Option<u64>, now: DateTime<Utc>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, now }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// 24 hex characters, shaped like a Mongo object id.
    pub fn object_id(&mut self) -> String {
        format!("{:08x}{:016x}", self.rng.gen::<u32>(), self.rng.gen::<u64>())
    }

    pub fn int(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Uniform pick; repeated entries in `items` act as weights.
    pub fn pick<T: Clone>(&mut self, items: &[T]) -> T {
        items
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| panic!("pick from an empty table"))
    }

    pub fn pick_some<T: Clone>(&mut self, items: &[T], min: usize, max: usize) -> Vec<T> {
        let count = self.int(min as i64, max.min(items.len()) as i64) as usize;
        items
            .choose_multiple(&mut self.rng, count)
            .cloned()
            .collect()
    }

    /// An existing id when there are any, otherwise a fresh dangling one.
    pub fn pick_id(&mut self, ids: &[String]) -> String {
        match ids.choose(&mut self.rng) {
            Some(id) => id.clone(),
            None => self.object_id(),
        }
    }

    pub fn past_days(&mut self, days: i64) -> DateTime<Utc> {
        let offset = self.int(1, days.max(1) * SECONDS_PER_DAY);
        self.now - Duration::seconds(offset)
    }

    pub fn future_days(&mut self, days: i64) -> DateTime<Utc> {
        let offset = self.int(1, days.max(1) * SECONDS_PER_DAY);
        self.now + Duration::seconds(offset)
    }

    pub fn between(&mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> DateTime<Utc> {
        let span = (to - from).num_seconds();
        if span <= 0 {
            return from;
        }
        from + Duration::seconds(self.int(0, span))
    }

    pub fn birthdate(&mut self, min_age: i64, max_age: i64) -> NaiveDate {
        let days = self.int(min_age * 365, max_age * 365 + 364);
        self.now.date_naive() - Duration::days(days)
    }

    pub fn alphanumeric(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from(self.rng.sample(rand::distributions::Alphanumeric)))
            .collect()
    }

    pub fn sentence(&mut self) -> String {
        let count = self.int(5, 12) as usize;
        let mut text = (0..count)
            .map(|_| self.pick(words::LOREM))
            .collect::<Vec<_>>()
            .join(" ");
        if let Some(first) = text.get(..1) {
            text = format!("{}{}.", first.to_uppercase(), &text[1..]);
        }
        text
    }

    pub fn paragraph(&mut self, min: i64, max: i64) -> String {
        let count = self.int(min, max);
        (0..count)
            .map(|_| self.sentence())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn username(&mut self) -> String {
        let first = self.pick(words::FIRST_NAMES).to_lowercase();
        let last = self.pick(words::LAST_NAMES).to_lowercase();
        match self.int(0, 2) {
            0 => format!("{first}.{last}"),
            1 => format!("{first}_{last}{}", self.int(1, 99)),
            _ => format!("{first}{}", self.int(10, 9999)),
        }
    }

    pub fn email(&mut self) -> String {
        let local = self.username();
        let domain = self.pick(words::EMAIL_DOMAINS);
        format!("{local}@{domain}")
    }

    pub fn phone(&mut self) -> String {
        format!("+1{}", self.int(2_000_000_000, 9_999_999_999))
    }

    pub fn address(&mut self) -> Address {
        let number = self.int(1, 9999);
        let street = self.pick(words::STREETS);
        let (city, state) = self.pick(words::CITIES);
        Address {
            street: format!("{number} {street}"),
            city: city.to_string(),
            state: state.to_string(),
            zip: format!("{:05}", self.int(501, 99950)),
            country: "US".into(),
        }
    }

    pub fn avatar(&mut self) -> String {
        format!("https://i.pravatar.cc/300?img={}", self.int(1, 70))
    }

    pub fn image(&mut self, category: &str) -> String {
        format!(
            "https://loremflickr.com/640/480/{category}?lock={}",
            self.int(1, 100_000)
        )
    }

    pub fn ip(&mut self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.int(1, 223),
            self.int(0, 255),
            self.int(0, 255),
            self.int(1, 254)
        )
    }

    pub fn user_agent(&mut self) -> String {
        self.pick(words::USER_AGENTS).to_string()
    }

    pub fn company(&mut self) -> String {
        let name = self.pick(words::LAST_NAMES);
        let suffix = self.pick(words::COMPANY_SUFFIXES);
        format!("{name} {suffix}")
    }
}

/// Fully cross-referenced data, generated in dependency order.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub users: Vec<User>,
    pub plans: Vec<Plan>,
    pub applications: Vec<Application>,
    pub transactions: Vec<Transaction>,
    pub verifications: Vec<Verification>,
    pub chats: Vec<Chat>,
    pub reviews: Vec<Review>,
    pub disputes: Vec<Dispute>,
    pub subscriptions: Vec<Subscription>,
}

pub fn seed_dataset(gen: &mut Generator, config: &DatasetConfig) -> Dataset {
    let sizes = &config.sizes;
    let users = generate_users(gen, sizes.users);
    let user_ids: Vec<String> = users.iter().map(|user| user.id.clone()).collect();
    let plans = generate_plans(gen, sizes.plans, &user_ids);
    let plan_ids: Vec<String> = plans.iter().map(|plan| plan.id.clone()).collect();
    let applications = generate_applications(gen, sizes.applications, &plan_ids, &user_ids);
    let transactions = generate_transactions(gen, sizes.transactions, &user_ids);
    let verifications = generate_verifications(gen, sizes.verifications, &users);
    let chats = generate_chats(gen, sizes.chats, &plan_ids, &user_ids);
    let reviews = generate_reviews(gen, sizes.reviews, &plans, &user_ids);
    let disputes = generate_disputes(gen, sizes.disputes, &plans, &user_ids);
    let subscriptions = generate_subscriptions(gen, &users);

    info!(
        users = users.len(),
        plans = plans.len(),
        applications = applications.len(),
        transactions = transactions.len(),
        verifications = verifications.len(),
        chats = chats.len(),
        reviews = reviews.len(),
        disputes = disputes.len(),
        subscriptions = subscriptions.len(),
        "mock data initialized"
    );

    Dataset {
        users,
        plans,
        applications,
        transactions,
        verifications,
        chats,
        reviews,
        disputes,
        subscriptions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatasetSizes;
    use std::collections::HashSet;

    fn fixed_now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn object_ids_are_hex_and_distinct() {
        let mut gen = Generator::new(Some(7), fixed_now());
        let ids: HashSet<String> = (0..200).map(|_| gen.object_id()).collect();
        assert_eq!(ids.len(), 200);
        assert!(ids
            .iter()
            .all(|id| id.len() == 24 && id.chars().all(|c| c.is_ascii_hexdigit())));
    }

    #[test]
    fn same_seed_same_dataset() {
        let config = DatasetConfig {
            sizes: DatasetSizes::small(),
            seed: Some(11),
        };
        let a = seed_dataset(&mut Generator::new(config.seed, fixed_now()), &config);
        let b = seed_dataset(&mut Generator::new(config.seed, fixed_now()), &config);
        assert_eq!(a.users, b.users);
        assert_eq!(a.transactions, b.transactions);
    }

    #[test]
    fn dataset_references_real_ids() {
        let config = DatasetConfig {
            sizes: DatasetSizes::small(),
            seed: Some(3),
        };
        let data = seed_dataset(&mut Generator::new(config.seed, fixed_now()), &config);
        let users: HashSet<&str> = data.users.iter().map(|u| u.id.as_str()).collect();
        let plans: HashSet<&str> = data.plans.iter().map(|p| p.id.as_str()).collect();
        assert!(data.plans.iter().all(|p| users.contains(p.host_id.as_str())));
        assert!(data
            .applications
            .iter()
            .all(|a| plans.contains(a.plan_id.as_str()) && users.contains(a.user_id.as_str())));
        assert!(data
            .transactions
            .iter()
            .all(|t| users.contains(t.user_id.as_str())));
        assert!(data
            .disputes
            .iter()
            .all(|d| plans.contains(d.plan_id.as_str())
                && users.contains(d.complainant_id.as_str())));
        assert_eq!(data.subscriptions.len(), data.users.len());
    }

    #[test]
    fn between_handles_inverted_range() {
        let mut gen = Generator::new(Some(1), fixed_now());
        let later = fixed_now() + Duration::days(1);
        assert_eq!(gen.between(later, fixed_now()), later);
        let picked = gen.between(fixed_now(), later);
        assert!(picked >= fixed_now() && picked <= later);
    }

    #[test]
    fn text_helpers_produce_content() {
        let mut gen = Generator::new(Some(5), fixed_now());
        assert!(gen.sentence().ends_with('.'));
        assert!(gen.email().contains('@'));
        assert_eq!(gen.alphanumeric(20).len(), 20);
        assert!(gen.phone().starts_with("+1"));
    }
}
