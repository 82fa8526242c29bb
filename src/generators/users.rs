use chrono::Duration;

use super::Generator;
use crate::models::{
    Gender, SubscriptionTier, Traits, User, UserStatus, UserVerification, VerificationStatus,
    Wallet,
};

const LEVELS: &[u8] = &[1, 1, 2, 2, 3];
const TIERS: &[SubscriptionTier] = &[
    SubscriptionTier::Basic,
    SubscriptionTier::Basic,
    SubscriptionTier::Silver,
    SubscriptionTier::Black,
];
const TOP_LEVEL_VERIFICATION: &[VerificationStatus] = &[
    VerificationStatus::Approved,
    VerificationStatus::Approved,
    VerificationStatus::Pending,
    VerificationStatus::RequiresAttention,
];
const VERIFICATION: &[VerificationStatus] = &[
    VerificationStatus::Approved,
    VerificationStatus::Approved,
    VerificationStatus::Approved,
    VerificationStatus::Pending,
];

pub fn generate_user(gen: &mut Generator) -> User {
    let level = gen.pick(LEVELS);
    let subscription = gen.pick(TIERS);
    let is_active = gen.chance(0.85);
    let bp_spent = match level {
        1 => gen.int(0, 2000),
        2 => gen.int(1000, 10000),
        _ => gen.int(5000, 50000),
    };
    let plans_joined = match level {
        1 => gen.int(0, 15),
        2 => gen.int(5, 50),
        _ => gen.int(20, 150),
    };
    let verification_status = if level == 3 {
        gen.pick(TOP_LEVEL_VERIFICATION)
    } else {
        gen.pick(VERIFICATION)
    };
    let created_at = gen.past_days(2 * 365);
    let last_active = gen.between(created_at, gen.now());
    let status = if is_active {
        UserStatus::Active
    } else {
        gen.pick(&[UserStatus::Inactive, UserStatus::Banned])
    };
    let subscription_expires_at = if subscription.is_paid() {
        Some(gen.future_days(365))
    } else {
        None
    };
    let interests = (0..gen.int(2, 8)).map(|_| gen.object_id()).collect();

    User {
        id: gen.object_id(),
        username: gen.username(),
        email: gen.email(),
        phone: gen.phone(),
        password: gen.alphanumeric(15),
        status,
        profile_image: vec![gen.avatar()],
        bio: gen.paragraph(3, 6),
        highlight: gen.sentence(),
        address: gen.address(),
        dob: Some(gen.birthdate(18, 60)),
        gender: gen.pick(Gender::ALL),
        interests,
        profile_level: level,
        profile_points: bp_spent + gen.int(0, 5000),
        wallet: Wallet {
            beens_points: gen.int(0, 25000),
            escrow_beens_points: gen.int(0, 5000),
        },
        current_subscription: subscription,
        subscription_expires_at,
        traits: Traits {
            polite: gen.int(0, 100),
            funny: gen.int(0, 100),
            reliable: gen.int(0, 100),
            charismatic: gen.int(0, 100),
        },
        total_reviews: gen.int(0, plans_joined),
        verification: UserVerification {
            phone_verified_at: Some(gen.between(created_at, last_active)),
            email_verified_at: Some(gen.between(created_at, last_active)),
            legal_documents_verified_at: (level == 3)
                .then(|| gen.between(created_at.max(gen.now() - Duration::days(1)), gen.now())),
            address_verified_at: (level >= 2)
                .then(|| gen.between(created_at.max(gen.now() - Duration::days(1)), gen.now())),
            status: verification_status,
        },
        created_at,
        updated_at: last_active,
        last_active,
        total_bp_spent: bp_spent,
        total_plans_joined: plans_joined,
        total_plans_hosted: gen.int(0, plans_joined / 3),
    }
}

pub fn generate_users(gen: &mut Generator, count: usize) -> Vec<User> {
    (0..count).map(|_| generate_user(gen)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn gen() -> Generator {
        let now = DateTime::parse_from_rfc3339("2025-06-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        Generator::new(Some(42), now)
    }

    #[test]
    fn level_drives_ranges_and_verification() {
        let mut gen = gen();
        for user in generate_users(&mut gen, 300) {
            let (bp_min, bp_max) = match user.profile_level {
                1 => (0, 2000),
                2 => (1000, 10000),
                3 => (5000, 50000),
                other => panic!("unexpected level {other}"),
            };
            assert!((bp_min..=bp_max).contains(&user.total_bp_spent));
            assert!(user.profile_points >= user.total_bp_spent);
            assert!(user.total_reviews <= user.total_plans_joined);
            assert!(user.total_plans_hosted <= user.total_plans_joined / 3);
            assert_eq!(
                user.verification.legal_documents_verified_at.is_some(),
                user.profile_level == 3
            );
            assert_eq!(
                user.verification.address_verified_at.is_some(),
                user.profile_level >= 2
            );
            assert_eq!(
                user.subscription_expires_at.is_some(),
                user.current_subscription.is_paid()
            );
            assert!(user.created_at <= user.last_active);
            assert_ne!(user.verification.status, VerificationStatus::Rejected);
        }
    }

    #[test]
    fn most_users_are_active() {
        let mut gen = gen();
        let users = generate_users(&mut gen, 400);
        let active = users
            .iter()
            .filter(|user| user.status == UserStatus::Active)
            .count();
        assert!(active > 280, "expected ~85% active, got {active}/400");
        assert!(users
            .iter()
            .all(|user| user.status != UserStatus::PendingVerification));
    }
}
