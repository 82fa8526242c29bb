use chrono::Duration;

use super::Generator;
use crate::models::{Gender, Plan, PlanStatus, PlanType, ViewMode};

pub const PLAN_TITLES: &[&str] = &[
    "Coffee & Networking Session",
    "Hiking Adventure Trail",
    "Cooking Class: Italian Cuisine",
    "Photography Workshop",
    "Book Club Discussion",
    "Yoga & Meditation",
    "Wine Tasting Experience",
    "Art Gallery Tour",
    "Language Exchange Meetup",
    "Startup Pitch Night",
    "Board Game Evening",
    "Farmers Market Visit",
    "Live Music Session",
    "Tech Talk & Demo",
    "Fitness Bootcamp",
    "Creative Writing Circle",
    "Investment Workshop",
    "Dance Class Beginner",
    "Pottery Making Session",
    "Food Truck Tour",
];

// Joiners-pay dominates the marketplace; most plans in the store are finished.
const TYPES: &[PlanType] = &[
    PlanType::HostPays,
    PlanType::JoinersPay,
    PlanType::JoinersPay,
    PlanType::JoinersPay,
    PlanType::Bidding,
];
const STATUSES: &[PlanStatus] = &[
    PlanStatus::Draft,
    PlanStatus::Published,
    PlanStatus::ApplicationsOpen,
    PlanStatus::ApplicationsOpen,
    PlanStatus::ApplicationsClosed,
    PlanStatus::Active,
    PlanStatus::Completed,
    PlanStatus::Completed,
    PlanStatus::Completed,
];
const VIEW_MODES: &[ViewMode] = &[
    ViewMode::Public,
    ViewMode::Public,
    ViewMode::Public,
    ViewMode::Private,
];
const MIN_LEVELS: &[Option<u8>] = &[None, None, Some(1), Some(2), Some(3)];

pub fn generate_plan(gen: &mut Generator, host_id: String) -> Plan {
    let plan_type = gen.pick(TYPES);
    let status = gen.pick(STATUSES);
    let completed = status == PlanStatus::Completed;
    let max_participants = gen.int(2, 20);
    let current_participants = if completed {
        max_participants
    } else {
        gen.int(0, max_participants)
    };
    let start = if completed {
        gen.past_days(365)
    } else {
        gen.future_days(182)
    };
    let end = start + Duration::hours(gen.int(1, 8));
    let min_bp = match plan_type {
        PlanType::JoinersPay => Some(gen.int(100, 5000)),
        PlanType::HostPays => Some(gen.int(200, 2000)),
        PlanType::Bidding => None,
    };
    let total_applications = match plan_type {
        PlanType::Bidding => gen.int(max_participants, max_participants * 3),
        _ => gen.int(current_participants, max_participants * 2),
    };
    let total_revenue_bp = match (plan_type, completed, min_bp) {
        (PlanType::JoinersPay, true, Some(min_bp)) => current_participants * min_bp,
        _ => 0,
    };
    let is_sponsored = gen.chance(0.1);
    let created_at = gen.past_days(365);

    Plan {
        id: gen.object_id(),
        host_id,
        template_id: gen.chance(0.3).then(|| gen.object_id()),
        title: gen.pick(PLAN_TITLES).to_string(),
        description: gen.paragraph(2, 4),
        images: (0..gen.int(1, 4)).map(|_| gen.image("people")).collect(),
        start_date: start,
        end_date: end,
        start_time: start,
        end_time: end,
        location: gen.address(),
        plan_type,
        status,
        application_close_date: start - Duration::hours(24),
        view_mode: gen.pick(VIEW_MODES),
        gender: if gen.chance(0.7) {
            None
        } else {
            Some(gen.pick_some(Gender::ALL, 1, 2))
        },
        min_age: gen.chance(0.6).then(|| gen.int(18, 25) as u8),
        max_age: gen.chance(0.6).then(|| gen.int(30, 65) as u8),
        max_participants,
        current_participants,
        min_bp_per_participant: min_bp,
        min_profile_level: gen.pick(MIN_LEVELS),
        tags: (0..gen.int(1, 2)).map(|_| gen.object_id()).collect(),
        created_at,
        updated_at: gen.between(created_at, gen.now()),
        total_applications,
        avg_rating: completed.then(|| gen.int(30, 50) as f64 / 10.0),
        total_revenue_bp,
        is_sponsored,
        sponsor_info: is_sponsored.then(|| gen.company()),
    }
}

pub fn generate_plans(gen: &mut Generator, count: usize, host_ids: &[String]) -> Vec<Plan> {
    (0..count)
        .map(|_| {
            let host_id = gen.pick_id(host_ids);
            generate_plan(gen, host_id)
        })
        .collect()
}
