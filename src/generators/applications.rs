use super::Generator;
use crate::models::{Application, ApplicationStatus, ApplicationType};

const STATUSES: &[ApplicationStatus] = &[
    ApplicationStatus::Pending,
    ApplicationStatus::Accepted,
    ApplicationStatus::Accepted,
    ApplicationStatus::Rejected,
];

const REJECTION_REASONS: &[&str] = &[
    "Plan is full",
    "Does not meet requirements",
    "Profile incomplete",
    "Insufficient level",
];

pub fn generate_application(gen: &mut Generator, plan_id: String, user_id: String) -> Application {
    let application_type = gen.pick(ApplicationType::ALL);
    let status = gen.pick(STATUSES);
    let created_at = gen.past_days(182);
    let decided_at = gen.between(created_at, gen.now());

    Application {
        id: gen.object_id(),
        plan_id,
        user_id,
        bid_amount: (application_type == ApplicationType::Bidding).then(|| gen.int(500, 10000)),
        application_type,
        status,
        message: if application_type == ApplicationType::Invite {
            gen.sentence()
        } else {
            gen.paragraph(3, 6)
        },
        created_at,
        updated_at: if status == ApplicationStatus::Pending {
            created_at
        } else {
            decided_at
        },
        accepted_at: (status == ApplicationStatus::Accepted).then_some(decided_at),
        rejected_at: (status == ApplicationStatus::Rejected).then_some(decided_at),
        rejection_reason: (status == ApplicationStatus::Rejected)
            .then(|| gen.pick(REJECTION_REASONS).to_string()),
    }
}

pub fn generate_applications(
    gen: &mut Generator,
    count: usize,
    plan_ids: &[String],
    user_ids: &[String],
) -> Vec<Application> {
    (0..count)
        .map(|_| {
            let plan_id = gen.pick_id(plan_ids);
            let user_id = gen.pick_id(user_ids);
            generate_application(gen, plan_id, user_id)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn decision_fields_follow_status() {
        let mut gen = Generator::new(Some(21), Utc::now());
        let plans = vec!["p1".to_string()];
        let users = vec!["u1".to_string(), "u2".to_string()];
        for app in generate_applications(&mut gen, 200, &plans, &users) {
            assert_eq!(app.plan_id, "p1");
            assert_eq!(
                app.bid_amount.is_some(),
                app.application_type == ApplicationType::Bidding
            );
            if let Some(bid) = app.bid_amount {
                assert!((500..=10000).contains(&bid));
            }
            match app.status {
                ApplicationStatus::Pending => {
                    assert_eq!(app.updated_at, app.created_at);
                    assert!(app.accepted_at.is_none() && app.rejected_at.is_none());
                }
                ApplicationStatus::Accepted => {
                    assert!(app.accepted_at.is_some());
                    assert!(app.rejection_reason.is_none());
                }
                ApplicationStatus::Rejected => {
                    assert!(app.rejected_at.is_some());
                    assert!(REJECTION_REASONS.contains(&app.rejection_reason.as_deref().unwrap()));
                }
            }
        }
    }
}
