use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ActionLogEntry {
    pub id: i64,
    pub action: String,
    pub target_id: Option<String>,
    pub details: Value,
    pub created_at: DateTime<Utc>,
}

/// Audit trail of admin mutations.
#[derive(Debug, Default)]
pub struct ActionLog {
    entries: Vec<ActionLogEntry>,
    next_id: i64,
}

impl ActionLog {
    pub fn record(&mut self, action: &str, target_id: Option<&str>, details: Value) -> i64 {
        self.next_id += 1;
        info!(action, target = target_id.unwrap_or("-"), %details, "admin action");
        self.entries.push(ActionLogEntry {
            id: self.next_id,
            action: action.to_string(),
            target_id: target_id.map(str::to_string),
            details,
            created_at: Utc::now(),
        });
        self.next_id
    }

    /// Newest first.
    pub fn entries(&self) -> Vec<ActionLogEntry> {
        self.entries.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn records_newest_first() {
        let mut log = ActionLog::default();
        assert!(log.is_empty());
        log.record("delete_user", Some("u1"), json!({}));
        let id = log.record("reset_config", None, json!({"by": "admin"}));
        assert_eq!(id, 2);
        let entries = log.entries();
        assert_eq!(log.len(), 2);
        assert_eq!(entries[0].action, "reset_config");
        assert_eq!(entries[0].target_id, None);
        assert_eq!(entries[1].target_id.as_deref(), Some("u1"));
    }
}
