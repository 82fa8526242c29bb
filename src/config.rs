use std::{env, net::SocketAddr, time::Duration};

/// How many records of each kind the generator fabricates at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSizes {
    pub users: usize,
    pub plans: usize,
    pub applications: usize,
    pub transactions: usize,
    pub verifications: usize,
    pub chats: usize,
    pub reviews: usize,
    pub disputes: usize,
}

impl Default for DatasetSizes {
    fn default() -> Self {
        Self {
            users: 100,
            plans: 150,
            applications: 300,
            transactions: 800,
            verifications: 25,
            chats: 30,
            reviews: 40,
            disputes: 25,
        }
    }
}

impl DatasetSizes {
    /// A compact dataset for tests and demos.
    pub fn small() -> Self {
        Self {
            users: 20,
            plans: 30,
            applications: 60,
            transactions: 120,
            verifications: 10,
            chats: 10,
            reviews: 15,
            disputes: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetConfig {
    pub sizes: DatasetSizes,
    /// Fixed seed for reproducible data; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

/// Network simulation applied by the mock client.
#[derive(Debug, Clone, PartialEq)]
pub struct MockSettings {
    pub delay: Duration,
    pub error_rate: f64,
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(300),
            error_rate: 0.0,
        }
    }
}

impl MockSettings {
    pub fn instant() -> Self {
        Self {
            delay: Duration::ZERO,
            error_rate: 0.0,
        }
    }
}

/// Server configuration loaded from environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub mock: MockSettings,
    pub dataset: DatasetConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<usize>().ok());
        let defaults = DatasetSizes::default();

        let bind_addr = lookup("BIND_ADDR")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8080)));
        let delay_ms = lookup("MOCK_DELAY_MS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(300);
        let errors_enabled = lookup("MOCK_ERRORS_ENABLED")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let error_rate = lookup("MOCK_ERROR_RATE")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(0.05)
            .clamp(0.0, 1.0);

        Self {
            bind_addr,
            mock: MockSettings {
                delay: Duration::from_millis(delay_ms),
                error_rate: if errors_enabled { error_rate } else { 0.0 },
            },
            dataset: DatasetConfig {
                sizes: DatasetSizes {
                    users: parsed("MOCK_USERS").unwrap_or(defaults.users),
                    plans: parsed("MOCK_PLANS").unwrap_or(defaults.plans),
                    applications: parsed("MOCK_APPLICATIONS").unwrap_or(defaults.applications),
                    transactions: parsed("MOCK_TRANSACTIONS").unwrap_or(defaults.transactions),
                    ..defaults
                },
                seed: lookup("MOCK_SEED").and_then(|v| v.trim().parse().ok()),
            },
        }
    }
}
