use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Engine preferences persisted alongside user data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    /// First day of the week for week-relative calendar helpers.
    #[serde(default = "Config::default_week_start")]
    pub week_start: Weekday,
    /// Upper bound on single-step advances in one catch-up run.
    #[serde(default = "Config::default_max_catch_up_steps")]
    pub max_catch_up_steps: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            currency: Self::default_currency(),
            week_start: Self::default_week_start(),
            max_catch_up_steps: Self::default_max_catch_up_steps(),
        }
    }
}

impl Config {
    pub fn default_locale() -> String {
        "en-US".into()
    }

    pub fn default_currency() -> String {
        "USD".into()
    }

    pub fn default_week_start() -> Weekday {
        Weekday::Mon
    }

    pub fn default_max_catch_up_steps() -> usize {
        10_000
    }
}
