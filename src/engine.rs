//! Builds ready-to-use engine services from persisted configuration.

use rollover_config::{Config, ConfigManager};
use rollover_core::{BudgetStore, Clock, RolloverService};
use rollover_domain::Calendar;
use tracing::debug;

use crate::errors::Result;

pub fn calendar_from_config(config: &Config) -> Calendar {
    Calendar::new(config.week_start)
}

/// Loads the configuration and returns a rollover service bound to `store` and `clock`.
pub fn open_service<S, C>(
    manager: &ConfigManager,
    store: S,
    clock: C,
) -> Result<RolloverService<S, C>>
where
    S: BudgetStore,
    C: Clock,
{
    let config = manager.load()?;
    debug!(
        path = %manager.config_path().display(),
        week_start = %config.week_start,
        max_steps = config.max_catch_up_steps,
        "engine configuration loaded"
    );
    Ok(RolloverService::new(store, clock, calendar_from_config(&config))
        .with_max_steps(config.max_catch_up_steps))
}
