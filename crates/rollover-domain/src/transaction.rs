use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    common::{Instant, Money},
    recurring::RecurringSpec,
};

/// A posted or template transaction. Templates carry a [`RecurringSpec`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub title: String,
    pub amount: Money,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub wallet_id: Option<Uuid>,
    pub date: Instant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<RecurringSpec>,
    /// Template this instance was posted from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<Uuid>,
}

impl Transaction {
    pub fn new(title: impl Into<String>, amount: Money, category_id: Option<Uuid>, date: Instant) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount,
            category_id,
            wallet_id: None,
            date,
            recurring: None,
            template_id: None,
        }
    }

    pub fn with_recurring(mut self, recurring: RecurringSpec) -> Self {
        self.recurring = Some(recurring);
        self
    }

    pub fn is_template(&self) -> bool {
        self.recurring
            .as_ref()
            .map(RecurringSpec::is_recurring)
            .unwrap_or(false)
    }
}
