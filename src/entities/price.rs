//! PriceRecord - one entry of a material's date-ranged price history
//!
//! Price histories are append-only: a price change creates a new record
//! with its own effective range instead of mutating an old one. An absent
//! end date means the record is open-ended.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::identity::EntityId;

/// A unit price with its effective date range, per kg
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Material this price applies to
    pub material_id: EntityId,

    /// Unit price per kg
    pub unit_price: f64,

    /// First date this price is effective
    pub effective_start: NaiveDate,

    /// Last date this price is effective (inclusive); open-ended if absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_end: Option<NaiveDate>,

    /// Free-form note (supplier, quote reference, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who recorded this price)
    pub author: String,
}

impl PriceRecord {
    /// Create a new open-ended price record effective from `start`
    pub fn new(
        material_id: EntityId,
        unit_price: f64,
        effective_start: NaiveDate,
        author: impl Into<String>,
    ) -> Self {
        Self {
            material_id,
            unit_price,
            effective_start,
            effective_end: None,
            note: None,
            created: Utc::now(),
            author: author.into(),
        }
    }

    /// Close this record's range at `end` (inclusive)
    pub fn until(mut self, end: NaiveDate) -> Self {
        self.effective_end = Some(end);
        self
    }

    /// Whether the effective range contains `date` (boundaries inclusive)
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.effective_start <= date && self.effective_end.map_or(true, |end| date <= end)
    }

    /// Whether this record has no end date
    pub fn is_open_ended(&self) -> bool {
        self.effective_end.is_none()
    }
}
