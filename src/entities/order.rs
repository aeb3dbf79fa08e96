//! OrderLine record - one row of a cutting order
//!
//! The row owns the worker-typed measurement text (the source of truth)
//! and a denormalized [`ComputedCost`] kept in sync by calling
//! [`OrderLine::recompute`] whenever the part type, material, text,
//! quantity, or reference date changes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::catalog::{MaterialSource, PartTypeSource, PriceSource};
use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::engine::cost::{self, ComputedCost};

/// One line of a cutting order (ORD-...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    /// Unique identifier
    pub id: EntityId,

    /// Part type tag (matches a catalog part type name)
    pub part_type: String,

    /// Stock material
    pub material_id: EntityId,

    /// Worker-typed shorthand measurement text
    #[serde(default)]
    pub measurement_text: String,

    /// Number of parts
    #[serde(default)]
    pub quantity: u32,

    /// Pricing reference date; absent means "best current price"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<NaiveDate>,

    /// Denormalized cost figures, recomputed on any input change
    #[serde(default)]
    pub cost: ComputedCost,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this line)
    pub author: String,
}

impl OrderLine {
    /// Create a new order line with empty measurements
    pub fn new(
        part_type: impl Into<String>,
        material_id: EntityId,
        author: impl Into<String>,
    ) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Ord),
            part_type: part_type.into(),
            material_id,
            measurement_text: String::new(),
            quantity: 0,
            reference_date: None,
            cost: ComputedCost::default(),
            created: Utc::now(),
            author: author.into(),
        }
    }

    /// Recompute the denormalized cost figures from current inputs.
    ///
    /// Safe to call on every keystroke; degenerate inputs produce zero
    /// figures rather than failing.
    pub fn recompute(
        &mut self,
        part_types: &dyn PartTypeSource,
        materials: &dyn MaterialSource,
        prices: &dyn PriceSource,
    ) {
        self.cost = cost::compute_line(
            part_types,
            materials,
            prices,
            &self.part_type,
            Some(&self.material_id),
            &self.measurement_text,
            self.quantity,
            self.reference_date,
        );
    }
}

impl Entity for OrderLine {
    const PREFIX: &'static str = "ORD";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn label(&self) -> String {
        format!(
            "{} {} ×{}",
            self.part_type, self.measurement_text, self.quantity
        )
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}
