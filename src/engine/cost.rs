//! Weight resolution and cost aggregation
//!
//! Unit convention, fixed across the engine: measurements in mm, volume
//! in mm³, density in g/cm³, weight in kg, unit price per kg. The kg
//! conversion is `volume * density / 1_000_000`.
//!
//! Rounding happens exactly once, here at the aggregation boundary:
//! weights to 3 decimals, prices to 2. Intermediate math stays unrounded.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::catalog::{MaterialSource, PartTypeSource, PriceSource};
use crate::core::identity::EntityId;
use crate::engine::{formula, notation, pricing};

/// Standard steel density in g/cm³, used when a material cannot be
/// resolved so that estimates keep flowing instead of blocking the row.
pub const FALLBACK_DENSITY_G_CM3: f64 = 7.85;

fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Unit weight in kg from a volume in mm³ and a density in g/cm³
pub fn unit_weight_kg(unit_volume_mm3: f64, density_g_cm3: f64) -> f64 {
    unit_volume_mm3 * density_g_cm3 / 1_000_000.0
}

/// Total price from a total weight and unit price, rounded to 2 decimals.
///
/// Zero or non-finite operands yield 0. This is the aggregation edit
/// handlers call on any change to material, part type, measurement text,
/// or quantity.
pub fn total_price(total_weight_kg: f64, unit_price: f64) -> f64 {
    if !total_weight_kg.is_finite() || !unit_price.is_finite() {
        return 0.0;
    }
    if total_weight_kg == 0.0 || unit_price == 0.0 {
        return 0.0;
    }
    round_to(total_weight_kg * unit_price, 2)
}

/// Density of a resolved material, or the steel fallback.
///
/// The substitution is logged at warn level so estimates made with the
/// fallback are distinguishable from correctly-resolved ones.
pub fn resolve_density(
    materials: &dyn MaterialSource,
    material_id: Option<&EntityId>,
) -> f64 {
    match material_id {
        Some(id) => match materials.material(id) {
            Some(mat) => mat.density_g_cm3,
            None => {
                warn!(material = %id, fallback = FALLBACK_DENSITY_G_CM3, "unknown material, using steel density");
                FALLBACK_DENSITY_G_CM3
            }
        },
        None => {
            warn!(fallback = FALLBACK_DENSITY_G_CM3, "no material selected, using steel density");
            FALLBACK_DENSITY_G_CM3
        }
    }
}

/// Denormalized cost figures for one order row. Ephemeral: recomputed
/// from scratch on any input change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComputedCost {
    /// Volume of one part in mm³
    pub unit_volume: f64,

    /// Weight of one part in kg (3 decimals)
    pub unit_weight: f64,

    /// Number of parts in the batch
    pub quantity: u32,

    /// Batch weight in kg (3 decimals)
    pub total_weight: f64,

    /// Resolved unit price per kg
    pub unit_price: f64,

    /// Batch price (2 decimals)
    pub total_price: f64,
}

impl ComputedCost {
    /// Aggregate volume, density, quantity, and unit price into the
    /// rounded figures a row displays.
    pub fn compute(unit_volume_mm3: f64, density_g_cm3: f64, quantity: u32, unit_price: f64) -> Self {
        let unit_weight = unit_weight_kg(unit_volume_mm3, density_g_cm3);
        let raw_total_weight = if quantity > 0 {
            unit_weight * quantity as f64
        } else {
            0.0
        };

        Self {
            unit_volume: unit_volume_mm3,
            unit_weight: round_to(unit_weight, 3),
            quantity,
            total_weight: round_to(raw_total_weight, 3),
            unit_price,
            total_price: total_price(raw_total_weight, unit_price),
        }
    }
}

/// Full pipeline for one order row: decode the shorthand, evaluate the
/// part type's volume formula, resolve density and unit price, aggregate.
///
/// Degenerate inputs (unknown part type, unmatched shorthand, missing
/// material, price gaps) degrade to zero figures; this function never
/// fails, because it runs on every keystroke of the measurement cell.
#[allow(clippy::too_many_arguments)]
pub fn compute_line(
    part_types: &dyn PartTypeSource,
    materials: &dyn MaterialSource,
    prices: &dyn PriceSource,
    part_type: &str,
    material_id: Option<&EntityId>,
    measurement_text: &str,
    quantity: u32,
    reference: Option<NaiveDate>,
) -> ComputedCost {
    let measurements = notation::decode(measurement_text, part_type);

    let unit_volume = match part_types.part_type(part_type) {
        Some(pt) => formula::evaluate(&pt.volume_formula, &measurements),
        None => {
            debug!(part_type, "unknown part type, volume is 0");
            0.0
        }
    };

    let density = resolve_density(materials, material_id);

    let unit_price = match material_id {
        Some(id) => pricing::resolve_unit_price(prices.price_history(id), reference),
        None => 0.0,
    };

    ComputedCost::compute(unit_volume, density, quantity, unit_price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use crate::core::identity::EntityPrefix;
    use crate::entities::material::Material;
    use crate::entities::price::PriceRecord;

    #[test]
    fn test_unit_weight_conversion() {
        // 1000 cm³ of steel: 1_000_000 mm³ * 7.85 / 1e6 = 7.85 kg
        assert_eq!(unit_weight_kg(1_000_000.0, 7.85), 7.85);
    }

    #[test]
    fn test_total_price_rounding() {
        assert_eq!(total_price(2.345678, 10.0), 23.46);
        assert_eq!(total_price(2.0, 25.5), 51.0);
    }

    #[test]
    fn test_total_price_zero_operands() {
        assert_eq!(total_price(0.0, 25.0), 0.0);
        assert_eq!(total_price(2.5, 0.0), 0.0);
        assert_eq!(total_price(f64::NAN, 10.0), 0.0);
    }

    #[test]
    fn test_compute_rounds_once_at_boundary() {
        // 50*50*40 plate of steel: 100_000 mm³, 0.785 kg apiece
        let cost = ComputedCost::compute(100_000.0, 7.85, 3, 10.0);
        assert_eq!(cost.unit_weight, 0.785);
        assert_eq!(cost.total_weight, 2.355);
        assert_eq!(cost.total_price, 23.55);
    }

    #[test]
    fn test_compute_quantity_zero() {
        let cost = ComputedCost::compute(100_000.0, 7.85, 0, 10.0);
        assert_eq!(cost.unit_weight, 0.785);
        assert_eq!(cost.total_weight, 0.0);
        assert_eq!(cost.total_price, 0.0);
    }

    #[test]
    fn test_rounding_uses_raw_total_weight() {
        // unit 0.3333333 kg * 7 = 2.3333331; price from the raw figure
        let cost = ComputedCost::compute(42_462.205, 7.85, 7, 10.0);
        assert_eq!(cost.total_price, 23.33);
    }

    fn catalog_with_steel() -> (Catalog, EntityId) {
        let mut catalog = Catalog::with_builtin_part_types();
        let steel = Material::new("45 steel", 7.85, "test");
        let id = steel.id.clone();
        catalog.add_material(steel);
        catalog.add_price(
            PriceRecord::new(id.clone(), 10.0, "2025-01-01".parse().unwrap(), "test"),
        );
        (catalog, id)
    }

    #[test]
    fn test_compute_line_plate() {
        let (catalog, id) = catalog_with_steel();
        let cost = compute_line(
            &catalog, &catalog, &catalog,
            "plate", Some(&id), "100*50*10", 4, None,
        );
        // 50_000 mm³ → 0.3925 kg apiece, 1.57 kg total, 15.70 total
        assert_eq!(cost.unit_volume, 50_000.0);
        assert_eq!(cost.unit_weight, 0.393);
        assert_eq!(cost.total_weight, 1.57);
        assert_eq!(cost.unit_price, 10.0);
        assert_eq!(cost.total_price, 15.7);
    }

    #[test]
    fn test_compute_line_mid_typing_input() {
        let (catalog, id) = catalog_with_steel();
        let cost = compute_line(
            &catalog, &catalog, &catalog,
            "plate", Some(&id), "100*50*", 4, None,
        );
        assert_eq!(cost.unit_volume, 0.0);
        assert_eq!(cost.total_price, 0.0);
    }

    #[test]
    fn test_compute_line_unknown_material_uses_fallback_density() {
        let (catalog, _) = catalog_with_steel();
        let stranger = EntityId::new(EntityPrefix::Mat);
        let cost = compute_line(
            &catalog, &catalog, &catalog,
            "plate", Some(&stranger), "100*50*10", 1, None,
        );
        // Density falls back to steel; no history means price 0
        assert_eq!(cost.unit_weight, 0.393);
        assert_eq!(cost.unit_price, 0.0);
        assert_eq!(cost.total_price, 0.0);
    }

    #[test]
    fn test_compute_line_unknown_part_type() {
        let (catalog, id) = catalog_with_steel();
        let cost = compute_line(
            &catalog, &catalog, &catalog,
            "mystery", Some(&id), "100*50*10", 4, None,
        );
        assert_eq!(cost.unit_volume, 0.0);
        assert_eq!(cost.total_price, 0.0);
    }
}
