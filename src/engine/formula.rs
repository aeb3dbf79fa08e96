//! Volume formula evaluation
//!
//! Part-type volume formulas are admin-maintained catalog text written
//! over the measurement vocabulary (`length*width*height`,
//! `pi*radius*radius*height`, legacy `A*B*C`). Evaluation is re-run on
//! every keystroke of a live measurement cell, so it never returns an
//! error: any failure mode collapses to a volume of 0 and a debug log
//! line.

use tracing::debug;

use crate::engine::expr;
use crate::engine::measure::{Dimension, MeasurementSet};
use crate::engine::normalize::normalize_formula;

/// Vocabulary dimensions referenced by a formula, in vocabulary order.
///
/// Used to prompt for required inputs; evaluation order is the parser's
/// business. Identifiers outside the vocabulary (the `pi` constant,
/// positional aliases) are not reported.
pub fn variable_names(formula: &str) -> Vec<Dimension> {
    let normalized = normalize_formula(formula);
    let referenced: Vec<Dimension> = expr::identifiers(&normalized)
        .iter()
        .filter_map(|name| name.parse::<Dimension>().ok())
        .collect();

    Dimension::all()
        .iter()
        .copied()
        .filter(|d| referenced.contains(d))
        .collect()
}

/// Evaluate a volume formula against a measurement set, in mm³.
///
/// Radii derive from their diameters when absent. Every vocabulary
/// dimension the formula references must resolve; otherwise the result is
/// 0 rather than a value computed from stale defaults. Parse errors and
/// non-finite arithmetic also yield 0. This function does not fail.
pub fn evaluate(formula: &str, measurements: &MeasurementSet) -> f64 {
    let normalized = normalize_formula(formula);
    let resolved = measurements.with_derived();

    for name in expr::identifiers(&normalized) {
        if let Ok(dim) = name.parse::<Dimension>() {
            if resolved.get(dim).is_none() {
                debug!(formula, dimension = %dim, "required dimension unresolved");
                return 0.0;
            }
        }
    }

    match expr::eval(&normalized, &resolved) {
        Ok(v) if v.is_finite() => v,
        Ok(v) => {
            debug!(formula, value = v, "formula produced non-finite volume");
            0.0
        }
        Err(err) => {
            debug!(formula, %err, "formula evaluation failed");
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(pairs: &[(Dimension, f64)]) -> MeasurementSet {
        let mut ms = MeasurementSet::new();
        for (dim, v) in pairs {
            ms.set(*dim, *v);
        }
        ms
    }

    #[test]
    fn test_plate_volume() {
        let ms = set(&[
            (Dimension::Length, 10.0),
            (Dimension::Width, 5.0),
            (Dimension::Height, 2.0),
        ]);
        assert_eq!(evaluate("length*width*height", &ms), 100.0);
    }

    #[test]
    fn test_missing_dimension_yields_zero() {
        let ms = set(&[(Dimension::Length, 10.0), (Dimension::Width, 5.0)]);
        assert_eq!(evaluate("length*width*height", &ms), 0.0);
    }

    #[test]
    fn test_radius_derived_from_diameter() {
        let ms = set(&[(Dimension::Diameter, 20.0), (Dimension::Height, 30.0)]);
        let expected = std::f64::consts::PI * 10.0 * 10.0 * 30.0;
        assert!((evaluate("pi*radius*radius*height", &ms) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_ring_volume_with_derived_radii() {
        let ms = set(&[
            (Dimension::OuterDiameter, 60.0),
            (Dimension::InnerDiameter, 40.0),
            (Dimension::Height, 15.0),
        ]);
        let expected = std::f64::consts::PI * (30.0 * 30.0 - 20.0 * 20.0) * 15.0;
        let got = evaluate(
            "pi*(outer_radius*outer_radius - inner_radius*inner_radius)*height",
            &ms,
        );
        assert!((got - expected).abs() < 1e-9);
    }

    #[test]
    fn test_legacy_alias_formula() {
        let mut ms = MeasurementSet::new();
        ms.set_raw("A", 100.0);
        ms.set_raw("B", 50.0);
        ms.set_raw("C", 10.0);
        assert_eq!(evaluate("A*B*C", &ms), 50000.0);
    }

    #[test]
    fn test_legacy_camel_case_formula() {
        let ms = set(&[
            (Dimension::OuterDiameter, 60.0),
            (Dimension::InnerDiameter, 40.0),
            (Dimension::Height, 15.0),
        ]);
        let expected = std::f64::consts::PI * (30.0 * 30.0 - 20.0 * 20.0) * 15.0;
        let got = evaluate(
            "pi*(outerRadius*outerRadius - innerRadius*innerRadius)*height",
            &ms,
        );
        assert!((got - expected).abs() < 1e-9);
    }

    #[test]
    fn test_fullwidth_formula_glyphs() {
        let ms = set(&[(Dimension::Diameter, 20.0), (Dimension::Height, 30.0)]);
        let expected = std::f64::consts::PI * 10.0 * 10.0 * 30.0;
        assert!((evaluate("π×radius²×height", &ms) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_formula_yields_zero() {
        let ms = set(&[(Dimension::Length, 10.0)]);
        assert_eq!(evaluate("length**", &ms), 0.0);
        assert_eq!(evaluate("", &ms), 0.0);
        assert_eq!(evaluate("length)(", &ms), 0.0);
    }

    #[test]
    fn test_non_finite_result_yields_zero() {
        let ms = set(&[(Dimension::Length, 10.0)]);
        assert_eq!(evaluate("length/0", &ms), 0.0);
    }

    #[test]
    fn test_unresolved_alias_yields_zero() {
        let ms = set(&[(Dimension::Length, 10.0)]);
        assert_eq!(evaluate("A*B", &ms), 0.0);
    }

    #[test]
    fn test_variable_names_in_vocabulary_order() {
        let names = variable_names("height*width*length");
        assert_eq!(
            names,
            vec![Dimension::Length, Dimension::Width, Dimension::Height]
        );
    }

    #[test]
    fn test_variable_names_ignores_pi_and_aliases() {
        assert_eq!(
            variable_names("pi*radius*radius*height"),
            vec![Dimension::Height, Dimension::Radius]
        );
        assert!(variable_names("A*B*C").is_empty());
    }

    #[test]
    fn test_variable_names_legacy_casing() {
        assert_eq!(
            variable_names("outerDiameter*innerDiameter"),
            vec![Dimension::OuterDiameter, Dimension::InnerDiameter]
        );
    }

    #[test]
    fn test_no_spurious_requirement_between_similar_names() {
        // outer_diameter in a formula must not demand a plain diameter
        let ms = set(&[
            (Dimension::OuterDiameter, 60.0),
            (Dimension::Height, 15.0),
        ]);
        assert_eq!(evaluate("outer_diameter*height", &ms), 900.0);
    }
}
