//! Measurement vocabulary and the per-part measurement set
//!
//! All values are millimeters. A [`MeasurementSet`] is transient: it is
//! rebuilt from shorthand text on every edit and never persisted as the
//! source of truth (the text is).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical measurement variables usable in volume formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Length,
    Width,
    Height,
    Thickness,
    Diameter,
    OuterDiameter,
    InnerDiameter,
    Radius,
    OuterRadius,
    InnerRadius,
}

impl Dimension {
    /// Get the canonical variable name
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Length => "length",
            Dimension::Width => "width",
            Dimension::Height => "height",
            Dimension::Thickness => "thickness",
            Dimension::Diameter => "diameter",
            Dimension::OuterDiameter => "outer_diameter",
            Dimension::InnerDiameter => "inner_diameter",
            Dimension::Radius => "radius",
            Dimension::OuterRadius => "outer_radius",
            Dimension::InnerRadius => "inner_radius",
        }
    }

    /// All dimensions in vocabulary order
    pub fn all() -> &'static [Dimension] {
        &[
            Dimension::Length,
            Dimension::Width,
            Dimension::Height,
            Dimension::Thickness,
            Dimension::Diameter,
            Dimension::OuterDiameter,
            Dimension::InnerDiameter,
            Dimension::Radius,
            Dimension::OuterRadius,
            Dimension::InnerRadius,
        ]
    }

    /// The diameter this dimension is derived from, if any.
    ///
    /// Radii are not typed by workers; they resolve from the matching
    /// diameter at evaluation time.
    pub fn derived_from(&self) -> Option<Dimension> {
        match self {
            Dimension::Radius => Some(Dimension::Diameter),
            Dimension::OuterRadius => Some(Dimension::OuterDiameter),
            Dimension::InnerRadius => Some(Dimension::InnerDiameter),
            _ => None,
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Dimension {
    type Err = String;

    /// Accepts the canonical snake_case names and the legacy camelCase
    /// spellings still present in imported catalogs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "").as_str() {
            "length" => Ok(Dimension::Length),
            "width" => Ok(Dimension::Width),
            "height" => Ok(Dimension::Height),
            "thickness" => Ok(Dimension::Thickness),
            "diameter" => Ok(Dimension::Diameter),
            "outerdiameter" => Ok(Dimension::OuterDiameter),
            "innerdiameter" => Ok(Dimension::InnerDiameter),
            "radius" => Ok(Dimension::Radius),
            "outerradius" => Ok(Dimension::OuterRadius),
            "innerradius" => Ok(Dimension::InnerRadius),
            _ => Err(format!("Unknown dimension: {}", s)),
        }
    }
}

/// Legacy positional variable names, assigned per shorthand position.
///
/// Older catalog formulas reference `A*B*C` instead of the canonical
/// vocabulary; decode populates both so either style evaluates.
pub const POSITION_ALIASES: [&str; 3] = ["A", "B", "C"];

/// Resolved numeric measurements for one part instance, keyed by variable
/// name (canonical or positional alias), values in millimeters.
///
/// Insertion filters out non-finite and negative values: they count as
/// absent, which keeps "typed 0" distinguishable from "typed nothing".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementSet {
    values: BTreeMap<String, f64>,
}

impl MeasurementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Insert a canonical dimension. Non-finite or negative values are
    /// discarded, leaving the key absent.
    pub fn set(&mut self, dim: Dimension, value: f64) {
        self.set_raw(dim.as_str(), value);
    }

    /// Insert under an arbitrary variable name (positional aliases, or
    /// keys from the generic codec). Same absence filter as [`set`].
    ///
    /// [`set`]: MeasurementSet::set
    pub fn set_raw(&mut self, name: &str, value: f64) {
        if value.is_finite() && value >= 0.0 {
            self.values.insert(name.to_string(), value);
        }
    }

    pub fn get(&self, dim: Dimension) -> Option<f64> {
        self.values.get(dim.as_str()).copied()
    }

    /// Resolve a variable name: canonical spellings (either vocabulary
    /// casing) first, then raw keys such as positional aliases.
    pub fn lookup(&self, name: &str) -> Option<f64> {
        if let Ok(dim) = name.parse::<Dimension>() {
            if let Some(v) = self.get(dim) {
                return Some(v);
            }
        }
        self.values.get(name).copied()
    }

    /// Copy of this set with radii filled in from their diameters where
    /// the radius is absent and the diameter is present.
    pub fn with_derived(&self) -> MeasurementSet {
        let mut out = self.clone();
        for dim in Dimension::all() {
            if let Some(base) = dim.derived_from() {
                if out.get(*dim).is_none() {
                    if let Some(v) = out.get(base) {
                        out.set(*dim, v / 2.0);
                    }
                }
            }
        }
        out
    }

    /// The canonical-dimension subset, used for round-trip comparison.
    pub fn dimensions(&self) -> BTreeMap<Dimension, f64> {
        Dimension::all()
            .iter()
            .filter_map(|d| self.get(*d).map(|v| (*d, v)))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.values.iter()
    }
}
