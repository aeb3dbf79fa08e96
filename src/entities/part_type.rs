//! PartType record - geometric shape category
//!
//! Part types are reference data keyed by a unique name tag. Each carries
//! the parametric volume formula the engine evaluates and the input hint
//! shown next to the measurement cell.

use serde::{Deserialize, Serialize};

use crate::core::entity::Status;
use crate::engine::formula;
use crate::engine::measure::Dimension;

/// A part type: named shape category with shorthand grammar and formula
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartType {
    /// Unique tag (plate, round-bar, ring, disc-from-plate, ...)
    pub name: String,

    /// Volume formula over the measurement vocabulary, mm³
    pub volume_formula: String,

    /// Display template for the measurement cell (e.g. `φdiameter*height`)
    pub input_hint: String,

    /// Detailed description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Current status
    #[serde(default)]
    pub status: Status,
}

impl PartType {
    /// Create a new part type
    pub fn new(
        name: impl Into<String>,
        volume_formula: impl Into<String>,
        input_hint: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            volume_formula: volume_formula.into(),
            input_hint: input_hint.into(),
            description: None,
            status: Status::default(),
        }
    }

    /// Vocabulary dimensions the volume formula requires
    pub fn variables(&self) -> Vec<Dimension> {
        formula::variable_names(&self.volume_formula)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_type_creation() {
        let pt = PartType::new("plate", "length*width*height", "length*width*height");
        assert_eq!(pt.name, "plate");
        assert_eq!(pt.status, Status::Active);
    }

    #[test]
    fn test_variables_from_formula() {
        let pt = PartType::new("round-bar", "pi*radius*radius*height", "φdiameter*height");
        assert_eq!(pt.variables(), vec![Dimension::Height, Dimension::Radius]);
    }

    #[test]
    fn test_part_type_roundtrip() {
        let mut pt = PartType::new("ring", "pi*(outer_radius*outer_radius - inner_radius*inner_radius)*height", "φouter-inner*height");
        pt.description = Some("Flame-cut ring blank".to_string());

        let yaml = serde_yml::to_string(&pt).unwrap();
        let parsed: PartType = serde_yml::from_str(&yaml).unwrap();

        assert_eq!(parsed.name, "ring");
        assert_eq!(parsed.volume_formula, pt.volume_formula);
        assert_eq!(parsed.description.as_deref(), Some("Flame-cut ring blank"));
    }

    #[test]
    fn test_status_serialization() {
        let mut pt = PartType::new("plate", "length*width*height", "length*width*height");
        pt.status = Status::Obsolete;
        let yaml = serde_yml::to_string(&pt).unwrap();
        assert!(yaml.contains("status: obsolete"));
    }
}
