//! Material record - stock material with density

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Entity, Status};
use crate::core::identity::{EntityId, EntityPrefix};

/// A stock material (MAT-...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Unique identifier
    pub id: EntityId,

    /// Material name (e.g. "45 steel", "6061 aluminum")
    pub name: String,

    /// Density in g/cm³
    pub density_g_cm3: f64,

    /// Grade or standard reference (e.g. "GB/T 699")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard: Option<String>,

    /// Current status
    #[serde(default)]
    pub status: Status,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this record)
    pub author: String,
}

impl Material {
    /// Create a new material record
    pub fn new(name: impl Into<String>, density_g_cm3: f64, author: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Mat),
            name: name.into(),
            density_g_cm3,
            standard: None,
            status: Status::default(),
            created: Utc::now(),
            author: author.into(),
        }
    }
}

impl Entity for Material {
    const PREFIX: &'static str = "MAT";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_creation() {
        let mat = Material::new("45 steel", 7.85, "test");
        assert!(mat.id.to_string().starts_with("MAT-"));
        assert_eq!(mat.name, "45 steel");
        assert_eq!(mat.density_g_cm3, 7.85);
        assert_eq!(mat.status, Status::Active);
    }

    #[test]
    fn test_material_roundtrip() {
        let mut mat = Material::new("6061 aluminum", 2.70, "test");
        mat.standard = Some("GB/T 3190".to_string());

        let yaml = serde_yml::to_string(&mat).unwrap();
        let parsed: Material = serde_yml::from_str(&yaml).unwrap();

        assert_eq!(mat.id, parsed.id);
        assert_eq!(parsed.name, "6061 aluminum");
        assert_eq!(parsed.density_g_cm3, 2.70);
        assert_eq!(parsed.standard.as_deref(), Some("GB/T 3190"));
    }

    #[test]
    fn test_entity_trait_implementation() {
        let mat = Material::new("45 steel", 7.85, "author");
        assert_eq!(Material::PREFIX, "MAT");
        assert_eq!(mat.label(), "45 steel");
        assert_eq!(mat.author(), "author");
    }
}
