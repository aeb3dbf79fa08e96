//! Catalog providers - the boundary to already-fetched reference data
//!
//! The engine consumes part types, materials, and price histories as plain
//! pre-fetched data; where that data comes from is the caller's business.
//! The three source traits mark that seam. [`Catalog`] is the in-memory
//! implementation used by the CLI (loaded from a YAML directory) and by
//! tests and embedders directly.

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::core::identity::EntityId;
use crate::entities::material::Material;
use crate::entities::part_type::PartType;
use crate::entities::price::PriceRecord;

/// Part types by unique name
pub trait PartTypeSource {
    fn part_type(&self, name: &str) -> Option<&PartType>;
}

/// Materials by id
pub trait MaterialSource {
    fn material(&self, id: &EntityId) -> Option<&Material>;
}

/// Per-material price history, in the order it was appended
pub trait PriceSource {
    fn price_history(&self, material_id: &EntityId) -> &[PriceRecord];
}

/// Errors loading a catalog directory
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yml::Error,
    },
}

/// In-memory catalog of reference data
#[derive(Debug, Default)]
pub struct Catalog {
    part_types: Vec<PartType>,
    materials: Vec<Material>,
    prices: HashMap<EntityId, Vec<PriceRecord>>,
}

impl Catalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog seeded with the built-in part types every installation
    /// starts from: plate, round-bar, ring, disc-from-plate, sawn-square,
    /// and tube, with their shorthand hints and volume formulas.
    pub fn with_builtin_part_types() -> Self {
        let mut catalog = Self::new();
        for pt in Self::builtin_part_types() {
            catalog.add_part_type(pt);
        }
        catalog
    }

    /// The built-in part type definitions
    pub fn builtin_part_types() -> Vec<PartType> {
        vec![
            PartType::new("plate", "length*width*height", "length*width*height"),
            PartType::new("sawn-square", "length*width*height", "length*width*height"),
            PartType::new("round-bar", "pi*radius*radius*height", "φdiameter*height"),
            // A disc blank is sheared from a square of plate, so the
            // consumed stock is the square, not the disc
            PartType::new("disc-from-plate", "diameter*diameter*thickness", "φdiameter*thickness"),
            PartType::new(
                "ring",
                "pi*(outer_radius*outer_radius - inner_radius*inner_radius)*height",
                "φouter-inner*height",
            ),
            PartType::new(
                "tube",
                "pi*(outer_radius*outer_radius - inner_radius*inner_radius)*height",
                "φouter-inner*height",
            ),
        ]
    }

    /// Add or replace a part type (matched by name)
    pub fn add_part_type(&mut self, part_type: PartType) {
        if let Some(existing) = self
            .part_types
            .iter_mut()
            .find(|pt| pt.name == part_type.name)
        {
            *existing = part_type;
        } else {
            self.part_types.push(part_type);
        }
    }

    pub fn add_material(&mut self, material: Material) {
        self.materials.push(material);
    }

    pub fn add_price(&mut self, price: PriceRecord) {
        self.prices
            .entry(price.material_id.clone())
            .or_default()
            .push(price);
    }

    pub fn part_types(&self) -> &[PartType] {
        &self.part_types
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Find a material by full id, or by case-insensitive name substring
    /// when the query is not an id. Returns `None` on no match or an
    /// ambiguous name match.
    pub fn find_material(&self, query: &str) -> Option<&Material> {
        if let Ok(id) = EntityId::parse(query) {
            return self.materials.iter().find(|m| m.id == id);
        }

        let needle = query.to_lowercase();
        let mut matches = self
            .materials
            .iter()
            .filter(|m| m.name.to_lowercase().contains(&needle));
        let first = matches.next()?;
        if matches.next().is_some() {
            debug!(query, "ambiguous material name");
            return None;
        }
        Some(first)
    }

    /// Load a catalog from a directory of YAML files.
    ///
    /// Reads `parts.yaml`, `materials.yaml`, and `prices.yaml`; each file
    /// is optional and an absent file contributes nothing. Part types
    /// start from the built-in set, with file entries overriding by name.
    pub fn load_dir(dir: &Path) -> Result<Self, CatalogError> {
        let mut catalog = Self::with_builtin_part_types();

        for pt in load_file::<PartType>(&dir.join("parts.yaml"))? {
            catalog.add_part_type(pt);
        }
        for mat in load_file::<Material>(&dir.join("materials.yaml"))? {
            catalog.add_material(mat);
        }
        for price in load_file::<PriceRecord>(&dir.join("prices.yaml"))? {
            catalog.add_price(price);
        }

        Ok(catalog)
    }
}

/// Load a YAML list file, treating a missing file as empty
fn load_file<T: DeserializeOwned + 'static>(path: &Path) -> Result<Vec<T>, CatalogError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yml::from_str(&contents).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl PartTypeSource for Catalog {
    fn part_type(&self, name: &str) -> Option<&PartType> {
        self.part_types.iter().find(|pt| pt.name == name)
    }
}

impl MaterialSource for Catalog {
    fn material(&self, id: &EntityId) -> Option<&Material> {
        self.materials.iter().find(|m| &m.id == id)
    }
}

impl PriceSource for Catalog {
    fn price_history(&self, material_id: &EntityId) -> &[PriceRecord] {
        self.prices
            .get(material_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::EntityPrefix;

    #[test]
    fn test_builtin_part_types_present() {
        let catalog = Catalog::with_builtin_part_types();
        for name in ["plate", "round-bar", "ring", "disc-from-plate", "sawn-square", "tube"] {
            assert!(catalog.part_type(name).is_some(), "missing {}", name);
        }
        assert!(catalog.part_type("mystery").is_none());
    }

    #[test]
    fn test_add_part_type_overrides_by_name() {
        let mut catalog = Catalog::with_builtin_part_types();
        let count = catalog.part_types().len();
        catalog.add_part_type(PartType::new("plate", "A*B*C", "A*B*C"));
        assert_eq!(catalog.part_types().len(), count);
        assert_eq!(catalog.part_type("plate").unwrap().volume_formula, "A*B*C");
    }

    #[test]
    fn test_material_lookup() {
        let mut catalog = Catalog::new();
        let mat = Material::new("45 steel", 7.85, "test");
        let id = mat.id.clone();
        catalog.add_material(mat);

        assert!(catalog.material(&id).is_some());
        assert!(catalog.material(&EntityId::new(EntityPrefix::Mat)).is_none());
    }

    #[test]
    fn test_find_material_by_id_and_name() {
        let mut catalog = Catalog::new();
        let steel = Material::new("45 steel", 7.85, "test");
        let id = steel.id.clone();
        catalog.add_material(steel);
        catalog.add_material(Material::new("6061 aluminum", 2.70, "test"));

        assert_eq!(catalog.find_material(&id.to_string()).unwrap().id, id);
        assert_eq!(catalog.find_material("aluminum").unwrap().name, "6061 aluminum");
        assert!(catalog.find_material("titanium").is_none());
    }

    #[test]
    fn test_find_material_ambiguous_name() {
        let mut catalog = Catalog::new();
        catalog.add_material(Material::new("45 steel", 7.85, "test"));
        catalog.add_material(Material::new("40Cr steel", 7.85, "test"));
        assert!(catalog.find_material("steel").is_none());
    }

    #[test]
    fn test_price_history_empty_for_unknown_material() {
        let catalog = Catalog::new();
        let id = EntityId::new(EntityPrefix::Mat);
        assert!(catalog.price_history(&id).is_empty());
    }

    #[test]
    fn test_price_history_keeps_append_order() {
        let mut catalog = Catalog::new();
        let id = EntityId::new(EntityPrefix::Mat);
        catalog.add_price(PriceRecord::new(id.clone(), 10.0, "2025-01-01".parse().unwrap(), "test"));
        catalog.add_price(PriceRecord::new(id.clone(), 12.0, "2025-06-01".parse().unwrap(), "test"));

        let history = catalog.price_history(&id);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].unit_price, 10.0);
        assert_eq!(history[1].unit_price, 12.0);
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mat = Material::new("45 steel", 7.85, "test");
        let price = PriceRecord::new(mat.id.clone(), 25.5, "2025-06-07".parse().unwrap(), "test");
        std::fs::write(
            dir.path().join("materials.yaml"),
            serde_yml::to_string(&vec![&mat]).unwrap(),
        )
        .unwrap();
        std::fs::write(
            dir.path().join("prices.yaml"),
            serde_yml::to_string(&vec![&price]).unwrap(),
        )
        .unwrap();

        let catalog = Catalog::load_dir(dir.path()).unwrap();
        assert_eq!(catalog.materials().len(), 1);
        assert_eq!(catalog.price_history(&mat.id).len(), 1);
        // Built-in part types load even without a parts.yaml
        assert!(catalog.part_type("plate").is_some());
    }

    #[test]
    fn test_load_dir_rejects_bad_yaml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("materials.yaml"), ": not yaml :").unwrap();
        assert!(matches!(
            Catalog::load_dir(dir.path()),
            Err(CatalogError::Parse { .. })
        ));
    }
}
