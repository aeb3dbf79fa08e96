//! Record type definitions
//!
//! Reference data (admin-maintained, versioned as plain YAML):
//! - [`PartType`] - geometric shape category with shorthand grammar and
//!   volume formula
//! - [`Material`] - stock material with density
//! - [`PriceRecord`] - one date-ranged entry of a material's append-only
//!   price history
//!
//! Working data:
//! - [`OrderLine`] - one row of a cutting order, owning the denormalized
//!   weight/price figures recomputed on every edit

pub mod material;
pub mod order;
pub mod part_type;
pub mod price;

pub use material::Material;
pub use order::OrderLine;
pub use part_type::PartType;
pub use price::PriceRecord;
