//! Command implementations

pub mod completions;
pub mod mat;
pub mod measure;
pub mod part;
pub mod price;
pub mod quote;
