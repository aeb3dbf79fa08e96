//! Cutstock Toolkit
//!
//! A library and CLI for costing cut-stock parts. Converts worker-typed
//! shorthand measurements into structured geometry, evaluates per-part-type
//! volume formulas, and resolves date-effective material prices into batch
//! cost estimates.

pub mod cli;
pub mod core;
pub mod engine;
pub mod entities;
