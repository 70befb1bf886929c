//! # whatif-core
//!
//! Core types and error types for the whatif ontology toolkit.
//!
//! This crate provides the foundational types shared across all whatif crates:
//! - Entity structs for the three ontology layers (assets, threats, controls)
//!   and the derived relationship edge
//! - Rating and status enums
//! - Response validator defaults
//! - Derived report records (coverage, expected impact, validation result)
//! - Cross-cutting error types (`CoreError`, `SchemaError`)

pub mod defaults;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod reports;
