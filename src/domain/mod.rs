//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains some of:
//! - `mod.rs`: Rich domain types (validated, render-ready)
//! - `wire.rs`: Raw serde structs matching backend responses
//! - `convert.rs`: `From` conversions with null-safety
//! - `state.rs`: State containers with update methods
//! - `client.rs`: Sub-client with HTTP methods

pub mod asset;
pub mod chart;
pub mod history;
pub mod range;
