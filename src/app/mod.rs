// CompanyScope - app/mod.rs
//
// Application layer: record loading and dashboard orchestration.
// Dependencies: core layer.
// Must NOT depend on: platform specifics.

pub mod fetch;
pub mod state;
