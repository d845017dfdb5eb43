// CompanyScope - lib.rs
//
// Library entry point, exposing the dashboard pipeline for integration
// testing and for any front end that wants to drive it.
//
// The command-line front end lives in `main.rs` and is not part of the
// library surface.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
