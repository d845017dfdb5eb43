// CompanyScope - core/mod.rs
//
// Core business logic layer: the filter/sort/paginate/aggregate pipeline.
// Must NOT depend on: platform, app, or any network/filesystem I/O.

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod model;
pub mod paginate;
pub mod query;
pub mod sort;
pub mod trend;
pub mod url_codec;
