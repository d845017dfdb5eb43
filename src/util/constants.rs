// CompanyScope - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "CompanyScope";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "CompanyScope";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Data source
// =============================================================================

/// Default location of the company record collection.
pub const DEFAULT_SOURCE_URL: &str = "https://dujour.squiz.cloud/developer-challenge/data";

/// HTTP request timeout for the record fetch (seconds).
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// Maximum size of a local record file in bytes. Larger files are rejected
/// rather than read into memory.
pub const MAX_SOURCE_FILE_SIZE: u64 = 256 * 1024 * 1024; // 256 MB

// =============================================================================
// Pagination
// =============================================================================

/// Rows shown per table page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Minimum user-configurable page size.
pub const MIN_PAGE_SIZE: usize = 1;

/// Maximum user-configurable page size.
pub const MAX_PAGE_SIZE: usize = 100;

// =============================================================================
// Statistics
// =============================================================================

/// Industry value meaning "unknown". Compared trimmed and case-insensitively,
/// and only excluded from the distinct-industry count.
pub const UNKNOWN_INDUSTRY: &str = "n/a";

/// Indentation placed before each field of a record's search text.
pub const SEARCH_FIELD_INDENT: &str = "      ";

/// Number of points in each decorative sparkline.
pub const SPARKLINE_POINTS: usize = 12;

/// Lower bound of the sparkline jitter factor.
pub const SPARKLINE_MIN_FACTOR: f64 = 0.8;

/// Width of the sparkline jitter band (factor spans MIN..MIN+SPREAD).
pub const SPARKLINE_SPREAD: f64 = 0.4;

/// Divisor applied to the employee total before building its sparkline, so
/// the series stays on a scale comparable to the other counters.
pub const SPARKLINE_EMPLOYEE_DIVISOR: f64 = 100.0;

// =============================================================================
// URL parameters
// =============================================================================

/// Repeatable query parameter holding one selected country.
pub const PARAM_COUNTRY: &str = "country";

/// Repeatable query parameter holding one selected industry.
pub const PARAM_INDUSTRY: &str = "industry";

/// Single query parameter holding the search term.
pub const PARAM_SEARCH: &str = "search";

// =============================================================================
// Export
// =============================================================================

/// Maximum number of records that can be exported in a single operation.
pub const MAX_EXPORT_RECORDS: usize = 1_000_000;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in config.toml.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
