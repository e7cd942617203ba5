// SLCSP Resolver - Core Library
// Second-lowest-cost Silver plan rate per zipcode

pub mod error;
pub mod records;        // Typed rows + rate formatting
pub mod zip_index;      // zipcode → rating area, ambiguity detection
pub mod silver_rates;   // Distinct Silver (state, rate, area) triples
pub mod resolver;       // Second-lowest rate per zipcode
pub mod pipeline;       // Validation + ordered batch resolution
pub mod loader;         // CSV tables → records
pub mod output;         // CSV / JSON writers
pub mod config;
pub mod app;

// Re-export commonly used types
pub use error::{SlcspError, Table};
pub use records::{format_rate, PlanRecord, QueryRecord, Rate, ZipRecord, SILVER};
pub use zip_index::{RatingArea, ZipIndex};
pub use silver_rates::{SilverRate, SilverRateTable};
pub use resolver::{resolve, RateResolver, Resolution};
pub use pipeline::{run, validate_zipcode, QueryInput, QueryPipeline, QueryResult, RunSummary};
pub use loader::{load_plan_records, load_query_records, load_zip_records};
pub use output::{write_csv, write_json, write_results, OutputFormat};
pub use config::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
