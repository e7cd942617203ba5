//! Run configuration
//!
//! Table paths and the output format come from environment variables with
//! sensible defaults. The first command-line argument, when present, is a
//! single zipcode to resolve instead of reading the query table.

use crate::output::OutputFormat;
use crate::pipeline::QueryInput;
use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_ZIPS_PATH: &str = "zips.csv";
pub const DEFAULT_PLANS_PATH: &str = "plans.csv";
pub const DEFAULT_QUERIES_PATH: &str = "slcsp.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// zipcode,state,county_code,name,rate_area
    pub zips_path: PathBuf,
    /// plan_id,state,metal_level,rate,rate_area
    pub plans_path: PathBuf,
    /// zipcode,rate
    pub queries_path: PathBuf,
    /// Resolve just this zipcode instead of the query table
    pub single_zip: Option<String>,
    pub output_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            zips_path: PathBuf::from(DEFAULT_ZIPS_PATH),
            plans_path: PathBuf::from(DEFAULT_PLANS_PATH),
            queries_path: PathBuf::from(DEFAULT_QUERIES_PATH),
            single_zip: None,
            output_format: OutputFormat::Csv,
        }
    }
}

impl Config {
    /// Load configuration from the process environment and arguments
    pub fn from_env() -> Result<Self> {
        Self::from_sources(|key| std::env::var(key).ok(), std::env::args().skip(1))
    }

    /// Build configuration from a variable lookup and the arguments after the
    /// program name
    pub fn from_sources<F, I>(lookup: F, args: I) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
        I: IntoIterator<Item = String>,
    {
        let defaults = Config::default();

        let output_format = match lookup("SLCSP_OUTPUT_FORMAT") {
            Some(value) => value
                .parse::<OutputFormat>()
                .map_err(|e| anyhow!(e))
                .context("Invalid SLCSP_OUTPUT_FORMAT")?,
            None => defaults.output_format,
        };

        let mut args = args.into_iter();
        let single_zip = args.next();
        let extra: Vec<String> = args.collect();
        if !extra.is_empty() {
            warn!(ignored = ?extra, "only the first zipcode argument is used");
        }

        Ok(Config {
            zips_path: lookup("SLCSP_ZIPS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.zips_path),
            plans_path: lookup("SLCSP_PLANS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.plans_path),
            queries_path: lookup("SLCSP_QUERIES_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.queries_path),
            single_zip,
            output_format,
        })
    }

    /// Shortcut for tests and embedding: all three tables under one directory
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Config {
            zips_path: dir.join(DEFAULT_ZIPS_PATH),
            plans_path: dir.join(DEFAULT_PLANS_PATH),
            queries_path: dir.join(DEFAULT_QUERIES_PATH),
            ..Config::default()
        }
    }

    /// Whether queries come from the table or the single argument.
    /// Returns `None` when the query table still has to be read.
    pub fn single_query(&self) -> Option<QueryInput> {
        self.single_zip.clone().map(QueryInput::Single)
    }
}
