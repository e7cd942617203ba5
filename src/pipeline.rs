// 🔁 Query Pipeline - validate, resolve, and collect results in input order
//
// Two phases: indices are finished before the first query runs. A malformed
// zipcode aborts the whole batch, so callers never see partial results.

use crate::error::{Result, SlcspError};
use crate::resolver::{RateResolver, Resolution};
use crate::silver_rates::SilverRateTable;
use crate::zip_index::ZipIndex;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

pub const ZIPCODE_LENGTH: usize = 5;

// ============================================================================
// QUERY INPUT
// ============================================================================

/// Where the requested zipcodes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryInput {
    /// Every zipcode of the query table, in file order
    Batch(Vec<String>),

    /// One zipcode supplied directly on the command line
    Single(String),
}

impl QueryInput {
    pub fn zipcodes(&self) -> &[String] {
        match self {
            QueryInput::Batch(zipcodes) => zipcodes,
            QueryInput::Single(zipcode) => std::slice::from_ref(zipcode),
        }
    }
}

// ============================================================================
// QUERY RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub zipcode: String,
    /// Two-decimal rate, empty when indeterminate
    pub rate: String,
    pub resolution: Resolution,
}

impl QueryResult {
    fn new(zipcode: &str, resolution: Resolution) -> Self {
        QueryResult {
            zipcode: zipcode.to_string(),
            rate: resolution.formatted(),
            resolution,
        }
    }

    pub fn has_rate(&self) -> bool {
        !self.rate.is_empty()
    }
}

/// Check that a zipcode is exactly five ASCII digits
pub fn validate_zipcode(zipcode: &str) -> Result<()> {
    if zipcode.len() != ZIPCODE_LENGTH || !zipcode.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SlcspError::InvalidQueryFormat(zipcode.to_string()));
    }
    Ok(())
}

// ============================================================================
// PIPELINE
// ============================================================================

pub struct QueryPipeline<'a> {
    zips: &'a ZipIndex,
    resolver: RateResolver<'a>,
}

impl<'a> QueryPipeline<'a> {
    pub fn new(zips: &'a ZipIndex, silver_rates: &'a SilverRateTable) -> Self {
        QueryPipeline {
            zips,
            resolver: RateResolver::new(zips, silver_rates),
        }
    }

    pub fn run(&self, input: &QueryInput) -> Result<Vec<QueryResult>> {
        let zipcodes = input.zipcodes();
        let mut results = Vec::with_capacity(zipcodes.len());

        for zipcode in zipcodes {
            validate_zipcode(zipcode)?;

            let resolution = if self.zips.contains(zipcode) {
                self.resolver.resolve(zipcode)
            } else {
                Resolution::UnknownZip
            };

            debug!(zipcode = %zipcode, reason = resolution.reason(), "resolved query");
            results.push(QueryResult::new(zipcode, resolution));
        }

        Ok(results)
    }
}

/// Resolve every requested zipcode in input order
pub fn run(
    input: &QueryInput,
    zips: &ZipIndex,
    silver_rates: &SilverRateTable,
) -> Result<Vec<QueryResult>> {
    QueryPipeline::new(zips, silver_rates).run(input)
}

// ============================================================================
// RUN SUMMARY
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub query_count: usize,
    pub resolved: usize,
    pub ambiguous: usize,
    pub unknown: usize,
    pub insufficient_rates: usize,
    pub indexed_zipcodes: usize,
    pub ambiguous_zipcodes: usize,
    pub silver_rates: usize,
    pub completed_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn new(results: &[QueryResult], zips: &ZipIndex, silver_rates: &SilverRateTable) -> Self {
        RunSummary {
            query_count: results.len(),
            resolved: count_where(results, Resolution::is_resolved),
            ambiguous: count_where(results, |r| matches!(r, Resolution::Ambiguous)),
            unknown: count_where(results, |r| {
                matches!(r, Resolution::UnknownZip | Resolution::Unmapped)
            }),
            insufficient_rates: count_where(results, |r| {
                matches!(r, Resolution::InsufficientRates { .. })
            }),
            indexed_zipcodes: zips.len(),
            ambiguous_zipcodes: zips.ambiguous_count(),
            silver_rates: silver_rates.len(),
            completed_at: Utc::now(),
        }
    }

    pub fn unresolved(&self) -> usize {
        self.query_count - self.resolved
    }

    pub fn log(&self) {
        info!(
            queries = self.query_count,
            resolved = self.resolved,
            ambiguous = self.ambiguous,
            unknown = self.unknown,
            insufficient_rates = self.insufficient_rates,
            "slcsp run complete"
        );
        if let Ok(json) = serde_json::to_string(self) {
            debug!(summary = %json, "run summary");
        }
    }
}

fn count_where(results: &[QueryResult], pred: impl Fn(&Resolution) -> bool) -> usize {
    results.iter().filter(|r| pred(&r.resolution)).count()
}
