// 📄 Input Records - typed rows from the three source tables
//
// Rows arrive as string fields. Only structural checks happen here:
// enough columns, and a Silver plan rate that reads as a number. The
// query zipcode is kept exactly as written so validation sees it untouched.

use crate::error::{Result, SlcspError, Table};
use rust_decimal::prelude::*;
use std::hash::{Hash, Hasher};

pub const ZIP_FIELD_COUNT: usize = 5;
pub const PLAN_FIELD_COUNT: usize = 5;
pub const QUERY_FIELD_COUNT: usize = 1;

/// Metal level that feeds rate resolution
pub const SILVER: &str = "Silver";

// ============================================================================
// RATE
// ============================================================================

/// A plan rate, kept both as the text provided and as a decimal value.
///
/// Equality and hashing use the text, so `"220.50"` and `"220.5"` are two
/// different rates for deduplication. Ordering uses the numeric value.
#[derive(Debug, Clone)]
pub struct Rate {
    raw: String,
    value: Decimal,
}

impl Rate {
    pub fn parse(raw: &str) -> Option<Rate> {
        let raw = raw.trim();
        let value = Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .ok()?;
        Some(Rate {
            raw: raw.to_string(),
            value,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> Decimal {
        self.value
    }
}

impl PartialEq for Rate {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Rate {}

impl Hash for Rate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

/// Format a rate with exactly two decimals, rounding half away from zero.
///
/// `200` becomes `"200.00"`, `199.995` becomes `"200.00"`.
pub fn format_rate(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

// ============================================================================
// ZIP RECORD
// ============================================================================

/// Row of the zip table: zipcode,state,county_code,name,rate_area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipRecord {
    pub zipcode: String,
    pub state: String,
    pub county_code: String,
    pub name: String,
    pub rate_area: String,
}

impl ZipRecord {
    pub fn new(zipcode: &str, state: &str, rate_area: &str) -> Self {
        ZipRecord {
            zipcode: zipcode.to_string(),
            state: state.to_string(),
            county_code: String::new(),
            name: String::new(),
            rate_area: rate_area.to_string(),
        }
    }

    pub fn from_fields<S: AsRef<str>>(fields: &[S], line: usize) -> Result<Self> {
        check_field_count(Table::Zips, fields.len(), ZIP_FIELD_COUNT, line)?;
        Ok(ZipRecord {
            zipcode: field(fields, 0),
            state: field(fields, 1),
            county_code: field(fields, 2),
            name: field(fields, 3),
            rate_area: field(fields, 4),
        })
    }
}

// ============================================================================
// PLAN RECORD
// ============================================================================

/// Row of the plan table: plan_id,state,metal_level,rate,rate_area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRecord {
    pub plan_id: String,
    pub state: String,
    pub metal_level: String,
    /// Rate text as provided; only read for Silver plans
    pub rate: String,
    pub rate_area: String,
}

impl PlanRecord {
    pub fn new(state: &str, metal_level: &str, rate: &str, rate_area: &str) -> Self {
        PlanRecord {
            plan_id: String::new(),
            state: state.to_string(),
            metal_level: metal_level.to_string(),
            rate: rate.to_string(),
            rate_area: rate_area.to_string(),
        }
    }

    pub fn from_fields<S: AsRef<str>>(fields: &[S], line: usize) -> Result<Self> {
        check_field_count(Table::Plans, fields.len(), PLAN_FIELD_COUNT, line)?;

        let record = PlanRecord {
            plan_id: field(fields, 0),
            state: field(fields, 1),
            metal_level: field(fields, 2),
            rate: field(fields, 3),
            rate_area: field(fields, 4),
        };

        // Other metal levels never feed resolution, so their rate is not checked
        if record.is_silver() && record.silver_rate().is_none() {
            return Err(SlcspError::MalformedRecord {
                table: Table::Plans,
                line,
                reason: format!("rate '{}' is not a number", record.rate),
            });
        }

        Ok(record)
    }

    pub fn is_silver(&self) -> bool {
        self.metal_level == SILVER
    }

    /// Parsed rate of a Silver plan; `None` for other metal levels
    pub fn silver_rate(&self) -> Option<Rate> {
        if !self.is_silver() {
            return None;
        }
        Rate::parse(&self.rate)
    }
}

// ============================================================================
// QUERY RECORD
// ============================================================================

/// Row of the query table: zipcode,rate (rate is ignored on input)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRecord {
    pub zipcode: String,
}

impl QueryRecord {
    pub fn from_fields<S: AsRef<str>>(fields: &[S], line: usize) -> Result<Self> {
        check_field_count(Table::Queries, fields.len(), QUERY_FIELD_COUNT, line)?;
        Ok(QueryRecord {
            zipcode: fields[0].as_ref().to_string(),
        })
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn field<S: AsRef<str>>(fields: &[S], index: usize) -> String {
    fields[index].as_ref().trim().to_string()
}

fn check_field_count(table: Table, found: usize, expected: usize, line: usize) -> Result<()> {
    if found < expected {
        return Err(SlcspError::MalformedRecord {
            table,
            line,
            reason: format!("expected {} fields, found {}", expected, found),
        });
    }
    Ok(())
}
