// 🎯 Rate Resolver - second-lowest Silver rate for a zipcode
//
// The "second lowest" is position 1 of the ascending sort, duplicates
// included: rates [100, 100, 150] resolve to 100.

use crate::records::format_rate;
use crate::silver_rates::SilverRateTable;
use crate::zip_index::{RatingArea, ZipIndex};
use rust_decimal::Decimal;

// ============================================================================
// RESOLUTION
// ============================================================================

/// Outcome of resolving one zipcode.
///
/// Every variant except `Rate` is written out as an empty rate. The variants
/// only exist so logs and the run summary can say why.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Second-lowest Silver rate of the zipcode's rating area
    Rate(Decimal),

    /// Zipcode spans several rating areas
    Ambiguous,

    /// Zipcode is not in the zip table; the pipeline answers this without
    /// consulting the resolver
    UnknownZip,

    /// Resolver was asked about a zipcode with no rating area
    Unmapped,

    /// Rating area has fewer than two Silver rates
    InsufficientRates { area: RatingArea, found: usize },
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Rate(_))
    }

    pub fn rate(&self) -> Option<Decimal> {
        match self {
            Resolution::Rate(rate) => Some(*rate),
            _ => None,
        }
    }

    /// Two-decimal rate, or an empty string when indeterminate
    pub fn formatted(&self) -> String {
        self.rate().map(format_rate).unwrap_or_default()
    }

    pub fn reason(&self) -> &str {
        match self {
            Resolution::Rate(_) => "resolved",
            Resolution::Ambiguous => "ambiguous zipcode",
            Resolution::UnknownZip => "unknown zipcode",
            Resolution::Unmapped => "no rating area for zipcode",
            Resolution::InsufficientRates { .. } => "fewer than two silver rates",
        }
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

pub struct RateResolver<'a> {
    zips: &'a ZipIndex,
    silver_rates: &'a SilverRateTable,
}

impl<'a> RateResolver<'a> {
    pub fn new(zips: &'a ZipIndex, silver_rates: &'a SilverRateTable) -> Self {
        RateResolver { zips, silver_rates }
    }

    pub fn resolve(&self, zipcode: &str) -> Resolution {
        if self.zips.is_ambiguous(zipcode) {
            return Resolution::Ambiguous;
        }

        let area = match self.zips.lookup(zipcode) {
            Some(area) => area,
            None => return Resolution::Unmapped,
        };

        let mut rates = self.silver_rates.rates_for(area).to_vec();
        if rates.len() < 2 {
            return Resolution::InsufficientRates {
                area: area.clone(),
                found: rates.len(),
            };
        }

        rates.sort();
        Resolution::Rate(rates[1])
    }
}

/// Resolve one zipcode against finished indices
pub fn resolve(zipcode: &str, zips: &ZipIndex, silver_rates: &SilverRateTable) -> Resolution {
    RateResolver::new(zips, silver_rates).resolve(zipcode)
}
