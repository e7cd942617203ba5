// 🥈 Silver Rate Table - distinct (state, rate, rate_area) triples
//
// Only the Silver metal level is kept. Identical triples collapse by exact
// text equality of the rate, not by numeric value.

use crate::records::{PlanRecord, Rate};
use crate::zip_index::RatingArea;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SilverRate {
    pub state: String,
    pub rate: Rate,
    pub rate_area: String,
}

#[derive(Debug, Clone, Default)]
pub struct SilverRateTable {
    triples: HashSet<SilverRate>,
    by_area: HashMap<RatingArea, Vec<Decimal>>,
}

impl SilverRateTable {
    pub fn build(records: &[PlanRecord]) -> Self {
        let triples: HashSet<SilverRate> = records
            .iter()
            .filter_map(|plan| {
                plan.silver_rate().map(|rate| SilverRate {
                    state: plan.state.clone(),
                    rate,
                    rate_area: plan.rate_area.clone(),
                })
            })
            .collect();

        let mut by_area: HashMap<RatingArea, Vec<Decimal>> = HashMap::new();
        for triple in &triples {
            by_area
                .entry(RatingArea::new(&triple.state, &triple.rate_area))
                .or_default()
                .push(triple.rate.value());
        }

        SilverRateTable { triples, by_area }
    }

    /// Rates of every Silver triple in the given rating area, unordered
    pub fn rates_for(&self, area: &RatingArea) -> &[Decimal] {
        self.by_area
            .get(area)
            .map(|rates| rates.as_slice())
            .unwrap_or(&[])
    }

    /// Number of distinct Silver triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}
