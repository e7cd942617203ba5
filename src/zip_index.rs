// 🗺️ Zip Index - postal code → (state, rate area)
//
// A zipcode that spans more than one (state, rate_area) pair is ambiguous and
// never resolves. Classification needs every record first, so the index is
// only usable once `build` has consumed the whole table.

use crate::records::ZipRecord;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// The rating area a zipcode belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RatingArea {
    pub state: String,
    pub rate_area: String,
}

impl RatingArea {
    pub fn new(state: &str, rate_area: &str) -> Self {
        RatingArea {
            state: state.to_string(),
            rate_area: rate_area.to_string(),
        }
    }
}

impl std::fmt::Display for RatingArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.state, self.rate_area)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ZipIndex {
    mapping: HashMap<String, RatingArea>,
    ambiguous: HashSet<String>,
}

impl ZipIndex {
    pub fn build(records: &[ZipRecord]) -> Self {
        let mut areas_by_zip: HashMap<&str, HashSet<RatingArea>> = HashMap::new();

        for record in records {
            areas_by_zip
                .entry(record.zipcode.as_str())
                .or_default()
                .insert(RatingArea::new(&record.state, &record.rate_area));
        }

        let mut mapping = HashMap::new();
        let mut ambiguous = HashSet::new();

        for (zipcode, areas) in areas_by_zip {
            if areas.len() == 1 {
                if let Some(area) = areas.into_iter().next() {
                    mapping.insert(zipcode.to_string(), area);
                }
            } else {
                debug!(zipcode, areas = areas.len(), "zipcode spans several rate areas");
                ambiguous.insert(zipcode.to_string());
            }
        }

        ZipIndex { mapping, ambiguous }
    }

    /// Rating area for an unambiguous zipcode
    pub fn lookup(&self, zipcode: &str) -> Option<&RatingArea> {
        self.mapping.get(zipcode)
    }

    pub fn is_ambiguous(&self, zipcode: &str) -> bool {
        self.ambiguous.contains(zipcode)
    }

    /// Whether the zip table mentions this code at all
    pub fn contains(&self, zipcode: &str) -> bool {
        self.mapping.contains_key(zipcode) || self.ambiguous.contains(zipcode)
    }

    /// Number of resolvable zipcodes
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty() && self.ambiguous.is_empty()
    }

    pub fn ambiguous_count(&self) -> usize {
        self.ambiguous.len()
    }
}
