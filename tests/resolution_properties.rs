//! Property-based tests for zipcode resolution.
//!
//! Uses `proptest` to check the ambiguity, isolation, idempotence and
//! second-lowest rules over random tables.

use proptest::prelude::*;
use rust_decimal::Decimal;
use slcsp::{
    format_rate, resolve, run, PlanRecord, QueryInput, Resolution, SilverRateTable,
    ZipIndex, ZipRecord,
};

// =============================================================================
// Generators
// =============================================================================

fn arb_zipcode() -> impl Strategy<Value = String> {
    "[0-9]{5}"
}

fn arb_state() -> impl Strategy<Value = String> {
    prop_oneof![Just("NY"), Just("CA"), Just("GA"), Just("TX")].prop_map(String::from)
}

fn arb_rate_area() -> impl Strategy<Value = String> {
    (1u8..6).prop_map(|n| n.to_string())
}

/// Rate text with two decimals, e.g. "245.20"
fn arb_rate() -> impl Strategy<Value = String> {
    (10_000u32..90_000).prop_map(|cents| format!("{}.{:02}", cents / 100, cents % 100))
}

fn arb_metal_level() -> impl Strategy<Value = String> {
    prop_oneof![Just("Silver"), Just("Silver"), Just("Gold"), Just("Bronze")]
        .prop_map(String::from)
}

fn arb_plan() -> impl Strategy<Value = PlanRecord> {
    (arb_state(), arb_metal_level(), arb_rate(), arb_rate_area()).prop_map(
        |(state, metal_level, rate, rate_area)| {
            PlanRecord::new(&state, &metal_level, &rate, &rate_area)
        },
    )
}

fn arb_zip() -> impl Strategy<Value = ZipRecord> {
    (arb_zipcode(), arb_state(), arb_rate_area())
        .prop_map(|(zipcode, state, rate_area)| ZipRecord::new(&zipcode, &state, &rate_area))
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// A zipcode with two different (state, rate_area) pairs never resolves
    #[test]
    fn prop_ambiguous_zip_never_resolves(
        zipcode in arb_zipcode(),
        area_a in arb_rate_area(),
        area_b in arb_rate_area(),
        plans in prop::collection::vec(arb_plan(), 0..40),
    ) {
        prop_assume!(area_a != area_b);

        let zips = ZipIndex::build(&[
            ZipRecord::new(&zipcode, "NY", &area_a),
            ZipRecord::new(&zipcode, "NY", &area_b),
        ]);
        let silver = SilverRateTable::build(&plans);

        prop_assert_eq!(resolve(&zipcode, &zips, &silver), Resolution::Ambiguous);
        prop_assert!(zips.lookup(&zipcode).is_none());
    }

    /// Every zipcode of the table lands in exactly one of mapping / ambiguous set
    #[test]
    fn prop_zip_classification_is_exclusive(
        records in prop::collection::vec(arb_zip(), 0..60),
    ) {
        let zips = ZipIndex::build(&records);

        for record in &records {
            let mapped = zips.lookup(&record.zipcode).is_some();
            let ambiguous = zips.is_ambiguous(&record.zipcode);
            prop_assert!(mapped != ambiguous);
        }
    }

    /// Plans from other rating areas or other metal levels don't change a result
    #[test]
    fn prop_resolution_depends_only_on_matching_silver_plans(
        plans in prop::collection::vec(arb_plan(), 0..40),
        noise in prop::collection::vec(arb_plan(), 0..40),
    ) {
        let zips = ZipIndex::build(&[ZipRecord::new("10001", "NY", "2")]);
        let noise: Vec<PlanRecord> = noise
            .into_iter()
            .filter(|p| !(p.is_silver() && p.state == "NY" && p.rate_area == "2"))
            .collect();

        let mut noisy = plans.clone();
        noisy.extend(noise);

        prop_assert_eq!(
            resolve("10001", &zips, &SilverRateTable::build(&plans)),
            resolve("10001", &zips, &SilverRateTable::build(&noisy))
        );
    }

    /// The resolved rate is the second element of the ascending sort
    #[test]
    fn prop_second_lowest_matches_sorted_position(
        rates in prop::collection::hash_set(arb_rate(), 0..12),
    ) {
        let zips = ZipIndex::build(&[ZipRecord::new("10001", "NY", "2")]);
        let plans: Vec<PlanRecord> = rates
            .iter()
            .map(|r| PlanRecord::new("NY", "Silver", r, "2"))
            .collect();
        let silver = SilverRateTable::build(&plans);

        let mut expected: Vec<Decimal> = plans
            .iter()
            .filter_map(|p| p.silver_rate().map(|rate| rate.value()))
            .collect();
        expected.sort();

        let resolution = resolve("10001", &zips, &silver);
        if expected.len() < 2 {
            prop_assert_eq!(resolution.formatted(), "");
        } else {
            prop_assert_eq!(resolution.formatted(), format_rate(expected[1]));
            prop_assert!(resolution.rate().unwrap() >= expected[0]);
        }
    }

    /// Same inputs, same output
    #[test]
    fn prop_runs_are_idempotent(
        records in prop::collection::vec(arb_zip(), 0..40),
        plans in prop::collection::vec(arb_plan(), 0..40),
        queries in prop::collection::vec(arb_zipcode(), 0..20),
    ) {
        let input = QueryInput::Batch(queries.clone());

        let first = run(&input, &ZipIndex::build(&records), &SilverRateTable::build(&plans)).unwrap();
        let second = run(&input, &ZipIndex::build(&records), &SilverRateTable::build(&plans)).unwrap();

        prop_assert_eq!(&first, &second);
        let codes: Vec<&str> = first.iter().map(|r| r.zipcode.as_str()).collect();
        let expected: Vec<&str> = queries.iter().map(|q| q.as_str()).collect();
        prop_assert_eq!(codes, expected);
    }
}
