//! Property-based tests for the engine's operations.
//!
//! These verify the invariants that must hold for any input:
//! 1. **No panics**: operations never crash on well-typed datasets
//! 2. **Orderings**: q1 ≤ median ≤ q3, std ≥ 0, min ≤ mean ≤ max
//! 3. **Partitioning**: eq/ne filters split a null-free dataset exactly
//! 4. **Permutation**: sorting reorders rows without adding or losing any

use proptest::prelude::*;

use grist::dataset::{Cell, Column, ColumnType, Dataset};
use grist::ops::{self, SortOrder};

/// A single-column numeric dataset with no nulls.
fn numeric_dataset(values: &[i32]) -> Dataset {
    Dataset::new(vec![Column::new(
        "v",
        ColumnType::Number,
        values.iter().map(|&v| Cell::Number(v as f64)).collect(),
    )])
}

fn column_numbers(ds: &Dataset) -> Vec<f64> {
    ds.column("v").unwrap().numeric_values()
}

proptest! {
    #[test]
    fn stats_orderings_hold(values in prop::collection::vec(-100_000i32..100_000, 1..200)) {
        let ds = numeric_dataset(&values);
        let s = ops::column_stats(&ds, "v").unwrap();

        prop_assert!(s.q1 <= s.median);
        prop_assert!(s.median <= s.q3);
        prop_assert!(s.std >= 0.0);
        prop_assert!(s.min <= s.mean + 1e-9);
        prop_assert!(s.mean <= s.max + 1e-9);
        prop_assert_eq!(s.count, values.len());
    }

    #[test]
    fn filter_eq_ne_partition(values in prop::collection::vec(-50i32..50, 1..100), pick in 0usize..100) {
        let ds = numeric_dataset(&values);
        let target = values[pick % values.len()];
        let query = target.to_string();

        let eq = ops::filter(&ds, "v", "eq", &query).unwrap();
        let ne = ops::filter(&ds, "v", "ne", &query).unwrap();

        // Disjoint and jointly exhaustive on null-free data.
        prop_assert_eq!(eq.row_count() + ne.row_count(), ds.row_count());
        prop_assert!(column_numbers(&eq).iter().all(|&v| v == target as f64));
        prop_assert!(column_numbers(&ne).iter().all(|&v| v != target as f64));
    }

    #[test]
    fn sort_is_a_permutation(values in prop::collection::vec(-1000i32..1000, 0..100)) {
        let ds = numeric_dataset(&values);
        let sorted = ops::sort(&ds, "v", SortOrder::Asc).unwrap();

        let mut expected: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        prop_assert_eq!(column_numbers(&sorted), expected);
    }

    #[test]
    fn sort_desc_reverses_asc_on_distinct_keys(values in prop::collection::hash_set(-1000i32..1000, 1..100)) {
        let values: Vec<i32> = values.into_iter().collect();
        let ds = numeric_dataset(&values);

        let asc = ops::sort(&ds, "v", SortOrder::Asc).unwrap();
        let desc = ops::sort(&ds, "v", SortOrder::Desc).unwrap();

        let mut reversed = column_numbers(&asc);
        reversed.reverse();
        prop_assert_eq!(column_numbers(&desc), reversed);
    }

    #[test]
    fn normalize_stays_in_unit_interval(values in prop::collection::vec(-100_000i32..100_000, 1..100)) {
        let ds = numeric_dataset(&values);
        let (out, name) = ops::transform(&ds, "v", "normalize", None).unwrap();

        let derived = out.column(&name).unwrap().numeric_values();
        prop_assert_eq!(derived.len(), values.len());
        prop_assert!(derived.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn group_sums_add_up(pairs in prop::collection::vec((0u8..5, -100i32..100), 1..100)) {
        let keys: Vec<Cell> = pairs.iter().map(|(k, _)| Cell::Text(format!("g{k}"))).collect();
        let vals: Vec<Cell> = pairs.iter().map(|(_, v)| Cell::Number(*v as f64)).collect();
        let ds = Dataset::new(vec![
            Column::new("k", ColumnType::Text, keys),
            Column::new("v", ColumnType::Number, vals),
        ]);

        let groups = ops::group_by(&ds, "k", "v", "sum").unwrap();
        let grouped_total: f64 = groups.values().sum();
        let total: f64 = pairs.iter().map(|(_, v)| *v as f64).sum();
        prop_assert!((grouped_total - total).abs() < 1e-6);
    }

    #[test]
    fn self_correlation_is_one(values in prop::collection::hash_set(-10_000i32..10_000, 2..50)) {
        let values: Vec<i32> = values.into_iter().collect();
        let ds = numeric_dataset(&values);

        let pairs = ops::correlation(&ds, &["v".to_string(), "v".to_string()]).unwrap();
        let r = pairs[0].r.unwrap();
        prop_assert!((r - 1.0).abs() < 1e-9);
    }
}
