//! Aggregation over filtered revenue rows.
//!
//! All operations are pure and deterministic. Grouping never drops or
//! double-counts a row, so the sums of any single grouping add up to
//! `total_amount` of the same row set.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::models::BudgetRow;

/// Placeholder for missing category values, so rows without a category
/// still participate in grouping.
pub const UNKNOWN_LABEL: &str = "unknown";

/// A category key with its summed actual amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateRow {
    pub key: String,
    pub total: f64,
}

/// A (category, subcategory) pair with its summed actual amount,
/// rounded to two decimals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairAggregate {
    pub first: String,
    pub second: String,
    pub total: f64,
}

pub fn total_amount(rows: &[BudgetRow]) -> f64 {
    rows.iter().map(|r| r.actual).sum()
}

/// The `n` rows with the largest actual amount, descending. The sort is
/// stable, so ties keep their original row order.
pub fn top_n(rows: &[BudgetRow], n: usize) -> Vec<BudgetRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| b.actual.partial_cmp(&a.actual).unwrap_or(Ordering::Equal));
    sorted.truncate(n);
    sorted
}

/// Sum of actual amounts per distinct key value, sorted descending by
/// sum. Ties are broken by key so the output is deterministic.
pub fn group_sum<F>(rows: &[BudgetRow], key: F) -> Vec<AggregateRow>
where
    F: Fn(&BudgetRow) -> Option<&str>,
{
    let mut totals: HashMap<String, f64> = HashMap::new();

    for row in rows {
        let key = key(row).unwrap_or(UNKNOWN_LABEL).to_string();
        *totals.entry(key).or_insert(0.0) += row.actual;
    }

    let mut result: Vec<AggregateRow> = totals
        .into_iter()
        .map(|(key, total)| AggregateRow { key, total })
        .collect();

    result.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.key.cmp(&b.key))
    });
    result
}

pub fn group_sum_top_n<F>(rows: &[BudgetRow], key: F, n: usize) -> Vec<AggregateRow>
where
    F: Fn(&BudgetRow) -> Option<&str>,
{
    let mut result = group_sum(rows, key);
    result.truncate(n);
    result
}

/// Sum of actual amounts per (keyA, keyB) pair, each field substituted
/// with the placeholder when missing. Output is in key order, so node
/// enumeration downstream is stable.
pub fn group_sum_pair<F, G>(rows: &[BudgetRow], key_a: F, key_b: G) -> Vec<PairAggregate>
where
    F: Fn(&BudgetRow) -> Option<&str>,
    G: Fn(&BudgetRow) -> Option<&str>,
{
    let mut totals: BTreeMap<(String, String), f64> = BTreeMap::new();

    for row in rows {
        let first = key_a(row).unwrap_or(UNKNOWN_LABEL).to_string();
        let second = key_b(row).unwrap_or(UNKNOWN_LABEL).to_string();
        *totals.entry((first, second)).or_insert(0.0) += row.actual;
    }

    totals
        .into_iter()
        .map(|((first, second), total)| PairAggregate {
            first,
            second,
            total: round2(total),
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
