// 📊 Group Summary - Count, net worth and share per group
// Groups appear in the order their key first occurs in the input.

use crate::buckets::{bucket_of, BucketScheme};
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub label: String,
    pub count: usize,

    /// Sum of net worth; None for count-only views such as gender ratio
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_net_worth: Option<f64>,

    /// Share of the records in scope, rounded to 2 decimal places
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    CountOnly,
    CountAndNetWorth,
}

/// Built-in grouping dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    AgeBucket(BucketScheme),
    Country,
    Gender,
}

impl GroupKey {
    pub fn key(&self, record: &Record) -> Option<String> {
        match self {
            GroupKey::AgeBucket(scheme) => bucket_of(record, *scheme).map(String::from),
            GroupKey::Country => record
                .country
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(String::from),
            GroupKey::Gender => record.gender.map(|g| g.as_str().to_string()),
        }
    }
}

/// Round half away from zero to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `count / total * 100` rounded half away from zero to 2 decimal places.
/// Computed in integer hundredths; exact halves such as 23/160 = 14.375 round up.
pub fn percentage_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let (count, total) = (count as u128, total as u128);
    let hundredths = (count * 20_000 + total) / (2 * total);
    hundredths as f64 / 100.0
}

/// Group records by `key_fn` and summarise each group.
///
/// Records for which `key_fn` returns None are out of scope and do not count
/// towards any percentage.
pub fn group_summary<F>(records: &[Record], key_fn: F, aggregation: Aggregation) -> Vec<GroupSummary>
where
    F: Fn(&Record) -> Option<String>,
{
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, (usize, f64)> = HashMap::new();
    let mut total = 0usize;

    for record in records {
        let Some(key) = key_fn(record) else {
            continue;
        };
        total += 1;

        let entry = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            (0, 0.0)
        });
        entry.0 += 1;
        entry.1 += record.net_worth.unwrap_or(0.0);
    }

    order
        .into_iter()
        .map(|label| {
            let (count, sum) = groups[&label];
            GroupSummary {
                count,
                total_net_worth: match aggregation {
                    Aggregation::CountAndNetWorth => Some(sum),
                    Aggregation::CountOnly => None,
                },
                percentage: percentage_of(count, total),
                label,
            }
        })
        .collect()
}

/// Summary over one of the built-in dimensions
pub fn summarize_by(records: &[Record], key: GroupKey, aggregation: Aggregation) -> Vec<GroupSummary> {
    group_summary(records, |r| key.key(r), aggregation)
}

/// Donut view: count and share per gender, no net worth
pub fn gender_ratio(records: &[Record]) -> Vec<GroupSummary> {
    summarize_by(records, GroupKey::Gender, Aggregation::CountOnly)
}
