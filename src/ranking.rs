// 🏆 Top-N Ranking - Net worth descending, min-rank ties

use crate::error::{InsightError, Result};
use crate::record::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRow {
    /// 1 = highest net worth; ties share a rank and the next rank skips
    pub rank: u32,

    #[serde(flatten)]
    pub record: Record,
}

impl RankedRow {
    pub fn net_worth(&self) -> f64 {
        self.record.net_worth.unwrap_or(0.0)
    }
}

/// Rank records by net worth and keep the first `n`.
///
/// Sorting is stable, so equal net worths keep their input order.
/// Records without a finite, non-negative net worth are left out of the ranking.
pub fn top_n_by_net_worth(records: &[Record], n: usize) -> Result<Vec<RankedRow>> {
    if n == 0 {
        return Err(InsightError::invalid("n must be a positive integer"));
    }

    let mut ranked: Vec<(&Record, f64)> = records
        .iter()
        .filter_map(|r| r.net_worth.map(|w| (r, w)))
        .filter(|(_, w)| w.is_finite() && *w >= 0.0)
        .collect();

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut rows = Vec::with_capacity(n.min(ranked.len()));
    let mut rank = 0u32;
    let mut previous: Option<f64> = None;

    for (position, (record, worth)) in ranked.into_iter().take(n).enumerate() {
        // rank = 1 + number of strictly greater values = 1-based position of
        // the first row in a run of equal values
        if previous != Some(worth) {
            rank = position as u32 + 1;
            previous = Some(worth);
        }
        rows.push(RankedRow {
            rank,
            record: record.clone(),
        });
    }

    Ok(rows)
}

/// Parse a top-N count from text; zero, negative and non-numeric counts are rejected
pub fn parse_top_n(raw: &str) -> Result<usize> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| InsightError::invalid(format!("n is not an integer: '{}'", raw)))?;

    if value <= 0 {
        return Err(InsightError::invalid(format!("n must be positive, got {}", value)));
    }
    Ok(value as usize)
}
