// 🧭 Dashboard Query - What a dashboard page asks the core for
// One call composes filter -> rank -> breakdown for a dropdown selection.

use crate::buckets::{bucket_options, filter_by_bucket, BucketFilter, BucketScheme};
use crate::error::{InsightError, Result};
use crate::filters::{country_options, filter_by_country, CountryFilter};
use crate::ranking::{top_n_by_net_worth, RankedRow};
use crate::record::Record;
use crate::summary::{summarize_by, Aggregation, GroupKey, GroupSummary};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// QUERY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Selection {
    All,
    AgeGroup(String),
    Country(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardQuery {
    pub selection: Selection,
    pub scheme: BucketScheme,
    pub top_n: usize,
}

impl DashboardQuery {
    pub fn new(scheme: BucketScheme, top_n: usize) -> Self {
        DashboardQuery {
            selection: Selection::All,
            scheme,
            top_n,
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Age-group selection from a dropdown value ("All" or a label)
    pub fn age_group(mut self, raw: &str) -> Self {
        self.selection = match BucketFilter::parse(raw) {
            BucketFilter::All => Selection::All,
            BucketFilter::Label(label) => Selection::AgeGroup(label),
        };
        self
    }

    /// Country selection from a dropdown value ("All" or a country)
    pub fn country(mut self, raw: &str) -> Self {
        self.selection = match CountryFilter::parse(raw) {
            CountryFilter::All => Selection::All,
            CountryFilter::Country(country) => Selection::Country(country),
        };
        self
    }

    pub fn title(&self) -> String {
        match &self.selection {
            Selection::All => format!("Top {} Billionaires", self.top_n),
            Selection::AgeGroup(group) => format!("Top Billionaires in {} Group", group),
            Selection::Country(country) => format!("Top Billionaires in {}", country),
        }
    }
}

// ============================================================================
// VIEW
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub title: String,
    pub scheme: BucketScheme,
    /// Records in scope after the selection, before truncation
    pub matched: usize,
    pub rows: Vec<RankedRow>,
    /// Age buckets over the selected scope, with net worth totals
    pub breakdown: Vec<GroupSummary>,
}

pub fn run_query(records: &[Record], query: &DashboardQuery) -> Result<DashboardView> {
    let scoped = match &query.selection {
        Selection::All => records.to_vec(),
        Selection::AgeGroup(label) => {
            filter_by_bucket(records, query.scheme, &BucketFilter::Label(label.clone()))
        }
        Selection::Country(country) => {
            filter_by_country(records, &CountryFilter::Country(country.clone()))
        }
    };

    let rows = top_n_by_net_worth(&scoped, query.top_n)?;
    let breakdown = summarize_by(
        &scoped,
        GroupKey::AgeBucket(query.scheme),
        Aggregation::CountAndNetWorth,
    );

    Ok(DashboardView {
        title: query.title(),
        scheme: query.scheme,
        matched: scoped.len(),
        rows,
        breakdown,
    })
}

// ============================================================================
// SUMMARY DIMENSIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Age,
    Country,
    Gender,
}

impl FromStr for Dimension {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "age" | "age_group" => Ok(Dimension::Age),
            "country" => Ok(Dimension::Country),
            "gender" => Ok(Dimension::Gender),
            other => Err(InsightError::invalid(format!(
                "unknown summary dimension '{}' (expected age, country or gender)",
                other
            ))),
        }
    }
}

/// Summary table for a dimension; gender is a count-only ratio
pub fn dimension_summary(records: &[Record], dimension: Dimension, scheme: BucketScheme) -> Vec<GroupSummary> {
    match dimension {
        Dimension::Age => summarize_by(records, GroupKey::AgeBucket(scheme), Aggregation::CountAndNetWorth),
        Dimension::Country => summarize_by(records, GroupKey::Country, Aggregation::CountAndNetWorth),
        Dimension::Gender => summarize_by(records, GroupKey::Gender, Aggregation::CountOnly),
    }
}

/// Dropdown contents for both selectors
#[derive(Debug, Clone, Serialize)]
pub struct SelectorOptions {
    pub age_groups: Vec<String>,
    pub countries: Vec<String>,
}

pub fn selector_options(records: &[Record], scheme: BucketScheme) -> SelectorOptions {
    SelectorOptions {
        age_groups: bucket_options(scheme),
        countries: country_options(records),
    }
}
