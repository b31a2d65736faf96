// Billionaire Insights - Core Library
// Bucketing, ranking and group summaries for billionaire records,
// shared by the CLI, the API server, and tests

pub mod error;
pub mod record;
pub mod buckets;    // Age bucket schemes + bucket filter
pub mod ranking;    // Top-N by net worth, min-rank ties
pub mod summary;    // Count / net worth / percentage per group
pub mod filters;    // Country filter + dropdown values
pub mod gender;     // Gender mapping table used by the loader
pub mod loader;     // CSV -> Record boundary
pub mod cache;      // Dataset cache with mtime invalidation
pub mod config;
pub mod dashboard;  // Query contract for dashboard pages

// Re-export commonly used types
pub use error::{InsightError, Result};
pub use record::{Record, Gender, Field, drop_incomplete};
pub use buckets::{
    BucketScheme, BucketFilter,
    classify_age, classify_age_str, parse_age, bucket_of, filter_by_bucket, bucket_options,
};
pub use ranking::{RankedRow, top_n_by_net_worth, parse_top_n};
pub use summary::{
    GroupSummary, Aggregation, GroupKey,
    group_summary, summarize_by, gender_ratio, round2, percentage_of,
};
pub use filters::{CountryFilter, filter_by_country, country_options};
pub use gender::GenderMap;
pub use loader::{LoaderConfig, LoadReport, load_records, load_records_from_reader, parse_net_worth};
pub use cache::{DatasetCache, SnapshotInfo};
pub use config::{Config, ColumnMap, DatasetConfig, DashboardConfig, ServerConfig};
pub use dashboard::{
    DashboardQuery, DashboardView, Selection, Dimension, SelectorOptions,
    run_query, dimension_summary, selector_options,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
