// 🗂️ Age Buckets - Two named schemes, selected by the caller
// Upper bounds are inclusive except the coarse "Under 30" cut.

use crate::error::{InsightError, Result};
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// SCHEME
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketScheme {
    /// Six buckets in ten-year steps
    #[default]
    Fine,
    /// Four buckets in twenty-year steps
    Coarse,
}

const FINE_LABELS: [&str; 6] = ["Under 20", "21–30", "31–40", "41–50", "51–60", "61+"];
const COARSE_LABELS: [&str; 4] = ["Under 30", "31-50", "51-70", "Over 70"];

impl BucketScheme {
    pub fn name(&self) -> &'static str {
        match self {
            BucketScheme::Fine => "fine",
            BucketScheme::Coarse => "coarse",
        }
    }

    /// Labels in ascending age order
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            BucketScheme::Fine => &FINE_LABELS,
            BucketScheme::Coarse => &COARSE_LABELS,
        }
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.labels().iter().any(|l| *l == label)
    }

    fn bucket_for(&self, age: u32) -> &'static str {
        match self {
            BucketScheme::Fine => match age {
                0..=20 => FINE_LABELS[0],
                21..=30 => FINE_LABELS[1],
                31..=40 => FINE_LABELS[2],
                41..=50 => FINE_LABELS[3],
                51..=60 => FINE_LABELS[4],
                _ => FINE_LABELS[5],
            },
            BucketScheme::Coarse => match age {
                0..=29 => COARSE_LABELS[0],
                30..=50 => COARSE_LABELS[1],
                51..=70 => COARSE_LABELS[2],
                _ => COARSE_LABELS[3],
            },
        }
    }
}

impl fmt::Display for BucketScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BucketScheme {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "fine" => Ok(BucketScheme::Fine),
            "coarse" => Ok(BucketScheme::Coarse),
            other => Err(InsightError::invalid(format!(
                "unknown bucket scheme '{}' (expected 'fine' or 'coarse')",
                other
            ))),
        }
    }
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Assign the bucket label for `age` under `scheme`
pub fn classify_age(age: i64, scheme: BucketScheme) -> Result<&'static str> {
    if age < 0 {
        return Err(InsightError::invalid(format!("age must be non-negative, got {}", age)));
    }
    let age = u32::try_from(age).unwrap_or(u32::MAX);
    Ok(scheme.bucket_for(age))
}

/// Classify an age given as text, as it arrives from a CSV cell or form field
pub fn classify_age_str(raw: &str, scheme: BucketScheme) -> Result<&'static str> {
    classify_age(parse_age(raw)?, scheme)
}

/// Parse a textual age; "45" and "45.0" are accepted, "45.5" and "abc" are not
pub fn parse_age(raw: &str) -> Result<i64> {
    let trimmed = raw.trim();
    if let Ok(age) = trimmed.parse::<i64>() {
        return Ok(age);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 => Ok(value as i64),
        _ => Err(InsightError::invalid(format!("age is not numeric: '{}'", raw))),
    }
}

/// Bucket of a record, or None when it has no age
pub fn bucket_of(record: &Record, scheme: BucketScheme) -> Option<&'static str> {
    record.age.map(|age| scheme.bucket_for(age))
}

// ============================================================================
// FILTERING
// ============================================================================

/// Target of a bucket filter: a concrete label or the "all" sentinel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketFilter {
    All,
    Label(String),
}

impl BucketFilter {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            BucketFilter::All
        } else {
            BucketFilter::Label(trimmed.to_string())
        }
    }
}

/// Records whose bucket equals the target, in input order.
/// `All` returns the input unchanged; records without an age never match a label.
pub fn filter_by_bucket(records: &[Record], scheme: BucketScheme, target: &BucketFilter) -> Vec<Record> {
    match target {
        BucketFilter::All => records.to_vec(),
        BucketFilter::Label(label) => records
            .iter()
            .filter(|r| bucket_of(r, scheme) == Some(label.as_str()))
            .cloned()
            .collect(),
    }
}

/// Dropdown options for a scheme: "All" followed by labels in age order
pub fn bucket_options(scheme: BucketScheme) -> Vec<String> {
    std::iter::once("All")
        .chain(scheme.labels().iter().copied())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(name: &str, age: u32, net_worth: f64) -> Record {
        Record::new(name).with_age(age).with_net_worth(net_worth)
    }

    #[test]
    fn test_fine_boundaries_are_inclusive() {
        assert_eq!(classify_age(0, BucketScheme::Fine).unwrap(), "Under 20");
        assert_eq!(classify_age(20, BucketScheme::Fine).unwrap(), "Under 20");
        assert_eq!(classify_age(21, BucketScheme::Fine).unwrap(), "21–30");
        assert_eq!(classify_age(30, BucketScheme::Fine).unwrap(), "21–30");
        assert_eq!(classify_age(40, BucketScheme::Fine).unwrap(), "31–40");
        assert_eq!(classify_age(50, BucketScheme::Fine).unwrap(), "41–50");
        assert_eq!(classify_age(60, BucketScheme::Fine).unwrap(), "51–60");
        assert_eq!(classify_age(61, BucketScheme::Fine).unwrap(), "61+");
        assert_eq!(classify_age(120, BucketScheme::Fine).unwrap(), "61+");
    }

    #[test]
    fn test_coarse_boundaries() {
        assert_eq!(classify_age(29, BucketScheme::Coarse).unwrap(), "Under 30");
        assert_eq!(classify_age(30, BucketScheme::Coarse).unwrap(), "31-50");
        assert_eq!(classify_age(50, BucketScheme::Coarse).unwrap(), "31-50");
        assert_eq!(classify_age(51, BucketScheme::Coarse).unwrap(), "51-70");
        assert_eq!(classify_age(70, BucketScheme::Coarse).unwrap(), "51-70");
        assert_eq!(classify_age(71, BucketScheme::Coarse).unwrap(), "Over 70");
    }

    #[test]
    fn test_every_age_lands_in_a_scheme_label() {
        for age in 0..=130 {
            let fine = classify_age(age, BucketScheme::Fine).unwrap();
            assert!(BucketScheme::Fine.contains_label(fine));
            let coarse = classify_age(age, BucketScheme::Coarse).unwrap();
            assert!(BucketScheme::Coarse.contains_label(coarse));
        }
    }

    #[test]
    fn test_negative_age_is_invalid() {
        let err = classify_age(-1, BucketScheme::Fine).unwrap_err();
        assert!(matches!(err, InsightError::InvalidInput(_)));
    }

    #[test]
    fn test_textual_age() {
        assert_eq!(classify_age_str(" 45 ", BucketScheme::Fine).unwrap(), "41–50");
        assert_eq!(classify_age_str("45.0", BucketScheme::Coarse).unwrap(), "31-50");
        assert!(classify_age_str("forty", BucketScheme::Fine).is_err());
        assert!(classify_age_str("45.5", BucketScheme::Fine).is_err());
        assert!(classify_age_str("-3", BucketScheme::Fine).is_err());
    }

    #[test]
    fn test_default_scheme_is_fine() {
        assert_eq!(BucketScheme::default(), BucketScheme::Fine);
    }

    #[test]
    fn test_scheme_from_str() {
        assert_eq!("fine".parse::<BucketScheme>().unwrap(), BucketScheme::Fine);
        assert_eq!("COARSE".parse::<BucketScheme>().unwrap(), BucketScheme::Coarse);

        let err = "decade".parse::<BucketScheme>().unwrap_err();
        assert!(matches!(err, InsightError::InvalidInput(_)));
    }

    #[test]
    fn test_filter_all_returns_input_unchanged() {
        let records = vec![
            make_record("a", 70, 5.0),
            make_record("b", 25, 1.0),
            Record::new("c"),
        ];

        let filtered = filter_by_bucket(&records, BucketScheme::Fine, &BucketFilter::parse("all"));
        assert_eq!(filtered, records);
    }

    #[test]
    fn test_filter_by_label_is_stable() {
        let records = vec![
            make_record("a", 25, 80.0),
            make_record("b", 45, 120.0),
            make_record("c", 25, 80.0),
        ];

        let filtered = filter_by_bucket(
            &records,
            BucketScheme::Fine,
            &BucketFilter::Label("21–30".to_string()),
        );

        let names: Vec<&str> = filtered.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_filter_without_matches_is_empty() {
        let records = vec![make_record("a", 25, 80.0), Record::new("no-age")];

        let filtered = filter_by_bucket(
            &records,
            BucketScheme::Fine,
            &BucketFilter::Label("61+".to_string()),
        );
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_bucket_options() {
        assert_eq!(
            bucket_options(BucketScheme::Coarse),
            vec!["All", "Under 30", "31-50", "51-70", "Over 70"]
        );
        assert_eq!(bucket_options(BucketScheme::Fine).len(), 7);
    }
}
