// 🌍 Country Filter - Dropdown values and stable filtering by country

use crate::record::Record;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryFilter {
    All,
    Country(String),
}

impl CountryFilter {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            CountryFilter::All
        } else {
            CountryFilter::Country(trimmed.to_string())
        }
    }
}

/// Records from the selected country, in input order (case-insensitive match)
pub fn filter_by_country(records: &[Record], target: &CountryFilter) -> Vec<Record> {
    match target {
        CountryFilter::All => records.to_vec(),
        CountryFilter::Country(wanted) => {
            let wanted = wanted.trim().to_lowercase();
            records
                .iter()
                .filter(|r| {
                    r.country
                        .as_deref()
                        .map(|c| c.trim().to_lowercase() == wanted)
                        .unwrap_or(false)
                })
                .cloned()
                .collect()
        }
    }
}

/// "All" followed by every distinct country, sorted
pub fn country_options(records: &[Record]) -> Vec<String> {
    let countries: BTreeSet<&str> = records
        .iter()
        .filter_map(|r| r.country.as_deref())
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();

    std::iter::once("All".to_string())
        .chain(countries.into_iter().map(String::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(name: &str, country: &str) -> Record {
        Record::new(name).with_age(50).with_net_worth(1.0).with_country(country)
    }

    #[test]
    fn test_filter_by_country_case_insensitive() {
        let records = vec![
            make_record("a", "India"),
            make_record("b", "China"),
            make_record("c", " india "),
        ];

        let filtered = filter_by_country(&records, &CountryFilter::parse("INDIA"));

        let names: Vec<&str> = filtered.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_filter_all_countries() {
        let records = vec![make_record("a", "India"), Record::new("b")];
        assert_eq!(filter_by_country(&records, &CountryFilter::All), records);
    }

    #[test]
    fn test_country_options_sorted_and_distinct() {
        let records = vec![
            make_record("a", "Mexico"),
            make_record("b", "Brazil"),
            make_record("c", "Mexico"),
            Record::new("d"),
        ];

        assert_eq!(country_options(&records), vec!["All", "Brazil", "Mexico"]);
    }
}
