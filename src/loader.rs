// 📂 CSV Loader - Read, rename columns, normalise, drop incomplete rows
// Boundary between the raw source table and the classifier-and-ranker core.

use crate::config::{ColumnMap, DatasetConfig};
use crate::gender::GenderMap;
use crate::record::{Field, Record};
use anyhow::{Context, Result};
use csv::StringRecord;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub columns: ColumnMap,
    pub required: Vec<Field>,
    pub gender_map: GenderMap,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig::from(&DatasetConfig::default())
    }
}

impl From<&DatasetConfig> for LoaderConfig {
    fn from(dataset: &DatasetConfig) -> Self {
        LoaderConfig {
            columns: dataset.columns.clone(),
            required: dataset.required.clone(),
            gender_map: GenderMap::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub records: Vec<Record>,
    pub rows_read: usize,
    pub rows_dropped: usize,
}

/// Header positions of each record field in the source table
struct ColumnIndex {
    name: usize,
    age: Option<usize>,
    net_worth: Option<usize>,
    gender: Option<usize>,
    country: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, columns: &ColumnMap) -> Result<Self> {
        let find = |wanted: &str| headers.iter().position(|h| h.trim() == wanted);

        let name = find(&columns.name)
            .with_context(|| format!("CSV has no '{}' column for names", columns.name))?;

        let index = ColumnIndex {
            name,
            age: find(&columns.age),
            net_worth: find(&columns.net_worth),
            gender: find(&columns.gender),
            country: find(&columns.country),
        };

        for (field, column, position) in [
            (Field::Age, &columns.age, index.age),
            (Field::NetWorth, &columns.net_worth, index.net_worth),
            (Field::Gender, &columns.gender, index.gender),
            (Field::Country, &columns.country, index.country),
        ] {
            if position.is_none() {
                debug!(field = field.as_str(), column = %column, "source column not present");
            }
        }

        Ok(index)
    }
}

pub fn load_records(csv_path: &Path, config: &LoaderConfig) -> Result<LoadReport> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open CSV file: {:?}", csv_path))?;
    let report = load_records_from_reader(file, config)?;

    info!(
        path = %csv_path.display(),
        rows_read = report.rows_read,
        rows_dropped = report.rows_dropped,
        "loaded billionaire records"
    );
    Ok(report)
}

pub fn load_records_from_reader<R: Read>(reader: R, config: &LoaderConfig) -> Result<LoadReport> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers().context("Failed to read CSV headers")?.clone();
    let index = ColumnIndex::resolve(&headers, &config.columns)?;

    let mut records = Vec::new();
    let mut rows_read = 0;
    let mut rows_dropped = 0;

    for result in rdr.records() {
        let row = result.context("Failed to read CSV row")?;
        rows_read += 1;

        let record = parse_row(&row, &index, &config.gender_map, rows_read);
        if record.is_complete(&config.required) {
            records.push(record);
        } else {
            rows_dropped += 1;
        }
    }

    Ok(LoadReport {
        records,
        rows_read,
        rows_dropped,
    })
}

fn cell<'a>(row: &'a StringRecord, position: Option<usize>) -> Option<&'a str> {
    position
        .and_then(|i| row.get(i))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn parse_row(row: &StringRecord, index: &ColumnIndex, genders: &GenderMap, line: usize) -> Record {
    let mut record = Record::new(cell(row, Some(index.name)).unwrap_or_default());

    if let Some(raw) = cell(row, index.age) {
        match crate::buckets::parse_age(raw).ok().and_then(|a| u32::try_from(a).ok()) {
            Some(age) => record.age = Some(age),
            None => debug!(line, value = raw, "unparseable age"),
        }
    }

    if let Some(raw) = cell(row, index.net_worth) {
        match parse_net_worth(raw) {
            Some(worth) => record.net_worth = Some(worth),
            None => debug!(line, value = raw, "unparseable net worth"),
        }
    }

    if let Some(raw) = cell(row, index.gender) {
        record.gender = genders.normalize(raw);
        if record.gender.is_none() {
            warn!(line, value = raw, "gender value not in mapping table");
        }
    }

    record.country = cell(row, index.country).map(String::from);
    record
}

/// Parse a net worth in billions: "177", "177.5", "$177 B", "$1,234.5B"
pub fn parse_net_worth(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .trim_end_matches(|c: char| c == 'B' || c == 'b' || c.is_whitespace())
        .chars()
        .filter(|c| *c != ',')
        .collect();

    let value: f64 = cleaned.trim().parse().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Gender;
    use std::io::Write;

    const SAMPLE: &str = "\
Rank,Name,NetWorth,Age,Country,Gender
1,Elon Musk,$219 B,50,United States,M
2,Jeff Bezos,$171 B,58,United States,Male
3,Françoise Bettencourt Meyers,$74.8 B,68,France,Female
4,No Age,$10 B,,Germany,F
5,No Worth,,40,Japan,M
";

    #[test]
    fn test_load_drops_incomplete_rows() {
        let report = load_records_from_reader(SAMPLE.as_bytes(), &LoaderConfig::default()).unwrap();

        assert_eq!(report.rows_read, 5);
        assert_eq!(report.rows_dropped, 2);
        assert_eq!(report.records.len(), 3);

        let musk = &report.records[0];
        assert_eq!(musk.name, "Elon Musk");
        assert_eq!(musk.net_worth, Some(219.0));
        assert_eq!(musk.age, Some(50));
        assert_eq!(musk.gender, Some(Gender::Male));
        assert_eq!(musk.country.as_deref(), Some("United States"));
    }

    #[test]
    fn test_gender_encodings_normalised() {
        let report = load_records_from_reader(SAMPLE.as_bytes(), &LoaderConfig::default()).unwrap();

        let genders: Vec<Option<Gender>> = report.records.iter().map(|r| r.gender).collect();
        assert_eq!(genders, vec![Some(Gender::Male), Some(Gender::Male), Some(Gender::Female)]);
    }

    #[test]
    fn test_custom_required_fields() {
        let config = LoaderConfig {
            required: vec![Field::Name, Field::Gender],
            ..LoaderConfig::default()
        };

        let report = load_records_from_reader(SAMPLE.as_bytes(), &config).unwrap();
        assert_eq!(report.records.len(), 5);
        assert_eq!(report.rows_dropped, 0);
    }

    #[test]
    fn test_renamed_columns() {
        let csv = "personName,age,finalWorth,country\nA,30,12.5,Chile\n";
        let config = LoaderConfig {
            columns: ColumnMap {
                name: "personName".to_string(),
                age: "age".to_string(),
                net_worth: "finalWorth".to_string(),
                gender: "gender".to_string(),
                country: "country".to_string(),
            },
            ..LoaderConfig::default()
        };

        let report = load_records_from_reader(csv.as_bytes(), &config).unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].net_worth, Some(12.5));
        assert_eq!(report.records[0].gender, None);
    }

    #[test]
    fn test_missing_name_column_is_error() {
        let csv = "Who,Age\nA,30\n";
        assert!(load_records_from_reader(csv.as_bytes(), &LoaderConfig::default()).is_err());
    }

    #[test]
    fn test_parse_net_worth_formats() {
        assert_eq!(parse_net_worth("177"), Some(177.0));
        assert_eq!(parse_net_worth("$177 B"), Some(177.0));
        assert_eq!(parse_net_worth("$1,234.5B"), Some(1234.5));
        assert_eq!(parse_net_worth("n/a"), None);
        assert_eq!(parse_net_worth("-5"), None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let report = load_records(file.path(), &LoaderConfig::default()).unwrap();
        assert_eq!(report.records.len(), 3);
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = load_records(Path::new("/nonexistent/billionaires.csv"), &LoaderConfig::default());
        assert!(result.is_err());
    }
}
