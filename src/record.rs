// 👤 Record - One billionaire row after column renaming
// Optional fields stay optional; each operation decides what it requires.

use serde::{Deserialize, Serialize};

// ============================================================================
// GENDER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

// ============================================================================
// FIELD
// ============================================================================

/// Record field names, used to express required-field sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Age,
    NetWorth,
    Gender,
    Country,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Age => "age",
            Field::NetWorth => "net_worth",
            Field::Gender => "gender",
            Field::Country => "country",
        }
    }
}

// ============================================================================
// RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    /// Net worth in billions USD
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_worth: Option<f64>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Record {
    /// Create a record with only a name; fill the rest with the builders
    pub fn new(name: impl Into<String>) -> Self {
        Record {
            name: name.into(),
            age: None,
            net_worth: None,
            gender: None,
            country: None,
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_net_worth(mut self, net_worth: f64) -> Self {
        self.net_worth = Some(net_worth);
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn has_field(&self, field: Field) -> bool {
        match field {
            Field::Name => !self.name.trim().is_empty(),
            Field::Age => self.age.is_some(),
            Field::NetWorth => self.net_worth.is_some(),
            Field::Gender => self.gender.is_some(),
            Field::Country => self
                .country
                .as_deref()
                .map(|c| !c.trim().is_empty())
                .unwrap_or(false),
        }
    }

    /// True when every field in `required` is present
    pub fn is_complete(&self, required: &[Field]) -> bool {
        required.iter().all(|f| self.has_field(*f))
    }
}

/// Drop records missing any required field, keeping input order
pub fn drop_incomplete(records: Vec<Record>, required: &[Field]) -> Vec<Record> {
    records
        .into_iter()
        .filter(|r| r.is_complete(required))
        .collect()
}
