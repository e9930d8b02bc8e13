use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::InsightError;

/// Label used wherever a categorical field is absent or blank.
pub const UNKNOWN_LABEL: &str = "Unknown";

// --- Scalar ---

/// A single field value as it arrived in the source document.
///
/// The insight dump mixes numbers and strings freely (`"end_year": ""` next to
/// `"end_year": 2030`), so every field keeps its raw shape and coercion
/// happens at read time.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Convert a JSON value. `null`, arrays and objects carry no scalar.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null | Value::Array(_) | Value::Object(_) => None,
            Value::Bool(b) => Some(Scalar::Text(b.to_string())),
            Value::Number(n) => n.as_f64().map(Scalar::Number),
            Value::String(s) => Some(Scalar::Text(s.clone())),
        }
    }

    pub fn to_json(&self) -> Option<Value> {
        match self {
            Scalar::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => {
                Some(Value::from(*n as i64))
            }
            Scalar::Number(n) => serde_json::Number::from_f64(*n).map(Value::Number),
            Scalar::Text(s) => Some(Value::String(s.clone())),
        }
    }

    /// Numeric reading: finite numbers, or text that parses as one.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Scalar::Number(n) => *n,
            Scalar::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        n.is_finite().then_some(n)
    }

    /// The value as display text, untrimmed.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Scalar::Number(n) => Cow::Owned(n.to_string()),
            Scalar::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Scalar::Number(_) => false,
            Scalar::Text(s) => s.trim().is_empty(),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().unwrap_or(Value::Null).serialize(serializer)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n as f64)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Number(f64::from(n))
    }
}

// --- Field ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Country,
    City,
    Region,
    Topic,
    Sector,
    Pestle,
    Swot,
    Source,
    Title,
    Insight,
    Url,
    Added,
    Published,
    EndYear,
    StartYear,
    Intensity,
    Relevance,
    Likelihood,
    Impact,
}

impl Field {
    pub const ALL: [Field; 19] = [
        Field::Country,
        Field::City,
        Field::Region,
        Field::Topic,
        Field::Sector,
        Field::Pestle,
        Field::Swot,
        Field::Source,
        Field::Title,
        Field::Insight,
        Field::Url,
        Field::Added,
        Field::Published,
        Field::EndYear,
        Field::StartYear,
        Field::Intensity,
        Field::Relevance,
        Field::Likelihood,
        Field::Impact,
    ];

    /// Fields whose distinct values are published as filter options.
    pub const DISTINCT: [Field; 9] = [
        Field::Country,
        Field::City,
        Field::Region,
        Field::Topic,
        Field::Sector,
        Field::Pestle,
        Field::Swot,
        Field::Source,
        Field::EndYear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Country => "country",
            Field::City => "city",
            Field::Region => "region",
            Field::Topic => "topic",
            Field::Sector => "sector",
            Field::Pestle => "pestle",
            Field::Swot => "swot",
            Field::Source => "source",
            Field::Title => "title",
            Field::Insight => "insight",
            Field::Url => "url",
            Field::Added => "added",
            Field::Published => "published",
            Field::EndYear => "end_year",
            Field::StartYear => "start_year",
            Field::Intensity => "intensity",
            Field::Relevance => "relevance",
            Field::Likelihood => "likelihood",
            Field::Impact => "impact",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| InsightError::Validation(format!("unknown field: {s}")))
    }
}

// --- InsightRecord ---

/// One classified data point.
///
/// Decoding never fails on field shape: unrecognized keys are dropped, and
/// values that are not scalars are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct InsightRecord {
    pub id: Option<String>,

    pub country: Option<Scalar>,
    pub city: Option<Scalar>,
    pub region: Option<Scalar>,
    pub topic: Option<Scalar>,
    pub sector: Option<Scalar>,
    pub pestle: Option<Scalar>,
    pub swot: Option<Scalar>,
    pub source: Option<Scalar>,
    pub title: Option<Scalar>,
    pub insight: Option<Scalar>,
    pub url: Option<Scalar>,
    pub added: Option<Scalar>,
    pub published: Option<Scalar>,

    pub end_year: Option<Scalar>,
    pub start_year: Option<Scalar>,
    pub intensity: Option<Scalar>,
    pub relevance: Option<Scalar>,
    pub likelihood: Option<Scalar>,
    pub impact: Option<Scalar>,
}

impl InsightRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly for fixtures.
    pub fn with(mut self, field: Field, value: impl Into<Scalar>) -> Self {
        *self.slot_mut(field) = Some(value.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Decode a JSON document. Returns `None` for anything but an object.
    pub fn from_json(value: &Value) -> Option<Self> {
        value.as_object().map(|obj| Self::from(obj.clone()))
    }

    pub fn get(&self, field: Field) -> Option<&Scalar> {
        self.slot(field).as_ref()
    }

    /// Trimmed text of a field, `None` when absent or blank.
    pub fn trimmed(&self, field: Field) -> Option<Cow<'_, str>> {
        let value = self.get(field)?;
        if value.is_blank() {
            return None;
        }
        Some(match value.as_text() {
            Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
            Cow::Owned(s) => Cow::Owned(s.trim().to_string()),
        })
    }

    /// Grouping label: trimmed text, or [`UNKNOWN_LABEL`].
    pub fn label(&self, field: Field) -> Cow<'_, str> {
        self.trimmed(field)
            .unwrap_or(Cow::Borrowed(UNKNOWN_LABEL))
    }

    /// Numeric reading with 0 for absent or non-numeric values.
    pub fn number(&self, field: Field) -> f64 {
        self.get(field).and_then(Scalar::as_number).unwrap_or(0.0)
    }

    /// The value the filter engine compares: untrimmed text, numbers in
    /// display form, empty string when absent.
    pub fn raw_text(&self, field: Field) -> Cow<'_, str> {
        self.get(field)
            .map(Scalar::as_text)
            .unwrap_or(Cow::Borrowed(""))
    }

    fn slot(&self, field: Field) -> &Option<Scalar> {
        match field {
            Field::Country => &self.country,
            Field::City => &self.city,
            Field::Region => &self.region,
            Field::Topic => &self.topic,
            Field::Sector => &self.sector,
            Field::Pestle => &self.pestle,
            Field::Swot => &self.swot,
            Field::Source => &self.source,
            Field::Title => &self.title,
            Field::Insight => &self.insight,
            Field::Url => &self.url,
            Field::Added => &self.added,
            Field::Published => &self.published,
            Field::EndYear => &self.end_year,
            Field::StartYear => &self.start_year,
            Field::Intensity => &self.intensity,
            Field::Relevance => &self.relevance,
            Field::Likelihood => &self.likelihood,
            Field::Impact => &self.impact,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<Scalar> {
        match field {
            Field::Country => &mut self.country,
            Field::City => &mut self.city,
            Field::Region => &mut self.region,
            Field::Topic => &mut self.topic,
            Field::Sector => &mut self.sector,
            Field::Pestle => &mut self.pestle,
            Field::Swot => &mut self.swot,
            Field::Source => &mut self.source,
            Field::Title => &mut self.title,
            Field::Insight => &mut self.insight,
            Field::Url => &mut self.url,
            Field::Added => &mut self.added,
            Field::Published => &mut self.published,
            Field::EndYear => &mut self.end_year,
            Field::StartYear => &mut self.start_year,
            Field::Intensity => &mut self.intensity,
            Field::Relevance => &mut self.relevance,
            Field::Likelihood => &mut self.likelihood,
            Field::Impact => &mut self.impact,
        }
    }
}

/// Mongo-style ids arrive either as plain strings or as `{"$oid": "..."}`.
fn document_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(obj) => obj.get("$oid").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

impl From<Map<String, Value>> for InsightRecord {
    fn from(obj: Map<String, Value>) -> Self {
        let mut record = InsightRecord {
            id: obj.get("_id").and_then(document_id),
            ..Default::default()
        };
        for field in Field::ALL {
            *record.slot_mut(field) = obj.get(field.as_str()).and_then(Scalar::from_json);
        }
        record
    }
}

impl From<InsightRecord> for Map<String, Value> {
    fn from(record: InsightRecord) -> Self {
        let mut obj = Map::new();
        if let Some(id) = &record.id {
            obj.insert("_id".to_string(), Value::String(id.clone()));
        }
        for field in Field::ALL {
            if let Some(value) = record.get(field).and_then(Scalar::to_json) {
                obj.insert(field.as_str().to_string(), value);
            }
        }
        obj
    }
}
