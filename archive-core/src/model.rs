use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The hourly variable requested from the archive.
pub const HOURLY_VARIABLE: &str = "temperature_2m";

/// One of the four user-editable inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Latitude,
    Longitude,
    StartDate,
    EndDate,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
            Field::StartDate => "start_date",
            Field::EndDate => "end_date",
        }
    }

    pub const fn all() -> &'static [Field] {
        &[Field::Latitude, Field::Longitude, Field::StartDate, Field::EndDate]
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Field {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "latitude" => Ok(Field::Latitude),
            "longitude" => Ok(Field::Longitude),
            "start_date" | "startDate" => Ok(Field::StartDate),
            "end_date" | "endDate" => Ok(Field::EndDate),
            _ => Err(anyhow::anyhow!(
                "Unknown field '{value}'. Supported fields: latitude, longitude, start_date, end_date."
            )),
        }
    }
}

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    pub latitude: String,
    pub longitude: String,
    pub start_date: String,
    pub end_date: String,
}

impl QueryInput {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Latitude => &self.latitude,
            Field::Longitude => &self.longitude,
            Field::StartDate => &self.start_date,
            Field::EndDate => &self.end_date,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Latitude => &mut self.latitude,
            Field::Longitude => &mut self.longitude,
            Field::StartDate => &mut self.start_date,
            Field::EndDate => &mut self.end_date,
        };
        *slot = value;
    }
}

/// A query that passed the validation gate.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub start_date: String,
    pub end_date: String,
}

impl ArchiveQuery {
    /// Query parameters for the archive endpoint, in request order.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("start_date", self.start_date.clone()),
            ("end_date", self.end_date.clone()),
            ("hourly", HOURLY_VARIABLE.to_string()),
        ]
    }
}

/// Paired hourly timestamps (unix seconds) and temperatures.
///
/// The archive reports gaps as `null`, hence `Option<f64>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<i64>,
    pub temperature_2m: Vec<Option<f64>>,
}

impl HourlySeries {
    pub fn is_aligned(&self) -> bool {
        self.time.len() == self.temperature_2m.len()
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = (i64, Option<f64>)> + '_ {
        self.time.iter().copied().zip(self.temperature_2m.iter().copied())
    }
}

/// Response body of the archive endpoint.
///
/// Only `hourly` is typed; everything else the service sends (units,
/// elevation, timezone, ...) is kept in `rest` in its original order.
/// Re-serializing puts `hourly` first and omits an explicit `"hourly": null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchivePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly: Option<HourlySeries>,

    #[serde(flatten)]
    pub rest: Map<String, Value>,
}
