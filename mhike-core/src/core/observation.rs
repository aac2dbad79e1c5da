//! Timestamped field notes attached to a hike.

use crate::HikeLogError;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed taxonomy observations are filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObservationKind {
    Wildlife,
    Landmark,
    Weather,
    Other,
}

impl ObservationKind {
    pub const ALL: [ObservationKind; 4] = [Self::Wildlife, Self::Landmark, Self::Weather, Self::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wildlife => "wildlife",
            Self::Landmark => "landmark",
            Self::Weather => "weather",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ObservationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObservationKind {
    type Err = HikeLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| HikeLogError::InvalidValue(format!("Unknown observation type: {s}")))
    }
}

impl ToSql for ObservationKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ObservationKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: HikeLogError| FromSqlError::Other(Box::new(e)))
    }
}

/// A note recorded during a hike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub id: i64,
    pub hike_id: i64,
    #[serde(rename = "type")]
    pub kind: ObservationKind,
    /// Mirrors `kind` for observations created through [`NewObservation::new`].
    pub name: String,
    /// When the observation was made, as supplied by the caller.
    pub time: DateTime<Utc>,
    pub comment: String,
    pub created_at: NaiveDateTime,
}

/// Input for [`crate::HikeDatabase::create_observation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewObservation {
    pub hike_id: i64,
    #[serde(rename = "type")]
    pub kind: ObservationKind,
    pub name: String,
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl NewObservation {
    /// Builds an observation whose `name` is the type label.
    pub fn new(hike_id: i64, kind: ObservationKind, time: DateTime<Utc>, comment: impl Into<String>) -> Self {
        Self {
            hike_id,
            kind,
            name: kind.as_str().to_string(),
            time,
            comment: Some(comment.into()),
        }
    }
}

/// Formats an observation time the way it is stored: RFC 3339, UTC,
/// millisecond precision, `Z` suffix. Fixed width keeps text order
/// chronological.
pub(crate) fn format_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a stored observation time.
pub(crate) fn parse_time(raw: &str) -> crate::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| HikeLogError::InvalidValue(format!("Bad observation time '{raw}': {e}")))
}
