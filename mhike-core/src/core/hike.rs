//! Hike records, the difficulty taxonomy, and partial updates.

use crate::HikeLogError;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How demanding a hike is. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Moderate, Self::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Moderate => "moderate",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = HikeLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| HikeLogError::InvalidValue(format!("Unknown difficulty: {s}")))
    }
}

impl ToSql for Difficulty {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Difficulty {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: HikeLogError| FromSqlError::Other(Box::new(e)))
    }
}

/// A planned or completed excursion owned by one user.
///
/// `date` is persisted as ISO-8601 (`YYYY-MM-DD`), which is what makes the
/// text ordering used by list queries chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hike {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub location: String,
    pub date: NaiveDate,
    /// Free-text distance such as `"8.5"` or `"12 km"`.
    pub length: String,
    pub difficulty: Difficulty,
    pub parking_available: bool,
    pub description: String,
    /// Free-text duration such as `"4-5 hours"`.
    pub duration: String,
    pub created_at: NaiveDateTime,
}

impl Hike {
    /// The numeric distance at the start of `length`; see [`parse_length`].
    pub fn distance(&self) -> f64 {
        parse_length(&self.length)
    }
}

/// Reads the number at the start of a free-text length (`"8.5 km"` → 8.5).
///
/// Unreadable or non-finite values (`"far"`, `"1e400"`) count as 0. Both the
/// length criteria of [`crate::HikeFilter`] and displayed distances use this.
pub fn parse_length(length: &str) -> f64 {
    let token = length.split_whitespace().next().unwrap_or("");
    (1..=token.len())
        .rev()
        .filter(|&end| token.is_char_boundary(end))
        .find_map(|end| token[..end].parse::<f64>().ok())
        .filter(|d| d.is_finite())
        .unwrap_or(0.0)
}

/// Input for [`crate::HikeDatabase::create_hike`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHike {
    pub user_id: i64,
    pub name: String,
    pub location: String,
    pub date: NaiveDate,
    pub length: String,
    pub difficulty: Difficulty,
    pub parking_available: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: String,
}

/// A partial update: only the fields that are `Some` are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HikeUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub date: Option<NaiveDate>,
    pub length: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub parking_available: Option<bool>,
    pub description: Option<String>,
    pub duration: Option<String>,
}

impl HikeUpdate {
    /// True when no field is set, i.e. applying it would change nothing.
    pub fn is_empty(&self) -> bool {
        self.assignments().is_empty()
    }

    /// Column/value pairs for every field present, in a stable order.
    pub(crate) fn assignments(&self) -> Vec<(&'static str, &dyn ToSql)> {
        let mut out: Vec<(&'static str, &dyn ToSql)> = Vec::new();
        if let Some(v) = &self.name {
            out.push(("name", v));
        }
        if let Some(v) = &self.location {
            out.push(("location", v));
        }
        if let Some(v) = &self.date {
            out.push(("date", v));
        }
        if let Some(v) = &self.length {
            out.push(("length", v));
        }
        if let Some(v) = &self.difficulty {
            out.push(("difficulty", v));
        }
        if let Some(v) = &self.parking_available {
            // bool binds as INTEGER 0/1
            out.push(("parking_available", v));
        }
        if let Some(v) = &self.description {
            out.push(("description", v));
        }
        if let Some(v) = &self.duration {
            out.push(("duration", v));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_round_trips_through_text() {
        for d in Difficulty::ALL {
            assert_eq!(d.as_str().parse::<Difficulty>().unwrap(), d);
        }
    }

    #[test]
    fn test_unknown_difficulty_is_rejected() {
        let err = "extreme".parse::<Difficulty>().unwrap_err();
        assert!(matches!(err, HikeLogError::InvalidValue(_)));
        // Matching is exact, as stored.
        assert!("Easy".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_parse_length() {
        assert_eq!(parse_length("8.5"), 8.5);
        assert_eq!(parse_length("12 km"), 12.0);
        assert_eq!(parse_length("6.2miles"), 6.2);
        assert_eq!(parse_length("4-5 hours"), 4.0);
        assert_eq!(parse_length("far"), 0.0);
        assert_eq!(parse_length(""), 0.0);
    }

    #[test]
    fn test_overflowing_length_reads_as_zero() {
        assert_eq!(parse_length("1e400"), 0.0);
        assert_eq!(parse_length("-1e400 km"), 0.0);
        assert_eq!(parse_length("inf"), 0.0);
        assert_eq!(parse_length("NaN"), 0.0);
    }

    #[test]
    fn test_empty_update() {
        assert!(HikeUpdate::default().is_empty());

        let update = HikeUpdate {
            parking_available: Some(false),
            ..Default::default()
        };
        assert!(!update.is_empty());
        let columns: Vec<&str> = update.assignments().iter().map(|(c, _)| *c).collect();
        assert_eq!(columns, vec!["parking_available"]);
    }

    #[test]
    fn test_update_deserializes_missing_fields_as_absent() {
        let update: HikeUpdate = serde_json::from_str(r#"{"name":"Ridge Walk"}"#).unwrap();
        assert_eq!(update.name.as_deref(), Some("Ridge Walk"));
        assert!(update.location.is_none());
        assert!(update.parking_available.is_none());
    }
}
