//! The one search path for hikes: a set of optional criteria compiled to a
//! single parameterized WHERE clause.

use crate::{Difficulty, Hike};
use chrono::NaiveDate;
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

/// Criteria for [`crate::HikeDatabase::filter_hikes`].
///
/// Every criterion that is set must match; unset criteria are ignored, so the
/// default filter returns all of a user's hikes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HikeFilter {
    /// Substring of the name, location or description.
    pub term: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    /// Lower bound on the leading number of `length`, inclusive.
    pub min_length: Option<f64>,
    /// Upper bound on the leading number of `length`, inclusive.
    pub max_length: Option<f64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub difficulty: Option<Difficulty>,
}

impl HikeFilter {
    /// A filter matching `term` against name, location and description.
    pub fn with_term(term: impl Into<String>) -> Self {
        Self {
            term: Some(term.into()),
            ..Default::default()
        }
    }

    /// Applies the length bounds, which are checked in Rust so they read
    /// `length` exactly as displayed distances do.
    pub(crate) fn matches_length(&self, hike: &Hike) -> bool {
        let distance = hike.distance();
        self.min_length.map_or(true, |min| distance >= min)
            && self.max_length.map_or(true, |max| distance <= max)
    }

    /// Builds the conditions appended after `user_id = ?`, and their bound
    /// values. Length bounds are not part of it; see [`Self::matches_length`].
    pub(crate) fn to_sql(&self) -> (String, Vec<Value>) {
        let mut clauses: Vec<&'static str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(term) = non_empty(&self.term) {
            let pattern = like_pattern(term);
            clauses.push(
                "(name LIKE ? ESCAPE '\\' OR location LIKE ? ESCAPE '\\' OR description LIKE ? ESCAPE '\\')",
            );
            values.extend(std::iter::repeat(Value::Text(pattern)).take(3));
        }
        if let Some(name) = non_empty(&self.name) {
            clauses.push("name LIKE ? ESCAPE '\\'");
            values.push(Value::Text(like_pattern(name)));
        }
        if let Some(location) = non_empty(&self.location) {
            clauses.push("location LIKE ? ESCAPE '\\'");
            values.push(Value::Text(like_pattern(location)));
        }
        if let Some(from) = self.date_from {
            clauses.push("date >= ?");
            values.push(Value::Text(from.format("%F").to_string()));
        }
        if let Some(to) = self.date_to {
            clauses.push("date <= ?");
            values.push(Value::Text(to.format("%F").to_string()));
        }
        if let Some(difficulty) = self.difficulty {
            clauses.push("difficulty = ?");
            values.push(Value::Text(difficulty.as_str().to_string()));
        }

        let sql = clauses.iter().map(|c| format!(" AND {c}")).collect::<String>();
        (sql, values)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Wraps `needle` in `%…%`, escaping LIKE metacharacters so the match is a
/// literal substring test.
fn like_pattern(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    out.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}
