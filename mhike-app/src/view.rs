//! Presentation-ready shapes of stored records.

use chrono::{DateTime, NaiveDate, Utc};
use mhike_core::{Difficulty, Hike, NewHike, Observation, ObservationKind, User};
use serde::{Deserialize, Serialize};

/// The signed-in account, without its credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for AccountUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationView {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub note: String,
    #[serde(rename = "type")]
    pub kind: ObservationKind,
}

impl From<Observation> for ObservationView {
    fn from(obs: Observation) -> Self {
        Self {
            id: obs.id.to_string(),
            timestamp: obs.time,
            note: obs.comment,
            kind: obs.kind,
        }
    }
}

/// A hike with its observations, as lists and detail screens show it.
///
/// `completed` lives only here. It starts `false` on every load and is
/// never written to the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HikeView {
    pub id: String,
    pub name: String,
    pub location: String,
    pub date: NaiveDate,
    pub distance: f64,
    pub difficulty: Difficulty,
    pub duration: String,
    pub description: String,
    pub parking_available: bool,
    pub observations: Vec<ObservationView>,
    pub completed: bool,
}

impl HikeView {
    pub fn new(hike: Hike, observations: Vec<Observation>) -> Self {
        Self {
            id: hike.id.to_string(),
            distance: hike.distance(),
            name: hike.name,
            location: hike.location,
            date: hike.date,
            difficulty: hike.difficulty,
            duration: hike.duration,
            description: hike.description,
            parking_available: hike.parking_available,
            observations: observations.into_iter().map(ObservationView::from).collect(),
            completed: false,
        }
    }

    /// Distance with its unit label, e.g. `"8.5 km"`.
    pub fn distance_label(&self, unit: DistanceUnit) -> String {
        format!("{} {}", self.distance, unit.label())
    }
}

/// What the add-hike form submits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HikeDraft {
    pub name: String,
    pub location: String,
    pub date: NaiveDate,
    pub distance: f64,
    pub difficulty: Difficulty,
    pub duration: String,
    #[serde(default)]
    pub description: String,
    pub parking_available: bool,
}

impl HikeDraft {
    pub fn into_new_hike(self, user_id: i64) -> NewHike {
        NewHike {
            user_id,
            name: self.name,
            location: self.location,
            date: self.date,
            length: self.distance.to_string(),
            difficulty: self.difficulty,
            parking_available: self.parking_available,
            description: Some(self.description),
            duration: self.duration,
        }
    }
}

/// Display unit for distances. Stored lengths carry no unit; the screen
/// picks one label and uses it everywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Kilometres,
    Miles,
}

impl DistanceUnit {
    pub fn label(self) -> &'static str {
        match self {
            Self::Kilometres => "km",
            Self::Miles => "miles",
        }
    }
}

/// Which hikes a search keeps, by the in-memory `completed` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HikeStatus {
    #[default]
    All,
    Completed,
    Planned,
}

impl HikeStatus {
    pub fn matches(self, hike: &HikeView) -> bool {
        match self {
            Self::All => true,
            Self::Completed => hike.completed,
            Self::Planned => !hike.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_hike(length: &str) -> Hike {
        Hike {
            id: 7,
            user_id: 1,
            name: "Ridge Walk".to_string(),
            location: "Hills".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            length: length.to_string(),
            difficulty: Difficulty::Easy,
            parking_available: true,
            description: String::new(),
            duration: "3 hours".to_string(),
            created_at: NaiveDate::from_ymd_opt(2024, 4, 30)
                .unwrap()
                .and_hms_opt(18, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_hike_view_starts_not_completed() {
        let view = HikeView::new(stored_hike("8.5 km"), vec![]);
        assert_eq!(view.id, "7");
        assert_eq!(view.distance, 8.5);
        assert!(!view.completed);
        assert!(view.parking_available);
    }

    #[test]
    fn test_status_matches_completed_flag() {
        let mut view = HikeView::new(stored_hike("8"), vec![]);
        assert!(HikeStatus::All.matches(&view));
        assert!(HikeStatus::Planned.matches(&view));
        assert!(!HikeStatus::Completed.matches(&view));

        view.completed = true;
        assert!(HikeStatus::Completed.matches(&view));
        assert!(!HikeStatus::Planned.matches(&view));
    }

    #[test]
    fn test_overflowing_length_shows_zero_distance() {
        let view = HikeView::new(stored_hike("1e400"), vec![]);
        assert_eq!(view.distance, 0.0);
    }

    #[test]
    fn test_distance_label_uses_chosen_unit() {
        let view = HikeView::new(stored_hike("8"), vec![]);
        assert_eq!(view.distance_label(DistanceUnit::Kilometres), "8 km");
        assert_eq!(view.distance_label(DistanceUnit::Miles), "8 miles");
    }

    #[test]
    fn test_draft_keeps_distance_and_duration_apart() {
        let draft = HikeDraft {
            name: "Ridge Walk".to_string(),
            location: "Hills".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            distance: 8.5,
            difficulty: Difficulty::Moderate,
            duration: "4-5 hours".to_string(),
            description: String::new(),
            parking_available: false,
        };
        let hike = draft.into_new_hike(3);
        assert_eq!(hike.user_id, 3);
        assert_eq!(hike.length, "8.5");
        assert_eq!(hike.duration, "4-5 hours");
    }
}
