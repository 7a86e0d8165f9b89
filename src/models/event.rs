//! Event model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Geographic coordinates of an event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteeringEvent {
    pub id: String,
    pub name: String,
    pub description: String,
    pub volunteers_needed: u32,
    #[serde(default)]
    pub volunteers_ids: Vec<String>,
    pub date_time: DateTime<Utc>,
    pub position: Position,
    pub organizer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl VolunteeringEvent {
    pub fn has_volunteer(&self, user_id: &str) -> bool {
        self.volunteers_ids.iter().any(|id| id == user_id)
    }

    /// Remaining places; negative when the roster is over capacity
    pub fn volunteers_left(&self) -> i64 {
        self.volunteers_needed as i64 - self.volunteers_ids.len() as i64
    }

    /// Roster with `user_id` appended, unless already present
    pub fn volunteers_with(&self, user_id: &str) -> Vec<String> {
        let mut ids = self.volunteers_ids.clone();
        if !self.has_volunteer(user_id) {
            ids.push(user_id.to_string());
        }
        ids
    }
}

/// Body of the volunteer-roster update request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVolunteersRequest {
    pub volunteers_ids: Vec<String>,
}

/// A user's relationship to an event, derived on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolunteeringStatus {
    Applied,
    Full,
    NotApplied,
}

impl std::fmt::Display for VolunteeringStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VolunteeringStatus::Applied => write!(f, "APPLIED"),
            VolunteeringStatus::Full => write!(f, "FULL"),
            VolunteeringStatus::NotApplied => write!(f, "NOT_APPLIED"),
        }
    }
}
