//! Volunteering status resolution

use serde::{Deserialize, Serialize};
use crate::models::event::{VolunteeringEvent, VolunteeringStatus};
use crate::models::user::User;

/// Derive the user's relationship to an event
///
/// Being on the roster wins over the event being full.
pub fn resolve(event: &VolunteeringEvent, user: &User) -> VolunteeringStatus {
    if event.has_volunteer(&user.id) {
        VolunteeringStatus::Applied
    } else if event.volunteers_ids.len() == event.volunteers_needed as usize {
        VolunteeringStatus::Full
    } else {
        VolunteeringStatus::NotApplied
    }
}

/// Figures shown in the event's volunteering info box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteeringInfo {
    pub status: VolunteeringStatus,
    pub volunteers_count: usize,
    pub volunteers_needed: u32,
}

impl VolunteeringInfo {
    pub fn for_user(event: &VolunteeringEvent, user: &User) -> Self {
        Self {
            status: resolve(event, user),
            volunteers_count: event.volunteers_ids.len(),
            volunteers_needed: event.volunteers_needed,
        }
    }
}
