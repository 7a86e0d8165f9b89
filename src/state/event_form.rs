//! Event form state and validation
//!
//! Holds the draft fields of the create-event form and checks them before
//! submission. Validation never fails; it returns every violated rule so the
//! form can show them together.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use crate::config::EventsConfig;
use crate::utils::helpers::{truncate_chars, update_date_with_new_time};

pub const MIN_NAME_LENGTH: usize = 3;
pub const MIN_DESCRIPTION_LENGTH: usize = 10;
pub const MIN_VOLUNTEERS: u32 = 1;

pub const NAME_TOO_SHORT: &str = "Name should have at least 3 characters";
pub const DESCRIPTION_TOO_SHORT: &str = "Description should have at least 10 characters";
pub const NOT_ENOUGH_VOLUNTEERS: &str = "Volunteers needed should be at least 1";
pub const DATE_TIME_TOO_SOON: &str = "DateTime should be at least 1 hour ahead";

/// Draft of a new event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventForm {
    pub name: String,
    pub description: String,
    pub volunteers_needed: u32,
    pub date_time: DateTime<Utc>,
}

impl EventForm {
    /// Empty draft starting at `now`
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            volunteers_needed: 0,
            date_time: now,
        }
    }
}

/// Check every rule; the result is empty when the draft is valid
///
/// The event must start no earlier than `now + min_lead_time`.
pub fn validate_event_form(form: &EventForm, now: DateTime<Utc>, min_lead_time: Duration) -> Vec<String> {
    let mut errors = Vec::new();

    if form.name.chars().count() < MIN_NAME_LENGTH {
        errors.push(NAME_TOO_SHORT.to_string());
    }
    if form.description.chars().count() < MIN_DESCRIPTION_LENGTH {
        errors.push(DESCRIPTION_TOO_SHORT.to_string());
    }
    if form.volunteers_needed < MIN_VOLUNTEERS {
        errors.push(NOT_ENOUGH_VOLUNTEERS.to_string());
    }
    if form.date_time < now + min_lead_time {
        errors.push(DATE_TIME_TOO_SOON.to_string());
    }

    errors
}

/// Form plus the configured input limits
#[derive(Debug, Clone)]
pub struct EventFormState {
    form: EventForm,
    description_max_length: usize,
    min_lead_time: Duration,
}

impl EventFormState {
    pub fn new(config: &EventsConfig, now: DateTime<Utc>) -> Self {
        Self {
            form: EventForm::new(now),
            description_max_length: config.description_max_length,
            min_lead_time: Duration::minutes(config.min_lead_time_minutes),
        }
    }

    pub fn form(&self) -> &EventForm {
        &self.form
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.form.name = name.into();
    }

    /// Longer input is cut to the configured maximum
    pub fn set_description(&mut self, description: &str) {
        self.form.description = truncate_chars(description, self.description_max_length);
    }

    pub fn set_volunteers_needed(&mut self, volunteers: u32) {
        self.form.volunteers_needed = volunteers;
    }

    pub fn set_date_time(&mut self, date_time: DateTime<Utc>) {
        self.form.date_time = date_time;
    }

    /// Keep the selected day, replace the time of day
    pub fn set_time(&mut self, time: NaiveTime) {
        self.form.date_time = update_date_with_new_time(self.form.date_time, time);
    }

    pub fn validate_at(&self, now: DateTime<Utc>) -> Vec<String> {
        validate_event_form(&self.form, now, self.min_lead_time)
    }
}
