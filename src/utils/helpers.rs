//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the client core.

use chrono::{DateTime, NaiveTime, Timelike, Utc};
use regex::Regex;
use std::sync::OnceLock;
use uuid::Uuid;
use crate::models::event::{Position, VolunteeringEvent};

/// Generate a new UUID v4
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Keep the calendar date of `date` and replace its time of day with `time`
///
/// Seconds and sub-seconds are zeroed, matching what a time picker yields.
pub fn update_date_with_new_time(date: DateTime<Utc>, time: NaiveTime) -> DateTime<Utc> {
    let time = time
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time);
    date.date_naive().and_time(time).and_utc()
}

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Convert bytes to human readable format
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Message handed to the native share sheet for an event
pub fn share_message(event: &VolunteeringEvent) -> String {
    format!(
        "Hi! I found this on the Volunteam App! The event \"{}\" stills need {} volunteer(s).",
        event.name,
        event.volunteers_left()
    )
}

/// Google Maps directions deep link for a position
pub fn maps_url(position: &Position) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}",
        position.latitude, position.longitude
    )
}

fn phone_noise() -> &'static Regex {
    static NOISE: OnceLock<Regex> = OnceLock::new();
    NOISE.get_or_init(|| Regex::new(r"[\s\-().]").expect("static regex"))
}

/// Strip formatting characters from a phone number
pub fn normalize_phone(phone: &str) -> String {
    phone_noise().replace_all(phone.trim(), "").into_owned()
}

/// `tel:` URI for a phone number
pub fn tel_uri(phone: &str) -> String {
    format!("tel:{}", normalize_phone(phone))
}

/// `sms:` URI for a phone number
pub fn sms_uri(phone: &str) -> String {
    format!("sms:{}", normalize_phone(phone))
}

/// Truncate text to a maximum number of characters
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => text[..index].to_string(),
        None => text.to_string(),
    }
}
