//! Raw field to engineering unit conversions.
//!
//! All conversions are total: every raw value maps to some result, including
//! values that make no physical sense, because the format defines no
//! validity range for these fields.

use chrono::{DateTime, Local, Utc};

/// Fixed-point coordinate in 1e-7 degrees.
pub fn decode_geo_degrees(raw: i32) -> f64 {
    raw as f64 * 1e-7
}

/// Speed in meters/second, raw is m/s * 100.
pub fn decode_speed(raw: u16) -> f64 {
    raw as f64 * 0.01
}

/// Heading in degrees, raw is degrees * 100 (0 = North, 9000 = East).
pub fn decode_heading(raw: u16) -> f64 {
    raw as f64 * 0.01
}

pub fn decode_decimeters(raw: u16) -> f64 {
    raw as f64 * 0.1
}

/// Seconds since 1970-01-01T00:00:00Z.
pub fn decode_epoch_utc(raw: u32) -> DateTime<Utc> {
    // Every u32 second count is inside chrono's representable range.
    DateTime::<Utc>::from_timestamp(raw as i64, 0).unwrap_or_default()
}

/// Same instant as [`decode_epoch_utc`], viewed in the process time zone.
///
/// Only meant for display, records always keep the UTC instant.
pub fn decode_epoch_local(raw: u32) -> DateTime<Local> {
    to_local(&decode_epoch_utc(raw))
}

/// View a decoded UTC instant in the process time zone.
pub fn to_local(time: &DateTime<Utc>) -> DateTime<Local> {
    time.with_timezone(&Local)
}
