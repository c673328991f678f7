//! Conversions from raw field codes to physical units.
//!
//! Each function corresponds to an element descriptor of BUFR Table B (or,
//! for [`quality`], a local Table B entry used by the wind profiler network)
//! and is defined for every raw value.

use crate::message::Quality;

/// Latitude in degrees (0 05 002, scale 2, reference -9000).
pub fn latitude(raw: u32) -> f64 {
    (i64::from(raw) - 9000) as f64 * 0.01
}

/// Longitude in degrees (0 06 002, scale 2, reference -18000).
pub fn longitude(raw: u32) -> f64 {
    (i64::from(raw) - 18000) as f64 * 0.01
}

/// Height of station in metres (0 07 001, reference -400).
pub fn station_height(raw: u32) -> f64 {
    (i64::from(raw) - 400) as f64
}

/// Horizontal wind component in m/s (0 11 002 and 0 11 003, scale 1,
/// reference -4096).
pub fn wind_component(raw: u32) -> f64 {
    (i64::from(raw) - 4096) as f64 * 0.1
}

/// Vertical wind component in m/s (0 11 006, scale 2, reference -4096).
pub fn vertical_wind(raw: u32) -> f64 {
    (i64::from(raw) - 4096) as f64 * 0.01
}

/// Signal to noise ratio in dB (0 21 030, reference -32).
pub fn signal_to_noise(raw: u8) -> i32 {
    i32::from(raw) - 32
}

/// Layer quality flag (local 0 25 192).
///
/// The layer field is 8 bits wide, so the `Missing` code (256) cannot occur
/// in the current layout. It is kept for layouts with a wider flag field.
pub fn quality(raw: u32) -> Quality {
    match raw {
        128 => Quality::Ok,
        256 => Quality::Missing,
        _ => Quality::NotGood,
    }
}
