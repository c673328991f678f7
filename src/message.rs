//! Decoded bulletin contents.
//!
//! The tree owns all of its data and keeps every sequence in stream order.
//! Counts read from the stream are kept alongside the sequences they sized.

use alloc::vec::Vec;

use crate::sans::envelope::{HEADER_LEN, IndicatorSection};

/// A decoded bulletin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    /// Bulletin heading, passed through uninterpreted.
    pub header: [u8; HEADER_LEN],
    /// Contents of the indicator section.
    pub indicator: IndicatorSection,
    pub stations: Vec<Station>,
}

impl Message {
    /// Find a station by its WMO index number (see [`Station::wmo_index`]).
    pub fn station(&self, wmo_index: u32) -> Option<&Station> {
        self.stations.iter().find(|s| s.wmo_index() == wmo_index)
    }
}

/// A wind profiler site and its observations.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// WMO block number.
    pub wmo_block: u8,
    /// WMO station number within the block.
    pub wmo_station_id: u16,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Height of the station in metres.
    pub height: f64,
    /// Measuring equipment type code.
    pub device: u8,
    /// Number of observations declared by the stream.
    pub observation_count: u8,
    pub observations: Vec<Observation>,
}

impl Station {
    /// Five-digit WMO index number, `block * 1000 + station`.
    pub fn wmo_index(&self) -> u32 {
        u32::from(self.wmo_block) * 1000 + u32::from(self.wmo_station_id)
    }

    /// The observation with the most layers, suitable as a reference height
    /// axis for the station. The first such observation wins on ties.
    pub fn reference_observation(&self) -> Option<&Observation> {
        self.observations
            .iter()
            .rev()
            .max_by_key(|o| o.layers.len())
    }
}

/// One measurement cycle at a station.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    /// Time significance code.
    pub time: u8,
    /// Time period or displacement code.
    pub duration: u16,
    /// Number of layers declared by the stream.
    pub layer_count: u8,
    pub layers: Vec<Layer>,
}

/// A single altitude band of an observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Height in metres, as stored in the stream.
    pub height: u16,
    pub quality: Quality,
    /// Eastward wind component in m/s.
    pub u: f64,
    /// Northward wind component in m/s.
    pub v: f64,
    /// Vertical wind component in m/s.
    pub w: f64,
    /// Signal to noise ratio in dB.
    pub signal_to_noise: i32,
}

impl Layer {
    /// Whether the measurement passed quality control.
    pub fn is_ok(&self) -> bool {
        self.quality == Quality::Ok
    }

    /// Direction the wind blows from, in degrees clockwise from north, in
    /// `[0, 360)`.
    ///
    /// _Requires Cargo feature `std`._
    #[cfg(feature = "std")]
    pub fn direction(&self) -> f64 {
        use core::f64::consts::{FRAC_PI_2, TAU};

        let mut direction = FRAC_PI_2 - (-self.v).atan2(-self.u);
        if direction < 0.0 {
            direction += TAU;
        }

        direction.to_degrees() % 360.0
    }

    /// Horizontal wind speed in m/s.
    ///
    /// _Requires Cargo feature `std`._
    #[cfg(feature = "std")]
    pub fn speed(&self) -> f64 {
        self.u.hypot(self.v)
    }
}

/// Reliability of a layer's measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quality {
    Ok,
    Missing,
    NotGood,
}
