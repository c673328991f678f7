//! Decoding the station, observation and layer records of the data section.
//!
//! Records are a fixed-width header followed by a counted run of child
//! records. Headers are read by [`FromBits`] implementations, usually derived,
//! and converted to the types in [`crate::message`] with [`super::table`].

use alloc::vec::Vec;
use core::fmt;

use thiserror::Error;

use crate::message::{Layer, Observation, Station};

use super::{
    cursor::{BitCursor, Underrun},
    table,
};

/// Derive [`FromBits`] for a struct of fixed-width unsigned fields.
///
/// Every field carries a `bits(N)` attribute giving its width, and fields are
/// read in declaration order. Widths must fit the field's type, which is one
/// of `u8`, `u16`, or `u32`.
///
/// ```
/// #[derive(Debug, FromBits)]
/// struct Wind {
///     #[bits(13)]
///     u: u16,
///     #[bits(13)]
///     v: u16,
/// }
/// ```
pub use windsock_derive::FromBits;

/// Number of bits at the end of the data section that never start a station.
///
/// Bulletins end their payload with 16 bits that are not part of any record.
/// Decoding stops once no more than this many bits remain.
pub const TRAILER_BITS: usize = 16;

/// A record with a fixed-width binary layout.
pub trait FromBits: Sized {
    /// Read the record from the cursor, advancing it past the record.
    fn from_bits(cursor: &mut BitCursor<'_>) -> Result<Self, FieldUnderrun>;
}

/// A field read ran past the end of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Field `{field}` ran past the payload: {source}")]
pub struct FieldUnderrun {
    /// Name of the field being read.
    pub field: &'static str,
    /// Position and width of the failed read.
    pub source: Underrun,
}

impl FieldUnderrun {
    fn at(self, path: RecordPath) -> TruncatedRecord {
        TruncatedRecord {
            path,
            field: self.field,
            source: self.source,
        }
    }
}

/// Location of a record within the payload, by index at each level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordPath {
    /// Index of the station within the payload.
    pub station: usize,
    /// Index of the observation within its station, if inside one.
    pub observation: Option<usize>,
    /// Index of the layer within its observation, if inside one.
    pub layer: Option<usize>,
}

impl RecordPath {
    /// Path of a station record.
    pub fn station(station: usize) -> Self {
        Self {
            station,
            observation: None,
            layer: None,
        }
    }

    /// Path of an observation record within this station.
    pub fn observation(self, observation: usize) -> Self {
        Self {
            observation: Some(observation),
            ..self
        }
    }

    /// Path of a layer record within this observation.
    pub fn layer(self, layer: usize) -> Self {
        Self {
            layer: Some(layer),
            ..self
        }
    }
}

impl fmt::Display for RecordPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "station {}", self.station)?;
        if let Some(observation) = self.observation {
            write!(f, ", observation {observation}")?;
        }
        if let Some(layer) = self.layer {
            write!(f, ", layer {layer}")?;
        }
        Ok(())
    }
}

/// A record declared more data than the payload holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("truncated record at {path}, field `{field}`: {source}")]
pub struct TruncatedRecord {
    /// Record being read.
    pub path: RecordPath,
    /// Name of the field being read.
    pub field: &'static str,
    /// Position and width of the failed read.
    pub source: Underrun,
}

/// Fixed-width header of a station record.
#[derive(Debug, Clone, PartialEq, Eq, FromBits)]
pub struct StationHeader {
    #[bits(7)]
    pub wmo_block: u8,
    #[bits(10)]
    pub wmo_station_id: u16,
    #[bits(15)]
    pub lat: u16,
    #[bits(16)]
    pub lon: u16,
    #[bits(15)]
    pub height: u16,
    #[bits(4)]
    pub device: u8,
    #[bits(8)]
    pub observation_count: u8,
}

/// Fixed-width header of an observation record.
#[derive(Debug, Clone, PartialEq, Eq, FromBits)]
pub struct ObservationHeader {
    #[bits(12)]
    pub year: u16,
    #[bits(4)]
    pub month: u8,
    #[bits(6)]
    pub day: u8,
    #[bits(5)]
    pub hour: u8,
    #[bits(6)]
    pub minute: u8,
    #[bits(5)]
    pub time: u8,
    #[bits(12)]
    pub duration: u16,
    #[bits(8)]
    pub layer_count: u8,
}

/// A layer record, before conversion to physical units.
#[derive(Debug, Clone, PartialEq, Eq, FromBits)]
pub struct RawLayer {
    #[bits(15)]
    pub height: u16,
    #[bits(8)]
    pub quality: u8,
    #[bits(13)]
    pub u: u16,
    #[bits(13)]
    pub v: u16,
    #[bits(13)]
    pub w: u16,
    #[bits(8)]
    pub signal_to_noise: u8,
}

/// Decode every station in a data section payload.
///
/// Stations are read until no more than [`TRAILER_BITS`] bits remain.
pub fn decode_stations(payload: &[u8]) -> Result<Vec<Station>, TruncatedRecord> {
    let cursor = &mut BitCursor::new(payload);
    let end = cursor.len().saturating_sub(TRAILER_BITS);

    let mut stations = Vec::new();

    while cursor.position() < end {
        let station = decode_station(cursor, stations.len())?;
        stations.push(station);
    }

    Ok(stations)
}

/// Decode a station record and its observations.
pub fn decode_station(
    cursor: &mut BitCursor<'_>,
    index: usize,
) -> Result<Station, TruncatedRecord> {
    let path = RecordPath::station(index);

    let header = StationHeader::from_bits(cursor).map_err(|e| e.at(path))?;

    let observations = (0..usize::from(header.observation_count))
        .map(|i| decode_observation(cursor, path.observation(i)))
        .collect::<Result<Vec<_>, _>>()?;

    let station = Station {
        wmo_block: header.wmo_block,
        wmo_station_id: header.wmo_station_id,
        lat: table::latitude(header.lat.into()),
        lon: table::longitude(header.lon.into()),
        height: table::station_height(header.height.into()),
        device: header.device,
        observation_count: header.observation_count,
        observations,
    };

    tracing::trace!(
        index,
        wmo_index = station.wmo_index(),
        observations = station.observation_count,
        "decoded station"
    );

    Ok(station)
}

/// Decode an observation record and its layers.
pub fn decode_observation(
    cursor: &mut BitCursor<'_>,
    path: RecordPath,
) -> Result<Observation, TruncatedRecord> {
    let ObservationHeader {
        year,
        month,
        day,
        hour,
        minute,
        time,
        duration,
        layer_count,
    } = ObservationHeader::from_bits(cursor).map_err(|e| e.at(path))?;

    let layers = (0..usize::from(layer_count))
        .map(|i| decode_layer(cursor, path.layer(i)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Observation {
        year,
        month,
        day,
        hour,
        minute,
        time,
        duration,
        layer_count,
        layers,
    })
}

/// Decode a layer record.
pub fn decode_layer(
    cursor: &mut BitCursor<'_>,
    path: RecordPath,
) -> Result<Layer, TruncatedRecord> {
    let raw = RawLayer::from_bits(cursor).map_err(|e| e.at(path))?;

    Ok(Layer {
        height: raw.height,
        quality: table::quality(raw.quality.into()),
        u: table::wind_component(raw.u.into()),
        v: table::wind_component(raw.v.into()),
        w: table::vertical_wind(raw.w.into()),
        signal_to_noise: table::signal_to_noise(raw.signal_to_noise),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_shorter_than_trailer_has_no_stations() {
        assert!(decode_stations(&[]).unwrap().is_empty());
        assert!(decode_stations(&[0xFF]).unwrap().is_empty());
        assert!(decode_stations(&[0xFF, 0xFF]).unwrap().is_empty());
    }

    #[test]
    fn underrun_names_the_field() {
        // 17 bits cover the WMO block and station number only.
        let mut cursor = BitCursor::new(&[0xFF, 0xFF, 0x80]);
        let err = StationHeader::from_bits(&mut cursor).unwrap_err();

        assert_eq!(err.field, "lat");
        assert_eq!(err.source.position, 17);
        assert_eq!(err.source.width, 15);
    }

    #[test]
    fn path_display() {
        let path = RecordPath::station(2).observation(0).layer(5);
        assert_eq!(
            alloc::format!("{path}"),
            "station 2, observation 0, layer 5"
        );
        assert_eq!(alloc::format!("{}", RecordPath::station(1)), "station 1");
    }
}
