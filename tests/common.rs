#![allow(dead_code)]

use windsock::sans::record::{ObservationHeader, RawLayer, StationHeader};

pub const HEADING: &[u8; 18] = b"IUPC41 RJTD 010000";

/// Packs unsigned fields most-significant-bit first.
#[derive(Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    len: usize,
}

impl BitWriter {
    pub fn push(&mut self, width: u32, value: u32) {
        for i in (0..width).rev() {
            if self.len % 8 == 0 {
                self.bytes.push(0);
            }
            let bit = ((value >> i) & 1) as u8;
            let last = self.bytes.len() - 1;
            self.bytes[last] |= bit << (7 - self.len % 8);
            self.len += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// A station to be packed, with raw field values.
#[derive(Debug, Clone)]
pub struct RawStation {
    pub header: StationHeader,
    pub observations: Vec<(ObservationHeader, Vec<RawLayer>)>,
}

pub fn station_header(wmo_station_id: u16, observation_count: u8) -> StationHeader {
    StationHeader {
        wmo_block: 47,
        wmo_station_id,
        lat: 9000 + 3569,
        lon: 18000 + 13976,
        height: 400 + 35,
        device: 2,
        observation_count,
    }
}

pub fn observation_header(minute: u8, layer_count: u8) -> ObservationHeader {
    ObservationHeader {
        year: 2016,
        month: 4,
        day: 1,
        hour: 9,
        minute,
        time: 2,
        duration: 10,
        layer_count,
    }
}

pub fn raw_layer(height: u16) -> RawLayer {
    RawLayer {
        height,
        quality: 128,
        u: 4106,
        v: 4096,
        w: 4196,
        signal_to_noise: 40,
    }
}

/// Build a station whose counts match the given layer counts per observation.
pub fn station(wmo_station_id: u16, layers_per_observation: &[u8]) -> RawStation {
    let observations = layers_per_observation
        .iter()
        .enumerate()
        .map(|(i, &n)| {
            let layers = (0..n).map(|j| raw_layer(300 + 100 * u16::from(j))).collect();
            (observation_header(10 * i as u8, n), layers)
        })
        .collect();

    RawStation {
        header: station_header(wmo_station_id, layers_per_observation.len() as u8),
        observations,
    }
}

pub fn write_station(w: &mut BitWriter, station: &RawStation) {
    let h = &station.header;
    w.push(7, h.wmo_block.into());
    w.push(10, h.wmo_station_id.into());
    w.push(15, h.lat.into());
    w.push(16, h.lon.into());
    w.push(15, h.height.into());
    w.push(4, h.device.into());
    w.push(8, h.observation_count.into());

    for (o, layers) in &station.observations {
        w.push(12, o.year.into());
        w.push(4, o.month.into());
        w.push(6, o.day.into());
        w.push(5, o.hour.into());
        w.push(6, o.minute.into());
        w.push(5, o.time.into());
        w.push(12, o.duration.into());
        w.push(8, o.layer_count.into());

        for l in layers {
            w.push(15, l.height.into());
            w.push(8, l.quality.into());
            w.push(13, l.u.into());
            w.push(13, l.v.into());
            w.push(13, l.w.into());
            w.push(8, l.signal_to_noise.into());
        }
    }
}

/// Pack stations into a data section payload.
///
/// The 16 trailer bits are appended and the payload is cut back to a whole
/// number of bytes, so between 9 and 16 bits follow the last station.
pub fn payload(stations: &[RawStation]) -> Vec<u8> {
    let mut w = BitWriter::default();
    for station in stations {
        write_station(&mut w, station);
    }
    w.push(16, 0);

    let len = w.len() / 8;
    let mut bytes = w.into_bytes();
    bytes.truncate(len);
    bytes
}

/// Wrap a payload in a bulletin heading and BUFR sections 0, 1, 3, 4 and 5.
pub fn bulletin_with(section1: &[u8], section3: &[u8], payload: &[u8]) -> Vec<u8> {
    fn int24(n: usize) -> [u8; 3] {
        let [_, a, b, c] = (n as u32).to_be_bytes();
        [a, b, c]
    }

    let l1 = 3 + section1.len();
    let l3 = 3 + section3.len();
    let l4 = 4 + payload.len();
    let total = 8 + l1 + l3 + l4 + 4;

    let mut out = Vec::with_capacity(18 + total);
    out.extend_from_slice(HEADING);

    out.extend_from_slice(b"BUFR");
    out.extend_from_slice(&int24(total));
    out.push(4);

    out.extend_from_slice(&int24(l1));
    out.extend_from_slice(section1);

    out.extend_from_slice(&int24(l3));
    out.extend_from_slice(section3);

    out.extend_from_slice(&int24(l4));
    out.push(0);
    out.extend_from_slice(payload);

    out.extend_from_slice(b"7777");
    out
}

/// Wrap a payload with typical section 1 and 3 contents.
pub fn bulletin(payload: &[u8]) -> Vec<u8> {
    let section1 = [
        0, 0, 34, 0, 0, 0, 2, 2, 0, 13, 0, 16, 4, 1, 9, 0, 0, 0, 0,
    ];
    let section3 = [0, 0, 1, 0x80, 0x13, 0x0B, 0x0A, 0x00];

    bulletin_with(&section1, &section3, payload)
}
