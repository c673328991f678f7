mod common;

use common::BitWriter;
use windsock::sans::{
    BitCursor,
    record::{FromBits, StationHeader},
};

/// A layout not used by the bulletin decoder itself.
#[derive(Debug, PartialEq, FromBits)]
struct Gust {
    #[bits(1)]
    flag: u8,
    #[bits(13)]
    speed: u16,
    #[bits(9)]
    direction: u16,
    #[bits(32)]
    stamp: u32,
}

fn packed_gust() -> Vec<u8> {
    let mut w = BitWriter::default();
    w.push(1, 1);
    w.push(13, 4321);
    w.push(9, 359);
    w.push(32, 0xDEAD_BEEF);
    w.into_bytes()
}

#[test]
fn derive_reads_fields_in_order() {
    let bytes = packed_gust();
    let mut cursor = BitCursor::new(&bytes);

    let gust = Gust::from_bits(&mut cursor).unwrap();

    assert_eq!(
        gust,
        Gust {
            flag: 1,
            speed: 4321,
            direction: 359,
            stamp: 0xDEAD_BEEF,
        }
    );
    assert_eq!(cursor.position(), 55);
}

#[test]
fn derive_names_the_short_field() {
    let bytes = packed_gust();
    let mut cursor = BitCursor::new(&bytes[..4]);

    let err = Gust::from_bits(&mut cursor).unwrap_err();

    assert_eq!(err.field, "stamp");
    assert_eq!(err.source.position, 23);
    assert_eq!(cursor.position(), 23);
}

#[test]
fn station_header_layout() {
    let mut w = BitWriter::default();
    let fields = [
        (7, 47),
        (10, 778),
        (15, 12569),
        (16, 31976),
        (15, 435),
        (4, 2),
        (8, 3),
    ];
    for (width, value) in fields {
        w.push(width, value);
    }
    assert_eq!(w.len(), 75);

    let bytes = w.into_bytes();
    let mut cursor = BitCursor::new(&bytes);
    let header = StationHeader::from_bits(&mut cursor).unwrap();

    assert_eq!(header.wmo_block, 47);
    assert_eq!(header.wmo_station_id, 778);
    assert_eq!(header.lat, 12569);
    assert_eq!(header.lon, 31976);
    assert_eq!(header.height, 435);
    assert_eq!(header.device, 2);
    assert_eq!(header.observation_count, 3);
    assert_eq!(cursor.position(), 75);
}
