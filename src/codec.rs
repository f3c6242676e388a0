//! Per-tag record layouts.
//!
//! Each codec pairs a fixed payload length with a pure decode function.
//! Lengths never depend on the content, they are fixed by the tag and the
//! schema variant.

use crate::byte_reader::ByteReader;
use crate::error::{ErrorKind, ParserResult};
use crate::schema::SchemaVariant;
use crate::ttbin::{
    ActivityType, GpsDistance, GpsFix, GpsSample, Header, HeartRate, LapMarker, RawDump, Record,
    RecordTag, Summary, SwimSample, TimedMarker, TreadmillSample,
};
use crate::units;

type DecodeFn = fn(RecordTag, &mut ByteReader<'_>) -> Option<Record>;

pub struct Codec {
    length: usize,
    decode: DecodeFn,
}

impl Codec {
    const fn new(length: usize, decode: DecodeFn) -> Self {
        Codec { length, decode }
    }

    /// Payload length in bytes, excluding the tag byte.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Decode exactly one payload.
    ///
    /// Only the first `length()` bytes are consumed; a shorter payload fails
    /// with `TruncatedRecord`.
    pub fn decode(&self, tag: RecordTag, payload: &[u8]) -> ParserResult<Record> {
        let truncated = || ErrorKind::TruncatedRecord {
            tag,
            expected_len: self.length,
            available_len: payload.len(),
        };
        let payload = payload.get(..self.length).ok_or_else(truncated)?;
        let mut reader = ByteReader::new(payload);
        let record = (self.decode)(tag, &mut reader).ok_or_else(truncated)?;
        debug_assert_eq!(
            reader.remaining(),
            0,
            "layout of {tag} is shorter than its declared {} bytes",
            self.length
        );
        Ok(record)
    }
}

impl std::fmt::Debug for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec").field("length", &self.length).finish()
    }
}

pub const HEADER_LENGTH: usize = 116;
const HEADER_RESERVED_LENGTH: usize = 105;

pub(crate) static HEADER: Codec = Codec::new(HEADER_LENGTH, read_header);

static RECORD_LENGTHS: Codec = Codec::new(69, read_raw);
static LAP: Codec = Codec::new(6, read_lap);
static GPS_A: Codec = Codec::new(27, read_gps_a);
static GPS_B: Codec = Codec::new(20, read_gps_b);
static STATUS: Codec = Codec::new(19, read_raw);
static HEART_RATE_A: Codec = Codec::new(6, read_heart_rate_a);
static HEART_RATE_B: Codec = Codec::new(6, read_heart_rate_b);
static UNKNOWN_26: Codec = Codec::new(6, read_raw);
static SUMMARY: Codec = Codec::new(16, read_summary);
static UNKNOWN_30: Codec = Codec::new(2, read_raw);
static TREADMILL: Codec = Codec::new(18, read_treadmill);
static SWIM: Codec = Codec::new(22, read_swim);
static TIMED_MARKER: Codec = Codec::new(6, read_timed_marker);
static UNKNOWN_37: Codec = Codec::new(1, read_raw);

/// Codec table for the older tagged-header layout.
pub(crate) static VARIANT_A: &[(RecordTag, &Codec)] = &[
    (RecordTag::RECORD_LENGTHS, &RECORD_LENGTHS),
    (RecordTag::HEADER, &HEADER),
    (RecordTag::LAP, &LAP),
    (RecordTag::GPS, &GPS_A),
    (RecordTag::STATUS, &STATUS),
    (RecordTag::HEART_RATE, &HEART_RATE_A),
    (RecordTag::UNKNOWN_26, &UNKNOWN_26),
    (RecordTag::SUMMARY, &SUMMARY),
    (RecordTag::UNKNOWN_30, &UNKNOWN_30),
    (RecordTag::TREADMILL, &TREADMILL),
    (RecordTag::SWIM, &SWIM),
    (RecordTag::TIMED_MARKER, &TIMED_MARKER),
    (RecordTag::UNKNOWN_37, &UNKNOWN_37),
];

/// Codec table for the leading-header layout. The header is consumed before
/// tag dispatch and has no entry here.
pub(crate) static VARIANT_B: &[(RecordTag, &Codec)] = &[
    (RecordTag::LAP, &LAP),
    (RecordTag::GPS, &GPS_B),
    (RecordTag::STATUS, &STATUS),
    (RecordTag::HEART_RATE, &HEART_RATE_B),
    (RecordTag::UNKNOWN_26, &UNKNOWN_26),
    (RecordTag::SUMMARY, &SUMMARY),
    (RecordTag::UNKNOWN_30, &UNKNOWN_30),
    (RecordTag::TREADMILL, &TREADMILL),
    (RecordTag::SWIM, &SWIM),
    (RecordTag::TIMED_MARKER, &TIMED_MARKER),
    (RecordTag::UNKNOWN_37, &UNKNOWN_37),
];

/// Find the codec for `tag` under `variant`.
pub fn lookup(variant: SchemaVariant, tag: RecordTag) -> Option<&'static Codec> {
    variant
        .codecs()
        .iter()
        .find(|(it, _)| *it == tag)
        .map(|(_, codec)| *codec)
}

/// Codec of the file header, shared by both variants.
pub fn header() -> &'static Codec {
    &HEADER
}

/// Header
///
/// ```text
/// ------------------------------------------------------------------
/// | Format (1) | Version (4) | Unknown (2) | Time (4) | Reserved (105) |
/// ------------------------------------------------------------------
/// ```
fn read_header(_: RecordTag, reader: &mut ByteReader<'_>) -> Option<Record> {
    let file_format = reader.read_next_u8()?;
    let version = reader.read_array::<4>()?;
    let unknown = reader.read_next_u16()?;
    let timestamp = units::decode_epoch_utc(reader.read_next_u32()?);
    let reserved = reader.read_bytes(HEADER_RESERVED_LENGTH)?.to_vec();
    Some(Record::Header(Header {
        file_format,
        version,
        unknown,
        timestamp,
        reserved,
    }))
}

fn read_raw(tag: RecordTag, reader: &mut ByteReader<'_>) -> Option<Record> {
    let bytes = reader.read_bytes(reader.remaining())?.to_vec();
    Some(Record::RawDump(RawDump { tag, bytes }))
}

fn read_lap(_: RecordTag, reader: &mut ByteReader<'_>) -> Option<Record> {
    let lap = reader.read_next_u8()?;
    let activity = ActivityType::from(reader.read_next_u8()?);
    let time = units::decode_epoch_utc(reader.read_next_u32()?);
    Some(Record::Lap(LapMarker {
        lap,
        activity,
        time,
    }))
}

/// Fields shared by both GPS layouts, up to and including calories.
struct GpsCommon {
    latitude: i32,
    longitude: i32,
    heading: u16,
    speed: u16,
    time: u32,
    calories: u16,
}

impl GpsCommon {
    fn read(reader: &mut ByteReader<'_>) -> Option<Self> {
        Some(GpsCommon {
            latitude: reader.read_next_i32()?,
            longitude: reader.read_next_i32()?,
            heading: reader.read_next_u16()?,
            speed: reader.read_next_u16()?,
            time: reader.read_next_u32()?,
            calories: reader.read_next_u16()?,
        })
    }
    fn into_fix(self, distance: GpsDistance, cycles: Option<u8>) -> GpsFix {
        if self.time == GpsFix::NO_FIX_SENTINEL {
            return GpsFix::NoFix;
        }
        GpsFix::Locked(GpsSample {
            latitude: units::decode_geo_degrees(self.latitude),
            longitude: units::decode_geo_degrees(self.longitude),
            heading: units::decode_heading(self.heading),
            speed: units::decode_speed(self.speed),
            time: units::decode_epoch_utc(self.time),
            calories: self.calories,
            distance,
            cycles,
        })
    }
}

/// GPS, variant A
///
/// ```text
/// ---------------------------------------------------------------------------
/// | Lat (4) | Lon (4) | Heading (2) | Speed (2) | Time (4) | Calories (2) |
/// | Inc. distance f32 (4) | Cum. distance f32 (4) | Cycles (1) |
/// ---------------------------------------------------------------------------
/// ```
fn read_gps_a(_: RecordTag, reader: &mut ByteReader<'_>) -> Option<Record> {
    let common = GpsCommon::read(reader)?;
    let increment = reader.read_next_f32()? as f64;
    let cumulative = reader.read_next_f32()? as f64;
    let cycles = reader.read_next_u8()?;
    Some(Record::Gps(common.into_fix(
        GpsDistance::Incremental {
            cumulative,
            increment,
        },
        Some(cycles),
    )))
}

/// GPS, variant B: the float distances and the cycle counter are replaced by
/// a single 16-bit total distance in decimeters.
fn read_gps_b(_: RecordTag, reader: &mut ByteReader<'_>) -> Option<Record> {
    let common = GpsCommon::read(reader)?;
    let meters = units::decode_decimeters(reader.read_next_u16()?);
    Some(Record::Gps(
        common.into_fix(GpsDistance::Total { meters }, None),
    ))
}

fn read_heart_rate_a(_: RecordTag, reader: &mut ByteReader<'_>) -> Option<Record> {
    let bpm = reader.read_next_u8()? as u16;
    // unknown
    reader.read_next_u8()?;
    let time = units::decode_epoch_utc(reader.read_next_u32()?);
    Some(Record::HeartRate(HeartRate { bpm, time }))
}

fn read_heart_rate_b(_: RecordTag, reader: &mut ByteReader<'_>) -> Option<Record> {
    let bpm = reader.read_next_u16()?;
    let time = units::decode_epoch_utc(reader.read_next_u32()?);
    Some(Record::HeartRate(HeartRate { bpm, time }))
}

fn read_summary(_: RecordTag, reader: &mut ByteReader<'_>) -> Option<Record> {
    let activity = ActivityType::from(reader.read_next_u32()?);
    let distance = reader.read_next_u32()?;
    // The stored duration is one second short.
    let duration = reader.read_next_u32()? as u64 + 1;
    let calories = reader.read_next_u32()?;
    Some(Record::Summary(Summary {
        activity,
        distance,
        duration,
        calories,
    }))
}

fn read_treadmill(_: RecordTag, reader: &mut ByteReader<'_>) -> Option<Record> {
    let time = units::decode_epoch_utc(reader.read_next_u32()?);
    let distance = reader.read_next_f32()? as f64;
    let calories = reader.read_next_u32()?;
    let steps = reader.read_next_u32()?;
    // unknown
    reader.read_next_u16()?;
    Some(Record::Treadmill(TreadmillSample {
        time,
        distance,
        calories,
        steps,
    }))
}

fn read_swim(_: RecordTag, reader: &mut ByteReader<'_>) -> Option<Record> {
    let time = units::decode_epoch_utc(reader.read_next_u32()?);
    let unknown = reader.read_array::<14>()?;
    let calories = reader.read_next_u32()?;
    Some(Record::Swim(SwimSample {
        time,
        calories,
        unknown,
    }))
}

fn read_timed_marker(_: RecordTag, reader: &mut ByteReader<'_>) -> Option<Record> {
    let unknown = reader.read_array::<2>()?;
    let time = units::decode_epoch_utc(reader.read_next_u32()?);
    Some(Record::TimedMarker(TimedMarker { unknown, time }))
}
