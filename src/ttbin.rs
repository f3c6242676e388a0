use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// One-byte discriminator preceding every record in the stream.
#[derive(Debug, Hash, Eq, PartialEq, Copy, Clone, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordTag(pub u8);

impl RecordTag {
    pub const RECORD_LENGTHS: RecordTag = RecordTag(0x16);
    pub const HEADER: RecordTag = RecordTag(0x20);
    pub const LAP: RecordTag = RecordTag(0x21);
    pub const GPS: RecordTag = RecordTag(0x22);
    pub const STATUS: RecordTag = RecordTag(0x23);
    pub const HEART_RATE: RecordTag = RecordTag(0x25);
    pub const UNKNOWN_26: RecordTag = RecordTag(0x26);
    pub const SUMMARY: RecordTag = RecordTag(0x27);
    pub const UNKNOWN_30: RecordTag = RecordTag(0x30);
    pub const TREADMILL: RecordTag = RecordTag(0x32);
    pub const SWIM: RecordTag = RecordTag(0x34);
    pub const TIMED_MARKER: RecordTag = RecordTag(0x35);
    pub const UNKNOWN_37: RecordTag = RecordTag(0x37);
}

impl From<u8> for RecordTag {
    fn from(value: u8) -> Self {
        RecordTag(value)
    }
}

impl fmt::Display for RecordTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

/// Activity code shared by lap and summary records.
///
/// Unlisted codes are kept as `Other` and never fail decoding.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum ActivityType {
    Run,
    Cycle,
    Swim,
    Treadmill,
    Other(u32),
}

impl From<u32> for ActivityType {
    fn from(value: u32) -> Self {
        match value {
            0 => ActivityType::Run,
            1 => ActivityType::Cycle,
            2 => ActivityType::Swim,
            7 => ActivityType::Treadmill,
            code => ActivityType::Other(code),
        }
    }
}

impl From<u8> for ActivityType {
    fn from(value: u8) -> Self {
        ActivityType::from(value as u32)
    }
}

impl ActivityType {
    pub fn code(&self) -> u32 {
        match self {
            ActivityType::Run => 0,
            ActivityType::Cycle => 1,
            ActivityType::Swim => 2,
            ActivityType::Treadmill => 7,
            ActivityType::Other(code) => *code,
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityType::Run => f.write_str("Run"),
            ActivityType::Cycle => f.write_str("Cycle"),
            ActivityType::Swim => f.write_str("Swim"),
            ActivityType::Treadmill => f.write_str("Treadmill"),
            ActivityType::Other(code) => write!(f, "Type {code}"),
        }
    }
}

impl Serialize for ActivityType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// File header.
///
/// `unknown` and `reserved` are carried verbatim, their layout is not known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub file_format: u8,
    pub version: [u8; 4],
    pub unknown: u16,
    pub timestamp: DateTime<Utc>,
    pub reserved: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LapMarker {
    pub lap: u8,
    pub activity: ActivityType,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GpsDistance {
    /// Older layout: running total plus the distance since the previous fix.
    Incremental { cumulative: f64, increment: f64 },
    /// Newer layout: running total at 0.1 m resolution.
    Total { meters: f64 },
}

impl GpsDistance {
    pub fn total(&self) -> f64 {
        match self {
            GpsDistance::Incremental { cumulative, .. } => *cumulative,
            GpsDistance::Total { meters } => *meters,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpsSample {
    /// Degrees, positive north.
    pub latitude: f64,
    /// Degrees, positive east.
    pub longitude: f64,
    pub heading: f64,
    /// Meters/second.
    pub speed: f64,
    pub time: DateTime<Utc>,
    pub calories: u16,
    pub distance: GpsDistance,
    pub cycles: Option<u8>,
}

/// A GPS record. The all-ones time sentinel means the watch had no
/// satellite lock, and the remaining fields carry nothing meaningful.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "sample", rename_all = "snake_case")]
pub enum GpsFix {
    Locked(GpsSample),
    NoFix,
}

impl GpsFix {
    pub const NO_FIX_SENTINEL: u32 = 0xFFFF_FFFF;

    pub fn sample(&self) -> Option<&GpsSample> {
        match self {
            GpsFix::Locked(sample) => Some(sample),
            GpsFix::NoFix => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeartRate {
    pub bpm: u16,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub activity: ActivityType,
    /// Meters.
    pub distance: u32,
    /// Seconds, already corrected by one.
    pub duration: u64,
    pub calories: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreadmillSample {
    pub time: DateTime<Utc>,
    /// Meters.
    pub distance: f64,
    pub calories: u32,
    pub steps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwimSample {
    pub time: DateTime<Utc>,
    pub calories: u32,
    pub unknown: [u8; 14],
}

/// Tag 0x35: two undecoded bytes followed by a timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedMarker {
    pub unknown: [u8; 2],
    pub time: DateTime<Utc>,
}

/// A record whose length is known but whose fields are not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawDump {
    pub tag: RecordTag,
    pub bytes: Vec<u8>,
}

impl RawDump {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A tag with no known length. `offset` is the absolute position of the
/// tag byte itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnknownTag {
    pub tag: RecordTag,
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Record {
    Header(Header),
    Lap(LapMarker),
    Gps(GpsFix),
    HeartRate(HeartRate),
    Summary(Summary),
    Treadmill(TreadmillSample),
    Swim(SwimSample),
    TimedMarker(TimedMarker),
    RawDump(RawDump),
    UnknownTag(UnknownTag),
}

impl Record {
    /// Tag the record was read under.
    pub fn tag(&self) -> RecordTag {
        match self {
            Record::Header(_) => RecordTag::HEADER,
            Record::Lap(_) => RecordTag::LAP,
            Record::Gps(_) => RecordTag::GPS,
            Record::HeartRate(_) => RecordTag::HEART_RATE,
            Record::Summary(_) => RecordTag::SUMMARY,
            Record::Treadmill(_) => RecordTag::TREADMILL,
            Record::Swim(_) => RecordTag::SWIM,
            Record::TimedMarker(_) => RecordTag::TIMED_MARKER,
            Record::RawDump(dump) => dump.tag,
            Record::UnknownTag(unknown) => unknown.tag,
        }
    }
}
