//! Human readable listing of decoded records.

use chrono::{DateTime, Utc};
use std::fmt::Write;
use ttbin::{units, GpsDistance, GpsFix, Record, RecordTag};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DUMP_WIDTH: usize = 32;

pub(crate) struct Listing {
    /// Render every timestamp in UTC, including the ones normally shown in
    /// local time.
    pub(crate) utc_only: bool,
}

impl Listing {
    fn gmt(&self, time: &DateTime<Utc>) -> String {
        time.format(TIME_FORMAT).to_string()
    }
    fn local(&self, time: &DateTime<Utc>) -> String {
        if self.utc_only {
            return self.gmt(time);
        }
        units::to_local(time).format(TIME_FORMAT).to_string()
    }

    pub(crate) fn record(&self, record: &Record) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        self.write_record(&mut out, record)?;
        Ok(out)
    }

    fn write_record(&self, out: &mut String, record: &Record) -> std::fmt::Result {
        match record {
            Record::Header(header) => writeln!(
                out,
                "[{}] Header: file format {}, watch version ({},{},{},{})",
                self.gmt(&header.timestamp),
                header.file_format,
                header.version[0],
                header.version[1],
                header.version[2],
                header.version[3]
            ),
            Record::Lap(lap) => writeln!(
                out,
                "[{}] Lap: {} activity: {}",
                self.gmt(&lap.time),
                lap.lap,
                lap.activity
            ),
            Record::Gps(GpsFix::NoFix) => writeln!(out, "\nNo GPS lock\n"),
            Record::Gps(GpsFix::Locked(sample)) => {
                write!(
                    out,
                    "\n[{}] GPS: Lat: {:.6}, Long: {:.6}, Speed: {:.2} m/s, Cal: {}, ",
                    self.local(&sample.time),
                    sample.latitude,
                    sample.longitude,
                    sample.speed,
                    sample.calories
                )?;
                match sample.distance {
                    GpsDistance::Incremental {
                        cumulative,
                        increment,
                    } => write!(out, "Distance: {cumulative:.6} m (+ {increment:.6} m), ")?,
                    GpsDistance::Total { meters } => write!(out, "Distance: {meters:.1} m, ")?,
                }
                if let Some(cycles) = sample.cycles {
                    write!(out, "Cycles: {cycles}   ")?;
                }
                writeln!(out, "Heading {:.2}\u{00B0}\n", sample.heading)
            }
            Record::HeartRate(hr) => {
                writeln!(out, "[{}] Heart BPM: {}", self.gmt(&hr.time), hr.bpm)
            }
            Record::Summary(summary) => writeln!(
                out,
                "Summary:\n  Activity type: {}\n  Distance {}m\n  Duration: {} s\n  Calories: {}",
                summary.activity, summary.distance, summary.duration, summary.calories
            ),
            Record::Treadmill(sample) => writeln!(
                out,
                "[{}] Treadmill: Distance: {:.2} m  Calories: {}  Steps: {}",
                self.gmt(&sample.time),
                sample.distance,
                sample.calories,
                sample.steps
            ),
            Record::Swim(sample) => {
                writeln!(
                    out,
                    "Swim: {} Calories: {}",
                    self.gmt(&sample.time),
                    sample.calories
                )?;
                hex_dump(out, &sample.unknown)
            }
            Record::TimedMarker(marker) => writeln!(
                out,
                "Tag {}: {:02X} {:02X}  {}",
                RecordTag::TIMED_MARKER,
                marker.unknown[0],
                marker.unknown[1],
                self.local(&marker.time)
            ),
            Record::RawDump(dump) if dump.tag == RecordTag::RECORD_LENGTHS => {
                writeln!(out, "Record lengths (ignored)")
            }
            Record::RawDump(dump) if dump.tag == RecordTag::STATUS && dump.len() >= 5 => {
                let b = &dump.bytes;
                writeln!(
                    out,
                    "Tag {}: {:04X}  {:04X}  {:02X}",
                    dump.tag,
                    u16::from_le_bytes([b[0], b[1]]),
                    u16::from_le_bytes([b[2], b[3]]),
                    b[4]
                )?;
                hex_dump(out, b)
            }
            Record::RawDump(dump) => {
                write!(out, "Tag {}: ", dump.tag)?;
                hex_dump(out, &dump.bytes)
            }
            Record::UnknownTag(unknown) => writeln!(
                out,
                "Unknown tag: {:02X} at {}",
                unknown.tag.0, unknown.offset
            ),
        }
    }
}

/// Bytes as ` XX` groups, 32 per line.
pub(crate) fn hex_dump(out: &mut String, bytes: &[u8]) -> std::fmt::Result {
    for line in bytes.chunks(DUMP_WIDTH) {
        for byte in line {
            write!(out, " {byte:02X}")?;
        }
        out.push('\n');
    }
    Ok(())
}
