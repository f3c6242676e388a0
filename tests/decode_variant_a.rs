use chrono::{DateTime, Utc};
use ttbin::{
    decode, ActivityType, Decoder, GpsDistance, GpsFix, Record, RecordTag, SchemaVariant,
    UnknownTag,
};
mod data;

#[test]
fn heart_rate_then_unknown_tag() {
    let mut buf = data::variant_a_header();
    buf.extend(data::record(0x25, &data::heart_rate_a(72, 1_700_000_000)));
    let unknown_offset = buf.len() as u64;
    buf.push(0x99);
    buf.extend_from_slice(&[0x01, 0x02, 0x03]);

    let records = decode(buf.as_slice(), Some(SchemaVariant::A))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(records.len(), 3);
    assert!(matches!(records[0], Record::Header(_)));
    match &records[1] {
        Record::HeartRate(hr) => {
            assert_eq!(hr.bpm, 72);
            assert_eq!(
                hr.time,
                DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
            );
            assert_eq!(hr.time.to_string(), "2023-11-14 22:13:20 UTC");
        }
        other => panic!("expected heart rate, got {other:?}"),
    }
    assert_eq!(
        records[2],
        Record::UnknownTag(UnknownTag {
            tag: RecordTag(0x99),
            offset: unknown_offset,
        })
    );
}

#[test]
fn header_fields() {
    let buf = data::variant_a_header();
    let mut decoder = Decoder::with_variant(buf.as_slice(), SchemaVariant::A);
    let header = match decoder.next() {
        Some(Ok(Record::Header(header))) => header,
        other => panic!("expected header, got {other:?}"),
    };
    assert_eq!(header.file_format, 0x07);
    assert_eq!(header.version, [1, 7, 196, 2]);
    assert_eq!(header.unknown, 0x00AA);
    assert_eq!(header.timestamp.timestamp(), data::HEADER_TIME as i64);
    assert_eq!(header.reserved.len(), 105);
    assert_eq!(header.reserved[1], 3);
    assert!(decoder.next().is_none());
    assert!(decoder.is_finished());
}

#[test]
fn full_activity() {
    let mut buf = data::variant_a_header();
    buf.extend(data::record(0x16, &data::record_lengths()));
    buf.extend(data::record(0x21, &data::lap(1, 0, 1_700_000_100)));
    buf.extend(data::record(
        0x22,
        &data::Gps::default().variant_a(2.5, 1000.25, 88),
    ));
    buf.extend(data::record(0x23, &[0x11; 19]));
    buf.extend(data::record(0x26, &[1, 2, 3, 4, 5, 6]));
    buf.extend(data::record(0x30, &[0xAB, 0xCD]));
    buf.extend(data::record(0x32, &data::treadmill(1_700_000_200, 812.5, 40, 1200)));
    buf.extend(data::record(0x34, &data::swim(1_700_000_300, [7; 14], 55)));
    buf.extend(data::record(0x35, &data::timed_marker([0x0A, 0x0B], 1_700_000_400)));
    buf.extend(data::record(0x37, &[0x42]));
    buf.extend(data::record(0x27, &data::summary(7, 5000, 1799, 321)));

    let records = Decoder::new(buf.as_slice())
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let tags = records.iter().map(Record::tag).collect::<Vec<_>>();
    assert_eq!(
        tags,
        [0x20, 0x16, 0x21, 0x22, 0x23, 0x26, 0x30, 0x32, 0x34, 0x35, 0x37, 0x27]
            .map(RecordTag)
            .to_vec()
    );

    match &records[1] {
        Record::RawDump(dump) => {
            assert_eq!(dump.len(), 69);
            assert_eq!(&dump.bytes[..3], &[0x21, 0x07, 0x00]);
        }
        other => panic!("expected length table dump, got {other:?}"),
    }
    match &records[2] {
        Record::Lap(lap) => {
            assert_eq!(lap.lap, 1);
            assert_eq!(lap.activity, ActivityType::Run);
            assert_eq!(lap.time.timestamp(), 1_700_000_100);
        }
        other => panic!("expected lap, got {other:?}"),
    }
    match &records[3] {
        Record::Gps(GpsFix::Locked(sample)) => {
            assert!((sample.latitude - 51.5007).abs() < 1e-9);
            assert!((sample.longitude + 0.1278).abs() < 1e-9);
            assert!((sample.heading - 90.0).abs() < 1e-9);
            assert!((sample.speed - 3.45).abs() < 1e-9);
            assert_eq!(sample.calories, 12);
            assert_eq!(
                sample.distance,
                GpsDistance::Incremental {
                    cumulative: 1000.25,
                    increment: 2.5,
                }
            );
            assert_eq!(sample.cycles, Some(88));
        }
        other => panic!("expected gps fix, got {other:?}"),
    }
    match &records[7] {
        Record::Treadmill(sample) => {
            assert_eq!(sample.distance, 812.5);
            assert_eq!(sample.calories, 40);
            assert_eq!(sample.steps, 1200);
        }
        other => panic!("expected treadmill, got {other:?}"),
    }
    match &records[8] {
        Record::Swim(sample) => {
            assert_eq!(sample.calories, 55);
            assert_eq!(sample.unknown, [7; 14]);
            assert_eq!(sample.time.timestamp(), 1_700_000_300);
        }
        other => panic!("expected swim, got {other:?}"),
    }
    match &records[9] {
        Record::TimedMarker(marker) => {
            assert_eq!(marker.unknown, [0x0A, 0x0B]);
            assert_eq!(marker.time.timestamp(), 1_700_000_400);
        }
        other => panic!("expected timed marker, got {other:?}"),
    }
    match &records[11] {
        Record::Summary(summary) => {
            assert_eq!(summary.activity, ActivityType::Treadmill);
            assert_eq!(summary.distance, 5000);
            assert_eq!(summary.duration, 1800);
            assert_eq!(summary.calories, 321);
        }
        other => panic!("expected summary, got {other:?}"),
    }
}

#[test]
fn records_serialize_to_json() {
    let mut buf = data::variant_a_header();
    buf.extend(data::record(0x21, &data::lap(2, 99, 1_700_000_100)));
    let records = decode(buf.as_slice(), None)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let json = serde_json::to_value(&records[1]).unwrap();
    assert_eq!(json["type"], "lap");
    assert_eq!(json["data"]["activity"], "Type 99");
    assert_eq!(json["data"]["time"], "2023-11-14T22:15:00Z");
}
