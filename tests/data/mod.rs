#![allow(dead_code)]

pub const HEADER_TIME: u32 = 1_699_990_000;

/// Header payload without the tag byte.
pub fn header_payload(file_format: u8) -> Vec<u8> {
    let mut buf = vec![file_format, 1, 7, 196, 2];
    buf.extend_from_slice(&0x00AAu16.to_le_bytes());
    buf.extend_from_slice(&HEADER_TIME.to_le_bytes());
    buf.extend((0..105u8).map(|it| it.wrapping_mul(3)));
    buf
}

/// Tagged header opening a variant A file.
pub fn variant_a_header() -> Vec<u8> {
    let mut buf = vec![0x20];
    buf.extend(header_payload(0x07));
    buf
}

/// Untagged header opening a variant B file.
pub fn variant_b_header() -> Vec<u8> {
    header_payload(0x03)
}

pub fn record(tag: u8, payload: &[u8]) -> Vec<u8> {
    let mut buf = vec![tag];
    buf.extend_from_slice(payload);
    buf
}

pub fn lap(lap: u8, activity: u8, time: u32) -> Vec<u8> {
    let mut buf = vec![lap, activity];
    buf.extend_from_slice(&time.to_le_bytes());
    buf
}

pub struct Gps {
    pub latitude: i32,
    pub longitude: i32,
    pub heading: u16,
    pub speed: u16,
    pub time: u32,
    pub calories: u16,
}

impl Default for Gps {
    fn default() -> Self {
        Gps {
            latitude: 515_007_000,
            longitude: -1_278_000,
            heading: 9000,
            speed: 345,
            time: 1_700_000_000,
            calories: 12,
        }
    }
}

impl Gps {
    fn common(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&self.latitude.to_le_bytes());
        buf.extend_from_slice(&self.longitude.to_le_bytes());
        buf.extend_from_slice(&self.heading.to_le_bytes());
        buf.extend_from_slice(&self.speed.to_le_bytes());
        buf.extend_from_slice(&self.time.to_le_bytes());
        buf.extend_from_slice(&self.calories.to_le_bytes());
        buf
    }
    pub fn variant_a(&self, increment: f32, cumulative: f32, cycles: u8) -> Vec<u8> {
        let mut buf = self.common();
        buf.extend_from_slice(&increment.to_le_bytes());
        buf.extend_from_slice(&cumulative.to_le_bytes());
        buf.push(cycles);
        buf
    }
    pub fn variant_b(&self, decimeters: u16) -> Vec<u8> {
        let mut buf = self.common();
        buf.extend_from_slice(&decimeters.to_le_bytes());
        buf
    }
}

pub fn heart_rate_a(bpm: u8, time: u32) -> Vec<u8> {
    let mut buf = vec![bpm, 0];
    buf.extend_from_slice(&time.to_le_bytes());
    buf
}

pub fn heart_rate_b(bpm: u16, time: u32) -> Vec<u8> {
    let mut buf = bpm.to_le_bytes().to_vec();
    buf.extend_from_slice(&time.to_le_bytes());
    buf
}

pub fn summary(activity: u32, distance: u32, duration: u32, calories: u32) -> Vec<u8> {
    [activity, distance, duration, calories]
        .iter()
        .flat_map(|it| it.to_le_bytes())
        .collect()
}

pub fn treadmill(time: u32, distance: f32, calories: u32, steps: u32) -> Vec<u8> {
    let mut buf = time.to_le_bytes().to_vec();
    buf.extend_from_slice(&distance.to_le_bytes());
    buf.extend_from_slice(&calories.to_le_bytes());
    buf.extend_from_slice(&steps.to_le_bytes());
    buf.extend_from_slice(&0xBEEFu16.to_le_bytes());
    buf
}

pub fn swim(time: u32, unknown: [u8; 14], calories: u32) -> Vec<u8> {
    let mut buf = time.to_le_bytes().to_vec();
    buf.extend_from_slice(&unknown);
    buf.extend_from_slice(&calories.to_le_bytes());
    buf
}

pub fn timed_marker(unknown: [u8; 2], time: u32) -> Vec<u8> {
    let mut buf = unknown.to_vec();
    buf.extend_from_slice(&time.to_le_bytes());
    buf
}

/// Status record 0x23, kept raw by the decoder.
pub fn status(status: u16, activity: u16, time: u32) -> Vec<u8> {
    let mut buf = status.to_le_bytes().to_vec();
    buf.extend_from_slice(&activity.to_le_bytes());
    buf.push(0x01);
    buf.extend_from_slice(&time.to_le_bytes());
    buf.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
    buf.extend_from_slice(&0x0102u16.to_le_bytes());
    buf.extend_from_slice(&time.wrapping_add(1).to_le_bytes());
    buf
}

/// Record 0x26: u16 counter, u32 time.
pub fn unknown_26(counter: u16, time: u32) -> Vec<u8> {
    let mut buf = counter.to_le_bytes().to_vec();
    buf.extend_from_slice(&time.to_le_bytes());
    buf
}

pub fn unknown_30(value: u16) -> Vec<u8> {
    value.to_le_bytes().to_vec()
}

pub fn unknown_37(value: u8) -> Vec<u8> {
    vec![value]
}

/// Length table entries: tag, then (length + 1) as u16.
pub fn record_lengths() -> Vec<u8> {
    let entries: [(u8, u16); 23] = [
        (0x21, 7), (0x22, 28), (0x23, 20), (0x25, 7), (0x26, 7), (0x27, 17),
        (0x30, 3), (0x32, 19), (0x34, 23), (0x35, 7), (0x37, 2), (0x38, 1),
        (0x39, 1), (0x3A, 1), (0x3B, 1), (0x3C, 1), (0x3D, 1), (0x3E, 1),
        (0x3F, 1), (0x40, 1), (0x41, 1), (0x42, 1), (0x43, 1),
    ];
    entries
        .iter()
        .flat_map(|(tag, len)| {
            let [lo, hi] = len.to_le_bytes();
            [*tag, lo, hi]
        })
        .collect()
}
