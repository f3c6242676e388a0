mod byte_reader;
pub mod codec;
pub mod decoder;
pub mod error;
pub mod schema;
mod stream;
mod ttbin;
pub mod units;

pub use decoder::{decode, Decoder, DecoderOptions, UnknownTagPolicy};
pub use schema::{HeaderPolicy, Schema, SchemaVariant};
pub use ttbin::{
    ActivityType, GpsDistance, GpsFix, GpsSample, Header, HeartRate, LapMarker, RawDump, Record,
    RecordTag, Summary, SwimSample, TimedMarker, TreadmillSample, UnknownTag,
};
