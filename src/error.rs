use crate::ttbin::RecordTag;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Clone)]
pub enum ErrorKind {
    #[error("Truncated record {tag}: expected {expected_len} bytes, but only {available_len} bytes are available.")]
    TruncatedRecord {
        tag: RecordTag,
        expected_len: usize,
        available_len: usize,
    },
    #[error("Input does not match any known ttbin header signature (leading bytes {leading:02X?}).")]
    UnrecognizedSchema { leading: Vec<u8> },
    #[error("Unknown tag {tag} at offset {offset}.")]
    UnknownTag { tag: RecordTag, offset: u64 },
    #[error("Failed to read input: {reason}")]
    Io { reason: String },
}
pub type ParserResult<T> = Result<T, ErrorKind>;

impl ErrorKind {
    pub fn kind(&self) -> &'static str {
        use ErrorKind::*;
        match self {
            TruncatedRecord { .. } => "TruncatedRecord",
            UnrecognizedSchema { .. } => "UnrecognizedSchema",
            UnknownTag { .. } => "UnknownTag",
            Io { .. } => "Io",
        }
    }
}

impl From<std::io::Error> for ErrorKind {
    fn from(value: std::io::Error) -> Self {
        ErrorKind::Io {
            reason: value.to_string(),
        }
    }
}

impl Serialize for ErrorKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut builder = serializer.serialize_struct("Error", 2)?;
        builder.serialize_field("kind", self.kind())?;
        builder.serialize_field("message", &self.to_string())?;
        builder.end()
    }
}
