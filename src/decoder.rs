use crate::codec;
use crate::error::{ErrorKind, ParserResult};
use crate::schema::{self, HeaderPolicy, Schema, SchemaVariant};
use crate::stream::TagStream;
use crate::ttbin::{Record, RecordTag, UnknownTag};
use std::io::Read;
use tracing::{debug, trace, warn};

/// What to do with a tag missing from the active codec table.
///
/// Either way decoding stops: the payload length of such a tag is unknown,
/// so there is no way to find the next tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownTagPolicy {
    /// Yield `Record::UnknownTag` as the last item.
    #[default]
    Report,
    /// Yield `ErrorKind::UnknownTag` as the last item.
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecoderOptions {
    /// Declared schema, `None` detects it from the first bytes.
    pub variant: Option<SchemaVariant>,
    pub unknown_tag_policy: UnknownTagPolicy,
    /// Absolute offset of the first byte handed to the decoder.
    pub base_offset: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    HeaderConsumed,
    Streaming,
    Done,
    Error,
}

/// Decode a ttbin stream
///
/// Iterating yields one record at a time until the stream ends. The
/// sequence ends after the first error or unknown tag and cannot be
/// restarted.
///
/// ```text
/// Start -> HeaderConsumed -> Streaming -> Done
///   |                           |
///   +--------> Error <----------+
/// ```
pub struct Decoder<R> {
    stream: TagStream<R>,
    options: DecoderOptions,
    schema: Option<Schema>,
    skip_header: bool,
    state: State,
}

/// Decode `reader` under `declared` or, if `None`, a detected schema.
pub fn decode<R: Read>(reader: R, declared: Option<SchemaVariant>) -> Decoder<R> {
    Decoder::with_options(
        reader,
        DecoderOptions {
            variant: declared,
            ..DecoderOptions::default()
        },
    )
}

impl<R: Read> Decoder<R> {
    /// Detect the schema from the first bytes.
    pub fn new(reader: R) -> Self {
        Decoder::with_options(reader, DecoderOptions::default())
    }
    pub fn with_variant(reader: R, variant: SchemaVariant) -> Self {
        decode(reader, Some(variant))
    }
    pub fn with_options(reader: R, options: DecoderOptions) -> Self {
        Decoder {
            stream: TagStream::new(reader, options.base_offset),
            options,
            schema: None,
            skip_header: false,
            state: State::Start,
        }
    }
    /// Resume tag dispatch in the middle of a stream.
    ///
    /// No header is expected. `base_offset` is the absolute position of the
    /// first byte of `reader` and keeps reported offsets absolute.
    pub fn headless(reader: R, variant: SchemaVariant, base_offset: u64) -> Self {
        let mut decoder = Decoder::with_options(
            reader,
            DecoderOptions {
                variant: Some(variant),
                base_offset,
                ..DecoderOptions::default()
            },
        );
        decoder.skip_header = true;
        decoder
    }
    /// Variant in effect, known once the first item has been pulled.
    pub fn variant(&self) -> Option<SchemaVariant> {
        self.schema.map(|it| it.variant())
    }
    /// Absolute offset of the next unread byte.
    pub fn offset(&self) -> u64 {
        self.stream.offset()
    }
    pub fn is_finished(&self) -> bool {
        matches!(self.state, State::Done | State::Error)
    }

    fn next_record(&mut self) -> Option<ParserResult<Record>> {
        loop {
            match self.state {
                State::Start => match self.start() {
                    Ok(Some(header)) => {
                        self.state = State::HeaderConsumed;
                        return Some(Ok(header));
                    }
                    Ok(None) => self.state = State::HeaderConsumed,
                    Err(e) => return Some(self.fail(e)),
                },
                State::HeaderConsumed => self.state = State::Streaming,
                State::Streaming => return self.read_record(),
                State::Done | State::Error => return None,
            }
        }
    }

    /// Resolve the schema and, for an untagged header, consume it.
    fn start(&mut self) -> ParserResult<Option<Record>> {
        let leading = match self.options.variant {
            Some(_) => Vec::new(),
            None => self.stream.peek(schema::DETECTION_LENGTH)?,
        };
        let schema = schema::resolve(self.options.variant, &leading)?;
        debug!(
            "Resolved ttbin schema {} ({})",
            schema.variant(),
            if self.options.variant.is_some() {
                "declared"
            } else {
                "detected"
            }
        );
        self.schema = Some(schema);
        if self.skip_header || schema.header_policy() == HeaderPolicy::Tagged {
            return Ok(None);
        }
        let header = codec::header();
        let payload = self.stream.read_payload(RecordTag::HEADER, header.length())?;
        debug!("Consumed leading header ({} bytes)", header.length());
        header.decode(RecordTag::HEADER, &payload).map(Some)
    }

    fn read_record(&mut self) -> Option<ParserResult<Record>> {
        let schema = self.schema?;
        let offset = self.stream.offset();
        let tag = match self.stream.read_tag() {
            Ok(Some(tag)) => tag,
            Ok(None) => {
                debug!("End of stream at offset {offset}");
                self.state = State::Done;
                return None;
            }
            Err(e) => return Some(self.fail(e)),
        };
        let Some(codec) = schema.codec(tag) else {
            warn!("Unknown tag {tag} at offset {offset}, stopping");
            self.state = State::Error;
            let unknown = UnknownTag { tag, offset };
            return Some(match self.options.unknown_tag_policy {
                UnknownTagPolicy::Report => Ok(Record::UnknownTag(unknown)),
                UnknownTagPolicy::Fail => Err(ErrorKind::UnknownTag { tag, offset }),
            });
        };
        trace!("Record {tag} at offset {offset} ({} bytes)", codec.length());
        let result = self
            .stream
            .read_payload(tag, codec.length())
            .and_then(|payload| codec.decode(tag, &payload));
        Some(match result {
            Ok(record) => Ok(record),
            Err(e) => self.fail(e),
        })
    }

    fn fail(&mut self, e: ErrorKind) -> ParserResult<Record> {
        warn!("Decoding stopped: {e}");
        self.state = State::Error;
        Err(e)
    }
}

impl<R: Read> Iterator for Decoder<R> {
    type Item = ParserResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record()
    }
}

impl<R: Read> std::iter::FusedIterator for Decoder<R> {}
