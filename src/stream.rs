use crate::error::{ErrorKind, ParserResult};
use crate::ttbin::RecordTag;
use std::io::{self, Read};

/// Blocking source of tags and payloads.
///
/// Reads straight from the underlying `Read`, holding at most one record
/// payload at a time. Bytes inspected by [`TagStream::peek`] are pushed back
/// and read again by the next call.
pub(crate) struct TagStream<R> {
    inner: R,
    pending: Vec<u8>,
    offset: u64,
}

impl<R: Read> TagStream<R> {
    pub(crate) fn new(reader: R, base_offset: u64) -> Self {
        TagStream {
            inner: reader,
            pending: Vec::new(),
            offset: base_offset,
        }
    }

    /// Absolute offset of the next unread byte.
    pub(crate) fn offset(&self) -> u64 {
        self.offset
    }

    /// Inspect up to `len` leading bytes without consuming them.
    pub(crate) fn peek(&mut self, len: usize) -> ParserResult<Vec<u8>> {
        let mut buf = vec![0u8; len];
        let filled = self.fill(&mut buf)?;
        buf.truncate(filled);
        let mut pending = buf.clone();
        pending.append(&mut self.pending);
        self.pending = pending;
        Ok(buf)
    }

    /// Next tag byte, or `None` on a clean end of stream.
    pub(crate) fn read_tag(&mut self) -> ParserResult<Option<RecordTag>> {
        let mut buf = [0u8; 1];
        let filled = self.fill(&mut buf)?;
        self.offset += filled as u64;
        Ok((filled == 1).then(|| RecordTag(buf[0])))
    }

    /// Read exactly `len` payload bytes of a `tag` record.
    pub(crate) fn read_payload(&mut self, tag: RecordTag, len: usize) -> ParserResult<Vec<u8>> {
        let mut buf = vec![0u8; len];
        let filled = self.fill(&mut buf)?;
        self.offset += filled as u64;
        if filled < len {
            return Err(ErrorKind::TruncatedRecord {
                tag,
                expected_len: len,
                available_len: filled,
            });
        }
        Ok(buf)
    }

    /// Like `read_exact`, but reports how much was read before end of stream.
    fn fill(&mut self, buf: &mut [u8]) -> ParserResult<usize> {
        let mut filled = self.pending.len().min(buf.len());
        buf[..filled].copy_from_slice(&self.pending[..filled]);
        self.pending.drain(..filled);
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }
}
