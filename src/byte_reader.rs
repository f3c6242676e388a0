/// Little-endian field cursor over a single record payload.
///
/// Every read is bounds checked and returns `None` once the payload is
/// exhausted, so a layout that disagrees with its declared length never
/// reads past the record.
pub(crate) struct ByteReader<'input> {
    offset: usize,
    bytes: &'input [u8],
}

macro_rules! convert_impl {
    ($func_name:ident, $type:ty, $size:expr) => {
        /// Read specified size bytes and converts it to the target type
        pub(crate) fn $func_name(&mut self) -> Option<$type> {
            let bytes = self.read_array::<$size>()?;
            Some(<$type>::from_le_bytes(bytes))
        }
    };
}

impl<'input> ByteReader<'input> {
    pub(crate) fn new(bytes: &'input [u8]) -> Self {
        Self { bytes, offset: 0 }
    }
    pub(crate) fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }
    pub(crate) fn read_bytes(&mut self, len: usize) -> Option<&'input [u8]> {
        if len > self.remaining() {
            return None;
        }
        let bytes = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        Some(bytes)
    }
    pub(crate) fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        self.read_bytes(N)?.try_into().ok()
    }
    pub(crate) fn read_next_u8(&mut self) -> Option<u8> {
        self.read_bytes(1).map(|it| it[0])
    }

    convert_impl!(read_next_u16, u16, 2);
    convert_impl!(read_next_u32, u32, 4);
    convert_impl!(read_next_i32, i32, 4);
    convert_impl!(read_next_f32, f32, 4);
}

impl<'input> From<&'input [u8]> for ByteReader<'input> {
    fn from(value: &'input [u8]) -> Self {
        ByteReader::new(value)
    }
}
