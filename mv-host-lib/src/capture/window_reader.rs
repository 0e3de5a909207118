/// Big-endian cursor over one capture window.
///
/// Reads past the end of the window return `None` and leave the cursor where
/// it was.
pub(crate) struct WindowReader<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> WindowReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    pub fn consumed(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.offset
    }

    pub fn read_u8(&mut self) -> Option<u8> {
        self.read_array::<1>().map(|bytes| bytes[0])
    }

    pub fn read_u32(&mut self) -> Option<u32> {
        self.read_array::<4>().map(u32::from_be_bytes)
    }

    pub fn read_f32(&mut self) -> Option<f32> {
        self.read_array::<4>().map(f32::from_be_bytes)
    }

    /// Consumes everything left in the window.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let rest = &self.buffer[self.offset..];
        self.offset = self.buffer.len();
        rest
    }

    fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        if N > self.remaining() {
            return None;
        }
        let bytes: [u8; N] = self.buffer[self.offset..(self.offset + N)].try_into().ok()?;
        self.offset += N;
        Some(bytes)
    }
}
