//! Bounded text input for the stdin fallback

use crate::error::{Error, Result};
use std::io::Read;

/// Maximum number of bytes accepted from stdin
pub const MAX_TEXT_INPUT: usize = 8192;

/// Growable byte buffer with a hard capacity and an explicit truncation flag.
///
/// Writes never exceed the declared capacity; input beyond it is dropped and
/// recorded via [`BoundedBuffer::is_truncated`].
#[derive(Debug)]
pub struct BoundedBuffer {
    data: Vec<u8>,
    capacity: usize,
    truncated: bool,
}

impl BoundedBuffer {
    /// Create an empty buffer that will accept at most `capacity` bytes
    pub fn new(capacity: usize) -> Self {
        Self {
            data: Vec::new(),
            capacity,
            truncated: false,
        }
    }

    /// Append as much of `chunk` as fits, returning the number of bytes
    /// accepted. Rejected bytes set the truncation flag.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> usize {
        let room = self.capacity - self.data.len();
        let take = room.min(chunk.len());
        self.data.extend_from_slice(&chunk[..take]);
        if take < chunk.len() {
            self.truncated = true;
        }
        take
    }

    /// Number of bytes currently held
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds no bytes
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the buffer has reached its capacity
    pub fn is_full(&self) -> bool {
        self.data.len() >= self.capacity
    }

    /// Whether any input was dropped because the buffer was full
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Consume the buffer as UTF-8 text
    pub fn into_string(self) -> Result<String> {
        String::from_utf8(self.data)
            .map_err(|_| Error::Input("input text is not valid UTF-8".to_string()))
    }
}

/// Read from `reader` until EOF or until the buffer is full.
///
/// When capacity is hit, the rest of the pending input line is drained so a
/// long paste does not spill into the terminal after the program exits.
pub fn read_bounded<R: Read>(reader: &mut R, capacity: usize) -> Result<BoundedBuffer> {
    let mut buffer = BoundedBuffer::new(capacity);
    let mut chunk = [0u8; 1024];

    loop {
        let n = reader
            .read(&mut chunk)
            .map_err(|e| Error::Input(format!("read failed: {e}")))?;
        if n == 0 {
            break;
        }

        buffer.push_chunk(&chunk[..n]);
        if buffer.is_full() {
            drain_line(reader)?;
            break;
        }
    }

    Ok(buffer)
}

/// Read stdin into a bounded buffer and return it as text
pub fn read_stdin(capacity: usize) -> Result<String> {
    let stdin = std::io::stdin();
    let mut handle = stdin.lock();

    let buffer = read_bounded(&mut handle, capacity)?;
    if buffer.is_truncated() {
        tracing::warn!(capacity, "stdin input exceeded capacity and was truncated");
    }

    buffer.into_string()
}

fn drain_line<R: Read>(reader: &mut R) -> Result<()> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(()),
            Ok(_) if byte[0] == b'\n' => return Ok(()),
            Ok(_) => {}
            Err(e) => return Err(Error::Input(format!("read failed: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_push_chunk_within_capacity() {
        let mut buffer = BoundedBuffer::new(16);
        assert_eq!(buffer.push_chunk(b"hello"), 5);
        assert!(!buffer.is_truncated());
        assert_eq!(buffer.into_string().unwrap(), "hello");
    }

    #[test]
    fn test_push_chunk_truncates_at_capacity() {
        let mut buffer = BoundedBuffer::new(4);
        assert_eq!(buffer.push_chunk(b"hello"), 4);
        assert!(buffer.is_full());
        assert!(buffer.is_truncated());
        assert_eq!(buffer.into_string().unwrap(), "hell");
    }

    #[test]
    fn test_read_bounded_stops_at_eof() {
        let mut reader = Cursor::new(b"short input".to_vec());
        let buffer = read_bounded(&mut reader, 64).unwrap();
        assert!(!buffer.is_truncated());
        assert_eq!(buffer.into_string().unwrap(), "short input");
    }

    #[test]
    fn test_read_bounded_drains_rest_of_line() {
        let mut reader = Cursor::new(b"0123456789 tail\nnext line".to_vec());
        let buffer = read_bounded(&mut reader, 6).unwrap();
        assert_eq!(buffer.into_string().unwrap(), "012345");

        // Everything up to and including the newline has been consumed
        let mut rest = String::new();
        reader.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "next line");
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let mut buffer = BoundedBuffer::new(8);
        buffer.push_chunk(&[0xFF, 0xFE]);
        assert!(buffer.into_string().is_err());
    }
}
