use std::io::{self, Read};

use bytes::{BufMut, BytesMut};

const CHUNK: usize = 1024;

/// Line-at-a-time reader over any byte source.
pub struct Reader<R> {
    source: R,
    buf: BytesMut,
}

impl<R: Read> Reader<R> {
    pub fn new (source: R) -> Self {
        Self { source, buf: BytesMut::with_capacity(CHUNK) }
    }

    /// Returns the raw bytes of the next line including its newline, or `None`
    /// at end of input.
    ///
    /// A final line without a trailing newline is still returned.
    pub fn read_line (&mut self) -> io::Result<Option<BytesMut>> {
        let mut chunk = [0u8; CHUNK];

        loop {
            if let Some(pos) = self.buf.iter().position(|b| *b == b'\n') {
                return Ok(Some(self.buf.split_to(pos + 1)));
            }

            let n = match self.source.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };

            if n == 0 {
                if self.buf.is_empty() {
                    return Ok(None);
                }

                return Ok(Some(self.buf.split()));
            }

            self.buf.put_slice(&chunk[..n]);
        }
    }
}
