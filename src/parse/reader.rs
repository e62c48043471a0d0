use std::{borrow::Cow, io::Error as IoError};

use md5::{Digest, Md5};

/// Line-wise reader that hashes every byte it reads.
pub(crate) struct FileReader<R> {
    inner: R,
    buf: Vec<u8>,
    hasher: Md5,
}

impl<R> FileReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            // mean line length of ranked charts is well below that
            buf: Vec::with_capacity(64),
            hasher: Md5::new(),
        }
    }

    /// The current line without its line ending.
    pub(crate) fn line(&self) -> Cow<'_, str> {
        let mut end = self.buf.len();

        while end > 0 && matches!(self.buf[end - 1], b'\n' | b'\r') {
            end -= 1;
        }

        String::from_utf8_lossy(&self.buf[..end])
    }

    /// Lowercase hex MD5 of everything read so far.
    pub(crate) fn md5(self) -> String {
        format!("{:x}", self.hasher.finalize())
    }

    fn prepare(&mut self) {
        self.buf.clear();
    }

    fn hash(&mut self, bytes: usize) -> bool {
        self.hasher.update(&self.buf[..bytes]);

        bytes > 0
    }
}

impl<R: std::io::BufRead> FileReader<R> {
    /// Read the next line. Returns `false` at the end of the input.
    pub(crate) fn next_line(&mut self) -> Result<bool, IoError> {
        self.prepare();
        let bytes = self.inner.read_until(b'\n', &mut self.buf)?;

        Ok(self.hash(bytes))
    }
}

#[cfg(feature = "async_tokio")]
impl<R: tokio::io::AsyncBufRead + Unpin> FileReader<R> {
    pub(crate) async fn next_line_tokio(&mut self) -> Result<bool, IoError> {
        use tokio::io::AsyncBufReadExt;

        self.prepare();
        let bytes = self.inner.read_until(b'\n', &mut self.buf).await?;

        Ok(self.hash(bytes))
    }
}

#[cfg(feature = "async_std")]
impl<R: async_std::io::BufRead + Unpin> FileReader<R> {
    pub(crate) async fn next_line_async_std(&mut self) -> Result<bool, IoError> {
        use async_std::io::prelude::BufReadExt;

        self.prepare();
        let bytes = self.inner.read_until(b'\n', &mut self.buf).await?;

        Ok(self.hash(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_line_endings() {
        let mut reader = FileReader::new(&b"first\r\nsecond"[..]);

        assert!(reader.next_line().unwrap());
        assert_eq!(reader.line(), "first");

        assert!(reader.next_line().unwrap());
        assert_eq!(reader.line(), "second");

        assert!(!reader.next_line().unwrap());
    }

    #[test]
    fn hashes_everything() {
        let mut reader = FileReader::new(&b"abc\ndef"[..]);
        while reader.next_line().unwrap() {}

        let expected = format!("{:x}", Md5::digest(b"abc\ndef"));
        assert_eq!(reader.md5(), expected);
    }
}
