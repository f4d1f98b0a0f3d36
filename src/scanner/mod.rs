//! Line scanner over an input file.
//!
//! [`LineScanner`] owns the open file handle and yields its lines lazily,
//! one at a time. It is a one-shot iterator: once exhausted, reading the
//! input again means opening a new scanner. The file is closed when the
//! scanner is dropped, whether the scan finished or stopped on an error.
//!
//! `\n`, `\r\n` and a bare `\r` all end a line.

use crate::error::AggregateError;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Lazy, non-restartable source of input lines.
pub struct LineScanner<R = BufReader<File>> {
    path: PathBuf,
    reader: R,
    /// Lines already split out of the last chunk read.
    pending: VecDeque<String>,
    buf: Vec<u8>,
    finished: bool,
}

impl LineScanner {
    /// Open `path` for reading.
    pub fn open(path: &Path) -> Result<Self, AggregateError> {
        let file = File::open(path).map_err(|e| AggregateError::file_access(path, e))?;
        debug!("Opened input file: {}", path.display());
        Ok(Self::from_reader(path, BufReader::new(file)))
    }
}

impl<R: BufRead> LineScanner<R> {
    /// Scan an already-open reader. `path` is only used in error messages.
    pub fn from_reader(path: impl Into<PathBuf>, reader: R) -> Self {
        Self {
            path: path.into(),
            reader,
            pending: VecDeque::new(),
            buf: Vec::new(),
            finished: false,
        }
    }

    /// Read up to the next `\n` and queue every line it contains.
    ///
    /// Returns `Ok(false)` at end of input. A `\r\n` pair never straddles
    /// two chunks because each chunk ends at `\n` or end of input.
    fn fill_pending(&mut self) -> io::Result<bool> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(false);
        }

        let mut chunk = self.buf.as_slice();
        if let Some(rest) = chunk.strip_suffix(b"\n") {
            chunk = rest;
        }
        if let Some(rest) = chunk.strip_suffix(b"\r") {
            chunk = rest;
        }

        let text = std::str::from_utf8(chunk)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pending.extend(text.split('\r').map(str::to_string));

        Ok(true)
    }
}

impl<R: BufRead> Iterator for LineScanner<R> {
    type Item = Result<String, AggregateError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(Ok(line));
            }
            if self.finished {
                return None;
            }

            match self.fill_pending() {
                Ok(true) => {}
                Ok(false) => self.finished = true,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(AggregateError::file_access(&self.path, e)));
                }
            }
        }
    }
}
