//! The record stream: framing, header skip, and value decoding.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use tracing::debug;

use crate::error::StreamError;
use crate::precision::Precision;

const MARKER_BYTES: usize = 4;

/// Forward-only reader over a Fortran unformatted record stream.
///
/// Each record is `i32 length marker, payload, i32 trailing marker`; the
/// markers must agree. The stream owns its cursor: there is no seeking,
/// and the type is deliberately move-only so the fill engine can take it
/// by value and be the sole consumer.
#[derive(Debug)]
pub struct RecordStream<R> {
    reader: R,
    precision: Precision,
    records_read: u64,
}

impl RecordStream<BufReader<File>> {
    /// Opens the binary file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::FileNotFound`] if the path does not exist,
    /// or [`StreamError::Io`] if it cannot be opened.
    pub fn open(path: &Path, precision: Precision) -> Result<Self, StreamError> {
        if !path.exists() {
            return Err(StreamError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path).map_err(|e| StreamError::Io {
            record: 0,
            reason: e.to_string(),
        })?;
        Ok(Self::new(BufReader::new(file), precision))
    }
}

impl<R: Read> RecordStream<R> {
    /// Wraps an arbitrary reader. The precision applies to every record
    /// for the lifetime of the stream.
    pub fn new(reader: R, precision: Precision) -> Self {
        Self {
            reader,
            precision,
            records_read: 0,
        }
    }

    /// Precision this stream decodes with.
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Number of records consumed so far, header records included.
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Reads one record expected to hold exactly `count` values.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Truncated`] if the stream ends or the
    /// record holds fewer than `count` values,
    /// [`StreamError::RecordLength`] if it holds more, and
    /// [`StreamError::MarkerMismatch`] on corrupt framing.
    pub fn read_record(&mut self, count: usize) -> Result<Vec<f64>, StreamError> {
        let expected = count * self.precision.width();
        let payload = self.next_payload(Some(expected))?;
        let values = match self.precision {
            Precision::Float => payload
                .chunks_exact(4)
                .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]) as f64)
                .collect(),
            Precision::Double => payload
                .chunks_exact(8)
                .map(|c| f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
                .collect(),
        };
        Ok(values)
    }

    /// Consumes the two leading header records without interpreting them.
    ///
    /// Their payloads are decoded as `i32` sequences for debug logging
    /// only, matching how restart headers are conventionally dumped.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Truncated`] if either record is missing,
    /// or [`StreamError::MarkerMismatch`] on corrupt framing.
    pub fn skip_header(&mut self) -> Result<(), StreamError> {
        for _ in 0..2 {
            let payload = self.next_payload(None)?;
            let ints: Vec<i32> = payload
                .chunks_exact(4)
                .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect();
            debug!(?ints, "skipped header record");
        }
        Ok(())
    }

    /// Reads one framed payload. With `expected_bytes` set, the record
    /// length must match it exactly.
    fn next_payload(&mut self, expected_bytes: Option<usize>) -> Result<Vec<u8>, StreamError> {
        let record = self.records_read;

        let head = self.read_marker(record, expected_bytes.unwrap_or(MARKER_BYTES))?;
        if head < 0 {
            return Err(StreamError::MarkerMismatch {
                record,
                head,
                tail: head,
            });
        }
        let len = head as usize;

        if let Some(expected) = expected_bytes {
            if len < expected {
                return Err(StreamError::Truncated {
                    record,
                    needed: expected - len,
                });
            }
            if len > expected {
                return Err(StreamError::RecordLength {
                    record,
                    expected,
                    found: len,
                });
            }
        }

        let mut payload = vec![0u8; len];
        self.read_all(record, &mut payload)?;

        let mut tail_buf = [0u8; MARKER_BYTES];
        self.read_all(record, &mut tail_buf)?;
        let tail = i32::from_le_bytes(tail_buf);
        if tail != head {
            return Err(StreamError::MarkerMismatch { record, head, tail });
        }

        self.records_read += 1;
        Ok(payload)
    }

    /// Reads the leading length marker; EOF here means the stream ran
    /// out before the record started.
    fn read_marker(&mut self, record: u64, needed: usize) -> Result<i32, StreamError> {
        let mut buf = [0u8; MARKER_BYTES];
        match self.reader.read_exact(&mut buf) {
            Ok(()) => Ok(i32::from_le_bytes(buf)),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                Err(StreamError::Truncated { record, needed })
            }
            Err(e) => Err(StreamError::Io {
                record,
                reason: e.to_string(),
            }),
        }
    }

    fn read_all(&mut self, record: u64, buf: &mut [u8]) -> Result<(), StreamError> {
        let needed = buf.len();
        match self.reader.read_exact(buf) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                Err(StreamError::Truncated { record, needed })
            }
            Err(e) => Err(StreamError::Io {
                record,
                reason: e.to_string(),
            }),
        }
    }
}
