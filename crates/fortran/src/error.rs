//! Error types for the bin2nc-fortran crate.

use std::path::PathBuf;

/// Error type for all fallible operations on a record stream.
///
/// This enum covers file access, framing-marker corruption, truncation,
/// and records whose length disagrees with what the layout requires.
/// Record indices are zero-based counts of records consumed so far.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// Returned when the input binary file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an I/O error other than end-of-file.
    #[error("i/o error at record {record}: {reason}")]
    Io {
        /// Index of the record being read when the error occurred.
        record: u64,
        /// Description of the underlying I/O failure.
        reason: String,
    },

    /// Returned when the head and tail length markers of a record
    /// disagree, or a marker is negative.
    #[error("record {record} marker mismatch: head {head}, tail {tail}")]
    MarkerMismatch {
        /// Index of the corrupt record.
        record: u64,
        /// Leading length marker.
        head: i32,
        /// Trailing length marker.
        tail: i32,
    },

    /// Returned when the stream ends, or a record is shorter than the
    /// layout requires.
    #[error("stream truncated at record {record}: {needed} more bytes required")]
    Truncated {
        /// Index of the record being read when the stream ran out.
        record: u64,
        /// Bytes still required to satisfy the read.
        needed: usize,
    },

    /// Returned when a record holds more data than the layout requires.
    /// Records are atomic, so the surplus cannot be left for a later read.
    #[error("record {record} is {found} bytes, expected {expected}")]
    RecordLength {
        /// Index of the oversized record.
        record: u64,
        /// Payload size the layout requires, in bytes.
        expected: usize,
        /// Payload size the marker declares, in bytes.
        found: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_truncated() {
        let err = StreamError::Truncated {
            record: 3,
            needed: 48,
        };
        assert_eq!(
            err.to_string(),
            "stream truncated at record 3: 48 more bytes required"
        );
    }

    #[test]
    fn error_marker_mismatch() {
        let err = StreamError::MarkerMismatch {
            record: 0,
            head: 24,
            tail: 12,
        };
        assert_eq!(err.to_string(), "record 0 marker mismatch: head 24, tail 12");
    }

    #[test]
    fn error_record_length() {
        let err = StreamError::RecordLength {
            record: 1,
            expected: 12,
            found: 16,
        };
        assert_eq!(err.to_string(), "record 1 is 16 bytes, expected 12");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<StreamError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<StreamError>();
    }
}
