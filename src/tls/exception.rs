//! TLS operation failures
//!
//! `SslException` is the value a connection layer raises when a TLS
//! operation fails. It only carries diagnostic context: which kind of
//! failure, how long the operation had been running and how many bytes were
//! read before it stopped.

use std::fmt;
use std::time::Duration;

/// Kind of TLS failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum SslErrorKind {
    #[default]
    NoError = 0,
    /// The operation timed out
    Timeout = 1,
    /// The connection was dropped by the peer or the transport
    Dropped = 2,
}

impl SslErrorKind {
    /// Numeric code, as rendered in the exception message
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SslErrorKind::NoError => "NO_ERROR",
            SslErrorKind::Timeout => "TIMEOUT",
            SslErrorKind::Dropped => "DROPPED",
        }
    }
}

impl fmt::Display for SslErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed TLS operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "SSL error: {}; Elapsed time: {} ms; Bytes read: {}",
    .error.code(),
    .latency.as_millis(),
    .bytes_read
)]
pub struct SslException {
    error: SslErrorKind,
    latency: Duration,
    bytes_read: u64,
}

impl SslException {
    pub fn new(error: SslErrorKind, latency: Duration, bytes_read: u64) -> Self {
        SslException {
            error,
            latency,
            bytes_read,
        }
    }

    pub fn error(&self) -> SslErrorKind {
        self.error
    }

    /// Time the operation had been running when it failed
    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let e = SslException::new(SslErrorKind::Timeout, Duration::from_millis(250), 1024);
        assert_eq!(e.error(), SslErrorKind::Timeout);
        assert_eq!(e.latency(), Duration::from_millis(250));
        assert_eq!(e.bytes_read(), 1024);
    }

    #[test]
    fn test_display() {
        let e = SslException::new(SslErrorKind::Timeout, Duration::from_millis(250), 1024);
        assert_eq!(
            e.to_string(),
            "SSL error: 1; Elapsed time: 250 ms; Bytes read: 1024"
        );

        let e = SslException::new(SslErrorKind::Dropped, Duration::from_secs(3), 0);
        assert_eq!(e.to_string(), "SSL error: 2; Elapsed time: 3000 ms; Bytes read: 0");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(SslErrorKind::default(), SslErrorKind::NoError);
        assert_eq!(SslErrorKind::NoError.code(), 0);
        assert_eq!(SslErrorKind::Dropped.to_string(), "DROPPED");
    }
}
