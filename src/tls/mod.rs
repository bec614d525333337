//! TLS support utilities
//!
//! This module holds the pieces a TLS connection layer needs around OpenSSL
//! but that do not belong to the handshake or I/O path itself.
//!
//! # Architecture
//!
//! - `ex_data` allocates process-wide ex_data indexes on `SSL_CTX`, `RSA` and
//!   `SSL_SESSION`, and owns the dup/free callbacks that keep a `String`
//!   attached to a session alive across `SSL_SESSION_dup`
//! - `resume` classifies how a session was established
//! - `exception` carries diagnostic context for a failed TLS operation
//! - `cert` parses certificates and extracts CN / SAN identity fields
//!
//! # Examples
//!
//! ```
//! use sslutil::tls::{SslErrorKind, SslException, TlsError};
//! use std::time::Duration;
//!
//! fn read_hello() -> Result<(), TlsError> {
//!     let e = SslException::new(SslErrorKind::Timeout, Duration::from_millis(250), 1024);
//!     Err(e.into())
//! }
//!
//! match read_hello() {
//!     Err(TlsError::Ssl(e)) => assert_eq!(e.error(), SslErrorKind::Timeout),
//!     _ => unreachable!(),
//! }
//! ```

pub mod cert;
pub mod error;
pub mod ex_data;
pub mod exception;
pub mod resume;

pub use cert::{
    common_name, parse_certificate, parse_certificate_der, subject_alt_names, try_common_name,
    try_subject_alt_names, CertNames,
};
pub use error::TlsError;
pub use ex_data::{ensure_index, ExDataKind, ExIndex, ExIndexRegistry, ExIndexSlot, OpensslExIndexRegistry};
pub use exception::{SslErrorKind, SslException};
pub use resume::{classify, SessionResumeSource, SslResumeState};

/// Result type for TLS utility operations
pub type Result<T> = std::result::Result<T, TlsError>;
