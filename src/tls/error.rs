//! TLS utility errors

use super::ex_data::ExDataKind;
use super::exception::SslException;

/// TLS utility errors
#[derive(Debug, thiserror::Error)]
pub enum TlsError {
    #[error("OpenSSL error: {0}")]
    OpenSsl(#[from] openssl::error::ErrorStack),

    /// The registration primitive returned an invalid index
    #[error("Failed to allocate {0} ex_data index")]
    ExIndexAllocation(ExDataKind),

    #[error("ex_data slot kind mismatch: expected {expected}, found {found}")]
    ExIndexKindMismatch {
        expected: ExDataKind,
        found: ExDataKind,
    },

    #[error("Certificate error: {0}")]
    Certificate(String),

    #[error(transparent)]
    Ssl(#[from] SslException),
}
