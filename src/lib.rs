//! sslutil - TLS support utilities
//!
//! This crate provides the small utility surface that a TLS connection layer
//! built on OpenSSL leans on: lazily allocated ex_data slots, session resume
//! classification, a structured TLS failure value, certificate identity
//! extraction and hex encoding.
//!
//! # Examples
//!
//! ```
//! use sslutil::hexlify::hexlify;
//! use sslutil::tls::{classify, SslResumeState};
//!
//! assert_eq!(hexlify(b"\xde\xad\xbe\xef"), "deadbeef");
//! assert_eq!(classify(true, false), SslResumeState::ResumeTicket);
//! ```

pub mod hexlify;
pub mod tls;
