//! ex_data index allocation
//!
//! OpenSSL lets applications attach arbitrary data to its objects under an
//! integer index that has to be allocated once per process for each object
//! class. [`ExIndexSlot`] holds one such index and allocates it lazily, at
//! most once, no matter how many threads race for it.
//!
//! ```
//! use sslutil::tls::ExIndexSlot;
//!
//! static CTX_INDEX: ExIndexSlot = ExIndexSlot::ssl_context();
//!
//! let index = CTX_INDEX.ensure().unwrap();
//! assert_eq!(CTX_INDEX.get(), Some(index));
//! assert!(index.as_raw() >= 0);
//! ```

use std::fmt;
use std::ptr;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Mutex, PoisonError};

use libc::c_int;
use log::{debug, error};

use super::{Result, TlsError};

mod ffi;
pub mod string;

/// Shared by every slot, allocation happens at most once per slot
static EX_INDEX_LOCK: Mutex<()> = Mutex::new(());

const UNSET: c_int = -1;

/// OpenSSL object class an ex_data index belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExDataKind {
    /// `SSL_CTX`
    Context,
    /// `RSA`
    AsymmetricKey,
    /// `SSL_SESSION`, carrying an owned `String`
    Session,
}

impl ExDataKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExDataKind::Context => "SSL_CTX",
            ExDataKind::AsymmetricKey => "RSA",
            ExDataKind::Session => "SSL_SESSION",
        }
    }
}

impl fmt::Display for ExDataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An allocated ex_data index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExIndex(c_int);

impl ExIndex {
    pub fn as_raw(self) -> c_int {
        self.0
    }
}

/// The ex_data registration primitive
pub trait ExIndexRegistry {
    /// Register a new index for `kind`, returning a negative value on failure
    fn register(&self, kind: ExDataKind) -> c_int;
}

/// Registers indexes with the linked OpenSSL library
///
/// `Session` indexes are registered together with the string dup/free
/// callbacks from [`string`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OpensslExIndexRegistry;

impl ExIndexRegistry for OpensslExIndexRegistry {
    #[cfg(not(boringssl))]
    fn register(&self, kind: ExDataKind) -> c_int {
        let (class_index, dup_func, free_func) = match kind {
            ExDataKind::Context => (ffi::CRYPTO_EX_INDEX_SSL_CTX, None, None),
            ExDataKind::AsymmetricKey => (ffi::CRYPTO_EX_INDEX_RSA, None, None),
            ExDataKind::Session => (
                ffi::CRYPTO_EX_INDEX_SSL_SESSION,
                Some(string::ex_data_string_dup as ffi::CRYPTO_EX_dup),
                Some(string::ex_data_string_free as ffi::CRYPTO_EX_free),
            ),
        };
        unsafe {
            ffi::CRYPTO_get_ex_new_index(class_index, 0, ptr::null_mut(), None, dup_func, free_func)
        }
    }

    #[cfg(boringssl)]
    fn register(&self, kind: ExDataKind) -> c_int {
        unsafe {
            match kind {
                ExDataKind::Context => {
                    ffi::SSL_CTX_get_ex_new_index(0, ptr::null_mut(), ptr::null_mut(), None, None)
                }
                ExDataKind::AsymmetricKey => {
                    ffi::RSA_get_ex_new_index(0, ptr::null_mut(), ptr::null_mut(), None, None)
                }
                ExDataKind::Session => ffi::SSL_SESSION_get_ex_new_index(
                    0,
                    ptr::null_mut(),
                    ptr::null_mut(),
                    Some(string::ex_data_string_dup as ffi::CRYPTO_EX_dup),
                    Some(string::ex_data_string_free as ffi::CRYPTO_EX_free),
                ),
            }
        }
    }
}

/// Process-wide storage for one lazily allocated ex_data index
///
/// Meant to live in a `static`. Once allocated the index never changes.
#[derive(Debug)]
pub struct ExIndexSlot {
    kind: ExDataKind,
    index: AtomicI32,
}

impl ExIndexSlot {
    pub const fn new(kind: ExDataKind) -> Self {
        ExIndexSlot {
            kind,
            index: AtomicI32::new(UNSET),
        }
    }

    pub const fn ssl_context() -> Self {
        Self::new(ExDataKind::Context)
    }

    pub const fn rsa() -> Self {
        Self::new(ExDataKind::AsymmetricKey)
    }

    /// Slot for an index storing a `String` on `SSL_SESSION`
    pub const fn ssl_session_string() -> Self {
        Self::new(ExDataKind::Session)
    }

    pub fn kind(&self) -> ExDataKind {
        self.kind
    }

    /// The allocated index, if any
    pub fn get(&self) -> Option<ExIndex> {
        let index = self.index.load(Ordering::Acquire);
        (index >= 0).then_some(ExIndex(index))
    }

    /// Get the index, allocating it with OpenSSL on first use
    pub fn ensure(&self) -> Result<ExIndex> {
        self.ensure_with(&OpensslExIndexRegistry)
    }

    /// Get the index, allocating it with `registry` on first use
    ///
    /// The registry is called at most once per slot across all threads. A
    /// failed registration leaves the slot unset.
    pub fn ensure_with<R: ExIndexRegistry + ?Sized>(&self, registry: &R) -> Result<ExIndex> {
        if let Some(index) = self.get() {
            return Ok(index);
        }

        let _guard = EX_INDEX_LOCK
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(index) = self.get() {
            return Ok(index);
        }

        let index = registry.register(self.kind);
        if index < 0 {
            error!("failed to allocate {} ex_data index: got {index}", self.kind);
            return Err(TlsError::ExIndexAllocation(self.kind));
        }
        self.index.store(index, Ordering::Release);
        debug!("allocated {} ex_data index {index}", self.kind);
        Ok(ExIndex(index))
    }

    pub(crate) fn ensure_kind(&self, expected: ExDataKind) -> Result<ExIndex> {
        self.check_kind(expected)?;
        self.ensure()
    }

    pub(crate) fn check_kind(&self, expected: ExDataKind) -> Result<()> {
        if self.kind != expected {
            return Err(TlsError::ExIndexKindMismatch {
                expected,
                found: self.kind,
            });
        }
        Ok(())
    }
}

/// Make sure `slot` holds an allocated index for `kind`
pub fn ensure_index(kind: ExDataKind, slot: &ExIndexSlot) -> Result<ExIndex> {
    slot.ensure_kind(kind)
}
