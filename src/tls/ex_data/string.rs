//! Owned `String` attached to `SSL_SESSION` ex_data
//!
//! The index is registered with [`ex_data_string_dup`] and
//! [`ex_data_string_free`], so OpenSSL deep-copies the string whenever the
//! session is duplicated and drops it when the session is freed. The helpers
//! below are the only place the boxed string is created or read from Rust.
//!
//! `SslSession` is reference counted, so two owners may hold the same C
//! session while each sees only a shared or a unique Rust reference. Reads
//! therefore hand out copies, and every access to the boxed string goes
//! through one process-wide lock.

#[cfg(ossl111)]
use foreign_types::ForeignType;
use foreign_types::ForeignTypeRef;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use libc::{c_int, c_long, c_void};
use openssl::error::ErrorStack;
#[cfg(ossl111)]
use openssl::ssl::SslSession;
use openssl::ssl::SslSessionRef;

use super::{ffi, ExDataKind, ExIndexSlot};
use crate::tls::Result;

/// Guards the boxed strings of every session against replacement while read
static SESSION_STRING_LOCK: RwLock<()> = RwLock::new(());

fn read_lock() -> RwLockReadGuard<'static, ()> {
    SESSION_STRING_LOCK
        .read()
        .unwrap_or_else(PoisonError::into_inner)
}

fn write_lock() -> RwLockWriteGuard<'static, ()> {
    SESSION_STRING_LOCK
        .write()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Resolves the dup callback's data argument to the address of the data pointer
///
/// Implemented for both declared shapes of that argument so the callback
/// body does not depend on the library variant.
trait DupDataSlot {
    fn data_slot(self) -> *mut *mut c_void;
}

impl DupDataSlot for *mut *mut c_void {
    fn data_slot(self) -> *mut *mut c_void {
        self
    }
}

impl DupDataSlot for *mut c_void {
    fn data_slot(self) -> *mut *mut c_void {
        self.cast()
    }
}

/// ex_data dup callback for a boxed `String`
///
/// Replaces the data pointer seen by the duplicate with a fresh copy, leaving
/// the source's string untouched.
///
/// # Safety
///
/// `from_d` must point to a data pointer that is either null or was produced
/// by `Box::<String>::into_raw`.
pub unsafe extern "C" fn ex_data_string_dup(
    _to: *mut ffi::CRYPTO_EX_DATA,
    _from: *const ffi::CRYPTO_EX_DATA,
    from_d: ffi::DupFromD,
    _idx: c_int,
    _argl: c_long,
    _argp: *mut c_void,
) -> c_int {
    let slot = from_d.data_slot();
    if slot.is_null() {
        return 1;
    }
    if let Some(value) = (*slot).cast::<String>().as_ref() {
        *slot = Box::into_raw(Box::new(value.clone())).cast();
    }
    1
}

/// ex_data free callback for a boxed `String`
///
/// # Safety
///
/// `ptr` must be null or come from `Box::<String>::into_raw`, and must not be
/// used afterwards.
pub unsafe extern "C" fn ex_data_string_free(
    _parent: *mut c_void,
    ptr: *mut c_void,
    _ad: *mut ffi::CRYPTO_EX_DATA,
    _idx: c_int,
    _argl: c_long,
    _argp: *mut c_void,
) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr.cast::<String>()));
    }
}

/// Attach `value` to `session`, replacing and releasing any previous string
///
/// The index in `slot` is allocated on first use.
pub fn set_session_string<S: Into<String>>(
    session: &mut SslSessionRef,
    slot: &ExIndexSlot,
    value: S,
) -> Result<()> {
    let index = slot.ensure_kind(ExDataKind::Session)?.as_raw();
    let data = Box::into_raw(Box::new(value.into()));
    let _guard = write_lock();
    unsafe {
        let old = ffi::SSL_SESSION_get_ex_data(session.as_ptr(), index);
        if ffi::SSL_SESSION_set_ex_data(session.as_ptr(), index, data.cast()) <= 0 {
            drop(Box::from_raw(data));
            return Err(ErrorStack::get().into());
        }
        if !old.is_null() {
            drop(Box::from_raw(old.cast::<String>()));
        }
    }
    Ok(())
}

/// A copy of the string attached to `session`
///
/// Returns `None` if nothing is attached, the index was never allocated or
/// `slot` is not a session slot. The copy stays valid after the session's
/// string is replaced through another handle to the same session.
pub fn session_string(session: &SslSessionRef, slot: &ExIndexSlot) -> Option<String> {
    slot.check_kind(ExDataKind::Session).ok()?;
    let index = slot.get()?.as_raw();
    let _guard = read_lock();
    unsafe {
        let data = ffi::SSL_SESSION_get_ex_data(session.as_ptr(), index).cast::<String>();
        data.as_ref().cloned()
    }
}

/// Detach the string from `session` and hand it back
pub fn take_session_string(session: &mut SslSessionRef, slot: &ExIndexSlot) -> Option<String> {
    slot.check_kind(ExDataKind::Session).ok()?;
    let index = slot.get()?.as_raw();
    let _guard = write_lock();
    unsafe {
        let data = ffi::SSL_SESSION_get_ex_data(session.as_ptr(), index);
        if data.is_null() {
            return None;
        }
        if ffi::SSL_SESSION_set_ex_data(session.as_ptr(), index, std::ptr::null_mut()) <= 0 {
            return None;
        }
        Some(*Box::from_raw(data.cast::<String>()))
    }
}

/// Deep copy of `session`, including its ex_data
#[cfg(ossl111)]
pub fn duplicate_session(session: &SslSessionRef) -> Result<SslSession> {
    // the dup callback reads the source string
    let _guard = read_lock();
    unsafe {
        let dup = ffi::SSL_SESSION_dup(session.as_ptr());
        if dup.is_null() {
            return Err(ErrorStack::get().into());
        }
        Ok(SslSession::from_ptr(dup))
    }
}
