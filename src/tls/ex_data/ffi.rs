//! OpenSSL ex_data declarations
//!
//! Only what this crate calls is declared here. The shapes differ between
//! BoringSSL and the OpenSSL family, see `build.rs` for the cfg flags.

#![allow(non_camel_case_types)]

use libc::{c_int, c_long, c_void};
use openssl_sys::SSL_SESSION;

pub enum CRYPTO_EX_DATA {}

// the dup callback receives the address of the data pointer on every
// variant, only the declared type differs
#[cfg(any(boringssl, ossl300))]
pub type DupFromD = *mut *mut c_void;
#[cfg(not(any(boringssl, ossl300)))]
pub type DupFromD = *mut c_void;

pub type CRYPTO_EX_dup = unsafe extern "C" fn(
    to: *mut CRYPTO_EX_DATA,
    from: *const CRYPTO_EX_DATA,
    from_d: DupFromD,
    idx: c_int,
    argl: c_long,
    argp: *mut c_void,
) -> c_int;

pub type CRYPTO_EX_free = unsafe extern "C" fn(
    parent: *mut c_void,
    ptr: *mut c_void,
    ad: *mut CRYPTO_EX_DATA,
    idx: c_int,
    argl: c_long,
    argp: *mut c_void,
);

#[cfg(not(boringssl))]
pub type CRYPTO_EX_new = CRYPTO_EX_free;

// LibreSSL renumbered its classes to match OpenSSL 1.1 in 3.8.1
#[cfg(any(ossl110, libressl381))]
mod class {
    use libc::c_int;

    pub const CRYPTO_EX_INDEX_SSL_CTX: c_int = 1;
    pub const CRYPTO_EX_INDEX_SSL_SESSION: c_int = 2;
    pub const CRYPTO_EX_INDEX_RSA: c_int = 9;
}
#[cfg(all(libressl, not(libressl381)))]
mod class {
    use libc::c_int;

    pub const CRYPTO_EX_INDEX_SSL_CTX: c_int = 2;
    pub const CRYPTO_EX_INDEX_SSL_SESSION: c_int = 3;
    pub const CRYPTO_EX_INDEX_RSA: c_int = 6;
}
#[cfg(not(boringssl))]
pub use class::*;

extern "C" {
    #[cfg(not(boringssl))]
    pub fn CRYPTO_get_ex_new_index(
        class_index: c_int,
        argl: c_long,
        argp: *mut c_void,
        new_func: Option<CRYPTO_EX_new>,
        dup_func: Option<CRYPTO_EX_dup>,
        free_func: Option<CRYPTO_EX_free>,
    ) -> c_int;

    #[cfg(boringssl)]
    pub fn SSL_CTX_get_ex_new_index(
        argl: c_long,
        argp: *mut c_void,
        unused: *mut c_int,
        dup_unused: Option<CRYPTO_EX_dup>,
        free_func: Option<CRYPTO_EX_free>,
    ) -> c_int;
    #[cfg(boringssl)]
    pub fn RSA_get_ex_new_index(
        argl: c_long,
        argp: *mut c_void,
        unused: *mut c_int,
        dup_unused: Option<CRYPTO_EX_dup>,
        free_func: Option<CRYPTO_EX_free>,
    ) -> c_int;
    #[cfg(boringssl)]
    pub fn SSL_SESSION_get_ex_new_index(
        argl: c_long,
        argp: *mut c_void,
        unused: *mut c_int,
        dup_unused: Option<CRYPTO_EX_dup>,
        free_func: Option<CRYPTO_EX_free>,
    ) -> c_int;

    pub fn SSL_SESSION_set_ex_data(s: *mut SSL_SESSION, idx: c_int, arg: *mut c_void) -> c_int;
    pub fn SSL_SESSION_get_ex_data(s: *const SSL_SESSION, idx: c_int) -> *mut c_void;

    #[cfg(ossl111)]
    pub fn SSL_SESSION_dup(src: *const SSL_SESSION) -> *mut SSL_SESSION;
    #[cfg(all(test, ossl111))]
    pub fn SSL_SESSION_new() -> *mut SSL_SESSION;
}
