//! Certificate parsing and identity fields
//!
//! This module parses raw certificate bytes and extracts the Common Name and
//! the DNS Subject Alternative Names from X.509 certificates.
//!
//! The plain getters collapse "field missing" and "field unreadable" into
//! the same empty result. Use the `try_` variants to tell them apart.

use std::{slice, str};

use foreign_types::ForeignTypeRef;
use log::debug;
use openssl::nid::Nid;
use openssl::x509::{GeneralNameRef, X509Ref, X509};
use openssl_sys as ffi;

use super::{Result, TlsError};

/// Parse a PEM encoded certificate
///
/// Returns `None` if `data` does not hold a valid certificate.
pub fn parse_certificate(data: &[u8]) -> Option<X509> {
    match X509::from_pem(data) {
        Ok(cert) => Some(cert),
        Err(e) => {
            debug!("failed to parse PEM certificate: {e}");
            None
        }
    }
}

/// Parse a DER encoded certificate
pub fn parse_certificate_der(data: &[u8]) -> Option<X509> {
    match X509::from_der(data) {
        Ok(cert) => Some(cert),
        Err(e) => {
            debug!("failed to parse DER certificate: {e}");
            None
        }
    }
}

/// Get the subject Common Name
pub fn common_name(cert: &X509Ref) -> Option<String> {
    try_common_name(cert).unwrap_or_else(|e| {
        debug!("{e}");
        None
    })
}

/// Get the subject Common Name, reporting unreadable values as errors
///
/// `Ok(None)` means the subject has no CN entry.
pub fn try_common_name(cert: &X509Ref) -> Result<Option<String>> {
    let Some(entry) = cert.subject_name().entries_by_nid(Nid::COMMONNAME).next() else {
        return Ok(None);
    };
    let cn = entry
        .data()
        .as_utf8()
        .map_err(|e| TlsError::Certificate(format!("invalid common name: {e}")))?;
    Ok(Some(cn.to_string()))
}

/// Get the DNS Subject Alternative Names, in certificate order
pub fn subject_alt_names(cert: &X509Ref) -> Vec<String> {
    try_subject_alt_names(cert).unwrap_or_else(|e| {
        debug!("{e}");
        Vec::new()
    })
}

/// Get the DNS Subject Alternative Names, reporting unusable values as errors
///
/// A certificate without the extension yields an empty list. Non-DNS
/// entries (IP addresses, emails, URIs) are skipped. A DNS entry that is not
/// valid UTF-8 or carries a NUL byte is an error.
pub fn try_subject_alt_names(cert: &X509Ref) -> Result<Vec<String>> {
    match cert.subject_alt_names() {
        Some(names) => names.iter().filter_map(raw_dns_name).map(dns_name).collect(),
        None => Ok(Vec::new()),
    }
}

/// Raw bytes of a DNS-typed entry
///
/// `GeneralNameRef::dnsname` hides entries that fail UTF-8 conversion, so
/// the type tag is read directly.
fn raw_dns_name(name: &GeneralNameRef) -> Option<&[u8]> {
    unsafe {
        let name = &*name.as_ptr();
        if name.type_ != ffi::GEN_DNS {
            return None;
        }
        #[cfg(not(boringssl))]
        let d = name.d;
        #[cfg(boringssl)]
        let d = name.d.ptr;
        let value = d as *mut ffi::ASN1_STRING;
        let data = ffi::ASN1_STRING_get0_data(value);
        let len = usize::try_from(ffi::ASN1_STRING_length(value)).unwrap_or(0);
        if data.is_null() || len == 0 {
            return Some(&[]);
        }
        Some(slice::from_raw_parts(data, len))
    }
}

fn dns_name(raw: &[u8]) -> Result<String> {
    let name = str::from_utf8(raw).map_err(|e| {
        TlsError::Certificate(format!(
            "invalid subject alternative name {}: {e}",
            raw.escape_ascii()
        ))
    })?;
    // an embedded NUL would truncate the name for C consumers
    if name.contains('\0') {
        return Err(TlsError::Certificate(format!(
            "NUL byte in subject alternative name {name:?}"
        )));
    }
    Ok(name.to_string())
}

/// Identity fields of a certificate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertNames {
    /// Subject Common Name
    pub common_name: Option<String>,
    /// DNS Subject Alternative Names
    pub subject_alt_names: Vec<String>,
}

impl CertNames {
    pub fn from_x509(cert: &X509Ref) -> Self {
        CertNames {
            common_name: common_name(cert),
            subject_alt_names: subject_alt_names(cert),
        }
    }

    /// All names the certificate claims, CN first
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.common_name
            .as_deref()
            .into_iter()
            .chain(self.subject_alt_names.iter().map(String::as_str))
    }
}
