//! Certificate parsing and identity extraction integration tests
//!
//! Certificates are generated on the fly so each test controls exactly which
//! identity fields are present.

use openssl::asn1::Asn1Time;
use openssl::bn::BigNum;
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkey::PKey;
use openssl::rsa::Rsa;
use openssl::x509::extension::SubjectAlternativeName;
use openssl::x509::{X509Builder, X509NameBuilder, X509};

use sslutil::hexlify::hexlify;
use sslutil::tls::{
    common_name, parse_certificate, parse_certificate_der, subject_alt_names, CertNames,
};

fn self_signed(cn: &str, dns: &[&str]) -> X509 {
    let key = PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap();

    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_nid(Nid::COUNTRYNAME, "NO").unwrap();
    name.append_entry_by_nid(Nid::COMMONNAME, cn).unwrap();
    let name = name.build();

    let mut builder = X509Builder::new().unwrap();
    builder.set_version(2).unwrap();
    let serial = BigNum::from_u32(42).unwrap().to_asn1_integer().unwrap();
    builder.set_serial_number(&serial).unwrap();
    builder.set_subject_name(&name).unwrap();
    builder.set_issuer_name(&name).unwrap();
    builder.set_pubkey(&key).unwrap();
    builder.set_not_before(&Asn1Time::days_from_now(0).unwrap()).unwrap();
    builder.set_not_after(&Asn1Time::days_from_now(365).unwrap()).unwrap();

    if !dns.is_empty() {
        let mut san = SubjectAlternativeName::new();
        for d in dns {
            san.dns(d);
        }
        let ext = san.build(&builder.x509v3_context(None, None)).unwrap();
        builder.append_extension(ext).unwrap();
    }

    builder.sign(&key, MessageDigest::sha256()).unwrap();
    builder.build()
}

#[test]
fn test_pem_round_trip_names() {
    let cert = self_signed("example.com", &["example.com", "*.example.com"]);
    let pem = cert.to_pem().unwrap();

    let parsed = parse_certificate(&pem).expect("valid PEM");
    assert_eq!(common_name(&parsed).as_deref(), Some("example.com"));
    assert_eq!(subject_alt_names(&parsed), vec!["example.com", "*.example.com"]);
}

#[test]
fn test_well_formed_cert_without_san() {
    let cert = self_signed("internal.example", &[]);
    let parsed = parse_certificate_der(&cert.to_der().unwrap()).unwrap();

    let names = CertNames::from_x509(&parsed);
    assert_eq!(names.common_name.as_deref(), Some("internal.example"));
    assert!(names.subject_alt_names.is_empty());
}

#[test]
fn test_malformed_bytes_yield_no_handle() {
    let cert = self_signed("example.com", &[]);
    let pem = cert.to_pem().unwrap();

    // cut the PEM body in half
    let truncated = &pem[..pem.len() / 2];
    assert!(parse_certificate(truncated).is_none());
    assert!(parse_certificate(b"garbage").is_none());
    assert!(parse_certificate_der(&pem).is_none());
}

#[test]
fn test_fingerprint_hex() {
    let cert = self_signed("example.com", &[]);
    let digest = cert.digest(MessageDigest::sha256()).unwrap();

    let fingerprint = hexlify(&digest);
    assert_eq!(fingerprint.len(), 64);
    assert!(fingerprint.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
}
