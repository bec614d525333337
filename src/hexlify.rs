//! Binary to hex conversion
//!
//! Encoding is always lowercase with two characters per byte and no
//! separators. Downstream log pipelines compare these strings verbatim.

use std::mem;

/// Encode `binary` as a lowercase hex string
pub fn hexlify<T: AsRef<[u8]>>(binary: T) -> String {
    hex::encode(binary)
}

/// Encode `binary` into `out`, replacing its previous content
///
/// Returns the encoded content borrowed from `out`. The encoding is written
/// straight into the buffer's storage, so a buffer reused across calls only
/// allocates when it has to grow.
pub fn hexlify_into<T: AsRef<[u8]>>(binary: T, out: &mut String) -> &str {
    let binary = binary.as_ref();
    let mut buf = mem::take(out).into_bytes();
    buf.clear();
    buf.resize(binary.len() * 2, 0);
    // encode_to_slice only fails on a length mismatch
    if hex::encode_to_slice(binary, &mut buf).is_ok() {
        if let Ok(encoded) = String::from_utf8(buf) {
            *out = encoded;
        }
    }
    out.as_str()
}

/// Decode a hex string (either case) back to bytes
pub fn unhexlify<T: AsRef<[u8]>>(encoded: T) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(encoded)
}
