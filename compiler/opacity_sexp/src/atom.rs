//! Integer view of atom bytes.
//!
//! Atoms store integers as big-endian two's complement with no redundant
//! sign-extension bytes. Zero is the empty atom.

/// Returns `true` if a leading `head` byte only repeats the sign of `next`.
#[inline]
fn is_redundant_sign_byte(head: u8, next: u8) -> bool {
    (head == 0x00 && next & 0x80 == 0) || (head == 0xff && next & 0x80 != 0)
}

/// Encode `value` as the shortest big-endian two's complement byte string.
pub fn int_to_bytes(value: i64) -> Vec<u8> {
    if value == 0 {
        return Vec::new();
    }
    let bytes = value.to_be_bytes();
    let mut start = 0;
    while start + 1 < bytes.len() && is_redundant_sign_byte(bytes[start], bytes[start + 1]) {
        start += 1;
    }
    bytes[start..].to_vec()
}

/// Decode atom bytes as a signed integer.
///
/// Non-minimal encodings are accepted. Returns `None` when the value does
/// not fit in an `i64`.
pub fn bytes_to_int(bytes: &[u8]) -> Option<i64> {
    let mut bytes = bytes;
    while bytes.len() > 8 {
        if !is_redundant_sign_byte(bytes[0], bytes[1]) {
            return None;
        }
        bytes = &bytes[1..];
    }
    let Some(&head) = bytes.first() else {
        return Some(0);
    };
    let mut buf = if head & 0x80 == 0 { [0x00; 8] } else { [0xff; 8] };
    buf[8 - bytes.len()..].copy_from_slice(bytes);
    Some(i64::from_be_bytes(buf))
}

/// An atom is truthy when its integer value is nonzero.
///
/// Checked on the bytes directly so atoms too wide for `i64` still coerce.
#[inline]
pub fn is_truthy_bytes(bytes: &[u8]) -> bool {
    bytes.iter().any(|&b| b != 0)
}
