//! Fixed-length little-endian integer encoding.

/// Appends `value` to `dst` as 4 little-endian bytes.
#[inline]
pub fn put_fixed_32(dst: &mut Vec<u8>, value: u32) {
    dst.extend_from_slice(&value.to_le_bytes());
}

/// Decodes the first 4 bytes of `src` as a little-endian `u32`.
///
/// # Panics
///
/// Panics if `src` is shorter than 4 bytes.
#[inline]
pub fn decode_fixed_32(src: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&src[..4]);
    u32::from_le_bytes(buf)
}
