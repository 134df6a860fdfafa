/// Writes the low `len` bytes of `value` big-endian into `array[start_index..start_index + len]`.
/// Bytes beyond the width of a `u64` are written as zero.
pub(crate) fn set_uint_at(array: &mut [u8], value: u64, start_index: usize, len: usize) {
    let mut value = value;
    for byte in array[start_index..start_index + len].iter_mut().rev() {
        *byte = value as u8;
        value = value.checked_shr(8).unwrap_or(0);
    }
}

/// Reads `bytes` as a big-endian unsigned integer. At most 8 bytes are meaningful.
pub(crate) fn bytes_to_u64(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(0_u64, |acc, &b| (acc << 8) | u64::from(b))
}

pub(crate) fn set_byte_at(array: &mut [u8], value: u8, index: usize) {
    array[index] = value;
}

/// A mask keeping the low `bits` bits of a `u64`.
pub(crate) fn low_bits_mask(bits: usize) -> u64 {
    if bits == 0 {
        0
    } else if bits >= 64 {
        !0_u64
    } else {
        (!0_u64) >> (64 - bits)
    }
}
