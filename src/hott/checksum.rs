//! # HoTT Checksum
//!
//! 8-bit additive parity closing every HoTT reply.
//!
//! The checksum is the sum of all preceding packet bytes, accumulated in 16
//! bits and truncated to the low byte. Despite the "CRC" label some receiver
//! documentation uses, there is no polynomial.

/// Calculate the HoTT checksum over `data`
///
/// # Arguments
///
/// * `data` - Every packet byte before the checksum (start byte through end byte)
///
/// # Returns
///
/// * `u8` - Low byte of the sum of `data`
///
/// # Examples
///
/// ```
/// use hott_responder::hott::checksum::checksum;
///
/// assert_eq!(checksum(&[0x7C, 0x89, 0x00, 0x90]), 0x95);
/// ```
pub fn checksum(data: &[u8]) -> u8 {
    let sum = data
        .iter()
        .fold(0u16, |acc, &byte| acc.wrapping_add(u16::from(byte)));

    (sum & 0xFF) as u8
}
