//! Subnet sizing.
//!
//! A block must hold the requested hosts plus one address for the network
//! identifier, rounded up to the next power of two.

use super::types::SubnetSizing;
use super::AllocationError;
use std::net::Ipv4Addr;

/// Compute the smallest power-of-two block for `hosts`.
///
/// The block size is `2^ceil(log2(hosts + 1))` and the prefix length is
/// `32 - log2(block_size)`.
///
/// # Errors
///
/// Returns [`AllocationError::InvalidHostCount`] when `hosts` is zero or the
/// block would be larger than the whole IPv4 space.
///
/// # Examples
///
/// ```
/// use vlsmgen::ip::size_for_hosts;
///
/// let sizing = size_for_hosts(30).unwrap();
/// assert_eq!(sizing.block_size, 32);
/// assert_eq!(sizing.prefix_len, 27);
/// assert_eq!(sizing.mask.to_string(), "255.255.255.224");
/// ```
pub fn size_for_hosts(hosts: u64) -> Result<SubnetSizing, AllocationError> {
    if hosts == 0 {
        return Err(AllocationError::InvalidHostCount { hosts });
    }

    let block_size = hosts
        .checked_add(1)
        .and_then(u64::checked_next_power_of_two)
        .ok_or(AllocationError::InvalidHostCount { hosts })?;
    let exponent = block_size.trailing_zeros();
    if exponent > 32 {
        return Err(AllocationError::InvalidHostCount { hosts });
    }

    // A /0 shifts every bit out, leaving an all-zero mask
    let mask = u32::MAX.checked_shl(exponent).unwrap_or(0);

    Ok(SubnetSizing {
        prefix_len: (32 - exponent) as u8,
        block_size,
        mask: Ipv4Addr::from(mask),
    })
}
