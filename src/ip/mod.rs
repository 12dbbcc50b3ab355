//! IPv4 subnet sizing and sequential allocation.
//!
//! This module turns per-row host counts into VLSM blocks carved one after
//! another out of a single base address space. Sizing is a pure function of
//! the host count; allocation threads an explicit cursor owned by the
//! [`SubnetAllocator`].

pub mod allocator;
pub mod registry;
pub mod sizer;
pub mod types;

use std::net::Ipv4Addr;

// Re-export commonly used types
pub use allocator::{Alignment, SubnetAllocator};
pub use registry::{AllocationRecord, AllocationRegistry};
pub use sizer::size_for_hosts;
pub use types::{Allocation, SubnetSizing};

/// Number of addresses in the whole IPv4 space.
pub const IPV4_SPACE: u64 = 1 << 32;

/// Failures raised while sizing or carving a subnet
#[derive(Debug, thiserror::Error)]
pub enum AllocationError {
    #[error("invalid host count {hosts}: a subnet needs at least 1 host and must fit in IPv4")]
    InvalidHostCount { hosts: u64 },

    #[error("address space exhausted: a block of {block_size} addresses at {cursor} runs past 255.255.255.255")]
    AddressSpaceExhausted { cursor: String, block_size: u64 },

    #[error(transparent)]
    Network(#[from] ipnetwork::IpNetworkError),
}

/// Render a cursor position, which may sit one past the last address
pub(crate) fn describe_position(position: u64) -> String {
    match u32::try_from(position) {
        Ok(value) => Ipv4Addr::from(value).to_string(),
        Err(_) => "end of address space".to_string(),
    }
}
