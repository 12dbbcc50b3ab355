//! Subnet sizing and allocation value types.

use ipnetwork::Ipv4Network;
use std::net::Ipv4Addr;

/// Size of the smallest block able to serve a host count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubnetSizing {
    /// Number of leading one-bits in the mask (0-32)
    pub prefix_len: u8,
    /// Addresses in the block, always a power of two
    pub block_size: u64,
    /// Dotted-quad mask for `prefix_len`
    pub mask: Ipv4Addr,
}

impl SubnetSizing {
    /// Host bits of the block, `log2(block_size)`
    pub fn exponent(&self) -> u32 {
        32 - u32::from(self.prefix_len)
    }
}

/// One block carved out of the base address space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub network: Ipv4Network,
    pub first_usable: Ipv4Addr,
    pub second_usable: Ipv4Addr,
    pub block_size: u64,
}

impl Allocation {
    /// Base address of the block
    pub fn network_address(&self) -> Ipv4Addr {
        self.network.network()
    }

    pub fn mask(&self) -> Ipv4Addr {
        self.network.mask()
    }

    pub fn prefix_len(&self) -> u8 {
        self.network.prefix()
    }

    /// Half-open `[start, end)` range of the block as integers
    pub fn range(&self) -> (u64, u64) {
        let start = u64::from(u32::from(self.network_address()));
        (start, start + self.block_size)
    }

    /// Whether two blocks share at least one address
    pub fn overlaps(&self, other: &Allocation) -> bool {
        let (a_start, a_end) = self.range();
        let (b_start, b_end) = other.range();
        a_start < b_end && b_start < a_end
    }
}
