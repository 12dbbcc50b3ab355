//! Sequential subnet allocation.
//!
//! The allocator owns the running cursor into the base address space. Each
//! call carves one block sized by [`size_for_hosts`](super::size_for_hosts)
//! and moves the cursor forward; the cursor is never rewound.

use super::types::{Allocation, SubnetSizing};
use super::{describe_position, AllocationError, IPV4_SPACE};
use ipnetwork::Ipv4Network;
use log::debug;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// How a block is placed relative to an unaligned cursor
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// The block is the network containing the cursor, and the cursor
    /// advances by the block size from its unaligned position.
    #[default]
    NonStrict,
    /// The cursor is rounded up to the block boundary first, then moved to
    /// the end of the block.
    Strict,
}

/// Carves successive blocks out of a single IPv4 space
#[derive(Debug, Clone)]
pub struct SubnetAllocator {
    /// Next unused address; may equal `IPV4_SPACE` once the top is consumed
    cursor: u64,
    alignment: Alignment,
}

impl SubnetAllocator {
    pub fn new(base: Ipv4Addr, alignment: Alignment) -> Self {
        SubnetAllocator {
            cursor: u64::from(u32::from(base)),
            alignment,
        }
    }

    /// Current cursor as an integer offset into the IPv4 space
    pub fn position(&self) -> u64 {
        self.cursor
    }

    /// Current cursor as an address, `None` once the space is used up
    pub fn next_address(&self) -> Option<Ipv4Addr> {
        u32::try_from(self.cursor).ok().map(Ipv4Addr::from)
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Carve the next block for `sizing` and advance the cursor past it.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::AddressSpaceExhausted`] when the block
    /// would run past `255.255.255.255`. The cursor is left untouched.
    pub fn allocate(&mut self, sizing: &SubnetSizing) -> Result<Allocation, AllocationError> {
        let block_size = sizing.block_size;

        let (start, next) = match self.alignment {
            Alignment::NonStrict => (self.cursor & !(block_size - 1), self.cursor + block_size),
            Alignment::Strict => {
                let start = self.cursor.div_ceil(block_size) * block_size;
                (start, start + block_size)
            }
        };

        if next > IPV4_SPACE {
            return Err(AllocationError::AddressSpaceExhausted {
                cursor: describe_position(self.cursor),
                block_size,
            });
        }

        // start + block_size <= IPV4_SPACE, so start fits in 32 bits
        let network_u32 = start as u32;
        let network = Ipv4Network::new(Ipv4Addr::from(network_u32), sizing.prefix_len)?;

        // A /31 has no separate network identifier (RFC 3021)
        let (first_usable, second_usable) = if block_size == 2 {
            (network_u32, network_u32 + 1)
        } else {
            (network_u32 + 1, network_u32 + 2)
        };

        debug!(
            "Carved {}/{} ({} addresses), cursor {} -> {}",
            network.network(),
            sizing.prefix_len,
            block_size,
            describe_position(self.cursor),
            describe_position(next)
        );
        self.cursor = next;

        Ok(Allocation {
            network,
            first_usable: Ipv4Addr::from(first_usable),
            second_usable: Ipv4Addr::from(second_usable),
            block_size,
        })
    }
}
