//! Allocation registry.
//!
//! Records every block handed out during a run, keyed by the row that
//! requested it, so the plan can be inspected or written out as JSON.

use super::types::Allocation;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// One row's allocated block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub name: String,
    pub device_type: String,
    pub out_device: String,
    pub hosts: u64,
    pub network: Ipv4Addr,
    pub prefix_len: u8,
    pub mask: Ipv4Addr,
    pub first_usable: Ipv4Addr,
    pub second_usable: Ipv4Addr,
    pub block_size: u64,
}

impl AllocationRecord {
    pub fn new(name: &str, device_type: &str, out_device: &str, hosts: u64, allocation: &Allocation) -> Self {
        AllocationRecord {
            name: name.to_string(),
            device_type: device_type.to_string(),
            out_device: out_device.to_string(),
            hosts,
            network: allocation.network_address(),
            prefix_len: allocation.prefix_len(),
            mask: allocation.mask(),
            first_usable: allocation.first_usable,
            second_usable: allocation.second_usable,
            block_size: allocation.block_size,
        }
    }

    fn range(&self) -> (u64, u64) {
        let start = u64::from(u32::from(self.network));
        (start, start + self.block_size)
    }
}

/// Ordered record of a run's allocations
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AllocationRegistry {
    pub base_address: Option<Ipv4Addr>,
    pub allocations: Vec<AllocationRecord>,
}

impl AllocationRegistry {
    pub fn new(base_address: Ipv4Addr) -> Self {
        AllocationRegistry {
            base_address: Some(base_address),
            allocations: Vec::new(),
        }
    }

    pub fn record(&mut self, record: AllocationRecord) {
        self.allocations.push(record);
    }

    /// Find the allocation made for a row name
    pub fn find(&self, name: &str) -> Option<&AllocationRecord> {
        self.allocations.iter().find(|record| record.name == name)
    }

    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    /// Total addresses consumed by all blocks
    pub fn consumed(&self) -> u64 {
        self.allocations.iter().map(|record| record.block_size).sum()
    }

    /// Row-name pairs whose blocks share addresses
    pub fn overlaps(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::new();
        for (i, a) in self.allocations.iter().enumerate() {
            let (a_start, a_end) = a.range();
            for b in &self.allocations[i + 1..] {
                let (b_start, b_end) = b.range();
                if a_start < b_end && b_start < a_end {
                    pairs.push((a.name.as_str(), b.name.as_str()));
                }
            }
        }
        pairs
    }
}
