//! Command block emitter.
//!
//! Output layout, for each device type in processing order:
//!
//! ```text
//! ## <type>
//! ### <out_device>      preamble
//! <row blocks>          one per row, addresses from the allocator
//! <closing>
//! ```
//!
//! Every block starts with an empty line. Types without a [`BlockState`]
//! only get their `## <type>` heading.

use super::profile::{BlockState, DeviceProfile, DeviceProfiles};
use super::SynthesisError;
use crate::ip::{size_for_hosts, Allocation, AllocationRecord, AllocationRegistry, SubnetAllocator};
use crate::topology::{Group, Row, TypeSection};
use log::{debug, info, warn};

/// Renders command text while carving subnets from one shared allocator
pub struct CommandSynthesizer<'a> {
    profiles: &'a DeviceProfiles,
    allocator: &'a mut SubnetAllocator,
    registry: &'a mut AllocationRegistry,
    output: String,
}

impl<'a> CommandSynthesizer<'a> {
    pub fn new(
        profiles: &'a DeviceProfiles,
        allocator: &'a mut SubnetAllocator,
        registry: &'a mut AllocationRegistry,
    ) -> Self {
        CommandSynthesizer {
            profiles,
            allocator,
            registry,
            output: String::new(),
        }
    }

    /// Emit every section in order and return the concatenated text.
    ///
    /// The first allocation failure aborts the run; no partial text is
    /// returned.
    pub fn synthesize(mut self, sections: &[TypeSection<'_>]) -> Result<String, SynthesisError> {
        for section in sections {
            push_block(&mut self.output, &[format!("## {}", section.device_type)]);

            let Some(state) = BlockState::for_device(section.device_type) else {
                warn!(
                    "No commands for device type '{}', skipping {} rows",
                    section.device_type,
                    section.row_count()
                );
                continue;
            };

            for group in &section.groups {
                self.emit_group(state, group)?;
            }
        }

        info!("Synthesized commands for {} rows", self.registry.len());
        Ok(self.output)
    }

    fn emit_group(&mut self, state: BlockState, group: &Group<'_>) -> Result<(), SynthesisError> {
        let profiles: &'a DeviceProfiles = self.profiles;
        let profile: &DeviceProfile = profiles.for_state(state);
        debug!("Emitting {:?} for device '{}'", state, group.out_device);

        let mut header = Vec::with_capacity(profile.preamble.len() + 1);
        header.push(format!("### {}", group.out_device));
        header.extend(profile.preamble.iter().cloned());
        push_block(&mut self.output, &header);

        for row in &group.rows {
            let allocation = self.allocate(row)?;
            let lines = match state {
                BlockState::SwitchBlock => switch_row(row, &allocation),
                BlockState::RouterBlock => router_row(row, &allocation),
            };
            push_block(&mut self.output, &lines);
        }

        push_block(&mut self.output, &profile.closing);
        Ok(())
    }

    fn allocate(&mut self, row: &Row) -> Result<Allocation, SynthesisError> {
        let wrap = |source| SynthesisError {
            row: row.name.clone(),
            source,
        };

        let sizing = size_for_hosts(row.hosts).map_err(wrap)?;
        let allocation = self.allocator.allocate(&sizing).map_err(wrap)?;

        info!(
            "Allocated {} to '{}' ({} hosts requested)",
            allocation.network, row.name, row.hosts
        );
        self.registry.record(AllocationRecord::new(
            &row.name,
            row.device_type.as_str(),
            &row.out_device,
            row.hosts,
            &allocation,
        ));
        Ok(allocation)
    }
}

/// Append `lines` as one block, preceded by an empty line
fn push_block(output: &mut String, lines: &[String]) {
    output.push('\n');
    for line in lines {
        output.push_str(line);
        output.push('\n');
    }
}

fn interface_lines(port: &str, address: std::net::Ipv4Addr, allocation: &Allocation) -> [String; 4] {
    [
        format!("interface {}", port),
        format!("ip address {} {}", address, allocation.mask()),
        "no shutdown".to_string(),
        "exit".to_string(),
    ]
}

fn rip_network_lines(allocation: &Allocation) -> [String; 3] {
    [
        "router rip".to_string(),
        format!("network {}", allocation.network_address()),
        "exit".to_string(),
    ]
}

fn switch_row(row: &Row, allocation: &Allocation) -> Vec<String> {
    let mut lines = Vec::with_capacity(14);
    lines.extend(interface_lines(&row.out_port, allocation.first_usable, allocation));
    lines.push(String::new());
    lines.push(format!("ip dhcp pool {}", row.name));
    lines.push(format!("network {} {}", allocation.network_address(), allocation.mask()));
    lines.push(format!("default-router {}", allocation.first_usable));
    lines.push("exit".to_string());
    lines.push(String::new());
    lines.extend(rip_network_lines(allocation));
    lines
}

fn router_row(row: &Row, allocation: &Allocation) -> Vec<String> {
    let mut lines = Vec::with_capacity(14);
    lines.extend(interface_lines(&row.out_port, allocation.first_usable, allocation));
    lines.push(String::new());
    lines.extend(interface_lines(&row.in_port, allocation.second_usable, allocation));
    lines.push(String::new());
    lines.extend(rip_network_lines(allocation));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ip::{Alignment, AllocationError};
    use crate::topology::{group_rows, DeviceType};
    use std::net::Ipv4Addr;

    fn run(rows: &[Row], base: Ipv4Addr) -> Result<(String, AllocationRegistry), SynthesisError> {
        let profiles = DeviceProfiles::default();
        let mut allocator = SubnetAllocator::new(base, Alignment::NonStrict);
        let mut registry = AllocationRegistry::new(base);
        let sections = group_rows(rows);
        let text = CommandSynthesizer::new(&profiles, &mut allocator, &mut registry).synthesize(&sections)?;
        Ok((text, registry))
    }

    fn count_lines(text: &str, prefix: &str) -> usize {
        text.lines().filter(|line| line.starts_with(prefix)).count()
    }

    #[test]
    fn test_switch_row_blocks() {
        let rows = vec![Row::new("LAN-A", DeviceType::Switch, "SW1", "fa0/1", "", 20)];
        let (text, _) = run(&rows, Ipv4Addr::new(10, 0, 0, 0)).unwrap();

        assert_eq!(count_lines(&text, "interface "), 1);
        assert_eq!(count_lines(&text, "ip dhcp pool "), 1);
        assert_eq!(count_lines(&text, "network 10.0.0.0"), 2);
        assert_eq!(count_lines(&text, "network 10.0.0.0 255.255.255.224"), 1);
        assert!(text.contains("ip dhcp pool LAN-A\n"));
        assert!(text.contains("default-router 10.0.0.1\n"));
    }

    #[test]
    fn test_router_row_blocks() {
        let rows = vec![Row::new("WAN-1", DeviceType::Router, "R1", "s0/0/0", "s0/0/1", 2)];
        let (text, _) = run(&rows, Ipv4Addr::new(10, 0, 0, 0)).unwrap();

        assert_eq!(count_lines(&text, "interface "), 2);
        assert_eq!(count_lines(&text, "ip dhcp pool "), 0);
        assert_eq!(count_lines(&text, "network "), 1);
        assert!(text.contains("interface s0/0/0\nip address 10.0.0.1 255.255.255.252\n"));
        assert!(text.contains("interface s0/0/1\nip address 10.0.0.2 255.255.255.252\n"));
        assert!(text.contains("default-information originate\n"));
    }

    #[test]
    fn test_exact_output() {
        let rows = vec![
            Row::new("RT-LINK", DeviceType::Router, "RT1", "g0/0", "g0/1", 2),
            Row::new("SW-LAN", DeviceType::Switch, "SW1", "vlan1", "", 2),
        ];
        let (text, registry) = run(&rows, Ipv4Addr::new(200, 20, 10, 0)).unwrap();

        let expected = "
## switch

### SW1
en
conf t

router rip
version 2
no auto-summary
exit

interface vlan1
ip address 200.20.10.1 255.255.255.252
no shutdown
exit

ip dhcp pool SW-LAN
network 200.20.10.0 255.255.255.252
default-router 200.20.10.1
exit

router rip
network 200.20.10.0
exit

exit
exit

## router

### RT1
en
conf t

line con 0
password cisco
login
exit

enable password cisco
service password-encryption
enable secret cisco

banner motd #Authorized personnel only#

interface g0/0
ip address 200.20.10.5 255.255.255.252
no shutdown
exit

interface g0/1
ip address 200.20.10.6 255.255.255.252
no shutdown
exit

router rip
network 200.20.10.4
exit

router rip
default-information originate
exit

exit
exit
";
        assert_eq!(text, expected);
        assert_eq!(registry.find("SW-LAN").unwrap().network, Ipv4Addr::new(200, 20, 10, 0));
        assert_eq!(registry.find("RT-LINK").unwrap().network, Ipv4Addr::new(200, 20, 10, 4));
    }

    #[test]
    fn test_unknown_type_heading_only() {
        let rows = vec![
            Row::new("FW-1", DeviceType::Other("firewall".to_string()), "FW1", "e0", "e1", 10),
            Row::new("LAN", DeviceType::Switch, "SW1", "fa0/1", "", 2),
        ];
        let (text, registry) = run(&rows, Ipv4Addr::new(10, 0, 0, 0)).unwrap();

        assert!(text.ends_with("\n## firewall\n"));
        assert!(!text.contains("FW1"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_cursor_shared_across_groups() {
        let rows = vec![
            Row::new("A", DeviceType::Switch, "SW1", "fa0/1", "", 10),
            Row::new("B", DeviceType::Switch, "SW2", "fa0/1", "", 10),
            Row::new("C", DeviceType::Router, "R1", "s0", "s1", 2),
        ];
        let (_, registry) = run(&rows, Ipv4Addr::new(10, 0, 0, 0)).unwrap();

        let networks: Vec<String> = registry.allocations.iter().map(|r| r.network.to_string()).collect();
        assert_eq!(networks, vec!["10.0.0.0", "10.0.0.16", "10.0.0.32"]);
    }

    #[test]
    fn test_invalid_host_count_names_row() {
        let rows = vec![
            Row::new("OK", DeviceType::Switch, "SW1", "fa0/1", "", 5),
            Row::new("EMPTY", DeviceType::Switch, "SW1", "fa0/2", "", 0),
        ];
        let err = run(&rows, Ipv4Addr::new(10, 0, 0, 0)).unwrap_err();

        assert_eq!(err.row, "EMPTY");
        assert!(matches!(err.kind(), AllocationError::InvalidHostCount { hosts: 0 }));
    }

    #[test]
    fn test_exhaustion_names_row() {
        let rows = vec![Row::new("BIG", DeviceType::Router, "R1", "s0", "s1", 10)];
        let err = run(&rows, Ipv4Addr::new(255, 255, 255, 252)).unwrap_err();

        assert_eq!(err.row, "BIG");
        assert!(matches!(err.kind(), AllocationError::AddressSpaceExhausted { .. }));
    }
}
