#[cfg(test)]
mod generation_tests {
    use std::io::Write;
    use std::net::Ipv4Addr;
    use tempfile::NamedTempFile;

    use vlsmgen::commands::SynthesisError;
    use vlsmgen::config::Config;
    use vlsmgen::config_loader::load_config;
    use vlsmgen::ip::{size_for_hosts, Alignment, AllocationError, SubnetAllocator};
    use vlsmgen::orchestrator::generate_commands;
    use vlsmgen::table_parser::{parse_table, read_table_file};
    use vlsmgen::topology::{group_rows, DeviceType, Row};
    use vlsmgen::utils::validate_rows;

    const CLASS_TABLE: &str = "\
| name     | type   | out_device | out_port | in_port | hosts |
|----------|--------|------------|----------|---------|-------|
| R1-R2    | router | R1         | s0/0/0   | s0/0/1  | 2     |
| LAB      | switch | SW1        | vlan1    |         | 60    |
| R2-R3    | router | R2         | s0/0/1   | s0/0/0  | 2     |
| OFFICE   | switch | SW2        | vlan1    |         | 25    |
| GUEST    | switch | SW1        | vlan2    |         | 10    |
";

    fn generate(rows: &[Row], base: Ipv4Addr) -> Result<String, SynthesisError> {
        generate_commands(rows, base, &Config::default()).map(|generated| generated.text)
    }

    /// Two-row sample: SW1 and RT1 each need two hosts
    #[test]
    fn test_two_device_example() {
        let rows = vec![
            Row::new("SW1-LAN", DeviceType::Switch, "SW1", "fa0/1", "", 2),
            Row::new("RT1-LINK", DeviceType::Router, "RT1", "g0/0", "g0/1", 2),
        ];

        let generated = generate_commands(&rows, Ipv4Addr::new(200, 20, 10, 0), &Config::default()).unwrap();

        let lan = generated.registry.find("SW1-LAN").unwrap();
        assert_eq!(lan.block_size, 4);
        assert_eq!(lan.prefix_len, 30);
        assert_eq!(lan.network, Ipv4Addr::new(200, 20, 10, 0));
        assert_eq!(lan.first_usable, Ipv4Addr::new(200, 20, 10, 1));

        let link = generated.registry.find("RT1-LINK").unwrap();
        assert_eq!(link.network, Ipv4Addr::new(200, 20, 10, 4));
        assert_eq!(link.first_usable, Ipv4Addr::new(200, 20, 10, 5));
        assert_eq!(link.second_usable, Ipv4Addr::new(200, 20, 10, 6));

        let text = generated.text;
        let switch_at = text.find("### SW1").unwrap();
        let router_at = text.find("### RT1").unwrap();
        assert!(switch_at < router_at);
        assert!(text.contains("ip address 200.20.10.1 255.255.255.252\n"));
        assert!(text.contains("ip address 200.20.10.5 255.255.255.252\n"));
        assert!(text.contains("ip address 200.20.10.6 255.255.255.252\n"));
        assert!(text.find("network 200.20.10.0\n").unwrap() < text.find("network 200.20.10.4\n").unwrap());
    }

    #[test]
    fn test_table_to_commands() {
        let rows = parse_table(CLASS_TABLE).unwrap();
        validate_rows(&rows).unwrap();

        let generated = generate_commands(&rows, Ipv4Addr::new(192, 168, 0, 0), &Config::default()).unwrap();
        let order: Vec<&str> = generated.registry.allocations.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(order, vec!["LAB", "GUEST", "OFFICE", "R1-R2", "R2-R3"]);

        let networks: Vec<String> = generated
            .registry
            .allocations
            .iter()
            .map(|r| format!("{}/{}", r.network, r.prefix_len))
            .collect();
        assert_eq!(
            networks,
            vec![
                "192.168.0.0/26",
                "192.168.0.64/28",
                "192.168.0.64/27",
                "192.168.0.112/30",
                "192.168.0.116/30",
            ]
        );

        let text = generated.text;
        assert_eq!(text.matches("\n## switch\n").count(), 1);
        assert_eq!(text.matches("\n## router\n").count(), 1);
        assert_eq!(text.matches("### ").count(), 4);
        assert_eq!(text.matches("ip dhcp pool ").count(), 3);
        assert_eq!(text.matches("default-information originate").count(), 2);
    }

    #[test]
    fn test_non_strict_unaligned_cursor_is_preserved() {
        // GUEST (/28) lands at .64; OFFICE (/27) is placed around cursor .80
        let rows = parse_table(CLASS_TABLE).unwrap();
        let generated = generate_commands(&rows, Ipv4Addr::new(192, 168, 0, 0), &Config::default()).unwrap();

        let office = generated.registry.find("OFFICE").unwrap();
        assert_eq!(office.network, Ipv4Addr::new(192, 168, 0, 64));
        assert_eq!(generated.registry.overlaps(), vec![("GUEST", "OFFICE")]);
    }

    #[test]
    fn test_mixed_order_grouping() {
        let rows = vec![
            Row::new("r-a", DeviceType::Router, "R-A", "g0/0", "g0/1", 2),
            Row::new("s-a", DeviceType::Switch, "S-A", "fa0/1", "", 2),
            Row::new("r-b", DeviceType::Router, "R-B", "g0/0", "g0/1", 2),
            Row::new("s-b", DeviceType::Switch, "S-B", "fa0/1", "", 2),
        ];

        let plan: Vec<(String, &str)> = group_rows(&rows)
            .iter()
            .flat_map(|section| section.groups.iter().map(|g| (g.device_type.to_string(), g.out_device)))
            .collect();
        assert_eq!(
            plan,
            vec![
                ("switch".to_string(), "S-A"),
                ("switch".to_string(), "S-B"),
                ("router".to_string(), "R-A"),
                ("router".to_string(), "R-B"),
            ]
        );
    }

    #[test]
    fn test_strict_run_is_disjoint() {
        let hosts = [1u64, 100, 3, 500, 2, 7, 1, 60, 30, 1000, 5];
        let rows: Vec<Row> = hosts
            .iter()
            .enumerate()
            .map(|(i, h)| Row::new(format!("net-{}", i), DeviceType::Switch, "SW1", "fa0/1", "", *h))
            .collect();

        let mut config = Config::default();
        config.allocation.alignment = Alignment::Strict;
        let generated = generate_commands(&rows, Ipv4Addr::new(10, 0, 0, 1), &config).unwrap();

        assert_eq!(generated.registry.len(), hosts.len());
        assert!(generated.registry.overlaps().is_empty());
        for record in &generated.registry.allocations {
            let start = u32::from(record.network) as u64;
            assert_eq!(start % record.block_size, 0, "{} is not aligned", record.name);
        }
    }

    #[test]
    fn test_cursor_is_monotonic() {
        let mut allocator = SubnetAllocator::new(Ipv4Addr::new(172, 16, 0, 0), Alignment::NonStrict);
        for hosts in [5u64, 1, 120, 2, 9, 33] {
            let sizing = size_for_hosts(hosts).unwrap();
            let before = allocator.position();
            allocator.allocate(&sizing).unwrap();
            assert!(allocator.position() > before);
            assert_eq!(allocator.position() - before, sizing.block_size);
        }
    }

    #[test]
    fn test_exhaustion_aborts_run() {
        let rows = vec![Row::new("BIG", DeviceType::Switch, "SW1", "fa0/1", "", 10)];
        let err = generate(&rows, Ipv4Addr::new(255, 255, 255, 252)).unwrap_err();

        assert_eq!(err.row, "BIG");
        assert!(matches!(
            err.kind(),
            AllocationError::AddressSpaceExhausted { block_size: 16, .. }
        ));
    }

    #[test]
    fn test_invalid_host_count_aborts_run() {
        let table = "\
| name  | type   | out_device | out_port | hosts |
|-------|--------|------------|----------|-------|
| EMPTY | switch | SW1        | fa0/1    | 0     |
";
        let rows = parse_table(table).unwrap();
        let err = generate(&rows, Ipv4Addr::new(10, 0, 0, 0)).unwrap_err();

        assert_eq!(err.row, "EMPTY");
        assert!(matches!(err.kind(), AllocationError::InvalidHostCount { hosts: 0 }));
    }

    #[test]
    fn test_unknown_type_is_heading_only() {
        let table = "\
| name | type     | out_device | out_port | hosts |
|------|----------|------------|----------|-------|
| LAN  | switch   | SW1        | fa0/1    | 2     |
| AP   | wireless | AP1        | wlan0    | 50    |
";
        let rows = parse_table(table).unwrap();
        validate_rows(&rows).unwrap();
        let generated = generate_commands(&rows, Ipv4Addr::new(10, 0, 0, 0), &Config::default()).unwrap();

        assert!(generated.text.contains("\n## wireless\n"));
        assert!(!generated.text.contains("AP1"));
        assert_eq!(generated.registry.len(), 1);
    }

    #[test]
    fn test_config_file_drives_output() {
        let yaml = r#"
allocation:
  base_address: 10.20.30.0
  alignment: strict
router:
  console_password: lab
  banner: "Lab use only"
rip:
  version: 1
"#;
        let mut config_file = NamedTempFile::new().unwrap();
        write!(config_file, "{}", yaml).unwrap();
        let mut table_file = NamedTempFile::new().unwrap();
        write!(table_file, "{}", CLASS_TABLE).unwrap();

        let config = load_config(config_file.path()).unwrap();
        let rows = read_table_file(table_file.path()).unwrap();
        let base = config.allocation.base_address.unwrap();
        let generated = generate_commands(&rows, base, &config).unwrap();

        assert!(generated.text.contains("password lab\n"));
        assert!(generated.text.contains("banner motd #Lab use only#\n"));
        assert!(generated.text.contains("version 1\n"));
        assert_eq!(generated.registry.find("LAB").unwrap().network, Ipv4Addr::new(10, 20, 30, 0));
        assert!(generated.registry.overlaps().is_empty());
    }
}
