//! # vlsmgen - VLSM subnetting and Cisco IOS command generator
//!
//! This library turns a table of switches and routers into a sequence of
//! configuration command blocks. One IPv4 address space is split into
//! minimally sized, non-wasteful subnets (VLSM), and every device gets its
//! interface addressing, DHCP pools, and RIP configuration.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `table_parser`: Markdown device table reader
//! - `topology`: Device rows and the switch-first grouping plan
//! - `ip`: Subnet sizing, sequential allocation, and the allocation registry
//! - `commands`: Per-device-type command synthesis
//! - `config` / `config_loader`: Optional YAML settings
//! - `utils`: Input validation helpers
//! - `orchestrator`: End-to-end generation
//!
//! ## Example Usage
//!
//! ```rust
//! use std::net::Ipv4Addr;
//! use vlsmgen::config::Config;
//! use vlsmgen::{orchestrator, table_parser};
//!
//! let table = "\
//! | name | type   | out_device | out_port | in_port | hosts |
//! |------|--------|------------|----------|---------|-------|
//! | LAN  | switch | SW1        | fa0/1    |         | 2     |
//! | WAN  | router | RT1        | g0/0     | g0/1    | 2     |
//! ";
//!
//! let rows = table_parser::parse_table(table)?;
//! let generated = orchestrator::generate_commands(&rows, Ipv4Addr::new(200, 20, 10, 0), &Config::default())?;
//!
//! assert!(generated.text.contains("ip dhcp pool LAN\nnetwork 200.20.10.0 255.255.255.252\n"));
//! assert!(generated.text.contains("ip address 200.20.10.6 255.255.255.252\n"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Allocation Order
//!
//! All switch rows are allocated before any router row, each type in
//! first-seen device order. A single cursor runs across the whole table, so
//! the address space is carved contiguously across the fleet.
//!
//! ## Error Handling
//!
//! Library modules return typed `thiserror` errors. Allocation failures are
//! reported as [`commands::SynthesisError`] carrying the offending row name.
//! The binary wraps everything in `color_eyre` reports.

pub mod commands;
pub mod config;
pub mod config_loader;
pub mod ip;
pub mod orchestrator;
pub mod table_parser;
pub mod topology;
pub mod utils;
