//! Device table validation utilities.
//!
//! Checks run once at the input boundary, after parsing and before any
//! subnet is allocated.

use crate::topology::{DeviceType, Row};
use std::collections::HashSet;

/// Validate parsed device rows
///
/// Checks for:
/// - Empty or duplicate row names (names become DHCP pool names)
/// - Missing `out_device` or `out_port` on switch and router rows
/// - Router rows without an `in_port`
///
/// Rows of unrecognized type are accepted with a warning; they only
/// produce a section heading.
///
/// # Examples
/// ```
/// use vlsmgen::topology::{DeviceType, Row};
/// use vlsmgen::utils::validation::validate_rows;
///
/// let rows = vec![Row::new("LAN", DeviceType::Switch, "SW1", "fa0/1", "", 10)];
/// assert!(validate_rows(&rows).is_ok());
///
/// let router = vec![Row::new("WAN", DeviceType::Router, "R1", "s0/0/0", "", 2)];
/// assert!(validate_rows(&router).is_err());
/// ```
pub fn validate_rows(rows: &[Row]) -> Result<(), String> {
    let mut names = HashSet::new();

    for row in rows {
        if row.name.is_empty() {
            return Err(format!("Row on device '{}' has an empty name", row.out_device));
        }
        if !names.insert(row.name.as_str()) {
            return Err(format!("Duplicate row name '{}' (row names must be unique)", row.name));
        }

        match &row.device_type {
            DeviceType::Switch | DeviceType::Router => {
                if row.out_device.is_empty() {
                    return Err(format!("Row '{}' is missing out_device", row.name));
                }
                if row.out_port.is_empty() {
                    return Err(format!("Row '{}' is missing out_port", row.name));
                }
                if row.device_type == DeviceType::Router && row.in_port.is_empty() {
                    return Err(format!("Router row '{}' requires an in_port", row.name));
                }
            }
            DeviceType::Other(name) => {
                log::warn!(
                    "Row '{}' has unrecognized device type '{}'; only a heading will be emitted",
                    row.name,
                    name
                );
            }
        }
    }

    log::info!("Validated {} device rows", rows.len());
    Ok(())
}
