//! Device table type definitions.

use std::fmt;

/// Kind of device a row configures
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeviceType {
    Switch,
    Router,
    /// Any other value from the `type` column, kept verbatim
    Other(String),
}

impl DeviceType {
    /// Map a `type` cell to a device type. Known values match case-insensitively.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "switch" => DeviceType::Switch,
            "router" => DeviceType::Router,
            _ => DeviceType::Other(trimmed.to_string()),
        }
    }

    /// Returns true for types that produce per-device command blocks
    pub fn is_known(&self) -> bool {
        !matches!(self, DeviceType::Other(_))
    }

    /// Processing rank: switches, then routers, then everything else
    pub fn rank(&self) -> u8 {
        match self {
            DeviceType::Switch => 0,
            DeviceType::Router => 1,
            DeviceType::Other(_) => 2,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DeviceType::Switch => "switch",
            DeviceType::Router => "router",
            DeviceType::Other(name) => name,
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the device table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Unique row identifier, also the DHCP pool name
    pub name: String,
    pub device_type: DeviceType,
    /// Device the row's interfaces live on
    pub out_device: String,
    pub out_port: String,
    /// Second interface, only used by router rows
    pub in_port: String,
    /// Minimum hosts the subnet must serve
    pub hosts: u64,
}

impl Row {
    pub fn new(
        name: impl Into<String>,
        device_type: DeviceType,
        out_device: impl Into<String>,
        out_port: impl Into<String>,
        in_port: impl Into<String>,
        hosts: u64,
    ) -> Self {
        Row {
            name: name.into(),
            device_type,
            out_device: out_device.into(),
            out_port: out_port.into(),
            in_port: in_port.into(),
            hosts,
        }
    }
}
