//! Per-device-type command templates.
//!
//! Switch and router blocks share one emitter; what differs between them is
//! captured here as a preamble, a row layout, and a closing block.

use crate::config::{Config, BANNER_DELIMITER};
use crate::topology::DeviceType;

/// Emitter state selected by a group's device type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    /// One LAN interface, a DHCP pool, and a RIP network per row
    SwitchBlock,
    /// Two interfaces on the same subnet and a RIP network per row
    RouterBlock,
}

impl BlockState {
    pub fn for_device(device_type: &DeviceType) -> Option<Self> {
        match device_type {
            DeviceType::Switch => Some(BlockState::SwitchBlock),
            DeviceType::Router => Some(BlockState::RouterBlock),
            DeviceType::Other(_) => None,
        }
    }
}

/// Fixed text wrapped around each device's per-row blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProfile {
    pub state: BlockState,
    /// Lines following the `### device` heading
    pub preamble: Vec<String>,
    /// Lines after the last row, ending privileged mode
    pub closing: Vec<String>,
}

/// Profiles for every device type that produces commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProfiles {
    pub switch: DeviceProfile,
    pub router: DeviceProfile,
}

impl DeviceProfiles {
    pub fn from_config(config: &Config) -> Self {
        DeviceProfiles {
            switch: switch_profile(config),
            router: router_profile(config),
        }
    }

    pub fn for_state(&self, state: BlockState) -> &DeviceProfile {
        match state {
            BlockState::SwitchBlock => &self.switch,
            BlockState::RouterBlock => &self.router,
        }
    }
}

impl Default for DeviceProfiles {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|line| line.to_string()).collect()
}

fn switch_profile(config: &Config) -> DeviceProfile {
    let summary = if config.rip.auto_summary {
        "auto-summary"
    } else {
        "no auto-summary"
    };

    let mut preamble = lines(&["en", "conf t", "", "router rip"]);
    preamble.push(format!("version {}", config.rip.version));
    preamble.push(summary.to_string());
    preamble.push("exit".to_string());

    DeviceProfile {
        state: BlockState::SwitchBlock,
        preamble,
        closing: lines(&["exit", "exit"]),
    }
}

fn router_profile(config: &Config) -> DeviceProfile {
    let router = &config.router;
    let preamble = vec![
        "en".to_string(),
        "conf t".to_string(),
        String::new(),
        "line con 0".to_string(),
        format!("password {}", router.console_password),
        "login".to_string(),
        "exit".to_string(),
        String::new(),
        format!("enable password {}", router.enable_password),
        "service password-encryption".to_string(),
        format!("enable secret {}", router.enable_secret),
        String::new(),
        format!("banner motd {d}{}{d}", router.banner, d = BANNER_DELIMITER),
    ];

    DeviceProfile {
        state: BlockState::RouterBlock,
        preamble,
        closing: lines(&["router rip", "default-information originate", "exit", "", "exit", "exit"]),
    }
}
