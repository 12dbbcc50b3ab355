//! Command generation orchestrator.
//!
//! This module coordinates the overall generation process, managing the flow
//! from parsed device rows through grouping, subnet allocation, and command
//! synthesis to the final text and allocation registry.

use crate::commands::{CommandSynthesizer, DeviceProfiles, SynthesisError};
use crate::config::Config;
use crate::ip::{AllocationRegistry, SubnetAllocator};
use crate::topology::{group_rows, Row};
use color_eyre::eyre::WrapErr;
use log::{info, warn};
use std::net::Ipv4Addr;
use std::path::Path;

/// Output of one generation run
#[derive(Debug, Clone)]
pub struct GeneratedCommands {
    /// Markdown-headed IOS command text
    pub text: String,
    /// Every block carved during the run, in allocation order
    pub registry: AllocationRegistry,
}

/// Generate device commands for `rows`, carving subnets from `base`.
///
/// Switch rows are allocated first, then router rows, from one cursor
/// shared across the whole table.
///
/// # Errors
///
/// Returns a [`SynthesisError`] naming the first row whose subnet cannot be
/// sized or placed. No partial output is produced.
pub fn generate_commands(rows: &[Row], base: Ipv4Addr, config: &Config) -> Result<GeneratedCommands, SynthesisError> {
    let alignment = config.allocation.alignment;
    info!("Allocating {} rows from {} ({:?} alignment)", rows.len(), base, alignment);

    let profiles = DeviceProfiles::from_config(config);
    let mut allocator = SubnetAllocator::new(base, alignment);
    let mut registry = AllocationRegistry::new(base);

    let sections = group_rows(rows);
    let text = CommandSynthesizer::new(&profiles, &mut allocator, &mut registry).synthesize(&sections)?;

    for (first, second) in registry.overlaps() {
        warn!(
            "Subnets for '{}' and '{}' overlap; use strict alignment to avoid this",
            first, second
        );
    }

    info!(
        "Consumed {} addresses, next free address {}",
        registry.consumed(),
        allocator
            .next_address()
            .map_or_else(|| "none".to_string(), |addr| addr.to_string())
    );

    Ok(GeneratedCommands { text, registry })
}

/// Write the allocation registry as pretty-printed JSON
pub fn write_registry(registry: &AllocationRegistry, path: &Path) -> color_eyre::Result<()> {
    let json = serde_json::to_string_pretty(registry)?;
    std::fs::write(path, json)
        .wrap_err_with(|| format!("Failed to write allocation registry '{}'", path.display()))?;
    info!("Wrote allocation registry to {:?}", path);
    Ok(())
}
