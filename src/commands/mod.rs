//! Device command synthesis.
//!
//! Walks the grouped device plan, carving one subnet per row from the shared
//! allocator, and renders Cisco IOS command blocks that reference the
//! allocated addresses.

pub mod profile;
pub mod synthesizer;

pub use profile::{BlockState, DeviceProfile, DeviceProfiles};
pub use synthesizer::CommandSynthesizer;

use crate::ip::AllocationError;

/// Allocation failure for a specific table row
#[derive(Debug, thiserror::Error)]
#[error("cannot allocate a subnet for row '{row}'")]
pub struct SynthesisError {
    /// Name of the offending row
    pub row: String,
    #[source]
    pub source: AllocationError,
}

impl SynthesisError {
    pub fn kind(&self) -> &AllocationError {
        &self.source
    }
}
