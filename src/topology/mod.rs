//! Device table model and grouping.
//!
//! This module holds the strongly-typed device rows and the grouper that
//! turns them into the ordered per-device processing plan.

pub mod grouping;
pub mod types;

pub use grouping::{group_rows, Group, TypeSection};
pub use types::{DeviceType, Row};
