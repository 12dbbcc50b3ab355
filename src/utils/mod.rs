//! Shared utilities: device table validation.

pub mod validation;

pub use validation::validate_rows;
