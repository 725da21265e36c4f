//! CLI command implementations for the Usher dashboard.

pub mod check;
pub mod serve;
