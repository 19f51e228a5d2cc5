//! CLI command implementations.

pub mod circuit;
pub mod common;
pub mod instances;
pub mod run;
pub mod solve;
pub mod version;
