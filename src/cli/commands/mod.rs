//! CLI command implementations

pub mod setup;

pub use setup::execute as setup;
