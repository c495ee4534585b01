//! # psgc-cli: PSGC Static Generator Command Line
//!
//! ## Subcommands
//!
//! - `import`: registry CSV datafile to flat JSON record list
//! - `generate`: record list to the static artifact tree
//! - `verify`: check a generated tree against its digest manifest
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; hierarchy and planning logic live in
//!   `psgc-hierarchy` and `psgc-artifact`.
//! - Handlers return `anyhow::Result<u8>`: `Ok` carries the exit code,
//!   `Err` is an operational failure.

pub mod config;
pub mod generate;
pub mod import;
pub mod verify;
