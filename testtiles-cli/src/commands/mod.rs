//! CLI command implementations.
//!
//! - [`generate`] - Generate a tile pyramid into a directory
//! - [`args`] - Clap value types shared by the argument parser

pub mod args;
pub mod generate;
