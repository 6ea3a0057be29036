//! The `gocpp` command: translate, format and compile a Go unit.
//!
//! The translation itself lives in [`gocpp_translate`]; external tools are
//! driven through [`gocpp_tools`]. This crate wires them together behind
//! the command line and the configuration files.

pub mod commands;
pub mod config;

pub use config::GocppConfig;
