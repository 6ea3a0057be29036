//! CLI command implementations - one command per file.

pub mod translate;
