//! Node version identification for blockchain peers
//!
//! Resolves the numeric version code a node reports into a named [`Release`],
//! and parses and orders `major.minor.patch[-ext]` version strings.
//!
//! [`Release`]: version::release::Release

pub mod config;
pub mod logging;
pub mod version;
