//! Node version identification
//!
//! This module maps the numeric version codes reported by nodes to named
//! releases, and parses and compares `major.minor.patch[-ext]` version strings.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  node code  │────▶│   Release   │────▶│   Version   │
//! │   (i64)     │     │  (resolve)  │     │  (parse)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                            ▼                   ▼
//!                     ┌─────────────────────────────┐
//!                     │           Checker           │
//!                     │   (compare to a minimum)    │
//!                     └─────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`release`]: Closed set of known releases and the code lookup table
//! - [`semver`]: Version parsing, rendering and composite ordering
//! - [`checker`]: Compatibility check of a node against a minimum version
//! - [`error`]: Error types for parsing, configuration and node sources

pub mod checker;
pub mod error;
pub mod release;
pub mod semver;
