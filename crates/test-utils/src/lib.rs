//! Shared test utilities for the sdo-client workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic image generators (raw pixels and encoded PNG bytes)
//! - Fixed timestamps and request values
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{png_bytes, fixtures};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
