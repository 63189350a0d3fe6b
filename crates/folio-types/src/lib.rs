//! Foundation types for FOLIO.
//!
//! This crate contains the host-agnostic types shared by all FOLIO crates:
//! terminal lines, key events, colors, configuration and error types.

pub mod color;
pub mod config;
pub mod error;
pub mod input;
pub mod line;
