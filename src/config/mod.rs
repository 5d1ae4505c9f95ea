//! # segmap Configuration Module
//!
//! Compile-time limits for segmented buffers and the Base64 codec. Runtime
//! configuration lives on the builders (`SegmentedFileBufferBuilder`,
//! `Base64CodecBuilder`); this module only holds the values those builders
//! default to and validate against.
//!
//! ## Module Organization
//!
//! - [`constants`]: All numeric configuration values with dependency documentation

pub mod constants;
pub use constants::*;
