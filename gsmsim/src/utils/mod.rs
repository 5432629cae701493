//! Utilities for gsmsim: small, reusable helpers used across the crate.
//!
//! Hex conversion is used for APDU tracing and for the hex-string views the
//! card data is usually shown in; timeout helpers centralize the per-byte
//! read bound.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
