//! Structured logging facility
//!
//! Comparators are pure functions; the only side effect they have is
//! diagnostics. This module owns how those diagnostics look:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use esdiff_core::logging_facility::{init, Profile};
//!
//! // Initialize once at provider startup
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
