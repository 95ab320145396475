//! Core types shared across the esdiff crates
//!
//! - **Schema constants**: canonical structured-log field keys and event names
//! - **Sensitive data**: `Sensitive<T>` marker for credential redaction

pub mod schema;
pub mod sensitive;

pub use sensitive::Sensitive;
