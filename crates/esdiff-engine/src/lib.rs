//! esdiff engine - provider-facing layer
//!
//! Loads provider configuration, holds the explicit provider context, and
//! dispatches resource fields to the comparators in `esdiff-core`.

pub mod config;
pub mod context;
pub mod registry;

pub use config::ProviderConfig;
pub use context::{ProviderContext, MINIMUM_VERSION};
pub use registry::{DiffSuppressRegistry, ResourceKind, Suppressor};
