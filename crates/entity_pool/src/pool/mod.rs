//! Entity Pooling System
//!
//! Provides recycled instances for objects that are created and discarded at a
//! high cadence, eliminating per-spawn construction cost. The registry owns a
//! FIFO queue of idle instances per kind and is the sole authority for handing
//! instances out and reclaiming them.
//!
//! # Architecture
//!
//! ```text
//! PoolSetConfig (RON/TOML)
//!         ↓ initialize
//! PoolRegistry
//!         ├── Kind → Pool (FIFO queue of idle instances)
//!         ├── name catalog (predefined kinds)
//!         └── RegistryStats
//!                 ↓ spawn / despawn
//!          Instance (by value)
//!                 ↓
//!          ResourceHandle (routes the instance back to its kind)
//! ```
//!
//! Ownership is expressed with move semantics: `spawn` hands the instance to
//! the caller by value and `despawn` takes it back, so an instance is always
//! either idle inside exactly one queue or checked out to exactly one owner.

mod error;
mod instance;
mod registry;
mod template;
mod warmup;

pub use error::PoolError;
pub use instance::{Instance, InstanceId, ResourceHandle};
pub use registry::{Despawn, PoolRegistry, PoolStatus, RegistryStats};
pub use template::{Blueprint, Kind, Template};
pub use warmup::{BlueprintConfig, PoolEntryConfig, PoolSetConfig};
