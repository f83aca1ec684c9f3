//! # Entity Pool
//!
//! A runtime entity pooling engine for games and simulations that spawn and
//! discard short-lived, identically-shaped objects at a fixed cadence.
//!
//! ## Features
//!
//! - **Per-Kind Queues**: Each prototype kind owns a FIFO queue of idle,
//!   pre-warmed instances
//! - **Overflow Construction**: Spawning never blocks; empty queues construct
//!   new instances from the kind's template
//! - **Lazy Pools**: Kinds absent from the initial configuration get a pool
//!   on first spawn
//! - **Ownership by Move**: An instance is either idle inside its queue or
//!   checked out to exactly one caller; the type system enforces it
//! - **Config Pre-Warming**: Predefined pools load from RON or TOML files
//!
//! ## Quick Start
//!
//! ```rust
//! use entity_pool::prelude::*;
//!
//! let kind = Kind::new(Template::new("rock", Blueprint::with_mesh("rock.obj")));
//! let mut registry = PoolRegistry::new();
//! registry.register(kind.clone(), 4).unwrap();
//!
//! let instance = registry
//!     .spawn(&kind, Vec3::new(0.0, 1.0, 0.0), Quat::identity())
//!     .unwrap();
//! registry.despawn(instance);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod pool;

pub use pool::{
    Blueprint, Despawn, Instance, InstanceId, Kind, PoolError, PoolRegistry, PoolSetConfig,
    PoolStatus, RegistryStats, ResourceHandle, Template,
};

/// Common imports for pool users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        foundation::math::{Quat, Transform, Vec3},
        pool::{
            Blueprint, Despawn, Instance, InstanceId, Kind, PoolError, PoolRegistry,
            PoolSetConfig, PoolStatus, RegistryStats, Template,
        },
    };
}
