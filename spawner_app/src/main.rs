//! Interval spawner demo
//!
//! Drives the pool registry the way a game loop would: every few ticks a
//! random predefined kind spawns at a random offset around a spawn point,
//! and live instances return to their pools when their lifetime expires.
//! Run with `RUST_LOG=debug` to watch individual spawns and despawns.

use entity_pool::pool::{BlueprintConfig, PoolEntryConfig};
use entity_pool::prelude::*;
use rand::prelude::*;

/// Total simulated ticks before the demo reports and exits
const TICKS: u64 = 600;

/// Ticks between spawn attempts
const SPAWN_INTERVAL: u64 = 4;

/// Instance lifetime range, in ticks
const LIFETIME_RANGE: std::ops::Range<u64> = 30..120;

/// A checked-out instance together with its scheduled despawn tick
struct ActiveEntity {
    instance: Instance,
    expires_at: u64,
}

/// Periodic randomized spawner
///
/// Owns no pooling logic: it only selects a kind and placement and calls
/// into the registry's public contract.
struct SpawnDriver {
    kinds: Vec<Kind>,
    spawn_point: Vec3,
    radius: f32,
    rng: StdRng,
}

impl SpawnDriver {
    fn new(kinds: Vec<Kind>, spawn_point: Vec3, radius: f32) -> Self {
        if kinds.is_empty() {
            log::warn!("No kinds available to the spawn driver; nothing will spawn");
        }
        Self {
            kinds,
            spawn_point,
            radius,
            rng: StdRng::from_entropy(),
        }
    }

    /// Spawn one instance of a random kind at a random placement
    fn spawn_one(
        &mut self,
        tick: u64,
        registry: &mut PoolRegistry,
        active: &mut Vec<ActiveEntity>,
    ) {
        let Some(kind) = self.kinds.choose(&mut self.rng).cloned() else {
            return;
        };
        let position = self.spawn_point + self.random_offset();
        let yaw = self.rng.gen_range(0.0..std::f32::consts::TAU);
        let rotation = Quat::from_euler_angles(0.0, yaw, 0.0);

        match registry.spawn(&kind, position, rotation) {
            Ok(instance) => {
                let expires_at = tick + self.rng.gen_range(LIFETIME_RANGE);
                log::debug!(
                    "tick {}: spawned `{}` ({:?}) at {:?}, expires at tick {}",
                    tick,
                    kind.name(),
                    instance.id(),
                    position,
                    expires_at
                );
                active.push(ActiveEntity {
                    instance,
                    expires_at,
                });
            }
            Err(err) => log::error!("tick {}: spawn of `{}` failed: {}", tick, kind.name(), err),
        }
    }

    /// Uniform random point inside a circle on the XZ plane
    fn random_offset(&mut self) -> Vec3 {
        let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
        let distance = self.radius * self.rng.gen::<f32>().sqrt();
        Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
    }
}

/// Load the predefined pool list, falling back to a built-in set
fn load_pools() -> PoolSetConfig {
    match PoolSetConfig::load_from_file("spawner_app/resources/pools.ron") {
        Ok(config) => config,
        Err(err) => {
            log::warn!("Using built-in pool set ({})", err);
            built_in_pools()
        }
    }
}

fn built_in_pools() -> PoolSetConfig {
    let entry = |name: &str, mesh: &str, size: i64| PoolEntryConfig {
        name: name.to_string(),
        blueprint: Some(BlueprintConfig {
            mesh: mesh.to_string(),
            material: "default".to_string(),
            scale: [1.0, 1.0, 1.0],
        }),
        size,
    };
    PoolSetConfig {
        pools: vec![
            entry("rock", "rock.obj", 8),
            entry("tree", "tree.obj", 4),
            entry("crate", "crate.obj", 2),
        ],
    }
}

fn main() {
    env_logger::init();

    let mut registry = PoolRegistry::new();
    let installed = registry.initialize(&load_pools());
    log::info!("Spawner demo starting with {} predefined pools", installed);

    let mut driver = SpawnDriver::new(
        registry.predefined_kinds(),
        Vec3::new(0.0, 0.0, 0.0),
        5.0,
    );
    let mut active: Vec<ActiveEntity> = Vec::new();

    for tick in 0..TICKS {
        if tick % SPAWN_INTERVAL == 0 {
            driver.spawn_one(tick, &mut registry, &mut active);
        }

        // Lifecycle logic despawns at its own cadence, unrelated to spawning
        let mut alive = Vec::with_capacity(active.len());
        for entity in active.drain(..) {
            if entity.expires_at <= tick {
                log::debug!("tick {}: despawning {:?}", tick, entity.instance.id());
                registry.despawn(entity.instance);
            } else {
                alive.push(entity);
            }
        }
        active = alive;
    }

    // Abandon whatever is still checked out, back into the pools
    let leftover = active.len();
    for entity in active {
        registry.despawn(entity.instance);
    }
    log::info!("Returned {} instances still live at shutdown", leftover);

    let stats = registry.stats();
    log::info!(
        "Done: {} spawned ({} reused, {} overflow-constructed), {} returned, {} discarded",
        stats.spawned,
        stats.reused,
        stats.overflow,
        stats.returned,
        stats.discarded
    );
    for kind in registry.predefined_kinds() {
        if let Some(status) = registry.status(&kind) {
            log::info!(
                "  {}: {} idle, {} constructed in total ({})",
                status.kind,
                status.idle,
                status.constructed,
                status.group
            );
        }
    }
}
