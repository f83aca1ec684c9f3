//! Pool registry
//!
//! Owns every per-kind queue and is the sole authority for handing out and
//! reclaiming instances. Queues are FIFO: the oldest-returned idle instance
//! is served first. Pools grow without bound when demand outpaces pre-warmed
//! capacity; idle instances are never proactively destroyed.

use super::error::PoolError;
use super::instance::{Instance, ResourceHandle};
use super::template::{Kind, Template};
use super::warmup::PoolSetConfig;
use crate::foundation::math::{Quat, Vec3};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};

/// Registry identifier used to stamp resource handles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct RegistryId(u64);

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(1);

impl RegistryId {
    fn next() -> Self {
        Self(NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Outcome of returning an instance to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Despawn {
    /// The instance was deactivated and enqueued at the back of its kind's queue
    Pooled,
    /// The instance was foreign to this registry and has been destroyed
    Discarded,
}

/// Per-kind pool: FIFO queue of idle instances plus bookkeeping
struct Pool {
    queue: VecDeque<Instance>,
    /// Grouping label, diagnostics only
    group: String,
    /// Total instances ever constructed for this kind
    constructed: u64,
}

impl Pool {
    fn predefined(name: &str) -> Self {
        Self::with_group(format!("Pool_{}", name))
    }

    fn lazy(name: &str) -> Self {
        Self::with_group(format!("Pool_{}_Dynamic", name))
    }

    fn with_group(group: String) -> Self {
        Self {
            queue: VecDeque::new(),
            group,
            constructed: 0,
        }
    }
}

/// Snapshot of one pool's bookkeeping
#[derive(Debug, Clone)]
pub struct PoolStatus {
    /// Kind name
    pub kind: String,
    /// Grouping label
    pub group: String,
    /// Idle instances currently queued
    pub idle: usize,
    /// Total instances ever constructed for this kind
    pub constructed: u64,
}

/// Registry-wide usage statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryStats {
    /// Instances handed out by `spawn`
    pub spawned: u64,
    /// Spawns served from an idle queue
    pub reused: u64,
    /// Instances constructed because a queue was empty
    pub overflow: u64,
    /// Instances constructed during pre-warming
    pub prewarmed: u64,
    /// Instances returned to a queue by `despawn`
    pub returned: u64,
    /// Foreign instances destroyed instead of pooled
    pub discarded: u64,
}

/// The kind → pool mapping and the sole entry point for spawn/despawn
///
/// Created once per session and passed by reference to every collaborator
/// that needs it. Predefined kinds are inserted eagerly via
/// [`initialize`](Self::initialize) or [`register`](Self::register); unknown
/// kinds get an empty pool lazily on first [`spawn`](Self::spawn).
pub struct PoolRegistry {
    id: RegistryId,
    pools: HashMap<Kind, Pool>,
    /// Predefined kinds, resolvable by name
    catalog: HashMap<String, Kind>,
    stats: RegistryStats,
}

impl PoolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        let id = RegistryId::next();
        log::debug!("Created PoolRegistry {:?}", id);
        Self {
            id,
            pools: HashMap::new(),
            catalog: HashMap::new(),
            stats: RegistryStats::default(),
        }
    }

    /// Register a kind and pre-warm its pool with `prewarm` idle instances
    ///
    /// No instance is activated during warm-up. Fails with
    /// [`PoolError::DuplicateKind`] if the kind or its name is already
    /// registered, and with [`PoolError::ResourceUnavailable`] if pre-warming
    /// is requested against a placeholder template; nothing is installed in
    /// either case.
    pub fn register(&mut self, kind: Kind, prewarm: usize) -> Result<(), PoolError> {
        if self.catalog.contains_key(kind.name()) || self.pools.contains_key(&kind) {
            return Err(PoolError::DuplicateKind(kind.name().to_string()));
        }
        if prewarm > 0 && kind.template().blueprint().is_none() {
            return Err(PoolError::ResourceUnavailable(kind.name().to_string()));
        }

        let mut pool = Pool::predefined(kind.name());
        for _ in 0..prewarm {
            let instance = Self::construct(self.id, &kind)?;
            pool.constructed += 1;
            pool.queue.push_back(instance);
        }
        self.stats.prewarmed += prewarm as u64;

        log::info!(
            "Registered pool `{}` with {} pre-warmed instances",
            kind.name(),
            prewarm
        );
        self.catalog.insert(kind.name().to_string(), kind.clone());
        self.pools.insert(kind, pool);
        Ok(())
    }

    /// Build predefined pools from configuration
    ///
    /// Malformed entries (negative size, missing blueprint, duplicate name)
    /// are skipped individually with a warning; the remaining entries still
    /// install. Returns the number of pools installed. Called once at
    /// startup by the hosting environment.
    pub fn initialize(&mut self, config: &PoolSetConfig) -> usize {
        let mut installed = 0;
        for entry in &config.pools {
            if entry.size < 0 {
                log::warn!(
                    "Skipping pool entry `{}`: negative size {}",
                    entry.name,
                    entry.size
                );
                continue;
            }
            let Some(blueprint) = &entry.blueprint else {
                log::warn!("Skipping pool entry `{}`: no blueprint", entry.name);
                continue;
            };

            let kind = Kind::new(Template::new(&entry.name, blueprint.to_blueprint()));
            match self.register(kind, entry.size as usize) {
                Ok(()) => installed += 1,
                Err(err) => log::warn!("Skipping pool entry `{}`: {}", entry.name, err),
            }
        }
        log::info!(
            "Initialized {} of {} configured pools",
            installed,
            config.pools.len()
        );
        installed
    }

    /// Spawn an instance of the given kind at the given placement
    ///
    /// Serves the oldest-returned idle instance of the kind, or constructs a
    /// new one when the queue is empty (overflow). A kind never registered
    /// gets an empty pool lazily first, so spawning dynamic kinds behaves
    /// identically to predefined ones after first use. Fails only when
    /// overflow construction is needed and the kind's template is a
    /// placeholder.
    pub fn spawn(
        &mut self,
        kind: &Kind,
        position: Vec3,
        rotation: Quat,
    ) -> Result<Instance, PoolError> {
        let pool = self.pools.entry(kind.clone()).or_insert_with(|| {
            log::debug!("Creating lazy pool for kind `{}`", kind.name());
            Pool::lazy(kind.name())
        });

        let mut instance = if let Some(instance) = pool.queue.pop_front() {
            self.stats.reused += 1;
            instance
        } else {
            let instance = Self::construct(self.id, kind)?;
            pool.constructed += 1;
            self.stats.overflow += 1;
            instance
        };

        instance.activate(position, rotation);
        self.stats.spawned += 1;
        Ok(instance)
    }

    /// Spawn by predefined kind name
    ///
    /// Resolves through the catalog built by [`initialize`](Self::initialize)
    /// and [`register`](Self::register); an unknown name fails with
    /// [`PoolError::InvalidRequest`] and no instance is produced.
    pub fn spawn_named(
        &mut self,
        name: &str,
        position: Vec3,
        rotation: Quat,
    ) -> Result<Instance, PoolError> {
        let Some(kind) = self.catalog.get(name).cloned() else {
            log::error!("Spawn requested for unknown kind `{}`", name);
            return Err(PoolError::InvalidRequest(name.to_string()));
        };
        self.spawn(&kind, position, rotation)
    }

    /// Return an instance to its kind's queue
    ///
    /// The instance is deactivated and enqueued at the back of the queue its
    /// handle names. Instances this registry does not own (detached handle,
    /// another registry's stamp, or a kind with no pool here) are destroyed
    /// instead of pooled; a queue is never touched for them.
    pub fn despawn(&mut self, mut instance: Instance) -> Despawn {
        instance.deactivate();

        let foreign = instance.handle().registry() != Some(self.id);
        let Some(kind) = instance.kind().cloned() else {
            log::debug!("Discarding unmanaged instance {:?}", instance.id());
            self.stats.discarded += 1;
            return Despawn::Discarded;
        };
        if foreign {
            log::debug!(
                "Discarding instance {:?} of kind `{}`: owned by another registry",
                instance.id(),
                kind.name()
            );
            self.stats.discarded += 1;
            return Despawn::Discarded;
        }
        let Some(pool) = self.pools.get_mut(&kind) else {
            log::debug!(
                "Discarding instance {:?}: no pool for kind `{}`",
                instance.id(),
                kind.name()
            );
            self.stats.discarded += 1;
            return Despawn::Discarded;
        };

        pool.queue.push_back(instance);
        self.stats.returned += 1;
        Despawn::Pooled
    }

    /// Resolve a predefined kind by name
    pub fn kind(&self, name: &str) -> Option<Kind> {
        self.catalog.get(name).cloned()
    }

    /// All predefined kinds, in no particular order
    pub fn predefined_kinds(&self) -> Vec<Kind> {
        self.catalog.values().cloned().collect()
    }

    /// Number of pools, predefined and lazy
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Idle instances currently queued for a kind
    pub fn idle_count(&self, kind: &Kind) -> usize {
        self.pools.get(kind).map_or(0, |pool| pool.queue.len())
    }

    /// Snapshot of one pool's bookkeeping
    pub fn status(&self, kind: &Kind) -> Option<PoolStatus> {
        self.pools.get(kind).map(|pool| PoolStatus {
            kind: kind.name().to_string(),
            group: pool.group.clone(),
            idle: pool.queue.len(),
            constructed: pool.constructed,
        })
    }

    /// Get registry-wide statistics
    pub fn stats(&self) -> &RegistryStats {
        &self.stats
    }

    /// Construct a fresh idle instance of a kind, attaching its handle
    fn construct(registry: RegistryId, kind: &Kind) -> Result<Instance, PoolError> {
        let blueprint = kind
            .template()
            .blueprint()
            .ok_or_else(|| PoolError::ResourceUnavailable(kind.name().to_string()))?;
        let handle = ResourceHandle::pooled(registry, kind.clone());
        Ok(Instance::from_blueprint(handle, blueprint))
    }
}

impl Default for PoolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::template::Blueprint;

    fn rock_kind(name: &str) -> Kind {
        Kind::new(Template::new(name, Blueprint::with_mesh("rock.obj")))
    }

    fn spawn_at_origin(registry: &mut PoolRegistry, kind: &Kind) -> Instance {
        registry
            .spawn(kind, Vec3::zeros(), Quat::identity())
            .expect("spawn should succeed")
    }

    #[test]
    fn test_prewarmed_spawns_do_not_construct() {
        let mut registry = PoolRegistry::new();
        let kind = rock_kind("rock");
        registry.register(kind.clone(), 2).unwrap();
        assert_eq!(registry.idle_count(&kind), 2);

        let a = spawn_at_origin(&mut registry, &kind);
        let b = spawn_at_origin(&mut registry, &kind);

        assert!(a.is_active());
        assert!(b.is_active());
        assert_ne!(a.id(), b.id());
        assert_eq!(registry.idle_count(&kind), 0);
        assert_eq!(registry.stats().overflow, 0);
        assert_eq!(registry.stats().reused, 2);
    }

    #[test]
    fn test_empty_queue_overflows_instead_of_failing() {
        let mut registry = PoolRegistry::new();
        let kind = rock_kind("rock");
        registry.register(kind.clone(), 1).unwrap();

        let _first = spawn_at_origin(&mut registry, &kind);
        let second = spawn_at_origin(&mut registry, &kind);

        assert!(second.is_active());
        assert_eq!(registry.stats().overflow, 1);
    }

    #[test]
    fn test_despawned_instances_return_in_fifo_order() {
        let mut registry = PoolRegistry::new();
        let kind = rock_kind("rock");
        registry.register(kind.clone(), 2).unwrap();

        let a = spawn_at_origin(&mut registry, &kind);
        let b = spawn_at_origin(&mut registry, &kind);
        let (a_id, b_id) = (a.id(), b.id());

        assert_eq!(registry.despawn(a), Despawn::Pooled);
        assert_eq!(registry.despawn(b), Despawn::Pooled);

        assert_eq!(spawn_at_origin(&mut registry, &kind).id(), a_id);
        assert_eq!(spawn_at_origin(&mut registry, &kind).id(), b_id);
    }

    #[test]
    fn test_spawn_sets_requested_placement() {
        let mut registry = PoolRegistry::new();
        let kind = rock_kind("rock");
        registry.register(kind.clone(), 1).unwrap();

        let position = Vec3::new(4.0, 0.0, -2.0);
        let rotation = Quat::from_euler_angles(0.0, 1.5, 0.0);
        let instance = registry.spawn(&kind, position, rotation).unwrap();

        assert_eq!(instance.transform().position, position);
        assert_eq!(instance.transform().rotation, rotation);
    }

    #[test]
    fn test_unregistered_kind_gets_lazy_pool_and_reuses() {
        let mut registry = PoolRegistry::new();
        let kind = rock_kind("surprise");

        let instance = spawn_at_origin(&mut registry, &kind);
        let id = instance.id();
        assert_eq!(registry.pool_count(), 1);
        assert_eq!(registry.stats().overflow, 1);

        registry.despawn(instance);
        assert_eq!(registry.idle_count(&kind), 1);

        // Behaves like a predefined pool after first use
        let again = spawn_at_origin(&mut registry, &kind);
        assert_eq!(again.id(), id);
        assert_eq!(registry.stats().overflow, 1);
    }

    #[test]
    fn test_lazy_pool_group_label_is_marked_dynamic() {
        let mut registry = PoolRegistry::new();
        let kind = rock_kind("surprise");
        let instance = spawn_at_origin(&mut registry, &kind);
        registry.despawn(instance);

        let status = registry.status(&kind).unwrap();
        assert_eq!(status.group, "Pool_surprise_Dynamic");
        assert_eq!(status.idle, 1);
        assert_eq!(status.constructed, 1);
    }

    #[test]
    fn test_instance_keeps_its_kind() {
        let mut registry = PoolRegistry::new();
        let rock = rock_kind("rock");
        let tree = rock_kind("tree");
        registry.register(rock.clone(), 1).unwrap();
        registry.register(tree.clone(), 1).unwrap();

        let instance = spawn_at_origin(&mut registry, &rock);
        assert_eq!(instance.kind(), Some(&rock));

        registry.despawn(instance);
        assert_eq!(registry.idle_count(&rock), 1);
        assert_eq!(registry.idle_count(&tree), 1);
    }

    #[test]
    fn test_foreign_instance_is_discarded_not_pooled() {
        let mut home = PoolRegistry::new();
        let mut away = PoolRegistry::new();
        let kind = rock_kind("rock");
        home.register(kind.clone(), 1).unwrap();

        let instance = spawn_at_origin(&mut home, &kind);
        assert_eq!(away.despawn(instance), Despawn::Discarded);

        assert_eq!(away.pool_count(), 0);
        assert_eq!(away.stats().discarded, 1);
        // The home registry's queue is untouched too
        assert_eq!(home.idle_count(&kind), 0);
    }

    #[test]
    fn test_detached_instance_is_discarded() {
        let mut registry = PoolRegistry::new();
        let template = Template::new("rock", Blueprint::with_mesh("rock.obj"));
        let instance = Instance::detached(&template);

        assert_eq!(instance.return_to_pool(&mut registry), Despawn::Discarded);
        assert_eq!(registry.pool_count(), 0);
    }

    #[test]
    fn test_unknown_name_is_invalid_request() {
        let mut registry = PoolRegistry::new();
        let result = registry.spawn_named("ghost", Vec3::zeros(), Quat::identity());
        assert!(matches!(result, Err(PoolError::InvalidRequest(_))));
    }

    #[test]
    fn test_spawn_named_resolves_registered_kind() {
        let mut registry = PoolRegistry::new();
        let kind = rock_kind("rock");
        registry.register(kind.clone(), 1).unwrap();

        let instance = registry
            .spawn_named("rock", Vec3::zeros(), Quat::identity())
            .unwrap();
        assert_eq!(instance.kind(), Some(&kind));
    }

    #[test]
    fn test_placeholder_template_cannot_overflow() {
        let mut registry = PoolRegistry::new();
        let kind = Kind::new(Template::placeholder("pending"));
        registry.register(kind.clone(), 0).unwrap();

        let result = registry.spawn(&kind, Vec3::zeros(), Quat::identity());
        assert!(matches!(result, Err(PoolError::ResourceUnavailable(_))));
    }

    #[test]
    fn test_placeholder_template_cannot_prewarm() {
        let mut registry = PoolRegistry::new();
        let kind = Kind::new(Template::placeholder("pending"));

        let result = registry.register(kind.clone(), 3);
        assert!(matches!(result, Err(PoolError::ResourceUnavailable(_))));
        assert_eq!(registry.pool_count(), 0);
        assert!(registry.kind("pending").is_none());
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut registry = PoolRegistry::new();
        let kind = rock_kind("rock");
        registry.register(kind.clone(), 1).unwrap();

        let same_name = rock_kind("rock");
        assert!(matches!(
            registry.register(same_name, 1),
            Err(PoolError::DuplicateKind(_))
        ));
        assert!(matches!(
            registry.register(kind, 1),
            Err(PoolError::DuplicateKind(_))
        ));
    }

    #[test]
    fn test_burst_then_drain_recycles_in_order() {
        // Two pre-warmed instances, a third from overflow, then all three
        // return and come back in the exact order they were despawned.
        let mut registry = PoolRegistry::new();
        let kind = rock_kind("rock");
        registry.register(kind.clone(), 2).unwrap();

        let a = spawn_at_origin(&mut registry, &kind);
        let b = spawn_at_origin(&mut registry, &kind);
        let c = spawn_at_origin(&mut registry, &kind);
        assert_eq!(registry.stats().overflow, 1);

        let ids = [a.id(), b.id(), c.id()];
        registry.despawn(a);
        registry.despawn(b);
        registry.despawn(c);
        assert_eq!(registry.idle_count(&kind), 3);

        for id in ids {
            assert_eq!(spawn_at_origin(&mut registry, &kind).id(), id);
        }
    }

    #[test]
    fn test_stats_track_full_lifecycle() {
        let mut registry = PoolRegistry::new();
        let kind = rock_kind("rock");
        registry.register(kind.clone(), 1).unwrap();

        let a = spawn_at_origin(&mut registry, &kind); // reused
        let b = spawn_at_origin(&mut registry, &kind); // overflow
        registry.despawn(a);
        registry.despawn(b);

        let stats = registry.stats();
        assert_eq!(stats.prewarmed, 1);
        assert_eq!(stats.spawned, 2);
        assert_eq!(stats.reused, 1);
        assert_eq!(stats.overflow, 1);
        assert_eq!(stats.returned, 2);
        assert_eq!(stats.discarded, 0);
    }
}
