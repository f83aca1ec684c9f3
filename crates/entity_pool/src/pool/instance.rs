//! Instances and their resource handles
//!
//! Every instance carries a [`ResourceHandle`] recording which registry and
//! kind produced it, so a returned instance can be routed back to the queue
//! of its original kind no matter which path constructed it (pre-warm,
//! overflow, or lazy pool).

use super::registry::{Despawn, PoolRegistry, RegistryId};
use super::template::{Blueprint, Kind, Template};
use crate::foundation::math::{Quat, Transform, Vec3};
use std::sync::atomic::{AtomicU64, Ordering};

/// Instance identifier, unique for the process lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(u64);

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

impl InstanceId {
    pub(super) fn next() -> Self {
        Self(NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the numeric id
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Per-instance metadata identifying the owning registry and kind
///
/// Attached exactly once, at construction time, by whichever path created
/// the instance; it is never reassigned afterwards. Detached handles mark
/// instances the pool system does not manage.
#[derive(Debug, Clone)]
pub struct ResourceHandle {
    registry: Option<RegistryId>,
    kind: Option<Kind>,
}

impl ResourceHandle {
    pub(super) fn pooled(registry: RegistryId, kind: Kind) -> Self {
        Self {
            registry: Some(registry),
            kind: Some(kind),
        }
    }

    /// Create a handle for an instance no registry manages
    pub fn detached() -> Self {
        Self {
            registry: None,
            kind: None,
        }
    }

    /// Get the kind that produced the instance, if any
    pub fn kind(&self) -> Option<&Kind> {
        self.kind.as_ref()
    }

    pub(super) fn registry(&self) -> Option<RegistryId> {
        self.registry
    }

    /// Whether the instance belongs to a registry
    pub fn is_pooled(&self) -> bool {
        self.registry.is_some()
    }
}

/// A live object produced from a template
///
/// At any point an instance is in exactly one of two states: *idle* (owned by
/// its kind's queue, deactivated) or *active* (checked out to one caller,
/// positioned, usable). [`PoolRegistry::spawn`] returns instances by value and
/// [`PoolRegistry::despawn`] takes them back, so no instance can be referenced
/// by a queue and a caller at the same time.
#[derive(Debug)]
pub struct Instance {
    id: InstanceId,
    handle: ResourceHandle,
    transform: Transform,
    active: bool,
}

impl Instance {
    pub(super) fn from_blueprint(handle: ResourceHandle, blueprint: &Blueprint) -> Self {
        Self {
            id: InstanceId::next(),
            handle,
            transform: Transform {
                scale: blueprint.scale,
                ..Default::default()
            },
            active: false,
        }
    }

    /// Construct an instance outside any registry
    ///
    /// Mirrors direct instantiation by a host that bypasses the pool; a
    /// registry asked to despawn such an instance discards it rather than
    /// enqueuing it.
    pub fn detached(template: &Template) -> Self {
        let transform = template.blueprint().map_or_else(Transform::default, |b| Transform {
            scale: b.scale,
            ..Default::default()
        });
        Self {
            id: InstanceId::next(),
            handle: ResourceHandle::detached(),
            transform,
            active: false,
        }
    }

    /// Get the instance id
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Get the resource handle
    pub fn handle(&self) -> &ResourceHandle {
        &self.handle
    }

    /// Get the kind that produced this instance, if any
    pub fn kind(&self) -> Option<&Kind> {
        self.handle.kind()
    }

    /// Get the current transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Get the current transform mutably (for callers moving a live instance)
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Whether the instance is currently active
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(super) fn activate(&mut self, position: Vec3, rotation: Quat) {
        self.transform.set_position_rotation(position, rotation);
        self.active = true;
    }

    pub(super) fn deactivate(&mut self) {
        self.active = false;
    }

    /// Return this instance to the pool it came from
    ///
    /// Convenience for [`PoolRegistry::despawn`]; instances with a detached
    /// handle are deactivated and dropped, never pooled.
    pub fn return_to_pool(self, registry: &mut PoolRegistry) -> Despawn {
        registry.despawn(self)
    }
}
