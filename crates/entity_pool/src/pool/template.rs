//! Templates and kinds
//!
//! A [`Template`] is the immutable blueprint instances are constructed from.
//! A [`Kind`] is a cheap-clone identity key over a template: equality and
//! hashing go by pointer identity, so two templates with identical contents
//! remain distinct kinds.

use crate::foundation::math::Vec3;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Visual payload of a template
///
/// References assets by name the way the rendering side expects them; the
/// pool itself only copies the scale onto constructed instances.
#[derive(Debug, Clone, PartialEq)]
pub struct Blueprint {
    /// Mesh asset name
    pub mesh: String,

    /// Material asset name
    pub material: String,

    /// Uniform scale applied to constructed instances
    pub scale: Vec3,
}

impl Blueprint {
    /// Create a blueprint referencing the given mesh asset
    pub fn with_mesh(mesh: impl Into<String>) -> Self {
        Self {
            mesh: mesh.into(),
            material: "default".to_string(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    /// Set the material asset name
    #[must_use]
    pub fn material(mut self, material: impl Into<String>) -> Self {
        self.material = material.into();
        self
    }

    /// Set the instance scale
    #[must_use]
    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

/// Immutable prototype blueprint for one kind of instance
///
/// A template without a blueprint body is a *placeholder*: it carries identity
/// (kinds can be declared before their assets exist) but cannot construct
/// instances, so pre-warming or overflow against it fails with
/// [`PoolError::ResourceUnavailable`](super::PoolError::ResourceUnavailable).
#[derive(Debug)]
pub struct Template {
    name: String,
    blueprint: Option<Blueprint>,
}

impl Template {
    /// Create a template with a blueprint body
    pub fn new(name: impl Into<String>, blueprint: Blueprint) -> Self {
        Self {
            name: name.into(),
            blueprint: Some(blueprint),
        }
    }

    /// Declare a template by name only, without a constructible body
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blueprint: None,
        }
    }

    /// Get the template name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the blueprint body, if this template has one
    pub fn blueprint(&self) -> Option<&Blueprint> {
        self.blueprint.as_ref()
    }
}

/// Identity key distinguishing one template from another
///
/// Cloning a `Kind` clones a handle to the same template; two independently
/// created templates never compare equal, even with identical contents.
#[derive(Clone)]
pub struct Kind(Arc<Template>);

impl Kind {
    /// Create the kind for a template, taking ownership of it
    pub fn new(template: Template) -> Self {
        Self(Arc::new(template))
    }

    /// Get the template name
    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// Get the underlying template
    pub fn template(&self) -> &Template {
        &self.0
    }
}

impl PartialEq for Kind {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Kind {}

impl Hash for Kind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Kind").field(&self.name()).finish()
    }
}
