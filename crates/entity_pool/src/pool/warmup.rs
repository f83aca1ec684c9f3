//! Predefined pool configuration
//!
//! The startup configuration is a list of (name, blueprint, size) entries
//! loaded from a RON or TOML file and fed to
//! [`PoolRegistry::initialize`](super::PoolRegistry::initialize). Sizes stay
//! signed through deserialization so malformed negative entries survive
//! parsing and can be skipped individually with a warning, instead of
//! failing the whole file.

use super::template::Blueprint;
use crate::config::Config;
use crate::foundation::math::Vec3;
use serde::{Deserialize, Serialize};

/// Blueprint body of a configured pool entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlueprintConfig {
    /// Mesh asset name
    pub mesh: String,

    /// Material asset name
    #[serde(default = "default_material")]
    pub material: String,

    /// Uniform scale applied to constructed instances
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
}

fn default_material() -> String {
    "default".to_string()
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl BlueprintConfig {
    /// Build the runtime blueprint this entry describes
    pub fn to_blueprint(&self) -> Blueprint {
        Blueprint::with_mesh(&self.mesh)
            .material(&self.material)
            .scaled(Vec3::new(self.scale[0], self.scale[1], self.scale[2]))
    }
}

/// One predefined pool: kind name, template blueprint, pre-warm size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolEntryConfig {
    /// Kind name, used as the catalog key
    pub name: String,

    /// Template blueprint; entries without one are skipped at initialize
    #[serde(default)]
    pub blueprint: Option<BlueprintConfig>,

    /// Number of instances to pre-warm; negative entries are skipped
    #[serde(default)]
    pub size: i64,
}

/// The full predefined pool list supplied by the host at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolSetConfig {
    /// Configured pools, in declaration order
    pub pools: Vec<PoolEntryConfig>,
}

impl Config for PoolSetConfig {}
