//! Constructor registry for building cached objects from rows
//!
//! An explicit factory table: callers register one construction closure
//! per owner type or capability tag, and resolution walks the owner's
//! declared type lineage to pick the best match.

use metacache_core::{MetaCacheError, Result, Row, SchemaOwner, TypeLevel, TypeTag};
use std::collections::HashMap;
use std::sync::Arc;

/// A construction function building one cached object from `(owner, row)`.
///
/// Closures report failures through `anyhow` so the underlying cause
/// survives into `MetaCacheError::ObjectConstruction`.
pub type ConstructorFn<T> =
    Arc<dyn Fn(&dyn SchemaOwner, &Row) -> anyhow::Result<T> + Send + Sync>;

/// Registry of construction functions for one cached object type.
///
/// Resolution order is fixed: lineage levels are walked most-derived
/// first; at each level the exact type tag is tried before the level's
/// capability tags, and capability tags are tried in declaration order.
/// The first hit wins.
pub struct ConstructorRegistry<T> {
    object_type: &'static str,
    constructors: HashMap<TypeTag, ConstructorFn<T>>,
}

impl<T> ConstructorRegistry<T> {
    /// Create an empty registry. `object_type` is the cached object's
    /// display name, used in resolution failure messages.
    pub fn new(object_type: &'static str) -> Self {
        Self {
            object_type,
            constructors: HashMap::new(),
        }
    }

    /// Display name of the cached object type
    pub fn object_type(&self) -> &'static str {
        self.object_type
    }

    /// Register a construction function under an owner type or capability
    /// tag. Re-registering a tag replaces the previous closure.
    pub fn register<F>(&mut self, tag: TypeTag, constructor: F)
    where
        F: Fn(&dyn SchemaOwner, &Row) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        tracing::trace!(
            object_type = self.object_type,
            tag = tag,
            "registering constructor"
        );
        self.constructors.insert(tag, Arc::new(constructor));
    }

    /// Builder-style `register`
    pub fn with_constructor<F>(mut self, tag: TypeTag, constructor: F) -> Self
    where
        F: Fn(&dyn SchemaOwner, &Row) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        self.register(tag, constructor);
        self
    }

    /// Check whether a constructor is registered for a tag
    pub fn is_registered(&self, tag: TypeTag) -> bool {
        self.constructors.contains_key(tag)
    }

    /// Resolve the construction function for an owner's type lineage.
    ///
    /// Fails with `ConstructionUnresolved` when no level's type tag or
    /// capability tag has a registered constructor; this is fatal for the
    /// entire fetch.
    pub fn resolve(&self, lineage: &[TypeLevel]) -> Result<ConstructorFn<T>> {
        for level in lineage {
            if let Some(constructor) = self.constructors.get(level.type_tag) {
                tracing::debug!(
                    object_type = self.object_type,
                    tag = level.type_tag,
                    "resolved constructor via exact type tag"
                );
                return Ok(Arc::clone(constructor));
            }
            for capability in &level.capabilities {
                if let Some(constructor) = self.constructors.get(capability) {
                    tracing::debug!(
                        object_type = self.object_type,
                        level = level.type_tag,
                        tag = capability,
                        "resolved constructor via capability tag"
                    );
                    return Ok(Arc::clone(constructor));
                }
            }
        }
        Err(MetaCacheError::ConstructionUnresolved(
            self.object_type.to_string(),
        ))
    }
}
