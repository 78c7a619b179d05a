//! Constraint classification and the single-attribute pseudo-key view

use metacache_core::SchemaObject;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Classification of an entity constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintType {
    PrimaryKey,
    UniqueKey,
    ForeignKey,
    Check,
    /// Synthesized key derived by this layer, not declared in the database
    PseudoKey,
}

impl ConstraintType {
    /// Human-readable classification name
    pub fn display_name(&self) -> &'static str {
        match self {
            ConstraintType::PrimaryKey => "Primary Key",
            ConstraintType::UniqueKey => "Unique Key",
            ConstraintType::ForeignKey => "Foreign Key",
            ConstraintType::Check => "Check",
            ConstraintType::PseudoKey => "Pseudo Key",
        }
    }

    /// Whether the constraint identifies rows uniquely
    pub fn is_unique(&self) -> bool {
        matches!(
            self,
            ConstraintType::PrimaryKey | ConstraintType::UniqueKey | ConstraintType::PseudoKey
        )
    }
}

/// Attribute descriptor referenced by constraints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityAttribute {
    pub name: String,
    pub data_type: String,
    /// 0-based ordinal within the entity
    pub ordinal: usize,
    pub nullable: bool,
    pub description: Option<String>,
}

impl SchemaObject for EntityAttribute {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A constraint-like reference over an entity's attributes.
///
/// The synthesized pseudo key is a tagged case of this capability rather
/// than a parallel type hierarchy, so callers treat it exactly like any
/// declared constraint. Fully immutable after construction.
pub enum EntityReferrer {
    /// Synthesized key wrapping exactly one attribute of the parent
    /// entity
    PseudoKey {
        entity: Arc<dyn SchemaObject>,
        attribute: Arc<EntityAttribute>,
    },
}

impl EntityReferrer {
    /// Wrap one attribute of an entity as a pseudo-key view
    pub fn pseudo_key(entity: Arc<dyn SchemaObject>, attribute: Arc<EntityAttribute>) -> Self {
        EntityReferrer::PseudoKey { entity, attribute }
    }

    /// Constraint classification tag
    pub fn constraint_type(&self) -> ConstraintType {
        match self {
            EntityReferrer::PseudoKey { .. } => ConstraintType::PseudoKey,
        }
    }

    /// Referrer name, taken from the constraint classification
    pub fn name(&self) -> &'static str {
        self.constraint_type().display_name()
    }

    /// The entity this referrer belongs to
    pub fn parent_entity(&self) -> &Arc<dyn SchemaObject> {
        match self {
            EntityReferrer::PseudoKey { entity, .. } => entity,
        }
    }

    /// The referenced attributes; a single-element sequence for a pseudo
    /// key
    pub fn attribute_refs(&self) -> Vec<Arc<EntityAttribute>> {
        match self {
            EntityReferrer::PseudoKey { attribute, .. } => vec![Arc::clone(attribute)],
        }
    }

    /// Description delegated to the wrapped attribute
    pub fn description(&self) -> Option<&str> {
        match self {
            EntityReferrer::PseudoKey { attribute, .. } => attribute.description.as_deref(),
        }
    }

    /// A pseudo key is derived, not physically stored, but reports itself
    /// as persisted so it renders like any other constraint
    pub fn is_persisted(&self) -> bool {
        true
    }
}
