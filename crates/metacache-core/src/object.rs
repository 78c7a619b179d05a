//! Schema object model: cached objects, owners, and type lineage

use std::any::Any;

/// Tag identifying an owner type or one of its capabilities in the
/// constructor registry. Tags are declared as constants next to the owner
/// types that carry them.
pub type TypeTag = &'static str;

/// One level of an owner's declared type hierarchy: the concrete type tag
/// plus the capability tags declared directly at that level, in
/// declaration order.
#[derive(Debug, Clone)]
pub struct TypeLevel {
    pub type_tag: TypeTag,
    pub capabilities: Vec<TypeTag>,
}

impl TypeLevel {
    pub fn new(type_tag: TypeTag) -> Self {
        Self {
            type_tag,
            capabilities: Vec::new(),
        }
    }

    pub fn with_capabilities(type_tag: TypeTag, capabilities: Vec<TypeTag>) -> Self {
        Self {
            type_tag,
            capabilities,
        }
    }
}

/// A schema object materialized from a query result row.
///
/// Identity (name, position) is fixed at construction; mutable business
/// fields are permitted on implementors.
pub trait SchemaObject: Send + Sync {
    /// Object name, unique within its owner's collection
    fn name(&self) -> &str;

    /// Whether the object is physically stored in the database, as opposed
    /// to synthesized by this layer
    fn is_persisted(&self) -> bool {
        true
    }
}

/// The parent schema object under which child objects are enumerated and
/// cached (e.g. a procedure owning its parameters).
///
/// Owners expose their type hierarchy as data so the constructor registry
/// can match without runtime type introspection: `type_lineage` returns
/// one `TypeLevel` per ancestor, most-derived first.
pub trait SchemaOwner: Send + Sync {
    /// Owner name
    fn name(&self) -> &str;

    /// Declared type levels, most-derived first
    fn type_lineage(&self) -> Vec<TypeLevel>;

    /// Downcast access for construction closures that need the concrete
    /// owner type
    fn as_any(&self) -> &dyn Any;
}
