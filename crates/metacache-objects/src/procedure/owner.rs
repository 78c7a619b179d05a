//! The procedure owner type and its parameter cache wiring

use crate::ProcedureParameter;
use metacache_core::{SchemaOwner, TypeLevel, TypeTag, Value};
use metacache_schema::{ConstructorRegistry, ObjectCache};
use std::any::Any;

/// Type tag for concrete procedure owners
pub const PROCEDURE: TypeTag = "procedure";
/// Type tag for the generic routine ancestor shared by procedures and
/// functions
pub const ROUTINE: TypeTag = "routine";
/// Capability tag for owners that enumerate procedure parameters
pub const HAS_PARAMETERS: TypeTag = "has_parameters";

/// Query enumerating a procedure's parameters in ordinal order
const PARAMETERS_QUERY: &str = "SELECT name, parameter_id, type_name, max_length, \
     precision, scale, is_output, is_cursor_ref, is_readonly, is_nullable, \
     has_default_value, default_value \
     FROM sys.parameters WHERE object_id = ? ORDER BY parameter_id";

/// A stored procedure: the owner under which parameters are cached
#[derive(Debug, Clone)]
pub struct Procedure {
    name: String,
    schema: Option<String>,
    /// Database-side object id used as the query parameter
    object_id: i64,
}

impl Procedure {
    pub fn new(name: impl Into<String>, schema: Option<String>, object_id: i64) -> Self {
        Self {
            name: name.into(),
            schema,
            object_id,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn object_id(&self) -> i64 {
        self.object_id
    }

    /// Schema-qualified name, e.g. `dbo.get_user`
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.name),
            None => self.name.clone(),
        }
    }

    /// Build the parameter cache for this procedure: the parameters query
    /// bound to this procedure's object id, constructing through the
    /// shared parameter registry.
    pub fn parameter_cache(&self) -> ObjectCache<ProcedureParameter> {
        ObjectCache::new(
            parameter_registry(),
            PARAMETERS_QUERY,
            vec![Value::Int64(self.object_id)],
        )
    }
}

impl SchemaOwner for Procedure {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_lineage(&self) -> Vec<TypeLevel> {
        vec![
            TypeLevel::with_capabilities(PROCEDURE, vec![HAS_PARAMETERS]),
            TypeLevel::new(ROUTINE),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Registry constructing `ProcedureParameter`s for any owner that carries
/// the `has_parameters` capability. Registered under the capability tag
/// rather than the concrete procedure tag so functions and other routine
/// kinds resolve to the same constructor.
pub fn parameter_registry() -> ConstructorRegistry<ProcedureParameter> {
    ConstructorRegistry::new("ProcedureParameter")
        .with_constructor(HAS_PARAMETERS, ProcedureParameter::from_row)
}
