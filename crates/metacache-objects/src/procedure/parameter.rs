//! Procedure parameter built from one query result row

use metacache_core::{Row, SchemaObject, SchemaOwner};
use serde::{Deserialize, Serialize};

/// Parameter direction mode for stored procedures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterMode {
    /// Input parameter - value is passed to the procedure
    In,
    /// Output parameter - value is returned from the procedure
    Out,
    /// Input/Output parameter - value is passed in and can be modified
    InOut,
    /// Cursor-typed parameter producing a result set
    ResultSet,
}

impl ParameterMode {
    /// Check if this parameter accepts input values
    pub fn is_input(&self) -> bool {
        matches!(self, ParameterMode::In | ParameterMode::InOut)
    }

    /// Check if this parameter produces output values
    pub fn is_output(&self) -> bool {
        matches!(self, ParameterMode::Out | ParameterMode::InOut)
    }
}

impl Default for ParameterMode {
    fn default() -> Self {
        ParameterMode::In
    }
}

/// A stored procedure parameter materialized from a metadata row.
///
/// Name and ordinal position are fixed at construction; the default value
/// may be edited afterwards (e.g. from a designer panel).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureParameter {
    /// Parameter name (with the dialect's prefix, e.g. `@user_id`)
    pub name: String,
    /// Ordinal position as reported by the database
    pub ordinal_position: i64,
    /// Base type name (e.g. "varchar", "decimal")
    pub type_name: String,
    /// Maximum length in bytes (for string/binary types)
    pub max_length: i64,
    /// Numeric precision
    pub precision: i64,
    /// Numeric scale
    pub scale: i64,
    /// Parameter direction
    pub mode: ParameterMode,
    /// Whether the parameter accepts NULL
    pub nullable: bool,
    /// Declared default value, if any
    pub default_value: Option<String>,
}

impl ProcedureParameter {
    /// Build a parameter from one sys.parameters-shaped result row.
    ///
    /// Column access uses safe semantics throughout: a missing or NULL
    /// column falls back to the zero value instead of failing the row.
    /// The direction is derived from the cursor/output/readonly flags:
    /// cursor wins over output, output over readonly, and a parameter
    /// that is neither readonly nor output is treated as in/out.
    pub fn from_row(_owner: &dyn SchemaOwner, row: &Row) -> anyhow::Result<Self> {
        let is_output = row.get_int("is_output") != 0;
        let is_cursor = row.get_int("is_cursor_ref") != 0;
        let readonly = row.get_int("is_readonly") != 0;
        let mode = if is_cursor {
            ParameterMode::ResultSet
        } else if is_output {
            ParameterMode::Out
        } else if readonly {
            ParameterMode::In
        } else {
            ParameterMode::InOut
        };

        let default_value = if row.get_int("has_default_value") != 0 {
            Some(row.get_string("default_value"))
        } else {
            None
        };

        Ok(Self {
            name: row.get_string("name"),
            ordinal_position: row.get_int("parameter_id"),
            type_name: row.get_string("type_name"),
            max_length: row.get_int("max_length"),
            precision: row.get_int("precision"),
            scale: row.get_int("scale"),
            mode,
            nullable: row.get_int("is_nullable") != 0,
            default_value,
        })
    }

    /// Whether a value must be supplied for this parameter
    pub fn is_required(&self) -> bool {
        !self.nullable
    }

    /// Render the full type name with length/precision/scale, e.g.
    /// `decimal(10,2)` or `varchar(255)`.
    pub fn full_type_name(&self) -> String {
        if self.precision > 0 && self.scale > 0 {
            format!("{}({},{})", self.type_name, self.precision, self.scale)
        } else if self.precision > 0 {
            format!("{}({})", self.type_name, self.precision)
        } else if self.max_length > 0 {
            format!("{}({})", self.type_name, self.max_length)
        } else {
            self.type_name.clone()
        }
    }
}

impl SchemaObject for ProcedureParameter {
    fn name(&self) -> &str {
        &self.name
    }
}
