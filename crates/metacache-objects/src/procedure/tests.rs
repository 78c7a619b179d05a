//! Tests for procedures and their cached parameters

use super::*;
use async_trait::async_trait;
use metacache_core::{
    PreparedQuery, ProgressMonitor, Result, Row, RowCursor, RowSource, SchemaObject, SchemaOwner,
    Value,
};

// ============================================================================
// ParameterMode Tests
// ============================================================================

#[test]
fn test_parameter_mode_in_is_input() {
    let mode = ParameterMode::In;
    assert!(mode.is_input());
    assert!(!mode.is_output());
}

#[test]
fn test_parameter_mode_out_is_output() {
    let mode = ParameterMode::Out;
    assert!(!mode.is_input());
    assert!(mode.is_output());
}

#[test]
fn test_parameter_mode_inout_is_both() {
    let mode = ParameterMode::InOut;
    assert!(mode.is_input());
    assert!(mode.is_output());
}

#[test]
fn test_parameter_mode_result_set_is_neither() {
    let mode = ParameterMode::ResultSet;
    assert!(!mode.is_input());
    assert!(!mode.is_output());
}

#[test]
fn test_parameter_mode_default() {
    assert_eq!(ParameterMode::default(), ParameterMode::In);
}

#[test]
fn test_parameter_mode_serialization() {
    let json = serde_json::to_string(&ParameterMode::ResultSet).unwrap();
    assert_eq!(json, "\"result_set\"");

    let deserialized: ParameterMode = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized, ParameterMode::ResultSet);
}

// ============================================================================
// ProcedureParameter Tests
// ============================================================================

struct ColumnSpec(&'static str, Value);

fn row_with(columns: Vec<ColumnSpec>) -> Row {
    let names = columns.iter().map(|c| c.0.to_string()).collect();
    let values = columns.into_iter().map(|c| c.1).collect();
    Row::new(names, values)
}

fn flags_row(is_output: i64, is_cursor_ref: i64, is_readonly: i64) -> Row {
    row_with(vec![
        ColumnSpec("name", Value::String("@p".to_string())),
        ColumnSpec("is_output", Value::Int64(is_output)),
        ColumnSpec("is_cursor_ref", Value::Int64(is_cursor_ref)),
        ColumnSpec("is_readonly", Value::Int64(is_readonly)),
    ])
}

fn owner() -> Procedure {
    Procedure::new("get_user", Some("dbo".to_string()), 1201)
}

#[test]
fn test_from_row_reads_all_columns() {
    let row = row_with(vec![
        ColumnSpec("name", Value::String("@amount".to_string())),
        ColumnSpec("parameter_id", Value::Int32(2)),
        ColumnSpec("type_name", Value::String("decimal".to_string())),
        ColumnSpec("max_length", Value::Int64(9)),
        ColumnSpec("precision", Value::Int64(10)),
        ColumnSpec("scale", Value::Int64(2)),
        ColumnSpec("is_output", Value::Int64(0)),
        ColumnSpec("is_cursor_ref", Value::Int64(0)),
        ColumnSpec("is_readonly", Value::Int64(1)),
        ColumnSpec("is_nullable", Value::Int64(1)),
        ColumnSpec("has_default_value", Value::Int64(1)),
        ColumnSpec("default_value", Value::String("0.00".to_string())),
    ]);

    let param = ProcedureParameter::from_row(&owner(), &row).unwrap();
    assert_eq!(param.name, "@amount");
    assert_eq!(param.ordinal_position, 2);
    assert_eq!(param.type_name, "decimal");
    assert_eq!(param.max_length, 9);
    assert_eq!(param.precision, 10);
    assert_eq!(param.scale, 2);
    assert_eq!(param.mode, ParameterMode::In);
    assert!(param.nullable);
    assert!(!param.is_required());
    assert_eq!(param.default_value.as_deref(), Some("0.00"));
}

#[test]
fn test_mode_cursor_wins_over_output() {
    let param = ProcedureParameter::from_row(&owner(), &flags_row(1, 1, 0)).unwrap();
    assert_eq!(param.mode, ParameterMode::ResultSet);
}

#[test]
fn test_mode_output() {
    let param = ProcedureParameter::from_row(&owner(), &flags_row(1, 0, 0)).unwrap();
    assert_eq!(param.mode, ParameterMode::Out);
}

#[test]
fn test_mode_readonly_is_input() {
    let param = ProcedureParameter::from_row(&owner(), &flags_row(0, 0, 1)).unwrap();
    assert_eq!(param.mode, ParameterMode::In);
}

#[test]
fn test_mode_defaults_to_inout() {
    let param = ProcedureParameter::from_row(&owner(), &flags_row(0, 0, 0)).unwrap();
    assert_eq!(param.mode, ParameterMode::InOut);
}

#[test]
fn test_default_value_requires_flag() {
    // default_value present but has_default_value unset: ignored
    let row = row_with(vec![
        ColumnSpec("name", Value::String("@p".to_string())),
        ColumnSpec("has_default_value", Value::Int64(0)),
        ColumnSpec("default_value", Value::String("42".to_string())),
    ]);
    let param = ProcedureParameter::from_row(&owner(), &row).unwrap();
    assert_eq!(param.default_value, None);
}

#[test]
fn test_sparse_row_falls_back_to_safe_defaults() {
    let row = row_with(vec![ColumnSpec(
        "name",
        Value::String("@retval".to_string()),
    )]);
    let param = ProcedureParameter::from_row(&owner(), &row).unwrap();

    assert_eq!(param.name, "@retval");
    assert_eq!(param.ordinal_position, 0);
    assert_eq!(param.type_name, "");
    assert_eq!(param.max_length, 0);
    assert_eq!(param.mode, ParameterMode::InOut);
    assert!(!param.nullable);
    assert!(param.is_required());
    assert_eq!(param.default_value, None);
}

#[test]
fn test_full_type_name_rendering() {
    let mut param = ProcedureParameter::from_row(&owner(), &flags_row(0, 0, 1)).unwrap();

    param.type_name = "decimal".to_string();
    param.precision = 10;
    param.scale = 2;
    assert_eq!(param.full_type_name(), "decimal(10,2)");

    param.type_name = "numeric".to_string();
    param.scale = 0;
    assert_eq!(param.full_type_name(), "numeric(10)");

    param.type_name = "varchar".to_string();
    param.precision = 0;
    param.max_length = 255;
    assert_eq!(param.full_type_name(), "varchar(255)");

    param.type_name = "int".to_string();
    param.max_length = 0;
    assert_eq!(param.full_type_name(), "int");
}

#[test]
fn test_parameter_is_a_schema_object() {
    let param = ProcedureParameter::from_row(&owner(), &flags_row(0, 0, 1)).unwrap();
    let object: &dyn SchemaObject = &param;
    assert_eq!(object.name(), "@p");
    assert!(object.is_persisted());
}

#[test]
fn test_parameter_serialization_round_trip() {
    let param = ProcedureParameter::from_row(&owner(), &flags_row(1, 0, 0)).unwrap();
    let json = serde_json::to_string(&param).unwrap();
    let back: ProcedureParameter = serde_json::from_str(&json).unwrap();
    assert_eq!(back, param);
}

// ============================================================================
// Procedure Owner Tests
// ============================================================================

#[test]
fn test_qualified_name() {
    assert_eq!(owner().qualified_name(), "dbo.get_user");
    let bare = Procedure::new("cleanup", None, 7);
    assert_eq!(bare.qualified_name(), "cleanup");
}

#[test]
fn test_type_lineage_most_derived_first() {
    let lineage = owner().type_lineage();
    assert_eq!(lineage.len(), 2);
    assert_eq!(lineage[0].type_tag, PROCEDURE);
    assert_eq!(lineage[0].capabilities, vec![HAS_PARAMETERS]);
    assert_eq!(lineage[1].type_tag, ROUTINE);
    assert!(lineage[1].capabilities.is_empty());
}

#[test]
fn test_parameter_registry_uses_capability_tag() {
    let registry = parameter_registry();
    assert!(registry.is_registered(HAS_PARAMETERS));
    assert!(!registry.is_registered(PROCEDURE));
}

// ============================================================================
// Parameter Cache End-to-End
// ============================================================================

struct StaticSource {
    rows: Vec<Row>,
}

#[async_trait]
impl RowSource for StaticSource {
    async fn prepare(&self, _query: &str) -> Result<Box<dyn PreparedQuery>> {
        Ok(Box::new(StaticStatement {
            rows: self.rows.clone(),
        }))
    }
}

struct StaticStatement {
    rows: Vec<Row>,
}

#[async_trait]
impl PreparedQuery for StaticStatement {
    fn bind(&mut self, _position: usize, _value: Value) -> Result<()> {
        Ok(())
    }

    async fn execute(&mut self) -> Result<Box<dyn RowCursor>> {
        Ok(Box::new(StaticCursor {
            rows: std::mem::take(&mut self.rows).into_iter(),
        }))
    }
}

struct StaticCursor {
    rows: std::vec::IntoIter<Row>,
}

#[async_trait]
impl RowCursor for StaticCursor {
    async fn next_row(&mut self) -> Result<Option<Row>> {
        Ok(self.rows.next())
    }
}

fn parameter_row(name: &str, id: i64, type_name: &str, is_output: i64) -> Row {
    row_with(vec![
        ColumnSpec("name", Value::String(name.to_string())),
        ColumnSpec("parameter_id", Value::Int64(id)),
        ColumnSpec("type_name", Value::String(type_name.to_string())),
        ColumnSpec("is_output", Value::Int64(is_output)),
        ColumnSpec("is_readonly", Value::Int64(1 - is_output)),
    ])
}

#[tokio::test]
async fn test_parameter_cache_resolves_via_capability() {
    // `Procedure` registers no constructor under its exact type tag; the
    // cache resolves through the `has_parameters` capability.
    let procedure = owner();
    let source = StaticSource {
        rows: vec![
            parameter_row("@user_id", 1, "bigint", 0),
            parameter_row("@name", 2, "varchar", 0),
            parameter_row("@found", 3, "bit", 1),
        ],
    };

    let cache = procedure.parameter_cache();
    let params = cache
        .get_objects(&ProgressMonitor::new(), &source, &procedure)
        .await
        .expect("resolves through capability and populates");

    assert_eq!(params.len(), 3);
    let names: Vec<&str> = params.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["@user_id", "@name", "@found"]);

    // 0-based position lookup: position 1 is the second row's object
    assert_eq!(cache.object_at(1).unwrap().name, "@name");
    assert_eq!(
        cache.object_by_name("@found").unwrap().mode,
        ParameterMode::Out
    );
    assert_eq!(
        cache.object_by_name("@user_id").unwrap().mode,
        ParameterMode::In
    );
}
