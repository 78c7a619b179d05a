//! Row source traits: the narrow interface the cache consumes rows through
//!
//! The actual statement execution lives in an external collaborator (a
//! database driver). The cache only needs to prepare a query, bind the
//! fixed parameter list, and walk a forward-only cursor.

use crate::{Result, Row, Value};
use async_trait::async_trait;

/// A source of query result rows, typically backed by a live connection.
///
/// Implementations map their underlying driver failures into
/// `MetaCacheError::QueryExecution`.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Prepare a parametrized statement from a query template
    async fn prepare(&self, query: &str) -> Result<Box<dyn PreparedQuery>>;
}

/// A prepared statement awaiting parameter binding and execution
#[async_trait]
pub trait PreparedQuery: Send {
    /// Bind a positional parameter. Positions are 1-based, matching the
    /// `?` placeholders in the query template in declared order.
    fn bind(&mut self, position: usize, value: Value) -> Result<()>;

    /// Execute the statement, producing a forward-only row cursor
    async fn execute(&mut self) -> Result<Box<dyn RowCursor>>;
}

/// A forward-only, single-pass cursor over query result rows.
///
/// Each call may block on I/O (a network round-trip per row or per batch);
/// timeout policy is inherited from the underlying connection.
#[async_trait]
pub trait RowCursor: Send {
    /// Fetch the next row, or `None` when the cursor is exhausted
    async fn next_row(&mut self) -> Result<Option<Row>>;
}
