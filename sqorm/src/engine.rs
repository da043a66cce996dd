use async_trait::async_trait;

use crate::builder::Statement;
use crate::ty::Ty;
use crate::value::Value;
use crate::Result;

///
/// The SQL execution capability a provider runs its statements on.
///
/// An `Engine` owns (or shares) the connections. It binds the statement's
/// values to their positional placeholders, and decodes result columns
/// according to the column types it is given.
///
#[async_trait]
pub trait Engine: Send + Sync {
    /// Execute a statement, returning the number of rows affected.
    async fn execute(&self, statement: &Statement) -> Result<u64>;

    /// Fetch exactly one row.
    ///
    /// Must fail with `Error::NotFound` when the statement yields no rows.
    async fn query_row(&self, statement: &Statement, columns: &[Ty]) -> Result<Vec<Value>>;

    /// Fetch all rows, in result-set order.
    async fn query(&self, statement: &Statement, columns: &[Ty]) -> Result<Vec<Vec<Value>>>;
}
