//!
//! The ORM-facing provider contract, and its implementation on top of any
//! SQL `Engine`.
//!

use async_trait::async_trait;
use tracing::debug;

use crate::column::Column;
use crate::engine::Engine;
use crate::model::{Model, Store};
use crate::predicate::{Assign, Cond};
use crate::statement;
use crate::ty::Ty;
use crate::value::Value;
use crate::{Error, Result};

///
/// Storage operations of the ORM.
///
/// Every operation is a single request/response. Failures are returned to
/// the caller as they are: nothing is retried.
///
#[async_trait]
pub trait Provider: Send + Sync {
    /// Insert records, one statement per record, in order.
    ///
    /// Records whose primary key holds its zero value get the key generated
    /// by the database, and written back into the record.
    ///
    /// This is not atomic: the first failure aborts the remaining records,
    /// and records inserted before it stay inserted.
    async fn put(&self, models: &mut [&mut dyn Model]) -> Result<()>;

    /// Load the record with primary key `pk` into `model`.
    async fn populate(&self, model: &mut dyn Model, pk: Value) -> Result<()>;

    /// Find records of `store` matching `cond`.
    ///
    /// A `limit` of zero or less means no limit, and then `offset` is
    /// ignored too.
    async fn find(
        &self,
        store: &dyn Store,
        cond: Option<&Cond>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Box<dyn Model>>>;

    /// Assign values to every record of `store` matching `cond`.
    async fn update(
        &self,
        store: &dyn Store,
        cond: Option<&Cond>,
        assignments: &[Assign],
    ) -> Result<()>;

    async fn delete(&self, store: &dyn Store, cond: Option<&Cond>) -> Result<()>;

    async fn count(&self, store: &dyn Store, cond: Option<&Cond>) -> Result<i64>;

    /// The error signalling that no row matched.
    fn not_found(&self) -> Error {
        Error::NotFound
    }
}

/// `Provider` translating every operation into parameterized SQL.
#[derive(Clone, Debug)]
pub struct SqlProvider<E> {
    engine: E,
}

impl<E: Engine> SqlProvider<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

#[async_trait]
impl<E: Engine> Provider for SqlProvider<E> {
    async fn put(&self, models: &mut [&mut dyn Model]) -> Result<()> {
        for model in models.iter_mut() {
            let statement = statement::insert(&**model)?;
            let pk_ty = pk_ty(model.store())?;

            debug!(sql = %statement.sql, params = statement.values.len(), "put");

            let row = self.engine.query_row(&statement, &[pk_ty]).await?;
            model.scan_pk(single(row)?)?;
        }
        Ok(())
    }

    async fn populate(&self, model: &mut dyn Model, pk: Value) -> Result<()> {
        let store = model.store();
        let statement = statement::select_by_pk(store, pk)?;

        debug!(sql = %statement.sql, "populate");

        let row = self.engine.query_row(&statement, &column_tys(store)).await?;
        model.scan(row)
    }

    async fn find(
        &self,
        store: &dyn Store,
        cond: Option<&Cond>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Box<dyn Model>>> {
        let statement = statement::select(store, cond, limit, offset)?;

        debug!(sql = %statement.sql, params = statement.values.len(), "find");

        let rows = self.engine.query(&statement, &column_tys(store)).await?;
        let mut models = Vec::with_capacity(rows.len());
        for row in rows {
            let mut model = store.model();
            model.scan(row)?;
            models.push(model);
        }
        Ok(models)
    }

    async fn update(
        &self,
        store: &dyn Store,
        cond: Option<&Cond>,
        assignments: &[Assign],
    ) -> Result<()> {
        let set = statement::set_list(store, assignments)?;

        debug!(
            set = %set.fragment.sql,
            next_placeholder = set.placeholders + 1,
            "update"
        );

        let statement = statement::update_with(store, cond, set)?;
        debug!(sql = %statement.sql, params = statement.values.len(), "update");

        self.engine.execute(&statement).await?;
        Ok(())
    }

    async fn delete(&self, store: &dyn Store, cond: Option<&Cond>) -> Result<()> {
        let statement = statement::delete(store, cond)?;

        debug!(sql = %statement.sql, params = statement.values.len(), "delete");

        self.engine.execute(&statement).await?;
        Ok(())
    }

    async fn count(&self, store: &dyn Store, cond: Option<&Cond>) -> Result<i64> {
        let statement = statement::count(store, cond)?;

        debug!(sql = %statement.sql, params = statement.values.len(), "count");

        let row = self.engine.query_row(&statement, &[Ty::Int8]).await?;
        i64::from_value(single(row)?)
    }
}

fn column_tys(store: &dyn Store) -> Vec<Ty> {
    store.props().iter().map(|prop| prop.ty()).collect()
}

fn pk_ty(store: &dyn Store) -> Result<Ty> {
    store
        .pk()
        .map(|prop| prop.ty())
        .ok_or(Error::MissingPrimaryKey(store.name()))
}

fn single(row: Vec<Value>) -> Result<Value> {
    let mut row = row.into_iter();
    match (row.next(), row.next()) {
        (Some(value), None) => Ok(value),
        _ => Err(Error::Scan("expected a single column".to_string())),
    }
}
