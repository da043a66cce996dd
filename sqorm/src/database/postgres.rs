use async_trait::async_trait;
use futures_util::TryStreamExt;
use sqlx::postgres::{PgArguments, PgPool, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::{Postgres, Row};

use crate::builder::Statement;
use crate::engine::Engine;
use crate::provider::SqlProvider;
use crate::ty::Ty;
use crate::value::Value;
use crate::Result;

type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// Provider backed by a Postgres connection pool.
pub type PgProvider = SqlProvider<PgEngine>;

impl SqlProvider<PgEngine> {
    /// Connect a new pool to the database at `url`.
    pub async fn connect(url: &str) -> Result<Self> {
        Ok(Self::new(PgEngine::connect(url).await?))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self::new(PgEngine::from_pool(pool))
    }
}

#[derive(Clone, Debug)]
pub struct PgEngine {
    pool: PgPool,
}

impl PgEngine {
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new().connect(url).await?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Engine for PgEngine {
    async fn execute(&self, statement: &Statement) -> Result<u64> {
        let result = bind_all(statement).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn query_row(&self, statement: &Statement, columns: &[Ty]) -> Result<Vec<Value>> {
        // `RowNotFound` converts into `Error::NotFound`.
        let row = bind_all(statement).fetch_one(&self.pool).await?;
        decode_row(&row, columns)
    }

    async fn query(&self, statement: &Statement, columns: &[Ty]) -> Result<Vec<Vec<Value>>> {
        let mut rows = bind_all(statement).fetch(&self.pool);
        let mut decoded = Vec::new();
        while let Some(row) = rows.try_next().await? {
            decoded.push(decode_row(&row, columns)?);
        }
        Ok(decoded)
    }
}

fn bind_all(statement: &Statement) -> PgQuery<'_> {
    statement
        .values
        .iter()
        .fold(sqlx::query(&statement.sql), |query, value| bind(query, value))
}

fn bind<'q>(query: PgQuery<'q>, value: &Value) -> PgQuery<'q> {
    match value {
        Value::Null(ty) => match ty {
            Ty::Bool => query.bind(None::<bool>),
            Ty::Int2 => query.bind(None::<i16>),
            Ty::Int4 => query.bind(None::<i32>),
            Ty::Int8 => query.bind(None::<i64>),
            Ty::Float4 => query.bind(None::<f32>),
            Ty::Float8 => query.bind(None::<f64>),
            Ty::Text => query.bind(None::<String>),
            Ty::Uuid => query.bind(None::<uuid::Uuid>),
        },
        Value::Bool(v) => query.bind(*v),
        Value::I16(v) => query.bind(*v),
        Value::I32(v) => query.bind(*v),
        Value::I64(v) => query.bind(*v),
        Value::F32(v) => query.bind(*v),
        Value::F64(v) => query.bind(*v),
        Value::Text(v) => query.bind(v.clone()),
        Value::Uuid(v) => query.bind(*v),
    }
}

fn decode_row(row: &PgRow, columns: &[Ty]) -> Result<Vec<Value>> {
    columns
        .iter()
        .enumerate()
        .map(|(index, ty)| decode(row, index, *ty))
        .collect()
}

fn decode(row: &PgRow, index: usize, ty: Ty) -> Result<Value> {
    let value = match ty {
        Ty::Bool => row.try_get::<Option<bool>, _>(index)?.map(Value::Bool),
        Ty::Int2 => row.try_get::<Option<i16>, _>(index)?.map(Value::I16),
        Ty::Int4 => row.try_get::<Option<i32>, _>(index)?.map(Value::I32),
        Ty::Int8 => row.try_get::<Option<i64>, _>(index)?.map(Value::I64),
        Ty::Float4 => row.try_get::<Option<f32>, _>(index)?.map(Value::F32),
        Ty::Float8 => row.try_get::<Option<f64>, _>(index)?.map(Value::F64),
        Ty::Text => row.try_get::<Option<String>, _>(index)?.map(Value::Text),
        Ty::Uuid => row.try_get::<Option<uuid::Uuid>, _>(index)?.map(Value::Uuid),
    };
    Ok(value.unwrap_or(Value::Null(ty)))
}
