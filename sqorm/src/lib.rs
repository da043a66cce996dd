//!
//! sqorm: a relational provider for a storage-agnostic ORM contract.
//!
//! Records are described by a `Store` (table name and typed properties) and
//! exposed through the `Model` trait. A `Provider` turns the ORM operations
//! (put, populate, find, update, delete, count) into parameterized SQL with
//! `$1, $2, ...` placeholders and runs them on an `Engine`:
//!
//! ```text
//! Cond tree ──compile──▶ Fragment ──statement──▶ Statement ──Engine──▶ rows ──scan──▶ Model
//!              (WHERE text + values)      (SQL text + values)
//! ```
//!
//! The condition compiler numbers placeholders with one counter per
//! statement, depth first and left to right, so the bound values always
//! line up with the `$n` markers, including after an UPDATE's SET list.
//!

extern crate self as sqorm;

pub mod builder;
pub mod column;
pub mod compile;
pub mod database;
pub mod engine;
pub mod model;
pub mod predicate;
pub mod prelude;
pub mod provider;
pub mod statement;
pub mod ty;
pub mod value;

pub use builder::{Fragment, Placeholders, Statement};
pub use column::Column;
pub use compile::compile;
pub use engine::Engine;
pub use model::{downcast, Model, Prop, Store, Table};
pub use predicate::{Assign, CmpOp, Cond};
pub use provider::{Provider, SqlProvider};
pub use ty::Ty;
pub use value::Value;

#[cfg(feature = "postgres")]
pub use database::postgres::{PgEngine, PgProvider};

#[cfg(feature = "macros")]
pub use sqorm_macros::Model;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("no matching row")]
    NotFound,

    #[error(transparent)]
    Database(sqlx::Error),

    #[error("store `{0}` has no primary key")]
    MissingPrimaryKey(&'static str),

    #[error("update of `{0}` assigns nothing")]
    EmptyUpdate(&'static str),

    #[error("`{prop}` is {expected:?}, cannot bind {found:?}")]
    TypeMismatch {
        prop: &'static str,
        expected: Ty,
        found: Ty,
    },

    #[error("Scan error: {0}")]
    Scan(String),
}

impl Error {
    /// Whether this is the "no matching row" sentinel.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound,
            err => Error::Database(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_is_the_not_found_sentinel() {
        assert!(Error::from(sqlx::Error::RowNotFound).is_not_found());
    }

    #[test]
    fn other_sqlx_errors_are_carried_unchanged() {
        let err = Error::from(sqlx::Error::PoolClosed);
        assert!(matches!(err, Error::Database(sqlx::Error::PoolClosed)));
        assert!(!err.is_not_found());
    }
}
