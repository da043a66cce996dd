//!
//! Record reflection: the stores (tables) records live in, their
//! properties (columns), and the records themselves.
//!

use std::any::Any;

use crate::predicate::{Assign, CmpOp, Cond};
use crate::ty::Ty;
use crate::value::Value;
use crate::{Error, Result};

/// A named, typed column of a store.
#[derive(Clone, Copy, Debug)]
pub struct Prop {
    name: &'static str,
    ty: Ty,
    pk: bool,
}

impl Prop {
    pub const fn new(name: &'static str, ty: Ty, pk: bool) -> Self {
        Self { name, ty, pk }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ty(&self) -> Ty {
        self.ty
    }

    pub fn is_pk(&self) -> bool {
        self.pk
    }

    pub fn eq(self, value: impl Into<Value>) -> Cond {
        Cond::cmp(self, CmpOp::Eq, value)
    }

    pub fn neq(self, value: impl Into<Value>) -> Cond {
        Cond::cmp(self, CmpOp::Neq, value)
    }

    pub fn lt(self, value: impl Into<Value>) -> Cond {
        Cond::cmp(self, CmpOp::Lt, value)
    }

    pub fn lte(self, value: impl Into<Value>) -> Cond {
        Cond::cmp(self, CmpOp::Lte, value)
    }

    pub fn gt(self, value: impl Into<Value>) -> Cond {
        Cond::cmp(self, CmpOp::Gt, value)
    }

    pub fn gte(self, value: impl Into<Value>) -> Cond {
        Cond::cmp(self, CmpOp::Gte, value)
    }

    /// Assignment of a new value to this property, for updates.
    pub fn set(self, value: impl Into<Value>) -> Assign {
        Assign {
            prop: self,
            value: value.into(),
        }
    }
}

/// # Store
///
/// The table a record type maps to, together with its column metadata.
pub trait Store: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// All properties, in column order.
    fn props(&self) -> &'static [Prop];

    /// The primary key property, if the store has one.
    fn pk(&self) -> Option<&'static Prop> {
        self.props().iter().find(|prop| prop.is_pk())
    }

    /// Create a fresh, empty record of this store.
    fn model(&self) -> Box<dyn Model>;
}

impl std::fmt::Debug for dyn Store {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "Store({})", self.name())
    }
}

/// # Model
///
/// A record instance. Values go in and out in the order of
/// `self.store().props()`.
pub trait Model: Send + Sync + 'static {
    fn store(&self) -> &'static dyn Store;

    /// All property values, in column order.
    fn values(&self) -> Vec<Value>;

    /// The primary key value.
    fn pk(&self) -> Value;

    /// Write a decoded row into the record, one value per property.
    fn scan(&mut self, values: Vec<Value>) -> Result<()>;

    /// Write the primary key alone.
    fn scan_pk(&mut self, value: Value) -> Result<()>;

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

/// A concrete model type with a statically known store.
pub trait Table: Model + Default + Sized {
    fn store() -> &'static dyn Store;
}

/// Convert type-erased records, e.g. from `Provider::find`, back into `T`.
pub fn downcast<T: Table>(models: Vec<Box<dyn Model>>) -> Result<Vec<T>> {
    models
        .into_iter()
        .map(|model| {
            let store = model.store().name();
            model
                .into_any()
                .downcast::<T>()
                .map(|boxed| *boxed)
                .map_err(|_| {
                    Error::Scan(format!("record of `{}` is not the requested type", store))
                })
        })
        .collect()
}

/// Pull the next value for `prop` out of a row being scanned.
///
/// Used by derived `Model::scan` implementations.
pub fn next_value(values: &mut impl Iterator<Item = Value>, prop: &str) -> Result<Value> {
    values
        .next()
        .ok_or_else(|| Error::Scan(format!("row has no value for `{}`", prop)))
}
