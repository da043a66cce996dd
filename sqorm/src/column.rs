//!
//! Mapping between Rust field types and column values.
//!

use uuid::Uuid;

use crate::ty::Ty;
use crate::value::Value;
use crate::{Error, Result};

/// A Rust type that can be stored in a single column.
///
/// Implemented for the primitive types the backends support, and for
/// `Option<T>` of each, where `None` is NULL.
pub trait Column: Sized + Send + Sync + 'static {
    const TY: Ty;

    fn to_value(&self) -> Value;

    fn from_value(value: Value) -> Result<Self>;
}

macro_rules! impl_column {
    ($($t:ty => $ty:ident, $($variant:ident)|+;)*) => {
        $(
            impl Column for $t {
                const TY: Ty = Ty::$ty;

                fn to_value(&self) -> Value {
                    Value::from(self.clone())
                }

                #[allow(clippy::unnecessary_cast)]
                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        $(Value::$variant(v) => Ok(v as $t),)+
                        other => Err(mismatch(Ty::$ty, &other)),
                    }
                }
            }
        )*
    };
}

impl_column! {
    bool => Bool, Bool;
    i16 => Int2, I16;
    i32 => Int4, I32 | I16;
    i64 => Int8, I64 | I32 | I16;
    f32 => Float4, F32;
    f64 => Float8, F64 | F32;
}

impl Column for String {
    const TY: Ty = Ty::Text;

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Text(v) => Ok(v),
            other => Err(mismatch(Ty::Text, &other)),
        }
    }
}

impl Column for Uuid {
    const TY: Ty = Ty::Uuid;

    fn to_value(&self) -> Value {
        Value::Uuid(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Uuid(v) => Ok(v),
            other => Err(mismatch(Ty::Uuid, &other)),
        }
    }
}

impl<T: Column> Column for Option<T> {
    const TY: Ty = T::TY;

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null(T::TY),
        }
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null(_) => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

fn mismatch(expected: Ty, found: &Value) -> Error {
    Error::Scan(format!("expected {:?}, found {:?}", expected, found))
}
