use uuid::Uuid;

use crate::ty::Ty;

/// A value bound to a statement placeholder, or decoded from a result row.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// SQL NULL. Carries the column type so the engine can declare the
    /// parameter type when binding it.
    Null(Ty),
    Bool(bool),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Text(String),
    Uuid(Uuid),
}

impl Value {
    pub fn ty(&self) -> Ty {
        match self {
            Value::Null(ty) => *ty,
            Value::Bool(_) => Ty::Bool,
            Value::I16(_) => Ty::Int2,
            Value::I32(_) => Ty::Int4,
            Value::I64(_) => Ty::Int8,
            Value::F32(_) => Ty::Float4,
            Value::F64(_) => Ty::Float8,
            Value::Text(_) => Ty::Text,
            Value::Uuid(_) => Ty::Uuid,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null(_))
    }

    /// Whether this is the "empty" value of its type.
    ///
    /// A primary key holding its zero value is taken to be generated by the
    /// database on insert.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Null(_) => true,
            Value::Bool(v) => !*v,
            Value::I16(v) => *v == 0,
            Value::I32(v) => *v == 0,
            Value::I64(v) => *v == 0,
            Value::F32(v) => *v == 0.0,
            Value::F64(v) => *v == 0.0,
            Value::Text(v) => v.is_empty(),
            Value::Uuid(v) => v.is_nil(),
        }
    }
}

macro_rules! impl_from {
    ($($t:ty => $variant:ident),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from!(
    bool => Bool,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    String => Text,
    Uuid => Uuid
);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_owned())
    }
}
