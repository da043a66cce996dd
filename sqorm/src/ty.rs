//!
//! Column types understood by the SQL backends.
//!

use crate::value::Value;

/// The type of a database column.
///
/// Every `Value` bound to a statement, and every column decoded from a
/// result row, is described by one of these.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Ty {
    Bool,
    Int2,
    Int4,
    Int8,
    Float4,
    Float8,
    Text,
    Uuid,
}

impl Ty {
    pub fn is_integer(self) -> bool {
        matches!(self, Ty::Int2 | Ty::Int4 | Ty::Int8)
    }

    pub fn is_float(self) -> bool {
        matches!(self, Ty::Float4 | Ty::Float8)
    }

    /// Whether a value may be bound where a column of this type is expected.
    ///
    /// Integer widths are interchangeable, and integers are accepted by
    /// float columns. Everything else must match exactly.
    pub fn accepts(self, value: &Value) -> bool {
        let other = value.ty();
        if self.is_integer() {
            other.is_integer()
        } else if self.is_float() {
            other.is_float() || other.is_integer()
        } else {
            self == other
        }
    }
}
