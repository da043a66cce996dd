use crate::model::Prop;
use crate::value::Value;

/// Comparison operators of a leaf condition.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CmpOp {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CmpOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Eq => "=",
            CmpOp::Neq => "<>",
            CmpOp::Lt => "<",
            CmpOp::Lte => "<=",
            CmpOp::Gt => ">",
            CmpOp::Gte => ">=",
        }
    }
}

/// A boolean condition tree used to filter rows.
///
/// Combinators may be nested arbitrarily. A combinator without children
/// filters nothing.
#[derive(Clone, Debug)]
pub enum Cond {
    Cmp { prop: Prop, op: CmpOp, value: Value },
    And(Vec<Cond>),
    Or(Vec<Cond>),
}

impl Cond {
    pub fn cmp(prop: Prop, op: CmpOp, value: impl Into<Value>) -> Self {
        Cond::Cmp {
            prop,
            op,
            value: value.into(),
        }
    }

    pub fn eq(prop: Prop, value: impl Into<Value>) -> Self {
        Self::cmp(prop, CmpOp::Eq, value)
    }

    pub fn neq(prop: Prop, value: impl Into<Value>) -> Self {
        Self::cmp(prop, CmpOp::Neq, value)
    }

    pub fn lt(prop: Prop, value: impl Into<Value>) -> Self {
        Self::cmp(prop, CmpOp::Lt, value)
    }

    pub fn lte(prop: Prop, value: impl Into<Value>) -> Self {
        Self::cmp(prop, CmpOp::Lte, value)
    }

    pub fn gt(prop: Prop, value: impl Into<Value>) -> Self {
        Self::cmp(prop, CmpOp::Gt, value)
    }

    pub fn gte(prop: Prop, value: impl Into<Value>) -> Self {
        Self::cmp(prop, CmpOp::Gte, value)
    }

    pub fn and(children: impl IntoIterator<Item = Cond>) -> Self {
        Cond::And(children.into_iter().collect())
    }

    pub fn or(children: impl IntoIterator<Item = Cond>) -> Self {
        Cond::Or(children.into_iter().collect())
    }
}

/// `SET <prop> = <value>` in an update.
#[derive(Clone, Debug)]
pub struct Assign {
    pub prop: Prop,
    pub value: Value,
}
