//!
//! Compilation of condition trees into WHERE fragments.
//!
//! Leaves are numbered left to right, depth first, from a single
//! `Placeholders` counter shared by the whole statement. The values of the
//! resulting `Fragment` are in the same order as the `$n` markers in its
//! text.
//!

use crate::builder::{Fragment, Placeholders};
use crate::model::Prop;
use crate::predicate::{CmpOp, Cond};
use crate::value::Value;
use crate::{Error, Result};

/// Compile an optional condition.
///
/// `None`, and any combinator that ends up without a single comparison,
/// compile to an empty fragment with no values.
pub fn compile(cond: Option<&Cond>, placeholders: &mut Placeholders) -> Result<Fragment> {
    match cond {
        None => Ok(Fragment::empty()),
        Some(Cond::Cmp { prop, op, value }) => compile_cmp(prop, *op, value, placeholders),
        Some(Cond::And(children)) => compile_logic(" AND ", children, placeholders),
        Some(Cond::Or(children)) => compile_logic(" OR ", children, placeholders),
    }
}

fn compile_logic(
    sep: &str,
    children: &[Cond],
    placeholders: &mut Placeholders,
) -> Result<Fragment> {
    let mut parts = Vec::with_capacity(children.len());
    let mut values = Vec::new();

    for child in children {
        let fragment = compile(Some(child), placeholders)?;
        if fragment.is_empty() {
            continue;
        }
        parts.push(fragment.sql);
        values.extend(fragment.values);
    }

    if values.is_empty() {
        return Ok(Fragment::empty());
    }

    Ok(Fragment {
        sql: format!("({})", parts.join(sep)),
        values,
    })
}

fn compile_cmp(
    prop: &Prop,
    op: CmpOp,
    value: &Value,
    placeholders: &mut Placeholders,
) -> Result<Fragment> {
    check_type(prop, value)?;

    Ok(Fragment {
        sql: format!("{} {} ${}", prop.name(), op.symbol(), placeholders.next()),
        values: vec![value.clone()],
    })
}

pub(crate) fn check_type(prop: &Prop, value: &Value) -> Result<()> {
    if prop.ty().accepts(value) {
        Ok(())
    } else {
        Err(Error::TypeMismatch {
            prop: prop.name(),
            expected: prop.ty(),
            found: value.ty(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ty::Ty;

    const ID: Prop = Prop::new("id", Ty::Int8, true);
    const AGE: Prop = Prop::new("age", Ty::Int4, false);
    const CITY: Prop = Prop::new("city", Ty::Text, false);

    fn compile_from_one(cond: &Cond) -> Fragment {
        compile(Some(cond), &mut Placeholders::new()).unwrap()
    }

    #[test]
    fn no_condition() {
        let mut placeholders = Placeholders::new();
        assert_eq!(compile(None, &mut placeholders).unwrap(), Fragment::empty());
        assert_eq!(placeholders.peek(), 1);
    }

    #[test]
    fn single_comparison() {
        let fragment = compile_from_one(&ID.eq(7i64));
        assert_eq!(fragment.sql, "id = $1");
        assert_eq!(fragment.values, vec![Value::I64(7)]);
    }

    #[test]
    fn operator_symbols() {
        let cond = Cond::and(vec![
            AGE.eq(1),
            AGE.neq(2),
            AGE.lt(3),
            AGE.lte(4),
            AGE.gt(5),
            AGE.gte(6),
        ]);
        assert_eq!(
            compile_from_one(&cond).sql,
            "(age = $1 AND age <> $2 AND age < $3 AND age <= $4 AND age > $5 AND age >= $6)"
        );
    }

    #[test]
    fn nested_combinators_number_depth_first() {
        let cond = Cond::and(vec![
            AGE.eq(30),
            Cond::or(vec![CITY.eq("NY"), CITY.eq("LA")]),
        ]);
        let fragment = compile_from_one(&cond);
        assert_eq!(fragment.sql, "(age = $1 AND (city = $2 OR city = $3))");
        assert_eq!(
            fragment.values,
            vec![Value::I32(30), Value::from("NY"), Value::from("LA")]
        );
    }

    #[test]
    fn left_subtree_numbers_before_right() {
        let cond = Cond::or(vec![
            Cond::and(vec![AGE.gt(18), AGE.lt(65)]),
            Cond::and(vec![CITY.eq("NY"), ID.neq(1i64)]),
        ]);
        let fragment = compile_from_one(&cond);
        assert_eq!(
            fragment.sql,
            "((age > $1 AND age < $2) OR (city = $3 AND id <> $4))"
        );
        assert_eq!(
            fragment.values,
            vec![
                Value::I32(18),
                Value::I32(65),
                Value::from("NY"),
                Value::I64(1)
            ]
        );
    }

    #[test]
    fn empty_combinator_compiles_to_nothing() {
        assert_eq!(compile_from_one(&Cond::and(vec![])), Fragment::empty());
        assert_eq!(compile_from_one(&Cond::or(vec![])), Fragment::empty());
    }

    #[test]
    fn combinator_of_empty_children_compiles_to_nothing() {
        let cond = Cond::and(vec![Cond::or(vec![]), Cond::and(vec![Cond::and(vec![])])]);
        assert_eq!(compile_from_one(&cond), Fragment::empty());
    }

    #[test]
    fn empty_children_are_skipped() {
        let cond = Cond::and(vec![Cond::or(vec![]), AGE.eq(1), Cond::and(vec![])]);
        assert_eq!(compile_from_one(&cond).sql, "(age = $1)");
    }

    #[test]
    fn continues_from_given_position() {
        let mut placeholders = Placeholders::after(2);
        let cond = Cond::and(vec![ID.eq(1i64), AGE.eq(2)]);
        let fragment = compile(Some(&cond), &mut placeholders).unwrap();
        assert_eq!(fragment.sql, "(id = $3 AND age = $4)");
        assert_eq!(placeholders.peek(), 5);
    }

    #[test]
    fn null_is_bound_like_any_value() {
        let cond = Cond::and(vec![CITY.neq(Value::Null(Ty::Text)), AGE.eq(1)]);
        let fragment = compile_from_one(&cond);
        assert_eq!(fragment.sql, "(city <> $1 AND age = $2)");
        assert_eq!(fragment.values, vec![Value::Null(Ty::Text), Value::I32(1)]);
    }

    #[test]
    fn null_of_another_type_is_a_mismatch() {
        let err = compile(Some(&CITY.eq(Value::Null(Ty::Int4))), &mut Placeholders::new())
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { prop: "city", .. }));
    }

    #[test]
    fn type_mismatch_is_rejected() {
        let cond = Cond::and(vec![AGE.eq(1), CITY.eq(5)]);
        let err = compile(Some(&cond), &mut Placeholders::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::TypeMismatch {
                prop: "city",
                expected: Ty::Text,
                found: Ty::Int4
            }
        ));
    }
}
