//!
//! Assembly of complete statements from stores, models and conditions.
//!
//! Nothing here performs I/O: each function only produces the SQL text and
//! the values to bind to it.
//!

use std::fmt::Write;

use crate::builder::{Fragment, Placeholders, QueryBuilder, Statement};
use crate::compile::{check_type, compile};
use crate::model::{Model, Prop, Store};
use crate::predicate::{Assign, Cond};
use crate::value::Value;
use crate::{Error, Result};

/// `INSERT INTO <t> (<cols>) VALUES ($1, ...) RETURNING <pk>`.
///
/// A primary key holding its zero value is left for the database to
/// generate: it is dropped from both the column and the value list, and
/// read back through `RETURNING`.
pub fn insert(model: &dyn Model) -> Result<Statement> {
    let store = model.store();
    let pk = primary_key(store)?;
    let serial = model.pk().is_zero();

    let (props, values): (Vec<&Prop>, Vec<Value>) = store
        .props()
        .iter()
        .zip(model.values())
        .filter(|(prop, _)| !(serial && prop.is_pk()))
        .unzip();

    let mut builder = QueryBuilder::new();
    write!(builder.buf_mut(), "INSERT INTO {}", store.name()).unwrap();

    if props.is_empty() {
        builder.push(" DEFAULT VALUES");
    } else {
        builder.push(" (");
        builder.push_list(props.iter().map(|prop| prop.name()));
        builder.push(") VALUES (");
        builder.push_params(values, &mut Placeholders::new());
        builder.push(")");
    }

    write!(builder.buf_mut(), " RETURNING {}", pk.name()).unwrap();

    Ok(builder.build())
}

/// `SELECT <cols> FROM <t> WHERE <pk> = $1`.
pub fn select_by_pk(store: &dyn Store, pk: Value) -> Result<Statement> {
    let pk_prop = primary_key(store)?;
    check_type(pk_prop, &pk)?;

    let mut builder = select_from(store);
    let cond = Cond::eq(*pk_prop, pk);
    builder.push_where(compile(Some(&cond), &mut Placeholders::new())?);

    Ok(builder.build())
}

/// `SELECT <cols> FROM <t> [WHERE ...] [LIMIT n OFFSET m]`.
pub fn select(
    store: &dyn Store,
    cond: Option<&Cond>,
    limit: i64,
    offset: i64,
) -> Result<Statement> {
    let mut builder = select_from(store);
    builder.push_where(compile(cond, &mut Placeholders::new())?);
    builder.push_range(limit, offset);

    Ok(builder.build())
}

/// `UPDATE <t> SET a = $1, b = $2 [WHERE ...]`.
///
/// The WHERE clause continues numbering after the SET list, and its values
/// follow the assigned values.
pub fn update(
    store: &dyn Store,
    cond: Option<&Cond>,
    assignments: &[Assign],
) -> Result<Statement> {
    update_with(store, cond, set_list(store, assignments)?)
}

/// `update` from an already built SET list.
pub fn update_with(store: &dyn Store, cond: Option<&Cond>, set: SetList) -> Result<Statement> {
    let mut builder = QueryBuilder::new();
    write!(builder.buf_mut(), "UPDATE {} SET ", store.name()).unwrap();
    builder.push_fragment(set.fragment);
    builder.push_where(compile(cond, &mut Placeholders::after(set.placeholders))?);

    Ok(builder.build())
}

/// `DELETE FROM <t> [WHERE ...]`.
pub fn delete(store: &dyn Store, cond: Option<&Cond>) -> Result<Statement> {
    let mut builder = QueryBuilder::new();
    write!(builder.buf_mut(), "DELETE FROM {}", store.name()).unwrap();
    builder.push_where(compile(cond, &mut Placeholders::new())?);

    Ok(builder.build())
}

/// `SELECT COUNT(<pk>) AS cnt FROM <t> [WHERE ...]`.
pub fn count(store: &dyn Store, cond: Option<&Cond>) -> Result<Statement> {
    let pk = primary_key(store)?;

    let mut builder = QueryBuilder::new();
    write!(
        builder.buf_mut(),
        "SELECT COUNT({}) AS cnt FROM {}",
        pk.name(),
        store.name()
    )
    .unwrap();
    builder.push_where(compile(cond, &mut Placeholders::new())?);

    Ok(builder.build())
}

/// The SET list of an update, and the number of placeholders it used.
pub struct SetList {
    pub fragment: Fragment,
    pub placeholders: usize,
}

pub fn set_list(store: &dyn Store, assignments: &[Assign]) -> Result<SetList> {
    if assignments.is_empty() {
        return Err(Error::EmptyUpdate(store.name()));
    }

    let mut placeholders = Placeholders::new();
    let mut fragment = Fragment::empty();

    for (i, assign) in assignments.iter().enumerate() {
        check_type(&assign.prop, &assign.value)?;
        if i > 0 {
            fragment.sql.push_str(", ");
        }
        write!(
            fragment.sql,
            "{} = ${}",
            assign.prop.name(),
            placeholders.next()
        )
        .unwrap();
        fragment.values.push(assign.value.clone());
    }

    Ok(SetList {
        fragment,
        placeholders: assignments.len(),
    })
}

fn select_from(store: &dyn Store) -> QueryBuilder {
    let mut builder = QueryBuilder::new();
    builder.push("SELECT ");
    builder.push_list(store.props().iter().map(|prop| prop.name()));
    write!(builder.buf_mut(), " FROM {}", store.name()).unwrap();
    builder
}

fn primary_key(store: &dyn Store) -> Result<&'static Prop> {
    store.pk().ok_or(Error::MissingPrimaryKey(store.name()))
}
