use std::fmt::Write;

use crate::value::Value;

/// Positional placeholder counter (`$1`, `$2`, ...).
///
/// One counter lives for exactly one statement. Everything that binds a
/// value in that statement draws its position from the same counter, so
/// that the text and the bind list always line up.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Placeholders {
    next: usize,
}

impl Placeholders {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Continue numbering after `n` already used positions.
    pub fn after(n: usize) -> Self {
        Self { next: n + 1 }
    }

    /// The position the next bound value will receive.
    pub fn peek(&self) -> usize {
        self.next
    }

    /// Claim the next position.
    pub fn next(&mut self) -> usize {
        let n = self.next;
        self.next += 1;
        n
    }
}

impl Default for Placeholders {
    fn default() -> Self {
        Self::new()
    }
}

/// A piece of SQL text and the values bound by its placeholders, in
/// placeholder order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fragment {
    pub sql: String,
    pub values: Vec<Value>,
}

impl Fragment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

/// A complete parameterized statement, ready for execution.
#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub values: Vec<Value>,
}

pub struct QueryBuilder {
    buf: String,
    values: Vec<Value>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self {
            buf: String::new(),
            values: Vec::new(),
        }
    }

    pub fn build(self) -> Statement {
        Statement {
            sql: self.buf,
            values: self.values,
        }
    }

    pub fn buf_mut(&mut self) -> &mut String {
        &mut self.buf
    }

    pub fn push(&mut self, str: &str) {
        self.buf.push_str(str);
    }

    /// Push a comma separated list, e.g. of column names.
    pub fn push_list<'a>(&mut self, items: impl IntoIterator<Item = &'a str>) {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.buf.push_str(", ");
            }
            self.buf.push_str(item);
        }
    }

    /// Push one placeholder per value, comma separated, binding the values.
    pub fn push_params(&mut self, values: Vec<Value>, placeholders: &mut Placeholders) {
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                self.buf.push_str(", ");
            }
            write!(self.buf, "${}", placeholders.next()).unwrap();
            self.values.push(value);
        }
    }

    /// Append a fragment verbatim together with its values.
    pub fn push_fragment(&mut self, fragment: Fragment) {
        self.buf.push_str(&fragment.sql);
        self.values.extend(fragment.values);
    }

    /// Append ` WHERE <fragment>`, or nothing if the fragment is empty.
    pub fn push_where(&mut self, fragment: Fragment) {
        if fragment.is_empty() {
            return;
        }
        self.buf.push_str(" WHERE ");
        self.push_fragment(fragment);
    }

    /// Append ` LIMIT <limit> OFFSET <offset>`. A non-positive limit means
    /// unbounded, and then the offset is left out as well.
    pub fn push_range(&mut self, limit: i64, offset: i64) {
        if limit > 0 {
            write!(self.buf, " LIMIT {} OFFSET {}", limit, offset).unwrap();
        }
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
