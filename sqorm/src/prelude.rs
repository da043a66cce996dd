pub use crate::column::Column;
pub use crate::model::{Model, Store, Table};
pub use crate::predicate::Cond;
pub use crate::provider::Provider;
