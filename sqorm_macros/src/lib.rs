#![forbid(unsafe_code)]

extern crate proc_macro;

mod derive_model;
mod field;

mod attr {
    pub mod attr_util;
}

use proc_macro::TokenStream;

/// Derive `sqorm::Model` and `sqorm::Table` for a struct with named fields.
///
/// ```ignore
/// #[derive(Default, Model)]
/// #[table_name = "users"]
/// struct User {
///     #[pk]
///     id: i64,
///     #[column = "full_name"]
///     name: String,
/// }
/// ```
///
/// Every field becomes a column, in declaration order, and gets an
/// associated `Prop` constant named after the field in upper case
/// (`User::ID`, `User::NAME`). Exactly one field must be marked `#[pk]`.
/// The struct must implement `Default`, which is used to create fresh
/// records for query results.
#[proc_macro_derive(Model, attributes(table_name, pk, column))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let model_struct = syn::parse_macro_input!(input as derive_model::ModelStruct);

    let tokens = derive_model::gen_model(model_struct);

    TokenStream::from(tokens)
}
