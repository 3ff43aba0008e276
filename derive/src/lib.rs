extern crate proc_macro;

mod row;
mod value;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `atlas::FromRow`, mapping result columns to fields by name.
///
/// A field maps to the column with the same name; `#[column(name = "...")]`
/// overrides it. `Option<T>` fields map NULL columns to `None`.
#[proc_macro_derive(FromRow, attributes(column))]
pub fn from_row_derive_fn(input: TokenStream) -> TokenStream {
    let input: DeriveInput = parse_macro_input!(input as DeriveInput);
    row::expand_from_row(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Builds an `atlas::TypedValueMap` out of `name => value` entries.
///
/// An entry can declare the handler converting its value with
/// `name => type; value`, where `type` is anything implementing
/// `atlas::r#type::IntoType`.
#[proc_macro]
pub fn values(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as value::ValuesInput);
    value::expand_values(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
