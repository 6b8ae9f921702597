use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod attr;
mod json;

/// Provides the `Composite`, `ToJson` and `FromJson` traits for a
/// struct with named fields, backed by a static `TypeDescriptor`.
///
/// The struct must implement `Default`; decoding starts from the
/// default value and assigns members as their keys are seen.
///
/// Field attributes:
///
/// * `#[json(rename = "Key")]` sets the JSON key.
/// * `#[json(skip)]` leaves the field out of both directions.
///
/// Container attributes:
///
/// * `#[json(rename_all = "PascalCase")]` renames all keys. Also
///   `camelCase` and `snake_case`.
#[proc_macro_derive(Json, attributes(json))]
pub fn derive_json(tokens: TokenStream) -> TokenStream {
    let input = parse_macro_input!(tokens as DeriveInput);

    match json::derive_json(&input) {
        Ok(output) => output,
        Err(err) => err.into_compile_error().into(),
    }
}
