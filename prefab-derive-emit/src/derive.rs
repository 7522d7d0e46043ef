use prefab_derive_parse::{TokenStream, parse_struct};
use quote::quote;

use crate::process_struct;

/// Expands `#[derive(Fixture)]`. Rejected input becomes a `compile_error!`.
pub fn fixture_derive(input: TokenStream) -> TokenStream {
    match parse_struct(input) {
        Ok(parsed) => process_struct::process_struct(parsed),
        Err(err) => {
            let message = err.to_string();
            quote! { ::core::compile_error!(#message); }
        }
    }
}
