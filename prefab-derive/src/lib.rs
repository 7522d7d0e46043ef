#![doc = include_str!("../README.md")]

#[proc_macro_derive(Fixture, attributes(fixture))]
pub fn fixture_derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    prefab_derive_emit::fixture_derive(input.into()).into()
}
