use prefab_derive_parse::{PConstructor, PField, PStruct, TokenStream};
use quote::{format_ident, quote};

/// Generates the partial, the builder and the `Fixture` impl for a struct.
///
/// Example input:
/// ```rust
/// struct Point {
///     x: i32,
///     y: i32,
/// }
/// ```
pub(crate) fn process_struct(parsed: PStruct) -> TokenStream {
    let name = &parsed.name;
    let vis = &parsed.vis;
    let partial_name = format_ident!("{}Partial", name);
    let builder_name = format_ident!("{}Builder", name);

    let settable: Vec<&PField> = parsed.settable().collect();

    let partial_fields = settable.iter().map(|field| {
        let PField {
            name, vis, ty, ..
        } = field;
        quote! { #vis #name: ::core::option::Option<#ty> }
    });

    let partial_setters = settable.iter().map(|field| partial_setter(field, vis));

    let builder_setters = settable
        .iter()
        .filter(|field| field.has_builder_setter())
        .map(|field| builder_setters(field, vis));

    let apply_fields = settable.iter().map(|field| {
        let name = &field.name;
        quote! {
            if let ::core::option::Option::Some(value) = &partial.#name {
                self.#name = ::core::clone::Clone::clone(value);
            }
        }
    });

    let (error_ty, construct_body) = match &parsed.constructor {
        PConstructor::Default => (
            quote! { ::core::convert::Infallible },
            quote! { ::core::result::Result::Ok(<Self as ::core::default::Default>::default()) },
        ),
        PConstructor::Infallible(path) => (
            quote! { ::core::convert::Infallible },
            quote! { ::core::result::Result::Ok(#path()) },
        ),
        PConstructor::Fallible { path, error } => (quote! { #error }, quote! { #path() }),
    };

    let partial_doc = format!(
        "Fields of [`{name}`] set so far; `None` means not set. Works as a template for [`{builder_name}`]."
    );
    let builder_doc = format!(
        "Fluent builder for [`{name}`]: one setter per field, then `build()`."
    );

    quote! {
        #[doc = #partial_doc]
        #[derive(::core::clone::Clone, ::core::default::Default, ::core::fmt::Debug)]
        #vis struct #partial_name {
            #(#partial_fields,)*
        }

        impl #partial_name {
            #(#partial_setters)*
        }

        #[doc = #builder_doc]
        #[must_use]
        #vis struct #builder_name(::prefab::Builder<#name>);

        impl #builder_name {
            #(#builder_setters)*
        }

        impl ::core::convert::From<::prefab::Builder<#name>> for #builder_name {
            fn from(inner: ::prefab::Builder<#name>) -> Self {
                Self(inner)
            }
        }

        impl ::core::ops::Deref for #builder_name {
            type Target = ::prefab::Builder<#name>;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl ::core::ops::DerefMut for #builder_name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl ::core::clone::Clone for #builder_name {
            fn clone(&self) -> Self {
                Self(::core::clone::Clone::clone(&self.0))
            }
        }

        impl ::core::fmt::Debug for #builder_name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(&self.0, f)
            }
        }

        #[automatically_derived]
        impl ::prefab::Fixture for #name {
            type Partial = #partial_name;
            type Builder = #builder_name;
            type Error = #error_ty;

            fn construct() -> ::core::result::Result<Self, Self::Error> {
                #construct_body
            }

            #[allow(unused_variables)]
            fn apply(&mut self, partial: &Self::Partial) {
                #(#apply_fields)*
            }
        }
    }
}

/// Doc attributes for a setter: the field's own docs, or a stock line.
fn setter_docs(field: &PField, fallback: String) -> TokenStream {
    if field.docs.is_empty() {
        return quote! { #[doc = #fallback] };
    }
    let lines = &field.docs;
    quote! { #(#[doc = #lines])* }
}

/// Parameter type and stored expression for a literal-value setter.
fn value_param(field: &PField) -> (TokenStream, TokenStream) {
    let ty = &field.ty;
    if field.into {
        (
            quote! { impl ::core::convert::Into<#ty> },
            quote! { ::core::convert::Into::into(value) },
        )
    } else {
        (quote! { #ty }, quote! { value })
    }
}

fn partial_setter(field: &PField, vis: &TokenStream) -> TokenStream {
    let name = &field.name;
    let (param, stored) = value_param(field);
    let docs = setter_docs(field, format!("Sets `{}`.", field.effective_name()));

    quote! {
        #docs
        #vis fn #name(mut self, value: #param) -> Self {
            self.#name = ::core::option::Option::Some(#stored);
            self
        }
    }
}

fn builder_setters(field: &PField, vis: &TokenStream) -> TokenStream {
    let name = &field.name;
    let ty = &field.ty;
    let field_name = field.effective_name();
    let with_name = format_ident!("{}_with", field_name);
    let (param, stored) = value_param(field);
    let docs = setter_docs(field, format!("Sets `{field_name}`."));
    let with_doc = format!(
        "Sets `{field_name}` to whatever `generate` returns; it is called once, with this builder's faker."
    );

    quote! {
        #docs
        #vis fn #name(mut self, value: #param) -> Self {
            self.0.set(#field_name, |partial| partial.#name = ::core::option::Option::Some(#stored));
            self
        }

        #[doc = #with_doc]
        #vis fn #with_name<F>(mut self, generate: F) -> Self
        where
            F: ::core::ops::FnOnce(&mut ::prefab::Faker) -> #ty,
        {
            self.0.set_with(#field_name, generate, |partial, value| {
                partial.#name = ::core::option::Option::Some(value)
            });
            self
        }
    }
}
