use quote::quote;
use unsynn::*;

keyword! {
    KFn = "fn";
    KShouldPanic = "should_panic";
}

unsynn! {
    struct OuterAttribute {
        _pound: PunctAny<'#'>,
        body: BracketGroup,
    }

    struct UntilFn {
        items: Any<Cons<Except<KFn>, TokenTree>>,
    }

    struct UntilBody {
        items: Any<Cons<Except<BraceGroup>, TokenTree>>,
    }

    struct Body {
        items: BraceGroup,
    }

    struct TestFn {
        attributes: Vec<OuterAttribute>,
        until_fn: UntilFn, _fn: KFn, name: Ident,
        until_body: UntilBody, body: Body
    }
}

impl OuterAttribute {
    fn is_should_panic(&self) -> bool {
        self.body
            .0
            .stream()
            .to_token_iter()
            .parse::<KShouldPanic>()
            .is_ok()
    }
}

impl quote::ToTokens for OuterAttribute {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        unsynn::ToTokens::to_tokens(&self._pound, tokens);
        unsynn::ToTokens::to_tokens(&self.body, tokens);
    }
}

impl quote::ToTokens for UntilFn {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.items.to_tokens(tokens)
    }
}

impl quote::ToTokens for UntilBody {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.items.to_tokens(tokens)
    }
}

impl quote::ToTokens for Body {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(self.items.0.stream())
    }
}

/// Marks a test that may use `?` on any error. Logging and error reports are
/// set up before the body runs. Other attributes on the test are kept; with
/// `#[should_panic]`, an error returned by the body panics with its report.
#[proc_macro_attribute]
pub fn test(
    _attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    expand(item.into()).into()
}

fn expand(item: TokenStream) -> TokenStream {
    let mut i = item.to_token_iter();
    let TestFn {
        attributes,
        until_fn,
        _fn,
        name,
        until_body,
        body,
    } = match i.parse::<TestFn>() {
        Ok(decl) => decl,
        Err(err) => {
            let msg = format!("#[prefab_testhelpers::test] expects a function: {err}");
            return quote! { ::core::compile_error!(#msg); };
        }
    };

    // #[should_panic] tests must return (), so the body runs in an inner fn
    if attributes.iter().any(OuterAttribute::is_should_panic) {
        return quote! {
            #(#attributes)*
            #[::core::prelude::rust_2024::test]
            #until_fn fn #name #until_body {
                fn run() -> ::prefab_testhelpers::eyre::Result<()> {
                    #body

                    Ok(())
                }

                ::prefab_testhelpers::setup();
                if let ::core::result::Result::Err(err) = run() {
                    ::core::panic!("{err:?}");
                }
            }
        };
    }

    quote! {
        #(#attributes)*
        #[::core::prelude::rust_2024::test]
        #until_fn fn #name #until_body -> ::prefab_testhelpers::eyre::Result<()> {
            ::prefab_testhelpers::setup();

            #body

            Ok(())
        }
    }
}
