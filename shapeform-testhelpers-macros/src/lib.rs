//! Attribute macro behind `shapeform_testhelpers::test`.

use unsynn::*;

keyword! {
    KwFn = "fn";
}

unsynn! {
    // attributes, visibility and qualifiers in front of `fn`
    struct Preamble {
        tokens: Any<Cons<Except<KwFn>, TokenTree>>,
    }

    // generics, arguments and return type
    struct Signature {
        tokens: Any<Cons<Except<BraceGroup>, TokenTree>>,
    }

    struct TestFn {
        preamble: Preamble,
        _fn: KwFn,
        name: Ident,
        signature: Signature,
        body: BraceGroup,
    }
}

impl quote::ToTokens for Preamble {
    fn to_tokens(&self, tokens: &mut unsynn::TokenStream) {
        self.tokens.to_tokens(tokens)
    }
}

impl quote::ToTokens for Signature {
    fn to_tokens(&self, tokens: &mut unsynn::TokenStream) {
        self.tokens.to_tokens(tokens)
    }
}

/// Marks a test and installs the shapeform test subscriber before its body runs.
///
/// ```ignore
/// #[shapeform_testhelpers::test]
/// fn decodes() { /* ... */ }
///
/// // any other test attribute can be named explicitly
/// #[shapeform_testhelpers::test(tokio::test)]
/// async fn decodes_async() { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn test(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let item = TokenStream::from(item);
    let mut iter = item.to_token_iter();
    let TestFn {
        preamble,
        _fn,
        name,
        signature,
        body,
    } = match iter.parse::<TestFn>() {
        Ok(test_fn) => test_fn,
        Err(err) => panic!("#[shapeform_testhelpers::test] expects a function: {err:?}"),
    };

    let test_attr = if attr.is_empty() {
        quote::quote! { #[::core::prelude::rust_2024::test] }
    } else {
        let attr = TokenStream::from(attr);
        quote::quote! { #[#attr] }
    };
    let body = body.0.stream();

    quote::quote! {
        #test_attr
        #preamble fn #name #signature {
            ::shapeform_testhelpers::setup();

            #body
        }
    }
    .into()
}
