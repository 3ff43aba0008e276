use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::Parse;
use syn::{Error, Expr, Token};

struct ValueEntry {
    name: Expr,
    ty: Option<Expr>,
    value: Expr,
}

impl Parse for ValueEntry {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let name = input.parse()?;
        let _arrow: Token![=>] = input.parse()?;
        let ty = if input.peek2(Token![;]) {
            let ty = input.parse()?;
            let _semi: Token![;] = input.parse()?;
            Some(ty)
        } else {
            None
        };
        let value = input.parse()?;

        Ok(Self { name, ty, value })
    }
}

pub(crate) struct ValuesInput {
    entries: Vec<ValueEntry>,
}

impl Parse for ValuesInput {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut entries = vec![];
        while !input.is_empty() {
            entries.push(input.parse()?);
            if input.peek(Token![,]) {
                let _comma: Token![,] = input.parse()?;
            } else if !input.is_empty() {
                return Err(Error::new(input.span(), r#"expected "," or end of input"#));
            }
        }

        Ok(ValuesInput { entries })
    }
}

pub(crate) fn expand_values(input: ValuesInput) -> syn::Result<TokenStream> {
    let len = input.entries.len();
    let inserts = input
        .entries
        .into_iter()
        .map(|entry| {
            let name = entry.name;
            let value = entry.value;
            let ty = if let Some(ty) = entry.ty {
                quote! { ::std::option::Option::Some(::atlas::r#type::IntoType::into_type(#ty)?) }
            } else {
                quote! { ::std::option::Option::None }
            };

            quote! {
                map.insert(
                    #name,
                    ::atlas::TypedValue {
                        value: #value.into(),
                        r#type: #ty,
                    },
                );
            }
        })
        .collect::<Vec<_>>();

    Ok(quote! {
        {
            #[allow(unused_mut)]
            let mut map =
                ::std::collections::HashMap::<_, ::atlas::TypedValue>::with_capacity(#len);
            #( #inserts )*
            ::atlas::TypedValueMap(map)
        }
    })
}
