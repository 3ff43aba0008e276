use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, GenericArgument, LitStr, PathArguments, Type};

pub(crate) fn expand_from_row(input: DeriveInput) -> syn::Result<TokenStream> {
    let ident = &input.ident;
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            ident,
            "FromRow can only be derived for structs",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(
            ident,
            "FromRow can only be derived for structs with named fields",
        ));
    };

    let mut initializers = Vec::new();
    for field in &fields.named {
        let field_ident = field.ident.as_ref().unwrap();
        let mut column_name = field_ident.to_string();
        for attr in &field.attrs {
            if attr.path().is_ident("column") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("name") {
                        let value: LitStr = meta.value()?.parse()?;
                        column_name = value.value();
                        Ok(())
                    } else {
                        Err(meta.error(r#"expected `name = "..."`"#))
                    }
                })?;
            }
        }

        let initializer = if let Some(inner) = option_inner_type(&field.ty) {
            quote! {
                #field_ident: {
                    let value = row.get(#column_name)?;
                    if value.is_null() {
                        ::std::option::Option::None
                    } else {
                        ::std::option::Option::Some(
                            <#inner as ::std::convert::TryFrom<&::atlas::Value>>::try_from(value)?,
                        )
                    }
                }
            }
        } else {
            let ty = &field.ty;
            quote! {
                #field_ident: <#ty as ::std::convert::TryFrom<&::atlas::Value>>::try_from(
                    row.get(#column_name)?,
                )?
            }
        };

        initializers.push(initializer);
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::atlas::FromRow for #ident #ty_generics #where_clause {
            fn from_row(row: &::atlas::Row) -> ::atlas::Result<Self> {
                ::std::result::Result::Ok(Self {
                    #( #initializers ),*
                })
            }
        }
    })
}

fn option_inner_type(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return None;
    };
    match arguments.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
