//! `#[derive(Labeled)]`: enum values with optional display labels.
//!
//! Each unit variant converts to `Value::Enum` carrying its name and the
//! `#[label("...")]` text, if any. Class rules format with the label when
//! present, otherwise with the variant name.

use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Error, Fields, LitStr, Result};

use crate::args::{parse_attribute_args, Arg};

fn variant_label(variant: &syn::Variant) -> Result<Option<LitStr>> {
    let mut label = None;
    for attr in variant.attrs.iter().filter(|a| a.path().is_ident("label")) {
        if label.is_some() {
            return Err(Error::new(attr.span(), "duplicate #[label]"));
        }
        match parse_attribute_args(attr)?.as_slice() {
            [Arg::Str(lit)] => label = Some(lit.clone()),
            _ => return Err(Error::new(attr.span(), "expected `#[label(\"text\")]`")),
        }
    }
    Ok(label)
}

pub(crate) fn labeled_impl(input: TokenStream) -> Result<TokenStream> {
    let input: DeriveInput = syn::parse2(input)?;
    let Data::Enum(data) = &input.data else {
        return Err(Error::new(
            input.ident.span(),
            "#[derive(Labeled)] can only be used on enums",
        ));
    };

    let mut arms = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(Error::new(
                variant.span(),
                "#[derive(Labeled)] variants cannot carry fields",
            ));
        }
        let ident = &variant.ident;
        let name = ident.to_string();
        let label = match variant_label(variant)? {
            Some(lit) => quote! { ::core::option::Option::Some(#lit) },
            None => quote! { ::core::option::Option::None },
        };
        arms.push(quote! {
            Self::#ident => ::vesture::value::EnumLabel::new(#name, #label),
        });
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let body = if arms.is_empty() {
        quote! { match *self {} }
    } else {
        quote! {
            let label = match self {
                #(#arms)*
            };
            ::vesture::value::Value::Enum(label)
        }
    };

    Ok(quote! {
        impl #impl_generics ::vesture::value::ToValue for #name #ty_generics #where_clause {
            fn to_value(&self) -> ::vesture::value::Value {
                #body
            }
        }
    })
}
