//! # loupe-derive
//!
//! `#[derive(Reflect)]` for `loupe-core`. Use it through the re-export
//! `loupe_core::Reflect` rather than depending on this crate directly.
//!
//! - **Structs** become composites. Fields are enumerated in declaration
//!   order; tuple-struct fields are named `0`, `1`, ...; a unit struct has
//!   no fields and renders as `{}`.
//! - **Enums** become labels carrying the variant name, whatever data the
//!   variant holds.
//! - Type parameters of structs gain a `Reflect` bound. Enums add none.
//!
//! Field and variant attributes:
//!
//! - `#[loupe(skip)]` leaves a field out
//! - `#[loupe(rename = "name")]` renders a field or variant under another name
//!
//! ```rust,ignore
//! #[derive(Reflect)]
//! struct Session {
//!     #[loupe(rename = "user")]
//!     user_id: u64,
//!     #[loupe(skip)]
//!     token: String,
//!     state: State,
//! }
//!
//! #[derive(Reflect)]
//! enum State {
//!     Active,
//!     Locked { until: u64 },
//! }
//! // {"user":42, "state":"Active"}
//! ```

mod attr;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse_macro_input, parse_quote, Data, DataEnum, DeriveInput, Fields, Generics, Index,
};

use crate::attr::LoupeAttrs;

#[proc_macro_derive(Reflect, attributes(loupe))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    match &input.data {
        Data::Struct(data) => expand_struct(&input, &data.fields),
        Data::Enum(data) => expand_enum(&input, data),
        Data::Union(_) => Err(syn::Error::new_spanned(
            &input.ident,
            "`#[derive(Reflect)]` only supports structs and enums",
        )),
    }
}

fn add_reflect_bounds(generics: &mut Generics) {
    let params: Vec<_> = generics
        .type_params()
        .map(|param| param.ident.clone())
        .collect();
    let where_clause = generics.make_where_clause();
    for ident in params {
        where_clause
            .predicates
            .push(parse_quote!(#ident: ::loupe_core::Reflect));
    }
}

/// Structs: `Reflect` classifies as a composite, `FieldEnumerable` visits
/// each non-skipped field in declaration order. Type parameters gain a
/// `Reflect` bound since field values are rendered.
fn expand_struct(input: &DeriveInput, fields: &Fields) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let mut generics = input.generics.clone();
    add_reflect_bounds(&mut generics);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut visits = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        let attrs = LoupeAttrs::parse(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let (member, default_name) = match &field.ident {
            Some(ident) => (quote!(#ident), ident.to_string()),
            None => {
                let index = Index::from(i);
                (quote!(#index), i.to_string())
            }
        };
        let field_name = attrs.rename.unwrap_or(default_name);
        visits.push(quote! {
            visit(#field_name, &self.#member)?;
        });
    }

    Ok(quote! {
        impl #impl_generics ::loupe_core::Reflect for #name #ty_generics #where_clause {
            fn reflect(&self) -> ::loupe_core::Result<::loupe_core::Kind<'_>> {
                ::core::result::Result::Ok(::loupe_core::Kind::Composite(self))
            }
        }

        impl #impl_generics ::loupe_core::FieldEnumerable for #name #ty_generics #where_clause {
            fn visit_fields(
                &self,
                visit: &mut ::loupe_core::reflect::FieldVisitor<'_>,
            ) -> ::loupe_core::Result<()> {
                #(#visits)*
                ::core::result::Result::Ok(())
            }
        }
    })
}

/// Enums: the variant name (or its rename) as a label. Variant data is never
/// read, so type parameters stay unbounded.
fn expand_enum(input: &DeriveInput, data: &DataEnum) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut arms = Vec::new();
    for variant in &data.variants {
        let attrs = LoupeAttrs::parse(&variant.attrs)?;
        if attrs.skip {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                "`#[loupe(skip)]` is not supported on enum variants",
            ));
        }
        let ident = &variant.ident;
        let label = attrs.rename.unwrap_or_else(|| ident.to_string());
        let pattern = match &variant.fields {
            Fields::Named(_) => quote!(Self::#ident { .. }),
            Fields::Unnamed(_) => quote!(Self::#ident(..)),
            Fields::Unit => quote!(Self::#ident),
        };
        arms.push(quote!(#pattern => #label,));
    }

    Ok(quote! {
        impl #impl_generics ::loupe_core::Reflect for #name #ty_generics #where_clause {
            fn reflect(&self) -> ::loupe_core::Result<::loupe_core::Kind<'_>> {
                let label: &'static str = match *self {
                    #(#arms)*
                };
                ::core::result::Result::Ok(::loupe_core::Kind::Label(
                    ::std::borrow::Cow::Borrowed(label),
                ))
            }
        }
    })
}
