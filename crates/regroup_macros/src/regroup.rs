//! Regroup derive macro implementation.
//!
//! Generates `regroup::Fill` and `regroup::Bind` implementations from struct
//! definitions.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::parse_macro_input;

use crate::utils::{field_role, validate_struct_with_named_fields, FieldRole};

/// Main entry point for the Regroup derive macro.
pub fn derive_regroup(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);

    match derive_regroup_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

pub(crate) fn derive_regroup_impl(input: &syn::DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let fields = validate_struct_with_named_fields(input, "Regroup")?;

    let mut binds = Vec::new();
    let mut fresh = Vec::new();
    let mut bounds = Vec::new();

    for field in fields {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected named field"))?;
        let field_name = ident.to_string();
        let ty = &field.ty;

        let tag = match field_role(field)? {
            FieldRole::Skip => {
                fresh.push(quote! { #ident: ::core::default::Default::default() });
                continue;
            }
            FieldRole::Untagged => String::new(),
            FieldRole::Tagged(tag) => tag.value(),
        };

        binds.push(quote! {
            cx.bind_field(
                ::regroup::Bind::slot(&mut self.#ident),
                &::regroup::FieldDescriptor::new(#field_name, #tag),
            )?;
        });
        fresh.push(quote! { #ident: ::regroup::Bind::fresh(&self.#ident) });
        bounds.push(quote! { #ty: ::regroup::Bind });
    }

    if binds.is_empty() {
        binds.push(quote! { let _ = cx; });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Concrete field types are checked at the call sites; bounds are only
    // needed to carry generic parameters through.
    let where_clause = if input.generics.params.is_empty() {
        quote! { #where_clause }
    } else {
        let existing = where_clause.map(|w| &w.predicates);
        quote! { where #(#bounds,)* #existing }
    };

    Ok(quote! {
        impl #impl_generics ::regroup::Fill for #name #ty_generics #where_clause {
            fn fill(
                &mut self,
                cx: &::regroup::Context<'_>,
            ) -> ::core::result::Result<(), ::regroup::Error> {
                #(#binds)*
                ::core::result::Result::Ok(())
            }
        }

        impl #impl_generics ::regroup::Bind for #name #ty_generics #where_clause {
            const SHAPE: ::regroup::Shape = ::regroup::Shape::Record;

            fn slot(&mut self) -> ::regroup::Slot<'_> {
                ::regroup::Slot::Record(self)
            }

            fn fresh(&self) -> Self {
                Self {
                    #(#fresh,)*
                }
            }
        }
    })
}
