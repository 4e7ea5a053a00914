//! Shared utilities for the derive.

use syn::{punctuated::Punctuated, token::Comma, Data, DeriveInput, Field, Fields, LitStr};

/// Validate that the input is a struct with named fields, returning the fields.
pub fn validate_struct_with_named_fields<'a>(
    input: &'a DeriveInput,
    macro_name: &str,
) -> syn::Result<&'a Punctuated<Field, Comma>> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(&fields.named),
            _ => Err(syn::Error::new_spanned(
                &input.ident,
                format!("{macro_name} derive only supports structs with named fields"),
            )),
        },
        _ => Err(syn::Error::new_spanned(
            &input.ident,
            format!("{macro_name} derive only supports structs"),
        )),
    }
}

/// How a field takes part in binding.
pub enum FieldRole {
    /// Visited without a tag.
    Untagged,
    /// Visited with the given tag.
    Tagged(LitStr),
    /// Never visited.
    Skip,
}

/// Read the field's `#[regroup(...)]` attribute, if any.
pub fn field_role(field: &Field) -> syn::Result<FieldRole> {
    let mut role = None;

    for attr in &field.attrs {
        if !attr.path().is_ident("regroup") {
            continue;
        }
        if role.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "duplicate #[regroup] attribute",
            ));
        }

        role = Some(attr.parse_args_with(|input: syn::parse::ParseStream| {
            if input.peek(LitStr) {
                let tag: LitStr = input.parse()?;
                return Ok(FieldRole::Tagged(tag));
            }
            let ident: syn::Ident = input.parse()?;
            if ident == "skip" {
                Ok(FieldRole::Skip)
            } else {
                Err(syn::Error::new(
                    ident.span(),
                    format!("unknown regroup attribute: `{ident}`"),
                ))
            }
        })?);
    }

    Ok(role.unwrap_or(FieldRole::Untagged))
}
