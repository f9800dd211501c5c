//! Implementation of the `#[derive(PropertyEnum)]` macro.
//!
//! Generates the variant table, names and wire values used to convert
//! request strings into fieldless enums.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Data, DeriveInput, Error, Expr, ExprLit, Fields, Lit, Meta, Result, Token,
};

/// Container-level attributes from `#[property_enum(...)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumAttr {
    /// Match wire values without regard to case.
    pub ignore_case: bool,
    /// Fall back to variant names when no wire value matches.
    pub name_if_no_match: bool,
}

impl Default for EnumAttr {
    fn default() -> Self {
        EnumAttr {
            ignore_case: true,
            name_if_no_match: false,
        }
    }
}

impl Parse for EnumAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = EnumAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            let (path, value) = match &meta {
                Meta::Path(p) => (p, true),
                Meta::NameValue(nv) => match &nv.value {
                    Expr::Lit(ExprLit {
                        lit: Lit::Bool(b), ..
                    }) => (&nv.path, b.value),
                    other => return Err(Error::new(other.span(), "expected true or false")),
                },
                Meta::List(list) => {
                    return Err(Error::new(list.span(), "unexpected nested attribute"));
                }
            };

            if path.is_ident("ignore_case") {
                attr.ignore_case = value;
            } else if path.is_ident("name_if_no_match") {
                attr.name_if_no_match = value;
            } else {
                return Err(Error::new(
                    path.span(),
                    "unknown attribute. Expected: ignore_case or name_if_no_match",
                ));
            }
        }

        Ok(attr)
    }
}

/// Variant-level `#[property_enum(value = "...")]`.
#[derive(Default)]
struct VariantAttr {
    value: Option<String>,
}

impl Parse for VariantAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;
        let mut value = None;

        for meta in content {
            match &meta {
                Meta::NameValue(nv) if nv.path.is_ident("value") => match &nv.value {
                    Expr::Lit(ExprLit {
                        lit: Lit::Str(s), ..
                    }) => value = Some(s.value()),
                    other => {
                        return Err(Error::new(other.span(), "value must be a string literal"))
                    }
                },
                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown variant attribute. Expected: value = \"...\"",
                    ))
                }
            }
        }

        Ok(VariantAttr { value })
    }
}

fn find_attr<T: Parse + Default>(attrs: &[Attribute]) -> Result<T> {
    for attr in attrs {
        if attr.path().is_ident("property_enum") {
            return attr.parse_args::<T>();
        }
    }
    Ok(T::default())
}

/// Main implementation of the PropertyEnum derive macro.
pub fn property_enum_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let enum_name = &input.ident;
    let type_name = enum_name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data) = &input.data else {
        return Err(Error::new(
            input.span(),
            "PropertyEnum can only be derived for enums",
        ));
    };

    let config: EnumAttr = find_attr(&input.attrs)?;

    let mut variants = Vec::new();
    let mut name_arms = Vec::new();
    let mut value_arms = Vec::new();

    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(Error::new(
                variant.span(),
                "PropertyEnum variants cannot carry fields",
            ));
        }

        let ident = &variant.ident;
        let name = ident.to_string();
        let attr: VariantAttr = find_attr(&variant.attrs)?;

        variants.push(quote! { #enum_name::#ident });
        name_arms.push(quote! { #enum_name::#ident => #name, });
        let value = match attr.value {
            Some(value) => quote! { ::core::option::Option::Some(#value) },
            None => quote! { ::core::option::Option::None },
        };
        value_arms.push(quote! { #enum_name::#ident => #value, });
    }

    if variants.is_empty() {
        return Err(Error::new(
            Span::call_site(),
            "PropertyEnum requires at least one variant",
        ));
    }

    let ignore_case = config.ignore_case;
    let name_if_no_match = config.name_if_no_match;

    Ok(quote! {
        impl #impl_generics ::pagewise::PropertyEnum for #enum_name #ty_generics #where_clause {
            const VARIANTS: &'static [Self] = &[#(#variants),*];

            const CONVERSION: ::pagewise::Conversion = ::pagewise::Conversion {
                ignore_case: #ignore_case,
                name_if_no_match: #name_if_no_match,
            };

            const TYPE_NAME: &'static str = #type_name;

            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms)*
                }
            }

            fn wire_value(&self) -> ::core::option::Option<&'static str> {
                match self {
                    #(#value_arms)*
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_attr_defaults() {
        let attr: EnumAttr = syn::parse_str("").unwrap();
        assert_eq!(attr, EnumAttr::default());
        assert!(attr.ignore_case);
        assert!(!attr.name_if_no_match);
    }

    #[test]
    fn test_enum_attr_flags() {
        let attr: EnumAttr = syn::parse_str("ignore_case = false, name_if_no_match").unwrap();
        assert!(!attr.ignore_case);
        assert!(attr.name_if_no_match);
        assert!(syn::parse_str::<EnumAttr>("strict").is_err());
    }

    #[test]
    fn test_rejects_data_variants() {
        let input: DeriveInput = syn::parse_str("enum Shape { Circle(f64), Empty }").unwrap();
        let err = property_enum_derive_impl(input).unwrap_err();
        assert!(err.to_string().contains("cannot carry fields"));
    }

    #[test]
    fn test_rejects_structs() {
        let input: DeriveInput = syn::parse_str("struct Unit;").unwrap();
        assert!(property_enum_derive_impl(input).is_err());
    }

    #[test]
    fn test_generates_wire_values() {
        let input: DeriveInput =
            syn::parse_str(r#"enum Status { #[property_enum(value = "on")] Active, Inactive }"#)
                .unwrap();
        let tokens = property_enum_derive_impl(input).unwrap().to_string();
        assert!(tokens.contains("\"on\""));
        assert!(tokens.contains("\"Inactive\""));
    }
}
