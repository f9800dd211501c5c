//! Implementation of the `#[derive(Inspect)]` macro.
//!
//! This macro generates implementations of `Inspect` and `Described` and
//! property name constants.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Ident, Result, Type};

use super::attrs::{option_inner, parse_inspect_attrs, FieldKind};

/// Main implementation of the Inspect derive macro.
pub fn inspect_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let type_name = struct_name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Inspect can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Inspect can only be derived for structs",
            ))
        }
    };

    let mut properties: Vec<TokenStream> = Vec::new();
    let mut read_arms: Vec<TokenStream> = Vec::new();
    let mut property_constants: Vec<TokenStream> = Vec::new();
    let mut ancestor: Option<(&Ident, &Type)> = None;

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_inspect_attrs(&field.attrs)?;

        if attrs.skip {
            continue;
        }

        if attrs.ancestor {
            if ancestor.is_some() {
                return Err(Error::new(
                    attrs.span,
                    "only one field can be marked #[inspect(ancestor)]",
                ));
            }
            ancestor = Some((field_name, &field.ty));
            continue;
        }

        // Fields without a declared kind are not properties
        let Some(kind) = attrs.kind else {
            continue;
        };

        let property_name = attrs.rename.unwrap_or_else(|| field_name.to_string());
        let const_name = format_ident!("{}", to_screaming_snake_case(&property_name));
        let kind_tokens = kind.to_tokens();

        property_constants.push(quote! {
            /// Property name constant.
            pub const #const_name: &'static str = #property_name;
        });

        properties.push(quote! {
            ::pagewise::Property::new(#property_name, #kind_tokens)
        });

        let value_expr = if option_inner(&field.ty).is_some() {
            let present = value_of(kind, quote! { value });
            quote! {
                match &self.#field_name {
                    ::core::option::Option::Some(value) => #present,
                    ::core::option::Option::None => ::pagewise::Value::None,
                }
            }
        } else {
            value_of(kind, quote! { &self.#field_name })
        };

        read_arms.push(quote! {
            #property_name => ::core::option::Option::Some(#value_expr),
        });
    }

    let (ancestor_shape, ancestor_fn) = match ancestor {
        None => (quote! { ::core::option::Option::None }, quote! {}),
        Some((field_name, ty)) => {
            let (parent, access) = match option_inner(ty) {
                Some(inner) => (
                    inner,
                    quote! {
                        self.#field_name
                            .as_ref()
                            .map(|parent| parent as &dyn ::pagewise::Inspect)
                    },
                ),
                None => (
                    ty,
                    quote! { ::core::option::Option::Some(&self.#field_name) },
                ),
            };
            (
                quote! {
                    ::core::option::Option::Some(<#parent as ::pagewise::Described>::SHAPE)
                },
                quote! {
                    fn ancestor(&self) -> ::core::option::Option<&dyn ::pagewise::Inspect> {
                        #access
                    }
                },
            )
        }
    };

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#property_constants)*
        }

        impl #impl_generics ::pagewise::Described for #struct_name #ty_generics #where_clause {
            const SHAPE: &'static ::pagewise::Shape = &::pagewise::Shape {
                type_name: #type_name,
                properties: &[#(#properties),*],
                ancestor: #ancestor_shape,
            };
        }

        impl #impl_generics ::pagewise::Inspect for #struct_name #ty_generics #where_clause {
            fn shape(&self) -> &'static ::pagewise::Shape {
                <Self as ::pagewise::Described>::SHAPE
            }

            fn read(&self, property: &str) -> ::core::option::Option<::pagewise::Value<'_>> {
                match property {
                    #(#read_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            #ancestor_fn
        }
    };

    Ok(expanded)
}

/// Builds the `Value` for a present field, given an expression borrowing it.
fn value_of(kind: FieldKind, field: TokenStream) -> TokenStream {
    match kind {
        FieldKind::String => quote! {
            ::pagewise::Value::String(::core::convert::AsRef::<str>::as_ref(#field))
        },
        FieldKind::Enum => quote! {
            ::pagewise::Value::Enum(::pagewise::PropertyEnum::name(#field))
        },
        FieldKind::Number => quote! {
            ::pagewise::Value::Number(::pagewise::Number::from(*#field))
        },
        FieldKind::Bool => quote! {
            ::pagewise::Value::Bool(*#field)
        },
        FieldKind::DateTime => quote! {
            ::pagewise::Value::DateTime(::pagewise::AsDateTime::as_date_time(#field))
        },
        FieldKind::Opaque => quote! {
            ::pagewise::Value::Opaque(#field)
        },
        FieldKind::Any => quote! {
            ::pagewise::Scalar::as_value(#field)
        },
    }
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = true;
        }
    }

    result
}
