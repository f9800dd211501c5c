//! Attribute parsing for the Inspect derive macro.
//!
//! This module provides parsers for the `#[inspect(...)]` field attributes.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Expr, ExprLit, GenericArgument, Lit, Meta, PathArguments, Result,
    Token, Type,
};

/// The declared kind of an inspected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `#[inspect(String)]`
    String,
    /// `#[inspect(Enum)]`
    Enum,
    /// `#[inspect(Number)]`
    Number,
    /// `#[inspect(Bool)]`
    Bool,
    /// `#[inspect(DateTime)]`
    DateTime,
    /// `#[inspect(Opaque)]`
    Opaque,
    /// `#[inspect(Any)]`
    Any,
}

const EXPECTED_KINDS: &str = "String, Enum, Number, Bool, DateTime, Opaque, Any";

impl FieldKind {
    /// Parse a kind from a name, accepting lowercase aliases.
    pub fn from_name(name: &str, span: Span) -> Result<Self> {
        match name {
            "String" | "string" => Ok(FieldKind::String),
            "Enum" | "enum" | "enumeration" => Ok(FieldKind::Enum),
            "Number" | "number" => Ok(FieldKind::Number),
            "Bool" | "bool" | "boolean" => Ok(FieldKind::Bool),
            "DateTime" | "datetime" | "date_time" => Ok(FieldKind::DateTime),
            "Opaque" | "opaque" => Ok(FieldKind::Opaque),
            "Any" | "any" => Ok(FieldKind::Any),
            other => Err(Error::new(
                span,
                format!("unknown inspect kind: '{other}'. Expected one of: {EXPECTED_KINDS}"),
            )),
        }
    }

    /// The `::pagewise::Kind` this maps to.
    pub fn to_tokens(self) -> TokenStream {
        match self {
            FieldKind::String => quote! { ::pagewise::Kind::String },
            FieldKind::Enum => quote! { ::pagewise::Kind::Enum },
            FieldKind::Number => quote! { ::pagewise::Kind::Number },
            FieldKind::Bool => quote! { ::pagewise::Kind::Bool },
            FieldKind::DateTime => quote! { ::pagewise::Kind::DateTime },
            FieldKind::Opaque => quote! { ::pagewise::Kind::Opaque },
            FieldKind::Any => quote! { ::pagewise::Kind::Any },
        }
    }
}

/// Field-level attributes from `#[inspect(...)]`.
#[derive(Debug, Clone)]
pub struct InspectAttr {
    /// The declared kind of this field.
    pub kind: Option<FieldKind>,
    /// The field embeds the parent value.
    pub ancestor: bool,
    /// Skip this field.
    pub skip: bool,
    /// Custom property name (default: field name).
    pub rename: Option<String>,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for InspectAttr {
    fn default() -> Self {
        InspectAttr {
            kind: None,
            ancestor: false,
            skip: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl Parse for InspectAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = InspectAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) => {
                    if p.is_ident("skip") {
                        attr.skip = true;
                    } else if p.is_ident("ancestor") {
                        attr.ancestor = true;
                        attr.span = p.span();
                    } else if let Some(ident) = p.get_ident() {
                        let kind = FieldKind::from_name(&ident.to_string(), ident.span())?;
                        attr.set_kind(kind, ident.span())?;
                    } else {
                        return Err(Error::new(
                            p.span(),
                            format!("expected a kind ({EXPECTED_KINDS}), ancestor, or skip"),
                        ));
                    }
                }

                // rename = "custom_name" or ty = "enum"
                Meta::NameValue(nv) => {
                    let Expr::Lit(ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    else {
                        return Err(Error::new(nv.value.span(), "expected a string literal"));
                    };
                    if nv.path.is_ident("rename") {
                        attr.rename = Some(s.value());
                    } else if nv.path.is_ident("ty") {
                        attr.set_kind(FieldKind::from_name(&s.value(), s.span())?, s.span())?;
                    } else {
                        return Err(Error::new(
                            nv.path.span(),
                            "unknown attribute. Expected: rename or ty",
                        ));
                    }
                }

                Meta::List(_) => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown inspect attribute. Expected a kind, ancestor, skip, rename = \"...\", or ty = \"...\"",
                    ));
                }
            }
        }

        if attr.ancestor && (attr.kind.is_some() || attr.rename.is_some()) {
            return Err(Error::new(
                attr.span,
                "an ancestor field takes no kind or rename",
            ));
        }

        Ok(attr)
    }
}

impl InspectAttr {
    fn set_kind(&mut self, kind: FieldKind, span: Span) -> Result<()> {
        if self.kind.is_some() {
            return Err(Error::new(span, "a field can only declare one kind"));
        }
        self.kind = Some(kind);
        self.span = span;
        Ok(())
    }
}

/// Extract `#[inspect(...)]` attributes from a field's attributes.
pub fn parse_inspect_attrs(attrs: &[Attribute]) -> Result<InspectAttr> {
    for attr in attrs {
        if attr.path().is_ident("inspect") {
            return attr.parse_args::<InspectAttr>();
        }
    }
    Ok(InspectAttr::default())
}

/// Returns the inner type if `ty` is spelled `Option<T>`.
///
/// Detection is syntactic: a type alias for `Option` is not recognized.
pub fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}
