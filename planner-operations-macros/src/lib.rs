//! Procedural macros for defining operations
//!
//! This crate provides the `#[operation]` attribute macro, which derives the
//! `planner_operations::Operation` trait from a request struct.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, Attribute, DeriveInput, Expr, Field, Ident, Lit, Meta, Token, Type,
};

/// Attribute macro for defining an operation
///
/// # Usage
///
/// ```ignore
/// #[operation(verb = "create", noun = "user", description = "Create a new user")]
/// #[derive(Debug, Deserialize, Serialize)]
/// pub struct CreateUser {
///     /// Unique login name
///     pub name: String,
///     /// Name shown in reports
///     pub display_name: String,
/// }
/// ```
///
/// Fields are required unless they are `Option<T>` or carry `#[serde(default)]`.
#[proc_macro_attribute]
pub fn operation(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as OperationArgs);
    let input = parse_macro_input!(item as DeriveInput);

    let name = &input.ident;
    let verb = &args.verb;
    let noun = &args.noun;
    let description = &args.description;

    let param_metas: Vec<_> = match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            syn::Fields::Named(fields) => fields.named.iter().map(generate_param_meta).collect(),
            syn::Fields::Unit => Vec::new(),
            syn::Fields::Unnamed(_) => {
                return syn::Error::new_spanned(
                    name,
                    "operation macro does not support tuple structs",
                )
                .to_compile_error()
                .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "operation macro only supports structs")
                .to_compile_error()
                .into()
        }
    };

    let num_params = param_metas.len();

    let expanded = quote! {
        #input

        impl planner_operations::Operation for #name {
            fn verb(&self) -> &'static str {
                #verb
            }

            fn noun(&self) -> &'static str {
                #noun
            }

            fn description(&self) -> &'static str {
                #description
            }

            fn parameters(&self) -> &'static [planner_operations::ParamMeta] {
                static PARAMS: [planner_operations::ParamMeta; #num_params] = [
                    #(#param_metas),*
                ];
                &PARAMS
            }
        }
    };

    TokenStream::from(expanded)
}

/// Arguments for the #[operation(...)] attribute
struct OperationArgs {
    verb: String,
    noun: String,
    description: String,
}

impl Parse for OperationArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut verb = None;
        let mut noun = None;
        let mut description = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            let value: Lit = input.parse()?;

            let value_str = match value {
                Lit::Str(s) => s.value(),
                _ => return Err(syn::Error::new_spanned(value, "expected string literal")),
            };

            match ident.to_string().as_str() {
                "verb" => verb = Some(value_str),
                "noun" => noun = Some(value_str),
                "description" => description = Some(value_str),
                other => {
                    return Err(syn::Error::new_spanned(
                        ident,
                        format!("unknown attribute: {}", other),
                    ))
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(OperationArgs {
            verb: verb.ok_or_else(|| input.error("missing 'verb' attribute"))?,
            noun: noun.ok_or_else(|| input.error("missing 'noun' attribute"))?,
            description: description
                .ok_or_else(|| input.error("missing 'description' attribute"))?,
        })
    }
}

/// Generate ParamMeta for a field
fn generate_param_meta(field: &Field) -> proc_macro2::TokenStream {
    let name = field
        .ident
        .as_ref()
        .map(|ident| ident.to_string())
        .unwrap_or_default();

    let description = extract_doc_comment(&field.attrs);
    let required = !is_option_type(&field.ty) && !has_serde_default(&field.attrs);
    let param_type = rust_type_to_param_type(&field.ty);

    let required_call = if required {
        quote! { .required() }
    } else {
        quote! {}
    };

    quote! {
        planner_operations::ParamMeta::new(#name)
            .description(#description)
            .param_type(#param_type)
            #required_call
    }
}

/// Extract doc comment from attributes
fn extract_doc_comment(attrs: &[Attribute]) -> String {
    let docs: Vec<String> = attrs
        .iter()
        .filter_map(|attr| {
            if attr.path().is_ident("doc") {
                if let Meta::NameValue(nv) = &attr.meta {
                    if let Expr::Lit(lit) = &nv.value {
                        if let Lit::Str(s) = &lit.lit {
                            return Some(s.value().trim().to_string());
                        }
                    }
                }
            }
            None
        })
        .collect();

    docs.join(" ")
}

/// Check for `#[serde(default)]` or `#[serde(default = "...")]`
fn has_serde_default(attrs: &[Attribute]) -> bool {
    let mut found = false;
    for attr in attrs {
        if attr.path().is_ident("serde") {
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("default") {
                    found = true;
                    if meta.input.peek(Token![=]) {
                        meta.input.parse::<Token![=]>()?;
                        meta.input.parse::<Lit>()?;
                    }
                } else if meta.input.peek(Token![=]) {
                    meta.input.parse::<Token![=]>()?;
                    meta.input.parse::<Lit>()?;
                }
                Ok(())
            });
        }
    }
    found
}

/// Check if type is Option<T>
fn is_option_type(ty: &Type) -> bool {
    if let Type::Path(path) = ty {
        if let Some(segment) = path.path.segments.last() {
            return segment.ident == "Option";
        }
    }
    false
}

/// Convert Rust type to ParamType
fn rust_type_to_param_type(ty: &Type) -> proc_macro2::TokenStream {
    if let Type::Path(path) = ty {
        if let Some(segment) = path.path.segments.last() {
            if segment.ident == "Option" {
                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                        return rust_type_to_param_type(inner);
                    }
                }
            } else if segment.ident == "Vec" {
                return quote! { planner_operations::ParamType::Array };
            } else if segment.ident == "bool" {
                return quote! { planner_operations::ParamType::Boolean };
            } else if segment.ident == "i32"
                || segment.ident == "i64"
                || segment.ident == "u32"
                || segment.ident == "u64"
                || segment.ident == "usize"
                || segment.ident == "isize"
            {
                return quote! { planner_operations::ParamType::Integer };
            } else if segment.ident == "f32" || segment.ident == "f64" {
                return quote! { planner_operations::ParamType::Number };
            } else if segment.ident.to_string().ends_with("Patch") {
                return quote! { planner_operations::ParamType::Object };
            }
        }
    }
    // Ids, enums and strings all travel as strings
    quote! { planner_operations::ParamType::String }
}
