use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Fields, Ident, Type, Variant};

struct VariantMeta<'a> {
    ident: &'a Ident,
    source_ty: Option<&'a Type>,
    source_field: Option<&'a Ident>,
    has_context: bool,
    cfg_attrs: Vec<Attribute>,
    code: Option<String>,
}

pub fn expand_derive(mut input: DeriveInput) -> TokenStream {
    let codes = match extract_codes(&mut input) {
        Ok(codes) => codes,
        Err(err) => return err,
    };

    let name = &input.ident;
    let trait_name = format_ident!("{}Ext", name);

    let Data::Enum(data) = &input.data else {
        return quote! { compile_error!("plinth_error can only be derived for enums"); };
    };

    let variants: Vec<VariantMeta<'_>> = match data
        .variants
        .iter()
        .zip(codes)
        .map(|(variant, code)| parse_variant(variant, code))
        .collect()
    {
        Ok(v) => v,
        Err(err) => return err,
    };
    if let Some(err) = variants_error(&variants) {
        return err;
    }

    let derived_traits = derived_trait_names(&input);
    let mut derive_tokens = Vec::new();
    if !derived_traits.contains("Debug") {
        derive_tokens.push(quote! { Debug });
    }
    if !derived_traits.contains("Error") {
        derive_tokens.push(quote! { ::thiserror::Error });
    }
    let extra_derives = if derive_tokens.is_empty() {
        quote! {}
    } else {
        quote! { #[derive(#(#derive_tokens),*)] }
    };

    let context_impl = generate_context_trait(name, &trait_name, &variants);
    let from_impls = variants.iter().filter_map(|v| generate_from_impl(name, &trait_name, v));
    let internal_impls = generate_internal_impls(name, &variants);
    let code_impl = generate_code_impl(name, &variants);

    quote! {
        #[allow(non_shorthand_field_patterns)]
        #extra_derives
        #input

        #context_impl
        #(#from_impls)*
        #internal_impls
        #code_impl

        #[allow(dead_code)]
        fn format_context(context: &Option<std::borrow::Cow<'static, str>>) -> std::borrow::Cow<'static, str> {
            context.as_ref().map_or(std::borrow::Cow::Borrowed(""), |c| std::borrow::Cow::Owned(format!(" ({c})")))
        }
    }
}

/// Pull `#[code("...")]` off every variant; the attribute is ours, not
/// thiserror's, so it must not survive into the emitted enum.
fn extract_codes(input: &mut DeriveInput) -> Result<Vec<Option<String>>, TokenStream> {
    let Data::Enum(data) = &mut input.data else {
        return Ok(Vec::new());
    };

    let mut codes = Vec::with_capacity(data.variants.len());
    for variant in &mut data.variants {
        let mut code = None;
        let mut kept = Vec::with_capacity(variant.attrs.len());
        for attr in variant.attrs.drain(..) {
            if !attr.path().is_ident("code") {
                kept.push(attr);
                continue;
            }
            let lit: syn::LitStr = match attr.parse_args() {
                Ok(lit) => lit,
                Err(_) => {
                    return Err(syn::Error::new_spanned(
                        &attr,
                        "code attribute takes a single string literal, e.g. #[code(\"HUB_NOT_FOUND\")]",
                    )
                    .to_compile_error());
                }
            };
            let value = lit.value();
            if !is_valid_code(&value) {
                return Err(syn::Error::new_spanned(
                    &lit,
                    "error codes must be non-empty SCREAMING_SNAKE_CASE",
                )
                .to_compile_error());
            }
            code = Some(value);
        }
        variant.attrs = kept;
        codes.push(code);
    }

    Ok(codes)
}

fn parse_variant(v: &Variant, code: Option<String>) -> Result<VariantMeta<'_>, TokenStream> {
    let Fields::Named(fields) = &v.fields else {
        return Err(syn::Error::new_spanned(
            v,
            "plinth_error requires named fields for source/context handling",
        )
        .to_compile_error());
    };

    let context_field = find_context_field(fields)?;
    let source_field = find_source_field(fields);
    let cfg_attrs = v.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).cloned().collect();

    Ok(VariantMeta {
        ident: &v.ident,
        source_ty: source_field.map(|field| &field.ty),
        source_field: source_field.and_then(|field| field.ident.as_ref()),
        has_context: context_field.is_some(),
        cfg_attrs,
        code,
    })
}

fn find_context_field(fields: &syn::FieldsNamed) -> Result<Option<&syn::Field>, TokenStream> {
    for field in &fields.named {
        let Some(ident) = &field.ident else { continue };
        if ident != "context" {
            continue;
        }
        if !is_context_type(&field.ty) {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "context field must be Option<Cow<'static, str>>",
            )
            .to_compile_error());
        }
        return Ok(Some(field));
    }

    Ok(None)
}

fn find_source_field(fields: &syn::FieldsNamed) -> Option<&syn::Field> {
    fields.named.iter().find(|field| {
        let is_source_name = field.ident.as_ref().is_some_and(|ident| ident == "source");
        is_source_name || field_has_attr(field, "source") || field_has_attr(field, "from")
    })
}

fn generate_context_trait(
    name: &Ident,
    trait_name: &Ident,
    variants: &[VariantMeta<'_>],
) -> TokenStream {
    let context_variants = variants.iter().filter(|v| v.has_context).map(|v| {
        let cfg_attrs = &v.cfg_attrs;
        let ident = v.ident;
        quote! { #(#cfg_attrs)* #name::#ident { context: c, .. } => *c = Some(context.into()), }
    });

    quote! {
        pub trait #trait_name<T> {
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #trait_name<T> for Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut e| {
                    match &mut e {
                        #( #context_variants )*
                        _ => {}
                    }
                    e
                })
            }
        }
    }
}

fn generate_from_impl(
    name: &Ident,
    trait_name: &Ident,
    v: &VariantMeta<'_>,
) -> Option<TokenStream> {
    if v.ident == "Internal" {
        return None;
    }
    let source_ty = v.source_ty?;
    let source_field = v.source_field?;
    let v_ident = v.ident;
    let cfg_attrs = &v.cfg_attrs;

    Some(quote! {
        #(#cfg_attrs)*
        #[automatically_derived]
        impl From<#source_ty> for #name {
            #[inline]
            fn from(#source_field: #source_ty) -> Self { Self::#v_ident { #source_field, context: None } }
        }

        #(#cfg_attrs)*
        impl<T> #trait_name<T> for std::result::Result<T, #source_ty> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> std::result::Result<T, #name> {
                self.map_err(|#source_field| #name::#v_ident { #source_field, context: Some(context.into()) })
            }
        }
    })
}

fn generate_internal_impls(name: &Ident, variants: &[VariantMeta<'_>]) -> TokenStream {
    let internal = variants.iter().find(|v| v.ident == "Internal");
    let Some(internal) = internal else {
        return quote!();
    };
    let cfg_attrs = &internal.cfg_attrs;

    quote! {
        #(#cfg_attrs)*
        impl From<&'static str> for #name {
            #[inline]
            fn from(s: &'static str) -> Self { Self::Internal { message: std::borrow::Cow::Borrowed(s), context: None } }
        }
        #(#cfg_attrs)*
        impl From<String> for #name {
            #[inline]
            fn from(s: String) -> Self { Self::Internal { message: std::borrow::Cow::Owned(s), context: None } }
        }
    }
}

fn generate_code_impl(name: &Ident, variants: &[VariantMeta<'_>]) -> TokenStream {
    let arms = variants.iter().map(|v| {
        let cfg_attrs = &v.cfg_attrs;
        let ident = v.ident;
        let code = v.code.clone().unwrap_or_else(|| screaming_snake(&ident.to_string()));
        quote! { #(#cfg_attrs)* #name::#ident { .. } => #code, }
    });

    quote! {
        #[automatically_derived]
        impl #name {
            #[must_use]
            pub const fn code(&self) -> &'static str {
                match self {
                    #( #arms )*
                }
            }
        }
    }
}

fn field_has_attr(field: &syn::Field, name: &str) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident(name))
}

fn derived_trait_names(input: &DeriveInput) -> FxHashSet<String> {
    let mut traits = FxHashSet::default();

    for attr in &input.attrs {
        if !attr.path().is_ident("derive") {
            continue;
        }

        let _ = attr.parse_nested_meta(|meta| {
            if let Some(ident) = meta.path.get_ident() {
                traits.insert(ident.to_string());
            } else if let Some(ident) = meta.path.segments.last().map(|seg| seg.ident.to_string()) {
                traits.insert(ident);
            }
            Ok(())
        });
    }

    traits
}

fn variants_error(variants: &[VariantMeta<'_>]) -> Option<TokenStream> {
    for v in variants {
        if v.source_ty.is_some() && !v.has_context {
            return Some(
                syn::Error::new_spanned(
                    v.ident,
                    "plinth_error requires `context: Option<Cow<'static, str>>` for variants with a source",
                )
                .to_compile_error(),
            );
        }
    }
    None
}

fn is_valid_code(code: &str) -> bool {
    code.starts_with(|c: char| c.is_ascii_uppercase())
        && code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

fn screaming_snake(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    let mut prev_lower = false;
    for ch in ident.chars() {
        if ch.is_ascii_uppercase() && prev_lower {
            out.push('_');
        }
        prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        out.push(ch.to_ascii_uppercase());
    }
    out
}

fn is_context_type(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    let Some(segment) = path.path.segments.last() else {
        return false;
    };
    if segment.ident != "Option" {
        return false;
    }
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return false;
    };
    let Some(syn::GenericArgument::Type(Type::Path(inner_path))) = args.args.first() else {
        return false;
    };
    let Some(inner_seg) = inner_path.path.segments.last() else {
        return false;
    };
    if inner_seg.ident != "Cow" {
        return false;
    }
    let syn::PathArguments::AngleBracketed(inner_args) = &inner_seg.arguments else {
        return false;
    };
    let mut args_iter = inner_args.args.iter();
    let Some(syn::GenericArgument::Lifetime(lt)) = args_iter.next() else {
        return false;
    };
    if lt.ident != "static" {
        return false;
    }
    let Some(syn::GenericArgument::Type(Type::Path(str_path))) = args_iter.next() else {
        return false;
    };
    let Some(str_seg) = str_path.path.segments.last() else {
        return false;
    };
    str_seg.ident == "str"
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    fn expand(tokens: TokenStream) -> String {
        let input: DeriveInput = syn::parse2(tokens).expect("test enum parses");
        expand_derive(input).to_string()
    }

    #[test]
    fn source_variant_without_context_is_rejected() {
        let out = expand(quote! {
            pub enum DemoError {
                #[error("io: {source}")]
                Io {
                    #[source]
                    source: std::io::Error,
                },
            }
        });

        assert!(out.contains("compile_error"));
        assert!(out.contains("requires `context"));
    }

    #[test]
    fn tuple_variants_are_rejected() {
        let out = expand(quote! {
            pub enum DemoError {
                #[error("io: {0}")]
                Io(std::io::Error),
            }
        });

        assert!(out.contains("compile_error"));
        assert!(out.contains("named fields"));
    }

    #[test]
    fn wrong_context_type_is_rejected() {
        let out = expand(quote! {
            pub enum DemoError {
                #[error("boom")]
                Boom { context: Option<String> },
            }
        });

        assert!(out.contains("compile_error"));
        assert!(out.contains("Option<Cow<'static, str>>"));
    }

    #[test]
    fn lowercase_code_is_rejected() {
        let out = expand(quote! {
            pub enum DemoError {
                #[code("not_screaming")]
                #[error("boom")]
                Boom { message: String },
            }
        });

        assert!(out.contains("compile_error"));
        assert!(out.contains("SCREAMING_SNAKE_CASE"));
    }

    #[test]
    fn explicit_codes_and_fallbacks_are_emitted() {
        let out = expand(quote! {
            pub enum DemoError {
                #[code("CONFIG_SOURCE_ERROR")]
                #[error("read failed: {message}")]
                Read { message: String },

                #[error("missing")]
                NotFound { message: String },
            }
        });

        assert!(!out.contains("compile_error"));
        assert!(out.contains("\"CONFIG_SOURCE_ERROR\""));
        assert!(out.contains("\"NOT_FOUND\""));
    }

    #[test]
    fn code_attribute_is_stripped_before_thiserror_sees_it() {
        let out = expand(quote! {
            pub enum DemoError {
                #[code("A_1")]
                #[error("boom")]
                Boom { message: String },
            }
        });

        // The stripped attribute must not leak into the emitted enum.
        assert!(!out.contains("[code"));
        assert!(out.contains("thiserror"));
    }
}
