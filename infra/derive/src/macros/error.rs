use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Fields, FieldsNamed, Ident, LitInt, Type, Variant};

/// Accepted spellings of the context field type, whitespace removed.
const CONTEXT_TYPES: &[&str] = &[
    "Option<Cow<'static,str>>",
    "Option<std::borrow::Cow<'static,str>>",
    "Option<::std::borrow::Cow<'static,str>>",
];

struct ErrorVariant {
    ident: Ident,
    source: Option<(Ident, Type)>,
    has_context: bool,
    field_count: usize,
    status: Option<LitInt>,
    cfg_attrs: Vec<Attribute>,
}

pub fn expand_gateway_error(mut input: DeriveInput) -> TokenStream {
    let name = input.ident.clone();
    let ext = format_ident!("{}Ext", name);

    let Data::Enum(data) = &mut input.data else {
        return syn::Error::new_spanned(&name, "gateway_error can only be applied to enums")
            .to_compile_error();
    };

    let mut variants = Vec::with_capacity(data.variants.len());
    for variant in &mut data.variants {
        match parse_variant(variant) {
            Ok(parsed) => variants.push(parsed),
            Err(err) => return err.to_compile_error(),
        }
        // `status` is ours; thiserror must not see it.
        variant.attrs.retain(|attr| !attr.path().is_ident("status"));
    }

    let derives = missing_derives(&input.attrs);
    let ext_trait = context_trait(&name, &ext, &variants);
    let source_impls = variants.iter().filter_map(|v| source_impls(&name, &ext, v));
    let internal = internal_impls(&name, &variants);
    let status = status_impl(&name, &variants);

    quote! {
        #derives
        #input

        #ext_trait
        #(#source_impls)*
        #internal
        #status

        #[allow(dead_code)]
        fn format_context(
            context: &::core::option::Option<::std::borrow::Cow<'static, str>>,
        ) -> ::std::borrow::Cow<'static, str> {
            match context {
                ::core::option::Option::Some(c) => ::std::borrow::Cow::Owned(format!(" ({c})")),
                ::core::option::Option::None => ::std::borrow::Cow::Borrowed(""),
            }
        }
    }
}

fn parse_variant(variant: &Variant) -> syn::Result<ErrorVariant> {
    let Fields::Named(fields) = &variant.fields else {
        return Err(syn::Error::new_spanned(
            variant,
            "gateway_error variants must use named fields (message/source + context)",
        ));
    };

    let has_context = has_context_field(fields)?;
    let source = fields
        .named
        .iter()
        .find(|field| {
            field.ident.as_ref().is_some_and(|ident| ident == "source")
                || field.attrs.iter().any(|a| a.path().is_ident("source") || a.path().is_ident("from"))
        })
        .and_then(|field| field.ident.clone().map(|ident| (ident, field.ty.clone())));

    if source.is_some() && !has_context {
        return Err(syn::Error::new_spanned(
            &variant.ident,
            "variants with a source need `context: Option<Cow<'static, str>>`",
        ));
    }

    Ok(ErrorVariant {
        ident: variant.ident.clone(),
        source,
        has_context,
        field_count: fields.named.len(),
        status: status_attr(&variant.attrs)?,
        cfg_attrs: variant.attrs.iter().filter(|a| a.path().is_ident("cfg")).cloned().collect(),
    })
}

fn has_context_field(fields: &FieldsNamed) -> syn::Result<bool> {
    let Some(field) =
        fields.named.iter().find(|f| f.ident.as_ref().is_some_and(|ident| ident == "context"))
    else {
        return Ok(false);
    };

    let ty = &field.ty;
    let rendered = quote!(#ty).to_string().replace(' ', "");
    if CONTEXT_TYPES.contains(&rendered.as_str()) {
        Ok(true)
    } else {
        Err(syn::Error::new_spanned(ty, "context field must be Option<Cow<'static, str>>"))
    }
}

fn status_attr(attrs: &[Attribute]) -> syn::Result<Option<LitInt>> {
    let mut status = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("status")) {
        if status.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate #[status] attribute"));
        }
        let lit: LitInt = attr.parse_args()?;
        let code: u16 = lit.base10_parse()?;
        if !(100..=599).contains(&code) {
            return Err(syn::Error::new_spanned(&lit, "status must be an HTTP status code"));
        }
        status = Some(lit);
    }
    Ok(status)
}

fn missing_derives(attrs: &[Attribute]) -> TokenStream {
    let mut present = FxHashSet::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(last) = meta.path.segments.last() {
                present.insert(last.ident.to_string());
            }
            Ok(())
        });
    }

    let mut derives = Vec::new();
    if !present.contains("Debug") {
        derives.push(quote!(Debug));
    }
    if !present.contains("Error") {
        derives.push(quote!(::thiserror::Error));
    }

    if derives.is_empty() { quote!() } else { quote!(#[derive(#(#derives),*)]) }
}

fn context_trait(name: &Ident, ext: &Ident, variants: &[ErrorVariant]) -> TokenStream {
    let slots = variants.iter().filter(|v| v.has_context).map(|v| {
        let ident = &v.ident;
        let cfg = &v.cfg_attrs;
        quote! { #(#cfg)* #name::#ident { context: slot, .. } => ::core::option::Option::Some(slot), }
    });

    quote! {
        pub trait #ext<T> {
            fn context(
                self,
                context: impl Into<::std::borrow::Cow<'static, str>>,
            ) -> ::core::result::Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext<T> for ::core::result::Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<::std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut error| {
                    #[allow(unreachable_patterns)]
                    let slot: ::core::option::Option<
                        &mut ::core::option::Option<::std::borrow::Cow<'static, str>>,
                    > = match &mut error {
                        #(#slots)*
                        _ => ::core::option::Option::None,
                    };
                    if let ::core::option::Option::Some(slot) = slot {
                        *slot = ::core::option::Option::Some(context.into());
                    }
                    error
                })
            }
        }
    }
}

fn source_impls(name: &Ident, ext: &Ident, variant: &ErrorVariant) -> Option<TokenStream> {
    // Only `source + context` variants can be built from the source alone.
    if variant.ident == "Internal" || variant.field_count != 2 {
        return None;
    }
    let (field, ty) = variant.source.as_ref()?;
    let ident = &variant.ident;
    let cfg = &variant.cfg_attrs;

    Some(quote! {
        #(#cfg)*
        #[automatically_derived]
        impl ::core::convert::From<#ty> for #name {
            #[inline]
            fn from(#field: #ty) -> Self {
                Self::#ident { #field, context: ::core::option::Option::None }
            }
        }

        #(#cfg)*
        #[automatically_derived]
        impl<T> #ext<T> for ::core::result::Result<T, #ty> {
            #[inline]
            fn context(
                self,
                context: impl Into<::std::borrow::Cow<'static, str>>,
            ) -> ::core::result::Result<T, #name> {
                self.map_err(|#field| #name::#ident {
                    #field,
                    context: ::core::option::Option::Some(context.into()),
                })
            }
        }
    })
}

fn internal_impls(name: &Ident, variants: &[ErrorVariant]) -> TokenStream {
    let Some(internal) = variants.iter().find(|v| v.ident == "Internal" && v.has_context) else {
        return quote!();
    };
    let cfg = &internal.cfg_attrs;

    quote! {
        #(#cfg)*
        impl ::core::convert::From<&'static str> for #name {
            #[inline]
            fn from(message: &'static str) -> Self {
                Self::Internal {
                    message: ::std::borrow::Cow::Borrowed(message),
                    context: ::core::option::Option::None,
                }
            }
        }

        #(#cfg)*
        impl ::core::convert::From<String> for #name {
            #[inline]
            fn from(message: String) -> Self {
                Self::Internal {
                    message: ::std::borrow::Cow::Owned(message),
                    context: ::core::option::Option::None,
                }
            }
        }
    }
}

fn status_impl(name: &Ident, variants: &[ErrorVariant]) -> TokenStream {
    let arms: Vec<TokenStream> = variants
        .iter()
        .filter_map(|v| {
            let status = v.status.as_ref()?;
            let ident = &v.ident;
            let cfg = &v.cfg_attrs;
            Some(quote! { #(#cfg)* Self::#ident { .. } => ::core::option::Option::Some(#status), })
        })
        .collect();

    if arms.is_empty() {
        return quote!();
    }

    quote! {
        impl #name {
            /// HTTP status hint declared with `#[status(..)]`, if any.
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn status_code(&self) -> ::core::option::Option<u16> {
                match self {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}
