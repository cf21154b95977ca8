use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Attribute, Field, Fields, ItemStruct, LitInt, LitStr, Meta, Token};

/// Visibility rules collected from the `#[groups]` / `#[max_depth]` field attributes.
struct FieldRules {
    groups: Vec<LitStr>,
    max_depth: Option<LitInt>,
}

/// What the field already tells serde, so we do not fight it.
#[derive(Default)]
struct SerdeFieldInfo {
    skipped: bool,
    custom_serializer: bool,
    skip_if: Option<proc_macro2::Span>,
}

/// Expands the `#[wire_model]` attribute macro.
///
/// Every named field gets a generated `skip_serializing_if` predicate backed by
/// `mgate_engine::visibility::is_visible`, and a `serialize_with` hook that tracks
/// nesting depth while the field value is written.
pub fn expand_wire_model(args: TokenStream, mut input: ItemStruct) -> TokenStream {
    let ModelArgs { rename_all, engine } = match parse_args(args) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error(),
    };
    let engine_path = path_string(&engine);

    let Fields::Named(fields) = &mut input.fields else {
        return syn::Error::new_spanned(&input.ident, "wire_model requires a struct with named fields")
            .to_compile_error();
    };

    let helpers_mod = format_ident!("__{}_wire", input.ident);
    let mut helpers = Vec::new();

    for field in &mut fields.named {
        let rules = match take_rules(field) {
            Ok(rules) => rules,
            Err(err) => return err.to_compile_error(),
        };
        let serde_info = match serde_field_info(&field.attrs) {
            Ok(info) => info,
            Err(err) => return err.to_compile_error(),
        };

        if serde_info.skipped {
            continue;
        }
        if let Some(span) = serde_info.skip_if {
            return syn::Error::new(
                span,
                "wire_model manages skip_serializing_if; use #[groups] or #[max_depth] instead",
            )
            .to_compile_error();
        }

        let Some(field_ident) = field.ident.clone() else { continue };
        let predicate = format_ident!("skip_{}", field_ident.unraw());
        let groups = &rules.groups;
        let max_depth = rules.max_depth.as_ref().map_or_else(
            || quote!(::core::option::Option::None),
            |depth| quote!(::core::option::Option::Some(#depth)),
        );

        helpers.push(quote! {
            pub(super) fn #predicate<T: ?Sized>(_: &T) -> bool {
                !#engine::visibility::is_visible(&[#(#groups),*], #max_depth)
            }
        });

        let predicate_path = LitStr::new(
            &format!("{helpers_mod}::{predicate}"),
            proc_macro2::Span::call_site(),
        );
        field.attrs.push(syn::parse_quote!(#[serde(skip_serializing_if = #predicate_path)]));
        if !serde_info.custom_serializer {
            let nested = LitStr::new(
                &format!("{engine_path}::visibility::nested"),
                proc_macro2::Span::call_site(),
            );
            field.attrs.push(syn::parse_quote!(#[serde(serialize_with = #nested)]));
        }
    }

    let derives = missing_derives(&input.attrs, &engine);
    // After any user derive, so serde sees them as its own helpers.
    let serde_crate =
        LitStr::new(&format!("{engine_path}::serde"), proc_macro2::Span::call_site());
    input.attrs.push(syn::parse_quote!(#[serde(crate = #serde_crate)]));
    if let Some(lit) = rename_all {
        input.attrs.push(syn::parse_quote!(#[serde(rename_all = #lit)]));
    }

    quote! {
        #derives
        #input

        #[doc(hidden)]
        #[allow(non_snake_case, dead_code)]
        mod #helpers_mod {
            #(#helpers)*
        }
    }
}

/// Arguments accepted by `#[wire_model(...)]`.
struct ModelArgs {
    rename_all: Option<LitStr>,
    engine: syn::Path,
}

fn parse_args(args: TokenStream) -> syn::Result<ModelArgs> {
    let metas = Punctuated::<Meta, Token![,]>::parse_terminated.parse2(args)?;
    let mut rename_all = None;
    let mut engine = None;

    for meta in metas {
        let name_value = match meta {
            Meta::NameValue(name_value) => name_value,
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "expected `rename_all = \"...\"` or `crate = \"...\"`",
                ));
            },
        };
        let lit = match &name_value.value {
            syn::Expr::Lit(syn::ExprLit { lit: syn::Lit::Str(lit), .. }) => lit.clone(),
            other => return Err(syn::Error::new_spanned(other, "expected a string literal")),
        };

        let slot = if name_value.path.is_ident("rename_all") {
            &mut rename_all
        } else if name_value.path.is_ident("crate") {
            engine = match engine {
                None => Some(lit.parse::<syn::Path>()?),
                Some(_) => return Err(syn::Error::new_spanned(name_value, "duplicate crate")),
            };
            continue;
        } else {
            return Err(syn::Error::new_spanned(
                name_value.path,
                "unsupported argument; expected rename_all or crate",
            ));
        };
        if slot.replace(lit).is_some() {
            return Err(syn::Error::new_spanned(name_value, "duplicate rename_all"));
        }
    }

    Ok(ModelArgs { rename_all, engine: engine.unwrap_or_else(|| syn::parse_quote!(::mgate_engine)) })
}

/// Removes `#[groups]` and `#[max_depth]` from the field and returns their content.
fn take_rules(field: &mut Field) -> syn::Result<FieldRules> {
    let mut rules = FieldRules { groups: Vec::new(), max_depth: None };
    let mut kept = Vec::with_capacity(field.attrs.len());

    for attr in field.attrs.drain(..) {
        if attr.path().is_ident("groups") {
            let names = attr.parse_args_with(Punctuated::<LitStr, Token![,]>::parse_terminated)?;
            if names.is_empty() {
                return Err(syn::Error::new_spanned(attr, "#[groups] needs at least one name"));
            }
            rules.groups.extend(names);
        } else if attr.path().is_ident("max_depth") {
            if rules.max_depth.is_some() {
                return Err(syn::Error::new_spanned(attr, "duplicate #[max_depth]"));
            }
            let depth: LitInt = attr.parse_args()?;
            depth.base10_parse::<u32>()?;
            rules.max_depth = Some(depth);
        } else {
            kept.push(attr);
        }
    }

    field.attrs = kept;
    Ok(rules)
}

fn serde_field_info(attrs: &[Attribute]) -> syn::Result<SerdeFieldInfo> {
    let mut info = SerdeFieldInfo::default();

    for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip")
                || meta.path.is_ident("skip_serializing")
                || meta.path.is_ident("flatten")
            {
                info.skipped = true;
            } else if meta.path.is_ident("skip_serializing_if") {
                info.skip_if = Some(meta.path.span());
            } else if meta.path.is_ident("serialize_with") || meta.path.is_ident("with") {
                info.custom_serializer = true;
            }
            // Consume `= value` and `(...)` for every key so parsing can continue.
            if meta.input.peek(Token![=]) {
                let _: syn::Expr = meta.value()?.parse()?;
            } else if meta.input.peek(syn::token::Paren) {
                let content;
                syn::parenthesized!(content in meta.input);
                let _: TokenStream = content.parse()?;
            }
            Ok(())
        })?;
    }

    Ok(info)
}

fn missing_derives(attrs: &[Attribute], engine: &syn::Path) -> TokenStream {
    let mut present = FxHashSet::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(last) = meta.path.segments.last() {
                present.insert(last.ident.to_string());
            }
            Ok(())
        });
    }

    let derives: Vec<TokenStream> = [
        ("Debug", quote!(Debug)),
        ("Serialize", quote!(#engine::serde::Serialize)),
        ("Deserialize", quote!(#engine::serde::Deserialize)),
    ]
    .into_iter()
    .filter(|(name, _)| !present.contains(*name))
    .map(|(_, tokens)| tokens)
    .collect();

    if derives.is_empty() { quote!() } else { quote!(#[derive(#(#derives),*)]) }
}

/// Renders a path the way serde expects it inside string attributes.
fn path_string(path: &syn::Path) -> String {
    let segments =
        path.segments.iter().map(|segment| segment.ident.to_string()).collect::<Vec<_>>().join("::");
    if path.leading_colon.is_some() { format!("::{segments}") } else { segments }
}
