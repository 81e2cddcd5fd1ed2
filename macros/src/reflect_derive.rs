//! `#[derive(Reflect)]`: compile-time type metadata and property access.
//!
//! Generates `vesture::component::ComponentType` (the declared `TypeInfo`)
//! and `vesture::component::Reflect` (property values by name plus the marker
//! fields) for a struct with named fields.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Error, Expr, Fields, Ident, LitStr, Path, Result, Type};

use crate::args::{expect_path, expect_str, parse_attribute_args, unknown, Arg};

// ---------------------------------------------------------------------------
// Rule specs
// ---------------------------------------------------------------------------

/// Shared shape of class and style rules: `("template", order = N, disabled, concat)`.
#[derive(Default)]
struct TemplateRule {
    template: Option<LitStr>,
    order: Option<Expr>,
    disabled: bool,
    concat: bool,
}

impl TemplateRule {
    fn parse(args: &[Arg], allow_concat: bool, context: &str) -> Result<Self> {
        let mut rule = TemplateRule::default();
        for arg in args {
            match (arg, arg.key().as_deref()) {
                (Arg::Str(lit), _) if rule.template.is_none() => rule.template = Some(lit.clone()),
                (Arg::KeyValue(_, expr), Some("order")) => rule.order = Some(expr.clone()),
                (Arg::Flag(_), Some("disabled")) => rule.disabled = true,
                (Arg::Flag(_), Some("concat")) if allow_concat => rule.concat = true,
                _ => return Err(unknown(arg, context)),
            }
        }
        Ok(rule)
    }

    fn with_template(template: LitStr) -> Self {
        TemplateRule {
            template: Some(template),
            ..TemplateRule::default()
        }
    }

    fn class_tokens(&self) -> TokenStream {
        let base = match &self.template {
            Some(t) => quote! { ::vesture::rules::ClassRule::new(#t) },
            None => quote! { ::vesture::rules::ClassRule::empty() },
        };
        let order = self.order.as_ref().map(|o| quote! { .order(#o) });
        let disabled = self.disabled.then(|| quote! { .disabled(true) });
        let concat = self.concat.then(|| quote! { .concat_with_base(true) });
        quote! { #base #order #disabled #concat }
    }

    fn style_tokens(&self) -> TokenStream {
        let base = match &self.template {
            Some(t) => quote! { ::vesture::rules::StyleRule::new(#t) },
            None => quote! { <::vesture::rules::StyleRule as ::core::default::Default>::default() },
        };
        let order = self.order.as_ref().map(|o| quote! { .order(#o) });
        let disabled = self.disabled.then(|| quote! { .disabled(true) });
        quote! { #base #order #disabled }
    }
}

/// `("name", value = "fixed", order = N)`
fn attribute_tokens(args: &[Arg], context: &str) -> Result<TokenStream> {
    let mut name = None;
    let mut value = None;
    let mut order = None;
    for arg in args {
        match (arg, arg.key().as_deref()) {
            (Arg::Str(lit), _) if name.is_none() => name = Some(lit.clone()),
            (Arg::KeyValue(_, expr), Some("value")) => value = Some(expect_str(expr)?),
            (Arg::KeyValue(_, expr), Some("order")) => order = Some(expr.clone()),
            _ => return Err(unknown(arg, context)),
        }
    }
    let base = match name {
        Some(n) => quote! { ::vesture::rules::AttributeRule::named(#n) },
        None => quote! { ::vesture::rules::AttributeRule::new() },
    };
    let value = value.map(|v| quote! { .value(#v) });
    let order = order.map(|o| quote! { .order(#o) });
    Ok(quote! { #base #value #order })
}

// ---------------------------------------------------------------------------
// Struct-level `#[component(...)]`
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ComponentSpec {
    tag: Option<LitStr>,
    base: Option<Path>,
    capabilities: Vec<Path>,
    parents: Vec<(Path, bool)>,
    rules: Vec<TokenStream>,
}

impl ComponentSpec {
    fn parse(input: &DeriveInput) -> Result<Self> {
        let mut spec = ComponentSpec::default();
        for attr in input.attrs.iter().filter(|a| a.path().is_ident("component")) {
            for arg in parse_attribute_args(attr)? {
                spec.apply(&arg)?;
            }
        }
        Ok(spec)
    }

    fn apply(&mut self, arg: &Arg) -> Result<()> {
        const CONTEXT: &str = "#[component(...)]";
        match (arg, arg.key().as_deref()) {
            (Arg::KeyValue(_, expr), Some("tag")) => self.tag = Some(expect_str(expr)?),
            (Arg::KeyValue(_, expr), Some("base")) => self.base = Some(expect_path(expr)?),
            (Arg::KeyValue(_, expr), Some("class")) => {
                let rule = TemplateRule::with_template(expect_str(expr)?).class_tokens();
                self.rules.push(quote! { ::vesture::rules::Rule::Class(#rule) });
            }
            (Arg::List(_, inner), Some("class")) => {
                let rule = TemplateRule::parse(inner, true, "#[component(class(...))]")?.class_tokens();
                self.rules.push(quote! { ::vesture::rules::Rule::Class(#rule) });
            }
            (Arg::KeyValue(_, expr), Some("style")) => {
                let rule = TemplateRule::with_template(expect_str(expr)?).style_tokens();
                self.rules.push(quote! { ::vesture::rules::Rule::Style(#rule) });
            }
            (Arg::List(_, inner), Some("style")) => {
                let rule = TemplateRule::parse(inner, false, "#[component(style(...))]")?.style_tokens();
                self.rules.push(quote! { ::vesture::rules::Rule::Style(#rule) });
            }
            (Arg::List(_, inner), Some("attribute")) => {
                let rule = attribute_tokens(inner, "#[component(attribute(...))]")?;
                self.rules.push(quote! { ::vesture::rules::Rule::Attribute(#rule) });
            }
            (Arg::List(_, inner), Some("capabilities")) => {
                for cap in inner {
                    match cap {
                        Arg::Flag(path) => self.capabilities.push(path.clone()),
                        other => return Err(Error::new(other.span(), "expected a capability type")),
                    }
                }
            }
            (Arg::List(path, inner), Some("parent")) => {
                let mut parent = None;
                let mut optional = false;
                for item in inner {
                    match (item, item.key().as_deref()) {
                        (Arg::Flag(_), Some("optional")) => optional = true,
                        (Arg::Flag(p), _) if parent.is_none() => parent = Some(p.clone()),
                        _ => return Err(unknown(item, "#[component(parent(...))]")),
                    }
                }
                let parent =
                    parent.ok_or_else(|| Error::new(path.span(), "expected `parent(Type)`"))?;
                self.parents.push((parent, optional));
            }
            _ => return Err(unknown(arg, CONTEXT)),
        }
        Ok(())
    }

    fn type_info_chain(&self) -> TokenStream {
        let tag = self.tag.as_ref().map(|t| quote! { .tag(#t) });
        let base = self.base.as_ref().map(|b| quote! { .base::<#b>() });
        let capabilities = self.capabilities.iter().map(|c| quote! { .capability::<#c>() });
        let parents = self
            .parents
            .iter()
            .map(|(p, optional)| quote! { .parent::<#p>(#optional) });
        let rules = self.rules.iter().map(|r| quote! { .rule(#r) });
        quote! { #tag #base #(#capabilities)* #(#parents)* #(#rules)* }
    }
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldRole {
    Property,
    Unmatched,
    ChildContent,
    AdditionalClass,
    AdditionalStyle,
    Skip,
}

struct FieldSpec {
    ident: Ident,
    ty: Type,
    role: FieldRole,
    /// `PropertyInfo` builder calls, one per rule attribute.
    rules: Vec<TokenStream>,
}

impl FieldSpec {
    fn parse(field: &syn::Field) -> Result<Self> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new(field.span(), "expected a named field"))?;
        let mut role = FieldRole::Property;
        let mut rules = Vec::new();

        for attr in &field.attrs {
            let Some(name) = attr.path().get_ident().map(ToString::to_string) else {
                continue;
            };
            let marker = match name.as_str() {
                "unmatched" => Some(FieldRole::Unmatched),
                "child_content" => Some(FieldRole::ChildContent),
                "additional_class" => Some(FieldRole::AdditionalClass),
                "additional_style" => Some(FieldRole::AdditionalStyle),
                "skip" => Some(FieldRole::Skip),
                _ => None,
            };
            if let Some(marker) = marker {
                if role != FieldRole::Property {
                    return Err(Error::new(attr.span(), "a field can carry only one marker"));
                }
                role = marker;
                continue;
            }

            let context = format!("#[{name}(...)]");
            match name.as_str() {
                "class" => {
                    let args = parse_attribute_args(attr)?;
                    let rule = if args.is_empty() {
                        TemplateRule::with_template(LitStr::new("{0}", attr.span()))
                    } else {
                        TemplateRule::parse(&args, false, &context)?
                    };
                    let tokens = rule.class_tokens();
                    rules.push(quote! { .class(#tokens) });
                }
                "boolean_class" => {
                    let tokens = match parse_attribute_args(attr)?.as_slice() {
                        [Arg::Str(on)] => {
                            quote! { ::vesture::rules::BooleanClassRule::when_true(#on) }
                        }
                        [Arg::Str(on), Arg::Str(off)] => {
                            quote! { ::vesture::rules::BooleanClassRule::new(#on, #off) }
                        }
                        _ => {
                            return Err(Error::new(
                                attr.span(),
                                "expected `#[boolean_class(\"when-true\")]` or `#[boolean_class(\"when-true\", \"when-false\")]`",
                            ))
                        }
                    };
                    rules.push(quote! { .boolean_class(#tokens) });
                }
                "null_class" => match parse_attribute_args(attr)?.as_slice() {
                    [Arg::Str(fallback)] => rules.push(
                        quote! { .null_class(::vesture::rules::NullClassRule::new(#fallback)) },
                    ),
                    _ => return Err(Error::new(attr.span(), "expected `#[null_class(\"token\")]`")),
                },
                "style" => {
                    let tokens = TemplateRule::parse(&parse_attribute_args(attr)?, false, &context)?
                        .style_tokens();
                    rules.push(quote! { .style(#tokens) });
                }
                "attribute" => {
                    let tokens = attribute_tokens(&parse_attribute_args(attr)?, &context)?;
                    rules.push(quote! { .attribute(#tokens) });
                }
                _ => {}
            }
        }

        if role != FieldRole::Property && !rules.is_empty() {
            return Err(Error::new(
                field.span(),
                "marker fields cannot carry class, style, or attribute rules",
            ));
        }
        Ok(FieldSpec {
            ident,
            ty: field.ty.clone(),
            role,
            rules,
        })
    }

    fn property_name(&self) -> String {
        self.ident.unraw().to_string()
    }

    fn is_option(&self) -> bool {
        match &self.ty {
            Type::Path(p) => p.path.segments.last().is_some_and(|s| s.ident == "Option"),
            _ => false,
        }
    }
}

/// The one field carrying `role`, if any.
fn single_marker(fields: &[FieldSpec], role: FieldRole) -> Result<Option<&FieldSpec>> {
    let mut found = fields.iter().filter(|f| f.role == role);
    let first = found.next();
    if let Some(second) = found.next() {
        return Err(Error::new(
            second.ident.span(),
            format!("only one field may be marked {role:?}"),
        ));
    }
    Ok(first)
}

/// Body of an accessor for a marker field, `Option`-wrapped or not.
fn marker_accessor(
    field: Option<&FieldSpec>,
    wrapped: TokenStream,
    bare: TokenStream,
) -> Option<TokenStream> {
    let field = field?;
    let ident = &field.ident;
    Some(if field.is_option() {
        quote! { self.#ident #wrapped }
    } else {
        quote! { ::core::option::Option::Some(self.#ident #bare) }
    })
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub(crate) fn reflect_impl(input: TokenStream) -> Result<TokenStream> {
    let input: DeriveInput = syn::parse2(input)?;
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(Error::new(
                    input.ident.span(),
                    "#[derive(Reflect)] requires named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                Span::call_site(),
                "#[derive(Reflect)] can only be used on structs",
            ))
        }
    };

    let spec = ComponentSpec::parse(&input)?;
    let fields = fields
        .into_iter()
        .map(FieldSpec::parse)
        .collect::<Result<Vec<_>>>()?;

    let marker = |role: FieldRole| single_marker(&fields, role);

    let name = &input.ident;
    let name_str = name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let type_chain = spec.type_info_chain();
    let properties = fields
        .iter()
        .filter(|f| f.role == FieldRole::Property)
        .map(|f| {
            let prop = f.property_name();
            let rules = &f.rules;
            quote! { .property(::vesture::rules::PropertyInfo::new(#prop) #(#rules)*) }
        });

    let arms = fields.iter().filter(|f| f.role == FieldRole::Property).map(|f| {
        let prop = f.property_name();
        let ident = &f.ident;
        quote! {
            #prop => ::core::option::Option::Some(::vesture::value::ToValue::to_value(&self.#ident)),
        }
    });

    let unmatched = marker(FieldRole::Unmatched)?.map(|field| {
        let ident = &field.ident;
        let body = if field.is_option() {
            quote! { self.#ident.as_ref() }
        } else {
            quote! { ::core::option::Option::Some(&self.#ident) }
        };
        quote! {
            fn unmatched_attributes(&self) -> ::core::option::Option<&::vesture::attributes::Attributes> {
                #body
            }
        }
    });
    let child_content = marker_accessor(marker(FieldRole::ChildContent)?, quote! { .clone() }, quote! { .clone() })
        .map(|body| {
            quote! {
                fn child_content(&self) -> ::core::option::Option<::vesture::tree::RenderFragment> {
                    #body
                }
            }
        });
    let additional_class = marker_accessor(
        marker(FieldRole::AdditionalClass)?,
        quote! { .as_deref() },
        quote! { .as_str() },
    )
    .map(|body| {
        quote! {
            fn additional_class(&self) -> ::core::option::Option<&str> {
                #body
            }
        }
    });
    let additional_style = marker_accessor(
        marker(FieldRole::AdditionalStyle)?,
        quote! { .as_deref() },
        quote! { .as_str() },
    )
    .map(|body| {
        quote! {
            fn additional_style(&self) -> ::core::option::Option<&str> {
                #body
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::vesture::component::ComponentType for #name #ty_generics #where_clause {
            fn type_name() -> &'static str {
                #name_str
            }

            fn type_info() -> ::vesture::rules::TypeInfo {
                ::vesture::rules::TypeInfo::of::<Self>()
                    #type_chain
                    #(#properties)*
            }
        }

        impl #impl_generics ::vesture::component::Reflect for #name #ty_generics #where_clause {
            fn descriptor(&self) -> ::std::sync::Arc<::vesture::rules::ComponentDescriptor> {
                ::vesture::rules::descriptor_of::<Self>()
            }

            fn type_handle(&self) -> ::vesture::component::TypeHandle {
                ::vesture::component::TypeHandle::of::<Self>()
            }

            fn property(&self, name: &str) -> ::core::option::Option<::vesture::value::Value> {
                match name {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }

            #unmatched
            #child_content
            #additional_class
            #additional_style

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }
        }
    })
}

// ===========================================================================
// Tests
// ===========================================================================
