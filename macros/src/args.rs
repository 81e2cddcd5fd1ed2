//! Attribute argument parsing shared by the derives.
//!
//! Every helper attribute takes a comma-separated list of [`Arg`]s:
//!
//! ```text
//! "literal"            Str
//! disabled | Tabs      Flag
//! order = -1           KeyValue
//! class("x", order=1)  List
//! ```

use proc_macro2::Span;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{token, Attribute, Error, Expr, ExprLit, Lit, LitStr, Meta, Path, Result, Token};

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) enum Arg {
    Str(LitStr),
    Flag(Path),
    KeyValue(Path, Expr),
    List(Path, Vec<Arg>),
}

impl std::fmt::Debug for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arg::Str(lit) => f.debug_tuple("Str").field(&lit.value()).finish(),
            Arg::Flag(path) => f.debug_tuple("Flag").field(&path_name(path)).finish(),
            Arg::KeyValue(path, _) => f.debug_tuple("KeyValue").field(&path_name(path)).finish(),
            Arg::List(path, args) => f
                .debug_tuple("List")
                .field(&path_name(path))
                .field(args)
                .finish(),
        }
    }
}

impl Arg {
    pub(crate) fn span(&self) -> Span {
        match self {
            Arg::Str(lit) => lit.span(),
            Arg::Flag(path) | Arg::KeyValue(path, _) | Arg::List(path, _) => path.span(),
        }
    }

    /// The key of a flag, key-value, or list argument.
    pub(crate) fn key(&self) -> Option<String> {
        match self {
            Arg::Str(_) => None,
            Arg::Flag(path) | Arg::KeyValue(path, _) | Arg::List(path, _) => Some(path_name(path)),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for Arg {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.peek(LitStr) {
            return Ok(Arg::Str(input.parse()?));
        }
        let path: Path = input.parse()?;
        if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            return Ok(Arg::KeyValue(path, input.parse()?));
        }
        if input.peek(token::Paren) {
            let content;
            syn::parenthesized!(content in input);
            let args = Punctuated::<Arg, Token![,]>::parse_terminated(&content)?;
            return Ok(Arg::List(path, args.into_iter().collect()));
        }
        Ok(Arg::Flag(path))
    }
}

/// Arguments of `#[name]`, `#[name(...)]`, or `#[name = "..."]`.
pub(crate) fn parse_attribute_args(attr: &Attribute) -> Result<Vec<Arg>> {
    match &attr.meta {
        Meta::Path(_) => Ok(Vec::new()),
        Meta::List(_) => {
            let args = attr.parse_args_with(Punctuated::<Arg, Token![,]>::parse_terminated)?;
            Ok(args.into_iter().collect())
        }
        Meta::NameValue(nv) => match &nv.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(lit), ..
            }) => Ok(vec![Arg::Str(lit.clone())]),
            other => Err(Error::new(other.span(), "expected a string literal")),
        },
    }
}

/// Last path segment as a string (`order`, `HasDisabled`).
pub(crate) fn path_name(path: &Path) -> String {
    path.segments
        .last()
        .map(|s| s.ident.to_string())
        .unwrap_or_default()
}

/// The string literal of a `key = "..."` argument.
pub(crate) fn expect_str(expr: &Expr) -> Result<LitStr> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(lit), ..
        }) => Ok(lit.clone()),
        other => Err(Error::new(other.span(), "expected a string literal")),
    }
}

/// The path of a `key = Path` argument.
pub(crate) fn expect_path(expr: &Expr) -> Result<Path> {
    match expr {
        Expr::Path(p) => Ok(p.path.clone()),
        other => Err(Error::new(other.span(), "expected a type path")),
    }
}

pub(crate) fn unknown(arg: &Arg, context: &str) -> Error {
    Error::new(
        arg.span(),
        format!(
            "unknown argument `{}` in {context}",
            arg.key().unwrap_or_else(|| "string literal".to_owned())
        ),
    )
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn args(attr: Attribute) -> Vec<Arg> {
        parse_attribute_args(&attr).unwrap()
    }

    #[test]
    fn bare_attribute_has_no_args() {
        assert!(args(parse_quote!(#[class])).is_empty());
    }

    #[test]
    fn string_and_key_values() {
        let parsed = args(parse_quote!(#[class("btn-{0}", order = -1, disabled)]));
        assert_eq!(parsed.len(), 3);
        assert!(matches!(&parsed[0], Arg::Str(s) if s.value() == "btn-{0}"));
        assert_eq!(parsed[1].key().as_deref(), Some("order"));
        assert!(matches!(&parsed[2], Arg::Flag(p) if path_name(p) == "disabled"));
    }

    #[test]
    fn nested_lists() {
        let parsed = args(parse_quote!(#[component(
            tag = "nav",
            capabilities(HasDisabled, crate::Framed),
            parent(Tabs, optional)
        )]));
        assert_eq!(parsed.len(), 3);
        match &parsed[1] {
            Arg::List(path, inner) => {
                assert_eq!(path_name(path), "capabilities");
                assert_eq!(inner.len(), 2);
                assert!(matches!(&inner[1], Arg::Flag(p) if path_name(p) == "Framed"));
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn name_value_form() {
        let parsed = args(parse_quote!(#[null_class = "none"]));
        assert!(matches!(&parsed[0], Arg::Str(s) if s.value() == "none"));
    }

    #[test]
    fn non_string_name_value_is_rejected() {
        let attr: Attribute = parse_quote!(#[null_class = 3]);
        assert!(parse_attribute_args(&attr).is_err());
    }
}
