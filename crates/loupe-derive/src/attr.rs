//! `#[loupe(...)]` attribute parsing.

use syn::{Attribute, LitStr};

/// Options collected from the `#[loupe(...)]` attributes on a field or variant.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct LoupeAttrs {
    /// `#[loupe(skip)]`: leave the field out of the rendering.
    pub skip: bool,
    /// `#[loupe(rename = "...")]`: render under this name instead.
    pub rename: Option<String>,
}

impl LoupeAttrs {
    pub(crate) fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = LoupeAttrs::default();
        for attr in attrs {
            if !attr.path().is_ident("loupe") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    out.skip = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.rename = Some(lit.value());
                    Ok(())
                } else {
                    Err(meta.error("unknown loupe attribute, expected `skip` or `rename`"))
                }
            })?;
        }
        Ok(out)
    }
}
