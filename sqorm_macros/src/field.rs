use syn::spanned::Spanned;

use crate::attr::attr_util;

/// One struct field, mapped to one column.
pub struct Field {
    pub ident: syn::Ident,
    pub ty: syn::Type,
    pub meta: Meta,
}

pub struct Meta {
    pub pk: bool,
    pub column: Option<syn::LitStr>,
}

impl Field {
    pub fn from(field: syn::Field) -> syn::Result<Self> {
        let span = field.span();
        let ident = field
            .ident
            .ok_or_else(|| syn::Error::new(span, "Expected a named field"))?;
        let meta = meta_from_attrs(&field.attrs)?;

        Ok(Field {
            ident,
            ty: field.ty,
            meta,
        })
    }

    /// Field name without any raw identifier prefix.
    pub fn name(&self) -> String {
        let name = self.ident.to_string();
        match name.strip_prefix("r#") {
            Some(stripped) => stripped.to_string(),
            None => name,
        }
    }

    pub fn column_name(&self) -> String {
        match &self.meta.column {
            Some(lit) => lit.value(),
            None => self.name(),
        }
    }

    pub fn const_ident(&self) -> syn::Ident {
        quote::format_ident!("{}", self.name().to_uppercase())
    }
}

fn meta_from_attrs(attrs: &[syn::Attribute]) -> syn::Result<Meta> {
    let mut meta = Meta {
        pk: false,
        column: None,
    };

    for attr in attrs {
        if attr_util::attr_has_simple_ident(attr, "pk") {
            if !attr.tokens.is_empty() {
                return Err(syn::Error::new(attr.span(), "#[pk] takes no arguments"));
            }
            meta.pk = true;
        } else if attr_util::attr_has_simple_ident(attr, "column") {
            meta.column = Some(attr_util::parse_name_value(attr)?);
        }
    }

    Ok(meta)
}
