use syn::parse::ParseStream;

pub fn attr_has_simple_ident(attr: &syn::Attribute, name: &str) -> bool {
    let path = &attr.path;
    if path.leading_colon.is_some() || path.segments.len() != 1 {
        return false;
    }

    match path.segments.last() {
        Some(segment) => segment.ident == name,
        None => false,
    }
}

pub fn find_attr<'a>(attrs: &'a [syn::Attribute], name: &str) -> Option<&'a syn::Attribute> {
    attrs.iter().find(|attr| attr_has_simple_ident(attr, name))
}

/// The `= "value"` part of a `#[name = "value"]` attribute.
pub struct NameValue(pub syn::LitStr);

impl syn::parse::Parse for NameValue {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let _: syn::token::Eq = input.parse()?;
        Ok(Self(input.parse()?))
    }
}

pub fn parse_name_value(attr: &syn::Attribute) -> syn::Result<syn::LitStr> {
    let NameValue(lit) = syn::parse2(attr.tokens.clone())?;
    Ok(lit)
}
