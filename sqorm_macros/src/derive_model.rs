use quote::quote;
use syn::parse::ParseStream;
use syn::spanned::Spanned;

use crate::attr::attr_util;
use crate::field::Field;

pub struct ModelStruct {
    pub ident: syn::Ident,
    pub table_name: syn::LitStr,
    pub fields: Vec<Field>,
    pub pk_index: usize,
}

impl syn::parse::Parse for ModelStruct {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let item: syn::ItemStruct = input.parse()?;

        if !item.generics.params.is_empty() {
            return Err(syn::Error::new(
                item.generics.span(),
                "Model structs cannot be generic",
            ));
        }

        let attr = attr_util::find_attr(&item.attrs, "table_name")
            .ok_or_else(|| syn::Error::new(item.span(), "#[table_name = \"?\"] not found"))?;
        let table_name = attr_util::parse_name_value(attr)?;

        let named = match item.fields {
            syn::Fields::Named(named) => named.named,
            other => {
                return Err(syn::Error::new(
                    other.span(),
                    "Model structs must have named fields",
                ))
            }
        };

        let fields = named
            .into_iter()
            .map(Field::from)
            .collect::<syn::Result<Vec<_>>>()?;

        let mut pk_index = None;
        for (index, field) in fields.iter().enumerate() {
            if !field.meta.pk {
                continue;
            }
            if pk_index.is_some() {
                return Err(syn::Error::new(field.ident.span(), "Only one field can be #[pk]"));
            }
            pk_index = Some(index);
        }
        let pk_index =
            pk_index.ok_or_else(|| syn::Error::new(item.ident.span(), "No field is marked #[pk]"))?;

        Ok(ModelStruct {
            ident: item.ident,
            table_name,
            fields,
            pk_index,
        })
    }
}

pub fn gen_model(model: ModelStruct) -> proc_macro2::TokenStream {
    let ident = &model.ident;
    let table_name = &model.table_name;
    let mod_ident = quote::format_ident!("__sqorm_{}", ident.to_string().to_lowercase());

    let field_idents: Vec<_> = model.fields.iter().map(|field| &field.ident).collect();
    let field_tys: Vec<_> = model.fields.iter().map(|field| &field.ty).collect();
    let const_idents: Vec<_> = model.fields.iter().map(Field::const_ident).collect();
    let column_names: Vec<_> = model.fields.iter().map(Field::column_name).collect();
    let pks: Vec<_> = model.fields.iter().map(|field| field.meta.pk).collect();
    let prop_count = model.fields.len();
    let pk_ident = &model.fields[model.pk_index].ident;

    quote! {
        impl #ident {
            #(
                pub const #const_idents: ::sqorm::Prop = ::sqorm::Prop::new(
                    #column_names,
                    <#field_tys as ::sqorm::Column>::TY,
                    #pks,
                );
            )*
        }

        #[doc(hidden)]
        mod #mod_ident {
            use super::*;

            pub struct TableStore;

            pub static INSTANCE: TableStore = TableStore;

            static PROPS: [::sqorm::Prop; #prop_count] = [#(#ident::#const_idents),*];

            impl ::sqorm::Store for TableStore {
                fn name(&self) -> &'static str {
                    #table_name
                }

                fn props(&self) -> &'static [::sqorm::Prop] {
                    &PROPS
                }

                fn model(&self) -> ::std::boxed::Box<dyn ::sqorm::Model> {
                    ::std::boxed::Box::new(<#ident as ::std::default::Default>::default())
                }
            }
        }

        impl ::sqorm::Model for #ident {
            fn store(&self) -> &'static dyn ::sqorm::Store {
                &#mod_ident::INSTANCE
            }

            fn values(&self) -> ::std::vec::Vec<::sqorm::Value> {
                ::std::vec![#(::sqorm::Column::to_value(&self.#field_idents)),*]
            }

            fn pk(&self) -> ::sqorm::Value {
                ::sqorm::Column::to_value(&self.#pk_ident)
            }

            fn scan(&mut self, values: ::std::vec::Vec<::sqorm::Value>) -> ::sqorm::Result<()> {
                let mut values = values.into_iter();
                #(
                    self.#field_idents = ::sqorm::Column::from_value(
                        ::sqorm::model::next_value(&mut values, #column_names)?
                    )?;
                )*
                ::std::result::Result::Ok(())
            }

            fn scan_pk(&mut self, value: ::sqorm::Value) -> ::sqorm::Result<()> {
                self.#pk_ident = ::sqorm::Column::from_value(value)?;
                ::std::result::Result::Ok(())
            }

            fn into_any(
                self: ::std::boxed::Box<Self>,
            ) -> ::std::boxed::Box<dyn ::std::any::Any + ::std::marker::Send> {
                self
            }
        }

        impl ::sqorm::Table for #ident {
            fn store() -> &'static dyn ::sqorm::Store {
                &#mod_ident::INSTANCE
            }
        }
    }
}
