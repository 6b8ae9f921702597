use proc_macro::TokenStream;

use quote::format_ident;
use quote::quote;
use syn::ext::IdentExt;
use syn::{DeriveInput, Error};

use crate::attr::ContainerAttrs;
use crate::attr::FieldAttrs;

pub(crate) fn derive_json(input: &DeriveInput) -> Result<TokenStream, Error> {
    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "generic types are not supported by Json",
        ));
    }

    let container = ContainerAttrs::parse(&input.attrs)?;

    match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            syn::Fields::Named(fields) => {
                json_struct(fields.named.iter().collect(), &container, input)
            }
            syn::Fields::Unit => json_struct(vec![], &container, input),
            syn::Fields::Unnamed(_) => Err(Error::new_spanned(
                input,
                "tuple structs are not supported by Json, use named fields",
            )),
        },
        syn::Data::Enum(_) => Err(Error::new_spanned(
            input,
            "enum is not supported by Json",
        )),
        syn::Data::Union(_) => Err(Error::new_spanned(
            input,
            "union is not supported by Json",
        )),
    }
}

struct JsonField<'a> {
    ident: &'a syn::Ident,
    ty: &'a syn::Type,
    key: syn::LitStr,
}

fn json_fields<'a>(
    fields: Vec<&'a syn::Field>,
    container: &ContainerAttrs,
) -> Result<Vec<JsonField<'a>>, Error> {
    let mut out: Vec<JsonField<'a>> = Vec::with_capacity(fields.len());

    for field in fields {
        let attrs = FieldAttrs::parse(&field.attrs)?;

        if attrs.skip {
            continue;
        }

        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new_spanned(field, "expected a named field"))?;
        let key = attrs.rename.unwrap_or_else(|| {
            syn::LitStr::new(
                &container.rename_all.apply(&ident.unraw().to_string()),
                ident.span(),
            )
        });

        if let Some(prev) = out.iter().find(|prev| prev.key.value() == key.value()) {
            return Err(Error::new_spanned(
                &key,
                format!(
                    "duplicate JSON key {:?}, also used by field `{}`",
                    key.value(),
                    prev.ident
                ),
            ));
        }

        out.push(JsonField {
            ident,
            ty: &field.ty,
            key,
        });
    }

    Ok(out)
}

fn json_struct(
    fields: Vec<&syn::Field>,
    container: &ContainerAttrs,
    input: &DeriveInput,
) -> Result<TokenStream, Error> {
    let ident = &input.ident;
    let name_str = syn::LitStr::new(&ident.unraw().to_string(), ident.span());
    let fields = json_fields(fields, container)?;

    let accessors = fields.iter().enumerate().map(|(i, field)| {
        let get_ident = format_ident!("__get_{}", i);
        let set_ident = format_ident!("__set_{}", i);
        let field_ident = field.ident;
        let ty = field.ty;

        quote! {
            fn #get_ident(v: &#ident) -> &dyn ::typejson::ToJson {
                &v.#field_ident
            }

            fn #set_ident(
                v: &mut #ident,
                p: &mut ::typejson::json::Parser<'_>,
            ) -> ::core::result::Result<(), ::typejson::DecodeError> {
                v.#field_ident = <#ty as ::typejson::FromJson>::read_json(p)?;
                ::core::result::Result::Ok(())
            }
        }
    });
    let members = fields.iter().enumerate().map(|(i, field)| {
        let get_ident = format_ident!("__get_{}", i);
        let set_ident = format_ident!("__set_{}", i);
        let key = &field.key;
        let ty = field.ty;

        quote! {
            ::typejson::Member {
                name: #key,
                shape: <#ty as ::typejson::FromJson>::shape,
                get: #get_ident,
                set: #set_ident,
            }
        }
    });

    Ok(quote! {
        impl ::typejson::Composite for #ident {
            fn descriptor() -> &'static ::typejson::TypeDescriptor<Self> {
                #(#accessors)*

                static DESCRIPTOR: ::typejson::TypeDescriptor<#ident> = ::typejson::TypeDescriptor {
                    name: #name_str,
                    members: &[#(#members),*],
                    new: <#ident as ::core::default::Default>::default,
                };

                &DESCRIPTOR
            }
        }

        impl ::typejson::ToJson for #ident {
            fn write_json(
                &self,
                w: &mut ::typejson::json::JsonWriter<'_>,
            ) -> ::core::result::Result<(), ::typejson::EncodeError> {
                w.object(self)
            }
        }

        impl ::typejson::FromJson for #ident {
            fn shape() -> ::typejson::shape::Shape {
                ::typejson::shape::Shape::Composite(#name_str)
            }

            fn read_json(
                p: &mut ::typejson::json::Parser<'_>,
            ) -> ::core::result::Result<Self, ::typejson::DecodeError> {
                p.composite(<Self as ::typejson::Composite>::descriptor())
            }
        }
    }
    .into())
}
