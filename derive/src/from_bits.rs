use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, Field, Fields, Ident, LitInt, LitStr, Result, Type,
    parse::{Parse, ParseStream},
    spanned::Spanned,
};

pub(crate) fn expand_from_bits(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new(
            input.span(),
            "`FromBits` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new(
            input.span(),
            "`FromBits` may only be derived on structs with named fields.",
        ))?
    };

    let fields = fields
        .named
        .iter()
        .map(FieldMetadata::parse)
        .collect::<Result<Vec<_>>>()?;

    // Bind each field in declaration order, since that is the stream order.
    let reads = fields.iter().map(|field| {
        let FieldMetadata {
            name,
            primitive,
            width,
        } = field;

        let label = LitStr::new(&name.to_string(), name.span());

        quote! {
            let #name = __cursor.read(#width).map_err(|source| {
                ::windsock::sans::record::FieldUnderrun { field: #label, source }
            })? as #primitive;
        }
    });

    let names = fields.iter().map(|field| &field.name);

    let name = &input.ident;
    let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::windsock::sans::record::FromBits for #name #type_generics #where_clause {
            fn from_bits(
                __cursor: &mut ::windsock::sans::cursor::BitCursor<'_>,
            ) -> ::core::result::Result<Self, ::windsock::sans::record::FieldUnderrun> {
                #(#reads)*
                ::core::result::Result::Ok(Self { #(#names),* })
            }
        }
    };

    Ok(expanded.into())
}

#[derive(Debug)]
struct FieldMetadata {
    name: Ident,
    primitive: Ident,
    width: LitInt,
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Self> {
        let name = field.ident.clone().unwrap();

        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("bits")) else {
            Err(Error::new_spanned(
                field,
                "Every field must carry a `bits(N)` attribute.",
            ))?
        };

        let BitsAttribute { width } = attr.meta.require_list()?.parse_args()?;

        let Type::Path(path) = &field.ty else {
            Err(Error::new_spanned(
                &field.ty,
                "Field must have an unsigned integer type.",
            ))?
        };

        let Some(primitive) = path.path.get_ident() else {
            Err(Error::new_spanned(
                &path.path,
                "Field must have an unsigned integer type.",
            ))?
        };

        let capacity = if primitive == "u8" {
            8
        } else if primitive == "u16" {
            16
        } else if primitive == "u32" {
            32
        } else {
            Err(Error::new_spanned(
                primitive,
                "Field must have type `u8`, `u16`, or `u32`.",
            ))?
        };

        let bits = width.base10_parse::<u32>()?;

        if !(1..=32).contains(&bits) {
            Err(Error::new(
                width.span(),
                "Bit width must be between 1 and 32.",
            ))?
        }

        if bits > capacity {
            Err(Error::new(
                width.span(),
                format!("Bit width {bits} does not fit in `{primitive}`."),
            ))?
        }

        Ok(Self {
            name,
            primitive: primitive.clone(),
            width: LitInt::new(&format!("{bits}u32"), width.span()),
        })
    }
}

#[derive(Debug)]
struct BitsAttribute {
    width: LitInt,
}

impl Parse for BitsAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let width = input.parse::<LitInt>()?;
        Ok(Self { width })
    }
}
