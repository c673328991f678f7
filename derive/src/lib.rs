use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod from_bits;

#[proc_macro_derive(FromBits, attributes(bits))]
pub fn derive_from_bits(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match from_bits::expand_from_bits(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error().into(),
    }
}
