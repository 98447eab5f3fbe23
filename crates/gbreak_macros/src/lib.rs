mod derive;

use proc_macro::TokenStream;

#[proc_macro_derive(EnumCount)]
pub fn enum_count(item: TokenStream) -> TokenStream {
    derive::enum_count(item.into()).into()
}

/// Derive `gbreak_base::EnumFromNameT`, the name of a variant can be overwritten with `#[parse_name("...")]`
#[proc_macro_derive(EnumFromName, attributes(parse_name))]
pub fn enum_from_name(item: TokenStream) -> TokenStream {
    derive::enum_from_name(item.into()).into()
}

/// Derive `Display`, the displayed name of a variant can be overwritten with `#[display("...")]`
#[proc_macro_derive(EnumDisplay, attributes(display))]
pub fn enum_display(item: TokenStream) -> TokenStream {
    derive::enum_display(item.into()).into()
}
