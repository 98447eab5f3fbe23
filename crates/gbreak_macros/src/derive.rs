use proc_macro2::*;
use quote::quote;
use syn::*;

fn parse_enum(item: TokenStream) -> core::result::Result<(Ident, DataEnum), TokenStream> {
	let input_parsed = match syn::parse2::<DeriveInput>(item) {
	    Ok(derived_input) => derived_input,
	    Err(err) => return Err(err.to_compile_error()),
	};

    match input_parsed.data {
		Data::Enum(body) => Ok((input_parsed.ident, body)),
		_ => Err(quote!( compile_error!("Not an enum"); )),
	}
}

/// Collect the variants and their names, where the name can be overriden by a `#[attr_name("...")]` attribute
fn variant_names(body_data: &DataEnum, attr_name: &str) -> (Vec<Ident>, Vec<TokenStream>) {
    let mut members = Vec::with_capacity(body_data.variants.len());
    let mut names = Vec::with_capacity(body_data.variants.len());

    for variant in &body_data.variants {
        members.push(variant.ident.clone());
        let val = variant.attrs.iter()
        .filter(|attr| attr.path.get_ident().map_or(false, |ident| ident == attr_name))
        .map(|attr| attr.parse_args::<LitStr>().map_or_else(|err| err.to_compile_error(), |parsed| {
            let val = parsed.value();
            quote!(#val)
        }))
        .nth(0)
        .unwrap_or_else(|| {
            let val = variant.ident.to_string();
            quote!(#val)
        });
        names.push(val);
    }
    (members, names)
}

pub fn enum_count(item: TokenStream) -> TokenStream {
    let (ident, body_data) = match parse_enum(item) {
        Ok(parsed) => parsed,
        Err(err) => return err,
    };
    let count = body_data.variants.len();

    quote!{
        impl gbreak_base::EnumCountT for #ident {
            const COUNT: usize = #count;
        }
    }
}

pub fn enum_display(item: TokenStream) -> TokenStream {
    let (ident, body_data) = match parse_enum(item) {
        Ok(parsed) => parsed,
        Err(err) => return err,
    };
    let (members, names) = variant_names(&body_data, "display");

    quote!{
        impl core::fmt::Display for #ident {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    #(#ident::#members => f.write_str(#names),)*
                }
            }
        }
    }
}

pub fn enum_from_name(item: TokenStream) -> TokenStream {
    let (ident, body_data) = match parse_enum(item) {
        Ok(parsed) => parsed,
        Err(err) => return err,
    };
    let (members, names) = variant_names(&body_data, "parse_name");

    quote!{
        impl gbreak_base::EnumFromNameT for #ident {
            fn parse(s: &str) -> Option<Self> {
                match s {
                    #(#names => Some(Self::#members),)*
                    _ => None,
                }
            }
        }
    }
}
