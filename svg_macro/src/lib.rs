extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{self, Attribute, Data, DeriveInput, Fields, Ident, LitChar, LitInt, Variant, punctuated::Punctuated, token::Comma};

///Derives the command letter table for a fieldless enum.
///
///Every variant must carry `#[letter('X')]` with the uppercase (absolute)
///form of its command letter and `#[arity(n)]` with the number of parameters
///one occurrence of the command consumes. The derive generates:
///
/// * `fn arity(self) -> usize`
/// * `fn to_char(self) -> char` (uppercase)
/// * `fn from_char(c: char) -> Option<Self>` (case-insensitive)
/// * `const ALL: &'static [Self]` in declaration order
#[proc_macro_derive(PathLetter, attributes(letter, arity))]
pub fn path_letter(items: TokenStream) -> TokenStream {
    let ast: DeriveInput = match syn::parse(items) {
	Ok(ast) => ast,
	Err(e) => return e.to_compile_error().into(),
    };

    match impl_path_letter(&ast) {
	Err(e) => e.to_compile_error().into(),
	Ok(r) => r,
    }
}

struct LetterDef {
    ident: Ident,
    letter: LitChar,
    arity: usize,
}

fn find_attr<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| attr.path.is_ident(name))
}

fn parse_letter(variant: &Variant) -> syn::Result<LetterDef> {
    if !matches!(variant.fields, Fields::Unit) {
	return Err(syn::Error::new_spanned(variant, "command letters must be unit variants"));
    }

    let missing = |name: &str| {
	syn::Error::new_spanned(&variant.ident, format!("missing #[{}(..)] attribute", name))
    };

    let letter: LitChar = find_attr(&variant.attrs, "letter")
	.ok_or_else(|| missing("letter"))?
	.parse_args()?;

    let c = letter.value();
    if !c.is_ascii_uppercase() {
	return Err(syn::Error::new_spanned(&letter, "command letter must be an uppercase ASCII letter"));
    }

    let arity: LitInt = find_attr(&variant.attrs, "arity")
	.ok_or_else(|| missing("arity"))?
	.parse_args()?;

    Ok(LetterDef {
	ident: variant.ident.clone(),
	letter,
	arity: arity.base10_parse()?,
    })
}

fn parse_letters(variants: &Punctuated<Variant, Comma>) -> syn::Result<Vec<LetterDef>> {
    let mut defs: Vec<LetterDef> = Vec::with_capacity(variants.len());

    for v in variants {
	let def = parse_letter(v)?;

	if let Some(dup) = defs.iter().find(|it| it.letter.value() == def.letter.value()) {
	    let msg = format!("letter {:?} is already used by {}", def.letter.value(), dup.ident);
	    return Err(syn::Error::new_spanned(&def.letter, msg));
	}

	defs.push(def);
    }

    Ok(defs)
}

fn impl_path_letter(input: &DeriveInput) -> syn::Result<TokenStream> {
    let data_enum = match &input.data {
	Data::Enum(data_enum) => data_enum,
	_ => return Err(syn::Error::new(Span::call_site(), "PathLetter must be derived on an enum")),
    };

    let defs = parse_letters(&data_enum.variants)?;

    let name = &input.ident;
    let idents: Vec<&Ident> = defs.iter().map(|it| &it.ident).collect();
    let letters: Vec<&LitChar> = defs.iter().map(|it| &it.letter).collect();
    let arities: Vec<usize> = defs.iter().map(|it| it.arity).collect();

    let result = quote! {
	impl #name {
	    pub const ALL: &'static [#name] = &[#(#name::#idents),*];

	    pub fn arity(self) -> usize {
		match self {
		    #(#name::#idents => #arities,)*
		}
	    }

	    pub fn to_char(self) -> char {
		match self {
		    #(#name::#idents => #letters,)*
		}
	    }

	    pub fn from_char(c: char) -> ::std::option::Option<#name> {
		match c.to_ascii_uppercase() {
		    #(#letters => ::std::option::Option::Some(#name::#idents),)*
		    _ => ::std::option::Option::None,
		}
	    }
	}
    };

    Ok(result.into())
}
