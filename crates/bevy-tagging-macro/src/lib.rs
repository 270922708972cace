use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Field, Fields, Ident, Index, Member, Result, Type};

use proc_macro_crate::{crate_name, FoundCrate};

/// Type names recognised as tag storage without a `#[tags]` marker.
const STORAGE_TYPES: &[&str] = &["TagSet", "Tags"];

/// Derive `Taggable` by delegating to a tag storage field.
///
/// The field is the one marked `#[tags]`, or else the only field whose type
/// is `TagSet` or `Tags`.
///
/// ```ignore
/// #[derive(Taggable)]
/// struct Pickup {
///     name: String,
///     #[tags]
///     labels: TagSet,
/// }
/// ```
#[proc_macro_derive(Taggable, attributes(tags))]
pub fn derive_taggable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Taggable can only be derived for structs",
            ));
        }
    };

    let member = storage_member(&input.ident, fields)?;
    let krate = crate_path();
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #krate::Taggable for #name #ty_generics #where_clause {
            fn is_tagged(&self, tags: &[&str]) -> bool {
                #krate::Taggable::is_tagged(&self.#member, tags)
            }

            fn add_tags(&mut self, tags: &[&str]) -> bool {
                #krate::Taggable::add_tags(&mut self.#member, tags)
            }

            fn remove_tags(&mut self, tags: &[&str]) -> bool {
                #krate::Taggable::remove_tags(&mut self.#member, tags)
            }
        }
    })
}

/// Pick the field the impl delegates to.
fn storage_member(name: &Ident, fields: &Fields) -> Result<Member> {
    let all: Vec<(usize, &Field)> = fields.iter().enumerate().collect();

    let marked: Vec<_> = all
        .iter()
        .filter(|(_, f)| f.attrs.iter().any(|a| a.path().is_ident("tags")))
        .collect();
    match marked.as_slice() {
        [(idx, field)] => return Ok(member_of(*idx, field)),
        [] => {}
        [_, (_, second), ..] => {
            return Err(syn::Error::new_spanned(
                second,
                "only one field may be marked #[tags]",
            ));
        }
    }

    let typed: Vec<_> = all.iter().filter(|(_, f)| is_storage_type(&f.ty)).collect();
    match typed.as_slice() {
        [(idx, field)] => Ok(member_of(*idx, field)),
        [] => Err(syn::Error::new_spanned(
            name,
            "Taggable needs a `TagSet` or `Tags` field, or a field marked #[tags]",
        )),
        [_, (_, second), ..] => Err(syn::Error::new_spanned(
            second,
            "several tag storage fields found; mark the one to use with #[tags]",
        )),
    }
}

fn member_of(idx: usize, field: &Field) -> Member {
    match &field.ident {
        Some(ident) => Member::Named(ident.clone()),
        None => Member::Unnamed(Index::from(idx)),
    }
}

fn is_storage_type(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|seg| STORAGE_TYPES.iter().any(|name| seg.ident == name)),
        _ => false,
    }
}

fn crate_path() -> TokenStream2 {
    match crate_name("bevy-tagging") {
        Ok(FoundCrate::Itself) => {
            quote!(::bevy_tagging)
        }
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident)
        }
        Err(_) => quote!(::bevy_tagging),
    }
}
