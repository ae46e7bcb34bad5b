// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::Literal;
use quote::quote;
use syn::ext::IdentExt;
use syn::{
    parse_macro_input, parse_quote, Data, DeriveInput, Fields, GenericParam, Index, Member, Type,
    Visibility,
};

/// How a field shows up in the generated code
#[derive(Clone, Copy, PartialEq, Eq)]
enum FieldRole {
    /// Listed in the shape and reachable through `Access`
    Bound,
    /// Listed in the shape only (wire padding)
    Skip,
}

struct FieldInfo {
    name: String,
    exported: bool,
    member: Member,
    ty: Type,
    role: FieldRole,
}

/// `#[derive(Binary)]` macro: generates `flatbin::Binary` + `flatbin::Access`
///
/// Field rules:
/// - a field whose name starts with `_` is a skip field: it occupies wire
///   space (zeros on encode, discarded on decode) and is never read or written;
/// - any other non-`pub` field is left out entirely;
/// - every remaining field is encoded in declaration order.
///
/// Field types must implement `Binary`. Whether they have a wire
/// representation is checked when the plan is compiled, not here.
///
/// Example:
/// ```ignore
/// use flatbin::Binary;
///
/// #[derive(Binary)]
/// pub struct Header {
///     pub magic: u32,
///     pub _reserved: [u8; 4],
///     pub samples: Vec<i16>,
///     cache: u64, // not encoded
/// }
/// ```
#[proc_macro_derive(Binary)]
pub fn derive_binary(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(mut input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let fields = match &input.data {
        Data::Struct(data) => collect_fields(&data.fields),
        Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Binary can only be derived for structs, not enums",
            ))
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Binary can only be derived for structs, not unions",
            ))
        }
    };

    for param in &mut input.generics.params {
        match param {
            GenericParam::Type(ty) => ty.bounds.push(parse_quote!(::flatbin::Binary)),
            GenericParam::Lifetime(lt) => {
                return Err(syn::Error::new_spanned(
                    lt,
                    "Binary cannot be derived for types with lifetime parameters",
                ))
            }
            GenericParam::Const(_) => {}
        }
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let descriptors = fields.iter().map(|f| {
        let field_name = &f.name;
        let exported = f.exported;
        let ty = &f.ty;
        quote! {
            ::flatbin::shape::Field::new(
                #field_name,
                #exported,
                ::flatbin::shape::TypeRef::of::<#ty>(),
            )
        }
    });

    let bound: Vec<_> = fields
        .iter()
        .filter(|f| f.role == FieldRole::Bound)
        .collect();
    let bound_count = bound.len();
    let indexes: Vec<_> = (0..bound_count).map(Literal::usize_unsuffixed).collect();
    let members: Vec<_> = bound.iter().map(|f| &f.member).collect();

    Ok(quote! {
        impl #impl_generics ::flatbin::shape::Binary for #name #ty_generics #where_clause {
            fn shape() -> ::flatbin::shape::Shape {
                ::flatbin::shape::Shape::structure(
                    ::core::any::type_name::<Self>(),
                    ::std::vec![#(#descriptors),*],
                )
            }
        }

        impl #impl_generics ::flatbin::shape::Access for #name #ty_generics #where_clause {
            fn len(&self) -> usize {
                #bound_count
            }

            fn child(&self, index: usize) -> ::core::option::Option<&dyn ::flatbin::shape::Access> {
                match index {
                    #(#indexes => ::core::option::Option::Some(
                        &self.#members as &dyn ::flatbin::shape::Access
                    ),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn child_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn ::flatbin::shape::Access> {
                match index {
                    #(#indexes => ::core::option::Option::Some(
                        &mut self.#members as &mut dyn ::flatbin::shape::Access
                    ),)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

/// Classify fields, dropping private non-skip ones.
fn collect_fields(fields: &Fields) -> Vec<FieldInfo> {
    fields
        .iter()
        .enumerate()
        .filter_map(|(i, field)| {
            let (name, member) = match &field.ident {
                Some(ident) => (ident.unraw().to_string(), Member::Named(ident.clone())),
                None => (i.to_string(), Member::Unnamed(Index::from(i))),
            };
            let exported = !matches!(field.vis, Visibility::Inherited);
            let role = if name.starts_with('_') {
                FieldRole::Skip
            } else if exported {
                FieldRole::Bound
            } else {
                return None;
            };
            Some(FieldInfo {
                name,
                exported,
                member,
                ty: field.ty.clone(),
                role,
            })
        })
        .collect()
}
