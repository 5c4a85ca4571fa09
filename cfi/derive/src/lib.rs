/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains the CFI procedural macros used to bracket verification
    routines with control flow counter checks.

References:
    https://tf-m-user-guide.trustedfirmware.org/design_docs/tfm_physical_attack_mitigation.html

--*/

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote, ToTokens};
use syn::{parse_macro_input, parse_quote, FnArg, ItemFn};

/// Wrap a free function with CFI counter checks.
#[proc_macro_attribute]
pub fn cfi_mod_fn(_args: TokenStream, input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as ItemFn);
    cfi_fn(CallKind::Free, item).into()
}

/// Wrap an associated function or method with CFI counter checks.
#[proc_macro_attribute]
pub fn cfi_impl_fn(_args: TokenStream, input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as ItemFn);
    cfi_fn(CallKind::Assoc, item).into()
}

#[derive(Clone, Copy)]
enum CallKind {
    Free,
    Assoc,
}

fn arg_names(item: &ItemFn) -> Vec<TokenStream2> {
    item.sig
        .inputs
        .iter()
        .map(|input| match input {
            FnArg::Receiver(r) => r.self_token.to_token_stream(),
            FnArg::Typed(p) => p.pat.to_token_stream(),
        })
        .collect()
}

fn cfi_fn(kind: CallKind, item: ItemFn) -> TokenStream2 {
    let mut wrapper_fn = item.clone();
    let mut inner_fn = item;

    inner_fn.sig.ident = format_ident!("__cfi_{}", wrapper_fn.sig.ident);
    inner_fn.attrs.retain(|attr| attr.path.is_ident("allow"));
    inner_fn.vis = syn::Visibility::Inherited;

    let inner_name = &inner_fn.sig.ident;
    let args = arg_names(&inner_fn);
    let call = match kind {
        CallKind::Free => quote!(#inner_name( #(#args,)* )),
        CallKind::Assoc => quote!(Self::#inner_name( #(#args,)* )),
    };

    // The wrapper snapshots the counter, runs the body and checks that the
    // body's increment was matched by exactly one decrement.
    wrapper_fn.block.stmts = parse_quote!(
        let saved_ctr = cot_cfi_lib::CfiCounter::read();
        cot_cfi_lib::CfiCounter::delay();
        let ret = #call;
        cot_cfi_lib::CfiCounter::delay();
        let new_ctr = cot_cfi_lib::CfiCounter::decrement();
        cot_cfi_lib::CfiCounter::assert_eq(saved_ctr, new_ctr);
        ret
    );
    wrapper_fn.attrs.push(parse_quote!(#[inline(always)]));

    inner_fn.block.stmts.insert(
        0,
        parse_quote!(
            cot_cfi_lib::CfiCounter::increment();
        ),
    );

    quote! {
        #wrapper_fn
        #inner_fn
    }
}
