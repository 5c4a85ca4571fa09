/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

--*/

#![cfg_attr(not(feature = "cfi-test"), no_std)]
extern crate core;

mod cfi;
mod cfi_ctr;

pub use cfi::*;
pub use cfi_ctr::{CfiCounter, CfiInt};
