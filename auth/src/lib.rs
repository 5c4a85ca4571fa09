/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    Chain-of-Trust authentication library.

--*/
#![cfg_attr(not(feature = "std"), no_std)]

mod authenticator;
mod env;
mod evaluator;
mod parser;
pub mod printer;
mod store;
mod table;
mod types;

pub use authenticator::{AuthStep, ImageAuthenticator};
pub use env::{AuthEnv, CryptoBackend, ImageLoader, NvCounterBackend};
pub use parser::{ImageParser, ImageParserRegistry};
pub use printer::{HexBytes, HexWord};
pub use store::ParamStore;
pub use table::{AncestorPath, CotTable};
pub use types::*;

pub use cot_error::{CotError, CotResult};
