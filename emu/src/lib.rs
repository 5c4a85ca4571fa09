/*++

Licensed under the Apache-2.0 license.

File Name:

   lib.rs

Abstract:

    File contains the emulated platform services of the Chain-of-Trust
    engine: crypto backend, NV counters and image store.

--*/

mod crypto;
mod image_store;
mod nv_counters;

pub use crypto::RustCryptoBackend;
pub use image_store::EmuImageStore;
pub use nv_counters::EmuNvCounters;
