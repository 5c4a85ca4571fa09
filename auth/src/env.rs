/*++

Licensed under the Apache-2.0 license.

File Name:

    env.rs

Abstract:

    File contains the platform services the authentication engine consumes.

--*/

use crate::types::*;
use cot_error::CotResult;

/// Cryptographic primitives
pub trait CryptoBackend {
    /// Calculate the digest of `data`
    fn hash(&mut self, alg: HashAlgorithm, data: &[u8]) -> CotResult<Digest>;

    /// Verify `signature` over `data`.
    ///
    /// # Arguments
    ///
    /// * `data`       - Signed data
    /// * `public_key` - Public key as extracted from the issuer
    /// * `signature`  - Signature as extracted from the image
    /// * `algorithm`  - Signature algorithm as extracted from the image
    ///
    /// # Returns
    ///
    /// * `bool` - `false` if the signature does not verify
    fn verify(
        &mut self,
        data: &[u8],
        public_key: &[u8],
        signature: &[u8],
        algorithm: &[u8],
    ) -> CotResult<bool>;

    /// Hash of a root of trust public key, as fused in the platform.
    ///
    /// `key` is the public key descriptor of the trust anchor's signature
    /// method. Platforms with several trust anchors select the fused hash
    /// by it.
    fn rotpk_hash(&mut self, key: &ParamTypeDescriptor) -> CotResult<Digest>;
}

/// Platform anti-rollback counters
pub trait NvCounterBackend {
    fn read(&mut self, counter: &ParamTypeDescriptor) -> CotResult<u32>;

    /// Set the counter to `value`. Writing the current value is a no-op.
    fn write(&mut self, counter: &ParamTypeDescriptor, value: u32) -> CotResult<()>;
}

/// Buffers of images loaded earlier in the boot stage
pub trait ImageLoader {
    fn image(&self, id: ImageId) -> Option<&[u8]>;
}

/// Services for one authentication request
pub struct AuthEnv<'a> {
    pub crypto: &'a mut dyn CryptoBackend,
    pub nv_counters: &'a mut dyn NvCounterBackend,
    pub loader: &'a dyn ImageLoader,
}

impl<'a> AuthEnv<'a> {
    pub fn new(
        crypto: &'a mut dyn CryptoBackend,
        nv_counters: &'a mut dyn NvCounterBackend,
        loader: &'a dyn ImageLoader,
    ) -> Self {
        Self {
            crypto,
            nv_counters,
            loader,
        }
    }
}
