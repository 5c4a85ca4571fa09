/*++

Licensed under the Apache-2.0 license.

File Name:

    evaluator.rs

Abstract:

    File contains the evaluation of authentication methods against one image.

--*/

use crate::env::AuthEnv;
use crate::parser::ImageParserRegistry;
use crate::store::ParamStore;
use crate::types::*;
use crate::{cprintln, HexBytes, HexWord};
#[cfg(not(feature = "no-cfi"))]
use cot_cfi_derive::cfi_impl_fn;
use cot_cfi_lib::{cfi_assert_bool, cfi_assert_eq_bytes, cfi_assert_ge, cfi_launder};
use cot_error::{CotError, CotResult};
use subtle::ConstantTimeEq;

/// Counter values accepted during one request, committed once the whole
/// chain has been authenticated.
pub(crate) struct NvCounterUpdates {
    entries: [Option<(ParamTypeDescriptor, u32)>; MAX_COT_DEPTH],
}

impl NvCounterUpdates {
    pub(crate) fn new() -> Self {
        Self {
            entries: [None; MAX_COT_DEPTH],
        }
    }

    /// Value already queued for `counter`
    pub(crate) fn pending(&self, counter: &ParamTypeDescriptor) -> Option<u32> {
        self.entries
            .iter()
            .flatten()
            .find(|(desc, _)| desc == counter)
            .map(|(_, value)| *value)
    }

    /// Queue `value` for `counter`, keeping the largest value per counter
    pub(crate) fn queue(&mut self, counter: &ParamTypeDescriptor, value: u32) {
        for entry in self.entries.iter_mut() {
            match entry {
                Some((desc, queued)) if desc == counter => {
                    *queued = (*queued).max(value);
                    return;
                }
                None => {
                    *entry = Some((*counter, value));
                    return;
                }
                _ => {}
            }
        }
        // One counter method per image and at most MAX_COT_DEPTH images per path.
        unreachable!("more NV counters than images on the path");
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &(ParamTypeDescriptor, u32)> {
        self.entries.iter().flatten()
    }
}

/// Image under evaluation
pub(crate) struct ImageContext<'i, 'd> {
    pub desc: &'d ImageDescriptor<'d>,
    pub parent: Option<&'d ImageDescriptor<'d>>,
    pub image: &'i [u8],

    /// Counter value above the platform value, queued once every method of
    /// the image has passed
    pub nv_candidate: Option<(ParamTypeDescriptor, u32)>,
}

impl<'i, 'd> ImageContext<'i, 'd> {
    pub fn new(
        desc: &'d ImageDescriptor<'d>,
        parent: Option<&'d ImageDescriptor<'d>>,
        image: &'i [u8],
    ) -> Self {
        Self {
            desc,
            parent,
            image,
            nv_candidate: None,
        }
    }
}

fn crypto_err(err: CotError) -> CotError {
    cprintln!("[auth] Crypto backend error {}", HexWord(err.into()));
    CotError::CRYPTO_ERR_BACKEND_FAILURE
}

/// Executes authentication methods
pub(crate) struct AuthMethodEvaluator<'r, 'a> {
    parsers: &'r ImageParserRegistry<'a>,
    config: &'r AuthConfig,
}

impl<'r, 'a> AuthMethodEvaluator<'r, 'a> {
    pub fn new(parsers: &'r ImageParserRegistry<'a>, config: &'r AuthConfig) -> Self {
        Self { parsers, config }
    }

    /// Run `method` against the image in `ctx`
    #[cfg_attr(not(feature = "no-cfi"), cfi_impl_fn)]
    pub fn evaluate(
        &self,
        env: &mut AuthEnv,
        store: &ParamStore,
        ctx: &mut ImageContext,
        method: &AuthMethod,
        updates: &NvCounterUpdates,
    ) -> CotResult<()> {
        match method {
            AuthMethod::Hash {
                data,
                expected_hash,
            } => self.verify_hash(env, store, ctx, data, expected_hash),
            AuthMethod::Signature {
                public_key,
                signature,
                algorithm,
                data,
            } => self.verify_signature(env, store, ctx, public_key, signature, algorithm, data),
            AuthMethod::NvCounter {
                cert_counter,
                platform_counter,
            } => self.verify_nv_counter(env, ctx, cert_counter, platform_counter, updates),
        }
    }

    fn image_param<'i>(
        &self,
        ctx: &ImageContext<'i, '_>,
        desc: &ParamTypeDescriptor,
    ) -> CotResult<&'i [u8]> {
        self.parsers.get_param(ctx.desc.kind, desc, ctx.image)
    }

    fn parent_param<'s>(
        &self,
        store: &'s ParamStore,
        ctx: &ImageContext,
        desc: &ParamTypeDescriptor,
    ) -> CotResult<&'s [u8]> {
        let slot = ctx
            .parent
            .and_then(|parent| parent.yield_slot(desc))
            .ok_or(CotError::COT_TABLE_ERR_PARENT_PARAM_MISSING)?;
        store.read(slot)
    }

    fn verify_hash(
        &self,
        env: &mut AuthEnv,
        store: &ParamStore,
        ctx: &ImageContext,
        data: &ParamTypeDescriptor,
        expected_hash: &ParamTypeDescriptor,
    ) -> CotResult<()> {
        let data = self.image_param(ctx, data)?;
        let expected = self.parent_param(store, ctx, expected_hash)?;

        let digest = env
            .crypto
            .hash(self.config.hash_alg, data)
            .map_err(crypto_err)?;

        if !bool::from(digest.as_bytes().ct_eq(expected)) {
            cprintln!("[auth] Expected hash {}", HexBytes(expected));
            cprintln!("[auth] Actual hash   {}", HexBytes(digest.as_bytes()));
            return Err(CotError::AUTH_ERR_HASH_MISMATCH);
        } else {
            cfi_assert_eq_bytes(digest.as_bytes(), expected);
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn verify_signature(
        &self,
        env: &mut AuthEnv,
        store: &ParamStore,
        ctx: &ImageContext,
        public_key: &ParamTypeDescriptor,
        signature: &ParamTypeDescriptor,
        algorithm: &ParamTypeDescriptor,
        data: &ParamTypeDescriptor,
    ) -> CotResult<()> {
        let signature = self.image_param(ctx, signature)?;
        let algorithm = self.image_param(ctx, algorithm)?;
        let data = self.image_param(ctx, data)?;

        let public_key = if ctx.desc.is_anchor() {
            let key = self.image_param(ctx, public_key)?;
            self.verify_rotpk(env, public_key, key)?;
            key
        } else {
            self.parent_param(store, ctx, public_key)?
        };

        let valid = env
            .crypto
            .verify(data, public_key, signature, algorithm)
            .map_err(crypto_err)?;

        if !cfi_launder(valid) {
            return Err(CotError::AUTH_ERR_SIGNATURE_INVALID);
        } else {
            cfi_assert_bool(valid);
        }
        Ok(())
    }

    /// Check that `key` hashes to the root of trust public key hash the
    /// platform fused for `key_desc`
    fn verify_rotpk(
        &self,
        env: &mut AuthEnv,
        key_desc: &ParamTypeDescriptor,
        key: &[u8],
    ) -> CotResult<()> {
        let key_hash = env
            .crypto
            .hash(self.config.hash_alg, key)
            .map_err(crypto_err)?;
        let rotpk_hash = env.crypto.rotpk_hash(key_desc).map_err(crypto_err)?;

        if !bool::from(key_hash.as_bytes().ct_eq(rotpk_hash.as_bytes())) {
            cprintln!("[auth] ROTPK hash {}", HexBytes(rotpk_hash.as_bytes()));
            return Err(CotError::AUTH_ERR_ROTPK_MISMATCH);
        } else {
            cfi_assert_eq_bytes(key_hash.as_bytes(), rotpk_hash.as_bytes());
        }
        Ok(())
    }

    fn verify_nv_counter(
        &self,
        env: &mut AuthEnv,
        ctx: &mut ImageContext,
        cert_counter: &ParamTypeDescriptor,
        platform_counter: &ParamTypeDescriptor,
        updates: &NvCounterUpdates,
    ) -> CotResult<()> {
        let raw = self.image_param(ctx, cert_counter)?;
        let value = u32::from_le_bytes(
            raw.try_into()
                .map_err(|_| CotError::AUTH_ERR_NV_COUNTER_FORMAT)?,
        );

        let platform = env.nv_counters.read(platform_counter).map_err(|err| {
            cprintln!("[auth] NV counter read error {}", HexWord(err.into()));
            CotError::NV_CTR_ERR_READ_FAILURE
        })?;

        // A counter accepted earlier in this request raises the floor.
        let floor = platform.max(updates.pending(platform_counter).unwrap_or(0));

        if cfi_launder(value) < floor {
            cprintln!("[auth] NV counter {} below floor {}", value, floor);
            return Err(CotError::AUTH_ERR_NV_COUNTER_ROLLBACK);
        } else {
            cfi_assert_ge(value, floor);
        }

        if value > platform {
            ctx.nv_candidate = Some((*platform_counter, value));
        }
        Ok(())
    }
}
