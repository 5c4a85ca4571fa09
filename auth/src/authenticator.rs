/*++

Licensed under the Apache-2.0 license.

File Name:

    authenticator.rs

Abstract:

    File contains the image authenticator: it resolves the chain of trust of a
    requested image and authenticates every image from the trust anchor down.

--*/

use crate::env::AuthEnv;
use crate::evaluator::{AuthMethodEvaluator, ImageContext, NvCounterUpdates};
use crate::parser::ImageParserRegistry;
use crate::store::ParamStore;
use crate::table::CotTable;
use crate::types::*;
use crate::{cprintln, HexWord};
use core::cell::Cell;
#[cfg(not(feature = "no-cfi"))]
use cot_cfi_derive::cfi_impl_fn;
use cot_error::{CotError, CotResult};

/// Step of an authentication request, reported with failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStep {
    ResolvingAncestry,
    LoadingImage,
    CheckingIntegrity,
    Evaluating(usize),
    Extracting,
    CommittingCounters,
}

impl AuthStep {
    fn name(&self) -> &'static str {
        match self {
            AuthStep::ResolvingAncestry => "resolve",
            AuthStep::LoadingImage => "load",
            AuthStep::CheckingIntegrity => "integrity",
            AuthStep::Evaluating(_) => "method",
            AuthStep::Extracting => "extract",
            AuthStep::CommittingCounters => "nv-commit",
        }
    }
}

/// Authenticates images against a Chain-of-Trust table
pub struct ImageAuthenticator<'a> {
    cot: CotTable<'a>,
    parsers: &'a ImageParserRegistry<'a>,
    config: AuthConfig,
    busy: Cell<bool>,
}

impl<'a> ImageAuthenticator<'a> {
    /// Create a new instance `ImageAuthenticator`
    ///
    /// # Arguments
    ///
    /// * `cot`     - Validated Chain-of-Trust table
    /// * `parsers` - Initialized parser registry
    /// * `config`  - Engine configuration
    pub fn new(
        cot: CotTable<'a>,
        parsers: &'a ImageParserRegistry<'a>,
        config: AuthConfig,
    ) -> Self {
        Self {
            cot,
            parsers,
            config,
            busy: Cell::new(false),
        }
    }

    pub fn cot(&self) -> &CotTable<'a> {
        &self.cot
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Authenticate `image` and every ancestor of it.
    ///
    /// Ancestor buffers are taken from `env.loader`. Parameters published by
    /// each authenticated image are left in `store`. Platform NV counters are
    /// only written after the whole chain succeeded.
    ///
    /// # Arguments
    ///
    /// * `env`   - Platform services
    /// * `store` - Parameter store with every slot of the table attached
    /// * `id`    - Image identifier
    /// * `image` - Image buffer
    ///
    /// Panics if the parser registry is not initialized or if a request is
    /// already in flight on this authenticator.
    pub fn authenticate(
        &self,
        env: &mut AuthEnv,
        store: &mut ParamStore,
        id: ImageId,
        image: &[u8],
    ) -> CotResult<()> {
        assert!(
            self.parsers.is_initialized(),
            "parser registry not initialized"
        );
        assert!(!self.busy.replace(true), "re-entrant authentication request");

        cprintln!("[auth] ++ image {}", u32::from(id));
        let result = self.authenticate_chain(env, store, id, image);
        self.busy.set(false);

        match result {
            Ok(()) => cprintln!("[auth] -- image {} authenticated", u32::from(id)),
            Err(err) => cprintln!(
                "[auth] -- image {} rejected: {}",
                u32::from(id),
                HexWord(err.into())
            ),
        }
        result
    }

    fn fail(&self, id: ImageId, step: AuthStep, err: CotError) -> CotError {
        match step {
            AuthStep::Evaluating(idx) => cprintln!(
                "[auth] Image {} {} {} failed: {}",
                u32::from(id),
                step.name(),
                idx,
                HexWord(err.into())
            ),
            _ => cprintln!(
                "[auth] Image {} {} failed: {}",
                u32::from(id),
                step.name(),
                HexWord(err.into())
            ),
        }
        err
    }

    #[cfg_attr(not(feature = "no-cfi"), cfi_impl_fn)]
    fn authenticate_chain(
        &self,
        env: &mut AuthEnv,
        store: &mut ParamStore,
        id: ImageId,
        image: &[u8],
    ) -> CotResult<()> {
        if let Some(max_slot) = self.cot.max_slot() {
            if !store.covers(max_slot) {
                return Err(self.fail(
                    id,
                    AuthStep::ResolvingAncestry,
                    CotError::PARAM_STORE_ERR_TOO_FEW_SLOTS,
                ));
            }
        }

        let path = self
            .cot
            .ancestors(id)
            .map_err(|err| self.fail(id, AuthStep::ResolvingAncestry, err))?;

        let loader = env.loader;
        let evaluator = AuthMethodEvaluator::new(self.parsers, &self.config);
        let mut updates = NvCounterUpdates::new();

        for &node_id in path.as_slice() {
            let (desc, parent) = self.resolve(node_id)?;

            let buf = if node_id == id {
                image
            } else {
                loader.image(node_id).ok_or_else(|| {
                    self.fail(
                        node_id,
                        AuthStep::LoadingImage,
                        CotError::AUTH_ERR_IMAGE_NOT_LOADED,
                    )
                })?
            };

            self.parsers
                .check_integrity(desc.kind, buf)
                .map_err(|err| self.fail(node_id, AuthStep::CheckingIntegrity, err))?;

            let mut ctx = ImageContext::new(desc, parent, buf);
            for (idx, method) in desc.methods.iter().enumerate() {
                evaluator
                    .evaluate(env, store, &mut ctx, method, &updates)
                    .map_err(|err| self.fail(node_id, AuthStep::Evaluating(idx), err))?;
            }

            // Only counters of signed images may advance the platform.
            if let Some((counter, value)) = ctx.nv_candidate {
                if desc.is_signed() {
                    updates.queue(&counter, value);
                }
            }

            for y in desc.yields {
                self.parsers
                    .get_param(desc.kind, &y.desc, buf)
                    .and_then(|param| store.write(y.slot, param))
                    .map_err(|err| self.fail(node_id, AuthStep::Extracting, err))?;
            }
        }

        self.commit_nv_counters(env, &updates)
            .map_err(|err| self.fail(id, AuthStep::CommittingCounters, err))
    }

    /// Descriptor of `id` and of its issuer
    #[allow(clippy::type_complexity)]
    fn resolve(
        &self,
        id: ImageId,
    ) -> CotResult<(&'a ImageDescriptor<'a>, Option<&'a ImageDescriptor<'a>>)> {
        let lookup = |id| {
            self.cot
                .lookup(id)
                .map_err(|err| self.fail(id, AuthStep::ResolvingAncestry, err))
        };
        let desc = lookup(id)?;
        let parent = match desc.parent {
            Some(parent) => Some(lookup(parent)?),
            None => None,
        };
        Ok((desc, parent))
    }

    fn commit_nv_counters(&self, env: &mut AuthEnv, updates: &NvCounterUpdates) -> CotResult<()> {
        if self.config.nv_counter_policy == NvCounterPolicy::Frozen {
            return Ok(());
        }
        for (counter, value) in updates.iter() {
            env.nv_counters.write(counter, *value).map_err(|err| {
                cprintln!("[auth] NV counter write error {}", HexWord(err.into()));
                CotError::NV_CTR_ERR_WRITE_FAILURE
            })?;
        }
        Ok(())
    }
}
