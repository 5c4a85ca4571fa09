// Licensed under the Apache-2.0 license

mod chain;

pub use chain::{payload, Chain, ChainOptions, RAW_IMAGES};

use cot_auth::{
    AuthConfig, AuthEnv, CotTable, ImageAuthenticator, ImageDescriptor, ImageId, ImageKind,
    ImageLoader, ImageParserRegistry, NvCounterPolicy, ParamStore,
};
use cot_cert_parser::CertParser;
use cot_emu::{EmuImageStore, EmuNvCounters, RustCryptoBackend};
use cot_error::{CotError, CotResult};
use cot_tbbr::oid::{NON_TRUSTED_FW_NVCOUNTER_OID, TRUSTED_FW_NVCOUNTER_OID};
use cot_tbbr::{TbbrParamBuffers, PROT_PK};

static CERT_PARSER: CertParser = CertParser::new();

/// Sealed parser registry with the certificate parser registered
pub fn cert_parsers() -> CotResult<ImageParserRegistry<'static>> {
    let mut parsers = ImageParserRegistry::new();
    parsers.register(ImageKind::Certificate, &CERT_PARSER)?;
    parsers.init()?;
    Ok(parsers)
}

/// Emulated platform: fused ROTPK hashes, NV counters and loaded images
pub struct Platform {
    pub crypto: RustCryptoBackend,
    pub nv_counters: EmuNvCounters,
    pub images: EmuImageStore,
    pub config: AuthConfig,
}

impl Platform {
    /// Provision a platform for `chain` with the given NV counter values
    pub fn new(chain: Chain, trusted_nv_ctr: u32, non_trusted_nv_ctr: u32) -> CotResult<Self> {
        Ok(Self {
            crypto: RustCryptoBackend::new(&chain.rotpk_hash)?
                .with_rotpk(PROT_PK, &chain.prot_pk_hash)?,
            nv_counters: EmuNvCounters::new()
                .with_counter(TRUSTED_FW_NVCOUNTER_OID, trusted_nv_ctr)
                .with_counter(NON_TRUSTED_FW_NVCOUNTER_OID, non_trusted_nv_ctr),
            images: chain.images,
            config: AuthConfig::new(chain.hash_alg, NvCounterPolicy::Advance),
        })
    }

    pub fn trusted_nv_ctr(&self) -> Option<u32> {
        self.nv_counters.value(TRUSTED_FW_NVCOUNTER_OID)
    }

    pub fn non_trusted_nv_ctr(&self) -> Option<u32> {
        self.nv_counters.value(NON_TRUSTED_FW_NVCOUNTER_OID)
    }

    /// Authenticate the loaded buffer of `id` against `cot`
    pub fn authenticate(&mut self, cot: &[ImageDescriptor], id: ImageId) -> CotResult<()> {
        let image = self
            .images
            .image(id)
            .map(<[u8]>::to_vec)
            .ok_or(CotError::AUTH_ERR_IMAGE_NOT_LOADED)?;
        self.authenticate_image(cot, id, &image)
    }

    /// Authenticate `image` as `id` against `cot`
    pub fn authenticate_image(
        &mut self,
        cot: &[ImageDescriptor],
        id: ImageId,
        image: &[u8],
    ) -> CotResult<()> {
        let mut buffers = TbbrParamBuffers::new();
        let mut store = buffers.param_store()?;
        self.authenticate_with_store(cot, &mut store, id, image)
    }

    /// Authenticate `image` as `id`, leaving the published parameters in
    /// `store`
    pub fn authenticate_with_store(
        &mut self,
        cot: &[ImageDescriptor],
        store: &mut ParamStore,
        id: ImageId,
        image: &[u8],
    ) -> CotResult<()> {
        let parsers = cert_parsers()?;
        let auth = ImageAuthenticator::new(CotTable::new(cot)?, &parsers, self.config);
        let mut env = AuthEnv::new(&mut self.crypto, &mut self.nv_counters, &self.images);
        auth.authenticate(&mut env, store, id, image)
    }
}
