// Licensed under the Apache-2.0 license

use cot_auth::{
    AuthConfig, AuthEnv, CotTable, ImageAuthenticator, ImageDescriptor, ImageId, ImageKind,
    ImageLoader, ImageParserRegistry, ParamStore, ParamYield,
};
use cot_emu::{EmuImageStore, EmuNvCounters, RustCryptoBackend};
use cot_error::CotError;
use cot_tbbr::*;
use cot_test::{cert_parsers, payload, Chain, ChainOptions, Platform};

fn platform() -> Platform {
    Platform::new(Chain::build(&ChainOptions::default()).unwrap(), 5, 5).unwrap()
}

#[test]
fn test_raw_image_params() {
    let parsers = cert_parsers().unwrap();
    let image = payload(BL31_IMAGE_ID);

    assert_eq!(
        parsers.get_param(ImageKind::Raw, &RAW_DATA, &image),
        Ok(&image[..])
    );
    for desc in [SUBJECT_PK, SIG, SOC_FW_HASH, TRUSTED_NV_CTR] {
        assert_eq!(
            parsers.get_param(ImageKind::Raw, &desc, &image),
            Err(CotError::IMG_PARSER_ERR_INVALID_PARAM_FOR_IMAGE_KIND)
        );
    }
}

#[test]
fn test_unknown_image() {
    let mut platform = platform();
    assert_eq!(
        platform.authenticate_image(&BL2_COT, ImageId(99), b"unknown"),
        Err(CotError::COT_TABLE_ERR_UNKNOWN_IMAGE)
    );

    // BL31 is not part of the BL1 chain
    assert_eq!(
        platform.authenticate(&BL1_COT, BL31_IMAGE_ID),
        Err(CotError::COT_TABLE_ERR_UNKNOWN_IMAGE)
    );
}

#[test]
fn test_table_errors() {
    let orphans: Vec<ImageDescriptor> = BL2_COT
        .iter()
        .filter(|desc| desc.id != TRUSTED_KEY_CERT_ID)
        .copied()
        .collect();
    assert_eq!(
        CotTable::new(&orphans).err(),
        Some(CotError::COT_TABLE_ERR_UNKNOWN_PARENT)
    );

    let duplicates = [BL1_COT[0], BL1_COT[1], BL1_COT[1]];
    assert_eq!(
        CotTable::new(&duplicates).err(),
        Some(CotError::COT_TABLE_ERR_DUPLICATE_IMAGE_ID)
    );

    static RAW_YIELDS: [ParamYield; 1] = [ParamYield::new(SUBJECT_PK, CONTENT_PK_SLOT)];
    let raw_yields_key = [
        BL1_COT[0],
        ImageDescriptor {
            yields: &RAW_YIELDS,
            ..BL1_COT[1]
        },
    ];
    assert_eq!(
        CotTable::new(&raw_yields_key).err(),
        Some(CotError::COT_TABLE_ERR_RAW_IMAGE_PARAM)
    );
}

#[test]
fn test_parser_not_registered() {
    let platform = platform();
    let mut parsers = ImageParserRegistry::new();
    parsers.init().unwrap();

    let auth = ImageAuthenticator::new(bl2_cot().unwrap(), &parsers, platform.config);
    let mut crypto = RustCryptoBackend::new(&[0; 32]).unwrap();
    let mut nv_counters = EmuNvCounters::new();
    let mut env = AuthEnv::new(&mut crypto, &mut nv_counters, &platform.images);
    let mut buffers = TbbrParamBuffers::new();
    let mut store = buffers.param_store().unwrap();

    assert_eq!(
        auth.authenticate(
            &mut env,
            &mut store,
            BL31_IMAGE_ID,
            &payload(BL31_IMAGE_ID)
        ),
        Err(CotError::IMG_PARSER_ERR_NOT_REGISTERED)
    );
}

#[test]
#[should_panic(expected = "parser registry not initialized")]
fn test_uninitialized_registry() {
    let mut platform = platform();
    let parsers = ImageParserRegistry::new();
    let auth = ImageAuthenticator::new(bl2_cot().unwrap(), &parsers, AuthConfig::default());
    let mut env = AuthEnv::new(
        &mut platform.crypto,
        &mut platform.nv_counters,
        &platform.images,
    );
    let mut store = ParamStore::new();

    let _ = auth.authenticate(&mut env, &mut store, BL31_IMAGE_ID, &[]);
}

/// Loader that starts a nested request on the same authenticator
struct ReentrantLoader<'a> {
    auth: &'a ImageAuthenticator<'a>,
    images: &'a EmuImageStore,
}

impl ImageLoader for ReentrantLoader<'_> {
    fn image(&self, id: ImageId) -> Option<&[u8]> {
        let mut crypto = RustCryptoBackend::new(&[0; 32]).ok()?;
        let mut nv_counters = EmuNvCounters::new();
        let mut env = AuthEnv::new(&mut crypto, &mut nv_counters, self.images);
        let mut buffers = TbbrParamBuffers::new();
        let mut store = buffers.param_store().ok()?;
        let _ = self.auth.authenticate(&mut env, &mut store, id, &[]);
        self.images.image(id)
    }
}

#[test]
#[should_panic(expected = "re-entrant authentication request")]
fn test_reentrant_request() {
    let mut platform = platform();
    let parsers = cert_parsers().unwrap();
    let auth = ImageAuthenticator::new(bl2_cot().unwrap(), &parsers, platform.config);
    let loader = ReentrantLoader {
        auth: &auth,
        images: &platform.images,
    };
    let mut env = AuthEnv::new(&mut platform.crypto, &mut platform.nv_counters, &loader);
    let mut buffers = TbbrParamBuffers::new();
    let mut store = buffers.param_store().unwrap();

    let _ = auth.authenticate(
        &mut env,
        &mut store,
        BL31_IMAGE_ID,
        &payload(BL31_IMAGE_ID),
    );
}
