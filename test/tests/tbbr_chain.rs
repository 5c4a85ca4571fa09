// Licensed under the Apache-2.0 license

use cot_auth::{HashAlgorithm, ParamStore, SlotId};
use cot_cert_gen::{CertGenerator, RustCrypto};
use cot_cert_types::CertSigAlg;
use cot_error::CotError;
use cot_tbbr::*;
use cot_test::{payload, Chain, ChainOptions, Platform};

fn platform(opts: &ChainOptions) -> Platform {
    Platform::new(Chain::build(opts).unwrap(), 5, 5).unwrap()
}

#[test]
fn test_bl1_images() {
    let mut platform = platform(&ChainOptions::default());
    for desc in BL1_COT.iter() {
        assert_eq!(platform.authenticate(&BL1_COT, desc.id), Ok(()));
    }
}

#[test]
fn test_bl2_images() {
    let mut platform = platform(&ChainOptions::default());
    for desc in BL2_COT.iter() {
        assert_eq!(platform.authenticate(&BL2_COT, desc.id), Ok(()));
    }
    assert!(platform.nv_counters.writes().is_empty());
}

#[test]
fn test_fwu_images() {
    // The update certificate declares no counter method
    let mut platform = Platform::new(
        Chain::build(&ChainOptions {
            trusted_nv_ctr: 7,
            ..Default::default()
        })
        .unwrap(),
        5,
        5,
    )
    .unwrap();
    let opts = ChainOptions::default();
    let gen = CertGenerator::new(RustCrypto::default());

    for (id, slot) in [
        (SCP_BL2U_IMAGE_ID, SCP_BL2U_HASH_SLOT),
        (BL2U_IMAGE_ID, BL2U_HASH_SLOT),
        (NS_BL2U_IMAGE_ID, NS_BL2U_HASH_SLOT),
    ] {
        let mut buffers = TbbrParamBuffers::new();
        let mut store = buffers.param_store().unwrap();
        assert_eq!(
            platform.authenticate_with_store(&BL1_COT, &mut store, id, &payload(id)),
            Ok(())
        );
        assert_eq!(
            store.read(slot).unwrap(),
            gen.digest(opts.hash_alg, &payload(id)).unwrap()
        );

        let mut image = payload(id);
        image[1] ^= 0x02;
        assert_eq!(
            platform.authenticate_image(&BL1_COT, id, &image),
            Err(CotError::AUTH_ERR_HASH_MISMATCH)
        );
    }
    assert_eq!(platform.trusted_nv_ctr(), Some(5));
    assert!(platform.nv_counters.writes().is_empty());

    // Normal boot still advances the counter
    assert_eq!(platform.authenticate(&BL1_COT, BL2_IMAGE_ID), Ok(()));
    assert_eq!(platform.trusted_nv_ctr(), Some(7));
}

#[test]
fn test_dualroot_images() {
    let mut platform = platform(&ChainOptions {
        dual_root: true,
        ..Default::default()
    });
    for desc in DUALROOT_BL2_COT.iter() {
        assert_eq!(platform.authenticate(&DUALROOT_BL2_COT, desc.id), Ok(()));
    }
    assert!(platform.nv_counters.writes().is_empty());
}

#[test]
fn test_algorithms() {
    for (sig_alg, hash_alg) in [
        (CertSigAlg::EcdsaP256Sha256, HashAlgorithm::Sha256),
        (CertSigAlg::EcdsaP256Sha256, HashAlgorithm::Sha384),
        (CertSigAlg::EcdsaP384Sha384, HashAlgorithm::Sha384),
        (CertSigAlg::EcdsaP384Sha384, HashAlgorithm::Sha512),
    ] {
        let mut platform = platform(&ChainOptions {
            sig_alg,
            hash_alg,
            ..Default::default()
        });
        for id in [BL31_IMAGE_ID, BL32_EXTRA2_IMAGE_ID, BL33_IMAGE_ID, SCP_BL2_IMAGE_ID] {
            assert_eq!(platform.authenticate(&BL2_COT, id), Ok(()));
        }
    }
}

#[test]
fn test_published_params() {
    let opts = ChainOptions::default();
    let mut platform = platform(&opts);
    let gen = CertGenerator::new(RustCrypto::default());

    let mut buffers = TbbrParamBuffers::new();
    let mut store = buffers.param_store().unwrap();
    platform
        .authenticate_with_store(
            &BL2_COT,
            &mut store,
            BL31_IMAGE_ID,
            &payload(BL31_IMAGE_ID),
        )
        .unwrap();

    assert_eq!(
        store.read(SOC_FW_HASH_SLOT).unwrap(),
        gen.digest(opts.hash_alg, &payload(BL31_IMAGE_ID)).unwrap()
    );
    assert_eq!(
        store.read(SOC_FW_CONFIG_HASH_SLOT).unwrap(),
        gen.digest(opts.hash_alg, &payload(SOC_FW_CONFIG_ID)).unwrap()
    );
    assert_eq!(store.read(CONTENT_PK_SLOT).unwrap().len(), PK_BUF_LEN);

    // Slots of other branches are untouched
    assert!(store.read(NT_WORLD_BL_HASH_SLOT).unwrap().is_empty());
}

#[test]
fn test_param_store_too_small() {
    let mut platform = platform(&ChainOptions::default());
    let mut bufs = [[0u8; PK_BUF_LEN]; 4];
    let mut store = ParamStore::new();
    for (idx, buf) in bufs.iter_mut().enumerate() {
        store.attach(SlotId(idx as u8), buf).unwrap();
    }

    assert_eq!(
        platform.authenticate_with_store(
            &BL2_COT,
            &mut store,
            BL31_IMAGE_ID,
            &payload(BL31_IMAGE_ID)
        ),
        Err(CotError::PARAM_STORE_ERR_TOO_FEW_SLOTS)
    );
}
