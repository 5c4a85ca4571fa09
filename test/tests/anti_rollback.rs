// Licensed under the Apache-2.0 license

use cot_auth::NvCounterPolicy;
use cot_error::CotError;
use cot_tbbr::oid::*;
use cot_tbbr::*;
use cot_test::{Chain, ChainOptions, Platform};

fn chain(trusted_nv_ctr: u32, non_trusted_nv_ctr: u32) -> Chain {
    Chain::build(&ChainOptions {
        trusted_nv_ctr,
        non_trusted_nv_ctr,
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn test_counter_advances() {
    let mut platform = Platform::new(chain(7, 5), 5, 5).unwrap();

    assert_eq!(platform.authenticate(&BL2_COT, BL31_IMAGE_ID), Ok(()));
    assert_eq!(platform.trusted_nv_ctr(), Some(7));
    assert_eq!(platform.non_trusted_nv_ctr(), Some(5));
    assert_eq!(
        platform.nv_counters.writes(),
        &[(TRUSTED_FW_NVCOUNTER_OID, 7)]
    );
}

#[test]
fn test_rollback_rejected() {
    let mut platform = Platform::new(chain(3, 5), 5, 5).unwrap();

    for id in [BL31_IMAGE_ID, TRUSTED_KEY_CERT_ID, SCP_BL2_IMAGE_ID] {
        assert_eq!(
            platform.authenticate(&BL2_COT, id),
            Err(CotError::AUTH_ERR_NV_COUNTER_ROLLBACK)
        );
    }
    assert_eq!(platform.trusted_nv_ctr(), Some(5));
    assert!(platform.nv_counters.writes().is_empty());
}

#[test]
fn test_bl1_counter_advances() {
    let mut platform = Platform::new(chain(7, 5), 5, 5).unwrap();

    assert_eq!(platform.authenticate(&BL1_COT, BL2_IMAGE_ID), Ok(()));
    assert_eq!(platform.trusted_nv_ctr(), Some(7));
    assert_eq!(
        platform.nv_counters.writes(),
        &[(TRUSTED_FW_NVCOUNTER_OID, 7)]
    );
}

#[test]
fn test_bl1_rollback_rejected() {
    let mut platform = Platform::new(chain(3, 5), 5, 5).unwrap();

    for id in [TRUSTED_BOOT_FW_CERT_ID, BL2_IMAGE_ID, HW_CONFIG_ID] {
        assert_eq!(
            platform.authenticate(&BL1_COT, id),
            Err(CotError::AUTH_ERR_NV_COUNTER_ROLLBACK)
        );
    }
    assert_eq!(platform.trusted_nv_ctr(), Some(5));
    assert!(platform.nv_counters.writes().is_empty());
}

#[test]
fn test_non_trusted_counter() {
    let mut platform = Platform::new(chain(5, 8), 5, 5).unwrap();

    // The trusted world does not carry the non-trusted counter
    assert_eq!(platform.authenticate(&BL2_COT, BL32_IMAGE_ID), Ok(()));
    assert_eq!(platform.non_trusted_nv_ctr(), Some(5));

    assert_eq!(platform.authenticate(&BL2_COT, BL33_IMAGE_ID), Ok(()));
    assert_eq!(platform.non_trusted_nv_ctr(), Some(8));
    assert_eq!(platform.trusted_nv_ctr(), Some(5));
}

#[test]
fn test_descendant_below_ancestor() {
    // The key certificate already claims 7, the content certificate 6
    let opts = ChainOptions {
        trusted_nv_ctr: 7,
        nv_ctr_overrides: vec![(SOC_FW_CONTENT_CERT_ID, 6)],
        ..Default::default()
    };
    let mut platform = Platform::new(Chain::build(&opts).unwrap(), 5, 5).unwrap();

    assert_eq!(
        platform.authenticate(&BL2_COT, BL31_IMAGE_ID),
        Err(CotError::AUTH_ERR_NV_COUNTER_ROLLBACK)
    );
    assert_eq!(platform.trusted_nv_ctr(), Some(5));

    // Other branches are unaffected
    assert_eq!(platform.authenticate(&BL2_COT, BL32_IMAGE_ID), Ok(()));
    assert_eq!(platform.trusted_nv_ctr(), Some(7));
}

#[test]
fn test_descendant_above_ancestor() {
    let opts = ChainOptions {
        trusted_nv_ctr: 6,
        nv_ctr_overrides: vec![(SOC_FW_CONTENT_CERT_ID, 9)],
        ..Default::default()
    };
    let mut platform = Platform::new(Chain::build(&opts).unwrap(), 5, 5).unwrap();

    assert_eq!(platform.authenticate(&BL2_COT, BL31_IMAGE_ID), Ok(()));
    assert_eq!(platform.trusted_nv_ctr(), Some(9));
    assert_eq!(
        platform.nv_counters.writes(),
        &[(TRUSTED_FW_NVCOUNTER_OID, 9)]
    );
}

#[test]
fn test_counters_never_decrease() {
    let mut platform = Platform::new(chain(7, 5), 5, 5).unwrap();
    let mut last = platform.trusted_nv_ctr().unwrap();

    for (cert_ctr, ok) in [(7, true), (6, false), (9, true), (8, false), (9, true)] {
        platform.images = chain(cert_ctr, 5).images;
        let result = platform.authenticate(&BL2_COT, BL31_IMAGE_ID);
        assert_eq!(result.is_ok(), ok, "counter {cert_ctr}");
        if !ok {
            assert_eq!(result, Err(CotError::AUTH_ERR_NV_COUNTER_ROLLBACK));
        }

        let current = platform.trusted_nv_ctr().unwrap();
        assert!(current >= last);
        last = current;
    }

    assert_eq!(last, 9);
    assert_eq!(
        platform.nv_counters.writes(),
        &[(TRUSTED_FW_NVCOUNTER_OID, 7), (TRUSTED_FW_NVCOUNTER_OID, 9)]
    );
}

#[test]
fn test_frozen_policy() {
    let mut platform = Platform::new(chain(7, 5), 5, 5).unwrap();
    platform.config.nv_counter_policy = NvCounterPolicy::Frozen;

    assert_eq!(platform.authenticate(&BL2_COT, BL31_IMAGE_ID), Ok(()));
    assert_eq!(platform.trusted_nv_ctr(), Some(5));
    assert!(platform.nv_counters.writes().is_empty());

    // Rollback protection still applies
    platform.images = chain(3, 5).images;
    assert_eq!(
        platform.authenticate(&BL2_COT, BL31_IMAGE_ID),
        Err(CotError::AUTH_ERR_NV_COUNTER_ROLLBACK)
    );
}

#[test]
fn test_failed_chain_commits_nothing() {
    let mut platform = Platform::new(chain(7, 5), 5, 5).unwrap();
    let mut leaf = cot_test::payload(BL31_IMAGE_ID);
    leaf[0] ^= 0x80;

    // Every certificate passes its counter check before the leaf fails
    assert_eq!(
        platform.authenticate_image(&BL2_COT, BL31_IMAGE_ID, &leaf),
        Err(CotError::AUTH_ERR_HASH_MISMATCH)
    );
    assert_eq!(platform.trusted_nv_ctr(), Some(5));
    assert!(platform.nv_counters.writes().is_empty());
}

#[test]
fn test_nv_write_failure() {
    let mut platform = Platform::new(chain(7, 5), 5, 5).unwrap();
    platform.nv_counters.set_fail_write(true);

    assert_eq!(
        platform.authenticate(&BL2_COT, BL31_IMAGE_ID),
        Err(CotError::NV_CTR_ERR_WRITE_FAILURE)
    );
    assert_eq!(platform.trusted_nv_ctr(), Some(5));

    // Nothing to write when the counters already match
    let mut platform = Platform::new(chain(5, 5), 5, 5).unwrap();
    platform.nv_counters.set_fail_write(true);
    assert_eq!(platform.authenticate(&BL2_COT, BL31_IMAGE_ID), Ok(()));
}

#[test]
fn test_nv_read_failure() {
    let mut platform = Platform::new(chain(5, 5), 5, 5).unwrap();
    platform.nv_counters.set_fail_read(true);

    assert_eq!(
        platform.authenticate(&BL2_COT, BL31_IMAGE_ID),
        Err(CotError::NV_CTR_ERR_READ_FAILURE)
    );
}
