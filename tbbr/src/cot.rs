/*++

Licensed under the Apache-2.0 license.

File Name:

   cot.rs

Abstract:

    File contains the BL1, BL2 and dual-root BL2 chain of trust descriptor
    tables.

--*/

use crate::*;
use cot_auth::{AuthMethod, CotTable, ImageDescriptor, ImageKind, ParamTypeDescriptor, ParamYield};
use cot_error::CotResult;

const fn sig(public_key: ParamTypeDescriptor) -> AuthMethod {
    AuthMethod::Signature {
        public_key,
        signature: SIG,
        algorithm: SIG_ALG,
        data: RAW_DATA,
    }
}

const fn nv_ctr(counter: ParamTypeDescriptor) -> AuthMethod {
    AuthMethod::NvCounter {
        cert_counter: counter,
        platform_counter: counter,
    }
}

const fn hash(expected_hash: ParamTypeDescriptor) -> AuthMethod {
    AuthMethod::Hash {
        data: RAW_DATA,
        expected_hash,
    }
}

/// Raw image authenticated by a hash published by its parent
macro_rules! raw_image {
    ($id:expr, $parent:expr, $expected_hash:expr $(,)?) => {
        ImageDescriptor {
            id: $id,
            kind: ImageKind::Raw,
            parent: Some($parent),
            methods: &[hash($expected_hash)],
            yields: &[],
        }
    };
}

//
// Trusted boot firmware
//
const TRUSTED_BOOT_FW_CERT: ImageDescriptor<'static> = ImageDescriptor {
    id: TRUSTED_BOOT_FW_CERT_ID,
    kind: ImageKind::Certificate,
    parent: None,
    methods: &[sig(SUBJECT_PK), nv_ctr(TRUSTED_NV_CTR)],
    yields: &[
        ParamYield::new(TB_FW_HASH, TB_FW_HASH_SLOT),
        ParamYield::new(TB_FW_CONFIG_HASH, TB_FW_CONFIG_HASH_SLOT),
        ParamYield::new(HW_CONFIG_HASH, HW_CONFIG_HASH_SLOT),
        ParamYield::new(FW_CONFIG_HASH, FW_CONFIG_HASH_SLOT),
    ],
};
const BL2_IMAGE: ImageDescriptor<'static> =
    raw_image!(BL2_IMAGE_ID, TRUSTED_BOOT_FW_CERT_ID, TB_FW_HASH);
const TB_FW_CONFIG: ImageDescriptor<'static> =
    raw_image!(TB_FW_CONFIG_ID, TRUSTED_BOOT_FW_CERT_ID, TB_FW_CONFIG_HASH);
const HW_CONFIG: ImageDescriptor<'static> =
    raw_image!(HW_CONFIG_ID, TRUSTED_BOOT_FW_CERT_ID, HW_CONFIG_HASH);
const FW_CONFIG: ImageDescriptor<'static> =
    raw_image!(FW_CONFIG_ID, TRUSTED_BOOT_FW_CERT_ID, FW_CONFIG_HASH);

//
// Firmware update
//
const FWU_CERT: ImageDescriptor<'static> = ImageDescriptor {
    id: FWU_CERT_ID,
    kind: ImageKind::Certificate,
    parent: None,
    methods: &[sig(SUBJECT_PK)],
    yields: &[
        ParamYield::new(SCP_BL2U_HASH, SCP_BL2U_HASH_SLOT),
        ParamYield::new(BL2U_HASH, BL2U_HASH_SLOT),
        ParamYield::new(NS_BL2U_HASH, NS_BL2U_HASH_SLOT),
    ],
};
const SCP_BL2U_IMAGE: ImageDescriptor<'static> =
    raw_image!(SCP_BL2U_IMAGE_ID, FWU_CERT_ID, SCP_BL2U_HASH);
const BL2U_IMAGE: ImageDescriptor<'static> = raw_image!(BL2U_IMAGE_ID, FWU_CERT_ID, BL2U_HASH);
const NS_BL2U_IMAGE: ImageDescriptor<'static> =
    raw_image!(NS_BL2U_IMAGE_ID, FWU_CERT_ID, NS_BL2U_HASH);

//
// Trusted key certificate
//
const TRUSTED_KEY_CERT: ImageDescriptor<'static> = ImageDescriptor {
    id: TRUSTED_KEY_CERT_ID,
    kind: ImageKind::Certificate,
    parent: None,
    methods: &[sig(SUBJECT_PK), nv_ctr(TRUSTED_NV_CTR)],
    yields: &[
        ParamYield::new(TRUSTED_WORLD_PK, TRUSTED_WORLD_PK_SLOT),
        ParamYield::new(NON_TRUSTED_WORLD_PK, NON_TRUSTED_WORLD_PK_SLOT),
    ],
};

//
// SCP Firmware
//
const SCP_FW_KEY_CERT: ImageDescriptor<'static> = ImageDescriptor {
    id: SCP_FW_KEY_CERT_ID,
    kind: ImageKind::Certificate,
    parent: Some(TRUSTED_KEY_CERT_ID),
    methods: &[sig(TRUSTED_WORLD_PK), nv_ctr(TRUSTED_NV_CTR)],
    yields: &[ParamYield::new(SCP_FW_CONTENT_PK, CONTENT_PK_SLOT)],
};
const SCP_FW_CONTENT_CERT: ImageDescriptor<'static> = ImageDescriptor {
    id: SCP_FW_CONTENT_CERT_ID,
    kind: ImageKind::Certificate,
    parent: Some(SCP_FW_KEY_CERT_ID),
    methods: &[sig(SCP_FW_CONTENT_PK), nv_ctr(TRUSTED_NV_CTR)],
    yields: &[ParamYield::new(SCP_FW_HASH, SCP_FW_HASH_SLOT)],
};
const SCP_BL2_IMAGE: ImageDescriptor<'static> =
    raw_image!(SCP_BL2_IMAGE_ID, SCP_FW_CONTENT_CERT_ID, SCP_FW_HASH);

//
// SoC Firmware
//
const SOC_FW_KEY_CERT: ImageDescriptor<'static> = ImageDescriptor {
    id: SOC_FW_KEY_CERT_ID,
    kind: ImageKind::Certificate,
    parent: Some(TRUSTED_KEY_CERT_ID),
    methods: &[sig(TRUSTED_WORLD_PK), nv_ctr(TRUSTED_NV_CTR)],
    yields: &[ParamYield::new(SOC_FW_CONTENT_PK, CONTENT_PK_SLOT)],
};
const SOC_FW_CONTENT_CERT: ImageDescriptor<'static> = ImageDescriptor {
    id: SOC_FW_CONTENT_CERT_ID,
    kind: ImageKind::Certificate,
    parent: Some(SOC_FW_KEY_CERT_ID),
    methods: &[sig(SOC_FW_CONTENT_PK), nv_ctr(TRUSTED_NV_CTR)],
    yields: &[
        ParamYield::new(SOC_FW_HASH, SOC_FW_HASH_SLOT),
        ParamYield::new(SOC_FW_CONFIG_HASH, SOC_FW_CONFIG_HASH_SLOT),
    ],
};
const BL31_IMAGE: ImageDescriptor<'static> =
    raw_image!(BL31_IMAGE_ID, SOC_FW_CONTENT_CERT_ID, SOC_FW_HASH);
const SOC_FW_CONFIG: ImageDescriptor<'static> =
    raw_image!(SOC_FW_CONFIG_ID, SOC_FW_CONTENT_CERT_ID, SOC_FW_CONFIG_HASH);

//
// Trusted OS Firmware
//
const TRUSTED_OS_FW_KEY_CERT: ImageDescriptor<'static> = ImageDescriptor {
    id: TRUSTED_OS_FW_KEY_CERT_ID,
    kind: ImageKind::Certificate,
    parent: Some(TRUSTED_KEY_CERT_ID),
    methods: &[sig(TRUSTED_WORLD_PK), nv_ctr(TRUSTED_NV_CTR)],
    yields: &[ParamYield::new(TOS_FW_CONTENT_PK, CONTENT_PK_SLOT)],
};
const TRUSTED_OS_FW_CONTENT_CERT: ImageDescriptor<'static> = ImageDescriptor {
    id: TRUSTED_OS_FW_CONTENT_CERT_ID,
    kind: ImageKind::Certificate,
    parent: Some(TRUSTED_OS_FW_KEY_CERT_ID),
    methods: &[sig(TOS_FW_CONTENT_PK), nv_ctr(TRUSTED_NV_CTR)],
    yields: &[
        ParamYield::new(TOS_FW_HASH, TOS_FW_HASH_SLOT),
        ParamYield::new(TOS_FW_EXTRA1_HASH, TOS_FW_EXTRA1_HASH_SLOT),
        ParamYield::new(TOS_FW_EXTRA2_HASH, TOS_FW_EXTRA2_HASH_SLOT),
        ParamYield::new(TOS_FW_CONFIG_HASH, TOS_FW_CONFIG_HASH_SLOT),
    ],
};
const BL32_IMAGE: ImageDescriptor<'static> =
    raw_image!(BL32_IMAGE_ID, TRUSTED_OS_FW_CONTENT_CERT_ID, TOS_FW_HASH);
const BL32_EXTRA1_IMAGE: ImageDescriptor<'static> = raw_image!(
    BL32_EXTRA1_IMAGE_ID,
    TRUSTED_OS_FW_CONTENT_CERT_ID,
    TOS_FW_EXTRA1_HASH,
);
const BL32_EXTRA2_IMAGE: ImageDescriptor<'static> = raw_image!(
    BL32_EXTRA2_IMAGE_ID,
    TRUSTED_OS_FW_CONTENT_CERT_ID,
    TOS_FW_EXTRA2_HASH,
);
const TOS_FW_CONFIG: ImageDescriptor<'static> = raw_image!(
    TOS_FW_CONFIG_ID,
    TRUSTED_OS_FW_CONTENT_CERT_ID,
    TOS_FW_CONFIG_HASH,
);

//
// Non-Trusted Firmware
//
const NON_TRUSTED_FW_KEY_CERT: ImageDescriptor<'static> = ImageDescriptor {
    id: NON_TRUSTED_FW_KEY_CERT_ID,
    kind: ImageKind::Certificate,
    parent: Some(TRUSTED_KEY_CERT_ID),
    methods: &[sig(NON_TRUSTED_WORLD_PK), nv_ctr(NON_TRUSTED_NV_CTR)],
    yields: &[ParamYield::new(NT_FW_CONTENT_PK, CONTENT_PK_SLOT)],
};
const NON_TRUSTED_FW_CONTENT_CERT: ImageDescriptor<'static> = ImageDescriptor {
    id: NON_TRUSTED_FW_CONTENT_CERT_ID,
    kind: ImageKind::Certificate,
    parent: Some(NON_TRUSTED_FW_KEY_CERT_ID),
    methods: &[sig(NT_FW_CONTENT_PK), nv_ctr(NON_TRUSTED_NV_CTR)],
    yields: &[
        ParamYield::new(NT_WORLD_BL_HASH, NT_WORLD_BL_HASH_SLOT),
        ParamYield::new(NT_FW_CONFIG_HASH, NT_FW_CONFIG_HASH_SLOT),
    ],
};

// Dual-root: the content certificate is an anchor signed with the platform
// root of trust key.
const PROT_NON_TRUSTED_FW_CONTENT_CERT: ImageDescriptor<'static> = ImageDescriptor {
    parent: None,
    methods: &[sig(PROT_PK), nv_ctr(NON_TRUSTED_NV_CTR)],
    ..NON_TRUSTED_FW_CONTENT_CERT
};

const BL33_IMAGE: ImageDescriptor<'static> =
    raw_image!(BL33_IMAGE_ID, NON_TRUSTED_FW_CONTENT_CERT_ID, NT_WORLD_BL_HASH);
const NT_FW_CONFIG: ImageDescriptor<'static> = raw_image!(
    NT_FW_CONFIG_ID,
    NON_TRUSTED_FW_CONTENT_CERT_ID,
    NT_FW_CONFIG_HASH,
);

/// Images authenticated by BL1, normal boot and firmware update
pub static BL1_COT: [ImageDescriptor<'static>; 9] = [
    TRUSTED_BOOT_FW_CERT,
    BL2_IMAGE,
    TB_FW_CONFIG,
    HW_CONFIG,
    FW_CONFIG,
    FWU_CERT,
    SCP_BL2U_IMAGE,
    BL2U_IMAGE,
    NS_BL2U_IMAGE,
];

/// Images authenticated by BL2
pub static BL2_COT: [ImageDescriptor<'static>; 20] = [
    TRUSTED_BOOT_FW_CERT,
    HW_CONFIG,
    TRUSTED_KEY_CERT,
    SCP_FW_KEY_CERT,
    SCP_FW_CONTENT_CERT,
    SCP_BL2_IMAGE,
    SOC_FW_KEY_CERT,
    SOC_FW_CONTENT_CERT,
    BL31_IMAGE,
    SOC_FW_CONFIG,
    TRUSTED_OS_FW_KEY_CERT,
    TRUSTED_OS_FW_CONTENT_CERT,
    BL32_IMAGE,
    BL32_EXTRA1_IMAGE,
    BL32_EXTRA2_IMAGE,
    TOS_FW_CONFIG,
    NON_TRUSTED_FW_KEY_CERT,
    NON_TRUSTED_FW_CONTENT_CERT,
    BL33_IMAGE,
    NT_FW_CONFIG,
];

/// Images authenticated by BL2 when the non-trusted world is anchored on
/// the platform root of trust key
pub static DUALROOT_BL2_COT: [ImageDescriptor<'static>; 19] = [
    TRUSTED_BOOT_FW_CERT,
    HW_CONFIG,
    TRUSTED_KEY_CERT,
    SCP_FW_KEY_CERT,
    SCP_FW_CONTENT_CERT,
    SCP_BL2_IMAGE,
    SOC_FW_KEY_CERT,
    SOC_FW_CONTENT_CERT,
    BL31_IMAGE,
    SOC_FW_CONFIG,
    TRUSTED_OS_FW_KEY_CERT,
    TRUSTED_OS_FW_CONTENT_CERT,
    BL32_IMAGE,
    BL32_EXTRA1_IMAGE,
    BL32_EXTRA2_IMAGE,
    TOS_FW_CONFIG,
    PROT_NON_TRUSTED_FW_CONTENT_CERT,
    BL33_IMAGE,
    NT_FW_CONFIG,
];

/// Validated BL1 table
pub fn bl1_cot() -> CotResult<CotTable<'static>> {
    CotTable::new(&BL1_COT)
}

/// Validated BL2 table
pub fn bl2_cot() -> CotResult<CotTable<'static>> {
    CotTable::new(&BL2_COT)
}

/// Validated dual-root BL2 table
pub fn dualroot_bl2_cot() -> CotResult<CotTable<'static>> {
    CotTable::new(&DUALROOT_BL2_COT)
}
