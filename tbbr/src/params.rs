/*++

Licensed under the Apache-2.0 license.

File Name:

   params.rs

Abstract:

    File contains the authentication parameter descriptors of the TBBR chain
    of trust and the parameter slot plan shared by the BL1 and BL2 tables.

--*/

use crate::oid::*;
use cot_auth::{ParamStore, ParamType, ParamTypeDescriptor, SlotId, MAX_DIGEST_SIZE};
use cot_error::CotResult;

pub const RAW_DATA: ParamTypeDescriptor = ParamTypeDescriptor::intrinsic(ParamType::RawData);
pub const SIG: ParamTypeDescriptor = ParamTypeDescriptor::intrinsic(ParamType::Signature);
pub const SIG_ALG: ParamTypeDescriptor =
    ParamTypeDescriptor::intrinsic(ParamType::SignatureAlgorithm);
pub const SUBJECT_PK: ParamTypeDescriptor = ParamTypeDescriptor::intrinsic(ParamType::PublicKey);

pub const TRUSTED_NV_CTR: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::NvCounter, TRUSTED_FW_NVCOUNTER_OID);
pub const NON_TRUSTED_NV_CTR: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::NvCounter, NON_TRUSTED_FW_NVCOUNTER_OID);

pub const PROT_PK: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::PublicKey, PROT_PK_OID);
pub const TRUSTED_WORLD_PK: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::PublicKey, TRUSTED_WORLD_PK_OID);
pub const NON_TRUSTED_WORLD_PK: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::PublicKey, NON_TRUSTED_WORLD_PK_OID);
pub const SCP_FW_CONTENT_PK: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::PublicKey, SCP_FW_CONTENT_CERT_PK_OID);
pub const SOC_FW_CONTENT_PK: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::PublicKey, SOC_FW_CONTENT_CERT_PK_OID);
pub const TOS_FW_CONTENT_PK: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::PublicKey, TRUSTED_OS_FW_CONTENT_CERT_PK_OID);
pub const NT_FW_CONTENT_PK: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::PublicKey, NON_TRUSTED_FW_CONTENT_CERT_PK_OID);

pub const TB_FW_HASH: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::Hash, TRUSTED_BOOT_FW_HASH_OID);
pub const TB_FW_CONFIG_HASH: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::Hash, TRUSTED_BOOT_FW_CONFIG_HASH_OID);
pub const HW_CONFIG_HASH: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::Hash, HW_CONFIG_HASH_OID);
pub const FW_CONFIG_HASH: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::Hash, FW_CONFIG_HASH_OID);
pub const SCP_BL2U_HASH: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::Hash, SCP_FWU_CFG_HASH_OID);
pub const BL2U_HASH: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::Hash, AP_FWU_CFG_HASH_OID);
pub const NS_BL2U_HASH: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::Hash, FWU_HASH_OID);
pub const SCP_FW_HASH: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::Hash, SCP_FW_HASH_OID);
pub const SOC_FW_HASH: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::Hash, SOC_AP_FW_HASH_OID);
pub const SOC_FW_CONFIG_HASH: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::Hash, SOC_FW_CONFIG_HASH_OID);
pub const TOS_FW_HASH: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::Hash, TRUSTED_OS_FW_HASH_OID);
pub const TOS_FW_EXTRA1_HASH: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::Hash, TRUSTED_OS_FW_EXTRA1_HASH_OID);
pub const TOS_FW_EXTRA2_HASH: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::Hash, TRUSTED_OS_FW_EXTRA2_HASH_OID);
pub const TOS_FW_CONFIG_HASH: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::Hash, TRUSTED_OS_FW_CONFIG_HASH_OID);
pub const NT_WORLD_BL_HASH: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::Hash, NON_TRUSTED_WORLD_BOOTLOADER_HASH_OID);
pub const NT_FW_CONFIG_HASH: ParamTypeDescriptor =
    ParamTypeDescriptor::oid(ParamType::Hash, NON_TRUSTED_FW_CONFIG_HASH_OID);

pub const TB_FW_HASH_SLOT: SlotId = SlotId(0);
pub const TB_FW_CONFIG_HASH_SLOT: SlotId = SlotId(1);
pub const HW_CONFIG_HASH_SLOT: SlotId = SlotId(2);
pub const FW_CONFIG_HASH_SLOT: SlotId = SlotId(3);
pub const TRUSTED_WORLD_PK_SLOT: SlotId = SlotId(4);
pub const NON_TRUSTED_WORLD_PK_SLOT: SlotId = SlotId(5);

/// Shared by the four key certificates: a request only ever walks one of them.
pub const CONTENT_PK_SLOT: SlotId = SlotId(6);

pub const SCP_FW_HASH_SLOT: SlotId = SlotId(7);
pub const SOC_FW_HASH_SLOT: SlotId = SlotId(8);
pub const SOC_FW_CONFIG_HASH_SLOT: SlotId = SlotId(9);
pub const TOS_FW_HASH_SLOT: SlotId = SlotId(10);
pub const TOS_FW_EXTRA1_HASH_SLOT: SlotId = SlotId(11);
pub const TOS_FW_EXTRA2_HASH_SLOT: SlotId = SlotId(12);
pub const TOS_FW_CONFIG_HASH_SLOT: SlotId = SlotId(13);
pub const NT_WORLD_BL_HASH_SLOT: SlotId = SlotId(14);
pub const NT_FW_CONFIG_HASH_SLOT: SlotId = SlotId(15);

// The firmware update certificate is its own anchor, so its hashes reuse
// slots of the normal boot flow.
pub const BL2U_HASH_SLOT: SlotId = TB_FW_HASH_SLOT;
pub const SCP_BL2U_HASH_SLOT: SlotId = SCP_FW_HASH_SLOT;
pub const NS_BL2U_HASH_SLOT: SlotId = NT_WORLD_BL_HASH_SLOT;

/// Size of a SEC1 uncompressed P-384 public key
pub const PK_BUF_LEN: usize = 97;
pub const HASH_BUF_LEN: usize = MAX_DIGEST_SIZE;

const PK_SLOTS: [SlotId; 3] = [
    TRUSTED_WORLD_PK_SLOT,
    NON_TRUSTED_WORLD_PK_SLOT,
    CONTENT_PK_SLOT,
];

const HASH_SLOTS: [SlotId; 13] = [
    TB_FW_HASH_SLOT,
    TB_FW_CONFIG_HASH_SLOT,
    HW_CONFIG_HASH_SLOT,
    FW_CONFIG_HASH_SLOT,
    SCP_FW_HASH_SLOT,
    SOC_FW_HASH_SLOT,
    SOC_FW_CONFIG_HASH_SLOT,
    TOS_FW_HASH_SLOT,
    TOS_FW_EXTRA1_HASH_SLOT,
    TOS_FW_EXTRA2_HASH_SLOT,
    TOS_FW_CONFIG_HASH_SLOT,
    NT_WORLD_BL_HASH_SLOT,
    NT_FW_CONFIG_HASH_SLOT,
];

/// Backing memory of every TBBR parameter slot
pub struct TbbrParamBuffers {
    pub_keys: [[u8; PK_BUF_LEN]; PK_SLOTS.len()],
    hashes: [[u8; HASH_BUF_LEN]; HASH_SLOTS.len()],
}

impl Default for TbbrParamBuffers {
    fn default() -> Self {
        Self::new()
    }
}

impl TbbrParamBuffers {
    pub const fn new() -> Self {
        Self {
            pub_keys: [[0; PK_BUF_LEN]; PK_SLOTS.len()],
            hashes: [[0; HASH_BUF_LEN]; HASH_SLOTS.len()],
        }
    }

    /// Parameter store with every TBBR slot attached to these buffers
    pub fn param_store(&mut self) -> CotResult<ParamStore<'_>> {
        let mut store = ParamStore::new();
        for (slot, buf) in PK_SLOTS.iter().zip(self.pub_keys.iter_mut()) {
            store.attach(*slot, buf)?;
        }
        for (slot, buf) in HASH_SLOTS.iter().zip(self.hashes.iter_mut()) {
            store.attach(*slot, buf)?;
        }
        Ok(store)
    }
}
