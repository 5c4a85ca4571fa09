/*++

Licensed under the Apache-2.0 license.

File Name:

   lib.rs

Abstract:

    Trusted Board Boot Requirements chain of trust: image identifiers,
    certificate extension OIDs and the BL1 and BL2 descriptor tables, plus
    the dual-root BL2 table that anchors the non-trusted world on the
    platform root of trust key.

--*/

#![cfg_attr(not(feature = "std"), no_std)]

mod cot;
pub mod oid;
mod params;

pub use cot::{bl1_cot, bl2_cot, dualroot_bl2_cot, BL1_COT, BL2_COT, DUALROOT_BL2_COT};
pub use params::*;

use cot_auth::ImageId;

pub const BL2_IMAGE_ID: ImageId = ImageId(1);
pub const SCP_BL2_IMAGE_ID: ImageId = ImageId(2);
pub const BL31_IMAGE_ID: ImageId = ImageId(3);
pub const BL32_IMAGE_ID: ImageId = ImageId(4);
pub const BL33_IMAGE_ID: ImageId = ImageId(5);

pub const TRUSTED_BOOT_FW_CERT_ID: ImageId = ImageId(6);
pub const TRUSTED_KEY_CERT_ID: ImageId = ImageId(7);

pub const SCP_FW_KEY_CERT_ID: ImageId = ImageId(8);
pub const SOC_FW_KEY_CERT_ID: ImageId = ImageId(9);
pub const TRUSTED_OS_FW_KEY_CERT_ID: ImageId = ImageId(10);
pub const NON_TRUSTED_FW_KEY_CERT_ID: ImageId = ImageId(11);

pub const SCP_FW_CONTENT_CERT_ID: ImageId = ImageId(12);
pub const SOC_FW_CONTENT_CERT_ID: ImageId = ImageId(13);
pub const TRUSTED_OS_FW_CONTENT_CERT_ID: ImageId = ImageId(14);
pub const NON_TRUSTED_FW_CONTENT_CERT_ID: ImageId = ImageId(15);

pub const FWU_CERT_ID: ImageId = ImageId(17);
pub const SCP_BL2U_IMAGE_ID: ImageId = ImageId(18);
pub const BL2U_IMAGE_ID: ImageId = ImageId(19);
pub const NS_BL2U_IMAGE_ID: ImageId = ImageId(20);

pub const BL32_EXTRA1_IMAGE_ID: ImageId = ImageId(21);
pub const BL32_EXTRA2_IMAGE_ID: ImageId = ImageId(22);

pub const HW_CONFIG_ID: ImageId = ImageId(23);
pub const TB_FW_CONFIG_ID: ImageId = ImageId(24);
pub const SOC_FW_CONFIG_ID: ImageId = ImageId(25);
pub const TOS_FW_CONFIG_ID: ImageId = ImageId(26);
pub const NT_FW_CONFIG_ID: ImageId = ImageId(27);
pub const FW_CONFIG_ID: ImageId = ImageId(31);
