// Licensed under the Apache-2.0 license

//! Certificate extension OIDs

/// Anti-rollback counters
pub const TRUSTED_FW_NVCOUNTER_OID: &str = "1.3.6.1.4.1.4128.2100.1";
pub const NON_TRUSTED_FW_NVCOUNTER_OID: &str = "1.3.6.1.4.1.4128.2100.2";

/// Trusted boot firmware certificate
pub const TRUSTED_BOOT_FW_HASH_OID: &str = "1.3.6.1.4.1.4128.2100.201";
pub const TRUSTED_BOOT_FW_CONFIG_HASH_OID: &str = "1.3.6.1.4.1.4128.2100.202";
pub const HW_CONFIG_HASH_OID: &str = "1.3.6.1.4.1.4128.2100.203";
pub const FW_CONFIG_HASH_OID: &str = "1.3.6.1.4.1.4128.2100.204";

/// Firmware update certificate
pub const AP_FWU_CFG_HASH_OID: &str = "1.3.6.1.4.1.4128.2100.101";
pub const SCP_FWU_CFG_HASH_OID: &str = "1.3.6.1.4.1.4128.2100.102";
pub const FWU_HASH_OID: &str = "1.3.6.1.4.1.4128.2100.103";

/// Trusted key certificate
pub const TRUSTED_WORLD_PK_OID: &str = "1.3.6.1.4.1.4128.2100.300";
pub const NON_TRUSTED_WORLD_PK_OID: &str = "1.3.6.1.4.1.4128.2100.301";

/// SCP firmware key and content certificates
pub const SCP_FW_CONTENT_CERT_PK_OID: &str = "1.3.6.1.4.1.4128.2100.401";
pub const SCP_FW_HASH_OID: &str = "1.3.6.1.4.1.4128.2100.402";

/// SoC firmware key and content certificates
pub const SOC_FW_CONTENT_CERT_PK_OID: &str = "1.3.6.1.4.1.4128.2100.501";
pub const SOC_AP_FW_HASH_OID: &str = "1.3.6.1.4.1.4128.2100.502";
pub const SOC_FW_CONFIG_HASH_OID: &str = "1.3.6.1.4.1.4128.2100.503";

/// Trusted OS firmware key and content certificates
pub const TRUSTED_OS_FW_CONTENT_CERT_PK_OID: &str = "1.3.6.1.4.1.4128.2100.601";
pub const TRUSTED_OS_FW_HASH_OID: &str = "1.3.6.1.4.1.4128.2100.602";
pub const TRUSTED_OS_FW_EXTRA1_HASH_OID: &str = "1.3.6.1.4.1.4128.2100.603";
pub const TRUSTED_OS_FW_EXTRA2_HASH_OID: &str = "1.3.6.1.4.1.4128.2100.604";
pub const TRUSTED_OS_FW_CONFIG_HASH_OID: &str = "1.3.6.1.4.1.4128.2100.605";

/// Non-trusted firmware key and content certificates
pub const NON_TRUSTED_FW_CONTENT_CERT_PK_OID: &str = "1.3.6.1.4.1.4128.2100.701";
pub const NON_TRUSTED_WORLD_BOOTLOADER_HASH_OID: &str = "1.3.6.1.4.1.4128.2100.702";
pub const NON_TRUSTED_FW_CONFIG_HASH_OID: &str = "1.3.6.1.4.1.4128.2100.703";

/// Platform root of trust key of the dual-root chain
pub const PROT_PK_OID: &str = "1.3.6.1.4.1.4128.1000.1";
