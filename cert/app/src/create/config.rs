/*++

Licensed under the Apache-2.0 license.

File Name:

   config.rs

Abstract:

    File contains utilities for parsing certificate chain configuration files

--*/

use anyhow::Context;
use cot_auth::HashAlgorithm;
use cot_cert_types::CertSigAlg;
use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Digest algorithm of hash extensions
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum HashAlgConfig {
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl From<HashAlgConfig> for HashAlgorithm {
    fn from(value: HashAlgConfig) -> Self {
        match value {
            HashAlgConfig::Sha256 => HashAlgorithm::Sha256,
            HashAlgConfig::Sha384 => HashAlgorithm::Sha384,
            HashAlgConfig::Sha512 => HashAlgorithm::Sha512,
        }
    }
}

/// Private key file, hex encoded scalar
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct KeyConfig {
    pub file: PathBuf,

    pub alg: CertSigAlg,
}

/// Certificate extension
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub(crate) enum ExtConfig {
    /// Anti-rollback counter value
    NvCounter { oid: String, value: u32 },

    /// Digest of an image file
    Hash { oid: String, file: PathBuf },

    /// Public key of a named key
    PubKey { oid: String, key: String },
}

/// Certificate Configuration
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CertFileConfig {
    /// Output file
    pub out: PathBuf,

    /// Name of the issuer key
    pub signing_key: String,

    /// Name of the key published as subject public key
    pub subject_key: String,

    #[serde(default)]
    pub extensions: Vec<ExtConfig>,
}

/// Chain Configuration
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ChainConfig {
    #[serde(default)]
    pub hash_alg: HashAlgConfig,

    pub keys: BTreeMap<String, KeyConfig>,

    pub certs: Vec<CertFileConfig>,
}

/// Load Chain Configuration from file
pub(crate) fn load_chain_config(path: &Path) -> anyhow::Result<ChainConfig> {
    let config_str = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read the config file {}", path.display()))?;

    let config: ChainConfig = toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    Ok(config)
}

/// Load a hex encoded private key
pub(crate) fn load_priv_key(path: &Path) -> anyhow::Result<Vec<u8>> {
    let key_str = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read private key file {}", path.display()))?;

    hex::decode(key_str.trim())
        .with_context(|| format!("Failed to decode private key file {}", path.display()))
}
