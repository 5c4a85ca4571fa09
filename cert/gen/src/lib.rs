/*++

Licensed under the Apache-2.0 license.

File Name:

   lib.rs

Abstract:

    File contains data structures for the Chain-of-Trust certificate generator.

--*/

pub mod fake_keys;
mod generator;
mod rustcrypto;

pub use generator::CertGenerator;
pub use rustcrypto::RustCrypto;

use cot_auth::HashAlgorithm;
use cot_cert_types::CertSigAlg;

/// Certificate Generator Crypto Trait
pub trait CertGeneratorCrypto {
    /// Calculate SHA-256 digest
    fn sha256_digest(&self, data: &[u8]) -> anyhow::Result<[u8; 32]>;

    /// Calculate SHA2-384 digest
    fn sha384_digest(&self, data: &[u8]) -> anyhow::Result<[u8; 48]>;

    /// Calculate SHA2-512 digest
    fn sha512_digest(&self, data: &[u8]) -> anyhow::Result<[u8; 64]>;

    /// Calculate the digest used for hash extensions and ROTPK hashes
    fn digest(&self, alg: HashAlgorithm, data: &[u8]) -> anyhow::Result<Vec<u8>> {
        Ok(match alg {
            HashAlgorithm::Sha256 => self.sha256_digest(data)?.to_vec(),
            HashAlgorithm::Sha384 => self.sha384_digest(data)?.to_vec(),
            HashAlgorithm::Sha512 => self.sha512_digest(data)?.to_vec(),
        })
    }

    /// Calculate ECDSA signature over `data`
    ///
    /// # Returns
    ///
    /// * `Vec<u8>` - Raw `r || s` signature
    fn ecdsa_sign(&self, alg: CertSigAlg, data: &[u8], priv_key: &[u8]) -> anyhow::Result<Vec<u8>>;

    /// Derive the SEC1 uncompressed public key of `priv_key`
    fn ecdsa_pub_key(&self, alg: CertSigAlg, priv_key: &[u8]) -> anyhow::Result<Vec<u8>>;
}

/// OID keyed certificate extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertExtension {
    pub oid: String,
    pub value: Vec<u8>,
}

impl CertExtension {
    pub fn new(oid: &str, value: &[u8]) -> Self {
        Self {
            oid: oid.to_string(),
            value: value.to_vec(),
        }
    }

    /// Anti-rollback counter, encoded as 4 bytes little-endian
    pub fn nv_counter(oid: &str, value: u32) -> Self {
        Self::new(oid, &value.to_le_bytes())
    }

    /// Digest of an image signed off by the certificate
    pub fn hash(oid: &str, digest: &[u8]) -> Self {
        Self::new(oid, digest)
    }

    /// Public key delegated to child certificates
    pub fn pub_key(oid: &str, key: &[u8]) -> Self {
        Self::new(oid, key)
    }
}

/// Certificate Generator Configuration
#[derive(Debug, Default, Clone)]
pub struct CertConfig {
    /// Algorithm of the issuer key signing the certificate
    pub sig_alg: CertSigAlg,

    /// SEC1 uncompressed subject public key
    pub subject_pub_key: Vec<u8>,

    pub extensions: Vec<CertExtension>,
}
