/*++

Licensed under the Apache-2.0 license.

File Name:

   crypto.rs

Abstract:

    File contains the RustCrypto implementation of the crypto backend.

--*/

use cot_auth::{CryptoBackend, Digest, HashAlgorithm, ParamType, ParamTypeDescriptor};
use cot_cert_types::CertSigAlg;
use cot_error::{CotError, CotResult};
use p384::ecdsa::signature::hazmat::PrehashVerifier;
use sha2::{Sha256, Sha384, Sha512};
use std::collections::HashMap;

/// Key descriptor of anchors that sign with their own subject key
const SUBJECT_PK: ParamTypeDescriptor = ParamTypeDescriptor::intrinsic(ParamType::PublicKey);

/// Crypto backend with fused ROTPK hashes, one per trust anchor key
pub struct RustCryptoBackend {
    rotpk_hashes: HashMap<ParamTypeDescriptor, Digest>,
}

impl RustCryptoBackend {
    /// Create a new instance `RustCryptoBackend`
    ///
    /// # Arguments
    ///
    /// * `rotpk_hash` - Hash of the root of trust public key, used by anchors
    ///   that verify with their subject public key
    pub fn new(rotpk_hash: &[u8]) -> CotResult<Self> {
        Self {
            rotpk_hashes: HashMap::new(),
        }
        .with_rotpk(SUBJECT_PK, rotpk_hash)
    }

    /// Fuse `rotpk_hash` for anchors whose signature method names `key`
    pub fn with_rotpk(mut self, key: ParamTypeDescriptor, rotpk_hash: &[u8]) -> CotResult<Self> {
        let digest = Digest::from_slice(rotpk_hash).ok_or(CotError::CRYPTO_ERR_DIGEST_SIZE)?;
        self.rotpk_hashes.insert(key, digest);
        Ok(self)
    }

    fn digest(alg: HashAlgorithm, data: &[u8]) -> CotResult<Digest> {
        use sha2::Digest as _;
        let digest = match alg {
            HashAlgorithm::Sha256 => Digest::from_slice(&Sha256::digest(data)),
            HashAlgorithm::Sha384 => Digest::from_slice(&Sha384::digest(data)),
            HashAlgorithm::Sha512 => Digest::from_slice(&Sha512::digest(data)),
        };
        digest.ok_or(CotError::CRYPTO_ERR_DIGEST_SIZE)
    }
}

impl CryptoBackend for RustCryptoBackend {
    fn hash(&mut self, alg: HashAlgorithm, data: &[u8]) -> CotResult<Digest> {
        Self::digest(alg, data)
    }

    fn verify(
        &mut self,
        data: &[u8],
        public_key: &[u8],
        signature: &[u8],
        algorithm: &[u8],
    ) -> CotResult<bool> {
        let alg =
            CertSigAlg::from_le_bytes(algorithm).ok_or(CotError::CRYPTO_ERR_UNSUPPORTED_ALGORITHM)?;

        match alg {
            CertSigAlg::EcdsaP384Sha384 => {
                let key = p384::ecdsa::VerifyingKey::from_sec1_bytes(public_key)
                    .map_err(|_| CotError::CRYPTO_ERR_INVALID_PUB_KEY)?;
                let Ok(sig) = p384::ecdsa::Signature::from_slice(signature) else {
                    return Ok(false);
                };
                let digest = Self::digest(HashAlgorithm::Sha384, data)?;
                Ok(key.verify_prehash(digest.as_bytes(), &sig).is_ok())
            }
            CertSigAlg::EcdsaP256Sha256 => {
                let key = p256::ecdsa::VerifyingKey::from_sec1_bytes(public_key)
                    .map_err(|_| CotError::CRYPTO_ERR_INVALID_PUB_KEY)?;
                let Ok(sig) = p256::ecdsa::Signature::from_slice(signature) else {
                    return Ok(false);
                };
                let digest = Self::digest(HashAlgorithm::Sha256, data)?;
                Ok(key.verify_prehash(digest.as_bytes(), &sig).is_ok())
            }
        }
    }

    fn rotpk_hash(&mut self, key: &ParamTypeDescriptor) -> CotResult<Digest> {
        self.rotpk_hashes
            .get(key)
            .copied()
            .ok_or(CotError::CRYPTO_ERR_ROTPK_NOT_PROVISIONED)
    }
}
