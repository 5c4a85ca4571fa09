/*++

Licensed under the Apache-2.0 license.

File Name:

   rustcrypto.rs

Abstract:

    File contains the RustCrypto implementation of the certificate
    generator crypto trait.

--*/

use anyhow::anyhow;
use cot_cert_types::CertSigAlg;
use p384::ecdsa::signature::hazmat::PrehashSigner;
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::CertGeneratorCrypto;

#[derive(Default)]
pub struct RustCrypto {}

impl CertGeneratorCrypto for RustCrypto {
    fn sha256_digest(&self, data: &[u8]) -> anyhow::Result<[u8; 32]> {
        Ok(Sha256::digest(data).into())
    }

    fn sha384_digest(&self, data: &[u8]) -> anyhow::Result<[u8; 48]> {
        let mut engine = Sha384::new();
        engine.update(data);
        Ok(engine.finalize().into())
    }

    fn sha512_digest(&self, data: &[u8]) -> anyhow::Result<[u8; 64]> {
        Ok(Sha512::digest(data).into())
    }

    fn ecdsa_sign(&self, alg: CertSigAlg, data: &[u8], priv_key: &[u8]) -> anyhow::Result<Vec<u8>> {
        match alg {
            CertSigAlg::EcdsaP384Sha384 => {
                let digest = self.sha384_digest(data)?;
                let key = p384::ecdsa::SigningKey::from_slice(priv_key)
                    .map_err(|e| anyhow!("Invalid P-384 private key: {e}"))?;
                let sig: p384::ecdsa::Signature = key
                    .sign_prehash(&digest)
                    .map_err(|e| anyhow!("P-384 signing failed: {e}"))?;
                Ok(sig.to_bytes().to_vec())
            }
            CertSigAlg::EcdsaP256Sha256 => {
                let digest = self.sha256_digest(data)?;
                let key = p256::ecdsa::SigningKey::from_slice(priv_key)
                    .map_err(|e| anyhow!("Invalid P-256 private key: {e}"))?;
                let sig: p256::ecdsa::Signature = key
                    .sign_prehash(&digest)
                    .map_err(|e| anyhow!("P-256 signing failed: {e}"))?;
                Ok(sig.to_bytes().to_vec())
            }
        }
    }

    fn ecdsa_pub_key(&self, alg: CertSigAlg, priv_key: &[u8]) -> anyhow::Result<Vec<u8>> {
        match alg {
            CertSigAlg::EcdsaP384Sha384 => {
                let key = p384::ecdsa::SigningKey::from_slice(priv_key)
                    .map_err(|e| anyhow!("Invalid P-384 private key: {e}"))?;
                Ok(key
                    .verifying_key()
                    .to_encoded_point(false)
                    .as_bytes()
                    .to_vec())
            }
            CertSigAlg::EcdsaP256Sha256 => {
                let key = p256::ecdsa::SigningKey::from_slice(priv_key)
                    .map_err(|e| anyhow!("Invalid P-256 private key: {e}"))?;
                Ok(key
                    .verifying_key()
                    .to_encoded_point(false)
                    .as_bytes()
                    .to_vec())
            }
        }
    }
}
