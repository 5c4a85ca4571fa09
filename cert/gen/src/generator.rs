/*++

Licensed under the Apache-2.0 license.

File Name:

   generator.rs

Abstract:

    Chain-of-Trust certificate generator

--*/
use anyhow::bail;
use cot_auth::HashAlgorithm;
use cot_cert_types::*;
use zerocopy::AsBytes;

use crate::*;

/// Certificate generator
pub struct CertGenerator<Crypto: CertGeneratorCrypto> {
    crypto: Crypto,
}

impl<Crypto: CertGeneratorCrypto> CertGenerator<Crypto> {
    /// Create an instance `CertGenerator`
    pub fn new(crypto: Crypto) -> Self {
        Self { crypto }
    }

    /// Generate certificate
    ///
    /// # Arguments
    ///
    /// * `config`      - Certificate generator configuration
    /// * `signing_key` - Private key of the issuer, `config.sig_alg` sized
    ///
    /// # Returns
    ///
    /// * `Vec<u8>` - Encoded certificate
    pub fn generate(&self, config: &CertConfig, signing_key: &[u8]) -> anyhow::Result<Vec<u8>> {
        if signing_key.len() != config.sig_alg.priv_key_len() {
            bail!(
                "Signing key is {} bytes, {:?} needs {}",
                signing_key.len(),
                config.sig_alg,
                config.sig_alg.priv_key_len()
            );
        }
        if config.subject_pub_key.is_empty() {
            bail!("Subject public key is empty");
        }

        for (idx, ext) in config.extensions.iter().enumerate() {
            if ext.oid.is_empty() {
                bail!("Extension {idx} has an empty OID");
            }
            if ext.value.len() > CERT_MAX_PARAM_SIZE {
                bail!(
                    "Extension {} is {} bytes, larger than {CERT_MAX_PARAM_SIZE}",
                    ext.oid,
                    ext.value.len()
                );
            }
            if config.extensions[..idx].iter().any(|e| e.oid == ext.oid) {
                bail!("Duplicate extension {}", ext.oid);
            }
        }

        let mut tbs = vec![];
        Self::push_record(&mut tbs, RecordTag::SigAlg, &config.sig_alg.to_le_bytes())?;
        Self::push_record(&mut tbs, RecordTag::SubjectPubKey, &config.subject_pub_key)?;
        for ext in config.extensions.iter() {
            let mut data = ExtHeader::new(ext.oid.len() as u16, ext.value.len() as u16)
                .as_bytes()
                .to_vec();
            data.extend_from_slice(ext.oid.as_bytes());
            data.extend_from_slice(&ext.value);
            Self::push_record(&mut tbs, RecordTag::Extension, &data)?;
        }

        let sig = self.crypto.ecdsa_sign(config.sig_alg, &tbs, signing_key)?;

        let header = CertHeader::new(tbs.len() as u32, sig.len() as u32);
        if header.cert_len() > CERT_MAX_SIZE {
            bail!("Certificate larger than {CERT_MAX_SIZE} bytes");
        }

        let mut cert = header.as_bytes().to_vec();
        cert.extend_from_slice(&tbs);
        cert.extend_from_slice(&sig);
        Ok(cert)
    }

    /// Public key matching `priv_key`
    pub fn pub_key(&self, alg: CertSigAlg, priv_key: &[u8]) -> anyhow::Result<Vec<u8>> {
        self.crypto.ecdsa_pub_key(alg, priv_key)
    }

    /// Digest of `data`, as carried by hash extensions
    pub fn digest(&self, alg: HashAlgorithm, data: &[u8]) -> anyhow::Result<Vec<u8>> {
        self.crypto.digest(alg, data)
    }

    /// Hash of a root of trust public key, as fused in the platform
    pub fn rotpk_hash(&self, alg: HashAlgorithm, pub_key: &[u8]) -> anyhow::Result<Vec<u8>> {
        self.crypto.digest(alg, pub_key)
    }

    fn push_record(tbs: &mut Vec<u8>, tag: RecordTag, data: &[u8]) -> anyhow::Result<()> {
        let Ok(len) = u16::try_from(data.len()) else {
            bail!("Record {tag:?} is {} bytes", data.len());
        };
        tbs.extend_from_slice(RecordHeader::new(tag, len).as_bytes());
        tbs.extend_from_slice(data);
        Ok(())
    }
}
