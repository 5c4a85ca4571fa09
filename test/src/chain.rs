/*++

Licensed under the Apache-2.0 license.

File Name:

    chain.rs

Abstract:

    File contains a generator of signed TBBR certificate chains built from the
    fake keys, including the firmware update certificate and the dual-root
    non-trusted content certificate.

--*/

use cot_auth::{HashAlgorithm, ImageId, ImageLoader};
use cot_cert_gen::fake_keys::*;
use cot_cert_gen::{CertConfig, CertExtension, CertGenerator, RustCrypto};
use cot_cert_types::CertSigAlg;
use cot_emu::EmuImageStore;
use cot_tbbr::oid::*;
use cot_tbbr::*;

/// Raw images of the BL1 and BL2 tables
pub const RAW_IMAGES: [ImageId; 16] = [
    BL2_IMAGE_ID,
    TB_FW_CONFIG_ID,
    HW_CONFIG_ID,
    FW_CONFIG_ID,
    SCP_BL2U_IMAGE_ID,
    BL2U_IMAGE_ID,
    NS_BL2U_IMAGE_ID,
    SCP_BL2_IMAGE_ID,
    BL31_IMAGE_ID,
    SOC_FW_CONFIG_ID,
    BL32_IMAGE_ID,
    BL32_EXTRA1_IMAGE_ID,
    BL32_EXTRA2_IMAGE_ID,
    TOS_FW_CONFIG_ID,
    BL33_IMAGE_ID,
    NT_FW_CONFIG_ID,
];

/// Chain generation options
#[derive(Debug, Clone)]
pub struct ChainOptions {
    /// Algorithm of every key in the chain
    pub sig_alg: CertSigAlg,

    /// Algorithm of the hash extensions and of the ROTPK hash
    pub hash_alg: HashAlgorithm,

    pub trusted_nv_ctr: u32,

    pub non_trusted_nv_ctr: u32,

    /// Counter values of individual certificates
    pub nv_ctr_overrides: Vec<(ImageId, u32)>,

    /// Root of trust private key
    pub rot_key: [u8; 48],

    /// Platform root of trust private key
    pub prot_key: [u8; 48],

    /// Sign the non-trusted content certificate with the platform root of
    /// trust key, as the dual-root table expects
    pub dual_root: bool,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            sig_alg: CertSigAlg::EcdsaP384Sha384,
            hash_alg: HashAlgorithm::Sha256,
            trusted_nv_ctr: 5,
            non_trusted_nv_ctr: 5,
            nv_ctr_overrides: vec![],
            rot_key: FAKE_ROT_KEY,
            prot_key: FAKE_PROT_KEY,
            dual_root: false,
        }
    }
}

/// Signed TBBR chain with every certificate and raw image loaded
pub struct Chain {
    pub images: EmuImageStore,
    pub rotpk_hash: Vec<u8>,

    /// Hash of the platform root of trust public key
    pub prot_pk_hash: Vec<u8>,

    pub hash_alg: HashAlgorithm,
}

/// Content of raw image `id`
pub fn payload(id: ImageId) -> Vec<u8> {
    let mut data = format!("image {} payload", u32::from(id)).into_bytes();
    data.resize(512, u32::from(id) as u8);
    data
}

impl Chain {
    /// Generate every certificate of the TBBR chain
    pub fn build(opts: &ChainOptions) -> anyhow::Result<Self> {
        let rot = &opts.rot_key;
        let mut builder = ChainBuilder {
            gen: CertGenerator::new(RustCrypto::default()),
            opts,
            images: EmuImageStore::new(),
        };
        let b = &mut builder;

        let ext = vec![
            b.hash(TRUSTED_BOOT_FW_HASH_OID, BL2_IMAGE_ID)?,
            b.hash(TRUSTED_BOOT_FW_CONFIG_HASH_OID, TB_FW_CONFIG_ID)?,
            b.hash(HW_CONFIG_HASH_OID, HW_CONFIG_ID)?,
            b.hash(FW_CONFIG_HASH_OID, FW_CONFIG_ID)?,
        ];
        b.cert(TRUSTED_BOOT_FW_CERT_ID, rot, TRUSTED_FW_NVCOUNTER_OID, ext)?;

        // Firmware update
        let ext = vec![
            b.hash(SCP_FWU_CFG_HASH_OID, SCP_BL2U_IMAGE_ID)?,
            b.hash(AP_FWU_CFG_HASH_OID, BL2U_IMAGE_ID)?,
            b.hash(FWU_HASH_OID, NS_BL2U_IMAGE_ID)?,
        ];
        b.cert(FWU_CERT_ID, rot, TRUSTED_FW_NVCOUNTER_OID, ext)?;

        let ext = vec![
            b.pub_key_ext(TRUSTED_WORLD_PK_OID, &FAKE_TRUSTED_WORLD_KEY)?,
            b.pub_key_ext(NON_TRUSTED_WORLD_PK_OID, &FAKE_NON_TRUSTED_WORLD_KEY)?,
        ];
        b.cert(TRUSTED_KEY_CERT_ID, rot, TRUSTED_FW_NVCOUNTER_OID, ext)?;

        // SCP firmware
        let ext = vec![b.pub_key_ext(SCP_FW_CONTENT_CERT_PK_OID, &FAKE_SCP_FW_CONTENT_KEY)?];
        b.cert(
            SCP_FW_KEY_CERT_ID,
            &FAKE_TRUSTED_WORLD_KEY,
            TRUSTED_FW_NVCOUNTER_OID,
            ext,
        )?;
        let ext = vec![b.hash(SCP_FW_HASH_OID, SCP_BL2_IMAGE_ID)?];
        b.cert(
            SCP_FW_CONTENT_CERT_ID,
            &FAKE_SCP_FW_CONTENT_KEY,
            TRUSTED_FW_NVCOUNTER_OID,
            ext,
        )?;

        // SoC firmware
        let ext = vec![b.pub_key_ext(SOC_FW_CONTENT_CERT_PK_OID, &FAKE_SOC_FW_CONTENT_KEY)?];
        b.cert(
            SOC_FW_KEY_CERT_ID,
            &FAKE_TRUSTED_WORLD_KEY,
            TRUSTED_FW_NVCOUNTER_OID,
            ext,
        )?;
        let ext = vec![
            b.hash(SOC_AP_FW_HASH_OID, BL31_IMAGE_ID)?,
            b.hash(SOC_FW_CONFIG_HASH_OID, SOC_FW_CONFIG_ID)?,
        ];
        b.cert(
            SOC_FW_CONTENT_CERT_ID,
            &FAKE_SOC_FW_CONTENT_KEY,
            TRUSTED_FW_NVCOUNTER_OID,
            ext,
        )?;

        // Trusted OS firmware
        let ext = vec![b.pub_key_ext(
            TRUSTED_OS_FW_CONTENT_CERT_PK_OID,
            &FAKE_TOS_FW_CONTENT_KEY,
        )?];
        b.cert(
            TRUSTED_OS_FW_KEY_CERT_ID,
            &FAKE_TRUSTED_WORLD_KEY,
            TRUSTED_FW_NVCOUNTER_OID,
            ext,
        )?;
        let ext = vec![
            b.hash(TRUSTED_OS_FW_HASH_OID, BL32_IMAGE_ID)?,
            b.hash(TRUSTED_OS_FW_EXTRA1_HASH_OID, BL32_EXTRA1_IMAGE_ID)?,
            b.hash(TRUSTED_OS_FW_EXTRA2_HASH_OID, BL32_EXTRA2_IMAGE_ID)?,
            b.hash(TRUSTED_OS_FW_CONFIG_HASH_OID, TOS_FW_CONFIG_ID)?,
        ];
        b.cert(
            TRUSTED_OS_FW_CONTENT_CERT_ID,
            &FAKE_TOS_FW_CONTENT_KEY,
            TRUSTED_FW_NVCOUNTER_OID,
            ext,
        )?;

        // Non-trusted firmware
        let ext = vec![b.pub_key_ext(
            NON_TRUSTED_FW_CONTENT_CERT_PK_OID,
            &FAKE_NT_FW_CONTENT_KEY,
        )?];
        b.cert(
            NON_TRUSTED_FW_KEY_CERT_ID,
            &FAKE_NON_TRUSTED_WORLD_KEY,
            NON_TRUSTED_FW_NVCOUNTER_OID,
            ext,
        )?;
        let mut ext = vec![
            b.hash(NON_TRUSTED_WORLD_BOOTLOADER_HASH_OID, BL33_IMAGE_ID)?,
            b.hash(NON_TRUSTED_FW_CONFIG_HASH_OID, NT_FW_CONFIG_ID)?,
        ];
        let nt_content_key = if opts.dual_root {
            ext.push(b.pub_key_ext(PROT_PK_OID, &opts.prot_key)?);
            &opts.prot_key
        } else {
            &FAKE_NT_FW_CONTENT_KEY
        };
        b.cert(
            NON_TRUSTED_FW_CONTENT_CERT_ID,
            nt_content_key,
            NON_TRUSTED_FW_NVCOUNTER_OID,
            ext,
        )?;

        for id in RAW_IMAGES {
            b.images.load(id, &payload(id));
        }

        let rotpk_hash = b.gen.rotpk_hash(opts.hash_alg, &b.pub_key(rot)?)?;
        let prot_pk_hash = b.gen.rotpk_hash(opts.hash_alg, &b.pub_key(&opts.prot_key)?)?;
        Ok(Self {
            images: builder.images,
            rotpk_hash,
            prot_pk_hash,
            hash_alg: opts.hash_alg,
        })
    }

    /// Copy of the loaded buffer of `id`
    pub fn image(&self, id: ImageId) -> Option<Vec<u8>> {
        self.images.image(id).map(<[u8]>::to_vec)
    }
}

struct ChainBuilder<'a> {
    gen: CertGenerator<RustCrypto>,
    opts: &'a ChainOptions,
    images: EmuImageStore,
}

impl ChainBuilder<'_> {
    fn pub_key(&self, key: &[u8; 48]) -> anyhow::Result<Vec<u8>> {
        let alg = self.opts.sig_alg;
        self.gen.pub_key(alg, fake_key(key, alg))
    }

    fn pub_key_ext(&self, oid: &str, key: &[u8; 48]) -> anyhow::Result<CertExtension> {
        Ok(CertExtension::pub_key(oid, &self.pub_key(key)?))
    }

    fn hash(&self, oid: &str, id: ImageId) -> anyhow::Result<CertExtension> {
        let digest = self.gen.digest(self.opts.hash_alg, &payload(id))?;
        Ok(CertExtension::hash(oid, &digest))
    }

    fn nv_ctr(&self, id: ImageId, oid: &str) -> CertExtension {
        let default = if oid == NON_TRUSTED_FW_NVCOUNTER_OID {
            self.opts.non_trusted_nv_ctr
        } else {
            self.opts.trusted_nv_ctr
        };
        let value = self
            .opts
            .nv_ctr_overrides
            .iter()
            .find(|(cert, _)| *cert == id)
            .map_or(default, |(_, value)| *value);
        CertExtension::nv_counter(oid, value)
    }

    /// Sign a certificate with `key`, publishing the matching public key as
    /// subject key
    fn cert(
        &mut self,
        id: ImageId,
        key: &[u8; 48],
        nv_ctr_oid: &str,
        extensions: Vec<CertExtension>,
    ) -> anyhow::Result<()> {
        let alg = self.opts.sig_alg;
        let mut all = vec![self.nv_ctr(id, nv_ctr_oid)];
        all.extend(extensions);

        let config = CertConfig {
            sig_alg: alg,
            subject_pub_key: self.pub_key(key)?,
            extensions: all,
        };
        let cert = self.gen.generate(&config, fake_key(key, alg))?;
        self.images.load(id, &cert);
        Ok(())
    }
}
