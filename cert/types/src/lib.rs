/*++

Licensed under the Apache-2.0 license.

File Name:

   lib.rs

Abstract:

    File contains data structures of the Chain-of-Trust certificate.

    A certificate is laid out as:

        CertHeader | TBS records | signature

    The TBS ("to be signed") region is a sequence of records, each a
    RecordHeader followed by `len` bytes of record data. The signature
    covers the TBS region only.

--*/

#![cfg_attr(not(feature = "std"), no_std)]

use getset::CopyGetters;
use zerocopy::{AsBytes, FromBytes};

pub const CERT_MAGIC: u32 = 0x54524543;
pub const CERT_VERSION: u32 = 1;
pub const CERT_HEADER_SIZE: usize = core::mem::size_of::<CertHeader>();
pub const RECORD_HEADER_SIZE: usize = core::mem::size_of::<RecordHeader>();
pub const EXT_HEADER_SIZE: usize = core::mem::size_of::<ExtHeader>();

/// Largest parameter value a certificate may publish
pub const CERT_MAX_PARAM_SIZE: usize = 512;

/// Largest encoded certificate
pub const CERT_MAX_SIZE: usize = 4096;

/// Certificate header
#[repr(C)]
#[derive(AsBytes, FromBytes, Default, Debug, CopyGetters, Clone, Copy, Eq, PartialEq)]
pub struct CertHeader {
    /// Magic Number
    #[getset(get_copy = "pub")]
    pub magic: u32,

    /// Format Version
    #[getset(get_copy = "pub")]
    pub version: u32,

    /// Length of the TBS region
    #[getset(get_copy = "pub")]
    pub tbs_len: u32,

    /// Length of the signature
    #[getset(get_copy = "pub")]
    sig_len: u32,
}

impl CertHeader {
    pub fn new(tbs_len: u32, sig_len: u32) -> Self {
        Self {
            magic: CERT_MAGIC,
            version: CERT_VERSION,
            tbs_len,
            sig_len,
        }
    }

    /// Total certificate size described by this header
    pub fn cert_len(&self) -> usize {
        CERT_HEADER_SIZE + self.tbs_len as usize + self.sig_len as usize
    }
}

/// TBS record header
#[repr(C)]
#[derive(AsBytes, FromBytes, Default, Debug, CopyGetters, Clone, Copy, Eq, PartialEq)]
pub struct RecordHeader {
    #[getset(get_copy = "pub")]
    tag: u16,

    /// Length of the record data
    #[getset(get_copy = "pub")]
    len: u16,
}

impl RecordHeader {
    pub fn new(tag: RecordTag, len: u16) -> Self {
        Self {
            tag: tag.into(),
            len,
        }
    }
}

/// Extension record data header, followed by the OID and the value
#[repr(C)]
#[derive(AsBytes, FromBytes, Default, Debug, CopyGetters, Clone, Copy, Eq, PartialEq)]
pub struct ExtHeader {
    #[getset(get_copy = "pub")]
    oid_len: u16,

    #[getset(get_copy = "pub")]
    value_len: u16,
}

impl ExtHeader {
    pub fn new(oid_len: u16, value_len: u16) -> Self {
        Self { oid_len, value_len }
    }
}

/// TBS record tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordTag {
    /// Signature algorithm, 4 bytes little-endian `CertSigAlg`
    SigAlg = 1,

    /// Subject public key
    SubjectPubKey = 2,

    /// OID keyed extension
    Extension = 3,
}

impl From<RecordTag> for u16 {
    fn from(value: RecordTag) -> Self {
        value as u16
    }
}

impl TryFrom<u16> for RecordTag {
    type Error = ();

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RecordTag::SigAlg),
            2 => Ok(RecordTag::SubjectPubKey),
            3 => Ok(RecordTag::Extension),
            _ => Err(()),
        }
    }
}

/// Certificate signature algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "std",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
#[cfg_attr(feature = "std", serde(rename_all = "kebab-case"))]
pub enum CertSigAlg {
    /// ECDSA over P-384 with SHA-384
    #[default]
    EcdsaP384Sha384 = 1,

    /// ECDSA over P-256 with SHA-256
    EcdsaP256Sha256 = 2,
}

impl CertSigAlg {
    /// Size of the private scalar
    pub const fn priv_key_len(self) -> usize {
        match self {
            CertSigAlg::EcdsaP384Sha384 => 48,
            CertSigAlg::EcdsaP256Sha256 => 32,
        }
    }

    /// Size of a SEC1 uncompressed public key
    pub const fn pub_key_len(self) -> usize {
        1 + 2 * self.priv_key_len()
    }

    /// Size of a raw `r || s` signature
    pub const fn sig_len(self) -> usize {
        2 * self.priv_key_len()
    }

    /// Encoding stored in the signature algorithm record
    pub fn to_le_bytes(self) -> [u8; 4] {
        u32::from(self).to_le_bytes()
    }

    /// Decode the signature algorithm record
    pub fn from_le_bytes(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; 4] = bytes.try_into().ok()?;
        Self::try_from(u32::from_le_bytes(bytes)).ok()
    }
}

impl From<CertSigAlg> for u32 {
    fn from(value: CertSigAlg) -> Self {
        value as u32
    }
}

impl TryFrom<u32> for CertSigAlg {
    type Error = ();

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(CertSigAlg::EcdsaP384Sha384),
            2 => Ok(CertSigAlg::EcdsaP256Sha256),
            _ => Err(()),
        }
    }
}
