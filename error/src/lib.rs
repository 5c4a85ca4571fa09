/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains API and macros used by the Chain-of-Trust crates for error handling

--*/
#![cfg_attr(not(feature = "std"), no_std)]
use core::convert::From;
use core::num::{NonZeroU32, TryFromIntError};

/// Chain-of-Trust Error Type
/// Derives debug, copy, clone, eq, and partial eq
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CotError(pub NonZeroU32);

/// Macro to define error constants ensuring uniqueness
///
/// This macro takes a list of (name, value, doc) tuples and generates
/// constant definitions for each error code.
#[macro_export]
macro_rules! define_error_constants {
    ($(($name:ident, $value:expr, $doc:expr)),* $(,)?) => {
        $(
            #[doc = $doc]
            pub const $name: CotError = CotError::new_const($value);
        )*

        #[cfg(test)]
        /// Returns a vector of all defined error constants for testing uniqueness
        pub fn all_constants() -> Vec<(& 'static str, u32)> {
            vec![
                $(
                    (stringify!($name), $value),
                )*
            ]
        }
    };
}

impl CotError {
    /// Mask selecting the component family of an error code
    const FAMILY_MASK: u32 = 0xffff_0000;

    /// Family of the certificate format errors
    const CERT_ERR_FAMILY: u32 = 0x0007_0000;

    /// Create a CoT error; intended to only be used from const contexts, as we don't want
    /// runtime panics if val is zero. The preferred way to get a CotError from a u32 is to
    /// use `CotError::try_from()` from the `TryFrom` trait impl.
    const fn new_const(val: u32) -> Self {
        match NonZeroU32::new(val) {
            Some(val) => Self(val),
            None => panic!("CotError cannot be 0"),
        }
    }

    /// Component family (high half-word) of the error code
    pub fn family(&self) -> u32 {
        self.0.get() & Self::FAMILY_MASK
    }

    /// Returns true if the error reports malformed static configuration
    /// (CoT table, parser registry or parameter store wiring) rather than
    /// a property of the images being authenticated.
    pub fn is_config_error(&self) -> bool {
        matches!(
            *self,
            Self::COT_TABLE_ERR_DUPLICATE_IMAGE_ID
                | Self::COT_TABLE_ERR_UNKNOWN_PARENT
                | Self::COT_TABLE_ERR_CYCLE
                | Self::COT_TABLE_ERR_DEPTH_EXCEEDED
                | Self::COT_TABLE_ERR_NO_AUTH_METHOD
                | Self::COT_TABLE_ERR_PARAM_TYPE_MISMATCH
                | Self::COT_TABLE_ERR_PARENT_PARAM_MISSING
                | Self::COT_TABLE_ERR_ANCHOR_NOT_SIGNED
                | Self::COT_TABLE_ERR_RAW_IMAGE_PARAM
                | Self::COT_TABLE_ERR_MULTIPLE_NV_COUNTERS
                | Self::IMG_PARSER_ERR_NOT_REGISTERED
                | Self::IMG_PARSER_ERR_REGISTRY_SEALED
                | Self::PARAM_STORE_ERR_INVALID_SLOT
                | Self::PARAM_STORE_ERR_SLOT_ALREADY_ATTACHED
                | Self::PARAM_STORE_ERR_TOO_FEW_SLOTS
        )
    }

    /// Returns true if the error reports a structurally malformed image:
    /// any certificate format error, a failed parser integrity check or a
    /// counter field of the wrong size.
    pub fn is_integrity_error(&self) -> bool {
        self.family() == Self::CERT_ERR_FAMILY
            || matches!(
                *self,
                Self::IMG_PARSER_ERR_INTEGRITY | Self::AUTH_ERR_NV_COUNTER_FORMAT
            )
    }

    // Use the macro to define all error constants
    define_error_constants![
        (
            COT_TABLE_ERR_DUPLICATE_IMAGE_ID,
            0x0001_0001,
            "CoT Table Error: Image identifier registered twice"
        ),
        (
            COT_TABLE_ERR_UNKNOWN_PARENT,
            0x0001_0002,
            "CoT Table Error: Parent image is not registered"
        ),
        (
            COT_TABLE_ERR_CYCLE,
            0x0001_0003,
            "CoT Table Error: Parent links form a cycle"
        ),
        (
            COT_TABLE_ERR_DEPTH_EXCEEDED,
            0x0001_0004,
            "CoT Table Error: Chain is deeper than the supported maximum"
        ),
        (
            COT_TABLE_ERR_NO_AUTH_METHOD,
            0x0001_0005,
            "CoT Table Error: Image declares no authentication method"
        ),
        (
            COT_TABLE_ERR_PARAM_TYPE_MISMATCH,
            0x0001_0006,
            "CoT Table Error: Method parameter has the wrong parameter type"
        ),
        (
            COT_TABLE_ERR_PARENT_PARAM_MISSING,
            0x0001_0007,
            "CoT Table Error: Parameter expected from the parent is not yielded by it"
        ),
        (
            COT_TABLE_ERR_ANCHOR_NOT_SIGNED,
            0x0001_0008,
            "CoT Table Error: Trust anchor has no signature method"
        ),
        (
            COT_TABLE_ERR_RAW_IMAGE_PARAM,
            0x0001_0009,
            "CoT Table Error: Raw image uses a parameter other than raw data"
        ),
        (
            COT_TABLE_ERR_MULTIPLE_NV_COUNTERS,
            0x0001_000a,
            "CoT Table Error: Image declares more than one NV counter method"
        ),
        (
            COT_TABLE_ERR_UNKNOWN_IMAGE,
            0x0001_0010,
            "CoT Table Error: Image identifier is not registered"
        ),
        (
            IMG_PARSER_ERR_DUPLICATE,
            0x0002_0001,
            "Image Parser Error: Parser already registered for the image kind"
        ),
        (
            IMG_PARSER_ERR_NOT_REGISTERED,
            0x0002_0002,
            "Image Parser Error: No parser registered for the image kind"
        ),
        (
            IMG_PARSER_ERR_REGISTRY_SEALED,
            0x0002_0003,
            "Image Parser Error: Registration attempted after initialization"
        ),
        (
            IMG_PARSER_ERR_INTEGRITY,
            0x0002_0004,
            "Image Parser Error: Image failed the structural integrity check"
        ),
        (
            IMG_PARSER_ERR_PARAM_NOT_FOUND,
            0x0002_0005,
            "Image Parser Error: Parameter not present in the image"
        ),
        (
            IMG_PARSER_ERR_INVALID_PARAM_FOR_IMAGE_KIND,
            0x0002_0006,
            "Image Parser Error: Parameter type not valid for the image kind"
        ),
        (
            IMG_PARSER_ERR_INIT_FAILURE,
            0x0002_0007,
            "Image Parser Error: Parser one-time setup failed"
        ),
        (
            PARAM_STORE_ERR_PARAM_TOO_LARGE,
            0x0003_0001,
            "Parameter Store Error: Parameter does not fit in its slot"
        ),
        (
            PARAM_STORE_ERR_INVALID_SLOT,
            0x0003_0002,
            "Parameter Store Error: Slot identifier out of range or not attached"
        ),
        (
            PARAM_STORE_ERR_SLOT_ALREADY_ATTACHED,
            0x0003_0003,
            "Parameter Store Error: Slot already has a buffer attached"
        ),
        (
            PARAM_STORE_ERR_TOO_FEW_SLOTS,
            0x0003_0004,
            "Parameter Store Error: Store has fewer slots than the CoT table references"
        ),
        (
            AUTH_ERR_HASH_MISMATCH,
            0x0004_0001,
            "Auth Error: Image digest does not match the expected hash"
        ),
        (
            AUTH_ERR_SIGNATURE_INVALID,
            0x0004_0002,
            "Auth Error: Signature verification failed"
        ),
        (
            AUTH_ERR_ROTPK_MISMATCH,
            0x0004_0003,
            "Auth Error: Trust anchor key does not match the root of trust public key"
        ),
        (
            AUTH_ERR_NV_COUNTER_ROLLBACK,
            0x0004_0004,
            "Auth Error: Certificate NV counter is below the platform counter"
        ),
        (
            AUTH_ERR_NV_COUNTER_FORMAT,
            0x0004_0005,
            "Auth Error: Certificate NV counter is malformed"
        ),
        (
            AUTH_ERR_IMAGE_NOT_LOADED,
            0x0004_0006,
            "Auth Error: Ancestor image buffer is not available"
        ),
        (
            CRYPTO_ERR_BACKEND_FAILURE,
            0x0005_0001,
            "Crypto Error: Crypto backend failure"
        ),
        (
            CRYPTO_ERR_UNSUPPORTED_ALGORITHM,
            0x0005_0002,
            "Crypto Error: Unsupported algorithm"
        ),
        (
            CRYPTO_ERR_INVALID_PUB_KEY,
            0x0005_0003,
            "Crypto Error: Public key encoding is invalid"
        ),
        (
            CRYPTO_ERR_DIGEST_SIZE,
            0x0005_0004,
            "Crypto Error: Digest does not fit the digest buffer"
        ),
        (
            CRYPTO_ERR_ROTPK_NOT_PROVISIONED,
            0x0005_0005,
            "Crypto Error: No root of trust public key hash provisioned for the anchor key"
        ),
        (
            NV_CTR_ERR_READ_FAILURE,
            0x0006_0001,
            "NV Counter Error: Platform counter read failed"
        ),
        (
            NV_CTR_ERR_WRITE_FAILURE,
            0x0006_0002,
            "NV Counter Error: Platform counter write failed"
        ),
        (
            NV_CTR_ERR_UNKNOWN_COUNTER,
            0x0006_0003,
            "NV Counter Error: Counter identity is unknown to the platform"
        ),
        (
            CERT_ERR_BAD_MAGIC,
            0x0007_0001,
            "Certificate Error: Header magic mismatch"
        ),
        (
            CERT_ERR_UNSUPPORTED_VERSION,
            0x0007_0002,
            "Certificate Error: Unsupported format version"
        ),
        (
            CERT_ERR_LENGTH_MISMATCH,
            0x0007_0003,
            "Certificate Error: Declared lengths do not match the buffer"
        ),
        (
            CERT_ERR_BAD_RECORD,
            0x0007_0004,
            "Certificate Error: Malformed TBS record"
        ),
        (
            CERT_ERR_DUPLICATE_RECORD,
            0x0007_0005,
            "Certificate Error: Record or extension present twice"
        ),
        (
            CERT_ERR_MISSING_RECORD,
            0x0007_0006,
            "Certificate Error: Mandatory record missing"
        ),
        (
            CFI_PANIC_COUNTER_CORRUPT,
            0x0008_0001,
            "CFI Panic: Counter corrupt"
        ),
        (
            CFI_PANIC_COUNTER_OVERFLOW,
            0x0008_0002,
            "CFI Panic: Counter overflow"
        ),
        (
            CFI_PANIC_COUNTER_UNDERFLOW,
            0x0008_0003,
            "CFI Panic: Counter underflow"
        ),
        (
            CFI_PANIC_COUNTER_MISMATCH,
            0x0008_0004,
            "CFI Panic: Counter mismatch"
        ),
        (
            CFI_PANIC_ASSERT_EQ_FAILURE,
            0x0008_0005,
            "CFI Panic: Assert equal failure"
        ),
        (
            CFI_PANIC_ASSERT_GE_FAILURE,
            0x0008_0006,
            "CFI Panic: Assert greater than or equal failure"
        ),
    ];
}

impl From<core::num::NonZeroU32> for crate::CotError {
    fn from(val: core::num::NonZeroU32) -> Self {
        crate::CotError(val)
    }
}

impl From<CotError> for core::num::NonZeroU32 {
    fn from(val: CotError) -> Self {
        val.0
    }
}

impl From<CotError> for u32 {
    fn from(val: CotError) -> Self {
        core::num::NonZeroU32::from(val).get()
    }
}

impl TryFrom<u32> for CotError {
    type Error = TryFromIntError;
    fn try_from(val: u32) -> Result<Self, TryFromIntError> {
        match NonZeroU32::try_from(val) {
            Ok(val) => Ok(CotError(val)),
            Err(err) => Err(err),
        }
    }
}

pub type CotResult<T> = Result<T, CotError>;
