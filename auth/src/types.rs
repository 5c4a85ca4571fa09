/*++

Licensed under the Apache-2.0 license.

File Name:

    types.rs

Abstract:

    File contains the data model of the Chain-of-Trust engine: image and
    parameter descriptors, authentication methods and engine configuration.

--*/

/// Maximum number of images on any path from a trust anchor to a leaf
pub const MAX_COT_DEPTH: usize = 8;

/// Maximum number of parameter slots a `ParamStore` can hold
pub const MAX_PARAM_SLOTS: usize = 16;

/// Largest digest produced by any supported hash algorithm
pub const MAX_DIGEST_SIZE: usize = 64;

/// Image identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageId(pub u32);

impl From<ImageId> for u32 {
    fn from(id: ImageId) -> u32 {
        id.0
    }
}

/// Kind of image buffer, selects the parser used to interpret it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// Opaque binary without structure (firmware payloads)
    Raw = 0,

    /// Platform specific container
    Platform = 1,

    /// Certificate carrying authentication parameters
    Certificate = 2,
}

impl ImageKind {
    /// Number of image kinds
    pub const COUNT: usize = 3;

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Semantic kind of an authentication parameter, independent of encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    RawData,
    Signature,
    SignatureAlgorithm,
    Hash,
    PublicKey,
    NvCounter,
}

/// Names one parameter inside an image.
///
/// The cookie is interpreted only by the parser of the image kind, usually
/// as an OID string. `None` selects the parser's intrinsic field: the
/// signed data, the signature, the signature algorithm or the subject
/// public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamTypeDescriptor {
    pub param_type: ParamType,
    pub cookie: Option<&'static str>,
}

impl ParamTypeDescriptor {
    pub const fn new(param_type: ParamType, cookie: Option<&'static str>) -> Self {
        Self { param_type, cookie }
    }

    /// Intrinsic parameter of the given type
    pub const fn intrinsic(param_type: ParamType) -> Self {
        Self::new(param_type, None)
    }

    /// Parameter identified by an OID
    pub const fn oid(param_type: ParamType, oid: &'static str) -> Self {
        Self::new(param_type, Some(oid))
    }
}

/// Parameter store slot identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SlotId(pub u8);

impl SlotId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Parameter an authenticated image publishes for its children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamYield {
    pub desc: ParamTypeDescriptor,
    pub slot: SlotId,
}

impl ParamYield {
    pub const fn new(desc: ParamTypeDescriptor, slot: SlotId) -> Self {
        Self { desc, slot }
    }
}

/// Authentication method applied to an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// Digest of `data` (from the image) must equal `expected_hash`
    /// (yielded by the parent).
    Hash {
        data: ParamTypeDescriptor,
        expected_hash: ParamTypeDescriptor,
    },

    /// `signature` over `data` must verify with `public_key`. For trust
    /// anchors the key is taken from the image and checked against the
    /// ROTPK hash the platform holds for `public_key`, otherwise it is
    /// yielded by the parent.
    Signature {
        public_key: ParamTypeDescriptor,
        signature: ParamTypeDescriptor,
        algorithm: ParamTypeDescriptor,
        data: ParamTypeDescriptor,
    },

    /// Counter embedded in the image must not be lower than the platform
    /// counter.
    NvCounter {
        cert_counter: ParamTypeDescriptor,
        platform_counter: ParamTypeDescriptor,
    },
}

impl AuthMethod {
    /// Short name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            AuthMethod::Hash { .. } => "hash",
            AuthMethod::Signature { .. } => "sig",
            AuthMethod::NvCounter { .. } => "nv-ctr",
        }
    }
}

/// Static description of one node of the chain of trust
#[derive(Debug, Clone, Copy)]
pub struct ImageDescriptor<'a> {
    pub id: ImageId,
    pub kind: ImageKind,

    /// Issuer of this image, `None` for trust anchors
    pub parent: Option<ImageId>,

    /// Methods run in declared order
    pub methods: &'a [AuthMethod],

    /// Parameters extracted after successful authentication
    pub yields: &'a [ParamYield],
}

impl<'a> ImageDescriptor<'a> {
    pub fn is_anchor(&self) -> bool {
        self.parent.is_none()
    }

    /// True if any method of the image verifies a signature
    pub fn is_signed(&self) -> bool {
        self.methods
            .iter()
            .any(|method| matches!(method, AuthMethod::Signature { .. }))
    }

    /// Slot in which this image publishes `desc`
    pub fn yield_slot(&self, desc: &ParamTypeDescriptor) -> Option<SlotId> {
        self.yields
            .iter()
            .find(|y| y.desc == *desc)
            .map(|y| y.slot)
    }
}

/// Hash algorithm used for image digests and the ROTPK hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// Digest length in bytes
    pub const fn digest_len(self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }
}

/// Digest returned by a crypto backend
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Digest {
    bytes: [u8; MAX_DIGEST_SIZE],
    len: usize,
}

impl Digest {
    /// Create a digest from its bytes; `None` if longer than any supported digest
    pub fn from_slice(data: &[u8]) -> Option<Self> {
        if data.len() > MAX_DIGEST_SIZE {
            return None;
        }
        let mut bytes = [0u8; MAX_DIGEST_SIZE];
        bytes[..data.len()].copy_from_slice(data);
        Some(Self {
            bytes,
            len: data.len(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl core::fmt::Debug for Digest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Digest(")?;
        for b in self.as_bytes() {
            write!(f, "{b:02x}")?;
        }
        f.write_str(")")
    }
}

/// What happens to platform anti-rollback counters after a successful chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NvCounterPolicy {
    /// Advance platform counters to the highest authenticated value
    #[default]
    Advance,

    /// Check counters but never write them
    Frozen,
}

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthConfig {
    pub hash_alg: HashAlgorithm,
    pub nv_counter_policy: NvCounterPolicy,
}

impl AuthConfig {
    pub const fn new(hash_alg: HashAlgorithm, nv_counter_policy: NvCounterPolicy) -> Self {
        Self {
            hash_alg,
            nv_counter_policy,
        }
    }
}
