/*++

Licensed under the Apache-2.0 license.

File Name:

    table.rs

Abstract:

    File contains the Chain-of-Trust descriptor table and its configuration
    validation.

--*/

use crate::types::*;
use cot_error::{CotError, CotResult};

/// Images from a trust anchor down to a requested image, anchor first
#[derive(Debug, Clone, Copy)]
pub struct AncestorPath {
    ids: [ImageId; MAX_COT_DEPTH],
    len: usize,
}

impl AncestorPath {
    pub fn as_slice(&self) -> &[ImageId] {
        &self.ids[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Trust anchor of the path
    pub fn anchor(&self) -> Option<ImageId> {
        self.as_slice().first().copied()
    }
}

/// Validated, read-only Chain-of-Trust graph
#[derive(Debug, Clone, Copy)]
pub struct CotTable<'a> {
    images: &'a [ImageDescriptor<'a>],
    max_slot: Option<SlotId>,
}

impl<'a> CotTable<'a> {
    /// Validate `images` and build the table.
    ///
    /// # Arguments
    ///
    /// * `images` - Image descriptors, in any order
    ///
    /// # Returns
    ///
    /// * `CotTable` - On success; a configuration error naming the first
    ///   violated rule otherwise
    pub fn new(images: &'a [ImageDescriptor<'a>]) -> CotResult<Self> {
        let mut table = Self {
            images,
            max_slot: None,
        };

        for (idx, image) in images.iter().enumerate() {
            if images[..idx].iter().any(|other| other.id == image.id) {
                return Err(CotError::COT_TABLE_ERR_DUPLICATE_IMAGE_ID);
            }
        }

        for image in images {
            let parent = match image.parent {
                Some(parent_id) => Some(
                    table
                        .find(parent_id)
                        .ok_or(CotError::COT_TABLE_ERR_UNKNOWN_PARENT)?,
                ),
                None => None,
            };

            table.check_path(image)?;
            Self::check_methods(image, parent)?;

            for y in image.yields {
                if image.kind == ImageKind::Raw && y.desc.param_type != ParamType::RawData {
                    return Err(CotError::COT_TABLE_ERR_RAW_IMAGE_PARAM);
                }
                if y.slot.index() >= MAX_PARAM_SLOTS {
                    return Err(CotError::PARAM_STORE_ERR_INVALID_SLOT);
                }
                table.max_slot = table.max_slot.max(Some(y.slot));
            }
        }

        Ok(table)
    }

    fn find(&self, id: ImageId) -> Option<&'a ImageDescriptor<'a>> {
        self.images.iter().find(|image| image.id == id)
    }

    /// Walk the parent links of `image`, rejecting cycles and over-deep paths.
    fn check_path(&self, image: &ImageDescriptor) -> CotResult<()> {
        let mut visited = [ImageId(0); MAX_COT_DEPTH];
        let mut depth = 0;
        let mut current = Some(image.id);

        while let Some(id) = current {
            if visited[..depth].contains(&id) {
                return Err(CotError::COT_TABLE_ERR_CYCLE);
            }
            if depth == MAX_COT_DEPTH {
                return Err(CotError::COT_TABLE_ERR_DEPTH_EXCEEDED);
            }
            visited[depth] = id;
            depth += 1;
            current = self
                .find(id)
                .ok_or(CotError::COT_TABLE_ERR_UNKNOWN_PARENT)?
                .parent;
        }
        Ok(())
    }

    fn check_methods(
        image: &ImageDescriptor,
        parent: Option<&ImageDescriptor>,
    ) -> CotResult<()> {
        fn expect(desc: &ParamTypeDescriptor, param_type: ParamType) -> CotResult<()> {
            if desc.param_type != param_type {
                return Err(CotError::COT_TABLE_ERR_PARAM_TYPE_MISMATCH);
            }
            Ok(())
        }

        // Parameters consumed from the issuer must be published by it.
        let from_parent = |desc: &ParamTypeDescriptor| -> CotResult<()> {
            match parent {
                Some(parent) if parent.yield_slot(desc).is_some() => Ok(()),
                _ => Err(CotError::COT_TABLE_ERR_PARENT_PARAM_MISSING),
            }
        };

        if image.methods.is_empty() {
            return Err(CotError::COT_TABLE_ERR_NO_AUTH_METHOD);
        }

        let mut signed = false;
        let mut counted = false;
        for method in image.methods {
            match method {
                AuthMethod::Hash {
                    data,
                    expected_hash,
                } => {
                    expect(data, ParamType::RawData)?;
                    expect(expected_hash, ParamType::Hash)?;
                    from_parent(expected_hash)?;
                }
                AuthMethod::Signature {
                    public_key,
                    signature,
                    algorithm,
                    data,
                } => {
                    expect(public_key, ParamType::PublicKey)?;
                    expect(signature, ParamType::Signature)?;
                    expect(algorithm, ParamType::SignatureAlgorithm)?;
                    expect(data, ParamType::RawData)?;
                    if image.kind == ImageKind::Raw {
                        return Err(CotError::COT_TABLE_ERR_RAW_IMAGE_PARAM);
                    }
                    if !image.is_anchor() {
                        from_parent(public_key)?;
                    }
                    signed = true;
                }
                AuthMethod::NvCounter {
                    cert_counter,
                    platform_counter,
                } => {
                    expect(cert_counter, ParamType::NvCounter)?;
                    expect(platform_counter, ParamType::NvCounter)?;
                    if image.kind == ImageKind::Raw {
                        return Err(CotError::COT_TABLE_ERR_RAW_IMAGE_PARAM);
                    }
                    if counted {
                        return Err(CotError::COT_TABLE_ERR_MULTIPLE_NV_COUNTERS);
                    }
                    counted = true;
                }
            }
        }

        if image.is_anchor() && !signed {
            return Err(CotError::COT_TABLE_ERR_ANCHOR_NOT_SIGNED);
        }
        Ok(())
    }

    /// Look up the descriptor of `id`
    pub fn lookup(&self, id: ImageId) -> CotResult<&'a ImageDescriptor<'a>> {
        self.find(id).ok_or(CotError::COT_TABLE_ERR_UNKNOWN_IMAGE)
    }

    /// Path from the trust anchor of `id` down to `id`
    pub fn ancestors(&self, id: ImageId) -> CotResult<AncestorPath> {
        let mut path = AncestorPath {
            ids: [ImageId(0); MAX_COT_DEPTH],
            len: 0,
        };

        let mut current = Some(self.lookup(id)?);
        while let Some(image) = current {
            if path.len == MAX_COT_DEPTH {
                return Err(CotError::COT_TABLE_ERR_DEPTH_EXCEEDED);
            }
            path.ids[path.len] = image.id;
            path.len += 1;
            current = match image.parent {
                Some(parent) => Some(self.lookup(parent)?),
                None => None,
            };
        }

        path.ids[..path.len].reverse();
        Ok(path)
    }

    /// Highest slot any image yields into, `None` if nothing is yielded
    pub fn max_slot(&self) -> Option<SlotId> {
        self.max_slot
    }

    pub fn images(&self) -> &'a [ImageDescriptor<'a>] {
        self.images
    }
}
