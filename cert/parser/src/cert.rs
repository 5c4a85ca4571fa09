/*++

Licensed under the Apache-2.0 license.

File Name:

   cert.rs

Abstract:

    File contains the structural decoding of a certificate buffer.

--*/

use cot_cert_types::*;
use cot_error::{CotError, CotResult};
use zerocopy::FromBytes;

/// One TBS record
#[derive(Debug, Clone, Copy)]
pub(crate) struct Record<'a> {
    /// Offset of the record header inside the TBS region
    pub offset: usize,
    pub tag: RecordTag,
    pub data: &'a [u8],
}

/// Iterator over the records of a TBS region
pub(crate) struct Records<'a> {
    tbs: &'a [u8],
    offset: usize,
}

impl<'a> Records<'a> {
    pub fn new(tbs: &'a [u8]) -> Self {
        Self { tbs, offset: 0 }
    }

    fn next_record(&mut self) -> CotResult<Record<'a>> {
        let rest = &self.tbs[self.offset..];
        let header =
            RecordHeader::read_from_prefix(rest).ok_or(CotError::CERT_ERR_BAD_RECORD)?;
        let tag = RecordTag::try_from(header.tag()).map_err(|_| CotError::CERT_ERR_BAD_RECORD)?;
        let data = rest
            .get(RECORD_HEADER_SIZE..RECORD_HEADER_SIZE + header.len() as usize)
            .ok_or(CotError::CERT_ERR_BAD_RECORD)?;

        let record = Record {
            offset: self.offset,
            tag,
            data,
        };
        self.offset += RECORD_HEADER_SIZE + data.len();
        Ok(record)
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = CotResult<Record<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.tbs.len() {
            return None;
        }
        let result = self.next_record();
        if result.is_err() {
            // Stop after the first malformed record
            self.offset = self.tbs.len();
        }
        Some(result)
    }
}

/// Split extension record data into OID and value
pub(crate) fn split_extension(data: &[u8]) -> CotResult<(&[u8], &[u8])> {
    let header = ExtHeader::read_from_prefix(data).ok_or(CotError::CERT_ERR_BAD_RECORD)?;
    let oid_len = header.oid_len() as usize;
    let value_len = header.value_len() as usize;
    if oid_len == 0 || EXT_HEADER_SIZE + oid_len + value_len != data.len() {
        return Err(CotError::CERT_ERR_BAD_RECORD);
    }
    let body = &data[EXT_HEADER_SIZE..];
    Ok(body.split_at(oid_len))
}

/// Value of the extension named `oid`
pub(crate) fn find_extension<'a>(tbs: &'a [u8], oid: &[u8]) -> CotResult<Option<&'a [u8]>> {
    for record in Records::new(tbs) {
        let record = record?;
        if record.tag != RecordTag::Extension {
            continue;
        }
        let (ext_oid, value) = split_extension(record.data)?;
        if ext_oid == oid {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

/// Validated view of a certificate
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cert<'a> {
    pub tbs: &'a [u8],
    pub sig: &'a [u8],
    pub sig_alg: &'a [u8],
    pub subject_pub_key: &'a [u8],
}

impl<'a> Cert<'a> {
    /// Decode `image`, checking every structural rule of the format
    pub fn decode(image: &'a [u8]) -> CotResult<Self> {
        let header =
            CertHeader::read_from_prefix(image).ok_or(CotError::CERT_ERR_LENGTH_MISMATCH)?;
        if header.magic() != CERT_MAGIC {
            return Err(CotError::CERT_ERR_BAD_MAGIC);
        }
        if header.version() != CERT_VERSION {
            return Err(CotError::CERT_ERR_UNSUPPORTED_VERSION);
        }

        let tbs_end = CERT_HEADER_SIZE
            .checked_add(header.tbs_len() as usize)
            .ok_or(CotError::CERT_ERR_LENGTH_MISMATCH)?;
        let cert_len = tbs_end
            .checked_add(header.sig_len() as usize)
            .ok_or(CotError::CERT_ERR_LENGTH_MISMATCH)?;
        if cert_len != image.len() {
            return Err(CotError::CERT_ERR_LENGTH_MISMATCH);
        }

        let tbs = &image[CERT_HEADER_SIZE..tbs_end];
        let sig = &image[tbs_end..];
        if sig.is_empty() {
            return Err(CotError::CERT_ERR_MISSING_RECORD);
        }

        let mut sig_alg = None;
        let mut subject_pub_key = None;
        for record in Records::new(tbs) {
            let record = record?;
            match record.tag {
                RecordTag::SigAlg => {
                    if sig_alg.is_some() {
                        return Err(CotError::CERT_ERR_DUPLICATE_RECORD);
                    }
                    if record.data.len() != 4 {
                        return Err(CotError::CERT_ERR_BAD_RECORD);
                    }
                    sig_alg = Some(record.data);
                }
                RecordTag::SubjectPubKey => {
                    if subject_pub_key.is_some() {
                        return Err(CotError::CERT_ERR_DUPLICATE_RECORD);
                    }
                    if record.data.is_empty() {
                        return Err(CotError::CERT_ERR_BAD_RECORD);
                    }
                    subject_pub_key = Some(record.data);
                }
                RecordTag::Extension => {
                    let (oid, _) = split_extension(record.data)?;
                    if find_extension(&tbs[..record.offset], oid)?.is_some() {
                        return Err(CotError::CERT_ERR_DUPLICATE_RECORD);
                    }
                }
            }
        }

        Ok(Self {
            tbs,
            sig,
            sig_alg: sig_alg.ok_or(CotError::CERT_ERR_MISSING_RECORD)?,
            subject_pub_key: subject_pub_key.ok_or(CotError::CERT_ERR_MISSING_RECORD)?,
        })
    }

    pub fn extension(&self, oid: &str) -> CotResult<Option<&'a [u8]>> {
        find_extension(self.tbs, oid.as_bytes())
    }
}
