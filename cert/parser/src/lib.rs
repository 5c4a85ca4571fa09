/*++

Licensed under the Apache-2.0 license.

File Name:

   lib.rs

Abstract:

    File contains the certificate parser of the Chain-of-Trust engine.

--*/

#![cfg_attr(not(feature = "std"), no_std)]

mod cert;

use cert::Cert;
use cot_auth::{cprintln, HexWord, ImageParser, ParamType, ParamTypeDescriptor};
use cot_cert_types::CERT_MAX_PARAM_SIZE;
use cot_error::{CotError, CotResult};

/// Parser for `ImageKind::Certificate` images.
///
/// The parser is stateless: every call decodes the buffer again and returns
/// views into it.
#[derive(Debug, Default, Clone, Copy)]
pub struct CertParser;

impl CertParser {
    pub const fn new() -> Self {
        Self
    }
}

impl ImageParser for CertParser {
    fn name(&self) -> &'static str {
        "cert"
    }

    fn check_integrity(&self, image: &[u8]) -> CotResult<()> {
        Cert::decode(image).map(|_| ()).map_err(|err| {
            cprintln!("[cert] Integrity check failed: {}", HexWord(err.into()));
            err
        })
    }

    fn get_param<'i>(&self, desc: &ParamTypeDescriptor, image: &'i [u8]) -> CotResult<&'i [u8]> {
        let cert = Cert::decode(image)?;

        let value = match (desc.param_type, desc.cookie) {
            (ParamType::RawData, None) => return Ok(cert.tbs),
            (ParamType::Signature, None) => return Ok(cert.sig),
            (ParamType::SignatureAlgorithm, None) => return Ok(cert.sig_alg),
            (ParamType::PublicKey, None) => return Ok(cert.subject_pub_key),
            (ParamType::PublicKey | ParamType::Hash | ParamType::NvCounter, Some(oid)) => {
                cert.extension(oid)?
            }
            _ => None,
        };

        let value = value.ok_or(CotError::IMG_PARSER_ERR_PARAM_NOT_FOUND)?;
        if value.len() > CERT_MAX_PARAM_SIZE {
            return Err(CotError::PARAM_STORE_ERR_PARAM_TOO_LARGE);
        }
        Ok(value)
    }
}
