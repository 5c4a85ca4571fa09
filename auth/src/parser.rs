/*++

Licensed under the Apache-2.0 license.

File Name:

    parser.rs

Abstract:

    File contains the image parser capability and the registry mapping image
    kinds to parsers.

--*/

use crate::types::*;
use cot_error::{CotError, CotResult};

/// Interprets buffers of one image kind
pub trait ImageParser {
    /// Parser name used in diagnostics
    fn name(&self) -> &'static str;

    /// One-time setup, run by `ImageParserRegistry::init`
    fn init(&self) -> CotResult<()> {
        Ok(())
    }

    /// Validate the structure of `image`
    fn check_integrity(&self, image: &[u8]) -> CotResult<()>;

    /// Locate the parameter named by `desc` inside `image`
    ///
    /// # Returns
    ///
    /// * `&[u8]` - View into `image`
    fn get_param<'i>(&self, desc: &ParamTypeDescriptor, image: &'i [u8]) -> CotResult<&'i [u8]>;
}

/// Image kind to parser mapping. `Raw` images are handled by the registry
/// itself.
pub struct ImageParserRegistry<'a> {
    parsers: [Option<&'a dyn ImageParser>; ImageKind::COUNT],
    initialized: bool,
}

impl<'a> Default for ImageParserRegistry<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ImageParserRegistry<'a> {
    pub const fn new() -> Self {
        Self {
            parsers: [None; ImageKind::COUNT],
            initialized: false,
        }
    }

    /// Register `parser` for images of `kind`
    pub fn register(&mut self, kind: ImageKind, parser: &'a dyn ImageParser) -> CotResult<()> {
        if self.initialized {
            return Err(CotError::IMG_PARSER_ERR_REGISTRY_SEALED);
        }
        if kind == ImageKind::Raw || self.parsers[kind.index()].is_some() {
            return Err(CotError::IMG_PARSER_ERR_DUPLICATE);
        }
        self.parsers[kind.index()] = Some(parser);
        Ok(())
    }

    /// Run the one-time setup of every registered parser and seal the registry.
    ///
    /// Panics if called twice.
    pub fn init(&mut self) -> CotResult<()> {
        assert!(!self.initialized, "parser registry initialized twice");
        for parser in self.parsers.iter().flatten() {
            parser.init().map_err(|err| {
                crate::cprintln!(
                    "[cot] Parser {} init failed: {}",
                    parser.name(),
                    crate::HexWord(err.into())
                );
                CotError::IMG_PARSER_ERR_INIT_FAILURE
            })?;
        }
        self.initialized = true;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn parser(&self, kind: ImageKind) -> CotResult<&'a dyn ImageParser> {
        self.parsers[kind.index()].ok_or(CotError::IMG_PARSER_ERR_NOT_REGISTERED)
    }

    /// Validate the structure of `image`
    pub fn check_integrity(&self, kind: ImageKind, image: &[u8]) -> CotResult<()> {
        match kind {
            ImageKind::Raw => Ok(()),
            _ => self.parser(kind)?.check_integrity(image),
        }
    }

    /// Locate the parameter named by `desc` inside `image`
    pub fn get_param<'i>(
        &self,
        kind: ImageKind,
        desc: &ParamTypeDescriptor,
        image: &'i [u8],
    ) -> CotResult<&'i [u8]> {
        match kind {
            ImageKind::Raw => match desc.param_type {
                ParamType::RawData => Ok(image),
                _ => Err(CotError::IMG_PARSER_ERR_INVALID_PARAM_FOR_IMAGE_KIND),
            },
            _ => self.parser(kind)?.get_param(desc, image),
        }
    }
}
