/*++

Licensed under the Apache-2.0 license.

File Name:

   image_store.rs

Abstract:

    File contains the in-memory store of loaded images.

--*/

use cot_auth::{ImageId, ImageLoader};
use std::collections::HashMap;

/// Images loaded earlier in the boot stage
#[derive(Debug, Default, Clone)]
pub struct EmuImageStore {
    images: HashMap<ImageId, Vec<u8>>,
}

impl EmuImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `image` as `id`, replacing any previous buffer
    pub fn load(&mut self, id: ImageId, image: &[u8]) {
        self.images.insert(id, image.to_vec());
    }

    pub fn unload(&mut self, id: ImageId) -> Option<Vec<u8>> {
        self.images.remove(&id)
    }

    /// Mutable buffer of `id`, used to model corruption after loading
    pub fn image_mut(&mut self, id: ImageId) -> Option<&mut Vec<u8>> {
        self.images.get_mut(&id)
    }
}

impl ImageLoader for EmuImageStore {
    fn image(&self, id: ImageId) -> Option<&[u8]> {
        self.images.get(&id).map(|image| image.as_slice())
    }
}
