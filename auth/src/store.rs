/*++

Licensed under the Apache-2.0 license.

File Name:

    store.rs

Abstract:

    File contains the parameter store: fixed-capacity slots backed by
    platform-owned buffers that carry parameters from an authenticated image
    to its children.

--*/

use crate::types::{SlotId, MAX_PARAM_SLOTS};
use cot_error::{CotError, CotResult};
use zeroize::Zeroize;

#[derive(Default)]
struct ParamSlot<'b> {
    buf: &'b mut [u8],
    len: usize,
    attached: bool,
}

/// Bounds-checked arena of parameter slots
#[derive(Default)]
pub struct ParamStore<'b> {
    slots: [ParamSlot<'b>; MAX_PARAM_SLOTS],
}

impl<'b> ParamStore<'b> {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, id: SlotId) -> CotResult<&ParamSlot<'b>> {
        match self.slots.get(id.index()) {
            Some(slot) if slot.attached => Ok(slot),
            _ => Err(CotError::PARAM_STORE_ERR_INVALID_SLOT),
        }
    }

    fn slot_mut(&mut self, id: SlotId) -> CotResult<&mut ParamSlot<'b>> {
        match self.slots.get_mut(id.index()) {
            Some(slot) if slot.attached => Ok(slot),
            _ => Err(CotError::PARAM_STORE_ERR_INVALID_SLOT),
        }
    }

    /// Bind `buf` to slot `id`; the buffer length is the slot capacity.
    pub fn attach(&mut self, id: SlotId, buf: &'b mut [u8]) -> CotResult<()> {
        let slot = self
            .slots
            .get_mut(id.index())
            .ok_or(CotError::PARAM_STORE_ERR_INVALID_SLOT)?;
        if slot.attached {
            return Err(CotError::PARAM_STORE_ERR_SLOT_ALREADY_ATTACHED);
        }
        buf.zeroize();
        *slot = ParamSlot {
            buf,
            len: 0,
            attached: true,
        };
        Ok(())
    }

    /// Replace the contents of slot `id` with `data`.
    ///
    /// An oversized write leaves the slot untouched.
    pub fn write(&mut self, id: SlotId, data: &[u8]) -> CotResult<()> {
        let slot = self.slot_mut(id)?;
        if data.len() > slot.buf.len() {
            return Err(CotError::PARAM_STORE_ERR_PARAM_TOO_LARGE);
        }
        slot.buf[..data.len()].copy_from_slice(data);
        if slot.len > data.len() {
            slot.buf[data.len()..slot.len].zeroize();
        }
        slot.len = data.len();
        Ok(())
    }

    /// Current contents of slot `id`
    pub fn read(&self, id: SlotId) -> CotResult<&[u8]> {
        let slot = self.slot(id)?;
        Ok(&slot.buf[..slot.len])
    }

    /// Capacity of slot `id`
    pub fn capacity(&self, id: SlotId) -> CotResult<usize> {
        Ok(self.slot(id)?.buf.len())
    }

    /// Zeroize every attached slot
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut().filter(|slot| slot.attached) {
            slot.buf.zeroize();
            slot.len = 0;
        }
    }

    /// Number of attached slots
    pub fn slot_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.attached).count()
    }

    /// Returns true if every slot up to and including `id` is attached
    pub fn covers(&self, id: SlotId) -> bool {
        match self.slots.get(..=id.index()) {
            Some(slots) => slots.iter().all(|slot| slot.attached),
            None => false,
        }
    }
}
