/*++

Licensed under the Apache-2.0 license.

File Name:

   nv_counters.rs

Abstract:

    File contains the in-memory NV counter backend.

--*/

use cot_auth::{NvCounterBackend, ParamTypeDescriptor};
use cot_error::{CotError, CotResult};
use std::collections::HashMap;

/// Forward-only counters keyed by counter OID
#[derive(Debug, Default)]
pub struct EmuNvCounters {
    counters: HashMap<&'static str, u32>,
    writes: Vec<(&'static str, u32)>,
    fail_read: bool,
    fail_write: bool,
}

impl EmuNvCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provision counter `oid` with `value`
    pub fn with_counter(mut self, oid: &'static str, value: u32) -> Self {
        self.counters.insert(oid, value);
        self
    }

    pub fn value(&self, oid: &str) -> Option<u32> {
        self.counters.get(oid).copied()
    }

    /// Writes that changed a counter, in order
    pub fn writes(&self) -> &[(&'static str, u32)] {
        &self.writes
    }

    pub fn set_fail_read(&mut self, fail: bool) {
        self.fail_read = fail;
    }

    pub fn set_fail_write(&mut self, fail: bool) {
        self.fail_write = fail;
    }

    fn oid(counter: &ParamTypeDescriptor) -> CotResult<&'static str> {
        counter.cookie.ok_or(CotError::NV_CTR_ERR_UNKNOWN_COUNTER)
    }
}

impl NvCounterBackend for EmuNvCounters {
    fn read(&mut self, counter: &ParamTypeDescriptor) -> CotResult<u32> {
        if self.fail_read {
            return Err(CotError::NV_CTR_ERR_READ_FAILURE);
        }
        self.value(Self::oid(counter)?)
            .ok_or(CotError::NV_CTR_ERR_UNKNOWN_COUNTER)
    }

    fn write(&mut self, counter: &ParamTypeDescriptor, value: u32) -> CotResult<()> {
        if self.fail_write {
            return Err(CotError::NV_CTR_ERR_WRITE_FAILURE);
        }
        let oid = Self::oid(counter)?;
        let current = self
            .counters
            .get_mut(oid)
            .ok_or(CotError::NV_CTR_ERR_UNKNOWN_COUNTER)?;
        if value < *current {
            return Err(CotError::NV_CTR_ERR_WRITE_FAILURE);
        }
        if value > *current {
            *current = value;
            self.writes.push((oid, value));
        }
        Ok(())
    }
}
