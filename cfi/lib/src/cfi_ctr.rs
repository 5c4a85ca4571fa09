/*++

Licensed under the Apache-2.0 license.

File Name:

    cfi_ctr.rs

Abstract:

    File contains the masked CFI call counter. Every instrumented function
    increments it on entry and its wrapper decrements and checks it on exit.

References:
    https://tf-m-user-guide.trustedfirmware.org/design_docs/tfm_physical_attack_mitigation.html

--*/

use crate::cfi::{cfi_launder, cfi_panic, CfiPanicInfo};

/// Counter value stored next to its masked copy
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct CfiInt {
    val: u32,
    masked_val: u32,
}

impl CfiInt {
    const MASK: u32 = 0xA5A5A5A5;

    const INVALID: Self = Self {
        val: 0,
        masked_val: 0,
    };

    fn encode(val: u32) -> Self {
        Self {
            val,
            masked_val: val ^ Self::MASK,
        }
    }

    fn is_valid(&self) -> bool {
        self.val ^ Self::MASK == self.masked_val
    }

    pub fn val(&self) -> u32 {
        self.val
    }

    /// Plain value, panicking if the masked copy disagrees
    fn checked(self) -> u32 {
        if !self.is_valid() {
            cfi_panic(CfiPanicInfo::CounterCorrupt);
        }
        self.val
    }
}

#[cfg(feature = "cfi-test")]
mod storage {
    use super::CfiInt;
    use core::cell::Cell;

    std::thread_local! {
        static COUNTER: Cell<CfiInt> = const { Cell::new(CfiInt::INVALID) };
    }

    pub(super) fn load() -> CfiInt {
        COUNTER.with(|ctr| ctr.get())
    }

    pub(super) fn store(int: CfiInt) {
        COUNTER.with(|ctr| ctr.set(int));
    }
}

#[cfg(not(feature = "cfi-test"))]
mod storage {
    use super::CfiInt;
    use core::sync::atomic::{AtomicU32, Ordering};

    static VAL: AtomicU32 = AtomicU32::new(0);
    static MASKED_VAL: AtomicU32 = AtomicU32::new(0);

    pub(super) fn load() -> CfiInt {
        CfiInt {
            val: VAL.load(Ordering::SeqCst),
            masked_val: MASKED_VAL.load(Ordering::SeqCst),
        }
    }

    pub(super) fn store(int: CfiInt) {
        VAL.store(int.val, Ordering::SeqCst);
        MASKED_VAL.store(int.masked_val, Ordering::SeqCst);
    }
}

/// CFI call counter
pub enum CfiCounter {}

impl CfiCounter {
    const DELAY_SPINS: u32 = 4;

    const fn enabled() -> bool {
        cfg!(all(feature = "cfi", feature = "cfi-counter"))
    }

    /// Start counting from zero. Must run before the first instrumented call.
    #[inline(always)]
    pub fn reset() {
        storage::store(CfiInt::encode(0));
    }

    /// Zero both copies, leaving an invalid counter
    pub fn corrupt() {
        storage::store(CfiInt::INVALID);
    }

    pub fn read() -> CfiInt {
        storage::load()
    }

    /// Increment the counter, returning the value before the increment
    #[inline(never)]
    pub fn increment() -> CfiInt {
        if !Self::enabled() {
            return CfiInt::encode(0);
        }
        let int = Self::read();
        let Some(next) = int.checked().checked_add(1) else {
            cfi_panic(CfiPanicInfo::CounterOverflow);
        };
        storage::store(CfiInt::encode(next));
        int
    }

    /// Decrement the counter, returning the value after the decrement
    #[inline(never)]
    pub fn decrement() -> CfiInt {
        if !Self::enabled() {
            return CfiInt::encode(0);
        }
        let Some(prev) = Self::read().checked().checked_sub(1) else {
            cfi_panic(CfiPanicInfo::CounterUnderflow);
        };
        storage::store(CfiInt::encode(prev));
        Self::read()
    }

    #[inline(never)]
    pub fn assert_eq(a: CfiInt, b: CfiInt) {
        if Self::enabled() && a.checked() != b.checked() {
            cfi_panic(CfiPanicInfo::CounterMismatch);
        }
    }

    #[inline(never)]
    pub fn delay() {
        if Self::enabled() {
            for _ in 0..cfi_launder(Self::DELAY_SPINS) {
                core::hint::spin_loop();
            }
        }
    }
}
