/*++

Licensed under the Apache-2.0 license.

File Name:

    cfi.rs

Abstract:

    File contains the CFI launder, panic and redundant comparison helpers used
    to double check trust decisions.

References:
    https://github.com/lowRISC/opentitan/blob/7a61300cf7c409fa68fd892942c1d7b58a7cd4c0/sw/device/lib/base/hardened.h#L260

--*/

use crate::CfiCounter;
use cot_error::CotError;

/// Reason of a CFI panic
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CfiPanicInfo {
    CounterCorrupt,
    CounterOverflow,
    CounterUnderflow,
    CounterMismatch,
    AssertEqFail,
    AssertGeFail,
}

impl From<CfiPanicInfo> for CotError {
    fn from(info: CfiPanicInfo) -> CotError {
        match info {
            CfiPanicInfo::CounterCorrupt => CotError::CFI_PANIC_COUNTER_CORRUPT,
            CfiPanicInfo::CounterOverflow => CotError::CFI_PANIC_COUNTER_OVERFLOW,
            CfiPanicInfo::CounterUnderflow => CotError::CFI_PANIC_COUNTER_UNDERFLOW,
            CfiPanicInfo::CounterMismatch => CotError::CFI_PANIC_COUNTER_MISMATCH,
            CfiPanicInfo::AssertEqFail => CotError::CFI_PANIC_ASSERT_EQ_FAILURE,
            CfiPanicInfo::AssertGeFail => CotError::CFI_PANIC_ASSERT_GE_FAILURE,
        }
    }
}

/// Hide `val` from the optimizer so a repeated comparison is really repeated
pub fn cfi_launder<T>(val: T) -> T {
    if cfg!(feature = "cfi") {
        core::hint::black_box(val)
    } else {
        val
    }
}

/// Stop on a detected control flow violation.
///
/// Test builds (`cfi-test`) turn the violation into a Rust panic. Firmware
/// builds call the platform's `cfi_panic_handler`.
#[inline(never)]
pub fn cfi_panic(info: CfiPanicInfo) -> ! {
    let info = cfi_launder(info);

    #[cfg(feature = "cfi")]
    {
        #[cfg(feature = "cfi-test")]
        {
            panic!("CFI Panic = {:?}", info);
        }

        #[cfg(not(feature = "cfi-test"))]
        {
            extern "C" {
                fn cfi_panic_handler(code: u32) -> !;
            }
            unsafe {
                cfi_panic_handler(CotError::from(info).into());
            }
        }
    }

    #[cfg(not(feature = "cfi"))]
    {
        unreachable!("CFI violation {:?} without CFI support", info)
    }
}

/// Run `check` twice with a delay in between, panicking with `info` if
/// either run fails.
#[inline(always)]
fn check_twice(info: CfiPanicInfo, check: impl Fn() -> bool) {
    if !cfg!(feature = "cfi") {
        return;
    }
    for _ in 0..2 {
        CfiCounter::delay();
        if !check() {
            cfi_panic(info);
        }
    }
}

/// Repeat an equality decision that was already taken
#[inline(always)]
pub fn cfi_assert_eq<T: PartialEq + Copy>(lhs: T, rhs: T) {
    check_twice(CfiPanicInfo::AssertEqFail, || {
        cfi_launder(lhs) == cfi_launder(rhs)
    });
}

/// Repeat a `lhs >= rhs` decision that was already taken
#[inline(always)]
pub fn cfi_assert_ge<T: PartialOrd + Copy>(lhs: T, rhs: T) {
    check_twice(CfiPanicInfo::AssertGeFail, || {
        cfi_launder(lhs) >= cfi_launder(rhs)
    });
}

#[inline(always)]
pub fn cfi_assert_bool(cond: bool) {
    cfi_assert_eq(cond, true);
}

/// Repeat a digest or key comparison after the branch that consumed the
/// first comparison has been taken.
#[inline(always)]
pub fn cfi_assert_eq_bytes(a: &[u8], b: &[u8]) {
    check_twice(CfiPanicInfo::AssertEqFail, || {
        cfi_launder(a.len()) == cfi_launder(b.len())
            && a.iter()
                .zip(b.iter())
                .all(|(x, y)| cfi_launder(*x) == cfi_launder(*y))
    });
}
