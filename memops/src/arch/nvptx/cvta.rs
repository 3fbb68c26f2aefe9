//! Generic ↔ space-qualified address conversion (`cvta`).

use core::arch::asm;

#[inline(always)]
pub(crate) fn cvta_to_global<T>(ptr: *const T) -> usize {
    let out: u64;
    // SAFETY: register-only conversion
    unsafe {
        asm!("cvta.to.global.u64 {}, {};", out(reg64) out, in(reg64) ptr as u64, options(pure, nomem, nostack));
    }
    out as usize
}

#[inline(always)]
pub(crate) fn cvta_to_shared<T>(ptr: *const T) -> u32 {
    let out: u64;
    // SAFETY: register-only conversion
    unsafe {
        asm!("cvta.to.shared.u64 {}, {};", out(reg64) out, in(reg64) ptr as u64, options(pure, nomem, nostack));
    }
    // Shared windows are far below 4 GiB
    out as u32
}

#[inline(always)]
pub(crate) fn cvta_from_global<T>(addr: usize) -> *mut T {
    let out: u64;
    // SAFETY: register-only conversion
    unsafe {
        asm!("cvta.global.u64 {}, {};", out(reg64) out, in(reg64) addr as u64, options(pure, nomem, nostack));
    }
    out as usize as *mut T
}

#[inline(always)]
pub(crate) fn cvta_from_shared<T>(addr: u32) -> *mut T {
    let out: u64;
    // SAFETY: register-only conversion
    unsafe {
        asm!("cvta.shared.u64 {}, {};", out(reg64) out, in(reg64) addr as u64, options(pure, nomem, nostack));
    }
    out as usize as *mut T
}
