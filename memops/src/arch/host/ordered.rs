//! Ordered 64-bit word access and acquire-release fences.
//!
//! Volatile words are relaxed atomics here: concurrent polling of a plain
//! volatile location would race.

use core::sync::atomic::{fence, AtomicU64, Ordering};

/// # Safety
/// `ptr` must be 8-byte aligned and valid for the duration of the access.
#[inline(always)]
unsafe fn word<'a>(ptr: *const u64) -> &'a AtomicU64 {
    unsafe { AtomicU64::from_ptr(ptr as *mut u64) }
}

#[inline(always)]
pub(crate) unsafe fn ld_volatile_u64(ptr: *const u64) -> u64 {
    unsafe { word(ptr) }.load(Ordering::Relaxed)
}

#[inline(always)]
pub(crate) unsafe fn st_volatile_u64(ptr: *mut u64, val: u64) {
    unsafe { word(ptr) }.store(val, Ordering::Relaxed);
}

#[inline(always)]
pub(crate) unsafe fn ld_relaxed_sys_global(ptr: *const u64) -> u64 {
    unsafe { word(ptr) }.load(Ordering::Relaxed)
}

#[inline(always)]
pub(crate) unsafe fn st_relaxed_sys_global(ptr: *mut u64, val: u64) {
    unsafe { word(ptr) }.store(val, Ordering::Relaxed);
}

cfg_if::cfg_if! {
    if #[cfg(memops_native_ordering)] {
        #[inline(always)]
        pub(crate) unsafe fn ld_acquire_sys_global(ptr: *const u64) -> u64 {
            unsafe { word(ptr) }.load(Ordering::Acquire)
        }

        #[inline(always)]
        pub(crate) unsafe fn st_release_sys_global(ptr: *mut u64, val: u64) {
            unsafe { word(ptr) }.store(val, Ordering::Release);
        }

        #[inline(always)]
        pub(crate) fn fence_acq_rel_sys() {
            fence(Ordering::AcqRel);
        }

        #[inline(always)]
        pub(crate) fn fence_acq_rel_gpu() {
            fence(Ordering::AcqRel);
        }
    } else {
        #[inline(always)]
        pub(crate) unsafe fn ld_acquire_sys_global(ptr: *const u64) -> u64 {
            let ans = unsafe { word(ptr) }.load(Ordering::Relaxed);
            fence(Ordering::SeqCst);
            ans
        }

        #[inline(always)]
        pub(crate) unsafe fn st_release_sys_global(ptr: *mut u64, val: u64) {
            fence(Ordering::SeqCst);
            unsafe { word(ptr) }.store(val, Ordering::Relaxed);
        }

        #[inline(always)]
        pub(crate) fn fence_acq_rel_sys() {
            fence(Ordering::SeqCst);
        }

        #[inline(always)]
        pub(crate) fn fence_acq_rel_gpu() {
            fence(Ordering::SeqCst);
        }
    }
}
