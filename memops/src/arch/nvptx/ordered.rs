//! Ordered 64-bit word access and acquire-release fences.

use core::arch::asm;

use super::cvta::cvta_to_global;

#[inline(always)]
pub(crate) unsafe fn ld_volatile_u64(ptr: *const u64) -> u64 {
    let ans: u64;
    unsafe {
        asm!("ld.volatile.global.u64 {}, [{}];", out(reg64) ans, in(reg64) cvta_to_global(ptr) as u64, options(nostack));
    }
    ans
}

#[inline(always)]
pub(crate) unsafe fn st_volatile_u64(ptr: *mut u64, val: u64) {
    unsafe {
        asm!("st.volatile.global.u64 [{}], {};", in(reg64) cvta_to_global(ptr) as u64, in(reg64) val, options(nostack));
    }
}

cfg_if::cfg_if! {
    if #[cfg(memops_native_ordering)] {
        #[inline(always)]
        pub(crate) unsafe fn ld_relaxed_sys_global(ptr: *const u64) -> u64 {
            let ans: u64;
            unsafe {
                asm!("ld.relaxed.sys.global.u64 {}, [{}];", out(reg64) ans, in(reg64) cvta_to_global(ptr) as u64, options(nostack));
            }
            ans
        }

        #[inline(always)]
        pub(crate) unsafe fn ld_acquire_sys_global(ptr: *const u64) -> u64 {
            let ans: u64;
            unsafe {
                asm!("ld.acquire.sys.global.u64 {}, [{}];", out(reg64) ans, in(reg64) cvta_to_global(ptr) as u64, options(nostack));
            }
            ans
        }

        #[inline(always)]
        pub(crate) unsafe fn st_relaxed_sys_global(ptr: *mut u64, val: u64) {
            unsafe {
                asm!("st.relaxed.sys.global.u64 [{}], {};", in(reg64) cvta_to_global(ptr) as u64, in(reg64) val, options(nostack));
            }
        }

        #[inline(always)]
        pub(crate) unsafe fn st_release_sys_global(ptr: *mut u64, val: u64) {
            unsafe {
                asm!("st.release.sys.global.u64 [{}], {};", in(reg64) cvta_to_global(ptr) as u64, in(reg64) val, options(nostack));
            }
        }

        #[inline(always)]
        pub(crate) fn fence_acq_rel_sys() {
            // SAFETY: fence has no operands
            unsafe { asm!("fence.acq_rel.sys;", options(nostack)) };
        }

        #[inline(always)]
        pub(crate) fn fence_acq_rel_gpu() {
            // SAFETY: fence has no operands
            unsafe { asm!("fence.acq_rel.gpu;", options(nostack)) };
        }
    } else {
        #[inline(always)]
        pub(crate) unsafe fn ld_relaxed_sys_global(ptr: *const u64) -> u64 {
            unsafe { ld_volatile_u64(ptr) }
        }

        // The trailing membar.sys keeps later accesses behind the load.
        #[inline(always)]
        pub(crate) unsafe fn ld_acquire_sys_global(ptr: *const u64) -> u64 {
            let ans: u64;
            unsafe {
                asm!("ld.volatile.global.u64 {}, [{}]; membar.sys;", out(reg64) ans, in(reg64) cvta_to_global(ptr) as u64, options(nostack));
            }
            ans
        }

        #[inline(always)]
        pub(crate) unsafe fn st_relaxed_sys_global(ptr: *mut u64, val: u64) {
            unsafe { st_volatile_u64(ptr, val) }
        }

        #[inline(always)]
        pub(crate) unsafe fn st_release_sys_global(ptr: *mut u64, val: u64) {
            unsafe {
                asm!("membar.sys; st.volatile.global.u64 [{}], {};", in(reg64) cvta_to_global(ptr) as u64, in(reg64) val, options(nostack));
            }
        }

        #[inline(always)]
        pub(crate) fn fence_acq_rel_sys() {
            // SAFETY: barrier has no operands
            unsafe { asm!("membar.sys;", options(nostack)) };
        }

        #[inline(always)]
        pub(crate) fn fence_acq_rel_gpu() {
            // SAFETY: barrier has no operands
            unsafe { asm!("membar.gl;", options(nostack)) };
        }
    }
}
