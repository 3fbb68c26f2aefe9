//! Sized loads and stores over host memory.

use core::ptr;
use core::sync::atomic::{AtomicU16, AtomicU32, AtomicU64, AtomicU8, Ordering};

use super::scratch;
use crate::arch::NativeAccess;
use crate::pack::Ulong2;

// Volatile accesses are relaxed atomics so that lanes may poll them
// concurrently without a data race.
macro_rules! define_ld_st {
    ($($native:ty => $atomic:ty),* $(,)?) => {
        $(
            impl NativeAccess for $native {
                #[inline(always)]
                unsafe fn ld_global(addr: usize) -> Self {
                    unsafe { ptr::read(addr as *const Self) }
                }

                #[inline(always)]
                unsafe fn ld_volatile_global(addr: usize) -> Self {
                    unsafe { <$atomic>::from_ptr(addr as *mut Self) }.load(Ordering::Relaxed)
                }

                #[inline(always)]
                unsafe fn st_global(addr: usize, value: Self) {
                    unsafe { ptr::write(addr as *mut Self, value) }
                }

                #[inline(always)]
                unsafe fn st_volatile_global(addr: usize, value: Self) {
                    unsafe { <$atomic>::from_ptr(addr as *mut Self) }.store(value, Ordering::Relaxed);
                }

                #[inline(always)]
                unsafe fn ld_shared(addr: u32) -> Self {
                    unsafe { Self::ld_global(scratch::resolve(addr)) }
                }

                #[inline(always)]
                unsafe fn ld_volatile_shared(addr: u32) -> Self {
                    unsafe { Self::ld_volatile_global(scratch::resolve(addr)) }
                }

                #[inline(always)]
                unsafe fn st_shared(addr: u32, value: Self) {
                    unsafe { Self::st_global(scratch::resolve(addr), value) }
                }

                #[inline(always)]
                unsafe fn st_volatile_shared(addr: u32, value: Self) {
                    unsafe { Self::st_volatile_global(scratch::resolve(addr), value) }
                }
            }
        )*
    };
}

define_ld_st!(u8 => AtomicU8, u16 => AtomicU16, u32 => AtomicU32, u64 => AtomicU64);

/// The two 8-byte halves of a 16-byte access
///
/// # Safety
/// `addr` must be 16-byte aligned and valid for 16 bytes.
#[inline(always)]
unsafe fn halves<'a>(addr: usize) -> (&'a AtomicU64, &'a AtomicU64) {
    let base = addr as *mut u64;
    unsafe { (AtomicU64::from_ptr(base), AtomicU64::from_ptr(base.add(1))) }
}

impl NativeAccess for Ulong2 {
    #[inline(always)]
    unsafe fn ld_global(addr: usize) -> Self {
        unsafe { ptr::read(addr as *const Self) }
    }

    #[inline(always)]
    unsafe fn ld_volatile_global(addr: usize) -> Self {
        let (lo, hi) = unsafe { halves(addr) };
        Ulong2 {
            x: lo.load(Ordering::Relaxed),
            y: hi.load(Ordering::Relaxed),
        }
    }

    #[inline(always)]
    unsafe fn st_global(addr: usize, value: Self) {
        unsafe { ptr::write(addr as *mut Self, value) }
    }

    #[inline(always)]
    unsafe fn st_volatile_global(addr: usize, value: Self) {
        let (lo, hi) = unsafe { halves(addr) };
        lo.store(value.x, Ordering::Relaxed);
        hi.store(value.y, Ordering::Relaxed);
    }

    #[inline(always)]
    unsafe fn ld_shared(addr: u32) -> Self {
        unsafe { Self::ld_global(scratch::resolve(addr)) }
    }

    #[inline(always)]
    unsafe fn ld_volatile_shared(addr: u32) -> Self {
        unsafe { Self::ld_volatile_global(scratch::resolve(addr)) }
    }

    #[inline(always)]
    unsafe fn st_shared(addr: u32, value: Self) {
        unsafe { Self::st_global(scratch::resolve(addr), value) }
    }

    #[inline(always)]
    unsafe fn st_volatile_shared(addr: u32, value: Self) {
        unsafe { Self::st_volatile_global(scratch::resolve(addr), value) }
    }
}

/// Low 32 bits of `hi:lo >> (shift & 31)`
#[inline(always)]
pub(crate) fn funnel_shift_r(lo: u32, hi: u32, shift: u32) -> u32 {
    let wide = (u64::from(hi) << 32) | u64::from(lo);
    (wide >> (shift & 31)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_funnel_shift() {
        assert_eq!(funnel_shift_r(0x4433_2211, 0x8877_6655, 0), 0x4433_2211);
        assert_eq!(funnel_shift_r(0x4433_2211, 0x8877_6655, 8), 0x5544_3322);
        assert_eq!(funnel_shift_r(0x4433_2211, 0x8877_6655, 24), 0x7766_5544);
        // Shift amount wraps at 32
        assert_eq!(funnel_shift_r(0x4433_2211, 0x8877_6655, 40), 0x5544_3322);
    }
}
