//! # Multicast Stores
//!
//! A multimem store writes one value through a multicast address to every
//! device bound to the multicast object. Without hardware and toolchain
//! support the store compiles to nothing: the caller must have arranged a
//! unicast fallback before reaching it.
//!
//! 1- and 2-byte values have no multicast form and go out as plain global
//! stores to the multicast address. 16-byte values are issued as four 32-bit
//! float lanes.

use crate::arch::MulticastStore;
use crate::pack::{BytePack, SupportedWidth, Width};

/// Store `value` through the multicast address `addr`
///
/// Does nothing when [`Capabilities::MULTIMEM_STORE`](crate::Capabilities)
/// is absent.
///
/// # Safety
/// `addr` must be a multicast address mapped for `N` bytes and naturally
/// aligned to `N`.
#[inline(always)]
pub unsafe fn multimem_st_global<const N: usize>(addr: usize, value: BytePack<N>)
where
    Width<N>: SupportedWidth,
{
    unsafe { <<Width<N> as SupportedWidth>::Native as MulticastStore>::multimem_st_global(addr, value.native()) }
}

#[cfg(all(test, not(target_arch = "nvptx64")))]
mod tests {
    use super::*;
    use crate::pack::Ulong2;

    macro_rules! assert_untouched {
        ($($n:literal),*) => {
            $(
                let mut buffer = [Ulong2 { x: 0x0102_0304_0506_0708, y: 0x1112_1314_1516_1718 }; 2];
                let before = buffer;
                let addr = buffer.as_mut_ptr() as usize;
                unsafe { multimem_st_global::<$n>(addr, BytePack::from_bytes([0xee; $n])) };
                assert_eq!(buffer, before, "{}-byte multicast store wrote host memory", $n);
            )*
        };
    }

    #[test]
    fn test_unsupported_multicast_is_noop() {
        assert_untouched!(0, 1, 2, 4, 8, 16);
    }
}
