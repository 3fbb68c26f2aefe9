//! # Sized Load/Store Dispatch
//!
//! Plain and volatile loads and stores of `BytePack<N>` in global and shared
//! memory, resolved at compile time to one native instruction:
//!
//! | N  | Instruction                  | Notes                              |
//! |----|------------------------------|------------------------------------|
//! | 0  | none                         | touches no memory, any address     |
//! | 1  | `ld/st.<space>.b8`           | through a 32-bit register          |
//! | 2  | `ld/st.<space>.b16`          |                                    |
//! | 4  | `ld/st.<space>.b32`          |                                    |
//! | 8  | `ld/st.<space>.b64`          |                                    |
//! | 16 | `ld/st.<space>.v2.b64`       | atomic per 8-byte half only        |
//!
//! Widths outside the set do not compile:
//!
//! ```compile_fail
//! let _ = unsafe { fabric_memops::ld_global::<3>(0) };
//! ```

use crate::arch::NativeAccess;
use crate::pack::{BytePack, SupportedWidth, Width};
use crate::space::{cvta_to_global, Space};

// =============================================================================
// PER-SPACE PRIMITIVES
// =============================================================================

macro_rules! define_access {
    ($($space:ident: $addr:ty),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = concat!("Plain ", stringify!($space), " load of `N` bytes")]
                ///
                /// # Safety
                /// `addr` must be mapped for `N` bytes and naturally aligned.
                #[inline(always)]
                pub unsafe fn [<ld_ $space>]<const N: usize>(addr: $addr) -> BytePack<N>
                where
                    Width<N>: SupportedWidth,
                {
                    let native = unsafe {
                        <<Width<N> as SupportedWidth>::Native as NativeAccess>::[<ld_ $space>](addr)
                    };
                    BytePack::from_native(native)
                }

                #[doc = concat!("Volatile ", stringify!($space), " load of `N` bytes")]
                ///
                /// # Safety
                /// `addr` must be mapped for `N` bytes and naturally aligned.
                #[inline(always)]
                pub unsafe fn [<ld_volatile_ $space>]<const N: usize>(addr: $addr) -> BytePack<N>
                where
                    Width<N>: SupportedWidth,
                {
                    let native = unsafe {
                        <<Width<N> as SupportedWidth>::Native as NativeAccess>::[<ld_volatile_ $space>](addr)
                    };
                    BytePack::from_native(native)
                }

                #[doc = concat!("Plain ", stringify!($space), " store of `N` bytes")]
                ///
                /// # Safety
                /// `addr` must be mapped for `N` bytes and naturally aligned.
                #[inline(always)]
                pub unsafe fn [<st_ $space>]<const N: usize>(addr: $addr, value: BytePack<N>)
                where
                    Width<N>: SupportedWidth,
                {
                    unsafe {
                        <<Width<N> as SupportedWidth>::Native as NativeAccess>::[<st_ $space>](addr, value.native())
                    }
                }

                #[doc = concat!("Volatile ", stringify!($space), " store of `N` bytes")]
                ///
                /// # Safety
                /// `addr` must be mapped for `N` bytes and naturally aligned.
                #[inline(always)]
                pub unsafe fn [<st_volatile_ $space>]<const N: usize>(addr: $addr, value: BytePack<N>)
                where
                    Width<N>: SupportedWidth,
                {
                    unsafe {
                        <<Width<N> as SupportedWidth>::Native as NativeAccess>::[<st_volatile_ $space>](addr, value.native())
                    }
                }
            )*
        }
    };
}

define_access!(global: usize, shared: u32);

// =============================================================================
// SPACE-GENERIC FORMS
// =============================================================================

/// Plain load of `N` bytes from space `S`
///
/// # Safety
/// `addr` must be mapped in `S` for `N` bytes and naturally aligned.
#[inline(always)]
pub unsafe fn load<S: Space, const N: usize>(addr: S::Addr) -> BytePack<N>
where
    Width<N>: SupportedWidth,
{
    unsafe { S::load::<N>(addr) }
}

/// Volatile load of `N` bytes from space `S`
///
/// # Safety
/// Same as [`load`].
#[inline(always)]
pub unsafe fn load_volatile<S: Space, const N: usize>(addr: S::Addr) -> BytePack<N>
where
    Width<N>: SupportedWidth,
{
    unsafe { S::load_volatile::<N>(addr) }
}

/// Plain store of `N` bytes to space `S`
///
/// # Safety
/// Same as [`load`].
#[inline(always)]
pub unsafe fn store<S: Space, const N: usize>(addr: S::Addr, value: BytePack<N>)
where
    Width<N>: SupportedWidth,
{
    unsafe { S::store::<N>(addr, value) }
}

/// Volatile store of `N` bytes to space `S`
///
/// # Safety
/// Same as [`load`].
#[inline(always)]
pub unsafe fn store_volatile<S: Space, const N: usize>(addr: S::Addr, value: BytePack<N>)
where
    Width<N>: SupportedWidth,
{
    unsafe { S::store_volatile::<N>(addr, value) }
}

// =============================================================================
// 128-BIT POINTER HELPERS
// =============================================================================

/// Volatile 16-byte global load through a generic pointer
///
/// # Safety
/// `ptr` must point to 16 readable, 16-byte aligned bytes of global memory.
#[inline(always)]
pub unsafe fn load_128(ptr: *const u64) -> (u64, u64) {
    let [v0, v1] = unsafe { ld_volatile_global::<16>(cvta_to_global(ptr)) }.u64s();
    (v0, v1)
}

/// Volatile 16-byte global store through a generic pointer
///
/// # Safety
/// `ptr` must point to 16 writable, 16-byte aligned bytes of global memory.
#[inline(always)]
pub unsafe fn store_128(ptr: *mut u64, v0: u64, v1: u64) {
    unsafe { st_volatile_global::<16>(cvta_to_global(ptr), BytePack::<16>::from_u64s([v0, v1])) }
}

/// Volatile 16-byte shared load
///
/// # Safety
/// `addr` must be a 16-byte aligned shared address valid for 16 bytes.
#[inline(always)]
pub unsafe fn load_shmem_128(addr: u32) -> (u64, u64) {
    let [v0, v1] = unsafe { ld_volatile_shared::<16>(addr) }.u64s();
    (v0, v1)
}

/// Volatile 16-byte shared store
///
/// # Safety
/// `addr` must be a 16-byte aligned shared address valid for 16 bytes.
#[inline(always)]
pub unsafe fn store_shmem_128(addr: u32, v0: u64, v1: u64) {
    unsafe { st_volatile_shared::<16>(addr, BytePack::<16>::from_u64s([v0, v1])) }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(all(test, not(target_arch = "nvptx64")))]
mod tests {
    use super::*;
    use crate::arch::host::ScratchArena;
    use crate::pack::{from_pack, to_pack, Ulong2};
    use crate::space::{cvta_to_shared, Global, Shared};

    /// 16-byte aligned global test buffer
    fn global_buffer() -> [Ulong2; 4] {
        [Ulong2::default(); 4]
    }

    macro_rules! round_trip_global {
        ($n:literal, $patterns:expr) => {{
            let mut buf = global_buffer();
            let addr = buf.as_mut_ptr() as usize;
            for bytes in $patterns {
                let pack = BytePack::<$n>::from_bytes(bytes);
                unsafe {
                    st_global::<$n>(addr, pack);
                    assert_eq!(ld_global::<$n>(addr), pack);
                    assert_eq!(ld_volatile_global::<$n>(addr), pack);
                    st_volatile_global::<$n>(addr, pack);
                    assert_eq!(ld_global::<$n>(addr), pack);
                }
            }
        }};
    }

    macro_rules! round_trip_shared {
        ($n:literal, $offset:expr, $patterns:expr) => {{
            let arena = ScratchArena::new(64).expect("arena");
            let _guard = arena.window().enter();
            for bytes in $patterns {
                let pack = BytePack::<$n>::from_bytes(bytes);
                unsafe {
                    st_shared::<$n>($offset, pack);
                    assert_eq!(ld_shared::<$n>($offset), pack);
                    assert_eq!(ld_volatile_shared::<$n>($offset), pack);
                    st_volatile_shared::<$n>($offset, pack);
                    assert_eq!(ld_shared::<$n>($offset), pack);
                }
            }
        }};
    }

    fn patterns<const N: usize>() -> impl Iterator<Item = [u8; N]> {
        [0x00u8, 0xff, 0x5a, 0xa5, 0x01, 0x80].into_iter().flat_map(|seed| {
            [
                core::array::from_fn(|_| seed),
                core::array::from_fn(|i| seed.wrapping_add((i as u8).wrapping_mul(37))),
                core::array::from_fn(|i| if i % 2 == 0 { seed } else { !seed }),
            ]
        })
    }

    #[test]
    fn test_round_trip_every_byte() {
        round_trip_global!(1, (0..=255u8).map(|b| [b]));
        round_trip_shared!(1, 3, (0..=255u8).map(|b| [b]));
    }

    #[test]
    fn test_round_trip_every_halfword() {
        round_trip_global!(2, (0..=u16::MAX).map(u16::to_le_bytes));
        round_trip_shared!(2, 6, (0..=u16::MAX).map(u16::to_le_bytes));
    }

    #[test]
    fn test_round_trip_wide() {
        round_trip_global!(4, patterns::<4>());
        round_trip_global!(8, patterns::<8>());
        round_trip_global!(16, patterns::<16>());
        round_trip_shared!(4, 12, patterns::<4>());
        round_trip_shared!(8, 24, patterns::<8>());
        round_trip_shared!(16, 32, patterns::<16>());
    }

    #[test]
    fn test_store_touches_only_its_width() {
        let mut buf = global_buffer();
        let base = buf.as_mut_ptr() as *mut u8;
        unsafe {
            st_global::<16>(base as usize, BytePack::from_bytes([0xee; 16]));
            st_global::<2>(base as usize + 4, to_pack(0x1234u16));
            assert_eq!(ld_global::<4>(base as usize).to_bytes(), [0xee; 4]);
            assert_eq!(ld_global::<4>(base as usize + 4).to_bytes(), [0x34, 0x12, 0xee, 0xee]);
        }
    }

    #[test]
    fn test_zero_width_touches_nothing() {
        // Never dereferenced: width 0 issues no instruction.
        for addr in [0usize, 1, 0xdead_beef, usize::MAX] {
            unsafe {
                assert_eq!(ld_global::<0>(addr), BytePack::zeroed());
                assert_eq!(ld_volatile_global::<0>(addr), BytePack::zeroed());
                st_global::<0>(addr, BytePack::zeroed());
                st_volatile_global::<0>(addr, BytePack::zeroed());
            }
        }
        for addr in [0u32, 7, u32::MAX] {
            unsafe {
                assert_eq!(ld_shared::<0>(addr), BytePack::zeroed());
                assert_eq!(ld_volatile_shared::<0>(addr), BytePack::zeroed());
                st_shared::<0>(addr, BytePack::zeroed());
                st_volatile_shared::<0>(addr, BytePack::zeroed());
            }
        }
    }

    #[test]
    fn test_space_generic_forms() {
        let mut buf = global_buffer();
        let addr = buf.as_mut_ptr() as usize;
        unsafe {
            store::<Global, 8>(addr, to_pack(-17i64));
            assert_eq!(from_pack::<i64>(load::<Global, 8>(addr)), -17);
            store_volatile::<Global, 4>(addr + 8, to_pack(2.5f32));
            assert_eq!(from_pack::<f32>(load_volatile::<Global, 4>(addr + 8)), 2.5);
        }

        let arena = ScratchArena::new(32).expect("arena");
        let _guard = arena.window().enter();
        let slot = cvta_to_shared(arena.as_mut_ptr().wrapping_add(16));
        unsafe {
            store::<Shared, 16>(slot, to_pack([1u32, 2, 3, 4]));
            assert_eq!(from_pack::<[u32; 4]>(load::<Shared, 16>(slot)), [1, 2, 3, 4]);
        }
    }

    #[test]
    fn test_128_bit_helpers() {
        let mut buf = global_buffer();
        let ptr = buf.as_mut_ptr() as *mut u64;
        unsafe {
            store_128(ptr, 0x0102_0304_0506_0708, 0x1112_1314_1516_1718);
            assert_eq!(load_128(ptr), (0x0102_0304_0506_0708, 0x1112_1314_1516_1718));
        }
        assert_eq!(buf[0], Ulong2 { x: 0x0102_0304_0506_0708, y: 0x1112_1314_1516_1718 });

        let arena = ScratchArena::new(48).expect("arena");
        let _guard = arena.window().enter();
        unsafe {
            store_shmem_128(32, u64::MAX, 3);
            assert_eq!(load_shmem_128(32), (u64::MAX, 3));
        }
    }
}
