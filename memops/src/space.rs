//! # Memory Spaces
//!
//! Global (device-wide) and shared (per-block scratch) memory, plus
//! conversion between generic pointers and space-qualified addresses.
//!
//! Addresses carry no space tag: a `usize` is a global address and a `u32` is
//! a shared offset only because of the function they are passed to. Passing an
//! address to the wrong space is undefined and never detected.

use core::fmt;

use crate::access;
use crate::arch::imp;
use crate::pack::{BytePack, SupportedWidth, Width};

// =============================================================================
// ADDRESS CONVERSION
// =============================================================================

/// Global address of a generic pointer
///
/// The pointer must already point into global memory.
#[inline(always)]
pub fn cvta_to_global<T>(ptr: *const T) -> usize {
    imp::cvta_to_global(ptr)
}

/// Shared address of a generic pointer
///
/// The pointer must already point into the calling block's shared memory.
#[inline(always)]
pub fn cvta_to_shared<T>(ptr: *const T) -> u32 {
    imp::cvta_to_shared(ptr)
}

/// Generic pointer for a global address
#[inline(always)]
pub fn cvta_from_global<T>(addr: usize) -> *mut T {
    imp::cvta_from_global(addr)
}

/// Generic pointer for a shared address
#[inline(always)]
pub fn cvta_from_shared<T>(addr: u32) -> *mut T {
    imp::cvta_from_shared(addr)
}

// =============================================================================
// SPACE TRAIT
// =============================================================================

mod sealed {
    pub trait Sealed {}
}

/// A memory space with its own address representation
pub trait Space: sealed::Sealed + Copy + fmt::Debug {
    /// Address representation in this space
    type Addr: Copy + Eq + fmt::Debug;

    /// Space name as used in PTX (`global`, `shared`)
    const NAME: &'static str;

    /// Address of a generic pointer in this space
    fn to_space<T>(ptr: *const T) -> Self::Addr;

    /// Generic pointer for an address in this space
    fn from_space<T>(addr: Self::Addr) -> *mut T;

    /// Plain load of `N` bytes
    ///
    /// # Safety
    /// `addr` must be mapped in this space for `N` bytes and naturally aligned.
    unsafe fn load<const N: usize>(addr: Self::Addr) -> BytePack<N>
    where
        Width<N>: SupportedWidth;

    /// Volatile load of `N` bytes
    ///
    /// # Safety
    /// Same as [`Space::load`].
    unsafe fn load_volatile<const N: usize>(addr: Self::Addr) -> BytePack<N>
    where
        Width<N>: SupportedWidth;

    /// Plain store of `N` bytes
    ///
    /// # Safety
    /// Same as [`Space::load`].
    unsafe fn store<const N: usize>(addr: Self::Addr, value: BytePack<N>)
    where
        Width<N>: SupportedWidth;

    /// Volatile store of `N` bytes
    ///
    /// # Safety
    /// Same as [`Space::load`].
    unsafe fn store_volatile<const N: usize>(addr: Self::Addr, value: BytePack<N>)
    where
        Width<N>: SupportedWidth;
}

/// Device-wide memory, addressed by `usize`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Global;

/// Per-block scratch memory, addressed by a `u32` offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shared;

macro_rules! impl_space {
    ($space:ident, $addr:ty, $name:ident) => {
        impl sealed::Sealed for $space {}

        paste::paste! {
            impl Space for $space {
                type Addr = $addr;

                const NAME: &'static str = stringify!($name);

                #[inline(always)]
                fn to_space<T>(ptr: *const T) -> $addr {
                    [<cvta_to_ $name>](ptr)
                }

                #[inline(always)]
                fn from_space<T>(addr: $addr) -> *mut T {
                    [<cvta_from_ $name>](addr)
                }

                #[inline(always)]
                unsafe fn load<const N: usize>(addr: $addr) -> BytePack<N>
                where
                    Width<N>: SupportedWidth,
                {
                    unsafe { access::[<ld_ $name>]::<N>(addr) }
                }

                #[inline(always)]
                unsafe fn load_volatile<const N: usize>(addr: $addr) -> BytePack<N>
                where
                    Width<N>: SupportedWidth,
                {
                    unsafe { access::[<ld_volatile_ $name>]::<N>(addr) }
                }

                #[inline(always)]
                unsafe fn store<const N: usize>(addr: $addr, value: BytePack<N>)
                where
                    Width<N>: SupportedWidth,
                {
                    unsafe { access::[<st_ $name>]::<N>(addr, value) }
                }

                #[inline(always)]
                unsafe fn store_volatile<const N: usize>(addr: $addr, value: BytePack<N>)
                where
                    Width<N>: SupportedWidth,
                {
                    unsafe { access::[<st_volatile_ $name>]::<N>(addr, value) }
                }
            }
        }
    };
}

impl_space!(Global, usize, global);
impl_space!(Shared, u32, shared);

// =============================================================================
// TESTS
// =============================================================================

#[cfg(all(test, not(target_arch = "nvptx64")))]
mod tests {
    use super::*;
    use crate::arch::host::ScratchArena;

    #[test]
    fn test_global_conversion_round_trip() {
        let value = 7u64;
        let ptr = &value as *const u64;
        let addr = cvta_to_global(ptr);
        assert_eq!(cvta_from_global::<u64>(addr) as *const u64, ptr);
        assert_eq!(Global::to_space(ptr), addr);
    }

    #[test]
    fn test_shared_conversion_within_window() {
        let arena = ScratchArena::new(256).expect("arena");
        let _guard = arena.window().enter();

        let ptr = arena.as_mut_ptr().wrapping_add(40);
        assert_eq!(cvta_to_shared(ptr), 40);
        assert_eq!(cvta_from_shared::<u8>(40), ptr);
        assert_eq!(Shared::from_space::<u8>(Shared::to_space(ptr)), ptr);
    }

    #[test]
    fn test_space_names() {
        assert_eq!(Global::NAME, "global");
        assert_eq!(Shared::NAME, "shared");
    }
}
