//! # Architecture Backends
//!
//! One complete implementation per target, selected at compile time:
//!
//! - [`nvptx`]: inline PTX for `nvptx64` device builds
//! - [`host`]: emulation on the host CPU, used for tests and host tooling
//!
//! Inside each backend the hardware-generation tier (native ordered forms vs.
//! volatile + fence) is fixed by cfgs from the build script.

cfg_if::cfg_if! {
    if #[cfg(target_arch = "nvptx64")] {
        pub mod nvptx;
        pub(crate) use nvptx as imp;
    } else {
        pub mod host;
        pub(crate) use host as imp;
    }
}

/// Single-instruction access table for one native register type
///
/// Implemented by each backend for `()`, `u8`, `u16`, `u32`, `u64` and
/// [`Ulong2`](crate::Ulong2). The sized dispatch in [`crate::access`] routes
/// every `BytePack<N>` operation through this table.
///
/// # Safety
///
/// All methods take raw addresses. The caller guarantees the address is
/// mapped in the named space for the full width and naturally aligned.
pub trait NativeAccess: Copy {
    /// Plain global load
    ///
    /// # Safety
    /// See trait docs.
    unsafe fn ld_global(addr: usize) -> Self;

    /// Volatile global load
    ///
    /// # Safety
    /// See trait docs.
    unsafe fn ld_volatile_global(addr: usize) -> Self;

    /// Plain global store
    ///
    /// # Safety
    /// See trait docs.
    unsafe fn st_global(addr: usize, value: Self);

    /// Volatile global store
    ///
    /// # Safety
    /// See trait docs.
    unsafe fn st_volatile_global(addr: usize, value: Self);

    /// Plain shared load
    ///
    /// # Safety
    /// See trait docs.
    unsafe fn ld_shared(addr: u32) -> Self;

    /// Volatile shared load
    ///
    /// # Safety
    /// See trait docs.
    unsafe fn ld_volatile_shared(addr: u32) -> Self;

    /// Plain shared store
    ///
    /// # Safety
    /// See trait docs.
    unsafe fn st_shared(addr: u32, value: Self);

    /// Volatile shared store
    ///
    /// # Safety
    /// See trait docs.
    unsafe fn st_volatile_shared(addr: u32, value: Self);
}

/// Multicast store for one native register type
///
/// On targets without the multicast fabric every implementation is a no-op.
///
/// # Safety
///
/// `addr` must be a multicast virtual address mapped for the full width.
pub trait MulticastStore: Copy {
    /// Store broadcast to every device behind `addr`
    ///
    /// # Safety
    /// See trait docs.
    unsafe fn multimem_st_global(addr: usize, value: Self);
}

/// Implements [`MulticastStore`] as a silent no-op
macro_rules! noop_multicast {
    ($($native:ty),* $(,)?) => {
        $(
            impl $crate::arch::MulticastStore for $native {
                #[inline(always)]
                unsafe fn multimem_st_global(_addr: usize, _value: Self) {}
            }
        )*
    };
}

pub(crate) use noop_multicast;

// Zero-width accesses touch nothing on every backend.
noop_multicast!(());

impl NativeAccess for () {
    #[inline(always)]
    unsafe fn ld_global(_addr: usize) -> Self {}

    #[inline(always)]
    unsafe fn ld_volatile_global(_addr: usize) -> Self {}

    #[inline(always)]
    unsafe fn st_global(_addr: usize, _value: Self) {}

    #[inline(always)]
    unsafe fn st_volatile_global(_addr: usize, _value: Self) {}

    #[inline(always)]
    unsafe fn ld_shared(_addr: u32) -> Self {}

    #[inline(always)]
    unsafe fn ld_volatile_shared(_addr: u32) -> Self {}

    #[inline(always)]
    unsafe fn st_shared(_addr: u32, _value: Self) {}

    #[inline(always)]
    unsafe fn st_volatile_shared(_addr: u32, _value: Self) {}
}
