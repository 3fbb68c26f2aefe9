//! # Scratch Windows
//!
//! Host stand-in for per-block shared memory.
//!
//! A [`ScratchWindow`] is a 16-byte aligned byte range. While a thread holds
//! the [`ScratchGuard`] returned by [`ScratchWindow::enter`], shared addresses
//! issued on that thread are offsets from the window base. Unbound threads
//! resolve shared addresses against base zero.

use core::cell::Cell;
use core::marker::PhantomData;
use core::ptr::{self, NonNull};

use crate::error::{Error, Result};
use crate::pack::Ulong2;

/// Alignment of every scratch window base
pub const SCRATCH_ALIGN: usize = 16;

std::thread_local! {
    static WINDOW_BASE: Cell<usize> = const { Cell::new(0) };
}

/// Generic address of shared offset `addr` on the calling thread
#[inline(always)]
pub(crate) fn resolve(addr: u32) -> usize {
    WINDOW_BASE.with(|base| base.get()).wrapping_add(addr as usize)
}

/// Shared offset of generic address `ptr` on the calling thread
#[inline(always)]
pub(crate) fn offset_of(ptr: usize) -> u32 {
    ptr.wrapping_sub(WINDOW_BASE.with(|base| base.get())) as u32
}

// =============================================================================
// SCRATCH WINDOW
// =============================================================================

/// A byte range standing in for one block's shared memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScratchWindow {
    base: NonNull<u8>,
    len: u32,
}

// SAFETY: the window is only an address range; access goes through the
// unsafe primitives whose callers own the synchronization.
unsafe impl Send for ScratchWindow {}
// SAFETY: see above
unsafe impl Sync for ScratchWindow {}

impl ScratchWindow {
    /// Describe `len` bytes at `base` as a scratch window
    pub fn new(base: *mut u8, len: usize) -> Result<Self> {
        let base = NonNull::new(base).ok_or(Error::NullScratch)?;
        let addr = base.as_ptr() as usize;
        if addr % SCRATCH_ALIGN != 0 {
            return Err(Error::ScratchMisaligned(addr));
        }
        let len = u32::try_from(len).map_err(|_| Error::ScratchTooLarge(len))?;
        Ok(Self { base, len })
    }

    /// Base pointer
    #[inline]
    pub fn base(&self) -> *mut u8 {
        self.base.as_ptr()
    }

    /// Length in bytes
    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Whether the window is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `ptr` lies inside the window
    pub fn contains<T>(&self, ptr: *const T) -> bool {
        let addr = ptr as usize;
        let base = self.base() as usize;
        addr >= base && addr - base < self.len as usize
    }

    /// Bind this window to the calling thread
    ///
    /// The previous binding is restored when the guard drops.
    pub fn enter(&self) -> ScratchGuard {
        let base = self.base() as usize;
        let previous = WINDOW_BASE.with(|cell| cell.replace(base));
        log::trace!("scratch window {:#x}+{} bound", base, self.len);
        ScratchGuard {
            previous,
            _thread: PhantomData,
        }
    }
}

/// Thread binding of a [`ScratchWindow`]
#[derive(Debug)]
#[must_use = "the window is unbound when the guard drops"]
pub struct ScratchGuard {
    previous: usize,
    // Bindings are per thread.
    _thread: PhantomData<*const ()>,
}

impl Drop for ScratchGuard {
    fn drop(&mut self) {
        WINDOW_BASE.with(|cell| cell.set(self.previous));
    }
}

// =============================================================================
// SCRATCH ARENA
// =============================================================================

/// Owned, zero-initialized, 16-byte aligned scratch storage
#[derive(Debug)]
pub struct ScratchArena {
    chunks: NonNull<Ulong2>,
    len: usize,
}

// SAFETY: the arena owns its allocation; concurrent access is mediated by
// the unsafe primitives.
unsafe impl Send for ScratchArena {}
// SAFETY: see above
unsafe impl Sync for ScratchArena {}

impl ScratchArena {
    /// Allocate `len` bytes, rounded up to a multiple of 16
    pub fn new(len: usize) -> Result<Self> {
        let chunk_count = len.div_ceil(SCRATCH_ALIGN);
        let len = chunk_count
            .checked_mul(SCRATCH_ALIGN)
            .filter(|&rounded| u32::try_from(rounded).is_ok())
            .ok_or(Error::ScratchTooLarge(len))?;
        let storage = std::vec![Ulong2::default(); chunk_count.max(1)].into_boxed_slice();
        // SAFETY: Box::into_raw never returns null
        let chunks = unsafe { NonNull::new_unchecked(std::boxed::Box::into_raw(storage) as *mut Ulong2) };
        log::debug!("scratch arena of {} bytes allocated", len);
        Ok(Self { chunks, len })
    }

    /// Base pointer
    #[inline]
    pub fn as_mut_ptr(&self) -> *mut u8 {
        self.chunks.as_ptr() as *mut u8
    }

    /// Length in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the arena is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Window covering the whole arena
    pub fn window(&self) -> ScratchWindow {
        ScratchWindow {
            base: self.chunks.cast(),
            len: self.len as u32,
        }
    }

    fn chunk_count(&self) -> usize {
        (self.len / SCRATCH_ALIGN).max(1)
    }
}

impl Drop for ScratchArena {
    fn drop(&mut self) {
        let slice = ptr::slice_from_raw_parts_mut(self.chunks.as_ptr(), self.chunk_count());
        // SAFETY: allocated by Box<[Ulong2]> with this exact length in `new`
        drop(unsafe { std::boxed::Box::from_raw(slice) });
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_validation() {
        let arena = ScratchArena::new(64).expect("arena");
        let base = arena.as_mut_ptr();

        assert_eq!(ScratchWindow::new(ptr::null_mut(), 16), Err(Error::NullScratch));
        assert_eq!(
            ScratchWindow::new(base.wrapping_add(4), 16),
            Err(Error::ScratchMisaligned(base as usize + 4))
        );
        let window = ScratchWindow::new(base, 64).expect("window");
        assert_eq!(window, arena.window());
        assert!(window.contains(base.wrapping_add(63)));
        assert!(!window.contains(base.wrapping_add(64)));
    }

    #[test]
    fn test_arena_rounds_up() {
        let arena = ScratchArena::new(20).expect("arena");
        assert_eq!(arena.len(), 32);
        assert_eq!(arena.as_mut_ptr() as usize % SCRATCH_ALIGN, 0);
    }

    #[test]
    fn test_arena_rejects_oversized_length() {
        assert_eq!(ScratchArena::new(usize::MAX).err(), Some(Error::ScratchTooLarge(usize::MAX)));
        let just_over = u32::MAX as usize + 1;
        assert_eq!(ScratchArena::new(just_over).err(), Some(Error::ScratchTooLarge(just_over)));
        // Rounding up past the 32-bit shared space is rejected too.
        assert_eq!(
            ScratchArena::new(u32::MAX as usize).err(),
            Some(Error::ScratchTooLarge(u32::MAX as usize))
        );
    }

    #[test]
    fn test_guard_restores_binding() {
        let outer = ScratchArena::new(32).expect("arena");
        let inner = ScratchArena::new(32).expect("arena");
        let outer_base = outer.as_mut_ptr() as usize;

        let _outer_guard = outer.window().enter();
        assert_eq!(resolve(8), outer_base + 8);
        {
            let _inner_guard = inner.window().enter();
            assert_eq!(resolve(8), inner.as_mut_ptr() as usize + 8);
            assert_eq!(offset_of(inner.as_mut_ptr() as usize + 12), 12);
        }
        assert_eq!(resolve(8), outer_base + 8);
    }
}
