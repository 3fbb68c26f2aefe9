//! # Misaligned Shared Reads
//!
//! Reconstructs 16 bytes starting at a shared-memory pointer whose alignment
//! is only that of its element type. Costs more than an aligned
//! `ld_shared::<16>`; use it only when the caller cannot guarantee 16-byte
//! alignment.

use core::mem::size_of;

use crate::access::ld_shared;
use crate::arch::imp;
use crate::pack::BytePack;
use crate::space::cvta_to_shared;

/// Read 16 bytes of shared memory starting at `ptr`
///
/// | `size_of::<T>()` | Reads                                                   |
/// |------------------|---------------------------------------------------------|
/// | 1, 2             | five aligned 4-byte words, merged by a funnel shift     |
/// | 4                | four 4-byte words                                       |
/// | 8                | two 8-byte words                                        |
///
/// Any other element size fails to compile.
///
/// # Safety
///
/// - `ptr` must point into the calling block's shared memory and be aligned to
///   `align_of::<T>()` (only byte alignment for 1- and 2-byte elements).
/// - For elements under 4 bytes, the 20 bytes starting at `ptr & !3` must be
///   mapped; otherwise the 16 bytes starting at `ptr`.
#[inline(always)]
pub unsafe fn ld_shared_misaligned_128<T>(ptr: *const T) -> BytePack<16> {
    const {
        assert!(
            matches!(size_of::<T>(), 1 | 2 | 4 | 8),
            "misaligned shared reads take 1, 2, 4 or 8 byte elements"
        )
    };

    let addr = cvta_to_shared(ptr);
    match size_of::<T>() {
        1 | 2 => {
            let shift = 8 * (addr % 4);
            // Each lane is the 4 bytes straddling two adjacent aligned words.
            let words = lane_offsets::<5>(addr & !3, 4).map(|word| unsafe { ld_shared::<4>(word) }.native());
            BytePack::<16>::from_u32s(core::array::from_fn(|e| {
                imp::funnel_shift_r(words[e], words[e + 1], shift)
            }))
        },
        4 => {
            let lanes = lane_offsets::<4>(addr, 4).map(|lane| unsafe { ld_shared::<4>(lane) }.native());
            BytePack::<16>::from_u32s(lanes)
        },
        _ => {
            let lanes = lane_offsets::<2>(addr, 8).map(|lane| unsafe { ld_shared::<8>(lane) }.native());
            BytePack::<16>::from_u64s(lanes)
        },
    }
}

/// `K` shared offsets `stride` bytes apart, wrapping like device address math
#[inline(always)]
fn lane_offsets<const K: usize>(start: u32, stride: u32) -> [u32; K] {
    core::array::from_fn(|e| start.wrapping_add(stride.wrapping_mul(e as u32)))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(all(test, not(target_arch = "nvptx64")))]
mod tests {
    use super::*;
    use crate::arch::host::ScratchArena;

    const ARENA_BYTES: usize = 64;

    fn byte_at(i: usize) -> u8 {
        (i as u8).wrapping_mul(29).wrapping_add(7)
    }

    /// Arena filled with a position-dependent byte pattern
    fn patterned_arena() -> ScratchArena {
        let arena = ScratchArena::new(ARENA_BYTES).expect("arena");
        for i in 0..ARENA_BYTES {
            unsafe { arena.as_mut_ptr().add(i).write(byte_at(i)) };
        }
        arena
    }

    fn reference(offset: usize) -> [u8; 16] {
        core::array::from_fn(|i| byte_at(offset + i))
    }

    #[test]
    fn test_lane_offsets_wrap_at_shared_limit() {
        assert_eq!(lane_offsets::<5>(u32::MAX - 7, 4), [u32::MAX - 7, u32::MAX - 3, 0, 4, 8]);
        assert_eq!(lane_offsets::<2>(u32::MAX - 7, 8), [u32::MAX - 7, 0]);
        assert_eq!(lane_offsets::<4>(16, 4), [16, 20, 24, 28]);
    }

    #[test]
    fn test_byte_elements_every_offset() {
        let arena = patterned_arena();
        let _guard = arena.window().enter();
        for offset in 0..16 {
            let ptr = arena.as_mut_ptr().wrapping_add(offset) as *const u8;
            let pack = unsafe { ld_shared_misaligned_128(ptr) };
            assert_eq!(pack.to_bytes(), reference(offset), "offset {}", offset);
        }
    }

    #[test]
    fn test_halfword_elements_every_offset() {
        let arena = patterned_arena();
        let _guard = arena.window().enter();
        for offset in 0..16 {
            let ptr = arena.as_mut_ptr().wrapping_add(offset) as *const u16;
            let pack = unsafe { ld_shared_misaligned_128(ptr) };
            assert_eq!(pack.to_bytes(), reference(offset), "offset {}", offset);
        }
    }

    #[test]
    fn test_word_elements() {
        let arena = patterned_arena();
        let _guard = arena.window().enter();
        for offset in (0..16).step_by(4) {
            let ptr = arena.as_mut_ptr().wrapping_add(offset) as *const u32;
            let pack = unsafe { ld_shared_misaligned_128(ptr) };
            assert_eq!(pack.to_bytes(), reference(offset), "offset {}", offset);
        }
    }

    #[test]
    fn test_doubleword_elements() {
        let arena = patterned_arena();
        let _guard = arena.window().enter();
        for offset in [0, 8] {
            let ptr = arena.as_mut_ptr().wrapping_add(offset) as *const f64;
            let pack = unsafe { ld_shared_misaligned_128(ptr) };
            assert_eq!(pack.to_bytes(), reference(offset), "offset {}", offset);
        }
    }
}
