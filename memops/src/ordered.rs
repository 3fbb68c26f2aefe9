//! # Ordered 64-bit Access
//!
//! Single 8-byte words read or written with a stated memory-model strength,
//! at system scope, for flags and counters shared between agents.
//!
//! | Operation                 | Native tier          | Fallback tier                   |
//! |---------------------------|----------------------|---------------------------------|
//! | `ld_volatile_u64`         | volatile load        | volatile load                   |
//! | `st_volatile_u64`         | volatile store       | volatile store                  |
//! | `ld_relaxed_sys_global`   | relaxed, sys scope   | volatile load                   |
//! | `st_relaxed_sys_global`   | relaxed, sys scope   | volatile store                  |
//! | `ld_acquire_sys_global`   | acquire, sys scope   | volatile load, then full fence  |
//! | `st_release_sys_global`   | release, sys scope   | full fence, then volatile store |
//!
//! The tier is fixed at build time; see [`crate::OrderingTier`].

use crate::arch::imp::ordered as imp;

/// Volatile 8-byte load
///
/// # Safety
/// `ptr` must be 8-byte aligned and point into global memory.
#[inline(always)]
pub unsafe fn ld_volatile_u64(ptr: *const u64) -> u64 {
    unsafe { imp::ld_volatile_u64(ptr) }
}

/// Volatile 8-byte store
///
/// # Safety
/// `ptr` must be 8-byte aligned and point into global memory.
#[inline(always)]
pub unsafe fn st_volatile_u64(ptr: *mut u64, val: u64) {
    unsafe { imp::st_volatile_u64(ptr, val) }
}

/// Relaxed system-scope 8-byte load
///
/// Never tears, imposes no ordering on surrounding accesses.
///
/// # Safety
/// `ptr` must be 8-byte aligned and point into global memory.
#[inline(always)]
pub unsafe fn ld_relaxed_sys_global(ptr: *const u64) -> u64 {
    unsafe { imp::ld_relaxed_sys_global(ptr) }
}

/// Relaxed system-scope 8-byte store
///
/// # Safety
/// `ptr` must be 8-byte aligned and point into global memory.
#[inline(always)]
pub unsafe fn st_relaxed_sys_global(ptr: *mut u64, val: u64) {
    unsafe { imp::st_relaxed_sys_global(ptr, val) }
}

/// Acquire system-scope 8-byte load
///
/// Later memory accesses of the calling thread are not performed before this
/// load. Pairs with [`st_release_sys_global`].
///
/// # Safety
/// `ptr` must be 8-byte aligned and point into global memory.
#[inline(always)]
pub unsafe fn ld_acquire_sys_global(ptr: *const u64) -> u64 {
    unsafe { imp::ld_acquire_sys_global(ptr) }
}

/// Release system-scope 8-byte store
///
/// Earlier memory accesses of the calling thread are visible to any agent that
/// observes this store with [`ld_acquire_sys_global`].
///
/// # Safety
/// `ptr` must be 8-byte aligned and point into global memory.
#[inline(always)]
pub unsafe fn st_release_sys_global(ptr: *mut u64, val: u64) {
    unsafe { imp::st_release_sys_global(ptr, val) }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(all(test, not(target_arch = "nvptx64")))]
mod tests {
    use core::cell::UnsafeCell;
    use std::thread;

    use super::*;
    use crate::access::{ld_global, ld_volatile_global, st_global, st_volatile_global};
    use crate::pack::BytePack;

    /// Cache-line sized slot shared between test threads
    #[repr(C, align(64))]
    struct Mailbox {
        payload: UnsafeCell<[u64; 2]>,
        flag: UnsafeCell<u64>,
    }

    // SAFETY: every access goes through the ordered primitives under test
    unsafe impl Sync for Mailbox {}

    impl Mailbox {
        fn new() -> Self {
            Self {
                payload: UnsafeCell::new([0; 2]),
                flag: UnsafeCell::new(0),
            }
        }

        fn payload_addr(&self) -> usize {
            self.payload.get() as usize
        }

        fn flag(&self) -> *mut u64 {
            self.flag.get()
        }
    }

    #[test]
    fn test_single_thread_round_trip() {
        let mailbox = Mailbox::new();
        let flag = mailbox.flag();
        unsafe {
            st_volatile_u64(flag, 1);
            assert_eq!(ld_volatile_u64(flag), 1);
            st_relaxed_sys_global(flag, 2);
            assert_eq!(ld_relaxed_sys_global(flag), 2);
            st_release_sys_global(flag, u64::MAX);
            assert_eq!(ld_acquire_sys_global(flag), u64::MAX);
            assert_eq!(ld_volatile_u64(flag), u64::MAX);
        }
    }

    #[test]
    fn test_release_acquire_publishes_payload() {
        const ROUNDS: u64 = 2_000;

        for round in 1..=ROUNDS {
            let mailbox = Mailbox::new();
            thread::scope(|scope| {
                scope.spawn(|| unsafe {
                    st_global::<8>(mailbox.payload_addr(), BytePack::from_native(round * 3));
                    st_release_sys_global(mailbox.flag(), round);
                });
                scope.spawn(|| unsafe {
                    while ld_acquire_sys_global(mailbox.flag()) != round {
                        core::hint::spin_loop();
                    }
                    let seen = ld_global::<8>(mailbox.payload_addr()).native();
                    assert_eq!(seen, round * 3, "round {}", round);
                });
            });
        }
    }

    #[test]
    fn test_wide_volatile_read_never_tears_a_half() {
        const SAMPLES: usize = 20_000;

        let mailbox = Mailbox::new();
        let lo = mailbox.payload_addr();
        let hi = lo + 8;

        let (writes, samples) = thread::scope(|scope| {
            let writer = scope.spawn(|| {
                let mut writes = 0u64;
                // Keep overwriting until the reader has taken every sample.
                while unsafe { ld_acquire_sys_global(mailbox.flag()) } == 0 {
                    // Every byte of a written word carries the same value.
                    let word = u64::from_ne_bytes([(writes % 251 + 1) as u8; 8]);
                    unsafe {
                        st_relaxed_sys_global(lo as *mut u64, word);
                        st_relaxed_sys_global(hi as *mut u64, !word);
                    }
                    writes += 1;
                }
                writes
            });
            let reader = scope.spawn(|| {
                // Sample only once the writer is running.
                while unsafe { ld_relaxed_sys_global(lo as *const u64) } == 0 {
                    core::hint::spin_loop();
                }
                let mut samples = 0usize;
                while samples < SAMPLES {
                    let pack = unsafe { ld_volatile_global::<16>(lo) };
                    for half in pack.u64s() {
                        let bytes = half.to_ne_bytes();
                        assert!(bytes.iter().all(|&b| b == bytes[0]), "torn half {:#x}", half);
                    }
                    samples += 1;
                }
                unsafe { st_release_sys_global(mailbox.flag(), 1) };
                samples
            });
            (writer.join().expect("writer"), reader.join().expect("reader"))
        });

        assert_eq!(samples, SAMPLES);
        assert!(writes > 0);
    }

    #[test]
    fn test_volatile_flag_polling_across_threads() {
        const ROUNDS: u64 = 500;

        for round in 1..=ROUNDS {
            let mailbox = Mailbox::new();
            let flag = mailbox.flag.get() as usize;
            thread::scope(|scope| {
                scope.spawn(|| unsafe {
                    st_volatile_global::<8>(flag, BytePack::from_native(round));
                });
                scope.spawn(|| {
                    while unsafe { ld_volatile_global::<8>(flag) }.native() != round {
                        core::hint::spin_loop();
                    }
                    assert_eq!(unsafe { ld_volatile_u64(flag as *const u64) }, round);
                });
            });
        }
    }
}
