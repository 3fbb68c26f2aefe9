//! # Memory Fences
//!
//! Acquire-release fences at system and device scope. Older hardware falls back
//! to the full memory barrier of the same scope.

use crate::arch::imp::ordered as imp;

/// Acquire-release fence at system scope
///
/// Orders the calling thread's accesses as observed by every agent in the
/// system, host and peer devices included.
#[inline(always)]
pub fn fence_acq_rel_sys() {
    imp::fence_acq_rel_sys();
}

/// Acquire-release fence at device scope
///
/// Orders the calling thread's accesses as observed by other threads on the
/// same device.
#[inline(always)]
pub fn fence_acq_rel_gpu() {
    imp::fence_acq_rel_gpu();
}

#[cfg(all(test, not(target_arch = "nvptx64")))]
mod tests {
    use core::sync::atomic::{AtomicU64, Ordering};
    use std::thread;

    use super::*;

    #[test]
    fn test_fences_order_relaxed_message_passing() {
        const ROUNDS: u64 = 2_000;

        for round in 1..=ROUNDS {
            let payload = AtomicU64::new(0);
            let flag = AtomicU64::new(0);
            thread::scope(|scope| {
                scope.spawn(|| {
                    payload.store(round, Ordering::Relaxed);
                    fence_acq_rel_sys();
                    flag.store(1, Ordering::Relaxed);
                });
                scope.spawn(|| {
                    while flag.load(Ordering::Relaxed) == 0 {
                        core::hint::spin_loop();
                    }
                    fence_acq_rel_gpu();
                    assert_eq!(payload.load(Ordering::Relaxed), round);
                });
            });
        }
    }
}
