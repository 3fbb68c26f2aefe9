//! # Host Emulation Backend
//!
//! Runs the device primitives on the host CPU so the rest of the runtime can
//! be exercised without a GPU.
//!
//! ## Mapping
//!
//! - Global addresses are process virtual addresses.
//! - Shared addresses are 32-bit offsets into the [`ScratchWindow`] bound to
//!   the calling thread. Threads emulating one block bind the same window.
//! - Plain accesses are ordinary reads/writes. Volatile accesses are relaxed
//!   atomics of the same width, so other threads may poll them. The 16-byte
//!   volatile forms are two relaxed 8-byte atomics, matching the device's
//!   per-half atomicity.
//! - Ordered accesses use `AtomicU64`; the emulated tier replaces acquire and
//!   release with relaxed accesses bracketed by `SeqCst` fences.
//! - There is no multicast fabric: multicast stores are no-ops.

mod access;
mod cvta;
mod multimem;
pub(crate) mod ordered;
pub mod scratch;

pub(crate) use access::funnel_shift_r;
pub(crate) use cvta::{cvta_from_global, cvta_from_shared, cvta_to_global, cvta_to_shared};
pub use scratch::{ScratchArena, ScratchGuard, ScratchWindow};

/// Backend name reported by [`crate::capability`]
pub const BACKEND: &str = "host";
