//! # Fabric Memops
//!
//! Memory-access primitives underneath the data-movement kernels of the
//! collective-communication runtime.
//!
//! Every operation moves a fixed number of untyped bytes between a register
//! and one of two memory spaces:
//!
//! - **global**: device-wide memory, addressed by `usize`
//! - **shared**: per-block scratch memory, addressed by a `u32` offset
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                           FABRIC MEMOPS                              │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │  ┌────────────┐  ┌────────────┐  ┌────────────┐  ┌────────────────┐ │
//! │  │  BytePack  │  │   Space    │  │   Sized    │  │   Misaligned   │ │
//! │  │  BytePackOf│  │   cvta_*   │  │  ld / st   │  │   shared read  │ │
//! │  └────────────┘  └────────────┘  └────────────┘  └────────────────┘ │
//! │  ┌────────────┐  ┌────────────┐  ┌────────────┐                     │
//! │  │  Ordered   │  │   Fences   │  │  Multimem  │                     │
//! │  │  u64 words │  │ sys / gpu  │  │   stores   │                     │
//! │  └────────────┘  └────────────┘  └────────────┘                     │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │        arch::nvptx (inline PTX)    │    arch::host (emulation)       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Compile-time dispatch
//!
//! Widths are const generics restricted to the closed set
//! `{0, 1, 2, 4, 8, 16}`; anything else fails to compile. The hardware
//! generation is resolved once by the build script, which selects between the
//! native instruction forms and the volatile + fence fallbacks. Nothing in the
//! hot path branches at run time.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fabric_memops::{from_pack, ld_acquire_sys_global, ld_global, st_global, st_release_sys_global, to_pack};
//!
//! # unsafe fn producer(payload: usize, flag: *mut u64) {
//! // Producer lane: publish the payload, then release the flag.
//! unsafe {
//!     st_global::<8>(payload, to_pack(42.0f64));
//!     st_release_sys_global(flag, 1);
//! }
//! # }
//! # unsafe fn consumer(payload: usize, flag: *const u64) -> f64 {
//! // Consumer lane: acquire the flag, then trust the payload.
//! unsafe {
//!     while ld_acquire_sys_global(flag) == 0 {}
//!     from_pack::<f64>(ld_global::<8>(payload))
//! }
//! # }
//! ```
//!
//! ## Safety
//!
//! Address validity, space correctness and alignment are the caller's
//! obligation. None of the primitives check anything at run time.

#![no_std]
#![cfg_attr(target_arch = "nvptx64", feature(asm_experimental_arch))]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

#[cfg(not(target_arch = "nvptx64"))]
extern crate std;

#[cfg(all(not(target_arch = "nvptx64"), target_endian = "big"))]
compile_error!("the host emulation backend assumes little-endian lane layout");

pub mod access;
pub mod arch;
pub mod capability;
pub mod error;
pub mod fence;
pub mod misaligned;
pub mod multimem;
pub mod ordered;
pub mod pack;
pub mod space;

pub use access::{
    ld_global, ld_shared, ld_volatile_global, ld_volatile_shared, load, load_128, load_shmem_128,
    load_volatile, st_global, st_shared, st_volatile_global, st_volatile_shared, store, store_128,
    store_shmem_128, store_volatile,
};
pub use capability::{capabilities, log_capabilities, Capabilities, OrderingTier, TargetInfo};
pub use error::{Error, Result};
pub use fence::{fence_acq_rel_gpu, fence_acq_rel_sys};
pub use misaligned::ld_shared_misaligned_128;
pub use multimem::multimem_st_global;
pub use ordered::{
    ld_acquire_sys_global, ld_relaxed_sys_global, ld_volatile_u64, st_relaxed_sys_global,
    st_release_sys_global, st_volatile_u64,
};
pub use pack::{from_pack, to_pack, BytePack, BytePackOf, PackOf, PackWidth, SupportedWidth, Ulong2, Width};
pub use space::{cvta_from_global, cvta_from_shared, cvta_to_global, cvta_to_shared, Global, Shared, Space};

#[doc(hidden)]
pub mod __private {
    pub use static_assertions;
}
