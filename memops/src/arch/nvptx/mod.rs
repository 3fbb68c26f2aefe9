//! # NVPTX Backend
//!
//! Inline PTX for device builds.
//!
//! ## Tiers
//!
//! ```text
//! ┌──────────────────────┬──────────────────────────┬──────────────────────────┐
//! │ Operation            │ memops_native_ordering   │ fallback                 │
//! ├──────────────────────┼──────────────────────────┼──────────────────────────┤
//! │ relaxed load/store   │ ld/st.relaxed.sys        │ ld/st.volatile           │
//! │ acquire load         │ ld.acquire.sys           │ ld.volatile; membar.sys  │
//! │ release store        │ st.release.sys           │ membar.sys; st.volatile  │
//! │ system fence         │ fence.acq_rel.sys        │ membar.sys               │
//! │ device fence         │ fence.acq_rel.gpu        │ membar.gl                │
//! ├──────────────────────┼──────────────────────────┼──────────────────────────┤
//! │                      │ memops_multimem          │ fallback                 │
//! ├──────────────────────┼──────────────────────────┼──────────────────────────┤
//! │ multicast store      │ multimem.st.global       │ no-op                    │
//! └──────────────────────┴──────────────────────────┴──────────────────────────┘
//! ```

mod access;
mod cvta;
mod multimem;
pub(crate) mod ordered;

pub(crate) use access::funnel_shift_r;
pub(crate) use cvta::{cvta_from_global, cvta_from_shared, cvta_to_global, cvta_to_shared};

/// Backend name reported by [`crate::capability`]
pub const BACKEND: &str = "nvptx";
