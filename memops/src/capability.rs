//! # Build Capabilities
//!
//! Which instruction forms this build of the crate uses, as resolved by the
//! build script from the target's hardware generation and PTX ISA version.
//! Every value here is a compile-time constant; querying it costs nothing.

use core::fmt;

use bitflags::bitflags;

use crate::arch::imp;

bitflags! {
    /// Instruction forms available to this build
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u32 {
        /// Accesses are issued as device instructions rather than emulated
        const DEVICE_ASM      = 1 << 0;
        /// Relaxed, acquire and release accesses have native forms
        const NATIVE_ORDERING = 1 << 1;
        /// Scoped acquire-release fences have native forms
        const NATIVE_FENCES   = 1 << 2;
        /// Multicast stores reach the fabric instead of compiling to nothing
        const MULTIMEM_STORE  = 1 << 3;
    }
}

/// Capabilities of this build
pub const fn capabilities() -> Capabilities {
    let mut caps = Capabilities::empty();
    if cfg!(target_arch = "nvptx64") {
        caps = caps.union(Capabilities::DEVICE_ASM);
    }
    if cfg!(memops_native_ordering) {
        caps = caps.union(Capabilities::NATIVE_ORDERING).union(Capabilities::NATIVE_FENCES);
    }
    if cfg!(memops_multimem) {
        caps = caps.union(Capabilities::MULTIMEM_STORE);
    }
    caps
}

/// How ordered accesses and fences are realized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderingTier {
    /// Dedicated relaxed/acquire/release forms and `fence.acq_rel`
    Native,
    /// Volatile accesses bracketed by full memory barriers
    Emulated,
}

impl OrderingTier {
    /// Tier selected for this build
    pub const fn current() -> Self {
        if cfg!(memops_native_ordering) {
            Self::Native
        } else {
            Self::Emulated
        }
    }
}

impl fmt::Display for OrderingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Emulated => write!(f, "emulated"),
        }
    }
}

/// Hardware generation and PTX ISA version the build was resolved against
///
/// Both are `None` when the build script found neither a target feature nor
/// an override (always the case for plain host builds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetInfo {
    /// Compute capability as `major * 10 + minor`, e.g. `90` for sm_90
    pub sm: Option<u32>,
    /// PTX ISA version as `major * 10 + minor`, e.g. `81` for PTX 8.1
    pub ptx: Option<u32>,
}

impl TargetInfo {
    /// Values recorded by the build script
    pub const fn current() -> Self {
        Self {
            sm: parse_version(option_env!("MEMOPS_SM_VERSION")),
            ptx: parse_version(option_env!("MEMOPS_PTX_VERSION")),
        }
    }
}

impl fmt::Display for TargetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sm {
            Some(sm) => write!(f, "sm_{}", sm)?,
            None => write!(f, "sm_?")?,
        }
        match self.ptx {
            Some(ptx) => write!(f, " ptx{}", ptx),
            None => write!(f, " ptx?"),
        }
    }
}

/// Decimal version from a build-script environment value
const fn parse_version(value: Option<&str>) -> Option<u32> {
    let bytes = match value {
        Some(value) => value.as_bytes(),
        None => return None,
    };
    if bytes.is_empty() {
        return None;
    }
    let mut acc: u32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let digit = bytes[i];
        if !digit.is_ascii_digit() {
            return None;
        }
        acc = match acc.checked_mul(10) {
            Some(v) => match v.checked_add((digit - b'0') as u32) {
                Some(v) => v,
                None => return None,
            },
            None => return None,
        };
        i += 1;
    }
    Some(acc)
}

/// Log the backend and the instruction forms in use
///
/// Intended for one call at runtime start-up.
pub fn log_capabilities() {
    let caps = capabilities();
    log::info!(
        "memops: backend={} target={} ordering={} caps={:?}",
        imp::BACKEND,
        TargetInfo::current(),
        OrderingTier::current(),
        caps
    );
    if !caps.contains(Capabilities::MULTIMEM_STORE) {
        log::debug!("memops: multicast stores compile to no-ops in this build");
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(all(test, not(target_arch = "nvptx64")))]
mod tests {
    use super::*;

    #[test]
    fn test_host_capabilities() {
        let caps = capabilities();
        assert!(!caps.contains(Capabilities::DEVICE_ASM));
        assert!(!caps.contains(Capabilities::MULTIMEM_STORE));
        assert_eq!(
            caps.contains(Capabilities::NATIVE_ORDERING),
            OrderingTier::current() == OrderingTier::Native
        );
        assert_eq!(
            caps.contains(Capabilities::NATIVE_ORDERING),
            caps.contains(Capabilities::NATIVE_FENCES)
        );
    }

    #[test]
    fn test_ordering_tier_follows_feature() {
        let expected = if cfg!(feature = "emulated-ordering") {
            OrderingTier::Emulated
        } else {
            OrderingTier::Native
        };
        assert_eq!(OrderingTier::current(), expected);
    }

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version(Some("90")), Some(90));
        assert_eq!(parse_version(Some("81")), Some(81));
        assert_eq!(parse_version(Some("")), None);
        assert_eq!(parse_version(Some("9a")), None);
        assert_eq!(parse_version(None), None);
    }

    #[test]
    fn test_target_info_display() {
        let info = TargetInfo { sm: Some(90), ptx: Some(81) };
        assert_eq!(std::format!("{}", info), "sm_90 ptx81");
        let unknown = TargetInfo { sm: None, ptx: None };
        assert_eq!(std::format!("{}", unknown), "sm_? ptx?");
    }

    #[test]
    fn test_log_capabilities_without_logger() {
        log_capabilities();
    }
}
