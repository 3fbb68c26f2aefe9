//! # Target Capability Resolution
//!
//! Resolves the hardware generation (`sm_NN`) and PTX ISA version (`ptxNN`)
//! once per build and turns them into cfgs:
//!
//! - `memops_native_ordering`: relaxed/acquire/release loads and stores and
//!   `fence.acq_rel` exist natively (sm_70+). Always set on host targets
//!   unless the `emulated-ordering` feature is enabled.
//! - `memops_multimem`: multicast stores exist (sm_90+ with PTX ISA 8.1+,
//!   shipped with CUDA 12.1).
//!
//! `MEMOPS_SM` and `MEMOPS_PTX` override the values read from the target
//! features.

use std::env;

const NATIVE_ORDERING_MIN_SM: u32 = 70;
const MULTIMEM_MIN_SM: u32 = 90;
const MULTIMEM_MIN_PTX: u32 = 81;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=MEMOPS_SM");
    println!("cargo:rerun-if-env-changed=MEMOPS_PTX");
    println!("cargo:rustc-check-cfg=cfg(memops_native_ordering)");
    println!("cargo:rustc-check-cfg=cfg(memops_multimem)");

    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let features = env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();
    let device = arch == "nvptx64";

    let sm = version_override("MEMOPS_SM").or_else(|| highest_feature(&features, "sm_"));
    let ptx = version_override("MEMOPS_PTX").or_else(|| highest_feature(&features, "ptx"));
    let forced_fallback = env::var_os("CARGO_FEATURE_EMULATED_ORDERING").is_some();

    let native_ordering = !forced_fallback
        && (!device || sm.is_some_and(|sm| sm >= NATIVE_ORDERING_MIN_SM));
    let multimem = device
        && sm.is_some_and(|sm| sm >= MULTIMEM_MIN_SM)
        && ptx.is_some_and(|ptx| ptx >= MULTIMEM_MIN_PTX);

    if native_ordering {
        println!("cargo:rustc-cfg=memops_native_ordering");
    }
    if multimem {
        println!("cargo:rustc-cfg=memops_multimem");
    }
    if let Some(sm) = sm {
        println!("cargo:rustc-env=MEMOPS_SM_VERSION={sm}");
    }
    if let Some(ptx) = ptx {
        println!("cargo:rustc-env=MEMOPS_PTX_VERSION={ptx}");
    }
}

fn version_override(name: &str) -> Option<u32> {
    env::var(name).ok().and_then(|value| value.trim().parse().ok())
}

/// Highest numeric suffix among target features starting with `prefix`.
/// Architecture-specific suffixes (`sm_90a`) count as their base version.
fn highest_feature(features: &str, prefix: &str) -> Option<u32> {
    features
        .split(',')
        .filter_map(|feature| feature.strip_prefix(prefix))
        .filter_map(|version| version.trim_end_matches(|c: char| c.is_ascii_alphabetic()).parse().ok())
        .max()
}
