//! Sized `ld`/`st` instructions for global and shared space.

use core::arch::asm;

use crate::arch::NativeAccess;
use crate::pack::Ulong2;

// =============================================================================
// SCALAR WIDTHS
// =============================================================================

macro_rules! define_ld_st {
    (@space $space:ident, $addr_ty:ty, $asm_addr_ty:ty, $addr_reg:ident,
     $native:ty, $reg_ty:ty, $reg:ident, $ptx:literal) => {
        paste::paste! {
            #[inline(always)]
            unsafe fn [<ld_ $space>](addr: $addr_ty) -> Self {
                let tmp: $reg_ty;
                unsafe {
                    asm!(
                        concat!("ld.", stringify!($space), ".", $ptx, " {}, [{}];"),
                        out($reg) tmp,
                        in($addr_reg) addr as $asm_addr_ty,
                        options(nostack, readonly),
                    );
                }
                tmp as $native
            }

            #[inline(always)]
            unsafe fn [<ld_volatile_ $space>](addr: $addr_ty) -> Self {
                let tmp: $reg_ty;
                unsafe {
                    asm!(
                        concat!("ld.volatile.", stringify!($space), ".", $ptx, " {}, [{}];"),
                        out($reg) tmp,
                        in($addr_reg) addr as $asm_addr_ty,
                        options(nostack),
                    );
                }
                tmp as $native
            }

            #[inline(always)]
            unsafe fn [<st_ $space>](addr: $addr_ty, value: Self) {
                unsafe {
                    asm!(
                        concat!("st.", stringify!($space), ".", $ptx, " [{}], {};"),
                        in($addr_reg) addr as $asm_addr_ty,
                        in($reg) value as $reg_ty,
                        options(nostack),
                    );
                }
            }

            #[inline(always)]
            unsafe fn [<st_volatile_ $space>](addr: $addr_ty, value: Self) {
                unsafe {
                    asm!(
                        concat!("st.volatile.", stringify!($space), ".", $ptx, " [{}], {};"),
                        in($addr_reg) addr as $asm_addr_ty,
                        in($reg) value as $reg_ty,
                        options(nostack),
                    );
                }
            }
        }
    };
    ($($native:ty => $reg_ty:ty, $reg:ident, $ptx:literal;)*) => {
        $(
            impl NativeAccess for $native {
                define_ld_st!(@space global, usize, u64, reg64, $native, $reg_ty, $reg, $ptx);
                define_ld_st!(@space shared, u32, u32, reg32, $native, $reg_ty, $reg, $ptx);
            }
        )*
    };
}

// There is no 8-bit register class for inline asm: single bytes travel in a
// 32-bit register and are truncated/extended around the instruction.
define_ld_st! {
    u8 => u32, reg32, "b8";
    u16 => u16, reg16, "b16";
    u32 => u32, reg32, "b32";
    u64 => u64, reg64, "b64";
}

// =============================================================================
// 16-BYTE WIDTH
// =============================================================================

// No 128-bit scalar exists; one v2.b64 instruction moves both halves. Each
// 8-byte half is atomic on its own, the pair is not.
macro_rules! define_ld_st_16 {
    ($(($space:ident, $addr_ty:ty, $asm_addr_ty:ty, $addr_reg:ident)),*) => {
        paste::paste! {
            $(
                #[inline(always)]
                unsafe fn [<ld_ $space>](addr: $addr_ty) -> Self {
                    let (x, y): (u64, u64);
                    unsafe {
                        asm!(
                            concat!("ld.", stringify!($space), ".v2.b64 {{{}, {}}}, [{}];"),
                            out(reg64) x,
                            out(reg64) y,
                            in($addr_reg) addr as $asm_addr_ty,
                            options(nostack, readonly),
                        );
                    }
                    Ulong2 { x, y }
                }

                #[inline(always)]
                unsafe fn [<ld_volatile_ $space>](addr: $addr_ty) -> Self {
                    let (x, y): (u64, u64);
                    unsafe {
                        asm!(
                            concat!("ld.volatile.", stringify!($space), ".v2.b64 {{{}, {}}}, [{}];"),
                            out(reg64) x,
                            out(reg64) y,
                            in($addr_reg) addr as $asm_addr_ty,
                            options(nostack),
                        );
                    }
                    Ulong2 { x, y }
                }

                #[inline(always)]
                unsafe fn [<st_ $space>](addr: $addr_ty, value: Self) {
                    unsafe {
                        asm!(
                            concat!("st.", stringify!($space), ".v2.b64 [{}], {{{}, {}}};"),
                            in($addr_reg) addr as $asm_addr_ty,
                            in(reg64) value.x,
                            in(reg64) value.y,
                            options(nostack),
                        );
                    }
                }

                #[inline(always)]
                unsafe fn [<st_volatile_ $space>](addr: $addr_ty, value: Self) {
                    unsafe {
                        asm!(
                            concat!("st.volatile.", stringify!($space), ".v2.b64 [{}], {{{}, {}}};"),
                            in($addr_reg) addr as $asm_addr_ty,
                            in(reg64) value.x,
                            in(reg64) value.y,
                            options(nostack),
                        );
                    }
                }
            )*
        }
    };
}

impl NativeAccess for Ulong2 {
    define_ld_st_16!((global, usize, u64, reg64), (shared, u32, u32, reg32));
}

// =============================================================================
// FUNNEL SHIFT
// =============================================================================

/// Low 32 bits of `hi:lo >> (shift & 31)`
#[inline(always)]
pub(crate) fn funnel_shift_r(lo: u32, hi: u32, shift: u32) -> u32 {
    let out: u32;
    // SAFETY: register-only instruction
    unsafe {
        asm!(
            "shf.r.wrap.b32 {}, {}, {}, {};",
            out(reg32) out,
            in(reg32) lo,
            in(reg32) hi,
            in(reg32) shift,
            options(pure, nomem, nostack),
        );
    }
    out
}
