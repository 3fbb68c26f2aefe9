//! Multicast stores (`multimem.st`), sm_90+ with PTX ISA 8.1+.

use crate::pack::Ulong2;

cfg_if::cfg_if! {
    if #[cfg(memops_multimem)] {
        use core::arch::asm;

        use crate::arch::MulticastStore;

        // multimem.st has no 8- or 16-bit forms; those widths use a plain store
        // to the multicast address.
        impl MulticastStore for u8 {
            #[inline(always)]
            unsafe fn multimem_st_global(addr: usize, value: Self) {
                unsafe {
                    asm!("st.global.b8 [{}], {};", in(reg64) addr as u64, in(reg32) value as u32, options(nostack));
                }
            }
        }

        impl MulticastStore for u16 {
            #[inline(always)]
            unsafe fn multimem_st_global(addr: usize, value: Self) {
                unsafe {
                    asm!("st.global.b16 [{}], {};", in(reg64) addr as u64, in(reg16) value, options(nostack));
                }
            }
        }

        impl MulticastStore for u32 {
            #[inline(always)]
            unsafe fn multimem_st_global(addr: usize, value: Self) {
                unsafe {
                    asm!("multimem.st.global.b32 [{}], {};", in(reg64) addr as u64, in(reg32) value, options(nostack));
                }
            }
        }

        impl MulticastStore for u64 {
            #[inline(always)]
            unsafe fn multimem_st_global(addr: usize, value: Self) {
                unsafe {
                    asm!("multimem.st.global.b64 [{}], {};", in(reg64) addr as u64, in(reg64) value, options(nostack));
                }
            }
        }

        impl MulticastStore for Ulong2 {
            #[inline(always)]
            unsafe fn multimem_st_global(addr: usize, value: Self) {
                let [a, b, c, d]: [u32; 4] = bytemuck::cast(value);
                unsafe {
                    asm!(
                        "multimem.st.global.v4.f32 [{}], {{{}, {}, {}, {}}};",
                        in(reg64) addr as u64,
                        in(reg32) a,
                        in(reg32) b,
                        in(reg32) c,
                        in(reg32) d,
                        options(nostack),
                    );
                }
            }
        }
    } else {
        crate::arch::noop_multicast!(u8, u16, u32, u64, Ulong2);
    }
}
