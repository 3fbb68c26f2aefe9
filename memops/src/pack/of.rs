//! Type-to-pack mapping and bit-exact reinterpretation.

use core::mem::size_of;

use bytemuck::Pod;
use half::{bf16, f16};

use super::{AnyBytePack, BytePack, SupportedWidth, Ulong2, Width};

/// Associates a value type with the byte pack of the same size
///
/// Zero-sized types map to `BytePack<0>`: `()` and `BytePack<0>` both
/// carry zero bytes.
///
/// Register further types with [`impl_byte_pack_of!`](crate::impl_byte_pack_of),
/// which checks the size at compile time.
pub trait BytePackOf: Pod {
    /// Pack carrying a value of this type
    type Pack: AnyBytePack;

    /// Byte count of the pack
    const SIZE: usize = size_of::<Self::Pack>();
}

/// Pack type carrying a `T`
pub type PackOf<T> = <T as BytePackOf>::Pack;

/// Reinterpret a value as its byte pack
#[inline(always)]
pub fn to_pack<T: BytePackOf>(value: T) -> PackOf<T> {
    const { assert!(size_of::<T>() == size_of::<PackOf<T>>(), "value and pack differ in size") };
    bytemuck::cast(value)
}

/// Reinterpret a byte pack as a value
#[inline(always)]
pub fn from_pack<T: BytePackOf>(pack: PackOf<T>) -> T {
    const { assert!(size_of::<T>() == size_of::<PackOf<T>>(), "value and pack differ in size") };
    bytemuck::cast(pack)
}

impl<const N: usize> BytePackOf for BytePack<N>
where
    Width<N>: SupportedWidth,
{
    type Pack = Self;
}

/// Register `Pod` types with [`BytePackOf`]
///
/// ```
/// #[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
/// #[repr(C)]
/// struct Pair {
///     lo: u32,
///     hi: u32,
/// }
///
/// fabric_memops::impl_byte_pack_of!(Pair => 8);
///
/// let pack = fabric_memops::to_pack(Pair { lo: 1, hi: 2 });
/// assert_eq!(pack.native(), 0x0000_0002_0000_0001);
/// ```
#[macro_export]
macro_rules! impl_byte_pack_of {
    ($($ty:ty => $n:literal),* $(,)?) => {
        $(
            $crate::__private::static_assertions::assert_eq_size!($ty, $crate::BytePack<$n>);

            impl $crate::BytePackOf for $ty {
                type Pack = $crate::BytePack<$n>;
            }
        )*
    };
}

impl_byte_pack_of! {
    () => 0,
    u8 => 1, i8 => 1,
    u16 => 2, i16 => 2, f16 => 2, bf16 => 2,
    u32 => 4, i32 => 4, f32 => 4,
    u64 => 8, i64 => 8, f64 => 8,
    u128 => 16, i128 => 16,
    [u8; 2] => 2, [u8; 4] => 4, [u8; 8] => 8, [u8; 16] => 16,
    [u16; 2] => 4, [u16; 4] => 8, [u16; 8] => 16,
    [f16; 2] => 4, [bf16; 2] => 4,
    [u32; 2] => 8, [u32; 4] => 16,
    [f32; 2] => 8, [f32; 4] => 16,
    [u64; 2] => 16, [f64; 2] => 16,
    Ulong2 => 16,
}

// =============================================================================
// TESTS
// =============================================================================
