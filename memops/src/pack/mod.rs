//! # Byte Packs
//!
//! Typeless fixed-width byte containers.
//!
//! ## Overview
//!
//! `BytePack<N>` holds N raw bytes for N in the closed set
//! `{0, 1, 2, 4, 8, 16}`. Its storage is the native register type of that
//! width, so moving a pack is a single register move:
//!
//! | N  | Native    | Align |
//! |----|-----------|-------|
//! | 0  | `()`      | 1     |
//! | 1  | `u8`      | 1     |
//! | 2  | `u16`     | 2     |
//! | 4  | `u32`     | 4     |
//! | 8  | `u64`     | 8     |
//! | 16 | `Ulong2`  | 16    |
//!
//! Every pack of width N ≥ 2 splits losslessly into two packs of width N/2.
//! Byte and lane views are explicit same-size reinterpretations.
//!
//! Any other width is rejected by the type system:
//!
//! ```compile_fail
//! let _ = fabric_memops::BytePack::<3>::zeroed();
//! ```

use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem::{align_of, size_of};

use bytemuck::{Pod, Zeroable};
use static_assertions::const_assert_eq;

use crate::arch::{MulticastStore, NativeAccess};
use crate::error::{Error, Result};

mod of;

pub use of::{from_pack, to_pack, BytePackOf, PackOf};

// =============================================================================
// WIDTHS
// =============================================================================

/// Type-level byte width
///
/// Only `Width<0|1|2|4|8|16>` implement [`SupportedWidth`].
#[derive(Debug, Clone, Copy)]
pub struct Width<const N: usize>;

mod sealed {
    pub trait Sealed {}
}

/// A width in the closed set `{0, 1, 2, 4, 8, 16}`
///
/// Sealed: the set cannot be extended outside this crate.
pub trait SupportedWidth: sealed::Sealed {
    /// Runtime descriptor of this width
    const WIDTH: PackWidth;
    /// Register type moved by a single instruction of this width
    type Native: NativeAccess + MulticastStore + Pod + Eq + Hash + fmt::Debug;
}

macro_rules! supported_widths {
    ($($n:literal => $native:ty, $variant:ident;)*) => {
        $(
            impl sealed::Sealed for Width<$n> {}

            impl SupportedWidth for Width<$n> {
                const WIDTH: PackWidth = PackWidth::$variant;
                type Native = $native;
            }

            const_assert_eq!(size_of::<$native>(), $n);
            const_assert_eq!(size_of::<BytePack<$n>>(), $n);
        )*
    };
}

supported_widths! {
    0 => (), W0;
    1 => u8, W1;
    2 => u16, W2;
    4 => u32, W4;
    8 => u64, W8;
    16 => Ulong2, W16;
}

const_assert_eq!(align_of::<BytePack<16>>(), 16);
const_assert_eq!(align_of::<BytePack<8>>(), align_of::<u64>());

// =============================================================================
// RUNTIME WIDTH DESCRIPTOR
// =============================================================================

/// Runtime view of a supported width
///
/// Used where the byte count is only known at run time, e.g. when picking a
/// specialization from an element size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PackWidth {
    /// Zero bytes
    W0 = 0,
    /// One byte
    W1 = 1,
    /// Two bytes
    W2 = 2,
    /// Four bytes
    W4 = 4,
    /// Eight bytes
    W8 = 8,
    /// Sixteen bytes
    W16 = 16,
}

impl PackWidth {
    /// All supported widths, narrowest first
    pub const ALL: [PackWidth; 6] = [
        PackWidth::W0,
        PackWidth::W1,
        PackWidth::W2,
        PackWidth::W4,
        PackWidth::W8,
        PackWidth::W16,
    ];

    /// Byte count
    #[inline]
    pub const fn bytes(self) -> usize {
        self as usize
    }

    /// Width of each half, if this width decomposes
    #[inline]
    pub const fn half(self) -> Option<PackWidth> {
        match self {
            PackWidth::W0 | PackWidth::W1 => None,
            PackWidth::W2 => Some(PackWidth::W1),
            PackWidth::W4 => Some(PackWidth::W2),
            PackWidth::W8 => Some(PackWidth::W4),
            PackWidth::W16 => Some(PackWidth::W8),
        }
    }

    /// Width of the pack that carries a `T`
    #[inline]
    pub const fn of<T: BytePackOf>() -> PackWidth {
        <T::Pack as AnyBytePack>::WIDTH
    }
}

impl TryFrom<usize> for PackWidth {
    type Error = Error;

    fn try_from(bytes: usize) -> Result<Self> {
        match bytes {
            0 => Ok(PackWidth::W0),
            1 => Ok(PackWidth::W1),
            2 => Ok(PackWidth::W2),
            4 => Ok(PackWidth::W4),
            8 => Ok(PackWidth::W8),
            16 => Ok(PackWidth::W16),
            _ => Err(Error::UnsupportedWidth(bytes)),
        }
    }
}

impl fmt::Display for PackWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}B", self.bytes())
    }
}

// =============================================================================
// 16-BYTE NATIVE VECTOR
// =============================================================================

/// Two 64-bit lanes moved by one paired vector instruction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(C, align(16))]
pub struct Ulong2 {
    /// Low lane
    pub x: u64,
    /// High lane
    pub y: u64,
}

// SAFETY: two u64 fields, no padding, any bit pattern is valid
unsafe impl Zeroable for Ulong2 {}
// SAFETY: see above
unsafe impl Pod for Ulong2 {}

// =============================================================================
// BYTE PACK
// =============================================================================

/// N raw bytes with no semantic type attached
#[repr(transparent)]
pub struct BytePack<const N: usize>
where
    Width<N>: SupportedWidth,
{
    native: <Width<N> as SupportedWidth>::Native,
}

/// Marker for every `BytePack<N>`
///
/// Lets generic code name "some byte pack" without carrying the width.
pub trait AnyBytePack: Pod + Eq + fmt::Debug + sealed::Sealed {
    /// Width of this pack
    const WIDTH: PackWidth;
}

impl<const N: usize> sealed::Sealed for BytePack<N> where Width<N>: SupportedWidth {}

impl<const N: usize> AnyBytePack for BytePack<N>
where
    Width<N>: SupportedWidth,
{
    const WIDTH: PackWidth = <Width<N> as SupportedWidth>::WIDTH;
}

impl<const N: usize> BytePack<N>
where
    Width<N>: SupportedWidth,
{
    /// Byte count
    pub const BYTES: usize = N;

    /// Pack with every byte zero
    #[inline(always)]
    pub fn zeroed() -> Self {
        Zeroable::zeroed()
    }

    /// Wrap a native register value
    #[inline(always)]
    pub fn from_native(native: <Width<N> as SupportedWidth>::Native) -> Self {
        Self { native }
    }

    /// Native register value
    #[inline(always)]
    pub fn native(self) -> <Width<N> as SupportedWidth>::Native {
        self.native
    }

    /// Bytes in memory order
    #[inline(always)]
    pub fn to_bytes(self) -> [u8; N] {
        bytemuck::cast(self)
    }

    /// Pack from bytes in memory order
    #[inline(always)]
    pub fn from_bytes(bytes: [u8; N]) -> Self {
        bytemuck::cast(bytes)
    }
}

impl<const N: usize> Clone for BytePack<N>
where
    Width<N>: SupportedWidth,
{
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<const N: usize> Copy for BytePack<N> where Width<N>: SupportedWidth {}

impl<const N: usize> Default for BytePack<N>
where
    Width<N>: SupportedWidth,
{
    fn default() -> Self {
        Self::zeroed()
    }
}

impl<const N: usize> PartialEq for BytePack<N>
where
    Width<N>: SupportedWidth,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.native == other.native
    }
}

impl<const N: usize> Eq for BytePack<N> where Width<N>: SupportedWidth {}

impl<const N: usize> Hash for BytePack<N>
where
    Width<N>: SupportedWidth,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.native.hash(state);
    }
}

impl<const N: usize> fmt::Debug for BytePack<N>
where
    Width<N>: SupportedWidth,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BytePack<{}>(", N)?;
        for byte in self.to_bytes() {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

// SAFETY: repr(transparent) over a Pod native of exactly N bytes
unsafe impl<const N: usize> Zeroable for BytePack<N> where Width<N>: SupportedWidth {}
// SAFETY: see above
unsafe impl<const N: usize> Pod for BytePack<N> where Width<N>: SupportedWidth {}

// =============================================================================
// HALF DECOMPOSITION
// =============================================================================

macro_rules! halves {
    ($($n:literal => $half:literal),* $(,)?) => {
        $(
            impl BytePack<$n> {
                /// Split into low and high halves
                #[inline(always)]
                pub fn halves(self) -> [BytePack<$half>; 2] {
                    bytemuck::cast(self)
                }

                /// Join low and high halves
                #[inline(always)]
                pub fn from_halves(halves: [BytePack<$half>; 2]) -> Self {
                    bytemuck::cast(halves)
                }
            }
        )*
    };
}

halves!(2 => 1, 4 => 2, 8 => 4, 16 => 8);

// =============================================================================
// LANE VIEWS
// =============================================================================

macro_rules! lane_views {
    ($n:literal: $($lane:ty => $count:literal),* $(,)?) => {
        impl BytePack<$n> {
            paste::paste! {
                $(
                    #[doc = concat!("View as ", stringify!($count), " `", stringify!($lane), "` lanes")]
                    #[inline(always)]
                    pub fn [<$lane s>](self) -> [$lane; $count] {
                        bytemuck::cast(self)
                    }

                    #[doc = concat!("Pack from ", stringify!($count), " `", stringify!($lane), "` lanes")]
                    #[inline(always)]
                    pub fn [<from_ $lane s>](lanes: [$lane; $count]) -> Self {
                        bytemuck::cast(lanes)
                    }
                )*
            }
        }
    };
}

lane_views!(4: u16 => 2);
lane_views!(8: u16 => 4, u32 => 2);
lane_views!(16: u16 => 8, u32 => 4, u64 => 2);

// =============================================================================
// TESTS
// =============================================================================
