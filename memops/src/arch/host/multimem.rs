//! No multicast fabric on the host.

use crate::pack::Ulong2;

crate::arch::noop_multicast!(u8, u16, u32, u64, Ulong2);
