//! Generic ↔ space-qualified address conversion.

use super::scratch;

#[inline(always)]
pub(crate) fn cvta_to_global<T>(ptr: *const T) -> usize {
    ptr as usize
}

#[inline(always)]
pub(crate) fn cvta_to_shared<T>(ptr: *const T) -> u32 {
    scratch::offset_of(ptr as usize)
}

#[inline(always)]
pub(crate) fn cvta_from_global<T>(addr: usize) -> *mut T {
    addr as *mut T
}

#[inline(always)]
pub(crate) fn cvta_from_shared<T>(addr: u32) -> *mut T {
    scratch::resolve(addr) as *mut T
}
