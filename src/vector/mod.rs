//! Serial `N_Vector`s viewed from Rust.
//!
//! Sundials only ever sees slices of `f64` through this module: either
//! temporarily, by wrapping a Rust slice in a [`SharedSerial`] whose
//! content is *not* owned by Sundials, or as vectors allocated by
//! Sundials itself that the right-hand side callback receives and
//! that we view as slices for the duration of the call.

use std::{marker::PhantomData, mem, slice};
use sundials_sys::*;
use crate::Context;

pub mod serial;

/// N_Vector serial wrapper whose "content" field is shared with a
/// Rust slice.  This is used internally to convert Rust values to
/// appropriate input/outputs for Sundials routines.
pub(crate) struct SharedSerial<V> {
    nv: N_Vector,
    marker: PhantomData<V>, // Lifetime of the Rust slice
}

impl<V> Drop for SharedSerial<V> {
    fn drop(&mut self) {
        // `N_VDestroy_Serial` will only free the data values if
        // `content->own_data` is true, and the vector is created
        // with non-owned data.
        unsafe { N_VDestroy_Serial(self.nv) };
    }
}

impl<V> SharedSerial<V> {
    #[inline]
    pub(crate) fn as_ptr(&self) -> N_Vector {
        self.nv
    }
}

impl<'a> SharedSerial<&'a [f64]> {
    /// Share `v` with Sundials.  Sundials must only read through the
    /// returned vector.
    #[inline]
    pub(crate) fn new(v: &'a [f64], ctx: &Context) -> Option<Self> {
        // `N_VMake_Serial` set `content->own_data` to false, so it
        // will not be freed by the drop trait.
        let nv = unsafe {
            N_VMake_Serial(v.len() as _, v.as_ptr() as *mut _, ctx.as_ptr())
        };
        if nv.is_null() { None }
        else { Some(SharedSerial { nv, marker: PhantomData }) }
    }
}

/// View the content of a serial N_Vector owned by Sundials.
///
/// # Safety
/// `nv` must be a valid serial N_Vector that outlives `'a` and is not
/// mutated while the slice is in use.
#[inline]
pub(crate) unsafe fn as_slice<'a>(nv: N_Vector) -> &'a [f64] {
    unsafe {
        let ptr = N_VGetArrayPointer_Serial(nv);
        let n = N_VGetLength_Serial(nv) as usize;
        if n == 0 {
            return &[]
        }
        // Check alignment requirements of `std::slice::from_raw_parts`.
        debug_assert_eq!(0,
            (ptr as usize).rem_euclid(mem::align_of::<f64>()));
        slice::from_raw_parts(ptr, n)
    }
}

/// Mutable counterpart of [`as_slice`].
///
/// # Safety
/// `nv` must be a valid serial N_Vector that outlives `'a` and no
/// other reference to its content may exist while the slice is in use.
#[inline]
pub(crate) unsafe fn as_mut_slice<'a>(nv: N_Vector) -> &'a mut [f64] {
    unsafe {
        let ptr = N_VGetArrayPointer_Serial(nv);
        let n = N_VGetLength_Serial(nv) as usize;
        if n == 0 {
            return &mut []
        }
        debug_assert_eq!(0,
            (ptr as usize).rem_euclid(mem::align_of::<f64>()));
        slice::from_raw_parts_mut(ptr, n)
    }
}

#[cfg(test)]
mod tests {
    use crate::Context;
    use super::{SharedSerial, as_slice};

    #[test]
    fn shared_views_rust_data() {
        let ctx = Context::new("shared_views_rust_data").unwrap();
        let v = [1., 2., 3.];
        let nv = SharedSerial::new(&v, &ctx).unwrap();
        assert_eq!(unsafe { as_slice(nv.as_ptr()) }, &[1., 2., 3.]);
    }
}
