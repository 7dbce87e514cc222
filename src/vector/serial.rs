//! Sundials serial N_Vectors owning their data.

use sundials_sys::*;
use crate::{Context, Error};
use super::{as_slice, as_mut_slice};

/// Serial vector allocated by Sundials.  The data is freed on drop.
pub(crate) struct Serial(N_Vector);

impl Drop for Serial {
    fn drop(&mut self) {
        unsafe { N_VDestroy_Serial(self.0) }
    }
}

impl Serial {
    pub(crate) fn from_slice(
        name: &'static str, ctx: &Context, v: &[f64],
    ) -> Result<Self, Error> {
        let nv = unsafe { N_VNew_Serial(v.len() as _, ctx.as_ptr()) };
        if nv.is_null() {
            return Err(Error::Failure { name, msg: "vector allocation failed" })
        }
        let mut s = Serial(nv);
        s.as_mut_slice().copy_from_slice(v);
        Ok(s)
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> N_Vector {
        self.0
    }

    pub(crate) fn as_slice(&self) -> &[f64] {
        // SAFETY: `self.0` is owned by `self` and borrowed with it.
        unsafe { as_slice(self.0) }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        unsafe { as_mut_slice(self.0) }
    }

    pub(crate) fn len(&self) -> usize {
        unsafe { N_VGetLength_Serial(self.0) as _ }
    }
}
