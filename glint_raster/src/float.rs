// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float math that `core` does not provide.

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("glint_raster requires either the `std` or `libm` feature");

/// The float methods this crate needs from `std`, routed through `libm` in
/// `no_std` builds. With `std` enabled the inherent methods win.
#[allow(dead_code, reason = "with `std` the inherent methods shadow these")]
pub(crate) trait FloatExt {
    fn floor(self) -> Self;
    fn ceil(self) -> Self;
    fn round(self) -> Self;
    fn sqrt(self) -> Self;
}

impl FloatExt for f64 {
    #[inline]
    fn floor(self) -> f64 {
        #[cfg(feature = "std")]
        return f64::floor(self);
        #[cfg(not(feature = "std"))]
        return libm::floor(self);
    }

    #[inline]
    fn ceil(self) -> f64 {
        #[cfg(feature = "std")]
        return f64::ceil(self);
        #[cfg(not(feature = "std"))]
        return libm::ceil(self);
    }

    #[inline]
    fn round(self) -> f64 {
        #[cfg(feature = "std")]
        return f64::round(self);
        #[cfg(not(feature = "std"))]
        return libm::round(self);
    }

    #[inline]
    fn sqrt(self) -> f64 {
        #[cfg(feature = "std")]
        return f64::sqrt(self);
        #[cfg(not(feature = "std"))]
        return libm::sqrt(self);
    }
}
