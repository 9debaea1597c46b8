//! Dynamic range quantization.
//!
//! Before being cast to a narrow storage type, intensities are mapped onto
//! the full range of the target type with an affine transform
//! `x = m * y - b`. The inverse, `y = x * scl_slope + scl_inter` with
//! `scl_slope = 1 / m` and `scl_inter = b / m`, is recorded in the header
//! so that readers recover the original units.
//!
//! Signed and floating point targets span `[-maxval, maxval]`. Unsigned
//! integer targets have no negative half, so the same span is shifted up
//! by `maxval` to `[0, 2 * maxval]`.
use crate::error::{NiftiError, Result};
use crate::typedef::NiftiType;
use ndarray::{Array, Dimension};
use tracing::warn;

/// Largest magnitude of a signed integer with `bitpix` bits,
/// `2^(bitpix - 1) - 1`.
pub fn full_scale(bitpix: i16) -> f64 {
    2f64.powi(i32::from(bitpix) - 1) - 1.
}

/// An affine map from physical intensities to stored values.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Scaling {
    gain: f64,
    offset: f64,
}

impl Scaling {
    /// Stored values are physical values.
    pub const IDENTITY: Scaling = Scaling {
        gain: 1.,
        offset: 0.,
    };

    /// Compute the map which sends `[min, max]` onto the full range of
    /// `datatype`: `[-maxval, maxval]`, or `[0, 2 * maxval]` for unsigned
    /// integers, with `maxval = full_scale(datatype.bitpix())`.
    ///
    /// A constant image (`min == max`) has no such map. It falls back to
    /// storing `y - min`, so the payload is all zeros with `scl_slope = 1`
    /// and `scl_inter = min`. Non-finite extrema are rejected with
    /// `DegenerateRange`.
    pub fn for_range(min: f64, max: f64, datatype: NiftiType) -> Result<Scaling> {
        if !min.is_finite() || !max.is_finite() {
            return Err(NiftiError::DegenerateRange(min, max));
        }
        if min == max {
            warn!(value = min, "constant image, storing offsets from its value");
            return Ok(Scaling {
                gain: 1.,
                offset: min,
            });
        }
        let maxval = full_scale(datatype.bitpix());
        let gain = 2. * maxval / (max - min);
        if !gain.is_finite() || gain <= 0. {
            return Err(NiftiError::DegenerateRange(min, max));
        }
        // `min` lands on the lowest storable value
        let low = if datatype.is_unsigned() { 0. } else { -maxval };
        Ok(Scaling {
            gain,
            offset: gain * min - low,
        })
    }

    /// The value to store for intensity `y`.
    #[inline]
    pub fn quantize(&self, y: f64) -> f64 {
        self.gain * y - self.offset
    }

    /// The header's `scl_slope`.
    pub fn slope(&self) -> f64 {
        1. / self.gain
    }

    /// The header's `scl_inter`.
    pub fn inter(&self) -> f64 {
        self.offset / self.gain
    }
}

/// Global minimum and maximum, ignoring NaN values.
/// Returns `None` if there is no such value.
pub fn extrema<'a, I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a f64>,
{
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Rescale `data` to the full range of `datatype`, in place, when `enabled`. Returns the data to store and the applied map, which is
/// `Scaling::IDENTITY` when disabled or when `data` only holds NaN.
pub fn scale_to_full_range<D>(
    mut data: Array<f64, D>,
    datatype: NiftiType,
    enabled: bool,
) -> Result<(Array<f64, D>, Scaling)>
where
    D: Dimension,
{
    if !enabled {
        return Ok((data, Scaling::IDENTITY));
    }
    let scaling = match extrema(data.iter()) {
        Some((min, max)) => Scaling::for_range(min, max, datatype)?,
        None => Scaling::IDENTITY,
    };
    if scaling != Scaling::IDENTITY {
        data.mapv_inplace(|y| scaling.quantize(y));
    }
    Ok((data, scaling))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{arr1, Array3};

    #[test]
    fn full_scale_values() {
        assert_eq!(full_scale(8), 127.);
        assert_eq!(full_scale(16), 32767.);
        assert_eq!(full_scale(32), 2147483647.);
    }

    #[test]
    fn maps_extrema_to_full_range() {
        let data = arr1(&[-3., 0., 5., 1.]);
        let (x, s) = scale_to_full_range(data, NiftiType::Int16, true).unwrap();
        assert_relative_eq!(x[0], -32767., epsilon = 1e-9);
        assert_relative_eq!(x[2], 32767., epsilon = 1e-9);
        assert_relative_eq!(s.slope(), 8. / 65534., epsilon = 1e-15);
        assert_relative_eq!(s.inter(), 1., epsilon = 1e-12);
    }

    #[test]
    fn inverse_recovers_values() {
        let original = arr1(&[10., 12.5, 17., 20.]);
        let (x, s) = scale_to_full_range(original.clone(), NiftiType::Int8, true).unwrap();
        for (stored, y) in x.iter().zip(original.iter()) {
            assert_relative_eq!(stored * s.slope() + s.inter(), *y, epsilon = 1e-9);
        }
    }

    #[test]
    fn unsigned_targets_start_at_zero() {
        let original = arr1(&[0., 1., 2., 3., 4.]);
        let (x, s) = scale_to_full_range(original.clone(), NiftiType::Uint8, true).unwrap();
        assert_relative_eq!(x[0], 0., epsilon = 1e-9);
        assert_relative_eq!(x[2], 127., epsilon = 1e-9);
        assert_relative_eq!(x[4], 254., epsilon = 1e-9);
        assert_relative_eq!(s.inter(), 0., epsilon = 1e-12);
        for (stored, y) in x.iter().zip(original.iter()) {
            assert_relative_eq!(stored * s.slope() + s.inter(), *y, epsilon = 1e-9);
        }

        let (x, s) = scale_to_full_range(arr1(&[-10., 10.]), NiftiType::Uint16, true).unwrap();
        assert_relative_eq!(x[0], 0., epsilon = 1e-9);
        assert_relative_eq!(x[1], 65534., epsilon = 1e-9);
        assert_relative_eq!(s.inter(), -10., epsilon = 1e-12);
    }

    #[test]
    fn disabled_is_identity() {
        let data = arr1(&[1., 2., 3.]);
        let (x, s) = scale_to_full_range(data.clone(), NiftiType::Int16, false).unwrap();
        assert_eq!(x, data);
        assert_eq!(s, Scaling::IDENTITY);
        assert_eq!(s.slope(), 1.);
        assert_eq!(s.inter(), 0.);
    }

    #[test]
    fn constant_image_falls_back() {
        let data = Array3::from_elem((4, 4, 4), 2.);
        let (x, s) = scale_to_full_range(data, NiftiType::Int16, true).unwrap();
        assert!(x.iter().all(|&v| v == 0.));
        assert_eq!(s.slope(), 1.);
        assert_eq!(s.inter(), 2.);
    }

    #[test]
    fn nan_is_ignored_for_extrema() {
        assert_eq!(extrema(&[f64::NAN, 4., -1., f64::NAN]), Some((-1., 4.)));
        assert_eq!(extrema(&[f64::NAN]), None);
        let (x, s) = scale_to_full_range(arr1(&[f64::NAN]), NiftiType::Int16, true).unwrap();
        assert!(x[0].is_nan());
        assert_eq!(s, Scaling::IDENTITY);
    }

    #[test]
    fn infinite_range_is_degenerate() {
        let data = arr1(&[0., f64::INFINITY]);
        assert!(matches!(
            scale_to_full_range(data, NiftiType::Int16, true),
            Err(NiftiError::DegenerateRange(..))
        ));
        let data = arr1(&[-f64::MAX, f64::MAX]);
        assert!(matches!(
            scale_to_full_range(data, NiftiType::Int16, true),
            Err(NiftiError::DegenerateRange(..))
        ));
    }
}
