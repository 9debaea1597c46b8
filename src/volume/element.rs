//! This module defines the voxel element API, through which any
//! supported input array is brought to real `f64` intensities before
//! rescaling and serialization.
use ndarray::{Array, ArrayBase, Data, Dimension, IxDyn};
use num_complex::{Complex32, Complex64};
use num_traits::AsPrimitive;
use tracing::warn;

/// Trait type for characterizing an input voxel element, implemented for
/// the primitive numeric types and for complex numbers.
pub trait VoxelElement: 'static + Copy {
    /// Whether the element has an imaginary part which will be discarded.
    const IS_COMPLEX: bool = false;

    /// Real intensity of this element. Complex values yield their magnitude.
    fn to_f64(self) -> f64;
}

macro_rules! impl_voxel_element_primitive {
    ($($t:ty),*) => {
        $(
            impl VoxelElement for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    self.as_()
                }
            }
        )*
    };
}

impl_voxel_element_primitive!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

impl VoxelElement for Complex32 {
    const IS_COMPLEX: bool = true;

    fn to_f64(self) -> f64 {
        f64::from(self.norm())
    }
}

impl VoxelElement for Complex64 {
    const IS_COMPLEX: bool = true;

    fn to_f64(self) -> f64 {
        self.norm()
    }
}

/// A non-fatal condition met while preparing voxel data.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Diagnostic {
    /// Complex input was reduced to its magnitude; the phase was discarded.
    ComplexMagnitude,
}

/// Copy the input array into real `f64` intensities with the same shape.
///
/// Complex input is replaced by its magnitude, which is reported both as a
/// `warn!` event and as the returned diagnostic. The source array is never
/// modified.
pub fn to_real<S, A, D>(data: &ArrayBase<S, D>) -> (Array<f64, IxDyn>, Option<Diagnostic>)
where
    S: Data<Elem = A>,
    A: VoxelElement,
    D: Dimension,
{
    let real = data.mapv(|v| v.to_f64()).into_dyn();
    if A::IS_COMPLEX {
        warn!("complex voxel data reduced to magnitude, imaginary part discarded");
        (real, Some(Diagnostic::ComplexMagnitude))
    } else {
        (real, None)
    }
}
