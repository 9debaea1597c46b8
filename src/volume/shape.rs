//! Shape constructs.
//!
//! The NIfTI-1 format stores the volume shape in the `dim` field as an
//! array of 8 integers where the first element represents the number of
//! dimensions. This writer handles volumes of up to 4 dimensions
//! (x, y, z and time), which [`Dim`] validates from an array shape.
//!
//! [`Dim`]: ./struct.Dim.html
use crate::error::{NiftiError, Result};
use std::convert::TryFrom;

/// The highest rank a volume may have: three spatial axes and time.
pub const MAX_RANK: usize = 4;

/// A validated NIfTI volume shape of rank 1 to 4.
///
/// Axes beyond the rank hold 1 in the raw field.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
#[repr(transparent)]
pub struct Dim([u16; 8]);

impl Dim {
    /// Create a new volume shape from the extents of an array.
    ///
    /// # Example
    ///
    /// ```
    /// # use nifti_writer::volume::shape::Dim;
    /// let dim = Dim::from_shape(&[64, 32, 16])?;
    /// assert_eq!(dim.raw(), &[3, 64, 32, 16, 1, 1, 1, 1]);
    /// assert_eq!(dim.extents(), [64, 32, 16, 1]);
    /// # Ok::<(), nifti_writer::NiftiError>(())
    /// ```
    pub fn from_shape(shape: &[usize]) -> Result<Self> {
        if shape.is_empty() || shape.len() > MAX_RANK {
            return Err(NiftiError::InconsistentDim(0, shape.len()));
        }
        let mut raw = [1; 8];
        raw[0] = shape.len() as u16;
        for (i, &s) in shape.iter().enumerate() {
            raw[i + 1] = match u16::try_from(s) {
                Ok(d) if d > 0 => d,
                _ => return Err(NiftiError::InconsistentDim(i + 1, s)),
            };
        }
        Ok(Dim(raw))
    }

    /// Retrieve a reference to the raw dim field
    pub fn raw(&self) -> &[u16; 8] {
        &self.0
    }

    /// Retrieve the rank of this shape (dimensionality)
    pub fn rank(&self) -> usize {
        usize::from(self.0[0])
    }

    /// Number of spatial axes, at most 3.
    pub fn spatial_rank(&self) -> usize {
        self.rank().min(3)
    }

    /// The x, y, z and time extents.
    pub fn extents(&self) -> [u16; 4] {
        [self.0[1], self.0[2], self.0[3], self.0[4]]
    }

    /// Calculate the number of elements in this shape
    pub fn element_count(&self) -> usize {
        self.as_ref().iter().cloned().map(usize::from).product()
    }
}

impl AsRef<[u16]> for Dim {
    fn as_ref(&self) -> &[u16] {
        &self.0[1..=self.rank()]
    }
}
