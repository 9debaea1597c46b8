//! This module contains multiple types defined by the standard.
//! `NiftiType` is backed by a static registry which maps the
//! conventional precision names (such as `"int16"`) to their NIfTI-1
//! datatype codes and bit widths, in both directions.
//! Primitive integer values can be converted to these types and vice-versa.

use crate::error::{NiftiError, Result};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// Data type for representing a NIFTI value type in a volume.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum NiftiType {
    /// binary (1 bit/voxel).
    // NIFTI_TYPE_BINARY          1
    Binary = 1,
    /// unsigned char.
    // NIFTI_TYPE_UINT8           2
    Uint8 = 2,
    /// signed short.
    // NIFTI_TYPE_INT16           4
    Int16 = 4,
    /// signed int.
    // NIFTI_TYPE_INT32           8
    Int32 = 8,
    /// 32 bit float.
    // NIFTI_TYPE_FLOAT32        16
    Float32 = 16,
    /// 64 bit complex = 2 32 bit floats.
    // NIFTI_TYPE_COMPLEX64      32
    Complex64 = 32,
    /// 64 bit float = double.
    // NIFTI_TYPE_FLOAT64        64
    Float64 = 64,
    /// 3 8 bit bytes.
    // NIFTI_TYPE_RGB24         128
    Rgb24 = 128,
    /// signed char.
    // NIFTI_TYPE_INT8          256
    Int8 = 256,
    /// unsigned short.
    // NIFTI_TYPE_UINT16        512
    Uint16 = 512,
    /// unsigned int.
    // NIFTI_TYPE_UINT32        768
    Uint32 = 768,
    /// signed long long.
    // NIFTI_TYPE_INT64        1024
    Int64 = 1024,
    /// unsigned long long.
    // NIFTI_TYPE_UINT64       1280
    Uint64 = 1280,
    /// 128 bit float = long double.
    // NIFTI_TYPE_FLOAT128     1536
    Float128 = 1536,
    /// 128 bit complex = 2 64 bit floats.
    // NIFTI_TYPE_COMPLEX128   1792
    Complex128 = 1792,
    /// 256 bit complex = 2 128 bit floats
    // NIFTI_TYPE_COMPLEX256   2048
    Complex256 = 2048,
    /// 4 8 bit bytes.
    // NIFTI_TYPE_RGBA32       2304
    Rgba32 = 2304,
}

/// The datatype registry: one row per NIfTI-1 datatype, as
/// `(precision name, datatype, bitpix)`.
static DATATYPES: [(&str, NiftiType, i16); 17] = [
    ("binary", NiftiType::Binary, 1),
    ("uint8", NiftiType::Uint8, 8),
    ("int16", NiftiType::Int16, 16),
    ("int32", NiftiType::Int32, 32),
    ("float32", NiftiType::Float32, 32),
    ("complex64", NiftiType::Complex64, 64),
    ("float64", NiftiType::Float64, 64),
    ("rgb24", NiftiType::Rgb24, 24),
    ("int8", NiftiType::Int8, 8),
    ("uint16", NiftiType::Uint16, 16),
    ("uint32", NiftiType::Uint32, 32),
    ("int64", NiftiType::Int64, 64),
    ("uint64", NiftiType::Uint64, 64),
    ("float128", NiftiType::Float128, 128),
    ("complex128", NiftiType::Complex128, 128),
    ("complex256", NiftiType::Complex256, 256),
    ("rgba32", NiftiType::Rgba32, 32),
];

/// Look up the datatype code and bit width for a precision name.
/// The lookup is case insensitive.
///
/// # Example
///
/// ```
/// # use nifti_writer::typedef::code_for;
/// assert_eq!(code_for("Int16")?, (4, 16));
/// # Ok::<(), nifti_writer::NiftiError>(())
/// ```
pub fn code_for(name: &str) -> Result<(i16, i16)> {
    let t = NiftiType::from_name(name)?;
    Ok((t as i16, t.bitpix()))
}

/// Look up the precision name of a datatype code.
///
/// # Example
///
/// ```
/// # use nifti_writer::typedef::name_for;
/// assert_eq!(name_for(16)?, "float32");
/// # Ok::<(), nifti_writer::NiftiError>(())
/// ```
pub fn name_for(code: i16) -> Result<&'static str> {
    NiftiType::from_code(code).map(|t| t.name())
}

impl NiftiType {
    /// Find the datatype registered under the given precision name,
    /// ignoring ASCII case.
    pub fn from_name(name: &str) -> Result<NiftiType> {
        DATATYPES
            .iter()
            .find(|(n, _, _)| n.eq_ignore_ascii_case(name.trim()))
            .map(|&(_, t, _)| t)
            .ok_or_else(|| NiftiError::UnknownDatatype(name.to_string()))
    }

    /// Validate a raw datatype code.
    pub fn from_code(code: i16) -> Result<NiftiType> {
        FromPrimitive::from_i16(code)
            .ok_or_else(|| NiftiError::UnknownDatatype(format!("code {}", code)))
    }

    fn row(self) -> &'static (&'static str, NiftiType, i16) {
        DATATYPES
            .iter()
            .find(|(_, t, _)| *t == self)
            .expect("every NiftiType has a registry row")
    }

    /// The conventional lowercase precision name of this data type.
    pub fn name(self) -> &'static str {
        self.row().0
    }

    /// Number of bits per voxel (the header's `bitpix` field).
    pub fn bitpix(self) -> i16 {
        self.row().2
    }

    /// Retrieve the size of an element of this data type, in bytes.
    /// Binary voxels are rounded up to one byte.
    pub fn size_of(self) -> usize {
        (self.bitpix() as usize + 7) / 8
    }

    /// Whether values of this type hold a real and an imaginary part.
    pub fn is_complex(self) -> bool {
        use NiftiType::*;
        matches!(self, Complex64 | Complex128 | Complex256)
    }

    /// Whether this is an unsigned integer type.
    pub fn is_unsigned(self) -> bool {
        use NiftiType::*;
        matches!(self, Uint8 | Uint16 | Uint32 | Uint64)
    }
}

/// An enum type which represents a unit type.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum Unit {
    /// NIFTI code for unspecified units.
    Unknown = 0,
    /* Space codes are multiples of 1. */
    /// NIFTI code for meters.
    Meter = 1,
    /// NIFTI code for millimeters.
    Mm = 2,
    /// NIFTI code for micrometers.
    Micron = 3,
    /* Time codes are multiples of 8. */
    /// NIFTI code for seconds.
    Sec = 8,
    /// NIFTI code for milliseconds.
    Msec = 16,
    /// NIFTI code for microseconds.
    Usec = 24,
}

impl Unit {
    /// Pack a spatial and a temporal unit into an `xyzt_units` byte.
    pub fn xyzt(space: Unit, time: Unit) -> u8 {
        (space as u8 & 0o0007) | (time as u8 & 0o0070)
    }
}

/// An enum type for representing a NIFTI XForm.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum XForm {
    /// Arbitrary coordinates (Method 1).
    Unknown = 0,
    /// Scanner-based anatomical coordinates
    ScannerAnat = 1,
    /// Coordinates aligned to another file's,
    /// or to anatomical "truth".
    AlignedAnat = 2,
    /// Coordinates aligned to Talairach-Tournoux
    /// Atlas; (0,0,0)=AC, etc.
    Talairach = 3,
    /// MNI 152 normalized coordinates.
    Mni152 = 4,
}
