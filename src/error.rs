//! Types for error handling go here.
use crate::typedef::NiftiType;
use quick_error::quick_error;
use std::io::Error as IOError;

quick_error! {
    /// Error type for all error variants originated by this crate.
    #[derive(Debug)]
    pub enum NiftiError {
        /// The given precision name or datatype code is not part of the NIfTI-1 standard.
        UnknownDatatype(what: String) {
            display("Unknown NIfTI datatype `{}`", what)
        }
        /// The datatype is known but voxels cannot be stored with it.
        UnsupportedDataType(t: NiftiType) {
            display("Unsupported data type {:?}", t)
        }
        /// The reference header declares extents which differ from the array's shape.
        DimensionMismatch(header: [u16; 4], array: [u16; 4]) {
            display("Header dimensions {:?} do not match array shape {:?}", header, array)
        }
        /// The array shape cannot be represented in a NIfTI-1 `dim` field.
        InconsistentDim(axis: usize, value: usize) {
            display("Inconsistent value `{}` in dimension at axis #{}", value, axis)
        }
        /// The field of view does not provide one extent per spatial axis.
        InvalidFieldOfView(expected: usize, got: usize) {
            display("Field of view must have {} values, got {}", expected, got)
        }
        /// An explicit precision disagrees with the reference header's datatype.
        PrecisionConflict(header: NiftiType, requested: NiftiType) {
            display("Requested precision {:?} conflicts with header datatype {:?}", requested, header)
        }
        /// The data extrema do not admit an affine rescaling.
        DegenerateRange(min: f64, max: f64) {
            display("Cannot rescale intensities in range [{}, {}]", min, max)
        }
        /// Description length must be lower than or equal to 80 bytes
        IncorrectDescriptionLength(len: usize) {
            display("Description length ({} bytes) is greater than 80 bytes.", len)
        }
        /// Magic codes are 3 or 4 bytes long
        InvalidMagic(len: usize) {
            display("Magic code must be 3 or 4 bytes long, got {}", len)
        }
        /// The destination could not be opened, written or closed.
        WriteFailure(err: IOError) {
            from()
            source(err)
            display("Failed to write NIfTI file: {}", err)
        }
    }
}

/// Alias type for results originated from this crate.
pub type Result<T> = ::std::result::Result<T, NiftiError>;
