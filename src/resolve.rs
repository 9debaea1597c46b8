//! Header resolution: derive the header to be written from the array shape,
//! an optional reference header, the field of view, the repetition time and
//! the target precision.
//!
//! The array shape is always authoritative for `dim[1..=4]`. A reference
//! header is only accepted when the extents it already declares agree with
//! the array; it then supplies the datatype, the physical field of view and
//! the repetition time unless these are given explicitly.
use crate::error::{NiftiError, Result};
use crate::header::{NiftiHeader, HEADER_SIZE, MAGIC_CODE_NIP1, SINGLE_FILE_VOX_OFFSET};
use crate::typedef::NiftiType;
use crate::volume::shape::Dim;
use tracing::debug;

/// Precision used when neither a reference header nor a precision is given.
pub const DEFAULT_PRECISION: &str = "int16";
/// Repetition time of a fresh header, in milliseconds.
pub const DEFAULT_REPETITION_TIME: f32 = 1000.;
/// Physical extent of each spatial axis of a fresh header.
pub const DEFAULT_FIELD_OF_VIEW: f32 = 1.;

/// Build the header for an array of the given shape.
///
/// - Without `reference`, a fresh header is created for `precision`
///   (`"int16"` if `None`), with `dim[0]` and `pixdim[0]` set to the rank.
/// - With `reference`, its extents must equal the array's, including the
///   number of frames, or `DimensionMismatch` is returned. Its datatype is
///   kept; a `precision` naming another datatype is a `PrecisionConflict`.
///   The field of view defaults to `dim[i] * pixdim[i]` and the repetition
///   time to `pixdim[4]` of the reference.
///
/// Either way, `dim[1..=4]` is taken from the array, `pixdim[1..=3]` is
/// `fov[i] / dim[i]` and `pixdim[4]` is the repetition time. Identity fields
/// (`sizeof_hdr`, `vox_offset`, `magic`) and `bitpix` are reset to the values
/// required for a single-file object of the resolved datatype.
pub fn resolve_header(
    shape: &[usize],
    reference: Option<&NiftiHeader>,
    field_of_view: Option<&[f32]>,
    repetition_time: Option<f32>,
    precision: Option<&str>,
) -> Result<NiftiHeader> {
    let dim = Dim::from_shape(shape)?;

    let (mut header, datatype, mut fov, tr) = match reference {
        None => {
            let datatype = NiftiType::from_name(precision.unwrap_or(DEFAULT_PRECISION))?;
            let mut header = NiftiHeader::for_datatype(datatype);
            header.dim = *dim.raw();
            header.pixdim[0] = dim.rank() as f32;
            (
                header,
                datatype,
                [DEFAULT_FIELD_OF_VIEW; 3],
                DEFAULT_REPETITION_TIME,
            )
        }
        Some(reference) => {
            let declared = reference.extents();
            if declared != dim.extents() {
                return Err(NiftiError::DimensionMismatch(declared, dim.extents()));
            }
            let datatype = reference.data_type()?;
            if let Some(precision) = precision {
                let requested = NiftiType::from_name(precision)?;
                if requested != datatype {
                    return Err(NiftiError::PrecisionConflict(datatype, requested));
                }
            }
            let mut fov = [0.; 3];
            for (i, f) in fov.iter_mut().enumerate() {
                *f = f32::from(declared[i]) * reference.pixdim[i + 1];
            }
            (reference.clone(), datatype, fov, reference.pixdim[4])
        }
    };

    if let Some(field_of_view) = field_of_view {
        if field_of_view.len() != dim.spatial_rank() {
            return Err(NiftiError::InvalidFieldOfView(
                dim.spatial_rank(),
                field_of_view.len(),
            ));
        }
        fov[..field_of_view.len()].copy_from_slice(field_of_view);
    }
    let tr = repetition_time.unwrap_or(tr);

    header.dim[1..=4].copy_from_slice(&dim.extents());
    for i in 1..=3 {
        header.pixdim[i] = fov[i - 1] / f32::from(header.dim[i]);
    }
    header.pixdim[4] = tr;

    header.sizeof_hdr = HEADER_SIZE;
    header.vox_offset = SINGLE_FILE_VOX_OFFSET;
    header.magic = *MAGIC_CODE_NIP1;
    header.bitpix = datatype.bitpix();

    debug!(
        dim = ?header.dim,
        voxels = dim.element_count(),
        pixdim = ?header.pixdim,
        datatype = datatype.name(),
        "resolved NIfTI header"
    );
    Ok(header)
}
