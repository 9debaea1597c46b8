//! Utility functions to write nifti images.
//!
//! The header is written little-endian, field by field, followed by the
//! 4-byte extension flag (always zero) and the voxel payload starting at
//! `vox_offset` (352). Voxels are always emitted in NIfTI order, with the
//! first axis varying fastest (x, then y, z and time), whatever the memory
//! layout of the input array.

use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use byteordered::ByteOrdered;
use ndarray::{ArrayBase, ArrayView, Data, Dimension, IxDyn};
use num_traits::AsPrimitive;
use tracing::debug;

use crate::{
    error::NiftiError,
    header::NiftiHeader,
    resolve::resolve_header,
    scale::scale_to_full_range,
    typedef::NiftiType,
    util::into_nii_path,
    volume::element::{to_real, Diagnostic, VoxelElement},
    Result,
};

/// Options for writing a NIfTI-1 file.
///
/// # Example
///
/// ```no_run
/// use nifti_writer::writer::WriterOptions;
/// use ndarray::Array4;
///
/// let data = Array4::<f32>::zeros((64, 64, 32, 10));
/// let written = WriterOptions::new("bold")
///     .field_of_view(&[192., 192., 96.])
///     .repetition_time(2000.)
///     .write_nifti(&data)?;
/// assert!(written.path.ends_with("bold.nii"));
/// # Ok::<(), nifti_writer::NiftiError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WriterOptions<'a> {
    /// Where to write the file, before `.nii` normalization.
    path: PathBuf,
    /// Header used to fill most fields.
    header_reference: Option<&'a NiftiHeader>,
    /// Physical extent of each spatial axis.
    field_of_view: Option<Vec<f32>>,
    /// Time between frames, in milliseconds.
    repetition_time: Option<f32>,
    /// Precision name of the stored voxels.
    precision: Option<String>,
    /// Whether to quantize onto the full range of the precision.
    scale_to_full_range: bool,
}

/// Outcome of a successful write.
#[derive(Debug, Clone, PartialEq)]
pub struct Written {
    /// The file that was written, with the `.nii` extension.
    pub path: PathBuf,
    /// The header as written.
    pub header: NiftiHeader,
    /// Non-fatal conditions met on the way.
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> WriterOptions<'a> {
    /// Prepare to write to `path`. `.nii` is appended if the path does not
    /// already end with it.
    ///
    /// Defaults: no reference header, a field of view of 1 per axis, a
    /// repetition time of 1000, `"int16"` precision and full range scaling.
    pub fn new<P>(path: P) -> WriterOptions<'a>
    where
        P: AsRef<Path>,
    {
        WriterOptions {
            path: path.as_ref().to_path_buf(),
            header_reference: None,
            field_of_view: None,
            repetition_time: None,
            precision: None,
            scale_to_full_range: true,
        }
    }

    /// Use a reference header for most fields. Its extents must match the
    /// array's and its datatype becomes the stored precision.
    pub fn reference_header(mut self, header: &'a NiftiHeader) -> Self {
        self.header_reference = Some(header);
        self
    }

    /// Physical extent of each spatial axis (one value per axis, at most 3).
    pub fn field_of_view(mut self, fov: &[f32]) -> Self {
        self.field_of_view = Some(fov.to_vec());
        self
    }

    /// Repetition time, stored in `pixdim[4]`.
    pub fn repetition_time(mut self, tr: f32) -> Self {
        self.repetition_time = Some(tr);
        self
    }

    /// Name of the stored precision, such as `"int16"` or `"float32"`.
    pub fn precision(mut self, precision: &str) -> Self {
        self.precision = Some(precision.to_string());
        self
    }

    /// Enable or disable quantization onto the full range of the precision.
    pub fn scale_to_full_range(mut self, enabled: bool) -> Self {
        self.scale_to_full_range = enabled;
        self
    }

    /// Write a nifti file (.nii).
    ///
    /// The header is resolved and the data rescaled before the destination
    /// is touched, so a rejected input never creates or truncates a file.
    /// Complex input is written as its magnitude and reported in
    /// `Written::diagnostics`.
    pub fn write_nifti<A, S, D>(&self, data: &ArrayBase<S, D>) -> Result<Written>
    where
        S: Data<Elem = A>,
        A: VoxelElement,
        D: Dimension,
    {
        let mut header = resolve_header(
            data.shape(),
            self.header_reference,
            self.field_of_view.as_deref(),
            self.repetition_time,
            self.precision.as_deref(),
        )?;
        let datatype = header.data_type()?;
        check_writable(datatype)?;
        header.validate_description()?;

        let (real, diagnostic) = to_real(data);
        let (real, scaling) =
            scale_to_full_range(real, datatype, self.scale_to_full_range)?;
        header.scl_slope = scaling.slope() as f32;
        header.scl_inter = scaling.inter() as f32;

        let path = into_nii_path(&self.path);
        debug!(path = %path.display(), datatype = datatype.name(), "writing NIfTI-1 file");

        let mut writer = BufWriter::new(File::create(&path)?);
        write_header(&mut writer, &header)?;
        // Empty 4 bytes after the header: no extensions
        writer.write_all(&[0; 4])?;
        let _ = writer.seek(SeekFrom::Start(header.vox_offset as u64))?;
        write_data(&mut writer, datatype, real.view())?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;

        Ok(Written {
            path,
            header,
            diagnostics: diagnostic.into_iter().collect(),
        })
    }
}

/// Fail with `UnsupportedDataType` for types without a numeric encoding here:
/// bit-packed and colour voxels, and 128-bit float components.
fn check_writable(datatype: NiftiType) -> Result<()> {
    use NiftiType::*;
    let component_size = if datatype.is_complex() {
        datatype.size_of() / 2
    } else {
        datatype.size_of()
    };
    match datatype {
        Binary | Rgb24 | Rgba32 => Err(NiftiError::UnsupportedDataType(datatype)),
        _ if component_size > 8 => Err(NiftiError::UnsupportedDataType(datatype)),
        _ => Ok(()),
    }
}

/// Write the 348 bytes of a NIfTI-1 header, little-endian.
pub fn write_header<W>(writer: W, header: &NiftiHeader) -> Result<()>
where
    W: Write,
{
    let mut writer = ByteOrdered::le(writer);

    writer.write_i32(header.sizeof_hdr)?;
    writer.write_all(&header.data_type)?;
    writer.write_all(&header.db_name)?;
    writer.write_i32(header.extents)?;
    writer.write_i16(header.session_error)?;
    writer.write_u8(header.regular)?;
    writer.write_u8(header.dim_info)?;
    for s in &header.dim {
        writer.write_u16(*s)?;
    }
    writer.write_f32(header.intent_p1)?;
    writer.write_f32(header.intent_p2)?;
    writer.write_f32(header.intent_p3)?;
    writer.write_i16(header.intent_code)?;
    writer.write_i16(header.datatype)?;
    writer.write_i16(header.bitpix)?;
    writer.write_i16(header.slice_start)?;
    for f in &header.pixdim {
        writer.write_f32(*f)?;
    }
    writer.write_f32(header.vox_offset)?;
    writer.write_f32(header.scl_slope)?;
    writer.write_f32(header.scl_inter)?;
    writer.write_i16(header.slice_end)?;
    writer.write_u8(header.slice_code)?;
    writer.write_u8(header.xyzt_units)?;
    writer.write_f32(header.cal_max)?;
    writer.write_f32(header.cal_min)?;
    writer.write_f32(header.slice_duration)?;
    writer.write_f32(header.toffset)?;
    writer.write_i32(header.glmax)?;
    writer.write_i32(header.glmin)?;

    if header.descrip.len() != 80 {
        return Err(NiftiError::IncorrectDescriptionLength(header.descrip.len()));
    }
    writer.write_all(&header.descrip)?;
    writer.write_all(&header.aux_file)?;
    writer.write_i16(header.qform_code)?;
    writer.write_i16(header.sform_code)?;
    for f in &[
        header.quatern_b,
        header.quatern_c,
        header.quatern_d,
        header.quatern_x,
        header.quatern_y,
        header.quatern_z,
    ] {
        writer.write_f32(*f)?;
    }
    for f in header.srow_x.iter().chain(&header.srow_y).chain(&header.srow_z) {
        writer.write_f32(*f)?;
    }
    writer.write_all(&header.intent_name)?;
    writer.write_all(&header.magic)?;

    Ok(())
}

/// Round to the nearest integer and saturate to the target range.
/// NaN is stored as zero.
#[inline]
fn to_int<T>(v: f64) -> T
where
    T: 'static + Copy,
    f64: AsPrimitive<T>,
{
    v.round().as_()
}

fn write_data<W>(writer: W, datatype: NiftiType, data: ArrayView<f64, IxDyn>) -> Result<()>
where
    W: Write,
{
    let mut writer = ByteOrdered::le(writer);

    // Reversing the axes makes the logical iteration order column major.
    let data = data.reversed_axes();
    let values = data.iter().copied();
    match datatype {
        NiftiType::Uint8 => {
            for v in values {
                writer.write_u8(to_int(v))?;
            }
        }
        NiftiType::Int8 => {
            for v in values {
                writer.write_i8(to_int(v))?;
            }
        }
        NiftiType::Uint16 => {
            for v in values {
                writer.write_u16(to_int(v))?;
            }
        }
        NiftiType::Int16 => {
            for v in values {
                writer.write_i16(to_int(v))?;
            }
        }
        NiftiType::Uint32 => {
            for v in values {
                writer.write_u32(to_int(v))?;
            }
        }
        NiftiType::Int32 => {
            for v in values {
                writer.write_i32(to_int(v))?;
            }
        }
        NiftiType::Uint64 => {
            for v in values {
                writer.write_u64(to_int(v))?;
            }
        }
        NiftiType::Int64 => {
            for v in values {
                writer.write_i64(to_int(v))?;
            }
        }
        NiftiType::Float32 => {
            for v in values {
                writer.write_f32(v as f32)?;
            }
        }
        NiftiType::Float64 => {
            for v in values {
                writer.write_f64(v)?;
            }
        }
        NiftiType::Complex64 => {
            for v in values {
                writer.write_f32(v as f32)?;
                writer.write_f32(0.)?;
            }
        }
        NiftiType::Complex128 => {
            for v in values {
                writer.write_f64(v)?;
                writer.write_f64(0.)?;
            }
        }
        t => return Err(NiftiError::UnsupportedDataType(t)),
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, ShapeBuilder};

    #[test]
    fn header_is_348_bytes() {
        let mut bytes = Vec::new();
        let header = NiftiHeader::for_datatype(NiftiType::Int16);
        write_header(&mut bytes, &header).unwrap();
        assert_eq!(bytes.len(), 348);
        assert_eq!(&bytes[0..4], &348i32.to_le_bytes());
        assert_eq!(&bytes[70..72], &4i16.to_le_bytes());
        assert_eq!(&bytes[72..74], &16i16.to_le_bytes());
        assert_eq!(&bytes[108..112], &352f32.to_le_bytes());
        assert_eq!(&bytes[344..348], b"n+1\0");
    }

    #[test]
    fn header_rejects_long_description() {
        let header = NiftiHeader {
            descrip: vec![b'x'; 81],
            ..NiftiHeader::default()
        };
        assert!(matches!(
            write_header(Vec::new(), &header),
            Err(NiftiError::IncorrectDescriptionLength(81))
        ));
    }

    #[test]
    fn column_major_payload() {
        // C-ordered 2x3: element [i, j] = 10 * i + j
        let data = Array::from_shape_fn((2, 3), |(i, j)| (10 * i + j) as f64).into_dyn();
        let mut bytes = Vec::new();
        write_data(&mut bytes, NiftiType::Uint8, data.view()).unwrap();
        assert_eq!(bytes, vec![0, 10, 1, 11, 2, 12]);

        // the same logical array in Fortran layout gives the same bytes
        let data = Array::from_shape_fn((2, 3).f(), |(i, j)| (10 * i + j) as f64).into_dyn();
        let mut fbytes = Vec::new();
        write_data(&mut fbytes, NiftiType::Uint8, data.view()).unwrap();
        assert_eq!(fbytes, bytes);
    }

    #[test]
    fn integer_cast_rounds_and_saturates() {
        let data = ndarray::arr1(&[1.4, 1.6, -2.5, 40000., -40000., f64::NAN]).into_dyn();
        let mut bytes = Vec::new();
        write_data(&mut bytes, NiftiType::Int16, data.view()).unwrap();
        let values: Vec<i16> = bytes
            .chunks(2)
            .map(|c| i16::from_le_bytes([c[0], c[1]]))
            .collect();
        assert_eq!(values, vec![1, 2, -3, i16::MAX, i16::MIN, 0]);
    }

    #[test]
    fn complex_payload_has_zero_imaginary_part() {
        let data = ndarray::arr1(&[1.5f64]).into_dyn();
        let mut bytes = Vec::new();
        write_data(&mut bytes, NiftiType::Complex64, data.view()).unwrap();
        assert_eq!(&bytes[..4], &1.5f32.to_le_bytes());
        assert_eq!(&bytes[4..], &0f32.to_le_bytes());
    }

    #[test]
    fn unwritable_types() {
        for t in &[
            NiftiType::Binary,
            NiftiType::Rgb24,
            NiftiType::Rgba32,
            NiftiType::Float128,
            NiftiType::Complex256,
        ] {
            assert!(matches!(
                check_writable(*t),
                Err(NiftiError::UnsupportedDataType(_))
            ));
        }
        for t in &[
            NiftiType::Uint8,
            NiftiType::Int64,
            NiftiType::Float64,
            NiftiType::Complex64,
            NiftiType::Complex128,
        ] {
            assert!(check_writable(*t).is_ok());
        }
    }
}
