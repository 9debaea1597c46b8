//! This module defines the `NiftiHeader` struct, which holds every
//! field of the 348-byte NIfTI-1 header in on-disk order.

use crate::error::{NiftiError, Result};
use crate::typedef::{NiftiType, Unit, XForm};
use std::ops::Deref;

/// Magic code for NIFTI-1 header files (extention ".hdr").
pub const MAGIC_CODE_NI1: &[u8; 4] = b"ni1\0";
/// Magic code for full NIFTI-1 files (extention ".nii").
pub const MAGIC_CODE_NIP1: &[u8; 4] = b"n+1\0";

/// Value of `sizeof_hdr`.
pub const HEADER_SIZE: i32 = 348;
/// Byte offset of the voxel data in a single-file NIfTI-1 object:
/// the header plus the 4-byte extension flag.
pub const SINGLE_FILE_VOX_OFFSET: f32 = 352.;

/// The NIFTI-1 header data type.
/// All fields are public and named after the specification's header file.
/// The type of each field was adjusted according to their use and
/// array limitations.
///
/// # Examples
///
/// ```
/// use nifti_writer::{NiftiHeader, NiftiType};
///
/// let hdr = NiftiHeader {
///     cal_min: 0.,
///     cal_max: 128.,
///     ..NiftiHeader::for_datatype(NiftiType::Uint8)
/// };
/// assert_eq!(hdr.bitpix, 8);
/// assert_eq!(hdr.cal_max, 128.);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NiftiHeader {
    /// Header size, must be 348
    pub sizeof_hdr: i32,
    /// Unused in NIFTI-1
    pub data_type: [u8; 10],
    /// Unused in NIFTI-1
    pub db_name: [u8; 18],
    /// Unused in NIFTI-1
    pub extents: i32,
    /// Unused in NIFTI-1
    pub session_error: i16,
    /// Unused in NIFTI-1
    pub regular: u8,
    /// MRI slice ordering
    pub dim_info: u8,
    /// Data array dimensions
    pub dim: [u16; 8],
    /// 1st intent parameter
    pub intent_p1: f32,
    /// 2nd intent parameter
    pub intent_p2: f32,
    /// 3rd intent parameter
    pub intent_p3: f32,
    /// NIFTI_INTENT_* code
    pub intent_code: i16,
    /// Defines the data type!
    pub datatype: i16,
    /// Number of bits per voxel
    pub bitpix: i16,
    /// First slice index
    pub slice_start: i16,
    /// Grid spacings
    pub pixdim: [f32; 8],
    /// Offset into .nii file to reach the volume
    pub vox_offset: f32,
    /// Data scaling: slope
    pub scl_slope: f32,
    /// Data scaling: offset
    pub scl_inter: f32,
    /// Last slice index
    pub slice_end: i16,
    /// Slice timing order
    pub slice_code: u8,
    /// Units of pixdim[1..4]
    pub xyzt_units: u8,
    /// Max display intensity
    pub cal_max: f32,
    /// Min display intensity
    pub cal_min: f32,
    /// Time for 1 slice
    pub slice_duration: f32,
    /// Time axis shift
    pub toffset: f32,
    /// Unused in NIFTI-1
    pub glmax: i32,
    /// Unused in NIFTI-1
    pub glmin: i32,

    /// Any text you like
    pub descrip: Vec<u8>,
    /// Auxiliary filename
    pub aux_file: [u8; 24],
    /// NIFTI_XFORM_* code
    pub qform_code: i16,
    /// NIFTI_XFORM_* code
    pub sform_code: i16,
    /// Quaternion b param
    pub quatern_b: f32,
    /// Quaternion c param
    pub quatern_c: f32,
    /// Quaternion d param
    pub quatern_d: f32,
    /// Quaternion x shift
    pub quatern_x: f32,
    /// Quaternion y shift
    pub quatern_y: f32,
    /// Quaternion z shift
    pub quatern_z: f32,

    /// 1st row affine transform
    pub srow_x: [f32; 4],
    /// 2nd row affine transform
    pub srow_y: [f32; 4],
    /// 3rd row affine transform
    pub srow_z: [f32; 4],

    /// 'name' or meaning of data
    pub intent_name: [u8; 16],

    /// Magic code. Must be `b"ni1\0"` or `b"n+1\0"`
    pub magic: [u8; 4],
}

impl Default for NiftiHeader {
    fn default() -> NiftiHeader {
        NiftiHeader {
            sizeof_hdr: HEADER_SIZE,
            data_type: [0; 10],
            db_name: [0; 18],
            extents: 0,
            session_error: 0,
            regular: 0,
            dim_info: 0,
            dim: [1, 0, 0, 0, 0, 0, 0, 0],
            intent_p1: 0.,
            intent_p2: 0.,
            intent_p3: 0.,
            intent_code: 0,
            datatype: 0,
            bitpix: 0,
            slice_start: 0,
            pixdim: [1.; 8],
            vox_offset: SINGLE_FILE_VOX_OFFSET,
            scl_slope: 1.,
            scl_inter: 0.,
            slice_end: 0,
            slice_code: 0,
            xyzt_units: 0,
            cal_max: 0.,
            cal_min: 0.,
            slice_duration: 0.,
            toffset: 0.,
            glmax: 0,
            glmin: 0,

            descrip: vec![0; 80],
            aux_file: [0; 24],
            qform_code: XForm::Unknown as i16,
            sform_code: XForm::Unknown as i16,
            quatern_b: 0.,
            quatern_c: 0.,
            quatern_d: 0.,
            quatern_x: 0.,
            quatern_y: 0.,
            quatern_z: 0.,

            srow_x: [0.; 4],
            srow_y: [0.; 4],
            srow_z: [0.; 4],

            intent_name: [0; 16],

            magic: *MAGIC_CODE_NIP1,
        }
    }
}

impl NiftiHeader {
    /// Build a fresh single-file header for voxels of the given type.
    ///
    /// Apart from `datatype` and `bitpix`, every field holds its default:
    /// a rank-1 `dim`, unit spacings, identity scaling (`scl_slope = 1`,
    /// `scl_inter = 0`), `vox_offset = 352`, units of millimetres and
    /// milliseconds, no intent, no orientation transform, empty text fields
    /// and the `n+1` magic code.
    pub fn for_datatype(datatype: NiftiType) -> NiftiHeader {
        NiftiHeader {
            datatype: datatype as i16,
            bitpix: datatype.bitpix(),
            xyzt_units: Unit::xyzt(Unit::Mm, Unit::Msec),
            ..NiftiHeader::default()
        }
    }

    /// Get the data type as a validated enum.
    pub fn data_type(&self) -> Result<NiftiType> {
        NiftiType::from_code(self.datatype)
    }

    /// The spatial and temporal extents `dim[1..=4]`, reading any axis
    /// beyond the declared rank as 1.
    pub fn extents(&self) -> [u16; 4] {
        let rank = usize::from(self.dim[0]);
        let mut out = [1; 4];
        for (i, e) in out.iter_mut().enumerate() {
            if i < rank {
                *e = self.dim[i + 1];
            }
        }
        out
    }

    /// Ensure that the current `descrip` field is valid and is exactly equal to 80 bytes.
    pub fn validate_description(&mut self) -> Result<()> {
        let len = self.descrip.len();
        if len > 80 {
            Err(NiftiError::IncorrectDescriptionLength(len))
        } else {
            if len < 80 {
                self.descrip.extend((len..80).map(|_| 0));
            }
            Ok(())
        }
    }

    /// Safely set the `descrip` field using a buffer.
    pub fn set_description<D>(&mut self, description: D) -> Result<()>
    where
        D: Into<Vec<u8>>,
        D: Deref<Target = [u8]>,
    {
        let len = description.len();
        if len < 80 {
            let mut descrip = vec![0; 80];
            descrip[..len].copy_from_slice(&description);
            self.descrip = descrip;
            Ok(())
        } else if len == 80 {
            self.descrip = description.into();
            Ok(())
        } else {
            Err(NiftiError::IncorrectDescriptionLength(len))
        }
    }

    /// Safely set the `descrip` field using a  &str.
    pub fn set_description_str<T>(&mut self, description: T) -> Result<()>
    where
        T: Into<String>,
    {
        self.set_description(description.into().as_bytes())
    }

    /// Set the magic code from 3 or 4 bytes; a 3-byte code is padded
    /// with a trailing zero.
    pub fn set_magic(&mut self, magic: &[u8]) -> Result<()> {
        match magic.len() {
            3 | 4 => {
                self.magic = [0; 4];
                self.magic[..magic.len()].copy_from_slice(magic);
                Ok(())
            }
            len => Err(NiftiError::InvalidMagic(len)),
        }
    }
}
