use byteordered::ByteOrdered;
use nifti_writer::NiftiHeader;
use std::io::Read;

/// Decode a little-endian NIfTI-1 header from the start of `bytes`, using
/// the field offsets of the standard.
pub fn read_header(bytes: &[u8]) -> NiftiHeader {
    let mut h = NiftiHeader::default();
    let mut input = ByteOrdered::le(bytes);

    h.sizeof_hdr = input.read_i32().unwrap();
    input.read_exact(&mut h.data_type).unwrap();
    input.read_exact(&mut h.db_name).unwrap();
    h.extents = input.read_i32().unwrap();
    h.session_error = input.read_i16().unwrap();
    h.regular = input.read_u8().unwrap();
    h.dim_info = input.read_u8().unwrap();
    for v in &mut h.dim {
        *v = input.read_u16().unwrap();
    }
    h.intent_p1 = input.read_f32().unwrap();
    h.intent_p2 = input.read_f32().unwrap();
    h.intent_p3 = input.read_f32().unwrap();
    h.intent_code = input.read_i16().unwrap();
    h.datatype = input.read_i16().unwrap();
    h.bitpix = input.read_i16().unwrap();
    h.slice_start = input.read_i16().unwrap();
    for v in &mut h.pixdim {
        *v = input.read_f32().unwrap();
    }
    h.vox_offset = input.read_f32().unwrap();
    h.scl_slope = input.read_f32().unwrap();
    h.scl_inter = input.read_f32().unwrap();
    h.slice_end = input.read_i16().unwrap();
    h.slice_code = input.read_u8().unwrap();
    h.xyzt_units = input.read_u8().unwrap();
    h.cal_max = input.read_f32().unwrap();
    h.cal_min = input.read_f32().unwrap();
    h.slice_duration = input.read_f32().unwrap();
    h.toffset = input.read_f32().unwrap();
    h.glmax = input.read_i32().unwrap();
    h.glmin = input.read_i32().unwrap();

    input.read_exact(h.descrip.as_mut_slice()).unwrap();
    input.read_exact(&mut h.aux_file).unwrap();
    h.qform_code = input.read_i16().unwrap();
    h.sform_code = input.read_i16().unwrap();
    h.quatern_b = input.read_f32().unwrap();
    h.quatern_c = input.read_f32().unwrap();
    h.quatern_d = input.read_f32().unwrap();
    h.quatern_x = input.read_f32().unwrap();
    h.quatern_y = input.read_f32().unwrap();
    h.quatern_z = input.read_f32().unwrap();
    for v in h
        .srow_x
        .iter_mut()
        .chain(h.srow_y.iter_mut())
        .chain(h.srow_z.iter_mut())
    {
        *v = input.read_f32().unwrap();
    }
    input.read_exact(&mut h.intent_name).unwrap();
    input.read_exact(&mut h.magic).unwrap();
    h
}

/// The voxel bytes of a single-file object.
#[allow(dead_code)]
pub fn payload(bytes: &[u8]) -> &[u8] {
    let vox_offset = read_header(bytes).vox_offset as usize;
    &bytes[vox_offset..]
}

#[allow(dead_code)]
pub fn payload_i16(bytes: &[u8]) -> Vec<i16> {
    payload(bytes)
        .chunks_exact(2)
        .map(|c| i16::from_le_bytes([c[0], c[1]]))
        .collect()
}

#[allow(dead_code)]
pub fn payload_f32(bytes: &[u8]) -> Vec<f32> {
    payload(bytes)
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

#[allow(dead_code)]
pub fn payload_u8(bytes: &[u8]) -> Vec<u8> {
    payload(bytes).to_vec()
}
