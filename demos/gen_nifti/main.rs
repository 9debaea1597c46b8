//! An application for writing a NIfTI-1 file from scratch:
//! a 4D phantom quantized to 16-bit integers.

use std::env;

use nifti_writer::WriterOptions;

fn main() -> nifti_writer::Result<()> {
    tracing_subscriber::fmt().with_env_filter("debug").init();

    let mut args = env::args().skip(1);
    let filename = args.next().expect("Path to NIFTI file is required");

    // a sphere of increasing intensity over 5 frames, 64x64x32
    let data = ndarray::Array4::<f32>::from_shape_fn((64, 64, 32, 5), |(x, y, z, t)| {
        let (dx, dy, dz) = (x as f32 - 32., y as f32 - 32., (z as f32 - 16.) * 2.);
        if dx * dx + dy * dy + dz * dz < 400. {
            100. + 10. * t as f32
        } else {
            0.
        }
    });

    let written = WriterOptions::new(&filename)
        .field_of_view(&[192., 192., 96.])
        .repetition_time(2000.)
        .precision("int16")
        .write_nifti(&data)?;

    println!(
        "wrote {} (scl_slope = {}, scl_inter = {})",
        written.path.display(),
        written.header.scl_slope,
        written.header.scl_inter
    );
    Ok(())
}
