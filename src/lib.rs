//! Writer of NIfTI-1 single-file volumes (`.nii`).
//!
//! An N-dimensional array (up to x, y, z and time) is written with a header
//! resolved from the array shape and optional metadata. When the target
//! precision is narrower than the source data, intensities are quantized onto
//! its full range and the inverse map is recorded in `scl_slope` and
//! `scl_inter`.
//!
//! # Example
//!
//! ```no_run
//! use nifti_writer::WriterOptions;
//! use ndarray::Array3;
//!
//! let data = Array3::<f64>::from_shape_fn((64, 64, 32), |(x, y, z)| (x + y + z) as f64);
//! WriterOptions::new("phantom")
//!     .precision("int16")
//!     .field_of_view(&[192., 192., 96.])
//!     .write_nifti(&data)?;
//! # Ok::<(), nifti_writer::NiftiError>(())
//! ```
#![deny(missing_debug_implementations)]
#![warn(missing_docs, unused_extern_crates, trivial_casts, unused_results)]

pub mod error;
pub mod header;
pub mod resolve;
pub mod scale;
pub mod typedef;
pub mod volume;
pub mod writer;
mod util;

pub use crate::error::{NiftiError, Result};
pub use crate::header::NiftiHeader;
pub use crate::resolve::resolve_header;
pub use crate::scale::{scale_to_full_range, Scaling};
pub use crate::typedef::{code_for, name_for, NiftiType, Unit, XForm};
pub use crate::volume::element::{Diagnostic, VoxelElement};
pub use crate::writer::{WriterOptions, Written};
