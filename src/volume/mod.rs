//! This module defines the voxel input API: the element types accepted
//! by the writer and the validated volume shape derived from an array.

pub mod element;
pub mod shape;

pub use self::element::{to_real, Diagnostic, VoxelElement};
pub use self::shape::Dim;
