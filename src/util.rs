//! Private utility module
use std::path::{Path, PathBuf};

/// Extension of single-file NIfTI-1 objects.
pub const NII_EXTENSION: &str = "nii";

/// Check whether the path ends with the `.nii` extension, ignoring case.
pub fn is_nii_file<P>(path: P) -> bool
where
    P: AsRef<Path>,
{
    path.as_ref()
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case(NII_EXTENSION))
        .unwrap_or(false)
}

/// Append `.nii` to a path unless it already has that extension.
pub fn into_nii_path<P>(path: P) -> PathBuf
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if is_nii_file(path) {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_owned();
        name.push(".");
        name.push(NII_EXTENSION);
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::{into_nii_path, is_nii_file};
    use std::path::PathBuf;

    #[test]
    fn nii_filenames() {
        assert!(is_nii_file("brain.nii"));
        assert!(is_nii_file("/data/T1.NII"));
        assert!(!is_nii_file("brain"));
        assert!(!is_nii_file("brain.nii.gz"));
        assert!(!is_nii_file("brain.hdr"));
    }

    #[test]
    fn append_extension() {
        assert_eq!(into_nii_path("brain"), PathBuf::from("brain.nii"));
        assert_eq!(into_nii_path("brain.nii"), PathBuf::from("brain.nii"));
        assert_eq!(into_nii_path("dir/T1.Nii"), PathBuf::from("dir/T1.Nii"));
        assert_eq!(into_nii_path("scan.v2"), PathBuf::from("scan.v2.nii"));
        assert_eq!(into_nii_path("brain.nii.gz"), PathBuf::from("brain.nii.gz.nii"));
    }
}
