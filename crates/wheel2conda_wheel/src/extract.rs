//! Unpacking of wheel archives

use std::path::Path;

use fs_err::File;
use tempfile::TempDir;

use crate::WheelError;

/// Extract a wheel into a fresh temporary directory.
///
/// The directory is removed when the returned [`TempDir`] is dropped or
/// closed.
pub fn extract_wheel(wheel: &Path) -> Result<TempDir, WheelError> {
    let target = tempfile::Builder::new().prefix("wheel2conda-").tempdir()?;
    tracing::debug!(
        "extracting {} to {}",
        wheel.display(),
        target.path().display()
    );

    let file = File::open(wheel)?;
    let buf_reader = std::io::BufReader::with_capacity(1024 * 1024, file);
    let mut archive =
        zip::ZipArchive::new(buf_reader).map_err(|e| WheelError::InvalidZip(e.to_string()))?;

    archive
        .extract(target.path())
        .map_err(|e| WheelError::Extraction(e.to_string()))?;

    Ok(target)
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_extract_wheel() {
        let dir = tempfile::tempdir().unwrap();
        let wheel = dir.path().join("demo-1.0-py3-none-any.whl");

        let mut writer = zip::ZipWriter::new(File::create(&wheel).unwrap());
        let options = zip::write::SimpleFileOptions::default();
        writer.start_file("demo/__init__.py", options).unwrap();
        writer.write_all(b"VALUE = 1\n").unwrap();
        writer.finish().unwrap();

        let extracted = extract_wheel(&wheel).unwrap();
        assert_eq!(
            fs_err::read_to_string(extracted.path().join("demo/__init__.py")).unwrap(),
            "VALUE = 1\n"
        );
    }

    #[test]
    fn test_not_a_zip() {
        let dir = tempfile::tempdir().unwrap();
        let wheel = dir.path().join("broken.whl");
        fs_err::write(&wheel, b"definitely not a zip").unwrap();

        assert!(matches!(
            extract_wheel(&wheel),
            Err(WheelError::InvalidZip(_))
        ));
    }
}
