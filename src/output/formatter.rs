use std::path::{Component, Path, PathBuf};

use crate::error::Error;

/// Write the rendered policy module to `<output_dir>/<file_name>`.
///
/// Creates the output directory (and parents) first, then writes the whole
/// buffer in one call; the caller treats the write as failed-or-complete.
/// An existing file at the destination is overwritten. Returns the written
/// path.
pub fn write_output(output_dir: &Path, file_name: &str, module: &str) -> Result<PathBuf, Error> {
    validate_file_name(file_name)?;

    std::fs::create_dir_all(output_dir).map_err(|source| Error::CreateOutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let path = output_dir.join(file_name);
    std::fs::write(&path, module).map_err(|source| Error::WriteArtifact {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

fn validate_file_name(name: &str) -> Result<(), Error> {
    if name.trim().is_empty() {
        return Err(Error::InvalidFileName {
            name: name.to_string(),
            reason: "file name must not be empty",
        });
    }
    let candidate = Path::new(name);
    if candidate.is_absolute() {
        return Err(Error::InvalidFileName {
            name: name.to_string(),
            reason: "absolute paths are not allowed",
        });
    }
    if candidate.components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    }) {
        return Err(Error::InvalidFileName {
            name: name.to_string(),
            reason: "traversal segments are not allowed",
        });
    }
    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFileName {
            name: name.to_string(),
            reason: "path separators are not allowed",
        });
    }
    Ok(())
}
