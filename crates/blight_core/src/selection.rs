//! Turning drag-and-drop and file-picker input into a selected image.

use crate::error::SelectionError;
use crate::model::SelectedFile;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions offered by the file picker and accepted from drops.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "tif", "tiff"];

/// Receiver of accepted files, whatever widget delivered them.
pub trait FileSink {
    fn on_files_accepted(&mut self, files: Vec<SelectedFile>);
}

/// A file as a drop source hands it over: either a path on disk or bytes
/// the platform already read for us.
#[derive(Debug, Clone)]
pub enum DroppedFile {
    Path(PathBuf),
    Bytes { name: String, bytes: Vec<u8> },
}

/// Image MIME type for a file name, `None` when it is not an image.
pub fn image_content_type(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        _ => return None,
    };
    Some(mime)
}

/// Keep the image files among `dropped`, reading paths from disk.
///
/// Non-image entries are skipped without reading them. The caller decides
/// what to do when the result holds more than one file.
pub fn accept_dropped(dropped: Vec<DroppedFile>) -> Result<Vec<SelectedFile>, SelectionError> {
    let mut accepted = Vec::new();
    for item in dropped {
        match item {
            DroppedFile::Path(path) => {
                let name = display_name(&path);
                let Some(content_type) = image_content_type(&name) else {
                    tracing::debug!("rejecting non-image drop {}", path.display());
                    continue;
                };
                let bytes = fs::read(&path).map_err(|source| SelectionError::Read {
                    path: path.clone(),
                    source,
                })?;
                accepted.push(SelectedFile::new(name, content_type, bytes));
            }
            DroppedFile::Bytes { name, bytes } => match image_content_type(&name) {
                Some(content_type) => accepted.push(SelectedFile::new(name, content_type, bytes)),
                None => tracing::debug!("rejecting non-image drop {name}"),
            },
        }
    }
    Ok(accepted)
}

/// Shorthand for picker results, which are always paths.
pub fn accept_paths<I, P>(paths: I) -> Result<Vec<SelectedFile>, SelectionError>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    accept_dropped(
        paths
            .into_iter()
            .map(|p| DroppedFile::Path(p.into()))
            .collect(),
    )
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
