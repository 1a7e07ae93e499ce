use std::fmt;

use crate::capture::capture_model::ScanCapture;

// ============================================================================
// Capture loading
// ============================================================================

#[derive(Debug)]
pub enum CaptureError {
    /// Capture file could not be read
    Read { path: String, source: std::io::Error },

    /// Capture file is not valid capture JSON
    Parse { path: String, source: serde_json::Error },

    /// Capture parsed but contains no pages
    Empty { path: String },
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Read { path, source } => {
                write!(f, "Failed to read capture file {}: {}", path, source)
            }
            CaptureError::Parse { path, source } => {
                write!(f, "Capture file {} is not valid capture JSON: {}", path, source)
            }
            CaptureError::Empty { path } => {
                write!(f, "Capture file {} contains no pages", path)
            }
        }
    }
}

impl std::error::Error for CaptureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CaptureError::Read { source, .. } => Some(source),
            CaptureError::Parse { source, .. } => Some(source),
            CaptureError::Empty { .. } => None,
        }
    }
}

/// Load a scan capture from a JSON file written by the rendering
/// collaborator. A capture with zero pages is rejected here; the engine
/// itself tolerates empty pages, but an empty capture file means the
/// collaborator never delivered anything worth reporting on.
pub fn load_capture(path: &str) -> Result<ScanCapture, CaptureError> {
    let content = std::fs::read_to_string(path).map_err(|source| CaptureError::Read {
        path: path.to_string(),
        source,
    })?;

    let capture: ScanCapture =
        serde_json::from_str(&content).map_err(|source| CaptureError::Parse {
            path: path.to_string(),
            source,
        })?;

    if capture.pages.is_empty() {
        return Err(CaptureError::Empty {
            path: path.to_string(),
        });
    }

    Ok(capture)
}
