//! File system errors

use std::path::Path;

use super::SetupError;

/// Creates a write failed error for a path
pub fn write_failed(path: &Path, err: &std::io::Error) -> SetupError {
    SetupError::FileWriteFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates an install failed error for a path
pub fn install_failed(path: &Path, err: &std::io::Error) -> SetupError {
    SetupError::InstallFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> SetupError {
    SetupError::IoError {
        message: message.into(),
    }
}
