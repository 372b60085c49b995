//! Platform errors

use super::SetupError;

/// Creates an unknown platform error
pub fn unknown(os: impl Into<String>, arch: impl Into<String>) -> SetupError {
    SetupError::UnknownPlatform {
        os: os.into(),
        arch: arch.into(),
    }
}

/// Creates an invalid platform tag error
pub fn invalid_tag(tag: impl Into<String>) -> SetupError {
    SetupError::InvalidPlatformTag { tag: tag.into() }
}
