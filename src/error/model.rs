//! Model catalog errors

use super::SetupError;

/// Creates an unknown model error
pub fn unknown(id: &str) -> SetupError {
    SetupError::UnknownModel { id: id.to_string() }
}
