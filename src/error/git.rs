//! Git operation errors

use super::ArmoryError;

/// Creates a git operation failed error
pub fn operation_failed(message: impl Into<String>) -> ArmoryError {
    ArmoryError::GitOperationFailed {
        message: message.into(),
    }
}
