//! Configuration errors

use super::ArmoryError;

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> ArmoryError {
    ArmoryError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> ArmoryError {
    ArmoryError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid mode error
pub fn invalid_mode(value: impl Into<String>) -> ArmoryError {
    ArmoryError::InvalidMode {
        value: value.into(),
    }
}
