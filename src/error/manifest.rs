//! Manifest and catalog errors

use super::ArmoryError;

/// Creates a manifest load failed error
pub fn load_failed(source_path: impl Into<String>, reason: impl Into<String>) -> ArmoryError {
    ArmoryError::ManifestLoadFailed {
        source_path: source_path.into(),
        reason: reason.into(),
    }
}

/// Creates a manifest invalid error
pub fn invalid(message: impl Into<String>) -> ArmoryError {
    ArmoryError::ManifestInvalid {
        message: message.into(),
    }
}

/// Creates a catalog invalid error
pub fn catalog_invalid(path: impl Into<String>, reason: impl Into<String>) -> ArmoryError {
    ArmoryError::CatalogInvalid {
        path: path.into(),
        reason: reason.into(),
    }
}
