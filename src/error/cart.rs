//! Cart and checkout errors

use super::ArmoryError;

/// Creates a tool not found error
pub fn tool_not_found(id: impl Into<String>) -> ArmoryError {
    ArmoryError::ToolNotFound { id: id.into() }
}

/// Creates a tool not installable error
pub fn not_installable(id: impl Into<String>, status: impl Into<String>) -> ArmoryError {
    ArmoryError::ToolNotInstallable {
        id: id.into(),
        status: status.into(),
    }
}
