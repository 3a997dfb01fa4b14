//! Error types for MyLocation

use crate::models::RequestId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocationError {
    // Permission errors
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("User cancelled permission request")]
    PermissionRequestCancelled,

    #[error("Unknown authorization status")]
    UnknownAuthorizationStatus,

    // Positioning errors
    #[error("Current location unavailable")]
    CurrentLocationUnavailable,

    #[error("Positioning service error: {0}")]
    PositioningService(#[from] PositioningError),

    // Request slot errors
    #[error("Request {request} was superseded by a newer distance check")]
    RequestSuperseded { request: RequestId },

    #[error("A distance check is already in progress ({pending})")]
    Busy { pending: RequestId },

    #[error("Invalid coordinate ({latitude}, {longitude}): {reason}")]
    InvalidCoordinate {
        latitude: f64,
        longitude: f64,
        reason: String,
    },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LocationError {
    /// Whether this error ends a request because of the permission flow
    pub fn is_permission_error(&self) -> bool {
        matches!(
            self,
            LocationError::PermissionDenied
                | LocationError::PermissionRequestCancelled
                | LocationError::UnknownAuthorizationStatus
        )
    }
}

/// Failure category reported by the platform positioning service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositioningErrorCode {
    /// No fix could be obtained right now (signal loss)
    LocationUnknown,
    /// The platform refused access at the service level
    Denied,
    /// Network-assisted positioning failed
    Network,
    Other,
}

/// Device-level error raised by the positioning service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} ({code:?})")]
pub struct PositioningError {
    pub code: PositioningErrorCode,
    pub message: String,
}

impl PositioningError {
    pub fn new(code: PositioningErrorCode, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// Signal loss: no fix available at the moment
    pub fn location_unknown() -> Self {
        Self::new(PositioningErrorCode::LocationUnknown, "Location currently unavailable")
    }
}

/// Failure reported by the reverse geocoding collaborator
///
/// Never surfaced to callers; the locator degrades to a placeholder label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Reverse geocoding failed: {0}")]
pub struct GeocodeError(pub String);

pub type Result<T> = std::result::Result<T, LocationError>;
