//! Modal dialogs the locator asks the UI to present.

use super::request::RequestId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    /// Asks the user whether to request location permission
    PermissionPrompt,
    /// Explains that permission is denied and links to settings
    PermissionDenied,
    Error,
    DistanceResult,
}

/// What choosing an action means to the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionRole {
    Confirm,
    Cancel,
    /// Opens the system settings; handled by the presenter itself
    OpenSettings,
    Dismiss,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertAction {
    pub label: String,
    pub role: ActionRole,
}

impl AlertAction {
    pub fn new(label: impl Into<String>, role: ActionRole) -> Self {
        Self { label: label.into(), role }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
    pub actions: Vec<AlertAction>,
    /// Request this alert belongs to; prompt answers must quote it back
    pub request: RequestId,
}

impl Alert {
    pub fn permission_prompt(request: RequestId) -> Self {
        Self {
            kind: AlertKind::PermissionPrompt,
            title: "Location Permission".to_string(),
            message: "Location access is needed to measure the distance between the selected \
                      point and your current location. Allow access?"
                .to_string(),
            actions: vec![
                AlertAction::new("Allow", ActionRole::Confirm),
                AlertAction::new("Cancel", ActionRole::Cancel),
            ],
            request,
        }
    }

    pub fn permission_denied(request: RequestId) -> Self {
        Self {
            kind: AlertKind::PermissionDenied,
            title: "Location Permission Required".to_string(),
            message: "Location permission was denied. Please allow access in Settings."
                .to_string(),
            actions: vec![
                AlertAction::new("Open Settings", ActionRole::OpenSettings),
                AlertAction::new("Cancel", ActionRole::Cancel),
            ],
            request,
        }
    }

    pub fn error(request: RequestId, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            title: "Error".to_string(),
            message: message.into(),
            actions: vec![AlertAction::new("OK", ActionRole::Dismiss)],
            request,
        }
    }

    pub fn distance_result(request: RequestId, place_label: &str, rounded_meters: u64) -> Self {
        Self {
            kind: AlertKind::DistanceResult,
            title: "Distance Result".to_string(),
            message: format!(
                "The selected location ({place_label}) is {rounded_meters} meters from your \
                 current location."
            ),
            actions: vec![AlertAction::new("OK", ActionRole::Dismiss)],
            request,
        }
    }

    /// Find the action playing the given role
    pub fn action(&self, role: ActionRole) -> Option<&AlertAction> {
        self.actions.iter().find(|action| action.role == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_offers_confirm_and_cancel() {
        let alert = Alert::permission_prompt(RequestId(1));
        assert_eq!(alert.kind, AlertKind::PermissionPrompt);
        assert!(alert.action(ActionRole::Confirm).is_some());
        assert!(alert.action(ActionRole::Cancel).is_some());
    }

    #[test]
    fn test_denied_alert_links_settings() {
        let alert = Alert::permission_denied(RequestId(2));
        assert_eq!(alert.action(ActionRole::OpenSettings).map(|a| a.label.as_str()), Some("Open Settings"));
    }

    #[test]
    fn test_result_message() {
        let alert = Alert::distance_result(RequestId(1), "Seoul", 1028);
        assert_eq!(
            alert.message,
            "The selected location (Seoul) is 1028 meters from your current location."
        );
    }
}
