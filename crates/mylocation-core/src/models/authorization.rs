use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform-reported permission level for location access
///
/// The platform owns this value; the locator only mirrors it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AuthorizationState {
    /// A status value the platform reported that we do not recognize
    Unknown,
    /// The user has not been asked yet
    #[default]
    NotDetermined,
    Denied,
    /// Access is blocked by policy (parental controls, MDM)
    Restricted,
    AuthorizedWhenInUse,
    AuthorizedAlways,
}

impl AuthorizationState {
    pub fn is_authorized(&self) -> bool {
        matches!(
            self,
            AuthorizationState::AuthorizedWhenInUse | AuthorizationState::AuthorizedAlways
        )
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, AuthorizationState::Denied | AuthorizationState::Restricted)
    }
}

impl fmt::Display for AuthorizationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthorizationState::Unknown => "unknown",
            AuthorizationState::NotDetermined => "not-determined",
            AuthorizationState::Denied => "denied",
            AuthorizationState::Restricted => "restricted",
            AuthorizationState::AuthorizedWhenInUse => "when-in-use",
            AuthorizationState::AuthorizedAlways => "always",
        };
        f.write_str(name)
    }
}
