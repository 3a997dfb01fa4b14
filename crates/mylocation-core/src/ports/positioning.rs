use crate::models::AuthorizationState;

/// Port for the platform positioning service
///
/// Calls here only start work. Authorization changes, position fixes and
/// failures come back later as events on the main loop.
pub trait PositioningService {
    /// Current authorization status as reported by the platform
    fn authorization_status(&self) -> AuthorizationState;

    /// Ask the platform to show its own when-in-use authorization prompt
    fn request_when_in_use_authorization(&self);

    /// Begin delivering continuous position updates
    fn start_updating_location(&self);

    /// Stop delivering position updates
    fn stop_updating_location(&self);
}
