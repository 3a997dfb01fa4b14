use crate::models::Alert;

/// Port for the UI context that can show modal alerts
///
/// The locator never owns a presenter; it keeps a weak handle and checks
/// liveness before every call.
pub trait AlertPresenter {
    /// Present a modal alert. For permission prompts the presenter reports
    /// the chosen action back as a prompt-answered event.
    fn present(&self, alert: &Alert);

    /// Navigate to the system settings screen
    fn open_settings(&self) {
        tracing::debug!("open_settings requested but not supported by this presenter");
    }
}
