//! In-memory collaborators for development and testing.
//!
//! These stand in for the platform positioning service, the geocoder, the
//! dialog layer and the map view. They post their asynchronous answers onto
//! an `EventSink`, so a `MainLoop` sees the same event order a device would
//! produce. All of them are single-threaded (`Cell`/`RefCell`).

use crate::events::{EventSink, LocatorEvent};
use mylocation_core::models::{
    ActionRole, Alert, AlertKind, Annotation, AuthorizationState, Coordinate, Placemark, Position,
    Region, RequestId,
};
use mylocation_core::ports::{AlertPresenter, Geocoder, MapSurface, PositioningService};
use mylocation_core::{GeocodeError, PositioningError};
use std::cell::{Cell, RefCell};

/// What the simulated device produces once updates start
#[derive(Debug, Clone, PartialEq)]
pub enum FixScript {
    /// Deliver this fix every time updates are started
    Fix(Position),
    /// Fail with this error every time updates are started
    Failure(PositioningError),
    /// Never deliver anything on its own
    Silent,
}

/// Scripted stand-in for the platform positioning service
#[derive(Debug)]
pub struct SimulatedPositioningService {
    sink: EventSink,
    status: Cell<AuthorizationState>,
    /// Status the platform prompt resolves to when authorization is requested
    grant: Cell<AuthorizationState>,
    script: RefCell<FixScript>,
    updating: Cell<bool>,
    start_calls: Cell<usize>,
    stop_calls: Cell<usize>,
    authorization_requests: Cell<usize>,
}

impl SimulatedPositioningService {
    pub fn new(sink: EventSink, status: AuthorizationState) -> Self {
        Self {
            sink,
            status: Cell::new(status),
            grant: Cell::new(AuthorizationState::AuthorizedWhenInUse),
            script: RefCell::new(FixScript::Silent),
            updating: Cell::new(false),
            start_calls: Cell::new(0),
            stop_calls: Cell::new(0),
            authorization_requests: Cell::new(0),
        }
    }

    /// Status the system prompt settles on when the app requests authorization
    pub fn with_grant(self, grant: AuthorizationState) -> Self {
        self.grant.set(grant);
        self
    }

    pub fn with_script(self, script: FixScript) -> Self {
        *self.script.borrow_mut() = script;
        self
    }

    pub fn set_script(&self, script: FixScript) {
        *self.script.borrow_mut() = script;
    }

    /// Change the status from outside the app (e.g. in system settings)
    pub fn set_authorization(&self, status: AuthorizationState) {
        self.status.set(status);
        self.sink.post(LocatorEvent::AuthorizationChanged(status));
    }

    /// Deliver a fix right away, as a running update stream would
    pub fn push_fix(&self, position: Position) {
        self.sink.post(LocatorEvent::LocationsUpdated(vec![position]));
    }

    /// Report a device-level failure right away
    pub fn fail(&self, error: PositioningError) {
        self.sink.post(LocatorEvent::PositioningFailed(error));
    }

    pub fn is_updating(&self) -> bool {
        self.updating.get()
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.get()
    }

    pub fn stop_calls(&self) -> usize {
        self.stop_calls.get()
    }

    pub fn authorization_requests(&self) -> usize {
        self.authorization_requests.get()
    }
}

impl PositioningService for SimulatedPositioningService {
    fn authorization_status(&self) -> AuthorizationState {
        self.status.get()
    }

    fn request_when_in_use_authorization(&self) {
        self.authorization_requests.set(self.authorization_requests.get() + 1);
        // The platform only prompts once; later requests are no-ops.
        if self.status.get() == AuthorizationState::NotDetermined {
            self.set_authorization(self.grant.get());
        }
    }

    fn start_updating_location(&self) {
        self.start_calls.set(self.start_calls.get() + 1);
        self.updating.set(true);
        match &*self.script.borrow() {
            FixScript::Fix(position) => self.push_fix(position.clone()),
            FixScript::Failure(error) => self.fail(error.clone()),
            FixScript::Silent => {}
        }
    }

    fn stop_updating_location(&self) {
        self.stop_calls.set(self.stop_calls.get() + 1);
        self.updating.set(false);
    }
}

/// Geocoder answering every lookup with the same result
#[derive(Debug)]
pub struct StaticGeocoder {
    sink: EventSink,
    answer: Option<Result<Vec<Placemark>, GeocodeError>>,
    lookups: RefCell<Vec<(RequestId, Coordinate)>>,
}

impl StaticGeocoder {
    pub fn new(sink: EventSink, placemarks: Vec<Placemark>) -> Self {
        Self { sink, answer: Some(Ok(placemarks)), lookups: RefCell::new(Vec::new()) }
    }

    pub fn failing(sink: EventSink, message: impl Into<String>) -> Self {
        Self {
            sink,
            answer: Some(Err(GeocodeError(message.into()))),
            lookups: RefCell::new(Vec::new()),
        }
    }

    /// A geocoder that never answers; lookups stay in flight
    pub fn unresponsive(sink: EventSink) -> Self {
        Self { sink, answer: None, lookups: RefCell::new(Vec::new()) }
    }

    pub fn lookups(&self) -> Vec<(RequestId, Coordinate)> {
        self.lookups.borrow().clone()
    }

    /// Answer a lookup by hand, e.g. for one left in flight
    pub fn respond(&self, request: RequestId, result: Result<Vec<Placemark>, GeocodeError>) {
        self.sink.post(LocatorEvent::PlacemarksResolved { request, result });
    }
}

impl Geocoder for StaticGeocoder {
    fn reverse_geocode(&self, request: RequestId, coordinate: Coordinate) {
        self.lookups.borrow_mut().push((request, coordinate));
        if let Some(answer) = &self.answer {
            self.respond(request, answer.clone());
        }
    }
}

/// Presenter that records alerts and optionally answers permission prompts
#[derive(Debug)]
pub struct RecordingPresenter {
    sink: EventSink,
    prompt_answer: Cell<Option<bool>>,
    alerts: RefCell<Vec<Alert>>,
    settings_opened: Cell<usize>,
}

impl RecordingPresenter {
    /// A presenter that leaves prompts unanswered
    pub fn new(sink: EventSink) -> Self {
        Self {
            sink,
            prompt_answer: Cell::new(None),
            alerts: RefCell::new(Vec::new()),
            settings_opened: Cell::new(0),
        }
    }

    /// Answer every permission prompt with `granted`
    pub fn answering(self, granted: bool) -> Self {
        self.prompt_answer.set(Some(granted));
        self
    }

    /// Answer a prompt by hand, as if the user tapped a button
    pub fn choose(&self, request: RequestId, role: ActionRole) {
        match role {
            ActionRole::Confirm => self
                .sink
                .post(LocatorEvent::PermissionPromptAnswered { request, granted: true }),
            ActionRole::Cancel => self
                .sink
                .post(LocatorEvent::PermissionPromptAnswered { request, granted: false }),
            ActionRole::OpenSettings => self.open_settings(),
            ActionRole::Dismiss => {}
        }
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.borrow().clone()
    }

    pub fn kinds(&self) -> Vec<AlertKind> {
        self.alerts.borrow().iter().map(|alert| alert.kind).collect()
    }

    pub fn last(&self) -> Option<Alert> {
        self.alerts.borrow().last().cloned()
    }

    pub fn settings_opened(&self) -> usize {
        self.settings_opened.get()
    }
}

impl AlertPresenter for RecordingPresenter {
    fn present(&self, alert: &Alert) {
        self.alerts.borrow_mut().push(alert.clone());
        if alert.kind == AlertKind::PermissionPrompt {
            if let Some(granted) = self.prompt_answer.get() {
                let role = if granted { ActionRole::Confirm } else { ActionRole::Cancel };
                self.choose(alert.request, role);
            }
        }
    }

    fn open_settings(&self) {
        self.settings_opened.set(self.settings_opened.get() + 1);
    }
}

/// Map surface keeping pins and viewport in memory
#[derive(Debug, Default)]
pub struct MemoryMapSurface {
    region: Cell<Option<Region>>,
    annotations: RefCell<Vec<Annotation>>,
}

impl MemoryMapSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(&self) -> Option<Region> {
        self.region.get()
    }
}

impl MapSurface for MemoryMapSurface {
    fn set_region(&self, region: Region) {
        self.region.set(Some(region));
    }

    fn add_annotation(&self, annotation: Annotation) {
        self.annotations.borrow_mut().push(annotation);
    }

    fn remove_all_annotations(&self) {
        self.annotations.borrow_mut().clear();
    }

    fn annotations(&self) -> Vec<Annotation> {
        self.annotations.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_request_posts_grant_once() {
        let sink = EventSink::new();
        let service = SimulatedPositioningService::new(sink.clone(), AuthorizationState::NotDetermined)
            .with_grant(AuthorizationState::Denied);

        service.request_when_in_use_authorization();
        service.request_when_in_use_authorization();

        assert_eq!(service.authorization_status(), AuthorizationState::Denied);
        assert_eq!(service.authorization_requests(), 2);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_start_updates_follows_script() {
        let sink = EventSink::new();
        let service = SimulatedPositioningService::new(sink.clone(), AuthorizationState::AuthorizedAlways)
            .with_script(FixScript::Failure(PositioningError::location_unknown()));

        service.start_updating_location();
        assert!(service.is_updating());
        assert_eq!(sink.len(), 1);

        service.stop_updating_location();
        assert!(!service.is_updating());
        assert_eq!(service.stop_calls(), 1);
    }

    #[test]
    fn test_unresponsive_geocoder_records_lookup() {
        let sink = EventSink::new();
        let geocoder = StaticGeocoder::unresponsive(sink.clone());

        geocoder.reverse_geocode(RequestId(4), Coordinate::new(1.0, 2.0));

        assert_eq!(geocoder.lookups(), vec![(RequestId(4), Coordinate::new(1.0, 2.0))]);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_presenter_records_and_opens_settings() {
        let presenter = RecordingPresenter::new(EventSink::new());
        let alert = Alert::permission_denied(RequestId(1));

        presenter.present(&alert);
        presenter.choose(alert.request, ActionRole::OpenSettings);

        assert_eq!(presenter.kinds(), vec![AlertKind::PermissionDenied]);
        assert_eq!(presenter.settings_opened(), 1);
    }
}
