//! Permission-gated distance checks.
//!
//! `PermissionGatedLocator` owns the conversation with the positioning
//! service. It holds at most one pending distance check, walks it through the
//! permission flow, and resolves it once a fresh fix arrives or the flow fails.
//! Every request is resolved exactly once.

use crate::events::LocatorEvent;
use mylocation_core::config::{BusyPolicy, LocatorConfig};
use mylocation_core::error::{LocationError, Result};
use mylocation_core::models::{
    Alert, AuthorizationState, Coordinate, DistanceReport, Placemark, Position, RequestId,
};
use mylocation_core::ports::{AlertPresenter, Geocoder, PositioningService};
use mylocation_core::{GeocodeError, PositioningError};
use mylocation_geo::{geodesic_distance, round_meters, validate_coordinate};
use std::fmt;
use std::rc::{Rc, Weak};

/// Receives the outcome of a distance check
pub type ResultCallback = Box<dyn FnOnce(RequestId, Result<DistanceReport>)>;

/// Where the pending request is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    /// The in-app permission prompt is on screen
    AwaitingPermission,
    /// The platform authorization prompt was requested
    AwaitingAuthorization,
    /// Updates are running; waiting for the next fix
    AwaitingPosition,
    /// A fix arrived and the reverse lookup is in flight
    Geocoding,
}

struct PendingRequest {
    id: RequestId,
    target: Coordinate,
    surface: Weak<dyn AlertPresenter>,
    callback: ResultCallback,
    phase: RequestPhase,
}

impl PendingRequest {
    fn resolve(self, result: Result<DistanceReport>) {
        match &result {
            Ok(report) => tracing::info!(
                request = %self.id,
                meters = report.rounded_meters,
                "distance check completed"
            ),
            Err(err) => tracing::info!(request = %self.id, error = %err, "distance check failed"),
        }
        (self.callback)(self.id, result);
    }
}

impl fmt::Debug for PendingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingRequest")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("phase", &self.phase)
            .field("surface_alive", &(self.surface.strong_count() > 0))
            .finish()
    }
}

pub struct PermissionGatedLocator {
    positioning: Rc<dyn PositioningService>,
    geocoder: Option<Rc<dyn Geocoder>>,
    config: LocatorConfig,
    authorization: AuthorizationState,
    current_position: Option<Position>,
    pending: Option<PendingRequest>,
    last_request: RequestId,
    updating: bool,
}

impl PermissionGatedLocator {
    pub fn new(positioning: Rc<dyn PositioningService>, config: LocatorConfig) -> Self {
        let authorization = positioning.authorization_status();
        Self {
            positioning,
            geocoder: None,
            config,
            authorization,
            current_position: None,
            pending: None,
            last_request: RequestId(0),
            updating: false,
        }
    }

    /// Use a reverse geocoder for place labels; without one the fallback label is used
    pub fn with_geocoder(mut self, geocoder: Rc<dyn Geocoder>) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    /// Mirrored authorization status, as of the last query or notification
    pub fn authorization(&self) -> AuthorizationState {
        self.authorization
    }

    pub fn current_position(&self) -> Option<&Position> {
        self.current_position.as_ref()
    }

    pub fn pending_request(&self) -> Option<RequestId> {
        self.pending.as_ref().map(|pending| pending.id)
    }

    pub fn pending_phase(&self) -> Option<RequestPhase> {
        self.pending.as_ref().map(|pending| pending.phase)
    }

    /// Whether position updates are currently running
    pub fn is_updating(&self) -> bool {
        self.updating
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Measure the distance from the device to `coordinate`
    ///
    /// Alerts are presented on `surface`, which is held weakly for the life of
    /// the request. `callback` is invoked exactly once, possibly before this
    /// method returns (denied permission, invalid coordinate, busy slot).
    pub fn request_distance_check<F>(
        &mut self,
        coordinate: Coordinate,
        surface: &Rc<dyn AlertPresenter>,
        callback: F,
    ) -> RequestId
    where
        F: FnOnce(RequestId, Result<DistanceReport>) + 'static,
    {
        let id = self.last_request.next();
        self.last_request = id;
        let callback: ResultCallback = Box::new(callback);

        if let Err(err) = validate_coordinate(&coordinate).into_result(coordinate) {
            tracing::warn!(request = %id, "Rejecting distance check: {}", err);
            callback(id, Err(err));
            return id;
        }

        if let Some(pending) = self.pending.take() {
            match self.config.busy_policy {
                BusyPolicy::Reject => {
                    tracing::info!(request = %id, pending = %pending.id, "Rejecting distance check while busy");
                    let busy = pending.id;
                    self.pending = Some(pending);
                    callback(id, Err(LocationError::Busy { pending: busy }));
                    return id;
                }
                BusyPolicy::Supersede => {
                    tracing::info!(request = %id, superseded = %pending.id, "Superseding pending distance check");
                    let superseded = pending.id;
                    pending.resolve(Err(LocationError::RequestSuperseded { request: superseded }));
                }
            }
        }

        self.pending = Some(PendingRequest {
            id,
            target: coordinate,
            surface: Rc::downgrade(surface),
            callback,
            phase: RequestPhase::AwaitingPermission,
        });

        self.authorization = self.positioning.authorization_status();
        tracing::debug!(request = %id, target = %coordinate, status = %self.authorization, "distance check requested");

        match self.authorization {
            AuthorizationState::NotDetermined => {
                self.present(Alert::permission_prompt(id));
            }
            AuthorizationState::Denied | AuthorizationState::Restricted => {
                self.present(Alert::permission_denied(id));
                self.resolve_pending(Err(LocationError::PermissionDenied));
            }
            AuthorizationState::AuthorizedWhenInUse | AuthorizationState::AuthorizedAlways => {
                self.set_phase(RequestPhase::AwaitingPosition);
                self.start_updates();
            }
            AuthorizationState::Unknown => {
                self.resolve_pending(Err(LocationError::UnknownAuthorizationStatus));
            }
        }

        id
    }

    /// Dispatch a platform event
    pub fn handle_event(&mut self, event: LocatorEvent) {
        match event {
            LocatorEvent::AuthorizationChanged(state) => self.on_authorization_changed(state),
            LocatorEvent::LocationsUpdated(positions) => self.on_locations_updated(positions),
            LocatorEvent::PositioningFailed(error) => self.on_positioning_failed(error),
            LocatorEvent::PermissionPromptAnswered { request, granted } => {
                self.on_permission_prompt_answered(request, granted)
            }
            LocatorEvent::PlacemarksResolved { request, result } => {
                self.on_placemarks_resolved(request, result)
            }
        }
    }

    fn on_permission_prompt_answered(&mut self, request: RequestId, granted: bool) {
        if !self.is_pending(request, &[RequestPhase::AwaitingPermission]) {
            tracing::debug!(request = %request, "Ignoring stale permission prompt answer");
            return;
        }

        if granted {
            self.set_phase(RequestPhase::AwaitingAuthorization);
            self.positioning.request_when_in_use_authorization();
        } else {
            self.resolve_pending(Err(LocationError::PermissionRequestCancelled));
        }
    }

    fn on_authorization_changed(&mut self, state: AuthorizationState) {
        tracing::info!("Authorization status changed: {}", state);
        self.authorization = state;

        if state.is_authorized() {
            let waiting = self
                .pending
                .as_ref()
                .is_some_and(|pending| pending.phase != RequestPhase::Geocoding);
            if waiting {
                self.set_phase(RequestPhase::AwaitingPosition);
            }
            // Warms CurrentPosition even with nothing pending; the next
            // settled request stops the stream again.
            if !self.updating {
                self.start_updates();
            }
        } else if state.is_denied() {
            if self.pending.is_some() {
                self.resolve_pending(Err(LocationError::PermissionDenied));
            } else {
                self.stop_updates();
            }
        }
    }

    fn on_locations_updated(&mut self, positions: Vec<Position>) {
        let Some(position) = positions.into_iter().last() else {
            return;
        };
        tracing::debug!("Updated current position: {}", position.coordinate);
        self.current_position = Some(position);

        let ready = self.pending.as_ref().is_some_and(|pending| {
            matches!(
                pending.phase,
                RequestPhase::AwaitingAuthorization | RequestPhase::AwaitingPosition
            )
        });
        if ready {
            self.begin_resolution();
        }
    }

    fn on_positioning_failed(&mut self, error: PositioningError) {
        tracing::warn!("Positioning error: {}", error);

        let Some(id) = self.pending_request() else {
            return;
        };
        if self.config.alert_on_positioning_error {
            self.present(Alert::error(
                id,
                format!("Could not determine your location: {}", error.message),
            ));
        }
        self.resolve_pending(Err(LocationError::PositioningService(error)));
    }

    fn on_placemarks_resolved(
        &mut self,
        request: RequestId,
        result: std::result::Result<Vec<Placemark>, GeocodeError>,
    ) {
        if !self.is_pending(request, &[RequestPhase::Geocoding]) {
            tracing::debug!(request = %request, "Ignoring stale reverse geocoding result");
            return;
        }

        let label = match result {
            Ok(placemarks) => placemarks.first().and_then(Placemark::description),
            Err(err) => {
                tracing::debug!(request = %request, "Falling back to placeholder label: {}", err);
                None
            }
        };
        self.finish_resolution(label);
    }

    fn begin_resolution(&mut self) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        pending.phase = RequestPhase::Geocoding;
        let (id, target) = (pending.id, pending.target);

        match self.geocoder.clone() {
            Some(geocoder) => geocoder.reverse_geocode(id, target),
            None => self.finish_resolution(None),
        }
    }

    fn finish_resolution(&mut self, place_label: Option<String>) {
        let Some((id, target)) = self.pending.as_ref().map(|pending| (pending.id, pending.target))
        else {
            return;
        };
        let place_label =
            place_label.unwrap_or_else(|| self.config.fallback_place_label.clone());

        let Some(origin) = self.current_position.as_ref().map(|position| position.coordinate)
        else {
            self.present(Alert::error(
                id,
                "Unable to get your current location. Please try again shortly.",
            ));
            self.resolve_pending(Err(LocationError::CurrentLocationUnavailable));
            return;
        };

        let meters = geodesic_distance(&origin, &target);
        let rounded_meters = round_meters(meters);
        self.present(Alert::distance_result(id, &place_label, rounded_meters));

        self.resolve_pending(Ok(DistanceReport {
            request: id,
            origin,
            target,
            meters,
            rounded_meters,
            place_label,
        }));
    }

    /// Clear the slot, stop updates, then run the callback
    fn resolve_pending(&mut self, result: Result<DistanceReport>) {
        if let Some(pending) = self.pending.take() {
            self.stop_updates();
            pending.resolve(result);
        }
    }

    fn present(&self, alert: Alert) {
        let Some(pending) = self.pending.as_ref() else {
            return;
        };
        match pending.surface.upgrade() {
            Some(surface) => surface.present(&alert),
            None => tracing::debug!(
                request = %pending.id,
                "Presentation surface is gone; dropping {:?} alert",
                alert.kind
            ),
        }
    }

    fn is_pending(&self, request: RequestId, phases: &[RequestPhase]) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| pending.id == request && phases.contains(&pending.phase))
    }

    fn set_phase(&mut self, phase: RequestPhase) {
        if let Some(pending) = self.pending.as_mut() {
            pending.phase = phase;
        }
    }

    fn start_updates(&mut self) {
        self.positioning.start_updating_location();
        self.updating = true;
    }

    fn stop_updates(&mut self) {
        if self.updating {
            self.positioning.stop_updating_location();
            self.updating = false;
        }
    }
}

impl fmt::Debug for PermissionGatedLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermissionGatedLocator")
            .field("authorization", &self.authorization)
            .field("current_position", &self.current_position)
            .field("pending", &self.pending)
            .field("last_request", &self.last_request)
            .field("updating", &self.updating)
            .finish_non_exhaustive()
    }
}
