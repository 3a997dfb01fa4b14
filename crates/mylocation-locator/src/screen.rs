//! Map screen: turns taps into pins and distance checks.

use crate::locator::PermissionGatedLocator;
use mylocation_core::error::Result;
use mylocation_core::models::{Alert, Annotation, Coordinate, DistanceReport, Region, RequestId};
use mylocation_core::ports::{AlertPresenter, MapSurface};
use std::cell::RefCell;
use std::rc::Rc;

/// Outcome of the distance check started by one tap
#[derive(Debug)]
pub struct TapOutcome {
    pub request: RequestId,
    pub result: Result<DistanceReport>,
}

/// Presentation layer for the map
///
/// The screen is the UI context handed to the locator: alerts the locator
/// raises go through the screen to its dialog collaborator.
pub struct MapScreen {
    map: Rc<dyn MapSurface>,
    dialogs: Rc<dyn AlertPresenter>,
    initial_region: Region,
    pin_title: String,
    outcomes: Rc<RefCell<Vec<TapOutcome>>>,
}

impl MapScreen {
    pub fn new(
        map: Rc<dyn MapSurface>,
        dialogs: Rc<dyn AlertPresenter>,
        initial_region: Region,
        pin_title: impl Into<String>,
    ) -> Rc<Self> {
        Rc::new(Self {
            map,
            dialogs,
            initial_region,
            pin_title: pin_title.into(),
            outcomes: Rc::new(RefCell::new(Vec::new())),
        })
    }

    /// Show the initial viewport
    pub fn load(&self) {
        self.map.set_region(self.initial_region);
    }

    /// Replace the pin with one at `coordinate` and start a distance check
    ///
    /// The pin is placed before the check starts and stays regardless of its outcome.
    pub fn handle_tap(
        self: &Rc<Self>,
        locator: &mut PermissionGatedLocator,
        coordinate: Coordinate,
    ) -> RequestId {
        tracing::debug!("Tapped coordinate: {}", coordinate);

        self.map.remove_all_annotations();
        self.map.add_annotation(Annotation::new(coordinate, self.pin_title.clone()));

        let surface: Rc<dyn AlertPresenter> = self.clone();
        let outcomes = Rc::clone(&self.outcomes);

        locator.request_distance_check(coordinate, &surface, move |request, result| {
            match &result {
                Ok(report) => tracing::info!(
                    "Distance calculation completed: {} m to {}",
                    report.rounded_meters,
                    report.place_label
                ),
                Err(err) => tracing::warn!(request = %request, "Distance check error: {}", err),
            }
            outcomes.borrow_mut().push(TapOutcome { request, result });
        })
    }

    pub fn annotations(&self) -> Vec<Annotation> {
        self.map.annotations()
    }

    /// Drain the outcomes collected so far, oldest first
    pub fn take_outcomes(&self) -> Vec<TapOutcome> {
        self.outcomes.borrow_mut().drain(..).collect()
    }
}

impl AlertPresenter for MapScreen {
    fn present(&self, alert: &Alert) {
        self.dialogs.present(alert);
    }

    fn open_settings(&self) {
        self.dialogs.open_settings();
    }
}
