//! Platform events and the main loop that delivers them.

use crate::locator::PermissionGatedLocator;
use mylocation_core::models::{AuthorizationState, Placemark, Position, RequestId};
use mylocation_core::{GeocodeError, PositioningError};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Asynchronous notifications addressed to the locator
#[derive(Debug, Clone, PartialEq)]
pub enum LocatorEvent {
    /// The platform authorization status changed
    AuthorizationChanged(AuthorizationState),
    /// One or more fixes arrived; the last one is the newest
    LocationsUpdated(Vec<Position>),
    /// The positioning service reported a device-level failure
    PositioningFailed(PositioningError),
    /// The user answered the in-app permission prompt
    PermissionPromptAnswered { request: RequestId, granted: bool },
    /// A reverse geocoding lookup finished
    PlacemarksResolved {
        request: RequestId,
        result: Result<Vec<Placemark>, GeocodeError>,
    },
}

/// Cloneable handle for posting events onto the main loop
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    queue: Rc<RefCell<VecDeque<LocatorEvent>>>,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event; it is delivered after everything already queued
    pub fn post(&self, event: LocatorEvent) {
        self.queue.borrow_mut().push_back(event);
    }

    fn pop(&self) -> Option<LocatorEvent> {
        self.queue.borrow_mut().pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

/// Single-threaded event loop owning the locator
pub struct MainLoop {
    locator: PermissionGatedLocator,
    sink: EventSink,
}

impl MainLoop {
    pub fn new(locator: PermissionGatedLocator, sink: EventSink) -> Self {
        Self { locator, sink }
    }

    pub fn sink(&self) -> &EventSink {
        &self.sink
    }

    pub fn locator(&self) -> &PermissionGatedLocator {
        &self.locator
    }

    pub fn locator_mut(&mut self) -> &mut PermissionGatedLocator {
        &mut self.locator
    }

    /// Deliver one queued event, if any
    pub fn dispatch_next(&mut self) -> bool {
        match self.sink.pop() {
            Some(event) => {
                self.locator.handle_event(event);
                true
            }
            None => false,
        }
    }

    /// Deliver queued events in FIFO order until the queue is empty
    ///
    /// Events posted by handlers while draining are delivered in the same call.
    /// Returns the number of events dispatched.
    pub fn run_until_idle(&mut self) -> usize {
        let mut dispatched = 0;
        while self.dispatch_next() {
            dispatched += 1;
        }
        tracing::trace!(dispatched, "main loop idle");
        dispatched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_is_fifo() {
        let sink = EventSink::new();
        sink.post(LocatorEvent::AuthorizationChanged(AuthorizationState::Denied));
        sink.post(LocatorEvent::AuthorizationChanged(AuthorizationState::AuthorizedAlways));

        assert_eq!(sink.len(), 2);
        assert_eq!(
            sink.pop(),
            Some(LocatorEvent::AuthorizationChanged(AuthorizationState::Denied))
        );
        assert_eq!(
            sink.pop(),
            Some(LocatorEvent::AuthorizationChanged(AuthorizationState::AuthorizedAlways))
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_clones_share_queue() {
        let sink = EventSink::new();
        let other = sink.clone();
        other.post(LocatorEvent::LocationsUpdated(Vec::new()));
        assert_eq!(sink.len(), 1);
    }
}
