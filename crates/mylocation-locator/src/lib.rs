//! MyLocation Locator - Permission-gated distance checks
//!
//! This crate holds the `PermissionGatedLocator` state machine, the
//! single-threaded main loop that feeds it platform events, the map screen
//! that drives it from taps, and in-memory collaborators for tests and demos.

pub mod events;
pub mod locator;
pub mod memory;
pub mod screen;

pub use events::{EventSink, LocatorEvent, MainLoop};
pub use locator::{PermissionGatedLocator, RequestPhase, ResultCallback};
pub use screen::{MapScreen, TapOutcome};
