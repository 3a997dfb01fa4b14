//! Port trait definitions
//!
//! These traits define the collaborators the locator and the map screen talk to.
//! Everything runs on one event loop, so the traits take `&self` and adapters
//! use interior mutability where they need state.

pub mod geocoding;
pub mod map;
pub mod positioning;
pub mod presentation;

pub use geocoding::Geocoder;
pub use map::MapSurface;
pub use positioning::PositioningService;
pub use presentation::AlertPresenter;
