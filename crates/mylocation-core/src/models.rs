pub mod alert;
pub mod authorization;
pub mod coordinate;
pub mod map;
pub mod placemark;
pub mod request;

pub use alert::{ActionRole, Alert, AlertAction, AlertKind};
pub use authorization::AuthorizationState;
pub use coordinate::{Coordinate, Position};
pub use map::{Annotation, Region};
pub use placemark::Placemark;
pub use request::{DistanceReport, RequestId};
