use crate::models::{Annotation, Region};

/// Port for the map display
pub trait MapSurface {
    fn set_region(&self, region: Region);

    fn add_annotation(&self, annotation: Annotation);

    fn remove_all_annotations(&self);

    /// Pins currently on the map
    fn annotations(&self) -> Vec<Annotation>;
}
