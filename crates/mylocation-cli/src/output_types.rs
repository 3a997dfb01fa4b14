use geojson::{Feature, Geometry, JsonObject, Value};
use mylocation_core::models::{Alert, Annotation, Coordinate};
use serde::Serialize;
use tabled::Tabled;

/// Output for distance command
#[derive(Debug, Serialize)]
pub struct DistanceOutput {
    pub from: Coordinate,
    pub to: Coordinate,
    pub method: &'static str,
    pub meters: f64,
    pub rounded_meters: u64,
}

/// Output for check command
#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub request: u64,
    pub authorization: String,
    pub target: Coordinate,
    pub origin: Option<Coordinate>,
    pub meters: Option<f64>,
    pub rounded_meters: Option<u64>,
    pub place_label: Option<String>,
    pub error: Option<String>,
    /// The dropped pin as a GeoJSON Feature
    pub pin: Option<Feature>,
    pub alerts: Vec<Alert>,
    /// Every tap in order, including ones displaced by the busy policy
    pub taps: Vec<TapSummary>,
}

/// How one tap of a check session ended
#[derive(Debug, Serialize)]
pub struct TapSummary {
    pub request: u64,
    pub target: Coordinate,
    pub status: &'static str,
    pub error: Option<String>,
}

/// One row of the config table
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

/// Convert a map pin into a GeoJSON point feature (lon, lat order)
pub fn annotation_feature(annotation: &Annotation) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("title".to_string(), annotation.title.clone().into());

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![
            annotation.coordinate.longitude,
            annotation.coordinate.latitude,
        ]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_feature_uses_lon_lat() {
        let pin = Annotation::new(Coordinate::new(37.5651, 126.9895), "selected location");
        let feature = annotation_feature(&pin);

        let json = serde_json::to_value(&feature).unwrap();
        assert_eq!(json["geometry"]["type"], "Point");
        assert_eq!(json["geometry"]["coordinates"][0], 126.9895);
        assert_eq!(json["geometry"]["coordinates"][1], 37.5651);
        assert_eq!(json["properties"]["title"], "selected location");
    }
}
