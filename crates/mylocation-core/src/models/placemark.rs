use serde::{Deserialize, Serialize};

/// Human-readable place descriptor returned by reverse geocoding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placemark {
    pub thoroughfare: Option<String>,
    pub locality: Option<String>,
    pub administrative_area: Option<String>,
    pub country: Option<String>,
}

impl Placemark {
    /// Join the known parts, most specific first
    ///
    /// Returns `None` when nothing printable remains.
    pub fn description(&self) -> Option<String> {
        let joined = [&self.thoroughfare, &self.locality, &self.administrative_area, &self.country]
            .into_iter()
            .flatten()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_skips_missing_parts() {
        let placemark = Placemark {
            thoroughfare: Some("Sejong-daero".to_string()),
            locality: None,
            administrative_area: Some("Seoul".to_string()),
            country: Some("South Korea".to_string()),
        };

        assert_eq!(placemark.description().as_deref(), Some("Sejong-daero, Seoul, South Korea"));
    }

    #[test]
    fn test_empty_placemark_has_no_description() {
        assert_eq!(Placemark::default().description(), None);

        let blank = Placemark { locality: Some("   ".to_string()), ..Default::default() };
        assert_eq!(blank.description(), None);
    }
}
