use crate::error::{LocationError, Result};
use crate::models::{Coordinate, Region};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Default label used when reverse geocoding yields nothing
pub const DEFAULT_PLACE_LABEL: &str = "selected location";

/// What to do when a distance check arrives while another is pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BusyPolicy {
    /// Resolve the older request with `RequestSuperseded` and take the slot
    #[default]
    Supersede,
    /// Resolve the newer request with `Busy` and keep the older one
    Reject,
}

/// Settings consumed by the locator
#[derive(Debug, Clone, PartialEq)]
pub struct LocatorConfig {
    pub busy_policy: BusyPolicy,
    pub alert_on_positioning_error: bool,
    pub fallback_place_label: String,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            busy_policy: BusyPolicy::Supersede,
            alert_on_positioning_error: true,
            fallback_place_label: DEFAULT_PLACE_LABEL.to_string(),
        }
    }
}

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for MyLocation
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub busy_policy: ConfigValue<BusyPolicy>,
    pub alert_on_positioning_error: ConfigValue<bool>,
    pub fallback_place_label: ConfigValue<String>,
    pub initial_region: ConfigValue<Region>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            busy_policy: ConfigValue::new(BusyPolicy::Supersede, ConfigSource::Default),
            alert_on_positioning_error: ConfigValue::new(true, ConfigSource::Default),
            fallback_place_label: ConfigValue::new(
                DEFAULT_PLACE_LABEL.to_string(),
                ConfigSource::Default,
            ),
            // Seoul city hall, 5 km across
            initial_region: ConfigValue::new(
                Region::new(Coordinate::new(37.5665, 126.9780), 5000.0),
                ConfigSource::Default,
            ),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| LocationError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| LocationError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(policy) = file_config.busy_policy {
            self.busy_policy.update(policy, ConfigSource::File);
        }

        if let Some(alert) = file_config.alert_on_positioning_error {
            self.alert_on_positioning_error.update(alert, ConfigSource::File);
        }

        if let Some(label) = file_config.fallback_place_label {
            self.fallback_place_label.update(label, ConfigSource::File);
        }

        if let Some(region) = file_config.initial_region {
            let mut merged = self.initial_region.value;
            if let (Some(latitude), Some(longitude)) = (region.latitude, region.longitude) {
                merged.center = Coordinate::new(latitude, longitude);
            } else if region.latitude.is_some() || region.longitude.is_some() {
                return Err(LocationError::ConfigMissing {
                    key: "initial_region.latitude/longitude".to_string(),
                });
            }
            if let Some(span) = region.span_meters {
                if span <= 0.0 {
                    return Err(LocationError::ConfigInvalid {
                        key: "initial_region.span_meters".to_string(),
                        reason: format!("Span must be positive, got {}", span),
                    });
                }
                merged.latitudinal_meters = span;
                merged.longitudinal_meters = span;
            }
            self.initial_region.update(merged, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // MYLOCATION_BUSY_POLICY
        if let Ok(policy_str) = env::var("MYLOCATION_BUSY_POLICY") {
            match parse_busy_policy(&policy_str) {
                Ok(policy) => self.busy_policy.update(policy, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid MYLOCATION_BUSY_POLICY value '{}': expected supersede or reject",
                    policy_str
                ),
            }
        }

        // MYLOCATION_ALERT_ON_POSITIONING_ERROR
        if let Ok(alert_str) = env::var("MYLOCATION_ALERT_ON_POSITIONING_ERROR") {
            match parse_bool(&alert_str) {
                Some(alert) => {
                    self.alert_on_positioning_error.update(alert, ConfigSource::Environment)
                }
                None => tracing::warn!(
                    "Invalid MYLOCATION_ALERT_ON_POSITIONING_ERROR value '{}': expected true or false",
                    alert_str
                ),
            }
        }

        // MYLOCATION_FALLBACK_PLACE_LABEL
        if let Ok(label) = env::var("MYLOCATION_FALLBACK_PLACE_LABEL") {
            if label.trim().is_empty() {
                tracing::warn!("Ignoring empty MYLOCATION_FALLBACK_PLACE_LABEL");
            } else {
                self.fallback_place_label.update(label, ConfigSource::Environment);
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(policy) = overrides.busy_policy {
            self.busy_policy.update(policy, ConfigSource::Cli);
        }

        if let Some(alert) = overrides.alert_on_positioning_error {
            self.alert_on_positioning_error.update(alert, ConfigSource::Cli);
        }

        if let Some(label) = overrides.fallback_place_label {
            self.fallback_place_label.update(label, ConfigSource::Cli);
        }
    }

    /// The subset of settings the locator needs
    pub fn locator_config(&self) -> LocatorConfig {
        LocatorConfig {
            busy_policy: self.busy_policy.value,
            alert_on_positioning_error: self.alert_on_positioning_error.value,
            fallback_place_label: self.fallback_place_label.value.clone(),
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "busy_policy".to_string(),
            (format!("{:?}", self.busy_policy.value), self.busy_policy.source),
        );

        map.insert(
            "alert_on_positioning_error".to_string(),
            (
                self.alert_on_positioning_error.value.to_string(),
                self.alert_on_positioning_error.source,
            ),
        );

        map.insert(
            "fallback_place_label".to_string(),
            (self.fallback_place_label.value.clone(), self.fallback_place_label.source),
        );

        let region = &self.initial_region.value;
        map.insert(
            "initial_region".to_string(),
            (
                format!("{} ({} m)", region.center, region.latitudinal_meters),
                self.initial_region.source,
            ),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    busy_policy: Option<BusyPolicy>,
    alert_on_positioning_error: Option<bool>,
    fallback_place_label: Option<String>,
    initial_region: Option<FileRegion>,
}

#[derive(Debug, Deserialize, Serialize)]
struct FileRegion {
    latitude: Option<f64>,
    longitude: Option<f64>,
    span_meters: Option<f64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub busy_policy: Option<BusyPolicy>,
    pub alert_on_positioning_error: Option<bool>,
    pub fallback_place_label: Option<String>,
}

/// Parse busy policy from string
pub fn parse_busy_policy(s: &str) -> Result<BusyPolicy> {
    match s.trim().to_lowercase().as_str() {
        "supersede" => Ok(BusyPolicy::Supersede),
        "reject" => Ok(BusyPolicy::Reject),
        _ => Err(LocationError::ConfigInvalid {
            key: "busy_policy".to_string(),
            reason: format!("Invalid busy policy: {}. Use supersede or reject", s),
        }),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
