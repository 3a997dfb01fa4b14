use clap::{Parser, Subcommand, ValueEnum};
use mylocation_core::config::BusyPolicy;
use mylocation_core::models::{AuthorizationState, Coordinate};
use std::path::PathBuf;

/// MyLocation - distance from your location to a point on the map
#[derive(Parser, Debug)]
#[command(name = "mylocation")]
#[command(about = "Permission-gated distance checks to a tapped map point", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to a TOML config file (defaults to ./mylocation.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Geodesic distance between two coordinates
    Distance(DistanceArgs),

    /// Simulate tapping a map point and run the full permission-gated check
    Check(CheckArgs),

    /// Show effective configuration and where each value comes from
    Config,
}

#[derive(Parser, Debug)]
pub struct DistanceArgs {
    /// Start point as "lat,lon"
    #[arg(value_parser = parse_coordinate, allow_hyphen_values = true)]
    pub from: Coordinate,

    /// End point as "lat,lon"
    #[arg(value_parser = parse_coordinate, allow_hyphen_values = true)]
    pub to: Coordinate,

    /// Use the spherical haversine formula instead of the WGS 84 geodesic
    #[arg(long)]
    pub haversine: bool,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Tapped point as "lat,lon"
    #[arg(value_parser = parse_coordinate, allow_hyphen_values = true)]
    pub target: Coordinate,

    /// Simulated device position as "lat,lon"
    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true, default_value = "37.5665,126.9780")]
    pub position: Coordinate,

    /// Authorization status before the tap
    #[arg(long, value_enum, default_value = "when-in-use")]
    pub auth: AuthArg,

    /// How to answer alerts that offer a choice
    #[arg(long, value_enum, default_value = "accept")]
    pub prompt: PromptArg,

    /// Status the system prompt settles on when permission is requested
    #[arg(long, value_enum, default_value = "when-in-use")]
    pub grant: AuthArg,

    /// Make the positioning service fail with this message
    #[arg(long, value_name = "MESSAGE")]
    pub fail: Option<String>,

    /// Place name the reverse geocoder returns (none: fallback label)
    #[arg(long)]
    pub place: Option<String>,

    /// Tap this point too, before the first check settles (repeatable)
    #[arg(long, value_name = "LAT,LON", value_parser = parse_coordinate, allow_hyphen_values = true)]
    pub then: Vec<Coordinate>,

    /// Policy for a tap arriving while a check is pending
    #[arg(long, value_enum)]
    pub busy_policy: Option<BusyPolicyArg>,

    /// Do not show an alert for positioning service errors
    #[arg(long)]
    pub no_error_alert: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AuthArg {
    Unknown,
    NotDetermined,
    Denied,
    Restricted,
    WhenInUse,
    Always,
}

impl From<AuthArg> for AuthorizationState {
    fn from(arg: AuthArg) -> Self {
        match arg {
            AuthArg::Unknown => AuthorizationState::Unknown,
            AuthArg::NotDetermined => AuthorizationState::NotDetermined,
            AuthArg::Denied => AuthorizationState::Denied,
            AuthArg::Restricted => AuthorizationState::Restricted,
            AuthArg::WhenInUse => AuthorizationState::AuthorizedWhenInUse,
            AuthArg::Always => AuthorizationState::AuthorizedAlways,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PromptArg {
    /// Choose the affirmative action
    Accept,
    /// Choose the cancel action
    Cancel,
    /// Ask on the terminal
    Ask,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BusyPolicyArg {
    Supersede,
    Reject,
}

impl From<BusyPolicyArg> for BusyPolicy {
    fn from(arg: BusyPolicyArg) -> Self {
        match arg {
            BusyPolicyArg::Supersede => BusyPolicy::Supersede,
            BusyPolicyArg::Reject => BusyPolicy::Reject,
        }
    }
}

/// Parse "lat,lon" into a coordinate
pub fn parse_coordinate(s: &str) -> Result<Coordinate, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("Expected \"lat,lon\", got \"{}\"", s))?;
    let latitude: f64 =
        lat.trim().parse().map_err(|_| format!("Invalid latitude: {}", lat.trim()))?;
    let longitude: f64 =
        lon.trim().parse().map_err(|_| format!("Invalid longitude: {}", lon.trim()))?;
    Ok(Coordinate::new(latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("37.5665,126.978").unwrap(), Coordinate::new(37.5665, 126.978));
        assert_eq!(parse_coordinate("-8.5, 115.26").unwrap(), Coordinate::new(-8.5, 115.26));
        assert!(parse_coordinate("37.5").is_err());
        assert!(parse_coordinate("north,east").is_err());
    }

    #[test]
    fn test_cli_parses_check() {
        let cli = Cli::try_parse_from([
            "mylocation",
            "check",
            "-33.86,151.21",
            "--auth",
            "not-determined",
            "--prompt",
            "cancel",
        ])
        .unwrap();

        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.target, Coordinate::new(-33.86, 151.21));
                assert_eq!(args.prompt, PromptArg::Cancel);
                assert!(matches!(args.auth, AuthArg::NotDetermined));
            }
            other => panic!("Unexpected command: {other:?}"),
        }
    }
}
