//! Distance command implementation

use crate::cli::DistanceArgs;
use crate::output::OutputWriter;
use crate::output_types::DistanceOutput;
use anyhow::Result;
use mylocation_geo::{geodesic_distance, haversine_distance, round_meters, validate_coordinate};

pub fn execute(args: DistanceArgs, output: &OutputWriter) -> Result<()> {
    let from = validate_coordinate(&args.from).into_result(args.from)?;
    let to = validate_coordinate(&args.to).into_result(args.to)?;

    let (method, meters) = if args.haversine {
        ("haversine", haversine_distance(&from, &to))
    } else {
        ("geodesic", geodesic_distance(&from, &to))
    };
    let rounded_meters = round_meters(meters);

    if output.is_json() {
        output.result("success", DistanceOutput { from, to, method, meters, rounded_meters })?;
    } else {
        output.success(format!("{} m", rounded_meters));
        output.kv("From", from);
        output.kv("To", to);
        output.kv("Method", method);
        output.kv("Exact", format!("{:.3} m", meters));
    }

    Ok(())
}
