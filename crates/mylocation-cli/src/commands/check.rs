//! Check command implementation
//!
//! Wires the locator to simulated platform services and a terminal presenter,
//! taps the map, and runs the main loop until the check settles. Taps given
//! with `--then` land while the first check is still pending, so the busy
//! policy decides which one is reported.

use crate::cli::{CheckArgs, PromptArg};
use crate::output::OutputWriter;
use crate::output_types::{annotation_feature, CheckOutput, TapSummary};
use crate::prompt::ConsolePresenter;
use anyhow::{bail, Result};
use mylocation_core::config::LayeredConfig;
use mylocation_core::models::{AuthorizationState, Coordinate, Placemark, Position, RequestId};
use mylocation_core::{LocationError, PositioningError, PositioningErrorCode};
use mylocation_locator::memory::{
    FixScript, MemoryMapSurface, SimulatedPositioningService, StaticGeocoder,
};
use mylocation_locator::{EventSink, MainLoop, MapScreen, PermissionGatedLocator, TapOutcome};
use std::rc::Rc;

pub fn execute(args: CheckArgs, output: &OutputWriter, config: &LayeredConfig) -> Result<()> {
    if args.prompt == PromptArg::Ask && output.is_json() {
        bail!("--prompt ask needs a terminal and cannot be combined with --json");
    }

    let sink = EventSink::new();
    let authorization: AuthorizationState = args.auth.into();

    let script = match &args.fail {
        Some(message) => FixScript::Failure(PositioningError::new(
            PositioningErrorCode::LocationUnknown,
            message.clone(),
        )),
        None => FixScript::Fix(Position::new(args.position)),
    };
    let service = Rc::new(
        SimulatedPositioningService::new(sink.clone(), authorization)
            .with_grant(args.grant.into())
            .with_script(script),
    );

    let placemarks = args
        .place
        .iter()
        .map(|place| Placemark { locality: Some(place.clone()), ..Default::default() })
        .collect();
    let geocoder = Rc::new(StaticGeocoder::new(sink.clone(), placemarks));

    let dialogs = Rc::new(ConsolePresenter::new(sink.clone(), args.prompt, output.is_json()));
    let map = Rc::new(MemoryMapSurface::new());
    let screen = MapScreen::new(
        map,
        dialogs.clone(),
        config.initial_region.value,
        config.fallback_place_label.value.clone(),
    );

    let locator = PermissionGatedLocator::new(service.clone(), config.locator_config())
        .with_geocoder(geocoder);
    let mut main = MainLoop::new(locator, sink);

    screen.load();
    let taps: Vec<_> = std::iter::once(args.target)
        .chain(args.then.iter().copied())
        .map(|target| (screen.handle_tap(main.locator_mut(), target), target))
        .collect();
    let dispatched = main.run_until_idle();
    tracing::debug!(dispatched, taps = taps.len(), "simulated session settled");

    let pin = screen.annotations().first().map(annotation_feature);
    let mut outcomes = screen.take_outcomes();
    let summaries: Vec<TapSummary> = taps
        .iter()
        .map(|(request, target)| tap_summary(*request, *target, &outcomes))
        .collect();

    // The tap that held the slot until the end is the one reported
    let Some(index) = outcomes.iter().rposition(|outcome| !is_displaced(outcome)) else {
        if let Some((request, _)) = taps.last() {
            output.warning(format!("Distance check {} is still pending", request));
        }
        return Ok(());
    };
    let outcome = outcomes.remove(index);
    let request = outcome.request;
    let target = taps
        .iter()
        .find(|(id, _)| *id == request)
        .map_or(args.target, |(_, target)| *target);

    if !output.is_json() {
        for summary in summaries.iter().filter(|summary| summary.request != request.0) {
            output.info(format!(
                "Tap #{} at {}: {}",
                summary.request,
                summary.target,
                summary.error.as_deref().unwrap_or(summary.status)
            ));
        }
    }

    let mut result = CheckOutput {
        request: request.0,
        authorization: main.locator().authorization().to_string(),
        target,
        origin: None,
        meters: None,
        rounded_meters: None,
        place_label: None,
        error: None,
        pin,
        alerts: dialogs.alerts(),
        taps: summaries,
    };

    match outcome.result {
        Ok(report) => {
            if !output.is_json() {
                output.section("Distance Check");
                output.kv("From", report.origin);
                output.kv("To", report.target);
                output.kv("Place", &report.place_label);
                output.success(format!("{} m", report.rounded_meters));
            }
            result.origin = Some(report.origin);
            result.meters = Some(report.meters);
            result.rounded_meters = Some(report.rounded_meters);
            result.place_label = Some(report.place_label);
            if output.is_json() {
                output.result("success", result)?;
            }
        }
        Err(err) => {
            if output.is_json() {
                result.error = Some(err.to_string());
                output.result("failed", result)?;
            } else {
                output.error(format!("Distance check failed: {}", err));
                if err.is_permission_error() {
                    output.info("Permission status can be changed with --auth or --grant");
                }
            }
        }
    }

    Ok(())
}

fn is_displaced(outcome: &TapOutcome) -> bool {
    matches!(
        outcome.result,
        Err(LocationError::RequestSuperseded { .. } | LocationError::Busy { .. })
    )
}

fn tap_summary(request: RequestId, target: Coordinate, outcomes: &[TapOutcome]) -> TapSummary {
    let (status, error) = match outcomes.iter().find(|outcome| outcome.request == request) {
        None => ("pending", None),
        Some(TapOutcome { result: Ok(_), .. }) => ("success", None),
        Some(outcome) if is_displaced(outcome) => {
            ("displaced", outcome.result.as_ref().err().map(ToString::to_string))
        }
        Some(TapOutcome { result: Err(err), .. }) => ("failed", Some(err.to_string())),
    };
    TapSummary { request: request.0, target, status, error }
}
