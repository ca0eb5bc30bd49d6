//! `fuel` command: ask the backend how many gallons are needed.

use std::io::Write;

use gasrec_client::BackendClient;
use gasrec_core::{estimate, FuelInputType};

use crate::status::{StatusKind, StatusReporter};

/// Lenient numeric parse; anything unparseable counts as missing.
pub(crate) fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
}

/// Incomplete input is a silent no-op. A transport or backend failure is
/// logged and leaves nothing on screen; it never fails the command.
///
/// Returns the gallons needed when the backend answered.
pub(crate) async fn run_fuel<W: Write>(
    client: &BackendClient,
    reporter: &StatusReporter<W>,
    input_type: FuelInputType,
    value: Option<&str>,
    tank_size: Option<&str>,
) -> Option<f64> {
    let Some(request) = estimate(input_type, parse_number(value), parse_number(tank_size)) else {
        tracing::debug!("fuel inputs incomplete; skipping calculation");
        return None;
    };

    match client.calculate_fuel(&request).await {
        Ok(result) => {
            reporter.report(
                StatusKind::Info,
                format!("Fuel needed: {:.1} gallons", result.fuel_needed),
            );
            Some(result.fuel_needed)
        }
        Err(e) => {
            tracing::warn!(error = %e, "fuel calculation failed");
            None
        }
    }
}
