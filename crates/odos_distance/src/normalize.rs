use crate::{
    distance_query::CanonicalQuery,
    distance_record::{DistanceRecord, DistanceResults},
    error::DistanceMatrixError,
    google_api::{MatrixElement, MatrixResponse},
};

/// Service-level and per-element success sentinel.
const STATUS_OK: &str = "OK";

/// Reported when the service omits duration_in_traffic, e.g. when the
/// credential lacks the traffic feature.
pub const DURATION_IN_TRAFFIC_FALLBACK: &str = "Unknown due to invalid API key";

/// Flatten a raw response matrix into caller-facing records.
///
/// Output order is part of the contract: origin index outer, destination
/// index inner. The first non-OK element fails the whole batch; no partial
/// results are returned. A lone record collapses out of its sequence unless
/// the query was batched.
pub fn normalize(
    raw: &MatrixResponse,
    query: &CanonicalQuery,
) -> Result<DistanceResults, DistanceMatrixError> {
    if raw.status != STATUS_OK {
        return Err(DistanceMatrixError::ServiceStatus {
            status: raw.status.clone(),
            message: raw.error_message.clone().unwrap_or_default(),
        });
    }

    let mut records =
        Vec::with_capacity(raw.origin_addresses.len() * raw.destination_addresses.len());

    for (i, origin) in raw.origin_addresses.iter().enumerate() {
        let row = raw
            .rows
            .get(i)
            .ok_or(DistanceMatrixError::IncompleteResponse)?;

        for (j, destination) in raw.destination_addresses.iter().enumerate() {
            let element = row
                .elements
                .get(j)
                .ok_or(DistanceMatrixError::IncompleteResponse)?;

            if element.status != STATUS_OK {
                return Err(DistanceMatrixError::ElementStatus(element.status.clone()));
            }

            records.push(format_record(element, origin, destination, query)?);
        }
    }

    if !query.batch_mode && records.len() == 1 {
        if let Some(record) = records.pop() {
            return Ok(DistanceResults::Single(record));
        }
    }

    Ok(DistanceResults::Batch(records))
}

fn format_record(
    element: &MatrixElement,
    origin: &str,
    destination: &str,
    query: &CanonicalQuery,
) -> Result<DistanceRecord, DistanceMatrixError> {
    // OK elements carry both fields; anything else is a half-formed body.
    let distance = element
        .distance
        .as_ref()
        .ok_or(DistanceMatrixError::IncompleteResponse)?;
    let duration = element
        .duration
        .as_ref()
        .ok_or(DistanceMatrixError::IncompleteResponse)?;

    let (duration_in_traffic, duration_in_traffic_value) = match &element.duration_in_traffic {
        Some(traffic) => (traffic.text.clone(), traffic.value),
        None => (DURATION_IN_TRAFFIC_FALLBACK.to_string(), 0),
    };

    Ok(DistanceRecord {
        index: query.index.clone(),
        distance: distance.text.clone(),
        distance_value: distance.value,
        duration: duration.text.clone(),
        duration_value: duration.value,
        duration_in_traffic,
        duration_in_traffic_value,
        origin: origin.to_string(),
        destination: destination.to_string(),
        mode: query.mode.clone(),
        units: query.units.clone(),
        language: query.language.clone(),
        avoid: query.avoid.clone(),
        sensor: query.sensor,
    })
}
